mod cli;

use anyhow::Context;
use cli::Args;
use kpindex::KpIndex;
use log::info;

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let client = match &args.cache_dir {
        Some(dir) => KpIndex::with_cache_folder(dir.clone()).await,
        None => KpIndex::new().await,
    }
    .context("failed to initialize the cache store")?;

    info!("Rendering Kp chart for {}", args.year);
    let path = client
        .render_year()
        .year(args.year)
        .offline(args.offline)
        .output_dir(args.output_dir.clone())
        .call()
        .await
        .with_context(|| format!("could not render a chart for {}", args.year))?;

    println!("Chart saved to {}", path.display());
    Ok(())
}
