use std::path::PathBuf;

/// Structure representing command-line arguments.
#[derive(Debug)]
pub struct Args {
    pub year: i32,
    pub cache_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub offline: bool,
}

impl Args {
    /// Parses command-line arguments using `clap`.
    pub fn parse() -> Self {
        Self::from_matches(Self::command().get_matches())
    }

    fn command() -> clap::Command {
        clap::Command::new("kpindex")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Chart planetary Kp-index storm events and the sunspot trend for a year")
            .arg(
                clap::Arg::new("year")
                    .help("Four-digit year to chart (1932 up to the current year)")
                    .required(true)
                    .num_args(1)
                    .value_parser(clap::builder::ValueParser::new(parse_year)),
            )
            .arg(
                clap::Arg::new("cache-dir")
                    .long("cache-dir")
                    .help("Directory for cached Kp and sunspot data (default: the user cache directory)")
                    .num_args(1),
            )
            .arg(
                clap::Arg::new("output-dir")
                    .short('o')
                    .long("output-dir")
                    .help("Directory the chart PNG is written to (default: the current directory)")
                    .num_args(1),
            )
            .arg(
                clap::Arg::new("offline")
                    .long("offline")
                    .help("Never contact the remote services; use cached data only")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Args {
            year: *matches.get_one::<i32>("year").unwrap(),
            cache_dir: matches.get_one::<String>("cache-dir").map(PathBuf::from),
            output_dir: matches
                .get_one::<String>("output-dir")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            offline: matches.get_flag("offline"),
        }
    }
}

/// Validates that the year argument at least looks like a four-digit year.
/// The supported-range check happens in the library, before any fetch.
fn parse_year(s: &str) -> Result<i32, String> {
    match s.parse::<i32>() {
        Ok(y) if (1000..=9999).contains(&y) => Ok(y),
        Ok(_) => Err("Must be a four-digit year".to_string()),
        Err(e) => Err(format!("Not a valid year: {}", e)),
    }
}
