use log::info;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

const CACHE_DIR_NAME: &str = "kpindex_cache";

pub fn get_cache_dir() -> io::Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(CACHE_DIR_NAME))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine system cache directory",
            )
        })
}

pub async fn ensure_cache_dir_exists(path: &Path) -> io::Result<()> {
    match fs::metadata(path).await {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("cache path exists but is not a directory: {}", path.display()),
                ));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating cache directory: {}", path.display());
            fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_a_missing_cache_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("cache");

        ensure_cache_dir_exists(&target).await.unwrap();

        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn accepts_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();

        ensure_cache_dir_exists(dir.path()).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_a_file_in_the_way() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("cache");
        tokio::fs::write(&target, b"").await.unwrap();

        assert!(ensure_cache_dir_exists(&target).await.is_err());
    }
}
