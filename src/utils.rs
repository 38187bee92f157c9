use std::io;
use std::path::PathBuf;

const CACHE_DIR_NAME: &str = "air_quality_rs_cache";

/// Default location of the parquet cache, inside the platform cache directory.
pub fn get_cache_dir() -> io::Result<PathBuf> {
    dirs::cache_dir()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine system cache directory",
            )
        })
        .map(|p| p.join(CACHE_DIR_NAME))
}
