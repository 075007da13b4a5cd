use std::env;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Target, WriteStyle};

const LOG_FILE_NAME: &str = "arena-snake.log";

/// Returns the default log file location.
#[must_use]
pub fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("arena-snake")
        .join(LOG_FILE_NAME)
}

/// Opens `path` for appending, creating its directory first.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global logger when `RUST_LOG` is set.
///
/// Records go to `path` rather than stderr, which the alternate screen owns
/// while the game runs. Returns the file in use, or `None` when logging is
/// off.
pub fn init(path: &Path) -> io::Result<Option<PathBuf>> {
    if env::var_os("RUST_LOG").is_none() {
        return Ok(None);
    }

    let file = open_log_file(path)?;
    pretty_env_logger::formatted_builder()
        .parse_default_env()
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|error| io::Error::other(error.to_string()))?;

    Ok(Some(path.to_path_buf()))
}
