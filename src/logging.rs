use std::fs::File;
use std::io;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "grid-snake.log";

/// Routes `log` output to `path`; the terminal is owned by the UI.
///
/// A second call in the same process leaves the first logger in place.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = File::create(path)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    if WriteLogger::init(level, config, file).is_err() {
        log::warn!("logger already initialised; keeping the existing one");
    }
    Ok(())
}
