use anyhow::Result;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use log::error;
use once_cell::sync::OnceCell;
use std::fs;
use std::path::Path;

// The handle must stay alive for the logger to keep writing.
static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Default level per build profile.
pub fn default_level() -> &'static str {
    if cfg!(debug_assertions) { "debug" } else { "info" }
}

/// Starts rotated file logging under `dir/logs`. The TUI owns the terminal,
/// so files are the only sink. Calling this again is a no-op.
pub fn init(level: &str, dir: &Path) -> Result<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let log_dir = dir.join("logs");
    fs::create_dir_all(&log_dir)?;
    let handle = Logger::try_with_str(level)?
        .log_to_file(FileSpec::default().directory(&log_dir).basename("afaire"))
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;
    if LOGGER.set(handle).is_ok() {
        install_panic_hook();
    }
    Ok(())
}

/// Records panics in the log before the default hook runs; a panic inside
/// the alternate screen would otherwise vanish along with it.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        error!("PANIC: {info}");
        default_hook(info);
    }));
}
