use anyhow::Result;
use std::path::Path;
use std::sync::Mutex;

/// Log to stderr for one-shot commands. Warnings only unless `debug` is set,
/// so stdout and stderr stay readable in pipelines.
pub fn init_stderr(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();
}

/// Log to a file for interactive mode; writing to the terminal would corrupt
/// the screen.
pub fn init_file(path: &Path, debug: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init();

    if debug {
        tracing::info!("Debug mode enabled - verbose logging active");
    }

    Ok(())
}
