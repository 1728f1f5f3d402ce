use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::config::APP_DIR;

const DEFAULT_FILTER: &str = "storycrafter=info,eframe=warn,egui=warn,reqwest=warn";

fn log_path() -> Option<PathBuf> {
    let mut dir = dirs::data_dir()?;
    dir.push(APP_DIR);
    dir.push("logs");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("storycrafter.log"))
}

/// File logging under the data dir, stderr if the file can't be opened.
/// `RUST_LOG` replaces the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file = log_path().and_then(|path| {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map(|file| (path, file))
            .ok()
    });

    match file {
        Some((path, file)) => {
            let result = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(move || {
                    file.try_clone()
                        .map(Box::new)
                        .map(|f| f as Box<dyn std::io::Write>)
                        .unwrap_or_else(|_| Box::new(std::io::stderr()))
                })
                .try_init();

            if result.is_ok() {
                tracing::info!(path = %path.display(), "logging to file");
            }
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
            tracing::warn!("could not open log file, logging to stderr");
        }
    }
}
