use std::fs;
use std::path::PathBuf;

use eframe::egui;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::{info, warn};

use crate::error::PlatformError;

pub const SHARE_TITLE: &str = "A Story from StoryCrafter";

/// Host integrations the controller needs. Kept free of egui so the
/// controller can be driven by a fake in tests.
pub trait Platform {
    fn copy_text(&mut self, text: &str) -> Result<(), PlatformError>;

    fn share(&mut self, title: &str, text: &str) -> Result<(), PlatformError>;

    /// `Ok(None)` when the user cancelled the dialog.
    fn export_text(&mut self, file_name: &str, text: &str) -> Result<Option<PathBuf>, PlatformError>;
}

/// No launcher on the system (e.g. missing `xdg-open`) means sharing is unsupported.
fn share_error(e: std::io::Error) -> PlatformError {
    if e.kind() == std::io::ErrorKind::NotFound {
        PlatformError::Unsupported
    } else {
        PlatformError::Launch(e.to_string())
    }
}

/// Desktop integrations: egui clipboard, mail client share, native save dialog.
pub struct DesktopPlatform {
    ctx: egui::Context,
}

impl DesktopPlatform {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl Platform for DesktopPlatform {
    fn copy_text(&mut self, text: &str) -> Result<(), PlatformError> {
        self.ctx.copy_text(text.to_string());
        Ok(())
    }

    fn share(&mut self, title: &str, text: &str) -> Result<(), PlatformError> {
        let uri = mailto_uri(title, text);
        open::that(&uri).map_err(|e| {
            warn!(error = %e, "share handler failed to launch");
            share_error(e)
        })
    }

    fn export_text(&mut self, file_name: &str, text: &str) -> Result<Option<PathBuf>, PlatformError> {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter("Text", &["txt"])
            .save_file()
        else {
            return Ok(None);
        };

        fs::write(&path, text)?;
        info!(path = %path.display(), "story exported");
        Ok(Some(path))
    }
}

pub fn mailto_uri(title: &str, text: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        utf8_percent_encode(title, NON_ALPHANUMERIC),
        utf8_percent_encode(text, NON_ALPHANUMERIC)
    )
}

/// `"moon, river"` -> `"moon-river.txt"`
pub fn export_file_name(words: &str) -> String {
    let slug: Vec<String> = words
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();

    if slug.is_empty() {
        "story.txt".to_string()
    } else {
        format!("{}.txt", slug.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_launcher_means_share_unsupported() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "xdg-open");
        assert!(matches!(share_error(missing), PlatformError::Unsupported));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(share_error(denied), PlatformError::Launch(_)));
    }

    #[test]
    fn mailto_encodes_subject_and_body() {
        let uri = mailto_uri(SHARE_TITLE, "Line one\nLine & two");
        assert_eq!(
            uri,
            "mailto:?subject=A%20Story%20from%20StoryCrafter&body=Line%20one%0ALine%20%26%20two"
        );
    }

    #[test]
    fn export_names_follow_words() {
        assert_eq!(export_file_name("Moon, river"), "moon-river.txt");
        assert_eq!(export_file_name("  ,, "), "story.txt");
    }
}
