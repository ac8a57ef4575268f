use crate::error::{KeypluckError, KeypluckResult};
use arboard::Clipboard;

/// System clipboard access
///
/// Initialization failures are not fatal: the manager stays usable and every
/// operation reports the clipboard as unavailable instead.
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(cb) => {
                tracing::info!("Clipboard initialized successfully");
                Some(cb)
            }
            Err(e) => {
                tracing::warn!("Failed to initialize clipboard: {} - copy/paste will be unavailable", e);
                None
            }
        };
        Self { clipboard }
    }

    /// A manager with no backing clipboard
    pub fn unavailable() -> Self {
        Self { clipboard: None }
    }

    /// Copy text to clipboard
    pub fn copy(&mut self, text: &str) -> KeypluckResult<()> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| KeypluckError::clipboard("Clipboard not available"))?;
        clipboard
            .set_text(text)
            .map_err(|e| KeypluckError::clipboard(e.to_string()))?;
        tracing::info!("Copied {} characters to clipboard", text.chars().count());
        Ok(())
    }

    /// Copy text and keep serving it until another application takes the
    /// selection. On X11/Wayland the contents vanish with the owning process,
    /// so one-shot CLI copies need this.
    pub fn copy_and_wait(&mut self, text: &str) -> KeypluckResult<()> {
        #[cfg(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))))]
        {
            use arboard::SetExtLinux;

            let clipboard = self
                .clipboard
                .as_mut()
                .ok_or_else(|| KeypluckError::clipboard("Clipboard not available"))?;
            clipboard
                .set()
                .wait()
                .text(text.to_string())
                .map_err(|e| KeypluckError::clipboard(e.to_string()))?;
            tracing::info!("Served {} characters from clipboard", text.chars().count());
            Ok(())
        }

        #[cfg(not(all(unix, not(any(target_os = "macos", target_os = "android", target_os = "emscripten")))))]
        {
            self.copy(text)
        }
    }

    /// Paste text from clipboard
    pub fn paste(&mut self) -> KeypluckResult<String> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| KeypluckError::clipboard("Clipboard not available"))?;
        let content = clipboard
            .get_text()
            .map_err(|e| KeypluckError::clipboard(e.to_string()))?;
        tracing::info!("Pasted {} characters from clipboard", content.chars().count());
        Ok(content)
    }

    /// Check if clipboard is available
    pub fn is_available(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}
