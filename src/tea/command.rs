/// Side effects requested by the update function
///
/// Loads run on their own tokio task through [`CommandExecutor`] and come back
/// as a [`Message`] over a channel, so the terminal keeps redrawing while a
/// file or URL is read. Clipboard commands stay with the app loop, which owns
/// the clipboard.

use crate::config::{Config, ExampleSource};
use crate::error::KeypluckResult;
use crate::extract::Field;
use crate::input::{self, InputOrigin};
use crate::tea::Message;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a file into the input pane and process it
    LoadFile { path: PathBuf, origin: InputOrigin },

    /// Treat typed text as a path and load it
    OpenPath(String),

    /// Load the configured example document
    LoadExample,

    /// Read the system clipboard into the input pane
    PasteClipboard,

    /// Put an extracted value on the clipboard
    Copy { field: Field, text: String },
}

impl Command {
    pub fn uses_clipboard(&self) -> bool {
        matches!(self, Command::PasteClipboard | Command::Copy { .. })
    }
}

/// Executes load commands in the background
#[derive(Clone)]
pub struct CommandExecutor {
    message_sender: mpsc::UnboundedSender<Message>,
    http_client: reqwest::Client,
    example: ExampleSource,
    max_input_bytes: u64,
}

impl CommandExecutor {
    pub fn new(message_sender: mpsc::UnboundedSender<Message>, config: &Config) -> KeypluckResult<Self> {
        Ok(Self {
            message_sender,
            http_client: input::http_client(config.fetch_timeout())?,
            example: config.example.clone(),
            max_input_bytes: config.max_input_bytes,
        })
    }

    /// Run `command` on a new task and send its outcome back as a message.
    pub fn spawn(&self, command: Command) {
        let executor = self.clone();
        tokio::spawn(async move {
            let message = executor.execute(command).await;
            if let Err(e) = executor.message_sender.send(message) {
                tracing::error!("Failed to send command result: {}", e);
            }
        });
    }

    pub async fn execute(&self, command: Command) -> Message {
        match command {
            Command::LoadFile { path, origin } => self.load_file(path, origin).await,
            Command::OpenPath(typed) => match input::dropped_path(&typed) {
                Some(path) => {
                    let origin = InputOrigin::File(path.clone());
                    self.load_file(path, origin).await
                }
                None => Message::LoadFailed {
                    error: format!("No such file: {}", typed),
                    origin: InputOrigin::Typed,
                },
            },
            Command::LoadExample => {
                let origin = InputOrigin::Example(self.example.describe());
                match input::load_example(&self.http_client, &self.example, self.max_input_bytes).await {
                    Ok(content) => Message::Loaded { origin, content },
                    Err(e) => Message::LoadFailed { origin, error: e.to_string() },
                }
            }
            // The clipboard is not shared with background tasks.
            Command::PasteClipboard => Message::LoadFailed {
                origin: InputOrigin::Clipboard,
                error: "Clipboard not available".to_string(),
            },
            Command::Copy { field, .. } => Message::CopyFailed {
                field,
                error: "Clipboard not available".to_string(),
            },
        }
    }

    async fn load_file(&self, path: PathBuf, origin: InputOrigin) -> Message {
        match input::read_file(&path, self.max_input_bytes).await {
            Ok(content) => Message::Loaded { origin, content },
            Err(e) => Message::LoadFailed {
                error: format!("Could not read {}: {}", path.display(), e),
                origin,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn executor() -> (CommandExecutor, mpsc::UnboundedReceiver<Message>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (CommandExecutor::new(sender, &Config::default()).unwrap(), receiver)
    }

    #[test]
    fn test_clipboard_commands_are_flagged() {
        assert!(Command::PasteClipboard.uses_clipboard());
        assert!(Command::Copy { field: Field::PrivateKey, text: "pk".to_string() }.uses_clipboard());
        assert!(!Command::LoadExample.uses_clipboard());
        assert!(!Command::OpenPath("key.json".to_string()).uses_clipboard());
    }

    #[tokio::test]
    async fn test_spawned_load_reports_back() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"private_key": "pk"}}"#).unwrap();
        let path = file.path().to_path_buf();

        let (executor, mut receiver) = executor();
        executor.spawn(Command::LoadFile { path: path.clone(), origin: InputOrigin::File(path) });

        match receiver.recv().await {
            Some(Message::Loaded { content, .. }) => assert_eq!(content, r#"{"private_key": "pk"}"#),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_typed_path() {
        let (executor, _receiver) = executor();
        match executor.execute(Command::OpenPath("/definitely/not/here.json".to_string())).await {
            Message::LoadFailed { error, origin } => {
                assert_eq!(error, "No such file: /definitely/not/here.json");
                assert_eq!(origin, InputOrigin::Typed);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }
}
