/// Input ingestion: files, stdin, dropped paths and the example document

use crate::config::ExampleSource;
use crate::error::{KeypluckError, KeypluckResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Example service-account document shipped with the binary
pub const BUNDLED_EXAMPLE: &str = include_str!("../demo/service-account-example.json");

/// Where a piece of input text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOrigin {
    /// Typed or pasted into the input pane
    Typed,
    /// Read from the system clipboard
    Clipboard,
    /// Read from a file named explicitly
    File(PathBuf),
    /// A file dragged onto the terminal
    Dropped(PathBuf),
    /// Standard input
    Stdin,
    /// The example document
    Example(String),
}

impl fmt::Display for InputOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputOrigin::Typed => write!(f, "input"),
            InputOrigin::Clipboard => write!(f, "clipboard"),
            InputOrigin::File(path) => write!(f, "{}", path.display()),
            InputOrigin::Dropped(path) => write!(f, "dropped file {}", path.display()),
            InputOrigin::Stdin => write!(f, "stdin"),
            InputOrigin::Example(source) => write!(f, "example ({})", source),
        }
    }
}

/// Read a file as UTF-8, refusing anything over `max_bytes`.
pub async fn read_file(path: &Path, max_bytes: u64) -> KeypluckResult<String> {
    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > max_bytes {
        return Err(KeypluckError::InputTooLarge { size: metadata.len(), limit: max_bytes });
    }

    let content = tokio::fs::read_to_string(path).await?;
    tracing::info!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Read all of stdin, refusing anything over `max_bytes`.
pub async fn read_stdin(max_bytes: u64) -> KeypluckResult<String> {
    let content = read_capped(tokio::io::stdin(), max_bytes).await?;
    tracing::info!("Read {} bytes from stdin", content.len());
    Ok(content)
}

/// Read a stream to the end as UTF-8, stopping one byte past `max_bytes`.
pub async fn read_capped<R: AsyncRead + Unpin>(reader: R, max_bytes: u64) -> KeypluckResult<String> {
    let mut content = String::new();
    let read = reader
        .take(max_bytes.saturating_add(1))
        .read_to_string(&mut content)
        .await?;
    check_size(read as u64, max_bytes)?;
    Ok(content)
}

/// HTTP client for URL examples
pub fn http_client(timeout: Duration) -> KeypluckResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()?;
    Ok(client)
}

/// Load the example document.
///
/// Every failure comes back as [`KeypluckError::Example`].
pub async fn load_example(
    client: &reqwest::Client,
    source: &ExampleSource,
    max_bytes: u64,
) -> KeypluckResult<String> {
    let result = match source {
        ExampleSource::Bundled => Ok(BUNDLED_EXAMPLE.to_string()),
        ExampleSource::Path(path) => read_file(path, max_bytes).await,
        ExampleSource::Url(url) => fetch_example(client, url, max_bytes).await,
    };
    result.map_err(|e| match e {
        KeypluckError::Example(_) => e,
        other => KeypluckError::example(other.to_string()),
    })
}

async fn fetch_example(client: &reqwest::Client, url: &url::Url, max_bytes: u64) -> KeypluckResult<String> {
    tracing::info!("Fetching example from {}", url);
    let mut response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(KeypluckError::example(format!("HTTP {}", status)));
    }

    if let Some(length) = response.content_length() {
        check_size(length, max_bytes)?;
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        check_size((body.len() + chunk.len()) as u64, max_bytes)?;
        body.extend_from_slice(&chunk);
    }
    String::from_utf8(body).map_err(|e| KeypluckError::example(format!("body is not UTF-8: {}", e)))
}

fn check_size(size: u64, limit: u64) -> KeypluckResult<()> {
    if size > limit {
        Err(KeypluckError::InputTooLarge { size, limit })
    } else {
        Ok(())
    }
}

/// Recognise a file dropped onto the terminal.
///
/// Terminals deliver a drop as a pasted path, sometimes quoted, sometimes as a
/// `file://` URI, sometimes with backslash-escaped spaces. Returns the path
/// only if it names an existing regular file.
pub fn dropped_path(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains('\n') || trimmed.starts_with('{') || trimmed.starts_with('[') {
        return None;
    }

    let unquoted = strip_quotes(trimmed);

    if let Some(path) = expand_home(unquoted) {
        return path.is_file().then_some(path);
    }

    if unquoted.starts_with("file://") {
        let path = url::Url::parse(unquoted).ok()?.to_file_path().ok()?;
        return path.is_file().then_some(path);
    }

    let raw = PathBuf::from(unquoted);
    if raw.is_file() {
        return Some(raw);
    }

    let unescaped = PathBuf::from(unescape_shell(unquoted));
    unescaped.is_file().then_some(unescaped)
}

/// `~` or `~/rest` under the home directory; `None` for any other path.
fn expand_home(text: &str) -> Option<PathBuf> {
    let rest = text.strip_prefix('~')?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    let home = dirs::home_dir()?;
    Some(home.join(rest.trim_start_matches('/')))
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// `my\ key.json` -> `my key.json`
fn unescape_shell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}
