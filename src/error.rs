use std::io;
use thiserror::Error;

pub type KeypluckResult<T> = Result<T, KeypluckError>;

/// Errors raised by the collaborators around the finder
#[derive(Error, Debug)]
pub enum KeypluckError {
    /// IO error (file system, stdin)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// HTTP client setup or request failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// System clipboard unavailable or refused the operation
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Example document could not be loaded
    #[error("Could not load example: {0}")]
    Example(String),

    /// Input exceeds the configured size cap
    #[error("Input is {size} bytes, larger than the {limit} byte limit")]
    InputTooLarge { size: u64, limit: u64 },

    /// Terminal setup or teardown failed
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl KeypluckError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        KeypluckError::Config(msg.into())
    }

    pub fn clipboard<S: Into<String>>(msg: S) -> Self {
        KeypluckError::Clipboard(msg.into())
    }

    pub fn example<S: Into<String>>(msg: S) -> Self {
        KeypluckError::Example(msg.into())
    }

    pub fn terminal<S: Into<String>>(msg: S) -> Self {
        KeypluckError::Terminal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            KeypluckError::example("HTTP 404").to_string(),
            "Could not load example: HTTP 404"
        );
        assert_eq!(
            KeypluckError::InputTooLarge { size: 2048, limit: 1024 }.to_string(),
            "Input is 2048 bytes, larger than the 1024 byte limit"
        );
        assert_eq!(
            KeypluckError::terminal("not a TTY").to_string(),
            "Terminal error: not a TTY"
        );
    }
}
