pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod extract;
pub mod finder;
pub mod input;
pub mod logging;
pub mod tea;
pub mod ui;

pub use app::App;
pub use error::{KeypluckError, KeypluckResult};
pub use extract::{ExtractError, Extraction, Extractor, Field};
pub use finder::{find, find_with, SearchOptions, SearchResult, Traversal, ValuePolicy};
