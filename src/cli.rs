use crate::clipboard::ClipboardManager;
use crate::config::Config;
use crate::extract::{Extraction, Extractor, Field};
use crate::finder::{Traversal, ValuePolicy};
use crate::input::{self, InputOrigin};
use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// keypluck - pull private_key and client_email out of service-account JSON
#[derive(Parser, Debug)]
#[command(name = "keypluck")]
#[command(about = "Pull private_key and client_email out of service-account JSON")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract fields from a JSON document and print them
    Extract(ExtractArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct ExtractArgs {
    /// JSON file to read; `-` or nothing reads stdin
    pub file: Option<PathBuf>,

    /// Read the JSON document from the system clipboard
    #[arg(long, conflicts_with_all = ["file", "example"])]
    pub clipboard: bool,

    /// Use the configured example document
    #[arg(long, conflicts_with = "file")]
    pub example: bool,

    /// Field to extract (repeatable); defaults to the configured fields
    #[arg(short, long = "field", value_enum)]
    pub fields: Vec<Field>,

    /// Also search inside arrays
    #[arg(long)]
    pub search_arrays: bool,

    /// Count null, false, 0 and "" as a match
    #[arg(long)]
    pub accept_empty: bool,

    /// Copy this field to the clipboard after extracting
    #[arg(long, value_enum)]
    pub copy: Option<Field>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A single field prints raw; several print as labelled blocks
    #[default]
    Text,
    /// One JSON object keyed by field name
    Json,
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Print the effective configuration
    #[arg(long)]
    pub show: bool,

    /// Write a default configuration file
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    pub force: bool,

    /// Print the configuration file path
    #[arg(long)]
    pub path: bool,
}

/// Runs one-shot subcommands against a loaded configuration
pub struct CliHandler {
    config: Config,
    config_path: Option<PathBuf>,
}

impl CliHandler {
    pub async fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.or_else(Config::default_path);
        let config = match &config_path {
            Some(path) => Config::load_from_file(path).await?,
            None => Config::default(),
        };
        Ok(Self { config, config_path })
    }

    pub fn from_config(config: Config, config_path: Option<PathBuf>) -> Self {
        Self { config, config_path }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Extract(args) => self.handle_extract(args).await,
            Commands::Config(args) => self.handle_config(args).await,
        }
    }

    async fn handle_extract(&self, args: ExtractArgs) -> Result<()> {
        let (origin, content) = self.read_input(&args).await?;
        let extractor = self.extractor_for(&args);

        let extraction = extractor.extract(&content).map_err(|e| anyhow!(e.to_string()))?;
        tracing::info!("Extracted {} field(s) from {}", extraction.matches.len(), origin);

        let status = extraction.status();
        eprintln!("{}", status.text);

        let output = match args.format {
            OutputFormat::Text => render_text(&extraction),
            OutputFormat::Json => render_json(&extraction)?,
        };
        println!("{}", output);

        if let Some(field) = args.copy {
            let value = extraction
                .get(field)
                .ok_or_else(|| anyhow!("Nothing to copy: no \"{}\" extracted", field.key()))?;
            let mut clipboard = ClipboardManager::new();
            eprintln!("Copying {} to clipboard; it stays available until pasted elsewhere.", field.label());
            clipboard
                .copy_and_wait(&value.value)
                .map_err(|e| anyhow!("Could not copy, select and copy manually ({})", e))?;
        }

        Ok(())
    }

    async fn read_input(&self, args: &ExtractArgs) -> Result<(InputOrigin, String)> {
        let max_bytes = self.config.max_input_bytes;

        if args.clipboard {
            let content = ClipboardManager::new().paste()?;
            return Ok((InputOrigin::Clipboard, content));
        }

        if args.example {
            let client = input::http_client(self.config.fetch_timeout())?;
            let content = input::load_example(&client, &self.config.example, max_bytes).await?;
            return Ok((InputOrigin::Example(self.config.example.describe()), content));
        }

        match &args.file {
            Some(path) if path.to_str() != Some("-") => {
                let content = input::read_file(path, max_bytes)
                    .await
                    .map_err(|e| anyhow!("Could not read {}: {}", path.display(), e))?;
                Ok((InputOrigin::File(path.clone()), content))
            }
            _ => Ok((InputOrigin::Stdin, input::read_stdin(max_bytes).await?)),
        }
    }

    /// Config settings overridden by command-line flags
    pub fn extractor_for(&self, args: &ExtractArgs) -> Extractor {
        let mut options = self.config.search_options();
        if args.search_arrays {
            options = options.with_traversal(Traversal::ObjectsAndArrays);
        }
        if args.accept_empty {
            options = options.with_values(ValuePolicy::AnyValue);
        }

        let fields = if args.fields.is_empty() {
            self.config.fields.clone()
        } else {
            args.fields.clone()
        };

        Extractor::new(fields, options)
    }

    async fn handle_config(&self, args: ConfigArgs) -> Result<()> {
        let path = self
            .config_path
            .clone()
            .ok_or_else(|| anyhow!("No configuration directory available; pass --config"))?;

        if args.path {
            println!("{}", path.display());
        }

        if args.init {
            if path.exists() && !args.force {
                return Err(anyhow!(
                    "{} already exists; use --force to overwrite",
                    path.display()
                ));
            }
            Config::default().save_to_file(&path).await?;
            eprintln!("Wrote default configuration to {}", path.display());
        }

        if args.show || !(args.path || args.init) {
            println!("{}", toml::to_string_pretty(&self.config)?);
        }

        Ok(())
    }
}

/// Text output: a lone field prints raw, several print as labelled blocks.
pub fn render_text(extraction: &Extraction) -> String {
    if extraction.matches.len() == 1 && extraction.missing.is_empty() {
        return extraction.matches[0].value.trim_end_matches('\n').to_string();
    }

    extraction
        .matches
        .iter()
        .map(|m| format!("{}:\n{}", m.field.key(), m.value.trim_end_matches('\n')))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// JSON output: found fields keyed by name, plus `missing` when any are absent.
pub fn render_json(extraction: &Extraction) -> Result<String> {
    let mut out = serde_json::Map::new();
    for m in &extraction.matches {
        out.insert(m.field.key().to_string(), serde_json::Value::String(m.value.clone()));
    }
    if !extraction.missing.is_empty() {
        let missing = extraction
            .missing
            .iter()
            .map(|f| serde_json::Value::String(f.key().to_string()))
            .collect();
        out.insert("missing".to_string(), serde_json::Value::Array(missing));
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Object(out))?)
}
