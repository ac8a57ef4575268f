use anyhow::Result;
use clap::Parser;
use keypluck::app::App;
use keypluck::cli::{Cli, CliHandler};
use keypluck::config::Config;
use keypluck::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle CLI commands
    if let Some(command) = cli.command {
        logging::init_stderr(cli.debug);
        let cli_handler = CliHandler::new(cli.config).await?;
        return cli_handler.handle_command(command).await;
    }

    // Interactive mode logs to a file so the screen stays clean
    let cli_handler = CliHandler::new(cli.config).await?;
    let config = cli_handler.config().clone();
    let log_path = config.log_file.clone().unwrap_or_else(Config::default_log_path);
    logging::init_file(&log_path, cli.debug)?;

    let mut app = App::new(config)?;
    app.run().await?;
    Ok(())
}
