//! dorm-report - one-shot batch reporter over room/student datasets.

use dorm_report::cli::Cli;
use dorm_report::config::{Config, ConnectionConfig};
use dorm_report::error::{ReportError, Result};
use dorm_report::{db, logging, runner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    let options = cli.to_run_options()?;

    // Load configuration file
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    // Build connection config with precedence:
    // 1. CLI arguments (highest)
    // 2. Named connection from config
    // 3. Default connection from config
    // 4. Environment variables
    let connection = resolve_connection(&cli, &config)?;
    info!("Connection: {}", connection.display_string());

    let client = db::connect(&connection).await?;

    let output_path = runner::run_and_close(client, &options).await?;

    println!("----------Report completed----------");
    println!("Result written to {}", output_path.display());

    Ok(())
}

/// Resolves the final connection configuration from CLI args, config file,
/// and environment.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    // Start with CLI connection config if provided
    let mut connection = cli.to_connection_config()?;

    // If no CLI connection, try named connection from config
    if connection.is_none() {
        if let Some(name) = cli.connection_name() {
            connection = config.get_connection(Some(name)).cloned();
            if connection.is_none() {
                return Err(ReportError::config(format!(
                    "Connection '{}' not found in config file",
                    name
                )));
            }
        }
    }

    // If still no connection, try default from config
    if connection.is_none() {
        connection = config.get_connection(None).cloned();
    }

    // Apply environment variable defaults
    let mut connection = connection.unwrap_or_default();
    connection.apply_env_defaults();

    if connection.database.is_none() {
        return Err(ReportError::config(
            "No database configured. Provide --url, connection flags, a config file, \
             or PG* environment variables.",
        ));
    }

    Ok(connection)
}
