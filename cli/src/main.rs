//! Indicium CLI - one store operation per invocation
//!
//! # Usage
//!
//! ```bash
//! # List databases under ./bwd/data
//! indicium databases
//!
//! # Merge a document into a record
//! indicium --path /var/lib/indicium update default users u1 '{"name":"Ann"}'
//!
//! # Set one nested field
//! indicium set default users u1 stats.age 31
//! ```

use clap::Parser;
use indicium_cli::logging::{init_logging, LogFormat};
use indicium_cli::{execute, resolve_options, Cli, OptionOverrides};
use indicium_store::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, LogFormat::from_flag(cli.log_json))?;

    let options = resolve_options(
        cli.config.as_ref(),
        OptionOverrides {
            path: cli.path,
            directory: cli.directory,
            database: cli.database,
            production: cli.production,
        },
    )?;

    let client = Client::open(options).await?;
    log::debug!("Opened store at {}", client.path().display());

    let output = execute(&client, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
