//! Command implementations

mod config;
mod horizon;
mod line;
mod point;
mod schema;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use crate::storage::Storage;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let settings = crate::config::load(cli.config.as_deref(), cli.storage)?;

    match cli.command {
        Commands::Config => config::execute(&settings, &output),
        Commands::Schema => schema::execute(&settings, &output).await,
        Commands::Line(command) => {
            let storage = Storage::new(settings.storage.value).await?;
            line::execute(command, &storage, &settings, &output).await
        }
        Commands::Horizon(command) => {
            let storage = Storage::new(settings.storage.value).await?;
            horizon::execute(command, &storage, &output).await
        }
        Commands::Point(command) => {
            let storage = Storage::new(settings.storage.value).await?;
            point::execute(command, &storage, &settings, &output).await
        }
    }
}
