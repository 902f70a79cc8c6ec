//! Stratigraphy command implementations

use crate::cli::{HorizonCommand, ListHorizonsArgs};
use crate::output::{HorizonRow, OutputWriter};
use crate::storage::Storage;
use anyhow::{bail, Result};
use geotoolbox_core::ports::HorizonStore;
use geotoolbox_core::Stratigraphy;

pub async fn execute(command: HorizonCommand, storage: &Storage, output: &OutputWriter) -> Result<()> {
    match command {
        HorizonCommand::List(args) => list(args, storage, output).await,
    }
}

async fn list(args: ListHorizonsArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    let horizons = match (args.min_age, args.max_age) {
        (None, None) => storage.horizons.list_horizons().await?,
        (min_age, max_age) => {
            let min_age = min_age.unwrap_or(f64::NEG_INFINITY);
            let max_age = max_age.unwrap_or(f64::INFINITY);
            if min_age > max_age {
                bail!("--min-age {} is greater than --max-age {}", min_age, max_age);
            }
            Stratigraphy::load_by_age(&*storage.horizons, min_age, max_age).await?
        }
    };

    if horizons.is_empty() && !output.is_json() {
        output.info("No stratigraphic units found");
        return Ok(());
    }
    output.table(horizons.iter().map(HorizonRow::from).collect())
}
