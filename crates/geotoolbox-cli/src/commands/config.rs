//! Config command implementation

use crate::output::{ConfigRow, OutputWriter};
use anyhow::Result;
use geotoolbox_core::config::LayeredConfig;

pub fn execute(settings: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut rows: Vec<ConfigRow> = settings
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.table(rows)
}
