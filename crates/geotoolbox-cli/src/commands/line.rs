//! Line command implementations

use crate::cli::{ExtentArgs, ImportArgs, LineCommand, LineIdArgs, ListLinesArgs, RemovePointArgs};
use crate::import::read_lines;
use crate::output::{LineRow, OutputWriter, PointRow};
use crate::storage::Storage;
use anyhow::{anyhow, Context, Result};
use geotoolbox_core::config::LayeredConfig;
use geotoolbox_core::ports::LineStore;
use geotoolbox_core::{Extent, LineId, OrderedLine, Stratigraphy};
use std::fs;

pub async fn execute(
    command: LineCommand,
    storage: &Storage,
    settings: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    match command {
        LineCommand::Import(args) => import(args, storage, settings, output).await,
        LineCommand::Show(args) => show(args, storage, output).await,
        LineCommand::List(args) => list(args, storage, output).await,
        LineCommand::Extent(args) => in_extent(args, storage, output).await,
        LineCommand::RemovePoint(args) => remove_point(args, storage, settings, output).await,
        LineCommand::Delete(args) => delete(args, storage, output).await,
    }
}

async fn import(
    args: ImportArgs,
    storage: &Storage,
    settings: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let content = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let (imported, skipped) = read_lines(&content, &settings.reference_system.value)?;

    if !skipped.kinds.is_empty() {
        output.warning(format!(
            "Skipped {} geometries that are not lines: {}",
            skipped.kinds.len(),
            skipped.kinds.join(", ")
        ));
    }

    let mut rows = Vec::with_capacity(imported.len());
    for entry in imported {
        let horizon = match args.horizon.clone().or(entry.horizon) {
            Some(name) => Some(Stratigraphy::init(&*storage.horizons, &name, args.age, false).await?),
            None => None,
        };

        let mut line = OrderedLine::new(args.closed || entry.closed, horizon, entry.points)?
            .with_name(entry.name);
        storage.lines.save_line(&mut line).await?;
        rows.push(LineRow::from(&line));
    }

    if !output.is_json() {
        output.success(format!("Imported {} lines from {}", rows.len(), args.path.display()));
    }
    output.table(rows)
}

async fn show(args: LineIdArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    let line = storage
        .lines
        .get_line(LineId(args.id))
        .await?
        .ok_or_else(|| anyhow!("Line {} not found", args.id))?;

    if output.is_json() {
        return output.result(line.to_geojson());
    }

    output.section(&line);
    if !line.comment().is_empty() {
        output.kv("Comment", line.comment());
    }
    if let Some(horizon) = line.horizon() {
        output.kv("Horizon", horizon);
    }
    output.table(line.points().iter().map(PointRow::from).collect())
}

async fn list(args: ListLinesArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    let lines = match &args.name {
        Some(name) => OrderedLine::load_by_name(&*storage.lines, name).await?,
        None => storage.lines.list_lines().await?,
    };

    if lines.is_empty() && !output.is_json() {
        output.info("No lines found");
        return Ok(());
    }
    output.table(lines.iter().map(LineRow::from).collect())
}

async fn in_extent(args: ExtentArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    let extent: Extent = args.extent.parse()?;
    let lines = OrderedLine::load_in_extent(&*storage.lines, &extent).await?;

    if output.is_json() {
        let collection = geojson::FeatureCollection {
            bbox: None,
            features: lines.iter().map(OrderedLine::to_geojson).collect(),
            foreign_members: None,
        };
        return output.result(collection);
    }

    if lines.is_empty() {
        output.info(format!("No lines inside {}", args.extent));
        return Ok(());
    }
    output.table(lines.iter().map(LineRow::from).collect())
}

async fn remove_point(
    args: RemovePointArgs,
    storage: &Storage,
    settings: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let mut line = storage
        .lines
        .get_line(LineId(args.id))
        .await?
        .ok_or_else(|| anyhow!("Line {} not found", args.id))?;

    let tolerance = args.tolerance.unwrap_or(settings.float_precision.value);
    let removed = line.delete_by_coordinates_within(
        args.easting.as_str(),
        args.northing.as_str(),
        args.altitude.as_str(),
        tolerance,
    )?;
    storage.lines.save_line(&mut line).await?;

    if output.is_json() {
        return output.result(serde_json::json!({
            "line": LineRow::from(&line),
            "removed": PointRow::from(&removed),
        }));
    }

    output.success(format!("Removed {} from line {}", removed, args.id));
    output.kv("Points left", line.len());
    Ok(())
}

async fn delete(args: LineIdArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    storage.lines.delete_line(LineId(args.id)).await?;

    if output.is_json() {
        return output.result(serde_json::json!({ "deleted": args.id }));
    }
    output.success(format!("Deleted line {}", args.id));
    Ok(())
}
