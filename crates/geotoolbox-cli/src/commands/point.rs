//! Point command implementations

use crate::cli::{AddPointArgs, PointCommand, UnattachedArgs};
use crate::output::{OutputWriter, PointRow};
use crate::storage::Storage;
use anyhow::{bail, Context, Result};
use geotoolbox_core::config::LayeredConfig;
use geotoolbox_core::models::PointQuery;
use geotoolbox_core::ports::PointStore;
use geotoolbox_core::{Extent, GeoPoint, Property, Stratigraphy};

pub async fn execute(
    command: PointCommand,
    storage: &Storage,
    settings: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    match command {
        PointCommand::Add(args) => add(args, storage, settings, output).await,
        PointCommand::Unattached(args) => unattached(args, storage, output).await,
    }
}

/// Parse `NAME=VALUE` or `NAME=VALUE:UNIT`
fn parse_property(raw: &str) -> Result<Property> {
    let Some((name, rest)) = raw.split_once('=') else {
        bail!("Invalid property '{}': expected NAME=VALUE[:UNIT]", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid property '{}': name is empty", raw);
    }

    let (value, unit) = rest.split_once(':').unwrap_or((rest, ""));
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid property '{}': value is not a number", raw))?;

    Ok(Property::new(name, value, unit.trim()))
}

async fn add(
    args: AddPointArgs,
    storage: &Storage,
    settings: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let properties = args
        .properties
        .iter()
        .map(|raw| parse_property(raw))
        .collect::<Result<Vec<_>>>()?;

    let horizon = match &args.horizon {
        Some(name) => Some(Stratigraphy::init(&*storage.horizons, name, None, false).await?),
        None => None,
    };

    let mut point = GeoPoint::new(args.easting, args.northing, args.altitude)
        .with_name(args.name)
        .with_comment(args.comment)
        .with_reference_system(settings.reference_system.value.clone())
        .with_horizon(horizon);
    for property in properties {
        if let Some(previous) = point.add_property(property)? {
            output.warning(format!("Property {} given twice, keeping the last value", previous.name()));
        }
    }

    let id = storage.points.save_point(&mut point).await?;

    if output.is_json() {
        return output.result(point.to_geojson());
    }
    output.success(format!("Stored point {} as {}", point, id.0));
    Ok(())
}

async fn unattached(args: UnattachedArgs, storage: &Storage, output: &OutputWriter) -> Result<()> {
    let extent = args.extent.as_deref().map(str::parse::<Extent>).transpose()?;
    let points = &*storage.points;

    let found = match (args.name, extent) {
        (None, None) => GeoPoint::load_unattached(points).await?,
        (Some(name), None) => GeoPoint::load_unattached_by_name(points, &name).await?,
        (None, Some(extent)) => GeoPoint::load_unattached_in_extent(points, &extent).await?,
        (Some(name), Some(extent)) => {
            points.query_points(&PointQuery::unattached().name(name).extent(extent)).await?
        }
    };

    if found.is_empty() && !output.is_json() {
        output.info("No unattached points");
        return Ok(());
    }
    output.table(found.iter().map(PointRow::from).collect())
}
