use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// GeoToolbox - geological points and ordered lines
#[derive(Parser, Debug)]
#[command(name = "geotoolbox")]
#[command(about = "Store and edit geological points and ordered lines", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Storage backend to use (overrides config file and GEOTOOLBOX_STORAGE)
    #[arg(long, global = true)]
    pub storage: Option<StorageBackend>,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    /// In-memory storage, discarded when the command exits
    Memory,
    /// PostgreSQL persistent storage (DATABASE_URL)
    Postgres,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database tables if they are missing
    Schema,

    /// Work with ordered lines
    #[command(subcommand)]
    Line(LineCommand),

    /// Work with points
    #[command(subcommand)]
    Point(PointCommand),

    /// Work with stratigraphic units
    #[command(subcommand)]
    Horizon(HorizonCommand),

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Subcommand, Debug)]
pub enum LineCommand {
    /// Import LineString and Polygon features from a GeoJSON file
    Import(ImportArgs),

    /// Show one line with its points
    Show(LineIdArgs),

    /// List stored lines, optionally only those with a given name
    List(ListLinesArgs),

    /// List lines with at least one point inside an extent
    Extent(ExtentArgs),

    /// Remove the point at the given coordinates from a line
    RemovePoint(RemovePointArgs),

    /// Delete a line and all of its points
    Delete(LineIdArgs),
}

#[derive(Subcommand, Debug)]
pub enum PointCommand {
    /// Store a new point that is not part of any line
    Add(AddPointArgs),

    /// List points that are not part of any line
    Unattached(UnattachedArgs),
}

#[derive(Subcommand, Debug)]
pub enum HorizonCommand {
    /// List stratigraphic units, optionally within an age range
    List(ListHorizonsArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// GeoJSON file (FeatureCollection, Feature or bare geometry)
    pub path: PathBuf,

    /// Stratigraphic unit for all imported lines (defaults to the "horizon" property)
    #[arg(long)]
    pub horizon: Option<String>,

    /// Age of a newly created unit
    #[arg(long, requires = "horizon")]
    pub age: Option<f64>,

    /// Mark all imported lines as closed
    #[arg(long)]
    pub closed: bool,
}

#[derive(Args, Debug)]
pub struct LineIdArgs {
    /// Line id
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct ExtentArgs {
    /// min_easting,max_easting,min_northing,max_northing
    #[arg(allow_hyphen_values = true)]
    pub extent: String,
}

#[derive(Args, Debug)]
pub struct RemovePointArgs {
    /// Line id
    pub id: i64,

    #[arg(allow_hyphen_values = true)]
    pub easting: String,

    #[arg(allow_hyphen_values = true)]
    pub northing: String,

    /// Altitude, compared only for points with z
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub altitude: String,

    /// Coordinate tolerance (defaults to the configured float precision)
    #[arg(long)]
    pub tolerance: Option<f64>,
}

#[derive(Args, Debug)]
pub struct AddPointArgs {
    #[arg(allow_hyphen_values = true)]
    pub easting: f64,

    #[arg(allow_hyphen_values = true)]
    pub northing: f64,

    /// Altitude; the point has no z value without it
    #[arg(long, allow_hyphen_values = true)]
    pub altitude: Option<f64>,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub comment: String,

    /// Stratigraphic unit name
    #[arg(long)]
    pub horizon: Option<String>,

    /// Property as NAME=VALUE or NAME=VALUE:UNIT, repeatable
    #[arg(long = "property", value_name = "NAME=VALUE[:UNIT]")]
    pub properties: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UnattachedArgs {
    /// Only points with exactly this name
    #[arg(long)]
    pub name: Option<String>,

    /// Only points inside min_easting,max_easting,min_northing,max_northing
    #[arg(long, allow_hyphen_values = true)]
    pub extent: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListLinesArgs {
    /// Only lines with exactly this name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListHorizonsArgs {
    /// Lowest age to include
    #[arg(long, allow_hyphen_values = true)]
    pub min_age: Option<f64>,

    /// Highest age to include
    #[arg(long, allow_hyphen_values = true)]
    pub max_age: Option<f64>,
}
