//! Constants shared by the model and the adapters.

/// Tolerance for coordinate lookups (1 mm)
pub const FLOAT_PRECISION: f64 = 0.001;

/// Value of `line_pos` (and of the persisted foreign keys) for "no attachment"
pub const SENTINEL: i32 = -1;

/// Maximum length of entity names and comments
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of stratigraphic unit names
pub const MAX_HORIZON_NAME_LEN: usize = 50;

/// Default spatial reference (DHDN / Gauss-Krüger zone 4), stored opaquely
pub const STANDARD_REFERENCE_SYSTEM: &str = "PROJCS['DHDN_3_Degree_Gauss_Zone_4',\
GEOGCS['GCS_Deutsches_Hauptdreiecksnetz',DATUM['D_Deutsches_Hauptdreiecksnetz',\
SPHEROID['Bessel_1841',6377397.155,299.1528128]],PRIMEM['Greenwich',0.0],\
UNIT['Degree',0.0174532925199433]],PROJECTION['Gauss_Kruger'],\
PARAMETER['False_Easting',4500000.0],PARAMETER['False_Northing',0.0],\
PARAMETER['Central_Meridian',12.0],PARAMETER['Scale_Factor',1.0],\
PARAMETER['Latitude_Of_Origin',0.0],UNIT['Meter',1.0]]";
