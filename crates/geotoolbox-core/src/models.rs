pub mod extent;
pub mod line;
pub mod object;
pub mod point;
pub mod property;
pub mod query;
pub mod spatial;
pub mod stratigraphy;

pub use extent::Extent;
pub use line::{LineId, OrderedLine};
pub use object::{GeoObject, IntoHorizon, IntoPoint, IntoProperty};
pub use point::{GeoPoint, PointId};
pub use property::Property;
pub use query::PointQuery;
pub use spatial::{Metadata, SpatialEntity, ToCoordinate};
pub use stratigraphy::{HorizonId, Stratigraphy};
