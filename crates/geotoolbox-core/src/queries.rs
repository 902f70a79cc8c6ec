//! Store-backed entrypoints: point listings, line range queries and
//! stratigraphy lookup.

use crate::error::Result;
use crate::models::{Extent, GeoPoint, OrderedLine, PointQuery, Stratigraphy};
use crate::ports::{HorizonStore, LineStore, PointStore};

impl GeoPoint {
    /// All points that are not part of a line, ordered by id
    pub async fn load_unattached<S>(store: &S) -> Result<Vec<GeoPoint>>
    where
        S: PointStore + ?Sized,
    {
        store.query_points(&PointQuery::unattached()).await
    }

    /// Unattached points with exactly this name, ordered by id
    pub async fn load_unattached_by_name<S>(store: &S, name: &str) -> Result<Vec<GeoPoint>>
    where
        S: PointStore + ?Sized,
    {
        store.query_points(&PointQuery::unattached().name(name)).await
    }

    /// Unattached points inside the closed extent, ordered by id
    pub async fn load_unattached_in_extent<S>(store: &S, extent: &Extent) -> Result<Vec<GeoPoint>>
    where
        S: PointStore + ?Sized,
    {
        store.query_points(&PointQuery::unattached().extent(*extent)).await
    }
}

impl OrderedLine {
    /// Lines with at least one member inside the extent, ordered by id.
    ///
    /// The batch fetch is skipped when no line has a point in range.
    pub async fn load_in_extent<S>(store: &S, extent: &Extent) -> Result<Vec<OrderedLine>>
    where
        S: LineStore + ?Sized,
    {
        let ids = store.line_ids_in_extent(extent).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        store.lines_by_ids(&ids).await
    }

    /// Lines with exactly this name, ordered by id
    pub async fn load_by_name<S>(store: &S, name: &str) -> Result<Vec<OrderedLine>>
    where
        S: LineStore + ?Sized,
    {
        store.lines_by_name(name).await
    }
}

impl Stratigraphy {
    /// Return the stored unit called `name`, creating it when missing.
    ///
    /// An existing unit keeps its age unless `update` is set. `age` of `None`
    /// means unknown.
    pub async fn init<S>(
        store: &S,
        name: &str,
        age: Option<f64>,
        update: bool,
    ) -> Result<Stratigraphy>
    where
        S: HorizonStore + ?Sized,
    {
        let age = age.unwrap_or(-1.0);
        let requested = Stratigraphy::new(name, age);

        match store.horizon_by_name(requested.name()).await? {
            Some(mut existing) => {
                if update {
                    existing.set_age(age)?;
                    store.save_horizon(&mut existing).await?;
                }
                Ok(existing)
            }
            None => {
                let mut created = requested;
                store.save_horizon(&mut created).await?;
                Ok(created)
            }
        }
    }

    /// Units whose age lies in the closed range, ordered by id.
    ///
    /// A reversed range matches nothing. Unknown ages (-1) only match a range
    /// that includes -1.
    pub async fn load_by_age<S>(store: &S, min_age: f64, max_age: f64) -> Result<Vec<Stratigraphy>>
    where
        S: HorizonStore + ?Sized,
    {
        if min_age > max_age {
            return Ok(Vec::new());
        }
        store.horizons_by_age(min_age, max_age).await
    }
}
