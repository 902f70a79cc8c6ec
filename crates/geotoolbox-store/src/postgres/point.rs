use async_trait::async_trait;
use geotoolbox_core::error::{Result, ToolboxError};
use geotoolbox_core::models::PointQuery;
use geotoolbox_core::ports::PointStore;
use geotoolbox_core::{GeoPoint, LineId, PointId, Property};
use sqlx::postgres::PgRow;
use sqlx::PgConnection;
use std::collections::HashMap;

use super::horizon::{joined_horizon, persist_classification};
use super::schema::{POINT_COLUMNS, POINT_FROM};
use super::{column, sentinel_id, storage_error, sync_id_sequence, PostgresStore};

/// Insert or update one point row and replace its properties
pub(crate) async fn upsert_point(conn: &mut PgConnection, point: &GeoPoint) -> Result<PointId> {
    let horizon_id = sentinel_id(point.horizon().and_then(|h| h.id()).map(|id| id.0));
    let line_id = sentinel_id(point.line_id().map(|id| id.0));

    let id: i64 = match point.id() {
        Some(id) => {
            sqlx::query(
                r#"
                INSERT INTO geopoints (id, east, north, alt, has_z, reference_system, horizon_id, line_id, line_pos, name, comment)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                ON CONFLICT (id) DO UPDATE
                SET east = EXCLUDED.east,
                    north = EXCLUDED.north,
                    alt = EXCLUDED.alt,
                    has_z = EXCLUDED.has_z,
                    reference_system = EXCLUDED.reference_system,
                    horizon_id = EXCLUDED.horizon_id,
                    line_id = EXCLUDED.line_id,
                    line_pos = EXCLUDED.line_pos,
                    name = EXCLUDED.name,
                    comment = EXCLUDED.comment
                "#,
            )
            .bind(id.0)
            .bind(point.easting())
            .bind(point.northing())
            .bind(point.altitude())
            .bind(point.has_z())
            .bind(point.reference_system())
            .bind(horizon_id)
            .bind(line_id)
            .bind(point.line_pos())
            .bind(point.name())
            .bind(point.comment())
            .execute(&mut *conn)
            .await
            .map_err(storage_error("update point"))?;
            id.0
        }
        None => sqlx::query_scalar(
            r#"
            INSERT INTO geopoints (east, north, alt, has_z, reference_system, horizon_id, line_id, line_pos, name, comment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(point.easting())
        .bind(point.northing())
        .bind(point.altitude())
        .bind(point.has_z())
        .bind(point.reference_system())
        .bind(horizon_id)
        .bind(line_id)
        .bind(point.line_pos())
        .bind(point.name())
        .bind(point.comment())
        .fetch_one(&mut *conn)
        .await
        .map_err(storage_error("insert point"))?,
    };

    sqlx::query("DELETE FROM properties WHERE point_id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(storage_error("clear properties"))?;

    for property in point.properties() {
        sqlx::query("INSERT INTO properties (point_id, name, value, unit) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(property.name())
            .bind(property.value())
            .bind(property.unit())
            .execute(&mut *conn)
            .await
            .map_err(storage_error("insert property"))?;
    }

    Ok(PointId(id))
}

/// Decode a row selected with `POINT_COLUMNS`. Properties are loaded separately.
pub(crate) fn point_from_row(row: &PgRow) -> Result<GeoPoint> {
    let has_z: bool = column(row, "has_z")?;
    let mut point = GeoPoint::new(column(row, "east")?, column(row, "north")?, None)
        .with_reference_system(column::<String>(row, "reference_system")?)
        .with_name(column::<String>(row, "name")?)
        .with_comment(column::<String>(row, "comment")?)
        .with_horizon(joined_horizon(row)?);

    point.set_altitude(column::<f64>(row, "alt")?)?;
    if has_z {
        point.use_z();
    }

    let line_id: i64 = column(row, "line_id")?;
    let line_pos: i32 = column(row, "line_pos")?;
    let line_id = (line_id >= 0).then_some(LineId(line_id));

    Ok(point.restored(PointId(column(row, "id")?), line_id, line_pos))
}

/// Load the properties of all given points in one query
pub(crate) async fn load_properties(conn: &mut PgConnection, points: &mut [GeoPoint]) -> Result<()> {
    let ids: Vec<i64> = points.iter().filter_map(|p| p.id()).map(|id| id.0).collect();
    if ids.is_empty() {
        return Ok(());
    }

    let rows = sqlx::query(
        "SELECT point_id, name, value, unit FROM properties WHERE point_id = ANY($1) ORDER BY point_id, name",
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(storage_error("load properties"))?;

    let positions: HashMap<i64, usize> = points
        .iter()
        .enumerate()
        .filter_map(|(index, p)| p.id().map(|id| (id.0, index)))
        .collect();

    for row in &rows {
        let point_id: i64 = column(row, "point_id")?;
        let property = Property::new(
            column::<String>(row, "name")?,
            column(row, "value")?,
            column::<String>(row, "unit")?,
        );
        let index = positions.get(&point_id).copied().ok_or_else(|| {
            ToolboxError::Storage(format!("property row for unexpected point {}", point_id))
        })?;
        points[index].add_property(property)?;
    }

    Ok(())
}

#[async_trait]
impl PointStore for PostgresStore {
    async fn save_point(&self, point: &mut GeoPoint) -> Result<PointId> {
        let mut tx = self.pool.begin().await.map_err(storage_error("begin transaction"))?;

        if let Some(horizon) = persist_classification(&mut tx, point.horizon()).await? {
            point.set_horizon(horizon)?;
        }
        let explicit_id = point.id().is_some();
        let id = upsert_point(&mut tx, point).await?;
        if explicit_id {
            sync_id_sequence(&mut tx, "geopoints").await?;
        }
        point.assign_id(id);

        tx.commit().await.map_err(storage_error("commit point"))?;

        tracing::debug!(point = id.0, "Saved point");
        Ok(id)
    }

    async fn get_point(&self, id: PointId) -> Result<Option<GeoPoint>> {
        let mut conn = self.pool.acquire().await.map_err(storage_error("acquire connection"))?;

        let sql = format!("SELECT {} FROM {} WHERE g.id = $1", POINT_COLUMNS, POINT_FROM);
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&mut *conn)
            .await
            .map_err(storage_error("get point"))?;

        match row {
            Some(row) => {
                let mut points = vec![point_from_row(&row)?];
                load_properties(&mut conn, &mut points).await?;
                Ok(points.pop())
            }
            None => Ok(None),
        }
    }

    async fn delete_point(&self, id: PointId) -> Result<()> {
        let result = sqlx::query("DELETE FROM geopoints WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(storage_error("delete point"))?;

        if result.rows_affected() == 0 {
            return Err(ToolboxError::not_found(format!("point {}", id.0)));
        }
        Ok(())
    }

    async fn query_points(&self, query: &PointQuery) -> Result<Vec<GeoPoint>> {
        let mut conn = self.pool.acquire().await.map_err(storage_error("acquire connection"))?;

        let sql = format!(
            r#"
            SELECT {} FROM {}
            WHERE ($1::boolean IS NULL OR (g.line_pos <> -1) = $1)
              AND ($2::text IS NULL OR g.name = $2)
              AND ($3::float8 IS NULL OR (g.east BETWEEN $3 AND $4 AND g.north BETWEEN $5 AND $6))
            ORDER BY g.id
            "#,
            POINT_COLUMNS, POINT_FROM
        );
        let extent = query.extent.as_ref();
        let rows = sqlx::query(&sql)
            .bind(query.attached)
            .bind(query.name.as_deref())
            .bind(extent.map(|e| e.min_easting()))
            .bind(extent.map(|e| e.max_easting()))
            .bind(extent.map(|e| e.min_northing()))
            .bind(extent.map(|e| e.max_northing()))
            .fetch_all(&mut *conn)
            .await
            .map_err(storage_error("query points"))?;

        let mut points = rows.iter().map(point_from_row).collect::<Result<Vec<_>>>()?;
        load_properties(&mut conn, &mut points).await?;

        tracing::debug!(count = points.len(), "Point query");
        Ok(points)
    }
}
