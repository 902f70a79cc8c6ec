use async_trait::async_trait;
use geotoolbox_core::error::{Result, ToolboxError};
use geotoolbox_core::ports::LineStore;
use geotoolbox_core::{Extent, GeoPoint, LineId, OrderedLine};
use sqlx::PgConnection;
use std::collections::BTreeMap;

use super::horizon::{joined_horizon, persist_classification};
use super::point::{load_properties, point_from_row, upsert_point};
use super::schema::{POINT_COLUMNS, POINT_FROM};
use super::{column, sentinel_id, storage_error, sync_id_sequence, PostgresStore};

/// Load lines with their members, ordered by id. `None` loads every line.
async fn fetch_lines(conn: &mut PgConnection, ids: Option<Vec<i64>>) -> Result<Vec<OrderedLine>> {
    let line_rows = sqlx::query(
        r#"
        SELECT l.id, l.closed, l.name, l.comment, l.horizon_id,
               s.name AS horizon_name, s.age AS horizon_age
        FROM lines l
        LEFT JOIN stratigraphy s ON s.id = l.horizon_id
        WHERE ($1::bigint[] IS NULL OR l.id = ANY($1))
        ORDER BY l.id
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(storage_error("load lines"))?;

    if line_rows.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        r#"
        SELECT {} FROM {}
        WHERE g.line_id <> -1 AND g.line_pos <> -1
          AND ($1::bigint[] IS NULL OR g.line_id = ANY($1))
        ORDER BY g.line_id, g.line_pos
        "#,
        POINT_COLUMNS, POINT_FROM
    );
    let point_rows = sqlx::query(&sql)
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(storage_error("load line points"))?;

    let mut points = point_rows.iter().map(point_from_row).collect::<Result<Vec<_>>>()?;
    load_properties(conn, &mut points).await?;

    let mut members: BTreeMap<LineId, Vec<GeoPoint>> = BTreeMap::new();
    for point in points {
        if let Some(line_id) = point.line_id() {
            members.entry(line_id).or_default().push(point);
        }
    }

    line_rows
        .iter()
        .map(|row| {
            let id = LineId(column(row, "id")?);
            let line = OrderedLine::restore(
                id,
                column(row, "closed")?,
                joined_horizon(row)?,
                members.remove(&id).unwrap_or_default(),
            )
            .with_name(column::<String>(row, "name")?)
            .with_comment(column::<String>(row, "comment")?);
            Ok(line)
        })
        .collect()
}

#[async_trait]
impl LineStore for PostgresStore {
    async fn save_line(&self, line: &mut OrderedLine) -> Result<LineId> {
        let mut tx = self.pool.begin().await.map_err(storage_error("begin transaction"))?;

        let horizon = persist_classification(&mut tx, line.horizon()).await?;
        let horizon_id = sentinel_id(horizon.as_ref().and_then(|h| h.id()).map(|id| id.0));
        if horizon.is_some() {
            line.set_horizon(horizon)?;
        }

        let id: i64 = match line.id() {
            Some(id) => {
                sqlx::query(
                    r#"
                    INSERT INTO lines (id, closed, horizon_id, name, comment)
                    VALUES ($1, $2, $3, $4, $5)
                    ON CONFLICT (id) DO UPDATE
                    SET closed = EXCLUDED.closed,
                        horizon_id = EXCLUDED.horizon_id,
                        name = EXCLUDED.name,
                        comment = EXCLUDED.comment
                    "#,
                )
                .bind(id.0)
                .bind(line.is_closed())
                .bind(horizon_id)
                .bind(line.name())
                .bind(line.comment())
                .execute(&mut *tx)
                .await
                .map_err(storage_error("update line"))?;
                sync_id_sequence(&mut tx, "lines").await?;
                id.0
            }
            None => sqlx::query_scalar(
                r#"
                INSERT INTO lines (closed, horizon_id, name, comment)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(line.is_closed())
            .bind(horizon_id)
            .bind(line.name())
            .bind(line.comment())
            .fetch_one(&mut *tx)
            .await
            .map_err(storage_error("insert line"))?,
        };

        let id = LineId(id);
        line.assign_id(id);

        let mut kept = Vec::with_capacity(line.len());
        let mut explicit_ids = false;
        for index in 0..line.len() {
            explicit_ids |= line.points()[index].id().is_some();
            let point_id = upsert_point(&mut tx, &line.points()[index]).await?;
            line.assign_point_id(index, point_id)?;
            kept.push(point_id.0);
        }
        if explicit_ids {
            sync_id_sequence(&mut tx, "geopoints").await?;
        }

        let orphans = sqlx::query("DELETE FROM geopoints WHERE line_id = $1 AND NOT (id = ANY($2))")
            .bind(id.0)
            .bind(&kept)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("delete orphaned points"))?;

        tx.commit().await.map_err(storage_error("commit line"))?;

        tracing::debug!(
            line = id.0,
            points = line.len(),
            orphans = orphans.rows_affected(),
            "Saved line"
        );
        Ok(id)
    }

    async fn get_line(&self, id: LineId) -> Result<Option<OrderedLine>> {
        let mut conn = self.pool.acquire().await.map_err(storage_error("acquire connection"))?;
        let mut lines = fetch_lines(&mut conn, Some(vec![id.0])).await?;
        Ok(lines.pop())
    }

    async fn delete_line(&self, id: LineId) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(storage_error("begin transaction"))?;

        let points = sqlx::query("DELETE FROM geopoints WHERE line_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("delete line points"))?;

        let result = sqlx::query("DELETE FROM lines WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("delete line"))?;

        if result.rows_affected() == 0 {
            return Err(ToolboxError::not_found(format!("line {}", id.0)));
        }

        tx.commit().await.map_err(storage_error("commit line deletion"))?;

        tracing::debug!(line = id.0, points = points.rows_affected(), "Deleted line");
        Ok(())
    }

    async fn list_lines(&self) -> Result<Vec<OrderedLine>> {
        let mut conn = self.pool.acquire().await.map_err(storage_error("acquire connection"))?;
        fetch_lines(&mut conn, None).await
    }

    async fn line_ids_in_extent(&self, extent: &Extent) -> Result<Vec<LineId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT line_id FROM geopoints
            WHERE line_id <> -1 AND line_pos <> -1
              AND east BETWEEN $1 AND $2
              AND north BETWEEN $3 AND $4
            ORDER BY line_id
            "#,
        )
        .bind(extent.min_easting())
        .bind(extent.max_easting())
        .bind(extent.min_northing())
        .bind(extent.max_northing())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("query line ids"))?;

        tracing::debug!(count = ids.len(), "Line ids in extent");
        Ok(ids.into_iter().map(LineId).collect())
    }

    async fn lines_by_ids(&self, ids: &[LineId]) -> Result<Vec<OrderedLine>> {
        let ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let mut conn = self.pool.acquire().await.map_err(storage_error("acquire connection"))?;
        fetch_lines(&mut conn, Some(ids)).await
    }

    async fn lines_by_name(&self, name: &str) -> Result<Vec<OrderedLine>> {
        let mut conn = self.pool.acquire().await.map_err(storage_error("acquire connection"))?;

        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM lines WHERE name = $1 ORDER BY id")
            .bind(name)
            .fetch_all(&mut *conn)
            .await
            .map_err(storage_error("query lines by name"))?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }
        fetch_lines(&mut conn, Some(ids)).await
    }
}
