use async_trait::async_trait;
use geotoolbox_core::error::Result;
use geotoolbox_core::ports::HorizonStore;
use geotoolbox_core::{HorizonId, Stratigraphy};
use sqlx::postgres::PgRow;
use sqlx::PgConnection;

use super::{column, storage_error, sync_id_sequence, PostgresStore};

/// Insert or update a unit. An unsaved unit whose name exists takes over that
/// row, including its stored age; only a saved unit updates the age.
pub(crate) async fn upsert_horizon(
    conn: &mut PgConnection,
    horizon: &mut Stratigraphy,
) -> Result<HorizonId> {
    let id: i64 = match horizon.id() {
        Some(id) => {
            sqlx::query(
                r#"
                INSERT INTO stratigraphy (id, name, age)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    age = EXCLUDED.age
                "#,
            )
            .bind(id.0)
            .bind(horizon.name())
            .bind(horizon.age())
            .execute(&mut *conn)
            .await
            .map_err(storage_error("update stratigraphy"))?;
            sync_id_sequence(conn, "stratigraphy").await?;
            id.0
        }
        None => {
            let row = sqlx::query(
                r#"
                INSERT INTO stratigraphy (name, age)
                VALUES ($1, $2)
                ON CONFLICT (name) DO UPDATE
                SET name = EXCLUDED.name
                RETURNING id, age
                "#,
            )
            .bind(horizon.name())
            .bind(horizon.age())
            .fetch_one(&mut *conn)
            .await
            .map_err(storage_error("insert stratigraphy"))?;
            horizon.set_age(column::<f64>(&row, "age")?)?;
            column(&row, "id")?
        }
    };

    let id = HorizonId(id);
    horizon.assign_id(id);
    Ok(id)
}

/// Save the classification carried by an entity and return the stored version
pub(crate) async fn persist_classification(
    conn: &mut PgConnection,
    horizon: Option<&Stratigraphy>,
) -> Result<Option<Stratigraphy>> {
    match horizon {
        Some(horizon) => {
            let mut horizon = horizon.clone();
            upsert_horizon(conn, &mut horizon).await?;
            Ok(Some(horizon))
        }
        None => Ok(None),
    }
}

/// Joined stratigraphy columns `horizon_id`, `horizon_name`, `horizon_age`
pub(crate) fn joined_horizon(row: &PgRow) -> Result<Option<Stratigraphy>> {
    let id: i64 = column(row, "horizon_id")?;
    let name: Option<String> = column(row, "horizon_name")?;
    let age: Option<f64> = column(row, "horizon_age")?;

    Ok(match name {
        Some(name) if id >= 0 => {
            let mut horizon = Stratigraphy::new(name, age.unwrap_or(-1.0));
            horizon.assign_id(HorizonId(id));
            Some(horizon)
        }
        _ => None,
    })
}

fn horizon_from_row(row: &PgRow) -> Result<Stratigraphy> {
    let mut horizon = Stratigraphy::new(column::<String>(row, "name")?, column(row, "age")?);
    horizon.assign_id(HorizonId(column(row, "id")?));
    Ok(horizon)
}

#[async_trait]
impl HorizonStore for PostgresStore {
    async fn save_horizon(&self, horizon: &mut Stratigraphy) -> Result<HorizonId> {
        let mut conn = self.pool.acquire().await.map_err(storage_error("acquire connection"))?;
        let id = upsert_horizon(&mut conn, horizon).await?;
        tracing::debug!(horizon = id.0, name = horizon.name(), "Saved stratigraphy");
        Ok(id)
    }

    async fn horizon_by_name(&self, name: &str) -> Result<Option<Stratigraphy>> {
        let row = sqlx::query("SELECT id, name, age FROM stratigraphy WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("get stratigraphy"))?;

        row.as_ref().map(horizon_from_row).transpose()
    }

    async fn list_horizons(&self) -> Result<Vec<Stratigraphy>> {
        let rows = sqlx::query("SELECT id, name, age FROM stratigraphy ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("list stratigraphy"))?;

        rows.iter().map(horizon_from_row).collect()
    }

    async fn horizons_by_age(&self, min_age: f64, max_age: f64) -> Result<Vec<Stratigraphy>> {
        let rows = sqlx::query(
            "SELECT id, name, age FROM stratigraphy WHERE age BETWEEN $1 AND $2 ORDER BY id",
        )
        .bind(min_age)
        .bind(max_age)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("query stratigraphy by age"))?;

        rows.iter().map(horizon_from_row).collect()
    }
}
