//! Table definitions.
//!
//! `line_id`, `line_pos` and `horizon_id` use -1 for "none", so they carry no
//! foreign keys. Properties are owned by their point and cascade with it.

pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS stratigraphy (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL UNIQUE,
        age DOUBLE PRECISION NOT NULL DEFAULT -1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS lines (
        id BIGSERIAL PRIMARY KEY,
        closed BOOLEAN NOT NULL DEFAULT FALSE,
        horizon_id BIGINT NOT NULL DEFAULT -1,
        name VARCHAR(100) NOT NULL DEFAULT '',
        comment VARCHAR(100) NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS geopoints (
        id BIGSERIAL PRIMARY KEY,
        east DOUBLE PRECISION NOT NULL,
        north DOUBLE PRECISION NOT NULL,
        alt DOUBLE PRECISION NOT NULL DEFAULT 0,
        has_z BOOLEAN NOT NULL DEFAULT FALSE,
        reference_system TEXT NOT NULL,
        horizon_id BIGINT NOT NULL DEFAULT -1,
        line_id BIGINT NOT NULL DEFAULT -1,
        line_pos INTEGER NOT NULL DEFAULT -1,
        name VARCHAR(100) NOT NULL DEFAULT '',
        comment VARCHAR(100) NOT NULL DEFAULT ''
    )
    "#,
    "CREATE INDEX IF NOT EXISTS geopoints_east_north_idx ON geopoints (east, north)",
    "CREATE INDEX IF NOT EXISTS geopoints_line_idx ON geopoints (line_id, line_pos)",
    r#"
    CREATE TABLE IF NOT EXISTS properties (
        id BIGSERIAL PRIMARY KEY,
        point_id BIGINT NOT NULL REFERENCES geopoints (id) ON DELETE CASCADE,
        name VARCHAR(100) NOT NULL,
        value DOUBLE PRECISION NOT NULL,
        unit TEXT NOT NULL DEFAULT '',
        UNIQUE (point_id, name)
    )
    "#,
];

/// Columns selected for a point, with its stratigraphy joined as `s`
pub const POINT_COLUMNS: &str = "g.id, g.east, g.north, g.alt, g.has_z, g.reference_system, \
     g.line_id, g.line_pos, g.name, g.comment, g.horizon_id, \
     s.name AS horizon_name, s.age AS horizon_age";

pub const POINT_FROM: &str = "geopoints g LEFT JOIN stratigraphy s ON s.id = g.horizon_id";

/// Moves the `BIGSERIAL` sequence of `table` past its largest id, so that rows
/// saved with an explicit id never collide with generated ones.
pub fn sync_sequence_sql(table: &str) -> String {
    format!(
        "SELECT setval(pg_get_serial_sequence('{0}', 'id'), GREATEST(MAX(id), 1)) FROM {0}",
        table
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_sequence_targets_table_sequence() {
        let sql = sync_sequence_sql("lines");
        assert!(sql.contains("pg_get_serial_sequence('lines', 'id')"));
        assert!(sql.ends_with("FROM lines"));
        assert!(sql.contains("MAX(id)"));
    }

    #[test]
    fn test_every_serial_table_is_created() {
        for table in ["stratigraphy", "lines", "geopoints", "properties"] {
            let create = format!("CREATE TABLE IF NOT EXISTS {} (", table);
            let statement = STATEMENTS.iter().find(|s| s.contains(&create)).unwrap();
            assert!(statement.contains("id BIGSERIAL PRIMARY KEY"));
        }
    }
}
