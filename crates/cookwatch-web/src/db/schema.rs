use crate::db::Db;

/// Tables written by the sensor ingestion pipeline. Only created when
/// missing so a fresh database file can be served; nothing is migrated.
const READ_SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS image2 (
        id INTEGER PRIMARY KEY,
        session INTEGER,
        datetime TEXT,
        ingredient TEXT,
        style TEXT,
        description TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_image2_session ON image2(session);

    CREATE TABLE IF NOT EXISTS temperature (
        id INTEGER PRIMARY KEY,
        session INTEGER,
        datetime TEXT NOT NULL,
        value REAL
    );
    CREATE INDEX IF NOT EXISTS idx_temperature_session_datetime
        ON temperature(session, datetime);

    CREATE TABLE IF NOT EXISTS motion2 (
        id INTEGER PRIMARY KEY,
        session INTEGER,
        datetime TEXT NOT NULL,
        value INTEGER
    );
    CREATE INDEX IF NOT EXISTS idx_motion2_session_datetime
        ON motion2(session, datetime);
";

pub fn ensure_schema(db: &Db) -> Result<(), String> {
    let conn = db.open()?;
    conn.execute_batch(READ_SCHEMA_SQL)
        .map_err(|error| format!("ensure schema: {error}"))
}
