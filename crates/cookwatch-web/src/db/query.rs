use rusqlite::named_params;
use tracing::warn;

use crate::db::Db;
use crate::series::Sample;
use crate::util::time::parse_stored_datetime;

/// One `image2` row: the capture batch record the session view is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRow {
    pub session: i64,
    pub datetime: Option<String>,
    pub ingredient: Option<String>,
    pub style: Option<String>,
    pub description: Option<String>,
}

const SESSION_COLUMNS: &str = "session, datetime, ingredient, style, description";

fn session_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SessionRow> {
    Ok(SessionRow {
        session: row.get(0)?,
        datetime: row.get(1)?,
        ingredient: row.get(2)?,
        style: row.get(3)?,
        description: row.get(4)?,
    })
}

pub fn load_session_rows(db: &Db) -> Result<Vec<SessionRow>, String> {
    let conn = db.open()?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM image2
             WHERE session IS NOT NULL
             ORDER BY session DESC, id ASC"
        ))
        .map_err(|error| format!("prepare image2 read: {error}"))?;
    let rows = stmt
        .query_map([], session_row)
        .map_err(|error| format!("query image2: {error}"))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|error| format!("read image2 row: {error}"))
}

/// When several rows share a session number the oldest row wins.
pub fn load_session_row(db: &Db, session_number: i64) -> Result<Option<SessionRow>, String> {
    let conn = db.open()?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM image2
             WHERE session = :session
             ORDER BY id ASC
             LIMIT 1"
        ))
        .map_err(|error| format!("prepare image2 lookup: {error}"))?;
    let mut rows = stmt
        .query_map(named_params! { ":session": session_number }, session_row)
        .map_err(|error| format!("query image2 session {session_number}: {error}"))?;
    rows.next()
        .transpose()
        .map_err(|error| format!("read image2 row: {error}"))
}

/// Raw temperature readings in the unit the sensor rig stores (Fahrenheit).
pub fn load_temperature_samples(db: &Db, session_number: i64) -> Result<Vec<Sample<f64>>, String> {
    load_samples(db, "temperature", session_number, |row| row.get::<_, f64>(2))
}

pub fn load_motion_samples(db: &Db, session_number: i64) -> Result<Vec<Sample<bool>>, String> {
    load_samples(db, "motion2", session_number, |row| row.get::<_, bool>(2))
}

fn load_samples<V>(
    db: &Db,
    table: &'static str,
    session_number: i64,
    value: impl Fn(&rusqlite::Row<'_>) -> rusqlite::Result<V>,
) -> Result<Vec<Sample<V>>, String> {
    let conn = db.open()?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, datetime, value FROM {table}
             WHERE session = :session AND value IS NOT NULL
             ORDER BY datetime ASC, id ASC"
        ))
        .map_err(|error| format!("prepare {table} read: {error}"))?;
    let mut rows = stmt
        .query(named_params! { ":session": session_number })
        .map_err(|error| format!("query {table}: {error}"))?;

    let mut samples = Vec::new();
    while let Some(row) = rows
        .next()
        .map_err(|error| format!("read {table} row: {error}"))?
    {
        let id: i64 = row
            .get(0)
            .map_err(|error| format!("read {table}.id: {error}"))?;
        let raw_datetime: String = row
            .get(1)
            .map_err(|error| format!("read {table}.datetime: {error}"))?;
        let Some(at) = parse_stored_datetime(&raw_datetime) else {
            warn!(table, id, %raw_datetime, "skipping sample with unparseable datetime");
            continue;
        };
        let value = value(row).map_err(|error| format!("read {table}.value: {error}"))?;
        samples.push(Sample { at, value });
    }

    // Text ordering breaks down when writers mix `T` and space separators.
    samples.sort_by_key(|sample| sample.at);
    Ok(samples)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::db::ensure_schema;

    static NEXT_DB: AtomicU64 = AtomicU64::new(0);

    pub(crate) fn scratch_db(name: &str) -> Db {
        let n = NEXT_DB.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "cookwatch-{name}-{}-{n}.sqlite",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let db = Db::new(path);
        ensure_schema(&db).expect("create schema");
        db
    }

    pub(crate) fn exec(db: &Db, sql: &str) {
        db.open()
            .expect("open scratch db")
            .execute_batch(sql)
            .expect("seed scratch db");
    }

    #[test]
    fn session_rows_are_newest_session_first() {
        let db = scratch_db("rows");
        exec(
            &db,
            "INSERT INTO image2 (session, datetime, ingredient, style, description) VALUES
               (3, '2024-03-01 10:00:00', '{egg}', 'Frying', 'eggs'),
               (7, '2024-03-02 10:00:00', NULL, NULL, NULL),
               (NULL, '2024-03-03 10:00:00', '{ghost}', 'Boiling', 'orphan'),
               (5, NULL, '{rice}', 'Steaming', NULL);",
        );

        let rows = load_session_rows(&db).expect("load rows");
        let numbers: Vec<i64> = rows.iter().map(|row| row.session).collect();
        assert_eq!(numbers, vec![7, 5, 3], "rows without a session are skipped");
        assert_eq!(rows[0].style, None);
        assert_eq!(rows[2].ingredient.as_deref(), Some("{egg}"));
    }

    #[test]
    fn session_lookup_by_number() {
        let db = scratch_db("lookup");
        exec(
            &db,
            "INSERT INTO image2 (session, style) VALUES (4, 'Baking'), (4, 'Roasting');",
        );

        let row = load_session_row(&db, 4).expect("lookup").expect("row exists");
        assert_eq!(row.style.as_deref(), Some("Baking"));
        assert_eq!(load_session_row(&db, 99).expect("lookup missing"), None);
    }

    #[test]
    fn samples_are_ascending_and_scoped_to_session() {
        let db = scratch_db("samples");
        exec(
            &db,
            "INSERT INTO temperature (session, datetime, value) VALUES
               (42, '2024-03-01T10:05:00', 75.0),
               (42, '2024-03-01 10:00:00', 70.0),
               (42, '2024-03-01 10:10:00', NULL),
               (42, 'not a date', 80.0),
               (43, '2024-03-01 09:00:00', 60.0);
             INSERT INTO motion2 (session, datetime, value) VALUES
               (42, '2024-03-01 10:01:00', 1),
               (42, '2024-03-01 10:00:00', 0);",
        );

        let temps = load_temperature_samples(&db, 42).expect("load temperature");
        let values: Vec<f64> = temps.iter().map(|sample| sample.value).collect();
        assert_eq!(values, vec![70.0, 75.0]);

        let motion = load_motion_samples(&db, 42).expect("load motion");
        let values: Vec<bool> = motion.iter().map(|sample| sample.value).collect();
        assert_eq!(values, vec![false, true]);

        assert!(load_motion_samples(&db, 1).expect("load empty").is_empty());
    }

    #[test]
    fn missing_tables_surface_as_errors() {
        let path = std::env::temp_dir().join(format!(
            "cookwatch-bare-{}-{}.sqlite",
            std::process::id(),
            NEXT_DB.fetch_add(1, Ordering::Relaxed)
        ));
        let _ = std::fs::remove_file(&path);
        let db = Db::new(path);
        let error = load_session_rows(&db).expect_err("no image2 table");
        assert!(error.contains("image2"), "unexpected error: {error}");
    }
}
