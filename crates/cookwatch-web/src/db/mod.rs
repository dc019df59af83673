use std::path::{Path, PathBuf};

use rusqlite::Connection;

mod query;
mod schema;

pub use query::{
    SessionRow, load_motion_samples, load_session_row, load_session_rows,
    load_temperature_samples,
};
pub use schema::ensure_schema;

#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> Result<Connection, String> {
        Connection::open(&self.path).map_err(|error| format!("open sqlite: {error}"))
    }
}

#[cfg(test)]
pub(crate) use query::tests::{exec, scratch_db};
