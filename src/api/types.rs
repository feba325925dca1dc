//! Shared state for the API router.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::db::DatabaseError;

/// Shared context for all API routes: the application database behind a
/// mutex. Handlers run their repository work synchronously while holding
/// the lock; no guard ever crosses an await point.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
}

impl ApiContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the shared connection, mapping repository errors
    /// to API responses.
    pub fn with_db<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DatabaseError>,
    ) -> Result<T, ApiError> {
        let conn = self
            .db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))?;
        f(&conn).map_err(ApiError::from)
    }
}
