//! Persistence behind a narrow trait: SQLite for durable storage, an
//! in-memory map otherwise. The backend is picked from configuration at
//! startup.

mod memory;
mod sqlite;

use std::sync::Arc;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::AppConfig;
use crate::models::{Document, NewDocument, Suggestion};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("migration v{version} failed: {reason}")]
    MigrationFailed { version: i64, reason: String },
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
    #[error("lock poisoned")]
    LockPoisoned,
}

/// Document and suggestion persistence. Documents are create/read/delete
/// only; `delete_document` is idempotent and missing ids are `Ok(None)`,
/// never errors.
pub trait Storage: Send + Sync {
    fn save_document(&self, new: NewDocument) -> Result<Document, StorageError>;
    /// Newest first, at most `limit` records.
    fn list_documents(&self, limit: usize) -> Result<Vec<Document>, StorageError>;
    fn get_document(&self, id: &str) -> Result<Option<Document>, StorageError>;
    fn delete_document(&self, id: &str) -> Result<(), StorageError>;
    fn create_suggestion(&self, message: &str) -> Result<Suggestion, StorageError>;
    fn list_suggestions(&self) -> Result<Vec<Suggestion>, StorageError>;

    /// Backend name for the health endpoint.
    fn backend_name(&self) -> &'static str;
}

/// Build the storage backend the configuration asks for.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn Storage>, StorageError> {
    match &config.db_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using SQLite storage");
            Ok(Arc::new(SqliteStore::open(path)?))
        }
        None => {
            tracing::info!("no database path configured, using in-memory storage");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
