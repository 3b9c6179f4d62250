//! SQLite backend. Migrations run at open; timestamps are stored as RFC 3339
//! text and glossaries as JSON text.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{Storage, StorageError};
use crate::config::DOCUMENT_EXPIRY_DAYS;
use crate::language::SupportedLanguage;
use crate::models::{Document, GlossaryTerm, NewDocument, Suggestion};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        configure_pragmas(&conn)?;
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        configure_pragmas(&conn)?;
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn configure_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![
        (1, include_str!("../../resources/migrations/001_initial.sql")),
    ];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql).map_err(|e| StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })?;
        }
    }

    Ok(())
}

fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get::<_, i64>(0)
    })
    .unwrap_or(0)
}

fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<(String, Document)> {
    let id: String = row.get(0)?;
    let original_text: String = row.get(1)?;
    let simplified_text: Option<String> = row.get(2)?;
    let language_code: String = row.get(3)?;
    let glossary_json: String = row.get(4)?;
    let file_name: Option<String> = row.get(5)?;
    let created_at: String = row.get(6)?;
    let expires_at: String = row.get(7)?;

    Ok((
        glossary_json,
        Document {
            id: Uuid::parse_str(&id).unwrap_or_default(),
            original_text,
            simplified_text,
            // Stored codes always come from the validated enum; fall back to
            // English rather than failing the whole read if one is mangled.
            target_language: SupportedLanguage::from_code(&language_code)
                .unwrap_or(SupportedLanguage::En),
            glossary: Vec::new(),
            file_name,
            created_at: parse_timestamp(&created_at),
            expires_at: parse_timestamp(&expires_at),
        },
    ))
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn attach_glossary(glossary_json: &str, doc: &mut Document) {
    doc.glossary = serde_json::from_str::<Vec<GlossaryTerm>>(glossary_json).unwrap_or_default();
}

const DOCUMENT_COLUMNS: &str =
    "id, original_text, simplified_text, target_language, glossary, file_name, created_at, expires_at";

impl Storage for SqliteStore {
    fn save_document(&self, new: NewDocument) -> Result<Document, StorageError> {
        let conn = self.lock()?;
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let expires_at = created_at + Duration::days(DOCUMENT_EXPIRY_DAYS);
        let glossary_json = serde_json::to_string(&new.glossary)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        conn.execute(
            "INSERT INTO documents (id, original_text, simplified_text, target_language, glossary, file_name, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id.to_string(),
                new.original_text,
                new.simplified_text,
                new.target_language.code(),
                glossary_json,
                new.file_name,
                created_at.to_rfc3339(),
                expires_at.to_rfc3339(),
            ],
        )?;

        Ok(Document {
            id,
            original_text: new.original_text,
            simplified_text: new.simplified_text,
            target_language: new.target_language,
            glossary: new.glossary,
            file_name: new.file_name,
            created_at,
            expires_at,
        })
    }

    fn list_documents(&self, limit: usize) -> Result<Vec<Document>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents ORDER BY created_at DESC, rowid DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit as i64], row_to_document)?;

        let mut docs = Vec::new();
        for row in rows {
            let (glossary_json, mut doc) = row?;
            attach_glossary(&glossary_json, &mut doc);
            docs.push(doc);
        }
        Ok(docs)
    }

    fn get_document(&self, id: &str) -> Result<Option<Document>, StorageError> {
        let conn = self.lock()?;
        let result = conn.query_row(
            &format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = ?1"),
            params![id],
            row_to_document,
        );
        match result {
            Ok((glossary_json, mut doc)) => {
                attach_glossary(&glossary_json, &mut doc);
                Ok(Some(doc))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_document(&self, id: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        // Deleting a missing id is a no-op, not an error.
        conn.execute("DELETE FROM documents WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn create_suggestion(&self, message: &str) -> Result<Suggestion, StorageError> {
        let conn = self.lock()?;
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO suggestions (id, message, created_at) VALUES (?1, ?2, ?3)",
            params![id.to_string(), message, created_at.to_rfc3339()],
        )?;
        Ok(Suggestion { id, message: message.to_string(), created_at })
    }

    fn list_suggestions(&self) -> Result<Vec<Suggestion>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, message, created_at FROM suggestions ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let id: String = row.get(0)?;
            let message: String = row.get(1)?;
            let created_at: String = row.get(2)?;
            Ok(Suggestion {
                id: Uuid::parse_str(&id).unwrap_or_default(),
                message,
                created_at: parse_timestamp(&created_at),
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(StorageError::from)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
