//! In-memory backend. Single-process only; everything is lost on restart.

use std::sync::Mutex;

use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{Storage, StorageError};
use crate::config::DOCUMENT_EXPIRY_DAYS;
use crate::models::{Document, NewDocument, Suggestion};

#[derive(Default)]
pub struct MemoryStore {
    // Insertion-ordered; listings walk it back to front.
    documents: Mutex<Vec<Document>>,
    suggestions: Mutex<Vec<Suggestion>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn save_document(&self, new: NewDocument) -> Result<Document, StorageError> {
        let created_at = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            original_text: new.original_text,
            simplified_text: new.simplified_text,
            target_language: new.target_language,
            glossary: new.glossary,
            file_name: new.file_name,
            created_at,
            expires_at: created_at + Duration::days(DOCUMENT_EXPIRY_DAYS),
        };
        let mut documents = self.documents.lock().map_err(|_| StorageError::LockPoisoned)?;
        documents.push(doc.clone());
        Ok(doc)
    }

    fn list_documents(&self, limit: usize) -> Result<Vec<Document>, StorageError> {
        let documents = self.documents.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(documents.iter().rev().take(limit).cloned().collect())
    }

    fn get_document(&self, id: &str) -> Result<Option<Document>, StorageError> {
        let documents = self.documents.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(documents.iter().find(|d| d.id.to_string() == id).cloned())
    }

    fn delete_document(&self, id: &str) -> Result<(), StorageError> {
        let mut documents = self.documents.lock().map_err(|_| StorageError::LockPoisoned)?;
        documents.retain(|d| d.id.to_string() != id);
        Ok(())
    }

    fn create_suggestion(&self, message: &str) -> Result<Suggestion, StorageError> {
        let suggestion = Suggestion {
            id: Uuid::new_v4(),
            message: message.to_string(),
            created_at: Utc::now(),
        };
        let mut suggestions = self.suggestions.lock().map_err(|_| StorageError::LockPoisoned)?;
        suggestions.push(suggestion.clone());
        Ok(suggestion)
    }

    fn list_suggestions(&self) -> Result<Vec<Suggestion>, StorageError> {
        let suggestions = self.suggestions.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(suggestions.iter().rev().cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
