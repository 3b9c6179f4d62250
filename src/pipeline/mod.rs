//! The document pipeline: text extraction (OCR / PDF text layer) and
//! LLM-backed simplification. Everything here is synchronous; handlers run
//! it under `tokio::task::spawn_blocking`.

pub mod extraction;
pub mod simplify;
