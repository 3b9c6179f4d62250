//! SaralDocs — plain-language rewrites of photographed government and legal
//! documents.
//!
//! The pipeline is sequential per request: decode the uploaded base64 payload,
//! write it to a temp file, extract text (Tesseract OCR for images, text-layer
//! extraction for PDFs), send it to an OpenAI-compatible chat-completion API
//! with the simplification prompt, repair the model's JSON reply, persist the
//! document, and respond. Export endpoints render stored results to PDF or PNG.

pub mod api;
pub mod config;
pub mod export;
pub mod language;
pub mod models;
pub mod pipeline;
pub mod storage;
