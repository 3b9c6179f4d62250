//! HTTP surface: router, shared state and endpoint handlers.

pub mod endpoints;
pub mod error;
pub mod router;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::pipeline::extraction::OcrEngine;
use crate::pipeline::simplify::ChatClient;
use crate::storage::Storage;

/// Everything the handlers need, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn Storage>,
    pub ocr: Arc<dyn OcrEngine>,
    pub chat: Arc<dyn ChatClient>,
}
