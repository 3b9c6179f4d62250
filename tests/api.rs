//! Router-level tests with a mock OCR engine, a scripted chat client and the
//! in-memory store.

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::Engine;
use tower::ServiceExt;

use saraldocs::api::router::api_router;
use saraldocs::api::AppState;
use saraldocs::config::AppConfig;
use saraldocs::language::SupportedLanguage;
use saraldocs::models::{GlossaryTerm, NewDocument};
use saraldocs::pipeline::extraction::{ExtractionError, OcrEngine};
use saraldocs::pipeline::simplify::llm::MockChatClient;
use saraldocs::storage::{MemoryStore, Storage};

const VALID_REPLY: &str = r#"{"simplifiedText": "This card lets you buy subsidized grain every month.", "glossary": [{"term": "ration card", "definition": "a card for buying cheap food from government shops"}]}"#;

struct MockOcr {
    text: String,
    calls: Mutex<usize>,
}

impl MockOcr {
    fn returning(text: &str) -> Arc<Self> {
        Arc::new(Self { text: text.to_string(), calls: Mutex::new(0) })
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl OcrEngine for MockOcr {
    fn recognize(&self, _path: &Path, _lang: &str) -> Result<String, ExtractionError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.text.clone())
    }
}

struct TestApp {
    router: Router,
    storage: Arc<MemoryStore>,
    ocr: Arc<MockOcr>,
}

fn test_app(chat: MockChatClient) -> TestApp {
    let storage = Arc::new(MemoryStore::new());
    let ocr = MockOcr::returning(
        "RATION CARD\nThe holder is entitled to subsidized food grain under the scheme.",
    );
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        storage: storage.clone(),
        ocr: ocr.clone(),
        chat: Arc::new(chat),
    };
    TestApp { router: api_router(state), storage, ocr }
}

fn jpeg_data_url() -> String {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(&[0u8; 64]);
    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    format!("data:image/jpeg;base64,{encoded}")
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), 16 * 1024 * 1024).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_backend_and_version() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let response = app.router.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage"], "memory");
}

#[tokio::test]
async fn simplify_happy_path_persists_and_responds() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({
                "imageBase64": jpeg_data_url(),
                "language": "hi",
                "fileName": "ration-card.jpg",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(
        json["simplifiedText"],
        "This card lets you buy subsidized grain every month."
    );
    assert!(json["originalText"].as_str().unwrap().contains("RATION CARD"));
    assert_eq!(json["targetLanguage"], "hi");
    assert_eq!(json["glossary"][0]["term"], "ration card");
    assert_eq!(app.ocr.call_count(), 1);

    // Persisted and retrievable.
    let list = app.router.clone().oneshot(get("/api/documents")).await.unwrap();
    let docs = json_body(list).await;
    assert_eq!(docs.as_array().unwrap().len(), 1);
    assert_eq!(docs[0]["fileName"], "ration-card.jpg");

    let id = docs[0]["id"].as_str().unwrap().to_string();
    let detail = app
        .router
        .clone()
        .oneshot(get(&format!("/api/documents/{id}")))
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::OK);
    let doc = json_body(detail).await;
    assert_eq!(doc["targetLanguage"], "hi");
}

#[tokio::test]
async fn simplify_accepts_fenced_json_replies() {
    let fenced = format!("```json\n{VALID_REPLY}\n```");
    let app = test_app(MockChatClient::replying(&fenced));
    let response = app
        .router
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({ "imageBase64": jpeg_data_url(), "language": "en" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["glossary"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn simplify_degrades_to_fallback_on_garbage_reply() {
    let app = test_app(MockChatClient::replying("I am sorry, I cannot produce JSON today."));
    let response = app
        .router
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({ "imageBase64": jpeg_data_url(), "language": "en" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["simplifiedText"], "I am sorry, I cannot produce JSON today.");
    assert_eq!(json["glossary"][0]["term"], "Note");
}

#[tokio::test]
async fn simplify_requires_a_file() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let response = app
        .router
        .oneshot(post_json("/api/simplify", serde_json::json!({ "language": "en" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], "No file uploaded");
}

#[tokio::test]
async fn simplify_rejects_unknown_language_codes() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let response = app
        .router
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({ "imageBase64": jpeg_data_url(), "language": "xx" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("Unsupported language code"));
}

#[tokio::test]
async fn simplify_rejects_unsupported_file_types_without_persisting() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let encoded = base64::engine::general_purpose::STANDARD.encode(b"hello, plain text");
    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({
                "imageBase64": format!("data:text/plain;base64,{encoded}"),
                "language": "en",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("Unsupported file type"));
    assert_eq!(app.ocr.call_count(), 0);
    assert!(app.storage.list_documents(50).unwrap().is_empty());
}

#[tokio::test]
async fn simplify_rejects_oversized_uploads_before_ocr() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    // 9 MB of zeros, well over the 8 MB cap.
    let encoded = base64::engine::general_purpose::STANDARD.encode(vec![0u8; 9 * 1024 * 1024]);
    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({
                "imageBase64": format!("data:image/jpeg;base64,{encoded}"),
                "language": "en",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("too large"));
    assert_eq!(app.ocr.call_count(), 0);
}

#[tokio::test]
async fn simplify_rejects_invalid_base64() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let response = app
        .router
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({
                "imageBase64": "data:image/jpeg;base64,@@not-base64@@",
                "language": "en",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Invalid base64 image data");
}

#[tokio::test]
async fn simplify_remaps_rate_limit_errors() {
    let app = test_app(MockChatClient::failing_with(
        r#"{"error": {"code": "rate_limit_exceeded"}}"#,
    ));
    let response = app
        .router
        .oneshot(post_json(
            "/api/simplify",
            serde_json::json!({ "imageBase64": jpeg_data_url(), "language": "en" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains("rate limit reached"));
}

#[tokio::test]
async fn missing_document_is_404_but_delete_is_idempotent() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let id = uuid::Uuid::new_v4();

    let response = app
        .router
        .clone()
        .oneshot(get(&format!("/api/documents/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Document not found");

    let response = app
        .router
        .clone()
        .oneshot(delete(&format!("/api/documents/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
}

#[tokio::test]
async fn document_listing_is_newest_first_and_delete_all_counts() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    for n in 0..3 {
        app.storage
            .save_document(NewDocument {
                original_text: format!("document {n}"),
                simplified_text: Some(format!("simple {n}")),
                target_language: SupportedLanguage::En,
                glossary: vec![],
                file_name: None,
            })
            .unwrap();
    }

    let response = app.router.clone().oneshot(get("/api/documents")).await.unwrap();
    let docs = json_body(response).await;
    assert_eq!(docs.as_array().unwrap().len(), 3);
    assert_eq!(docs[0]["originalText"], "document 2");
    assert_eq!(docs[2]["originalText"], "document 0");

    let response = app.router.clone().oneshot(delete("/api/documents")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["deletedCount"], 3);
    assert!(app.storage.list_documents(50).unwrap().is_empty());
}

#[tokio::test]
async fn suggestion_length_boundary_is_ten_characters() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));

    let response = app
        .router
        .clone()
        .oneshot(post_json("/api/suggestions", serde_json::json!({ "message": "123456789" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .router
        .clone()
        .oneshot(post_json("/api/suggestions", serde_json::json!({ "message": "1234567890" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["message"], "1234567890");

    let response = app.router.clone().oneshot(get("/api/suggestions")).await.unwrap();
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn download_pdf_returns_an_attachment() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let response = app
        .router
        .oneshot(post_json(
            "/api/download/pdf",
            serde_json::json!({
                "originalText": "original",
                "simplifiedText": "The office is closed on public holidays.",
                "glossary": [{"term": "public holiday", "definition": "a day offices are shut"}],
                "targetLanguage": "en",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("attachment"));
    let body = to_bytes(response.into_body(), 16 * 1024 * 1024).await.unwrap();
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn download_image_requires_simplified_text() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let response = app
        .router
        .oneshot(post_json(
            "/api/download/image",
            serde_json::json!({
                "originalText": "original",
                "simplifiedText": "   ",
                "glossary": [],
                "targetLanguage": "en",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["message"], "No simplified text available to download");
}

#[tokio::test]
async fn glossary_terms_survive_the_round_trip() {
    let app = test_app(MockChatClient::replying(VALID_REPLY));
    let saved = app
        .storage
        .save_document(NewDocument {
            original_text: "original".into(),
            simplified_text: Some("simple".into()),
            target_language: SupportedLanguage::Mr,
            glossary: vec![GlossaryTerm {
                term: "सातबारा".into(),
                definition: "the land ownership extract".into(),
            }],
            file_name: None,
        })
        .unwrap();

    let response = app
        .router
        .oneshot(get(&format!("/api/documents/{}", saved.id)))
        .await
        .unwrap();
    let doc = json_body(response).await;
    assert_eq!(doc["glossary"][0]["term"], "सातबारा");
    assert_eq!(doc["targetLanguage"], "mr");
}
