use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bookshelf::BookService;
use bookshelf::http::router;
use bookshelf_catalog::{CatalogStore, MockCatalog};
use bookshelf_ingest::{BookRecord, MediaType};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "----bookshelf-test-boundary";
const LIMIT: usize = 1024 * 1024;

fn app(catalog: Arc<MockCatalog>) -> Router {
    router(BookService::new(catalog), LIMIT)
}

/// A multipart body with a single part named `name`.
fn multipart(name: &str, content_type: Option<&str>, payload: &[u8]) -> Vec<u8> {
    let mut body = format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"upload\"\r\n");
    if let Some(content_type) = content_type {
        body.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    body.push_str("\r\n");
    let mut body = body.into_bytes();
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/excel")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn upload_csv(app: Router, csv: &str) -> (StatusCode, Value) {
    send(app, upload_request(multipart("file", Some(MediaType::CSV), csv.as_bytes()))).await
}

#[tokio::test]
async fn test_list_all() {
    let catalog = Arc::new(MockCatalog::with_books([
        BookRecord::new("2", "Hobbit", None),
        BookRecord::new("1", "Dune", Some("sci-fi".to_string())),
    ]));
    let request = Request::builder().uri("/all").body(Body::empty()).unwrap();
    let (status, body) = send(app(catalog), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([
        { "bookNum": "1", "name": "Dune", "description": "sci-fi" },
        { "bookNum": "2", "name": "Hobbit" },
    ]));
}

#[tokio::test]
async fn test_list_all_empty() {
    let request = Request::builder().uri("/all").body(Body::empty()).unwrap();
    let (status, body) = send(app(Arc::new(MockCatalog::default())), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(Arc::new(MockCatalog::default())), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_csv_upload_then_reupload() {
    let catalog = Arc::new(MockCatalog::default());
    let csv = "bookNum,name,description\n1,Dune,sci-fi\n2,Hobbit,\n";

    let (status, body) = upload_csv(app(catalog.clone()), csv).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "data": {
            "inserted": [
                { "bookNum": "1", "name": "Dune", "description": "sci-fi" },
                { "bookNum": "2", "name": "Hobbit", "description": "" },
            ],
            "updated": [],
            "skipped": [],
            "errors": [],
            "batchWriteFailed": false,
        }
    }));

    let (status, body) = upload_csv(app(catalog.clone()), csv).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["inserted"], json!([]));
    assert_eq!(body["data"]["skipped"], json!([
        { "row": { "bookNum": "1", "name": "Dune", "description": "sci-fi" }, "reason": "no changes detected" },
        { "row": { "bookNum": "2", "name": "Hobbit", "description": "" }, "reason": "no changes detected" },
    ]));
    assert_eq!(catalog.find_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_csv_upload_mixed_rows() {
    let catalog = Arc::new(MockCatalog::with_books([BookRecord::new("1", "Dune", None)]));
    let csv = "bookNum,name\n1,Dune Messiah\n,Nameless\n3,Emma\n";
    let (status, body) = upload_csv(app(catalog), csv).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updated"], json!([{ "bookNum": "1", "name": "Dune Messiah" }]));
    assert_eq!(body["data"]["inserted"], json!([{ "bookNum": "3", "name": "Emma" }]));
    assert_eq!(body["data"]["skipped"], json!([
        { "row": { "bookNum": "", "name": "Nameless" }, "reason": "missing required fields" },
    ]));
}

#[tokio::test]
async fn test_xlsx_upload() {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "bookNum").unwrap();
    sheet.write_string(0, 1, "name").unwrap();
    sheet.write_number(1, 0, 42.0).unwrap();
    sheet.write_string(1, 1, "Answers").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let catalog = Arc::new(MockCatalog::with_books([BookRecord::new("42", "Answers", None)]));
    let (status, body) = send(app(catalog), upload_request(multipart("file", Some(MediaType::XLSX), &bytes))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["skipped"][0]["reason"], json!("no changes detected"));
    assert_eq!(body["data"]["inserted"], json!([]));
}

#[tokio::test]
async fn test_missing_file_field() {
    let body = multipart("attachment", Some(MediaType::CSV), b"bookNum,name\n1,Dune\n");
    let (status, body) = send(app(Arc::new(MockCatalog::default())), upload_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "status": "error", "message": "File is required" }));
}

#[tokio::test]
async fn test_unsupported_media_type() {
    let catalog = Arc::new(MockCatalog::default());
    let body = multipart("file", Some("application/pdf"), b"%PDF-1.7");
    let (status, body) = send(app(catalog.clone()), upload_request(body)).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["status"], json!("error"));
    assert_eq!(catalog.batches_applied(), 0);
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported() {
    let body = multipart("file", None, b"bookNum,name\n1,Dune\n");
    let (status, _) = send(app(Arc::new(MockCatalog::default())), upload_request(body)).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_corrupt_workbook() {
    let body = multipart("file", Some(MediaType::XLSX), b"definitely not a zip archive");
    let (status, body) = send(app(Arc::new(MockCatalog::default())), upload_request(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], json!("error"));
}

#[tokio::test]
async fn test_oversized_upload() {
    let mut csv = String::from("bookNum,name\n");
    while csv.len() <= 2 * LIMIT {
        csv.push_str("1,Dune\n");
    }
    let catalog = Arc::new(MockCatalog::default());
    let (status, body) = upload_csv(app(catalog.clone()), &csv).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["status"], json!("error"));
    assert_eq!(catalog.batches_applied(), 0);
}

#[tokio::test]
async fn test_batch_write_failure() {
    let catalog = Arc::new(MockCatalog::default().failing_writes());
    let (status, body) = upload_csv(app(catalog.clone()), "bookNum,name\n1,Dune\n").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["batchWriteFailed"], json!(true));
    assert_eq!(body["data"]["inserted"], json!([{ "bookNum": "1", "name": "Dune" }]));
    assert!(catalog.find_all().await.unwrap().is_empty());
}
