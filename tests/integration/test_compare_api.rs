use super::helpers::{
    build_config, expect_status, file, multipart_request, read_json, send, spawn_app,
    spawn_app_with,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};

const COMPARE_URI: &str = "/api/v1/compare";

#[tokio::test]
async fn compare_returns_result_json() {
    let app = spawn_app();
    let req = multipart_request(
        COMPARE_URI,
        &[
            file("file_1", "a.png", b"face:alice"),
            file("file_2", "b.jpg", b"face:alice"),
        ],
    );

    let res = expect_status(send(&app.app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(
        body,
        json!({ "faces_found_in_images": true, "is_same_person": true })
    );
}

#[tokio::test]
async fn compare_reports_missing_part() {
    let app = spawn_app();
    let req = multipart_request(COMPARE_URI, &[file("file_1", "a.png", b"face:alice")]);

    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Missing file part 'file_2'");
}

#[tokio::test]
async fn compare_rejects_empty_filename() {
    let app = spawn_app();
    let req = multipart_request(
        COMPARE_URI,
        &[file("file_1", "", b""), file("file_2", "b.png", b"face:bob")],
    );

    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;
    assert!(body["error"].as_str().is_some_and(|e| e.contains("file_1")));
}

#[tokio::test]
async fn compare_rejects_disallowed_extension() {
    let app = spawn_app();
    let req = multipart_request(
        COMPARE_URI,
        &[
            file("file_1", "a.png", b"face:alice"),
            file("file_2", "b.webp", b"face:alice"),
        ],
    );

    let res = expect_status(
        send(&app.app, req).await,
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
    )
    .await;
    let body: Value = read_json(res).await;
    assert_eq!(
        body["error"],
        "File 'b.webp' does not have an allowed image extension"
    );
    assert_eq!(app.comparisons(), 0);
}

#[tokio::test]
async fn configured_extensions_replace_defaults() {
    let mut config = build_config();
    config.allowed_extensions = vec!["webp".to_string()];
    let app = spawn_app_with(config);

    let req = multipart_request(
        COMPARE_URI,
        &[
            file("file_1", "a.webp", b"face:alice"),
            file("file_2", "b.WEBP", b"face:alice"),
        ],
    );
    expect_status(send(&app.app, req).await, StatusCode::OK).await;

    let req = multipart_request(
        COMPARE_URI,
        &[
            file("file_1", "a.png", b"face:alice"),
            file("file_2", "b.png", b"face:alice"),
        ],
    );
    expect_status(
        send(&app.app, req).await,
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
    )
    .await;
}

#[tokio::test]
async fn compare_requires_multipart_body() {
    let app = spawn_app();
    let req = Request::builder()
        .method("POST")
        .uri(COMPARE_URI)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .expect("failed to build request");

    let res = expect_status(send(&app.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let mut config = build_config();
    config.max_upload_bytes = 1024;
    let app = spawn_app_with(config);

    let large = vec![b'x'; 4096];
    let req = multipart_request(
        COMPARE_URI,
        &[
            file("file_1", "a.png", &large),
            file("file_2", "b.png", b"face:alice"),
        ],
    );

    let res = expect_status(send(&app.app, req).await, StatusCode::PAYLOAD_TOO_LARGE).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Upload exceeds the maximum allowed size");
    assert_eq!(app.comparisons(), 0);
}
