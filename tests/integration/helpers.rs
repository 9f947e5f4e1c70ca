use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use face_compare::{
    application::compare_faces::{dto::ComparisonLimits, use_case::CompareFacesUseCase},
    config::Config,
    domain::{
        comparison::{entity::ComparisonResult, errors::ComparisonError},
        upload::policy::UploadPolicy,
    },
    infrastructure::ml::traits::FaceComparator,
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tower::ServiceExt;
use uuid::Uuid;

/// Reads the image bytes as a label. `face:<name>` is an image showing
/// `<name>`, `offline` simulates a dead encoder, anything else has no face.
#[derive(Default)]
pub struct StubComparator {
    calls: AtomicUsize,
}

impl StubComparator {
    fn face(image: &[u8]) -> Option<&[u8]> {
        image.strip_prefix(b"face:")
    }
}

#[async_trait]
impl FaceComparator for StubComparator {
    async fn compare(
        &self,
        image_1: &[u8],
        image_2: &[u8],
    ) -> Result<ComparisonResult, ComparisonError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if image_1 == b"offline" || image_2 == b"offline" {
            return Err(ComparisonError::EncoderUnavailable("stub offline".into()));
        }
        Ok(match (Self::face(image_1), Self::face(image_2)) {
            (Some(a), Some(b)) => ComparisonResult::faces(a == b),
            _ => ComparisonResult::no_face(),
        })
    }
}

pub struct TestApp {
    pub app: Router,
    comparator: Arc<StubComparator>,
}

impl TestApp {
    pub fn comparisons(&self) -> usize {
        self.comparator.calls.load(Ordering::SeqCst)
    }
}

pub fn build_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_upload_bytes: 64 * 1024,
        compare_queue_timeout_secs: 5,
        ..Config::default()
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(build_config())
}

pub fn spawn_app_with(config: Config) -> TestApp {
    let comparator = Arc::new(StubComparator::default());
    let compare_faces = Arc::new(CompareFacesUseCase::new(
        Arc::new(UploadPolicy::new(&config.allowed_extensions)),
        comparator.clone(),
        ComparisonLimits {
            max_concurrent: config.compare_concurrency,
            queue_timeout: Duration::from_secs(config.compare_queue_timeout_secs),
        },
    ));

    let state = AppState {
        config,
        compare_faces,
        encoder_backend: "stub",
    };

    TestApp {
        app: create_router(state),
        comparator,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// One multipart part: field name, optional filename, content.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub data: &'a [u8],
}

pub fn file<'a>(name: &'a str, filename: &'a str, data: &'a [u8]) -> Part<'a> {
    Part {
        name,
        filename: Some(filename),
        data,
    }
}

pub fn text<'a>(name: &'a str, value: &'a str) -> Part<'a> {
    Part {
        name,
        filename: None,
        data: value.as_bytes(),
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let boundary = format!("----face-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match part.filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let (boundary, body) = multipart_body(parts);
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build multipart request")
}
