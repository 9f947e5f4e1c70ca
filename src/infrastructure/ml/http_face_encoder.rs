use super::traits::FaceEncoder;
use crate::domain::comparison::{entity::FaceEncoding, errors::EncoderError};
use async_trait::async_trait;
use image::ImageReader;
use reqwest::{StatusCode, header::CONTENT_TYPE};
use serde::Deserialize;
use std::{io::Cursor, time::Duration};

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct EncodingsResponse {
    encodings: Vec<FaceEncoding>,
}

/// Delegates face encoding to a remote inference endpoint.
///
/// The image is posted as the raw request body. The endpoint answers with
/// `{"encodings": [[f32, ...], ...]}`, one entry per detected face, or with
/// 415/422 when it cannot read the image. A 503 (model still loading) is
/// retried a few times.
pub struct HttpFaceEncoder {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    retry_delay: Duration,
}

impl HttpFaceEncoder {
    pub fn new(endpoint: String, token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            token,
            retry_delay: RETRY_DELAY,
        })
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Rejects bytes whose header is not a readable image, without decoding pixels.
    fn sniff(image_data: &[u8]) -> Result<(u32, u32), EncoderError> {
        let reader = ImageReader::new(Cursor::new(image_data))
            .with_guessed_format()
            .map_err(|e| EncoderError::UndecodableImage(e.to_string()))?;

        if reader.format().is_none() {
            return Err(EncoderError::UndecodableImage(
                "unrecognized image format".into(),
            ));
        }

        reader
            .into_dimensions()
            .map_err(|e| EncoderError::UndecodableImage(e.to_string()))
    }
}

#[async_trait]
impl FaceEncoder for HttpFaceEncoder {
    async fn encode(&self, image_data: &[u8]) -> Result<Vec<FaceEncoding>, EncoderError> {
        let (width, height) = Self::sniff(image_data)?;
        tracing::debug!(width, height, bytes = image_data.len(), "Sending image to face encoder");

        let mut attempt = 1;
        loop {
            let mut request = self
                .client
                .post(&self.endpoint)
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(image_data.to_vec());
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| EncoderError::Unavailable(e.to_string()))?;

            match response.status() {
                status if status.is_success() => {
                    let body: EncodingsResponse = response.json().await.map_err(|e| {
                        EncoderError::Unavailable(format!("invalid encoder response: {}", e))
                    })?;
                    return Ok(body.encodings);
                }
                StatusCode::SERVICE_UNAVAILABLE if attempt < MAX_ATTEMPTS => {
                    tracing::warn!(attempt, "Face encoder not ready, retrying");
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                StatusCode::UNPROCESSABLE_ENTITY | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                    return Err(EncoderError::UndecodableImage(format!(
                        "encoder rejected image with {}",
                        response.status()
                    )));
                }
                status => {
                    return Err(EncoderError::Unavailable(format!(
                        "encoder responded with {}",
                        status
                    )));
                }
            }
        }
    }

    fn backend(&self) -> &'static str {
        "remote"
    }
}
