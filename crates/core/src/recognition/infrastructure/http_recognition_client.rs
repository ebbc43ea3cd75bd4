use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recognition::domain::enrollment::EnrollmentOutcome;
use crate::recognition::domain::recognition_client::RecognitionClient;
use crate::recognition::domain::recognition_result::RecognitionResult;
use crate::shared::constants::{ENROLL_ENDPOINT, HEALTH_ENDPOINT, RECOGNIZE_ENDPOINT};
use crate::shared::face_box::FaceBox;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

// Wire contract of the service; kept private to this adapter.

#[derive(Serialize)]
struct RecognizeRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    results: Vec<WireResult>,
}

#[derive(Deserialize)]
struct WireResult {
    name: String,
    confidence: f64,
    #[serde(rename = "box")]
    bbox: [i32; 4],
}

#[derive(Serialize)]
struct EnrollRequest<'a> {
    name: &'a str,
    image: &'a str,
}

#[derive(Deserialize)]
struct EnrollResponse {
    success: bool,
    message: String,
}

/// Service liveness report from `GET /health`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ServiceHealth {
    pub status: String,
    pub enrolled_faces: usize,
}

/// Blocking JSON-over-HTTP adapter for [`RecognitionClient`].
pub struct HttpRecognitionClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpRecognitionClient {
    /// `base_url` with no trailing slash, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn health(&self) -> Result<ServiceHealth, ApiError> {
        let url = format!("{}{HEALTH_ENDPOINT}", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;
        response
            .json()
            .map_err(|e| ApiError::Decode { url, source: e })
    }

    fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let url = format!("{}{endpoint}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;
        response
            .json()
            .map_err(|e| ApiError::Decode { url, source: e })
    }
}

impl RecognitionClient for HttpRecognitionClient {
    fn recognize(
        &self,
        image_data_url: &str,
    ) -> Result<Vec<RecognitionResult>, Box<dyn std::error::Error + Send + Sync>> {
        let response: RecognizeResponse = self.post_json(
            RECOGNIZE_ENDPOINT,
            &RecognizeRequest {
                image: image_data_url,
            },
        )?;
        Ok(response
            .results
            .into_iter()
            .map(|r| RecognitionResult::new(r.name, r.confidence, FaceBox::from_wire(r.bbox)))
            .collect())
    }

    fn enroll(
        &self,
        name: &str,
        image_data_url: &str,
    ) -> Result<EnrollmentOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let response: EnrollResponse = self.post_json(
            ENROLL_ENDPOINT,
            &EnrollRequest {
                name,
                image: image_data_url,
            },
        )?;
        Ok(EnrollmentOutcome {
            success: response.success,
            message: response.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = HttpRecognitionClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_recognize_response_decodes_wire_box() {
        let json = r#"{"results":[{"name":"Alice","confidence":0.92,"box":[10,20,100,150]}]}"#;
        let response: RecognizeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        let r = &response.results[0];
        assert_eq!(r.name, "Alice");
        assert_eq!(r.bbox, [10, 20, 100, 150]);
        assert_eq!(FaceBox::from_wire(r.bbox), FaceBox::new(10, 20, 100, 150));
    }

    #[test]
    fn test_recognize_response_decodes_empty_results() {
        let response: RecognizeResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_enroll_response_decodes() {
        let json = r#"{"success":false,"message":"No face detected, please retry"}"#;
        let response: EnrollResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, "No face detected, please retry");
    }

    #[test]
    fn test_health_decodes() {
        let json = r#"{"status":"healthy","enrolled_faces":3}"#;
        let health: ServiceHealth = serde_json::from_str(json).unwrap();
        assert_eq!(
            health,
            ServiceHealth {
                status: "healthy".to_string(),
                enrolled_faces: 3
            }
        );
    }

    #[test]
    fn test_recognize_request_wire_shape() {
        let body = serde_json::to_value(RecognizeRequest {
            image: "data:image/jpeg;base64,AAAA",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"image": "data:image/jpeg;base64,AAAA"})
        );
    }

    #[test]
    fn test_enroll_request_wire_shape() {
        let body = serde_json::to_value(EnrollRequest {
            name: "Alice",
            image: "data:image/jpeg;base64,AAAA",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Alice", "image": "data:image/jpeg;base64,AAAA"})
        );
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let client = HttpRecognitionClient::new("http://invalid.nonexistent.example.com");
        let result = client.recognize("data:image/jpeg;base64,AAAA");
        assert!(result.is_err());
    }
}
