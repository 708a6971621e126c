//! HTTP Response Utilities
//!
//! Status and body handling shared by the HTTP embedding providers. Every
//! failure maps to `EmbeddingUnavailable` so the synchronization
//! coordinator retries it.

use catalog_domain::error::{Error, Result};
use reqwest::Response;

fn unavailable(provider: &str, context: &str, details: &str) -> Error {
    Error::embedding_unavailable(format!("{provider} {context}: {details}"))
}

/// Helpers for embedding API responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check the status and parse the JSON body
    pub async fn check_and_parse(
        response: Response,
        provider_name: &str,
    ) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let code = status.as_u16();

            return Err(match code {
                401 | 403 => unavailable(provider_name, "authentication failed", &error_text),
                429 => unavailable(provider_name, "rate limit exceeded", &error_text),
                500..=599 => {
                    unavailable(provider_name, &format!("server error ({code})"), &error_text)
                }
                _ => unavailable(
                    provider_name,
                    &format!("request failed ({code})"),
                    &error_text,
                ),
            });
        }

        response
            .json()
            .await
            .map_err(|e| unavailable(provider_name, "response parse failed", &e.to_string()))
    }

    /// Map a transport error, distinguishing timeouts
    pub fn request_error(
        provider_name: &str,
        timeout: std::time::Duration,
        error: &reqwest::Error,
    ) -> Error {
        if error.is_timeout() {
            Error::embedding_unavailable(format!(
                "{provider_name} {} {timeout:?}",
                crate::constants::ERROR_MSG_REQUEST_TIMEOUT
            ))
        } else {
            Error::embedding_unavailable(format!("{provider_name} HTTP request failed: {error}"))
        }
    }

    /// Parse a JSON array of numbers into an `f32` vector
    ///
    /// Non-numeric components become NaN so the pipeline rejects the vector.
    pub fn parse_vector(value: &serde_json::Value, provider_name: &str) -> Result<Vec<f32>> {
        let components = value.as_array().ok_or_else(|| {
            Error::embedding_unavailable(format!(
                "{provider_name} invalid response format: missing embedding array"
            ))
        })?;
        #[allow(clippy::cast_possible_truncation)]
        Ok(components
            .iter()
            .map(|v| v.as_f64().map_or(f32::NAN, |f| f as f32))
            .collect())
    }
}
