//! HTTP client for the point-source service.

use crate::decode::RECORD_BYTES;
use crate::error::{PiError, Result};
use bytes::Bytes;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Raw response from the point source plus fetch timing.
#[derive(Debug, Clone)]
pub struct FetchedPoints {
    pub bytes: Bytes,
    /// Wall-clock time from issuing the request to the fully buffered body.
    pub response_time: Duration,
}

/// Client for `GET {base_url}/points?n=<count>`.
pub struct PointClient {
    http: reqwest::Client,
    base_url: String,
}

impl PointClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| PiError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch `count` samples as a fully buffered byte body.
    ///
    /// Validates the count before any request goes out, races the request
    /// against `cancel`, and checks the response length against the
    /// `16 * count` contract. Cancellation aborts the in-flight request.
    pub async fn fetch_points(
        &self,
        count: u64,
        cancel: &CancellationToken,
    ) -> Result<FetchedPoints> {
        if count == 0 {
            return Err(PiError::InvalidInput(
                "point count must be a positive integer".to_string(),
            ));
        }
        let expected_len = count
            .checked_mul(RECORD_BYTES as u64)
            .ok_or_else(|| PiError::InvalidInput(format!("point count {} is too large", count)))?;

        let url = format!("{}/points?n={}", self.base_url, count);
        log::debug!("GET {}", url);

        let start = Instant::now();
        let bytes = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                log::info!("Point fetch cancelled");
                return Err(PiError::Cancelled);
            }

            result = self.request(&url) => result?,
        };
        let response_time = start.elapsed();

        if bytes.len() as u64 != expected_len {
            return Err(PiError::MalformedStream(format!(
                "expected {} bytes for {} points, got {}",
                expected_len,
                count,
                bytes.len()
            )));
        }

        log::debug!(
            "Fetched {} bytes in {:.1} ms",
            bytes.len(),
            response_time.as_secs_f64() * 1000.0
        );

        Ok(FetchedPoints {
            bytes,
            response_time,
        })
    }

    async fn request(&self, url: &str) -> Result<Bytes> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PiError::HttpStatus(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(|e| PiError::Transport(format!("failed reading body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 127.0.0.1:1 is reserved and nothing listens there; reaching it at all
    // would surface as Transport, so these tests prove no request is issued.
    const DEAD_URL: &str = "http://127.0.0.1:1";

    #[tokio::test]
    async fn test_zero_count_rejected_before_any_request() {
        let client = PointClient::new(DEAD_URL).unwrap();
        let result = client.fetch_points(0, &CancellationToken::new()).await;
        assert!(matches!(result, Err(PiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits_fetch() {
        let client = PointClient::new(DEAD_URL).unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let result = client.fetch_points(10, &token).await;
        assert!(matches!(result, Err(PiError::Cancelled)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = PointClient::new(DEAD_URL).unwrap();
        let result = client.fetch_points(4, &CancellationToken::new()).await;
        assert!(matches!(result, Err(PiError::Transport(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PointClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
