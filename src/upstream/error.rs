//! Classification of failed upstream calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Why an upstream call did not yield a JSON body.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// No response within the configured timeout.
    #[error("upstream timed out after {0} ms")]
    Timeout(u64),

    /// Connection could not be established.
    #[error("upstream connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// Body was not valid JSON.
    #[error("upstream body is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    /// Any other transport failure.
    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Status reported by the upstream, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status(status) => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Connect(_) => "connect",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::Request(_) => "request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        assert!(UpstreamError::Status(StatusCode::NOT_FOUND).is_not_found());
        assert!(!UpstreamError::Status(StatusCode::BAD_GATEWAY).is_not_found());
        assert!(!UpstreamError::Timeout(100).is_not_found());
        assert_eq!(UpstreamError::Timeout(100).status(), None);
    }

    #[test]
    fn test_display_includes_detail() {
        assert_eq!(
            UpstreamError::Status(StatusCode::SERVICE_UNAVAILABLE).to_string(),
            "upstream returned status 503 Service Unavailable"
        );
        assert_eq!(
            UpstreamError::Timeout(250).to_string(),
            "upstream timed out after 250 ms"
        );
    }
}
