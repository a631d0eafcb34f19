use thiserror::Error;

/// Failure taxonomy for every request the synchronizers issue.
///
/// All three variants surface to the UI layer the same way: a
/// human-readable string attached to the owning collection's
/// `RequestState`. None of them is retried automatically.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure with no server response.
    #[error("network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// Non-2xx response. `detail` carries the structured message from the
    /// server's `{"detail": ...}` error body when one was present.
    #[error("server rejected request with status {status}")]
    ServerRejected { status: u16, detail: Option<String> },

    /// 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Maximum length for server-supplied text kept in error values
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data around
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    /// Build a `ServerRejected` from a non-2xx status and its raw body,
    /// extracting the `detail` field when the body is a JSON object with
    /// a string-valued `detail`.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(|d| d.as_str())
                    .map(Self::truncate_body)
            });
        ApiError::ServerRejected {
            status: status.as_u16(),
            detail,
        }
    }

    /// The server's structured error message, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::ServerRejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of the rejection, when the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServerRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401 rejections, so callers can prompt for a fresh login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::ServerRejected { status: 401, .. })
    }
}
