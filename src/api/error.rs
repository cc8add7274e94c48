use thiserror::Error;

/// Transport and endpoint failures, normalized into the categories the UI
/// distinguishes. Each variant's message is the user-facing guidance text.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(
        "Endpoint not found (404): the web-app deployment is missing or its URL has changed. \
         Redeploy the script and update the endpoint URL in the app configuration."
    )]
    EndpointNotFound,

    #[error(
        "Network error: could not reach the server. Check the connection, and that the \
         web-app deployment allows anonymous access."
    )]
    Network(#[source] reqwest::Error),

    #[error("Malformed server response: {0}")]
    MalformedResponse(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("API endpoint URL not configured")]
    EndpointNotConfigured,

    #[error("Sheet URL not configured for: {0}")]
    SheetNotConfigured(String),
}

/// Maximum length for response bodies quoted in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid dragging whole pages into messages
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let end = (0..=MAX_ERROR_BODY_LENGTH)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => ApiError::EndpointNotFound,
            500..=599 => ApiError::Server(truncated),
            _ => ApiError::MalformedResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}
