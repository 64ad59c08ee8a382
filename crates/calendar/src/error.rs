/// Errors raised by a [`CalendarProvider`](crate::CalendarProvider).
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider has no event with this ID (HTTP 404 or 410).
    #[error("Calendar event not found: {0}")]
    NotFound(String),

    /// The provider answered with a non-2xx status.
    #[error("Calendar API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The caller supplied an unusable event or grant.
    #[error("Invalid calendar request: {0}")]
    InvalidInput(String),

    /// The OAuth client or API URL is missing or malformed.
    #[error("Calendar integration misconfigured: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = CalendarError::Api {
            status: 403,
            message: "insufficient scope".into(),
        };
        assert_eq!(
            err.to_string(),
            "Calendar API returned HTTP 403: insufficient scope"
        );
    }

    #[test]
    fn request_error_display() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = CalendarError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
