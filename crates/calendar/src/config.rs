/// Default OAuth 2.0 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default Calendar v3 API root.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Google OAuth client and calendar settings loaded from environment variables.
///
/// The client credentials default to empty, which leaves the server
/// runnable without calendar support; every provider call then fails with
/// [`CalendarError::Config`](crate::CalendarError::Config).
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Calendar that events are written to (default: `primary`).
    pub calendar_id: String,
    pub token_url: String,
    pub api_base_url: String,
    /// Per-request timeout for provider calls, in seconds (default: `10`).
    pub request_timeout_secs: u64,
}

impl GoogleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                                   |
    /// |-----------------------------|-------------------------------------------|
    /// | `GOOGLE_CLIENT_ID`          | (empty)                                   |
    /// | `GOOGLE_CLIENT_SECRET`      | (empty)                                   |
    /// | `GOOGLE_REDIRECT_URI`       | `http://localhost:3000/oauth/callback`    |
    /// | `GOOGLE_CALENDAR_ID`        | `primary`                                 |
    /// | `GOOGLE_TOKEN_URL`          | `https://oauth2.googleapis.com/token`     |
    /// | `GOOGLE_CALENDAR_API_URL`   | `https://www.googleapis.com/calendar/v3`  |
    /// | `GOOGLE_TIMEOUT_SECS`       | `10`                                      |
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };

        let request_timeout_secs: u64 = var("GOOGLE_TIMEOUT_SECS", "10")
            .parse()
            .expect("GOOGLE_TIMEOUT_SECS must be a valid u64");

        Self {
            client_id: var("GOOGLE_CLIENT_ID", ""),
            client_secret: var("GOOGLE_CLIENT_SECRET", ""),
            redirect_uri: var("GOOGLE_REDIRECT_URI", "http://localhost:3000/oauth/callback"),
            calendar_id: var("GOOGLE_CALENDAR_ID", "primary"),
            token_url: var("GOOGLE_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_base_url: var("GOOGLE_CALENDAR_API_URL", DEFAULT_API_BASE_URL),
            request_timeout_secs,
        }
    }

    /// Whether OAuth client credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}
