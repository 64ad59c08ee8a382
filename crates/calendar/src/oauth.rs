//! OAuth 2.0 token handling for the calendar provider.

use chrono::Duration;
use hrm_core::types::Timestamp;
use serde::Deserialize;

/// A stored token is refreshed when it expires within this many seconds.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// Scope requested for calendar access.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

/// Tokens issued by the provider, with the relative expiry resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthTokens {
    pub access_token: String,
    /// Present on code exchange; only present on refresh when the provider
    /// rotates it.
    pub refresh_token: Option<String>,
    pub expires_at: Timestamp,
    pub scope: Option<String>,
}

/// Raw token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_tokens(self, now: Timestamp) -> OAuthTokens {
        OAuthTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: now + Duration::seconds(self.expires_in),
            scope: self.scope,
        }
    }
}

/// Whether a token expiring at `expires_at` must be refreshed before use.
pub fn needs_refresh(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at - now <= Duration::seconds(REFRESH_MARGIN_SECS)
}
