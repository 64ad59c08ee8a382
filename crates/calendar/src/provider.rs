use async_trait::async_trait;

use crate::error::CalendarError;
use crate::event::{CalendarEvent, EventInput};
use crate::oauth::OAuthTokens;

/// A calendar backend reachable with a per-user OAuth access token.
///
/// The API holds one `Arc<dyn CalendarProvider>`; tests substitute a fake.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Exchange an authorization code for an access/refresh token pair.
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, CalendarError>;

    /// Obtain a new access token with the refresh-token grant.
    async fn refresh_token(&self, refresh_token: &str) -> Result<OAuthTokens, CalendarError>;

    async fn create_event(
        &self,
        access_token: &str,
        input: &EventInput,
    ) -> Result<CalendarEvent, CalendarError>;

    async fn get_event(
        &self,
        access_token: &str,
        event_id: &str,
    ) -> Result<CalendarEvent, CalendarError>;

    /// Replace an event's details.
    async fn update_event(
        &self,
        access_token: &str,
        event_id: &str,
        input: &EventInput,
    ) -> Result<CalendarEvent, CalendarError>;

    async fn delete_event(&self, access_token: &str, event_id: &str) -> Result<(), CalendarError>;
}
