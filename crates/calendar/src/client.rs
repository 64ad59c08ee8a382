//! Google Calendar v3 client.
//!
//! One [`GoogleCalendarClient`] is shared across requests. Calls are made
//! once; there is no retry or backoff.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Response, StatusCode, Url};

use crate::config::GoogleConfig;
use crate::error::CalendarError;
use crate::event::{CalendarEvent, EventInput, GoogleEvent, GoogleEventBody};
use crate::oauth::{OAuthTokens, TokenResponse};
use crate::provider::CalendarProvider;

/// Longest provider error body echoed back in [`CalendarError::Api`].
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for the Google OAuth token endpoint and Calendar v3 API.
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleCalendarClient {
    /// Create a client with a pre-configured HTTP connection pool.
    pub fn new(config: GoogleConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { http, config }
    }

    /// URL of the events collection, or of one event when `event_id` is set.
    fn events_url(&self, event_id: Option<&str>) -> Result<Url, CalendarError> {
        let mut url = Url::parse(&self.config.api_base_url)
            .map_err(|e| CalendarError::Config(format!("invalid API base URL: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CalendarError::Config("API base URL cannot be a base".into()))?;
            segments
                .pop_if_empty()
                .extend(["calendars", self.config.calendar_id.as_str(), "events"]);
            if let Some(id) = event_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn ensure_configured(&self) -> Result<(), CalendarError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(CalendarError::Config(
                "GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET are not set".into(),
            ))
        }
    }

    /// POST a form to the token endpoint and resolve the expiry.
    async fn token_request(&self, form: &[(&str, &str)]) -> Result<OAuthTokens, CalendarError> {
        self.ensure_configured()?;
        let response = self
            .http
            .post(&self.config.token_url)
            .form(form)
            .send()
            .await?;
        let raw: TokenResponse = check(response, None).await?.json().await?;
        Ok(raw.into_tokens(Utc::now()))
    }

    fn body(input: &EventInput) -> Result<GoogleEventBody, CalendarError> {
        input.validate()?;
        Ok(GoogleEventBody::from_input(
            input,
            uuid::Uuid::new_v4().to_string(),
        ))
    }
}

/// Map a non-2xx response to a [`CalendarError`]. 404 and 410 become
/// `NotFound` when the call targeted a specific event.
async fn check(response: Response, event_id: Option<&str>) -> Result<Response, CalendarError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let Some(id) = event_id {
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(CalendarError::NotFound(id.to_string()));
        }
    }
    let mut message = response.text().await.unwrap_or_default();
    if message.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
    }
    tracing::warn!(status = status.as_u16(), error = %message, "Calendar provider call failed");
    Err(CalendarError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl CalendarProvider for GoogleCalendarClient {
    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, CalendarError> {
        if code.trim().is_empty() {
            return Err(CalendarError::InvalidInput("code must not be empty".into()));
        }
        let tokens = self
            .token_request(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .await?;
        if tokens.refresh_token.is_none() {
            return Err(CalendarError::InvalidInput(
                "provider did not issue a refresh token; request offline access".into(),
            ));
        }
        Ok(tokens)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<OAuthTokens, CalendarError> {
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ])
        .await
    }

    async fn create_event(
        &self,
        access_token: &str,
        input: &EventInput,
    ) -> Result<CalendarEvent, CalendarError> {
        let body = Self::body(input)?;
        let response = self
            .http
            .post(self.events_url(None)?)
            .bearer_auth(access_token)
            .query(&[("conferenceDataVersion", "1")])
            .json(&body)
            .send()
            .await?;
        let event: GoogleEvent = check(response, None).await?.json().await?;
        tracing::info!(event_id = %event.id, "Calendar event created");
        Ok(event.into())
    }

    async fn get_event(
        &self,
        access_token: &str,
        event_id: &str,
    ) -> Result<CalendarEvent, CalendarError> {
        let response = self
            .http
            .get(self.events_url(Some(event_id))?)
            .bearer_auth(access_token)
            .send()
            .await?;
        let event: GoogleEvent = check(response, Some(event_id)).await?.json().await?;
        Ok(event.into())
    }

    async fn update_event(
        &self,
        access_token: &str,
        event_id: &str,
        input: &EventInput,
    ) -> Result<CalendarEvent, CalendarError> {
        let body = Self::body(input)?;
        let response = self
            .http
            .put(self.events_url(Some(event_id))?)
            .bearer_auth(access_token)
            .query(&[("conferenceDataVersion", "1")])
            .json(&body)
            .send()
            .await?;
        let event: GoogleEvent = check(response, Some(event_id)).await?.json().await?;
        tracing::info!(event_id, "Calendar event updated");
        Ok(event.into())
    }

    async fn delete_event(&self, access_token: &str, event_id: &str) -> Result<(), CalendarError> {
        let response = self
            .http
            .delete(self.events_url(Some(event_id))?)
            .bearer_auth(access_token)
            .send()
            .await?;
        check(response, Some(event_id)).await?;
        tracing::info!(event_id, "Calendar event deleted");
        Ok(())
    }
}
