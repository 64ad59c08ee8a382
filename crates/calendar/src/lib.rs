//! Calendar provider integration: a provider-neutral trait plus the Google
//! Calendar v3 / OAuth 2.0 implementation used in production.

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod oauth;
pub mod provider;

pub use client::GoogleCalendarClient;
pub use config::GoogleConfig;
pub use error::CalendarError;
pub use event::{CalendarEvent, EventInput};
pub use oauth::OAuthTokens;
pub use provider::CalendarProvider;
