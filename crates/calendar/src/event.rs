//! Calendar event types and their mapping to the Calendar v3 wire format.
//!
//! [`EventInput`] and [`CalendarEvent`] are what the rest of the backend
//! sees. The `Google*` structs mirror the provider's camelCase JSON and stay
//! private to this crate.

use hrm_core::types::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Maximum length of an event summary.
pub const MAX_SUMMARY_LEN: usize = 1024;

/// Event details supplied by a caller when creating or replacing an event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventInput {
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Attendee email addresses.
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Ask the provider to attach a video conference link.
    #[serde(default)]
    pub with_meet_link: bool,
}

impl EventInput {
    /// Reject inputs the provider would refuse anyway.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.summary.trim().is_empty() {
            return Err(CalendarError::InvalidInput("summary must not be empty".into()));
        }
        if self.summary.len() > MAX_SUMMARY_LEN {
            return Err(CalendarError::InvalidInput(format!(
                "summary must be at most {MAX_SUMMARY_LEN} characters"
            )));
        }
        if self.end_time <= self.start_time {
            return Err(CalendarError::InvalidInput(
                "end_time must be after start_time".into(),
            ));
        }
        Ok(())
    }
}

/// An event as stored by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub status: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub attendees: Vec<String>,
    pub html_link: Option<String>,
    /// Video conference link, when one was requested.
    pub meet_link: Option<String>,
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct GoogleAttendee {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleConferenceSolutionKey {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleCreateConferenceRequest {
    pub request_id: String,
    pub conference_solution_key: GoogleConferenceSolutionKey,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleConferenceData {
    pub create_request: GoogleCreateConferenceRequest,
}

/// Request body for insert/update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleEventBody {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: GoogleDateTime,
    pub end: GoogleDateTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<GoogleAttendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_data: Option<GoogleConferenceData>,
}

/// Response body for insert/get/update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GoogleEvent {
    pub id: String,
    pub status: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<GoogleDateTime>,
    pub end: Option<GoogleDateTime>,
    #[serde(default)]
    pub attendees: Vec<GoogleAttendee>,
    pub html_link: Option<String>,
    pub hangout_link: Option<String>,
}

fn utc(at: Timestamp) -> GoogleDateTime {
    GoogleDateTime {
        date_time: Some(at),
        time_zone: Some("UTC".to_string()),
    }
}

impl GoogleEventBody {
    /// Build the wire body. `conference_request_id` is only used when the
    /// input asks for a meet link.
    pub(crate) fn from_input(input: &EventInput, conference_request_id: String) -> Self {
        let conference_data = input.with_meet_link.then(|| GoogleConferenceData {
            create_request: GoogleCreateConferenceRequest {
                request_id: conference_request_id,
                conference_solution_key: GoogleConferenceSolutionKey {
                    kind: "hangoutsMeet",
                },
            },
        });

        Self {
            summary: input.summary.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            start: utc(input.start_time),
            end: utc(input.end_time),
            attendees: input
                .attendees
                .iter()
                .map(|email| GoogleAttendee {
                    email: email.clone(),
                })
                .collect(),
            conference_data,
        }
    }
}

impl From<GoogleEvent> for CalendarEvent {
    fn from(event: GoogleEvent) -> Self {
        Self {
            id: event.id,
            status: event.status,
            summary: event.summary,
            description: event.description,
            location: event.location,
            start_time: event.start.and_then(|s| s.date_time),
            end_time: event.end.and_then(|e| e.date_time),
            attendees: event.attendees.into_iter().map(|a| a.email).collect(),
            html_link: event.html_link,
            meet_link: event.hangout_link,
        }
    }
}
