use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field carried an attendance/accommodation/event value outside the
/// allowed set. Surfaced to the client as a validation error.
#[derive(Debug, Error)]
#[error("unknown {field} value '{value}'")]
pub struct UnknownValueError {
    pub field: &'static str,
    pub value: String,
}

/// Whether a guest plans to attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Yes,
    No,
    Maybe,
}

impl Attendance {
    pub fn parse(value: &str) -> Result<Self, UnknownValueError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Attendance::Yes),
            "no" => Ok(Attendance::No),
            "maybe" => Ok(Attendance::Maybe),
            _ => Err(UnknownValueError {
                field: "attendance",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Attendance::Yes => "yes",
            Attendance::No => "no",
            Attendance::Maybe => "maybe",
        }
    }
}

/// Whether the guest asked for help with accommodation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accommodation {
    Yes,
    #[default]
    No,
    Unsure,
}

impl Accommodation {
    pub fn parse(value: &str) -> Result<Self, UnknownValueError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Accommodation::Yes),
            "no" => Ok(Accommodation::No),
            "unsure" => Ok(Accommodation::Unsure),
            _ => Err(UnknownValueError {
                field: "accommodation",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Accommodation::Yes => "yes",
            Accommodation::No => "no",
            Accommodation::Unsure => "unsure",
        }
    }
}

/// The three ceremonies a guest can RSVP for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeddingEvent {
    Haldi,
    Mehandi,
    Wedding,
}

impl WeddingEvent {
    pub fn parse(value: &str) -> Result<Self, UnknownValueError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "haldi" => Ok(WeddingEvent::Haldi),
            "mehandi" => Ok(WeddingEvent::Mehandi),
            "wedding" => Ok(WeddingEvent::Wedding),
            _ => Err(UnknownValueError {
                field: "events",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeddingEvent::Haldi => "haldi",
            WeddingEvent::Mehandi => "mehandi",
            WeddingEvent::Wedding => "wedding",
        }
    }
}

/// Join events into a display string ("haldi, wedding"), or a placeholder
/// when none were picked.
pub fn events_display(events: &[WeddingEvent]) -> String {
    if events.is_empty() {
        return "None selected".to_string();
    }
    events
        .iter()
        .map(|e| e.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One persisted contact-form record. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl ContactSubmission {
    /// Normalize raw form fields into a record. Presence of required fields
    /// is the caller's job; this only trims and lower-cases.
    pub fn create(
        name: &str,
        email: &str,
        phone: &str,
        message: &str,
        ip: Option<String>,
    ) -> Self {
        let now = Utc::now();
        ContactSubmission {
            id: submission_id(now),
            timestamp: now,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            message: message.trim().to_string(),
            ip,
        }
    }
}

/// One persisted RSVP record. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub attendance: Attendance,
    pub guest_count: String,
    pub events: Vec<WeddingEvent>,
    pub dietary_restrictions: String,
    pub accommodation: Accommodation,
    pub special_requests: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl RsvpSubmission {
    /// Normalize raw form fields into a record, filling defaults for the
    /// optional ones (guest count "1", accommodation "no", empty strings).
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        name: &str,
        email: &str,
        phone: &str,
        attendance: Attendance,
        guest_count: Option<&str>,
        events: Vec<WeddingEvent>,
        dietary_restrictions: Option<&str>,
        accommodation: Option<Accommodation>,
        special_requests: Option<&str>,
        ip: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let guest_count = match guest_count.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => "1".to_string(),
        };
        RsvpSubmission {
            id: submission_id(now),
            timestamp: now,
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: phone.trim().to_string(),
            attendance,
            guest_count,
            events,
            dietary_restrictions: dietary_restrictions.unwrap_or("").trim().to_string(),
            accommodation: accommodation.unwrap_or_default(),
            special_requests: special_requests.unwrap_or("").trim().to_string(),
            ip,
        }
    }

    /// Guest count as a number; malformed counts fall back to 1.
    pub fn guest_count_value(&self) -> u32 {
        self.guest_count.parse().unwrap_or(1)
    }
}

/// Identifier derived from submission time, as milliseconds since epoch.
/// Collisions within the same millisecond are possible and not guarded
/// against.
fn submission_id(at: DateTime<Utc>) -> String {
    at.timestamp_millis().to_string()
}
