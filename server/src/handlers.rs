//! API request handlers.
//!
//! Validation checks presence only (fields non-empty after trimming);
//! format checking is the client's job, except emails are lower-cased.
//! Persistence failures are the only server errors a submitter can see;
//! everything after the store write is fire-and-forget.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vivaah_common::stats::RsvpStats;
use vivaah_common::submission::{
    Accommodation, Attendance, ContactSubmission, RsvpSubmission, WeddingEvent,
};

use crate::{notify, AppState};

// ─── API types ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    attendance: String,
    #[serde(default)]
    guest_count: Option<String>,
    #[serde(default)]
    events: Vec<String>,
    #[serde(default)]
    dietary_restrictions: Option<String>,
    #[serde(default)]
    accommodation: Option<String>,
    #[serde(default)]
    special_requests: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SubmissionsResponse {
    pub submissions: Vec<ContactSubmission>,
}

#[derive(Serialize)]
pub struct RsvpsResponse {
    pub rsvps: Vec<RsvpSubmission>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since process start.
    pub uptime: f64,
    pub email_configured: bool,
    pub google_sheets_configured: bool,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Internal server error".to_string(),
        }),
    )
}

// ─── Form submission ─────────────────────────────────────────────────────────

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(form): Json<ContactForm>,
) -> Result<Json<SubmitResponse>, ApiError> {
    if form.name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.phone.trim().is_empty()
        || form.message.trim().is_empty()
    {
        return Err(bad_request("All fields are required"));
    }

    let submission = ContactSubmission::create(
        &form.name,
        &form.email,
        &form.phone,
        &form.message,
        Some(addr.ip().to_string()),
    );

    state.store.record_contact(&submission).await.map_err(|err| {
        tracing::error!(%err, "failed to persist contact submission");
        internal_error()
    })?;

    tracing::info!(
        name = %submission.name,
        email = %submission.email,
        "new contact form submission"
    );

    let id = submission.id.clone();
    notify::spawn_contact_notifications(state, submission);

    Ok(Json(SubmitResponse {
        success: true,
        message: "Form submitted successfully".to_string(),
        id,
    }))
}

pub async fn submit_rsvp(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(form): Json<RsvpForm>,
) -> Result<Json<SubmitResponse>, ApiError> {
    if form.name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.phone.trim().is_empty()
        || form.attendance.trim().is_empty()
    {
        return Err(bad_request(
            "Name, email, phone, and attendance are required",
        ));
    }

    let attendance =
        Attendance::parse(&form.attendance).map_err(|err| bad_request(err.to_string()))?;

    let accommodation = match form.accommodation.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => {
            Some(Accommodation::parse(value).map_err(|err| bad_request(err.to_string()))?)
        }
        _ => None,
    };

    let mut events = Vec::with_capacity(form.events.len());
    for event in &form.events {
        events.push(WeddingEvent::parse(event).map_err(|err| bad_request(err.to_string()))?);
    }

    let submission = RsvpSubmission::create(
        &form.name,
        &form.email,
        &form.phone,
        attendance,
        form.guest_count.as_deref(),
        events,
        form.dietary_restrictions.as_deref(),
        accommodation,
        form.special_requests.as_deref(),
        Some(addr.ip().to_string()),
    );

    state.store.record_rsvp(&submission).await.map_err(|err| {
        tracing::error!(%err, "failed to persist RSVP submission");
        internal_error()
    })?;

    tracing::info!(
        name = %submission.name,
        email = %submission.email,
        attendance = submission.attendance.as_str(),
        guest_count = %submission.guest_count,
        "new RSVP submission"
    );

    let id = submission.id.clone();
    notify::spawn_rsvp_notifications(state, submission);

    Ok(Json(SubmitResponse {
        success: true,
        message: "RSVP submitted successfully".to_string(),
        id,
    }))
}

// ─── Listings & stats ────────────────────────────────────────────────────────

pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SubmissionsResponse>, ApiError> {
    let submissions = state.store.load_contacts().await.map_err(|err| {
        tracing::error!(%err, "failed to read submissions");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to read submissions".to_string(),
            }),
        )
    })?;
    Ok(Json(SubmissionsResponse { submissions }))
}

pub async fn list_rsvps(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RsvpsResponse>, ApiError> {
    let rsvps = state.store.load_rsvps().await.map_err(|err| {
        tracing::error!(%err, "failed to read RSVPs");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to read RSVPs".to_string(),
            }),
        )
    })?;
    Ok(Json(RsvpsResponse { rsvps }))
}

pub async fn rsvp_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RsvpStats>, ApiError> {
    let rsvps = state.store.load_rsvps().await.map_err(|err| {
        tracing::error!(%err, "failed to read RSVPs for stats");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to get RSVP stats".to_string(),
            }),
        )
    })?;
    Ok(Json(RsvpStats::from_submissions(&rsvps)))
}

// ─── Health ──────────────────────────────────────────────────────────────────

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        uptime: state.started.elapsed().as_secs_f64(),
        email_configured: state.mailer.is_some(),
        google_sheets_configured: state.sheets.is_some(),
    })
}
