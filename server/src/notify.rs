//! Fire-and-forget notification dispatch.
//!
//! Called after a submission is durably recorded. Each side effect runs in
//! its own spawned task; a failure is logged and discarded, never retried,
//! and never visible to the submitter.

use std::sync::Arc;

use vivaah_common::submission::{ContactSubmission, RsvpSubmission};

use crate::AppState;

pub fn spawn_contact_notifications(state: Arc<AppState>, submission: ContactSubmission) {
    if let Some(mailer) = state.mailer.clone() {
        let submission = submission.clone();
        tokio::spawn(async move {
            if let Err(err) = mailer.send_contact_notification(&submission).await {
                tracing::warn!(%err, id = %submission.id, "contact email notification failed");
            }
        });
    }
    if let Some(sheets) = state.sheets.clone() {
        tokio::spawn(async move {
            if let Err(err) = sheets.append_contact(&submission).await {
                tracing::warn!(%err, id = %submission.id, "contact spreadsheet append failed");
            }
        });
    }
}

pub fn spawn_rsvp_notifications(state: Arc<AppState>, submission: RsvpSubmission) {
    if let Some(mailer) = state.mailer.clone() {
        let submission = submission.clone();
        tokio::spawn(async move {
            if let Err(err) = mailer.send_rsvp_notification(&submission).await {
                tracing::warn!(%err, id = %submission.id, "RSVP owner notification failed");
            }
            // Guest confirmation still goes out if the owner mail failed.
            if let Err(err) = mailer.send_rsvp_confirmation(&submission).await {
                tracing::warn!(%err, id = %submission.id, "RSVP guest confirmation failed");
            }
        });
    }
    if let Some(sheets) = state.sheets.clone() {
        tokio::spawn(async move {
            if let Err(err) = sheets.append_rsvp(&submission).await {
                tracing::warn!(%err, id = %submission.id, "RSVP spreadsheet append failed");
            }
        });
    }
}
