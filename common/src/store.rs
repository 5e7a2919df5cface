//! Flat-file submission store.
//!
//! Each submission is written to its own pretty-printed JSON file, then
//! appended to a combined JSON-array log (one log per form type) with a
//! read-modify-write cycle. Nothing locks the log: near-simultaneous writes
//! can lose an entry, which is accepted at this system's scale.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;

use crate::submission::{ContactSubmission, RsvpSubmission};

/// Combined log of all contact submissions.
pub const CONTACT_LOG: &str = "all-submissions.json";
/// Combined log of all RSVP submissions.
pub const RSVP_LOG: &str = "all-rsvps.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("submission store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("submission store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SubmissionStore {
    dir: PathBuf,
}

impl SubmissionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SubmissionStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the data directory if it is missing.
    pub async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Persist a contact submission: own file, then the combined log.
    pub async fn record_contact(&self, submission: &ContactSubmission) -> Result<(), StoreError> {
        self.write_own_file(&format!("contact-{}.json", submission.id), submission)
            .await?;
        self.append_to_log(CONTACT_LOG, submission).await
    }

    /// Persist an RSVP submission: own file, then the combined log.
    pub async fn record_rsvp(&self, submission: &RsvpSubmission) -> Result<(), StoreError> {
        self.write_own_file(&format!("rsvp-{}.json", submission.id), submission)
            .await?;
        self.append_to_log(RSVP_LOG, submission).await
    }

    /// All contact submissions, oldest first. Missing log reads as empty.
    pub async fn load_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        self.read_log(CONTACT_LOG).await
    }

    /// All RSVP submissions, oldest first. Missing log reads as empty.
    pub async fn load_rsvps(&self) -> Result<Vec<RsvpSubmission>, StoreError> {
        self.read_log(RSVP_LOG).await
    }

    async fn write_own_file<T: Serialize>(&self, name: &str, record: &T) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(record)?;
        fs::write(self.dir.join(name), data).await?;
        Ok(())
    }

    async fn read_log<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, StoreError> {
        match fs::read_to_string(self.dir.join(name)).await {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Read the whole log array, append one record, rewrite the file.
    async fn append_to_log<T: Serialize>(&self, name: &str, record: &T) -> Result<(), StoreError> {
        let mut all: Vec<serde_json::Value> = self.read_log(name).await?;
        all.push(serde_json::to_value(record)?);
        let data = serde_json::to_string_pretty(&all)?;
        fs::write(self.dir.join(name), data).await?;
        Ok(())
    }
}
