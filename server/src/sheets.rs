//! Google Sheets mirror.
//!
//! Talks to the Sheets v4 REST API with a pre-issued OAuth2 bearer token.
//! Tabs and header rows are provisioned lazily; every submission appends
//! one row, and data rows get alternating background color by parity.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

use vivaah_common::submission::{events_display, ContactSubmission, RsvpSubmission};

use crate::config::SheetsConfig;

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub const RSVP_SHEET: &str = "RSVP";
pub const CONTACT_SHEET: &str = "Contact";

pub const RSVP_HEADERS: [&str; 11] = [
    "Timestamp",
    "Name",
    "Email",
    "Phone",
    "Attendance",
    "Guest Count",
    "Events Attending",
    "Dietary Restrictions",
    "Accommodation Help",
    "Special Requests",
    "Submission ID",
];

pub const CONTACT_HEADERS: [&str; 6] =
    ["Timestamp", "Name", "Email", "Phone", "Message", "Submission ID"];

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Sheets request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Sheets API returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("unexpected Sheets API response: {0}")]
    Malformed(&'static str),
}

pub struct SheetsClient {
    http: Client,
    spreadsheet_id: String,
    token: String,
}

impl SheetsClient {
    pub fn from_config(config: &SheetsConfig) -> Self {
        SheetsClient {
            http: Client::new(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            token: config.access_token.clone(),
        }
    }

    /// Provision the RSVP tab and its header row. Run once at startup,
    /// best-effort; appends re-check lazily anyway.
    pub async fn initialize(&self) -> Result<(), SheetsError> {
        self.ensure_sheet(RSVP_SHEET, &RSVP_HEADERS).await?;
        Ok(())
    }

    pub async fn append_rsvp(&self, submission: &RsvpSubmission) -> Result<(), SheetsError> {
        let sheet_id = self.ensure_sheet(RSVP_SHEET, &RSVP_HEADERS).await?;
        self.append_row(RSVP_SHEET, RSVP_HEADERS.len(), rsvp_row(submission))
            .await?;
        let rows = self.row_count(RSVP_SHEET).await?;
        if rows > 1 {
            self.apply_row_banding(sheet_id, rows, RSVP_HEADERS.len())
                .await?;
        }
        Ok(())
    }

    pub async fn append_contact(&self, submission: &ContactSubmission) -> Result<(), SheetsError> {
        let sheet_id = self.ensure_sheet(CONTACT_SHEET, &CONTACT_HEADERS).await?;
        self.append_row(CONTACT_SHEET, CONTACT_HEADERS.len(), contact_row(submission))
            .await?;
        let rows = self.row_count(CONTACT_SHEET).await?;
        if rows > 1 {
            self.apply_row_banding(sheet_id, rows, CONTACT_HEADERS.len())
                .await?;
        }
        Ok(())
    }

    // ─── Provisioning ────────────────────────────────────────────────────────

    /// Make sure the named tab exists with its header row; returns the
    /// numeric sheet id needed by formatting requests.
    async fn ensure_sheet(&self, title: &str, headers: &[&str]) -> Result<i64, SheetsError> {
        let meta = self.get_metadata().await?;
        let existing = meta["sheets"]
            .as_array()
            .and_then(|sheets| {
                sheets
                    .iter()
                    .find(|sheet| sheet["properties"]["title"] == title)
            })
            .and_then(|sheet| sheet["properties"]["sheetId"].as_i64());

        let sheet_id = match existing {
            Some(id) => id,
            None => {
                let id = self.add_sheet(title).await?;
                tracing::info!(sheet = title, "created spreadsheet tab");
                id
            }
        };

        if !self.has_header_row(title, headers.len()).await? {
            self.write_headers(title, sheet_id, headers).await?;
            tracing::info!(sheet = title, "wrote spreadsheet headers");
        }

        Ok(sheet_id)
    }

    async fn get_metadata(&self) -> Result<Value, SheetsError> {
        let resp = self
            .http
            .get(format!("{API_BASE}/{}", self.spreadsheet_id))
            .bearer_auth(&self.token)
            .send()
            .await?;
        check(resp).await
    }

    async fn add_sheet(&self, title: &str) -> Result<i64, SheetsError> {
        let reply = self
            .batch_update(json!({
                "requests": [{ "addSheet": { "properties": { "title": title } } }]
            }))
            .await?;
        reply["replies"][0]["addSheet"]["properties"]["sheetId"]
            .as_i64()
            .ok_or(SheetsError::Malformed("addSheet reply missing sheetId"))
    }

    async fn has_header_row(&self, title: &str, width: usize) -> Result<bool, SheetsError> {
        let range = format!("{title}!A1:{}1", column_letter(width));
        let resp = self
            .http
            .get(format!(
                "{API_BASE}/{}/values/{range}",
                self.spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let body = check(resp).await?;
        Ok(body["values"]
            .as_array()
            .is_some_and(|values| !values.is_empty()))
    }

    async fn write_headers(
        &self,
        title: &str,
        sheet_id: i64,
        headers: &[&str],
    ) -> Result<(), SheetsError> {
        let range = format!("{title}!A1:{}1", column_letter(headers.len()));
        let resp = self
            .http
            .put(format!(
                "{API_BASE}/{}/values/{range}?valueInputOption=RAW",
                self.spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .json(&json!({ "values": [headers] }))
            .send()
            .await?;
        check(resp).await?;

        // Bold white-on-blue header band.
        self.batch_update(json!({
            "requests": [{
                "repeatCell": {
                    "range": {
                        "sheetId": sheet_id,
                        "startRowIndex": 0,
                        "endRowIndex": 1,
                        "startColumnIndex": 0,
                        "endColumnIndex": headers.len(),
                    },
                    "cell": {
                        "userEnteredFormat": {
                            "backgroundColor": { "red": 0.2, "green": 0.6, "blue": 1.0 },
                            "textFormat": {
                                "foregroundColor": { "red": 1.0, "green": 1.0, "blue": 1.0 },
                                "bold": true,
                            },
                        },
                    },
                    "fields": "userEnteredFormat(backgroundColor,textFormat)",
                }
            }]
        }))
        .await?;
        Ok(())
    }

    // ─── Rows ────────────────────────────────────────────────────────────────

    async fn append_row(
        &self,
        title: &str,
        width: usize,
        row: Vec<String>,
    ) -> Result<(), SheetsError> {
        let range = format!("{title}!A:{}", column_letter(width));
        let resp = self
            .http
            .post(format!(
                "{API_BASE}/{}/values/{range}:append?valueInputOption=RAW",
                self.spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    async fn row_count(&self, title: &str) -> Result<usize, SheetsError> {
        let resp = self
            .http
            .get(format!(
                "{API_BASE}/{}/values/{title}!A:A",
                self.spreadsheet_id
            ))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let body = check(resp).await?;
        Ok(body["values"].as_array().map_or(1, |values| values.len()))
    }

    /// Alternating background by row parity, applied to the row just added.
    async fn apply_row_banding(
        &self,
        sheet_id: i64,
        row: usize,
        width: usize,
    ) -> Result<(), SheetsError> {
        let color = if row % 2 == 0 {
            json!({ "red": 0.95, "green": 0.95, "blue": 0.95 })
        } else {
            json!({ "red": 1.0, "green": 1.0, "blue": 1.0 })
        };
        self.batch_update(json!({
            "requests": [{
                "repeatCell": {
                    "range": {
                        "sheetId": sheet_id,
                        "startRowIndex": row - 1,
                        "endRowIndex": row,
                        "startColumnIndex": 0,
                        "endColumnIndex": width,
                    },
                    "cell": { "userEnteredFormat": { "backgroundColor": color } },
                    "fields": "userEnteredFormat(backgroundColor)",
                }
            }]
        }))
        .await?;
        Ok(())
    }

    async fn batch_update(&self, body: Value) -> Result<Value, SheetsError> {
        let resp = self
            .http
            .post(format!("{API_BASE}/{}:batchUpdate", self.spreadsheet_id))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check(resp).await
    }
}

async fn check(resp: reqwest::Response) -> Result<Value, SheetsError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SheetsError::Api { status, body });
    }
    Ok(resp.json().await?)
}

/// Column letter for a 1-based column index; both layouts fit in A-Z.
fn column_letter(column: usize) -> char {
    debug_assert!((1..=26).contains(&column));
    (b'A' + column as u8 - 1) as char
}

/// Map an RSVP onto the fixed RSVP tab columns (A:K).
pub fn rsvp_row(s: &RsvpSubmission) -> Vec<String> {
    vec![
        s.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        s.name.clone(),
        s.email.clone(),
        s.phone.clone(),
        s.attendance.as_str().to_uppercase(),
        s.guest_count.clone(),
        events_display(&s.events),
        if s.dietary_restrictions.is_empty() {
            "None".to_string()
        } else {
            s.dietary_restrictions.clone()
        },
        s.accommodation.as_str().to_string(),
        if s.special_requests.is_empty() {
            "None".to_string()
        } else {
            s.special_requests.clone()
        },
        s.id.clone(),
    ]
}

/// Map a contact message onto the fixed Contact tab columns (A:F).
pub fn contact_row(s: &ContactSubmission) -> Vec<String> {
    vec![
        s.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        s.name.clone(),
        s.email.clone(),
        s.phone.clone(),
        s.message.clone(),
        s.id.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use vivaah_common::submission::{Accommodation, Attendance, WeddingEvent};

    #[test]
    fn test_rsvp_row_layout() {
        let s = RsvpSubmission::create(
            "Asha",
            "asha@example.com",
            "555-0100",
            Attendance::Yes,
            Some("2"),
            vec![WeddingEvent::Haldi, WeddingEvent::Wedding],
            None,
            Some(Accommodation::Unsure),
            None,
            None,
        );
        let row = rsvp_row(&s);
        assert_eq!(row.len(), RSVP_HEADERS.len());
        assert_eq!(row[1], "Asha");
        assert_eq!(row[4], "YES");
        assert_eq!(row[5], "2");
        assert_eq!(row[6], "haldi, wedding");
        assert_eq!(row[7], "None");
        assert_eq!(row[8], "unsure");
        assert_eq!(row[10], s.id);
    }

    #[test]
    fn test_contact_row_layout() {
        let s = ContactSubmission::create("Asha", "asha@example.com", "555-0100", "hello", None);
        let row = contact_row(&s);
        assert_eq!(row.len(), CONTACT_HEADERS.len());
        assert_eq!(row[4], "hello");
        assert_eq!(row[5], s.id);
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(1), 'A');
        assert_eq!(column_letter(6), 'F');
        assert_eq!(column_letter(11), 'K');
    }
}
