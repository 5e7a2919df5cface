//! Environment-driven configuration, read once at process start.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATA_DIR: &str = "form-submissions";
pub const DEFAULT_STATIC_DIR: &str = "dist";

/// SMTP settings for outgoing notification mail.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address on outgoing mail.
    pub from: String,
    /// Owner address that receives submission notifications.
    pub notify_to: String,
}

/// Google Sheets mirror settings. The token is a pre-issued OAuth2 bearer
/// token with spreadsheet scope; minting it is outside this process.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub smtp: Option<SmtpConfig>,
    pub sheets: Option<SheetsConfig>,
}

impl ServerConfig {
    /// Read configuration from the environment. Email requires
    /// `EMAIL_USER` + `EMAIL_PASS`; the spreadsheet mirror requires
    /// `GOOGLE_SHEETS_SPREADSHEET_ID` + `GOOGLE_SHEETS_ACCESS_TOKEN`.
    /// Either block may be absent and the server still runs.
    pub fn from_env() -> Self {
        let smtp = match (env_var("EMAIL_USER"), env_var("EMAIL_PASS")) {
            (Some(username), Some(password)) => Some(SmtpConfig {
                host: env_var("EMAIL_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
                port: env_var("EMAIL_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                from: env_var("EMAIL_FROM").unwrap_or_else(|| username.clone()),
                notify_to: env_var("NOTIFICATION_EMAIL").unwrap_or_else(|| username.clone()),
                username,
                password,
            }),
            _ => None,
        };

        let sheets = match (
            env_var("GOOGLE_SHEETS_SPREADSHEET_ID"),
            env_var("GOOGLE_SHEETS_ACCESS_TOKEN"),
        ) {
            (Some(spreadsheet_id), Some(access_token)) => Some(SheetsConfig {
                spreadsheet_id,
                access_token,
            }),
            _ => None,
        };

        ServerConfig {
            port: env_var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            data_dir: env_var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            static_dir: env_var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            smtp,
            sheets,
        }
    }
}

/// Non-empty environment variable, trimmed.
fn env_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}
