//! Application configuration loaded from environment variables.
//!
//! Remote storage settings are optional; without them the service keeps its
//! data in local CSV files.

use crate::services::sheets::{spreadsheet_id_from, DEFAULT_SHEETS_API_URL};
use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Directory holding the CSV tables
    pub data_dir: PathBuf,

    // --- Google Sheets (optional) ---
    /// Path to a service-account JSON key file
    pub google_credentials_path: Option<PathBuf>,
    /// Target spreadsheet; `None` creates a new one on first connect
    pub spreadsheet_id: Option<String>,
    /// Sheets API base URL (overridable for testing)
    pub sheets_api_url: String,
    /// OAuth token endpoint override
    pub google_token_url: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:8501".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            google_credentials_path: None,
            spreadsheet_id: None,
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            google_token_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8501".to_string()),
            port,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            google_credentials_path: non_empty_var("GOOGLE_SHEETS_CREDENTIALS").map(PathBuf::from),
            spreadsheet_id: non_empty_var("SPREADSHEET_ID")
                .or_else(|| non_empty_var("SPREADSHEET_URL"))
                .and_then(|v| spreadsheet_id_from(&v)),
            sheets_api_url: non_empty_var("SHEETS_API_URL")
                .unwrap_or_else(|| DEFAULT_SHEETS_API_URL.to_string()),
            google_token_url: non_empty_var("GOOGLE_TOKEN_URL"),
        })
    }

    /// True when enough is set to attempt the Google Sheets backend.
    pub fn sheets_configured(&self) -> bool {
        self.google_credentials_path.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
