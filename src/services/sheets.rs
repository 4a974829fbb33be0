// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google Sheets v4 REST client authenticated as a service account.
//!
//! Handles:
//! - Service-account JWT assertion and access-token exchange
//! - In-memory access-token caching
//! - Spreadsheet metadata, worksheet creation, and value ranges

use crate::error::StoreError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;

pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
/// Refresh this long before the token actually expires.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Fields of a service-account key file that we use.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Auth(format!("Failed to read credentials {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&json)
            .map_err(|e| StoreError::Auth(format!("Invalid service account key: {}", e)))
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Spreadsheet metadata (`GET spreadsheets/{id}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub spreadsheet_id: String,
    #[serde(default)]
    pub spreadsheet_url: String,
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

impl Spreadsheet {
    pub fn has_sheet(&self, title: &str) -> bool {
        self.sheets.iter().any(|s| s.properties.title == title)
    }
}

/// Low-level Sheets API client bound to one spreadsheet.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    key: ServiceAccountKey,
    spreadsheet_id: String,
    token: Mutex<Option<CachedToken>>,
}

impl SheetsClient {
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet_id: impl Into<String>,
        base_url: impl Into<String>,
        token_url: Option<String>,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("Failed building HTTP client: {}", e)))?;

        // Explicit override, then the key file's own endpoint, then Google's.
        let token_url = token_url
            .or_else(|| key.token_uri.clone())
            .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_url,
            key,
            spreadsheet_id: spreadsheet_id.into(),
            token: Mutex::new(None),
        })
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Re-target the client after creating a spreadsheet.
    pub fn set_spreadsheet_id(&mut self, id: impl Into<String>) {
        self.spreadsheet_id = id.into();
    }

    // ─── Auth ─────────────────────────────────────────────────────

    /// Get a valid access token, exchanging a fresh assertion when needed.
    async fn access_token(&self) -> Result<String, StoreError> {
        let now = Utc::now();
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);

        // Holding the lock across the exchange keeps concurrent callers from
        // minting duplicate tokens.
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if now + margin < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_url,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("Invalid private key: {}", e)))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| StoreError::Auth(format!("Failed to sign assertion: {}", e)))?;

        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!("HTTP {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Auth(format!("Token parse error: {}", e)))?;

        tracing::debug!(expires_in = token.expires_in, "Obtained Sheets access token");
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: now + Duration::seconds(token.expires_in),
        });
        Ok(token.access_token)
    }

    // ─── Spreadsheets ─────────────────────────────────────────────

    pub async fn get_spreadsheet(&self) -> Result<Spreadsheet, StoreError> {
        let url = format!(
            "{}/spreadsheets/{}?fields=spreadsheetId,spreadsheetUrl,properties.title,sheets.properties",
            self.base_url, self.spreadsheet_id
        );
        let token = self.access_token().await?;
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        check_response_json(response).await
    }

    /// Create a new spreadsheet owned by the service account.
    pub async fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet, StoreError> {
        let url = format!("{}/spreadsheets", self.base_url);
        let body = serde_json::json!({ "properties": { "title": title } });
        self.post_json(&url, &body).await
    }

    /// Add a worksheet with the given title.
    pub async fn add_sheet(&self, title: &str) -> Result<(), StoreError> {
        let url = format!(
            "{}/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let body = serde_json::json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        let _: serde_json::Value = self.post_json(&url, &body).await?;
        tracing::info!(sheet = title, "Created worksheet");
        Ok(())
    }

    // ─── Values ───────────────────────────────────────────────────

    /// Read a range as text cells. Trailing empty cells/rows are omitted by the API.
    pub async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        );
        let token = self.access_token().await?;
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let range: ValueRange = check_response_json(response).await?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    /// Overwrite cells starting at the top-left of `range`.
    pub async fn update_values(&self, range: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}?valueInputOption=RAW",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        );
        let body = serde_json::json!({ "range": range, "values": rows });
        let token = self.access_token().await?;
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        check_response(response).await
    }

    /// Append rows after the last row of the table in `range`.
    pub async fn append_values(&self, range: &str, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        );
        let body = serde_json::json!({ "values": rows });
        let _: serde_json::Value = self.post_json(&url, &body).await?;
        Ok(())
    }

    pub async fn clear_values(&self, range: &str) -> Result<(), StoreError> {
        let url = format!(
            "{}/spreadsheets/{}/values/{}:clear",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range)
        );
        let _: serde_json::Value = self.post_json(&url, &serde_json::json!({})).await?;
        Ok(())
    }

    /// Generic POST with JSON body and response.
    async fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, StoreError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        check_response_json(response).await
    }
}

/// Render a JSON cell as text (formatted values are already strings).
fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Check response status and return error if not successful.
async fn check_response(response: reqwest::Response) -> Result<(), StoreError> {
    if response.status().is_success() {
        return Ok(());
    }
    Err(error_from_response(response).await)
}

/// Check response and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, StoreError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| StoreError::Remote(format!("JSON parse error: {}", e)))
}

async fn error_from_response(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => StoreError::Auth(format!("HTTP {}: {}", status, body)),
        429 => {
            tracing::warn!("Sheets API rate limit hit (429)");
            StoreError::Unavailable(format!("HTTP {}: rate limited", status))
        }
        _ => StoreError::Remote(format!("HTTP {}: {}", status, body)),
    }
}

/// Extract the spreadsheet id from either a bare id or a full document URL.
pub fn spreadsheet_id_from(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.split_once("/spreadsheets/d/") {
        Some((_, rest)) => rest
            .split(['/', '?', '#'])
            .next()
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        None => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spreadsheet_id_from_url() {
        assert_eq!(
            spreadsheet_id_from("https://docs.google.com/spreadsheets/d/abc123XYZ/edit#gid=0"),
            Some("abc123XYZ".to_string())
        );
        assert_eq!(spreadsheet_id_from(" abc123 "), Some("abc123".to_string()));
        assert_eq!(spreadsheet_id_from(""), None);
        assert_eq!(spreadsheet_id_from("https://docs.google.com/spreadsheets/d/"), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(serde_json::json!("True")), "True");
        assert_eq!(cell_text(serde_json::json!(80.5)), "80.5");
        assert_eq!(cell_text(serde_json::Value::Null), "");
    }

    #[test]
    fn test_key_file_missing() {
        let err = ServiceAccountKey::from_file("/nonexistent/key.json").unwrap_err();
        assert!(matches!(err, StoreError::Auth(_)));
    }

    #[tokio::test]
    async fn test_invalid_private_key_fails_auth() {
        let key = ServiceAccountKey {
            client_email: "svc@example.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
            token_uri: None,
        };
        let client = SheetsClient::new(key, "sheet", DEFAULT_SHEETS_API_URL, None).unwrap();
        let err = client.access_token().await.unwrap_err();
        assert!(matches!(err, StoreError::Auth(_)), "got {err:?}");
    }
}
