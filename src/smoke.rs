//! One-shot HTTP smoke test against the email notification API.

use std::fmt;
use std::time::Duration;

use chrono::Local;
use color_eyre::eyre::{Context, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Category attached to smoke-test emails.
pub const SMOKE_CATEGORY: &str = "SMOKE_TEST";

const SEND_PATH: &str = "/api/Email/send";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of `POST /api/Email/send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub category: String,
    pub is_html: bool,
}

impl SendEmailRequest {
    /// Plain-text smoke-test email stamped with the current local time.
    pub fn smoke(to: Vec<String>, subject: impl Into<String>) -> Self {
        let sent_at = Local::now().format("%Y-%m-%d %H:%M:%S");
        Self {
            to,
            subject: subject.into(),
            body: format!("Test email sent by codepack smoke.\n\nSent at: {sent_at}"),
            category: SMOKE_CATEGORY.to_string(),
            is_html: false,
        }
    }
}

/// Response envelope returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<SendEmailData>,
    pub request_id: Option<String>,
}

/// Payload of a successful send.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailData {
    pub email_id: String,
    /// Delivery status; the API may report it as a name or a number.
    pub status: Value,
    #[serde(default)]
    pub message: String,
}

/// Result of a smoke run.
#[derive(Debug)]
pub enum SmokeOutcome {
    /// HTTP 200 with a parsed body.
    Sent(ApiResponse),
    /// Any other status, with the raw response text.
    Rejected { status: StatusCode, body: String },
}

impl fmt::Display for SmokeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent(response) => {
                writeln!(f, "Email sent")?;
                if let Some(request_id) = &response.request_id {
                    writeln!(f, "Request ID: {request_id}")?;
                }
                match &response.data {
                    Some(data) => {
                        writeln!(f, "Email ID: {}", data.email_id)?;
                        writeln!(f, "Status: {}", display_status(&data.status))?;
                        write!(f, "Message: {}", data.message)
                    }
                    None => write!(f, "Message: {}", response.message),
                }
            }
            Self::Rejected { status, body } => {
                writeln!(f, "Email send failed: HTTP {status}")?;
                write!(f, "Response: {body}")
            }
        }
    }
}

fn display_status(status: &Value) -> String {
    match status {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Full send endpoint for a base URL.
pub fn send_url(base_url: &str) -> String {
    format!("{}{SEND_PATH}", base_url.trim_end_matches('/'))
}

/// Send one request and classify the response.
pub async fn send(
    base_url: &str,
    api_key: &str,
    request: &SendEmailRequest,
) -> Result<SmokeOutcome> {
    let url = send_url(base_url);
    info!(url = %url, recipients = request.to.len(), "Sending smoke-test email");

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .post(&url)
        .header(API_KEY_HEADER, api_key)
        .json(request)
        .send()
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    let status = response.status();
    let body = response.text().await.context("Failed to read response body")?;
    debug!(%status, bytes = body.len(), "Received response");

    if status == StatusCode::OK {
        let parsed = serde_json::from_str(&body).context("Failed to parse response JSON")?;
        Ok(SmokeOutcome::Sent(parsed))
    } else {
        Ok(SmokeOutcome::Rejected { status, body })
    }
}

/// Run [`send`] to completion on a current-thread runtime.
pub fn run(base_url: &str, api_key: &str, request: &SendEmailRequest) -> Result<SmokeOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(send(base_url, api_key, request))
}
