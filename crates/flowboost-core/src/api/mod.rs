//! FlowBoost API client.
//!
//! JSON client for the hosted endpoints: track-event, preferences,
//! task-suggestions, feedback. Requests carry the bearer session token from
//! the OS keyring; without a token, telemetry degrades to a silent no-op
//! (events are only recorded for signed-in users) while the other endpoints
//! report `ApiError::NotAuthenticated`.
//!
//! No retries, no extra timeouts, no cancellation: a failed call is logged
//! (and, where user-initiated, surfaced) exactly once.

use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use crate::error::ApiError;
use crate::events::TelemetryEvent;
use crate::storage::{Config, PreferencesPayload};

/// Thin wrapper around the OS keyring for the session token.
pub mod token_store {
    use crate::error::ApiError;

    const SERVICE: &str = "flowboost";
    const TOKEN_KEY: &str = "session_token";

    pub fn session_token() -> Result<Option<String>, ApiError> {
        let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn store_session_token(token: &str) -> Result<(), ApiError> {
        let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
        entry.set_password(token)?;
        Ok(())
    }

    pub fn clear_session_token() -> Result<(), ApiError> {
        let entry = keyring::Entry::new(SERVICE, TOKEN_KEY)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Authenticated client for the FlowBoost endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        Ok(Self {
            base: Url::parse(base_url)?,
            http: Client::new(),
            token,
        })
    }

    /// Build from preferences, pulling the session token from the keyring.
    /// A keyring failure is logged and treated as signed-out.
    pub fn from_config(cfg: &Config) -> Result<Self, ApiError> {
        let token = match token_store::session_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "keyring unavailable; continuing signed out");
                None
            }
        };
        Self::new(&cfg.api.base_url, token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Ship one telemetry event. Fire-and-forget: every failure (including
    /// being signed out) is logged and swallowed.
    pub async fn track_event(&self, event: &TelemetryEvent) {
        if self.token.is_none() {
            tracing::debug!(kind = event.kind.as_str(), "telemetry skipped: not signed in");
            return;
        }
        let body = json!({
            "eventType": event.kind.as_str(),
            "eventData": event.data,
        });
        if let Err(e) = self.post("/api/user/track-event", &body).await {
            tracing::warn!(kind = event.kind.as_str(), error = %e, "failed to track event");
        }
    }

    /// Fetch the stored preferences object.
    pub async fn fetch_preferences(&self) -> Result<PreferencesPayload, ApiError> {
        let endpoint = "/api/user/preferences";
        let response = self.get(endpoint).await?;
        let envelope: Value = response.json().await?;
        serde_json::from_value(envelope["preferences"].clone()).map_err(|e| {
            ApiError::BadResponse {
                endpoint: endpoint.into(),
                message: e.to_string(),
            }
        })
    }

    /// Overwrite the stored preferences object wholesale.
    pub async fn save_preferences(&self, prefs: &PreferencesPayload) -> Result<(), ApiError> {
        let body = json!({ "preferences": prefs });
        self.post("/api/user/preferences", &body).await.map(|_| ())
    }

    /// Ask for task-breakdown suggestions; returns the server's free-text
    /// reply for the caller to parse.
    pub async fn generate_suggestions(&self, task_title: &str) -> Result<String, ApiError> {
        let endpoint = "/api/ai/task-suggestions";
        let body = json!({ "taskTitle": task_title });
        let response = self.post(endpoint, &body).await?;
        let reply: Value = response.json().await?;
        reply["suggestions"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::BadResponse {
                endpoint: endpoint.into(),
                message: "missing 'suggestions' field".into(),
            })
    }

    /// Submit free-text feedback.
    pub async fn send_feedback(&self, feedback: &str) -> Result<(), ApiError> {
        let body = json!({ "feedback": feedback });
        self.post("/api/user/feedback", &body).await.map(|_| ())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn require_token(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let token = self.require_token()?;
        let response = self
            .http
            .get(self.base.join(path)?)
            .bearer_auth(token)
            .send()
            .await?;
        Self::check_status(path, response)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<reqwest::Response, ApiError> {
        let token = self.require_token()?;
        let response = self
            .http
            .post(self.base.join(path)?)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::check_status(path, response)
    }

    fn check_status(
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.into(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}
