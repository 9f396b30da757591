//! Contact relay - forwards contact submissions to an external form service
//!
//! One form-encoded POST per submission, no retries. The relay holds no state
//! besides its configuration and a shared HTTP client.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RelayConfig;

/// A contact form submission. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub social: String,
}

/// Successful relay outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: StatusCode,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("contact form endpoint is not configured")]
    NotConfigured,

    #[error("form endpoint rejected the submission with status {status}")]
    Rejected { status: StatusCode },

    #[error("form endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("form endpoint did not respond in time")]
    Timeout,
}

impl RelayError {
    /// HTTP status to surface to the submitter
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Rejected { status } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable name of the failure
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::NotConfigured => "not_configured",
            RelayError::Rejected { .. } => "rejected",
            RelayError::Unreachable(_) => "unreachable",
            RelayError::Timeout => "timeout",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Unreachable(e)
        }
    }
}

/// Forwards submissions to the configured endpoint
#[derive(Debug, Clone)]
pub struct ContactRelay {
    config: Option<RelayConfig>,
    client: reqwest::Client,
}

impl ContactRelay {
    /// Build a relay; `None` yields a disabled relay that never touches the network
    pub fn new(config: Option<RelayConfig>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(config) = &config {
            builder = builder.timeout(config.timeout);
        }
        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    pub fn disabled() -> Self {
        Self {
            config: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Forward one submission
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<RelayResponse, RelayError> {
        let Some(config) = &self.config else {
            tracing::error!("Contact submission dropped: relay is not configured");
            return Err(RelayError::NotConfigured);
        };

        let form = [
            (config.fields.name.as_str(), submission.name.as_str()),
            (config.fields.email.as_str(), submission.email.as_str()),
            (config.fields.message.as_str(), submission.message.as_str()),
            (config.fields.social.as_str(), submission.social.as_str()),
        ];

        let response = self
            .client
            .post(&config.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let err = RelayError::from(e);
                tracing::error!("Contact submission failed: {}", err);
                err
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Contact submission forwarded ({})", status);
            Ok(RelayResponse { status })
        } else {
            tracing::warn!("Contact submission rejected by endpoint ({})", status);
            Err(RelayError::Rejected { status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormFields;
    use axum::{extract::State, routing::post, Form, Router};
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn record(
        State(seen): State<Seen>,
        Form(form): Form<HashMap<String, String>>,
    ) -> StatusCode {
        seen.lock().unwrap().push(form);
        StatusCode::OK
    }

    async fn forbidden() -> StatusCode {
        StatusCode::FORBIDDEN
    }

    async fn slow() -> StatusCode {
        tokio::time::sleep(Duration::from_secs(5)).await;
        StatusCode::OK
    }

    /// Fake form endpoint on an ephemeral port
    async fn spawn_endpoint() -> (SocketAddr, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route("/ok", post(record))
            .route("/forbidden", post(forbidden))
            .route("/slow", post(slow))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (addr, seen)
    }

    fn relay(endpoint: String, timeout: Duration) -> ContactRelay {
        ContactRelay::new(Some(RelayConfig {
            endpoint,
            fields: FormFields {
                name: "entry.1".to_string(),
                email: "entry.2".to_string(),
                message: "entry.3".to_string(),
                social: "entry.4".to_string(),
            },
            timeout,
        }))
        .unwrap()
    }

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello & welcome".to_string(),
            social: String::new(),
        }
    }

    #[tokio::test]
    async fn test_forwards_form_fields() {
        let (addr, seen) = spawn_endpoint().await;
        let relay = relay(format!("http://{}/ok", addr), Duration::from_secs(5));

        let response = relay.submit(&submission()).await.unwrap();
        assert_eq!(response.status, StatusCode::OK);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["entry.1"], "Ada");
        assert_eq!(seen[0]["entry.2"], "ada@example.com");
        assert_eq!(seen[0]["entry.3"], "Hello & welcome");
        assert_eq!(seen[0]["entry.4"], "");
    }

    #[tokio::test]
    async fn test_rejected_status_passthrough() {
        let (addr, _) = spawn_endpoint().await;
        let relay = relay(format!("http://{}/forbidden", addr), Duration::from_secs(5));

        let err = relay.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::Rejected { status } if status == StatusCode::FORBIDDEN));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.kind(), "rejected");
    }

    #[tokio::test]
    async fn test_timeout() {
        let (addr, _) = spawn_endpoint().await;
        let relay = relay(format!("http://{}/slow", addr), Duration::from_millis(200));

        let err = relay.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::Timeout));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unreachable() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let relay = relay(format!("http://{}/ok", addr), Duration::from_secs(5));
        let err = relay.submit(&submission()).await.unwrap_err();
        assert_eq!(err.kind(), "unreachable");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_not_configured() {
        let relay = ContactRelay::disabled();
        assert!(!relay.is_enabled());
        let err = relay.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured));
        assert_eq!(err.kind(), "not_configured");
    }

    #[test]
    fn test_submission_defaults() {
        let parsed: ContactSubmission = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(parsed.name, "Ada");
        assert_eq!(parsed.email, "");
        assert_eq!(parsed.social, "");
    }
}
