use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Why a validation attempt failed. The gate collapses every variant to the
/// same 401; the split exists so operators can tell an unreachable auth
/// service apart from a rejected token in the logs.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("auth service request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("auth service rejected the credential with status {0}")]
    Rejected(reqwest::StatusCode),

    #[error("auth service returned a malformed body: {0}")]
    MalformedResponse(#[source] reqwest::Error),
}

impl ValidationError {
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Transport(_) => "transport",
            ValidationError::Rejected(_) => "rejected",
            ValidationError::MalformedResponse(_) => "malformed_response",
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidateTokenRequest<'a> {
    token: &'a str,
}

/// Identity returned by a successful validation. Role order is preserved so
/// the serialized roles header is deterministic.
#[derive(Clone, Debug, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub roles: Vec<String>,
}

/// Client for the remote token-validation endpoint.
///
/// Holds a single long-lived HTTP client shared by all in-flight requests.
/// The client carries a request timeout so a stalled auth service cannot pin
/// gateway requests indefinitely.
#[derive(Clone, Debug)]
pub struct TokenValidator {
    http: reqwest::Client,
    validate_url: Url,
}

impl TokenValidator {
    pub fn new(validate_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, validate_url })
    }

    /// Ask the auth service whether `token` identifies a user.
    ///
    /// Single attempt, no retry: a failure here is terminal for the request
    /// being gated.
    pub async fn validate(&self, token: &str) -> Result<UserInfo, ValidationError> {
        let response = self
            .http
            .post(self.validate_url.clone())
            .json(&ValidateTokenRequest { token })
            .send()
            .await
            .map_err(ValidationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ValidationError::Rejected(status));
        }

        response
            .json::<UserInfo>()
            .await
            .map_err(ValidationError::MalformedResponse)
    }
}
