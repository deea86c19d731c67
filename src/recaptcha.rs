use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::VerificationError;

pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

// Body returned by the siteverify endpoint
#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
    #[serde(default)]
    challenge_ts: Option<String>,
    #[serde(default)]
    hostname: Option<String>,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Server-side check of reCAPTCHA response tokens.
///
/// Every call is a single form-encoded POST bounded by the client timeout; no
/// retries. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct RecaptchaClient {
    http: reqwest::Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaClient {
    pub fn new(
        secret: impl Into<String>,
        verify_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            secret: secret.into(),
            verify_url: verify_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.recaptcha_secret_key.clone(),
            config.recaptcha_verify_url.clone(),
            config.recaptcha_timeout(),
        )
    }

    /// Verify a response token. A blank or absent token is denied without
    /// calling the service.
    pub async fn verify(&self, token: Option<&str>) -> Result<(), VerificationError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(VerificationError::MissingToken)?;

        let response = self
            .http
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(VerificationError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerificationError::Status(status));
        }

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(VerificationError::Malformed)?;

        if body.success {
            debug!(
                hostname = ?body.hostname,
                challenge_ts = ?body.challenge_ts,
                "reCAPTCHA token verified"
            );
            Ok(())
        } else {
            Err(VerificationError::Denied(body.error_codes))
        }
    }
}
