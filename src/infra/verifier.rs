//! Human-verification client.
//!
//! Exchanges the caller's reCAPTCHA token with the siteverify endpoint.
//! Fail-closed throughout: a timeout, an unreachable service, or a body
//! we cannot parse all count as "not verified".

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::RecaptchaSettings;

/// Why a token was not accepted. Every variant means the submission is
/// rejected; the caller may retry with a fresh token.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("the verification service rejected the token")]
    Rejected,

    #[error("the verification request timed out")]
    Timeout,

    #[error("the verification service was unreachable: {0}")]
    Unreachable(String),

    #[error("the verification response could not be parsed: {0}")]
    MalformedResponse(String),
}

/// Seam for the external human-verification service.
#[async_trait]
pub trait HumanVerifier: Send + Sync {
    /// Check one token. `Ok(())` means the service confirmed a human.
    async fn verify(&self, token: &str) -> Result<(), VerificationError>;
}

/// siteverify response body. Only `success` is authoritative; whatever
/// else the service sends (hostname, challenge timestamp, error codes)
/// is ignored.
#[derive(Debug, Deserialize)]
struct SiteVerifyResponse {
    success: bool,
}

/// reCAPTCHA verifier backed by `reqwest`.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl RecaptchaVerifier {
    /// Build a verifier with the configured endpoint, secret, and
    /// per-request timeout.
    pub fn new(settings: &RecaptchaSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            verify_url: settings.verify_url.clone(),
            secret: settings.secret.clone(),
        })
    }
}

#[async_trait]
impl HumanVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<(), VerificationError> {
        let response = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VerificationError::Timeout
                } else {
                    VerificationError::Unreachable(e.to_string())
                }
            })?;

        let body: SiteVerifyResponse = response
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VerificationError::Timeout
                } else {
                    VerificationError::MalformedResponse(e.to_string())
                }
            })?;

        if body.success {
            Ok(())
        } else {
            Err(VerificationError::Rejected)
        }
    }
}
