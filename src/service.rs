//! The submission pipeline.
//!
//! One linear pass per request: validate → verify → persist → respond.
//! Persistence never happens before a successful verification, and a
//! persistence failure does not fail the request.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::domain::submission::{StoredSubmission, SubmissionForm, SubmissionResponse};
use crate::domain::validation;
use crate::error::SubmitError;
use crate::infra::submission_store::SubmissionStore;
use crate::infra::verifier::HumanVerifier;

/// Confirmation text shown to the caller on success.
pub const CONFIRMATION_MESSAGE: &str =
    "Thank you for your inquiry! We will get back to you shortly.";

/// Orchestrates one contact-form submission end to end.
pub struct SubmissionService {
    verifier: Arc<dyn HumanVerifier>,
    store: Arc<SubmissionStore>,
}

impl SubmissionService {
    pub fn new(verifier: Arc<dyn HumanVerifier>, store: Arc<SubmissionStore>) -> Self {
        Self { verifier, store }
    }

    /// Handle one raw submission.
    ///
    /// Validation failures and verification failures abort immediately
    /// and propagate. A storage failure is logged for operators while
    /// the caller still receives a confirmation; the record returned in
    /// that degraded case carries a timestamp assigned here rather than
    /// by the store.
    pub async fn handle(&self, form: SubmissionForm) -> Result<SubmissionResponse, SubmitError> {
        let submission = validation::validate(form)?;

        self.verifier.verify(&submission.recaptcha_token).await?;

        info!(
            email = %submission.email,
            travelers = submission.num_travelers,
            "accepted contact-form submission"
        );

        let record = match self.store.append(submission.clone()).await {
            Ok(record) => record,
            Err(err) => {
                error!(
                    error = %err,
                    path = %self.store.path().display(),
                    "failed to persist submission, confirming to caller anyway"
                );
                StoredSubmission::from_submission(submission, Utc::now())
            }
        };

        Ok(SubmissionResponse {
            status: "success".to_string(),
            message: CONFIRMATION_MESSAGE.to_string(),
            data: record,
        })
    }
}
