//! Pipeline error taxonomy.

use thiserror::Error;

use crate::domain::validation::ValidationError;
use crate::infra::submission_store::StorageError;
use crate::infra::verifier::VerificationError;

/// Anything that can stop a submission from being accepted.
///
/// `Validation` and `Verification` propagate to the caller as 400s.
/// `Storage` never reaches the caller: the service logs it and still
/// confirms the submission (see [`crate::service`]); the variant exists
/// so the store boundary has an explicit error to hand to operators.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("reCAPTCHA verification failed: {0}")]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
