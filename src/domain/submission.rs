//! Submission types.
//!
//! Three shapes, one per pipeline stage:
//! - [`SubmissionForm`]: the raw JSON body, nothing trusted yet
//! - [`Submission`]: validated input, still carrying the reCAPTCHA token
//! - [`StoredSubmission`]: what the inbox holds, token stripped and
//!   timestamp assigned at persistence time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw contact-form payload as received from the client.
///
/// Every field is optional here so that missing or ill-typed values
/// produce field-level validation errors instead of opaque
/// deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub num_travelers: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub recaptcha_token: Option<String>,
}

/// A validated submission, ready for verification and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub num_travelers: u32,
    pub message: Option<String>,
    /// Opaque proof for the verification service; never persisted.
    pub recaptcha_token: String,
}

/// A persisted submission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub email: String,
    pub num_travelers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Assigned at the moment of persistence, non-decreasing across
    /// records in one inbox.
    pub timestamp: DateTime<Utc>,
}

impl StoredSubmission {
    /// Strip the verification token and stamp the record.
    pub fn from_submission(submission: Submission, timestamp: DateTime<Utc>) -> Self {
        Self {
            first_name: submission.first_name,
            last_name: submission.last_name,
            email: submission.email,
            num_travelers: submission.num_travelers,
            message: submission.message,
            timestamp,
        }
    }
}

/// Body of a successful `POST /api/submit-form` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub status: String,
    pub message: String,
    pub data: StoredSubmission,
}
