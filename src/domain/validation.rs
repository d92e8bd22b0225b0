//! Shape checks for incoming contact-form payloads.
//!
//! Runs before any external call: a payload that fails here never
//! reaches the verification service or the inbox.

use thiserror::Error;

use crate::domain::submission::{Submission, SubmissionForm};

/// One rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: &'static str,
}

/// The payload violated one or more field constraints.
///
/// All violations are collected so the caller sees every bad field at
/// once instead of fixing them one round trip at a time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid submission: {}", summarize(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| format!("{}: {}", f.field, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check a raw payload and produce a validated [`Submission`].
///
/// Pure; no I/O. `num_travelers` defaults to 1 when absent.
pub fn validate(form: SubmissionForm) -> Result<Submission, ValidationError> {
    let mut fields = Vec::new();

    let first_name = match form.first_name {
        Some(name) if !name.trim().is_empty() => Some(name),
        _ => {
            fields.push(FieldError {
                field: "first_name",
                reason: "must be present and non-empty",
            });
            None
        }
    };

    let email = match form.email {
        Some(addr) if is_valid_email(&addr) => Some(addr),
        Some(_) => {
            fields.push(FieldError {
                field: "email",
                reason: "is not a valid email address",
            });
            None
        }
        None => {
            fields.push(FieldError {
                field: "email",
                reason: "is required",
            });
            None
        }
    };

    let num_travelers = match form.num_travelers {
        None => Some(1),
        Some(n) if n >= 1 && n <= u32::MAX as i64 => Some(n as u32),
        Some(_) => {
            fields.push(FieldError {
                field: "num_travelers",
                reason: "must be a positive integer",
            });
            None
        }
    };

    let recaptcha_token = match form.recaptcha_token {
        Some(token) if !token.is_empty() => Some(token),
        _ => {
            fields.push(FieldError {
                field: "recaptcha_token",
                reason: "must be present and non-empty",
            });
            None
        }
    };

    if !fields.is_empty() {
        return Err(ValidationError { fields });
    }

    // The unwraps cannot fire: each slot is None only when an error was
    // recorded above.
    Ok(Submission {
        first_name: first_name.unwrap(),
        last_name: form.last_name.filter(|s| !s.is_empty()),
        email: email.unwrap(),
        num_travelers: num_travelers.unwrap(),
        message: form.message.filter(|s| !s.is_empty()),
        recaptcha_token: recaptcha_token.unwrap(),
    })
}

/// Syntactic email check: exactly one unquoted `@`, a non-empty local
/// part, and a dotted domain with non-empty labels. Deliberately loose;
/// deliverability is not this service's problem.
fn is_valid_email(addr: &str) -> bool {
    if addr.chars().any(|c| c.is_whitespace()) {
        return false;
    }
    let Some((local, domain)) = addr.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    let has_dot = domain.contains('.');
    has_dot && labels.all(|label| !label.is_empty())
}
