//! Submission data model and validation.

pub mod submission;
pub mod validation;
