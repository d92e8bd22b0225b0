//! # Travel Inquiry API
//!
//! Backend for the travel site's contact form. One pipeline does all the
//! interesting work: an incoming submission is shape-checked, the caller's
//! reCAPTCHA token is exchanged with Google's siteverify endpoint, and the
//! accepted submission is appended to a JSON inbox file before the caller
//! gets a confirmation.
//!
//! ## Modules
//!
//! - [`domain`]: submission types and field validation
//! - [`infra`]: the reCAPTCHA client and the file-backed submission store
//! - [`service`]: the pipeline itself (validate → verify → persist → respond)
//! - [`http`]: axum router, CORS, and the two endpoints
//! - [`config`]: environment-driven configuration, injected explicitly

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod infra;
pub mod service;

// Re-export commonly used types at crate root
pub use config::AppConfig;
pub use domain::submission::{StoredSubmission, Submission, SubmissionForm, SubmissionResponse};
pub use error::SubmitError;
pub use service::SubmissionService;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
