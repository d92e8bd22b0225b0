//! External collaborators: the reCAPTCHA client and the inbox store.

pub mod submission_store;
pub mod verifier;
