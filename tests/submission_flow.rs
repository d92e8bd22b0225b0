//! End-to-end pipeline tests: stub verifier + temp-file inbox.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use travel_inquiry_api::{
    domain::submission::SubmissionForm,
    error::SubmitError,
    infra::{
        submission_store::SubmissionStore,
        verifier::{HumanVerifier, VerificationError},
    },
    service::{SubmissionService, CONFIRMATION_MESSAGE},
};

/// Accepts exactly one configured token and counts how often it is asked.
struct StubVerifier {
    accepted_token: String,
    calls: AtomicUsize,
}

impl StubVerifier {
    fn accepting(token: &str) -> Arc<Self> {
        Arc::new(Self {
            accepted_token: token.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HumanVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<(), VerificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if token == self.accepted_token {
            Ok(())
        } else {
            Err(VerificationError::Rejected)
        }
    }
}

/// Always fails with a timeout, as an unreachable service would.
struct TimingOutVerifier;

#[async_trait]
impl HumanVerifier for TimingOutVerifier {
    async fn verify(&self, _token: &str) -> Result<(), VerificationError> {
        Err(VerificationError::Timeout)
    }
}

fn sample_form(token: &str) -> SubmissionForm {
    SubmissionForm {
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        email: Some("test@example.com".to_string()),
        num_travelers: Some(2),
        message: Some("hello".to_string()),
        recaptcha_token: Some(token.to_string()),
    }
}

fn setup(verifier: Arc<dyn HumanVerifier>) -> (TempDir, Arc<SubmissionStore>, SubmissionService) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = Arc::new(SubmissionStore::new(dir.path().join("submissions.json")));
    let service = SubmissionService::new(verifier, store.clone());
    (dir, store, service)
}

#[tokio::test]
async fn test_valid_submission_is_confirmed_and_persisted() {
    let verifier = StubVerifier::accepting("tok");
    let (_dir, store, service) = setup(verifier.clone());

    let response = service.handle(sample_form("tok")).await.unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.message, CONFIRMATION_MESSAGE);
    assert_eq!(response.data.first_name, "Test");
    assert_eq!(response.data.last_name.as_deref(), Some("User"));
    assert_eq!(response.data.email, "test@example.com");
    assert_eq!(response.data.num_travelers, 2);
    assert_eq!(response.data.message.as_deref(), Some("hello"));

    let records = store.load().await.unwrap();
    assert_eq!(records, vec![response.data]);
    assert_eq!(verifier.call_count(), 1);
}

#[tokio::test]
async fn test_timestamps_grow_across_submissions() {
    let verifier = StubVerifier::accepting("tok");
    let (_dir, store, service) = setup(verifier);

    let first = service.handle(sample_form("tok")).await.unwrap();
    let second = service.handle(sample_form("tok")).await.unwrap();

    assert!(second.data.timestamp >= first.data.timestamp);
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_rejected_token_is_not_persisted() {
    let verifier = StubVerifier::accepting("tok");
    let (_dir, store, service) = setup(verifier.clone());

    let err = service.handle(sample_form("bad")).await.unwrap_err();

    assert!(matches!(err, SubmitError::Verification(_)));
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(verifier.call_count(), 1);
}

#[tokio::test]
async fn test_verifier_timeout_fails_closed() {
    let (_dir, store, service) = setup(Arc::new(TimingOutVerifier));

    let err = service.handle(sample_form("tok")).await.unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Verification(VerificationError::Timeout)
    ));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_first_name_skips_verification() {
    let verifier = StubVerifier::accepting("tok");
    let (_dir, store, service) = setup(verifier.clone());

    let mut form = sample_form("tok");
    form.first_name = Some("".to_string());

    let err = service.handle(form).await.unwrap_err();

    assert!(err.to_string().contains("first_name"));
    assert!(matches!(err, SubmitError::Validation(_)));
    assert_eq!(verifier.call_count(), 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_email_skips_verification() {
    let verifier = StubVerifier::accepting("tok");
    let (_dir, store, service) = setup(verifier.clone());

    let mut form = sample_form("tok");
    form.email = Some("not-an-address".to_string());

    let err = service.handle(form).await.unwrap_err();

    assert!(err.to_string().contains("email"));
    assert_eq!(verifier.call_count(), 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_storage_failure_still_confirms() {
    let verifier = StubVerifier::accepting("tok");
    let dir = tempfile::tempdir().unwrap();
    // Pointing the store at a directory makes every write fail
    let store = Arc::new(SubmissionStore::new(dir.path()));
    let service = SubmissionService::new(verifier, store);

    let response = service.handle(sample_form("tok")).await.unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.message, CONFIRMATION_MESSAGE);
    assert_eq!(response.data.email, "test@example.com");
}

#[tokio::test]
async fn test_token_never_reaches_the_inbox_file() {
    let verifier = StubVerifier::accepting("super-secret-token");
    let (_dir, store, service) = setup(verifier);

    service
        .handle(sample_form("super-secret-token"))
        .await
        .unwrap();

    let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
    assert!(!raw.contains("super-secret-token"));
    assert!(!raw.contains("recaptcha_token"));
}
