//! Travel inquiry backend binary.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use travel_inquiry_api::{
    config::AppConfig,
    http,
    infra::{submission_store::SubmissionStore, verifier::RecaptchaVerifier},
    service::SubmissionService,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    info!(
        host = %config.host,
        port = config.port,
        inbox = %config.storage.submissions_path.display(),
        "starting travel-inquiry-api v{}",
        travel_inquiry_api::VERSION
    );

    if let Some(dir) = config.storage.submissions_path.parent() {
        if !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir).await?;
        }
    }

    let verifier = Arc::new(RecaptchaVerifier::new(&config.recaptcha)?);
    let store = Arc::new(SubmissionStore::new(
        config.storage.submissions_path.clone(),
    ));
    let service = Arc::new(SubmissionService::new(verifier, store));

    let app = http::router(&config, service);

    let addr = format!("{}:{}", config.host, config.port);
    info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
