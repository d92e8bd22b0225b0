//! Service configuration.
//!
//! Everything the pipeline depends on (listen address, CORS allow-list,
//! reCAPTCHA credentials, inbox file location) is loaded here once and
//! handed to the components at construction; no other module reads the
//! environment on its own.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// CORS allow-list; the entry `*` allows any origin
    pub allowed_origins: Vec<String>,
    /// reCAPTCHA verification settings
    pub recaptcha: RecaptchaSettings,
    /// Submission storage settings
    pub storage: StorageSettings,
}

/// Settings for the external human-verification call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecaptchaSettings {
    /// Shared secret sent alongside each token
    pub secret: String,
    /// siteverify endpoint URL
    pub verify_url: String,
    /// Upper bound on one verification round trip, in seconds
    pub timeout_secs: u64,
}

/// Settings for the submission inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path of the JSON array holding accepted submissions
    pub submissions_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec!["*".to_string()],
            recaptcha: RecaptchaSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl Default for RecaptchaSettings {
    fn default() -> Self {
        Self {
            // Google's public test secret, accepts every token. Set
            // RECAPTCHA_SECRET for a real deployment.
            secret: "6LeIxAcTAAAAAGG-vFI1TnRWxMZNFuojJ4WifJWe".to_string(),
            verify_url: "https://www.google.com/recaptcha/api/siteverify".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            submissions_path: PathBuf::from("data/submissions.json"),
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env` and the environment.
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        // Hosting platforms inject PORT; it takes priority
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        if let Ok(host) = std::env::var("TRAVEL_API_HOST") {
            cfg.host = host;
        }
        if let Ok(port) = std::env::var("TRAVEL_API_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }
        if let Ok(origins) = std::env::var("TRAVEL_API_CORS_ORIGINS") {
            let parsed: Vec<String> = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !parsed.is_empty() {
                cfg.allowed_origins = parsed;
            }
        }

        if let Ok(secret) = std::env::var("RECAPTCHA_SECRET") {
            cfg.recaptcha.secret = secret;
        }
        if let Ok(url) = std::env::var("RECAPTCHA_VERIFY_URL") {
            cfg.recaptcha.verify_url = url;
        }
        if let Ok(val) = std::env::var("RECAPTCHA_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                cfg.recaptcha.timeout_secs = v;
            }
        }

        if let Ok(path) = std::env::var("SUBMISSIONS_PATH") {
            cfg.storage.submissions_path = PathBuf::from(path);
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_deployment() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.allowed_origins, vec!["*".to_string()]);
        assert_eq!(
            cfg.recaptcha.verify_url,
            "https://www.google.com/recaptcha/api/siteverify"
        );
        assert_eq!(
            cfg.storage.submissions_path,
            PathBuf::from("data/submissions.json")
        );
    }
}
