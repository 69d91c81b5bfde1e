use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::similarity::EmptyPolicy;
use crate::sink::{GcsSink, NoopSink, ResultSink};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy, so
/// everything here can also come from a local .env during development.
#[derive(Clone)]
pub struct Config {
    /// Listen port. Cloud Run injects PORT; defaults to 8080.
    pub port: u16,
    /// Listen address (PLAGCHECK_BIND, default 0.0.0.0)
    pub bind: String,
    /// How to score texts with no words (PLAGCHECK_EMPTY_POLICY: zero | error)
    pub empty_policy: EmptyPolicy,
    /// Cloud Storage bucket for timed results. Unset means results are discarded.
    pub bucket: Option<String>,
    /// Bearer token for Cloud Storage uploads (PLAGCHECK_GCS_TOKEN)
    pub gcs_token: Option<String>,
    /// Cloud Storage endpoint (PLAGCHECK_GCS_URL), overridable for emulators
    pub gcs_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind: "0.0.0.0".to_string(),
            empty_policy: EmptyPolicy::Zero,
            bucket: None,
            gcs_token: None,
            gcs_url: crate::sink::gcs::DEFAULT_GCS_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every field has a default, so an empty environment is valid.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(p) => p
                .parse()
                .with_context(|| format!("PORT must be a port number, got {p:?}"))?,
            Err(_) => defaults.port,
        };

        let empty_policy = match env::var("PLAGCHECK_EMPTY_POLICY") {
            Ok(p) => p.parse()?,
            Err(_) => defaults.empty_policy,
        };

        Ok(Self {
            port,
            bind: env::var("PLAGCHECK_BIND").unwrap_or(defaults.bind),
            empty_policy,
            bucket: non_empty_var("PLAGCHECK_BUCKET"),
            gcs_token: non_empty_var("PLAGCHECK_GCS_TOKEN"),
            gcs_url: env::var("PLAGCHECK_GCS_URL").unwrap_or(defaults.gcs_url),
        })
    }

    /// Build the result sink this configuration asks for.
    pub fn result_sink(&self) -> Result<Arc<dyn ResultSink>> {
        match self.bucket.as_deref() {
            Some(bucket) => Ok(Arc::new(GcsSink::new(
                &self.gcs_url,
                bucket,
                self.gcs_token.clone(),
            )?)),
            None => Ok(Arc::new(NoopSink)),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sink_without_bucket() {
        // Builds without touching the network
        assert!(Config::default().result_sink().is_ok());
    }
}
