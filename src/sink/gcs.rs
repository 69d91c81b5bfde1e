// Google Cloud Storage result sink.
//
// Uses the JSON API "simple upload" endpoint, which takes the object body as
// the raw request body:
//
//   POST {base}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={key}
//
// Auth is an OAuth2 access token passed through as a bearer token. On Cloud Run
// that token comes from the metadata server; obtaining it is left to the
// deployment (PLAGCHECK_GCS_TOKEN). Without a token the request is sent
// unauthenticated, which works against emulators and public-write buckets.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::traits::ResultSink;

/// Default Cloud Storage endpoint.
pub const DEFAULT_GCS_URL: &str = "https://storage.googleapis.com";

pub struct GcsSink {
    client: Client,
    base_url: String,
    bucket: String,
    token: Option<String>,
}

impl GcsSink {
    pub fn new(base_url: &str, bucket: &str, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("plagcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            token,
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/upload/storage/v1/b/{}/o", self.base_url, self.bucket)
    }
}

#[async_trait]
impl ResultSink for GcsSink {
    async fn store(&self, key: &str, value: &str) -> Result<()> {
        let mut request = self
            .client
            .post(self.upload_url())
            .query(&[("uploadType", "media"), ("name", key)])
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(value.to_string());

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Upload of {key} to bucket {} failed", self.bucket))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Cloud Storage returned {status} for {key}: {body}");
        }

        debug!(bucket = %self.bucket, key = key, "Stored blob");
        Ok(())
    }
}
