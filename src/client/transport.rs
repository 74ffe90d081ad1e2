use async_trait::async_trait;
use log::debug;

use crate::client::record::{Reply, ReplyBody, SubmissionRecord};
use crate::errors::FormError;

/// Sends a submission record and decodes the JSON reply.
///
/// Implementations return `FormError::Transport` when the request never
/// completes or the body is not JSON; any HTTP status is a `Reply`.
#[async_trait(?Send)]
pub trait Transport {
    async fn post_json(&self, path: &str, record: &SubmissionRecord) -> Result<Reply, FormError>;
}

/// `reqwest`-backed transport. No timeout is configured: the request waits
/// for the connection to resolve or fail.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, record: &SubmissionRecord) -> Result<Reply, FormError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} ({} fields)", url, record.len());

        let resp = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| FormError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .json::<ReplyBody>()
            .await
            .map_err(|e| FormError::Transport(format!("undecodable reply ({}): {}", status, e)))?;

        debug!("POST {} -> {}", url, status);
        Ok(Reply { status, body })
    }
}
