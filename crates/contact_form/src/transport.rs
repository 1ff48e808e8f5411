use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ContactRequest, ContactResponse, CONTACT_PATH};
use tracing::debug;

use crate::error::SubmitError;

#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn post_contact(&self, request: &ContactRequest) -> Result<ContactResponse, SubmitError>;
}

/// Used when no API base URL is configured; every submission fails.
pub struct MissingContactTransport;

#[async_trait]
impl ContactTransport for MissingContactTransport {
    async fn post_contact(&self, _request: &ContactRequest) -> Result<ContactResponse, SubmitError> {
        Err(SubmitError::NotConfigured)
    }
}

pub struct HttpContactTransport {
    http: Client,
    endpoint: String,
}

impl HttpContactTransport {
    pub fn new(api_base_url: &str) -> Self {
        Self::with_client(Client::new(), api_base_url)
    }

    pub fn with_client(http: Client, api_base_url: &str) -> Self {
        Self {
            http,
            endpoint: contact_endpoint(api_base_url),
        }
    }
}

pub fn contact_endpoint(api_base_url: &str) -> String {
    format!("{}{CONTACT_PATH}", api_base_url.trim().trim_end_matches('/'))
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    async fn post_contact(&self, request: &ContactRequest) -> Result<ContactResponse, SubmitError> {
        debug!(endpoint = %self.endpoint, "posting contact submission");
        let body = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        serde_json::from_str(&body).map_err(|err| SubmitError::MalformedBody(err.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
