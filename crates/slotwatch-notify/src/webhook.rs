//! Webhook delivery over HTTP(S).

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::DeliveryError;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts plain-text messages to a webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
}

impl WebhookClient {
    pub fn new() -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// POST `message` to `endpoint` and return the response status.
    ///
    /// A non-2xx status is not an error; the caller only logs it.
    pub async fn deliver(&self, endpoint: &Url, message: &str) -> Result<u16, DeliveryError> {
        let resp = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, "text/plain")
            .body(message.to_string())
            .send()
            .await
            .map_err(|e| DeliveryError::Request {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;
        Ok(resp.status().as_u16())
    }
}
