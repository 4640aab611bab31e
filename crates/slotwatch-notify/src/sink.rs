//! Notification sink used by the check loop.

use tracing::{info, warn};
use url::Url;

use slotwatch_core::BoxFuture;

use crate::cue::ring_bell;
use crate::webhook::WebhookClient;

/// Where the check loop sends its alerts.
///
/// Both methods are best-effort and never fail the caller.
pub trait NotificationSink: Send + Sync {
    /// Local cue plus outbound delivery.
    fn notify<'a>(&'a self, message: &'a str) -> BoxFuture<'a, ()>;

    /// Outbound delivery only. Used to prove connectivity on non-success ticks.
    fn call_endpoint<'a>(&'a self, message: &'a str) -> BoxFuture<'a, ()>;
}

/// Terminal bell plus optional webhook.
pub struct Notifier {
    webhook: Option<Url>,
    client: WebhookClient,
    bell: bool,
}

impl Notifier {
    pub fn new(webhook: Option<Url>, client: WebhookClient) -> Self {
        Self {
            webhook,
            client,
            bell: true,
        }
    }

    /// Enable or disable the terminal bell.
    pub fn with_bell(mut self, bell: bool) -> Self {
        self.bell = bell;
        self
    }

    pub fn webhook(&self) -> Option<&Url> {
        self.webhook.as_ref()
    }

    async fn deliver(&self, message: &str) {
        let Some(endpoint) = &self.webhook else {
            return;
        };
        match self.client.deliver(endpoint, message).await {
            Ok(status) => info!(%endpoint, status, "webhook called"),
            Err(e) => warn!(error = %e, "webhook request failed"),
        }
    }
}

impl NotificationSink for Notifier {
    fn notify<'a>(&'a self, message: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            if self.bell {
                ring_bell();
            }
            self.deliver(message).await;
        })
    }

    fn call_endpoint<'a>(&'a self, message: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(self.deliver(message))
    }
}
