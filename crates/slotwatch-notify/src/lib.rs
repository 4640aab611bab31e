//! slotwatch-notify — fire-and-forget alerts.
//!
//! A notification is a terminal bell plus, when a webhook is configured, a
//! plain-text POST. Delivery failures are logged and swallowed: they never
//! reach the check loop.

pub mod cue;
pub mod error;
pub mod message;
pub mod sink;
pub mod webhook;

pub use error::DeliveryError;
pub use message::appointment_found;
pub use sink::{NotificationSink, Notifier};
pub use webhook::WebhookClient;
