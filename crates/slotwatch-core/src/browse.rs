//! Browsing collaborator interface.

use std::future::Future;
use std::pin::Pin;

use crate::error::BrowseError;
use crate::types::Observation;

/// Boxed, sendable future used at the trait seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fetches a fresh observation of the monitored page.
///
/// Implementations keep one long-lived session and are driven by a single
/// check loop, so there is never more than one fetch in flight. Dropping the
/// returned future aborts the fetch.
pub trait Browser: Send {
    fn fetch_observation(&mut self) -> BoxFuture<'_, Result<Observation, BrowseError>>;
}
