//! slotwatch-core — the decision half of the appointment sniper.
//!
//! Holds everything that does not touch the network: the observation and
//! outcome types, the page classifier, the notification throttle, and
//! configuration loading.
//!
//! # Pipeline
//!
//! ```text
//! Browser::fetch_observation() → Observation
//!   └── PageRules::classify() → Outcome
//!         └── NotifyThrottle::on_success() / on_failure() → notify?
//! ```

pub mod browse;
pub mod classifier;
pub mod config;
pub mod error;
pub mod throttle;
pub mod types;

pub use browse::{BoxFuture, Browser};
pub use classifier::{PageRules, classify};
pub use config::{ConfigFile, Overrides, Settings, parse_duration, validate_webhook_url};
pub use error::{BrowseError, ConfigError, ConfigResult};
pub use throttle::NotifyThrottle;
pub use types::{Observation, Outcome};
