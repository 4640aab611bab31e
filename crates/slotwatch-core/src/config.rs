//! Configuration loading.
//!
//! The config file is YAML (`config.yaml` by default) or TOML when the path
//! ends in `.toml`. Every key is optional. Command-line overrides win over
//! the file, the file wins over the defaults.
//!
//! A broken config never stops the sniper: problems are logged once and the
//! affected values fall back to their defaults. The webhook in particular is
//! simply disabled.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_NOTIFY_WINDOW: u32 = 5;

/// Raw contents of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    /// Endpoint that receives a POST when an appointment is found.
    pub webhook_url: Option<String>,
    /// Check interval, e.g. `"90s"` or `"2m30s"`.
    pub interval: Option<String>,
    pub notify_window: Option<i64>,
    pub always_notify: Option<bool>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        // An empty YAML document deserializes to unit, not a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interval: Option<Duration>,
    pub notify_window: Option<i64>,
    /// A set flag forces always-notify on; an absent flag defers to the file.
    pub always_notify: bool,
}

/// Resolved, immutable runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub interval: Duration,
    pub webhook_url: Option<Url>,
    pub always_notify: bool,
    pub notify_window: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            webhook_url: None,
            always_notify: false,
            notify_window: DEFAULT_NOTIFY_WINDOW,
        }
    }
}

impl Settings {
    /// Load the config file at `path` and merge the overrides into it.
    ///
    /// An unreadable or invalid file is logged and ignored.
    pub fn load(path: &Path, overrides: &Overrides) -> Self {
        let file = match ConfigFile::from_file(path) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(error = %e, "config not loaded, webhook disabled");
                None
            }
        };
        Self::resolve(file.as_ref(), overrides)
    }

    /// Merge defaults, file values and overrides.
    pub fn resolve(file: Option<&ConfigFile>, overrides: &Overrides) -> Self {
        let defaults = Self::default();
        let file = file.cloned().unwrap_or_default();

        let file_interval = file.interval.as_deref().and_then(|raw| match parse_duration(raw) {
            Ok(d) => Some(d),
            Err(e) => {
                warn!(error = %e, "config: ignoring interval");
                None
            }
        });
        let interval = overrides
            .interval
            .or(file_interval)
            .unwrap_or(defaults.interval);

        let notify_window = overrides
            .notify_window
            .or(file.notify_window)
            .map(normalize_window)
            .unwrap_or(defaults.notify_window);

        let webhook_url = file.webhook_url.as_deref().and_then(validate_webhook_url);
        if let Some(url) = &webhook_url {
            info!(%url, "config: webhook enabled");
        }

        Self {
            interval,
            webhook_url,
            always_notify: overrides.always_notify || file.always_notify.unwrap_or(false),
            notify_window,
        }
    }
}

/// Accept only absolute http/https URLs. Anything else disables the webhook.
pub fn validate_webhook_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        _ => {
            warn!(webhook_url = %raw, "config: not a valid http/https URL, webhook disabled");
            None
        }
    }
}

fn normalize_window(window: i64) -> u32 {
    if window < 1 {
        warn!(window, "notify window must be at least 1, using 1");
        return 1;
    }
    u32::try_from(window).unwrap_or(u32::MAX)
}

/// Parse a duration like `"20s"`, `"1m"`, `"2m30s"`, `"500ms"` or `"1h"`.
///
/// A bare number is read as seconds. Zero durations are rejected.
pub fn parse_duration(s: &str) -> ConfigResult<Duration> {
    let s = s.trim();
    let invalid = || ConfigError::Duration(s.to_string());

    let total = if let Ok(secs) = s.parse::<u64>() {
        Duration::from_secs(secs)
    } else {
        let mut total = Duration::ZERO;
        let mut rest = s;
        while !rest.is_empty() {
            let digits = rest
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(invalid)?;
            if digits == 0 {
                return Err(invalid());
            }
            let value: u64 = rest[..digits].parse().map_err(|_| invalid())?;
            rest = &rest[digits..];

            let unit_len = rest
                .find(|c: char| c.is_ascii_digit())
                .unwrap_or(rest.len());
            let part = match &rest[..unit_len] {
                "ms" => Duration::from_millis(value),
                "s" => Duration::from_secs(value),
                "m" => Duration::from_secs(value.checked_mul(60).ok_or_else(invalid)?),
                "h" => Duration::from_secs(value.checked_mul(3600).ok_or_else(invalid)?),
                _ => return Err(invalid()),
            };
            rest = &rest[unit_len..];
            total = total.checked_add(part).ok_or_else(invalid)?;
        }
        total
    };

    if total.is_zero() {
        return Err(invalid());
    }
    Ok(total)
}
