//! Check loop — one fetch/classify/notify cycle per interval until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use slotwatch_core::{BrowseError, Browser, NotifyThrottle, Observation, Outcome, PageRules, Settings};
use slotwatch_notify::NotificationSink;

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, no tick started yet.
    Idle,
    /// Fetching and deciding.
    Checking,
    /// Waiting for the next tick.
    Sleeping,
    /// Stopped by cancellation. Absorbing.
    Terminated,
}

/// What one completed tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: Outcome,
    /// The full alert (local cue and webhook) was raised.
    pub alerted: bool,
    /// Outbound delivery was handed to the sink without the local cue,
    /// because always-notify is on. Whether a webhook is configured is up to
    /// the sink; without one this is a no-op.
    pub endpoint_called: bool,
}

impl TickReport {
    fn quiet(outcome: Outcome) -> Self {
        Self {
            outcome,
            alerted: false,
            endpoint_called: false,
        }
    }
}

/// Drives the browser, classifier, throttle and sink.
pub struct CheckLoop<B> {
    browser: B,
    sink: Arc<dyn NotificationSink>,
    throttle: NotifyThrottle,
    rules: PageRules,
    interval: Duration,
    always_notify: bool,
    message: String,
    state: LoopState,
}

impl<B: Browser> CheckLoop<B> {
    /// Create a loop from resolved settings. `message` is the alert body.
    pub fn new(
        browser: B,
        sink: Arc<dyn NotificationSink>,
        settings: &Settings,
        message: impl Into<String>,
    ) -> Self {
        Self {
            browser,
            sink,
            throttle: NotifyThrottle::new(settings.notify_window),
            rules: PageRules::default(),
            interval: settings.interval,
            always_notify: settings.always_notify,
            message: message.into(),
            state: LoopState::Idle,
        }
    }

    /// Replace the classification rules.
    pub fn with_rules(mut self, rules: PageRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn throttle(&self) -> &NotifyThrottle {
        &self.throttle
    }

    /// Run ticks until shutdown is signalled or the browser reports cancellation.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval = ?self.interval,
            notify_window = self.throttle.window(),
            always_notify = self.always_notify,
            "check loop starting"
        );

        while self.tick(&mut shutdown).await.is_some() {
            self.state = LoopState::Sleeping;
            debug!(interval = ?self.interval, "sleeping until next check");

            let stop = tokio::select! {
                biased;
                _ = shutdown_requested(&mut shutdown) => true,
                _ = tokio::time::sleep(self.interval) => false,
            };
            if stop {
                break;
            }
        }

        self.state = LoopState::Terminated;
        info!("check loop stopped");
    }

    /// Run a single check. Returns `None` if it was cancelled.
    ///
    /// A tick never starts once shutdown has been requested: the browser is
    /// not called and the loop moves straight to `Terminated`.
    pub async fn tick(&mut self, shutdown: &mut watch::Receiver<bool>) -> Option<TickReport> {
        if self.state == LoopState::Terminated {
            return None;
        }
        if shutdown_pending(shutdown) {
            debug!("shutdown requested, not starting a check");
            self.state = LoopState::Terminated;
            return None;
        }
        self.state = LoopState::Checking;
        info!("--- checking appointments ---");

        // The browser is only called once this future is first polled.
        let browser = &mut self.browser;
        let fetch = async move { browser.fetch_observation().await };
        let fetched = tokio::select! {
            biased;
            _ = shutdown_requested(shutdown) => None,
            result = fetch => Some(result),
        };

        let Some(fetched) = fetched else {
            debug!("check aborted by shutdown");
            self.state = LoopState::Terminated;
            return None;
        };
        if fetched.as_ref().is_err_and(|e| e.is_cancelled()) {
            debug!("browser reported cancellation");
            self.state = LoopState::Terminated;
            return None;
        }

        let outcome = self.rules.classify_fetch(&fetched);
        Some(self.decide(outcome, &fetched).await)
    }

    async fn decide(
        &mut self,
        outcome: Outcome,
        fetched: &Result<Observation, BrowseError>,
    ) -> TickReport {
        let obs = match fetched {
            Ok(obs) => obs,
            Err(e) => {
                warn!(error = %e, retry_in = ?self.interval, "check failed");
                self.throttle.on_failure();
                return TickReport::quiet(Outcome::TransportError);
            }
        };

        info!(
            status = obs.http_status,
            marker = %obs.page_marker,
            url = %obs.current_location,
            "page loaded"
        );
        if !obs.heading_text.is_empty() {
            info!(heading = %obs.heading_text, "page heading");
        }

        match outcome {
            Outcome::Success => {
                info!("!!! APPOINTMENT FOUND, slots may be available !!!");
                if self.throttle.on_success() {
                    self.sink.notify(&self.message).await;
                    TickReport {
                        outcome,
                        alerted: true,
                        endpoint_called: false,
                    }
                } else {
                    info!(
                        consecutive_successes = self.throttle.consecutive_successes(),
                        "notification suppressed"
                    );
                    TickReport::quiet(outcome)
                }
            }
            Outcome::KnownNonSuccess | Outcome::UnknownNonSuccess => {
                if outcome == Outcome::KnownNonSuccess {
                    info!(retry_in = ?self.interval, "no slots available");
                } else {
                    warn!(marker = %obs.page_marker, retry_in = ?self.interval, "unexpected page");
                }
                self.throttle.on_failure();

                if self.always_notify {
                    self.sink.call_endpoint(&self.message).await;
                    TickReport {
                        outcome,
                        alerted: false,
                        endpoint_called: true,
                    }
                } else {
                    TickReport::quiet(outcome)
                }
            }
            // Only produced for failed fetches, handled above.
            Outcome::TransportError => {
                self.throttle.on_failure();
                TickReport::quiet(outcome)
            }
        }
    }
}

/// Whether shutdown was already requested, or the sender is gone.
fn shutdown_pending(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}

/// Resolves once shutdown has been requested or the sender is gone.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stop| *stop).await;
}
