//! slotwatchd — the appointment sniper daemon.
//!
//! Assembles the pieces:
//! - Settings (config file + flags)
//! - Browsing session
//! - Notifier (terminal bell + webhook)
//! - Check loop
//!
//! # Usage
//!
//! ```text
//! slotwatchd --interval 2m30s --config config.yaml --notify-window 5
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use slotwatch_browser::HttpBrowser;
use slotwatch_core::{Overrides, Settings, parse_duration};
use slotwatch_monitor::CheckLoop;
use slotwatch_notify::{Notifier, WebhookClient, appointment_found};

#[derive(Parser)]
#[command(name = "slotwatchd", about = "Watch the Berlin appointment calendar for open slots")]
struct Cli {
    /// Check interval (e.g. 20s, 1m, 2m30s). Defaults to the config file, then 1m.
    #[arg(long, value_parser = parse_interval)]
    interval: Option<Duration>,

    /// Path to the config file (YAML, or TOML with a .toml extension).
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Call the webhook on every check, not only when slots are found.
    #[arg(long)]
    always_call_webhook: bool,

    /// Notify for this many consecutive successes, then stay quiet for as many.
    #[arg(long, allow_negative_numbers = true)]
    notify_window: Option<i64>,
}

fn parse_interval(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,slotwatch=debug")),
        )
        .init();

    let cli = Cli::parse();

    let overrides = Overrides {
        interval: cli.interval,
        notify_window: cli.notify_window,
        always_notify: cli.always_call_webhook,
    };
    let settings = Settings::load(&cli.config, &overrides);

    run(settings).await
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    info!(
        interval = ?settings.interval,
        notify_window = settings.notify_window,
        always_notify = settings.always_notify,
        "slotwatch starting"
    );

    // ── Initialize collaborators ───────────────────────────────

    let browser = HttpBrowser::berlin()?;
    let message = appointment_found(browser.entry_url().as_str());
    info!(page = %browser.target_url(), "browsing session ready");

    let notifier = Notifier::new(settings.webhook_url.clone(), WebhookClient::new()?);

    let mut check_loop = CheckLoop::new(browser, Arc::new(notifier), &settings, message);

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let signal = shutdown_signal().await;
        info!(%signal, "received signal, shutting down");
        let _ = shutdown_tx.send(true);
    });

    check_loop.run(shutdown_rx).await;

    info!("slotwatch stopped");
    Ok(())
}

/// Wait for Ctrl-C or, on unix, SIGTERM. Returns the signal name.
async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "failed to install Ctrl-C handler");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}
