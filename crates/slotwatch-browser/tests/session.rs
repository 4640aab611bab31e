//! Two-page fetch against an in-process site.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect};
use axum::routing::get;

use slotwatch_browser::HttpBrowser;
use slotwatch_core::{BrowseError, Browser, Outcome, classify};

const CALENDAR: &str = r#"<html><body id="dayselect">
<h1>Terminvereinbarung</h1>
<h2> Bitte wählen Sie ein Datum </h2>
</body></html>"#;

const NO_SESSION: &str = r#"<html><body id="">
<h1>Sitzung abgelaufen</h1>
</body></html>"#;

const TAKEN: &str = r#"<html><body id="taken">
<h1>Leider sind aktuell keine Termine für ihre Auswahl verfügbar.</h1>
</body></html>"#;

/// Site whose calendar is only shown to clients that visited `/entry` first.
async fn spawn_site(entry_hits: Arc<AtomicUsize>) -> SocketAddr {
    let app = Router::new()
        .route(
            "/entry",
            get(move || {
                let hits = entry_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (
                        [(header::SET_COOKIE, "sid=42; Path=/")],
                        Html("<html><body id=\"service\"><h1>Personalausweis</h1></body></html>"),
                    )
                }
            }),
        )
        .route(
            "/calendar",
            get(|headers: HeaderMap| async move {
                let has_session = headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|c| c.contains("sid=42"));
                if has_session {
                    Html(CALENDAR)
                } else {
                    Html(NO_SESSION)
                }
            }),
        )
        .route("/taken", get(|| async { Html(TAKEN) }))
        .route(
            "/busy",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, Html(CALENDAR)).into_response() }),
        )
        .route("/moved", get(|| async { Redirect::temporary("/calendar") }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn browser(addr: SocketAddr, target: &str) -> HttpBrowser {
    HttpBrowser::new(
        &format!("http://{addr}/entry"),
        &format!("http://{addr}{target}"),
    )
    .unwrap()
}

#[tokio::test]
async fn fetch_reads_calendar_with_session() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_site(hits.clone()).await;
    let mut browser = browser(addr, "/calendar");

    let obs = browser.fetch_observation().await.unwrap();
    assert_eq!(obs.http_status, 200);
    assert_eq!(obs.page_marker, "dayselect");
    assert_eq!(obs.heading_text, "Bitte wählen Sie ein Datum");
    assert_eq!(obs.current_location, format!("http://{addr}/calendar"));
    assert_eq!(classify(&obs), Outcome::Success);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn session_is_reused_across_fetches() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_site(hits.clone()).await;
    let mut browser = browser(addr, "/calendar");

    for _ in 0..3 {
        let obs = browser.fetch_observation().await.unwrap();
        assert_eq!(obs.page_marker, "dayselect");
    }
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn taken_page_is_known_non_success() {
    let addr = spawn_site(Arc::new(AtomicUsize::new(0))).await;
    let obs = browser(addr, "/taken").fetch().await.unwrap();
    assert_eq!(obs.page_marker, "taken");
    assert_eq!(classify(&obs), Outcome::KnownNonSuccess);
}

#[tokio::test]
async fn error_status_is_captured_not_raised() {
    let addr = spawn_site(Arc::new(AtomicUsize::new(0))).await;
    let obs = browser(addr, "/busy").fetch().await.unwrap();
    assert_eq!(obs.http_status, 429);
    assert_eq!(obs.page_marker, "dayselect");
    assert_eq!(classify(&obs), Outcome::KnownNonSuccess);
}

#[tokio::test]
async fn redirect_reports_final_location() {
    let addr = spawn_site(Arc::new(AtomicUsize::new(0))).await;
    let obs = browser(addr, "/moved").fetch().await.unwrap();
    assert_eq!(obs.http_status, 200);
    assert_eq!(obs.current_location, format!("http://{addr}/calendar"));
}

#[tokio::test]
async fn unknown_route_is_unknown_page() {
    let addr = spawn_site(Arc::new(AtomicUsize::new(0))).await;
    let obs = browser(addr, "/nowhere").fetch().await.unwrap();
    assert_eq!(obs.http_status, 404);
    assert_eq!(classify(&obs), Outcome::UnknownNonSuccess);
}

#[tokio::test]
async fn unreachable_site_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = browser(addr, "/calendar").fetch().await.unwrap_err();
    assert!(matches!(err, BrowseError::Request { .. }));
    assert!(!err.is_cancelled());
}

#[test]
fn invalid_url_is_rejected() {
    let err = HttpBrowser::new("not a url", "http://127.0.0.1/").err().unwrap();
    assert!(matches!(err, BrowseError::Url(_)));
}

#[test]
fn berlin_session_builds() {
    let browser = HttpBrowser::berlin().unwrap();
    assert_eq!(browser.entry_url().host_str(), Some("service.berlin.de"));
    assert!(browser.target_url().as_str().contains("tag.php"));
}
