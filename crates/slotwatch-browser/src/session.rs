//! The persistent browsing session.

use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use slotwatch_core::{BoxFuture, BrowseError, Browser, Observation};

use crate::page::PageRead;
use crate::status::StatusCell;

/// Service page for the appointment type. Visiting it sets up the session.
pub const ENTRY_URL: &str = "https://service.berlin.de/dienstleistung/351180/";

/// Calendar page for the monitored office.
pub const TARGET_URL: &str = "https://service.berlin.de/terminvereinbarung/termin/tag.php?id=4126&anliegen[]=351180&termin=1&dienstleister=351636&anliegen[]=351180";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 10;

/// Cookie-carrying HTTP session that visits the entry page, then the target.
pub struct HttpBrowser {
    client: reqwest::Client,
    entry_url: Url,
    target_url: Url,
}

impl HttpBrowser {
    pub fn new(entry_url: &str, target_url: &str) -> Result<Self, BrowseError> {
        let entry_url = Url::parse(entry_url).map_err(|_| BrowseError::Url(entry_url.to_string()))?;
        let target_url =
            Url::parse(target_url).map_err(|_| BrowseError::Url(target_url.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("de-DE,de;q=0.9,en;q=0.5"));

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| BrowseError::Request {
                url: entry_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            entry_url,
            target_url,
        })
    }

    /// Session against the Berlin service portal.
    pub fn berlin() -> Result<Self, BrowseError> {
        Self::new(ENTRY_URL, TARGET_URL)
    }

    pub fn entry_url(&self) -> &Url {
        &self.entry_url
    }

    pub fn target_url(&self) -> &Url {
        &self.target_url
    }

    /// Visit both pages and read the target.
    pub async fn fetch(&self) -> Result<Observation, BrowseError> {
        let status = StatusCell::new();

        self.navigate(&self.entry_url, &status).await?;
        let (location, html) = self.navigate(&self.target_url, &status).await?;

        let page = PageRead::parse(&html);
        Ok(Observation {
            http_status: status.load(),
            page_marker: page.marker,
            heading_text: page.heading,
            current_location: location,
        })
    }

    /// Load one document, recording its status. Returns the final URL and body.
    ///
    /// Error statuses are not errors here: the page is still read and classified.
    async fn navigate(&self, url: &Url, status: &StatusCell) -> Result<(String, String), BrowseError> {
        let request_error = |e: reqwest::Error| BrowseError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        status.record(resp.status().as_u16());
        let location = resp.url().to_string();
        debug!(%url, status = resp.status().as_u16(), %location, "document loaded");

        let body = resp.text().await.map_err(request_error)?;
        Ok((location, body))
    }
}

impl Browser for HttpBrowser {
    fn fetch_observation(&mut self) -> BoxFuture<'_, Result<Observation, BrowseError>> {
        Box::pin(self.fetch())
    }
}
