//! Reading the page marker and heading out of an HTML document.

use scraper::{Html, Selector};

/// What we read from one rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRead {
    /// `id` attribute of `<body>`, empty if absent.
    pub marker: String,
    /// Text of the first `h2`, or of the first `h1` if there is no usable `h2`. Trimmed.
    pub heading: String,
}

impl PageRead {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let marker = first_element_attr(&document, "body", "id").unwrap_or_default();
        let heading = first_text(&document, "h2")
            .or_else(|| first_text(&document, "h1"))
            .unwrap_or_default();

        Self { marker, heading }
    }
}

fn first_element_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
