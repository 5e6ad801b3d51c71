//! HTML view over fetched pages
//!
//! This module wraps fetched bytes into a queryable document and extracts:
//! - Anchors with their href, visible text and title attribute
//! - Page title, meta description and first paragraph
//! - Plain text with script/style content removed
//! - Matches for arbitrary CSS selectors
//!
//! `scraper::Html` is not `Send`, so callers build an [`HtmlView`], pull out
//! owned data and drop it before the next `.await`.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements whose text never counts as page content
const NON_CONTENT_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// An `<a href>` element found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Raw href attribute value
    pub href: String,
    /// Visible text with whitespace collapsed
    pub text: String,
    /// `title` attribute, if any
    pub title: Option<String>,
}

impl Anchor {
    /// Label used for reports: visible text, else title, else the href itself
    pub fn label(&self) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }
        match &self.title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => self.href.clone(),
        }
    }

    /// Resolves the href against `base`, keeping only HTTP(S) results
    pub fn resolve(&self, base: &Url) -> Option<Url> {
        resolve_link(&self.href, base)
    }
}

/// Queryable document built from fetched bytes
pub struct HtmlView {
    document: Html,
}

impl HtmlView {
    /// Parses raw bytes; invalid UTF-8 is replaced rather than rejected
    pub fn parse(bytes: &[u8]) -> Self {
        Self::parse_str(&String::from_utf8_lossy(bytes))
    }

    /// Parses an HTML string
    ///
    /// # Example
    ///
    /// ```
    /// use checklink::crawler::HtmlView;
    ///
    /// let view = HtmlView::parse_str(r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#);
    /// assert_eq!(view.title(), Some("Test".to_string()));
    /// assert_eq!(view.anchors().len(), 1);
    /// ```
    pub fn parse_str(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// All `<a>` elements carrying an `href`, in document order
    pub fn anchors(&self) -> Vec<Anchor> {
        self.select_anchors("a[href]")
    }

    /// Anchors matched by a CSS selector; an invalid selector matches nothing
    pub fn select_anchors(&self, selector: &str) -> Vec<Anchor> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };

        self.document
            .select(&selector)
            .filter_map(|element| {
                let href = element.value().attr("href")?;
                Some(Anchor {
                    href: href.trim().to_string(),
                    text: element_text(&element),
                    title: element
                        .value()
                        .attr("title")
                        .map(|t| t.trim().to_string()),
                })
            })
            .collect()
    }

    /// Text of every element matched by a CSS selector
    pub fn select_text(&self, selector: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };

        self.document
            .select(&selector)
            .map(|element| element_text(&element))
            .collect()
    }

    /// The page title (from the `<title>` tag)
    pub fn title(&self) -> Option<String> {
        self.select_text("title")
            .into_iter()
            .next()
            .filter(|s| !s.is_empty())
    }

    /// Content of `<meta name="description">`, if present and non-empty
    pub fn meta_description(&self) -> Option<String> {
        let selector = Selector::parse("meta[name]").ok()?;

        self.document
            .select(&selector)
            .filter(|element| {
                element
                    .value()
                    .attr("name")
                    .map_or(false, |name| name.eq_ignore_ascii_case("description"))
            })
            .filter_map(|element| element.value().attr("content"))
            .map(collapse_whitespace)
            .find(|content| !content.is_empty())
    }

    /// Text of the first `<p>` element
    pub fn first_paragraph(&self) -> Option<String> {
        self.select_text("p").into_iter().next()
    }

    /// Visible text of the whole document, script/style content removed
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();

        for node in self.document.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |e| NON_CONTENT_ELEMENTS.contains(&e.name()))
            });

            if !hidden {
                parts.push(&**text);
            }
        }

        collapse_whitespace(&parts.join(" "))
    }
}

/// Collected text of an element with whitespace collapsed
fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - Empty hrefs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution (`javascript:`, `mailto:`, `tel:`, `data:`)
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if crate::url::is_http_like(&absolute_url) => Some(absolute_url),
        _ => None,
    }
}
