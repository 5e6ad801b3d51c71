//! Language variant detection
//!
//! Multi-language sites usually expose a switcher whose anchors carry a
//! `lang` query parameter. Each detected variant is crawled independently.

use crate::crawler::HtmlView;
use crate::url::{href_query_param, query_param};
use serde::Serialize;
use url::Url;

/// Language switcher conventions, tried in order
///
/// The first selector that matches any anchor wins; later selectors are not
/// consulted even if the winner yields no usable language code.
pub const LANGUAGE_SELECTORS: &[&str] = &[
    r#"a[href*="lang="]"#,
    ".language-switcher a",
    ".lang-switcher a",
    ".qtranxs_language_chooser a",
    ".language-selector a",
    r#"[class*="language"] a[href*="lang"]"#,
];

/// Query parameter carrying the language code
const LANG_PARAM: &str = "lang";

/// One localized edition of the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageVersion {
    /// Language code from the `lang` parameter, or `default`
    pub code: String,
    /// Human-readable name shown in the switcher
    pub display_name: String,
    /// Absolute URL the variant's crawl starts from
    pub entry_url: Url,
}

impl LanguageVersion {
    /// The variant used when no language switcher is found
    pub fn default_for(base_url: &Url) -> Self {
        Self {
            code: "default".to_string(),
            display_name: "Default".to_string(),
            entry_url: base_url.clone(),
        }
    }
}

/// Detects language variants from the homepage
///
/// # Detection Order
///
/// 1. First selector in [`LANGUAGE_SELECTORS`] with any match; each matching
///    anchor with a `lang` parameter becomes a variant (first code wins)
/// 2. The `lang` parameter of `base_url` itself
/// 3. A single `default` variant pointing at `base_url`
///
/// The returned list is never empty.
///
/// # Example
///
/// ```
/// use checklink::crawler::HtmlView;
/// use checklink::site::detect_languages;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/").unwrap();
/// let view = HtmlView::parse_str(r#"<a href="?lang=en">English</a><a href="?lang=fr">Français</a>"#);
/// let languages = detect_languages(&view, &base);
/// assert_eq!(languages.len(), 2);
/// assert_eq!(languages[1].code, "fr");
/// ```
pub fn detect_languages(view: &HtmlView, base_url: &Url) -> Vec<LanguageVersion> {
    let mut languages: Vec<LanguageVersion> = Vec::new();

    if let Some((selector, anchors)) = LANGUAGE_SELECTORS
        .iter()
        .map(|selector| (selector, view.select_anchors(selector)))
        .find(|(_, anchors)| !anchors.is_empty())
    {
        tracing::debug!(
            "Language switcher matched {} ({} anchors)",
            selector,
            anchors.len()
        );

        for anchor in anchors {
            let Some(code) = href_query_param(&anchor.href, LANG_PARAM) else {
                continue;
            };

            let Ok(entry_url) = base_url.join(&anchor.href) else {
                tracing::warn!("Skipping unparsable language link {}", anchor.href);
                continue;
            };

            if languages.iter().any(|l| l.code == code) {
                continue;
            }

            let display_name = if !anchor.text.is_empty() {
                anchor.text.clone()
            } else {
                anchor
                    .title
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| code.clone())
            };

            languages.push(LanguageVersion {
                code,
                display_name,
                entry_url,
            });
        }
    }

    if languages.is_empty() {
        if let Some(code) = query_param(base_url, LANG_PARAM) {
            languages.push(LanguageVersion {
                display_name: code.to_uppercase(),
                code,
                entry_url: base_url.clone(),
            });
        }
    }

    if languages.is_empty() {
        languages.push(LanguageVersion::default_for(base_url));
    }

    languages
}
