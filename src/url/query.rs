use std::borrow::Cow;
use url::{form_urlencoded, Url};

/// Returns the first non-empty value of a query parameter
///
/// # Examples
///
/// ```
/// use url::Url;
/// use checklink::url::query_param;
///
/// let url = Url::parse("https://example.com/?lang=fr&page=2").unwrap();
/// assert_eq!(query_param(&url, "lang"), Some("fr".to_string()));
/// assert_eq!(query_param(&url, "missing"), None);
/// ```
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    first_value(url.query_pairs(), name)
}

/// Returns the first non-empty value of a query parameter written in a raw href
///
/// Only the href's own query counts; nothing is inherited from the page it
/// appears on, so `#top` or an empty href never carries a parameter.
///
/// # Examples
///
/// ```
/// use checklink::url::href_query_param;
///
/// assert_eq!(href_query_param("/?lang=fr#nav", "lang"), Some("fr".to_string()));
/// assert_eq!(href_query_param("#", "lang"), None);
/// ```
pub fn href_query_param(href: &str, name: &str) -> Option<String> {
    let without_fragment = href.split('#').next().unwrap_or_default();
    let (_, query) = without_fragment.split_once('?')?;
    first_value(form_urlencoded::parse(query.as_bytes()), name)
}

fn first_value<'a>(
    pairs: impl Iterator<Item = (Cow<'a, str>, Cow<'a, str>)>,
    name: &str,
) -> Option<String> {
    pairs
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.trim().to_string())
        .find(|value| !value.is_empty())
}
