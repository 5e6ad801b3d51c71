use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use checklink::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts the authority (`host` or `host:port`) from a URL
///
/// Default ports are omitted, so `https://example.com:443/` and
/// `https://example.com/` share the authority `example.com`. This is the
/// key the crawler compares to decide whether a link stays on the site.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use checklink::url::extract_authority;
///
/// let url = Url::parse("http://127.0.0.1:8080/a").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("https://Example.com/a").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Returns true if the URL's authority equals `authority`
pub fn same_authority(url: &Url, authority: &str) -> bool {
    extract_authority(url).map_or(false, |a| a == authority)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_domain_ignores_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_authority_keeps_explicit_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com:8080".to_string()));
    }

    #[test]
    fn test_authority_drops_default_port() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_authority() {
        let url = Url::parse("https://example.com/about?lang=fr").unwrap();
        assert!(same_authority(&url, "example.com"));
        assert!(!same_authority(&url, "other.example"));
        assert!(!same_authority(&url, "sub.example.com"));
    }

    #[test]
    fn test_different_ports_are_different_sites() {
        let url = Url::parse("http://127.0.0.1:4000/").unwrap();
        assert!(!same_authority(&url, "127.0.0.1:5000"));
    }
}
