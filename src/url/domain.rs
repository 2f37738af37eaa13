use url::Url;

/// Default sitemap location relative to a site's base domain
pub const DEFAULT_SITEMAP_PATH: &str = "/sitemap.xml";

/// Returns `scheme://host[:port]` for a URL
///
/// # Arguments
///
/// * `url` - The URL to extract the base domain from
///
/// # Returns
///
/// * `Some(String)` - The base domain, without a trailing slash
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkmend::url::base_domain;
///
/// let url = Url::parse("https://ex.com/blog/post?x=1").unwrap();
/// assert_eq!(base_domain(&url), Some("https://ex.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/a").unwrap();
/// assert_eq!(base_domain(&url), Some("http://127.0.0.1:8080".to_string()));
/// ```
pub fn base_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Returns the first label of the host when the host contains a dot
///
/// This is the locale hint used by the matcher: `de.ex.com` yields `de`,
/// while a dotless host such as `localhost` yields an empty string.
pub fn locale_token(url: &Url) -> String {
    match url.host_str() {
        Some(host) if host.contains('.') => host.split('.').next().unwrap_or("").to_string(),
        _ => String::new(),
    }
}

/// Resolves the sitemap URL to consult for a site
///
/// * No override: `base + "/sitemap.xml"`
/// * Override starting with `/`: appended to `base`
/// * Absolute `http(s)` override: used unchanged
/// * Anything else: joined to `base` with a single `/`
///
/// # Examples
///
/// ```
/// use linkmend::url::resolve_sitemap_url;
///
/// let base = "https://ex.com";
/// assert_eq!(resolve_sitemap_url(base, None), "https://ex.com/sitemap.xml");
/// assert_eq!(resolve_sitemap_url(base, Some("/sm.xml")), "https://ex.com/sm.xml");
/// assert_eq!(resolve_sitemap_url(base, Some("sm.xml")), "https://ex.com/sm.xml");
/// assert_eq!(
///     resolve_sitemap_url(base, Some("https://cdn.ex.com/sm.xml")),
///     "https://cdn.ex.com/sm.xml"
/// );
/// ```
pub fn resolve_sitemap_url(base: &str, location: Option<&str>) -> String {
    match location {
        None => format!("{}{}", base, DEFAULT_SITEMAP_PATH),
        Some(path) if path.starts_with('/') => format!("{}{}", base, path),
        Some(absolute) if is_absolute_http(absolute) => absolute.to_string(),
        Some(relative) => format!("{}/{}", base, relative),
    }
}

fn is_absolute_http(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
