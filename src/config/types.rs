use serde::Deserialize;

/// Main configuration structure for Linkmend
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Batch checking behavior
#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Maximum number of URL checks in flight at once
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: usize,

    /// Per-request timeout for URL health checks (seconds)
    #[serde(rename = "request-timeout", default = "default_timeout")]
    pub request_timeout: u64,

    /// Per-request timeout for sitemap fetches (seconds)
    #[serde(rename = "sitemap-timeout", default = "default_timeout")]
    pub sitemap_timeout: u64,

    /// Sitemap location override: an absolute URL, or a path resolved
    /// against the failing URL's domain
    #[serde(rename = "sitemap-url", default)]
    pub sitemap_url: Option<String>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            request_timeout: default_timeout(),
            sitemap_timeout: default_timeout(),
            sitemap_url: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the checker
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the checker
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the checker
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

fn default_max_workers() -> usize {
    10
}

fn default_timeout() -> u64 {
    10
}

fn default_crawler_name() -> String {
    "linkmend".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
