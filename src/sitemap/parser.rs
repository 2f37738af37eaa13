//! Sitemap XML parsing
//!
//! Extracts `<url><loc>` and `<sitemap><loc>` values from sitemap documents.
//! Elements are matched by local name, so documents that bind the sitemap
//! 0.9 namespace to a prefix (or omit it) parse the same way.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Locations extracted from a single sitemap document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapDocument {
    /// Page URLs from `<url><loc>`, in document order
    pub urls: Vec<String>,

    /// Child sitemap URLs from `<sitemap><loc>`, in document order
    pub sitemaps: Vec<String>,
}

impl SitemapDocument {
    /// True if the document lists child sitemaps but no page URLs
    pub fn is_index(&self) -> bool {
        self.urls.is_empty() && !self.sitemaps.is_empty()
    }

    /// Total number of `<loc>` entries found
    pub fn total_items(&self) -> usize {
        self.urls.len() + self.sitemaps.len()
    }
}

/// Which parent a `<loc>` element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocParent {
    Url,
    Sitemap,
}

/// Parses a sitemap or sitemap index document
///
/// # Arguments
///
/// * `xml` - The raw XML text
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - Locations found (possibly none)
/// * `Err(String)` - The document is not well-formed XML
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document = SitemapDocument::default();
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<(LocParent, String)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == "loc" {
                    current = match stack.last().map(String::as_str) {
                        Some("url") => Some((LocParent::Url, String::new())),
                        Some("sitemap") => Some((LocParent::Sitemap, String::new())),
                        _ => None,
                    };
                }
                stack.push(name);
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if name == "loc" {
                    if let Some((parent, text)) = current.take() {
                        let loc = text.trim();
                        if !loc.is_empty() {
                            match parent {
                                LocParent::Url => document.urls.push(loc.to_string()),
                                LocParent::Sitemap => document.sitemaps.push(loc.to_string()),
                            }
                        }
                    }
                }
                stack.pop();
            }
            Ok(Event::Text(e)) => {
                if let Some((_, text)) = current.as_mut() {
                    let unescaped = e
                        .unescape()
                        .map_err(|err| format!("XML parse error: {}", err))?;
                    text.push_str(&unescaped);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML parse error at position {}: {}",
                    reader.error_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    Ok(document)
}
