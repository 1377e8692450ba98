//! Document parsers for discovery
//!
//! This module handles:
//! - Extracting outbound anchor targets from HTML pages
//! - Parsing sitemap and sitemap-index XML documents

use crate::url::is_skipped_href;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// `urlset/url/loc` entries: page URLs
    UrlSet(Vec<String>),

    /// `sitemapindex/sitemap/loc` entries: child sitemap URLs
    Index(Vec<String>),
}

impl SitemapDocument {
    /// Returns true if the document lists no entries
    pub fn is_empty(&self) -> bool {
        match self {
            Self::UrlSet(locs) | Self::Index(locs) => locs.is_empty(),
        }
    }
}

/// Extracts outbound anchor targets from an HTML page
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags, resolved against the page URL (root-relative,
///   absolute, and document-relative forms)
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - Fragment-only hrefs
/// - `javascript:`, `mailto:`, `tel:`, `ftp:` and `data:` links
/// - Anything that does not resolve to an http(s) URL
///
/// Links are returned in document order; duplicates are left for the caller.
///
/// # Example
///
/// ```
/// use a11y_sweep::discovery::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="mailto:x@example.com">Mail</a>"#;
/// let page = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &page);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://example.com/about");
/// ```
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .collect()
}

/// Resolves an href against the page URL, returning `None` if it is excluded
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    if is_skipped_href(href) {
        return None;
    }

    let absolute = page_url.join(href.trim()).ok()?;
    if absolute.scheme() == "http" || absolute.scheme() == "https" {
        Some(absolute)
    } else {
        None
    }
}

/// Parses a sitemap or sitemap index document
///
/// Returns `None` when the content is neither a `urlset` nor a `sitemapindex`.
///
/// # Example
///
/// ```
/// use a11y_sweep::discovery::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<?xml version="1.0"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/</loc></url>
/// </urlset>"#;
/// assert_eq!(
///     parse_sitemap(xml),
///     Some(SitemapDocument::UrlSet(vec!["https://example.com/".to_string()]))
/// );
/// ```
pub fn parse_sitemap(xml: &str) -> Option<SitemapDocument> {
    // html5ever tolerates arbitrary tag names, which is all a sitemap needs
    let document = Html::parse_document(xml);

    if has_element(&document, "sitemapindex") {
        return Some(SitemapDocument::Index(collect_locs(
            &document,
            "sitemapindex sitemap loc",
        )));
    }

    if has_element(&document, "urlset") {
        return Some(SitemapDocument::UrlSet(collect_locs(
            &document,
            "urlset url loc",
        )));
    }

    None
}

fn has_element(document: &Html, name: &str) -> bool {
    Selector::parse(name)
        .map(|selector| document.select(&selector).next().is_some())
        .unwrap_or(false)
}

fn collect_locs(document: &Html, selector: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(loc_text)
        .filter(|loc| !loc.is_empty())
        .collect()
}

/// Text of a `loc` element, including `<![CDATA[...]]>` sections
///
/// Outside foreign content html5ever reads a CDATA section as a comment
/// whose data is `[CDATA[...]]`.
fn loc_text(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Text(chunk) => text.push_str(chunk),
            Node::Comment(comment) => {
                if let Some(inner) = comment
                    .strip_prefix("[CDATA[")
                    .and_then(|rest| rest.strip_suffix("]]"))
                {
                    text.push_str(inner);
                }
            }
            _ => {}
        }
    }
    text.trim().to_string()
}
