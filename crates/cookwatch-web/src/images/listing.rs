use std::time::Duration;

use tracing::debug;

use crate::images::{ImageSource, is_image_file};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Scrapes `{base_url}/{session}/`, an HTML directory index served by the
/// image server, for links to image files.
#[derive(Clone)]
pub struct DirectoryListing {
    base_url: String,
    agent: ureq::Agent,
}

impl DirectoryListing {
    pub fn new(base_url: impl Into<String>, read_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(read_timeout)
            .build();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn listing_url(&self, session_number: i64) -> String {
        format!("{}/{session_number}/", self.base_url.trim_end_matches('/'))
    }
}

impl ImageSource for DirectoryListing {
    fn list_images(&self, session_number: i64) -> Result<Vec<String>, String> {
        let url = self.listing_url(session_number);
        let body = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| format!("GET {url}: {e}"))?
            .into_string()
            .map_err(|e| format!("read listing body from {url}: {e}"))?;
        let links = image_links(&url, &body);
        debug!(session_number, %url, images = links.len(), "scraped image listing");
        Ok(links)
    }
}

/// Image links in `html`, resolved against `listing_url`, in document order.
pub fn image_links(listing_url: &str, html: &str) -> Vec<String> {
    anchor_hrefs(html)
        .into_iter()
        .filter(|href| is_image_file(href))
        .map(|href| resolve(listing_url, &href))
        .collect()
}

fn resolve(listing_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_owned();
    }
    if let Some(path) = href.strip_prefix('/') {
        return format!("{}/{path}", origin(listing_url));
    }
    format!("{listing_url}{href}")
}

fn origin(url: &str) -> &str {
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[authority_start..].find('/') {
        Some(i) => &url[..authority_start + i],
        None => url,
    }
}

/// `href` values of every `<a>` element. Only as much HTML as a directory
/// index needs: quoted or bare attribute values, `&amp;` decoding.
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let mut hrefs = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = lower[cursor..].find("<a") {
        let start = cursor + offset + 2;
        let Some(end) = lower[start..].find('>').map(|i| start + i) else {
            break;
        };
        cursor = end + 1;
        if !lower[start..end].starts_with(|c: char| c.is_ascii_whitespace()) {
            continue;
        }
        if let Some(href) = href_attribute(&html[start..end], &lower[start..end]) {
            hrefs.push(href);
        }
    }
    hrefs
}

fn href_attribute(tag: &str, lower: &str) -> Option<String> {
    let mut search = 0;
    while let Some(offset) = lower[search..].find("href") {
        let name_start = search + offset;
        let name_end = name_start + "href".len();
        search = name_end;
        if !lower[..name_start].ends_with(|c: char| c.is_ascii_whitespace()) {
            continue;
        }
        let Some(rest) = tag[name_end..].trim_start().strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();
        let value = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &rest[1..];
                &body[..body.find(quote)?]
            }
            Some(_) => rest.split_ascii_whitespace().next()?,
            None => return None,
        };
        return Some(value.replace("&amp;", "&"));
    }
    None
}
