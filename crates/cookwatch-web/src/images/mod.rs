//! Session image lookup. The production source scrapes the image server's
//! directory listing; everything above it only sees [`ImageSource`].

use std::collections::HashMap;

use tracing::warn;

mod listing;

pub use listing::{DirectoryListing, anchor_hrefs, image_links};

pub const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

pub trait ImageSource: Send + Sync {
    /// Absolute image URLs for a session, in listing order.
    fn list_images(&self, session_number: i64) -> Result<Vec<String>, String>;
}

pub fn is_image_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Every image for the session; lookup failures degrade to an empty list.
pub fn all_image_urls(source: &dyn ImageSource, session_number: i64) -> Vec<String> {
    source.list_images(session_number).unwrap_or_else(|error| {
        warn!(%error, session_number, "failed to list session images");
        Vec::new()
    })
}

/// The representative thumbnail is the last image in the listing.
pub fn thumbnail_of(urls: &[String]) -> Option<&str> {
    urls.last().map(String::as_str)
}

pub fn thumbnail_image_url(source: &dyn ImageSource, session_number: i64) -> Option<String> {
    thumbnail_of(&all_image_urls(source, session_number)).map(str::to_owned)
}

/// Image lookups for one page render. Built per request and dropped with it.
#[derive(Debug, Default)]
pub struct SessionImages {
    pub all: HashMap<i64, Vec<String>>,
    pub thumbnails: HashMap<i64, Option<String>>,
}

impl SessionImages {
    /// Lists each session once, sequentially.
    pub fn collect(source: &dyn ImageSource, session_numbers: &[i64]) -> Self {
        let mut images = Self::default();
        for &session_number in session_numbers {
            if images.all.contains_key(&session_number) {
                continue;
            }
            let urls = all_image_urls(source, session_number);
            images
                .thumbnails
                .insert(session_number, thumbnail_of(&urls).map(str::to_owned));
            images.all.insert(session_number, urls);
        }
        images
    }

    pub fn thumbnail(&self, session_number: i64) -> Option<&str> {
        self.thumbnails
            .get(&session_number)
            .and_then(|url| url.as_deref())
    }

    pub fn all_for(&self, session_number: i64) -> &[String] {
        self.all
            .get(&session_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Canned listings keyed by session; unknown sessions fail like an
    /// unreachable image server.
    #[derive(Default)]
    pub(crate) struct FakeImages {
        pub(crate) listings: HashMap<i64, Vec<String>>,
        pub(crate) calls: Mutex<Vec<i64>>,
    }

    impl FakeImages {
        pub(crate) fn with(mut self, session_number: i64, urls: &[&str]) -> Self {
            self.listings.insert(
                session_number,
                urls.iter().map(|url| (*url).to_owned()).collect(),
            );
            self
        }
    }

    impl ImageSource for FakeImages {
        fn list_images(&self, session_number: i64) -> Result<Vec<String>, String> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(session_number);
            }
            self.listings
                .get(&session_number)
                .cloned()
                .ok_or_else(|| format!("connection refused for session {session_number}"))
        }
    }

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image_file("IMG_0001.JPG"));
        assert!(is_image_file("frame.webp"));
        assert!(is_image_file("a.jpeg"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("../"));
        assert!(!is_image_file("jpg"));
    }

    #[test]
    fn thumbnail_is_last_listed_image() {
        let fake = FakeImages::default().with(7, &["http://img/7/a.jpg", "http://img/7/b.png"]);
        assert_eq!(
            thumbnail_image_url(&fake, 7).as_deref(),
            Some("http://img/7/b.png")
        );
        assert_eq!(all_image_urls(&fake, 7).len(), 2);
    }

    #[test]
    fn failures_degrade_to_empty() {
        let fake = FakeImages::default();
        assert!(all_image_urls(&fake, 3).is_empty());
        assert_eq!(thumbnail_image_url(&fake, 3), None);
    }

    #[test]
    fn collect_lists_each_session_once() {
        let fake = FakeImages::default()
            .with(1, &["http://img/1/x.jpg"])
            .with(2, &[]);
        let images = SessionImages::collect(&fake, &[1, 2, 1, 9]);

        assert_eq!(images.thumbnail(1), Some("http://img/1/x.jpg"));
        assert_eq!(images.thumbnail(2), None);
        assert_eq!(images.thumbnail(9), None);
        assert!(images.all_for(9).is_empty());
        assert_eq!(images.all_for(1).len(), 1);
        let calls = fake.calls.lock().expect("calls lock").clone();
        assert_eq!(calls, vec![1, 2, 9]);
    }
}
