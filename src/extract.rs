//! Extraction engine: three independent selection rules over a [`Document`].
//!
//! Each rule is a pure function of the tree. Results keep document order and
//! duplicates.

use std::thread;

use crate::dom::Document;

/// Links, paragraph text, and image sources scraped from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ScrapeData {
    /// `href` values of `<a>` elements that start with `http`.
    pub links: Vec<String>,
    /// Trimmed, non-empty text of `<p>` elements.
    pub texts: Vec<String>,
    /// `src` values of `<img>` elements, empty strings included.
    pub images: Vec<String>,
}

impl ScrapeData {
    /// True when no rule matched anything.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.texts.is_empty() && self.images.is_empty()
    }

    /// Number of entries across all three lists.
    pub fn total(&self) -> usize {
        self.links.len() + self.texts.len() + self.images.len()
    }
}

/// Prefix an `href` needs to count as an outbound link.
///
/// Only the four characters are checked, so `httpfoo:` passes too.
const LINK_PREFIX: &str = "http";

/// `href` of every `<a>` element whose value starts with `http`.
pub fn extract_links(doc: &Document) -> Vec<String> {
    doc.elements_by_tag("a")
        .filter_map(|a| a.attribute("href"))
        .filter(|href| href.starts_with(LINK_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Text of every `<p>` element, trimmed, skipping blank paragraphs.
pub fn extract_texts(doc: &Document) -> Vec<String> {
    doc.elements_by_tag("p")
        .filter_map(|p| {
            let text = p.text_content();
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// `src` of every `<img>` element that has one, whatever its value.
pub fn extract_images(doc: &Document) -> Vec<String> {
    doc.elements_by_tag("img")
        .filter_map(|img| img.attribute("src"))
        .map(str::to_string)
        .collect()
}

/// Run all three rules.
pub fn extract(doc: &Document) -> ScrapeData {
    let data = ScrapeData {
        links: extract_links(doc),
        texts: extract_texts(doc),
        images: extract_images(doc),
    };
    tracing::debug!(
        links = data.links.len(),
        texts = data.texts.len(),
        images = data.images.len(),
        "extracted page data"
    );
    data
}

/// Run the three rules on scoped threads sharing the read-only tree.
///
/// Produces exactly what [`extract`] produces.
pub fn extract_parallel(doc: &Document) -> ScrapeData {
    thread::scope(|s| {
        let links = s.spawn(|| extract_links(doc));
        let images = s.spawn(|| extract_images(doc));
        let texts = extract_texts(doc);
        ScrapeData {
            links: join(links),
            texts,
            images: join(images),
        }
    })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
