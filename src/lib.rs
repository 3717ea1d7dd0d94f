//! # pagescrape
//!
//! Fetch one web page and pull three kinds of data out of its markup:
//!
//! - outbound links (`<a href>` values starting with `http`)
//! - paragraph text (`<p>` text, trimmed, blank paragraphs skipped)
//! - image sources (`<img src>` values, as written)
//!
//! ## Quick Start
//!
//! ```
//! let html = br#"<a href="http://x.com">A</a><a href="/local">B</a>
//!     <p> Hi there </p><p></p><img src="a.png"><img>"#;
//!
//! let data = pagescrape::scrape_bytes(html, None);
//! assert_eq!(data.links, ["http://x.com"]);
//! assert_eq!(data.texts, ["Hi there"]);
//! assert_eq!(data.images, ["a.png"]);
//! ```
//!
//! ## Fetching
//!
//! ```no_run
//! use pagescrape::{FetchOptions, scrape_url, save_report};
//!
//! let data = scrape_url("https://example.com", &FetchOptions::default()).unwrap();
//! print!("{}", pagescrape::render_report(&data));
//! save_report(&data, "output.txt").unwrap();
//! ```

pub mod dom;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod report;
pub(crate) mod util;

pub use dom::{Document, NodeRef, parse_document, parse_html};
pub use error::{Error, Result};
pub use extract::{ScrapeData, extract, extract_images, extract_links, extract_texts};
pub use fetch::{FetchOptions, Page, fetch_page};
pub use report::{DEFAULT_OUTPUT_FILE, render_report, save_report, write_report};

use std::io::Read;

/// Parse page bytes and run the extraction rules.
///
/// `charset_hint` is the charset the transport declared, if any.
pub fn scrape_bytes(bytes: &[u8], charset_hint: Option<&str>) -> ScrapeData {
    let doc = dom::parse_bytes(bytes, charset_hint);
    extract(&doc)
}

/// Read a stream to the end, parse it, and run the extraction rules.
///
/// Fails with [`Error::Parse`] if the stream cannot be read.
pub fn scrape_reader<R: Read>(reader: R, charset_hint: Option<&str>) -> Result<ScrapeData> {
    let doc = parse_document(reader, charset_hint)?;
    Ok(extract(&doc))
}

/// Fetch `url`, parse it, and run the extraction rules.
///
/// Fetch and parse failures abort before anything is extracted.
pub fn scrape_url(url: &str, options: &FetchOptions) -> Result<ScrapeData> {
    let page = fetch_page(url, options)?;
    scrape_reader(page.body.as_slice(), page.charset.as_deref())
}
