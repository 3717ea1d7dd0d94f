//! Markup parser: HTML bytes to a queryable [`Document`] tree.
//!
//! Parsing goes through html5ever, which repairs malformed markup the way
//! browsers do. The only failure is an unreadable input stream.
//!
//! # Example
//!
//! ```
//! use pagescrape::dom::parse_html;
//!
//! let doc = parse_html("<p>Hello, <b>World</b>!</p>");
//! let p = doc.elements_by_tag("p").next().unwrap();
//! assert_eq!(p.text_content(), "Hello, World!");
//! ```

mod arena;
mod node;
mod tree_sink;

pub use arena::{Attribute, Document, Node, NodeData, NodeId};
pub use node::{Children, Descendants, NodeRef};

use std::io::Read;

use html5ever::driver::ParseOpts;
use html5ever::parse_document as html5ever_parse;
use html5ever::tendril::TendrilSink;

use crate::error::{Error, Result};
use tree_sink::DocumentSink;

/// Parse an in-memory HTML string.
pub fn parse_html(html: &str) -> Document {
    let sink = DocumentSink::new();
    let doc = html5ever_parse(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_document();
    tracing::debug!(
        nodes = doc.len(),
        recovered_errors = doc.recovered_errors(),
        "parsed document"
    );
    doc
}

/// Parse raw page bytes, detecting their encoding.
///
/// `charset_hint` is the charset the transport declared, if any.
pub fn parse_bytes(bytes: &[u8], charset_hint: Option<&str>) -> Document {
    let (html, encoding) = crate::util::decode_html(bytes, charset_hint);
    tracing::debug!(encoding = encoding.name(), bytes = bytes.len(), "decoded page");
    parse_html(&html)
}

/// Read a whole stream and parse it.
///
/// Fails with [`Error::Parse`] when the stream cannot be read; there is no
/// partial tree.
pub fn parse_document<R: Read>(mut reader: R, charset_hint: Option<&str>) -> Result<Document> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(Error::Parse)?;
    Ok(parse_bytes(&bytes, charset_hint))
}
