//! Character encoding detection for fetched markup.

use std::borrow::Cow;

use encoding_rs::Encoding;
use memchr::memmem;

/// How many leading bytes are searched for a `<meta charset>` declaration.
const PRESCAN_LEN: usize = 1024;

/// Decode raw page bytes to a string.
///
/// The encoding is taken from the stream itself:
/// 1. A byte-order mark always wins (handled inside encoding_rs)
/// 2. The transport's `charset` hint, when it names a known encoding
/// 3. A `<meta charset>` or `<meta http-equiv>` declaration near the top
/// 4. UTF-8
///
/// Malformed sequences become U+FFFD; decoding never fails.
pub fn decode_html<'a>(
    bytes: &'a [u8],
    transport_hint: Option<&str>,
) -> (Cow<'a, str>, &'static Encoding) {
    let hinted = transport_hint.and_then(|label| {
        let encoding = Encoding::for_label(label.trim().as_bytes());
        if encoding.is_none() {
            tracing::warn!(label, "ignoring unknown charset from transport");
        }
        encoding
    });

    let encoding = hinted
        .or_else(|| prescan_meta_charset(bytes))
        .unwrap_or(encoding_rs::UTF_8);

    let (text, used, malformed) = encoding.decode(bytes);
    if malformed {
        tracing::debug!(encoding = used.name(), "replaced malformed byte sequences");
    }
    (text, used)
}

/// Find a charset declared by a `<meta>` tag in the first bytes of a page.
pub fn prescan_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = bytes[..bytes.len().min(PRESCAN_LEN)].to_ascii_lowercase();

    for pos in memmem::find_iter(&head, b"charset") {
        if !inside_meta_tag(&head[..pos]) {
            continue;
        }
        let Some(label) = charset_value(&head[pos + b"charset".len()..]) else {
            continue;
        };
        if let Some(encoding) = Encoding::for_label(label) {
            return Some(html_override(encoding));
        }
    }
    None
}

/// Extract the value after `charset`, skipping `=` and an optional quote.
fn charset_value(rest: &[u8]) -> Option<&[u8]> {
    let rest = trim_start(rest);
    let rest = trim_start(rest.strip_prefix(b"=")?);
    let (rest, quote) = match rest.first() {
        Some(&q @ (b'"' | b'\'')) => (&rest[1..], Some(q)),
        _ => (rest, None),
    };
    let end = rest
        .iter()
        .position(|&b| match quote {
            Some(q) => b == q || b == b';',
            None => b.is_ascii_whitespace() || matches!(b, b';' | b'>' | b'/' | b'"' | b'\''),
        })
        .unwrap_or(rest.len());
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

fn inside_meta_tag(before: &[u8]) -> bool {
    match memchr::memrchr(b'<', before) {
        Some(open) => {
            before[open..].starts_with(b"<meta") && memchr::memchr(b'>', &before[open..]).is_none()
        }
        None => false,
    }
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// A page cannot declare itself UTF-16 from inside its own bytes, and
/// x-user-defined is read as Windows-1252.
fn html_override(encoding: &'static Encoding) -> &'static Encoding {
    if encoding == encoding_rs::UTF_16LE || encoding == encoding_rs::UTF_16BE {
        encoding_rs::UTF_8
    } else if encoding == encoding_rs::X_USER_DEFINED {
        encoding_rs::WINDOWS_1252
    } else {
        encoding
    }
}
