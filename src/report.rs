//! Plain-text report of scraped data, shared by console and file output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::ScrapeData;

/// File the report is saved to when no other name is given.
pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

const LINKS_HEADER: &str = "Scraped Links:";
const TEXTS_HEADER: &str = "Scraped Text (Paragraphs):";
const IMAGES_HEADER: &str = "Scraped Images:";

/// Write the report: links, texts, then images, each as a 1-indexed list
/// under its header, with a blank line between sections.
pub fn write_report<W: Write>(data: &ScrapeData, mut out: W) -> io::Result<()> {
    write_section(&mut out, LINKS_HEADER, &data.links)?;
    writeln!(out)?;
    write_section(&mut out, TEXTS_HEADER, &data.texts)?;
    writeln!(out)?;
    write_section(&mut out, IMAGES_HEADER, &data.images)?;
    out.flush()
}

fn write_section<W: Write>(out: &mut W, header: &str, entries: &[String]) -> io::Result<()> {
    writeln!(out, "{header}")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, entry)?;
    }
    Ok(())
}

/// Render the report to a string.
pub fn render_report(data: &ScrapeData) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report(data, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Save the report to `path`, replacing any existing file.
pub fn save_report(data: &ScrapeData, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let persistence = |source| Error::Persistence {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(persistence)?;
    write_report(data, BufWriter::new(file)).map_err(persistence)?;
    tracing::info!(path = %path.display(), entries = data.total(), "saved report");
    Ok(())
}
