//! Error types for pagescrape operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching, parsing, or saving a page.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("error fetching URL {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("error: status code {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("error parsing HTML: {0}")]
    Parse(#[source] std::io::Error),

    #[error("error writing {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for any failure of the fetch step, including a rejected URL.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl(_) | Error::Fetch { .. } | Error::Status { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
