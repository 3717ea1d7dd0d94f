//! Single-page HTTP fetch.
//!
//! One blocking GET, no retries. Anything but `200 OK` is an error.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::error::{Error, Result};

/// Request settings for [`fetch_page`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Whole-request timeout, connect through body.
    pub timeout: Duration,
    pub user_agent: String,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            system_proxy: true,
        }
    }
}

impl FetchOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Connect directly, ignoring proxy settings in the environment.
    pub fn without_system_proxy(mut self) -> Self {
        self.system_proxy = false;
        self
    }
}

/// A fetched page body.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects.
    pub url: String,
    pub body: Vec<u8>,
    /// `charset` parameter of the response's `Content-Type`, if any.
    pub charset: Option<String>,
}

/// Fetch `url` and return its body.
pub fn fetch_page(url: &str, options: &FetchOptions) -> Result<Page> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "{url}: unsupported scheme {}",
            parsed.scheme()
        )));
    }

    let fetch_error = |e: reqwest::Error| Error::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let mut builder = Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str());
    if !options.system_proxy {
        builder = builder.no_proxy();
    }
    let client = builder.build().map_err(fetch_error)?;

    tracing::info!(%url, "fetching page");
    let response = client.get(parsed).send().map_err(fetch_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let charset = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(charset_from_content_type);
    let body = response.bytes().map_err(fetch_error)?.to_vec();

    tracing::debug!(url = %final_url, bytes = body.len(), ?charset, "fetched page");
    Ok(Page {
        url: final_url,
        body,
        charset,
    })
}

/// Pull the `charset` parameter out of a `Content-Type` header value.
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_from_content_type() {
        assert_eq!(
            charset_from_content_type("text/html; charset=ISO-8859-1"),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(
            charset_from_content_type("text/html;Charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(
            charset_from_content_type("text/html; boundary=x; charset=koi8-r"),
            Some("koi8-r".to_string())
        );
        assert_eq!(charset_from_content_type("text/html"), None);
        assert_eq!(charset_from_content_type("text/html; charset="), None);
    }

    #[test]
    fn test_rejects_bad_urls_before_fetching() {
        let options = FetchOptions::default();
        assert!(matches!(
            fetch_page("not a url", &options),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            fetch_page("ftp://example.com/file", &options),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_options_builder() {
        let options = FetchOptions::default()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("tester/1.0");
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.user_agent, "tester/1.0");
        assert!(FetchOptions::default().user_agent.starts_with("pagescrape/"));
    }
}
