//! Fetch tests against a one-shot HTTP server on localhost.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use pagescrape::{Error, FetchOptions, fetch_page, scrape_url};

/// Serve exactly one response, returning the request head the client sent.
fn serve_once(status_line: &str, headers: &[&str], body: &[u8]) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/page", listener.local_addr().unwrap());

    let mut response = format!("HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n", body.len());
    for header in headers {
        response.push_str(header);
        response.push_str("\r\n");
    }
    response.push_str("\r\n");
    let mut response = response.into_bytes();
    response.extend_from_slice(body);

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut head = String::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            head.push_str(&line);
        }
        let mut stream = reader.into_inner();
        stream.write_all(&response).unwrap();
        stream.flush().unwrap();
        head
    });

    (url, handle)
}

fn options() -> FetchOptions {
    FetchOptions::default()
        .with_timeout(Duration::from_secs(5))
        .without_system_proxy()
}

#[test]
fn test_scrape_url_end_to_end() {
    let body = br#"<html><body><a href="http://x.com">A</a><a href="/local">B</a><p> Hi there </p><p></p><img src="a.png"><img></body></html>"#;
    let (url, server) = serve_once("200 OK", &["Content-Type: text/html; charset=utf-8"], body);

    let data = scrape_url(&url, &options()).unwrap();
    server.join().unwrap();

    assert_eq!(data.links, vec!["http://x.com"]);
    assert_eq!(data.texts, vec!["Hi there"]);
    assert_eq!(data.images, vec!["a.png"]);
}

#[test]
fn test_fetch_reports_charset_and_user_agent() {
    let (url, server) = serve_once(
        "200 OK",
        &["Content-Type: text/html; charset=ISO-8859-1"],
        b"<p>caf\xe9</p>",
    );

    let page = fetch_page(&url, &options().with_user_agent("scrape-test/0.1")).unwrap();
    let request = server.join().unwrap();

    assert_eq!(page.charset.as_deref(), Some("ISO-8859-1"));
    assert_eq!(page.body, b"<p>caf\xe9</p>");
    assert!(request.starts_with("GET /page HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("user-agent: scrape-test/0.1"));

    let data = pagescrape::scrape_bytes(&page.body, page.charset.as_deref());
    assert_eq!(data.texts, vec!["café"]);
}

#[test]
fn test_non_ok_status_is_fetch_error() {
    let (url, server) = serve_once("404 Not Found", &["Content-Type: text/html"], b"<p>missing</p>");

    let err = scrape_url(&url, &options()).unwrap_err();
    server.join().unwrap();

    assert!(err.is_fetch());
    assert!(matches!(err, Error::Status { status: 404, .. }));
}

#[test]
fn test_other_success_codes_are_rejected() {
    let (url, server) = serve_once("204 No Content", &[], b"");

    let err = fetch_page(&url, &options()).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, Error::Status { status: 204, .. }));
}

#[test]
fn test_connection_refused_is_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let err = fetch_page(&url, &options()).unwrap_err();

    assert!(matches!(err, Error::Fetch { .. }));
    assert!(err.to_string().contains(&url));
}
