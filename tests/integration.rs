//! End-to-end tests against a local one-shot HTTP server.
//!
//! Each test binds a listener on a random port, serves exactly one canned
//! response, and hands back the raw bytes it received so the test can
//! assert on the actual wire format — request line, headers, and the
//! multipart body.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

use pixmatch::{
    ApiRequest, CollectionApi, ErrorKind, Image, ListOptions, MatchEngine, SearchOptions,
};

/// Serve one HTTP exchange: read a full request, answer with `status`
/// and a JSON `body`, and return the received request bytes.
fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 8192];

        // Read until the headers and the declared body length are in.
        loop {
            if let Some(end) = find(&request, b"\r\n\r\n") {
                if request.len() >= end + 4 + content_length(&request[..end]) {
                    break;
                }
            }
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    (addr, handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn received_text(handle: JoinHandle<Vec<u8>>) -> String {
    String::from_utf8_lossy(&handle.join().unwrap()).into_owned()
}

#[test]
fn get_round_trip() {
    let (addr, handle) = serve_once(
        "200 OK",
        r#"{ "status": "ok", "method": "ping", "result": [], "error": [] }"#,
    );

    let request = ApiRequest::new(&format!("http://{addr}/rest")).unwrap();
    let resp = request.get("ping", &[]).unwrap();
    assert!(resp.is_ok());
    assert_eq!(resp.method, "ping");

    let received = received_text(handle);
    assert!(
        received.starts_with("GET /rest/ping/ HTTP/1.1\r\n"),
        "unexpected request line in: {received}"
    );
    assert!(received.to_lowercase().contains("connection: close"));
}

#[test]
fn get_appends_query_params() {
    let (addr, handle) = serve_once(
        "200 OK",
        r#"{ "status": "ok", "method": "list", "result": ["a.jpg"], "error": [] }"#,
    );

    let engine = MatchEngine::new(&format!("http://{addr}/rest/")).unwrap();
    let resp = engine
        .list(&ListOptions {
            offset: Some(0),
            limit: Some(5),
        })
        .unwrap();
    assert_eq!(resp.result[0], "a.jpg");

    let received = received_text(handle);
    assert!(
        received.starts_with("GET /rest/list/?offset=0&limit=5 HTTP/1.1\r\n"),
        "unexpected request line in: {received}"
    );
}

#[test]
fn post_multipart_round_trip() {
    let (addr, handle) = serve_once(
        "200 OK",
        r#"{ "status": "ok", "method": "search", "result": [{ "filepath": "m.jpg", "score": "92.4" }], "error": [] }"#,
    );

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("query.jpg");
    std::fs::write(&path, b"\xff\xd8\xffjpegbytes").unwrap();

    let engine = MatchEngine::new(&format!("http://{addr}/rest/")).unwrap();
    let resp = engine
        .search_image(
            &Image::from_file(&path).unwrap(),
            &SearchOptions {
                min_score: Some(30),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(resp.is_ok());
    assert_eq!(resp.result[0]["score"], "92.4");

    let received = received_text(handle);
    assert!(received.starts_with("POST /rest/search/ HTTP/1.1\r\n"));

    // The declared boundary must be the one delimiting the body.
    let lowered = received.to_lowercase();
    let ct_start = lowered.find("content-type: multipart/form-data; boundary=").unwrap();
    let boundary: String = received[ct_start..]
        .chars()
        .skip("content-type: multipart/form-data; boundary=".len())
        .take_while(|c| *c != '\r')
        .collect();
    assert!(received.contains(&format!("--{boundary}\r\n")));
    assert!(received.ends_with(&format!("--{boundary}--")));

    // Both parts made it: the option field and the image payload.
    assert!(received.contains("Content-Disposition: form-data; name=\"min_score\";\r\n\r\n30\r\n"));
    assert!(received.contains(
        "Content-Disposition: form-data; name=\"image\"; filename=\"query.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
    ));
    assert!(received.contains("jpegbytes"));
}

#[test]
fn basic_auth_attached_when_credentials_set() {
    let (addr, handle) = serve_once(
        "200 OK",
        r#"{ "status": "ok", "method": "count", "result": [12], "error": [] }"#,
    );

    let request =
        ApiRequest::with_credentials(&format!("http://{addr}/rest/"), "account", "secret").unwrap();
    let resp = request.get("count", &[]).unwrap();
    assert_eq!(resp.result[0], 12);

    let received = received_text(handle).to_lowercase();
    assert!(
        received.contains("authorization: basic "),
        "no basic auth header in: {received}"
    );
}

#[test]
fn no_auth_header_without_credentials() {
    let (addr, handle) = serve_once(
        "200 OK",
        r#"{ "status": "ok", "method": "ping", "result": [], "error": [] }"#,
    );

    let request = ApiRequest::new(&format!("http://{addr}/rest/")).unwrap();
    request.get("ping", &[]).unwrap();

    let received = received_text(handle).to_lowercase();
    assert!(!received.contains("authorization:"));
}

#[test]
fn non_json_body_is_parse_error() {
    let (addr, _handle) = serve_once("200 OK", "<html>proxy error page</html>");

    let request = ApiRequest::new(&format!("http://{addr}/rest/")).unwrap();
    let err = request.get("ping", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn error_status_is_transport_error_not_parse() {
    // The body is valid JSON, but the status must win: this is a failed
    // request, not an unparsable response.
    let (addr, _handle) = serve_once(
        "500 Internal Server Error",
        r#"{ "status": "fail", "method": "ping", "result": [], "error": ["boom"] }"#,
    );

    let request = ApiRequest::new(&format!("http://{addr}/rest/")).unwrap();
    let err = request.get("ping", &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn fail_status_in_body_still_parses() {
    let (addr, _handle) = serve_once(
        "200 OK",
        r#"{ "status": "fail", "method": "delete", "result": [], "error": ["filepath does not exist"] }"#,
    );

    let request = ApiRequest::new(&format!("http://{addr}/rest/")).unwrap();
    let resp = request.get("delete", &[]).unwrap();
    assert!(!resp.is_ok());
    assert_eq!(resp.error, vec!["filepath does not exist"]);
}
