//! Plain-text HTTP response builders.
//!
//! The error bodies are part of the service contract and are returned
//! verbatim, without trailing newlines.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Successful wake: 200 with an empty body. The protocol offers no
/// delivery confirmation, so there is nothing to report.
pub fn build_empty_ok() -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .body(Full::new(Bytes::new()))
        .expect("Failed to build response")
}

pub fn build_bad_request(body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(400)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .expect("Failed to build 400 response")
}

pub fn build_server_error(body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(body)))
        .expect("Failed to build 500 response")
}

pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not Found")))
        .expect("Failed to build 404 response")
}
