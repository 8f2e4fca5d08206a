//! Request routing and the wake operation.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::config::AppState;
use crate::logger::{self, AccessLogEntry};
use crate::query;
use crate::response;
use crate::wol::{self, MacAddr};

/// Entry point for every request on the listener.
///
/// Routing is by path only; `/wake` accepts any HTTP method.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let raw_query = req.uri().query().map(ToString::to_string);

    let response = match path.as_str() {
        "/wake" => wake(raw_query.as_deref(), &state).await,
        _ => response::build_404_response(),
    };

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: chrono::Local::now(),
            method,
            path,
            query: raw_query,
            status: response.status().as_u16(),
            body_bytes: response.body().size_hint().exact().unwrap_or(0),
        };
        logger::log_access(&entry, &state.config.logging.format);
    }

    Ok(response)
}

/// Validate the `addr` parameter and broadcast a magic packet for it.
async fn wake(raw_query: Option<&str>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(addr) = raw_query.and_then(|q| query::param(q, "addr")) else {
        return response::build_bad_request("missing 'addr' argument".to_string());
    };

    let mac: MacAddr = match addr.parse() {
        Ok(mac) => mac,
        Err(_) => {
            return response::build_bad_request(format!("'{addr}' is not a valid MAC address"))
        }
    };

    match wol::send_magic_packet(&mac, state.wol_target).await {
        Ok(()) => {
            logger::log_wake(&mac);
            response::build_empty_ok()
        }
        Err(err) => response::build_server_error(err.to_string()),
    }
}
