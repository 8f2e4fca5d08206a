//! Console logging: startup banner, warning/error lines, and the
//! per-request access log in `common` (CLF) or `json` format.

use std::net::SocketAddr;

use chrono::Local;

use crate::config::Config;
use crate::wol::MacAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Wake-on-LAN HTTP server started");
    println!("Listening on: http://{addr}");
    println!("Wake route:   /wake?addr=<mac>");
    println!(
        "Broadcasting to: {}:{}",
        config.wol.broadcast_addr, config.wol.port
    );
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_warning(msg: &str) {
    eprintln!("[Warn] {msg}");
}

pub fn log_wake(mac: &MacAddr) {
    println!("[Wake] Magic packet sent for {mac}");
}

pub fn log_shutdown() {
    println!("\n[Signal] Shutting down");
}

/// One line of the access log.
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    pub remote_addr: String,
    pub time: chrono::DateTime<Local>,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub status: u16,
    pub body_bytes: u64,
}

impl AccessLogEntry {
    pub fn format(&self, format: &str) -> String {
        match format {
            "json" => self.format_json(),
            _ => self.format_common(),
        }
    }

    /// Common Log Format:
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{} {}{} HTTP/1.1\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.method,
            self.path,
            self.query
                .as_ref()
                .map(|q| format!("?{q}"))
                .unwrap_or_default(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "status": self.status,
            "body_bytes": self.body_bytes,
        })
        .to_string()
    }
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}
