//! Layered configuration: hard defaults, then an optional `config` file,
//! then `WOLWEB_*` environment variables.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub wol: WolConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Where magic packets are sent. The defaults are the limited broadcast
/// address and the UDP discard port, which silently drops stray traffic.
#[derive(Debug, Deserialize, Clone)]
pub struct WolConfig {
    pub broadcast_addr: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("WOLWEB"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("wol.broadcast_addr", "255.255.255.255")?
            .set_default("wol.port", 9)?
            .set_default("logging.access_log", true)?
            .set_default("logging.format", "common")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }

    /// Resolve the broadcast destination for magic packets.
    pub fn wol_target(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .wol
            .broadcast_addr
            .parse()
            .map_err(|e| format!("Invalid broadcast address: {e}"))?;
        Ok(SocketAddr::new(ip, self.wol.port))
    }
}

/// Read-only state shared by every request task.
pub struct AppState {
    pub config: Config,
    pub wol_target: SocketAddr,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, String> {
        let wol_target = config.wol_target()?;
        Ok(Self { config, wol_target })
    }
}
