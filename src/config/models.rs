use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub print_jobs: PrintJobsConfig,
    #[serde(default)]
    pub qr: QrConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Prefix for the print URLs handed back to submitters
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            public_base_url: default_public_base_url(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_max_payload_bytes() -> usize {
    5 * 1024 * 1024 // 5 MB
}

/// Print job retention
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrintJobsConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl PrintJobsConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for PrintJobsConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    30 * 60
}

fn default_sweep_interval_secs() -> u64 {
    60
}

/// QR endpoint limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QrConfig {
    #[serde(default = "default_qr_size")]
    pub default_size: u32,
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    /// Quiet zone width in modules
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Most URLs accepted by one batch ZIP request
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            default_size: default_qr_size(),
            min_size: default_min_size(),
            max_size: default_max_size(),
            margin: default_margin(),
            max_batch: default_max_batch(),
        }
    }
}

fn default_qr_size() -> u32 {
    200
}

fn default_min_size() -> u32 {
    100
}

fn default_max_size() -> u32 {
    1000
}

fn default_margin() -> u32 {
    1
}

fn default_max_batch() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.max_payload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.print_jobs.ttl(), Duration::from_secs(1800));
        assert_eq!(config.qr.default_size, 200);
        assert_eq!(config.qr.max_batch, 50);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[print_jobs]
ttl_secs = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.print_jobs.ttl_secs, 600);
        assert_eq!(config.print_jobs.sweep_interval_secs, 60);
        assert_eq!(config.qr.min_size, 100);
    }
}
