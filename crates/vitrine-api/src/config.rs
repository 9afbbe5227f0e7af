//! Process configuration
//!
//! Everything here comes from command-line flags with environment fallbacks.
//! The location rules themselves live in the file named by `--config`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "vitrine", version, about = "Serve S3 objects through regex location rules")]
pub struct ServerConfig {
    /// Location rules file (JSON)
    #[arg(long = "config", env = "VITRINE_CONFIG", default_value = "./proxy.json")]
    pub config_path: PathBuf,

    /// Address to listen on
    #[arg(long, env = "VITRINE_LISTEN", default_value = "0.0.0.0:8123")]
    pub listen: SocketAddr,

    /// Deployment environment; `production` or `prod` hides error details
    #[arg(long, env = "ENVIRONMENT", default_value = "development")]
    pub environment: String,

    /// Seconds to wait for in-flight requests after a shutdown signal
    #[arg(long, env = "VITRINE_SHUTDOWN_GRACE_SECS", default_value = "15")]
    pub shutdown_grace_secs: u64,

    /// Serve HTTPS using `--cert` and `--key`
    #[arg(long, env = "VITRINE_TLS")]
    pub tls: bool,

    /// TLS certificate chain (PEM)
    #[arg(long = "cert", env = "VITRINE_TLS_CERT", default_value = "server.crt")]
    pub cert_path: PathBuf,

    /// TLS private key (PEM)
    #[arg(long = "key", env = "VITRINE_TLS_KEY", default_value = "server.key")]
    pub key_path: PathBuf,
}

impl ServerConfig {
    /// Load `.env` if present, then parse flags and environment.
    pub fn from_args() -> Self {
        let _ = dotenvy::dotenv();
        Self::parse()
    }

    pub fn is_production(&self) -> bool {
        matches!(
            self.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
