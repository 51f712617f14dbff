//! Server Config

use clap::Args;

/// Address and port the storefront API listens on.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface the listener binds
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the listener binds
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 5000)]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// The `host:port` pair handed to the TCP listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
