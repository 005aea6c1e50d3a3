use serde::{Deserialize, Serialize};

/// Path of the XML-RPC endpoint on a default server installation.
pub const DEFAULT_PATH: &str = "/rpc/api/xmlrpc";

/// Coordinates of the remote XML-RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server address (host name or IP).
    pub host: String,
    pub port: u16,
    /// HTTP path of the XML-RPC endpoint.
    #[serde(default = "default_path")]
    pub path: String,
    /// Use HTTPS when `true` (the default), plain HTTP otherwise.
    #[serde(default = "default_security")]
    pub security: bool,
}

fn default_path() -> String {
    DEFAULT_PATH.to_string()
}

fn default_security() -> bool {
    true
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            path: default_path(),
            security: default_security(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_security(mut self, security: bool) -> Self {
        self.security = security;
        self
    }

    /// The endpoint URL, e.g. `https://localhost:9192/rpc/api/xmlrpc`.
    pub fn url(&self) -> String {
        let scheme = if self.security { "https" } else { "http" };
        let separator = if self.path.starts_with('/') { "" } else { "/" };
        format!(
            "{scheme}://{}:{}{separator}{}",
            self.host, self.port, self.path
        )
    }
}
