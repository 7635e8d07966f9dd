pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod upstream;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::Config;
pub use server::ServerConfig;
pub use upstream::{UpstreamConfig, UpstreamTarget};

/// Environment keys recognised by [`Config::from_lookup`].
pub mod keys {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const TARGET_SERVER_ADDRESS: &str = "TARGET_SERVER_ADDRESS";
    pub const UDP_SERVER_ENABLED: &str = "UDP_SERVER_ENABLED";
    pub const TCP_SERVER_TIMEOUT: &str = "TCP_SERVER_TIMEOUT";
    pub const UPSTREAM_TIMEOUT: &str = "UPSTREAM_TIMEOUT";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}
