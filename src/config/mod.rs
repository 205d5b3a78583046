mod logging_config;
mod tls_config;
pub mod config;

pub use config::Config;
pub use logging_config::LoggingConfig;
pub use tls_config::TlsConfig;
