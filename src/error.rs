//! Error types for profile selection, ciphersuite configuration and provider calls

use crate::condition::TlsCondition;
use crate::profile::SecurityProfile;
use thiserror::Error;

/// Result type alias for TLS configuration operations
pub type Result<T> = std::result::Result<T, TlsError>;

/// Error types that can occur while configuring or using the TLS layer
#[derive(Error, Debug)]
pub enum TlsError {
    /// The name is not in the catalog, or the linked provider cannot negotiate it
    #[error("Ciphersuite '{0}' is unknown or not supported by the TLS provider")]
    UnknownOrUnsupportedCiphersuite(String),

    #[error("Ciphersuite '{suite}' not permitted with security profile '{}'", .profile.name())]
    CiphersuiteNotAllowedByProfile {
        suite: String,
        profile: SecurityProfile,
    },

    #[error("Security profile '{}' is not supported by the TLS provider", .0.name())]
    ProfileNotSupportedByProvider(SecurityProfile),

    #[error("TLS provider error: {0}")]
    Provider(TlsCondition),

    #[error("TLS provider has not been initialized")]
    NotInitialized,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TlsError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unknown_suite(name: impl Into<String>) -> Self {
        Self::UnknownOrUnsupportedCiphersuite(name.into())
    }

    pub fn not_allowed(suite: impl Into<String>, profile: SecurityProfile) -> Self {
        Self::CiphersuiteNotAllowedByProfile {
            suite: suite.into(),
            profile,
        }
    }

    /// Provider condition carried by this error, if any
    pub fn condition(&self) -> Option<&TlsCondition> {
        match self {
            TlsError::Provider(condition) => Some(condition),
            _ => None,
        }
    }
}

impl From<TlsCondition> for TlsError {
    fn from(condition: TlsCondition) -> Self {
        TlsError::Provider(condition)
    }
}

impl From<rustls::Error> for TlsError {
    fn from(err: rustls::Error) -> Self {
        TlsError::Provider(crate::condition::translate_rustls_error(&err))
    }
}
