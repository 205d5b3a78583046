//! DICOM TLS security profiles and ciphersuite negotiation
//!
//! This crate decides which TLS ciphersuites a DICOM application offers or
//! accepts, following the DICOM secure transport connection profiles.
//!
//! ## Features
//!
//! - Ciphersuite catalog ordered by strength (classic and TLS 1.3)
//! - Provider capability probe, shared process-wide
//! - Security profiles with policy checks on caller-added ciphersuites
//! - Role dependent negotiation order (server preference for acceptors)
//! - Provider independent error conditions
//! - rustls transport integration with tokio (feature `tls`)
//!
//! ## Usage
//!
//! ```ignore
//! let provider = RustlsProvider::ring();
//! globals::initialize_provider(&provider)?;
//!
//! let mut handler = CiphersuiteHandler::from_global()?;
//! handler.set_profile(SecurityProfile::Bcp195Rfc8996Modified)?;
//! let transport = TlsTransportLayer::new(&provider, &handler, NetworkRole::Acceptor)?;
//! ```

pub mod catalog;
pub mod condition;
pub mod config;
pub mod error;
pub mod globals;
pub mod handler;
pub mod logging;
pub mod negotiation;
pub mod profile;
pub mod provider;

#[cfg(feature = "tls")]
pub mod transport;

pub use catalog::{CipherSuiteDescriptor, ProtocolVersion, SuiteId};
pub use condition::TlsCondition;
pub use config::Config;
pub use error::{Result, TlsError};
pub use handler::{CiphersuiteHandler, ConfigurationState};
pub use negotiation::{NegotiationLists, NetworkRole};
pub use profile::{PolicyWarning, SecurityProfile};
pub use provider::{FixedProvider, ProviderAdapter, ProviderSupport, RustlsProvider};

#[cfg(feature = "tls")]
pub use transport::TlsTransportLayer;
