use crate::error::{Result, TlsError};
use crate::handler::CiphersuiteHandler;
use crate::negotiation::NetworkRole;
use crate::profile::SecurityProfile;
use crate::provider::ProviderSupport;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// TLS settings of one DICOM application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Security profile identifier, e.g. `bcp195-rfc8996`
    #[serde(default = "default_profile")]
    pub profile: SecurityProfile,

    /// Additional ciphersuites (RFC-style names), applied after the profile
    #[serde(default)]
    pub ciphersuites: Vec<String>,

    #[serde(default)]
    pub role: NetworkRole,

    /// PEM certificate chain presented to the peer
    pub cert_path: Option<PathBuf>,

    /// PEM private key matching `cert_path`
    pub key_path: Option<PathBuf>,

    /// PEM bundle of trusted certificates
    pub ca_bundle_path: Option<PathBuf>,

    /// Require peers to present a certificate (acceptor only)
    #[serde(default)]
    pub require_client_cert: bool,

    /// Server name sent by requestors (SNI and certificate name check)
    pub server_name: Option<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            ciphersuites: Vec::new(),
            role: NetworkRole::default(),
            cert_path: None,
            key_path: None,
            ca_bundle_path: None,
            require_client_cert: false,
            server_name: None,
        }
    }
}

fn default_profile() -> SecurityProfile {
    SecurityProfile::Bcp195Rfc8996
}

impl TlsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cert_path.is_some() != self.key_path.is_some() {
            return Err(TlsError::config(
                "cert_path and key_path must be configured together",
            ));
        }

        if self.require_client_cert && self.ca_bundle_path.is_none() {
            return Err(TlsError::config(
                "require_client_cert needs ca_bundle_path to verify peer certificates",
            ));
        }

        if self.profile.is_closed() && !self.ciphersuites.is_empty() {
            return Err(TlsError::config(format!(
                "security profile '{}' does not permit additional ciphersuites",
                self.profile.identifier()
            )));
        }

        if let Some(name) = self.ciphersuites.iter().find(|c| c.trim().is_empty()) {
            return Err(TlsError::config(format!("invalid ciphersuite name '{name}'")));
        }

        for (i, name) in self.ciphersuites.iter().enumerate() {
            if self.ciphersuites[..i].contains(name) {
                warn!("Ciphersuite '{}' is listed more than once", name);
            }
        }

        Ok(())
    }

    /// Build a handler: activate the profile, then add the extra ciphersuites
    pub fn build_handler(&self, support: Arc<ProviderSupport>) -> Result<CiphersuiteHandler> {
        let mut handler = CiphersuiteHandler::new(support);
        handler.set_profile(self.profile)?;
        for name in &self.ciphersuites {
            handler.add_cipher_suite(name)?;
        }
        Ok(handler)
    }
}
