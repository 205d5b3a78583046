//! rustls provider adapter

use super::{NegotiableSuites, ProviderAdapter};
use crate::catalog;
use crate::condition::{ProtocolCondition, TlsCondition};
use crate::error::{Result, TlsError};
use rustls::crypto::CryptoProvider;
use rustls::SupportedCipherSuite;
use std::sync::Arc;
use tracing::{debug, warn};

/// Adapter for a rustls [`CryptoProvider`].
///
/// Catalog entries are matched against rustls suites through their IANA code
/// point. Applying cipher lists yields a copy of the base provider restricted to
/// the listed suites, in list order.
#[derive(Debug, Clone)]
pub struct RustlsProvider {
    base: Arc<CryptoProvider>,
}

impl RustlsProvider {
    pub fn new(base: Arc<CryptoProvider>) -> Self {
        Self { base }
    }

    /// Provider backed by the `ring` crypto implementation
    pub fn ring() -> Self {
        Self::new(Arc::new(rustls::crypto::ring::default_provider()))
    }

    fn find(&self, provider_name: &str) -> Option<SupportedCipherSuite> {
        let id = catalog::lookup_by_provider_name(provider_name)?;
        let code_point = id.descriptor().code_point;
        self.base
            .cipher_suites
            .iter()
            .copied()
            .find(|s| u16::from(s.suite()) == code_point)
    }

    fn collect(&self, list: &str, tls13: bool) -> Vec<SupportedCipherSuite> {
        list.split(':')
            .filter(|name| !name.is_empty())
            .filter_map(|name| match self.find(name) {
                Some(suite) if suite.tls13().is_some() == tls13 => Some(suite),
                Some(_) => {
                    warn!("Ciphersuite '{}' given in the wrong protocol list, ignored", name);
                    None
                }
                None => {
                    debug!("Ciphersuite '{}' not available in rustls provider, ignored", name);
                    None
                }
            })
            .collect()
    }
}

impl ProviderAdapter for RustlsProvider {
    type Configured = Arc<CryptoProvider>;

    fn negotiable_suites(&self) -> Result<NegotiableSuites> {
        // A rustls provider holds no process state; its suite list is the permissive context.
        let suites = self
            .base
            .cipher_suites
            .iter()
            .map(|s| {
                let code_point = u16::from(s.suite());
                match catalog::lookup_by_code_point(code_point) {
                    Some(id) => id.descriptor().provider_name.to_string(),
                    None => format!("{:?}", s.suite()),
                }
            })
            .collect();

        Ok(NegotiableSuites {
            provider: "rustls".to_string(),
            suites,
            tls13_configurable: true,
        })
    }

    fn accept_cipher_lists(
        &self,
        classic: &str,
        tls13: &str,
        tls13_enabled: bool,
    ) -> Result<Arc<CryptoProvider>> {
        let mut ordered = Vec::new();
        if tls13_enabled {
            let selected = self.collect(tls13, true);
            if selected.is_empty() {
                // an empty TLS 1.3 list keeps the provider defaults
                ordered.extend(self.base.cipher_suites.iter().copied().filter(|s| s.tls13().is_some()));
            } else {
                ordered.extend(selected);
            }
        }
        ordered.extend(self.collect(classic, false));

        if ordered.is_empty() {
            return Err(TlsError::Provider(TlsCondition::Protocol(
                ProtocolCondition::NoCipherMatch,
            )));
        }

        debug!("rustls provider restricted to {} ciphersuites", ordered.len());
        Ok(Arc::new(CryptoProvider {
            cipher_suites: ordered,
            ..CryptoProvider::clone(&self.base)
        }))
    }
}
