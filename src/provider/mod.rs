//! TLS provider abstraction and capability probe
//!
//! A provider is whatever actually implements the handshake. The engine only
//! needs two things from it: the list of ciphersuites it can negotiate, and a
//! way to hand over the final ordered ciphersuite lists.

mod fixed;
mod rustls_adapter;

pub use fixed::{CipherLists, FixedProvider};
pub use rustls_adapter::RustlsProvider;

use crate::catalog::{self, CatalogFamily, CipherSuiteDescriptor, SuiteId};
use crate::error::Result;
use std::io::Write;
use tracing::{debug, info};

/// Ciphersuites reported by a maximally permissive provider context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiableSuites {
    /// Provider description for diagnostics
    pub provider: String,
    /// Provider-syntax names
    pub suites: Vec<String>,
    /// Whether TLS 1.3 ciphersuites can be selected individually
    pub tls13_configurable: bool,
}

/// Adapter between the negotiation engine and a concrete TLS provider
pub trait ProviderAdapter {
    /// Provider specific result of applying cipher lists
    type Configured;

    /// Enumerate every ciphersuite a permissive context of this provider can
    /// negotiate, including zero-strength ones. Any temporary context must be
    /// released before returning, on success and on failure.
    fn negotiable_suites(&self) -> Result<NegotiableSuites>;

    /// Apply colon-separated provider-syntax lists in preference order
    fn accept_cipher_lists(
        &self,
        classic: &str,
        tls13: &str,
        tls13_enabled: bool,
    ) -> Result<Self::Configured>;
}

/// Which catalog entries the linked provider can negotiate.
///
/// Computed once per provider and shared read-only between handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSupport {
    provider: String,
    classic: u64,
    tls13: u64,
    tls13_configurable: bool,
}

impl ProviderSupport {
    /// Probe a provider for the catalog entries it supports
    pub fn probe<P>(provider: &P) -> Result<Self>
    where
        P: ProviderAdapter + ?Sized,
    {
        let negotiable = provider.negotiable_suites()?;
        let mut support = ProviderSupport {
            provider: negotiable.provider,
            classic: 0,
            tls13: 0,
            tls13_configurable: negotiable.tls13_configurable,
        };

        for name in &negotiable.suites {
            match catalog::lookup_by_provider_name(name) {
                Some(id) => support.mark(id),
                None => debug!("Provider ciphersuite '{}' is not in the catalog, ignored", name),
            }
        }

        info!(
            "TLS provider '{}' supports {} classic and {} TLS 1.3 ciphersuites",
            support.provider,
            support.classic.count_ones(),
            support.tls13.count_ones()
        );
        Ok(support)
    }

    fn mark(&mut self, id: SuiteId) {
        let bit = 1u64 << id.index();
        match id.family() {
            CatalogFamily::Classic => self.classic |= bit,
            CatalogFamily::Tls13 => self.tls13 |= bit,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn is_supported(&self, id: SuiteId) -> bool {
        let bit = 1u64 << id.index();
        match id.family() {
            CatalogFamily::Classic => self.classic & bit != 0,
            CatalogFamily::Tls13 => self.tls13 & bit != 0,
        }
    }

    /// Whether TLS 1.3 ciphersuites can be selected individually
    pub fn is_tls13_configurable(&self) -> bool {
        self.tls13_configurable
    }

    pub fn is_3des_supported(&self) -> bool {
        self.supports_wire_name("TLS_RSA_WITH_3DES_EDE_CBC_SHA")
    }

    pub fn is_null_supported(&self) -> bool {
        self.supports_wire_name("TLS_RSA_WITH_NULL_SHA")
    }

    fn supports_wire_name(&self, wire_name: &str) -> bool {
        catalog::lookup(wire_name).is_some_and(|id| self.is_supported(id))
    }

    /// Supported entries of both catalogs, classic first, weakest first
    pub fn supported_suites(&self) -> impl Iterator<Item = &'static CipherSuiteDescriptor> + '_ {
        catalog::iter(CatalogFamily::Classic)
            .chain(catalog::iter(CatalogFamily::Tls13))
            .filter(move |id| self.is_supported(*id))
            .map(SuiteId::descriptor)
    }

    /// Print the supported ciphersuites, one per line, as RFC name and provider name
    pub fn print_supported_suites<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Supported TLS ciphersuites ({}):", self.provider)?;
        for suite in self.supported_suites() {
            writeln!(out, "    {:<46} {}", suite.wire_name, suite.provider_name)?;
        }
        Ok(())
    }
}
