//! Provider with a fixed ciphersuite list
//!
//! Stands in for a linked TLS library in tests and simulates provider builds
//! that lack some ciphersuites or TLS 1.3 control.

use super::{NegotiableSuites, ProviderAdapter};
use crate::catalog::{self, CatalogFamily};
use crate::condition::{ProtocolCondition, TlsCondition};
use crate::error::{Result, TlsError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Provider with a fixed, configurable set of negotiable ciphersuites.
///
/// Useful to simulate provider builds (with or without 3DES, NULL or TLS 1.3
/// control) independently of the provider linked into the process.
#[derive(Debug, Clone)]
pub struct FixedProvider {
    description: String,
    suites: Vec<String>,
    tls13_configurable: bool,
    fail_enumeration: bool,
    open_contexts: Arc<AtomicUsize>,
}

/// Cipher lists as accepted by a [`FixedProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherLists {
    pub classic: Vec<String>,
    pub tls13: Vec<String>,
    pub tls13_enabled: bool,
}

/// Temporary permissive context, released on drop
struct ProbeContext<'a> {
    open: &'a AtomicUsize,
}

impl<'a> ProbeContext<'a> {
    fn open(open: &'a AtomicUsize) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self { open }
    }
}

impl Drop for ProbeContext<'_> {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FixedProvider {
    pub fn with_suites<I, S>(description: impl Into<String>, suites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            description: description.into(),
            suites: suites.into_iter().map(Into::into).collect(),
            tls13_configurable: true,
            fail_enumeration: false,
            open_contexts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider able to negotiate every catalog entry
    pub fn full_catalog() -> Self {
        let suites = catalog::iter(CatalogFamily::Classic)
            .chain(catalog::iter(CatalogFamily::Tls13))
            .map(|id| id.descriptor().provider_name);
        Self::with_suites("full catalog", suites)
    }

    /// Remove a suite, given in provider syntax
    pub fn without(mut self, provider_name: &str) -> Self {
        self.suites.retain(|s| s != provider_name);
        self
    }

    /// Simulate a provider that cannot select TLS 1.3 ciphersuites
    pub fn without_tls13_control(mut self) -> Self {
        self.tls13_configurable = false;
        self
    }

    /// Make enumeration fail after the probe context was opened
    pub fn failing(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }

    /// Number of probe contexts currently alive
    pub fn open_contexts(&self) -> usize {
        self.open_contexts.load(Ordering::SeqCst)
    }

    fn parse_list(&self, list: &str) -> Vec<String> {
        list.split(':')
            .filter(|name| !name.is_empty())
            .filter(|name| {
                let known = self.suites.iter().any(|s| s == name);
                if !known {
                    debug!("Ciphersuite '{}' not available in '{}', ignored", name, self.description);
                }
                known
            })
            .map(str::to_string)
            .collect()
    }
}

impl ProviderAdapter for FixedProvider {
    type Configured = CipherLists;

    fn negotiable_suites(&self) -> Result<NegotiableSuites> {
        let _context = ProbeContext::open(&self.open_contexts);
        if self.fail_enumeration {
            return Err(TlsError::Provider(TlsCondition::OtherProvider {
                code: 0,
                text: format!("{}: unable to create TLS context", self.description),
            }));
        }
        Ok(NegotiableSuites {
            provider: self.description.clone(),
            suites: self.suites.clone(),
            tls13_configurable: self.tls13_configurable,
        })
    }

    fn accept_cipher_lists(
        &self,
        classic: &str,
        tls13: &str,
        tls13_enabled: bool,
    ) -> Result<CipherLists> {
        let classic = self.parse_list(classic);
        let tls13 = if tls13_enabled { self.parse_list(tls13) } else { Vec::new() };
        if classic.is_empty() && tls13.is_empty() {
            return Err(TlsError::Provider(TlsCondition::Protocol(
                ProtocolCondition::NoCipherMatch,
            )));
        }
        Ok(CipherLists {
            classic,
            tls13,
            tls13_enabled,
        })
    }
}
