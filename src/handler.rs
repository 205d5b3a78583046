//! Per-connection ciphersuite configuration
//!
//! A [`CiphersuiteHandler`] holds the profile chosen for one connection setup
//! and the ordered ciphersuite lists derived from it. It is configured
//! synchronously before any I/O and never shared between connections.
//!
//! Failed operations do not roll back: after a failed [`set_profile`] the lists
//! contain whatever was added before the failure. Callers treat any error as
//! fatal for the connection attempt.
//!
//! [`set_profile`]: CiphersuiteHandler::set_profile

use crate::catalog::{self, ProtocolVersion, SuiteId};
use crate::error::{Result, TlsError};
use crate::globals;
use crate::negotiation::{self, NegotiationLists, NetworkRole};
use crate::profile::{PolicyWarning, Requirement, SecurityProfile};
use crate::provider::ProviderSupport;
use std::io::Write;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Lifecycle state of a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationState {
    /// No profile activated yet, or cleared
    Empty,
    /// A profile was activated successfully
    ProfileActive,
    /// Caller-added ciphersuites on top of the profile
    Extended,
}

#[derive(Debug, Clone)]
pub struct CiphersuiteHandler {
    support: Arc<ProviderSupport>,
    profile: SecurityProfile,
    classic: Vec<SuiteId>,
    tls13: Vec<SuiteId>,
    tls13_enabled: bool,
    state: ConfigurationState,
    warnings: Vec<PolicyWarning>,
}

impl CiphersuiteHandler {
    pub fn new(support: Arc<ProviderSupport>) -> Self {
        Self {
            support,
            profile: SecurityProfile::None,
            classic: Vec::new(),
            tls13: Vec::new(),
            tls13_enabled: SecurityProfile::None.is_tls13_permitted(),
            state: ConfigurationState::Empty,
            warnings: Vec::new(),
        }
    }

    /// Create a handler using the process-wide provider registry
    pub fn from_global() -> Result<Self> {
        let support = globals::provider_support().ok_or(TlsError::NotInitialized)?;
        Ok(Self::new(support))
    }

    pub fn profile(&self) -> SecurityProfile {
        self.profile
    }

    pub fn state(&self) -> ConfigurationState {
        self.state
    }

    pub fn support(&self) -> &ProviderSupport {
        &self.support
    }

    /// Warnings recorded since the last profile change
    pub fn warnings(&self) -> &[PolicyWarning] {
        &self.warnings
    }

    pub fn is_tls13_enabled(&self) -> bool {
        self.tls13_enabled
    }

    pub fn min_version(&self) -> ProtocolVersion {
        self.profile.min_version()
    }

    /// Active classic ciphersuites in insertion order
    pub fn classic_suites(&self) -> &[SuiteId] {
        &self.classic
    }

    /// Active TLS 1.3 ciphersuites in insertion order
    pub fn tls13_suites(&self) -> &[SuiteId] {
        &self.tls13
    }

    /// Whether a catalog entry is supported by the provider; `false` for unknown names
    pub fn is_supported(&self, wire_name: &str) -> bool {
        catalog::lookup(wire_name).is_some_and(|id| self.support.is_supported(id))
    }

    fn resolve_supported(&self, wire_name: &str, tls13: bool) -> Option<SuiteId> {
        let id = if tls13 {
            catalog::lookup_tls13(wire_name)
        } else {
            catalog::lookup_classic(wire_name)
        }?;
        self.support.is_supported(id).then_some(id)
    }

    fn reset(&mut self) {
        self.classic.clear();
        self.tls13.clear();
        self.warnings.clear();
        self.state = ConfigurationState::Empty;
    }

    /// Return to the initial state: profile None, empty lists
    pub fn clear_profile(&mut self) {
        self.reset();
        self.profile = SecurityProfile::None;
        self.tls13_enabled = SecurityProfile::None.is_tls13_permitted();
    }

    /// Activate a security profile, replacing any previous configuration
    pub fn set_profile(&mut self, profile: SecurityProfile) -> Result<()> {
        self.reset();
        self.profile = profile;
        let def = profile.definition();
        self.tls13_enabled = def.tls13_permitted;

        if !def.tls13.is_empty() && !self.support.is_tls13_configurable() {
            error!(
                "Security profile '{}' requires TLS 1.3 ciphersuite selection, not available in TLS provider",
                profile.name()
            );
            return Err(TlsError::ProfileNotSupportedByProvider(profile));
        }

        for mandated in def.classic {
            match self.resolve_supported(mandated.wire_name, false) {
                Some(id) => self.classic.push(id),
                None if mandated.requirement == Requirement::Optional => {
                    let warning = PolicyWarning::OptionalSuiteUnavailable {
                        suite: mandated.wire_name,
                    };
                    warn!("{}", warning);
                    self.warnings.push(warning);
                }
                None => {
                    error!(
                        "Ciphersuite '{}' required by security profile '{}' is not supported by TLS provider",
                        mandated.wire_name,
                        profile.name()
                    );
                    return Err(TlsError::unknown_suite(mandated.wire_name));
                }
            }
        }

        for wire_name in def.tls13 {
            match self.resolve_supported(wire_name, true) {
                Some(id) => self.tls13.push(id),
                None => {
                    error!(
                        "TLS 1.3 ciphersuite '{}' required by security profile '{}' is not supported by TLS provider",
                        wire_name,
                        profile.name()
                    );
                    return Err(TlsError::unknown_suite(*wire_name));
                }
            }
        }

        self.state = ConfigurationState::ProfileActive;
        info!("Security profile '{}' activated", profile.name());
        Ok(())
    }

    /// Add a ciphersuite (RFC-style name) on top of the active profile
    pub fn add_cipher_suite(&mut self, name: &str) -> Result<()> {
        let profile = self.profile;
        if profile.is_closed() {
            error!(
                "Security profile '{}' does not permit additional ciphersuites, '{}' rejected",
                profile.name(),
                name
            );
            return Err(TlsError::not_allowed(name, profile));
        }

        let Some(id) = catalog::lookup(name) else {
            error!("Ciphersuite '{}' is unknown", name);
            return Err(TlsError::unknown_suite(name));
        };
        let suite = id.descriptor();
        let is_tls13 = id.family() == catalog::CatalogFamily::Tls13;

        if is_tls13 && !self.tls13_enabled {
            error!(
                "TLS 1.3 ciphersuite '{}' not permitted with security profile '{}'",
                name,
                profile.name()
            );
            return Err(TlsError::not_allowed(name, profile));
        }

        let warnings = match profile.addition_policy().evaluate(suite) {
            Ok(warnings) => warnings,
            Err(reason) => {
                error!(
                    "Ciphersuite '{}' not permitted with security profile '{}': {}",
                    name,
                    profile.name(),
                    reason
                );
                return Err(TlsError::not_allowed(name, profile));
            }
        };

        if !self.support.is_supported(id) {
            error!("Ciphersuite '{}' is not supported by TLS provider", name);
            return Err(TlsError::unknown_suite(name));
        }

        for warning in warnings {
            warn!("{}", warning);
            self.warnings.push(warning);
        }

        if is_tls13 {
            self.tls13.push(id);
        } else {
            self.classic.push(id);
        }
        // additions after a failed activation leave the handler Empty
        if self.state != ConfigurationState::Empty {
            self.state = ConfigurationState::Extended;
        }
        Ok(())
    }

    /// Classic ciphersuite list in provider syntax
    pub fn ordered_suite_names(&self, is_server: bool) -> String {
        negotiation::render(&self.classic, is_server)
    }

    /// TLS 1.3 ciphersuite list in provider syntax
    pub fn ordered_tls13_suite_names(&self, is_server: bool) -> String {
        negotiation::render(&self.tls13, is_server)
    }

    pub fn negotiation_lists(&self, role: NetworkRole) -> NegotiationLists {
        let is_server = role.is_server();
        NegotiationLists {
            cipher_list: self.ordered_suite_names(is_server),
            tls13_cipher_list: self.ordered_tls13_suite_names(is_server),
            tls13_enabled: self.tls13_enabled,
            min_version: self.min_version(),
            server_preference: is_server,
        }
    }

    /// RFC-style names of every ciphersuite the provider supports
    pub fn supported_cipher_suites(&self) -> Vec<&'static str> {
        self.support.supported_suites().map(|s| s.wire_name).collect()
    }

    pub fn print_supported_cipher_suites<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        self.support.print_supported_suites(out)
    }
}
