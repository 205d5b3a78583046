//! Rendering of the final ciphersuite lists handed to the provider

use crate::catalog::{ProtocolVersion, SuiteId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role of this application in the DICOM association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkRole {
    /// Accepts associations (TLS server)
    Acceptor,
    /// Requests associations (TLS client)
    #[default]
    Requestor,
    /// Both; configured like an acceptor
    AcceptorRequestor,
}

impl NetworkRole {
    /// Whether the server-side ordering applies
    pub fn is_server(self) -> bool {
        !matches!(self, NetworkRole::Requestor)
    }
}

/// Everything the transport needs to configure a provider context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationLists {
    /// Colon-separated classic ciphersuites, provider syntax
    pub cipher_list: String,
    /// Colon-separated TLS 1.3 ciphersuites, provider syntax
    pub tls13_cipher_list: String,
    pub tls13_enabled: bool,
    pub min_version: ProtocolVersion,
    /// Server picks the ciphersuite by its own preference
    pub server_preference: bool,
}

/// Order a suite list for negotiation.
///
/// Servers offer the strongest suite first (descending catalog position).
/// Requestors keep the caller's order, since the server decides anyway.
pub fn order(suites: &[SuiteId], is_server: bool) -> Vec<SuiteId> {
    let mut ordered = suites.to_vec();
    if is_server {
        ordered.sort_by(|a, b| b.index().cmp(&a.index()));
    }
    ordered
}

/// Render a suite list as colon-joined provider names
pub fn render(suites: &[SuiteId], is_server: bool) -> String {
    let list = order(suites, is_server)
        .into_iter()
        .map(|id| id.descriptor().provider_name)
        .collect::<Vec<_>>()
        .join(":");
    debug!("Negotiation list ({}): {}", if is_server { "server" } else { "client" }, list);
    list
}
