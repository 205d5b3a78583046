//! TLS transport layer for DICOM associations
//!
//! Turns a configured [`CiphersuiteHandler`] into rustls server and client
//! configurations, and from there into tokio acceptors and connectors.
//! Acceptors choose the ciphersuite by their own preference. Both sides
//! announce the `dicom` application protocol through ALPN.

use crate::catalog::ProtocolVersion;
use crate::config::TlsConfig;
use crate::error::{Result, TlsError};
use crate::handler::CiphersuiteHandler;
use crate::negotiation::{NegotiationLists, NetworkRole};
use crate::provider::{ProviderAdapter, RustlsProvider};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName};
use rustls::server::WebPkiClientVerifier;
use rustls::{ClientConfig, RootCertStore, ServerConfig, SupportedProtocolVersion};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tokio_rustls::{TlsAcceptor, TlsConnector};
use tracing::{debug, info};

/// ALPN identifier of the DICOM upper layer protocol
pub const DICOM_ALPN_PROTOCOL: &[u8] = b"dicom";

#[derive(Debug, Clone)]
pub struct TlsTransportLayer {
    role: NetworkRole,
    lists: NegotiationLists,
    provider: Arc<CryptoProvider>,
}

impl TlsTransportLayer {
    /// Apply the handler's negotiation lists for `role` to a rustls provider
    pub fn new(
        rustls: &RustlsProvider,
        handler: &CiphersuiteHandler,
        role: NetworkRole,
    ) -> Result<Self> {
        let lists = handler.negotiation_lists(role);
        let provider = rustls.accept_cipher_lists(
            &lists.cipher_list,
            &lists.tls13_cipher_list,
            lists.tls13_enabled,
        )?;
        info!(
            "TLS transport for {:?} using security profile '{}'",
            role,
            handler.profile().name()
        );
        Ok(Self {
            role,
            lists,
            provider,
        })
    }

    pub fn role(&self) -> NetworkRole {
        self.role
    }

    pub fn lists(&self) -> &NegotiationLists {
        &self.lists
    }

    /// Provider restricted to the negotiated ciphersuites, in preference order
    pub fn crypto_provider(&self) -> &Arc<CryptoProvider> {
        &self.provider
    }

    pub fn protocol_versions(&self) -> Vec<&'static SupportedProtocolVersion> {
        if self.lists.min_version < ProtocolVersion::Tls12 {
            debug!("Protocol versions below TLS 1.2 are never offered");
        }
        let mut versions = Vec::new();
        if self.lists.tls13_enabled {
            versions.push(&rustls::version::TLS13);
        }
        if self.provider.cipher_suites.iter().any(|s| s.tls13().is_none()) {
            versions.push(&rustls::version::TLS12);
        }
        versions
    }

    pub fn server_config(
        &self,
        certs: Vec<CertificateDer<'static>>,
        key: PrivateKeyDer<'static>,
        client_roots: Option<RootCertStore>,
    ) -> Result<ServerConfig> {
        let builder = ServerConfig::builder_with_provider(self.provider.clone())
            .with_protocol_versions(&self.protocol_versions())?;

        let builder = match client_roots {
            Some(roots) => {
                let verifier =
                    WebPkiClientVerifier::builder_with_provider(Arc::new(roots), self.provider.clone())
                        .build()
                        .map_err(|e| TlsError::config(format!("client certificate verifier: {e}")))?;
                builder.with_client_cert_verifier(verifier)
            }
            None => builder.with_no_client_auth(),
        };

        let mut config = builder.with_single_cert(certs, key)?;
        config.ignore_client_order = self.lists.server_preference;
        config.alpn_protocols = vec![DICOM_ALPN_PROTOCOL.to_vec()];
        Ok(config)
    }

    pub fn client_config(
        &self,
        roots: RootCertStore,
        client_auth: Option<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>)>,
    ) -> Result<ClientConfig> {
        let builder = ClientConfig::builder_with_provider(self.provider.clone())
            .with_protocol_versions(&self.protocol_versions())?
            .with_root_certificates(roots);

        let mut config = match client_auth {
            Some((certs, key)) => builder.with_client_auth_cert(certs, key)?,
            None => builder.with_no_client_auth(),
        };
        config.alpn_protocols = vec![DICOM_ALPN_PROTOCOL.to_vec()];
        Ok(config)
    }

    /// Build an acceptor from the certificate settings in `config`
    pub fn acceptor(&self, config: &TlsConfig) -> Result<TlsAcceptor> {
        if !self.role.is_server() {
            return Err(TlsError::config("acceptor requested for a requestor-only transport"));
        }
        let (cert_path, key_path) = match (&config.cert_path, &config.key_path) {
            (Some(cert), Some(key)) => (cert, key),
            _ => return Err(TlsError::config("acceptor requires cert_path and key_path")),
        };
        let certs = load_certificates(cert_path)?;
        let key = load_private_key(key_path)?;
        let client_roots = if config.require_client_cert {
            match &config.ca_bundle_path {
                Some(path) => Some(load_root_store(path)?),
                None => {
                    return Err(TlsError::config(
                        "require_client_cert needs ca_bundle_path to verify peer certificates",
                    ))
                }
            }
        } else {
            None
        };
        let server = self.server_config(certs, key, client_roots)?;
        Ok(TlsAcceptor::from(Arc::new(server)))
    }

    /// Build a connector from the trust and certificate settings in `config`
    pub fn connector(&self, config: &TlsConfig) -> Result<TlsConnector> {
        if self.role == NetworkRole::Acceptor {
            return Err(TlsError::config("connector requested for an acceptor-only transport"));
        }
        let roots = match &config.ca_bundle_path {
            Some(path) => load_root_store(path)?,
            None => return Err(TlsError::config("requestor requires ca_bundle_path")),
        };
        let client_auth = match (&config.cert_path, &config.key_path) {
            (Some(cert), Some(key)) => Some((load_certificates(cert)?, load_private_key(key)?)),
            _ => None,
        };
        let client = self.client_config(roots, client_auth)?;
        Ok(TlsConnector::from(Arc::new(client)))
    }
}

/// Server name a requestor should present, from `server_name`
pub fn server_name(config: &TlsConfig) -> Result<ServerName<'static>> {
    let name = config
        .server_name
        .clone()
        .ok_or_else(|| TlsError::config("requestor requires server_name"))?;
    ServerName::try_from(name.clone())
        .map_err(|e| TlsError::config(format!("invalid server name '{name}': {e}")))
}

/// Load all certificates from a PEM file
pub fn load_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = BufReader::new(File::open(path)?);
    let certs = rustls_pemfile::certs(&mut reader).collect::<std::io::Result<Vec<_>>>()?;
    if certs.is_empty() {
        return Err(TlsError::config(format!(
            "no certificates found in {}",
            path.display()
        )));
    }
    debug!("Loaded {} certificates from {}", certs.len(), path.display());
    Ok(certs)
}

/// Load the first private key from a PEM file
pub fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>> {
    let mut reader = BufReader::new(File::open(path)?);
    rustls_pemfile::private_key(&mut reader)?
        .ok_or_else(|| TlsError::config(format!("no private key found in {}", path.display())))
}

/// Load a PEM bundle of trusted certificates
pub fn load_root_store(path: &Path) -> Result<RootCertStore> {
    let mut roots = RootCertStore::empty();
    for cert in load_certificates(path)? {
        roots.add(cert)?;
    }
    Ok(roots)
}
