use dcmtls::config::TlsConfig;
use dcmtls::handler::CiphersuiteHandler;
use dcmtls::negotiation::NetworkRole;
use dcmtls::profile::SecurityProfile;
use dcmtls::provider::{FixedProvider, ProviderSupport, RustlsProvider};
use dcmtls::transport::{self, TlsTransportLayer, DICOM_ALPN_PROTOCOL};
use dcmtls::TlsError;
use rustls::RootCertStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn rustls_handler(profile: SecurityProfile) -> CiphersuiteHandler {
    let support = ProviderSupport::probe(&RustlsProvider::ring()).unwrap();
    let mut handler = CiphersuiteHandler::new(Arc::new(support));
    handler.set_profile(profile).unwrap();
    handler
}

fn acceptor_config() -> TlsConfig {
    TlsConfig {
        profile: SecurityProfile::Bcp195Rfc8996Modified,
        role: NetworkRole::Acceptor,
        cert_path: Some(fixture("server.pem")),
        key_path: Some(fixture("server.key")),
        ..TlsConfig::default()
    }
}

fn requestor_config() -> TlsConfig {
    TlsConfig {
        profile: SecurityProfile::Bcp195Rfc8996Modified,
        role: NetworkRole::Requestor,
        ca_bundle_path: Some(fixture("ca.pem")),
        server_name: Some("localhost".to_string()),
        ..TlsConfig::default()
    }
}

#[test]
fn test_client_config_follows_requestor_order() {
    let provider = RustlsProvider::ring();
    let handler = rustls_handler(SecurityProfile::Bcp195Rfc8996Modified);
    let layer = TlsTransportLayer::new(&provider, &handler, NetworkRole::Requestor).unwrap();

    let config = layer.client_config(RootCertStore::empty(), None).unwrap();
    assert_eq!(config.alpn_protocols, vec![DICOM_ALPN_PROTOCOL.to_vec()]);

    let codes: Vec<u16> = config
        .crypto_provider()
        .cipher_suites
        .iter()
        .map(|s| u16::from(s.suite()))
        .collect();
    // TLS 1.3 first, then the classic list in profile order
    assert_eq!(codes, vec![0x1302, 0x1303, 0xC02C, 0xC030, 0xCCA9, 0xCCA8]);
    assert_eq!(layer.protocol_versions().len(), 2);
}

#[test]
fn test_tls13_disabled_offers_tls12_only() {
    // simulated provider support, rustls keeps the ECDHE subset of the profile
    let support = ProviderSupport::probe(&FixedProvider::full_catalog()).unwrap();
    let mut handler = CiphersuiteHandler::new(Arc::new(support));
    handler.set_profile(SecurityProfile::Bcp195).unwrap();

    let layer = TlsTransportLayer::new(&RustlsProvider::ring(), &handler, NetworkRole::Acceptor)
        .unwrap();
    let versions: Vec<_> = layer.protocol_versions().iter().map(|v| v.version).collect();
    assert_eq!(versions, vec![rustls::ProtocolVersion::TLSv1_2]);
    assert!(layer
        .crypto_provider()
        .cipher_suites
        .iter()
        .all(|s| s.tls13().is_none()));
}

#[test]
fn test_no_common_suite_is_a_provider_error() {
    let support = ProviderSupport::probe(&FixedProvider::full_catalog()).unwrap();
    let mut handler = CiphersuiteHandler::new(Arc::new(support));
    handler.set_profile(SecurityProfile::UnencryptedAtna).unwrap();

    let err = TlsTransportLayer::new(&RustlsProvider::ring(), &handler, NetworkRole::Acceptor)
        .unwrap_err();
    assert!(matches!(err, TlsError::Provider(_)));
}

#[test]
fn test_role_checks() {
    let provider = RustlsProvider::ring();
    let handler = rustls_handler(SecurityProfile::Bcp195Rfc8996Modified);

    let layer = TlsTransportLayer::new(&provider, &handler, NetworkRole::Requestor).unwrap();
    assert!(matches!(layer.acceptor(&acceptor_config()), Err(TlsError::Config(_))));

    let layer = TlsTransportLayer::new(&provider, &handler, NetworkRole::Acceptor).unwrap();
    assert!(matches!(layer.connector(&requestor_config()), Err(TlsError::Config(_))));
}

#[test]
fn test_pem_loading_errors() {
    let empty = tempfile::NamedTempFile::new().unwrap();
    assert!(matches!(
        transport::load_certificates(empty.path()),
        Err(TlsError::Config(_))
    ));
    assert!(matches!(
        transport::load_private_key(empty.path()),
        Err(TlsError::Config(_))
    ));
    assert!(matches!(
        transport::load_certificates(&fixture("missing.pem")),
        Err(TlsError::Io(_))
    ));
    assert_eq!(transport::load_certificates(&fixture("server.pem")).unwrap().len(), 1);
}

#[test]
fn test_server_name() {
    assert!(transport::server_name(&requestor_config()).is_ok());
    assert!(transport::server_name(&TlsConfig::default()).is_err());
}

#[tokio::test]
async fn test_handshake_negotiates_strongest_suite_and_alpn() {
    let provider = RustlsProvider::ring();
    let handler = rustls_handler(SecurityProfile::Bcp195Rfc8996Modified);

    let server = TlsTransportLayer::new(&provider, &handler, NetworkRole::Acceptor)
        .unwrap()
        .acceptor(&acceptor_config())
        .unwrap();
    let client = TlsTransportLayer::new(&provider, &handler, NetworkRole::Requestor)
        .unwrap()
        .connector(&requestor_config())
        .unwrap();
    let server_name = transport::server_name(&requestor_config()).unwrap();

    let (client_io, server_io) = tokio::io::duplex(16 * 1024);

    let server_task = tokio::spawn(async move {
        let mut stream = server.accept(server_io).await.unwrap();
        let mut buf = [0u8; 4];
        stream.read_exact(&mut buf).await.unwrap();
        stream.write_all(&buf).await.unwrap();
        stream.flush().await.unwrap();
        let (_, conn) = stream.get_ref();
        (
            conn.negotiated_cipher_suite().map(|s| u16::from(s.suite())),
            conn.alpn_protocol().map(|p| p.to_vec()),
        )
    });

    let mut stream = client.connect(server_name, client_io).await.unwrap();
    stream.write_all(b"A-AS").await.unwrap();
    stream.flush().await.unwrap();
    let mut echo = [0u8; 4];
    stream.read_exact(&mut echo).await.unwrap();
    assert_eq!(&echo, b"A-AS");

    let (suite, alpn) = server_task.await.unwrap();
    assert_eq!(suite, Some(0x1302));
    assert_eq!(alpn.as_deref(), Some(DICOM_ALPN_PROTOCOL));
}
