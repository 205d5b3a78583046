use dcmtls::handler::{CiphersuiteHandler, ConfigurationState};
use dcmtls::profile::{PolicyWarning, SecurityProfile};
use dcmtls::provider::{FixedProvider, ProviderSupport};
use dcmtls::TlsError;
use std::sync::Arc;

fn handler_with(provider: &FixedProvider, profile: SecurityProfile) -> CiphersuiteHandler {
    let support = ProviderSupport::probe(provider).expect("probe failed");
    let mut handler = CiphersuiteHandler::new(Arc::new(support));
    handler.set_profile(profile).expect("profile activation failed");
    handler
}

fn is_not_allowed(result: dcmtls::Result<()>) -> bool {
    matches!(result, Err(TlsError::CiphersuiteNotAllowedByProfile { .. }))
}

fn is_unknown(result: dcmtls::Result<()>) -> bool {
    matches!(result, Err(TlsError::UnknownOrUnsupportedCiphersuite(_)))
}

#[test]
fn test_rfc8996_rejects_static_rsa_cbc() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::Bcp195Rfc8996);
    let before = handler.ordered_suite_names(false);

    assert!(is_not_allowed(
        handler.add_cipher_suite("TLS_RSA_WITH_AES_128_CBC_SHA256")
    ));
    assert_eq!(handler.ordered_suite_names(false), before);
    assert_eq!(handler.state(), ConfigurationState::ProfileActive);
}

#[test]
fn test_rfc8996_warns_on_static_rsa_gcm() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::Bcp195Rfc8996);

    handler
        .add_cipher_suite("TLS_RSA_WITH_AES_128_GCM_SHA256")
        .unwrap();

    assert_eq!(
        handler.warnings(),
        &[PolicyWarning::StaticRsaKeyTransport {
            suite: "TLS_RSA_WITH_AES_128_GCM_SHA256"
        }]
    );
    assert!(handler
        .ordered_suite_names(false)
        .ends_with(":AES128-GCM-SHA256"));
    assert_eq!(handler.state(), ConfigurationState::Extended);
}

#[test]
fn test_rfc8996_rejects_sha1() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::Bcp195Rfc8996);
    for name in [
        "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
        "TLS_DHE_RSA_WITH_AES_128_CBC_SHA",
        "TLS_RSA_WITH_3DES_EDE_CBC_SHA",
    ] {
        assert!(is_not_allowed(handler.add_cipher_suite(name)), "{name}");
    }
}

#[test]
fn test_rfc8996_accepts_tls13_additions() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::Bcp195Rfc8996);
    handler.add_cipher_suite("TLS_AES_128_CCM_SHA256").unwrap();
    assert!(handler.warnings().is_empty());
    assert_eq!(
        handler.ordered_tls13_suite_names(true),
        "TLS_AES_256_GCM_SHA384:TLS_CHACHA20_POLY1305_SHA256:TLS_AES_128_GCM_SHA256:TLS_AES_128_CCM_SHA256"
    );
}

#[test]
fn test_closed_profiles_reject_everything() {
    for profile in [
        SecurityProfile::Bcp195Extended,
        SecurityProfile::Bcp195Rfc8996Modified,
    ] {
        let mut handler = handler_with(&FixedProvider::full_catalog(), profile);
        let before = (
            handler.ordered_suite_names(true),
            handler.ordered_tls13_suite_names(true),
        );

        for name in [
            "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
            "TLS_AES_128_GCM_SHA256",
            "TLS_RSA_WITH_NULL_SHA",
            "NO_SUCH_CIPHERSUITE",
        ] {
            assert!(is_not_allowed(handler.add_cipher_suite(name)), "{profile}: {name}");
        }
        assert_eq!(
            before,
            (
                handler.ordered_suite_names(true),
                handler.ordered_tls13_suite_names(true)
            )
        );
    }
}

#[test]
fn test_null_suite_allowed_without_profile() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::None);
    handler.add_cipher_suite("TLS_RSA_WITH_NULL_SHA").unwrap();
    assert_eq!(handler.ordered_suite_names(true), "NULL-SHA");
}

#[test]
fn test_null_suite_rejected_by_secure_profiles() {
    // the profile gate applies whether or not the provider supports the suite
    let with_null = FixedProvider::full_catalog();
    let without_null = FixedProvider::full_catalog().without("NULL-SHA");

    for provider in [&with_null, &without_null] {
        for profile in [
            SecurityProfile::Basic,
            SecurityProfile::Aes,
            SecurityProfile::Bcp195,
            SecurityProfile::Bcp195NonDowngrading,
            SecurityProfile::Bcp195Rfc8996,
        ] {
            let mut handler = handler_with(provider, profile);
            assert!(
                is_not_allowed(handler.add_cipher_suite("TLS_RSA_WITH_NULL_SHA")),
                "{profile}"
            );
        }
    }
}

#[test]
fn test_null_suite_unsupported_without_profile() {
    let provider = FixedProvider::full_catalog().without("NULL-SHA");
    let mut handler = handler_with(&provider, SecurityProfile::None);
    assert!(is_unknown(handler.add_cipher_suite("TLS_RSA_WITH_NULL_SHA")));
}

#[test]
fn test_baseline_warns_on_static_rsa() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::Bcp195NonDowngrading);
    handler
        .add_cipher_suite("TLS_RSA_WITH_AES_256_GCM_SHA384")
        .unwrap();
    assert_eq!(handler.warnings().len(), 1);

    handler
        .add_cipher_suite("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384")
        .unwrap();
    assert_eq!(handler.warnings().len(), 1);
}

#[test]
fn test_tls13_rejected_by_legacy_profiles() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::Bcp195);
    assert!(is_not_allowed(handler.add_cipher_suite("TLS_AES_256_GCM_SHA384")));
    assert!(handler.tls13_suites().is_empty());
}

#[test]
fn test_unknown_names() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::None);
    assert!(is_unknown(handler.add_cipher_suite("TLS_RSA_WITH_RC4_128_MD5")));
    // provider syntax is not accepted as input
    assert!(is_unknown(handler.add_cipher_suite("ECDHE-RSA-AES128-GCM-SHA256")));
    // names are case-sensitive
    assert!(is_unknown(handler.add_cipher_suite("tls_aes_128_gcm_sha256")));
    assert!(handler.classic_suites().is_empty());
}

#[test]
fn test_unsupported_by_provider() {
    let provider = FixedProvider::full_catalog().without("ECDHE-ECDSA-AES128-SHA256");
    let mut handler = handler_with(&provider, SecurityProfile::None);
    assert!(is_unknown(
        handler.add_cipher_suite("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256")
    ));
    assert!(!handler.is_supported("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256"));
}

#[test]
fn test_duplicates_are_not_removed() {
    let mut handler = handler_with(&FixedProvider::full_catalog(), SecurityProfile::None);
    handler.add_cipher_suite("TLS_AES_128_GCM_SHA256").unwrap();
    handler.add_cipher_suite("TLS_AES_128_GCM_SHA256").unwrap();
    assert_eq!(handler.tls13_suites().len(), 2);
}
