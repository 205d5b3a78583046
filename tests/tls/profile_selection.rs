use dcmtls::handler::{CiphersuiteHandler, ConfigurationState};
use dcmtls::profile::{PolicyWarning, SecurityProfile};
use dcmtls::provider::{FixedProvider, ProviderSupport};
use dcmtls::{ProtocolVersion, TlsError};
use std::sync::Arc;

fn handler_for(provider: &FixedProvider) -> CiphersuiteHandler {
    let support = ProviderSupport::probe(provider).expect("probe failed");
    CiphersuiteHandler::new(Arc::new(support))
}

#[test]
fn test_none_profile_renders_empty_lists() {
    let mut handler = handler_for(&FixedProvider::full_catalog());
    handler.set_profile(SecurityProfile::None).unwrap();

    for is_server in [true, false] {
        assert_eq!(handler.ordered_suite_names(is_server), "");
        assert_eq!(handler.ordered_tls13_suite_names(is_server), "");
    }
    assert!(handler.is_tls13_enabled());
}

#[test]
fn test_every_profile_activates_on_full_provider() {
    for profile in SecurityProfile::ALL {
        let mut handler = handler_for(&FixedProvider::full_catalog());
        handler.set_profile(profile).unwrap();
        assert_eq!(handler.profile(), profile);
        assert_eq!(handler.state(), ConfigurationState::ProfileActive);
        assert_eq!(handler.is_tls13_enabled(), profile.is_tls13_permitted());
        assert!(handler.warnings().is_empty(), "{profile}: {:?}", handler.warnings());
    }
}

#[test]
fn test_bcp195_without_3des_succeeds_with_warning() {
    let provider = FixedProvider::full_catalog().without("DES-CBC3-SHA");
    let mut handler = handler_for(&provider);

    handler.set_profile(SecurityProfile::Bcp195).unwrap();

    assert_eq!(
        handler.warnings(),
        &[PolicyWarning::OptionalSuiteUnavailable {
            suite: "TLS_RSA_WITH_3DES_EDE_CBC_SHA"
        }]
    );
    assert_eq!(
        handler.ordered_suite_names(false),
        "ECDHE-RSA-AES128-GCM-SHA256:DHE-RSA-AES128-GCM-SHA256:ECDHE-RSA-AES256-GCM-SHA384:DHE-RSA-AES256-GCM-SHA384:AES128-SHA"
    );
}

#[test]
fn test_aes_without_3des_keeps_aes_suite() {
    let provider = FixedProvider::full_catalog().without("DES-CBC3-SHA");
    let mut handler = handler_for(&provider);

    handler.set_profile(SecurityProfile::Aes).unwrap();
    assert_eq!(handler.ordered_suite_names(true), "AES128-SHA");
    assert_eq!(handler.warnings().len(), 1);
}

#[test]
fn test_basic_without_3des_activates_with_warning() {
    let provider = FixedProvider::full_catalog().without("DES-CBC3-SHA");
    let mut handler = handler_for(&provider);

    handler.set_profile(SecurityProfile::Basic).unwrap();
    assert_eq!(handler.state(), ConfigurationState::ProfileActive);
    assert_eq!(handler.ordered_suite_names(true), "");
    assert_eq!(
        handler.warnings(),
        &[PolicyWarning::OptionalSuiteUnavailable {
            suite: "TLS_RSA_WITH_3DES_EDE_CBC_SHA"
        }]
    );
}

#[test]
fn test_missing_required_suite_leaves_partial_lists() {
    let provider = FixedProvider::full_catalog().without("ECDHE-RSA-AES256-GCM-SHA384");
    let mut handler = handler_for(&provider);

    let err = handler.set_profile(SecurityProfile::Bcp195).unwrap_err();
    match err {
        TlsError::UnknownOrUnsupportedCiphersuite(name) => {
            assert_eq!(name, "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384")
        }
        other => panic!("unexpected error: {other}"),
    }

    // no rollback: the suites resolved before the failure stay in place
    assert_eq!(handler.profile(), SecurityProfile::Bcp195);
    assert_eq!(handler.state(), ConfigurationState::Empty);
    assert_eq!(
        handler.ordered_suite_names(false),
        "ECDHE-RSA-AES128-GCM-SHA256:DHE-RSA-AES128-GCM-SHA256"
    );
}

#[test]
fn test_tls13_profile_needs_tls13_control() {
    let provider = FixedProvider::full_catalog().without_tls13_control();
    let mut handler = handler_for(&provider);

    let err = handler.set_profile(SecurityProfile::Bcp195Rfc8996).unwrap_err();
    assert!(matches!(err, TlsError::ProfileNotSupportedByProvider(_)));
    assert!(handler.classic_suites().is_empty());

    // profiles without TLS 1.3 suites are unaffected
    handler.set_profile(SecurityProfile::Bcp195NonDowngrading).unwrap();
}

#[test]
fn test_missing_tls13_suite() {
    let provider = FixedProvider::full_catalog().without("TLS_CHACHA20_POLY1305_SHA256");
    let mut handler = handler_for(&provider);

    let err = handler
        .set_profile(SecurityProfile::Bcp195Rfc8996Modified)
        .unwrap_err();
    assert!(matches!(err, TlsError::UnknownOrUnsupportedCiphersuite(_)));
    assert_eq!(handler.classic_suites().len(), 4);
    assert_eq!(handler.tls13_suites().len(), 1);
}

#[test]
fn test_atna_profile_requires_null() {
    let provider = FixedProvider::full_catalog().without("NULL-SHA");
    let mut handler = handler_for(&provider);
    assert!(!handler.support().is_null_supported());

    let err = handler.set_profile(SecurityProfile::UnencryptedAtna).unwrap_err();
    assert!(matches!(err, TlsError::UnknownOrUnsupportedCiphersuite(_)));
}

#[test]
fn test_minimum_protocol_versions() {
    let mut handler = handler_for(&FixedProvider::full_catalog());

    handler.set_profile(SecurityProfile::Bcp195).unwrap();
    assert_eq!(handler.min_version(), ProtocolVersion::Tls10);

    for profile in [
        SecurityProfile::Bcp195NonDowngrading,
        SecurityProfile::Bcp195Extended,
        SecurityProfile::Bcp195Rfc8996,
        SecurityProfile::Bcp195Rfc8996Modified,
    ] {
        handler.set_profile(profile).unwrap();
        assert_eq!(handler.min_version(), ProtocolVersion::Tls12, "{profile}");
    }
}

#[test]
fn test_set_profile_clears_warnings() {
    let provider = FixedProvider::full_catalog().without("DES-CBC3-SHA");
    let mut handler = handler_for(&provider);

    handler.set_profile(SecurityProfile::Bcp195).unwrap();
    assert!(!handler.warnings().is_empty());

    handler.set_profile(SecurityProfile::Bcp195NonDowngrading).unwrap();
    assert!(handler.warnings().is_empty());
}

#[test]
fn test_profile_names() {
    assert_eq!(SecurityProfile::None.name(), "None");
    assert_eq!(
        SecurityProfile::Bcp195NonDowngrading.name(),
        "Non-downgrading BCP 195 TLS Profile (retired)"
    );
    assert_eq!(
        SecurityProfile::UnencryptedAtna.name(),
        "Authenticated unencrypted communication (retired, was used in IHE ATNA)"
    );
    assert_eq!(SecurityProfile::Bcp195Rfc8996.to_string(), "bcp195-rfc8996");
}
