use dcmtls::catalog::{self, CatalogFamily};
use dcmtls::handler::CiphersuiteHandler;
use dcmtls::negotiation::NetworkRole;
use dcmtls::profile::SecurityProfile;
use dcmtls::provider::{FixedProvider, ProviderSupport};
use std::sync::Arc;

const A: &str = "TLS_RSA_WITH_AES_128_CBC_SHA";
const B: &str = "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256";
const C: &str = "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384";

fn empty_handler() -> CiphersuiteHandler {
    let support = ProviderSupport::probe(&FixedProvider::full_catalog()).unwrap();
    CiphersuiteHandler::new(Arc::new(support))
}

fn provider_name(wire_name: &str) -> &'static str {
    catalog::lookup(wire_name).unwrap().descriptor().provider_name
}

#[test]
fn test_catalog_strength_order() {
    assert!(catalog::lookup(A).unwrap().index() < catalog::lookup(B).unwrap().index());
    assert!(catalog::lookup(B).unwrap().index() < catalog::lookup(C).unwrap().index());
}

#[test]
fn test_server_and_requestor_order() {
    let mut handler = empty_handler();
    for name in [A, C, B] {
        handler.add_cipher_suite(name).unwrap();
    }

    let server = [C, B, A].map(provider_name).join(":");
    let requestor = [A, C, B].map(provider_name).join(":");

    assert_eq!(handler.ordered_suite_names(true), server);
    assert_eq!(handler.ordered_suite_names(false), requestor);
    assert_eq!(handler.negotiation_lists(NetworkRole::Acceptor).cipher_list, server);
    assert_eq!(
        handler.negotiation_lists(NetworkRole::AcceptorRequestor).cipher_list,
        server
    );
    assert_eq!(handler.negotiation_lists(NetworkRole::Requestor).cipher_list, requestor);
}

#[test]
fn test_rendering_does_not_modify_lists() {
    let mut handler = empty_handler();
    for name in [A, C, B] {
        handler.add_cipher_suite(name).unwrap();
    }
    let _ = handler.ordered_suite_names(true);
    assert_eq!(handler.ordered_suite_names(false), [A, C, B].map(provider_name).join(":"));
}

#[test]
fn test_server_order_is_descending_catalog_position() {
    let mut handler = empty_handler();
    let names: Vec<&str> = catalog::iter(CatalogFamily::Classic)
        .map(|id| id.descriptor().wire_name)
        .collect();
    for name in &names {
        handler.add_cipher_suite(name).unwrap();
    }

    let expected: Vec<&str> = names.iter().rev().map(|n| provider_name(n)).collect();
    assert_eq!(handler.ordered_suite_names(true), expected.join(":"));
}

#[test]
fn test_classic_and_tls13_rendered_independently() {
    let mut handler = empty_handler();
    handler.set_profile(SecurityProfile::Bcp195Rfc8996).unwrap();

    let lists = handler.negotiation_lists(NetworkRole::Requestor);
    assert!(!lists.cipher_list.contains("TLS_AES"));
    assert_eq!(
        lists.tls13_cipher_list,
        "TLS_AES_128_GCM_SHA256:TLS_AES_256_GCM_SHA384:TLS_CHACHA20_POLY1305_SHA256"
    );
    assert!(!lists.server_preference);

    let lists = handler.negotiation_lists(NetworkRole::Acceptor);
    assert_eq!(
        lists.tls13_cipher_list,
        "TLS_AES_256_GCM_SHA384:TLS_CHACHA20_POLY1305_SHA256:TLS_AES_128_GCM_SHA256"
    );
    assert_eq!(
        lists.cipher_list,
        "DHE-RSA-AES256-GCM-SHA384:DHE-RSA-CHACHA20-POLY1305:ECDHE-RSA-AES256-GCM-SHA384:\
         ECDHE-ECDSA-AES256-GCM-SHA384:ECDHE-RSA-CHACHA20-POLY1305:ECDHE-ECDSA-CHACHA20-POLY1305:\
         DHE-RSA-AES128-GCM-SHA256:ECDHE-RSA-AES128-GCM-SHA256:ECDHE-ECDSA-AES128-GCM-SHA256"
    );
}
