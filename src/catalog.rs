//! Compiled-in ciphersuite catalog
//!
//! Two disjoint tables: the classic catalog (TLS 1.2 and below) and the TLS 1.3
//! catalog. Both are sorted from the weakest to the strongest entry:
//! - first by availability of forward secrecy (static RSA/ECDH < ECDHE/DHE)
//! - then by effective key size
//! - then by MAC (SHA-1 < SHA-256 < SHA-384, CBC < AEAD)
//!
//! The negotiation order for acceptors relies on this ordering, so new entries
//! must be inserted at the position matching their strength.

use std::fmt;

/// Lowest protocol version a ciphersuite (or profile) can be used with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    /// SSL 3.0 and later (SSL itself is never negotiated)
    Ssl3,
    Tls10,
    Tls11,
    Tls12,
    Tls13,
}

/// Key exchange algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyExchange {
    /// Static RSA key transport
    Rsa,
    /// Static ECDH with an ECDSA-signed certificate
    EcdhEcdsa,
    /// Static ECDH with an RSA-signed certificate
    EcdhRsa,
    /// Ephemeral elliptic curve Diffie-Hellman
    Ecdhe,
    /// Ephemeral finite-field Diffie-Hellman
    Dhe,
    /// TLS 1.3 (always ephemeral, negotiated separately from the suite)
    Tls13,
}

impl KeyExchange {
    /// Whether this key exchange provides forward secrecy
    pub fn provides_forward_secrecy(self) -> bool {
        matches!(self, KeyExchange::Ecdhe | KeyExchange::Dhe | KeyExchange::Tls13)
    }

    /// Whether this is a static (non-ephemeral) key exchange
    pub fn is_static(self) -> bool {
        !self.provides_forward_secrecy()
    }
}

/// Authentication algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authentication {
    Rsa,
    Ecdh,
    Ecdsa,
    Dss,
    /// TLS 1.3 suites do not fix the authentication algorithm
    Any,
}

/// Bulk encryption algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkCipher {
    None,
    TripleDes,
    Aes,
    Camellia,
    AesGcm,
    AesCcm,
    AesCcm8,
    ChaCha20Poly1305,
}

/// Message authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mac {
    Sha1,
    Sha256,
    Sha384,
    /// Integrity provided by the AEAD cipher
    Aead,
}

/// Mode of operation, derived from the bulk cipher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    /// No encryption at all
    None,
    Cbc,
    Aead,
}

/// Which of the two catalogs an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFamily {
    /// TLS 1.2 and below
    Classic,
    Tls13,
}

/// Immutable description of one ciphersuite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSuiteDescriptor {
    /// RFC-style name, e.g. `TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256`
    pub wire_name: &'static str,
    /// Provider syntax (OpenSSL naming), e.g. `ECDHE-RSA-AES128-GCM-SHA256`
    pub provider_name: &'static str,
    /// IANA code point
    pub code_point: u16,
    pub min_version: ProtocolVersion,
    pub key_exchange: KeyExchange,
    pub authentication: Authentication,
    pub cipher: BulkCipher,
    pub mac: Mac,
    /// Nominal key size in bits
    pub key_size: u16,
    /// Effective key size in bits
    pub effective_key_size: u16,
}

impl CipherSuiteDescriptor {
    pub fn mode(&self) -> CipherMode {
        match self.cipher {
            BulkCipher::None => CipherMode::None,
            BulkCipher::TripleDes | BulkCipher::Aes | BulkCipher::Camellia => CipherMode::Cbc,
            BulkCipher::AesGcm
            | BulkCipher::AesCcm
            | BulkCipher::AesCcm8
            | BulkCipher::ChaCha20Poly1305 => CipherMode::Aead,
        }
    }

    pub fn provides_forward_secrecy(&self) -> bool {
        self.key_exchange.provides_forward_secrecy()
    }

    /// Whether the suite encrypts at all
    pub fn is_encrypted(&self) -> bool {
        self.effective_key_size > 0
    }
}

impl fmt::Display for CipherSuiteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name)
    }
}

/// Validated reference to a catalog entry.
///
/// Only produced by the lookup functions of this module, so the wrapped
/// index is always in range for its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuiteId {
    family: CatalogFamily,
    index: usize,
}

impl SuiteId {
    pub fn family(self) -> CatalogFamily {
        self.family
    }

    /// Position within its catalog (0 is the weakest entry)
    pub fn index(self) -> usize {
        self.index
    }

    pub fn descriptor(self) -> &'static CipherSuiteDescriptor {
        match self.family {
            CatalogFamily::Classic => &CLASSIC_SUITES[self.index],
            CatalogFamily::Tls13 => &TLS13_SUITES[self.index],
        }
    }

    pub(crate) fn classic(index: usize) -> Option<Self> {
        (index < CLASSIC_SUITES.len()).then_some(Self {
            family: CatalogFamily::Classic,
            index,
        })
    }

    pub(crate) fn tls13(index: usize) -> Option<Self> {
        (index < TLS13_SUITES.len()).then_some(Self {
            family: CatalogFamily::Tls13,
            index,
        })
    }
}

#[allow(clippy::too_many_arguments)]
const fn suite(
    wire_name: &'static str,
    provider_name: &'static str,
    code_point: u16,
    min_version: ProtocolVersion,
    key_exchange: KeyExchange,
    authentication: Authentication,
    cipher: BulkCipher,
    mac: Mac,
    key_size: u16,
    effective_key_size: u16,
) -> CipherSuiteDescriptor {
    CipherSuiteDescriptor {
        wire_name,
        provider_name,
        code_point,
        min_version,
        key_exchange,
        authentication,
        cipher,
        mac,
        key_size,
        effective_key_size,
    }
}

use Authentication as A;
use BulkCipher as C;
use KeyExchange as K;
use Mac as M;
use ProtocolVersion::{Ssl3, Tls12, Tls13};

const CLASSIC_COUNT: usize = 53;
const TLS13_COUNT: usize = 5;

// The provider support bitmask keeps one bit per entry in a u64.
const _: () = assert!(CLASSIC_COUNT <= 64 && TLS13_COUNT <= 64);

/// Classic (TLS 1.2 and below) catalog, weakest first.
#[rustfmt::skip]
pub static CLASSIC_SUITES: [CipherSuiteDescriptor; CLASSIC_COUNT] = [
    // -- no forward secrecy --

    // historic ciphersuites
    suite("TLS_RSA_WITH_NULL_SHA",                        "NULL-SHA",                      0x0002, Ssl3,  K::Rsa,       A::Rsa,   C::None,             M::Sha1,     0,   0),
    suite("TLS_RSA_WITH_3DES_EDE_CBC_SHA",                "DES-CBC3-SHA",                  0x000A, Ssl3,  K::Rsa,       A::Rsa,   C::TripleDes,        M::Sha1,   168, 112),

    // 128 bit, static RSA
    suite("TLS_RSA_WITH_AES_128_CBC_SHA",                 "AES128-SHA",                    0x002F, Ssl3,  K::Rsa,       A::Rsa,   C::Aes,              M::Sha1,   128, 128),
    suite("TLS_RSA_WITH_CAMELLIA_128_CBC_SHA",            "CAMELLIA128-SHA",               0x0041, Ssl3,  K::Rsa,       A::Rsa,   C::Camellia,         M::Sha1,   128, 128),
    suite("TLS_RSA_WITH_AES_128_CBC_SHA256",              "AES128-SHA256",                 0x003C, Tls12, K::Rsa,       A::Rsa,   C::Aes,              M::Sha256, 128, 128),
    suite("TLS_RSA_WITH_AES_128_GCM_SHA256",              "AES128-GCM-SHA256",             0x009C, Tls12, K::Rsa,       A::Rsa,   C::AesGcm,           M::Aead,   128, 128),

    // 128 bit, static ECDH
    suite("TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA",          "ECDH-ECDSA-AES128-SHA",         0xC004, Ssl3,  K::EcdhEcdsa, A::Ecdh,  C::Aes,              M::Sha1,   128, 128),
    suite("TLS_ECDH_RSA_WITH_AES_128_CBC_SHA",            "ECDH-RSA-AES128-SHA",           0xC00E, Ssl3,  K::EcdhRsa,   A::Ecdh,  C::Aes,              M::Sha1,   128, 128),
    suite("TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA256",       "ECDH-ECDSA-AES128-SHA256",      0xC025, Tls12, K::EcdhEcdsa, A::Ecdh,  C::Aes,              M::Sha256, 128, 128),
    suite("TLS_ECDH_RSA_WITH_AES_128_CBC_SHA256",         "ECDH-RSA-AES128-SHA256",        0xC029, Tls12, K::EcdhRsa,   A::Ecdh,  C::Aes,              M::Sha256, 128, 128),
    suite("TLS_ECDH_ECDSA_WITH_AES_128_GCM_SHA256",       "ECDH-ECDSA-AES128-GCM-SHA256",  0xC02D, Tls12, K::EcdhEcdsa, A::Ecdh,  C::AesGcm,           M::Aead,   128, 128),
    suite("TLS_ECDH_RSA_WITH_AES_128_GCM_SHA256",         "ECDH-RSA-AES128-GCM-SHA256",    0xC031, Tls12, K::EcdhRsa,   A::Ecdh,  C::AesGcm,           M::Aead,   128, 128),

    // 256 bit, static RSA
    suite("TLS_RSA_WITH_CAMELLIA_256_CBC_SHA",            "CAMELLIA256-SHA",               0x0084, Ssl3,  K::Rsa,       A::Rsa,   C::Camellia,         M::Sha1,   256, 256),
    suite("TLS_RSA_WITH_AES_256_CBC_SHA",                 "AES256-SHA",                    0x0035, Ssl3,  K::Rsa,       A::Rsa,   C::Aes,              M::Sha1,   256, 256),
    suite("TLS_RSA_WITH_AES_256_CBC_SHA256",              "AES256-SHA256",                 0x003D, Tls12, K::Rsa,       A::Rsa,   C::Aes,              M::Sha256, 256, 256),
    suite("TLS_RSA_WITH_AES_256_GCM_SHA384",              "AES256-GCM-SHA384",             0x009D, Tls12, K::Rsa,       A::Rsa,   C::AesGcm,           M::Aead,   256, 256),

    // 256 bit, static ECDH
    suite("TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA",          "ECDH-ECDSA-AES256-SHA",         0xC005, Ssl3,  K::EcdhEcdsa, A::Ecdh,  C::Aes,              M::Sha1,   256, 256),
    suite("TLS_ECDH_RSA_WITH_AES_256_CBC_SHA",            "ECDH-RSA-AES256-SHA",           0xC00F, Ssl3,  K::EcdhRsa,   A::Ecdh,  C::Aes,              M::Sha1,   256, 256),
    suite("TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA384",       "ECDH-ECDSA-AES256-SHA384",      0xC026, Tls12, K::EcdhEcdsa, A::Ecdh,  C::Aes,              M::Sha384, 256, 256),
    suite("TLS_ECDH_RSA_WITH_AES_256_CBC_SHA384",         "ECDH-RSA-AES256-SHA384",        0xC02A, Tls12, K::EcdhRsa,   A::Ecdh,  C::Aes,              M::Sha384, 256, 256),
    suite("TLS_ECDH_ECDSA_WITH_AES_256_GCM_SHA384",       "ECDH-ECDSA-AES256-GCM-SHA384",  0xC02E, Tls12, K::EcdhEcdsa, A::Ecdh,  C::AesGcm,           M::Aead,   256, 256),
    suite("TLS_ECDH_RSA_WITH_AES_256_GCM_SHA384",         "ECDH-RSA-AES256-GCM-SHA384",    0xC032, Tls12, K::EcdhRsa,   A::Ecdh,  C::AesGcm,           M::Aead,   256, 256),

    // -- forward secrecy --

    // 128 bit, ECDHE
    suite("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA",         "ECDHE-ECDSA-AES128-SHA",        0xC009, Ssl3,  K::Ecdhe,     A::Ecdsa, C::Aes,              M::Sha1,   128, 128),
    suite("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",           "ECDHE-RSA-AES128-SHA",          0xC013, Ssl3,  K::Ecdhe,     A::Rsa,   C::Aes,              M::Sha1,   128, 128),
    suite("TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA256",      "ECDHE-ECDSA-AES128-SHA256",     0xC023, Tls12, K::Ecdhe,     A::Ecdsa, C::Aes,              M::Sha256, 128, 128),
    suite("TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA256",        "ECDHE-RSA-AES128-SHA256",       0xC027, Tls12, K::Ecdhe,     A::Rsa,   C::Aes,              M::Sha256, 128, 128),
    suite("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",      "ECDHE-ECDSA-AES128-GCM-SHA256", 0xC02B, Tls12, K::Ecdhe,     A::Ecdsa, C::AesGcm,           M::Aead,   128, 128),
    suite("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",        "ECDHE-RSA-AES128-GCM-SHA256",   0xC02F, Tls12, K::Ecdhe,     A::Rsa,   C::AesGcm,           M::Aead,   128, 128),

    // 128 bit, DHE
    suite("TLS_DHE_DSS_WITH_AES_128_CBC_SHA",             "DHE-DSS-AES128-SHA",            0x0032, Ssl3,  K::Dhe,       A::Dss,   C::Aes,              M::Sha1,   128, 128),
    suite("TLS_DHE_DSS_WITH_CAMELLIA_128_CBC_SHA",        "DHE-DSS-CAMELLIA128-SHA",       0x0044, Ssl3,  K::Dhe,       A::Dss,   C::Camellia,         M::Sha1,   128, 128),
    suite("TLS_DHE_RSA_WITH_AES_128_CBC_SHA",             "DHE-RSA-AES128-SHA",            0x0033, Ssl3,  K::Dhe,       A::Rsa,   C::Aes,              M::Sha1,   128, 128),
    suite("TLS_DHE_RSA_WITH_CAMELLIA_128_CBC_SHA",        "DHE-RSA-CAMELLIA128-SHA",       0x0045, Ssl3,  K::Dhe,       A::Rsa,   C::Camellia,         M::Sha1,   128, 128),
    suite("TLS_DHE_DSS_WITH_AES_128_CBC_SHA256",          "DHE-DSS-AES128-SHA256",         0x0040, Tls12, K::Dhe,       A::Dss,   C::Aes,              M::Sha256, 128, 128),
    suite("TLS_DHE_RSA_WITH_AES_128_CBC_SHA256",          "DHE-RSA-AES128-SHA256",         0x0067, Tls12, K::Dhe,       A::Rsa,   C::Aes,              M::Sha256, 128, 128),
    suite("TLS_DHE_DSS_WITH_AES_128_GCM_SHA256",          "DHE-DSS-AES128-GCM-SHA256",     0x00A2, Tls12, K::Dhe,       A::Dss,   C::AesGcm,           M::Aead,   128, 128),
    suite("TLS_DHE_RSA_WITH_AES_128_GCM_SHA256",          "DHE-RSA-AES128-GCM-SHA256",     0x009E, Tls12, K::Dhe,       A::Rsa,   C::AesGcm,           M::Aead,   128, 128),

    // 256 bit, ECDHE
    suite("TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA",         "ECDHE-ECDSA-AES256-SHA",        0xC00A, Ssl3,  K::Ecdhe,     A::Ecdsa, C::Aes,              M::Sha1,   256, 256),
    suite("TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",           "ECDHE-RSA-AES256-SHA",          0xC014, Ssl3,  K::Ecdhe,     A::Rsa,   C::Aes,              M::Sha1,   256, 256),
    suite("TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA384",      "ECDHE-ECDSA-AES256-SHA384",     0xC024, Tls12, K::Ecdhe,     A::Ecdsa, C::Aes,              M::Sha384, 256, 256),
    suite("TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA384",        "ECDHE-RSA-AES256-SHA384",       0xC028, Tls12, K::Ecdhe,     A::Rsa,   C::Aes,              M::Sha384, 256, 256),
    suite("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256", "ECDHE-ECDSA-CHACHA20-POLY1305", 0xCCA9, Tls12, K::Ecdhe,     A::Ecdsa, C::ChaCha20Poly1305, M::Aead,   256, 256),
    suite("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256",  "ECDHE-RSA-CHACHA20-POLY1305",   0xCCA8, Tls12, K::Ecdhe,     A::Rsa,   C::ChaCha20Poly1305, M::Aead,   256, 256),
    suite("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384",      "ECDHE-ECDSA-AES256-GCM-SHA384", 0xC02C, Tls12, K::Ecdhe,     A::Ecdsa, C::AesGcm,           M::Aead,   256, 256),
    suite("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",        "ECDHE-RSA-AES256-GCM-SHA384",   0xC030, Tls12, K::Ecdhe,     A::Rsa,   C::AesGcm,           M::Aead,   256, 256),

    // 256 bit, DHE
    suite("TLS_DHE_DSS_WITH_AES_256_CBC_SHA",             "DHE-DSS-AES256-SHA",            0x0038, Ssl3,  K::Dhe,       A::Dss,   C::Aes,              M::Sha1,   256, 256),
    suite("TLS_DHE_RSA_WITH_AES_256_CBC_SHA",             "DHE-RSA-AES256-SHA",            0x0039, Ssl3,  K::Dhe,       A::Rsa,   C::Aes,              M::Sha1,   256, 256),
    suite("TLS_DHE_DSS_WITH_CAMELLIA_256_CBC_SHA",        "DHE-DSS-CAMELLIA256-SHA",       0x0087, Ssl3,  K::Dhe,       A::Dss,   C::Camellia,         M::Sha1,   256, 256),
    suite("TLS_DHE_RSA_WITH_CAMELLIA_256_CBC_SHA",        "DHE-RSA-CAMELLIA256-SHA",       0x0088, Ssl3,  K::Dhe,       A::Rsa,   C::Camellia,         M::Sha1,   256, 256),
    suite("TLS_DHE_DSS_WITH_AES_256_CBC_SHA256",          "DHE-DSS-AES256-SHA256",         0x006A, Tls12, K::Dhe,       A::Dss,   C::Aes,              M::Sha256, 256, 256),
    suite("TLS_DHE_RSA_WITH_AES_256_CBC_SHA256",          "DHE-RSA-AES256-SHA256",         0x006B, Tls12, K::Dhe,       A::Rsa,   C::Aes,              M::Sha256, 256, 256),
    suite("TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256",    "DHE-RSA-CHACHA20-POLY1305",     0xCCAA, Tls12, K::Dhe,       A::Rsa,   C::ChaCha20Poly1305, M::Aead,   256, 256),
    suite("TLS_DHE_DSS_WITH_AES_256_GCM_SHA384",          "DHE-DSS-AES256-GCM-SHA384",     0x00A3, Tls12, K::Dhe,       A::Dss,   C::AesGcm,           M::Aead,   256, 256),
    suite("TLS_DHE_RSA_WITH_AES_256_GCM_SHA384",          "DHE-RSA-AES256-GCM-SHA384",     0x009F, Tls12, K::Dhe,       A::Rsa,   C::AesGcm,           M::Aead,   256, 256),
];

/// TLS 1.3 catalog, weakest first. Provider names equal the RFC 8446 names.
#[rustfmt::skip]
pub static TLS13_SUITES: [CipherSuiteDescriptor; TLS13_COUNT] = [
    suite("TLS_AES_128_CCM_8_SHA256",       "TLS_AES_128_CCM_8_SHA256",       0x1305, Tls13, K::Tls13, A::Any, C::AesCcm8,           M::Aead, 128, 128),
    suite("TLS_AES_128_CCM_SHA256",         "TLS_AES_128_CCM_SHA256",         0x1304, Tls13, K::Tls13, A::Any, C::AesCcm,            M::Aead, 128, 128),
    suite("TLS_AES_128_GCM_SHA256",         "TLS_AES_128_GCM_SHA256",         0x1301, Tls13, K::Tls13, A::Any, C::AesGcm,            M::Aead, 128, 128),
    suite("TLS_CHACHA20_POLY1305_SHA256",   "TLS_CHACHA20_POLY1305_SHA256",   0x1303, Tls13, K::Tls13, A::Any, C::ChaCha20Poly1305,  M::Aead, 256, 256),
    suite("TLS_AES_256_GCM_SHA384",         "TLS_AES_256_GCM_SHA384",         0x1302, Tls13, K::Tls13, A::Any, C::AesGcm,            M::Aead, 256, 256),
];

/// Number of entries in the classic catalog
pub fn classic_len() -> usize {
    CLASSIC_SUITES.len()
}

/// Number of entries in the TLS 1.3 catalog
pub fn tls13_len() -> usize {
    TLS13_SUITES.len()
}

/// Look up a classic suite by its RFC-style name
pub fn lookup_classic(wire_name: &str) -> Option<SuiteId> {
    CLASSIC_SUITES
        .iter()
        .position(|s| s.wire_name == wire_name)
        .and_then(SuiteId::classic)
}

/// Look up a TLS 1.3 suite by its RFC-style name
pub fn lookup_tls13(wire_name: &str) -> Option<SuiteId> {
    TLS13_SUITES
        .iter()
        .position(|s| s.wire_name == wire_name)
        .and_then(SuiteId::tls13)
}

/// Look up a suite by RFC-style name in the classic catalog, then in the TLS 1.3 catalog
pub fn lookup(wire_name: &str) -> Option<SuiteId> {
    lookup_classic(wire_name).or_else(|| lookup_tls13(wire_name))
}

/// Reverse lookup by provider syntax, searching both catalogs
pub fn lookup_by_provider_name(provider_name: &str) -> Option<SuiteId> {
    CLASSIC_SUITES
        .iter()
        .position(|s| s.provider_name == provider_name)
        .and_then(SuiteId::classic)
        .or_else(|| {
            TLS13_SUITES
                .iter()
                .position(|s| s.provider_name == provider_name)
                .and_then(SuiteId::tls13)
        })
}

/// Reverse lookup by IANA code point, searching both catalogs
pub fn lookup_by_code_point(code_point: u16) -> Option<SuiteId> {
    CLASSIC_SUITES
        .iter()
        .position(|s| s.code_point == code_point)
        .and_then(SuiteId::classic)
        .or_else(|| {
            TLS13_SUITES
                .iter()
                .position(|s| s.code_point == code_point)
                .and_then(SuiteId::tls13)
        })
}

/// Iterate over every entry of one catalog, weakest first
pub fn iter(family: CatalogFamily) -> impl Iterator<Item = SuiteId> {
    let len = match family {
        CatalogFamily::Classic => CLASSIC_SUITES.len(),
        CatalogFamily::Tls13 => TLS13_SUITES.len(),
    };
    (0..len).map(move |index| SuiteId { family, index })
}
