//! DICOM TLS security profiles
//!
//! Each profile statically defines the ciphersuites it mandates, whether
//! TLS 1.3 may be negotiated, and which policy governs ciphersuites added
//! on top of the profile by the caller.

use crate::catalog::{CipherMode, CipherSuiteDescriptor, KeyExchange, Mac, ProtocolVersion};
use crate::error::TlsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Security profile of a DICOM TLS connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SecurityProfile {
    /// No profile; any supported ciphersuite may be added
    #[default]
    #[serde(rename = "none")]
    None,
    /// Basic TLS Secure Transport Connection Profile (retired)
    #[serde(rename = "basic")]
    Basic,
    /// AES TLS Secure Transport Connection Profile (retired)
    #[serde(rename = "aes")]
    Aes,
    /// BCP 195 TLS Profile (retired)
    #[serde(rename = "bcp195")]
    Bcp195,
    /// Non-downgrading BCP 195 TLS Profile (retired)
    #[serde(rename = "bcp195-nd")]
    Bcp195NonDowngrading,
    /// Extended BCP 195 TLS Profile (retired)
    #[serde(rename = "bcp195-ex")]
    Bcp195Extended,
    /// BCP 195 RFC 8996 TLS Profile
    #[serde(rename = "bcp195-rfc8996")]
    Bcp195Rfc8996,
    /// Modified BCP 195 RFC 8996 TLS Profile
    #[serde(rename = "bcp195-rfc8996-mod")]
    Bcp195Rfc8996Modified,
    /// Authenticated unencrypted communication (formerly used by IHE ATNA)
    #[serde(rename = "atna-unencrypted")]
    UnencryptedAtna,
}

/// Whether a mandated ciphersuite must be available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    /// Skipped with a warning when the provider lacks it
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandatedSuite {
    pub wire_name: &'static str,
    pub requirement: Requirement,
}

const fn required(wire_name: &'static str) -> MandatedSuite {
    MandatedSuite {
        wire_name,
        requirement: Requirement::Required,
    }
}

const fn optional(wire_name: &'static str) -> MandatedSuite {
    MandatedSuite {
        wire_name,
        requirement: Requirement::Optional,
    }
}

/// Policy class applied to caller-added ciphersuites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionPolicy {
    /// No restriction
    Unrestricted,
    /// Reject unencrypted suites, warn about static RSA
    Baseline,
    /// RFC 8996/9325 aligned checks
    Rfc8996,
    /// No additions at all
    Closed,
}

/// Static definition of a profile
#[derive(Debug, Clone, Copy)]
pub struct ProfileDefinition {
    pub classic: &'static [MandatedSuite],
    pub tls13: &'static [&'static str],
    pub tls13_permitted: bool,
    pub policy: AdditionPolicy,
    pub min_version: ProtocolVersion,
    pub name: &'static str,
    pub identifier: &'static str,
}

const TRIPLE_DES: &str = "TLS_RSA_WITH_3DES_EDE_CBC_SHA";

static NONE: ProfileDefinition = ProfileDefinition {
    classic: &[],
    tls13: &[],
    tls13_permitted: true,
    policy: AdditionPolicy::Unrestricted,
    min_version: ProtocolVersion::Tls10,
    name: "None",
    identifier: "none",
};

static BASIC: ProfileDefinition = ProfileDefinition {
    classic: &[optional(TRIPLE_DES)],
    tls13: &[],
    tls13_permitted: false,
    policy: AdditionPolicy::Baseline,
    min_version: ProtocolVersion::Tls10,
    name: "Basic TLS Secure Transport Connection Profile (retired)",
    identifier: "basic",
};

static AES: ProfileDefinition = ProfileDefinition {
    classic: &[required("TLS_RSA_WITH_AES_128_CBC_SHA"), optional(TRIPLE_DES)],
    tls13: &[],
    tls13_permitted: false,
    policy: AdditionPolicy::Baseline,
    min_version: ProtocolVersion::Tls10,
    name: "AES TLS Secure Transport Connection Profile (retired)",
    identifier: "aes",
};

static BCP195: ProfileDefinition = ProfileDefinition {
    classic: &[
        required("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_DHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_DHE_RSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_RSA_WITH_AES_128_CBC_SHA"),
        optional(TRIPLE_DES),
    ],
    tls13: &[],
    tls13_permitted: false,
    policy: AdditionPolicy::Baseline,
    min_version: ProtocolVersion::Tls10,
    name: "BCP 195 TLS Profile (retired)",
    identifier: "bcp195",
};

static BCP195_ND: ProfileDefinition = ProfileDefinition {
    classic: &[
        required("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_DHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_DHE_RSA_WITH_AES_256_GCM_SHA384"),
    ],
    tls13: &[],
    tls13_permitted: false,
    policy: AdditionPolicy::Baseline,
    min_version: ProtocolVersion::Tls12,
    name: "Non-downgrading BCP 195 TLS Profile (retired)",
    identifier: "bcp195-nd",
};

static BCP195_EXTENDED: ProfileDefinition = ProfileDefinition {
    classic: &[
        required("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_DHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_DHE_RSA_WITH_AES_256_GCM_SHA384"),
    ],
    tls13: &[],
    tls13_permitted: false,
    policy: AdditionPolicy::Closed,
    min_version: ProtocolVersion::Tls12,
    name: "Extended BCP 195 TLS Profile (retired)",
    identifier: "bcp195-ex",
};

static BCP195_RFC8996: ProfileDefinition = ProfileDefinition {
    classic: &[
        required("TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"),
        required("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"),
        required("TLS_DHE_RSA_WITH_AES_128_GCM_SHA256"),
        required("TLS_DHE_RSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_DHE_RSA_WITH_CHACHA20_POLY1305_SHA256"),
    ],
    tls13: &[
        "TLS_AES_128_GCM_SHA256",
        "TLS_AES_256_GCM_SHA384",
        "TLS_CHACHA20_POLY1305_SHA256",
    ],
    tls13_permitted: true,
    policy: AdditionPolicy::Rfc8996,
    min_version: ProtocolVersion::Tls12,
    name: "BCP 195 RFC 8996 TLS Profile",
    identifier: "bcp195-rfc8996",
};

static BCP195_RFC8996_MODIFIED: ProfileDefinition = ProfileDefinition {
    classic: &[
        required("TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384"),
        required("TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256"),
        required("TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256"),
    ],
    tls13: &["TLS_AES_256_GCM_SHA384", "TLS_CHACHA20_POLY1305_SHA256"],
    tls13_permitted: true,
    policy: AdditionPolicy::Closed,
    min_version: ProtocolVersion::Tls12,
    name: "Modified BCP 195 RFC 8996 TLS Profile",
    identifier: "bcp195-rfc8996-mod",
};

static UNENCRYPTED_ATNA: ProfileDefinition = ProfileDefinition {
    classic: &[required("TLS_RSA_WITH_NULL_SHA")],
    tls13: &[],
    tls13_permitted: false,
    policy: AdditionPolicy::Unrestricted,
    min_version: ProtocolVersion::Tls10,
    name: "Authenticated unencrypted communication (retired, was used in IHE ATNA)",
    identifier: "atna-unencrypted",
};

impl SecurityProfile {
    pub const ALL: [SecurityProfile; 9] = [
        SecurityProfile::None,
        SecurityProfile::Basic,
        SecurityProfile::Aes,
        SecurityProfile::Bcp195,
        SecurityProfile::Bcp195NonDowngrading,
        SecurityProfile::Bcp195Extended,
        SecurityProfile::Bcp195Rfc8996,
        SecurityProfile::Bcp195Rfc8996Modified,
        SecurityProfile::UnencryptedAtna,
    ];

    pub fn definition(self) -> &'static ProfileDefinition {
        match self {
            SecurityProfile::None => &NONE,
            SecurityProfile::Basic => &BASIC,
            SecurityProfile::Aes => &AES,
            SecurityProfile::Bcp195 => &BCP195,
            SecurityProfile::Bcp195NonDowngrading => &BCP195_ND,
            SecurityProfile::Bcp195Extended => &BCP195_EXTENDED,
            SecurityProfile::Bcp195Rfc8996 => &BCP195_RFC8996,
            SecurityProfile::Bcp195Rfc8996Modified => &BCP195_RFC8996_MODIFIED,
            SecurityProfile::UnencryptedAtna => &UNENCRYPTED_ATNA,
        }
    }

    /// Human readable profile name
    pub fn name(self) -> &'static str {
        self.definition().name
    }

    /// Stable identifier used in configuration files and on the command line
    pub fn identifier(self) -> &'static str {
        self.definition().identifier
    }

    pub fn is_tls13_permitted(self) -> bool {
        self.definition().tls13_permitted
    }

    pub fn is_closed(self) -> bool {
        self.definition().policy == AdditionPolicy::Closed
    }

    pub fn addition_policy(self) -> AdditionPolicy {
        self.definition().policy
    }

    pub fn min_version(self) -> ProtocolVersion {
        self.definition().min_version
    }
}

impl fmt::Display for SecurityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for SecurityProfile {
    type Err = TlsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SecurityProfile::ALL
            .into_iter()
            .find(|p| p.identifier() == s)
            .ok_or_else(|| TlsError::config(format!("unknown security profile '{s}'")))
    }
}

/// Non-fatal findings recorded while configuring a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyWarning {
    /// An optional mandated suite is not negotiable by the provider and was skipped
    OptionalSuiteUnavailable { suite: &'static str },
    StaticRsaKeyTransport { suite: &'static str },
    FiniteFieldDhe { suite: &'static str },
    CbcMode { suite: &'static str },
    ShortEffectiveKey { suite: &'static str, bits: u16 },
}

impl fmt::Display for PolicyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyWarning::OptionalSuiteUnavailable { suite } => {
                write!(f, "ciphersuite '{suite}' not supported by TLS provider, skipped")
            }
            PolicyWarning::StaticRsaKeyTransport { suite } => write!(
                f,
                "ciphersuite '{suite}' uses RSA key transport; RFC 9325 recommends that such ciphersuites should not be used"
            ),
            PolicyWarning::FiniteFieldDhe { suite } => write!(
                f,
                "ciphersuite '{suite}' uses finite-field Diffie-Hellman; RFC 9325 recommends that such ciphersuites should not be used"
            ),
            PolicyWarning::CbcMode { suite } => write!(
                f,
                "ciphersuite '{suite}' uses CBC mode; RFC 9325 recommends AEAD ciphersuites"
            ),
            PolicyWarning::ShortEffectiveKey { suite, bits } => write!(
                f,
                "ciphersuite '{suite}' has an effective key size of {bits} bits, less than 128"
            ),
        }
    }
}

/// Reason a ciphersuite addition is refused by the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    ClosedProfile,
    Tls13NotPermitted,
    Unencrypted,
    Sha1Mac,
    StaticKeyExchangeWithCbc,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::ClosedProfile => "profile does not permit additional ciphersuites",
            RejectReason::Tls13NotPermitted => "profile does not permit TLS 1.3",
            RejectReason::Unencrypted => "ciphersuite does not provide encryption",
            RejectReason::Sha1Mac => "ciphersuite uses SHA-1",
            RejectReason::StaticKeyExchangeWithCbc => {
                "ciphersuite combines static key exchange with CBC mode"
            }
        };
        f.write_str(text)
    }
}

impl AdditionPolicy {
    /// Check a resolved ciphersuite against this policy.
    ///
    /// Returns the soft warnings on acceptance.
    pub fn evaluate(
        self,
        suite: &'static CipherSuiteDescriptor,
    ) -> std::result::Result<Vec<PolicyWarning>, RejectReason> {
        let name = suite.wire_name;
        let mut warnings = Vec::new();
        match self {
            AdditionPolicy::Unrestricted => {}
            AdditionPolicy::Closed => return Err(RejectReason::ClosedProfile),
            AdditionPolicy::Baseline => {
                if !suite.is_encrypted() {
                    return Err(RejectReason::Unencrypted);
                }
                if suite.key_exchange == KeyExchange::Rsa {
                    warnings.push(PolicyWarning::StaticRsaKeyTransport { suite: name });
                }
            }
            AdditionPolicy::Rfc8996 => {
                if !suite.is_encrypted() {
                    return Err(RejectReason::Unencrypted);
                }
                if suite.mac == Mac::Sha1 {
                    return Err(RejectReason::Sha1Mac);
                }
                if suite.key_exchange.is_static() && suite.mode() == CipherMode::Cbc {
                    return Err(RejectReason::StaticKeyExchangeWithCbc);
                }
                if suite.key_exchange == KeyExchange::Rsa {
                    warnings.push(PolicyWarning::StaticRsaKeyTransport { suite: name });
                }
                if suite.key_exchange == KeyExchange::Dhe {
                    warnings.push(PolicyWarning::FiniteFieldDhe { suite: name });
                }
                if suite.mode() == CipherMode::Cbc {
                    warnings.push(PolicyWarning::CbcMode { suite: name });
                }
                if suite.effective_key_size < 128 {
                    warnings.push(PolicyWarning::ShortEffectiveKey {
                        suite: name,
                        bits: suite.effective_key_size,
                    });
                }
            }
        }
        Ok(warnings)
    }
}
