//! Provider-independent TLS conditions
//!
//! Failures reported by the TLS provider are translated into named conditions
//! with stable numeric codes. The codes live in two disjoint bands:
//!
//! - `1024 + n`: X.509 certificate verification results (OpenSSL `X509_V_ERR_*` numbering)
//! - `2048 + n`: protocol library reason codes (OpenSSL `SSL_R_*` numbering)
//!
//! Code 0 in either band means success and is translated to `None`.
//! Reason codes that have no named condition are carried verbatim in
//! [`TlsCondition::OtherProvider`] for diagnostics only.
//!
//! The rustls provider reports typed errors instead of numeric codes; those are
//! mapped onto the same named conditions by [`translate_rustls_error`].

use std::fmt;
use tracing::{error, warn};

/// Offset of the X.509 verification band
pub const X509_VERIFY_OFFSET: u16 = 1024;
/// Offset of the protocol library band
pub const SSL_OFFSET: u16 = 2048;
/// OpenSSL library number of libssl
pub const SSL_LIBRARY: u32 = 20;

const ERR_LIB_OFFSET: u32 = 23;
const ERR_LIB_MASK: u64 = 0xFF;
const ERR_REASON_MASK: u64 = 0x7F_FFFF;
const ERR_SYSTEM_FLAG: u64 = 1 << 31;

/// Declares a closed condition enum together with its code and text tables
macro_rules! condition_table {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident = $code:literal => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Raw provider code of this condition
            pub fn code(self) -> u16 {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }
    };
}

condition_table! {
    /// Certificate verification results
    pub enum VerifyCondition {
        Unspecified = 1 => "unspecified certificate verification error",
        UnableToGetIssuerCert = 2 => "unable to get issuer certificate",
        UnableToGetCrl = 3 => "unable to get certificate CRL",
        UnableToDecryptCertSignature = 4 => "unable to decrypt certificate's signature",
        UnableToDecryptCrlSignature = 5 => "unable to decrypt CRL's signature",
        UnableToDecodeIssuerPublicKey = 6 => "unable to decode issuer public key",
        CertSignatureFailure = 7 => "certificate signature failure",
        CrlSignatureFailure = 8 => "CRL signature failure",
        CertNotYetValid = 9 => "certificate is not yet valid",
        CertHasExpired = 10 => "certificate has expired",
        CrlNotYetValid = 11 => "CRL is not yet valid",
        CrlHasExpired = 12 => "CRL has expired",
        ErrorInCertNotBeforeField = 13 => "format error in certificate's notBefore field",
        ErrorInCertNotAfterField = 14 => "format error in certificate's notAfter field",
        ErrorInCrlLastUpdateField = 15 => "format error in CRL's lastUpdate field",
        ErrorInCrlNextUpdateField = 16 => "format error in CRL's nextUpdate field",
        OutOfMemory = 17 => "out of memory",
        DepthZeroSelfSignedCert = 18 => "self-signed certificate",
        SelfSignedCertInChain = 19 => "self-signed certificate in certificate chain",
        UnableToGetIssuerCertLocally = 20 => "unable to get local issuer certificate",
        UnableToVerifyLeafSignature = 21 => "unable to verify the first certificate",
        CertChainTooLong = 22 => "certificate chain too long",
        CertRevoked = 23 => "certificate revoked",
        InvalidCa = 24 => "invalid CA certificate",
        PathLengthExceeded = 25 => "path length constraint exceeded",
        InvalidPurpose = 26 => "unsupported certificate purpose",
        CertUntrusted = 27 => "certificate not trusted",
        CertRejected = 28 => "certificate rejected",
        SubjectIssuerMismatch = 29 => "subject issuer mismatch",
        AkidSkidMismatch = 30 => "authority and subject key identifier mismatch",
        AkidIssuerSerialMismatch = 31 => "authority and issuer serial number mismatch",
        KeyUsageNoCertSign = 32 => "key usage does not include certificate signing",
        UnableToGetCrlIssuer = 33 => "unable to get CRL issuer certificate",
        UnhandledCriticalExtension = 34 => "unhandled critical extension",
        KeyUsageNoCrlSign = 35 => "key usage does not include CRL signing",
        UnhandledCriticalCrlExtension = 36 => "unhandled critical CRL extension",
        InvalidNonCa = 37 => "invalid non-CA certificate (has CA markings)",
        ProxyPathLengthExceeded = 38 => "proxy path length constraint exceeded",
        KeyUsageNoDigitalSignature = 39 => "key usage does not include digital signature",
        ProxyCertificatesNotAllowed = 40 => "proxy certificates not allowed",
        InvalidExtension = 41 => "invalid or inconsistent certificate extension",
        InvalidPolicyExtension = 42 => "invalid or inconsistent certificate policy extension",
        NoExplicitPolicy = 43 => "no explicit policy",
        DifferentCrlScope = 44 => "different CRL scope",
        UnsupportedExtensionFeature = 45 => "unsupported extension feature",
        UnnestedResource = 46 => "RFC 3779 resource not subset of parent's resources",
        PermittedViolation = 47 => "permitted subtree violation",
        ExcludedViolation = 48 => "excluded subtree violation",
        SubtreeMinMax = 49 => "name constraints minimum and maximum not supported",
        ApplicationVerification = 50 => "application verification failure",
        UnsupportedConstraintType = 51 => "unsupported name constraint type",
        UnsupportedConstraintSyntax = 52 => "unsupported or invalid name constraint syntax",
        UnsupportedNameSyntax = 53 => "unsupported or invalid name syntax",
        CrlPathValidationError = 54 => "CRL path validation error",
        PathLoop = 55 => "path loop",
        SuiteBInvalidVersion = 56 => "Suite B: certificate version invalid",
        SuiteBInvalidAlgorithm = 57 => "Suite B: invalid public key algorithm",
        SuiteBInvalidCurve = 58 => "Suite B: invalid ECC curve",
        SuiteBInvalidSignatureAlgorithm = 59 => "Suite B: invalid signature algorithm",
        SuiteBLosNotAllowed = 60 => "Suite B: curve not allowed for this LOS",
        SuiteBCannotSignP384WithP256 = 61 => "Suite B: cannot sign P-384 with P-256",
        HostnameMismatch = 62 => "hostname mismatch",
        EmailMismatch = 63 => "email address mismatch",
        IpAddressMismatch = 64 => "IP address mismatch",
        DaneNoMatch = 65 => "no matching DANE TLSA records",
        EeKeyTooSmall = 66 => "EE certificate key too weak",
        CaKeyTooSmall = 67 => "CA certificate key too weak",
        CaMdTooWeak = 68 => "CA signature digest algorithm too weak",
    }
}

condition_table! {
    /// Protocol library failures
    pub enum ProtocolCondition {
        NoSuitableSignatureAlgorithm = 118 => "no suitable signature algorithm",
        CertificateVerifyFailed = 134 => "certificate verify failed",
        NoCipherMatch = 185 => "no cipher match",
        NoProtocolsAvailable = 191 => "no protocols available",
        NoSharedCipher = 193 => "no shared cipher",
        PeerDidNotReturnACertificate = 199 => "peer did not return a certificate",
        NoApplicationProtocol = 235 => "no application protocol",
        UnsupportedProtocol = 258 => "unsupported protocol",
        WrongVersionNumber = 267 => "wrong version number",
        DecryptionFailedOrBadRecordMac = 281 => "decryption failed or bad record mac",
        UnexpectedEofWhileReading = 294 => "unexpected eof while reading",
        InappropriateFallback = 373 => "inappropriate fallback",
        DhKeyTooSmall = 394 => "dh key too small",
        CaKeyTooSmall = 397 => "ca key too small",
        CaMdTooWeak = 398 => "ca md too weak",
        EeKeyTooSmall = 399 => "ee key too small",
        AlertHandshakeFailure = 1040 => "sslv3 alert handshake failure",
        AlertBadCertificate = 1042 => "sslv3 alert bad certificate",
        AlertCertificateExpired = 1045 => "sslv3 alert certificate expired",
        AlertUnknownCa = 1048 => "tlsv1 alert unknown ca",
        AlertProtocolVersion = 1070 => "tlsv1 alert protocol version",
        AlertUnrecognizedName = 1112 => "tlsv13 alert unrecognized name",
        AlertNoApplicationProtocol = 1120 => "tlsv1 alert no application protocol",
    }
}

/// A provider failure, translated into a provider-independent condition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TlsCondition {
    CertificateVerification(VerifyCondition),
    Protocol(ProtocolCondition),
    /// Failure with no named condition; raw code and provider text for diagnostics
    OtherProvider { code: u64, text: String },
}

impl TlsCondition {
    /// Numeric condition code in its band, `None` for unnamed provider errors
    pub fn code(&self) -> Option<u16> {
        match self {
            TlsCondition::CertificateVerification(c) => Some(X509_VERIFY_OFFSET + c.code()),
            TlsCondition::Protocol(c) => Some(SSL_OFFSET + c.code()),
            TlsCondition::OtherProvider { .. } => None,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            TlsCondition::CertificateVerification(c) => c.description(),
            TlsCondition::Protocol(c) => c.description(),
            TlsCondition::OtherProvider { text, .. } => text,
        }
    }

    /// Look up a named condition by its banded code
    pub fn from_code(code: u16) -> Option<Self> {
        if code >= SSL_OFFSET {
            ProtocolCondition::from_code(code - SSL_OFFSET).map(TlsCondition::Protocol)
        } else if code >= X509_VERIFY_OFFSET {
            VerifyCondition::from_code(code - X509_VERIFY_OFFSET)
                .map(TlsCondition::CertificateVerification)
        } else {
            None
        }
    }
}

impl fmt::Display for TlsCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsCondition::CertificateVerification(c) => {
                write!(f, "certificate verification failed: {}", c.description())
            }
            TlsCondition::Protocol(c) => write!(f, "TLS error: {}", c.description()),
            TlsCondition::OtherProvider { code, text } => {
                write!(f, "TLS provider error {code:08x}: {text}")
            }
        }
    }
}

/// Translate an X.509 verification result.
///
/// Unknown non-zero codes are carried raw in [`TlsCondition::OtherProvider`].
pub fn translate_verification_error(code: i32) -> Option<TlsCondition> {
    if code == 0 {
        return None;
    }
    let condition = match u16::try_from(code).ok().and_then(VerifyCondition::from_code) {
        Some(c) => TlsCondition::CertificateVerification(c),
        None => {
            warn!("Unsupported X.509 verification error code {}", code);
            TlsCondition::OtherProvider {
                code: u64::from(code as u32),
                text: format!("X.509 verification error {code}"),
            }
        }
    };
    error!("{}", condition);
    Some(condition)
}

/// Split a packed provider error code into library and reason
pub fn split_library_error(packed: u64) -> (u32, u32) {
    if packed & ERR_SYSTEM_FLAG != 0 {
        // system errors carry errno in the low bits and no library
        return (0, (packed & (ERR_SYSTEM_FLAG - 1)) as u32);
    }
    let library = ((packed >> ERR_LIB_OFFSET) & ERR_LIB_MASK) as u32;
    let reason = (packed & ERR_REASON_MASK) as u32;
    (library, reason)
}

/// Translate a packed provider library error together with its reason text.
pub fn translate_library_error(packed: u64, text: Option<&str>) -> Option<TlsCondition> {
    if packed == 0 {
        return None;
    }
    let text = text.unwrap_or("OpenSSL error");
    let (library, reason) = split_library_error(packed);
    let named = (library == SSL_LIBRARY)
        .then(|| u16::try_from(reason).ok())
        .flatten()
        .and_then(ProtocolCondition::from_code);
    let condition = match named {
        Some(c) => TlsCondition::Protocol(c),
        None => TlsCondition::OtherProvider {
            code: packed,
            text: text.to_string(),
        },
    };
    error!("{}", condition);
    Some(condition)
}

/// Map a rustls error onto the named conditions
pub fn translate_rustls_error(err: &rustls::Error) -> TlsCondition {
    use rustls::{AlertDescription, CertificateError, Error, PeerIncompatible};

    let named = match err {
        Error::NoCertificatesPresented => {
            Some(TlsCondition::Protocol(ProtocolCondition::PeerDidNotReturnACertificate))
        }
        Error::DecryptError => Some(TlsCondition::Protocol(
            ProtocolCondition::DecryptionFailedOrBadRecordMac,
        )),
        Error::NoApplicationProtocol => {
            Some(TlsCondition::Protocol(ProtocolCondition::NoApplicationProtocol))
        }
        Error::PeerIncompatible(PeerIncompatible::NoCipherSuitesInCommon) => {
            Some(TlsCondition::Protocol(ProtocolCondition::NoSharedCipher))
        }
        Error::PeerIncompatible(PeerIncompatible::NoSignatureSchemesInCommon) => Some(
            TlsCondition::Protocol(ProtocolCondition::NoSuitableSignatureAlgorithm),
        ),
        Error::PeerIncompatible(
            PeerIncompatible::Tls12NotOffered
            | PeerIncompatible::Tls12NotOfferedOrEnabled
            | PeerIncompatible::Tls13RequiredForQuic
            | PeerIncompatible::SupportedVersionsExtensionRequired,
        ) => Some(TlsCondition::Protocol(ProtocolCondition::UnsupportedProtocol)),
        Error::AlertReceived(alert) => match alert {
            AlertDescription::HandshakeFailure => {
                Some(TlsCondition::Protocol(ProtocolCondition::AlertHandshakeFailure))
            }
            AlertDescription::BadCertificate => {
                Some(TlsCondition::Protocol(ProtocolCondition::AlertBadCertificate))
            }
            AlertDescription::CertificateExpired => {
                Some(TlsCondition::Protocol(ProtocolCondition::AlertCertificateExpired))
            }
            AlertDescription::UnknownCA => {
                Some(TlsCondition::Protocol(ProtocolCondition::AlertUnknownCa))
            }
            AlertDescription::ProtocolVersion => {
                Some(TlsCondition::Protocol(ProtocolCondition::AlertProtocolVersion))
            }
            AlertDescription::UnrecognisedName => {
                Some(TlsCondition::Protocol(ProtocolCondition::AlertUnrecognizedName))
            }
            AlertDescription::NoApplicationProtocol => Some(TlsCondition::Protocol(
                ProtocolCondition::AlertNoApplicationProtocol,
            )),
            _ => None,
        },
        Error::InvalidCertificate(cert_err) => {
            let verify = match cert_err {
                CertificateError::BadEncoding => Some(VerifyCondition::UnableToDecodeIssuerPublicKey),
                CertificateError::Expired => Some(VerifyCondition::CertHasExpired),
                CertificateError::NotValidYet => Some(VerifyCondition::CertNotYetValid),
                CertificateError::Revoked => Some(VerifyCondition::CertRevoked),
                CertificateError::UnknownIssuer => {
                    Some(VerifyCondition::UnableToGetIssuerCertLocally)
                }
                CertificateError::BadSignature => Some(VerifyCondition::CertSignatureFailure),
                CertificateError::NotValidForName => Some(VerifyCondition::HostnameMismatch),
                CertificateError::InvalidPurpose => Some(VerifyCondition::InvalidPurpose),
                _ => None,
            };
            Some(TlsCondition::CertificateVerification(
                verify.unwrap_or(VerifyCondition::Unspecified),
            ))
        }
        _ => None,
    };

    named.unwrap_or_else(|| TlsCondition::OtherProvider {
        code: 0,
        text: err.to_string(),
    })
}
