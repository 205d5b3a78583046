use dcmtls::handler::CiphersuiteHandler;
use dcmtls::negotiation::NetworkRole;
use dcmtls::profile::SecurityProfile;
use dcmtls::provider::ProviderSupport;
use std::io::{self, Write};
use std::sync::Arc;

/// Activate `profile`, then add `ciphers` in order
pub fn configure_handler(
    support: Arc<ProviderSupport>,
    profile: SecurityProfile,
    ciphers: &[String],
) -> dcmtls::Result<CiphersuiteHandler> {
    let mut handler = CiphersuiteHandler::new(support);
    handler.set_profile(profile)?;
    for name in ciphers {
        handler.add_cipher_suite(name)?;
    }
    Ok(handler)
}

pub fn write_profiles<W: Write>(out: &mut W) -> io::Result<()> {
    for profile in SecurityProfile::ALL {
        let tls13 = if profile.is_tls13_permitted() { "TLS 1.3" } else { "" };
        writeln!(out, "{:<20} {:<8} {}", profile.identifier(), tls13, profile.name())?;
    }
    Ok(())
}

fn list_or_none(list: &str) -> &str {
    if list.is_empty() {
        "(none)"
    } else {
        list
    }
}

pub fn write_negotiation<W: Write>(
    out: &mut W,
    handler: &CiphersuiteHandler,
    role: NetworkRole,
) -> io::Result<()> {
    let lists = handler.negotiation_lists(role);
    writeln!(out, "profile:          {}", handler.profile().name())?;
    writeln!(out, "role:             {:?}", role)?;
    writeln!(out, "minimum version:  {:?}", lists.min_version)?;
    writeln!(out, "TLS 1.3 enabled:  {}", lists.tls13_enabled)?;
    writeln!(out, "ciphersuites:     {}", list_or_none(&lists.cipher_list))?;
    writeln!(out, "TLS 1.3 suites:   {}", list_or_none(&lists.tls13_cipher_list))?;
    for warning in handler.warnings() {
        writeln!(out, "warning:          {}", warning)?;
    }
    Ok(())
}
