use clap::{Parser, Subcommand, ValueEnum};
use dcmtls::config::{Config, LoggingConfig};
use dcmtls::negotiation::NetworkRole;
use dcmtls::profile::SecurityProfile;
use dcmtls::provider::{FixedProvider, ProviderSupport, RustlsProvider};
use dcmtls_tool as tool;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "dcmtls",
    about = "Inspect DICOM TLS security profiles and ciphersuite negotiation"
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// TLS provider whose capabilities are used
    #[arg(long, value_enum, default_value_t = Provider::Rustls, global = true)]
    provider: Provider,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Provider {
    /// The linked rustls provider
    Rustls,
    /// A simulated provider supporting the whole catalog
    Catalog,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List the ciphersuites supported by the TLS provider
    ListCiphers,
    /// List the known security profiles
    Profiles,
    /// Show the ciphersuite lists negotiated for a profile
    Negotiate {
        /// Security profile, defaults to the configured one
        #[arg(short, long)]
        profile: Option<SecurityProfile>,
        /// Additional ciphersuite (RFC name), may be repeated
        #[arg(long = "cipher")]
        ciphers: Vec<String>,
        /// Use the acceptor (server) ordering
        #[arg(long)]
        server: bool,
    },
}

fn probe(provider: Provider) -> anyhow::Result<Arc<ProviderSupport>> {
    tracing::debug!("Probing TLS provider {:?}", provider);
    let support = match provider {
        Provider::Rustls => ProviderSupport::probe(&RustlsProvider::ring())?,
        Provider::Catalog => ProviderSupport::probe(&FixedProvider::full_catalog())?,
    };
    Ok(Arc::new(support))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config {
            logging: LoggingConfig {
                level: "warn".to_string(),
                ..LoggingConfig::default()
            },
            ..Config::default()
        },
    };
    dcmtls::logging::init_logging(&config.logging)?;

    let mut stdout = std::io::stdout().lock();
    match cli.cmd {
        Cmd::ListCiphers => {
            probe(cli.provider)?.print_supported_suites(&mut stdout)?;
        }
        Cmd::Profiles => tool::write_profiles(&mut stdout)?,
        Cmd::Negotiate {
            profile,
            ciphers,
            server,
        } => {
            let profile = profile.unwrap_or(config.tls.profile);
            let mut all_ciphers = config.tls.ciphersuites.clone();
            all_ciphers.extend(ciphers);
            let role = if server {
                NetworkRole::Acceptor
            } else {
                config.tls.role
            };
            let handler = tool::configure_handler(probe(cli.provider)?, profile, &all_ciphers)?;
            tool::write_negotiation(&mut stdout, &handler, role)?;
        }
    }
    Ok(())
}
