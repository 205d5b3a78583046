//! Process-wide provider registry

use crate::error::Result;
use crate::provider::{ProviderAdapter, ProviderSupport};
use once_cell::sync::Lazy;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

static PROVIDER_CELL: Lazy<RwLock<Option<Arc<ProviderSupport>>>> = Lazy::new(|| RwLock::new(None));

/// Probe the provider and store the result process-wide.
///
/// Must run before handlers are created with [`CiphersuiteHandler::from_global`].
/// A second call keeps the first result.
///
/// [`CiphersuiteHandler::from_global`]: crate::handler::CiphersuiteHandler::from_global
pub fn initialize_provider<P>(provider: &P) -> Result<Arc<ProviderSupport>>
where
    P: ProviderAdapter + ?Sized,
{
    let mut cell = PROVIDER_CELL.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = cell.as_ref() {
        debug!("TLS provider already initialized");
        return Ok(existing.clone());
    }
    let support = Arc::new(ProviderSupport::probe(provider)?);
    *cell = Some(support.clone());
    Ok(support)
}

pub fn provider_support() -> Option<Arc<ProviderSupport>> {
    PROVIDER_CELL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Reset the provider registry. Primarily for testing purposes.
/// In production, the provider should only be initialized once at startup.
pub fn reset_provider_support() {
    let mut cell = PROVIDER_CELL.write().unwrap_or_else(PoisonError::into_inner);
    *cell = None;
}
