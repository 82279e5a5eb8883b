//! Lookup Service - Main application use case
//!
//! Orchestrates a geolocation lookup: validating the candidate address,
//! then delegating to the provider port. This is the primary interface for
//! the inbound adapter.

use crate::domain::entities::GeoRecord;
use crate::domain::errors::LookupError;
use crate::domain::ports::GeoProvider;
use crate::domain::services::IpValidator;
use std::sync::Arc;

/// Lookup service - main application use case.
///
/// Validation runs first and fails fast: an invalid or private candidate
/// never reaches the provider, saving a network round trip and provider
/// quota. Provider failures pass through unchanged, so the boundary sees
/// one error taxonomy for the whole pipeline.
///
/// The service is stateless across calls and safe to invoke concurrently;
/// the only shared object is the provider's pooled connection handle.
pub struct LookupService {
    provider: Arc<dyn GeoProvider>,
}

impl LookupService {
    /// Create a new lookup service over a provider implementation.
    pub fn new(provider: Arc<dyn GeoProvider>) -> Self {
        Self { provider }
    }

    /// Geolocate a candidate address string.
    ///
    /// # Arguments
    /// * `candidate` - The raw address string, straight from the URL path
    ///   or the client-address resolver
    ///
    /// # Returns
    /// The normalized record, or the first error the pipeline produced
    pub async fn geolocate(&self, candidate: &str) -> Result<GeoRecord, LookupError> {
        let ip = IpValidator::validate(candidate)?;

        tracing::debug!("candidate {} validated, querying {}", ip, self.provider.name());
        self.provider.lookup(ip).await
    }

    /// Probe the provider's availability, for the health endpoint.
    pub async fn provider_health(&self) -> bool {
        self.provider.check_health().await
    }

    /// Name of the configured provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
