//! Geolocation Provider Port
//!
//! Defines the interface for resolving a public IP address to a
//! geolocation record via an external data source.

use crate::domain::entities::GeoRecord;
use crate::domain::errors::LookupError;
use crate::domain::value_objects::PublicIpv4;
use async_trait::async_trait;

/// Outbound port for geolocation lookups.
///
/// Implementations talk to a third-party geolocation service; one concrete
/// adapter exists today (ip-api.com) and additional providers implement
/// the same trait without changing the lookup service.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Fetch geolocation data for an already-validated public address.
    ///
    /// A single attempt per invocation: no retries, no caching. Transport
    /// failures and unusable responses surface as `LookupError` variants.
    async fn lookup(&self, ip: PublicIpv4) -> Result<GeoRecord, LookupError>;

    /// Probe whether the provider is currently reachable.
    async fn check_health(&self) -> bool;

    /// Provider name, for logs and the health endpoint.
    fn name(&self) -> &str;
}
