//! Lookup Error Taxonomy
//!
//! Every failure the lookup pipeline can produce, as a closed set of typed
//! values. Errors are created at the point of failure and propagated
//! unchanged to the boundary; only the HTTP adapter translates them into
//! the wire format. Nothing in the core retries or swallows them.

use thiserror::Error;

/// Failure of a single geolocation lookup.
///
/// The set is closed on purpose: format errors, reserved-range rejections,
/// provider-reported absence, provider throttling, and provider
/// unavailability cover every path, so no generic "unknown" variant exists.
/// Anything unexpected from the provider call (malformed JSON, transport
/// failures) folds into `ProviderUnavailable`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The candidate string is not a well-formed public IPv4 dotted quad.
    #[error("invalid IPv4 address: {0}")]
    InvalidFormat(String),

    /// The address is valid but inside a private or IANA-reserved range.
    #[error("cannot geolocate private or reserved IP: {0}")]
    PrivateOrReserved(String),

    /// The provider has no geolocation data for the address.
    #[error("geolocation data not found for IP: {0}")]
    NotFound(String),

    /// The provider rejected the request due to rate limiting.
    #[error("rate limit exceeded for provider: {0}")]
    RateLimited(String),

    /// The provider could not be reached or answered unusably.
    #[error("geolocation provider {provider} is unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },
}

impl LookupError {
    /// Stable machine-readable code for the wire-format `type` field.
    pub fn error_type(&self) -> &'static str {
        match self {
            LookupError::InvalidFormat(_) => "invalid_ip",
            LookupError::PrivateOrReserved(_) => "private_ip",
            LookupError::NotFound(_) => "ip_not_found",
            LookupError::RateLimited(_) => "rate_limit_exceeded",
            LookupError::ProviderUnavailable { .. } => "provider_unavailable",
        }
    }
}
