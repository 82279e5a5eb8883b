//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the geolocation domain.
//! They have no external dependencies and contain only business logic.

use serde::{Deserialize, Serialize};

/// Normalized result of a successful geolocation lookup.
///
/// Every provider-supplied field is optional: a field the provider omitted
/// is `None` (serialized as `null`), which keeps "provider said empty"
/// distinguishable from "provider did not answer".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    /// The address the record describes, as echoed by the provider
    pub ip: String,
    /// Country name (e.g. "United States")
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code (e.g. "US")
    pub country_code: Option<String>,
    /// Region/state name (e.g. "California")
    pub region: Option<String>,
    /// Region/state short code (e.g. "CA")
    pub region_code: Option<String>,
    /// City name
    pub city: Option<String>,
    /// Postal code
    pub zip_code: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
    /// IANA timezone identifier (e.g. "America/Los_Angeles")
    pub timezone: Option<String>,
    /// Internet service provider name
    pub isp: Option<String>,
    /// Owning organization
    pub organization: Option<String>,
    /// Autonomous system number (e.g. "AS15169")
    pub as_number: Option<String>,
    /// Autonomous system name (e.g. "GOOGLE")
    pub as_name: Option<String>,
}
