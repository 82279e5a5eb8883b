//! geolocator Library
//!
//! This module exposes the geolocation service components for use in
//! integration tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::inbound::{resolve_client_addr, HttpServer};
pub use adapters::outbound::IpApiProvider;
pub use application::LookupService;
pub use config::{load_config, Config};
pub use domain::entities::GeoRecord;
pub use domain::errors::LookupError;
pub use domain::ports::GeoProvider;
pub use domain::services::IpValidator;
pub use domain::value_objects::PublicIpv4;
