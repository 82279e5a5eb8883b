//! IP Validator Service
//!
//! Pure domain logic for classifying candidate address strings.
//! This service has NO external dependencies - it never touches the
//! network and is fully deterministic.

use crate::domain::errors::LookupError;
use crate::domain::value_objects::PublicIpv4;
use std::net::Ipv4Addr;

/// Validator for candidate IP address strings.
///
/// Classification happens in two steps:
/// 1. Syntax: the candidate must parse as an IPv4 dotted quad - four
///    octets, each 0-255, no leading zeros, no surrounding whitespace.
/// 2. Routability: the parsed address must fall outside every private and
///    IANA-reserved block, since those are never globally routable and
///    hence never geolocatable.
pub struct IpValidator;

impl IpValidator {
    /// Validate a candidate string into a `PublicIpv4`.
    ///
    /// # Examples
    /// ```
    /// use geolocator::domain::services::IpValidator;
    ///
    /// assert!(IpValidator::validate("8.8.8.8").is_ok());
    /// assert!(IpValidator::validate("999.1.1.1").is_err());
    /// assert!(IpValidator::validate("10.0.0.1").is_err());
    /// ```
    pub fn validate(candidate: &str) -> Result<PublicIpv4, LookupError> {
        let addr: Ipv4Addr = candidate
            .parse()
            .map_err(|_| LookupError::InvalidFormat(candidate.to_string()))?;

        if Self::is_reserved(addr) {
            return Err(LookupError::PrivateOrReserved(candidate.to_string()));
        }

        Ok(PublicIpv4::new(addr))
    }

    /// Convenience predicate: does the candidate validate cleanly?
    pub fn is_public(candidate: &str) -> bool {
        Self::validate(candidate).is_ok()
    }

    /// Whether the address falls in a private or IANA-reserved block.
    fn is_reserved(addr: Ipv4Addr) -> bool {
        let o = addr.octets();

        addr.is_unspecified()                       // 0.0.0.0
            || o[0] == 0                            // 0.0.0.0/8 "this network"
            || addr.is_private()                    // 10/8, 172.16/12, 192.168/16
            || addr.is_loopback()                   // 127.0.0.0/8
            || addr.is_link_local()                 // 169.254.0.0/16
            || addr.is_multicast()                  // 224.0.0.0/4
            || addr.is_broadcast()                  // 255.255.255.255
            || addr.is_documentation()              // 192.0.2/24, 198.51.100/24, 203.0.113/24
            || (o[0] == 100 && (o[1] & 0xc0) == 64) // 100.64.0.0/10 shared (CGNAT)
            || (o[0] == 192 && o[1] == 0 && o[2] == 0) // 192.0.0.0/24 protocol assignments
            || (o[0] == 198 && (o[1] & 0xfe) == 18) // 198.18.0.0/15 benchmarking
            || o[0] >= 240                          // 240.0.0.0/4 reserved
    }
}
