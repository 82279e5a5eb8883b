//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use std::net::Ipv4Addr;

/// A validated, globally routable IPv4 address.
///
/// Instances are only produced by the validator, so holding a `PublicIpv4`
/// is proof that the address is well-formed and outside every private or
/// reserved range. The provider client consumes it without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicIpv4(Ipv4Addr);

impl PublicIpv4 {
    /// Wrap an already-classified address. Restricted to the crate so the
    /// validator stays the single construction path.
    pub(crate) fn new(addr: Ipv4Addr) -> Self {
        Self(addr)
    }

    /// The underlying address.
    pub fn addr(&self) -> Ipv4Addr {
        self.0
    }
}

impl std::fmt::Display for PublicIpv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
