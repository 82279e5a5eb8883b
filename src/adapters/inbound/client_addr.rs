//! Client Address Resolution
//!
//! Derives the requesting client's address from forwarding headers and
//! connection metadata. Pure function of its inputs - validity of the
//! chosen candidate is decided downstream by the validator.

/// Pick the client address candidate.
///
/// Precedence:
/// 1. `X-Forwarded-For` - comma-separated by intermediate proxies; the
///    first entry is the originating client by convention
/// 2. `X-Real-IP` - single value set by some reverse proxies
/// 3. The direct connection peer address
pub fn resolve_client_addr(
    forwarded_for: Option<&str>,
    real_ip: Option<&str>,
    remote_addr: &str,
) -> String {
    if let Some(forwarded) = forwarded_for {
        if !forwarded.is_empty() {
            if let Some(first) = forwarded.split(',').next() {
                return first.trim().to_string();
            }
        }
    }

    if let Some(real) = real_ip {
        if !real.is_empty() {
            return real.trim().to_string();
        }
    }

    remote_addr.to_string()
}
