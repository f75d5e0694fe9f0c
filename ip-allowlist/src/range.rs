use std::{net::IpAddr, str::FromStr};

use ipnetwork::IpNetwork;

use crate::BuildError;

/// A trusted network range whose base address has its host bits cleared.
///
/// Parsed from either a bare address (`8.8.8.8`, `fe80::1`), which becomes an exact-match range,
/// or CIDR notation (`1.2.3.4/24`, `fe80::/16`).
///
/// Address literals are parsed strictly. In particular, IPv4 octets with a leading zero are
/// rejected, so `0127.0.0.1` is never read as either `127.0.0.1` or its octal interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrustedRange(IpNetwork);

impl_more::forward_display!(TrustedRange);

impl TrustedRange {
    /// Returns the range as a masked network.
    pub fn network(&self) -> IpNetwork {
        self.0
    }

    /// Returns the prefix length.
    pub fn prefix(&self) -> u8 {
        self.0.prefix()
    }

    /// Returns true if this range matches exactly one address.
    pub fn is_exact(&self) -> bool {
        self.prefix() == full_width(self.0.ip())
    }

    /// Returns true if `ip` lies in this range.
    ///
    /// Addresses of the other family never match.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.0.contains(ip)
    }
}

impl FromStr for TrustedRange {
    type Err = BuildError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let invalid = || BuildError::InvalidRangeSpec {
            spec: spec.to_owned(),
        };

        let (addr, prefix) = match spec.split_once('/') {
            Some((addr, prefix)) => {
                let addr = parse_ip(addr).ok_or_else(invalid)?;
                let prefix = parse_prefix(prefix).ok_or_else(invalid)?;
                (addr, prefix)
            }
            None => {
                let addr = parse_ip(spec).ok_or_else(invalid)?;
                (addr, full_width(addr))
            }
        };

        // rejects prefixes wider than the address family
        let net = IpNetwork::new(addr, prefix).map_err(|_| invalid())?;
        let masked = IpNetwork::new(net.network(), prefix).map_err(|_| invalid())?;

        Ok(Self(masked))
    }
}

fn full_width(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// Parses an IPv4 or IPv6 literal, refusing octal-looking IPv4 octets.
pub(crate) fn parse_ip(text: &str) -> Option<IpAddr> {
    if has_leading_zero_octet(text) {
        return None;
    }

    text.parse().ok()
}

/// Checks the dotted-quad part of `text`, which is the whole of an IPv4 literal or the embedded
/// tail of an IPv6 one (`::ffff:1.2.3.4`).
fn has_leading_zero_octet(text: &str) -> bool {
    let dotted = text.rsplit(':').next().unwrap_or(text);

    dotted.contains('.')
        && dotted
            .split('.')
            .any(|octet| octet.len() > 1 && octet.starts_with('0'))
}

/// Parses a prefix length written in plain decimal: no sign, no padding.
fn parse_prefix(text: &str) -> Option<u8> {
    let canonical = !text.is_empty()
        && text.len() <= 3
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));

    if !canonical {
        return None;
    }

    text.parse().ok()
}
