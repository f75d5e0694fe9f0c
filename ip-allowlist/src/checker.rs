use std::net::IpAddr;

use crate::{AuthorizeError, BuildError, InvalidAddress, RangeSet, range::parse_ip};

/// Decides whether client addresses fall inside a set of trusted ranges.
///
/// A checker is immutable once built. Share it behind an `Arc` (or see `SharedChecker` in the
/// Actix Web middleware crate) and rebuild it to change configuration.
///
/// # Examples
/// ```
/// use ip_allowlist::{AuthorizeError, Checker};
///
/// let checker = Checker::new(["1.2.3.4/24"]).unwrap();
///
/// assert_eq!(checker.contains("1.2.3.1"), Ok(true));
/// assert_eq!(checker.contains("1.2.16.1"), Ok(false));
/// assert!(checker.contains("foo").is_err());
///
/// assert!(checker.authorize("1.2.3.1").is_ok());
/// assert!(matches!(
///     checker.authorize("1.2.16.1"),
///     Err(AuthorizeError::NotAuthorized { .. }),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct Checker {
    ranges: RangeSet,
}

impl Checker {
    /// Builds a checker from address and CIDR specs.
    ///
    /// See [`RangeSet::build`] for accepted forms and failure modes.
    pub fn new<I>(specs: I) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let ranges = RangeSet::build(specs)?;
        tracing::trace!("built IP checker with trusted ranges {ranges}");
        Ok(Self::from_ranges(ranges))
    }

    /// Wraps an already parsed range set.
    pub fn from_ranges(ranges: RangeSet) -> Self {
        Self { ranges }
    }

    /// Returns the trusted ranges backing this checker.
    pub fn ranges(&self) -> &RangeSet {
        &self.ranges
    }

    /// Returns whether textual address `addr` lies in any trusted range.
    ///
    /// `addr` must be a bare address without port. Text that is not a strict IPv4 or IPv6
    /// literal is an error, never a yes or no answer.
    pub fn contains(&self, addr: &str) -> Result<bool, InvalidAddress> {
        let ip = parse_ip(addr).ok_or_else(|| InvalidAddress::new(addr))?;
        Ok(self.contains_ip(ip))
    }

    /// Returns whether `ip` lies in any trusted range.
    pub fn contains_ip(&self, ip: IpAddr) -> bool {
        self.ranges.contains_ip(ip)
    }

    /// Succeeds only when `addr` is a valid address inside a trusted range.
    pub fn authorize(&self, addr: &str) -> Result<(), AuthorizeError> {
        if self.contains(addr)? {
            Ok(())
        } else {
            Err(AuthorizeError::NotAuthorized {
                addr: addr.to_owned(),
            })
        }
    }
}
