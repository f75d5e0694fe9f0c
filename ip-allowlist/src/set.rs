use std::{fmt, net::IpAddr, slice};

use itertools::Itertools as _;

use crate::{BuildError, TrustedRange};

/// Non-empty, ordered collection of trusted ranges.
///
/// Order is kept as supplied so diagnostics are deterministic; it has no effect on membership.
/// Duplicate and overlapping ranges are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<TrustedRange>,
}

impl RangeSet {
    /// Parses every spec into a [`TrustedRange`].
    ///
    /// Fails on the first spec that does not parse, in input order. An empty sequence is an error
    /// rather than a "deny all" set.
    ///
    /// # Examples
    /// ```
    /// use ip_allowlist::{BuildError, RangeSet};
    ///
    /// let set = RangeSet::build(["1.2.3.4/24", "fe80::/16"]).unwrap();
    /// assert_eq!(set.to_string(), "[1.2.3.0/24, fe80::/16]");
    ///
    /// let err = RangeSet::build(Vec::<String>::new()).unwrap_err();
    /// assert_eq!(err, BuildError::NoTrustedRanges);
    /// ```
    pub fn build<I>(specs: I) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let ranges = specs
            .into_iter()
            .map(|spec| spec.as_ref().parse::<TrustedRange>())
            .collect::<Result<Vec<_>, _>>()?;

        if ranges.is_empty() {
            return Err(BuildError::NoTrustedRanges);
        }

        Ok(Self { ranges })
    }

    /// Returns true if `ip` lies in any range of this set.
    pub fn contains_ip(&self, ip: IpAddr) -> bool {
        self.ranges.iter().any(|range| range.contains(ip))
    }

    /// Returns an iterator over the ranges in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, TrustedRange> {
        self.ranges.iter()
    }

    /// Returns the ranges as a slice.
    pub fn as_slice(&self) -> &[TrustedRange] {
        &self.ranges
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a TrustedRange;
    type IntoIter = slice::Iter<'a, TrustedRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.ranges.iter().format(", "))
    }
}
