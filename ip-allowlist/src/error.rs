use derive_more::{Display, Error};

/// Errors that can occur while building a [`RangeSet`](crate::RangeSet) or
/// [`Checker`](crate::Checker).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// No range specs were supplied.
    #[display("no trusted IPs provided")]
    NoTrustedRanges,

    /// A range spec is neither a valid address nor a valid CIDR.
    #[display("parsing CIDR trusted IPs <nil>: invalid CIDR address: {spec}")]
    InvalidRangeSpec {
        /// The offending spec, exactly as supplied.
        spec: String,
    },
}

/// Candidate address could not be parsed as an IPv4 or IPv6 literal.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("can't parse IP from address {addr}")]
pub struct InvalidAddress {
    addr: String,
}

impl InvalidAddress {
    pub(crate) fn new(addr: &str) -> Self {
        Self {
            addr: addr.to_owned(),
        }
    }

    /// Returns the text that failed to parse.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

/// Reasons a candidate address was not authorized.
///
/// Callers should treat every variant the same way: reject the request.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum AuthorizeError {
    /// Candidate is not a valid address.
    #[display("{_0}")]
    InvalidAddress(#[error(not(source))] InvalidAddress),

    /// Candidate parsed fine but lies outside every trusted range.
    #[display("{addr:?} matched none of the trusted IPs")]
    NotAuthorized {
        /// The rejected address.
        addr: String,
    },
}

impl From<InvalidAddress> for AuthorizeError {
    fn from(err: InvalidAddress) -> Self {
        Self::InvalidAddress(err)
    }
}
