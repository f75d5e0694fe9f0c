//! Trusted IP range checker for authorizing clients by address.
//!
//! A [`Checker`] is built once from a list of IPv4/IPv6 addresses and CIDR ranges and then
//! answers, for any textual client address, whether it lies inside one of those ranges.
//!
//! ```
//! use ip_allowlist::Checker;
//!
//! let checker = Checker::new(["2a03:4000:6:d080::/64", "fe80::/16", "8.8.8.8"]).unwrap();
//!
//! assert_eq!(checker.contains("2a03:4000:6:d080::42"), Ok(true));
//! assert_eq!(checker.contains("4242::1"), Ok(false));
//! assert_eq!(checker.contains("8.8.8.8"), Ok(true));
//! assert_eq!(checker.contains("8.8.8.7"), Ok(false));
//! ```
//!
//! # Address Parsing
//! Both configured ranges and candidate addresses must be strict literals. IPv4 octets with
//! leading zeros (`0127.0.0.1`) are refused outright instead of being read as decimal or octal,
//! so an address can not be smuggled past a range by re-encoding it.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, nonstandard_style)]
#![warn(future_incompatible, missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod checker;
mod error;
mod range;
mod set;

pub use self::{
    checker::Checker,
    error::{AuthorizeError, BuildError, InvalidAddress},
    range::TrustedRange,
    set::RangeSet,
};
