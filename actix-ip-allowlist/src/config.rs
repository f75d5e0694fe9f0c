use derive_more::{Display, Error};
use ip_allowlist::{BuildError, Checker};
use serde::Deserialize;

use crate::{IpAllowlist, Rejection, RewriteRedirect};

/// Name used in logs when none is configured.
pub(crate) const DEFAULT_NAME: &str = "ip-allowlist";

/// Deserializable [`IpAllowlist`] configuration.
///
/// # Examples
/// ```
/// use actix_ip_allowlist::AllowlistConfig;
///
/// let config: AllowlistConfig = serde_json::from_str(
///     r#"{
///         "name": "admin-allowlist",
///         "sourceRange": ["10.0.0.0/8", "fe80::/16"],
///         "reject": { "kind": "notFound" }
///     }"#,
/// )
/// .unwrap();
///
/// let mw = config.build().unwrap();
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AllowlistConfig {
    /// Trusted addresses and CIDR ranges.
    pub source_range: Vec<String>,

    /// Name used to tell middleware instances apart in logs.
    #[serde(default)]
    pub name: Option<String>,

    /// How to answer rejected requests.
    #[serde(default)]
    pub reject: RejectConfig,
}

/// Rejection strategy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", deny_unknown_fields)]
pub enum RejectConfig {
    /// See [`Rejection::Forbidden`].
    #[default]
    Forbidden,

    /// See [`Rejection::NotFound`].
    NotFound,

    /// See [`Rejection::Redirect`].
    Redirect {
        /// Pattern matched against the full request URL.
        regex: String,

        /// Replacement, may reference capture groups.
        replacement: String,

        /// Use `301` instead of `302`.
        #[serde(default)]
        permanent: bool,
    },
}

/// Errors that prevent an [`IpAllowlist`] from being created.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No source ranges configured.
    #[display("sourceRange is empty, IP allowlist not created")]
    EmptySourceRange,

    /// A source range did not parse.
    #[display("cannot parse CIDR allowlist [{}]: {source}", ranges.join(" "))]
    Checker {
        /// Configured ranges.
        ranges: Vec<String>,

        /// Underlying parse failure.
        source: BuildError,
    },

    /// The redirect regex did not compile.
    #[display("invalid rejection rewrite regex: {source}")]
    Rewrite {
        /// Underlying regex failure.
        source: regex::Error,
    },
}

impl RejectConfig {
    fn build(&self) -> Result<Rejection, ConfigError> {
        Ok(match self {
            Self::Forbidden => Rejection::Forbidden,
            Self::NotFound => Rejection::NotFound,
            Self::Redirect {
                regex,
                replacement,
                permanent,
            } => {
                let rewrite = RewriteRedirect::new(regex, replacement.as_str())
                    .map_err(|source| ConfigError::Rewrite { source })?;
                Rejection::Redirect(rewrite.permanent(*permanent))
            }
        })
    }
}

impl AllowlistConfig {
    /// Creates a config allowing `source_range` with default name and rejection.
    pub fn new<I>(source_range: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            source_range: source_range.into_iter().map(Into::into).collect(),
            name: None,
            reject: RejectConfig::default(),
        }
    }

    /// Validates the config and builds the middleware.
    pub fn build(&self) -> Result<IpAllowlist, ConfigError> {
        let name = self.name.as_deref().unwrap_or(DEFAULT_NAME);
        tracing::debug!(middleware = %name, "creating middleware");

        if self.source_range.is_empty() {
            return Err(ConfigError::EmptySourceRange);
        }

        let checker = Checker::new(&self.source_range).map_err(|source| ConfigError::Checker {
            ranges: self.source_range.clone(),
            source,
        })?;

        let rejection = self.reject.build()?;

        tracing::debug!(
            middleware = %name,
            "setting up IP allowlist with sourceRange {}",
            checker.ranges(),
        );

        Ok(IpAllowlist::new(checker)
            .name(name)
            .reject_with(rejection))
    }
}
