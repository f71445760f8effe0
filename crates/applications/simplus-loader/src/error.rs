//! Error types for the policy loader

use simplus_core::CapabilityFamily;
use thiserror::Error;

use crate::naming::CanonicalId;

/// Loader result type
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Failure raised by a policy constructor
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while resolving an alias
#[derive(Error, Debug)]
pub enum LoaderError {
    /// No constructor is registered under the composed identifier
    #[error("Unknown {family} alias '{alias}': nothing registered as {identifier}")]
    UnknownAlias {
        /// Family the alias was resolved in
        family: CapabilityFamily,
        /// Alias as supplied by the caller
        alias: String,
        /// Identifier composed from the alias
        identifier: CanonicalId,
    },

    /// The constructor was found but failed to build the policy
    #[error("Failed to construct {family} {identifier} for alias '{alias}'")]
    Construction {
        /// Family the alias was resolved in
        family: CapabilityFamily,
        /// Alias as supplied by the caller
        alias: String,
        /// Identifier of the failing constructor
        identifier: CanonicalId,
        /// What the constructor reported
        #[source]
        source: BoxError,
    },
}

impl LoaderError {
    /// Family the failed resolution was for
    pub fn family(&self) -> CapabilityFamily {
        match self {
            Self::UnknownAlias { family, .. } | Self::Construction { family, .. } => *family,
        }
    }

    /// Alias as supplied by the caller
    pub fn alias(&self) -> &str {
        match self {
            Self::UnknownAlias { alias, .. } | Self::Construction { alias, .. } => alias,
        }
    }

    /// Identifier composed from the alias
    pub fn identifier(&self) -> &CanonicalId {
        match self {
            Self::UnknownAlias { identifier, .. } | Self::Construction { identifier, .. } => {
                identifier
            }
        }
    }

    /// Check if the alias didn't match any registered policy
    pub fn is_unknown_alias(&self) -> bool {
        matches!(self, Self::UnknownAlias { .. })
    }
}
