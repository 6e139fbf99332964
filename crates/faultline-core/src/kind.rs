use std::fmt;

/// Identity of a failure
///
/// Dispatch on kinds is exact: a `Custom` kind never picks up the treatment of a
/// built-in kind, even when its name suggests the two are related.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::EnumString)]
pub enum FailureKind {
    /// Requested entity does not exist
    NotFound,
    /// Request conflicts with the current state of the entity
    Conflict,
    /// Caller supplied an invalid argument
    InvalidArgument,
    /// Payload was well-formed but a value had the wrong shape
    InvalidFormat,
    /// No route or resource matched the request target
    NoResourceFound,
    /// Temporary condition, the caller may safely retry
    Transient,
    /// Transport channel was closed underneath the request
    ClosedChannel,
    /// Client went away before the response was written
    ClientAbort,
    /// Any other failure, identified by name
    #[strum(disabled)]
    Custom(String),
}

impl FailureKind {
    /// Build a custom kind from its name
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Resolve a kind from its short name
    ///
    /// Names that match no built-in kind resolve to `Custom`
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| Self::custom(name))
    }

    /// Short name used in logs and configuration
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidFormat => "InvalidFormat",
            Self::NoResourceFound => "NoResourceFound",
            Self::Transient => "Transient",
            Self::ClosedChannel => "ClosedChannel",
            Self::ClientAbort => "ClientAbort",
            Self::Custom(name) => name,
        }
    }

    /// Whether this kind describes the connection rather than the request
    ///
    /// Connection-level kinds are classified before any status lookup happens
    #[must_use]
    pub const fn is_connection_level(&self) -> bool {
        matches!(self, Self::ClosedChannel | Self::ClientAbort)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
