use std::collections::HashMap;

use faultline_core::FailureKind;
use http::StatusCode;

/// Status and retry hint resolved for a failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub status: StatusCode,
    pub retryable: bool,
}

/// Immutable lookup from failure kind to response status
///
/// Lookups match the kind exactly. Kinds without an entry resolve to
/// [`StatusTable::DEFAULT_STATUS`].
#[derive(Debug, Clone)]
pub struct StatusTable {
    statuses: HashMap<FailureKind, StatusCode>,
}

impl StatusTable {
    /// Status for kinds without an entry
    pub const DEFAULT_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

    /// A table with no entries, every kind maps to the default
    pub fn empty() -> Self {
        Self {
            statuses: HashMap::new(),
        }
    }

    /// The built-in domain mappings
    pub fn builtin() -> Self {
        Self::empty()
            .with_status(FailureKind::NotFound, StatusCode::NOT_FOUND)
            .with_status(FailureKind::Conflict, StatusCode::CONFLICT)
            .with_status(FailureKind::InvalidArgument, StatusCode::BAD_REQUEST)
            .with_status(FailureKind::InvalidFormat, StatusCode::INTERNAL_SERVER_ERROR)
            .with_status(FailureKind::NoResourceFound, StatusCode::NOT_FOUND)
    }

    /// Add or replace the entry for `kind`
    #[must_use]
    pub fn with_status(mut self, kind: FailureKind, status: StatusCode) -> Self {
        self.statuses.insert(kind, status);
        self
    }

    pub fn status_for(&self, kind: &FailureKind) -> StatusCode {
        self.statuses.get(kind).copied().unwrap_or(Self::DEFAULT_STATUS)
    }

    /// Resolve status and retry hint for `kind`
    pub fn map(&self, kind: &FailureKind) -> Mapping {
        Mapping {
            status: self.status_for(kind),
            retryable: is_retryable(kind),
        }
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Only transient failures are safe to retry
///
/// Looks at the kind alone, causes are not considered.
pub const fn is_retryable(kind: &FailureKind) -> bool {
    matches!(kind, FailureKind::Transient)
}
