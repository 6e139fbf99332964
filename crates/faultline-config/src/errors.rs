use faultline_core::FailureKind;
use indexmap::IndexMap;
use serde::Deserialize;

/// Error translation configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorsConfig {
    /// Identifier reported in the `instance` field of error bodies
    ///
    /// Defaults to the host name when unset
    #[serde(default)]
    pub instance: Option<String>,
    /// Additional or overriding failure kind to status entries
    #[serde(default)]
    pub statuses: IndexMap<String, u16>,
}

impl ErrorsConfig {
    /// Configured status entries keyed by failure kind
    pub fn status_entries(&self) -> impl Iterator<Item = (FailureKind, u16)> + '_ {
        self.statuses
            .iter()
            .map(|(name, &status)| (FailureKind::from_name(name), status))
    }
}
