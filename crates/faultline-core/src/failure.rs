use std::io;

use thiserror::Error;

use crate::FailureKind;

/// Boxed error usable as a failure cause
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure raised while serving a request
///
/// Carries its kind, an optional message and an optional cause. The error
/// layer only ever reads a failure; it is dropped once a response is built.
#[derive(Debug, Error)]
#[error("{kind}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Failure {
    kind: FailureKind,
    message: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl Failure {
    /// Create a failure without message or cause
    #[must_use]
    pub const fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Attach a human-readable message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the error that caused this failure
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NotFound).with_message(message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Conflict).with_message(message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidArgument).with_message(message)
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Transient).with_message(message)
    }

    /// Raised by the router when nothing matches the request target
    pub fn no_resource_found(path: &str) -> Self {
        Self::new(FailureKind::NoResourceFound).with_message(format!("No static resource {path}."))
    }

    /// The client disconnected mid-request
    #[must_use]
    pub const fn client_abort() -> Self {
        Self::new(FailureKind::ClientAbort)
    }

    /// The transport channel was closed
    #[must_use]
    pub const fn closed_channel() -> Self {
        Self::new(FailureKind::ClosedChannel)
    }

    /// A failure of a kind the built-in taxonomy does not know about
    pub fn custom(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::custom(name)).with_message(message)
    }

    #[must_use]
    pub const fn kind(&self) -> &FailureKind {
        &self.kind
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::ConnectionAborted | io::ErrorKind::ConnectionReset | io::ErrorKind::BrokenPipe => {
                FailureKind::ClientAbort
            }
            io::ErrorKind::NotConnected => FailureKind::ClosedChannel,
            _ => FailureKind::custom("Io"),
        };

        Self::new(kind).with_message(err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        let kind = match err.classify() {
            serde_json::error::Category::Data => FailureKind::InvalidFormat,
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof | serde_json::error::Category::Io => {
                FailureKind::custom("JsonParse")
            }
        };

        Self::new(kind).with_message(err.to_string()).with_source(err)
    }
}
