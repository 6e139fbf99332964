use http::{Method, Uri};

/// Request data available to the error layer
///
/// Only the target is used, and only for logging
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// HTTP method of the failed request
    pub method: Method,
    /// Request target as received
    pub uri: Uri,
}

impl RequestContext {
    pub const fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    /// Capture the context from request parts
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone())
    }

    /// Path component of the request target
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}
