//! Metric name constants

/// Counter of failures answered with an error response
pub const HTTP_SERVER_ERROR_COUNT: &str = "http.server.error.count";

/// Sole attribute of the error counter: the response status as a string
pub const STATUS_CODE_ATTRIBUTE: &str = "http.response.status_code";
