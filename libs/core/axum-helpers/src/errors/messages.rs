//! Standard messages shared by error responses.

/// Returned for every 5xx; the underlying detail is only logged.
pub const INTERNAL_ERROR: &str = "Something went wrong.";
pub const NOT_FOUND_ROUTE: &str = "The requested resource was not found.";
pub const METHOD_NOT_ALLOWED: &str = "The HTTP method is not allowed for this resource.";
