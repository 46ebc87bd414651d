// Shared HTTP response types for consistent API error payloads.

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string; every HTTP error uses this schema.
    pub error: String,
}
