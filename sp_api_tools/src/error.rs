use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Could not obtain an access token from Login with Amazon. {0}")]
    AuthError(String),
    #[error("The API returned an empty payload")]
    EmptyResponse,
}

impl SpApiError {
    /// True for HTTP 429 responses. SP-API throttles aggressively, and callers may want to back off instead of
    /// treating it as a hard failure.
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::QueryError { status: 429, .. })
    }
}
