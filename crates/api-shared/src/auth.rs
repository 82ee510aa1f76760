/// Header carrying the API key on protected requests.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing API key")]
    Missing,
    #[error("invalid API key")]
    Invalid,
}

/// Validates the provided API key against the key configured at startup.
///
/// The expected key is passed in rather than read from the environment, so callers resolve
/// it once when building their state.
pub fn validate_api_key(provided: Option<&str>, expected: &str) -> Result<(), AuthError> {
    match provided {
        None => Err(AuthError::Missing),
        Some(key) if key == expected => Ok(()),
        Some(_) => Err(AuthError::Invalid),
    }
}
