//! Error types at the crate boundary.

use thiserror::Error;

/// Static message shown whenever pairs cannot be loaded.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load language pairs. Please try again.";

/// Failure to obtain word pairs. The variants only feed the log; users always
/// see [`FETCH_FAILED_MESSAGE`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("service responded with status {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Failure reading or writing the local-storage game history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("local storage is unavailable")]
    Unavailable,

    #[error("storage access failed: {0}")]
    Storage(String),

    #[error("could not encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_fetch_error_maps_to_the_same_message() {
        let errs = [
            FetchError::Status { status: 500 },
            FetchError::Transport("offline".into()),
            FetchError::Decode("eof".into()),
        ];
        for e in &errs {
            assert_eq!(e.user_message(), FETCH_FAILED_MESSAGE);
        }
    }
}
