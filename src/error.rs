use std::io;

use thiserror::Error;

/// Hard failures while collecting interactive input.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Username cannot be empty.")]
    EmptyUsername,
    #[error("Input closed before all answers were given.")]
    Closed,
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Failures that abort a contribution fetch. No partial results survive any of these.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API Error: {info}")]
    Api { code: String, info: String },
    #[error("An error occurred during the API request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("An error occurred during the API request: HTTP {status}")]
    Status { status: u16 },
    #[error("Received invalid JSON from the API: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API response had a continue block without uccontinue")]
    MissingContinuation,
}
