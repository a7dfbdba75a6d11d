use thiserror::Error;

/// Typed error enum for MediaCMS API operations.
///
/// Progress reports are best-effort telemetry: callers log these and move
/// on, never retry. Media info fetches surface them to the host instead.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The watch-page URL could not be parsed at all
    #[error("Invalid media URL: {0}")]
    InvalidUrl(String),

    /// No recognizable media token in the watch-page URL
    #[error("No media token found in URL: {0}")]
    MissingToken(String),

    /// Network/connection errors (timeout, connection refused, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Server returned status {status}")]
    Status { status: u16 },

    /// Response body did not match the expected shape
    #[error("Failed to parse media info: {0}")]
    Parse(String),

    /// Media info decoded but contained nothing playable
    #[error("No playable source for media {0}")]
    NoPlayableSource(String),
}
