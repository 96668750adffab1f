use thiserror::Error;

/// Everything that can end a refresh run.
///
/// All variants are terminal: the run reports the error and exits non-zero,
/// leaving any previously published playlist untouched. Retry is the external
/// scheduler's job, not ours.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The reference does not currently point at a playable live broadcast
    /// (stream offline, video private/removed, or no HLS manifest exposed)
    #[error("could not resolve a live manifest: {0}")]
    Resolution(String),

    /// Talking to the metadata endpoint failed (transport or JSON decode)
    #[error("metadata endpoint request failed")]
    Request(#[from] reqwest::Error),

    /// The destination file could not be written
    #[error("writing output file failed")]
    Io(#[from] std::io::Error),
}
