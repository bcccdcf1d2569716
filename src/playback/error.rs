use thiserror::Error;

/// Setup defects surfaced by the playback bridge. None of these are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error("track {0} is not in the catalog")]
    UnknownTrack(usize),
    #[error("no audio element with id `{0}`")]
    MissingHandle(String),
    #[error("host rejected the call: {0}")]
    Host(String),
}
