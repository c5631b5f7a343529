//! Error types for warbler

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioError {
    /// A track was defined with an empty file name.
    #[error("track file name is empty")]
    EmptyFileName,

    /// The loader could not resolve the named asset.
    #[error("track resource not found: {0}")]
    TrackNotFound(String),

    /// A define resolved to a slot that is already occupied. Duplicate ids
    /// silently overwriting each other would corrupt unrelated playback state,
    /// so this is not recoverable.
    #[error("track id {id} already defined (file name: \"{existing}\")")]
    DuplicateTrackId { id: u16, existing: String },

    /// No free slot remains in the track table.
    #[error("track pool exhausted ({capacity} slots)")]
    PoolExhausted { capacity: usize },

    /// The pre-assigned id table handed out an id beyond the slot table.
    #[error("pre-assigned track id {id} outside capacity {capacity}")]
    IdOutOfRange { id: u16, capacity: usize },

    /// An operation requiring an active registry was called before init or
    /// after shutdown.
    #[error("track registry is not active")]
    RegistryInactive,

    /// Teardown diagnostic: a track was still defined when the leak check ran.
    #[error("track {id} still loaded at teardown: \"{name}\"")]
    TracksStillLoaded { id: u16, name: String },
}

impl AudioError {
    /// Fatal errors indicate a load-time data or capacity defect. The
    /// composing system should treat them as unrecoverable rather than
    /// continue with a possibly corrupt track table.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTrackId { .. }
                | Self::PoolExhausted { .. }
                | Self::IdOutOfRange { .. }
                | Self::RegistryInactive
                | Self::TracksStillLoaded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AudioError>;
