//! Track handles and descriptors.

use crate::audio_data::AudioData;

/// Handle to one slot in the track table. Stable for the descriptor's
/// lifetime, cheap to copy and compare, safe to carry in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u16);

impl TrackId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrackId({})", self.0)
    }
}

/// One loaded, playable audio asset and its running playback bookkeeping.
#[derive(Debug, Clone)]
pub struct TrackDescriptor {
    file_name: String,
    audio: AudioData,
    looping: bool,
    volume: u8,
    audible_radius: u32,
    /// Running time since playback started, updated from the device side.
    pub(crate) elapsed: u32,
    /// Game time of the last natural completion; 0 until the first one.
    pub(crate) time_last_finished: u32,
    /// Concurrently active playback instances referencing this track.
    pub(crate) num_playing: u32,
}

impl TrackDescriptor {
    /// All mutable bookkeeping starts zeroed so nothing uninitialized is ever
    /// visible through a freshly defined id.
    pub(crate) fn new(
        file_name: String,
        audio: AudioData,
        looping: bool,
        volume: u8,
        audible_radius: u32,
    ) -> Self {
        Self {
            file_name,
            audio,
            looping,
            volume,
            audible_radius,
            elapsed: 0,
            time_last_finished: 0,
            num_playing: 0,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn audio(&self) -> &AudioData {
        &self.audio
    }

    pub fn is_looped(&self) -> bool {
        self.looping
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn audible_radius(&self) -> u32 {
        self.audible_radius
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn time_last_finished(&self) -> u32 {
        self.time_last_finished
    }

    pub fn num_playing(&self) -> u32 {
        self.num_playing
    }
}
