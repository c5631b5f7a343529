//! Decoded audio buffers and the loader collaborator seam.

use crate::track::TrackId;
use std::sync::Arc;
use std::time::Duration;

/// A decoded, in-memory audio asset with reference-counted sharing.
///
/// Decoding is not this crate's concern; whoever implements [`AudioLoader`]
/// produces these.
#[derive(Debug, Clone)]
pub struct AudioData {
    inner: Arc<AudioDataInner>,
}

#[derive(Debug)]
struct AudioDataInner {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            inner: Arc::new(AudioDataInner {
                samples,
                sample_rate,
            }),
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.inner.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.inner.sample_rate
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.inner.samples.len() as f64 / self.inner.sample_rate as f64)
    }
}

/// Resolves a track file name to its decoded buffer.
///
/// The registry consults this during `define`; a `None` return is a soft
/// failure (the track simply isn't defined). Implement it over whatever
/// resource system owns the game's assets.
pub trait AudioLoader {
    fn resolve(&self, file_name: &str) -> Option<AudioData>;
}

/// Pre-assigned id table for well-known assets.
///
/// Content files may refer to sounds by stable id; assets listed here always
/// define into the same slot instead of taking the next free one.
pub trait TrackIdMap {
    fn id_for(&self, file_name: &str) -> Option<TrackId>;
}

/// The empty id table: every asset gets a free slot.
pub struct NoPreassignedIds;

impl TrackIdMap for NoPreassignedIds {
    fn id_for(&self, _file_name: &str) -> Option<TrackId> {
        None
    }
}
