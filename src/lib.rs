//! Fixed-capacity audio track registry and pose smoothing for real-time
//! simulations.
//!
//! Two independent halves share this crate:
//!
//! - The [`TrackRegistry`] and [`Playback`] facade: a bounded pool of named
//!   audio tracks addressed by small integer handles, plus the dispatch layer
//!   that validates each playback request and delegates to an external
//!   [`AudioDevice`].
//! - The [`sampler`] and its interpolation primitives: per-frame blending of
//!   an entity's two timestamped pose snapshots into a smooth intermediate
//!   pose for rendering, with correct wraparound on cyclic angles.
//!
//! Decoding, mixing, and the entity hierarchy live behind the collaborator
//! traits ([`AudioLoader`], [`TrackIdMap`], [`AudioDevice`], [`SimObject`]).

pub mod audio_data;
pub mod config;
pub mod error;
pub mod math;
pub mod playback;
pub mod registry;
pub mod sampler;
pub mod spacetime;
pub mod track;

pub use audio_data::{AudioData, AudioLoader, NoPreassignedIds, TrackIdMap};
pub use config::RegistryDesc;
pub use error::{AudioError, Result};
pub use playback::{AudioDevice, PlayParams, Playback, SoundInstance, VoiceHandle};
pub use registry::{MAX_TRACKS, StoppedCallback, TrackRegistry};
pub use sampler::{SimObject, object_spacetime};
pub use spacetime::{Rotation, Spacetime, interpolate_rot};
pub use track::{TrackDescriptor, TrackId};

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShotLoader;

    impl AudioLoader for OneShotLoader {
        fn resolve(&self, file_name: &str) -> Option<AudioData> {
            (file_name == "boom.wav").then(|| AudioData::new(vec![0.0; 2048], 22050))
        }
    }

    #[derive(Default)]
    struct SingleVoiceDevice {
        playing: Option<VoiceHandle>,
    }

    impl AudioDevice for SingleVoiceDevice {
        fn play_2d(
            &mut self,
            _track: &TrackDescriptor,
            _params: PlayParams,
            _queued: bool,
        ) -> Option<VoiceHandle> {
            if self.playing.is_some() {
                return None;
            }
            let voice = VoiceHandle(1);
            self.playing = Some(voice);
            Some(voice)
        }

        fn play_3d(
            &mut self,
            track: &TrackDescriptor,
            params: PlayParams,
        ) -> Option<VoiceHandle> {
            self.play_2d(track, params, false)
        }

        fn stop_voice(&mut self, voice: VoiceHandle) {
            if self.playing == Some(voice) {
                self.playing = None;
            }
        }

        fn elapsed_time(&self, _voice: VoiceHandle) -> u32 {
            0
        }
    }

    #[test]
    fn test_track_lifecycle_end_to_end() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut registry = TrackRegistry::new(RegistryDesc::default());
        let mut playback = Playback::new(SingleVoiceDevice::default());

        let id = registry
            .define(&OneShotLoader, &NoPreassignedIds, "boom.wav", false, 80, 500)
            .unwrap();
        assert!(registry.validate(id));
        assert_eq!(registry.volume(id), Some(80));
        assert_eq!(registry.time_last_finished(id), Some(0));

        let mut instance = SoundInstance::new(id).with_owner(1);
        assert!(playback.play_flat(&mut registry, &mut instance, false));
        assert_eq!(registry.num_playing(id), Some(1));

        // The device reports completion from its own context; the main loop
        // drains and applies it.
        let voice = instance.voice().unwrap();
        playback.finished_sender().send(voice).unwrap();
        for finished in playback.drain_finished() {
            assert_eq!(finished, voice);
            playback.on_finished_naturally(&mut registry, &mut instance, 5000);
        }
        assert_eq!(registry.time_last_finished(id), Some(5000));
        assert!(instance.is_finished());

        registry.release(Some(id));
        assert!(!registry.validate(id));
        assert!(registry.check_all_released().is_ok());
        registry.shutdown();
    }
}
