//! Playback dispatch from sound instances to the audio device.
//!
//! The facade validates every request against the track registry before
//! touching the device, so an instance can outlive the track it references
//! without corrupting anything. Voice-completion notifications arrive from
//! the device's own execution context; they are deferred through a channel
//! and applied on the main loop (see [`Playback::drain_finished`]).

use crate::math::Vec3;
use crate::registry::TrackRegistry;
use crate::track::{TrackDescriptor, TrackId};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::debug;

/// Device-side handle to one playing voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceHandle(pub u32);

/// Runtime parameters handed to the device for one play request.
#[derive(Debug, Clone, Copy)]
pub struct PlayParams {
    pub volume: u8,
    pub pos: Vec3,
    pub audible_radius: u32,
}

/// The underlying audio device or mixer.
///
/// `None` from a play call means the device ran out of voices; that is an
/// ordinary transient, not an error.
pub trait AudioDevice {
    fn play_2d(
        &mut self,
        track: &TrackDescriptor,
        params: PlayParams,
        queued: bool,
    ) -> Option<VoiceHandle>;

    fn play_3d(&mut self, track: &TrackDescriptor, params: PlayParams) -> Option<VoiceHandle>;

    fn stop_voice(&mut self, voice: VoiceHandle);

    /// Ticks played so far on this voice.
    fn elapsed_time(&self, voice: VoiceHandle) -> u32;
}

/// Per-instance completion callback, invoked with the instance's owner
/// reference (if any) when its voice completes naturally.
pub type FinishedCallback = Box<dyn FnMut(Option<u64>) + Send>;

/// One active (or recently active) use of a track, distinct from the track
/// definition itself. References its track by id only.
pub struct SoundInstance {
    track: TrackId,
    voice: Option<VoiceHandle>,
    pos: Vec3,
    owner: Option<u64>,
    finished_callback: Option<FinishedCallback>,
    finished: bool,
}

impl SoundInstance {
    pub fn new(track: TrackId) -> Self {
        Self {
            track,
            voice: None,
            pos: Vec3::ZERO,
            owner: None,
            finished_callback: None,
            finished: false,
        }
    }

    /// Associates the external owner whose reference is handed to stop and
    /// finish notifications.
    pub fn with_owner(mut self, owner: u64) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn on_finished<F>(mut self, callback: F) -> Self
    where
        F: FnMut(Option<u64>) + Send + 'static,
    {
        self.finished_callback = Some(Box::new(callback));
        self
    }

    pub fn track(&self) -> TrackId {
        self.track
    }

    pub fn voice(&self) -> Option<VoiceHandle> {
        self.voice
    }

    pub fn owner(&self) -> Option<u64> {
        self.owner
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn params(&self, track: &TrackDescriptor) -> PlayParams {
        PlayParams {
            volume: track.volume(),
            pos: self.pos,
            audible_radius: track.audible_radius(),
        }
    }
}

/// Thin dispatch from sound instances to the device, validating against the
/// registry on every request.
pub struct Playback<D: AudioDevice> {
    device: D,
    finished_tx: Sender<VoiceHandle>,
    finished_rx: Receiver<VoiceHandle>,
}

impl<D: AudioDevice> Playback<D> {
    pub fn new(device: D) -> Self {
        let (finished_tx, finished_rx) = unbounded();
        Self {
            device,
            finished_tx,
            finished_rx,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Producer side of the finished-voice queue. Device completion contexts
    /// hold only this sender; they never touch registry state directly.
    pub fn finished_sender(&self) -> Sender<VoiceHandle> {
        self.finished_tx.clone()
    }

    /// Main-loop drain of voices the device reported as naturally complete.
    /// Callers map each voice back to its instance and run
    /// [`on_finished_naturally`](Self::on_finished_naturally).
    pub fn drain_finished(&self) -> Vec<VoiceHandle> {
        self.finished_rx.try_iter().collect()
    }

    /// Starts position-independent playback. Returns false without side
    /// effects if the track does not validate or the device is out of voices.
    pub fn play_flat(
        &mut self,
        registry: &mut TrackRegistry,
        instance: &mut SoundInstance,
        queued: bool,
    ) -> bool {
        if !registry.validate(instance.track) {
            return false;
        }
        let Some(track) = registry.descriptor(instance.track) else {
            return false;
        };

        let params = instance.params(track);
        match self.device.play_2d(track, params, queued) {
            Some(voice) => {
                instance.voice = Some(voice);
                instance.finished = false;
                registry.note_play_started(instance.track);
                true
            }
            None => {
                debug!("play_flat: no free voice for track {}", instance.track);
                false
            }
        }
    }

    /// Starts positional playback: source position plus falloff from the
    /// track's audible radius.
    pub fn play_positional(
        &mut self,
        registry: &mut TrackRegistry,
        instance: &mut SoundInstance,
    ) -> bool {
        if !registry.validate(instance.track) {
            return false;
        }
        let Some(track) = registry.descriptor(instance.track) else {
            return false;
        };

        let params = instance.params(track);
        match self.device.play_3d(track, params) {
            Some(voice) => {
                instance.voice = Some(voice);
                instance.finished = false;
                registry.note_play_started(instance.track);
                true
            }
            None => {
                debug!(
                    "play_positional: no free voice for track {}",
                    instance.track
                );
                false
            }
        }
    }

    /// Stops the instance's voice and delivers the process-wide stop
    /// notification for its owner. "Stopped" is a logical event: the
    /// notification fires even when the instance never got a device voice.
    pub fn stop(&mut self, registry: &mut TrackRegistry, instance: &mut SoundInstance) {
        match instance.voice.take() {
            Some(voice) => {
                self.device.stop_voice(voice);
                registry.note_play_stopped(instance.track);
            }
            None => debug!(
                "stop: instance of track {} has no device voice; device sources may be exhausted",
                instance.track
            ),
        }

        if let Some(owner) = instance.owner {
            registry.notify_stopped(owner);
        }
    }

    /// Stops the voice at the device level only: no notification, and the
    /// instance keeps its logical playing state.
    pub fn pause(&mut self, instance: &mut SoundInstance) {
        match instance.voice {
            Some(voice) => self.device.stop_voice(voice),
            None => debug!("pause: instance of track {} has no device voice", instance.track),
        }
    }

    /// Applies a natural completion reported by the device. Records the
    /// track's last-finished time (only if the track still validates; it may
    /// have been released mid-flight), runs the per-instance callback, and
    /// marks the instance finished. Does not fire the process-wide stop
    /// notification.
    pub fn on_finished_naturally(
        &mut self,
        registry: &mut TrackRegistry,
        instance: &mut SoundInstance,
        now: u32,
    ) {
        if registry.validate(instance.track) {
            registry.set_time_last_finished(instance.track, now);
        }

        if let Some(callback) = &mut instance.finished_callback {
            callback(instance.owner);
        }

        instance.finished = true;
        if instance.voice.take().is_some() {
            registry.note_play_stopped(instance.track);
        }
    }

    /// Pulls the device's elapsed-time reading for the instance's voice into
    /// its track descriptor.
    pub fn refresh_elapsed(&mut self, registry: &mut TrackRegistry, instance: &SoundInstance) {
        if let Some(voice) = instance.voice {
            let ticks = self.device.elapsed_time(voice);
            registry.set_elapsed(instance.track, ticks);
        }
    }
}
