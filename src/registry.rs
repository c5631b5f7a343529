//! The fixed-capacity track registry.
//!
//! A bounded arena of track descriptors addressed by small integer handles.
//! Other subsystems carry a cheap, comparable [`TrackId`] instead of an
//! ownership-bearing reference, so slots can be looked up, validated, and
//! revoked independently of how many playback instances are mid-flight.

use crate::audio_data::{AudioLoader, TrackIdMap};
use crate::config::RegistryDesc;
use crate::error::{AudioError, Result};
use crate::track::{TrackDescriptor, TrackId};
use log::{debug, error};

/// Default slot-table capacity.
pub const MAX_TRACKS: usize = 600;

/// Process-wide stop notification, invoked with the stopped instance's owner
/// reference. At most one is registered at a time.
pub type StoppedCallback = Box<dyn FnMut(u64) + Send>;

pub struct TrackRegistry {
    slots: Box<[Option<TrackDescriptor>]>,
    defined: usize,
    reserved: usize,
    /// True between init and shutdown; gates late stop notifications.
    active: bool,
    stopped_callback: Option<StoppedCallback>,
}

impl TrackRegistry {
    /// Allocates an empty slot table and marks the registry active.
    pub fn new(desc: RegistryDesc) -> Self {
        Self {
            slots: (0..desc.capacity).map(|_| None).collect(),
            defined: 0,
            reserved: desc.reserved_ids,
            active: true,
            stopped_callback: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently defined tracks.
    pub fn defined_tracks(&self) -> usize {
        self.defined
    }

    /// Drops all remaining descriptors and marks the registry inactive, so no
    /// further stop notifications are delivered. Does not verify that all
    /// slots were vacated; run [`check_all_released`](Self::check_all_released)
    /// first to catch leaks.
    pub fn shutdown(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.defined = 0;
        self.active = false;
    }

    /// Teardown diagnostic: every slot must be empty. A still-occupied slot
    /// means a track was defined but never released, usually a duplicate or
    /// mismatched definition in the content files. Never called in the hot
    /// path.
    pub fn check_all_released(&self) -> Result<()> {
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(track) = slot {
                error!(
                    "track {} not released at teardown: \"{}\"; check the content files for duplicate ids",
                    i,
                    track.file_name()
                );
                return Err(AudioError::TracksStillLoaded {
                    id: i as u16,
                    name: track.file_name().to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Defines a track: resolves `file_name` through the loader, picks its id
    /// (pre-assigned where the id table says so, next free slot otherwise) and
    /// populates a fresh descriptor.
    ///
    /// Empty names and unresolved assets are soft failures. A collision with
    /// an already-occupied slot is fatal: duplicate ids silently overwriting
    /// each other would corrupt unrelated playback state.
    pub fn define(
        &mut self,
        loader: &dyn AudioLoader,
        id_map: &dyn TrackIdMap,
        file_name: &str,
        looping: bool,
        volume: u8,
        audible_radius: u32,
    ) -> Result<TrackId> {
        if !self.active {
            error!("define \"{}\": registry is not active", file_name);
            return Err(AudioError::RegistryInactive);
        }

        if file_name.is_empty() {
            error!("define: file name empty");
            return Err(AudioError::EmptyFileName);
        }

        let Some(audio) = loader.resolve(file_name) else {
            error!("define: track \"{}\" resource not found", file_name);
            return Err(AudioError::TrackNotFound(file_name.to_owned()));
        };

        let id = match id_map.id_for(file_name) {
            Some(id) => id,
            None => self.allocate_free_id()?,
        };

        if id.index() >= self.slots.len() {
            error!("define \"{}\": pre-assigned id {} out of range", file_name, id);
            return Err(AudioError::IdOutOfRange {
                id: id.0,
                capacity: self.slots.len(),
            });
        }

        if let Some(existing) = &self.slots[id.index()] {
            error!(
                "define \"{}\": track {} already set (file name: \"{}\")",
                file_name,
                id,
                existing.file_name()
            );
            return Err(AudioError::DuplicateTrackId {
                id: id.0,
                existing: existing.file_name().to_owned(),
            });
        }

        self.slots[id.index()] = Some(TrackDescriptor::new(
            file_name.to_owned(),
            audio,
            looping,
            volume,
            audible_radius,
        ));
        self.defined += 1;

        Ok(id)
    }

    /// Clears the slot and drops its descriptor. `None` and already-empty
    /// slots are no-ops, so release is idempotent.
    pub fn release(&mut self, id: Option<TrackId>) {
        let Some(id) = id else {
            return;
        };

        if let Some(slot) = self.slots.get_mut(id.index()) {
            if slot.take().is_some() {
                self.defined -= 1;
                return;
            }
        }
        debug!("release: track {} not defined", id);
    }

    /// Finds the slot holding the track with this file name.
    pub fn lookup(&self, file_name: &str) -> Option<TrackId> {
        self.slots
            .iter()
            .position(|slot| {
                slot.as_ref()
                    .is_some_and(|track| track.file_name() == file_name)
            })
            .map(|i| TrackId(i as u16))
    }

    /// First empty slot at or above the reserved id range. Exhaustion is a
    /// capacity defect, fatal.
    pub fn allocate_free_id(&self) -> Result<TrackId> {
        for i in self.reserved..self.slots.len() {
            if self.slots[i].is_none() {
                return Ok(TrackId(i as u16));
            }
        }

        error!("allocate_free_id: no unused track slot");
        Err(AudioError::PoolExhausted {
            capacity: self.slots.len(),
        })
    }

    /// True iff `id` refers to a live descriptor. Non-fatal: callers treat
    /// "track vanished or never existed" as an ordinary negative result.
    pub fn validate(&self, id: TrackId) -> bool {
        match self.slots.get(id.index()) {
            Some(Some(_)) => true,
            Some(None) => {
                debug!("validate: track {} empty ({} defined)", id, self.defined);
                false
            }
            None => {
                debug!(
                    "validate: track {} outside capacity {}",
                    id,
                    self.slots.len()
                );
                false
            }
        }
    }

    /// The descriptor behind `id`, if it validates.
    pub fn descriptor(&self, id: TrackId) -> Option<&TrackDescriptor> {
        self.slots.get(id.index())?.as_ref()
    }

    pub fn is_looped(&self, id: TrackId) -> Option<bool> {
        self.descriptor(id).map(TrackDescriptor::is_looped)
    }

    pub fn num_playing(&self, id: TrackId) -> Option<u32> {
        self.descriptor(id).map(TrackDescriptor::num_playing)
    }

    pub fn elapsed(&self, id: TrackId) -> Option<u32> {
        self.descriptor(id).map(TrackDescriptor::elapsed)
    }

    pub fn volume(&self, id: TrackId) -> Option<u8> {
        self.descriptor(id).map(TrackDescriptor::volume)
    }

    pub fn audible_radius(&self, id: TrackId) -> Option<u32> {
        self.descriptor(id).map(TrackDescriptor::audible_radius)
    }

    pub fn name(&self, id: TrackId) -> Option<&str> {
        self.descriptor(id).map(TrackDescriptor::file_name)
    }

    pub fn time_last_finished(&self, id: TrackId) -> Option<u32> {
        self.descriptor(id).map(TrackDescriptor::time_last_finished)
    }

    /// Records the game time of a natural completion. Ignores ids that no
    /// longer validate: the track may have been released mid-flight.
    pub fn set_time_last_finished(&mut self, id: TrackId, time: u32) {
        if let Some(Some(track)) = self.slots.get_mut(id.index()) {
            track.time_last_finished = time;
        }
    }

    /// Updates the descriptor's running playback time from the device side.
    pub fn set_elapsed(&mut self, id: TrackId, ticks: u32) {
        if let Some(Some(track)) = self.slots.get_mut(id.index()) {
            track.elapsed = ticks;
        }
    }

    pub(crate) fn note_play_started(&mut self, id: TrackId) {
        if let Some(Some(track)) = self.slots.get_mut(id.index()) {
            track.num_playing += 1;
        }
    }

    pub(crate) fn note_play_stopped(&mut self, id: TrackId) {
        if let Some(Some(track)) = self.slots.get_mut(id.index()) {
            track.num_playing = track.num_playing.saturating_sub(1);
        }
    }

    /// Registers the process-wide stop notification. Replaces (and discards)
    /// any previous registration.
    pub fn set_stopped_callback<F>(&mut self, callback: F)
    where
        F: FnMut(u64) + Send + 'static,
    {
        self.stopped_callback = Some(Box::new(callback));
    }

    pub fn clear_stopped_callback(&mut self) {
        self.stopped_callback = None;
    }

    /// Delivers a stop notification for `owner`. Dropped silently once the
    /// registry is inactive, so late callbacks never fire into a torn-down
    /// target.
    pub(crate) fn notify_stopped(&mut self, owner: u64) {
        if !self.active {
            return;
        }
        if let Some(callback) = &mut self.stopped_callback {
            callback(owner);
        }
    }
}
