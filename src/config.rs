use crate::registry::MAX_TRACKS;

/// Configuration descriptor for a track registry.
#[derive(Debug, Clone)]
pub struct RegistryDesc {
    /// Total number of track slots. Fixed for the registry's lifetime.
    pub capacity: usize,
    /// Ids below this watermark are reserved for the pre-assigned id table and
    /// are never handed out by free-slot allocation.
    pub reserved_ids: usize,
}

impl Default for RegistryDesc {
    fn default() -> Self {
        Self {
            capacity: MAX_TRACKS,
            reserved_ids: 32,
        }
    }
}
