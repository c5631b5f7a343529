//! Per-frame pose sampling for simulated entities.
//!
//! Render code queries an entity's pose at an arbitrary time between two
//! simulation steps. Entity kinds that double-buffer their pose get a smooth
//! blend; everything else gets the raw current snapshot.

use crate::spacetime::Spacetime;

/// A simulated entity as seen by the sampler.
///
/// Kinds that move every tick (units, in-flight projectiles) override
/// [`prev_spacetime`](SimObject::prev_spacetime) to expose their previous
/// snapshot; static kinds keep the default and are never interpolated.
pub trait SimObject {
    /// The current pose snapshot.
    fn spacetime(&self) -> Spacetime;

    /// The snapshot demoted at the last simulation step, if this kind keeps
    /// one.
    fn prev_spacetime(&self) -> Option<Spacetime> {
        None
    }
}

/// Reconstructs `obj`'s pose at query time `t`.
///
/// Short-circuits to the current snapshot when no previous snapshot exists or
/// when no simulation time has elapsed between the two (avoiding a division
/// by zero in the blend).
pub fn object_spacetime(obj: &dyn SimObject, t: u32) -> Spacetime {
    let current = obj.spacetime();
    match obj.prev_spacetime() {
        Some(prev) if prev.time != current.time => Spacetime::interpolate(prev, current, t),
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::spacetime::Rotation;

    struct Scenery {
        st: Spacetime,
    }

    impl SimObject for Scenery {
        fn spacetime(&self) -> Spacetime {
            self.st
        }
    }

    struct Unit {
        prev: Spacetime,
        current: Spacetime,
    }

    impl SimObject for Unit {
        fn spacetime(&self) -> Spacetime {
            self.current
        }

        fn prev_spacetime(&self) -> Option<Spacetime> {
            Some(self.prev)
        }
    }

    #[test]
    fn test_static_kind_returns_current_pose() {
        let st = Spacetime::new(500, Vec3::new(1.0, 2.0, 3.0), Rotation::new(7, 8, 9));
        let obj = Scenery { st };
        // Query time is irrelevant for kinds without a previous snapshot.
        assert_eq!(object_spacetime(&obj, 123), st);
        assert_eq!(object_spacetime(&obj, 9999), st);
    }

    #[test]
    fn test_smoothed_kind_blends() {
        let obj = Unit {
            prev: Spacetime::new(100, Vec3::ZERO, Rotation::new(65500, 0, 0)),
            current: Spacetime::new(200, Vec3::new(10.0, 0.0, 0.0), Rotation::new(36, 0, 0)),
        };
        let mid = object_spacetime(&obj, 150);
        assert_eq!(mid.pos, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(mid.rot.direction, 0);
    }

    #[test]
    fn test_equal_timestamps_short_circuit() {
        let st = Spacetime::new(300, Vec3::new(4.0, 4.0, 4.0), Rotation::default());
        let obj = Unit {
            prev: st,
            current: st,
        };
        // No elapsed step between snapshots: must not divide by zero.
        assert_eq!(object_spacetime(&obj, 300), st);
    }
}
