//! Timestamped pose snapshots and their blending.

use crate::math::{Angle, Vec3, interpolate_angle, interpolate_pos};

/// Orientation as three independent binary angles. No quaternion coupling:
/// per-frame angular deltas are small enough that blending each component on
/// its own cycle is sufficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rotation {
    pub direction: Angle,
    pub pitch: Angle,
    pub roll: Angle,
}

impl Rotation {
    pub fn new(direction: Angle, pitch: Angle, roll: Angle) -> Self {
        Self {
            direction,
            pitch,
            roll,
        }
    }
}

/// An entity's pose at a point in simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacetime {
    /// Simulation time at which this pose was recorded, in game ticks.
    pub time: u32,
    pub pos: Vec3,
    pub rot: Rotation,
}

impl Spacetime {
    pub fn new(time: u32, pos: Vec3, rot: Rotation) -> Self {
        Self { time, pos, rot }
    }

    /// Reconstructs the pose at query time `t` between two snapshots.
    /// Caller guarantees `a.time != b.time`.
    pub fn interpolate(a: Spacetime, b: Spacetime, t: u32) -> Spacetime {
        Spacetime {
            time: t,
            pos: interpolate_pos(a.pos, b.pos, a.time, b.time, t),
            rot: interpolate_rot(a.rot, b.rot, a.time, b.time, t),
        }
    }
}

/// Blends two rotations component by component, each on its own cycle.
pub fn interpolate_rot(v1: Rotation, v2: Rotation, t1: u32, t2: u32, t: u32) -> Rotation {
    Rotation {
        direction: interpolate_angle(v1.direction, v2.direction, t1, t2, t),
        pitch: interpolate_angle(v1.pitch, v2.pitch, t1, t2, t),
        roll: interpolate_angle(v1.roll, v2.roll, t1, t2, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_rot_per_component() {
        let a = Rotation::new(1000, 65500, 0);
        let b = Rotation::new(2000, 36, 500);
        let mid = interpolate_rot(a, b, 0, 10, 5);
        assert_eq!(mid.direction, 1500);
        assert_eq!(mid.pitch, 0); // wraps through the boundary
        assert_eq!(mid.roll, 250);
    }

    #[test]
    fn test_interpolate_spacetime_endpoints() {
        let a = Spacetime::new(100, Vec3::new(0.0, 0.0, 0.0), Rotation::new(10, 20, 30));
        let b = Spacetime::new(200, Vec3::new(80.0, 0.0, -8.0), Rotation::new(110, 20, 30));
        let at_a = Spacetime::interpolate(a, b, 100);
        assert_eq!(at_a.pos, a.pos);
        assert_eq!(at_a.rot, a.rot);
        let at_b = Spacetime::interpolate(a, b, 200);
        assert_eq!(at_b.pos, b.pos);
        assert_eq!(at_b.rot, b.rot);
        let mid = Spacetime::interpolate(a, b, 150);
        assert_eq!(mid.time, 150);
        assert_eq!(mid.pos, Vec3::new(40.0, 0.0, -4.0));
        assert_eq!(mid.rot.direction, 60);
    }
}
