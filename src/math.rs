//! Math primitives for pose smoothing.
//!
//! Angles are binary angles: a `u16` where one full turn is 65536 units, so
//! wrapping arithmetic on the raw value is arithmetic modulo a turn.

pub use glam::Vec3;

/// A binary angle. 65536 units per full turn.
pub type Angle = u16;

/// Signed shortest-path difference from `a` to `b`, in turns of at most half
/// a cycle. Reinterpreting the wrapped difference as two's complement picks
/// the direction under 180 degrees.
#[inline]
pub fn angle_delta(a: Angle, b: Angle) -> i16 {
    b.wrapping_sub(a) as i16
}

/// Blends two time-stamped angles at query time `t`, taking the short way
/// around the cycle. Caller guarantees `t1 != t2`.
#[inline]
pub fn interpolate_angle(v1: Angle, v2: Angle, t1: u32, t2: u32, t: u32) -> Angle {
    let numer = t.wrapping_sub(t1) as i64;
    let denom = t2.wrapping_sub(t1) as i64;
    let step = angle_delta(v1, v2) as i64 * numer / denom;
    v1.wrapping_add_signed(step as i16)
}

/// Blends two time-stamped positions at query time `t`. Caller guarantees
/// `t1 != t2`.
#[inline]
pub fn interpolate_pos(p1: Vec3, p2: Vec3, t1: u32, t2: u32, t: u32) -> Vec3 {
    let numer = t.wrapping_sub(t1) as f32;
    let denom = t2.wrapping_sub(t1) as f32;
    p1 + (p2 - p1) * (numer / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_delta_shortest_path() {
        assert_eq!(angle_delta(0, 100), 100);
        assert_eq!(angle_delta(100, 0), -100);
        // Across the wrap boundary the short way is 72 units, not 65464.
        assert_eq!(angle_delta(65500, 36), 72);
        assert_eq!(angle_delta(36, 65500), -72);
    }

    #[test]
    fn test_interpolate_angle_endpoints() {
        assert_eq!(interpolate_angle(1000, 2000, 10, 20, 10), 1000);
        assert_eq!(interpolate_angle(1000, 2000, 10, 20, 20), 2000);
        assert_eq!(interpolate_angle(1000, 2000, 10, 20, 15), 1500);
    }

    #[test]
    fn test_interpolate_angle_wraparound() {
        // Midpoint of 65500 -> 36 is 0 (the short 72-unit path), nowhere near
        // the half-turn value the long way would produce.
        let mid = interpolate_angle(65500, 36, 0, 100, 50);
        assert_eq!(mid, 0);
        let quarter = interpolate_angle(65500, 36, 0, 100, 25);
        assert_eq!(quarter, 65518);
    }

    #[test]
    fn test_interpolate_pos() {
        let p1 = Vec3::new(0.0, 0.0, 0.0);
        let p2 = Vec3::new(100.0, -40.0, 8.0);
        assert_eq!(interpolate_pos(p1, p2, 0, 10, 0), p1);
        assert_eq!(interpolate_pos(p1, p2, 0, 10, 10), p2);
        assert_eq!(interpolate_pos(p1, p2, 0, 10, 5), Vec3::new(50.0, -20.0, 4.0));
    }
}
