//! Wheel geometry and rotation arithmetic
//!
//! Angles are degrees. Wheel-frame angles are measured clockwise from the 12 o'clock
//! pointer with the wheel at rest; sector `i` spans `[i * w, (i + 1) * w)` where
//! `w = 360 / n`. A rotation angle is how far the wheel has turned clockwise; turning
//! by `a` brings wheel-frame angle `360 - a` under the pointer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{normalize_degrees, polar_to_cartesian};

pub const FULL_TURN: f64 = 360.0;

/// Width of one sector for an `n`-prize wheel (0 when the wheel is empty)
#[inline]
pub fn sector_angle(n: usize) -> f64 {
    if n == 0 { 0.0 } else { FULL_TURN / n as f64 }
}

/// Rotation that puts sector `index` under the pointer, offset by `jitter`.
///
/// With no jitter this is the sector's centreline; index 0 lands at `360 - w/2`.
pub fn target_angle(index: usize, n: usize, jitter: f64) -> f64 {
    let w = sector_angle(n);
    FULL_TURN - (w * index as f64 + w / 2.0) + jitter
}

/// Random offset in `(-w/2, +w/2]`, so the pointer stays inside the half-open sector
pub fn sample_jitter<R: Rng>(rng: &mut R, n: usize) -> f64 {
    let w = sector_angle(n);
    if w <= 0.0 {
        return 0.0;
    }
    w / 2.0 - rng.random_range(0.0..w)
}

/// Full-turn contribution of a spin. Reverse spins take one extra turn.
#[inline]
pub fn base_angle(base_turns: i32) -> f64 {
    let mut angle = base_turns as f64 * FULL_TURN;
    if base_turns < 0 {
        angle -= FULL_TURN;
    }
    angle
}

/// Apply the monotonicity correction to `raw` given the previous rotation `prev`.
///
/// Forward spins never end below `prev`; reverse spins always end below it.
pub fn correct_rotation(raw: f64, prev: f64, base_turns: i32) -> f64 {
    let k = ((raw - prev) / FULL_TURN).floor();
    if base_turns >= 0 {
        raw + (FULL_TURN * k).abs()
    } else {
        raw + (-FULL_TURN - FULL_TURN * k)
    }
}

/// Terminal rotation for a spin landing on sector `index`
pub fn terminal_angle(index: usize, n: usize, jitter: f64, base_turns: i32, prev: f64) -> f64 {
    let raw = base_angle(base_turns) + target_angle(index, n, jitter);
    correct_rotation(raw, prev, base_turns)
}

/// Wheel-frame angle sitting under the pointer at rotation `angle`, in `[0, 360)`
#[inline]
pub fn pointer_angle(angle: f64) -> f64 {
    normalize_degrees(FULL_TURN - angle)
}

/// Sector under the pointer at rotation `angle`
pub fn sector_at_pointer(angle: f64, n: usize) -> Option<usize> {
    if n == 0 || !angle.is_finite() {
        return None;
    }
    let idx = (pointer_angle(angle) / sector_angle(n)).floor() as usize;
    Some(idx.min(n - 1))
}

/// One prize's slice of the wheel, in wheel-frame degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub index: usize,
    /// Start angle (inclusive)
    pub start: f64,
    /// End angle (exclusive)
    pub end: f64,
}

impl Sector {
    pub fn new(index: usize, n: usize) -> Self {
        let w = sector_angle(n);
        Self {
            index,
            start: w * index as f64,
            end: w * (index + 1) as f64,
        }
    }

    #[inline]
    pub fn angular_span(&self) -> f64 {
        self.end - self.start
    }

    /// Mid-angle of the sector
    #[inline]
    pub fn center(&self) -> f64 {
        self.start + self.angular_span() / 2.0
    }

    /// Check if a wheel-frame angle falls in this sector
    pub fn contains_angle(&self, theta: f64) -> bool {
        let theta = normalize_degrees(theta);
        theta >= self.start && theta < self.end
    }

    /// True if the wheel turned by `rotation` shows this sector under the pointer
    pub fn under_pointer(&self, rotation: f64) -> bool {
        self.contains_angle(pointer_angle(rotation))
    }
}

/// Physical wheel dimensions, used by renderers to lay sectors out on a canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelGeometry {
    /// Wheel radius in canvas pixels
    pub radius: f32,
    /// Distance from centre to the sector labels
    pub text_radius: f32,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            radius: 250.0,
            text_radius: 190.0,
        }
    }
}

impl WheelGeometry {
    /// Canvas-space start and end (radians) of sector `index`.
    ///
    /// Canvas angles grow clockwise from 3 o'clock, so sector 0 starts at -π/2.
    pub fn sector_span(&self, index: usize, n: usize) -> (f32, f32) {
        let arc = std::f32::consts::TAU / n.max(1) as f32;
        let start = index as f32 * arc - std::f32::consts::FRAC_PI_2;
        (start, start + arc)
    }

    /// Canvas position of sector `index`'s label, origin at the canvas top-left
    pub fn label_anchor(&self, index: usize, n: usize) -> Vec2 {
        let (start, end) = self.sector_span(index, n);
        let mid = (start + end) / 2.0;
        Vec2::splat(self.radius) + polar_to_cartesian(self.text_radius, mid)
    }

    /// Canvas edge length (the wheel fills a square of this size)
    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_sector_angle() {
        assert_eq!(sector_angle(0), 0.0);
        assert_eq!(sector_angle(4), 90.0);
        assert!((sector_angle(7) * 7.0 - 360.0).abs() < EPS);
    }

    #[test]
    fn test_target_angle_centreline() {
        // four sectors of 90: sector 3 centreline sits at 315 in the wheel frame
        assert_eq!(target_angle(3, 4, 0.0), 45.0);
        assert_eq!(target_angle(0, 4, 0.0), 315.0);
        assert_eq!(sector_at_pointer(45.0, 4), Some(3));
        assert_eq!(sector_at_pointer(315.0, 4), Some(0));
    }

    #[test]
    fn test_base_angle_sign_rule() {
        assert_eq!(base_angle(10), 3600.0);
        assert_eq!(base_angle(0), 0.0);
        assert_eq!(base_angle(-2), -1080.0);
    }

    #[test]
    fn test_first_spin_example() {
        // prize 4 of [10, 10, 10, 70]: index 3, 10 base turns, no prior rotation
        for jitter in [-45.0, 0.0, 45.0] {
            let raw = base_angle(10) + target_angle(3, 4, jitter);
            assert!((3600.0..=3690.0).contains(&raw));
            let final_angle = terminal_angle(3, 4, jitter, 10, 0.0);
            assert!(final_angle >= 3600.0);
        }
    }

    #[test]
    fn test_forward_correction_passes_through_zero() {
        // raw below prev must still advance forward
        let corrected = correct_rotation(10.0, 300.0, 0);
        assert_eq!(corrected, 370.0);
        assert!(corrected > 300.0);
    }

    #[test]
    fn test_forward_spin_only_clears_the_settle_angle() {
        // prize 4 of 4 at 10 turns: the first spin ends at 7290 and settles at 90.
        let first = terminal_angle(3, 4, 45.0, 10, 0.0);
        assert_eq!(first, 7290.0);
        let settle = normalize_degrees(first);
        assert_eq!(settle, 90.0);

        // The next spin is measured from 90, not 7290, so it can end lower.
        let second = terminal_angle(3, 4, -44.0, 10, settle);
        assert_eq!(second, 6841.0);
        assert!(second < first);
        assert!(second > settle);
    }

    #[test]
    fn test_reverse_correction() {
        let corrected = correct_rotation(base_angle(-1) + 45.0, 100.0, -1);
        assert!(corrected < 100.0);
        assert!(corrected >= 100.0 - FULL_TURN);
    }

    #[test]
    fn test_sector_contains() {
        let sector = Sector::new(1, 4);
        assert_eq!(sector.start, 90.0);
        assert_eq!(sector.end, 180.0);
        assert_eq!(sector.center(), 135.0);
        assert!(sector.contains_angle(90.0));
        assert!(!sector.contains_angle(180.0));
        assert!(sector.contains_angle(90.0 + 360.0 * 3.0));
        assert!(sector.under_pointer(225.0));
    }

    #[test]
    fn test_label_anchor() {
        let geometry = WheelGeometry::default();
        // sector 0 of 4 spans 12 to 3 o'clock; its label sits up and to the right
        let anchor = geometry.label_anchor(0, 4);
        assert!(anchor.x > geometry.radius);
        assert!(anchor.y < geometry.radius);
        let offset = anchor - Vec2::splat(geometry.radius);
        assert!((offset.length() - geometry.text_radius).abs() < 0.01);
        assert_eq!(geometry.diameter(), 500.0);
    }

    proptest! {
        #[test]
        fn prop_jitter_stays_in_sector(n in 1usize..40, index_seed in 0usize..1000, u in 0.0f64..1.0) {
            let index = index_seed % n;
            let w = sector_angle(n);
            let jitter = w / 2.0 - u * w;
            let pointer = pointer_angle(target_angle(index, n, jitter));
            let start = index as f64 * w;
            // pointer sits at start + u * w, allow float noise at the wrap
            let offset = (pointer - start).rem_euclid(FULL_TURN);
            let offset = if offset > FULL_TURN - EPS { offset - FULL_TURN } else { offset };
            prop_assert!(offset >= -EPS && offset < w + EPS);
        }

        #[test]
        fn prop_forward_never_goes_backward(
            raw in -5000.0f64..5000.0,
            prev in 0.0f64..360.0,
            turns in 0i32..20,
        ) {
            let corrected = correct_rotation(raw, prev, turns);
            prop_assert!(corrected >= prev - EPS);
            // correction only adds whole turns
            let extra = (corrected - raw) / FULL_TURN;
            prop_assert!((extra - extra.round()).abs() < EPS);
        }

        #[test]
        fn prop_reverse_always_goes_backward(
            raw in -5000.0f64..5000.0,
            prev in 0.0f64..360.0,
            turns in -20i32..0,
        ) {
            let corrected = correct_rotation(raw, prev, turns);
            prop_assert!(corrected < prev + EPS);
            prop_assert!(corrected >= prev - FULL_TURN - EPS);
        }
    }
}
