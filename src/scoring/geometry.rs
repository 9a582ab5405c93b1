//! Pose comparison helpers
//!
//! Stateless checks of a detected pose against an expected one. Positions are
//! compared on the horizontal plane only; orientations first pass a coarse
//! quaternion gate and then a yaw comparison that handles wraparound.

use std::f64::consts::{PI, TAU};

use super::config::PoseTolerance;
use super::types::{Pose, Position, Quaternion};

/// Outcome of comparing two poses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoseCheck {
    pub position_ok: bool,
    pub orientation_ok: bool,
}

impl PoseCheck {
    pub fn is_ok(&self) -> bool {
        self.position_ok && self.orientation_ok
    }
}

/// Wrap an angle difference into [-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Shortest angular distance between two yaw angles
pub fn yaw_distance(expected: f64, detected: f64) -> f64 {
    normalize_angle(detected - expected).abs()
}

pub fn position_matches(
    expected: &Position,
    detected: &Position,
    tolerance: &PoseTolerance,
) -> bool {
    expected.planar_distance(detected) < tolerance.max_translation
}

pub fn orientation_matches(
    expected: &Quaternion,
    detected: &Quaternion,
    tolerance: &PoseTolerance,
) -> bool {
    // q and -q are the same rotation
    if detected.dot(expected).abs() < tolerance.min_quaternion_dot {
        return false;
    }
    yaw_distance(expected.yaw(), detected.yaw()) < tolerance.max_yaw
}

pub fn compare_poses(expected: &Pose, detected: &Pose, tolerance: &PoseTolerance) -> PoseCheck {
    PoseCheck {
        position_ok: position_matches(&expected.position, &detected.position, tolerance),
        orientation_ok: orientation_matches(
            &expected.orientation,
            &detected.orientation,
            tolerance,
        ),
    }
}

pub fn pose_matches(expected: &Pose, detected: &Pose, tolerance: &PoseTolerance) -> bool {
    compare_poses(expected, detected, tolerance).is_ok()
}
