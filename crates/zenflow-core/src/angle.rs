//! Joint angle evaluation.
//!
//! The angle at the vertex joint is the absolute difference between the
//! polar angles of the two limb vectors, in degrees. This is not the
//! dot-product interior angle: results span `[0, 360)` and are never wrapped.
//! Pose thresholds are tuned against this exact formula.

use serde::{Deserialize, Serialize};

use crate::joint::{JointName, JointObservation, JointPoint};

/// Three joints whose middle one is the vertex of the measured angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub first: JointName,
    pub vertex: JointName,
    pub last: JointName,
}

impl JointTriple {
    pub const fn new(first: JointName, vertex: JointName, last: JointName) -> Self {
        Self {
            first,
            vertex,
            last,
        }
    }
}

/// Outcome of measuring one angle in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "degrees", rename_all = "lowercase")]
pub enum AngleResult {
    Measured(f64),
    /// A required joint was missing or at/below the confidence threshold.
    Undetectable,
}

impl AngleResult {
    pub fn degrees(&self) -> Option<f64> {
        match self {
            AngleResult::Measured(deg) => Some(*deg),
            AngleResult::Undetectable => None,
        }
    }
}

/// Angle at `j2` formed by `j1` and `j3`.
///
/// Confidence is gated before any geometry: if any joint is at or below
/// [`MIN_JOINT_CONFIDENCE`](crate::joint::MIN_JOINT_CONFIDENCE) the result
/// is `Undetectable`.
pub fn compute_angle(j1: &JointPoint, j2: &JointPoint, j3: &JointPoint) -> AngleResult {
    if !(j1.is_usable() && j2.is_usable() && j3.is_usable()) {
        return AngleResult::Undetectable;
    }

    let (v1x, v1y) = (j1.x - j2.x, j1.y - j2.y);
    let (v2x, v2y) = (j3.x - j2.x, j3.y - j2.y);

    let radians = v2y.atan2(v2x) - v1y.atan2(v1x);
    AngleResult::Measured(radians.to_degrees().abs())
}

/// Look up the triple in `observation` and measure it.
pub fn angle_for(observation: &JointObservation, triple: JointTriple) -> AngleResult {
    match (
        observation.point(triple.first),
        observation.point(triple.vertex),
        observation.point(triple.last),
    ) {
        (Some(j1), Some(j2), Some(j3)) => compute_angle(j1, j2, j3),
        _ => AngleResult::Undetectable,
    }
}
