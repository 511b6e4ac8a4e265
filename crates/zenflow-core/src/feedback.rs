//! Pose classification.
//!
//! `classify` is a pure function of `(pose, angle)`: no state survives
//! between frames, so consecutive frames may flip between verdicts.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::angle::{angle_for, AngleResult};
use crate::joint::JointObservation;
use crate::pose::PoseTarget;

/// Returned by [`evaluate_named`] when the pose name is not known.
pub const POSE_NOT_RECOGNIZED: &str = "Pose not recognized";

/// Qualitative tier of one measured frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Improve,
    Poor,
    Undetectable,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Good => "good",
            Verdict::Improve => "improve",
            Verdict::Poor => "poor",
            Verdict::Undetectable => "undetectable",
        };
        f.write_str(s)
    }
}

/// Verdict plus the message to display for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub pose: PoseTarget,
    pub verdict: Verdict,
    /// Measured angle in degrees, absent when undetectable.
    pub angle: Option<f64>,
    pub message: &'static str,
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Classify an already measured angle against the pose's rule.
pub fn classify(pose: PoseTarget, angle: AngleResult) -> Feedback {
    let rule = pose.rule();
    let (verdict, message) = match angle {
        AngleResult::Undetectable => (Verdict::Undetectable, rule.messages.undetectable),
        AngleResult::Measured(deg) if rule.good.contains(deg) => (Verdict::Good, rule.messages.good),
        AngleResult::Measured(deg) if rule.improve.iter().any(|b| b.contains(deg)) => {
            (Verdict::Improve, rule.messages.improve)
        }
        AngleResult::Measured(_) => (Verdict::Poor, rule.messages.poor),
    };

    Feedback {
        pose,
        verdict,
        angle: angle.degrees(),
        message,
    }
}

/// Measure the pose's diagnostic angle in `observation` and classify it.
pub fn evaluate(pose: PoseTarget, observation: &JointObservation) -> Feedback {
    let angle = angle_for(observation, pose.rule().joints);
    let feedback = classify(pose, angle);
    debug!(
        pose = pose.slug(),
        angle = ?feedback.angle,
        verdict = %feedback.verdict,
        "evaluated frame"
    );
    feedback
}

/// String-keyed entry point. Always yields a message, never an error.
///
/// `pose_name` must be a display name spelled exactly; slugs and other
/// spellings fall back to [`POSE_NOT_RECOGNIZED`]. Use [`PoseTarget`]'s
/// `FromStr` for lenient parsing.
pub fn evaluate_named(pose_name: &str, observation: &JointObservation) -> String {
    match PoseTarget::from_display_name(pose_name) {
        Some(pose) => evaluate(pose, observation).message.to_string(),
        None => POSE_NOT_RECOGNIZED.to_string(),
    }
}
