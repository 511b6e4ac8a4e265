//! Body joints as reported by a pose detector.
//!
//! A [`JointObservation`] holds the landmarks of one detected body in one
//! sampled frame. Coordinates are normalized image-space values in `[0, 1]`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Joints at or below this confidence are treated as not detected.
pub const MIN_JOINT_CONFIDENCE: f64 = 0.1;

/// Anatomical landmark identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    Neck,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    /// Center of the hips.
    Root,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointName {
    pub const ALL: [JointName; 19] = [
        JointName::Nose,
        JointName::LeftEye,
        JointName::RightEye,
        JointName::LeftEar,
        JointName::RightEar,
        JointName::Neck,
        JointName::LeftShoulder,
        JointName::RightShoulder,
        JointName::LeftElbow,
        JointName::RightElbow,
        JointName::LeftWrist,
        JointName::RightWrist,
        JointName::Root,
        JointName::LeftHip,
        JointName::RightHip,
        JointName::LeftKnee,
        JointName::RightKnee,
        JointName::LeftAnkle,
        JointName::RightAnkle,
    ];

    /// Wire name, e.g. `rightShoulder`.
    pub fn as_str(&self) -> &'static str {
        match self {
            JointName::Nose => "nose",
            JointName::LeftEye => "leftEye",
            JointName::RightEye => "rightEye",
            JointName::LeftEar => "leftEar",
            JointName::RightEar => "rightEar",
            JointName::Neck => "neck",
            JointName::LeftShoulder => "leftShoulder",
            JointName::RightShoulder => "rightShoulder",
            JointName::LeftElbow => "leftElbow",
            JointName::RightElbow => "rightElbow",
            JointName::LeftWrist => "leftWrist",
            JointName::RightWrist => "rightWrist",
            JointName::Root => "root",
            JointName::LeftHip => "leftHip",
            JointName::RightHip => "rightHip",
            JointName::LeftKnee => "leftKnee",
            JointName::RightKnee => "rightKnee",
            JointName::LeftAnkle => "leftAnkle",
            JointName::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JointName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JointName::ALL
            .iter()
            .copied()
            .find(|j| j.as_str() == s)
            .ok_or_else(|| CoreError::UnknownJoint(s.to_string()))
    }
}

/// A single detected landmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointPoint {
    pub x: f64,
    pub y: f64,
    /// Detection confidence (0.0-1.0)
    pub confidence: f64,
}

impl JointPoint {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }

    /// Whether the detector is confident enough for angle measurement.
    pub fn is_usable(&self) -> bool {
        self.confidence > MIN_JOINT_CONFIDENCE
    }
}

/// Landmarks of one detected body in one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointObservation {
    joints: BTreeMap<JointName, JointPoint>,
}

impl JointObservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_joint(mut self, name: JointName, point: JointPoint) -> Self {
        self.joints.insert(name, point);
        self
    }

    pub fn point(&self, name: JointName) -> Option<&JointPoint> {
        self.joints.get(&name)
    }

    pub fn joints(&self) -> impl Iterator<Item = (JointName, &JointPoint)> {
        self.joints.iter().map(|(name, point)| (*name, point))
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }
}

impl FromIterator<(JointName, JointPoint)> for JointObservation {
    fn from_iter<I: IntoIterator<Item = (JointName, JointPoint)>>(iter: I) -> Self {
        Self {
            joints: iter.into_iter().collect(),
        }
    }
}
