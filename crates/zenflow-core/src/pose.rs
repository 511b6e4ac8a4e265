//! Yoga poses and their static feedback rules.
//!
//! Every pose is judged on one diagnostic angle. A rule names the joint
//! triple, a central "good" band, zero or more "improve" bands around it,
//! and the four messages shown to the user. Band edges keep their exact
//! open/closed operators; they are not normalized to one convention.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::angle::JointTriple;
use crate::error::CoreError;
use crate::joint::JointName::{
    LeftShoulder, LeftWrist, Neck, RightAnkle, RightHip, RightKnee, RightShoulder, RightWrist,
    Root,
};

/// One of the supported yoga poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PoseTarget {
    Mountain,
    Tree,
    #[serde(rename = "warrior-1")]
    WarriorOne,
    #[serde(rename = "warrior-2")]
    WarriorTwo,
    DownwardDog,
    Childs,
    Cobra,
    Triangle,
    Plank,
    Bridge,
}

impl PoseTarget {
    pub const ALL: [PoseTarget; 10] = [
        PoseTarget::Mountain,
        PoseTarget::Tree,
        PoseTarget::WarriorOne,
        PoseTarget::WarriorTwo,
        PoseTarget::DownwardDog,
        PoseTarget::Childs,
        PoseTarget::Cobra,
        PoseTarget::Triangle,
        PoseTarget::Plank,
        PoseTarget::Bridge,
    ];

    /// Name shown in the pose picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            PoseTarget::Mountain => "Mountain Pose",
            PoseTarget::Tree => "Tree Pose",
            PoseTarget::WarriorOne => "Warrior I",
            PoseTarget::WarriorTwo => "Warrior II",
            PoseTarget::DownwardDog => "Downward-Facing Dog",
            PoseTarget::Childs => "Child's Pose",
            PoseTarget::Cobra => "Cobra Pose",
            PoseTarget::Triangle => "Triangle Pose",
            PoseTarget::Plank => "Plank Pose",
            PoseTarget::Bridge => "Bridge Pose",
        }
    }

    /// Short kebab-case identifier, also the serde representation.
    pub fn slug(&self) -> &'static str {
        match self {
            PoseTarget::Mountain => "mountain",
            PoseTarget::Tree => "tree",
            PoseTarget::WarriorOne => "warrior-1",
            PoseTarget::WarriorTwo => "warrior-2",
            PoseTarget::DownwardDog => "downward-dog",
            PoseTarget::Childs => "childs",
            PoseTarget::Cobra => "cobra",
            PoseTarget::Triangle => "triangle",
            PoseTarget::Plank => "plank",
            PoseTarget::Bridge => "bridge",
        }
    }

    /// Exact lookup by picker name, e.g. "Warrior I". No trimming or case folding.
    pub fn from_display_name(name: &str) -> Option<PoseTarget> {
        PoseTarget::ALL.into_iter().find(|p| p.display_name() == name)
    }

    pub fn rule(&self) -> &'static PoseRule {
        match self {
            PoseTarget::Mountain => &MOUNTAIN,
            PoseTarget::Tree => &TREE,
            PoseTarget::WarriorOne => &WARRIOR_ONE,
            PoseTarget::WarriorTwo => &WARRIOR_TWO,
            PoseTarget::DownwardDog => &DOWNWARD_DOG,
            PoseTarget::Childs => &CHILDS,
            PoseTarget::Cobra => &COBRA,
            PoseTarget::Triangle => &TRIANGLE,
            PoseTarget::Plank => &PLANK,
            PoseTarget::Bridge => &BRIDGE,
        }
    }
}

impl fmt::Display for PoseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PoseTarget {
    type Err = CoreError;

    /// Accepts the display name (case-insensitive) or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PoseTarget::ALL
            .iter()
            .copied()
            .find(|p| p.display_name().eq_ignore_ascii_case(wanted) || p.slug() == wanted)
            .ok_or_else(|| CoreError::UnknownPose(s.to_string()))
    }
}

/// One edge of a [`Band`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Bound {
    /// Edge value excluded.
    Open(f64),
    /// Edge value included.
    Closed(f64),
}

impl Bound {
    pub fn value(&self) -> f64 {
        match self {
            Bound::Open(v) | Bound::Closed(v) => *v,
        }
    }
}

/// Numeric interval for one verdict tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: Bound,
    pub high: Bound,
}

impl Band {
    /// `(low, high)`
    pub const fn open(low: f64, high: f64) -> Self {
        Self {
            low: Bound::Open(low),
            high: Bound::Open(high),
        }
    }

    /// `(low, high]`
    pub const fn open_closed(low: f64, high: f64) -> Self {
        Self {
            low: Bound::Open(low),
            high: Bound::Closed(high),
        }
    }

    /// `[low, high)`
    pub const fn closed_open(low: f64, high: f64) -> Self {
        Self {
            low: Bound::Closed(low),
            high: Bound::Open(high),
        }
    }

    pub fn contains(&self, angle: f64) -> bool {
        let above_low = match self.low {
            Bound::Open(low) => low < angle,
            Bound::Closed(low) => low <= angle,
        };
        let below_high = match self.high {
            Bound::Open(high) => angle < high,
            Bound::Closed(high) => angle <= high,
        };
        above_low && below_high
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match self.low {
            Bound::Open(_) => '(',
            Bound::Closed(_) => '[',
        };
        let close = match self.high {
            Bound::Open(_) => ')',
            Bound::Closed(_) => ']',
        };
        write!(f, "{open}{}, {}{close}", self.low.value(), self.high.value())
    }
}

/// User-facing text for each verdict of one pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoseMessages {
    pub good: &'static str,
    pub improve: &'static str,
    pub poor: &'static str,
    pub undetectable: &'static str,
}

/// Static feedback rule for one pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseRule {
    pub joints: JointTriple,
    pub good: Band,
    pub improve: &'static [Band],
    pub messages: PoseMessages,
}

// Symmetric improve bands shared by the "straight line" poses.
const STRAIGHT_IMPROVE: [Band; 2] = [
    Band::open_closed(160.0, 170.0),
    Band::closed_open(190.0, 200.0),
];

static MOUNTAIN: PoseRule = PoseRule {
    joints: JointTriple::new(Root, Neck, RightShoulder),
    good: Band::open(170.0, 190.0),
    improve: &STRAIGHT_IMPROVE,
    messages: PoseMessages {
        good: "Good Mountain Pose: Spine is straight and aligned",
        improve: "Improve Mountain Pose: Straighten your spine more",
        poor: "Poor Mountain Pose: Focus on aligning your spine vertically",
        undetectable: "Cannot detect Mountain Pose",
    },
};

static TREE: PoseRule = PoseRule {
    joints: JointTriple::new(RightHip, RightKnee, RightAnkle),
    good: Band::open(80.0, 100.0),
    improve: &[
        Band::open_closed(60.0, 80.0),
        Band::closed_open(100.0, 120.0),
    ],
    messages: PoseMessages {
        good: "Good Tree Pose: Foot is well-placed on inner thigh",
        improve: "Improve Tree Pose: Adjust your foot placement on your inner thigh",
        poor: "Poor Tree Pose: Place your foot higher on your inner thigh",
        undetectable: "Cannot detect Tree Pose",
    },
};

static WARRIOR_ONE: PoseRule = PoseRule {
    joints: JointTriple::new(RightHip, RightKnee, RightAnkle),
    good: Band::open(85.0, 95.0),
    improve: &[
        Band::open_closed(75.0, 85.0),
        Band::closed_open(95.0, 105.0),
    ],
    messages: PoseMessages {
        good: "Good Warrior I Pose: Front knee is at 90 degrees",
        improve: "Improve Warrior I Pose: Adjust your front knee to 90 degrees",
        poor: "Poor Warrior I Pose: Bend your front knee more to reach 90 degrees",
        undetectable: "Cannot detect Warrior I Pose",
    },
};

static WARRIOR_TWO: PoseRule = PoseRule {
    joints: JointTriple::new(LeftWrist, LeftShoulder, RightWrist),
    good: Band::open(170.0, 190.0),
    improve: &STRAIGHT_IMPROVE,
    messages: PoseMessages {
        good: "Good Warrior II Pose: Arms are aligned and extended",
        improve: "Improve Warrior II Pose: Extend your arms more",
        poor: "Poor Warrior II Pose: Focus on aligning and extending your arms",
        undetectable: "Cannot detect Warrior II Pose",
    },
};

static DOWNWARD_DOG: PoseRule = PoseRule {
    joints: JointTriple::new(Root, Neck, RightAnkle),
    good: Band::open(30.0, 50.0),
    improve: &[
        Band::open_closed(20.0, 30.0),
        Band::closed_open(50.0, 60.0),
    ],
    messages: PoseMessages {
        good: "Good Downward-Facing Dog Pose: Spine and legs form an inverted V",
        improve: "Improve Downward-Facing Dog Pose: Adjust your hips to form a better inverted V",
        poor: "Poor Downward-Facing Dog Pose: Lift your hips higher to form an inverted V",
        undetectable: "Cannot detect Downward-Facing Dog Pose",
    },
};

static CHILDS: PoseRule = PoseRule {
    joints: JointTriple::new(Root, Neck, RightShoulder),
    good: Band::open(150.0, 180.0),
    improve: &[Band::open_closed(130.0, 150.0)],
    messages: PoseMessages {
        good: "Good Child's Pose: Body is well-folded and relaxed",
        improve: "Improve Child's Pose: Try to relax and fold your body more",
        poor: "Poor Child's Pose: Focus on folding your body and relaxing into the pose",
        undetectable: "Cannot detect Child's Pose",
    },
};

static COBRA: PoseRule = PoseRule {
    joints: JointTriple::new(Root, Neck, RightShoulder),
    good: Band::open(30.0, 60.0),
    improve: &[
        Band::open_closed(15.0, 30.0),
        Band::closed_open(60.0, 75.0),
    ],
    messages: PoseMessages {
        good: "Good Cobra Pose: Upper body is lifted with a good arch",
        improve: "Improve Cobra Pose: Adjust your upper body lift",
        poor: "Poor Cobra Pose: Focus on lifting your upper body while keeping your hips down",
        undetectable: "Cannot detect Cobra Pose",
    },
};

static TRIANGLE: PoseRule = PoseRule {
    joints: JointTriple::new(RightShoulder, Root, RightAnkle),
    good: Band::open(30.0, 60.0),
    improve: &[
        Band::open_closed(15.0, 30.0),
        Band::closed_open(60.0, 75.0),
    ],
    messages: PoseMessages {
        good: "Good Triangle Pose: Trunk is well-extended to the side",
        improve: "Improve Triangle Pose: Extend your trunk more to the side",
        poor: "Poor Triangle Pose: Focus on extending your trunk to the side while keeping your legs straight",
        undetectable: "Cannot detect Triangle Pose",
    },
};

static PLANK: PoseRule = PoseRule {
    joints: JointTriple::new(RightShoulder, Root, RightAnkle),
    good: Band::open(170.0, 190.0),
    improve: &STRAIGHT_IMPROVE,
    messages: PoseMessages {
        good: "Good Plank Pose: Body is well-aligned and straight",
        improve: "Improve Plank Pose: Straighten your body more",
        poor: "Poor Plank Pose: Focus on aligning your body from head to heels",
        undetectable: "Cannot detect Plank Pose",
    },
};

static BRIDGE: PoseRule = PoseRule {
    joints: JointTriple::new(RightShoulder, RightHip, RightKnee),
    good: Band::open(170.0, 190.0),
    improve: &[Band::open_closed(150.0, 170.0)],
    messages: PoseMessages {
        good: "Good Bridge Pose: Hips are well-lifted and aligned",
        improve: "Improve Bridge Pose: Lift your hips higher",
        poor: "Poor Bridge Pose: Focus on lifting your hips while keeping your shoulders on the ground",
        undetectable: "Cannot detect Bridge Pose",
    },
};
