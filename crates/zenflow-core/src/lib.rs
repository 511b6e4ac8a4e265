//! # ZenFlow Core Library
//!
//! Rule-based yoga pose feedback. A pose detector supplies joint positions
//! per frame; this crate measures one diagnostic joint angle per pose and
//! turns it into a three-tier verdict with a message for the user.
//!
//! ## Architecture
//!
//! - **Angle Evaluator**: confidence-gated angle at a vertex joint
//! - **Pose Classifier**: static per-pose bands and messages
//! - **Sampler adapter**: frame sources and the analysis throttle
//! - **Session**: picker / analyzing / review flow, events, counters
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`compute_angle`]: angle at the middle of three joints
//! - [`classify`] / [`evaluate`]: verdict for a pose
//! - [`AnalysisSession`]: caller-driven analysis state machine
//! - [`Config`]: application configuration management

pub mod angle;
pub mod error;
pub mod events;
pub mod feedback;
pub mod joint;
pub mod pose;
pub mod sampler;
pub mod session;
pub mod storage;

pub use angle::{angle_for, compute_angle, AngleResult, JointTriple};
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use feedback::{classify, evaluate, evaluate_named, Feedback, Verdict, POSE_NOT_RECOGNIZED};
pub use joint::{JointName, JointObservation, JointPoint, MIN_JOINT_CONFIDENCE};
pub use pose::{Band, Bound, PoseMessages, PoseRule, PoseTarget};
pub use sampler::{
    Frame, FrameThrottle, JsonLinesSampler, PoseSampler, RecordedSampler,
    DEFAULT_ANALYSIS_INTERVAL_MS,
};
pub use session::{pump, AnalysisSession, SessionState, SessionStats};
pub use storage::Config;
