use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pose::PoseTarget;

/// Returned by session transitions; per-frame results travel as
/// [`Feedback`](crate::Feedback) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    AnalysisStarted {
        pose: PoseTarget,
        at: DateTime<Utc>,
    },
    AnalysisStopped {
        pose: PoseTarget,
        /// Last feedback message shown before stopping.
        summary: String,
        frames_analyzed: u64,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::AnalysisStarted {
            pose: PoseTarget::Tree,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "AnalysisStarted");
        assert_eq!(json["pose"], "tree");

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
