//! Analysis session.
//!
//! Mirrors the analyzer screen flow: pick a pose, analyze live frames,
//! review the last feedback.
//!
//! ```text
//! Idle -> Analyzing -> Reviewing -> Idle
//! ```
//!
//! Like the timer engine this is caller-driven: frames are pushed in, the
//! session never spawns threads or sleeps. Transitions hand their [`Event`]
//! back to the caller; nothing is queued inside the session. Each admitted frame is classified
//! on its own; the session only counts verdicts and never smooths them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::feedback::{evaluate, Feedback, Verdict};
use crate::pose::PoseTarget;
use crate::sampler::{Frame, FrameThrottle, PoseSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Pose picker; pose can be changed.
    Idle,
    Analyzing,
    /// Analysis stopped, last feedback on screen.
    Reviewing,
}

/// Per-session counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames_received: u64,
    /// Dropped by the throttle.
    pub frames_skipped: u64,
    /// Admitted but no body was detected.
    pub frames_without_body: u64,
    pub good: u64,
    pub improve: u64,
    pub poor: u64,
    pub undetectable: u64,
}

impl SessionStats {
    /// Frames that produced feedback.
    pub fn analyzed(&self) -> u64 {
        self.good + self.improve + self.poor + self.undetectable
    }

    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Good => self.good += 1,
            Verdict::Improve => self.improve += 1,
            Verdict::Poor => self.poor += 1,
            Verdict::Undetectable => self.undetectable += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pose: PoseTarget,
    state: SessionState,
    throttle: FrameThrottle,
    latest: Option<Feedback>,
    stats: SessionStats,
}

impl AnalysisSession {
    pub fn new(pose: PoseTarget, interval_ms: u64) -> Self {
        Self {
            pose,
            state: SessionState::Idle,
            throttle: FrameThrottle::new(interval_ms),
            latest: None,
            stats: SessionStats::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn pose(&self) -> PoseTarget {
        self.pose
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Last feedback message, empty before the first analyzed frame.
    pub fn summary(&self) -> &str {
        self.latest.as_ref().map(|f| f.message).unwrap_or("")
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Change the target pose. Only allowed from the picker.
    pub fn select_pose(&mut self, pose: PoseTarget) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(CoreError::InvalidTransition {
                from: self.state,
                action: "select pose",
            });
        }
        self.pose = pose;
        Ok(())
    }

    pub fn start(&mut self) -> Result<Event> {
        if self.state == SessionState::Analyzing {
            return Err(CoreError::InvalidTransition {
                from: self.state,
                action: "start",
            });
        }
        self.state = SessionState::Analyzing;
        self.latest = None;
        self.stats = SessionStats::default();
        self.throttle.reset();
        info!(pose = self.pose.slug(), interval_ms = self.throttle.interval_ms(), "analysis started");
        Ok(Event::AnalysisStarted {
            pose: self.pose,
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self) -> Result<Event> {
        if self.state != SessionState::Analyzing {
            return Err(CoreError::InvalidTransition {
                from: self.state,
                action: "stop",
            });
        }
        self.state = SessionState::Reviewing;
        info!(
            pose = self.pose.slug(),
            analyzed = self.stats.analyzed(),
            skipped = self.stats.frames_skipped,
            "analysis stopped"
        );
        Ok(Event::AnalysisStopped {
            pose: self.pose,
            summary: self.summary().to_string(),
            frames_analyzed: self.stats.analyzed(),
            at: Utc::now(),
        })
    }

    /// Leave the review screen.
    pub fn back(&mut self) -> Result<()> {
        if self.state != SessionState::Reviewing {
            return Err(CoreError::InvalidTransition {
                from: self.state,
                action: "go back",
            });
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Feed one frame. Returns feedback when the frame was analyzed.
    ///
    /// Frames are ignored outside `Analyzing`, when throttled, and when no
    /// body was detected.
    pub fn push_frame(&mut self, frame: &Frame) -> Option<Feedback> {
        if self.state != SessionState::Analyzing {
            return None;
        }
        self.stats.frames_received += 1;

        if !self.throttle.admit(frame.captured_at_ms) {
            self.stats.frames_skipped += 1;
            return None;
        }

        let Some(observation) = frame.primary() else {
            debug!(at_ms = frame.captured_at_ms, "no body in frame");
            self.stats.frames_without_body += 1;
            return None;
        };

        let feedback = evaluate(self.pose, observation);
        self.stats.record(feedback.verdict);
        self.latest = Some(feedback.clone());
        Some(feedback)
    }

    /// Pull frames from `sampler` until it is exhausted.
    pub fn run_sampler<S, F>(&mut self, sampler: &mut S, mut on_feedback: F) -> Result<()>
    where
        S: PoseSampler + ?Sized,
        F: FnMut(&Feedback),
    {
        while let Some(frame) = sampler.next_frame()? {
            if let Some(feedback) = self.push_frame(&frame) {
                on_feedback(&feedback);
            }
        }
        Ok(())
    }
}

/// Channel-driven loop: frames in, feedback out.
///
/// Starts the session if needed and stops it when the frame channel closes
/// or the feedback receiver goes away. Returns the session for review.
pub async fn pump(
    mut session: AnalysisSession,
    mut frames: mpsc::Receiver<Frame>,
    feedback: mpsc::Sender<Feedback>,
) -> AnalysisSession {
    if session.state() != SessionState::Analyzing {
        if let Err(e) = session.start() {
            debug!(error = %e, "pump could not start session");
        }
    }

    while let Some(frame) = frames.recv().await {
        if let Some(fb) = session.push_frame(&frame) {
            if feedback.send(fb).await.is_err() {
                debug!("feedback receiver dropped");
                break;
            }
        }
    }

    if let Err(e) = session.stop() {
        debug!(error = %e, "pump could not stop session");
    }
    session
}
