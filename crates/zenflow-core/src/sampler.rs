//! Sampler adapter.
//!
//! Frames come from an external pose detector. The core only needs "give me
//! the next frame"; [`PoseSampler`] is that seam. Rate limiting lives here
//! too, in [`FrameThrottle`], so the evaluator stays a pure function.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{CoreError, Result};
use crate::joint::JointObservation;

/// Minimum spacing between analyzed frames unless configured otherwise.
pub const DEFAULT_ANALYSIS_INTERVAL_MS: u64 = 1_000;

/// One sampled camera frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Capture time (epoch milliseconds, or any monotonic ms clock).
    pub captured_at_ms: u64,
    /// Detected bodies. Only the first one is analyzed.
    #[serde(default)]
    pub observations: Vec<JointObservation>,
}

impl Frame {
    pub fn new(captured_at_ms: u64, observations: Vec<JointObservation>) -> Self {
        Self {
            captured_at_ms,
            observations,
        }
    }

    /// The body that gets analyzed, if any was detected.
    pub fn primary(&self) -> Option<&JointObservation> {
        self.observations.first()
    }
}

/// Source of frames.
///
/// `Ok(None)` means the source is exhausted. A live detector would block
/// until the next frame is ready and never return `None`.
pub trait PoseSampler {
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Adapts any in-memory frame sequence.
pub struct RecordedSampler<I> {
    frames: I,
}

impl<I> RecordedSampler<I>
where
    I: Iterator<Item = Frame>,
{
    pub fn new(frames: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl<I> PoseSampler for RecordedSampler<I>
where
    I: Iterator<Item = Frame>,
{
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.next())
    }
}

/// Reads one JSON-encoded [`Frame`] per line. Blank lines are skipped.
pub struct JsonLinesSampler<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSampler<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> PoseSampler for JsonLinesSampler<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }

            let frame = serde_json::from_str::<Frame>(line).map_err(|e| CoreError::InvalidFrame {
                line: self.line_no,
                message: e.to_string(),
            })?;
            trace!(line = self.line_no, bodies = frame.observations.len(), "read frame");
            return Ok(Some(frame));
        }
    }
}

/// Admits at most one frame per interval.
///
/// Caller-driven: pass the frame's timestamp to [`admit`](Self::admit). The
/// first frame is always admitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameThrottle {
    interval_ms: u64,
    #[serde(default)]
    last_analysis_ms: Option<u64>,
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_INTERVAL_MS)
    }
}

impl FrameThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_analysis_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns true and records `now_ms` if enough time has passed.
    pub fn admit(&mut self, now_ms: u64) -> bool {
        match self.last_analysis_ms {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last_analysis_ms = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_analysis_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn throttle_admits_first_then_waits_full_interval() {
        let mut throttle = FrameThrottle::new(1_000);
        assert!(throttle.admit(5_000));
        assert!(!throttle.admit(5_400));
        assert!(!throttle.admit(5_999));
        assert!(throttle.admit(6_000));
        assert!(!throttle.admit(6_500));
    }

    #[test]
    fn throttle_reset_readmits() {
        let mut throttle = FrameThrottle::new(1_000);
        assert!(throttle.admit(100));
        throttle.reset();
        assert!(throttle.admit(200));
    }

    #[test]
    fn zero_interval_admits_everything() {
        let mut throttle = FrameThrottle::new(0);
        assert!(throttle.admit(10));
        assert!(throttle.admit(10));
    }

    #[test]
    fn json_lines_skip_blanks_and_report_line_numbers() {
        let input = "{\"captured_at_ms\": 0, \"observations\": []}\n\n{not json}\n";
        let mut sampler = JsonLinesSampler::new(Cursor::new(input));

        let first = sampler.next_frame().unwrap().unwrap();
        assert_eq!(first.captured_at_ms, 0);
        assert!(first.primary().is_none());

        match sampler.next_frame() {
            Err(CoreError::InvalidFrame { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected InvalidFrame, got {other:?}"),
        }
    }

    #[test]
    fn json_lines_end_of_input() {
        let mut sampler = JsonLinesSampler::new(Cursor::new(""));
        assert!(sampler.next_frame().unwrap().is_none());
    }

    #[test]
    fn recorded_sampler_yields_in_order() {
        let mut sampler = RecordedSampler::new(vec![Frame::new(1, vec![]), Frame::new(2, vec![])]);
        assert_eq!(sampler.next_frame().unwrap().unwrap().captured_at_ms, 1);
        assert_eq!(sampler.next_frame().unwrap().unwrap().captured_at_ms, 2);
        assert!(sampler.next_frame().unwrap().is_none());
    }
}
