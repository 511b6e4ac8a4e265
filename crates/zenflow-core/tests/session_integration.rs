//! Integration tests for analysis sessions fed from recorded frames.

use std::io::Cursor;

use zenflow_core::{
    AnalysisSession, Event, Frame, JointName, JointObservation, JointPoint, JsonLinesSampler,
    PoseTarget, RecordedSampler, SessionState, Verdict,
};

fn bridge_frame(at_ms: u64, knee_y: f64) -> Frame {
    let body = JointObservation::new()
        .with_joint(JointName::RightShoulder, JointPoint::new(0.2, 0.5, 0.9))
        .with_joint(JointName::RightHip, JointPoint::new(0.5, 0.5, 0.9))
        .with_joint(JointName::RightKnee, JointPoint::new(0.8, knee_y, 0.9));
    Frame::new(at_ms, vec![body])
}

#[test]
fn test_full_session_from_json_lines() {
    let lines = [
        r#"{"captured_at_ms": 0, "observations": [{"root": {"x": 0.5, "y": 0.3, "confidence": 0.9}, "neck": {"x": 0.5, "y": 0.6, "confidence": 0.9}, "rightShoulder": {"x": 0.5, "y": 0.9, "confidence": 0.9}}]}"#,
        r#"{"captured_at_ms": 300, "observations": []}"#,
        "",
        r#"{"captured_at_ms": 1000, "observations": [{"root": {"x": 0.5, "y": 0.3, "confidence": 0.05}, "neck": {"x": 0.5, "y": 0.6, "confidence": 0.9}, "rightShoulder": {"x": 0.5, "y": 0.9, "confidence": 0.9}}]}"#,
        r#"{"captured_at_ms": 2000}"#,
    ]
    .join("\n");

    let mut sampler = JsonLinesSampler::new(Cursor::new(lines));
    let mut session = AnalysisSession::new(PoseTarget::Mountain, 1_000);
    session.start().unwrap();

    let mut seen = Vec::new();
    session
        .run_sampler(&mut sampler, |fb| seen.push(fb.verdict))
        .unwrap();
    session.stop().unwrap();

    assert_eq!(seen, vec![Verdict::Good, Verdict::Undetectable]);
    assert_eq!(session.summary(), "Cannot detect Mountain Pose");

    let stats = session.stats();
    assert_eq!(stats.frames_received, 4);
    assert_eq!(stats.frames_skipped, 1);
    assert_eq!(stats.frames_without_body, 1);
    assert_eq!(stats.good, 1);
    assert_eq!(stats.undetectable, 1);
}

#[test]
fn test_malformed_line_stops_run_with_error() {
    let input = "{\"captured_at_ms\": 0}\n{\"captured_at_ms\": \"soon\"}\n";
    let mut sampler = JsonLinesSampler::new(Cursor::new(input));
    let mut session = AnalysisSession::new(PoseTarget::Tree, 1_000);
    session.start().unwrap();

    let err = session.run_sampler(&mut sampler, |_| {}).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
    assert_eq!(session.state(), SessionState::Analyzing);
}

#[test]
fn test_bridge_session_tracks_each_frame_independently() {
    // Knee level with hip gives a flat bridge; dropping the knee bends it.
    let frames = vec![
        bridge_frame(0, 0.5),
        bridge_frame(1_000, 0.62),
        bridge_frame(2_000, 0.5),
        bridge_frame(3_000, 0.9),
    ];
    let mut sampler = RecordedSampler::new(frames);
    let mut session = AnalysisSession::new(PoseTarget::Bridge, 1_000);
    session.start().unwrap();

    let mut seen = Vec::new();
    session.run_sampler(&mut sampler, |fb| seen.push(fb.verdict)).unwrap();

    assert_eq!(
        seen,
        vec![Verdict::Good, Verdict::Improve, Verdict::Good, Verdict::Poor]
    );

    match session.stop().unwrap() {
        Event::AnalysisStopped { summary, frames_analyzed, .. } => {
            assert_eq!(frames_analyzed, 4);
            assert_eq!(
                summary,
                "Poor Bridge Pose: Focus on lifting your hips while keeping your shoulders on the ground"
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
}
