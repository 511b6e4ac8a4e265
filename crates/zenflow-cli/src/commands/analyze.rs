//! Run an analysis session over recorded frames.
//!
//! Frames are JSON lines, one `{"captured_at_ms": .., "observations": [..]}`
//! per line, read from a file or stdin. This stands in for a live pose
//! detector.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Args;
use tracing::warn;
use zenflow_core::{AnalysisSession, Config, Event, JsonLinesSampler, PoseSampler, PoseTarget};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Pose name or slug; defaults to the configured pose
    #[arg(long)]
    pose: Option<String>,
    /// Frames file (JSON lines); reads stdin when omitted or "-"
    #[arg(long)]
    input: Option<PathBuf>,
    /// Minimum milliseconds between analyzed frames
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Output feedback as JSON lines
    #[arg(long)]
    json: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!("falling back to default config: {e}");
        Config::default()
    });

    let pose: PoseTarget = match args.pose.as_deref() {
        Some(name) => name.parse()?,
        None => config.pose()?,
    };
    let interval_ms = args.interval_ms.unwrap_or(config.analysis.interval_ms);
    let json = args.json || config.output.json;

    let reader: Box<dyn BufRead> = match args.input {
        Some(path) if path.as_os_str() != "-" => Box::new(BufReader::new(File::open(&path)?)),
        _ => Box::new(BufReader::new(io::stdin())),
    };
    let mut sampler = JsonLinesSampler::new(reader);

    let mut session = AnalysisSession::new(pose, interval_ms);
    session.start()?;
    let outcome = drive(&mut session, &mut sampler, json);
    let summary = match session.stop()? {
        Event::AnalysisStopped { summary, .. } => summary,
        _ => session.summary().to_string(),
    };

    let stats = session.stats();
    eprintln!("Summary: {summary}");
    eprintln!(
        "  analyzed {} (good {}, improve {}, poor {}, undetectable {}), skipped {}, no body {}",
        stats.analyzed(),
        stats.good,
        stats.improve,
        stats.poor,
        stats.undetectable,
        stats.frames_skipped,
        stats.frames_without_body,
    );

    outcome
}

fn drive(
    session: &mut AnalysisSession,
    sampler: &mut dyn PoseSampler,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut write_err = None;
    session.run_sampler(sampler, |feedback| {
        if json {
            match serde_json::to_string(feedback) {
                Ok(line) => println!("{line}"),
                Err(e) => write_err = Some(e),
            }
        } else {
            println!("{feedback}");
        }
    })?;

    match write_err {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
