use clap::Subcommand;
use serde::Serialize;
use zenflow_core::{classify, AngleResult, Band, JointTriple, PoseTarget};

#[derive(Subcommand)]
pub enum PoseAction {
    /// List supported poses with their measured joints and bands
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify a known angle for a pose
    Check {
        /// Pose name or slug (e.g. "Tree Pose", "warrior-1")
        pose: String,
        /// Angle in degrees
        #[arg(allow_negative_numbers = true)]
        angle: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct PoseSummary {
    slug: &'static str,
    name: &'static str,
    joints: JointTriple,
    good: Band,
    improve: &'static [Band],
}

pub fn run(action: PoseAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PoseAction::List { json } => list(json),
        PoseAction::Check { pose, angle, json } => check(&pose, angle, json),
    }
}

fn list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let poses: Vec<PoseSummary> = PoseTarget::ALL
            .iter()
            .map(|p| {
                let rule = p.rule();
                PoseSummary {
                    slug: p.slug(),
                    name: p.display_name(),
                    joints: rule.joints,
                    good: rule.good,
                    improve: rule.improve,
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&poses)?);
        return Ok(());
    }

    for pose in PoseTarget::ALL {
        let rule = pose.rule();
        let improve: Vec<String> = rule.improve.iter().map(Band::to_string).collect();
        println!(
            "{:<20} {:<13} {}-{}-{}  good {}  improve {}",
            pose.display_name(),
            pose.slug(),
            rule.joints.first,
            rule.joints.vertex,
            rule.joints.last,
            rule.good,
            improve.join(" "),
        );
    }
    Ok(())
}

fn check(pose: &str, angle: f64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pose: PoseTarget = pose.parse()?;
    let feedback = classify(pose, AngleResult::Measured(angle));
    if json {
        println!("{}", serde_json::to_string(&feedback)?);
    } else {
        println!("{feedback}");
    }
    Ok(())
}
