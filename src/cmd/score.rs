use clap::Args;
use hotforge::config::MetricParams;
use hotforge::error::HotForgeError;
use hotforge::layout::Layout;
use hotforge::reports;
use hotforge::rotation::Rotation;
use hotforge::scorer::rotation_cost;
use std::process;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub metric: MetricParams,

    /// Layout file to score.
    #[arg(short, long)]
    pub layout: String,
}

pub fn run(args: ScoreArgs, rotation: &Rotation) {
    let layout = Layout::load_from_file(&args.layout).unwrap_or_else(|e| {
        eprintln!("Failed to load layout '{}': {}", args.layout, e);
        process::exit(1);
    });

    // An ambiguous binding makes every score meaningless; a missing one
    // still gets the grid plus a diagnostic cost line.
    if let Err(e @ HotForgeError::DuplicateAssignment { .. }) = layout.validate(rotation) {
        eprintln!("Invalid layout: {}", e);
        process::exit(1);
    }

    reports::print_layout(&args.layout, &layout);
    let cost = rotation_cost(&layout, rotation, &args.metric);
    println!("{}", reports::cost_line(&cost));
}
