use clap::Args;
use hotforge::config::Config;
use hotforge::error::HotForgeError;
use hotforge::geometry::{Geometry, GeometryPreset};
use hotforge::layout::Layout;
use hotforge::optimizer::runner::{optimize, SearchBudget};
use hotforge::reports;
use hotforge::rotation::Rotation;
use hotforge::scorer::rotation_cost;
use std::process;
use std::str::FromStr;
use std::time::Duration;
use strum::IntoEnumIterator;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// Existing layout file to score alongside the optimized result.
    /// Its geometry also replaces the preset when given.
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Named geometry when no layout file supplies one.
    #[arg(short, long, default_value = "standard")]
    pub preset: String,

    /// Wall-clock limit in seconds.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,

    #[arg(short = 'S', long, default_value_t = 0)]
    pub seed: u64,
}

pub fn run(args: SearchArgs, rotation: &Rotation) {
    let reference = args.layout.as_ref().map(|path| {
        let layout = Layout::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("Failed to load layout '{}': {}", path, e);
            process::exit(1);
        });
        if let Err(e @ HotForgeError::DuplicateAssignment { .. }) = layout.validate(rotation) {
            eprintln!("Invalid layout '{}': {}", path, e);
            process::exit(1);
        }
        layout
    });

    let geometry: Geometry = match &reference {
        Some(layout) => layout.geometry().clone(),
        None => match GeometryPreset::from_str(&args.preset) {
            Ok(preset) => preset.geometry(),
            Err(_) => {
                let known: Vec<String> =
                    GeometryPreset::iter().map(|p| p.to_string()).collect();
                eprintln!(
                    "Unknown preset '{}'; known presets: {}",
                    args.preset,
                    known.join(", ")
                );
                process::exit(1);
            }
        },
    };

    let mut budget = SearchBudget::from(&args.config.search);
    budget.max_time = args.time.map(Duration::from_secs);

    let result = optimize(
        &geometry,
        rotation,
        &args.config.metric,
        &budget,
        args.seed,
    )
    .unwrap_or_else(|e| {
        eprintln!("Search refused: {}", e);
        process::exit(1);
    });

    if let Some(layout) = &reference {
        reports::print_layout("YOURS", layout);
        let cost = rotation_cost(layout, rotation, &args.config.metric);
        println!("{}", reports::cost_line(&cost));
    }

    reports::print_layout("OPTIMIZED", &result.layout);
    println!("{}", reports::cost_line(&Ok(result.cost)));

    if let Some(last) = result.trace.last() {
        println!(
            "({} improvement{} recorded, final at epoch {})",
            result.trace.len(),
            if result.trace.len() == 1 { "" } else { "s" },
            last.epoch
        );
    }
}
