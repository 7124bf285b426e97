use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub metric: MetricParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchParams::default(),
            metric: MetricParams::default(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    #[arg(long, default_value_t = 400)]
    pub search_epochs: usize,
    #[arg(long, default_value_t = 2_000)]
    pub search_steps: usize,
    /// Epochs without improvement before a worker gives up.
    #[arg(long, default_value_t = 60)]
    pub search_patience: usize,
    #[arg(long, default_value_t = 8.0)]
    pub temp_start: f64,
    /// Geometric cooling factor applied once per epoch.
    #[arg(long, default_value_t = 0.95)]
    pub cooling: f64,
    /// Distinct-action count at or below which branch-and-bound runs instead of annealing.
    #[arg(long, default_value_t = 9)]
    pub exact_threshold: usize,
    #[arg(long)]
    pub workers: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            search_epochs: 400,
            search_steps: 2_000,
            search_patience: 60,
            temp_start: 8.0,
            cooling: 0.95,
            exact_threshold: 9,
            workers: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MetricParams {
    /// Cost added whenever consecutive actions sit on different hotbar pages.
    #[arg(long, default_value_t = 0.5)]
    pub page_switch_weight: f64,
    /// Treat the rightmost column as pressable with the thumb joint (zero travel).
    #[arg(long, default_value_t = false)]
    pub thumb_reach: bool,
}

impl Default for MetricParams {
    fn default() -> Self {
        Self {
            page_switch_weight: 0.5,
            thumb_reach: false,
        }
    }
}
