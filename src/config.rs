//! Command-line configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::data::Region;
use crate::error::PredictionResult;

/// Predict the amount of commuter passengers in Indonesia.
///
/// Region and dates that are not given as flags are asked for interactively.
///
/// # Example
///
/// ```bash
/// commuter-predict --region jabodetabek --start 2024-01-01 --end 2024-01-31 \
///     --model-path model.bin --table-path predictions.csv
/// ```
#[derive(Parser, Debug, Clone)]
#[command(name = "commuter-predict", version, about)]
pub struct Cli {
    /// Region name, e.g. "Jabodetabek" or "sumatera"
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// First day to predict (YYYY-MM-DD)
    #[arg(long, short = 's')]
    pub start: Option<NaiveDate>,

    /// Last day to predict, inclusive (YYYY-MM-DD)
    #[arg(long, short = 'e')]
    pub end: Option<NaiveDate>,

    /// Trained model artifact (.json, otherwise bincode)
    #[arg(long, short = 'm', env = "COMMUTER_MODEL_PATH", default_value = "model.bin")]
    pub model_path: PathBuf,

    /// Where to write the chart PNG
    #[arg(long, env = "COMMUTER_PLOT_PATH", default_value = "prediction_plot.png")]
    pub plot_path: PathBuf,

    /// Optional table export (.json, otherwise CSV)
    #[arg(long, env = "COMMUTER_TABLE_PATH")]
    pub table_path: Option<PathBuf>,

    /// Skip writing the chart
    #[arg(long)]
    pub no_plot: bool,
}

impl Cli {
    /// Region given on the command line, if any.
    pub fn parsed_region(&self) -> PredictionResult<Option<Region>> {
        self.region.as_deref().map(str::parse).transpose()
    }
}
