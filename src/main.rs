use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commuter_predict::config::Cli;
use commuter_predict::report::write_table;
use commuter_predict::utils::{input, plot};
use commuter_predict::{predict_from_artifact, PredictionRequest};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("commuter_predict=info".parse()?))
        .init();

    let cli = Cli::parse();

    println!("Predict Amount of Commuter Passenger in Indonesia");

    let region = match cli.parsed_region()? {
        Some(region) => region,
        None => {
            println!("\nSelect a region:");
            input::get_region()?
        }
    };
    let start = match cli.start {
        Some(date) => date,
        None => input::get_date("Start Date (YYYY-MM-DD): ")?,
    };
    let end = match cli.end {
        Some(date) => date,
        None => input::get_date("End Date (YYYY-MM-DD): ")?,
    };

    let request = PredictionRequest::new(region, start, end);
    info!(%region, %start, %end, model = %cli.model_path.display(), "prediction requested");

    let output = predict_from_artifact(&request, &cli.model_path)
        .with_context(|| format!("prediction with {} failed", cli.model_path.display()))?;

    output.display();

    if !cli.no_plot {
        plot::create_plot(&output.chart, &cli.plot_path)?;
        println!("\nChart saved to {}", cli.plot_path.display());
    }

    if let Some(path) = &cli.table_path {
        write_table(&output.table, path)?;
        println!("Table saved to {}", path.display());
    }

    Ok(())
}
