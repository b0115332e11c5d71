use anyhow::{Context, Result};
use chart_buckets_lib::config::{log_filter, AggregationConfig};
use chart_buckets_lib::core::orchestrator;
use chart_buckets_lib::export::{self, ExportFormat};
use chart_buckets_lib::models::{Interval, WeekStart};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "chart-buckets", about = "Bucket sparse samples onto a gap-free calendar timeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate samples and render a chart payload
    Render {
        #[command(flatten)]
        input: InputArgs,
        /// rickshaw | csv | bullet
        #[arg(long, default_value = "rickshaw")]
        format: ExportFormat,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Extend every series along a straight-line fit
    Project {
        #[command(flatten)]
        input: InputArgs,
        /// Number of intervals to project
        #[arg(long, default_value_t = 3)]
        periods: usize,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Sample files (.csv or .json)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// week | month | quarter | year (overrides CHART_INTERVAL)
    #[arg(long)]
    interval: Option<String>,
    /// 0 = Sunday ... 6 = Saturday (overrides CHART_WEEK_START)
    #[arg(long)]
    week_start: Option<i64>,
}

impl InputArgs {
    fn config(&self) -> Result<AggregationConfig> {
        let mut config = AggregationConfig::from_env()?;
        if let Some(raw) = &self.interval {
            config.interval = raw.parse::<Interval>()?;
        }
        if let Some(day) = self.week_start {
            config.week_start = WeekStart::new(day)?;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter("info"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render { input, format, output } => {
            let config = input.config()?;
            info!("Aggregating {} file(s) per {} as {}", input.inputs.len(), config.interval, format);

            let aggregation = orchestrator::load_and_aggregate(&input.inputs, &config).await?;
            let rendered = export::render(&aggregation, format)?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, rendered)
                        .await
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }
        Command::Project { input, periods } => {
            let config = input.config()?;
            let aggregation = orchestrator::load_and_aggregate(&input.inputs, &config).await?;
            let projections = orchestrator::project_all(&aggregation, periods);
            println!("{}", serde_json::to_string_pretty(&projections)?);
        }
    }

    Ok(())
}
