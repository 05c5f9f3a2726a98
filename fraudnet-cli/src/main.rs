mod pipeline;

use clap::Parser;
use pipeline::PipelineConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Train and evaluate a neural network fraud classifier on credit card transactions",
    long_about = None
)]
struct Args {
    /// Path to the transactions CSV (Time, V1..V28, Amount, Class)
    data: PathBuf,

    /// Directory for the rendered evaluation charts
    #[arg(long, default_value = "plots")]
    out_dir: PathBuf,

    /// Number of training epochs
    #[arg(long, default_value_t = 10)]
    epochs: usize,

    /// Mini-batch size
    #[arg(long, default_value_t = 32)]
    batch_size: usize,

    /// Seed for the split, oversampling and weight initialisation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Probability threshold for the fraud label
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = PipelineConfig {
        data_path: args.data,
        out_dir: args.out_dir,
        epochs: args.epochs,
        batch_size: args.batch_size,
        seed: args.seed,
        threshold: args.threshold,
    };

    let summary = pipeline::run(&config)?;
    print!("{summary}");
    Ok(())
}
