use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod workflow;

/// DigLab: a simulated batch shake-flask experiment against a reduced GSMM.
#[derive(Debug, Parser)]
#[command(name = "diglab", about = "Run a scripted virtual shake-flask experiment")]
struct Cli {
    /// YAML run request describing the session.
    #[arg(long, default_value = "diglab-app/request.yaml")]
    request: PathBuf,

    /// Directory for exported result tables.
    #[arg(long, default_value = "./data/runs")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    println!("--- DigLab Shake-Flask Application ---");

    let cli = Cli::parse();
    let request = config::RunRequest::load(&cli.request)?;
    let date = chrono::Local::now().format("%y%m%d").to_string();

    let path = workflow::run_shake_flask(&request, &cli.output_dir, &date)?;

    println!("\nSimulation complete. Result table: '{}'", path.display());
    Ok(())
}
