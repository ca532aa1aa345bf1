mod cli;
mod enumerate;
mod error;
mod family;
mod joint;
mod logger;
mod model;
mod output;
mod posterior;
mod reader;

use crate::error::Result;
use clap::Parser;
use miette::IntoDiagnostic;
use std::path::PathBuf;

/// Infer gene copy and trait probabilities for every member of a family.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// CSV file with columns name, mother, father, trait.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    data: PathBuf,
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger();
    cli::run(&args.data)
}

fn main() -> miette::Result<()> {
    try_main().into_diagnostic()
}
