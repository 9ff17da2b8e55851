use anyhow::{Context, Result};
use clap::Parser;

use rescuelog::cli::{Args, OutputFormat};
use rescuelog::{logging, LogParser, Summary};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let parser = LogParser::open(&args.logfile)
        .with_context(|| format!("Failed to parse rescue log {}", args.logfile.display()))?;
    let summary = Summary::new(args.logfile.display().to_string(), &parser, args.records);

    match args.output_format() {
        OutputFormat::Text => print!("{}", summary),
        OutputFormat::Json => {
            let json = summary.to_json().context("Failed to serialize summary")?;
            println!("{}", json);
        }
    }
    Ok(())
}
