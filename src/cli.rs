use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "rescuelog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Summarise a disk-rescue mapfile", long_about = None)]
pub struct Args {
    /// Rescue log (mapfile) to read
    #[arg(value_name = "LOGFILE")]
    pub logfile: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Include every segment record in the output
    #[arg(long)]
    pub records: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
