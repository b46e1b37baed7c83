//! celeste-convert - Convert Celeste `.data` sprites to and from PNG
//!
//! A command-line tool for batch converting between the run-length encoded
//! `.data` container and PNG.

mod convert;
mod error;
mod raster;

use clap::Parser;
use convert::{Direction, Job};
use error::CliError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "celeste-convert")]
#[command(version)]
#[command(about = "Convert Celeste .data sprites to and from PNG", long_about = None)]
struct Cli {
    /// Conversion to perform: data2png or png2data
    command: String,

    /// Input file, or a directory whose files are all converted
    input: Option<PathBuf>,

    /// Output file, or an existing directory for batch conversion
    output: Option<PathBuf>,

    /// Print progress and image details for every file
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Validates the arguments once, before any file is touched.
    fn into_job(self) -> Result<Job, CliError> {
        let direction: Direction = self.command.parse()?;
        let input = self.input.ok_or(CliError::MissingInputPath)?;
        let output = self.output.ok_or(CliError::MissingOutputPath)?;
        Job::plan(direction, &input, &output, self.verbose)
    }
}

fn main() -> ExitCode {
    let job = match Cli::parse().into_job() {
        Ok(job) => job,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if job.run().is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
