//! Workfile selection and per-file conversion.

use crate::error::{CliError, ConvertError, FileError};
use crate::raster;
use celeste_rle::{rle_decode, rle_encode, Header};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which way a batch converts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `.data` container to PNG
    DataToPng,
    /// Raster image to `.data` container
    PngToData,
}

impl Direction {
    /// Extension given to outputs written into an output directory.
    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::DataToPng => "png",
            Direction::PngToData => "data",
        }
    }
}

impl FromStr for Direction {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data2png" => Ok(Direction::DataToPng),
            "png2data" => Ok(Direction::PngToData),
            _ => Err(CliError::UnknownCommand(s.to_string())),
        }
    }
}

/// A validated batch, ready to run.
#[derive(Debug)]
pub struct Job {
    pub direction: Direction,
    pub workfiles: Vec<PathBuf>,
    pub output: PathBuf,
    /// Outputs go into `output` under derived names rather than to `output` itself
    pub target_is_folder: bool,
    pub verbose: bool,
}

/// Outcome of [`Job::run`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output files that were written
    pub converted: Vec<PathBuf>,
    pub failures: Vec<FileError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Job {
    /// Selects workfiles and checks that the output target can hold them.
    ///
    /// A directory input contributes every regular file directly inside it,
    /// sorted by path. More than one workfile needs an existing output directory.
    pub fn plan(
        direction: Direction,
        input: &Path,
        output: &Path,
        verbose: bool,
    ) -> Result<Self, CliError> {
        if !input.exists() {
            return Err(CliError::InputNotFound(input.to_path_buf()));
        }

        let workfiles = if input.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() {
                    files.push(path);
                }
            }
            files.sort();
            files
        } else {
            vec![input.to_path_buf()]
        };

        let target_is_folder = output.is_dir();
        if workfiles.is_empty() {
            return Err(CliError::NoWorkfiles(input.to_path_buf()));
        }
        if workfiles.len() > 1 && !target_is_folder {
            return Err(CliError::AmbiguousOutputTarget(output.to_path_buf()));
        }

        Ok(Self {
            direction,
            workfiles,
            output: output.to_path_buf(),
            target_is_folder,
            verbose,
        })
    }

    /// Where the output for `workfile` is written.
    pub fn output_path(&self, workfile: &Path) -> PathBuf {
        if !self.target_is_folder {
            return self.output.clone();
        }
        let mut name = PathBuf::from(workfile.file_name().unwrap_or_default());
        name.set_extension(self.direction.output_extension());
        self.output.join(name)
    }

    /// Converts every workfile in order. A failed file is reported and
    /// skipped; it never produces an output.
    pub fn run(&self) -> BatchReport {
        let mut report = BatchReport::default();

        for workfile in &self.workfiles {
            let target = self.output_path(workfile);
            if self.verbose {
                eprintln!(
                    "Converting {} to {}{}",
                    workfile.display(),
                    target.display(),
                    if self.target_is_folder { " (folder)" } else { "" }
                );
            }

            match self.convert_file(workfile, &target) {
                Ok(()) => report.converted.push(target),
                Err(source) => {
                    let err = FileError {
                        path: workfile.clone(),
                        source,
                    };
                    eprintln!("error: {err}");
                    report.failures.push(err);
                }
            }
        }

        if self.verbose {
            eprintln!(
                "Converted {} of {} files",
                report.converted.len(),
                self.workfiles.len()
            );
        }
        report
    }

    fn convert_file(&self, workfile: &Path, target: &Path) -> Result<(), ConvertError> {
        match self.direction {
            Direction::DataToPng => {
                let data = fs::read(workfile)?;
                if self.verbose {
                    let header = Header::parse(&data)?;
                    eprintln!(
                        "Width: {}, Height: {}, Alpha: {}",
                        header.width, header.height, header.has_alpha
                    );
                }
                let image = rle_decode(&data)?;
                raster::write_png(&image, target)
            }
            Direction::PngToData => {
                let image = raster::read_raster(workfile)?;
                if self.verbose {
                    eprintln!(
                        "Width: {}, Height: {}, Alpha: {}",
                        image.width,
                        image.height,
                        image.has_alpha()
                    );
                }
                let data = rle_encode(&image)?;
                fs::write(target, data)?;
                Ok(())
            }
        }
    }
}
