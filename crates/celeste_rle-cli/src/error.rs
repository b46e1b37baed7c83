use celeste_rle::RleError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the command line itself. Nothing is converted when one occurs.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown command '{0}' (expected data2png or png2data)")]
    UnknownCommand(String),
    #[error("no input file or directory specified")]
    MissingInputPath,
    #[error("no output file or directory specified")]
    MissingOutputPath,
    #[error("input path '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),
    #[error("more than one input file and output '{}' is not a directory", .0.display())]
    AmbiguousOutputTarget(PathBuf),
    #[error("no workfiles found in '{}'", .0.display())]
    NoWorkfiles(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure while converting a single workfile.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Rle(#[from] RleError),
}

/// A [`ConvertError`] tagged with the workfile it happened on.
#[derive(Debug, Error)]
#[error("{}: {source}", path.display())]
pub struct FileError {
    pub path: PathBuf,
    pub source: ConvertError,
}
