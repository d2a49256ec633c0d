use qmc_core::error::QmcError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("filenames shall be passed via args...")]
    NoInputs,

    #[error("no decodable files among the arguments")]
    NothingToDecode,

    #[error("please check if you have the write permissions on current dir: {}", .0.display())]
    CwdNotWritable(PathBuf),

    #[error(transparent)]
    Core(#[from] QmcError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::NoInputs | CliError::NothingToDecode => ExitCode::from(2),
            CliError::CwdNotWritable(_) => ExitCode::from(3),
            _ => ExitCode::FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
