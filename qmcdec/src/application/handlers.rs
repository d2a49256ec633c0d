use std::path::PathBuf;

use qmc_core::{
    DistributeOptions, Logger, QmcTranscoder, TracingLogger, WriterLogger, distribute,
};

use tracing::info;

use super::validate::{accept_inputs, cwd_writable};
use crate::error::{CliError, Result};
use crate::presentation::cli::Diagnostics;

pub fn handle_decode(
    files: Vec<PathBuf>,
    jobs: Option<usize>,
    json: bool,
    diagnostics: Diagnostics,
) -> Result<()> {
    if files.is_empty() {
        return Err(CliError::NoInputs);
    }
    let cwd = std::env::current_dir()?;
    if !cwd_writable(&cwd)? {
        return Err(CliError::CwdNotWritable(cwd));
    }

    // with --json, stdout carries nothing but the summary document
    let log: Box<dyn Logger> = match diagnostics {
        Diagnostics::Stdout if json => Box::new(WriterLogger::new(std::io::stderr())),
        Diagnostics::Stdout => Box::new(WriterLogger::stdout()),
        Diagnostics::Log => Box::new(TracingLogger),
    };

    let paths = accept_inputs(&files, log.as_ref());
    info!(arguments = files.len(), accepted = paths.len(), "validated inputs");
    if paths.is_empty() {
        return Err(CliError::NothingToDecode);
    }

    let opts = DistributeOptions { workers: jobs };
    let report = distribute(&paths, &QmcTranscoder::qmc(), log.as_ref(), Some(&opts))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        eprintln!(
            "decoded {} of {} file(s) on {} worker(s)",
            report.decoded(),
            report.outcomes.len(),
            report.workers
        );
    }
    Ok(())
}
