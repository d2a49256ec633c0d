use crate::error::DecodeError;
use serde::Serialize;
use std::path::PathBuf;

/// What happened to one input path.
#[derive(Debug)]
pub struct FileOutcome {
    /// Position of the path in the input list.
    pub index: usize,
    pub input: PathBuf,
    pub result: Result<PathBuf, DecodeError>,
}

/// Outcomes of a whole run, in input order.
#[derive(Debug)]
pub struct RunReport {
    pub workers: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    pub fn decoded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.decoded()
    }

    pub fn summary(&self) -> Summary {
        let failures = self
            .outcomes
            .iter()
            .filter_map(|o| {
                let e = o.result.as_ref().err()?;
                Some(FailureRow {
                    path: o.input.to_string_lossy().to_string(),
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                })
            })
            .collect();
        Summary {
            workers: self.workers,
            files: self.outcomes.len(),
            decoded: self.decoded(),
            failed: self.failed(),
            failures,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Summary {
    pub workers: usize,
    pub files: usize,
    pub decoded: usize,
    pub failed: usize,
    pub failures: Vec<FailureRow>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FailureRow {
    pub path: String,
    pub kind: String,
    pub message: String,
}
