use std::io::Write;
use std::sync::Mutex;

/// Line-oriented diagnostic sink shared by all workers.
///
/// One `emit` call produces one whole line; lines from different workers may
/// arrive in any order.
pub trait Logger: Send + Sync {
    fn emit(&self, line: &str);
}

/// Writes each line to `W` under a mutex held for that line only.
pub struct WriterLogger<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> WriterLogger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|p| p.into_inner())
    }
}

impl WriterLogger<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Logger for WriterLogger<W> {
    fn emit(&self, line: &str) {
        // a poisoned lock only means another emitter panicked mid-line
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        // diagnostics are best-effort; a closed stdout must not fail a decode
        let _ = writeln!(out, "{line}").and_then(|_| out.flush());
    }
}

/// Forwards each line as an `info` event to the installed `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn emit(&self, line: &str) {
        tracing::info!(target: "qmc_core::diag", "{line}");
    }
}
