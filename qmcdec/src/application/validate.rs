use qmc_core::Logger;
use qmc_core::suffix::is_recognized;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    Missing,
    Unreadable,
    NotTarget,
}

impl Rejection {
    fn message(self) -> &'static str {
        match self {
            Rejection::Missing => "Nonexistance!",
            Rejection::Unreadable => "Non readable permission!",
            Rejection::NotTarget => "Not a proper target for conversion!",
        }
    }
}

/// Absolute path of `arg` if it is an existing, readable, regular QMC file.
pub fn check(arg: &Path) -> Result<PathBuf, Vec<Rejection>> {
    let Ok(abs) = std::path::absolute(arg) else {
        return Err(vec![Rejection::Missing]);
    };
    let Ok(md) = fs::metadata(&abs) else {
        return Err(vec![Rejection::Missing]);
    };

    let mut why = Vec::new();
    if !readable(&abs, &md) {
        why.push(Rejection::Unreadable);
    }
    if !md.is_file() || !is_recognized(&abs) {
        why.push(Rejection::NotTarget);
    }
    if why.is_empty() { Ok(abs) } else { Err(why) }
}

/// Keep the arguments that pass [`check`], first occurrence only, in order.
/// Two arguments naming the same file through `..` or a symlink count as one.
/// Rejected ones are reported through `log` and skipped.
pub fn accept_inputs(args: &[PathBuf], log: &dyn Logger) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut accepted = Vec::with_capacity(args.len());
    for arg in args {
        match check(arg) {
            Ok(abs) => {
                let key = fs::canonicalize(&abs).unwrap_or_else(|_| abs.clone());
                if seen.insert(key) {
                    accepted.push(abs);
                }
            }
            Err(why) => {
                log.emit(&format!(
                    "check argument: {} you give to this program...",
                    arg.display()
                ));
                for r in why {
                    log.emit(r.message());
                }
            }
        }
    }
    accepted
}

#[cfg(unix)]
fn readable(_path: &Path, md: &fs::Metadata) -> bool {
    md.permissions().mode() & 0o400 != 0
}

#[cfg(not(unix))]
fn readable(path: &Path, md: &fs::Metadata) -> bool {
    md.is_dir() || fs::File::open(path).is_ok()
}

/// Owner-write permission on the current working directory.
pub fn cwd_writable(cwd: &Path) -> std::io::Result<bool> {
    let md = fs::metadata(cwd)?;
    #[cfg(unix)]
    {
        Ok(md.permissions().mode() & 0o200 != 0)
    }
    #[cfg(not(unix))]
    {
        Ok(!md.permissions().readonly())
    }
}
