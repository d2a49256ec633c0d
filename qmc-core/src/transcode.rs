use crate::error::DecodeError;
use crate::keystream::{Keystream, QmcSeed, apply_keystream};
use crate::logger::Logger;
use crate::suffix::output_path;

use std::collections::TryReserveError;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Transcoder wired to the real QMC seed.
pub type QmcTranscoder = Transcoder<fn() -> QmcSeed>;

/// Restores one QMC file at a time.
///
/// `keystream` builds a fresh generator per file; generator state never
/// outlives a single `decode` call.
pub struct Transcoder<F> {
    keystream: F,
}

impl QmcTranscoder {
    pub fn qmc() -> Self {
        Self::new(QmcSeed::new)
    }
}

impl Default for QmcTranscoder {
    fn default() -> Self {
        Self::qmc()
    }
}

impl<F, K> Transcoder<F>
where
    F: Fn() -> K,
    K: Keystream,
{
    pub fn new(keystream: F) -> Self {
        Self { keystream }
    }

    /// XOR `data` with a freshly seeded keystream. Encoding and decoding are
    /// the same operation.
    pub fn apply(&self, data: &mut [u8]) {
        let mut ks = (self.keystream)();
        apply_keystream(&mut ks, data);
    }

    /// Decode `path` into its sibling container file and return the path written.
    ///
    /// Errors are reported through `log` before being returned; nothing is
    /// written unless the whole input was read and transformed.
    pub fn decode(&self, path: &Path, log: &dyn Logger) -> Result<PathBuf, DecodeError> {
        log.emit(&format!("decode: {}", path.display()));
        match self.transcode(path) {
            Ok((out, len)) => {
                debug!(input = %path.display(), output = %out.display(), len, "decoded");
                Ok(out)
            }
            Err(e) => {
                debug!(input = %path.display(), kind = e.kind(), "decode failed");
                log.emit(&e.to_string());
                Err(e)
            }
        }
    }

    fn transcode(&self, path: &Path) -> Result<(PathBuf, usize), DecodeError> {
        let read_err = |source: std::io::Error| DecodeError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut infile = File::open(path).map_err(read_err)?;
        let out = output_path(path).ok_or_else(|| DecodeError::UnrecognizedSuffix {
            path: path.to_path_buf(),
        })?;

        let len = infile.metadata().map_err(read_err)?.len();
        let mut buffer = alloc_exact(path, len)?;
        infile.read_to_end(&mut buffer).map_err(read_err)?;
        drop(infile);

        self.apply(&mut buffer);

        let write_err = |source: std::io::Error| DecodeError::Write {
            path: out.clone(),
            source,
        };
        let mut outfile = File::create(&out).map_err(write_err)?;
        outfile.write_all(&buffer).map_err(write_err)?;
        outfile.flush().map_err(write_err)?;

        Ok((out, buffer.len()))
    }
}

fn alloc_exact(path: &Path, len: u64) -> Result<Vec<u8>, DecodeError> {
    let alloc_err = |source: Option<TryReserveError>| DecodeError::Alloc {
        path: path.to_path_buf(),
        len,
        source,
    };
    let n = usize::try_from(len).map_err(|_| alloc_err(None))?;
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(n).map_err(|e| alloc_err(Some(e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::WriterLogger;
    use std::fs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Emits 1, 2, 3, ... and counts every call.
    struct Counting {
        next: u8,
        calls: Arc<AtomicUsize>,
    }

    impl Keystream for Counting {
        fn next_mask(&mut self) -> u8 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.next = self.next.wrapping_add(1);
            self.next
        }
    }

    fn counting(calls: &Arc<AtomicUsize>) -> impl Fn() -> Counting + use<> {
        let calls = Arc::clone(calls);
        move || Counting {
            next: 0,
            calls: Arc::clone(&calls),
        }
    }

    fn lines(log: WriterLogger<Vec<u8>>) -> Vec<String> {
        String::from_utf8(log.into_inner())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn zero_bytes_take_the_mask_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("track.qmc0");
        fs::write(&input, [0u8; 8]).unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let t = Transcoder::new(counting(&calls));
        let log = WriterLogger::new(Vec::new());
        let out = t.decode(&input, &log).unwrap();

        assert_eq!(out, dir.path().join("track.mp3"));
        assert_eq!(fs::read(&out).unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(calls.load(Ordering::SeqCst), 8);
        assert_eq!(lines(log), vec![format!("decode: {}", input.display())]);
    }

    #[test]
    fn empty_file_makes_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("silence.qmcflac");
        fs::write(&input, b"").unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let t = Transcoder::new(counting(&calls));
        let out = t.decode(&input, &WriterLogger::new(Vec::new())).unwrap();

        assert_eq!(out, dir.path().join("silence.flac"));
        assert_eq!(fs::read(&out).unwrap(), Vec::<u8>::new());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_input_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gone.qmc3");

        let log = WriterLogger::new(Vec::new());
        let err = QmcTranscoder::qmc().decode(&input, &log).unwrap_err();

        assert!(matches!(err, DecodeError::Read { .. }));
        assert!(!dir.path().join("gone.mp3").exists());
        let lines = lines(log);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("qmc file read error"));
    }

    #[test]
    fn oversized_length_is_an_alloc_error() {
        let err = alloc_exact(Path::new("/music/huge.qmc0"), u64::MAX).unwrap_err();
        match err {
            DecodeError::Alloc { path, len, .. } => {
                assert_eq!(path, Path::new("/music/huge.qmc0"));
                assert_eq!(len, u64::MAX);
            }
            other => panic!("expected alloc error, got {other:?}"),
        }
    }

    #[test]
    fn exact_length_is_reserved_up_front() {
        let buf = alloc_exact(Path::new("/music/small.qmc3"), 4096).unwrap();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 4096);
    }

    #[test]
    fn unknown_suffix_never_overwrites_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, b"keep me").unwrap();

        let err = QmcTranscoder::qmc()
            .decode(&input, &WriterLogger::new(Vec::new()))
            .unwrap_err();

        assert!(matches!(err, DecodeError::UnrecognizedSuffix { .. }));
        assert_eq!(fs::read(&input).unwrap(), b"keep me");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("song.qmcogg");
        fs::write(&input, b"abc").unwrap();
        // a directory squatting on the output name
        fs::create_dir(dir.path().join("song.mp3")).unwrap();

        let err = QmcTranscoder::qmc()
            .decode(&input, &WriterLogger::new(Vec::new()))
            .unwrap_err();

        assert!(matches!(err, DecodeError::Write { .. }));
        assert_eq!(fs::read(&input).unwrap(), b"abc");
    }

    #[test]
    fn decode_undoes_apply() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.qmc3");
        let plain: Vec<u8> = (0..70_000u32).map(|i| (i * 31 % 251) as u8).collect();

        let t = QmcTranscoder::default();
        let mut cipher = plain.clone();
        t.apply(&mut cipher);
        fs::write(&input, &cipher).unwrap();

        let out = t.decode(&input, &WriterLogger::new(Vec::new())).unwrap();
        assert_eq!(fs::read(out).unwrap(), plain);
    }
}
