use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Input suffix -> restored container suffix. First match wins.
pub const RULES: [(&str, &str); 4] = [
    (".qmc3", ".mp3"),
    (".qmc0", ".mp3"),
    (".qmcogg", ".mp3"),
    (".qmcflac", ".flac"),
];

/// Sibling path with the QMC suffix swapped for the container suffix.
///
/// Matching is case-sensitive and runs on the whole path string, so only the
/// trailing suffix is replaced. `None` when no rule applies.
pub fn output_path(input: &Path) -> Option<PathBuf> {
    let raw = input.as_os_str().as_encoded_bytes();
    RULES.iter().find_map(|(from, to)| {
        let stem = raw.strip_suffix(from.as_bytes())?;
        let mut out = Vec::with_capacity(stem.len() + to.len());
        out.extend_from_slice(stem);
        out.extend_from_slice(to.as_bytes());
        Some(PathBuf::from(os_string_from(out)))
    })
}

/// Whether `input` ends in one of the recognised QMC suffixes.
pub fn is_recognized(input: &Path) -> bool {
    let raw = input.as_os_str().as_encoded_bytes();
    RULES.iter().any(|(from, _)| raw.ends_with(from.as_bytes()))
}

#[cfg(unix)]
fn os_string_from(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn os_string_from(bytes: Vec<u8>) -> OsString {
    // split happens at an ASCII boundary, so valid UTF-8 paths round-trip
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_swaps_only_the_suffix() {
        let cases = [
            ("/m/track.qmc3", "/m/track.mp3"),
            ("/m/track.qmc0", "/m/track.mp3"),
            ("/m/track.qmcogg", "/m/track.mp3"),
            ("/m/track.qmcflac", "/m/track.flac"),
        ];
        for (input, want) in cases {
            assert_eq!(output_path(Path::new(input)), Some(PathBuf::from(want)));
        }
    }

    #[test]
    fn only_trailing_suffix_is_replaced() {
        assert_eq!(
            output_path(Path::new("/m/a.qmc0.dir/b.qmc0")),
            Some(PathBuf::from("/m/a.qmc0.dir/b.mp3"))
        );
    }

    #[test]
    fn case_sensitive_and_unknown() {
        assert_eq!(output_path(Path::new("/m/a.QMC0")), None);
        assert_eq!(output_path(Path::new("/m/a.mp3")), None);
        assert_eq!(output_path(Path::new("/m/a.qmc")), None);
        assert!(!is_recognized(Path::new("/m/a.qmcflac.bak")));
        assert!(is_recognized(Path::new("/m/a.qmcogg")));
    }

    #[test]
    fn bare_suffix_is_still_a_match() {
        assert_eq!(output_path(Path::new(".qmc3")), Some(PathBuf::from(".mp3")));
    }
}
