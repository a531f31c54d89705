use std::fmt;

use super::scanner::ScannedLyrics;

/// Why a scan was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub required: usize,
    pub found: usize,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Required: at least {} lyric lines\nFound: {} lyrics lines",
            self.required, self.found
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    Rejected(Rejection),
}

/// Accept a scan only if it produced at least `min_lines` lyric lines.
pub fn validate(scanned: &ScannedLyrics, min_lines: usize) -> Validation {
    if scanned.line_count >= min_lines {
        Validation::Accepted
    } else {
        Validation::Rejected(Rejection {
            required: min_lines,
            found: scanned.line_count,
        })
    }
}
