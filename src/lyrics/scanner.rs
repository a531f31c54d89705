//! Lyrics page scanner
//!
//! Recovers lyric lines from a chartlyrics HTML page without parsing the markup.
//! The relevant part of a page looks like:
//!
//! ```text
//! alt="" title="Pink Floyd Brain Damage" />
//! The lunatic is on the grass<br />
//! The lunatic is on the grass<br />
//! ...
//! </p>
//! ```
//!
//! The scanner starts collecting after the `title="..." />` line, keeps every
//! `...<br />` line, and stops at `</p>` or at the ad container.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static RE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^.*title="(.*)" />"#).expect("valid regex: RE_START"));

#[allow(clippy::expect_used)]
static RE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)<br />").expect("valid regex: RE_LINE"));

#[allow(clippy::expect_used)]
static RE_END_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^</p>").expect("valid regex: RE_END_PARAGRAPH"));

const AD_CONTAINER: &str = r#"<div id="adlyric">"#;
const LINE_BREAK: &str = "<br />";

// Single-character line boundaries; `\r\n` is split first so it counts once.
const LINE_BOUNDARIES: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Where the scanner is within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    NotStarted,
    Collecting,
    /// `titled` is set once a start marker has been seen.
    Finished { titled: bool },
}

/// What a single line contributed to the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Title(String),
    Lyric(String),
}

impl ScanState {
    /// Advance over one line.
    ///
    /// The start marker is checked on every line but only fires once.
    /// Content is matched before the end markers, so a lyric line that also
    /// carries an end marker is kept and collection stops on the next line.
    pub fn step(self, line: &str) -> (ScanState, Option<LineEvent>) {
        let mut next = self;
        let mut event = None;

        match self {
            ScanState::Collecting => {
                if let Some(caps) = RE_LINE.captures(line) {
                    event = Some(LineEvent::Lyric(clean_lyric(&caps[1])));
                }
            }
            ScanState::NotStarted => {
                if let Some(caps) = RE_START.captures(line) {
                    event = Some(LineEvent::Title(caps[1].to_string()));
                    next = ScanState::Collecting;
                }
            }
            // An end marker came first: the title is still taken, nothing is collected.
            ScanState::Finished { titled: false } => {
                if let Some(caps) = RE_START.captures(line) {
                    event = Some(LineEvent::Title(caps[1].to_string()));
                    next = ScanState::Finished { titled: true };
                }
            }
            ScanState::Finished { titled: true } => {}
        }

        if is_end_marker(line) {
            next = ScanState::Finished {
                titled: next.is_titled(),
            };
        }

        (next, event)
    }

    fn is_titled(self) -> bool {
        !matches!(
            self,
            ScanState::NotStarted | ScanState::Finished { titled: false }
        )
    }
}

fn page_lines(html: &str) -> impl Iterator<Item = &str> {
    html.split("\r\n").flat_map(|chunk| chunk.split(LINE_BOUNDARIES))
}

fn is_end_marker(line: &str) -> bool {
    RE_END_PARAGRAPH.is_match(line) || line.contains(AD_CONTAINER)
}

fn clean_lyric(raw: &str) -> String {
    raw.replace(LINE_BREAK, "\n").trim_matches(' ').to_string()
}

/// Lyrics recovered from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedLyrics {
    /// Title captured from the start marker, empty if none was found.
    pub title: String,
    /// Number of lyric lines appended to `text`.
    pub line_count: usize,
    /// Lyric lines joined by `\n`, in page order.
    pub text: String,
}

impl ScannedLyrics {
    /// Scan a lyrics page.
    pub fn scan(html: &str) -> Self {
        let mut scanned = Self::default();
        let mut state = ScanState::default();

        for line in page_lines(html) {
            let (next, event) = state.step(line);
            match event {
                Some(LineEvent::Title(title)) => scanned.title = title,
                Some(LineEvent::Lyric(lyric)) => scanned.push_line(&lyric),
                None => {}
            }
            state = next;
        }

        tracing::debug!(
            title = %scanned.title,
            lines = scanned.line_count,
            finished = matches!(state, ScanState::Finished { .. }),
            "scanned lyrics page"
        );
        scanned
    }

    fn push_line(&mut self, line: &str) {
        if self.line_count > 0 {
            self.text.push('\n');
        }
        self.text.push_str(line);
        self.line_count += 1;
    }
}
