//! Line-oriented state machine for massif output.
//!
//! The same delimiter line both closes the previous region and opens a
//! named snapshot, so the scanner tracks which kind of line it saw last.
//! Lines outside any recognized region are ignored rather than rejected,
//! since profiler output may carry content this grammar does not govern.

use super::schema::{Document, Line, Snapshot};
use crate::utils::config::{
    HEADER_PATTERN, SNAPSHOT_DELIMITER, SNAPSHOT_INDEX_PATTERN, SNAPSHOT_TIME_PATTERN,
};
use crate::utils::error::{MalformedSequence, ParseError};
use log::debug;
use regex::bytes::{Regex, RegexBuilder};
use std::io::BufRead;
use std::sync::LazyLock;

fn ascii_regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(false)
        .build()
        .expect("hardcoded regex pattern is valid")
}

static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| ascii_regex(HEADER_PATTERN));
static INDEX_REGEX: LazyLock<Regex> = LazyLock::new(|| ascii_regex(SNAPSHOT_INDEX_PATTERN));
static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| ascii_regex(SNAPSHOT_TIME_PATTERN));

/// Kind of the last recognized line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing recognized yet
    None,
    /// A `desc:` / `cmd:` / `time_unit:` line
    Header,
    /// Delimiter that closed a region
    Mark,
    /// `snapshot=N` line following a mark
    Name,
    /// Inside a snapshot body
    Content,
}

/// Incremental parser that appends into a borrowed `Document`
///
/// Feed lines with [`SnapshotParser::feed_line`], then call
/// [`SnapshotParser::finish`] to commit the trailing snapshot.
pub struct SnapshotParser<'a> {
    document: &'a mut Document,
    capture_headers: bool,
    state: ScanState,
    pending: Option<Snapshot>,
    line_number: usize,
}

impl<'a> SnapshotParser<'a> {
    pub fn new(document: &'a mut Document, capture_headers: bool) -> Self {
        Self {
            document,
            capture_headers,
            state: ScanState::None,
            pending: None,
            line_number: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Process one line (terminator already stripped)
    pub fn feed_line(&mut self, line: Line) -> Result<(), ParseError> {
        self.line_number += 1;

        if HEADER_REGEX.is_match(&line) {
            self.state = ScanState::Header;
            if self.capture_headers {
                self.document.headers.push(line);
            }
            return Ok(());
        }

        let is_delimiter = line.as_slice() == SNAPSHOT_DELIMITER;

        match self.state {
            ScanState::Header | ScanState::Content if is_delimiter => {
                self.state = ScanState::Mark;
                self.close_pending();
            }
            ScanState::Mark if INDEX_REGEX.is_match(&line) => {
                self.state = ScanState::Name;
            }
            ScanState::Name if is_delimiter => {
                self.state = ScanState::Content;
                self.open_pending()?;
            }
            ScanState::Content => self.append_content(line)?,
            _ => {}
        }

        Ok(())
    }

    /// Commit the trailing snapshot, if it has any content
    pub fn finish(mut self) {
        self.close_pending();
    }

    fn close_pending(&mut self) {
        if let Some(snapshot) = self.pending.take() {
            self.document.commit(snapshot);
        }
    }

    fn open_pending(&mut self) -> Result<(), MalformedSequence> {
        if self.pending.is_some() {
            return Err(MalformedSequence::DuplicateSnapshotOpen {
                line: self.line_number,
            });
        }
        self.pending = Some(Snapshot::new());
        Ok(())
    }

    fn append_content(&mut self, line: Line) -> Result<(), ParseError> {
        let line_number = self.line_number;
        let snapshot = self
            .pending
            .as_mut()
            .ok_or(MalformedSequence::OrphanContent { line: line_number })?;

        if snapshot.time.is_none() {
            if let Some(digits) = TIME_REGEX.captures(&line).and_then(|c| c.get(1)) {
                snapshot.time = Some(parse_key(digits.as_bytes(), line_number)?);
            }
        }

        snapshot.body.push(line);
        Ok(())
    }
}

fn parse_key(digits: &[u8], line: usize) -> Result<u64, ParseError> {
    let text = String::from_utf8_lossy(digits);
    text.parse::<u64>().map_err(|_| ParseError::InvalidKey {
        line,
        value: text.into_owned(),
    })
}

/// Parse one massif source into `document`
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `reader` - Line-oriented source
/// * `document` - Document receiving headers and snapshots
/// * `capture_headers` - Whether header lines are kept
///
/// # Errors
/// * `ParseError::Malformed` - Input violates the snapshot grammar
/// * `ParseError::InvalidKey` - A `time=` value does not fit in 64 bits
/// * `ParseError::Io` - Read failure
///
/// Snapshots committed before an error stay in `document`.
pub fn parse_massif<R: BufRead>(
    mut reader: R,
    document: &mut Document,
    capture_headers: bool,
) -> Result<(), ParseError> {
    let snapshots_before = document.snapshots.len();
    let mut parser = SnapshotParser::new(document, capture_headers);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        parser.feed_line(strip_line_ending(&buf).to_vec())?;
    }
    parser.finish();

    debug!(
        "Parsed {} snapshots",
        document.snapshots.len() - snapshots_before
    );

    Ok(())
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
