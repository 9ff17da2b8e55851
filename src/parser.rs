//! Mapfile parser
//!
//! A rescue log is line oriented. Each line is one of:
//!
//! - a comment, whose first token is `#`
//! - the status marker `<position> <state>`, of which only the first counts
//! - a segment record `<offset> <length> <symbol>`
//!
//! Everything else is skipped without error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::IntErrorKind;
use std::path::Path;

use tracing::{debug, info, trace};

use crate::error::{LogError, Result};
use crate::types::{parse_hex, Category, LogRecord, RatioTable, StatisticsTable, StatusMarker};

const COMMENT_TOKEN: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    Record {
        offset: &'a str,
        length: &'a str,
        symbol: &'a str,
    },
    Status {
        position: &'a str,
        state: &'a str,
    },
    Other,
}

fn classify(line: &str) -> Line<'_> {
    let mut tokens = line.split_whitespace();
    let fields = [tokens.next(), tokens.next(), tokens.next(), tokens.next()];

    match fields {
        [Some(COMMENT_TOKEN), ..] => Line::Other,
        [Some(offset), Some(length), Some(symbol), None] => Line::Record {
            offset,
            length,
            symbol,
        },
        [Some(position), Some(state), None, _] => Line::Status { position, state },
        _ => Line::Other,
    }
}

fn category_of(symbol: &str) -> Option<Category> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Category::from_symbol(c),
        _ => None,
    }
}

/// Parsed rescue log: ordered records, the status marker and per-status totals.
///
/// Built in a single pass and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogParser {
    records: Vec<LogRecord>,
    statistics: StatisticsTable,
    current_status: Option<StatusMarker>,
    lines_read: usize,
    lines_skipped: usize,
}

impl LogParser {
    /// Opens and parses the log at `path`. The file is closed before returning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening rescue log");
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a log from any line source, streaming it line by line.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut parser = Self {
            records: Vec::new(),
            statistics: StatisticsTable::new(),
            current_status: None,
            lines_read: 0,
            lines_skipped: 0,
        };

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            parser.lines_read += 1;
            parser.process_line(&line, parser.lines_read)?;
        }

        info!(
            records = parser.records.len(),
            lines = parser.lines_read,
            skipped = parser.lines_skipped,
            total_bytes = parser.statistics.total(),
            "Parsed rescue log"
        );
        Ok(parser)
    }

    fn process_line(&mut self, line: &str, number: usize) -> Result<()> {
        match classify(line) {
            Line::Record {
                offset,
                length,
                symbol,
            } => {
                let size = parse_hex(length).map_err(|source| match source.kind() {
                    IntErrorKind::PosOverflow => LogError::Overflow { line: number },
                    _ => LogError::InvalidLength {
                        line: number,
                        value: length.to_string(),
                        source,
                    },
                })?;
                let category = category_of(symbol).ok_or_else(|| LogError::UnknownSymbol {
                    line: number,
                    symbol: symbol.to_string(),
                })?;
                self.statistics
                    .add(category, size)
                    .ok_or(LogError::Overflow { line: number })?;
                self.records.push(LogRecord::new(offset, length, size, category));
            }
            Line::Status { position, state } if self.current_status.is_none() => {
                debug!(line = number, position, state, "Found status marker");
                self.current_status = Some(StatusMarker::new(position, state));
            }
            _ => {
                trace!(line = number, "Skipping line");
                self.lines_skipped += 1;
            }
        }
        Ok(())
    }

    /// All segment records in file order
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Records with the given status, in file order
    pub fn records_in(&self, category: Category) -> impl Iterator<Item = &LogRecord> + '_ {
        self.records.iter().filter(move |r| r.status() == category)
    }

    pub fn statistics(&self) -> &StatisticsTable {
        &self.statistics
    }

    /// The first status marker line, if the log had one
    pub fn current_status(&self) -> Option<&StatusMarker> {
        self.current_status.as_ref()
    }

    pub fn current_status_position(&self) -> Option<&str> {
        self.current_status.as_ref().map(StatusMarker::position)
    }

    pub fn current_status_state(&self) -> Option<&str> {
        self.current_status.as_ref().map(StatusMarker::state)
    }

    pub fn rescued_bytes(&self) -> u64 {
        self.statistics.bytes(Category::Rescued)
    }

    pub fn nontried_bytes(&self) -> u64 {
        self.statistics.bytes(Category::Nontried)
    }

    pub fn nontrimmed_bytes(&self) -> u64 {
        self.statistics.bytes(Category::Nontrimmed)
    }

    pub fn nonsplit_bytes(&self) -> u64 {
        self.statistics.bytes(Category::Nonsplit)
    }

    pub fn bad_bytes(&self) -> u64 {
        self.statistics.bytes(Category::Bad)
    }

    pub fn total_bytes(&self) -> u64 {
        self.statistics.total()
    }

    /// Percentage of the total held by the named category (`total` included).
    ///
    /// Fails with [`LogError::UnknownCategory`] for an unrecognised name and
    /// with [`LogError::UndefinedRatio`] when the log accounts for no bytes.
    pub fn percentage_of(&self, name: &str) -> Result<f64> {
        let bytes = self.statistics.get(name)?;
        self.statistics.percentage(bytes)
    }

    pub fn ratio(&self, category: Category) -> Result<f64> {
        self.statistics.percentage(self.statistics.bytes(category))
    }

    pub fn ratios(&self) -> Result<RatioTable> {
        RatioTable::from_statistics(&self.statistics)
    }

    /// End of the furthest record whose offset is valid hex
    pub fn rescue_domain_end(&self) -> Option<u64> {
        self.records.iter().filter_map(LogRecord::end).max()
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Lines that were neither a record nor the status marker
    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }
}
