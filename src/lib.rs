//! Parser and statistics for disk-rescue mapfiles.
//!
//! A mapfile records which byte ranges of a failing device were rescued, are
//! bad, or were never tried. [`LogParser`] reads one in a single streaming
//! pass and exposes the ordered records, the scan-position marker, byte totals
//! per status and their percentages.
//!
//! ```
//! use rescuelog::{Category, LogParser};
//!
//! let log = "0x00000000 0x00000400 +\n0x00000400 ?\n0x00000400 0x00000400 ?\n";
//! let parser = LogParser::from_reader(log.as_bytes())?;
//! assert_eq!(parser.rescued_bytes(), 0x400);
//! assert_eq!(parser.current_status_position(), Some("0x00000400"));
//! assert_eq!(parser.ratio(Category::Nontried)?, 50.0);
//! # Ok::<(), rescuelog::LogError>(())
//! ```

pub mod cli;
pub mod error;
pub mod logging;
pub mod parser;
pub mod report;
pub mod types;

pub use error::{LogError, Result};
pub use parser::LogParser;
pub use report::{CategorySummary, Summary};
pub use types::{Category, LogRecord, RatioTable, StatisticsTable, StatusMarker};
