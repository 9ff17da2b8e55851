//! Rescue summary
//!
//! Snapshot of a parsed log for display, as text or JSON.

use std::fmt;

use serde::Serialize;

use crate::parser::LogParser;
use crate::types::{Category, LogRecord, StatisticsTable, StatusMarker};

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Bytes and share of the total for one status
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub symbol: char,
    pub bytes: u64,
    /// `None` when the log accounts for no bytes
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub source: String,
    pub current_status: Option<StatusMarker>,
    pub categories: Vec<CategorySummary>,
    pub statistics: StatisticsTable,
    pub record_count: usize,
    pub domain_end: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<LogRecord>>,
}

impl Summary {
    pub fn new(source: impl Into<String>, parser: &LogParser, include_records: bool) -> Self {
        let categories = Category::ALL
            .into_iter()
            .map(|category| CategorySummary {
                category,
                symbol: category.symbol(),
                bytes: parser.statistics().bytes(category),
                percentage: parser.ratio(category).ok(),
            })
            .collect();

        Self {
            source: source.into(),
            current_status: parser.current_status().cloned(),
            categories,
            statistics: *parser.statistics(),
            record_count: parser.records().len(),
            domain_end: parser.rescue_domain_end(),
            records: include_records.then(|| parser.records().to_vec()),
        }
    }

    pub fn ratios_defined(&self) -> bool {
        self.statistics.total() > 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rescue log: {}", self.source)?;
        match &self.current_status {
            Some(marker) => writeln!(
                f,
                "Current position: {} (state {})",
                marker.position(),
                marker.state()
            )?,
            None => writeln!(f, "Current position: unknown")?,
        }
        writeln!(f, "Records: {}", self.record_count)?;
        if let Some(end) = self.domain_end {
            writeln!(f, "Mapped up to: {:#X} ({})", end, size_human(end))?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:<12} {:>3} {:>18} {:>12} {:>9}",
            "STATUS", "SYM", "BYTES", "SIZE", "PERCENT"
        )?;
        writeln!(f, "{}", "-".repeat(58))?;
        for row in &self.categories {
            writeln!(
                f,
                "{:<12} {:>3} {:>18} {:>12} {:>9}",
                row.category.name(),
                row.symbol,
                row.bytes,
                size_human(row.bytes),
                format_percentage(row.percentage)
            )?;
        }
        writeln!(f, "{}", "-".repeat(58))?;
        writeln!(
            f,
            "{:<12} {:>3} {:>18} {:>12}",
            "total",
            "",
            self.statistics.total(),
            size_human(self.statistics.total())
        )?;

        if !self.ratios_defined() {
            writeln!(f)?;
            writeln!(f, "Note: percentages are undefined for a log with no bytes")?;
        }

        if let Some(records) = &self.records {
            writeln!(f)?;
            for record in records {
                writeln!(
                    f,
                    "{:<18} {:<18} {}",
                    record.offset(),
                    record.length(),
                    record.symbol()
                )?;
            }
        }
        Ok(())
    }
}

fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(p) => format!("{:.4}%", p),
        None => "n/a".to_string(),
    }
}

/// Formats a byte count with binary units
pub fn size_human(bytes: u64) -> String {
    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Rescue Logfile.
# current_pos  current_status
0x00000400     ?
#      pos        size  status
0x00000000  0x00000400  +
0x00000400  0x00000200  -
0x00000600  0x00000200  ?
";

    #[test]
    fn test_summary_from_parser() {
        let parser = LogParser::from_reader(SAMPLE.as_bytes()).unwrap();
        let summary = Summary::new("sample.log", &parser, false);

        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.domain_end, Some(0x800));
        assert_eq!(summary.categories.len(), 5);
        let rescued = &summary.categories[1];
        assert_eq!(rescued.category, Category::Rescued);
        assert_eq!(rescued.bytes, 0x400);
        assert_eq!(rescued.percentage, Some(50.0));
        assert!(summary.records.is_none());
    }

    #[test]
    fn test_text_report_lists_every_category() {
        let parser = LogParser::from_reader(SAMPLE.as_bytes()).unwrap();
        let text = Summary::new("sample.log", &parser, true).to_string();

        for category in Category::ALL {
            assert!(text.contains(category.name()));
        }
        assert!(text.contains("Current position: 0x00000400 (state ?)"));
        assert!(text.contains("50.0000%"));
        assert!(text.contains("0x00000600"));
    }

    #[test]
    fn test_empty_log_report_marks_percentages_undefined() {
        let parser = LogParser::from_reader("# nothing here\n".as_bytes()).unwrap();
        let summary = Summary::new("empty.log", &parser, false);

        assert!(!summary.ratios_defined());
        assert!(summary.categories.iter().all(|c| c.percentage.is_none()));
        let text = summary.to_string();
        assert!(text.contains("n/a"));
        assert!(text.contains("Current position: unknown"));
    }

    #[test]
    fn test_json_report() {
        let parser = LogParser::from_reader(SAMPLE.as_bytes()).unwrap();
        let json = Summary::new("sample.log", &parser, false).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["statistics"]["total"], 0x800);
        assert_eq!(value["statistics"]["bad"], 0x200);
        assert_eq!(value["current_status"]["position"], "0x00000400");
        assert_eq!(value["categories"][0]["category"], "nontried");
        assert!(value.get("records").is_none());
    }

    #[test]
    fn test_size_human() {
        assert_eq!(size_human(0), "0 bytes");
        assert_eq!(size_human(1023), "1023 bytes");
        assert_eq!(size_human(1024), "1.00 KB");
        assert_eq!(size_human(1048576), "1.00 MB");
        assert_eq!(size_human(1_000_204_886_016), "931.51 GB");
    }
}
