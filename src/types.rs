use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{LogError, Result};

pub const TOTAL_KEY: &str = "total";

/// Rescue status of a byte range, one per mapfile status symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nontried,
    Rescued,
    Nontrimmed,
    Nonsplit,
    Bad,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Nontried,
        Category::Rescued,
        Category::Nontrimmed,
        Category::Nonsplit,
        Category::Bad,
    ];

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '?' => Some(Self::Nontried),
            '+' => Some(Self::Rescued),
            '*' => Some(Self::Nontrimmed),
            '/' => Some(Self::Nonsplit),
            '-' => Some(Self::Bad),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Nontried => '?',
            Self::Rescued => '+',
            Self::Nontrimmed => '*',
            Self::Nonsplit => '/',
            Self::Bad => '-',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Nontried => "nontried",
            Self::Rescued => "rescued",
            Self::Nontrimmed => "nontrimmed",
            Self::Nonsplit => "nonsplit",
            Self::Bad => "bad",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| LogError::UnknownCategory(s.to_string()))
    }
}

/// One `offset length status` line of a mapfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    offset: String,
    length: String,
    size: u64,
    status: Category,
}

impl LogRecord {
    pub fn new(
        offset: impl Into<String>,
        length: impl Into<String>,
        size: u64,
        status: Category,
    ) -> Self {
        Self {
            offset: offset.into(),
            length: length.into(),
            size,
            status,
        }
    }

    /// Offset exactly as written in the log
    pub fn offset(&self) -> &str {
        &self.offset
    }

    /// Length exactly as written in the log
    pub fn length(&self) -> &str {
        &self.length
    }

    /// Length in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn status(&self) -> Category {
        self.status
    }

    pub fn symbol(&self) -> char {
        self.status.symbol()
    }

    /// Byte just past the end of this range, if the offset is valid hex
    pub fn end(&self) -> Option<u64> {
        parse_hex(&self.offset).ok()?.checked_add(self.size)
    }
}

/// The current scan position line: `offset state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMarker {
    position: String,
    state: String,
}

impl StatusMarker {
    pub fn new(position: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            state: state.into(),
        }
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Accumulated bytes per status, plus their total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatisticsTable {
    nontried: u64,
    rescued: u64,
    nontrimmed: u64,
    nonsplit: u64,
    bad: u64,
    total: u64,
}

impl StatisticsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `bytes` to `category` and to the total. Returns `None` on overflow
    /// and leaves the table unchanged.
    pub fn add(&mut self, category: Category, bytes: u64) -> Option<()> {
        let total = self.total.checked_add(bytes)?;
        let slot = self.slot_mut(category);
        *slot = slot.checked_add(bytes)?;
        self.total = total;
        Some(())
    }

    pub fn bytes(&self, category: Category) -> u64 {
        match category {
            Category::Nontried => self.nontried,
            Category::Rescued => self.rescued,
            Category::Nontrimmed => self.nontrimmed,
            Category::Nonsplit => self.nonsplit,
            Category::Bad => self.bad,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Looks a count up by name; accepts the five category names and `total`.
    pub fn get(&self, name: &str) -> Result<u64> {
        if name == TOTAL_KEY {
            return Ok(self.total);
        }
        name.parse().map(|category| self.bytes(category))
    }

    /// Name/count pairs in fixed order, `total` last.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        Category::ALL
            .into_iter()
            .map(|c| (c.name(), self.bytes(c)))
            .chain(std::iter::once((TOTAL_KEY, self.total)))
    }

    fn slot_mut(&mut self, category: Category) -> &mut u64 {
        match category {
            Category::Nontried => &mut self.nontried,
            Category::Rescued => &mut self.rescued,
            Category::Nontrimmed => &mut self.nontrimmed,
            Category::Nonsplit => &mut self.nonsplit,
            Category::Bad => &mut self.bad,
        }
    }

    /// Percentage of the total held by `bytes`.
    pub(crate) fn percentage(&self, bytes: u64) -> Result<f64> {
        if self.total == 0 {
            return Err(LogError::UndefinedRatio);
        }
        Ok(bytes as f64 / self.total as f64 * 100.0)
    }
}

/// Percentage of the total held by each category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioTable {
    nontried: f64,
    rescued: f64,
    nontrimmed: f64,
    nonsplit: f64,
    bad: f64,
    total: f64,
}

impl RatioTable {
    pub(crate) fn from_statistics(stats: &StatisticsTable) -> Result<Self> {
        let ratio = |category| stats.percentage(stats.bytes(category));
        Ok(Self {
            nontried: ratio(Category::Nontried)?,
            rescued: ratio(Category::Rescued)?,
            nontrimmed: ratio(Category::Nontrimmed)?,
            nonsplit: ratio(Category::Nonsplit)?,
            bad: ratio(Category::Bad)?,
            total: stats.percentage(stats.total())?,
        })
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Nontried => self.nontried,
            Category::Rescued => self.rescued,
            Category::Nontrimmed => self.nontrimmed,
            Category::Nonsplit => self.nonsplit,
            Category::Bad => self.bad,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

/// Parses a hex number with an optional leading `+` and `0x`/`0X` prefix.
pub fn parse_hex(value: &str) -> std::result::Result<u64, std::num::ParseIntError> {
    let unsigned = value.strip_prefix('+').unwrap_or(value);
    let digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .unwrap_or(unsigned);
    // A sign is only allowed ahead of the prefix
    if digits.starts_with(['+', '-']) {
        return u64::from_str_radix("-", 16);
    }
    u64::from_str_radix(digits, 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_map_is_a_bijection() {
        for category in Category::ALL {
            assert_eq!(Category::from_symbol(category.symbol()), Some(category));
        }
        assert_eq!(Category::from_symbol('X'), None);
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
        assert!(matches!(
            "total".parse::<Category>(),
            Err(LogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_statistics_add_keeps_total() {
        let mut stats = StatisticsTable::new();
        stats.add(Category::Rescued, 10).unwrap();
        stats.add(Category::Bad, 5).unwrap();
        assert_eq!(stats.bytes(Category::Rescued), 10);
        assert_eq!(stats.bytes(Category::Bad), 5);
        assert_eq!(stats.total(), 15);
        assert_eq!(stats.get("total").unwrap(), 15);
    }

    #[test]
    fn test_statistics_overflow_leaves_table_unchanged() {
        let mut stats = StatisticsTable::new();
        stats.add(Category::Rescued, u64::MAX).unwrap();
        assert!(stats.add(Category::Bad, 1).is_none());
        assert_eq!(stats.bytes(Category::Bad), 0);
        assert_eq!(stats.total(), u64::MAX);
    }

    #[test]
    fn test_parse_hex_prefixes() {
        assert_eq!(parse_hex("0x1F").unwrap(), 0x1F);
        assert_eq!(parse_hex("0X1f").unwrap(), 0x1F);
        assert_eq!(parse_hex("ff").unwrap(), 0xFF);
        assert!(parse_hex("0xZZ").is_err());
        assert!(parse_hex("0x").is_err());
    }

    #[test]
    fn test_parse_hex_signs() {
        assert_eq!(parse_hex("+10").unwrap(), 0x10);
        assert_eq!(parse_hex("+0x10").unwrap(), 0x10);
        assert!(parse_hex("0x+10").is_err());
        assert!(parse_hex("0X+10").is_err());
        assert!(parse_hex("++10").is_err());
        assert!(parse_hex("0x-10").is_err());
        assert!(parse_hex("-10").is_err());
    }

    #[test]
    fn test_record_end() {
        let record = LogRecord::new("0x100", "0x10", 0x10, Category::Rescued);
        assert_eq!(record.end(), Some(0x110));
        let opaque = LogRecord::new("start", "0x10", 0x10, Category::Rescued);
        assert_eq!(opaque.end(), None);
    }
}
