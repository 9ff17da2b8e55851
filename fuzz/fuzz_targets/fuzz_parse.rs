#![no_main]

use libfuzzer_sys::fuzz_target;
use rescuelog::{Category, LogParser};

fuzz_target!(|data: &[u8]| {
    if let Ok(parser) = LogParser::from_reader(data) {
        let stats = parser.statistics();
        let sum: u64 = Category::ALL.iter().map(|c| stats.bytes(*c)).sum();
        assert_eq!(stats.total(), sum);
        if let Ok(ratios) = parser.ratios() {
            for (_, ratio) in ratios.iter() {
                assert!((0.0..=100.0).contains(&ratio));
            }
        }
    }
});
