//! Parsers for Lambda platform log lines.

pub mod init_duration;

pub use init_duration::{parse_init_duration, parse_init_durations, ParsedDurations};
