//! Extract init durations from Lambda REPORT log lines.
//!
//! A cold start REPORT line looks like:
//!
//! ```text
//! REPORT RequestId: 3f2c...  Duration: 12.34 ms  Billed Duration: 13 ms
//!   Memory Size: 128 MB  Max Memory Used: 64 MB  Init Duration: 250.12 ms
//! ```

use crate::utils::config::INIT_DURATION_MARKER;
use crate::utils::error::ParseError;
use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse the init duration (milliseconds) out of one REPORT line
pub fn parse_init_duration(message: &str) -> Result<Decimal, ParseError> {
    let (_, rest) = message
        .split_once(INIT_DURATION_MARKER)
        .ok_or(ParseError::MissingMarker)?;

    let token = rest
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::InvalidDuration(String::new()))?;

    let duration = Decimal::from_str(token)
        .map_err(|_| ParseError::InvalidDuration(token.to_string()))?;

    if duration.is_sign_negative() {
        return Err(ParseError::InvalidDuration(token.to_string()));
    }

    Ok(duration)
}

/// Durations parsed from a batch of messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDurations {
    /// Parsed durations, in message order
    pub durations: Vec<Decimal>,
    /// Messages that could not be parsed and were skipped
    pub malformed: usize,
}

/// Parse every message, skipping (and logging) lines that don't parse
pub fn parse_init_durations<I, S>(function_name: &str, messages: I) -> ParsedDurations
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedDurations::default();

    for message in messages {
        let message = message.as_ref();
        match parse_init_duration(message) {
            Ok(duration) => parsed.durations.push(duration),
            Err(e) => {
                warn!(
                    "{}: skipping unparseable log line ({}): {}",
                    function_name,
                    e,
                    message.trim_end()
                );
                parsed.malformed += 1;
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "REPORT RequestId: 3f2c0a4e-1b2c-4d5e-8f90-123456789abc\t\
        Duration: 12.34 ms\tBilled Duration: 13 ms\tMemory Size: 128 MB\t\
        Max Memory Used: 64 MB\tInit Duration: 250.12 ms\t\n";

    #[test]
    fn test_parse_report_line() {
        assert_eq!(
            parse_init_duration(REPORT).unwrap(),
            Decimal::from_str("250.12").unwrap()
        );
    }

    #[test]
    fn test_parse_integer_duration() {
        let line = "Init Duration: 731 ms";
        assert_eq!(parse_init_duration(line).unwrap(), Decimal::from(731));
    }

    #[test]
    fn test_missing_marker() {
        let line = "REPORT RequestId: abc Duration: 1.00 ms";
        assert_eq!(parse_init_duration(line), Err(ParseError::MissingMarker));
    }

    #[test]
    fn test_non_numeric_token() {
        let line = "Init Duration: fast ms";
        assert_eq!(
            parse_init_duration(line),
            Err(ParseError::InvalidDuration("fast".to_string()))
        );
    }

    #[test]
    fn test_marker_at_end_of_line() {
        assert!(matches!(
            parse_init_duration("Init Duration: "),
            Err(ParseError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_batch_skips_malformed_lines() {
        let messages = vec![
            "Init Duration: 100.00 ms",
            "Init Duration: ??? ms",
            "Init Duration: 300.00 ms",
        ];
        let parsed = parse_init_durations("fn", messages);

        assert_eq!(parsed.durations.len(), 2);
        assert_eq!(parsed.malformed, 1);
    }
}
