//! Init duration cost estimate.
//!
//! All money math runs on [`Decimal`] so per-row costs and the grand total
//! add up exactly. For a function with `n` cold starts:
//!
//! ```text
//! cost = (avg_ms / 1000) * (memory_mb / 1024) * price_per_gb_second * n
//! ```
//!
//! rounded half-up to six decimal places.

use crate::commands::models::FunctionReport;
use crate::utils::config::{COST_DECIMAL_PLACES, DEFAULT_PRICE_PER_GB_SECOND};
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};

/// Pricing used by the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    /// USD per GB-second of compute
    pub price_per_gb_second: Decimal,
}

impl Pricing {
    pub fn new(price_per_gb_second: Decimal) -> Self {
        Self { price_per_gb_second }
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_PER_GB_SECOND)
    }
}

/// Arithmetic mean, or zero for an empty slice
pub fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().sum();
    sum / Decimal::from(values.len())
}

/// Round half-up (away from zero) to the cost precision
pub fn round_cost(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(COST_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Estimated cost of `cold_starts` inits averaging `avg_ms` at `memory_mb`
pub fn init_cost(avg_ms: Decimal, memory_mb: u32, cold_starts: u64, pricing: &Pricing) -> Decimal {
    let init_seconds = avg_ms / Decimal::ONE_THOUSAND;
    let memory_gb = Decimal::from(memory_mb) / Decimal::from(1024);
    round_cost(init_seconds * memory_gb * pricing.price_per_gb_second * Decimal::from(cold_starts))
}

/// Build the report row for one function from its parsed durations
///
/// Returns `None` when there are no durations; functions without cold
/// starts never get a row.
pub fn estimate_function(
    function_name: &str,
    durations: &[Decimal],
    memory_mb: u32,
    pricing: &Pricing,
) -> Option<FunctionReport> {
    if durations.is_empty() {
        return None;
    }

    let cold_start_count = durations.len() as u64;
    let avg_init_ms = average(durations);
    let monthly_cost_usd = init_cost(avg_init_ms, memory_mb, cold_start_count, pricing);

    debug!(
        "{}: avg {} ms x {} MB x {} cold starts = ${}",
        function_name, avg_init_ms, memory_mb, cold_start_count, monthly_cost_usd
    );

    Some(FunctionReport {
        name: function_name.to_string(),
        cold_start_count,
        avg_init_ms,
        memory_mb,
        monthly_cost_usd,
    })
}

/// Running totals for a scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunTotals {
    /// Sum of the (already rounded) row costs
    pub grand_total: Decimal,
    /// Functions looked at, whether reported or skipped
    pub functions_analyzed: usize,
    pub functions_reported: usize,
    pub functions_skipped: usize,
    pub cold_starts: u64,
}

impl RunTotals {
    pub fn record_report(&mut self, report: &FunctionReport) {
        self.functions_analyzed += 1;
        self.functions_reported += 1;
        self.cold_starts += report.cold_start_count;
        self.grand_total += report.monthly_cost_usd;
    }

    pub fn record_skip(&mut self) {
        self.functions_analyzed += 1;
        self.functions_skipped += 1;
    }

    /// Grand total at report precision
    pub fn total(&self) -> Decimal {
        round_cost(self.grand_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_default_pricing() {
        assert_eq!(Pricing::default().price_per_gb_second, d("0.0000166667"));
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[d("100"), d("200"), d("600")]), d("300"));
        assert_eq!(average(&[d("250.5"), d("249.5")]), d("250"));
        assert_eq!(average(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_documented_example() {
        // 0.25 s * 0.125 GB * 0.0000166667 * 10 = 0.00000520834375
        let cost = init_cost(d("250.0"), 128, 10, &Pricing::default());
        assert_eq!(cost, d("0.000005"));
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(round_cost(d("0.0000025")), d("0.000003"));
        assert_eq!(round_cost(d("0.0000035")), d("0.000004"));
        assert_eq!(round_cost(d("0.00000249")), d("0.000002"));
    }

    #[test]
    fn test_alternate_pricing() {
        // 1 s * 1 GB * 1 USD * 3 = 3 USD
        let cost = init_cost(d("1000"), 1024, 3, &Pricing::new(Decimal::ONE));
        assert_eq!(cost, d("3"));
    }

    #[test]
    fn test_estimate_function() {
        let report =
            estimate_function("api", &[d("200"), d("400")], 1024, &Pricing::default()).unwrap();

        assert_eq!(report.cold_start_count, 2);
        assert_eq!(report.avg_init_ms, d("300"));
        assert_eq!(report.memory_mb, 1024);
        // 0.3 * 1 * 0.0000166667 * 2 = 0.00001000002
        assert_eq!(report.monthly_cost_usd, d("0.000010"));
    }

    #[test]
    fn test_no_durations_no_report() {
        assert!(estimate_function("idle", &[], 128, &Pricing::default()).is_none());
    }

    #[test]
    fn test_totals_sum_rounded_rows() {
        let mut totals = RunTotals::default();
        for cost in ["0.000005", "0.000010", "1.234567"] {
            totals.record_report(&FunctionReport {
                name: "f".to_string(),
                cold_start_count: 1,
                avg_init_ms: Decimal::ONE,
                memory_mb: 128,
                monthly_cost_usd: d(cost),
            });
        }
        totals.record_skip();

        assert_eq!(totals.total(), d("1.234582"));
        assert_eq!(totals.functions_analyzed, 4);
        assert_eq!(totals.functions_reported, 3);
        assert_eq!(totals.functions_skipped, 1);
    }
}
