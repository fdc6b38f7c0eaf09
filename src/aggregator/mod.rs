//! Per-function eligibility checks and init cost estimation.

pub mod cost;
pub mod filter;

pub use cost::{average, estimate_function, init_cost, round_cost, Pricing, RunTotals};
pub use filter::{check_function, memory_mb};
