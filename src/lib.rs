//! Lambda Init Costs
//!
//! Estimates the monthly cost of Lambda cold-start initialization by
//! scanning CloudWatch Logs for "Init Duration" REPORT lines across every
//! ZIP-packaged function in a region.
//!
//! This crate provides the core implementation for the
//! `lambda-init-costs` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! lambda-init-costs --region us-east-1 --days 30
//! ```
//!
//! The scan core ([`commands::run_scan`]) only depends on the
//! [`aws::LogsApi`] and [`aws::FunctionsApi`] traits, so it can be driven
//! without AWS credentials.

pub mod aggregator;
pub mod aws;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
