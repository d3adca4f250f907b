//! The elephant-curve computation pipeline.
//!
//! This module filters the raw survey to one (year, sample) selection,
//! sorts it by income, accumulates population, cuts the cumulative axis
//! into twenty equal-width quantile buckets, averages income per bucket,
//! and finally combines two such summaries into per-quantile growth.

pub mod aggregate;
pub mod curve;
pub mod types;
pub mod utility;
