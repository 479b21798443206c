//! Response aggregation and metrics.
//!
//! This module turns filtered survey rows into per-question categorical
//! distributions, before/after percentage-point deltas, and scalar metrics
//! (NPS, Likert averages) for the presentation layer.

pub mod aggregate;
pub mod delta;
pub mod metrics;
pub mod types;
