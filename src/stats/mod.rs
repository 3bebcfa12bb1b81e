//! Stats module - binning, descriptive statistics, correlation

mod calculator;
pub mod complexity;
mod distribution;

pub use calculator::{CorrelationMatrix, StatsCalculator, SummaryTable};
pub use distribution::{histogram, value_counts, Histogram};
