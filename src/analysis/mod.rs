pub mod technicals;
pub mod statistics;
pub mod calculator;

pub use calculator::{ComparisonEntry, IndicatorCalculator, TrendSummary};
