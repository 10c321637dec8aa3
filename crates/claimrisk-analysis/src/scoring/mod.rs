//! Scoring stage: category deviation, isolation forest outlier scores, and
//! their aggregation into a ranked, flagged batch.

pub mod aggregator;
pub mod deviation;
pub mod isolation_forest;
pub mod outlier;

pub use aggregator::{aggregate, AggregatorSettings, RiskAssessment, ScoredTable};
pub use deviation::{category_zscores, combined_deviation};
pub use isolation_forest::{ForestParams, IsolationForest};
pub use outlier::{feature_matrix, outlier_scores};
