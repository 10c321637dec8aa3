//! claimrisk-analysis: the claims scoring engine.
//!
//! The quality stage range-cleans age and income and screens for
//! suspicious duplicate incomes. The scoring stage combines a batch
//! isolation forest with per-category amount z-scores into one risk score
//! and a reason code per claim.

pub mod engine;
pub mod kpi;
pub mod quality;
pub mod scoring;

pub use engine::{EngineReport, RiskEngine};
pub use kpi::{compute_kpis, Kpis};
pub use quality::{QualityPipeline, QualityReport, QualitySettings};
pub use scoring::{aggregate, AggregatorSettings, RiskAssessment, ScoredTable};
