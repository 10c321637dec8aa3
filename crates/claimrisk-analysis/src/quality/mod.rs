//! Data-quality stage: range cleaning, duplicate screening, and audit
//! summaries. Everything here runs before scoring.

pub mod duplicates;
pub mod pipeline;
pub mod range_cleaner;
pub mod summary;

pub use duplicates::DuplicateFinding;
pub use pipeline::{QualityPipeline, QualityReport, QualitySettings};
pub use range_cleaner::{clean, CleanOutcome, RangeRule};
pub use summary::{quality_summary, ColumnQuality};
