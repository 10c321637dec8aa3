//! Header normalization and the fixed column alias map.

pub mod alias;

pub use alias::{coalesce_columns, normalize_header, COLUMN_ALIASES};
