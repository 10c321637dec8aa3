//! RiskErrorCode trait for structured error codes at the crate boundary.

/// Every error enum implements this to expose a stable code string that
/// outer layers (UI, CLI, exporters) can match on without parsing messages.
pub trait RiskErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const TABLE_ERROR: &str = "TABLE_ERROR";
pub const INVALID_BOUNDS: &str = "INVALID_BOUNDS";
pub const UNKNOWN_POLICY: &str = "UNKNOWN_POLICY";
pub const INVALID_WEIGHT: &str = "INVALID_WEIGHT";
pub const INVALID_THRESHOLD: &str = "INVALID_THRESHOLD";
pub const INVALID_FOREST_PARAMS: &str = "INVALID_FOREST_PARAMS";
