//! Risk scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_IFOREST_WEIGHT, DEFAULT_MAX_SAMPLES, DEFAULT_N_ESTIMATORS, DEFAULT_RANDOM_SEED,
    DEFAULT_SCORE_THRESHOLD, DEFAULT_Z_THRESHOLD, DEFAULT_ZSCORE_WEIGHT,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Raw category z-score at which a record is flagged. Default: 2.5.
    pub z_threshold: Option<f64>,
    /// Normalized outlier score at which a record is flagged. Default: 0.65.
    pub score_threshold: Option<f64>,
    /// Weight of the outlier score in the blend. Default: 0.6.
    pub iforest_weight: Option<f64>,
    /// Weight of the normalized deviation in the blend. Default: 0.4.
    pub zscore_weight: Option<f64>,
    /// Trees in the isolation forest. Default: 200.
    pub n_estimators: Option<usize>,
    /// Rows subsampled per tree. Default: 256.
    pub max_samples: Option<usize>,
    /// Forest seed. Default: 42.
    pub random_seed: Option<u64>,
}

impl ScoringConfig {
    pub fn effective_z_threshold(&self) -> f64 {
        self.z_threshold.unwrap_or(DEFAULT_Z_THRESHOLD)
    }

    pub fn effective_score_threshold(&self) -> f64 {
        self.score_threshold.unwrap_or(DEFAULT_SCORE_THRESHOLD)
    }

    pub fn effective_iforest_weight(&self) -> f64 {
        self.iforest_weight.unwrap_or(DEFAULT_IFOREST_WEIGHT)
    }

    pub fn effective_zscore_weight(&self) -> f64 {
        self.zscore_weight.unwrap_or(DEFAULT_ZSCORE_WEIGHT)
    }

    pub fn effective_n_estimators(&self) -> usize {
        self.n_estimators.unwrap_or(DEFAULT_N_ESTIMATORS)
    }

    pub fn effective_max_samples(&self) -> usize {
        self.max_samples.unwrap_or(DEFAULT_MAX_SAMPLES)
    }

    pub fn effective_random_seed(&self) -> u64 {
        self.random_seed.unwrap_or(DEFAULT_RANDOM_SEED)
    }

    pub(crate) fn merge(&mut self, other: &ScoringConfig) {
        if other.z_threshold.is_some() {
            self.z_threshold = other.z_threshold;
        }
        if other.score_threshold.is_some() {
            self.score_threshold = other.score_threshold;
        }
        if other.iforest_weight.is_some() {
            self.iforest_weight = other.iforest_weight;
        }
        if other.zscore_weight.is_some() {
            self.zscore_weight = other.zscore_weight;
        }
        if other.n_estimators.is_some() {
            self.n_estimators = other.n_estimators;
        }
        if other.max_samples.is_some() {
            self.max_samples = other.max_samples;
        }
        if other.random_seed.is_some() {
            self.random_seed = other.random_seed;
        }
    }
}
