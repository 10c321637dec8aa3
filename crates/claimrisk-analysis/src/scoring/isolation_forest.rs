//! Isolation forest: multivariate outlier model fit over a whole batch.
//!
//! Each tree isolates a random subsample by splitting on a random feature
//! at a uniform threshold between that feature's min and max. Anomalies are
//! isolated in fewer splits, so a shorter average path means more anomalous.
//!
//! Scores follow the usual convention:
//! `score_samples = -2^(-E[h(x)] / c(psi))` and
//! `decision = score_samples - offset`, where lower is more anomalous and
//! the offset is the fixed -0.5 used when contamination is left automatic.

use claimrisk_core::constants::{
    AUTO_CONTAMINATION_OFFSET, DEFAULT_MAX_SAMPLES, DEFAULT_N_ESTIMATORS, DEFAULT_RANDOM_SEED,
};
use claimrisk_core::errors::ScoringError;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Forest hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees.
    pub n_estimators: usize,
    /// Rows drawn per tree, capped at the batch size.
    pub max_samples: usize,
    /// Seed for subsampling and splits; equal seeds give equal forests.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_samples: DEFAULT_MAX_SAMPLES,
            seed: DEFAULT_RANDOM_SEED,
        }
    }
}

impl ForestParams {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.n_estimators == 0 {
            return Err(ScoringError::InvalidForestParams(
                "n_estimators must be greater than 0".to_string(),
            ));
        }
        if self.max_samples == 0 {
            return Err(ScoringError::InvalidForestParams(
                "max_samples must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn grow(data: &[Vec<f64>], rows: Vec<usize>, height_limit: usize, rng: &mut ChaCha20Rng) -> Self {
        Self {
            root: grow_node(data, rows, 0, height_limit, rng),
        }
    }

    fn path_length(&self, x: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] < *threshold { left.as_ref() } else { right.as_ref() };
                    depth += 1;
                }
            }
        }
    }
}

fn grow_node(
    data: &[Vec<f64>],
    rows: Vec<usize>,
    depth: usize,
    height_limit: usize,
    rng: &mut ChaCha20Rng,
) -> Node {
    if depth >= height_limit || rows.len() <= 1 {
        return Node::Leaf { size: rows.len() };
    }

    // Only features that still vary inside this node can split it.
    let n_features = data[rows[0]].len();
    let candidates: Vec<(usize, f64, f64)> = (0..n_features)
        .filter_map(|f| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                (lo.min(data[r][f]), hi.max(data[r][f]))
            });
            (hi > lo).then_some((f, lo, hi))
        })
        .collect();

    if candidates.is_empty() {
        return Node::Leaf { size: rows.len() };
    }

    let (feature, lo, hi) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = split_between(lo, hi, rng.gen::<f64>());

    let (left, right): (Vec<usize>, Vec<usize>) =
        rows.into_iter().partition(|&r| data[r][feature] < threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(data, left, depth + 1, height_limit, rng)),
        right: Box::new(grow_node(data, right, depth + 1, height_limit, rng)),
    }
}

/// Point at fraction `t` of the way from `lo` to `hi`.
///
/// Interpolated as a weighted sum so that `hi - lo` is never formed; that
/// difference overflows for finite extremes such as `-1e308..1e308`.
fn split_between(lo: f64, hi: f64, t: f64) -> f64 {
    let threshold = lo * (1.0 - t) + hi * t;
    threshold.clamp(lo, hi)
}

/// Average path length of an unsuccessful BST search over `n` points,
/// used to normalize depths: `c(n) = 2H(n-1) - 2(n-1)/n`.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// A fitted isolation forest.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
    offset: f64,
}

impl IsolationForest {
    /// Fit a forest to `data` (rows × features). Every row must have the
    /// same number of features.
    pub fn fit(data: &[Vec<f64>], params: &ForestParams) -> Result<Self, ScoringError> {
        params.validate()?;
        if data.is_empty() {
            return Err(ScoringError::InvalidForestParams(
                "cannot fit on an empty batch".to_string(),
            ));
        }
        let width = data[0].len();
        if data.iter().any(|row| row.len() != width) {
            return Err(ScoringError::InvalidForestParams(
                "rows have differing feature counts".to_string(),
            ));
        }

        let n = data.len();
        let sample_size = params.max_samples.min(n);
        let height_limit = (sample_size.max(2) as f64).log2().ceil() as usize;
        let mut rng = ChaCha20Rng::seed_from_u64(params.seed);

        let trees = (0..params.n_estimators)
            .map(|_| {
                let rows = index::sample(&mut rng, n, sample_size).into_vec();
                IsolationTree::grow(data, rows, height_limit, &mut rng)
            })
            .collect();

        Ok(Self {
            trees,
            sample_size,
            offset: AUTO_CONTAMINATION_OFFSET,
        })
    }

    /// Opposite of the anomaly score: in `[-1, 0)`, lower is more anomalous.
    pub fn score_samples(&self, data: &[Vec<f64>]) -> Vec<f64> {
        let norm = average_path_length(self.sample_size);
        data.iter()
            .map(|x| {
                let mean_depth = self.trees.iter().map(|t| t.path_length(x)).sum::<f64>()
                    / self.trees.len() as f64;
                if norm > 0.0 {
                    -(2f64.powf(-mean_depth / norm))
                } else {
                    -1.0
                }
            })
            .collect()
    }

    /// Shifted score; negative values are considered outliers. Lower is
    /// more anomalous.
    pub fn decision_function(&self, data: &[Vec<f64>]) -> Vec<f64> {
        self.score_samples(data)
            .into_iter()
            .map(|s| s - self.offset)
            .collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
