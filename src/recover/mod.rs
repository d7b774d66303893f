//! Topic recovery from a cooccurrence matrix and a fixed anchor set.
//!
//! Every word's normalized cooccurrence row is explained as a convex
//! combination of the normalized anchor rows. The per-word solves are
//! independent quadratic programs over the simplex, handled by the
//! exponentiated gradient solver in [`solver`]. Bayes' rule then turns the
//! word-over-topic weights into topic-over-word distributions.

mod solver;

pub use solver::{ExponentiatedGradient, SimplexSolve, SolveStatus};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::anchors::AnchorSet;
use crate::error::{Result, TemarioError};
use crate::primitives::Matrix;

/// Default duality-gap tolerance for the per-word solves.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;
/// Default trial-step budget per word.
pub const DEFAULT_MAX_ITER: usize = 2_000;

/// Floor substituted for non-finite word marginals, so the Bayes rescaling
/// never multiplies by garbage.
const MARGINAL_FLOOR: f64 = 1e-16;

/// Aggregate convergence bookkeeping across all per-word solves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryDiagnostics {
    /// Trial steps summed over every word.
    pub total_iterations: usize,
    /// Largest trial-step count any single word needed.
    pub max_word_iterations: usize,
    /// Words whose solve reached the gap tolerance or an exact fit.
    pub converged_words: usize,
    /// Words whose line search shrank the step to zero.
    pub collapsed_words: usize,
    /// Words that ran out of iteration budget.
    pub exhausted_words: usize,
    /// Words that produced non-finite weights and fell back to uniform.
    pub fallback_words: usize,
}

/// Recovered topic-word distributions plus solve diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveredTopics {
    /// K x V matrix; row `t` is the word distribution of topic `t`.
    pub topic_word: Matrix<f64>,
    pub diagnostics: RecoveryDiagnostics,
}

/// Estimates topic-word distributions given anchors.
///
/// # Examples
///
/// ```
/// use temario::anchors::AnchorSelector;
/// use temario::cooccurrence::build_cooccurrence;
/// use temario::corpus::Corpus;
/// use temario::recover::TopicRecoverer;
///
/// let corpus = Corpus::from_documents(vec![
///     vec!["sun", "moon"],
///     vec!["moon", "tide"],
///     vec!["tide", "wave"],
/// ]);
/// let q = build_cooccurrence(&corpus);
/// let anchors = AnchorSelector::new(2).select(&q, &corpus)?;
/// let topics = TopicRecoverer::new().recover(&q, &anchors)?;
///
/// assert_eq!(topics.topic_word.shape(), (2, 4));
/// // Each topic row is a probability distribution over the vocabulary.
/// for t in 0..2 {
///     let total: f64 = topics.topic_word.row_slice(t).iter().sum();
///     assert!((total - 1.0).abs() < 1e-9);
/// }
/// # Ok::<(), temario::TemarioError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TopicRecoverer {
    tolerance: f64,
    max_iter: usize,
}

impl TopicRecoverer {
    /// Creates a recoverer with the default tolerance and iteration budget.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// Sets the duality-gap tolerance below which a word's solve stops.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the per-word trial-step budget.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Recovers the K x V topic-word matrix.
    ///
    /// `cooccurrence` must be the square matrix the anchors were chosen
    /// from; `anchors` supplies the K unnormalized anchor rows.
    ///
    /// # Errors
    ///
    /// Returns [`TemarioError::DimensionMismatch`] when the matrix is not
    /// square or the anchor profiles do not span the same vocabulary, and
    /// [`TemarioError::InvalidHyperparameter`] for an empty anchor set.
    pub fn recover(&self, cooccurrence: &Matrix<f64>, anchors: &AnchorSet) -> Result<RecoveredTopics> {
        let (n_rows, n_cols) = cooccurrence.shape();
        if n_rows != n_cols {
            return Err(TemarioError::DimensionMismatch {
                expected: "square cooccurrence matrix".to_string(),
                actual: format!("{n_rows} x {n_cols}"),
            });
        }
        let v = n_rows;
        let k = anchors.k();
        if k == 0 {
            return Err(TemarioError::InvalidHyperparameter {
                param: "anchors".to_string(),
                value: "0".to_string(),
                constraint: "at least one anchor".to_string(),
            });
        }
        if anchors.profiles.shape() != (k, v) {
            let (pr, pc) = anchors.profiles.shape();
            return Err(TemarioError::DimensionMismatch {
                expected: format!("{k} x {v} anchor profiles"),
                actual: format!("{pr} x {pc}"),
            });
        }

        // Word marginals come from the unnormalized matrix; its row sums
        // estimate P(w). A zero marginal stays zero so an unseen word cannot
        // leak mass into any topic; only non-finite sums get the floor.
        let marginals: Vec<f64> = cooccurrence
            .row_sums()
            .iter()
            .map(|&m| if m.is_finite() { m } else { MARGINAL_FLOOR })
            .collect();

        let mut rows = cooccurrence.clone();
        rows.normalize_rows();
        let mut x = anchors.profiles.clone();
        x.normalize_rows();
        let gram = x.matmul(&x.transpose())?;

        let solver = ExponentiatedGradient::new(self.tolerance, self.max_iter);

        #[cfg(feature = "parallel")]
        let solves: Vec<SimplexSolve> = (0..v)
            .into_par_iter()
            .map(|w| solver.solve(&x, &gram, &rows.row(w)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let solves: Vec<SimplexSolve> = (0..v)
            .map(|w| solver.solve(&x, &gram, &rows.row(w)))
            .collect();

        let mut diagnostics = RecoveryDiagnostics::default();
        for solve in &solves {
            diagnostics.total_iterations += solve.iterations;
            diagnostics.max_word_iterations = diagnostics.max_word_iterations.max(solve.iterations);
            match solve.status {
                SolveStatus::Converged | SolveStatus::ZeroObjective => {
                    diagnostics.converged_words += 1;
                }
                SolveStatus::StepCollapsed => diagnostics.collapsed_words += 1,
                SolveStatus::MaxIterations => diagnostics.exhausted_words += 1,
                SolveStatus::NonFiniteFallback => diagnostics.fallback_words += 1,
            }
        }

        // Bayes flip: alpha[w][t] is P(t|w), so P(w) alpha[w][t] is
        // proportional to P(w|t). Column normalization finishes the job.
        let mut weighted = Matrix::zeros(v, k);
        for (w, solve) in solves.iter().enumerate() {
            for (t, &a) in solve.alpha.iter().enumerate() {
                weighted.set(w, t, marginals[w] * a);
            }
        }
        weighted.normalize_columns();

        Ok(RecoveredTopics {
            topic_word: weighted.transpose(),
            diagnostics,
        })
    }
}

impl Default for TopicRecoverer {
    fn default() -> Self {
        Self::new()
    }
}
