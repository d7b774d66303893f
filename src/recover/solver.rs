//! Simplex-constrained least squares via exponentiated gradient descent.
//!
//! Solves `min_alpha |X^T alpha - y|^2` subject to `alpha` lying on the
//! probability simplex (nonnegative, summing to one). Iterates live in log
//! space so the simplex constraint holds by construction, and the stepsize
//! adapts through a weak Wolfe line search: shrink on insufficient decrease,
//! grow when curvature says the step was too timid.

use serde::{Deserialize, Serialize};

use crate::primitives::{Matrix, Vector};

/// Armijo sufficient-decrease constant.
const C1: f64 = 1e-4;
/// Curvature constant for the growth test.
const C2: f64 = 0.75;

/// Why a per-word solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The duality gap fell below the tolerance.
    Converged,
    /// The objective reached exactly zero.
    ZeroObjective,
    /// Backtracking shrank the stepsize all the way to zero.
    StepCollapsed,
    /// The iteration budget ran out first.
    MaxIterations,
    /// Non-finite weights were replaced by the uniform distribution.
    NonFiniteFallback,
}

/// Ruling on one trial step of the line search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepDecision {
    /// Insufficient decrease: halve the stepsize, revert, retry.
    Shrink,
    /// Step was too timid: double the stepsize, revert, retry.
    Grow,
    /// Commit the trial point and advance the gradient.
    Accept,
}

impl StepDecision {
    /// Applies the two line-search tests in their fixed order: Armijo
    /// sufficient decrease (constant `C1`) first, then the curvature growth
    /// test (constant `C2`), which is suppressed on the iteration right
    /// after a shrink so the search cannot ping-pong between the two.
    ///
    /// `alignment` is the old gradient's inner product with the step taken,
    /// `new_alignment` the new gradient's with the same step. A NaN trial
    /// objective fails the decrease test and is backed out like any other
    /// bad step.
    fn for_trial(
        obj: f64,
        new_obj: f64,
        stepsize: f64,
        alignment: f64,
        new_alignment: f64,
        just_shrunk: bool,
    ) -> Self {
        if !(new_obj < obj + C1 * stepsize * alignment) {
            StepDecision::Shrink
        } else if !just_shrunk && new_alignment < C2 * alignment {
            StepDecision::Grow
        } else {
            StepDecision::Accept
        }
    }
}

/// Outcome of one simplex-constrained solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexSolve {
    /// Mixing weights on the simplex, one per basis row.
    pub alpha: Vec<f64>,
    /// How the iteration stopped.
    pub status: SolveStatus,
    /// Number of trial steps taken, counting rejected and regrown ones.
    pub iterations: usize,
    /// Final objective value `|X^T alpha - y|^2`.
    pub objective: f64,
}

/// Exponentiated gradient solver with an adaptive stepsize.
#[derive(Debug, Clone, Copy)]
pub struct ExponentiatedGradient {
    tolerance: f64,
    max_iter: usize,
}

impl ExponentiatedGradient {
    /// Creates a solver that stops once the duality gap drops below
    /// `tolerance` or after `max_iter` trial steps.
    #[must_use]
    pub fn new(tolerance: f64, max_iter: usize) -> Self {
        Self {
            tolerance,
            max_iter,
        }
    }

    /// Minimizes `|X^T alpha - y|^2` over the simplex.
    ///
    /// `x` holds the basis rows (K x V), `gram` is the precomputed `X X^T`
    /// (K x K, shared across calls so callers solving many targets against
    /// one basis pay for it once), and `y` is the target (length V).
    #[must_use]
    pub fn solve(&self, x: &Matrix<f64>, gram: &Matrix<f64>, y: &Vector<f64>) -> SimplexSolve {
        let k = x.n_rows();

        // The quadratic expands to alpha'G alpha - 2 alpha.(Xy) + y.y, so
        // only these two projections of the target are ever needed.
        let xy: Vec<f64> = (0..k).map(|t| dot(x.row_slice(t), y.as_slice())).collect();
        let yy = y.dot(y);

        let uniform = 1.0 / k as f64;
        let mut alpha = vec![uniform; k];
        let mut log_alpha = vec![uniform.ln(); k];

        let start = gram_product(gram, &alpha);
        let mut obj = objective_at(&start, &alpha, &xy, yy);
        let mut grad = gradient_at(&start, &xy);

        let mut gap = f64::INFINITY;
        let mut stepsize = 1.0_f64;
        let mut just_shrunk = false;
        let mut iterations = 0;

        let mut status = loop {
            if obj == 0.0 {
                break SolveStatus::ZeroObjective;
            }
            if gap < self.tolerance {
                break SolveStatus::Converged;
            }
            if stepsize == 0.0 {
                break SolveStatus::StepCollapsed;
            }
            if iterations >= self.max_iter {
                break SolveStatus::MaxIterations;
            }
            iterations += 1;

            // Multiplicative update in log space, renormalized onto the
            // simplex through a max-shifted log-sum-exp.
            let mut new_log: Vec<f64> = log_alpha
                .iter()
                .zip(&grad)
                .map(|(&l, &g)| l - stepsize * g)
                .collect();
            let shift = log_sum_exp(&new_log);
            for l in &mut new_log {
                *l -= shift;
            }
            let new_alpha: Vec<f64> = new_log.iter().map(|&l| l.exp()).collect();

            let delta: Vec<f64> = new_alpha.iter().zip(&alpha).map(|(&n, &o)| n - o).collect();
            let alignment = dot(&grad, &delta);

            let trial = gram_product(gram, &new_alpha);
            let new_obj = objective_at(&trial, &new_alpha, &xy, yy);
            let new_grad = gradient_at(&trial, &xy);
            let new_alignment = dot(&new_grad, &delta);

            match StepDecision::for_trial(obj, new_obj, stepsize, alignment, new_alignment, just_shrunk) {
                StepDecision::Shrink => {
                    stepsize *= 0.5;
                    just_shrunk = true;
                }
                StepDecision::Grow => {
                    stepsize *= 2.0;
                }
                StepDecision::Accept => {
                    alpha = new_alpha;
                    log_alpha = new_log;
                    grad = new_grad;
                    obj = new_obj;
                    just_shrunk = false;
                    gap = duality_gap(&alpha, &grad);
                }
            }
        };

        if alpha.iter().any(|a| !a.is_finite()) {
            alpha = vec![uniform; k];
            let fallback = gram_product(gram, &alpha);
            obj = objective_at(&fallback, &alpha, &xy, yy);
            status = SolveStatus::NonFiniteFallback;
        }

        SimplexSolve {
            alpha,
            status,
            iterations,
            objective: obj,
        }
    }
}

/// `G alpha`, shared between the objective and gradient at one point.
fn gram_product(gram: &Matrix<f64>, alpha: &[f64]) -> Vec<f64> {
    let k = alpha.len();
    (0..k)
        .map(|t| dot(gram.row_slice(t), alpha))
        .collect()
}

fn objective_at(g_alpha: &[f64], alpha: &[f64], xy: &[f64], yy: f64) -> f64 {
    dot(g_alpha, alpha) - 2.0 * dot(alpha, xy) + yy
}

fn gradient_at(g_alpha: &[f64], xy: &[f64]) -> Vec<f64> {
    g_alpha
        .iter()
        .zip(xy)
        .map(|(&ga, &p)| 2.0 * (ga - p))
        .collect()
}

/// `log sum exp(values)` with the max shifted out first so large magnitudes
/// cannot overflow. All-(-inf) input returns -inf rather than NaN.
fn log_sum_exp(values: &[f64]) -> f64 {
    let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !peak.is_finite() {
        return peak;
    }
    let sum: f64 = values.iter().map(|&v| (v - peak).exp()).sum();
    peak + sum.ln()
}

/// Duality gap for the simplex-constrained quadratic. Zero exactly at the
/// constrained optimum, and an upper bound on the objective suboptimality.
fn duality_gap(alpha: &[f64], grad: &[f64]) -> f64 {
    let lowest = grad.iter().copied().fold(f64::INFINITY, f64::min);
    alpha.iter().zip(grad).map(|(&a, &g)| a * (g - lowest)).sum()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
