//! Anchor word selection.
//!
//! Picks K vocabulary words whose cooccurrence rows are geometrically
//! extreme, via a stabilized Gram-Schmidt farthest-point walk over the
//! row-normalized cooccurrence matrix (optionally after a sparse random
//! projection). The selected rows serve as the basis every other word is
//! expressed against during topic recovery.

mod projection;

pub(crate) use projection::random_projection;

use crate::corpus::Corpus;
use crate::error::{Result, TemarioError};
use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A selected anchor basis: K distinct vocabulary indices plus their K×V
/// profile rows copied from the original, unnormalized cooccurrence matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorSet {
    /// Selected vocabulary indices, in selection order.
    pub indices: Vec<usize>,
    /// K×V matrix whose row r is the original cooccurrence row of
    /// `indices[r]`.
    pub profiles: Matrix<f64>,
}

impl AnchorSet {
    /// Returns the number of anchors.
    #[must_use]
    pub fn k(&self) -> usize {
        self.indices.len()
    }
}

/// Selects anchor words from a cooccurrence matrix.
///
/// Candidate words may be restricted by document frequency: words appearing
/// in very few documents produce numerically eccentric anchor directions,
/// so real corpora should set a threshold. An optional random projection
/// reduces the walk's working dimensionality on large vocabularies.
///
/// # Examples
///
/// ```
/// use temario::anchors::AnchorSelector;
/// use temario::cooccurrence::build_cooccurrence;
/// use temario::corpus::Corpus;
///
/// let corpus = Corpus::from_documents(vec![
///     vec!["a", "b"],
///     vec!["b", "c"],
///     vec!["c", "d"],
/// ]);
/// let q = build_cooccurrence(&corpus);
/// let anchors = AnchorSelector::new(2).select(&q, &corpus).expect("enough candidates");
/// assert_eq!(anchors.indices, vec![0, 3]);
/// assert_eq!(anchors.profiles.shape(), (2, 4));
/// ```
#[derive(Debug, Clone)]
pub struct AnchorSelector {
    n_anchors: usize,
    doc_threshold: Option<usize>,
    projection_dim: Option<usize>,
    random_seed: u64,
}

impl AnchorSelector {
    /// Creates a selector for `n_anchors` anchors with no candidate filter
    /// and no projection.
    #[must_use]
    pub fn new(n_anchors: usize) -> Self {
        Self {
            n_anchors,
            doc_threshold: None,
            projection_dim: None,
            random_seed: 42,
        }
    }

    /// Restrict candidates to words appearing in strictly more than
    /// `threshold` documents.
    #[must_use]
    pub fn with_doc_threshold(mut self, threshold: usize) -> Self {
        self.doc_threshold = Some(threshold);
        self
    }

    /// Project candidate rows into `dim` dimensions before the walk.
    ///
    /// A dimension of 0 disables projection.
    #[must_use]
    pub fn with_projection_dim(mut self, dim: usize) -> Self {
        self.projection_dim = Some(dim);
        self
    }

    /// Set the seed for the projection's random matrix.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Selects anchors from `cooccurrence`, which must be the V×V matrix
    /// built from `corpus`.
    ///
    /// The walk runs on a row-normalized working copy; the returned
    /// profiles are copied from the original matrix so each anchor keeps
    /// its literal, interpretable cooccurrence row.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_anchors` is zero, if the matrix shape does
    /// not match the corpus vocabulary, or if fewer usable candidates than
    /// anchors survive filtering.
    pub fn select(&self, cooccurrence: &Matrix<f64>, corpus: &Corpus) -> Result<AnchorSet> {
        let v = corpus.vocab_size();
        if self.n_anchors == 0 {
            return Err(TemarioError::InvalidHyperparameter {
                param: "n_anchors".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        if cooccurrence.shape() != (v, v) {
            return Err(TemarioError::DimensionMismatch {
                expected: format!("{v}x{v} cooccurrence matrix"),
                actual: format!("{}x{}", cooccurrence.n_rows(), cooccurrence.n_cols()),
            });
        }

        let candidates = self.candidate_words(corpus);
        if candidates.len() < self.n_anchors {
            return Err(TemarioError::InsufficientAnchorCandidates {
                needed: self.n_anchors,
                available: candidates.len(),
            });
        }

        // Working copy only: the original matrix is still needed for anchor
        // profiles and, downstream, word marginals.
        let mut working = cooccurrence.clone();
        working.normalize_rows();
        if let Some(dim) = self.projection_dim.filter(|&d| d > 0) {
            let mut rng = StdRng::seed_from_u64(self.random_seed);
            working = random_projection(&working, dim, &mut rng);
        }

        let indices = farthest_point_walk(&mut working, &candidates, self.n_anchors)?;

        let mut profiles = Matrix::zeros(self.n_anchors, v);
        for (r, &w) in indices.iter().enumerate() {
            for c in 0..v {
                profiles.set(r, c, cooccurrence.get(w, c));
            }
        }

        Ok(AnchorSet { indices, profiles })
    }

    fn candidate_words(&self, corpus: &Corpus) -> Vec<usize> {
        match self.doc_threshold {
            None => (0..corpus.vocab_size()).collect(),
            Some(threshold) => corpus
                .document_frequencies()
                .iter()
                .enumerate()
                .filter(|&(_, &count)| count > threshold)
                .map(|(w, _)| w)
                .collect(),
        }
    }
}

/// Gram-Schmidt farthest-point walk over the working candidate rows.
///
/// Anchor 0 is the candidate farthest from the origin. All candidate rows
/// are then translated so that anchor becomes the new origin, and anchor 1
/// is the farthest row in the translated frame; its direction becomes the
/// first basis vector. Each later step removes from every candidate row its
/// component along the single most recent basis vector, then picks the
/// farthest remaining row. Removing one direction per step is equivalent to
/// incremental Gram-Schmidt against the full accumulated subspace but keeps
/// the cancellations small.
///
/// Rows are mutated in place, so `working` must be a scratch copy.
fn farthest_point_walk(
    working: &mut Matrix<f64>,
    candidates: &[usize],
    k: usize,
) -> Result<Vec<usize>> {
    let mut indices: Vec<usize> = Vec::with_capacity(k);

    let (first, _) = farthest(working, candidates, &indices)
        .ok_or_else(|| exhausted(k, 0))?;
    indices.push(first);
    if k == 1 {
        return Ok(indices);
    }

    // Translate every candidate row so the first anchor is the origin. The
    // origin must be copied out first because the loop also rewrites the
    // anchor's own row (to zero).
    let origin = working.row(first);
    for &w in candidates {
        for (x, o) in working.row_slice_mut(w).iter_mut().zip(origin.iter()) {
            *x -= o;
        }
    }

    let (second, dist) = farthest(working, candidates, &indices)
        .ok_or_else(|| exhausted(k, 1))?;
    indices.push(second);
    let mut basis = unit_direction(working.row_slice(second), dist);

    while indices.len() < k {
        for &w in candidates {
            let component = dot(working.row_slice(w), &basis);
            for (x, b) in working.row_slice_mut(w).iter_mut().zip(basis.iter()) {
                *x -= component * b;
            }
        }
        let found = indices.len();
        let (next, dist) = farthest(working, candidates, &indices)
            .ok_or_else(|| exhausted(k, found))?;
        indices.push(next);
        basis = unit_direction(working.row_slice(next), dist);
    }

    Ok(indices)
}

/// Returns the unchosen candidate with maximal squared row norm, requiring
/// a strictly positive norm so degenerate rows can never become anchors.
/// Ties keep the earliest candidate.
fn farthest(
    working: &Matrix<f64>,
    candidates: &[usize],
    chosen: &[usize],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for &w in candidates {
        if chosen.contains(&w) {
            continue;
        }
        let row = working.row_slice(w);
        let dist = dot(row, row);
        if dist > best.map_or(0.0, |(_, d)| d) {
            best = Some((w, dist));
        }
    }
    best
}

fn unit_direction(row: &[f64], norm_squared: f64) -> Vec<f64> {
    let inv = 1.0 / norm_squared.sqrt();
    row.iter().map(|x| x * inv).collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn exhausted(needed: usize, available: usize) -> TemarioError {
    TemarioError::InsufficientAnchorCandidates { needed, available }
}
