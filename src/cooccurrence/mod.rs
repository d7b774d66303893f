//! Word cooccurrence statistics.
//!
//! Turns a tokenized corpus into the dense V×V matrix the anchor selector
//! and topic recoverer operate on.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::corpus::Corpus;
use crate::primitives::Matrix;

/// Builds the symmetric V×V word cooccurrence matrix for a corpus.
///
/// Each document with n ≥ 2 tokens spreads a total mass of exactly 1 over
/// its ordered pairs of distinct token positions: every pair contributes
/// `1 / (n * (n - 1))` to `Q[t_p][t_q]`. Pairing is over positions, not
/// types, so repeated words contribute multiple times and a repeated type
/// adds mass on the diagonal. The accumulated matrix is averaged over the
/// documents that contributed, which makes documents of length 0 or 1
/// invisible to the estimate.
///
/// `Q[i][j]` estimates the probability of drawing the word pair (i, j) from
/// a uniformly chosen document; the matrix is symmetric by construction and
/// its entries sum to 1 whenever at least one document contributed.
///
/// # Examples
///
/// ```
/// use temario::cooccurrence::build_cooccurrence;
/// use temario::corpus::Corpus;
///
/// let corpus = Corpus::from_documents(vec![
///     vec!["a", "b"],
///     vec!["b", "c"],
///     vec!["c", "d"],
/// ]);
/// let q = build_cooccurrence(&corpus);
/// assert_eq!(q.shape(), (4, 4));
/// assert!((q.get(0, 1) - 1.0 / 6.0).abs() < 1e-12);
/// assert!((q.get(1, 0) - q.get(0, 1)).abs() < 1e-12);
/// ```
#[must_use]
pub fn build_cooccurrence(corpus: &Corpus) -> Matrix<f64> {
    let v = corpus.vocab_size();
    let documents = corpus.documents();

    #[cfg(feature = "parallel")]
    let mut data: Vec<f64> = {
        let chunk = (documents.len() / rayon::current_num_threads().max(1)).max(1);
        let partials: Vec<Vec<f64>> = documents
            .par_chunks(chunk)
            .map(|block| {
                let mut acc = vec![0.0; v * v];
                for doc in block {
                    accumulate_document(&mut acc, v, doc);
                }
                acc
            })
            .collect();

        // Reduce partial accumulations
        let mut data = vec![0.0; v * v];
        for partial in partials {
            for (x, p) in data.iter_mut().zip(partial) {
                *x += p;
            }
        }
        data
    };

    #[cfg(not(feature = "parallel"))]
    let mut data: Vec<f64> = {
        let mut acc = vec![0.0; v * v];
        for doc in documents {
            accumulate_document(&mut acc, v, doc);
        }
        acc
    };

    let contributing = documents.iter().filter(|doc| doc.len() > 1).count();
    if contributing > 0 {
        let scale = 1.0 / contributing as f64;
        for x in &mut data {
            *x *= scale;
        }
    }

    Matrix::from_vec(v, v, data).expect("accumulation buffer is v * v by construction")
}

/// Adds one document's pair mass into a flat V×V accumulator.
fn accumulate_document(acc: &mut [f64], v: usize, tokens: &[usize]) {
    let n = tokens.len();
    if n < 2 {
        return;
    }
    let weight = 1.0 / (n as f64 * (n - 1) as f64);
    for (p, &a) in tokens.iter().enumerate() {
        for (q, &b) in tokens.iter().enumerate() {
            if p != q {
                acc[a * v + b] += weight;
            }
        }
    }
}

#[cfg(test)]
mod tests;
