//! Sparse random projection for anchor candidate rows.

use crate::primitives::Matrix;
use rand::rngs::StdRng;
use rand::Rng;

/// Projects the rows of `a` into `dim` dimensions with a sparse
/// variance-preserving random map.
///
/// The projection matrix R has independent entries drawn as +√3 with
/// probability 1/6, -√3 with probability 1/6, and 0 otherwise, which
/// preserves pairwise distances in expectation while keeping R two-thirds
/// zeros.
pub(crate) fn random_projection(a: &Matrix<f64>, dim: usize, rng: &mut StdRng) -> Matrix<f64> {
    let cols = a.n_cols();
    let root3 = 3.0_f64.sqrt();

    let mut entries = vec![0.0; cols * dim];
    for x in &mut entries {
        let p: f64 = rng.gen();
        if p < 1.0 / 6.0 {
            *x = root3;
        } else if p < 1.0 / 3.0 {
            *x = -root3;
        }
    }

    let r = Matrix::from_vec(cols, dim, entries).expect("projection buffer is cols * dim");
    a.matmul(&r).expect("projection dimensions agree by construction")
}
