// =========================================================================
// FALSIFY-MX: Matrix primitives contract (temario primitives)
//
// Each test names the algebraic law it would falsify. The stochastic
// normalization contracts (MX-005/006) are the ones the recovery pipeline
// leans on hardest.
//
// References:
//   - Golub & Van Loan (2013) "Matrix Computations"
// =========================================================================

use super::*;

/// FALSIFY-MX-001: Transpose involution: (A^T)^T = A
#[test]
fn falsify_mx_001_transpose_involution() {
    let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    let att = a.transpose().transpose();

    assert_eq!(att.shape(), a.shape(), "FALSIFIED MX-001: shape mismatch");
    for i in 0..2 {
        for j in 0..3 {
            assert!(
                (att.get(i, j) - a.get(i, j)).abs() < 1e-12,
                "FALSIFIED MX-001: (A^T)^T[{i},{j}] != A[{i},{j}]"
            );
        }
    }
}

/// FALSIFY-MX-002: Transpose swaps shape: (m×n)^T = (n×m)
#[test]
fn falsify_mx_002_transpose_swaps_shape() {
    let a = Matrix::from_vec(3, 5, vec![0.0; 15]).expect("valid");
    let at = a.transpose();

    assert_eq!(
        at.shape(),
        (5, 3),
        "FALSIFIED MX-002: transpose shape={:?}, expected (5,3)",
        at.shape()
    );
}

/// FALSIFY-MX-003: Matmul shape: (m×k) * (k×n) = (m×n)
#[test]
fn falsify_mx_003_matmul_shape() {
    let a = Matrix::from_vec(2, 3, vec![1.0; 6]).expect("valid");
    let b = Matrix::from_vec(3, 4, vec![1.0; 12]).expect("valid");
    let c = a.matmul(&b).expect("compatible dims");

    assert_eq!(
        c.shape(),
        (2, 4),
        "FALSIFIED MX-003: (2x3)*(3x4) shape={:?}, expected (2,4)",
        c.shape()
    );
}

/// FALSIFY-MX-004: Identity matmul: A * I = A
#[test]
fn falsify_mx_004_identity_matmul() {
    let a =
        Matrix::from_vec(3, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).expect("valid");
    let eye = Matrix::eye(3);
    let result = a.matmul(&eye).expect("compatible dims");

    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (result.get(i, j) - a.get(i, j)).abs() < 1e-12,
                "FALSIFIED MX-004: (A*I)[{i},{j}]={} != A[{i},{j}]={}",
                result.get(i, j),
                a.get(i, j)
            );
        }
    }
}

/// FALSIFY-MX-005: Row normalization: every row sums to 1 or stays all-zero
#[test]
fn falsify_mx_005_row_normalization_stochastic() {
    let mut a = Matrix::from_vec(3, 3, vec![2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.5, 0.5, 3.0])
        .expect("valid");
    a.normalize_rows();

    for i in [0, 2] {
        let sum: f64 = a.row_slice(i).iter().sum();
        assert!(
            (sum - 1.0).abs() < 1e-12,
            "FALSIFIED MX-005: row {i} sums to {sum}, expected 1"
        );
    }
    assert!(
        a.row_slice(1).iter().all(|&x| x == 0.0),
        "FALSIFIED MX-005: zero row was rescaled"
    );
}

/// FALSIFY-MX-006: Column normalization: every column sums to 1 or stays all-zero
#[test]
fn falsify_mx_006_column_normalization_stochastic() {
    let mut a = Matrix::from_vec(3, 3, vec![2.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 3.0])
        .expect("valid");
    a.normalize_columns();

    for j in [0, 2] {
        let sum: f64 = (0..3).map(|i| a.get(i, j)).sum();
        assert!(
            (sum - 1.0).abs() < 1e-12,
            "FALSIFIED MX-006: column {j} sums to {sum}, expected 1"
        );
    }
    assert!(
        (0..3).all(|i| a.get(i, 1) == 0.0),
        "FALSIFIED MX-006: zero column was rescaled"
    );
}

mod matrix_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    /// FALSIFY-MX-001-prop: Transpose involution for random matrices
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        #[test]
        fn falsify_mx_001_prop_transpose_involution(
            rows in 1..=8usize,
            cols in 1..=8usize,
            seed in 0..500u32,
        ) {
            let data: Vec<f64> = (0..rows * cols)
                .map(|i| ((i as f64 + f64::from(seed)) * 0.37).sin() * 10.0)
                .collect();
            let a = Matrix::from_vec(rows, cols, data).expect("valid");
            let att = a.transpose().transpose();

            prop_assert_eq!(att.shape(), a.shape(), "FALSIFIED MX-001-prop: shape mismatch");
            for i in 0..rows {
                for j in 0..cols {
                    prop_assert!(
                        (att.get(i, j) - a.get(i, j)).abs() < 1e-12,
                        "FALSIFIED MX-001-prop: (A^T)^T[{},{}] != A[{},{}]",
                        i, j, i, j
                    );
                }
            }
        }
    }

    /// FALSIFY-MX-005-prop: Row normalization is stochastic for random
    /// non-negative matrices
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        #[test]
        fn falsify_mx_005_prop_row_normalization(
            rows in 1..=8usize,
            cols in 1..=8usize,
            seed in 0..500u32,
        ) {
            let data: Vec<f64> = (0..rows * cols)
                .map(|i| (((i as f64 + f64::from(seed)) * 0.37).sin() * 10.0).abs())
                .collect();
            let mut a = Matrix::from_vec(rows, cols, data).expect("valid");
            a.normalize_rows();

            for i in 0..rows {
                let sum: f64 = a.row_slice(i).iter().sum();
                prop_assert!(
                    (sum - 1.0).abs() < 1e-9 || sum == 0.0,
                    "FALSIFIED MX-005-prop: row {} sums to {}",
                    i, sum
                );
            }
        }
    }
}
