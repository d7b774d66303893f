// =========================================================================
// FALSIFY-VE: Vector primitives contract (temario primitives)
//
// References:
//   - Cauchy-Schwarz inequality: |dot(u,v)| <= norm(u) * norm(v)
// =========================================================================

use super::*;

/// FALSIFY-VE-001: Dot product is commutative: dot(u,v) = dot(v,u)
#[test]
fn falsify_ve_001_dot_commutative() {
    let u = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let v = Vector::from_slice(&[4.0, 5.0, 6.0]);

    let uv = u.dot(&v);
    let vu = v.dot(&u);

    assert!(
        (uv - vu).abs() < 1e-12,
        "FALSIFIED VE-001: dot(u,v)={uv} != dot(v,u)={vu}"
    );
}

/// FALSIFY-VE-002: Norm is non-negative
#[test]
fn falsify_ve_002_norm_nonneg() {
    let v = Vector::from_slice(&[-3.0, 4.0]);
    let n = v.norm();

    assert!(n >= 0.0, "FALSIFIED VE-002: norm={n}, expected >= 0.0");
    assert!(
        (n - 5.0).abs() < 1e-12,
        "FALSIFIED VE-002: norm of [-3,4]={n}, expected 5.0"
    );
}

/// FALSIFY-VE-003: Cauchy-Schwarz: |dot(u,v)| <= norm(u) * norm(v)
#[test]
fn falsify_ve_003_cauchy_schwarz() {
    let u = Vector::from_slice(&[1.0, -2.0, 3.0, 0.5]);
    let v = Vector::from_slice(&[4.0, 0.0, -1.0, 2.0]);

    let dot = u.dot(&v).abs();
    let bound = u.norm() * v.norm();

    assert!(
        dot <= bound + 1e-9,
        "FALSIFIED VE-003: |dot|={dot} > norm(u)*norm(v)={bound}"
    );
}

/// FALSIFY-VE-004: Squared norm equals self dot product
#[test]
fn falsify_ve_004_norm_squared_is_self_dot() {
    let v = Vector::from_slice(&[2.0, -4.0, 6.0, 0.5]);

    let squared = v.norm_squared();
    let self_dot = v.dot(&v);

    assert!(
        (squared - self_dot).abs() < 1e-12,
        "FALSIFIED VE-004: norm_squared={squared}, expected dot(v,v)={self_dot}"
    );
    assert!(
        (v.norm() * v.norm() - squared).abs() < 1e-9,
        "FALSIFIED VE-004: norm^2={} != norm_squared={squared}",
        v.norm() * v.norm()
    );
}

/// FALSIFY-VE-005: Self subtraction yields the zero vector: v - v = 0
#[test]
fn falsify_ve_005_self_subtraction_is_zero() {
    let v = Vector::from_slice(&[1.5, -2.5, 0.0, 7.0]);
    let diff = &v - &v;

    assert!(
        diff.iter().all(|&x| x == 0.0),
        "FALSIFIED VE-005: v - v = {:?}, expected all zeros",
        diff.as_slice()
    );
    assert_eq!(diff.len(), v.len(), "FALSIFIED VE-005: length changed");
}
