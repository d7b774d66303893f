//! Core compute primitives (Vector, Matrix).
//!
//! These types provide the dense storage and the handful of linear-algebra
//! operations the recovery pipeline is built on.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
