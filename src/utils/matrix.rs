//! Matrix utility functions.

use faer::{Col, Mat, MatRef};

/// Euclidean norm of every column.
pub fn column_norms(x: &Mat<f64>) -> Vec<f64> {
    (0..x.ncols())
        .map(|j| (0..x.nrows()).map(|i| x[(i, j)].powi(2)).sum::<f64>().sqrt())
        .collect()
}

/// Solve `R * b = rhs` for the leading `size × size` block of an upper
/// triangular `R`.
pub fn back_substitute(r: MatRef<'_, f64>, rhs: &Col<f64>, size: usize) -> Col<f64> {
    let mut b = Col::zeros(size);
    for i in (0..size).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..size {
            sum -= r[(i, j)] * b[j];
        }
        b[i] = sum / r[(i, i)];
    }
    b
}

/// Invert the leading `size × size` block of an upper triangular `R`.
///
/// Solves `R * X = I` column by column; the result is upper triangular.
pub fn upper_triangular_inverse(r: MatRef<'_, f64>, size: usize) -> Mat<f64> {
    let mut inv = Mat::zeros(size, size);
    for col in 0..size {
        for i in (0..=col).rev() {
            let mut sum = if i == col { 1.0 } else { 0.0 };
            for j in (i + 1)..=col {
                sum -= r[(i, j)] * inv[(j, col)];
            }
            inv[(i, col)] = sum / r[(i, i)];
        }
    }
    inv
}

/// Compute `A * Aᵀ` for a square matrix.
///
/// With `A = R⁻¹` this yields `(X'X)⁻¹ = R⁻¹R⁻ᵀ`.
pub fn outer_gram(a: &Mat<f64>) -> Mat<f64> {
    let n = a.nrows();
    let k = a.ncols();
    Mat::from_fn(n, n, |i, j| (0..k).map(|l| a[(i, l)] * a[(j, l)]).sum())
}

/// Center a vector by subtracting the mean.
pub fn center_vector(y: &Col<f64>) -> (Col<f64>, f64) {
    let n = y.nrows();
    let mean: f64 = y.iter().sum::<f64>() / n as f64;

    let centered = Col::from_fn(n, |i| y[i] - mean);

    (centered, mean)
}
