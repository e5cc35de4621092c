//! Solving small simultaneous equations via Gaussian elimination.
//!
//! Used by the linear gradient to find the slope/intercept pair that maps
//! the polygon's projection extremes onto `0..=1`.

/// Pivots with magnitude at or below this are treated as zero.
pub const PIVOT_EPSILON: f64 = 1e-12;

// ============================================================================
// Simultaneous equation solver
// ============================================================================

/// Solve `left * x = right` for `x`.
///
/// Gaussian elimination with partial pivoting. Returns `None` if the matrix
/// is singular, i.e. the best available pivot in some column is within
/// [`PIVOT_EPSILON`] of zero.
#[allow(clippy::needless_range_loop)]
pub fn simul_eq_solve<const SIZE: usize>(
    left: &[[f64; SIZE]; SIZE],
    right: &[f64; SIZE],
) -> Option<[f64; SIZE]> {
    let mut a = *left;
    let mut b = *right;

    // Forward elimination with partial pivoting
    for k in 0..SIZE {
        let mut pivot_row = k;
        let mut max_val = a[k][k].abs();
        for i in (k + 1)..SIZE {
            let v = a[i][k].abs();
            if v > max_val {
                max_val = v;
                pivot_row = i;
            }
        }
        if max_val.is_nan() || max_val <= PIVOT_EPSILON {
            return None;
        }
        if pivot_row != k {
            a.swap(pivot_row, k);
            b.swap(pivot_row, k);
        }

        let p = a[k][k];
        for j in k..SIZE {
            a[k][j] /= p;
        }
        b[k] /= p;

        for i in (k + 1)..SIZE {
            let f = a[i][k];
            for j in k..SIZE {
                a[i][j] -= f * a[k][j];
            }
            b[i] -= f * b[k];
        }
    }

    // Back substitution
    let mut x = [0.0; SIZE];
    for m in (0..SIZE).rev() {
        let mut v = b[m];
        for j in (m + 1)..SIZE {
            v -= a[m][j] * x[j];
        }
        x[m] = v;
    }
    Some(x)
}

// ============================================================================
// Tests
// ============================================================================
