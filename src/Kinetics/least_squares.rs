//! Linear least squares solver shared by all the fitting routines.
//!
//! Solves `minimize |X β - y|^2` through the SVD of the column-equilibrated
//! design matrix. Columns are scaled to unit norm first: the Arrhenius
//! regressor `-1/(R T)` is four orders of magnitude smaller than the
//! intercept column, and an absolute singular value cutoff would otherwise
//! discard it.
use super::kinetics_error::KineticsError;
use nalgebra::{DMatrix, DVector};

/// Singular values below `RELATIVE_CUTOFF * σ_max` are treated as zero.
const RELATIVE_CUTOFF: f64 = 1e-12;

/// Solve a linear least squares problem using SVD.
///
/// Fails if the system has fewer equations than unknowns or if the design
/// matrix is rank deficient (e.g. all temperatures equal).
pub fn solve_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
) -> Result<DVector<f64>, KineticsError> {
    let (nrows, ncols) = x.shape();
    if nrows != y.len() {
        return Err(KineticsError::InvalidInput(format!(
            "design matrix has {} rows but right-hand side has {} entries",
            nrows,
            y.len()
        )));
    }
    if ncols == 0 || nrows < ncols {
        return Err(KineticsError::InvalidInput(format!(
            "under-determined system: {} equations for {} unknowns",
            nrows, ncols
        )));
    }

    let norms: Vec<f64> = x.column_iter().map(|c| c.norm()).collect();
    if let Some(j) = norms.iter().position(|&s| !(s > 0.0) || !s.is_finite()) {
        return Err(KineticsError::SingularSystem(format!(
            "column {} of the design matrix is zero or not finite",
            j
        )));
    }
    let mut scaled = x.clone();
    for (j, mut column) in scaled.column_iter_mut().enumerate() {
        column /= norms[j];
    }

    let svd = scaled.svd(true, true);
    let sigma_max = svd.singular_values.max();
    let tol = sigma_max * RELATIVE_CUTOFF;
    let rank = svd.singular_values.iter().filter(|&&s| s > tol).count();
    if rank < ncols {
        return Err(KineticsError::SingularSystem(format!(
            "design matrix has rank {} but {} unknowns",
            rank, ncols
        )));
    }

    let mut beta = svd
        .solve(y, tol)
        .map_err(|e| KineticsError::SingularSystem(e.to_string()))?;
    for (j, b) in beta.iter_mut().enumerate() {
        *b /= norms[j];
    }
    if beta.iter().any(|v| !v.is_finite()) {
        return Err(KineticsError::SingularSystem(
            "least-squares solution is not finite".to_string(),
        ));
    }
    Ok(beta)
}

/// Residual `y - X β` of a fitted linear model.
pub fn residual(x: &DMatrix<f64>, y: &DVector<f64>, beta: &DVector<f64>) -> DVector<f64> {
    y - x * beta
}
