//! Grids and interpolation for tabulated curves

use crate::error::{Error, Result};
use crate::slice_ext::SliceExt;

/// Logarithmically spaced values between `lower` and `upper` inclusive
///
/// Both bounds must be finite and positive with `lower < upper`, and at least
/// two points are required. The end points are set exactly rather than
/// recovered through `powf` so that tables always hit their bounds.
///
/// ```rust
/// # use nflux_utils::logspace;
/// let grid = logspace(1e-2, 1e2, 5).unwrap();
/// assert_eq!(grid.len(), 5);
/// assert_eq!(grid[0], 1e-2);
/// assert!((grid[2] - 1.0).abs() < 1e-12);
/// assert_eq!(grid[4], 1e2);
/// ```
pub fn logspace(lower: f64, upper: f64, points: usize) -> Result<Vec<f64>> {
    if points < 2 {
        return Err(Error::BelowMinimumSliceLength {
            length: points,
            minimum_required: 2,
        });
    }

    if !(lower.is_finite() && upper.is_finite() && lower > 0.0 && lower < upper) {
        return Err(Error::InvalidGridBounds { lower, upper });
    }

    let (log_lo, log_hi) = (lower.log10(), upper.log10());
    let step = (log_hi - log_lo) / (points - 1) as f64;

    let mut grid: Vec<f64> = (0..points)
        .map(|i| 10f64.powf(log_lo + step * i as f64))
        .collect();

    grid[0] = lower;
    grid[points - 1] = upper;
    Ok(grid)
}

/// Linear interpolation of `ys` at `x` over the ascending table `xs`
///
/// The table must be strictly increasing in `xs`, and `x` must lie within the
/// tabulated range. Extrapolation is never performed.
///
/// ```rust
/// # use nflux_utils::interpolate;
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 10.0, 30.0];
/// assert_eq!(interpolate(0.5, &xs, &ys), Ok(5.0));
/// assert_eq!(interpolate(2.0, &xs, &ys), Ok(30.0));
/// assert!(interpolate(2.5, &xs, &ys).is_err());
/// ```
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64> {
    if xs.len() != ys.len() {
        return Err(Error::MismatchedLengths {
            left: xs.len(),
            right: ys.len(),
        });
    }

    if xs.first_unordered().is_some() {
        return Err(Error::SliceContainsUndefinedValues);
    }

    // bin i is xs[i] < x <= xs[i+1], or the first bin on the lowest edge
    let i = xs.find_bin_inclusive(x)?;
    let (x0, x1) = (xs[i], xs[i + 1]);
    let (y0, y1) = (ys[i], ys[i + 1]);

    Ok(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logspace_is_geometric() {
        let grid = logspace(1.0, 1e4, 5).unwrap();
        for (i, pair) in grid.windows(2).enumerate() {
            let factor = pair[1] / pair[0];
            assert!((factor - 10.0).abs() < 1e-9, "step {i} has factor {factor}");
        }
    }

    #[test]
    fn logspace_rejects_bad_bounds() {
        assert!(logspace(0.0, 1.0, 10).is_err());
        assert!(logspace(1.0, 1.0, 10).is_err());
        assert!(logspace(-1.0, 1.0, 10).is_err());
        assert!(logspace(1.0, 10.0, 1).is_err());
    }

    #[test]
    fn interpolate_needs_ordered_table() {
        assert_eq!(
            interpolate(1.5, &[1.0, 3.0, 2.0], &[0.0, 1.0, 2.0]),
            Err(Error::SliceContainsUndefinedValues)
        );
        assert_eq!(
            interpolate(1.5, &[1.0, 2.0], &[0.0]),
            Err(Error::MismatchedLengths { left: 2, right: 1 })
        );
    }

    #[test]
    fn interpolate_on_lower_edge() {
        assert_eq!(interpolate(1.0, &[1.0, 2.0], &[4.0, 8.0]), Ok(4.0));
    }
}
