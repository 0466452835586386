use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt<T> {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// # use nflux_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_min(), Ok(0.5));
    /// assert_eq!([1.1, f64::MIN, 2.2].try_min(), Ok(f64::MIN));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!([1.1, f64::INFINITY, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// The float primitives do not implement `Ord` due to `NaN` being
    /// incomparable, so `total_cmp` is used to order the valid values.
    fn try_min(&self) -> Result<T>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// # use nflux_utils::Error;
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([1.1, f64::NAN, 2.2].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_max(), Err(Error::SliceContainsNoValues));
    /// ```
    fn try_max(&self) -> Result<T>;

    /// Find index bin containing 'value', where bins are low < value <= high
    ///
    /// A value on a bin edge returns the bin below. Values equal to the lowest
    /// bound are considered part of the first bin.
    ///
    /// This is the same convention used for the spectrum regions, where the
    /// boundary energy always belongs to the lower region.
    ///
    /// ```text
    ///     0.0 <= bin 0 <= 0.1
    ///     0.1 <  bin 1 <= 1.0
    ///     1.0 <  bin 2 <= 20.0
    /// ```
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// let bounds = vec![0.0, 0.1, 1.0, 20.0];
    ///
    /// // Find values in the array
    /// assert_eq!(bounds.find_bin_inclusive(0.0 ), Ok(0));
    /// assert_eq!(bounds.find_bin_inclusive(0.5 ), Ok(1));
    /// assert_eq!(bounds.find_bin_inclusive(1.0 ), Ok(1));
    /// assert_eq!(bounds.find_bin_inclusive(20.0), Ok(2));
    ///
    /// // Values outside the bin bounds are an error case
    /// assert!(bounds.find_bin_inclusive(-1.0).is_err());
    /// assert!(bounds.find_bin_inclusive(21.0).is_err());
    /// ```
    fn find_bin_inclusive(&self, value: T) -> Result<usize>;

    /// Check every value is finite and strictly larger than the one before
    ///
    /// Returns the index of the first value that breaks the ordering, or
    /// `None` if the whole slice is strictly increasing.
    ///
    /// ```rust
    /// # use nflux_utils::SliceExt;
    /// assert_eq!([1.0, 2.0, 3.0].first_unordered(), None);
    /// assert_eq!([1.0, 2.0, 2.0].first_unordered(), Some(2));
    /// assert_eq!([1.0, f64::NAN].first_unordered(), Some(1));
    /// ```
    fn first_unordered(&self) -> Option<usize>;
}

impl SliceExt<f64> for [f64] {
    fn try_min(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .min_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .max_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn find_bin_inclusive(&self, value: f64) -> Result<usize> {
        // make sure there are bin edges to check against
        let (lower_bound, upper_bound) = match (self.first(), self.last()) {
            (Some(lo), Some(hi)) if self.len() >= 2 => (*lo, *hi),
            _ => {
                return Err(Error::BelowMinimumSliceLength {
                    length: self.len(),
                    minimum_required: 2,
                })
            }
        };

        // is the value relevant?
        if !(lower_bound..=upper_bound).contains(&value) {
            return Err(Error::ValueOutsideOfBounds {
                value,
                lower_bound,
                upper_bound,
            });
        }

        // special case for being on the lowest edge
        if value == lower_bound {
            return Ok(0);
        }

        // first edge that is >= value closes the bin, range INCLUSIVE of upper
        let upper_edge = self.partition_point(|edge| *edge < value);
        Ok(upper_edge - 1)
    }

    fn first_unordered(&self) -> Option<usize> {
        if let Some(first) = self.first() {
            if !first.is_finite() {
                return Some(0);
            }
        }

        self.windows(2)
            .position(|pair| !pair[1].is_finite() || pair[1] <= pair[0])
            .map(|i| i + 1)
    }
}
