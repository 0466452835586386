use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// The default is not very consistent for scientific in particular, so this
    /// gives a fixed mantissa precision and a signed, zero-padded exponent.
    ///
    /// ```rust
    /// # use nflux_utils::ValueExt;
    /// assert_eq!((-1.0).sci(5, 2), "-1.00000e+00".to_string());
    /// assert_eq!((2.5e-7).sci(3, 2), "2.500e-07".to_string());
    /// assert_eq!((1.0e12).sci(2, 3), "1.00e+012".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let raw = f!("{:.precision$e}", self);

        // non-finite values have no exponent to fix up
        let Some((mantissa, exponent)) = raw.split_once('e') else {
            return raw;
        };

        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };

        f!("{mantissa}e{sign}{digits:0>exp_pad$}")
    }
}
