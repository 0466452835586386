//! Thermal to non-thermal flux balance for a trial cutoff

// crate modules
use crate::config::SpectrumConfig;
use crate::constants::MAXWELLIAN_UNDERFLOW_KT;
use crate::error::{Error, Result};
use crate::quadrature::Quadrature;
use crate::shape::{ChiSpectrum, Epithermal, Maxwellian, Shape};

// external crates
use log::trace;

/// Region integrals implied by a trial thermal cutoff
///
/// The scale factors are the continuity conditions at the cutoff and at the
/// fast boundary, with the thermal scale fixed at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceTerms {
    /// Trial thermal cutoff (eV)
    pub cutoff: f64,
    /// Epithermal scale factor, `M(e1) / F(e1)`
    pub scale_epithermal: f64,
    /// Fast scale factor, `scale_epithermal * F(e2) / Chi(e2)`
    pub scale_fast: f64,
    /// Maxwellian flux integrated over `[0, e1]`
    pub thermal: f64,
    /// Scaled 1/E flux integrated over `[e1, e2]`
    pub epithermal: f64,
    /// Scaled chi flux integrated over `[e2, upper_fast_bound]`
    pub fast: f64,
}

impl BalanceTerms {
    /// Total flux above the cutoff
    pub fn non_thermal(&self) -> f64 {
        self.epithermal + self.fast
    }

    /// Ratio of thermal to non-thermal flux
    pub fn ratio(&self) -> f64 {
        self.thermal / self.non_thermal()
    }
}

/// Evaluates the flux balance for any trial cutoff at a fixed temperature
///
/// Holds the three shapes, the fixed region bounds, and the integrator. The
/// chi integral over the fast region does not depend on the cutoff, so it is
/// computed once on construction.
#[derive(Debug, Clone)]
pub struct Balance {
    maxwellian: Maxwellian,
    epithermal: Epithermal,
    chi: ChiSpectrum,
    fast_boundary: f64,
    upper_fast_bound: f64,
    quadrature: Quadrature,
    fast_integral: f64,
}

impl Balance {
    /// Set up the balance for a neutron temperature (K)
    pub fn new(temperature: f64, config: &SpectrumConfig) -> Result<Self> {
        config.validate()?;

        let maxwellian = Maxwellian::new(temperature)?;
        let chi = ChiSpectrum::default();
        let quadrature = Quadrature::new(config.quadrature);

        let fast_integral = quadrature
            .integrate(
                |e| chi.value(e),
                config.fast_boundary,
                config.upper_fast_bound,
            )?
            .value;

        Ok(Self {
            maxwellian,
            epithermal: Epithermal,
            chi,
            fast_boundary: config.fast_boundary,
            upper_fast_bound: config.upper_fast_bound,
            quadrature,
            fast_integral,
        })
    }

    /// Thermal region shape
    pub fn maxwellian(&self) -> &Maxwellian {
        &self.maxwellian
    }

    /// Epithermal region shape
    pub fn epithermal(&self) -> &Epithermal {
        &self.epithermal
    }

    /// Fast region shape
    pub fn chi(&self) -> &ChiSpectrum {
        &self.chi
    }

    /// Lower edge of the fast region (eV)
    pub fn fast_boundary(&self) -> f64 {
        self.fast_boundary
    }

    /// Upper limit of the fast region integral (eV)
    pub fn upper_fast_bound(&self) -> f64 {
        self.upper_fast_bound
    }

    /// Continuity scale factors `(epithermal, fast)` for a cutoff
    pub fn scale_factors(&self, cutoff: f64) -> Result<(f64, f64)> {
        self.check_domain(cutoff)?;

        let e2 = self.fast_boundary;
        let scale_epithermal = self.maxwellian.value(cutoff) / self.epithermal.value(cutoff);
        let scale_fast = scale_epithermal * self.epithermal.value(e2) / self.chi.value(e2);

        Ok((scale_epithermal, scale_fast))
    }

    /// All region integrals and scale factors for a cutoff
    pub fn terms(&self, cutoff: f64) -> Result<BalanceTerms> {
        let (scale_epithermal, scale_fast) = self.scale_factors(cutoff)?;

        // nothing above the underflow point contributes to the thermal flux
        let thermal_limit = cutoff.min(MAXWELLIAN_UNDERFLOW_KT * self.maxwellian.kt());
        let thermal = self
            .quadrature
            .integrate(|e| self.maxwellian.value(e), 0.0, thermal_limit)?
            .value;

        let epithermal = scale_epithermal
            * self
                .quadrature
                .integrate(|e| self.epithermal.value(e), cutoff, self.fast_boundary)?
                .value;

        let fast = scale_fast * self.fast_integral;

        Ok(BalanceTerms {
            cutoff,
            scale_epithermal,
            scale_fast,
            thermal,
            epithermal,
            fast,
        })
    }

    /// Thermal to non-thermal flux ratio implied by a cutoff
    ///
    /// Fails with [Error::UndefinedRatio] when the non-thermal flux vanishes,
    /// which happens once the Maxwellian underflows at very high cutoffs.
    pub fn ratio(&self, cutoff: f64) -> Result<f64> {
        let terms = self.terms(cutoff)?;
        let ratio = terms.ratio();

        trace!(
            "Ratio at {cutoff:e} eV = {ratio:e} (A={:e}, B={:e}, C={:e})",
            terms.thermal,
            terms.epithermal,
            terms.fast
        );

        if ratio.is_finite() && ratio > 0.0 {
            Ok(ratio)
        } else {
            Err(Error::UndefinedRatio { cutoff })
        }
    }

    fn check_domain(&self, cutoff: f64) -> Result<()> {
        if cutoff > 0.0 && cutoff < self.fast_boundary {
            Ok(())
        } else {
            Err(Error::CutoffOutsideDomain {
                cutoff,
                fast_boundary: self.fast_boundary,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance() -> Balance {
        Balance::new(600.0, &SpectrumConfig::default()).unwrap()
    }

    #[test]
    fn continuity_at_both_boundaries() {
        let b = balance();
        let cutoff = 0.1;
        let (c2, c3) = b.scale_factors(cutoff).unwrap();

        let thermal = b.maxwellian().value(cutoff);
        assert!(((c2 / cutoff - thermal) / thermal).abs() < 1e-14);

        let e2 = b.fast_boundary();
        let fast = c3 * b.chi().value(e2);
        assert!(((c2 / e2 - fast) / fast).abs() < 1e-14);
    }

    #[test]
    fn small_cutoff_limit() {
        // for e1 << kT the thermal integral is (2/3) e1^1.5 and the
        // epithermal integral is e1^1.5 ln(e2/e1)
        let b = balance();
        let cutoff = 1e-6;
        let terms = b.terms(cutoff).unwrap();

        let thermal = 2.0 / 3.0 * cutoff.powf(1.5);
        assert!(((terms.thermal - thermal) / thermal).abs() < 1e-3);

        let epithermal = cutoff.powf(1.5) * (1e6 / cutoff).ln();
        assert!(((terms.epithermal - epithermal) / epithermal).abs() < 1e-3);
    }

    #[test]
    fn ratio_matches_terms() {
        let b = balance();
        let terms = b.terms(0.05).unwrap();
        let expected = terms.thermal / (terms.epithermal + terms.fast);
        assert_eq!(b.ratio(0.05).unwrap(), expected);
    }

    #[test]
    fn cutoff_domain() {
        let b = balance();
        for cutoff in [0.0, -1.0, 1e6, 2e6] {
            assert!(matches!(
                b.ratio(cutoff),
                Err(Error::CutoffOutsideDomain { .. })
            ));
        }
    }

    #[test]
    fn thermal_integral_beyond_underflow() {
        // the full Maxwellian integral is (sqrt(pi) / 2) kT^1.5
        let b = balance();
        let kt = b.maxwellian().kt();
        let expected = 0.5 * std::f64::consts::PI.sqrt() * kt.powf(1.5);

        let terms = b.terms(1.0e4).unwrap();
        assert!(((terms.thermal - expected) / expected).abs() < 1e-9);
    }

    #[test]
    fn underflowed_maxwellian_has_no_ratio() {
        // exp(-1e4 / 0.0517) is zero in double precision
        let b = balance();
        assert!(matches!(
            b.ratio(1.0e4),
            Err(Error::UndefinedRatio { .. })
        ));
    }
}
