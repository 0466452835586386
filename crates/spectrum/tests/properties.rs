//! Integration tests for calibration and evaluation of the spectrum

use nflux_spectrum::{
    Balance, ChiSpectrum, Error, ErrorKind, Maxwellian, OutOfRange, RatioTable, Region,
    Shape, SpectrumConfig, SpectrumModel,
};
use nflux_utils::logspace;
use rstest::{fixture, rstest};

fn rel_diff(a: f64, b: f64) -> f64 {
    ((a - b) / b).abs()
}

#[fixture]
fn model() -> SpectrumModel {
    SpectrumModel::new(1.0, 600.0).unwrap()
}

#[fixture]
fn clamped() -> SpectrumConfig {
    let mut config = SpectrumConfig::default();
    config.calibration.out_of_range = OutOfRange::Clamp;
    config
}

#[rstest]
#[case(300.0)] // case 1
#[case(600.0)] // case 2
#[case(1200.0)] // case 3
fn ratio_strictly_increasing(#[case] temperature: f64) {
    let balance = Balance::new(temperature, &SpectrumConfig::default()).unwrap();
    let kt = balance.maxwellian().kt();
    let cutoffs = logspace(1e-6, 30.0 * kt, 60).unwrap();

    let ratios: Vec<f64> = cutoffs.iter().map(|e| balance.ratio(*e).unwrap()).collect();
    for (i, pair) in ratios.windows(2).enumerate() {
        assert!(
            pair[1] > pair[0],
            "ratio decreased between {:e} and {:e} eV",
            cutoffs[i],
            cutoffs[i + 1]
        );
    }
}

#[rstest]
#[case(0.05)] // case 1
#[case(0.5)] // case 2
#[case(2.0)] // case 3
#[case(10.0)] // case 4
#[case(100.0)] // case 5
fn calibrated_cutoff_reproduces_target(#[case] target: f64) {
    let model = SpectrumModel::new(target, 600.0).unwrap();
    let achieved = model.ratio(model.thermal_cutoff()).unwrap();
    assert!(
        rel_diff(achieved, target) < 1e-3,
        "target {target} but cutoff {:e} eV gives {achieved}",
        model.thermal_cutoff()
    );
}

#[rstest]
fn cutoff_increases_with_target() {
    let cutoffs: Vec<f64> = [0.1, 1.0, 10.0]
        .iter()
        .map(|r| SpectrumModel::new(*r, 600.0).unwrap().thermal_cutoff())
        .collect();
    assert!(cutoffs[0] < cutoffs[1] && cutoffs[1] < cutoffs[2]);
}

#[rstest]
fn invariants_hold(model: SpectrumModel) {
    assert!(model.thermal_cutoff() > 0.0);
    assert!(model.thermal_cutoff() < model.fast_boundary());
    assert!(model.scale_epithermal() > 0.0);
    assert!(model.scale_fast() > 0.0);
    assert_eq!(model.fast_boundary(), 1.0e6);
}

#[rstest]
fn continuous_at_boundaries(model: SpectrumModel) {
    for boundary in [model.thermal_cutoff(), model.fast_boundary()] {
        let below = model.flux(boundary * (1.0 - 1e-6)).unwrap();
        let above = model.flux(boundary * (1.0 + 1e-6)).unwrap();
        assert!(
            rel_diff(below, above) < 1e-4,
            "discontinuity at {boundary:e} eV ({below:e} vs {above:e})"
        );
    }
}

#[rstest]
fn boundaries_belong_to_lower_region(model: SpectrumModel) {
    assert_eq!(model.region(model.thermal_cutoff()).unwrap(), Region::Thermal);
    assert_eq!(model.region(model.fast_boundary()).unwrap(), Region::Epithermal);
    assert_eq!(model.region(model.fast_boundary() * 1.01).unwrap(), Region::Fast);
}

#[rstest]
fn flux_is_positive(model: SpectrumModel) {
    let energies = logspace(1e-8, 1.99e7, 500).unwrap();
    for (e, flux) in energies.iter().zip(model.flux_many(&energies).unwrap()) {
        assert!(flux > 0.0, "flux at {e:e} eV is {flux:e}");
    }
}

#[rstest]
#[case(0.0)] // case 1
#[case(-1.0)] // case 2
#[case(f64::NAN)] // case 3
fn non_positive_energy_rejected(model: SpectrumModel, #[case] energy: f64) {
    let err = model.flux(energy).unwrap_err();
    assert!(matches!(err, Error::NonPositiveEnergy(_)));
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[rstest]
fn batch_fails_on_first_bad_energy(model: SpectrumModel) {
    assert!(model.flux_many(&[1.0, 0.0, 2.0]).is_err());
}

#[rstest]
#[case(1.0, 0.0)] // zero temperature
#[case(1.0, -300.0)] // negative temperature
#[case(0.0, 600.0)] // zero ratio
#[case(-2.0, 600.0)] // negative ratio
#[case(1.0e30, 600.0)] // beyond the table
#[case(1.0e-5, 600.0)] // below the table
fn bad_configuration_rejected(#[case] ratio: f64, #[case] temperature: f64) {
    let err = SpectrumModel::new(ratio, temperature).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

fn with_subdivisions(max_subdivisions: usize) -> SpectrumConfig {
    let mut config = SpectrumConfig::default();
    config.quadrature.max_subdivisions = max_subdivisions;
    config
}

fn with_cutoff_max_kt(cutoff_max_kt: f64) -> SpectrumConfig {
    let mut config = SpectrumConfig::default();
    config.calibration.cutoff_max_kt = cutoff_max_kt;
    config
}

#[rstest]
#[case(with_subdivisions(1), ErrorKind::Integration)] // fast integral cannot converge
#[case(with_cutoff_max_kt(1.0e4), ErrorKind::Calibration)] // table reaches the underflow
#[case(with_cutoff_max_kt(-1.0), ErrorKind::Configuration)] // invalid table range
fn construction_aborts_with_error_kind(#[case] config: SpectrumConfig, #[case] kind: ErrorKind) {
    let err = SpectrumModel::with_config(1.0, 600.0, &config).unwrap_err();
    assert_eq!(err.kind(), kind, "unexpected error {err}");
}

#[rstest]
fn construction_stops_at_integration_failure() {
    let err = SpectrumModel::with_config(1.0, 600.0, &with_subdivisions(1)).unwrap_err();
    assert!(matches!(err, Error::IntegrationFailed { subdivisions: 1, .. }));
}

#[rstest]
fn tabulating_past_the_underflow_is_undefined() {
    let balance = Balance::new(600.0, &SpectrumConfig::default()).unwrap();
    let err = RatioTable::tabulate(&balance, vec![1.0, 1.0e4]).unwrap_err();
    assert!(matches!(err, Error::UndefinedRatio { cutoff } if cutoff == 1.0e4));
    assert_eq!(err.kind(), ErrorKind::Calibration);
}

#[rstest]
fn thermal_dominant_scenario(clamped: SpectrumConfig) {
    let model = SpectrumModel::with_config(1e-5, 600.0, &clamped).unwrap();

    // the target sits below the table so the cutoff snaps to its lower end
    assert!(model.thermal_cutoff() < 1.0);
    assert_eq!(model.thermal_cutoff(), clamped.calibration.cutoff_min);

    let maxwellian = Maxwellian::new(600.0).unwrap();
    let below = model.thermal_cutoff() / 2.0;
    assert_eq!(model.flux(below).unwrap(), maxwellian.value(below));

    let epithermal = model.flux(1.0e4).unwrap();
    assert!(rel_diff(epithermal, model.scale_epithermal() / 1.0e4) < 1e-15);

    let fast = model.flux(1.0e7).unwrap();
    let chi = ChiSpectrum::default().value(1.0e7);
    assert!(rel_diff(fast, model.scale_fast() * chi) < 1e-15);
}

#[rstest]
fn regions_follow_their_shapes(model: SpectrumModel) {
    let maxwellian = Maxwellian::new(600.0).unwrap();
    assert_eq!(model.region(1.0e-2).unwrap(), Region::Thermal);
    assert_eq!(model.flux(1.0e-2).unwrap(), maxwellian.value(1.0e-2));

    assert_eq!(model.region(1.0e4).unwrap(), Region::Epithermal);
    assert_eq!(model.region(1.0e7).unwrap(), Region::Fast);
}

#[rstest]
fn identical_inputs_give_identical_models() {
    let a = SpectrumModel::new(3.0, 450.0).unwrap();
    let b = SpectrumModel::new(3.0, 450.0).unwrap();
    assert_eq!(a.thermal_cutoff(), b.thermal_cutoff());
    assert_eq!(a.scale_epithermal(), b.scale_epithermal());
    assert_eq!(a.scale_fast(), b.scale_fast());
    assert_eq!(a.ratio_table(), b.ratio_table());
}

#[rstest]
fn ratio_curve_matches_pointwise(model: SpectrumModel) {
    let cutoffs = [1e-3, 1e-2, 1e-1];
    let curve = model.ratio_curve(&cutoffs).unwrap();
    for (e1, r) in cutoffs.iter().zip(curve) {
        assert_eq!(model.ratio(*e1).unwrap(), r);
    }
}

#[rstest]
fn lethargy_is_energy_weighted(model: SpectrumModel) {
    let e = 250.0;
    assert_eq!(model.lethargy(e).unwrap(), e * model.flux(e).unwrap());
    // flat lethargy flux across the 1/E region
    let a = model.lethargy(1.0e2).unwrap();
    let b = model.lethargy(1.0e5).unwrap();
    assert!(rel_diff(a, b) < 1e-12);
}

#[rstest]
fn alternative_fast_boundary() {
    let config = SpectrumConfig {
        fast_boundary: 1.0e5,
        ..Default::default()
    };
    let model = SpectrumModel::with_config(1.0, 600.0, &config).unwrap();
    assert_eq!(model.fast_boundary(), 1.0e5);
    assert!(rel_diff(model.ratio(model.thermal_cutoff()).unwrap(), 1.0) < 1e-3);
}

#[rstest]
fn summary_display(model: SpectrumModel) {
    let text = model.to_string();
    assert!(text.starts_with("SpectrumModel {"));
    assert!(text.contains("thermal cutoff"));
    assert!(text.contains("600 K"));
}
