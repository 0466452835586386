//! Command line tool for calibrated neutron flux spectra

// standard library
use std::path::PathBuf;
use std::process::ExitCode;

// neutronics toolbox
use nflux_export::{write_file, Format, RatioCurve, SpectrumTable};
use nflux_spectrum::{OutOfRange, SpectrumConfig, SpectrumModel};
use nflux_utils::logspace;

// external crates
use clap::{ArgAction, Parser};
use log::info;

/// Calibrate a thermal/epithermal/fast flux spectrum and tabulate it
///
/// The thermal cutoff is chosen so that the ratio of thermal to non-thermal
/// flux matches RATIO at the neutron TEMPERATURE. The spectrum is then
/// sampled on a log-spaced energy grid for plotting elsewhere.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
struct Cli {
    /// Target thermal to non-thermal flux ratio
    ratio: f64,

    /// Neutron temperature (K)
    #[arg(default_value_t = 600.0)]
    temperature: f64,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Snap unreachable ratios to the nearest tabulated cutoff
    #[arg(long)]
    clamp: bool,

    /// Lowest sampled energy (eV)
    #[arg(long, default_value_t = 1e-5)]
    emin: f64,

    /// Highest sampled energy (eV)
    #[arg(long, default_value_t = 1e7)]
    emax: f64,

    /// Number of sampled energies
    #[arg(long, default_value_t = 1000)]
    points: usize,

    /// Output format [ascii, csv, json]
    #[arg(short, long, default_value = "ascii")]
    format: String,

    /// Path for the sampled spectrum
    #[arg(short, long, value_name = "PATH", default_value = "flux_spectrum.txt")]
    output: PathBuf,

    /// Also write the ratio against cutoff calibration curve here
    #[arg(long, value_name = "PATH")]
    ratio_curve: Option<PathBuf>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // printed directly so that fatal errors survive --quiet
            eprintln!("{}", report(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> nflux_export::Result<()> {
    let format: Format = cli.format.parse()?;

    let mut config = match &cli.config {
        Some(path) => SpectrumConfig::from_json_file(path)?,
        None => SpectrumConfig::default(),
    };

    if cli.clamp {
        config.calibration.out_of_range = OutOfRange::Clamp;
    }

    let model = SpectrumModel::with_config(cli.ratio, cli.temperature, &config)?;
    info!("{model}");

    let energies = logspace(cli.emin, cli.emax, cli.points).map_err(nflux_spectrum::Error::from)?;
    let table = SpectrumTable::sample(&model, &energies)?;
    write_file(&table, format, &cli.output)?;
    info!("Spectrum written to {}", cli.output.display());

    if let Some(path) = &cli.ratio_curve {
        let curve = RatioCurve::from_calibration(&model);
        write_file(&curve, format, path)?;
        info!("Calibration curve written to {}", path.display());
    }

    Ok(())
}

/// Error message followed by every underlying cause
fn report(e: &nflux_export::Error) -> String {
    let mut message = format!("error: {e}");
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message += &format!("\n  caused by: {cause}");
        source = std::error::Error::source(cause);
    }
    message
}

fn init_logging(cli: &Cli) {
    let result = stderrlog::new()
        .modules([module_path!(), "nflux_spectrum", "nflux_export"])
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 2)
        .show_level(false)
        .init();

    if let Err(e) = result {
        eprintln!("unable to initialise logger: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["nflux", "2.0"]);
        assert_eq!(cli.temperature, 600.0);
        assert_eq!(cli.points, 1000);
        assert_eq!(cli.format, "ascii");
        assert!(!cli.clamp);
    }

    #[test]
    fn ratio_is_required() {
        assert!(Cli::try_parse_from(["nflux"]).is_err());
    }

    #[test]
    fn report_includes_causes() {
        let e = nflux_export::Error::from(nflux_spectrum::Error::NonPositiveEnergy(-1.0));
        let text = report(&e);
        assert!(text.starts_with("error: failed to evaluate spectrum"));
        assert!(text.contains("caused by: energy must be positive"));
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["nflux", "2.0", "450", "-vvv", "--clamp"]);
        assert_eq!(cli.verbose, 3);
        assert_eq!(cli.temperature, 450.0);
        assert!(cli.clamp);
    }
}
