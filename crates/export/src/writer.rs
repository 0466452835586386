//! Write operations for sampled spectrum data

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};
use crate::table::Tabular;

// neutronics toolbox
use nflux_utils::{f, ValueExt};

// external crates
use log::debug;

/// Width of each ASCII column
const COLUMN_WIDTH: usize = 13;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Whitespace separated columns with a `#` header line
    #[default]
    Ascii,
    /// Comma separated values with a header record
    Csv,
    /// Pretty printed JSON of the full table
    Json,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ascii" | "txt" | "text" => Ok(Self::Ascii),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Self::Ascii => "ascii",
            Self::Csv => "csv",
            Self::Json => "json",
        };
        write!(f, "{name}")
    }
}

/// Write a table in any [Format] to a file
///
/// ```rust, no_run
/// # use nflux_spectrum::SpectrumModel;
/// # use nflux_export::{write_file, Format, SpectrumTable};
/// let model = SpectrumModel::new(2.0, 600.0).unwrap();
/// let table = SpectrumTable::sample(&model, &[1e-2, 1.0, 1e4, 1e7]).unwrap();
/// write_file(&table, Format::Csv, "./flux_spectrum.csv").unwrap();
/// ```
pub fn write_file<T: Tabular, P: AsRef<Path>>(table: &T, format: Format, path: P) -> Result<()> {
    debug!("Writing {format} table to {}", path.as_ref().display());
    let mut writer = init_writer(path)?;
    write_table(table, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a table in any [Format] to a writer
pub fn write_table<T: Tabular, W: Write>(table: &T, format: Format, writer: W) -> Result<()> {
    match format {
        Format::Ascii => write_ascii(table, writer),
        Format::Csv => write_csv(table, writer),
        Format::Json => write_json(table, writer),
    }
}

/// Aligned columns of scientific numbers
///
/// ```text
/// #      energy          flux      lethargy
///   1.00000e-05   1.75454e-03   1.75454e-08
/// ```
pub fn write_ascii<T: Tabular, W: Write>(table: &T, mut writer: W) -> Result<()> {
    let header = table
        .headers()
        .iter()
        .map(|h| f!("{h:>COLUMN_WIDTH$}"))
        .collect::<String>();
    // swap the leading pad for a comment marker
    writeln!(writer, "#{}", &header[1..])?;

    for row in table.rows() {
        let line = row
            .iter()
            .map(|v| f!("{:>COLUMN_WIDTH$}", v.sci(5, 2)))
            .collect::<String>();
        writeln!(writer, "{line}")?;
    }

    Ok(())
}

/// CSV with the column headings as the first record
pub fn write_csv<T: Tabular, W: Write>(table: &T, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;

    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|v| f!("{v:e}")))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Direct serialisation of the full table, metadata included
pub fn write_json<T: Tabular, W: Write>(table: &T, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}

/// Initialise a writer from anything that can be turned into a path
fn init_writer<P: AsRef<Path>>(path: P) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
