use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use ynabify_import::{import::convert_dutch_export, ConvertOptions, ConvertSummary};

/// Convert a Dutch bank CSV export into a YNAB import file.
#[derive(Debug, Parser)]
#[command(name = "ynabify", version, about, long_about = None)]
pub struct Cli {
    /// Path to input CSV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to output CSV file [default: ~/Desktop/ynab_amex_export_<timestamp>.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Field delimiter of the input file (a single character, or \t for tab)
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
    }
}

/// Process exit status after a flag-parsing error. `--help` and `--version`
/// are reported through the same path but are not failures.
pub fn parse_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

pub fn output_file_name(now: NaiveDateTime) -> String {
    format!("ynab_amex_export_{}.csv", now.format("%Y%m%d%H%M%S"))
}

/// `<desktop>/ynab_amex_export_<YYYYMMDDHHMMSS>.csv`, falling back to
/// `<home>/Desktop` and then the working directory.
pub fn default_output_path(now: NaiveDateTime) -> PathBuf {
    let dir = directories::UserDirs::new()
        .map(|dirs| {
            dirs.desktop_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dirs.home_dir().join("Desktop"))
        })
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(output_file_name(now))
}

/// Converts `input` to `output`, creating the output's parent directory if needed.
pub fn convert_file(input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConvertSummary> {
    let reader = File::open(input)
        .with_context(|| format!("Failed to open input file {}", input.display()))?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
    }
    let writer = File::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;

    tracing::info!("Converting {} -> {}", input.display(), output.display());
    let summary = convert_dutch_export(BufReader::new(reader), BufWriter::new(writer), options)
        .context("Failed to process CSV")?;
    Ok(summary)
}

pub fn run(cli: Cli) -> Result<()> {
    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(chrono::Local::now().naive_local()));
    let options = ConvertOptions { delimiter: cli.delimiter };

    let summary = convert_file(&cli.input, &output, &options)?;
    if summary.dates_passed_through + summary.amounts_passed_through > 0 {
        tracing::warn!(
            "{} date(s) and {} amount(s) could not be parsed and were copied unchanged",
            summary.dates_passed_through,
            summary.amounts_passed_through
        );
    }

    println!(
        "Successfully converted {} to YNAB format. Output saved to {}",
        cli.input.display(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["ynabify"]).is_err());
    }

    #[test]
    fn usage_errors_exit_with_one() {
        let missing = Cli::try_parse_from(["ynabify"]).unwrap_err();
        assert_eq!(parse_exit_code(&missing), 1);
        let unknown = Cli::try_parse_from(["ynabify", "-i", "in.csv", "--bogus"]).unwrap_err();
        assert_eq!(parse_exit_code(&unknown), 1);
        let bad_delimiter = Cli::try_parse_from(["ynabify", "-i", "in.csv", "-d", ";;"]).unwrap_err();
        assert_eq!(parse_exit_code(&bad_delimiter), 1);
    }

    #[test]
    fn help_and_version_exit_with_zero() {
        let help = Cli::try_parse_from(["ynabify", "--help"]).unwrap_err();
        assert_eq!(parse_exit_code(&help), 0);
        let version = Cli::try_parse_from(["ynabify", "--version"]).unwrap_err();
        assert_eq!(parse_exit_code(&version), 0);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["ynabify", "--input", "in.csv", "-o", "out.csv", "-d", ";"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.delimiter, b';');
    }

    #[test]
    fn defaults_to_comma_and_no_output() {
        let cli = Cli::try_parse_from(["ynabify", "-i", "in.csv"]).unwrap();
        assert_eq!(cli.output, None);
        assert_eq!(cli.delimiter, b',');
    }

    #[test]
    fn delimiter_must_be_one_ascii_char() {
        assert_eq!(parse_delimiter("\\t"), Ok(b'\t'));
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("€").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn output_file_name_is_timestamped() {
        assert_eq!(
            output_file_name(at(2024, 3, 7, 9, 5, 2)),
            "ynab_amex_export_20240307090502.csv"
        );
    }

    #[test]
    fn default_output_path_ends_with_file_name() {
        let now = at(2024, 3, 7, 9, 5, 2);
        let path = default_output_path(now);
        assert_eq!(path.file_name().unwrap(), output_file_name(now).as_str());
    }

    #[test]
    fn convert_file_writes_output_and_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        std::fs::write(
            &input,
            "Datum,Omschrijving,Bedrag,Plaats\n31-12-2023,Bakker,\"-2,40\",Delft\n",
        )
        .unwrap();
        let output = dir.path().join("nested").join("ynab.csv");

        let summary = convert_file(&input, &output, &ConvertOptions::default()).unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Date,Payee,Memo,Amount\n2023-12-31,Bakker,Location: Delft,2.40\n"
        );
    }

    #[test]
    fn convert_file_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(
            &dir.path().join("nope.csv"),
            &dir.path().join("out.csv"),
            &ConvertOptions::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").starts_with("Failed to open input file"));
    }

    #[test]
    fn convert_file_surfaces_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        std::fs::write(&input, "Datum,Omschrijving\n01-01-2024,X\n").unwrap();
        let err = convert_file(&input, &dir.path().join("out.csv"), &ConvertOptions::default())
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Failed to process CSV"));
        assert!(msg.contains("required columns not found in the CSV file: amount"));
    }

    #[test]
    fn convert_file_reports_row_error_once() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        std::fs::write(&input, "Datum,Omschrijving,Bedrag\n01-01-2024,A,\"1,00\"\n02-01-2024,B\n").unwrap();
        let err = convert_file(&input, &dir.path().join("out.csv"), &ConvertOptions::default())
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.starts_with("Failed to process CSV: failed to read row 2: CSV error"));
        assert_eq!(msg.matches("found record with 2 fields").count(), 1);
    }
}
