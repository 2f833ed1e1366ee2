//! `keyfilter` command: reads a GeoJSON feature collection with one key
//! dropped from every object and prints feature statistics.
//!
//! Dropping `coordinates` (the default) keeps the bulk of a typical GeoJSON
//! file out of memory while the geometry types and properties are counted.
use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::{Parser, error::ErrorKind as ClapErrorKind};
use keyfilter::{FilterKeyReader, ParseError, ParserOptions, ReadStream, Value};
use tracing_subscriber::EnvFilter;

mod stats;

use stats::{Report, StatsError};

#[derive(Parser, Debug)]
#[command(name = "keyfilter", version, about)]
struct Cli {
    /// GeoJSON file holding a `FeatureCollection`.
    input: PathBuf,

    /// Object member to drop, at every depth, before building the document.
    #[arg(long, default_value = "coordinates")]
    key: String,

    /// Print the filtered document as JSON after the statistics.
    #[arg(long)]
    print: bool,

    /// Deepest nesting of objects and arrays the reader accepts.
    #[arg(long, default_value_t = ParserOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

/// Failures that end a run with exit status 1.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Unable to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error({}): {}", .0.offset, .0.code)]
    Parse(ParseError),
    #[error("the input did not describe a single document")]
    Incomplete,
    #[error(transparent)]
    Stats(#[from] StatsError),
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    init_tracing();

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("{}", error_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// The error followed by its chain of causes, on one line.
fn error_message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Reads the filtered document and writes the report (and, with `--print`,
/// the document) to `out`.
fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let document = read_filtered(cli)?;
    let report = Report::collect(&document).map_err(CliError::from)?;
    tracing::debug!(features = report.features, "statistics collected");

    write!(out, "{report}").context("failed to write the report")?;
    if cli.print {
        writeln!(out, "{document}").context("failed to write the document")?;
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn read_filtered(cli: &Cli) -> Result<Value, CliError> {
    let file = File::open(&cli.input).map_err(|source| CliError::Open {
        path: cli.input.clone(),
        source,
    })?;
    tracing::debug!(path = %cli.input.display(), key = %cli.key, "reading");

    let options = ParserOptions {
        max_depth: cli.max_depth,
        ..Default::default()
    };
    let mut reader = FilterKeyReader::new(ReadStream::new(file), cli.key.as_bytes(), options);
    let document = Value::populate(&mut reader);
    let result = reader.parse_result().copied();

    // A failing device also shows up as a truncated document; report the
    // cause rather than the symptom.
    if let Some(source) = reader.into_stream().take_error() {
        return Err(CliError::Read {
            path: cli.input.clone(),
            source,
        });
    }
    match (result, document) {
        (Some(Err(err)), _) => Err(CliError::Parse(err)),
        (_, Some(document)) => Ok(document),
        (_, None) => Err(CliError::Incomplete),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use insta::assert_snapshot;
    use rstest::rstest;

    use super::*;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": 1,
             "geometry": {"type": "Point", "coordinates": [102.0, 0.5]},
             "properties": {"name": "a"}},
            {"type": "Feature",
             "geometry": {"type": "LineString", "coordinates": [[102.0, 0.0], [103.0, 1.0]]},
             "properties": {"name": "b", "coordinates": "kept out too"}}
        ]
    }"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("keyfilter").chain(args.iter().copied())).unwrap()
    }

    fn write_input(dir: &Path, text: &str) -> String {
        let path = dir.join("input.json");
        std::fs::write(&path, text).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn run_to_string(cli: &Cli) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn prints_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(dir.path(), COLLECTION);

        assert_snapshot!(run_to_string(&cli(&[path.as_str()])).unwrap(), @r"
        Features: 2
        Geometries:
              1: LineString
              1: Point
        Properties:
              2: name
        ");
    }

    #[test]
    fn print_flag_appends_the_filtered_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(dir.path(), COLLECTION);

        let out = run_to_string(&cli(&[path.as_str(), "--print"])).unwrap();
        let document = out.lines().last().unwrap();
        assert_eq!(
            document,
            r#"{"features":[{"geometry":{"type":"Point"},"id":1,"properties":{"name":"a"},"type":"Feature"},{"geometry":{"type":"LineString"},"properties":{"name":"b"},"type":"Feature"}],"type":"FeatureCollection"}"#
        );
    }

    #[test]
    fn other_keys_can_be_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(dir.path(), COLLECTION);

        let out = run_to_string(&cli(&[path.as_str(), "--key", "name"])).unwrap();
        assert!(out.ends_with("Properties:\n      1: coordinates\n"), "{out}");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = run_to_string(&cli(&[path.to_str().unwrap()])).unwrap_err();
        assert_eq!(err.to_string(), format!("Unable to open {}", path.display()));
    }

    #[rstest]
    #[case(r#"{"features": [}"#, "Error(14): invalid value")]
    #[case("", "Error(0): the document is empty")]
    #[case(r#"{"features": []} []"#, "Error(17): the document root is followed by other values")]
    #[case(r#"{"features": 1}"#, "document has no features array")]
    #[case(r#"{"features": [{"geometry": []}]}"#, "feature 0: geometry is not an object")]
    fn failures_are_reported(#[case] text: &str, #[case] message: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(dir.path(), text);
        let err = run_to_string(&cli(&[path.as_str()])).unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn max_depth_is_passed_to_the_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(dir.path(), r#"{"features": [[[]]]}"#);
        let err = run_to_string(&cli(&[path.as_str(), "--max-depth", "3"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error(15): nesting depth exceeds the configured limit"
        );
    }

    #[test]
    fn printed_errors_include_the_cause() {
        let err = anyhow::Error::from(CliError::Read {
            path: PathBuf::from("in.json"),
            source: io::Error::other("device gone"),
        });
        assert_eq!(error_message(&err), "failed to read in.json: device gone");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = run_to_string(&cli(&[path.to_str().unwrap()])).unwrap_err();
        let message = error_message(&err);
        assert!(
            message.starts_with(&format!("Unable to open {}: ", path.display())),
            "{message}"
        );
    }

    #[rstest]
    #[case(&[])]
    #[case(&["a.json", "b.json"])]
    #[case(&["a.json", "--max-depth", "deep"])]
    fn bad_arguments_are_rejected(#[case] args: &[&str]) {
        let parsed = Cli::try_parse_from(std::iter::once("keyfilter").chain(args.iter().copied()));
        assert!(parsed.is_err());
    }
}
