use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, ValueEnum, error::ErrorKind};
use tracing::info;

use crate::config::{AnnotatorConfig, PipelineConfig};
use crate::constants::app::REFERENCE_FORMAT;
use crate::output::{OutputFormat, write_records};
use crate::pipeline::RecordPipeline;
use crate::source::CsvRowSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Jsonl,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Jsonl => OutputFormat::JsonLines,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "clean_reviews",
    disable_help_subcommand = true,
    about = "Clean and annotate Spanish review tables",
    long_about = "Deduplicate review rows, parse ratings, resolve relative dates, normalize descriptions, and add sentiment, tokens, and lemmas.",
    after_help = "Set RUST_LOG=info to see per-stage counts."
)]
/// CLI for `clean_reviews`.
///
/// Common usage:
/// - `clean_reviews --input reviews.csv` writes JSON Lines to stdout
/// - `--format csv --output cleaned.csv` writes a CSV file
/// - `--reference 2024-06-15T12:00:00` pins "now" for reproducible dates
struct CleanReviewsCli {
    #[arg(
        long,
        value_name = "CSV",
        help = "Input table with Usuario, Rating, Fecha, Descripcion columns"
    )]
    input: PathBuf,
    #[arg(long, value_name = "PATH", help = "Output file; stdout when absent")]
    output: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "jsonl", help = "Output format")]
    format: FormatArg,
    #[arg(
        long = "stopwords",
        value_name = "FILE",
        help = "Extra stopwords, one per line"
    )]
    stopword_file: Option<PathBuf>,
    #[arg(
        long = "lemmas",
        value_name = "FILE",
        help = "Lemma dictionary with form<TAB>lemma lines"
    )]
    lemma_dictionary: Option<PathBuf>,
    #[arg(
        long,
        value_name = "YYYY-MM-DDTHH:MM:SS",
        value_parser = parse_reference_arg,
        help = "Fixed reference time for relative dates; local now when absent"
    )]
    reference: Option<NaiveDateTime>,
    #[arg(
        long = "lenient-lemmas",
        help = "Leave lemmas empty instead of failing when lemmatization errors"
    )]
    lenient_lemmas: bool,
}

/// Run the `clean_reviews` command with `args_iter` (program name excluded).
pub fn run_clean_reviews<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<CleanReviewsCli, _>(
        std::iter::once("clean_reviews".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut annotator_config = AnnotatorConfig::default();
    if let Some(path) = &cli.stopword_file {
        annotator_config = annotator_config.with_stopword_file(path);
    }
    if let Some(path) = &cli.lemma_dictionary {
        annotator_config = annotator_config.with_lemma_dictionary(path);
    }
    let annotator = annotator_config.build_annotator()?;

    let mut config = PipelineConfig::default().with_lemmatization_errors_fatal(!cli.lenient_lemmas);
    if let Some(reference) = cli.reference {
        config = config.with_fixed_reference(reference);
    }

    let source = CsvRowSource::from_path(&cli.input)?;
    let output = RecordPipeline::new(annotator, config).run_source(&source)?;

    let format = OutputFormat::from(cli.format);
    match &cli.output {
        Some(path) => {
            write_records(&output.records, format, BufWriter::new(File::create(path)?))?;
            info!(path = %path.display(), rows = output.records.len(), "wrote output");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = BufWriter::new(stdout.lock());
            write_records(&output.records, format, &mut handle)?;
            handle.flush()?;
        }
    }

    eprintln!("{}", output.summary);
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn parse_reference_arg(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw.trim(), REFERENCE_FORMAT)
        .map_err(|err| format!("invalid reference '{raw}': expected YYYY-MM-DDTHH:MM:SS ({err})"))
}
