//! doclayout - Reconstruct document text from layout-analysis results
//!
//! A command line tool that reads the JSON result of a layout-analysis
//! service and writes reading-ordered page text, Markdown tables, or the
//! full per-element record as JSON.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use doclayout_core::{
    AnalysisResult, ExtractOptions, ExtractedDocument, WordScope, analyze_document,
};
use tracing_subscriber::EnvFilter;

/// Output type for the reconstruction.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputType {
    /// Full document text with page headers (default)
    #[default]
    Text,
    /// Every output map and record as JSON
    Json,
    /// Per-page element records as JSON
    Pages,
    /// Table Markdown only, in document order
    Tables,
}

/// Reconstruct reading-ordered text and Markdown tables from
/// layout-analysis JSON.
#[derive(Parser, Debug)]
#[command(name = "doclayout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more analysis result JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    /// Skip word-based confidence scoring (also disables the table map)
    #[arg(long = "no-confidence", action = ArgAction::SetTrue)]
    no_confidence: bool,

    /// Score every table cell
    #[arg(long = "cell-confidence", action = ArgAction::SetTrue)]
    cell_confidence: bool,

    /// Fail on tables whose cells do not fit the declared grid
    #[arg(long = "strict-tables", action = ArgAction::SetTrue)]
    strict_tables: bool,

    /// Score only against the words of the element's own page
    #[arg(long = "page-words", action = ArgAction::SetTrue)]
    page_words: bool,

    /// Number of worker threads (default: available parallelism)
    #[arg(short = 'j', long = "threads")]
    threads: Option<usize>,
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build ExtractOptions from command line arguments.
fn build_options(args: &Args) -> Result<ExtractOptions> {
    if args.cell_confidence && args.no_confidence {
        bail!("--cell-confidence cannot be combined with --no-confidence");
    }

    let mut options = ExtractOptions::default()
        .with_element_confidence(!args.no_confidence)
        .with_cell_confidence(args.cell_confidence)
        .with_strict_tables(args.strict_tables);
    if args.page_words {
        options = options.with_word_scope(WordScope::Page);
    }
    if let Some(threads) = args.threads {
        if threads == 0 {
            bail!("--threads must be at least 1");
        }
        options = options.with_num_threads(threads);
    }
    Ok(options)
}

fn write_output<W: Write>(
    writer: &mut W,
    extracted: &ExtractedDocument,
    output_type: OutputType,
) -> Result<()> {
    match output_type {
        OutputType::Text => writeln!(writer, "{}", extracted.full_document_text)?,
        OutputType::Json => {
            serde_json::to_writer_pretty(&mut *writer, extracted)?;
            writeln!(writer)?;
        }
        OutputType::Pages => {
            serde_json::to_writer_pretty(&mut *writer, &extracted.page_elements)?;
            writeln!(writer)?;
        }
        OutputType::Tables => {
            for (key, markdown) in &extracted.table_text {
                writeln!(writer, "Table {key}\n{markdown}\n")?;
            }
        }
    }
    Ok(())
}

/// Process a single analysis result file.
fn process_file<W: Write>(
    path: &Path,
    writer: &mut W,
    options: &ExtractOptions,
    output_type: OutputType,
) -> Result<()> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = AnalysisResult::from_json(&json)
        .with_context(|| format!("decoding {}", path.display()))?;
    tracing::debug!(
        file = %path.display(),
        paragraphs = doc.paragraphs.len(),
        tables = doc.tables.len(),
        figures = doc.figures.len(),
        "analysis result loaded"
    );

    let extracted = analyze_document(&doc, options)?;
    write_output(writer, &extracted, output_type)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let options = build_options(&args)?;

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("creating output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        if !path.exists() {
            bail!("file not found: {}", path.display());
        }
        process_file(path, &mut output, &options, args.output_type)
            .with_context(|| format!("processing {}", path.display()))?;
    }

    output.flush()?;

    Ok(())
}
