//! pdf2grid - Render PDF pages as fixed-width text
//!
//! Reads page dumps (JSON) produced by a document parser or OCR service and
//! prints each page's text laid out on a character grid that follows the
//! text's placement on the page.
//!
//! A page dump is either
//! `{"source": "embedded", "operators": [...], "fonts": {...}}` or
//! `{"source": "ocr", "lines": [...], "rotation": 0.0, "page_size": {...}}`.
//! A file may hold one page object or an array of them.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pdfgrid_core::{LayoutOptions, PageInput, render_page};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Render pre-tokenized PDF pages or OCR results as fixed-width text.
#[derive(Parser, Debug)]
#[command(name = "pdf2grid")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more page dump files (JSON)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// JSON file with layout options; flags below override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    // === Layout options ===
    /// Keep blank lines inferred from vertical gaps
    #[arg(short = 'V', long = "preserve-vertical-whitespace", action = ArgAction::SetTrue)]
    preserve_vertical_whitespace: bool,

    /// Multiplier for text length when estimating the character width
    #[arg(short = 'S', long = "scale-weight")]
    scale_weight: Option<f64>,

    /// Divisor for font height when counting blank lines
    #[arg(short = 'H', long = "font-height-weight")]
    font_height_weight: Option<f64>,

    /// OCR page rotations below this many degrees are ignored
    #[arg(short = 'R', long = "min-rotation-degrees")]
    min_rotation_degrees: Option<f64>,

    /// Discard pages longer than this many characters (0 = no limit)
    #[arg(short = 'm', long = "max-chars")]
    max_chars: Option<usize>,

    // === Output options ===
    /// Print the intermediate line groups as JSON instead of page text
    #[arg(long = "dump-groups", action = ArgAction::SetTrue)]
    dump_groups: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Build layout options from the config file, then apply flag overrides.
fn build_options(args: &Args) -> Result<LayoutOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => LayoutOptions::default(),
    };
    if args.preserve_vertical_whitespace {
        options.preserve_vertical_whitespace = true;
    }
    if let Some(weight) = args.scale_weight {
        options.scale_weight = weight;
    }
    if let Some(weight) = args.font_height_weight {
        options.font_height_weight = weight;
    }
    if let Some(degrees) = args.min_rotation_degrees {
        options.min_rotation_degrees = degrees;
    }
    if let Some(max_chars) = args.max_chars {
        options.max_chars_per_page = max_chars;
    }
    Ok(options)
}

/// Load every page in a dump file.
fn load_pages(path: &Path) -> Result<Vec<PageInput>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))?;
    let pages = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|page| vec![page])
    };
    pages.with_context(|| format!("invalid page dump in {}", path.display()))
}

fn process_file(
    path: &Path,
    output: &mut dyn Write,
    options: &LayoutOptions,
    dump_groups: bool,
) -> Result<()> {
    let pages = load_pages(path)?;
    tracing::debug!(file = %path.display(), pages = pages.len(), "loaded page dump");
    for (pageno, page) in pages.iter().enumerate() {
        if dump_groups {
            let groups = page
                .line_groups(options)
                .with_context(|| format!("page {} of {}", pageno + 1, path.display()))?;
            serde_json::to_writer_pretty(&mut *output, &groups)?;
            writeln!(output)?;
            continue;
        }
        let text = render_page(page, options)
            .with_context(|| format!("page {} of {}", pageno + 1, path.display()))?;
        writeln!(output, "{text}")?;
        // form feed between pages
        write!(output, "\x0c")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let options = build_options(&args)?;

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        process_file(path, output.as_mut(), &options, args.dump_groups)?;
    }
    output.flush()?;
    Ok(())
}
