//! CLI binary for pdf2md-ocr.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2md_ocr::{
    convert_to_file, ConversionConfig, ConversionOutput, ConversionProgressCallback,
    ExtractionMethod, ProgressCallback, ToolPaths,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live progress bar plus one log line per
/// page saying whether the text layer or OCR produced it.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// The bar length is set by `on_conversion_start` once pdfium has
    /// reported the page count.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.reset_eta();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_pages} pages…"))
        ));
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(
        &self,
        page_num: usize,
        total: usize,
        method: ExtractionMethod,
        text_len: usize,
    ) {
        let label = match method {
            ExtractionMethod::Native => green("text"),
            ExtractionMethod::Recognized => yellow("OCR "),
        };
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}  {}",
            green("✓"),
            page_num,
            total,
            label,
            dim(&format!("{text_len:>6} chars")),
        ));
        self.bar.inc(1);
    }

    fn on_page_warning(&self, page_num: usize, total: usize, message: &str) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            yellow("!"),
            page_num,
            total,
            yellow(message),
        ));
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        // Keep the line on one terminal row.
        let msg: String = if error.chars().count() > 80 {
            let head: String = error.chars().take(79).collect();
            format!("{head}\u{2026}")
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_num,
            total,
            red(&msg),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, _total_pages: usize, _success_count: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion
  pdf2md-ocr --input scan.pdf --output scan.md

  # Render OCR pages with Poppler instead of pdfium
  pdf2md-ocr --input scan.pdf --output scan.md --poppler-path /usr/local/bin

  # German OCR, stricter native-text threshold
  pdf2md-ocr --input brief.pdf --output brief.md --lang deu --min-chars 200

  # Per-page JSON report alongside the Markdown
  pdf2md-ocr --input book.pdf --output book.md --report book.json

OUTPUT FORMAT:
  ## Page 1
  <text of page 1>

  ## Page 2
  <text of page 2>

  Pages whose OCR failed get the body "*(OCR failed for this page)*".

ENVIRONMENT VARIABLES:
  PDF2MD_POPPLER_PATH     Poppler bin directory (selects pdftoppm rendering)
  PDF2MD_TESSERACT_CMD    tesseract executable
  PDF2MD_PDFIUM_LIB       Directory containing libpdfium
  RUST_LOG                Override log filter (e.g. pdf2md_ocr=debug)

SETUP:
  Install tesseract (with the language packs you need) and place libpdfium
  next to the executable or on the system library path.
"#;

/// Convert PDF files to page-annotated Markdown, with OCR for scanned pages.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2md-ocr",
    version,
    about = "Convert PDF files to page-annotated Markdown, with OCR for scanned pages",
    long_about = "Convert PDF documents to Markdown text with one '## Page N' section per page. \
Pages with a usable text layer are extracted directly; the rest are rendered to images and \
recognised with Tesseract.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input PDF.
    #[arg(short, long, env = "PDF2MD_INPUT")]
    input: PathBuf,

    /// Path of the Markdown file to write.
    #[arg(short, long, env = "PDF2MD_OUTPUT")]
    output: PathBuf,

    /// Poppler bin directory; when set, pages are rendered with pdftoppm.
    #[arg(long, alias = "poppler_path", env = "PDF2MD_POPPLER_PATH")]
    poppler_path: Option<PathBuf>,

    /// Minimum trimmed characters to keep a page's text layer.
    #[arg(long, env = "PDF2MD_MIN_CHARS", default_value_t = pdf2md_ocr::config::DEFAULT_MIN_NATIVE_CHARS)]
    min_chars: usize,

    /// Rendering DPI for OCR pages (72–600).
    #[arg(long, env = "PDF2MD_DPI", default_value_t = pdf2md_ocr::config::DEFAULT_DPI,
          value_parser = clap::value_parser!(u32).range(72..=600))]
    dpi: u32,

    /// Tesseract language(s), e.g. eng or eng+fra.
    #[arg(long, env = "PDF2MD_LANG", default_value = pdf2md_ocr::config::DEFAULT_LANGUAGE)]
    lang: String,

    /// tesseract executable (default: looked up on PATH).
    #[arg(long, env = "PDF2MD_TESSERACT_CMD")]
    tesseract_cmd: Option<PathBuf>,

    /// Directory containing the pdfium shared library.
    #[arg(long, env = "PDF2MD_PDFIUM_LIB")]
    pdfium_lib: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "PDF2MD_PASSWORD")]
    password: Option<String>,

    /// Clean up OCR output (line endings, trailing spaces, blank-line runs).
    #[arg(long, env = "PDF2MD_CLEAN")]
    clean: bool,

    /// Also write a JSON report (per-page method, timing, errors) here.
    #[arg(long, env = "PDF2MD_REPORT")]
    report: Option<PathBuf>,

    /// Disable progress bar.
    #[arg(long, env = "PDF2MD_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PDF2MD_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO-level page logs; verbose wins over both.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        let cb = CliProgressCallback::new_dynamic();
        Some(cb as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let output = convert_to_file(&cli.input, &cli.output, &config)
        .await
        .with_context(|| format!("Conversion of {} failed", cli.input.display()))?;

    if let Some(ref report_path) = cli.report {
        write_report(report_path, &output).await?;
    }

    if !cli.quiet {
        print_summary(&output, &cli.output);
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let tools = ToolPaths {
        pdfium_library: cli.pdfium_lib.clone(),
        poppler_bin: cli.poppler_path.clone(),
        tesseract_cmd: cli.tesseract_cmd.clone(),
    };

    let mut builder = ConversionConfig::builder()
        .min_native_chars(cli.min_chars)
        .dpi(cli.dpi)
        .language(cli.lang.clone())
        .tools(tools)
        .clean_recognized_text(cli.clean);

    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

async fn write_report(path: &std::path::Path, output: &ConversionOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output).context("Failed to serialise report")?;
    pdf2md_ocr::write_output(path, &json)
        .await
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

fn print_summary(output: &ConversionOutput, path: &std::path::Path) {
    let stats = &output.stats;
    let mark = if stats.failed_pages == 0 {
        green("✔")
    } else if stats.failed_pages == stats.total_pages {
        red("✘")
    } else {
        cyan("⚠")
    };
    eprintln!(
        "{}  {}/{} pages  {}ms  →  {}",
        mark,
        stats.succeeded_pages(),
        stats.total_pages,
        stats.total_duration_ms,
        bold(&path.display().to_string()),
    );
    eprintln!(
        "   {} native  /  {} OCR  /  {} failed",
        dim(&stats.native_pages.to_string()),
        dim(&stats.recognized_pages.to_string()),
        if stats.failed_pages == 0 {
            dim("0")
        } else {
            red(&stats.failed_pages.to_string())
        },
    );
}
