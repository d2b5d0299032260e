//! pagedown CLI - positioned text tokens to Markdown

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagedown::{
    Extraction, ExtractionOptions, Extractor, JsonFormat, JsonSource, PageRange, TokenSource,
};

#[derive(Parser)]
#[command(name = "pagedown")]
#[command(version)]
#[command(about = "Turn positioned PDF text tokens into structured Markdown", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a token dump to Markdown or JSON
    #[command(alias = "md")]
    Convert(ConvertArgs),

    /// Show token dump information
    Info {
        /// Input token dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ConvertArgs {
    /// Input token dump (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Page range (e.g., "3-7", "5", "3-")
    #[arg(long, env = "PAGEDOWN_PAGES")]
    pages: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Omit the "## Page N" header before each page
    #[arg(long)]
    no_page_numbers: bool,

    /// Omit the horizontal rule between pages
    #[arg(long)]
    no_page_breaks: bool,

    /// Keep repeated headers and footers
    #[arg(long)]
    keep_headers_footers: bool,

    /// Skip heading detection (paragraphs and lists only)
    #[arg(long)]
    plain: bool,

    /// Markdown level for detected headings (1-6)
    #[arg(long, default_value = "3")]
    heading_level: u8,

    /// Process pages one at a time
    #[arg(long)]
    sequential: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Markdown text
    Markdown,
    /// Pretty-printed JSON with per-page blocks
    Json,
}

impl ConvertArgs {
    fn options(&self) -> ExtractionOptions {
        let mut options = ExtractionOptions::new()
            .with_page_numbers(!self.no_page_numbers)
            .with_page_breaks(!self.no_page_breaks)
            .with_header_footer_filter(!self.keep_headers_footers)
            .with_formatting(!self.plain)
            .with_heading_level(self.heading_level);

        if self.sequential {
            options = options.sequential();
        }
        options
    }

    fn range(&self) -> Result<PageRange, String> {
        match self.pages.as_deref() {
            Some(p) => PageRange::parse(p).map_err(|e| format!("Invalid page range: {}", e)),
            None => Ok(PageRange::all()),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => cmd_convert(&args),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(args: &ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let range = args.range()?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading tokens...");
    let source = JsonSource::from_path(&args.input)?;

    pb.set_message(format!("Extracting {} pages...", source.page_count()));
    let extraction = Extractor::new(args.options()).extract(&source, range)?;
    pb.finish_and_clear();

    log::debug!(
        "Resolved pages {}-{} of {}",
        extraction.start_page,
        extraction.end_page,
        extraction.total_pages
    );
    log::debug!("Stats: {:?}", extraction.stats);

    let content = render(&extraction, args.format)?;
    write_output(args.output.as_deref(), &content)?;

    if args.output.is_some() {
        print_summary(&extraction);
    }

    Ok(())
}

fn render(extraction: &Extraction, format: OutputFormat) -> pagedown::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(extraction.markdown.clone()),
        OutputFormat::Json => pagedown::render::to_json(extraction, JsonFormat::Pretty),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> std::io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn print_summary(extraction: &Extraction) {
    let stats = &extraction.stats;
    println!(
        "  {} {} pages ({}-{} of {})",
        "├─".dimmed(),
        extraction.page_count(),
        extraction.start_page,
        extraction.end_page,
        extraction.total_pages
    );
    println!(
        "  {} {} headings, {} paragraphs, {} list items",
        "├─".dimmed(),
        stats.heading_count,
        stats.paragraph_count,
        stats.list_item_count
    );
    println!(
        "  {} {} boilerplate lines removed",
        "└─".dimmed(),
        stats.boilerplate_lines_removed
    );
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = JsonSource::from_path(input)?;

    let mut tokens = 0;
    let mut empty_pages = 0;
    for number in 1..=source.page_count() {
        let page = source.page(number)?;
        tokens += page.tokens.len();
        if page.is_empty() {
            empty_pages += 1;
        }
    }

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "pages": source.page_count(),
            "tokens": tokens,
            "empty_pages": empty_pages,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Token Dump Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), source.page_count());
    println!("{}: {}", "Tokens".bold(), tokens);
    println!("{}: {}", "Empty pages".bold(), empty_pages);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagedown".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Positioned text tokens to Markdown");
}
