use anyhow::Result;
use clap::{Parser, Subcommand};
use perfbase_cli::render::RenderConfig;
use perfbase_cli::{OutputFormat, commands};
use perfbase_core::AssemblerOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "perfbase")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Turn HAR network captures and Lighthouse audits into baseline performance reports",
    long_about = "perfbase flattens HAR and Lighthouse JSON captures into per-request and \
                  per-metric rows, categorizes requests by URL, and summarizes them into an \
                  observed baseline (average, median, min, max, p95, totals)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value = "pretty",
        env = "PERFBASE_FORMAT"
    )]
    format: OutputFormat,

    /// Decimal places for displayed numbers
    #[arg(long, global = true, default_value_t = 2)]
    precision: usize,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build baseline reports from capture files or directories
    Report {
        /// HAR / Lighthouse JSON files, or directories containing them
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Abort the whole batch on the first file that fails to parse
        #[arg(long)]
        fail_fast: bool,

        /// Number of scripts listed under JavaScript execution
        #[arg(long, default_value_t = 10, env = "PERFBASE_TOP_SCRIPTS")]
        top_scripts: usize,
    },

    /// Show the category each URL is grouped under
    Categorize {
        /// URLs to categorize
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = RenderConfig {
        format: cli.format,
        precision: cli.precision,
        color: !cli.no_color,
        ..RenderConfig::default()
    };

    match cli.command {
        Commands::Report {
            paths,
            fail_fast,
            top_scripts,
        } => commands::report::execute(
            &paths,
            AssemblerOptions { top_scripts },
            fail_fast,
            &config,
        ),
        Commands::Categorize { urls } => commands::categorize::execute(&urls, config.format),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("perfbase=debug,perfbase_cli=debug,perfbase_core=debug")
    } else {
        EnvFilter::new("perfbase=info,perfbase_cli=warn,perfbase_core=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
