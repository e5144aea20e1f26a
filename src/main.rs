use anyhow::{Context, Result};
use approx_index::index::reference::DEFAULT_REFERENCE;
use approx_index::index::{FilterIndexBuilder, IndexConfig, IndexStats, QueryLimits, ReferenceText};
use approx_index::output::{self, OutputFormat};
use approx_index::query::{Pattern, QueryEngine};
use approx_index::IndexError;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;
use termcolor::ColorChoice;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
    registry::Registry,
};

#[derive(Parser)]
#[command(name = "approx-index")]
#[command(about = "Find every window within Hamming distance 2 of a query (filter: may include false positives)")]
struct Cli {
    /// Query string; its length must be a positive multiple of 4
    #[arg(allow_hyphen_values = true)]
    query: OsString,

    /// Reference file to index
    #[arg(short, long, default_value = DEFAULT_REFERENCE)]
    reference: PathBuf,

    /// Interpret the query as hex-encoded bytes
    #[arg(long)]
    hex: bool,

    /// Bucket table size (default: sized from the reference length)
    #[arg(long)]
    buckets: Option<usize>,

    /// Threads used to build the index
    #[arg(long)]
    threads: Option<usize>,

    /// Memory-map the reference instead of reading it in full
    #[arg(long)]
    mmap: bool,

    /// Minimum accepted query length
    #[arg(long, default_value_t = QueryLimits::default().min_len)]
    min_query_len: usize,

    /// Maximum accepted query length
    #[arg(long, default_value_t = QueryLimits::default().max_len)]
    max_query_len: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print each position with its window
    #[arg(long, conflicts_with = "json")]
    windows: bool,

    /// Print index statistics to stderr
    #[arg(long)]
    stats: bool,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print results and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self, is_terminal: bool) -> ColorChoice {
        match self {
            ColorMode::Auto if is_terminal => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

fn init_tracing(quiet: bool, verbose: u8) {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    // Library code logs through the log crate
    if tracing_log::LogTracer::init().is_err() {
        return;
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("APPROX_INDEX_LOG")
        .from_env_lossy();

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .compact(),
    );

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn query_bytes(query: OsString) -> Vec<u8> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStringExt;
        query.into_vec()
    }
    #[cfg(not(unix))]
    {
        query.to_string_lossy().into_owned().into_bytes()
    }
}

fn run(cli: Cli) -> Result<()> {
    let limits = QueryLimits {
        min_len: cli.min_query_len,
        max_len: cli.max_query_len,
    };

    // Validate the query before touching the reference
    let pattern = if cli.hex {
        Pattern::from_hex(&cli.query.to_string_lossy(), &limits)?
    } else {
        Pattern::new(query_bytes(cli.query), &limits)?
    };

    tracing::info!("fetching {}", cli.reference.display());
    let reference = if cli.mmap {
        ReferenceText::map(&cli.reference)?
    } else {
        ReferenceText::open(&cli.reference)?
    };

    let show_progress = !cli.quiet && std::io::stderr().is_terminal();
    let mut config = IndexConfig::new(pattern.len()).silent(!show_progress);
    if let Some(buckets) = cli.buckets {
        config = config.with_buckets(buckets);
    }
    if let Some(threads) = cli.threads {
        config = config.with_threads(threads);
    }

    let index = FilterIndexBuilder::new(config).build(&reference)?;
    tracing::info!(
        entries = index.entry_count(),
        buckets = index.bucket_count(),
        "index built"
    );

    if cli.stats {
        let stats = IndexStats::collect(&index);
        stats
            .write_report(&mut std::io::stderr())
            .context("Failed to write statistics")?;
    }

    let positions = QueryEngine::new(&index).query(&pattern)?;
    tracing::info!(count = positions.len(), "query complete");

    if cli.windows {
        let color = cli.color.choice(std::io::stdout().is_terminal());
        output::print_windows(&positions, &reference, pattern.as_bytes(), color)
            .context("Failed to write results")?;
    } else {
        let format = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        };
        output::print_positions(&positions, pattern.len(), format)
            .context("Failed to write results")?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    let color = cli.color.choice(std::io::stderr().is_terminal());

    if let Err(err) = run(cli) {
        output::print_error(&err, color);
        let code = err
            .downcast_ref::<IndexError>()
            .map(IndexError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}
