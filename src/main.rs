//! simmstring CLI: best Jaro-Winkler matches of source lines among target lines.

use anyhow::{Context, Result};
use clap::Parser;
use simmstring::io::is_stdin;
use simmstring::sink::make_sink;
use simmstring::{
    logging, IoLimits, LineSource, MatchConfig, Matcher, OutputFormat, SimmError, SortOrder,
    TargetSet,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "simmstring",
    version,
    about = "Find the best-matching target lines for each source line",
    after_help = "Example:\n  simmstring --source test_strings.txt --target ref_strings.txt -n 3"
)]
struct Cli {
    /// File with source strings, one per line ('-' for stdin).
    #[arg(short, long)]
    source: PathBuf,

    /// File with target strings, one per line ('-' for stdin).
    #[arg(short, long)]
    target: PathBuf,

    /// Number of matches kept per source line.
    #[arg(short = 'n', long)]
    num_matches: Option<usize>,

    /// Jaro score above which the common-prefix boost applies.
    #[arg(long)]
    boost_threshold: Option<f64>,

    /// Number of leading characters considered for the prefix boost.
    #[arg(long)]
    prefix_size: Option<usize>,

    /// Order of the records emitted for each source line.
    #[arg(long, value_enum)]
    order: Option<SortOrder>,

    /// Output layout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write a `source,target,score` header row (CSV only).
    #[arg(long)]
    header: bool,

    /// Write records here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with matching parameters; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Process source lines in parallel batches.
    #[arg(long)]
    parallel: bool,

    /// Longest accepted input line in bytes.
    #[arg(long)]
    max_line_bytes: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn match_config(&self) -> Result<MatchConfig> {
        let mut cfg = match &self.config {
            Some(path) => MatchConfig::from_json_file(path)?,
            None => MatchConfig::default(),
        };
        if let Some(n) = self.num_matches {
            cfg.num_matches = n;
        }
        if let Some(b) = self.boost_threshold {
            cfg.boost_threshold = b;
        }
        if let Some(p) = self.prefix_size {
            cfg.prefix_size = p;
        }
        if let Some(order) = self.order {
            cfg.order = order;
        }
        cfg.parallel |= self.parallel;
        cfg.validate()?;
        if is_stdin(&self.source) && is_stdin(&self.target) {
            return Err(SimmError::InvalidConfiguration(
                "source and target cannot both be stdin".to_string(),
            )
            .into());
        }
        Ok(cfg)
    }

    fn io_limits(&self) -> IoLimits {
        let mut limits = IoLimits::default();
        if let Some(max) = self.max_line_bytes {
            limits.max_line_bytes = max;
        }
        limits
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = cli.match_config()?;
    let limits = cli.io_limits();
    info!(
        num_matches = cfg.num_matches,
        boost_threshold = cfg.boost_threshold,
        prefix_size = cfg.prefix_size,
        order = ?cfg.order,
        "Configuration loaded"
    );

    // Both inputs must open before any matching starts.
    let sources = LineSource::open(&cli.source, limits.clone())?;
    let target_lines = LineSource::open(&cli.target, limits)?;
    let targets = TargetSet::try_build(target_lines)
        .with_context(|| format!("Error reading target {}", cli.target.display()))?;

    let mut sink = match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create output {}", path.display()))?;
            make_sink(cli.format, BufWriter::new(file), cli.header)?
        }
        None => make_sink(cli.format, BufWriter::new(std::io::stdout()), cli.header)?,
    };

    let matcher = Matcher::new(cfg, targets)?;
    let stats = matcher.run(sources, &mut sink).context("Matching failed")?;
    info!(sources = stats.sources, records = stats.records, "Done");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if cli.log_json {
        logging::init_tracing_json(cli.verbose);
    } else {
        logging::init_tracing(cli.verbose);
    }

    if let Err(e) = run(cli) {
        eprintln!("simmstring: {e:#}");
        std::process::exit(1);
    }
}
