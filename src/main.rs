use clap::Parser;
use rowgate::{DatasetGate, Error, ErrorKind, GateConfig, GateOutcome, Row};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

/// Append a row to a CSV dataset unless its text is a near-duplicate
#[derive(Parser, Debug)]
#[command(name = "rowgate")]
#[command(about = "Append a row to a CSV dataset unless its text is a near-duplicate", long_about = None)]
struct Args {
    /// Row data as key=value pairs (columns = keys)
    pairs: Vec<String>,

    /// Path to the CSV dataset
    #[arg(short, long, default_value = "dataset.csv")]
    file: PathBuf,

    /// Column checked for near-duplicates
    #[arg(long)]
    check_col: String,

    /// Character-similarity threshold (0.0-1.0)
    #[arg(long)]
    threshold: Option<f64>,

    /// Token-Jaccard threshold (0.0-1.0); derived from --threshold when omitted
    #[arg(long)]
    token_threshold: Option<f64>,

    /// Only lowercase and trim before comparing
    #[arg(long)]
    no_normalize: bool,

    /// Minimum normalized length to enforce the check (0 disables)
    #[arg(long)]
    min_length: Option<usize>,

    /// Name of the timestamp column
    #[arg(long)]
    timestamp_col: Option<String>,

    /// Create new datasets at the literal path instead of a timestamped name
    #[arg(long)]
    no_stamp_filename_on_create: bool,

    /// Refuse dataset paths outside this directory
    #[arg(long)]
    allowed_root: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run the duplicate check without appending
    #[arg(long)]
    check_only: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Suppress confirmation output on success
    #[arg(short, long)]
    quiet: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

const EXIT_REJECTED: u8 = 1;
const EXIT_CONFIG: u8 = 2;
const EXIT_STORAGE: u8 = 3;

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            match err.downcast_ref::<Error>().map(Error::kind) {
                Some(ErrorKind::Storage) => ExitCode::from(EXIT_STORAGE),
                _ => ExitCode::from(EXIT_CONFIG),
            }
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let config = load_config(args)?;
    debug!("Gate config: {:?}", config);

    let row = Row::from_pairs(&args.pairs)?;
    let gate = DatasetGate::new(config)?;

    if args.check_only {
        return Ok(match gate.check(&args.file, &args.check_col, &row)? {
            Some(report) => {
                print_json_or(args.json, &GateOutcome::Rejected(report.clone()), &report)?;
                ExitCode::from(EXIT_REJECTED)
            }
            None => {
                if !args.quiet {
                    println!("PASS: Input appears unique.");
                }
                ExitCode::SUCCESS
            }
        });
    }

    let outcome = gate.submit(&args.file, &args.check_col, &row)?;
    match &outcome {
        GateOutcome::Accepted(accepted) => {
            if !args.quiet {
                print_json_or(args.json, &outcome, accepted)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        GateOutcome::Rejected(report) => {
            print_json_or(args.json, &outcome, report)?;
            Ok(ExitCode::from(EXIT_REJECTED))
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<GateConfig> {
    let mut config = match &args.config {
        Some(path) => GateConfig::from_json_file(path)?,
        None => GateConfig::default(),
    };

    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if args.token_threshold.is_some() {
        config.token_threshold = args.token_threshold;
    }
    if args.no_normalize {
        config.normalize = false;
    }
    if let Some(min_length) = args.min_length {
        config.min_length = min_length;
    }
    if let Some(column) = &args.timestamp_col {
        config.timestamp_column = column.clone();
    }
    if args.no_stamp_filename_on_create {
        config.stamp_filename_on_create = false;
    }
    if let Some(root) = &args.allowed_root {
        config.allowed_root = Some(root.clone());
    }

    Ok(config)
}

fn print_json_or(json: bool, outcome: &GateOutcome, text: &dyn std::fmt::Display) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}
