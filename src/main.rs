mod config;
mod gate;
mod lint;
mod output;
mod score;

use clap::Parser;
use gate::GateOutcome;
use lint::{CommandLinter, FileLinter, Linter, StaticLinter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Run a linter and print the quality score from its report.
#[derive(Parser, Debug)]
#[command(name = "lint-score", version, about)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "lint-score.toml")]
    config: PathBuf,

    /// Lint command (overrides config)
    #[arg(long)]
    command: Option<String>,

    /// Directory to run the lint command in (overrides config)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Read a saved report instead of running the linter ("-" for stdin)
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Fail with exit code 1 when the score is below this value (overrides config)
    #[arg(long)]
    min_score: Option<f64>,

    /// Print a JSON record instead of the bare score
    #[arg(long)]
    json: bool,

    /// Print resolved settings, don't run the linter
    #[arg(long)]
    dry_run: bool,

    /// Extra logging (linter invocation, score line)
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Settings after merging the config file with CLI overrides.
#[derive(Debug)]
struct Resolved {
    command: String,
    working_dir: PathBuf,
    fatal_exit_codes: Vec<i32>,
    report: Option<PathBuf>,
    min_score: Option<f64>,
}

fn resolve(cli: &Cli, cfg: config::ScoreConfig) -> Resolved {
    Resolved {
        command: cli.command.clone().unwrap_or(cfg.linter.command),
        working_dir: cli.dir.clone().unwrap_or(cfg.linter.working_dir),
        fatal_exit_codes: cfg.linter.fatal_exit_codes,
        report: cli.report.clone(),
        min_score: cli.min_score.or(cfg.gate.min_score),
    }
}

fn build_linter(resolved: &Resolved) -> Result<Box<dyn Linter>, lint::LintError> {
    match &resolved.report {
        Some(path) if path.as_os_str() == "-" => {
            Ok(Box::new(StaticLinter::from_reader(std::io::stdin().lock())?))
        }
        Some(path) => Ok(Box::new(FileLinter::new(path))),
        None => Ok(Box::new(
            CommandLinter::new(resolved.command.clone(), resolved.working_dir.clone())
                .with_fatal_exit_codes(resolved.fatal_exit_codes.clone()),
        )),
    }
}

fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cfg = config::load_config(&cli.config)?;
    let resolved = resolve(cli, cfg);
    tracing::debug!(?resolved, "resolved settings");

    if cli.dry_run {
        println!("config:      {}", cli.config.display());
        match &resolved.report {
            Some(path) => println!("report:      {}", path.display()),
            None => {
                println!("command:     {}", resolved.command);
                println!("working dir: {}", resolved.working_dir.display());
                println!("fatal codes: {:?}", resolved.fatal_exit_codes);
            }
        }
        match resolved.min_score {
            Some(min) => println!("min score:   {min}"),
            None => println!("min score:   (none)"),
        }
        return Ok(0);
    }

    let linter = build_linter(&resolved)?;
    let score = score::get_score(linter.as_ref())?;
    tracing::info!(score = %score, source = %linter.describe(), "extracted lint score");

    let outcome = gate::evaluate(&score, resolved.min_score)?;

    if cli.json {
        let record = output::ScoreRecord::new(score, &outcome, linter.describe());
        println!("{}", record.to_json()?);
    } else {
        println!("{score}");
    }
    if let Some(banner) = output::gate_banner(&outcome) {
        eprintln!("{banner}");
    }

    Ok(match outcome {
        GateOutcome::Fail { .. } => 1,
        GateOutcome::Unchecked | GateOutcome::Pass { .. } => 0,
    })
}

/// Log level used when `RUST_LOG` is unset.
fn default_log_level(cli: &Cli) -> &'static str {
    if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(&cli))),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "lint-score failed");
            2
        }
    };
    std::process::exit(code);
}
