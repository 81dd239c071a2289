//! Driver for the notebook write-style harness.
//!
//! # Responsibility
//! - Parse the single target-path argument and report usage errors.
//! - Run the four write styles in fixed order with pauses in between so a
//!   concurrently running file watcher has time to react to each one.
//! - Map sequence outcomes onto process exit codes.
//!
//! # Invariants
//! - Usage errors exit 1 before any file system access.
//! - Any error from the write sequence is caught here, printed, and exits 1.

use log::{error, info, warn};
use nbprobe_core::{default_log_level, ensure_parent_dir, init_logging, Step, WriteResult};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(3);
const DEFAULT_STEP_PAUSE: Duration = Duration::from_secs(1);
const STARTUP_DELAY_ENV: &str = "NBPROBE_STARTUP_DELAY_MS";
const STEP_PAUSE_ENV: &str = "NBPROBE_STEP_PAUSE_MS";

/// Pauses that give the external observer time to react between writes.
///
/// The pauses are a manual synchronization aid, not a guarantee.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    startup_delay: Duration,
    step_pause: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            startup_delay: DEFAULT_STARTUP_DELAY,
            step_pause: DEFAULT_STEP_PAUSE,
        }
    }
}

impl RunConfig {
    /// Reads pause overrides from the environment, keeping defaults when a
    /// variable is absent or unparseable.
    fn from_env() -> Self {
        Self {
            startup_delay: duration_from_env(STARTUP_DELAY_ENV, DEFAULT_STARTUP_DELAY),
            step_pause: duration_from_env(STEP_PAUSE_ENV, DEFAULT_STEP_PAUSE),
        }
    }
}

fn duration_from_env(var: &str, default: Duration) -> Duration {
    match env::var(var) {
        Ok(raw) => parse_millis(var, &raw, default),
        Err(_) => default,
    }
}

fn parse_millis(var: &str, raw: &str, default: Duration) -> Duration {
    match raw.trim().parse::<u64>() {
        Ok(millis) => Duration::from_millis(millis),
        Err(_) => {
            warn!(
                "event=config_fallback module=cli status=warn var={var} value={raw} \
                 default_ms={}",
                default.as_millis()
            );
            default
        }
    }
}

/// Wrong number of positional arguments.
#[derive(Debug, PartialEq, Eq)]
struct UsageError {
    received: usize,
}

fn parse_args(args: &[String]) -> Result<PathBuf, UsageError> {
    if args.len() != 2 {
        return Err(UsageError {
            received: args.len().saturating_sub(1),
        });
    }
    Ok(PathBuf::from(&args[1]))
}

fn print_usage(program: &str) {
    println!("Usage: {program} <notebook_path>");
    println!("Example: {program} test.ipynb");
}

fn run(path: &Path, config: &RunConfig) -> WriteResult<()> {
    ensure_parent_dir(path)?;

    println!("Exercising notebook write styles on: {}", path.display());
    println!("{}", "=".repeat(60));
    println!(
        "Starting in {}s... (watch the observer console for change events)",
        config.startup_delay.as_secs_f32()
    );
    thread::sleep(config.startup_delay);

    let total = Step::ALL.len();
    for (index, step) in Step::ALL.into_iter().enumerate() {
        println!(
            "Step {}/{total}: {} -> {}",
            index + 1,
            step.title(),
            path.display()
        );
        step.run(path)?;
        println!("  ok: {}", step.detail());
        info!(
            "event=step_done module=cli status=ok step={} path={}",
            step.title(),
            path.display()
        );
        thread::sleep(config.step_pause);
    }

    println!("{}", "=".repeat(60));
    println!("All write styles completed.");
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("nbprobe");

    let path = match parse_args(&args) {
        Ok(path) => path,
        Err(usage) => {
            println!("expected exactly one argument, got {}", usage.received);
            print_usage(program);
            return ExitCode::FAILURE;
        }
    };

    if let Err(message) = init_logging(default_log_level()) {
        // Diagnostics are best-effort; the write sequence still runs.
        eprintln!("warning: {message}");
    }

    let config = RunConfig::from_env();
    match run(&path, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error during write sequence: {err}");
            error!("event=sequence_failed module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
