// CLI entry point for the brickfall stability analysis.
//
// Reads a snapshot (from a file, or stdin when no file or `-` is given),
// settles it, and prints the safe-removal count and the total cascade size,
// one per line. See `lib.rs` for the library half.
//
// Usage:
//   brickfall [OPTIONS] [FILE]
//     -c, --config <PATH>      JSON AnalysisConfig (partial files allowed)
//         --strategy <S>       relaxation | sorted
//         --sequential         Simulate cascades on one thread
//         --json               Print the full report as JSON
//         --top <N>            Also list the N most dangerous blocks
//         --settled            Print the settled snapshot instead of answers
//         --timings            Print settle / support graph / cascade
//                              timings to stderr
//
// Logging goes through `env_logger`; set `RUST_LOG=debug` for per-phase
// statistics.
//
// Exit codes: 0 ok, 1 unreadable input or config, 2 parse error,
// 3 analysis error.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::exit;

use brickfall_cli::report::{render_answers, render_json, render_timings, render_top};
use brickfall_cli::{RunError, run, settled_snapshot};
use brickfall_sim::{AnalysisConfig, SettleStrategy};
use clap::{Parser, ValueEnum};

/// Settle a pile of blocks and report which ones are safe to remove.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Snapshot file; `-` or nothing reads stdin
    file: Option<PathBuf>,

    /// JSON analysis config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Settling algorithm (overrides the config)
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Simulate cascades on a single thread
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Print the full report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also list the N blocks whose removal brings down the most others
    #[arg(long)]
    top: Option<usize>,

    /// Print the settled snapshot instead of the answers
    #[arg(long, default_value_t = false)]
    settled: bool,

    /// Print how long each phase took to stderr
    #[arg(long, default_value_t = false)]
    timings: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Relaxation,
    Sorted,
}

impl From<StrategyArg> for SettleStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Relaxation => SettleStrategy::Relaxation,
            StrategyArg::Sorted => SettleStrategy::SortedPass,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(&cli);
    let text = read_input(cli.file.as_ref());

    if cli.settled {
        match settled_snapshot(&text, &config) {
            Ok(out) => print!("{out}"),
            Err(e) => fail(e),
        }
        return;
    }

    let report = match run(&text, &config) {
        Ok(report) => report,
        Err(e) => fail(e),
    };
    if cli.timings {
        eprint!("{}", render_timings(&report));
    }

    if cli.json {
        match render_json(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Could not serialize report: {e}");
                exit(1);
            }
        }
        return;
    }

    print!("{}", render_answers(&report));
    if let Some(n) = cli.top {
        print!("{}", render_top(&report, n));
    }
}

/// Config file (if any) with command-line overrides applied.
fn load_config(cli: &Cli) -> AnalysisConfig {
    let mut config = match &cli.config {
        Some(path) => {
            let Ok(json) = fs::read_to_string(path) else {
                eprintln!("Could not read config: {}", path.display());
                exit(1);
            };
            AnalysisConfig::from_json(&json).unwrap_or_else(|e| {
                eprintln!("Invalid config {}: {e}", path.display());
                exit(1);
            })
        }
        None => AnalysisConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        config.settle_strategy = strategy.into();
    }
    if cli.sequential {
        config.parallel_cascades = false;
    }
    log::debug!("config: {config:?}");
    config
}

fn read_input(file: Option<&PathBuf>) -> String {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            let Ok(contents) = fs::read_to_string(path) else {
                eprintln!("Could not read file: {}", path.display());
                exit(1);
            };
            contents
        }
        _ => {
            let mut contents = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut contents) {
                eprintln!("Could not read stdin: {e}");
                exit(1);
            }
            contents
        }
    }
}

fn fail(err: RunError) -> ! {
    eprintln!("{err}");
    exit(match err {
        RunError::Snapshot(_) => 2,
        RunError::Analysis(_) => 3,
    })
}
