use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use procbench::command::CommandLine;
use procbench::config::{self, Config};
use procbench::harness::RunHarness;
use procbench::report;
use procbench::types::HarnessConfig;

const EXAMPLES: &str = "\
Examples:
  procbench python -s script.py -x \"1000\" -t 10 -o result.txt
    Runs 'python script.py 1000' 10 times and saves the results to result.txt.
    'python' is looked up on PATH.
  procbench example -a 30 -o
    Runs 'example' 30 times in parallel batches and saves the results to
    benchmark_result.txt.";

#[derive(Parser)]
#[command(
    name = "procbench",
    version,
    about = "Measure how long a command takes to run",
    after_help = EXAMPLES
)]
struct Cli {
    /// Executable to benchmark, or the interpreter when --script is given
    target: String,

    /// Number of sequential runs (1-100)
    #[arg(short = 't', long, conflicts_with = "parallel")]
    runs: Option<usize>,

    /// Run in parallel batches; optionally the number of runs (1-100)
    #[arg(short = 'a', long)]
    parallel: Option<Option<usize>>,

    /// Maximum number of runs in flight at once in parallel mode
    #[arg(short = 'j', long, requires = "parallel")]
    jobs: Option<usize>,

    /// Also save the results to a file (default: benchmark_result.txt)
    #[arg(short, long)]
    output: Option<Option<PathBuf>>,

    /// Extra arguments for the benchmarked program, e.g. -x "--size 1000"
    #[arg(short = 'x', long = "args", allow_hyphen_values = true)]
    extra: Option<String>,

    /// Script or file passed to TARGET, which is resolved through PATH
    #[arg(short, long)]
    script: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log each run and batch to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "procbench=debug" } else { "procbench=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::discover()?;

    let harness_config = match cli.parallel {
        // Without an explicit count, parallel mode runs once per concurrency slot.
        Some(runs) => HarnessConfig::parallel(
            config::clamp_runs(runs.unwrap_or_else(|| config.concurrency())),
            cli.jobs.unwrap_or_else(|| config.concurrency()),
        ),
        None => {
            let runs = cli.runs.map_or_else(|| config.runs(), config::clamp_runs);
            HarnessConfig::sequential(runs)
        }
    };

    // With --script, TARGET names the interpreter and the script is what runs.
    let (target, interpreter) = match &cli.script {
        Some(script) => (script.as_str(), Some(cli.target.as_str())),
        None => (cli.target.as_str(), None),
    };
    let command = CommandLine::build(target, interpreter, cli.extra.as_deref())?;

    let report = RunHarness::new(harness_config).run(&command)?;

    if cli.json {
        println!("{}", report::format_json(&report)?);
    } else {
        print!("{}", report::format_console(&report));
    }

    if let Some(path) = &cli.output {
        let path = path.clone().unwrap_or_else(|| config.output_file());
        let contents = report::format_text_file(&report, target, Local::now());
        report::write_report(&path, &contents)?;
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
