use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the relief logistics workspace",
    long_about = "A unified CLI for running the demo scenario, batch planning,\n\
                  benchmarks, and CI checks in the relief logistics workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the three demo disasters and print the results
    Run,
    /// Plan every active disaster of a scenario file in parallel
    Batch {
        /// Scenario JSON file
        #[arg(long, env = "RELIEF_SCENARIO", default_value = "scenarios/demo.json")]
        scenario: String,
        /// Reserve planned stock in priority order
        #[arg(long)]
        commit: bool,
        /// Worker threads
        #[arg(long)]
        threads: Option<usize>,
        /// Output directory for plans.json, summary.csv and commitments.json
        #[arg(long)]
        out_dir: Option<String>,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Run the example scenario and a demo batch
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn batch_args(
    scenario: &str,
    commit: bool,
    threads: Option<usize>,
    out_dir: Option<&str>,
) -> Vec<String> {
    let mut args: Vec<String> = ["run", "-p", "relief_batch", "--release", "--", "--scenario"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    args.push(scenario.to_string());
    if commit {
        args.push("--commit".into());
    }
    if let Some(threads) = threads {
        args.push("--threads".into());
        args.push(threads.to_string());
    }
    if let Some(dir) = out_dir {
        args.push("--json".into());
        args.push(format!("{dir}/plans.json"));
        args.push("--csv".into());
        args.push(format!("{dir}/summary.csv"));
        if commit {
            args.push("--commitments".into());
            args.push(format!("{dir}/commitments.json"));
        }
    }
    args
}

fn run_batch(scenario: &str, commit: bool, threads: Option<usize>, out_dir: Option<&str>) {
    let args = batch_args(scenario, commit, threads, out_dir);
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_cargo(&refs);
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test relief_core");
    run_cargo(&["test", "-p", "relief_core"]);

    step("Test relief_batch");
    run_cargo(&["test", "-p", "relief_batch"]);
}

fn ci_examples() {
    step("Run scenario_run (demo disasters)");
    run_cargo(&[
        "run",
        "-p",
        "relief_core",
        "--example",
        "scenario_run",
        "--release",
    ]);

    step("Run demo batch with commits");
    run_batch("scenarios/demo.json", true, None, Some("target/relief_batch"));
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "relief_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_cargo(&[
                "run",
                "-p",
                "relief_core",
                "--example",
                "scenario_run",
                "--release",
            ]);
        }
        Commands::Batch {
            scenario,
            commit,
            threads,
            out_dir,
        } => {
            run_batch(&scenario, commit, threads, out_dir.as_deref());
        }
        Commands::Bench => {
            run_cargo(&["bench", "--package", "relief_core", "--bench", "performance"]);
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_args_include_outputs_and_commitments() {
        let args = batch_args("s.json", true, Some(4), Some("out"));
        assert_eq!(&args[..6], ["run", "-p", "relief_batch", "--release", "--", "--scenario"]);
        assert!(args.contains(&"--commit".to_string()));
        assert!(args.contains(&"out/commitments.json".to_string()));
        assert!(args.windows(2).any(|w| w[0] == "--threads" && w[1] == "4"));
    }

    #[test]
    fn batch_args_skip_commitments_without_commit() {
        let args = batch_args("s.json", false, None, Some("out"));
        assert!(!args.iter().any(|a| a.contains("commitments")));
        assert!(args.contains(&"out/summary.csv".to_string()));
    }
}
