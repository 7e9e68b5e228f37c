mod scenarios;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use scenarios::{Scenario, ScenarioCtx, all_scenarios, find_scenario};

#[derive(Debug, Parser)]
#[command(name = "scorebook-tester", version = "0.1.0")]
#[command(about = "Automated QA scenarios for the Scorebook league portal")]
struct Args {
    /// Scenarios to run (comma-separated names, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Optional path for the JSON report instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for snapshot files written by persistence scenarios
    #[arg(long, default_value = "target/qa-artifacts")]
    artifacts_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct ScenarioOutcome {
    name: &'static str,
    passed: bool,
    duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    generated_at: String,
    total: usize,
    passed: usize,
    failed: usize,
    duration_ms: u128,
    outcomes: &'a [ScenarioOutcome],
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        print_scenario_list();
        return Ok(());
    }

    announce_banner();
    let selected = select_scenarios(&args.scenarios);
    let ctx = ScenarioCtx {
        artifacts_dir: args.artifacts_dir.clone(),
    };

    let start = Instant::now();
    let outcomes = run_scenarios(&selected, &ctx);
    let total_duration = start.elapsed();

    write_report(&args, &outcomes, total_duration)?;

    if outcomes.iter().any(|outcome| !outcome.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn announce_banner() {
    println!("{}", "🏆 Scorebook Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn print_scenario_list() {
    println!("Available scenarios:");
    for scenario in all_scenarios() {
        println!("  {:22} - {}", scenario.name(), scenario.description());
    }
}

fn select_scenarios(arg: &str) -> Vec<String> {
    let names: Vec<String> = arg
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    if names.iter().any(|name| name == "all") {
        all_scenarios()
            .iter()
            .map(|scenario| scenario.name().to_string())
            .collect()
    } else {
        names
    }
}

fn run_scenarios(names: &[String], ctx: &ScenarioCtx) -> Vec<ScenarioOutcome> {
    println!("{}", "🧪 Running Portal Scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let mut outcomes = Vec::new();
    for name in names {
        let Some(scenario) = find_scenario(name) else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
            continue;
        };
        outcomes.push(run_one(&scenario, ctx));
    }
    outcomes
}

fn run_one(scenario: &Scenario, ctx: &ScenarioCtx) -> ScenarioOutcome {
    log::debug!("running scenario {}", scenario.name());
    let started = Instant::now();
    match scenario.run(ctx) {
        Ok(()) => {
            let duration = started.elapsed();
            println!("✅ {} - {duration:?}", scenario.name().green());
            ScenarioOutcome {
                name: scenario.name(),
                passed: true,
                duration_ms: duration.as_millis(),
                error: None,
            }
        }
        Err(err) => {
            let duration = started.elapsed();
            eprintln!("❌ {} - {duration:?}: {err:#}", scenario.name().red());
            ScenarioOutcome {
                name: scenario.name(),
                passed: false,
                duration_ms: duration.as_millis(),
                error: Some(format!("{err:#}")),
            }
        }
    }
}

fn write_report(args: &Args, outcomes: &[ScenarioOutcome], total_duration: Duration) -> Result<()> {
    match args.report.as_str() {
        "json" => write_json_report(args, outcomes, total_duration),
        _ => {
            print_console_summary(outcomes, total_duration);
            Ok(())
        }
    }
}

fn print_console_summary(outcomes: &[ScenarioOutcome], total_duration: Duration) {
    println!();
    println!("{}", "📊 Scenario Summary".bright_cyan().bold());
    println!("{}", "===================".cyan());

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|outcome| outcome.passed).count();
    let failed = total - passed;

    println!("Total scenarios: {total}");
    println!("Passed: {}", passed.to_string().green());
    println!("Failed: {}", failed.to_string().red());
    if total > 0 {
        #[allow(clippy::cast_precision_loss)]
        let success_rate = (passed as f64 / total as f64) * 100.0;
        println!("Success rate: {success_rate:.1}%");
    }
    println!("Total time: {total_duration:?}");
}

fn write_json_report(
    args: &Args,
    outcomes: &[ScenarioOutcome],
    total_duration: Duration,
) -> Result<()> {
    let report = Report {
        generated_at: Utc::now().to_rfc3339(),
        total: outcomes.len(),
        passed: outcomes.iter().filter(|outcome| outcome.passed).count(),
        failed: outcomes.iter().filter(|outcome| !outcome.passed).count(),
        duration_ms: total_duration.as_millis(),
        outcomes,
    };
    let payload = serde_json::to_string_pretty(&report).context("serializing the report")?;
    match &args.output {
        Some(path) => std::fs::write(path, payload)
            .with_context(|| format!("writing the report to {}", path.display()))?,
        None => println!("{payload}"),
    }
    Ok(())
}
