//! eval-runner: headless evaluator for business-strategy simulator output.
//!
//! Usage:
//!   eval-runner --config study.json
//!   eval-runner --file MasterOutputMaxDemand12.csv --file MasterOutputMaxDemand13.csv
//!   eval-runner --config study.json --json

use anyhow::{bail, Result};
use simeval_core::{
    evaluate_batch,
    evaluation::{BatchReport, FileOutcome, GroupReport},
    EvalConfig,
};
use std::env;
use std::path::{Path, PathBuf};

const SEPARATOR: &str = "------------------------------------------------";

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    starting_capital: f64,
    evaluated: usize,
    failed: usize,
    #[serde(flatten)]
    batch: &'a BatchReport,
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    config_path: Option<String>,
    files: Vec<PathBuf>,
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let CliArgs {
        config_path,
        files,
        json,
    } = parse_args(&args)?;

    let mut config = match config_path {
        Some(path) => EvalConfig::load(&path)?,
        None => EvalConfig::default_study(),
    };
    if !files.is_empty() {
        config = config.with_files(files);
    }
    config.validate()?;

    let batch = evaluate_batch(&config);

    if json {
        let report = JsonReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            starting_capital: config.starting_capital,
            evaluated: batch.evaluated(),
            failed: batch.failed(),
            batch: &batch,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_batch(&batch);
    }

    if !batch.outcomes.is_empty() && batch.evaluated() == 0 {
        bail!("all {} input files failed to evaluate", batch.failed());
    }
    Ok(())
}

fn print_batch(batch: &BatchReport) {
    for outcome in &batch.outcomes {
        println!("{SEPARATOR}");
        println!("Results for the data stored in {}:\n", file_name(outcome.file()));
        match outcome {
            FileOutcome::Evaluated(report) => {
                for (i, group) in report.groups.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print_group(group);
                }
            }
            FileOutcome::Failed { error, .. } => println!("Error reading file: {error}"),
        }
        println!("{SEPARATOR}");
    }
    log::info!(
        "evaluated {} files, {} failed",
        batch.evaluated(),
        batch.failed()
    );
}

fn print_group(group: &GroupReport) {
    let label = &group.label;
    let Some(percent) = group.percent_surviving else {
        println!("The {label}: no data.");
        return;
    };
    println!("The {label} avoided bankruptcy in {percent:.2} percent of the simulations.");
    if let Some(avg) = group.average_capital_if_surviving {
        match group.growth_multiple {
            Some(growth) => println!(
                "When avoiding bankruptcy, the {label} finished with an average capital of {avg:.2} ({growth:.2}x starting capital)."
            ),
            None => println!(
                "When avoiding bankruptcy, the {label} finished with an average capital of {avg:.2}."
            ),
        }
    }
}

fn file_name(file: &str) -> String {
    Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string())
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let config_path = match flag_values(args, "--config")?.as_slice() {
        [] => None,
        [path] => Some(path.to_string()),
        _ => bail!("--config given more than once"),
    };
    let files = flag_values(args, "--file")?
        .into_iter()
        .map(PathBuf::from)
        .collect();
    Ok(CliArgs {
        config_path,
        files,
        json: args.iter().any(|a| a == "--json"),
    })
}

/// Every value following `flag`. A flag with no value is an error.
fn flag_values<'a>(args: &'a [String], flag: &str) -> Result<Vec<&'a str>> {
    let mut values = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        if arg != flag {
            continue;
        }
        match args.get(i + 1) {
            Some(value) if !value.starts_with("--") => values.push(value.as_str()),
            _ => bail!("{flag} requires a value"),
        }
    }
    Ok(values)
}
