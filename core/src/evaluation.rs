//! Batch evaluation — one report per simulator output file.
//!
//! Files are evaluated in configured order. A file that fails to load is
//! recorded as failed and the batch moves on to the next one.

use crate::{
    config::{EvalConfig, FirmGroup},
    error::{EvalError, EvalResult},
    statistics::{compute_statistics, GroupStatistics},
    table::SimTable,
    types::{Capital, FirmId, Step},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    pub label: String,
    pub firm_ids: Vec<FirmId>,
    pub percent_surviving: Option<f64>,
    pub average_capital_if_surviving: Option<Capital>,
    /// Survivor average divided by starting capital.
    pub growth_multiple: Option<f64>,
    pub stats: GroupStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub rows: usize,
    pub num_simulations: u32,
    pub final_step: Step,
    pub groups: Vec<GroupReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Evaluated(FileReport),
    Failed { file: String, error: String },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Evaluated(report) => &report.file,
            FileOutcome::Failed { file, .. } => file,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn evaluated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Evaluated(_)))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.evaluated()
    }
}

/// Statistics for each group, in group order.
pub fn evaluate_table(
    table: &SimTable,
    groups: &[FirmGroup],
    starting_capital: Capital,
) -> EvalResult<Vec<GroupReport>> {
    groups
        .iter()
        .map(|group| {
            let stats = compute_statistics(table, &group.firm_ids)?;
            let (percent_surviving, average_capital_if_surviving) = stats.as_pair();
            let growth_multiple = average_capital_if_surviving
                .filter(|_| starting_capital > 0.0)
                .map(|avg| avg / starting_capital);
            Ok(GroupReport {
                label: group.label.clone(),
                firm_ids: group.firm_ids.clone(),
                percent_surviving,
                average_capital_if_surviving,
                growth_multiple,
                stats,
            })
        })
        .collect()
}

pub fn evaluate_file(path: &Path, config: &EvalConfig) -> EvalResult<FileReport> {
    let table = SimTable::from_path(path)?;
    let final_step = table.final_step().ok_or(EvalError::EmptyTable)?;
    let groups = evaluate_table(&table, &config.groups, config.starting_capital)?;
    Ok(FileReport {
        file: path.display().to_string(),
        rows: table.len(),
        num_simulations: table.num_simulations(),
        final_step,
        groups,
    })
}

/// Evaluate every configured input. Never fails as a whole.
pub fn evaluate_batch(config: &EvalConfig) -> BatchReport {
    let paths = config.resolve_paths();
    log::info!("evaluation: {} input files, {} groups", paths.len(), config.groups.len());

    let outcomes = paths
        .iter()
        .map(|path| match evaluate_file(path, config) {
            Ok(report) => FileOutcome::Evaluated(report),
            Err(e) => {
                log::error!("evaluation: {} failed: {e}", path.display());
                FileOutcome::Failed {
                    file: path.display().to_string(),
                    error: e.to_string(),
                }
            }
        })
        .collect();

    BatchReport { outcomes }
}
