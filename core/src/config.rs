use crate::{
    error::{EvalError, EvalResult},
    types::{Capital, FirmId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// A labelled cohort of firms reported together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmGroup {
    pub label: String,
    pub firm_ids: Vec<FirmId>,
}

impl FirmGroup {
    pub fn new(label: impl Into<String>, firm_ids: Vec<FirmId>) -> Self {
        Self {
            label: label.into(),
            firm_ids,
        }
    }
}

/// A parameter sweep written as one file per value:
/// `{path_prefix}{N}{path_suffix}` for `N` in `first..=last`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub path_prefix: String,
    #[serde(default = "default_suffix")]
    pub path_suffix: String,
    pub first: u32,
    pub last: u32,
}

fn default_suffix() -> String {
    ".csv".into()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSet {
    #[serde(default)]
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
}

impl InputSet {
    /// Explicit files first, then the sweep in ascending order.
    pub fn resolve_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.files.clone();
        if let Some(sweep) = &self.sweep {
            paths.extend((sweep.first..=sweep.last).map(|n| {
                PathBuf::from(format!("{}{n}{}", sweep.path_prefix, sweep.path_suffix))
            }));
        }
        paths
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    pub inputs: InputSet,
    pub groups: Vec<FirmGroup>,
    /// Capital every firm starts a run with. Not present in the output files.
    #[serde(default = "default_starting_capital")]
    pub starting_capital: Capital,
}

fn default_starting_capital() -> Capital {
    2000.0
}

impl EvalConfig {
    /// Load and validate a JSON study definition.
    pub fn load(path: &str) -> EvalResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::Io {
            path: path.to_string(),
            source: e,
        })?;
        let config: EvalConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// The max-demand sweep: intercepts 6 through 30, one AI agent under
    /// training against two sophisticated and two naive competitors.
    pub fn default_study() -> Self {
        Self {
            inputs: InputSet {
                files: Vec::new(),
                sweep: Some(SweepConfig {
                    path_prefix: "MasterOutputFiles/MasterOutputMaxDemand".into(),
                    path_suffix: default_suffix(),
                    first: 6,
                    last: 30,
                }),
            },
            groups: vec![
                FirmGroup::new("AI agent", vec![4]),
                FirmGroup::new("sophisticated agents", vec![0, 1]),
                FirmGroup::new("naive agents", vec![2, 3]),
            ],
            starting_capital: default_starting_capital(),
        }
    }

    pub fn validate(&self) -> EvalResult<()> {
        if self.inputs.files.is_empty() && self.inputs.sweep.is_none() {
            return Err(EvalError::Config("no input files configured".into()));
        }
        if let Some(sweep) = &self.inputs.sweep {
            if sweep.first > sweep.last {
                return Err(EvalError::Config(format!(
                    "sweep range {}..={} is empty",
                    sweep.first, sweep.last
                )));
            }
        }
        if self.groups.is_empty() {
            return Err(EvalError::Config("no firm groups configured".into()));
        }
        let mut labels = HashSet::new();
        for group in &self.groups {
            if group.firm_ids.is_empty() {
                return Err(EvalError::Config(format!(
                    "group '{}' has no firm ids",
                    group.label
                )));
            }
            let mut ids = HashSet::new();
            if let Some(dup) = group.firm_ids.iter().find(|&&id| !ids.insert(id)) {
                return Err(EvalError::Config(format!(
                    "group '{}' lists firm {dup} more than once",
                    group.label
                )));
            }
            if !labels.insert(group.label.as_str()) {
                return Err(EvalError::Config(format!(
                    "duplicate group label '{}'",
                    group.label
                )));
            }
        }
        if !(self.starting_capital.is_finite() && self.starting_capital > 0.0) {
            return Err(EvalError::Config(format!(
                "starting_capital must be positive, got {}",
                self.starting_capital
            )));
        }
        Ok(())
    }

    pub fn resolve_paths(&self) -> Vec<PathBuf> {
        self.inputs.resolve_paths()
    }

    /// Replace the configured inputs with an explicit file list.
    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.inputs = InputSet { files, sweep: None };
        self
    }
}
