//! Simulation output table — loaded once, read-only afterwards.
//!
//! The simulator writes one row per (sim, step, firm, market) with the
//! firm's capital at that step. Extra columns are ignored.

use crate::{
    error::{EvalError, EvalResult},
    types::{Capital, FirmId, MarketId, SimIndex, Step},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimRecord {
    #[serde(rename = "Sim")]
    pub sim: SimIndex,
    #[serde(rename = "Step")]
    pub step: Step,
    #[serde(rename = "Firm")]
    pub firm: FirmId,
    #[serde(rename = "Market")]
    pub market: MarketId,
    #[serde(rename = "Capital")]
    pub capital: Capital,
}

impl SimRecord {
    fn key(&self) -> RecordKey {
        RecordKey {
            sim: self.sim,
            step: self.step,
            firm: self.firm,
            market: self.market,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RecordKey {
    sim: SimIndex,
    step: Step,
    firm: FirmId,
    market: MarketId,
}

#[derive(Debug, Clone)]
pub struct SimTable {
    records: Vec<SimRecord>,
    index: HashMap<RecordKey, usize>,
    final_step: Option<Step>,
    max_sim: Option<SimIndex>,
}

impl SimTable {
    /// Build a table from records in file order.
    /// On a duplicate (sim, step, firm, market) the first row wins.
    ///
    /// Sim indices must be dense from 0, so every run has at least one row:
    /// `max(sim) + 1` can never exceed the row count.
    pub fn from_records(records: Vec<SimRecord>) -> EvalResult<Self> {
        let max_sim = records.iter().map(|r| r.sim).max();
        if let Some(max_sim) = max_sim {
            if max_sim as usize >= records.len() {
                return Err(EvalError::SparseSimIndex {
                    max_sim,
                    rows: records.len(),
                });
            }
        }

        let mut index = HashMap::with_capacity(records.len());
        let mut duplicates = 0usize;
        for (i, record) in records.iter().enumerate() {
            if index.contains_key(&record.key()) {
                duplicates += 1;
                continue;
            }
            index.insert(record.key(), i);
        }
        if duplicates > 0 {
            log::warn!("table: {duplicates} duplicate (sim, step, firm, market) rows ignored");
        }

        let final_step = records.iter().map(|r| r.step).max();

        Ok(Self {
            records,
            index,
            final_step,
            max_sim,
        })
    }

    /// Load from a delimited file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| EvalError::Csv {
                path: source.clone(),
                source: e,
            })?;
        Self::from_csv(reader, &source)
    }

    /// Load from any reader. `source` names the input in errors and logs.
    pub fn from_reader<R: io::Read>(reader: R, source: &str) -> EvalResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(reader, source)
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>, source: &str) -> EvalResult<Self> {
        let mut records = Vec::new();
        for row in reader.deserialize::<SimRecord>() {
            let record = row.map_err(|e| EvalError::Csv {
                path: source.to_string(),
                source: e,
            })?;
            records.push(record);
        }
        let table = Self::from_records(records)?;
        log::debug!(
            "table: loaded {} rows from {source} ({} sims, final step {:?})",
            table.len(),
            table.num_simulations(),
            table.final_step
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SimRecord] {
        &self.records
    }

    /// The largest step present. `None` for an empty table.
    pub fn final_step(&self) -> Option<Step> {
        self.final_step
    }

    /// Number of runs, `max(sim) + 1`. Bounded by `len()`.
    pub fn num_simulations(&self) -> u32 {
        self.max_sim.map_or(0, |m| m.saturating_add(1))
    }

    /// Capital of the unique record at (sim, step, firm, market), if present.
    pub fn ending_capital(
        &self,
        sim: SimIndex,
        step: Step,
        firm: FirmId,
        market: MarketId,
    ) -> Option<Capital> {
        let key = RecordKey {
            sim,
            step,
            firm,
            market,
        };
        self.index.get(&key).map(|&i| self.records[i].capital)
    }
}
