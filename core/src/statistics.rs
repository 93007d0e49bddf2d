//! Survival statistics for a group of firms.
//!
//! For every (sim, firm) pair the ending capital is the market-0 value at
//! the table's final step. A pair with no such record is skipped with a
//! warning; it never aborts the computation.
//!
//! "No data" is `None`: the survival percentage is `None` when no pair could
//! be collected, the survivor average is `None` when nobody survived.

use crate::{
    error::{EvalError, EvalResult},
    table::SimTable,
    types::{Capital, FirmId, BANKRUPTCY_TOLERANCE, PRIMARY_MARKET},
};
use serde::{Deserialize, Serialize};

/// A firm is bankrupt when its capital is within tolerance of zero.
pub fn is_bankrupt(capital: Capital) -> bool {
    capital.abs() <= BANKRUPTCY_TOLERANCE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStatistics {
    /// Pairs with a usable ending-capital record.
    pub collected: usize,
    pub surviving: usize,
    pub bankrupt: usize,
    /// Pairs with no record at the final step (or a non-finite value).
    pub missing: usize,
    pub surviving_capital_total: Capital,
}

impl GroupStatistics {
    fn from_values(values: &[Capital], missing: usize) -> Self {
        let mut surviving = 0;
        let mut surviving_capital_total = 0.0;
        for &capital in values {
            if !is_bankrupt(capital) {
                surviving += 1;
                surviving_capital_total += capital;
            }
        }
        Self {
            collected: values.len(),
            surviving,
            bankrupt: values.len() - surviving,
            missing,
            surviving_capital_total,
        }
    }

    /// Percentage of collected pairs that avoided bankruptcy.
    pub fn percent_surviving(&self) -> Option<f64> {
        if self.collected == 0 {
            return None;
        }
        Some(self.surviving as f64 / self.collected as f64 * 100.0)
    }

    /// Mean ending capital over surviving pairs.
    pub fn average_capital_if_surviving(&self) -> Option<Capital> {
        if self.surviving == 0 {
            return None;
        }
        Some(self.surviving_capital_total / self.surviving as f64)
    }

    /// `(percent_surviving, average_capital_if_surviving)`.
    pub fn as_pair(&self) -> (Option<f64>, Option<Capital>) {
        (self.percent_surviving(), self.average_capital_if_surviving())
    }

    pub fn is_no_data(&self) -> bool {
        self.collected == 0
    }
}

/// Compute survival statistics for `firm_ids` over every run in `table`.
///
/// Errors only on contract violations (empty table, empty firm set).
/// Missing records and groups absent from the table are reported through
/// the log and the returned counts.
pub fn compute_statistics(table: &SimTable, firm_ids: &[FirmId]) -> EvalResult<GroupStatistics> {
    if firm_ids.is_empty() {
        return Err(EvalError::EmptyFirmGroup);
    }
    let final_step = table.final_step().ok_or(EvalError::EmptyTable)?;
    let num_simulations = table.num_simulations();

    let mut values = Vec::new();
    let mut missing = 0usize;

    for &firm in firm_ids {
        for sim in 0..num_simulations {
            match table.ending_capital(sim, final_step, firm, PRIMARY_MARKET) {
                Some(capital) if capital.is_finite() => values.push(capital),
                Some(capital) => {
                    log::warn!(
                        "statistics: non-finite capital {capital} for sim={sim} step={final_step} firm={firm} market={PRIMARY_MARKET}; skipped"
                    );
                    missing += 1;
                }
                None => {
                    log::warn!(
                        "statistics: no record for sim={sim} step={final_step} firm={firm} market={PRIMARY_MARKET}"
                    );
                    missing += 1;
                }
            }
        }
    }

    let stats = GroupStatistics::from_values(&values, missing);
    if stats.is_no_data() {
        log::error!("statistics: no ending-capital data for firms {firm_ids:?}");
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_boundary() {
        assert!(is_bankrupt(0.0));
        assert!(is_bankrupt(1e-7));
        assert!(is_bankrupt(-1e-7));
        assert!(!is_bankrupt(1e-5));
        assert!(!is_bankrupt(-250.0));
    }

    #[test]
    fn empty_values_are_no_data() {
        let stats = GroupStatistics::from_values(&[], 3);
        assert!(stats.is_no_data());
        assert_eq!(stats.as_pair(), (None, None));
        assert_eq!(stats.missing, 3);
    }
}
