//! simeval-core: post-run evaluation of business-strategy simulator output.
//!
//! Loads the per-step capital table a simulator batch writes out and
//! summarises, per firm group, how often the firms avoided bankruptcy and
//! what capital the survivors finished with.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod statistics;
pub mod table;
pub mod types;

pub use config::{EvalConfig, FirmGroup, InputSet, SweepConfig};
pub use error::{EvalError, EvalResult};
pub use evaluation::{
    evaluate_batch, evaluate_file, evaluate_table, BatchReport, FileOutcome, FileReport, GroupReport,
};
pub use statistics::{compute_statistics, is_bankrupt, GroupStatistics};
pub use table::{SimRecord, SimTable};
