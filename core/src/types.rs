//! Shared primitive types used across the evaluator.

/// Index of one independent simulation run. Runs are numbered densely from 0.
pub type SimIndex = u32;

/// A discrete time step within a run.
pub type Step = u32;

/// Identifier of a simulated firm.
pub type FirmId = u32;

/// Identifier of a sub-market. Only market 0 is analysed.
pub type MarketId = u32;

/// Net worth of a firm at a given step.
pub type Capital = f64;

/// The market every ending-capital lookup is made against.
pub const PRIMARY_MARKET: MarketId = 0;

/// Capital within this absolute distance of zero counts as bankrupt.
pub const BANKRUPTCY_TOLERANCE: Capital = 1e-6;
