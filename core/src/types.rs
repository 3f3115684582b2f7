//! Shared primitive types used across the entire simulation.

/// A stable, unique identifier for a recorded simulation run (UUID v4).
pub type SimulationId = String;

/// A month of the projected trajectory, 1-based.
pub type Month = u32;

/// Master seed for a single run.
pub type Seed = u64;

/// Every score the engine reports lives in this closed range.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Clamp a raw score into [SCORE_MIN, SCORE_MAX].
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_MIN, SCORE_MAX)
}
