//! A recorded simulation run: who ran it, what they chose, what came out.

use crate::{
    config::EngineConfig,
    decisions::Decisions,
    engine::EconomicEngine,
    error::{SimError, SimResult},
    performance::{EngineResult, PerformanceBand},
    types::{Seed, SimulationId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Simulation {
    pub id: SimulationId,
    pub student_name: String,
    pub decisions: Decisions,
    pub result: EngineResult,
    pub created_at: DateTime<Utc>,
    /// Rounded overall performance, 0..=100.
    pub score: u32,
    /// Master seed of the run; replaying it reproduces `result`.
    pub seed: Seed,
}

impl Simulation {
    /// Run the engine with the given config and wrap the outcome.
    pub fn record(
        student_name: &str,
        decisions: Decisions,
        seed: Seed,
        config: &EngineConfig,
    ) -> SimResult<Self> {
        let student_name = student_name.trim();
        if student_name.is_empty() {
            return Err(SimError::InvalidStudentName);
        }

        let engine = EconomicEngine::new(config.clone(), seed);
        let result = engine.run(&decisions);
        let score = result.performance.score();

        let simulation = Self {
            id: uuid::Uuid::new_v4().to_string(),
            student_name: student_name.to_string(),
            decisions,
            result,
            created_at: Utc::now(),
            score,
            seed,
        };
        log::info!(
            "Recorded simulation {} for '{}' (score {})",
            simulation.id,
            simulation.student_name,
            simulation.score
        );
        Ok(simulation)
    }

    /// Same as `record` with the shipped scoring tables.
    pub fn run(student_name: &str, decisions: Decisions, seed: Seed) -> SimResult<Self> {
        Self::record(student_name, decisions, seed, &EngineConfig::default())
    }

    pub fn overall(&self) -> f64 {
        self.result.performance.overall()
    }

    pub fn band(&self) -> PerformanceBand {
        PerformanceBand::of(self.overall())
    }

    /// Re-run the engine from the stored seed and decisions.
    pub fn replay(&self, config: &EngineConfig) -> EngineResult {
        EconomicEngine::new(config.clone(), self.seed).run(&self.decisions)
    }
}
