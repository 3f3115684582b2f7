//! In-memory simulation history: newest first, searchable, comparable.

use crate::{
    error::{SimError, SimResult},
    simulation::Simulation,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Smallest and largest selection `compare` accepts.
pub const MIN_COMPARE: usize = 2;
pub const MAX_COMPARE: usize = 4;

/// Best-minus-worst gap, in points, above which a metric earns an insight.
pub const INSIGHT_GAP: f64 = 5.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest first.
    Date,
    /// Highest overall first.
    Performance,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonInsight {
    pub metric: String,
    pub leader: String,
    pub difference: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonReport {
    pub simulations: Vec<Simulation>,
    pub insights: Vec<ComparisonInsight>,
}

#[derive(Debug, Clone, Default)]
pub struct SimulationHistory {
    entries: Vec<Simulation>,
}

impl SimulationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored runs; re-sorted newest first.
    pub fn from_simulations(mut simulations: Vec<Simulation>) -> Self {
        simulations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { entries: simulations }
    }

    pub fn add(&mut self, simulation: Simulation) {
        self.entries.insert(0, simulation);
    }

    pub fn get(&self, id: &str) -> Option<&Simulation> {
        self.entries.iter().find(|s| s.id == id)
    }

    /// Returns false when nothing had that id.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Simulation> {
        self.entries.iter()
    }

    pub fn recent(&self, n: usize) -> &[Simulation] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Case-insensitive match on student name or project type.
    pub fn search(&self, query: &str) -> Vec<&Simulation> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|s| {
                s.student_name.to_lowercase().contains(&needle)
                    || s.decisions.project_type.as_str().contains(&needle)
            })
            .collect()
    }

    pub fn sorted(&self, key: SortKey) -> Vec<&Simulation> {
        let mut out: Vec<&Simulation> = self.entries.iter().collect();
        match key {
            SortKey::Date => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Performance => out.sort_by(|a, b| {
                b.overall()
                    .partial_cmp(&a.overall())
                    .unwrap_or(Ordering::Equal)
            }),
        }
        out
    }

    /// Side-by-side comparison of 2..=4 distinct runs, in the order given.
    pub fn compare(&self, ids: &[&str]) -> SimResult<ComparisonReport> {
        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }
        if !(MIN_COMPARE..=MAX_COMPARE).contains(&unique.len()) {
            return Err(SimError::ComparisonSize { count: unique.len() });
        }

        let simulations = unique
            .iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| SimError::SimulationNotFound { id: id.to_string() })
            })
            .collect::<SimResult<Vec<_>>>()?;

        let insights = comparison_insights(&simulations);
        Ok(ComparisonReport { simulations, insights })
    }
}

fn comparison_insights(simulations: &[Simulation]) -> Vec<ComparisonInsight> {
    let metrics: [(&str, fn(&Simulation) -> f64); 4] = [
        ("Tech", |s| s.result.performance.tech),
        ("Finance", |s| s.result.performance.finance),
        ("Market", |s| s.result.performance.market),
        ("Overall", Simulation::overall),
    ];

    metrics
        .iter()
        .filter_map(|&(metric, value)| {
            let best = simulations
                .iter()
                .max_by(|a, b| value(*a).partial_cmp(&value(*b)).unwrap_or(Ordering::Equal))?;
            let worst = simulations
                .iter()
                .min_by(|a, b| value(*a).partial_cmp(&value(*b)).unwrap_or(Ordering::Equal))?;
            let difference = value(best) - value(worst);
            if difference <= INSIGHT_GAP {
                return None;
            }
            Some(ComparisonInsight {
                metric: metric.to_string(),
                leader: best.student_name.clone(),
                difference,
                recommendation: insight_text(metric, best),
            })
        })
        .collect()
}

fn insight_text(metric: &str, leader: &Simulation) -> String {
    let d = &leader.decisions;
    match metric {
        "Tech" => format!(
            "{}'s {} project with {} AI integration drove the strongest technology score",
            leader.student_name, d.project_type, d.ai_integration
        ),
        "Finance" => format!(
            "{}'s {} budget with {} cybersecurity kept finances the healthiest",
            leader.student_name, d.budget, d.cybersecurity
        ),
        "Market" => format!(
            "{}'s {} marketing captured the most market share",
            leader.student_name, d.marketing
        ),
        _ => format!(
            "{}'s mix ({}) gave the best overall result",
            leader.student_name,
            d.summary()
        ),
    }
}
