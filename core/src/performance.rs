//! Engine output records.

use crate::types::Month;
use serde::{Deserialize, Serialize};

/// The five-dimension score snapshot. Every field lies in [0, 100].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Performance {
    pub tech: f64,
    pub finance: f64,
    pub market: f64,
    pub cybersecurity: f64,
    pub innovation: f64,
}

impl Performance {
    /// Mean of the five dimensions.
    pub fn overall(&self) -> f64 {
        (self.tech + self.finance + self.market + self.cybersecurity + self.innovation) / 5.0
    }

    /// Overall score as shown on the report card.
    pub fn score(&self) -> u32 {
        self.overall().round() as u32
    }

    pub fn dimensions(&self) -> [(&'static str, f64); 5] {
        [
            ("tech", self.tech),
            ("finance", self.finance),
            ("market", self.market),
            ("cybersecurity", self.cybersecurity),
            ("innovation", self.innovation),
        ]
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Weak,
    Moderate,
    Strong,
}

impl PerformanceBand {
    pub fn of(score: f64) -> Self {
        if score >= 80.0 {
            Self::Strong
        } else if score >= 60.0 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

/// One point of the projected trajectory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthlyPerformance {
    pub month: Month,
    pub tech: f64,
    pub finance: f64,
    pub market: f64,
    pub innovation: f64,
    pub revenue: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitorData {
    pub name: String,
    pub strategy: String,
    pub market_share: f64,
    pub strength: f64,
}

/// Everything one engine run produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineResult {
    pub performance: Performance,
    pub monthly_data: Vec<MonthlyPerformance>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub competitor_analysis: Vec<CompetitorData>,
    /// Percent, in [0, volatility_max).
    pub market_volatility: f64,
    pub growth_rate: f64,
}

impl EngineResult {
    pub fn total_revenue(&self) -> u64 {
        self.monthly_data.iter().map(|m| m.revenue).sum()
    }
}
