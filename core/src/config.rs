//! Scoring tables for the economic engine.
//!
//! `EngineConfig::default()` carries the shipped balance. A JSON file can
//! override any subset of it; missing fields fall back to the defaults.

use crate::decisions::{
    AiIntegrationLevel, BudgetLevel, CybersecurityLevel, MarketingStrategy, ProjectType,
};
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Months in the projected trajectory.
pub const MONTHS_PER_RUN: u32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BaseScores {
    pub tech: f64,
    pub finance: f64,
    pub market: f64,
    pub cybersecurity: f64,
    pub innovation: f64,
}

impl Default for BaseScores {
    fn default() -> Self {
        Self {
            tech: 70.0,
            finance: 65.0,
            market: 20.0,
            cybersecurity: 50.0,
            innovation: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BudgetMultipliers {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for BudgetMultipliers {
    fn default() -> Self {
        Self { low: 0.6, medium: 1.0, high: 1.5 }
    }
}

/// Per-project emphasis on each trending dimension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectWeights {
    pub tech: f64,
    pub finance: f64,
    pub market: f64,
    pub innovation: f64,
}

/// Partial `ProjectWeights` read from a config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectWeightsOverride {
    pub tech: Option<f64>,
    pub finance: Option<f64>,
    pub market: Option<f64>,
    pub innovation: Option<f64>,
}

impl ProjectWeightsOverride {
    fn over(self, base: ProjectWeights) -> ProjectWeights {
        ProjectWeights {
            tech: self.tech.unwrap_or(base.tech),
            finance: self.finance.unwrap_or(base.finance),
            market: self.market.unwrap_or(base.market),
            innovation: self.innovation.unwrap_or(base.innovation),
        }
    }
}

/// Each entry falls back field by field to its own default row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ProjectWeightTableOverride")]
pub struct ProjectWeightTable {
    pub tech: ProjectWeights,
    pub finance: ProjectWeights,
    pub marketing: ProjectWeights,
}

impl Default for ProjectWeightTable {
    fn default() -> Self {
        Self {
            tech: ProjectWeights { tech: 1.5, finance: 0.8, market: 1.0, innovation: 1.4 },
            finance: ProjectWeights { tech: 0.8, finance: 1.5, market: 1.1, innovation: 0.9 },
            marketing: ProjectWeights { tech: 0.7, finance: 1.0, market: 1.6, innovation: 1.1 },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectWeightTableOverride {
    pub tech: Option<ProjectWeightsOverride>,
    pub finance: Option<ProjectWeightsOverride>,
    pub marketing: Option<ProjectWeightsOverride>,
}

impl From<ProjectWeightTableOverride> for ProjectWeightTable {
    fn from(o: ProjectWeightTableOverride) -> Self {
        let base = Self::default();
        Self {
            tech: o.tech.unwrap_or_default().over(base.tech),
            finance: o.finance.unwrap_or_default().over(base.finance),
            marketing: o.marketing.unwrap_or_default().over(base.marketing),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketingEffectiveness {
    pub social_media: f64,
    pub traditional: f64,
    pub influencer: f64,
}

impl Default for MarketingEffectiveness {
    fn default() -> Self {
        Self { social_media: 1.3, traditional: 0.9, influencer: 1.5 }
    }
}

/// Security strength and the running-cost drag it puts on finance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CybersecurityImpact {
    pub security: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CybersecurityImpactOverride {
    pub security: Option<f64>,
    pub cost: Option<f64>,
}

impl CybersecurityImpactOverride {
    fn over(self, base: CybersecurityImpact) -> CybersecurityImpact {
        CybersecurityImpact {
            security: self.security.unwrap_or(base.security),
            cost: self.cost.unwrap_or(base.cost),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "CybersecurityImpactTableOverride")]
pub struct CybersecurityImpactTable {
    pub basic: CybersecurityImpact,
    pub advanced: CybersecurityImpact,
    pub enterprise: CybersecurityImpact,
}

impl Default for CybersecurityImpactTable {
    fn default() -> Self {
        Self {
            basic: CybersecurityImpact { security: 0.6, cost: 0.9 },
            advanced: CybersecurityImpact { security: 1.0, cost: 1.1 },
            enterprise: CybersecurityImpact { security: 1.4, cost: 1.3 },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CybersecurityImpactTableOverride {
    pub basic: Option<CybersecurityImpactOverride>,
    pub advanced: Option<CybersecurityImpactOverride>,
    pub enterprise: Option<CybersecurityImpactOverride>,
}

impl From<CybersecurityImpactTableOverride> for CybersecurityImpactTable {
    fn from(o: CybersecurityImpactTableOverride) -> Self {
        let base = Self::default();
        Self {
            basic: o.basic.unwrap_or_default().over(base.basic),
            advanced: o.advanced.unwrap_or_default().over(base.advanced),
            enterprise: o.enterprise.unwrap_or_default().over(base.enterprise),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiBoost {
    pub none: f64,
    pub basic: f64,
    pub advanced: f64,
}

impl Default for AiBoost {
    fn default() -> Self {
        Self { none: 0.0, basic: 0.2, advanced: 0.5 }
    }
}

/// Uniform draw bounds, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DrawRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrawRangeOverride {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DrawRangeOverride {
    fn over(self, base: DrawRange) -> DrawRange {
        DrawRange {
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "CompetitorRangesOverride")]
pub struct CompetitorRanges {
    pub market_share: DrawRange,
    pub strength: DrawRange,
}

impl Default for CompetitorRanges {
    fn default() -> Self {
        Self {
            market_share: DrawRange { min: 15.0, max: 30.0 },
            strength: DrawRange { min: 60.0, max: 85.0 },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompetitorRangesOverride {
    pub market_share: Option<DrawRangeOverride>,
    pub strength: Option<DrawRangeOverride>,
}

impl From<CompetitorRangesOverride> for CompetitorRanges {
    fn from(o: CompetitorRangesOverride) -> Self {
        let base = Self::default();
        Self {
            market_share: o.market_share.unwrap_or_default().over(base.market_share),
            strength: o.strength.unwrap_or_default().over(base.strength),
        }
    }
}

/// A recommendation fires when the matching score is strictly below its threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommendationThresholds {
    pub tech: f64,
    pub finance: f64,
    pub market: f64,
    pub cybersecurity: f64,
    pub innovation: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            tech: 70.0,
            finance: 65.0,
            market: 60.0,
            cybersecurity: 70.0,
            innovation: 65.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub base_scores: BaseScores,
    pub budget_multipliers: BudgetMultipliers,
    pub project_weights: ProjectWeightTable,
    pub marketing_effectiveness: MarketingEffectiveness,
    pub cybersecurity_impact: CybersecurityImpactTable,
    pub ai_boost: AiBoost,
    /// Upper bound of the market volatility draw, in percent.
    pub volatility_max: f64,
    pub competitors: CompetitorRanges,
    pub recommendation_thresholds: RecommendationThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_scores: BaseScores::default(),
            budget_multipliers: BudgetMultipliers::default(),
            project_weights: ProjectWeightTable::default(),
            marketing_effectiveness: MarketingEffectiveness::default(),
            cybersecurity_impact: CybersecurityImpactTable::default(),
            ai_boost: AiBoost::default(),
            volatility_max: 50.0,
            competitors: CompetitorRanges::default(),
            recommendation_thresholds: RecommendationThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file and validate.
    /// In tests, use EngineConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::info!("Loaded engine config from {path}");
        Ok(config)
    }

    // ── Lookups ────────────────────────────────────────────────

    pub fn budget_multiplier(&self, budget: BudgetLevel) -> f64 {
        match budget {
            BudgetLevel::Low => self.budget_multipliers.low,
            BudgetLevel::Medium => self.budget_multipliers.medium,
            BudgetLevel::High => self.budget_multipliers.high,
        }
    }

    pub fn project_weights(&self, project: ProjectType) -> ProjectWeights {
        match project {
            ProjectType::Tech => self.project_weights.tech,
            ProjectType::Finance => self.project_weights.finance,
            ProjectType::Marketing => self.project_weights.marketing,
        }
    }

    pub fn marketing_effectiveness(&self, strategy: MarketingStrategy) -> f64 {
        match strategy {
            MarketingStrategy::SocialMedia => self.marketing_effectiveness.social_media,
            MarketingStrategy::Traditional => self.marketing_effectiveness.traditional,
            MarketingStrategy::Influencer => self.marketing_effectiveness.influencer,
        }
    }

    pub fn cybersecurity_impact(&self, level: CybersecurityLevel) -> CybersecurityImpact {
        match level {
            CybersecurityLevel::Basic => self.cybersecurity_impact.basic,
            CybersecurityLevel::Advanced => self.cybersecurity_impact.advanced,
            CybersecurityLevel::Enterprise => self.cybersecurity_impact.enterprise,
        }
    }

    pub fn ai_boost(&self, level: AiIntegrationLevel) -> f64 {
        match level {
            AiIntegrationLevel::None => self.ai_boost.none,
            AiIntegrationLevel::Basic => self.ai_boost.basic,
            AiIntegrationLevel::Advanced => self.ai_boost.advanced,
        }
    }

    // ── Validation ─────────────────────────────────────────────

    pub fn validate(&self) -> SimResult<()> {
        let b = &self.base_scores;
        let m = &self.marketing_effectiveness;
        let a = &self.ai_boost;
        let bm = &self.budget_multipliers;
        let non_negative = [
            ("base_scores.tech", b.tech),
            ("base_scores.finance", b.finance),
            ("base_scores.market", b.market),
            ("base_scores.cybersecurity", b.cybersecurity),
            ("base_scores.innovation", b.innovation),
            ("budget_multipliers.low", bm.low),
            ("budget_multipliers.medium", bm.medium),
            ("budget_multipliers.high", bm.high),
            ("marketing_effectiveness.socialMedia", m.social_media),
            ("marketing_effectiveness.traditional", m.traditional),
            ("marketing_effectiveness.influencer", m.influencer),
            ("ai_boost.none", a.none),
            ("ai_boost.basic", a.basic),
            ("ai_boost.advanced", a.advanced),
        ];
        for (name, value) in non_negative {
            check_non_negative(name, value)?;
        }

        for (name, w) in [
            ("tech", self.project_weights.tech),
            ("finance", self.project_weights.finance),
            ("marketing", self.project_weights.marketing),
        ] {
            for (dim, value) in [
                ("tech", w.tech),
                ("finance", w.finance),
                ("market", w.market),
                ("innovation", w.innovation),
            ] {
                check_non_negative(&format!("project_weights.{name}.{dim}"), value)?;
            }
        }

        for (name, impact) in [
            ("basic", self.cybersecurity_impact.basic),
            ("advanced", self.cybersecurity_impact.advanced),
            ("enterprise", self.cybersecurity_impact.enterprise),
        ] {
            check_non_negative(&format!("cybersecurity_impact.{name}.security"), impact.security)?;
            if !(impact.cost.is_finite() && impact.cost > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "cybersecurity_impact.{name}.cost must be positive, got {}",
                    impact.cost
                )));
            }
        }

        if !(0.0..=100.0).contains(&self.volatility_max) {
            return Err(SimError::InvalidConfig(format!(
                "volatility_max must lie in [0, 100], got {}",
                self.volatility_max
            )));
        }

        check_range("competitors.market_share", self.competitors.market_share)?;
        check_range("competitors.strength", self.competitors.strength)?;
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!("{name} must be a non-negative number, got {value}")))
    }
}

fn check_range(name: &str, range: DrawRange) -> SimResult<()> {
    if range.min.is_finite()
        && range.max.is_finite()
        && range.min >= 0.0
        && range.min <= range.max
        && range.max <= 100.0
    {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!(
            "{name} range [{}, {}) must lie within [0, 100] with min <= max",
            range.min, range.max
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "volatility_max": 10.0, "ai_boost": { "advanced": 0.8 } }"#)
                .unwrap();

        assert_eq!(config.volatility_max, 10.0);
        assert_eq!(config.ai_boost.advanced, 0.8);
        assert_eq!(config.ai_boost.basic, 0.2);
        assert_eq!(config.budget_multipliers, BudgetMultipliers::default());
    }

    #[test]
    fn zero_security_cost_is_rejected() {
        let mut config = EngineConfig::default();
        config.cybersecurity_impact.basic.cost = 0.0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_competitor_range_is_rejected() {
        let mut config = EngineConfig::default();
        config.competitors.strength = DrawRange { min: 90.0, max: 60.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn volatility_above_hundred_is_rejected() {
        let config = EngineConfig { volatility_max: 150.0, ..EngineConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_multiplier_is_rejected() {
        let mut config = EngineConfig::default();
        config.project_weights.finance.market = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn competitor_range_above_hundred_is_rejected() {
        let mut config = EngineConfig::default();
        config.competitors.market_share = DrawRange { min: 40.0, max: 120.0 };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        config.competitors.market_share = DrawRange { min: 40.0, max: 100.0 };
        config.validate().unwrap();
    }

    // ── load ───────────────────────────────────────────────────

    fn write_temp_config(json: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("bizsim-config-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, json).unwrap();
        path
    }

    fn load_json(json: &str) -> anyhow::Result<EngineConfig> {
        let path = write_temp_config(json);
        let loaded = EngineConfig::load(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        loaded
    }

    #[test]
    fn load_missing_file_names_the_path() {
        let path = std::env::temp_dir().join(format!("bizsim-absent-{}.json", uuid::Uuid::new_v4()));
        let path = path.to_str().unwrap();
        let err = EngineConfig::load(path).unwrap_err();
        assert!(err.to_string().contains(path), "error was: {err}");
    }

    #[test]
    fn load_partial_file_keeps_defaults() {
        let config = load_json(r#"{ "volatility_max": 20.0, "budget_multipliers": { "high": 2.0 } }"#)
            .unwrap();

        assert_eq!(config.volatility_max, 20.0);
        assert_eq!(config.budget_multipliers.high, 2.0);
        assert_eq!(config.budget_multipliers.low, 0.6);
        assert_eq!(config.project_weights, ProjectWeightTable::default());
    }

    #[test]
    fn load_single_field_inside_table_entry() {
        let defaults = EngineConfig::default();

        let config = load_json(r#"{ "project_weights": { "tech": { "tech": 2.0 } } }"#).unwrap();
        assert_eq!(config.project_weights.tech.tech, 2.0);
        assert_eq!(config.project_weights.tech.finance, defaults.project_weights.tech.finance);
        assert_eq!(config.project_weights.tech.innovation, 1.4);
        assert_eq!(config.project_weights.finance, defaults.project_weights.finance);

        let config = load_json(r#"{ "cybersecurity_impact": { "basic": { "cost": 1.0 } } }"#).unwrap();
        assert_eq!(config.cybersecurity_impact.basic, CybersecurityImpact { security: 0.6, cost: 1.0 });
        assert_eq!(config.cybersecurity_impact.enterprise, defaults.cybersecurity_impact.enterprise);

        let config = load_json(r#"{ "competitors": { "strength": { "max": 90.0 } } }"#).unwrap();
        assert_eq!(config.competitors.strength, DrawRange { min: 60.0, max: 90.0 });
        assert_eq!(config.competitors.market_share, defaults.competitors.market_share);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let err = load_json(r#"{ "competitors": { "market_share": { "max": 150.0 } } }"#).unwrap_err();
        assert!(err.to_string().contains("competitors.market_share"), "error was: {err}");

        assert!(load_json(r#"{ "volatility_max": 150.0 }"#).is_err());
    }

    #[test]
    fn load_reports_malformed_json_with_path() {
        let path = write_temp_config("{ not json");
        let path_str = path.to_str().unwrap().to_string();
        let err = EngineConfig::load(&path_str).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("Cannot parse"), "error was: {err}");
        assert!(err.to_string().contains(&path_str));
    }

    #[test]
    fn serialized_defaults_load_back_unchanged() {
        let json = serde_json::to_string(&EngineConfig::default()).unwrap();
        assert_eq!(load_json(&json).unwrap(), EngineConfig::default());
    }
}
