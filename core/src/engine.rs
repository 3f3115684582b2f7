//! The economic engine: maps a set of decisions to a scored result.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Market volatility draw   (Volatility stream)
//!   2. Base performance         (tables only, no randomness)
//!   3. 12-month trajectory      (Trajectory stream)
//!   4. Competitor analysis      (Competitors stream)
//!   5. Risk factors and recommendations (rules only)
//!
//! RULES:
//!   - All randomness flows through the RngBank.
//!   - Every score leaving this module is clamped to [0, 100].
//!   - Rule lists are evaluated in the order written; output order is stable.

use crate::{
    config::{EngineConfig, MONTHS_PER_RUN},
    decisions::{AiIntegrationLevel, BudgetLevel, CybersecurityLevel, Decisions, MarketingStrategy, ProjectType},
    performance::{CompetitorData, EngineResult, MonthlyPerformance, Performance},
    rng::{RngBank, StreamRng, StreamSlot},
    types::{clamp_score, Seed},
};

/// Fixed competitor roster. Names and strategies never change between runs.
const COMPETITORS: [(&str, &str); 3] = [
    ("Competitor A", "Aggressive pricing strategy"),
    ("Competitor B", "Innovation-focused approach"),
    ("Competitor C", "Quality and premium positioning"),
];

pub struct EconomicEngine {
    config: EngineConfig,
    rng_bank: RngBank,
}

impl EconomicEngine {
    pub fn new(config: EngineConfig, seed: Seed) -> Self {
        Self {
            config,
            rng_bank: RngBank::new(seed),
        }
    }

    pub fn with_default_config(seed: Seed) -> Self {
        Self::new(EngineConfig::default(), seed)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> Seed {
        self.rng_bank.master_seed()
    }

    /// Run the complete simulation for one set of decisions.
    ///
    /// Streams are re-derived on every call, so calling `run` twice on the
    /// same engine with the same decisions yields the same result.
    pub fn run(&self, decisions: &Decisions) -> EngineResult {
        let mut volatility_rng = self.rng_bank.for_stream(StreamSlot::Volatility);
        let market_volatility = volatility_rng.range(0.0, self.config.volatility_max);

        let performance = base_performance(&self.config, decisions);

        let mut trajectory_rng = self.rng_bank.for_stream(StreamSlot::Trajectory);
        let monthly_data = monthly_trajectory(&performance, market_volatility, &mut trajectory_rng);

        let mut competitor_rng = self.rng_bank.for_stream(StreamSlot::Competitors);
        let competitor_analysis = generate_competitors(&self.config, &mut competitor_rng);

        let risk_factors = assess_risk_factors(decisions);
        let recommendations = generate_recommendations(&self.config, decisions, &performance);
        let growth_rate = growth_rate(&performance);

        log::debug!(
            "seed={} decisions=[{}] overall={:.1} volatility={:.1}% risks={} recs={}",
            self.seed(),
            decisions.summary(),
            performance.overall(),
            market_volatility,
            risk_factors.len(),
            recommendations.len()
        );

        EngineResult {
            performance,
            monthly_data,
            risk_factors,
            recommendations,
            competitor_analysis,
            market_volatility,
            growth_rate,
        }
    }
}

// ── Base performance ───────────────────────────────────────────

/// The five scores implied by the decisions alone. No randomness.
pub fn base_performance(config: &EngineConfig, decisions: &Decisions) -> Performance {
    Performance {
        tech: tech_efficiency(config, decisions),
        finance: financial_stability(config, decisions),
        market: market_share(config, decisions),
        cybersecurity: cybersecurity_score(config, decisions),
        innovation: innovation_score(config, decisions),
    }
}

/// Unclamped multiplier applied to the tech base score.
pub fn tech_multiplier(config: &EngineConfig, decisions: &Decisions) -> f64 {
    config.project_weights(decisions.project_type).tech
        * (1.0 + config.ai_boost(decisions.ai_integration))
        * config.budget_multiplier(decisions.budget)
}

fn tech_efficiency(config: &EngineConfig, decisions: &Decisions) -> f64 {
    clamp_score(config.base_scores.tech * tech_multiplier(config, decisions))
}

fn financial_stability(config: &EngineConfig, decisions: &Decisions) -> f64 {
    let weight = config.project_weights(decisions.project_type).finance;
    let budget = config.budget_multiplier(decisions.budget);
    // Validation guarantees a positive cost; a hand-built config might not.
    let cost = config.cybersecurity_impact(decisions.cybersecurity).cost;
    if cost <= 0.0 {
        return 0.0;
    }
    clamp_score(config.base_scores.finance * weight * budget / cost)
}

fn market_share(config: &EngineConfig, decisions: &Decisions) -> f64 {
    let weight = config.project_weights(decisions.project_type).market;
    let marketing = config.marketing_effectiveness(decisions.marketing);
    let ai = config.ai_boost(decisions.ai_integration);
    clamp_score(config.base_scores.market * weight * marketing * (1.0 + ai))
}

fn cybersecurity_score(config: &EngineConfig, decisions: &Decisions) -> f64 {
    let security = config.cybersecurity_impact(decisions.cybersecurity).security;
    let budget = config.budget_multiplier(decisions.budget);
    clamp_score(config.base_scores.cybersecurity * security * budget)
}

fn innovation_score(config: &EngineConfig, decisions: &Decisions) -> f64 {
    let weight = config.project_weights(decisions.project_type).innovation;
    let ai = config.ai_boost(decisions.ai_integration);
    let budget = config.budget_multiplier(decisions.budget);
    clamp_score(config.base_scores.innovation * weight * (1.0 + ai) * budget)
}

// ── Trajectory ─────────────────────────────────────────────────

/// Project the trending scores over twelve months.
///
/// Growth compounds linearly with the month index from the average of market
/// and innovation; each month also gets an independent volatility shock.
pub fn monthly_trajectory(
    performance: &Performance,
    volatility: f64,
    rng: &mut StreamRng,
) -> Vec<MonthlyPerformance> {
    let monthly_growth = (performance.market + performance.innovation) / 200.0;

    (1..=MONTHS_PER_RUN)
        .map(|month| {
            let volatility_factor = 1.0 + rng.symmetric(volatility) / 100.0;
            let growth_factor = 1.0 + monthly_growth * month as f64 / MONTHS_PER_RUN as f64;
            let factor = volatility_factor * growth_factor;

            let revenue = (performance.finance * performance.market * factor / 10.0)
                .round()
                .max(0.0) as u64;

            MonthlyPerformance {
                month,
                tech: clamp_score(performance.tech * factor),
                finance: clamp_score(performance.finance * factor),
                market: clamp_score(performance.market * factor),
                innovation: clamp_score(performance.innovation * factor),
                revenue,
            }
        })
        .collect()
}

// ── Competitors ────────────────────────────────────────────────

pub fn generate_competitors(config: &EngineConfig, rng: &mut StreamRng) -> Vec<CompetitorData> {
    let share = config.competitors.market_share;
    let strength = config.competitors.strength;

    COMPETITORS
        .iter()
        .map(|&(name, strategy)| CompetitorData {
            name: name.to_string(),
            strategy: strategy.to_string(),
            market_share: rng.range(share.min, share.max),
            strength: rng.range(strength.min, strength.max),
        })
        .collect()
}

// ── Rules ──────────────────────────────────────────────────────

pub fn assess_risk_factors(decisions: &Decisions) -> Vec<String> {
    let rules: [(bool, &str); 5] = [
        (
            decisions.budget == BudgetLevel::Low,
            "Limited budget may restrict growth opportunities",
        ),
        (
            decisions.cybersecurity == CybersecurityLevel::Basic,
            "Basic cybersecurity poses data breach risks",
        ),
        (
            decisions.marketing == MarketingStrategy::Traditional,
            "Traditional marketing may have limited reach",
        ),
        (
            decisions.ai_integration == AiIntegrationLevel::None,
            "No AI integration may reduce competitiveness",
        ),
        (
            decisions.budget == BudgetLevel::High && decisions.project_type == ProjectType::Tech,
            "High investment in tech requires sustained innovation",
        ),
    ];

    rules
        .iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, text)| text.to_string())
        .collect()
}

pub fn generate_recommendations(
    config: &EngineConfig,
    decisions: &Decisions,
    performance: &Performance,
) -> Vec<String> {
    let t = &config.recommendation_thresholds;
    let rules: [(bool, &str); 6] = [
        (performance.tech < t.tech, "Consider upgrading technology infrastructure"),
        (performance.finance < t.finance, "Implement cost optimization strategies"),
        (performance.market < t.market, "Enhance marketing efforts and brand visibility"),
        (
            performance.cybersecurity < t.cybersecurity,
            "Upgrade cybersecurity measures to protect assets",
        ),
        (performance.innovation < t.innovation, "Invest in R&D and innovation initiatives"),
        (
            decisions.ai_integration == AiIntegrationLevel::None,
            "Explore AI integration for competitive advantage",
        ),
    ];

    rules
        .iter()
        .filter(|(fires, _)| *fires)
        .map(|(_, text)| text.to_string())
        .collect()
}

/// Headline growth figure: mean of market, innovation and tech, over ten.
pub fn growth_rate(performance: &Performance) -> f64 {
    (performance.market + performance.innovation + performance.tech) / 3.0 / 10.0
}
