//! Simulation records: identity, scoring, validation.

use bizsim_core::{
    config::EngineConfig,
    decisions::{AiIntegrationLevel, BudgetLevel, CybersecurityLevel, Decisions, ProjectType},
    error::SimError,
    performance::PerformanceBand,
    simulation::Simulation,
};

#[test]
fn score_is_rounded_overall() {
    let sim = Simulation::run("Grace", Decisions::default(), 5).unwrap();

    assert_eq!(sim.score, sim.result.performance.overall().round() as u32);
    assert!(sim.score <= 100);
    assert_eq!(sim.band(), PerformanceBand::of(sim.overall()));
}

#[test]
fn each_run_gets_a_fresh_id() {
    let a = Simulation::run("Grace", Decisions::default(), 5).unwrap();
    let b = Simulation::run("Grace", Decisions::default(), 5).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.result, b.result);
}

#[test]
fn student_name_is_trimmed() {
    let sim = Simulation::run("  Linus  ", Decisions::default(), 1).unwrap();
    assert_eq!(sim.student_name, "Linus");
}

#[test]
fn blank_student_name_rejected() {
    let err = Simulation::run("   ", Decisions::default(), 1).unwrap_err();
    assert!(matches!(err, SimError::InvalidStudentName));
}

/// A maxed-out tech run lands in the strong band; a starved one does not.
#[test]
fn investment_moves_the_band() {
    let maxed = Decisions {
        project_type: ProjectType::Tech,
        budget: BudgetLevel::High,
        cybersecurity: CybersecurityLevel::Enterprise,
        ai_integration: AiIntegrationLevel::Advanced,
        ..Decisions::default()
    };
    let starved = Decisions {
        budget: BudgetLevel::Low,
        cybersecurity: CybersecurityLevel::Basic,
        ai_integration: AiIntegrationLevel::None,
        ..maxed
    };

    let high = Simulation::run("A", maxed, 9).unwrap();
    let low = Simulation::run("B", starved, 9).unwrap();

    assert!(high.score > low.score);
    assert_eq!(low.band(), PerformanceBand::Weak);
}

#[test]
fn custom_tables_change_the_outcome() {
    let mut config = EngineConfig::default();
    config.base_scores.cybersecurity = 0.0;

    let sim = Simulation::record("Custom", Decisions::default(), 3, &config).unwrap();
    assert_eq!(sim.result.performance.cybersecurity, 0.0);
    assert!(sim
        .result
        .recommendations
        .contains(&"Upgrade cybersecurity measures to protect assets".to_string()));
}
