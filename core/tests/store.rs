//! SQLite persistence: round trip, history, leaderboard, delete.

use bizsim_core::{
    decisions::{AiIntegrationLevel, BudgetLevel, CybersecurityLevel, Decisions, ProjectType},
    simulation::Simulation,
    store::SimStore,
};
use chrono::{Duration, TimeZone, Utc};

fn store() -> SimStore {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = SimStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn sim_at(student: &str, decisions: Decisions, seed: u64, minutes: i64) -> Simulation {
    let mut sim = Simulation::run(student, decisions, seed).unwrap();
    sim.created_at = Utc.with_ymd_and_hms(2026, 5, 10, 14, 0, 0).unwrap() + Duration::minutes(minutes);
    sim
}

#[test]
fn saved_simulation_round_trips() {
    let store = store();
    let sim = sim_at("Ada", Decisions::default(), u64::MAX - 3, 0);
    store.save_simulation(&sim).unwrap();

    let loaded = store.simulation(&sim.id).unwrap().expect("stored run");
    assert_eq!(loaded, sim);
    assert_eq!(loaded.seed, u64::MAX - 3);
}

#[test]
fn missing_simulation_is_none() {
    assert!(store().simulation("nope").unwrap().is_none());
}

#[test]
fn history_is_per_student_newest_first() {
    let store = store();
    store.save_simulation(&sim_at("Ada", Decisions::default(), 1, 0)).unwrap();
    store.save_simulation(&sim_at("Bob", Decisions::default(), 2, 5)).unwrap();
    store.save_simulation(&sim_at("Ada", Decisions::default(), 3, 10)).unwrap();

    let ada = store.history_for_student("Ada").unwrap();
    assert_eq!(ada.len(), 2);
    assert_eq!(ada[0].seed, 3);
    assert_eq!(ada[1].seed, 1);

    assert_eq!(store.all_simulations().unwrap().len(), 3);
    assert_eq!(store.simulation_count().unwrap(), 3);
}

#[test]
fn leaderboard_orders_by_score_then_age() {
    let store = store();
    let top = Decisions {
        project_type: ProjectType::Tech,
        budget: BudgetLevel::High,
        cybersecurity: CybersecurityLevel::Enterprise,
        ai_integration: AiIntegrationLevel::Advanced,
        ..Decisions::default()
    };
    let bottom = Decisions {
        budget: BudgetLevel::Low,
        cybersecurity: CybersecurityLevel::Basic,
        ai_integration: AiIntegrationLevel::None,
        ..Decisions::default()
    };

    store.save_simulation(&sim_at("Low", bottom, 1, 0)).unwrap();
    store.save_simulation(&sim_at("Top Late", top, 2, 20)).unwrap();
    store.save_simulation(&sim_at("Top Early", top, 3, 10)).unwrap();

    let board = store.leaderboard(10).unwrap();
    let names: Vec<&str> = board.iter().map(|e| e.student_name.as_str()).collect();
    assert_eq!(names, vec!["Top Early", "Top Late", "Low"]);
    assert!(board[0].score > board[2].score);

    assert_eq!(store.leaderboard(1).unwrap().len(), 1);
}

#[test]
fn delete_removes_only_that_run() {
    let store = store();
    let keep = sim_at("Keep", Decisions::default(), 1, 0);
    let gone = sim_at("Drop", Decisions::default(), 2, 1);
    store.save_simulation(&keep).unwrap();
    store.save_simulation(&gone).unwrap();

    assert!(store.delete_simulation(&gone.id).unwrap());
    assert!(!store.delete_simulation(&gone.id).unwrap());
    assert_eq!(store.simulation_count().unwrap(), 1);
    assert!(store.simulation(&keep.id).unwrap().is_some());
}

#[test]
fn duplicate_id_is_a_database_error() {
    let store = store();
    let sim = sim_at("Ada", Decisions::default(), 1, 0);
    store.save_simulation(&sim).unwrap();
    assert!(store.save_simulation(&sim).is_err());
}
