//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Callers hand over whole Simulation records; they never execute SQL directly.

use crate::{
    error::{SimError, SimResult},
    simulation::Simulation,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

pub struct SimStore {
    conn: Connection,
}

/// One line of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub simulation_id: String,
    pub student_name: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

/// Raw column values, decoded outside the rusqlite row callback so JSON
/// errors surface as SimError::Serialization.
struct SimulationRow {
    id: String,
    student_name: String,
    decisions_json: String,
    result_json: String,
    score: i64,
    seed: i64,
    created_at: String,
}

const SIMULATION_COLUMNS: &str =
    "id, student_name, decisions_json, result_json, score, seed, created_at";

impl SimulationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id:             row.get(0)?,
            student_name:   row.get(1)?,
            decisions_json: row.get(2)?,
            result_json:    row.get(3)?,
            score:          row.get(4)?,
            seed:           row.get(5)?,
            created_at:     row.get(6)?,
        })
    }

    fn into_simulation(self) -> SimResult<Simulation> {
        Ok(Simulation {
            id:           self.id,
            student_name: self.student_name,
            decisions:    serde_json::from_str(&self.decisions_json)?,
            result:       serde_json::from_str(&self.result_json)?,
            score:        self.score as u32,
            seed:         self.seed as u64,
            created_at:   parse_timestamp(&self.created_at)?,
        })
    }
}

impl SimStore {
    /// Open (or create) the simulation database at `path`.
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode only matters for real files; :memory: ignores it.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_simulations.sql"))?;
        Ok(())
    }

    // ── Simulations ────────────────────────────────────────────

    pub fn save_simulation(&self, sim: &Simulation) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO simulation
                (id, student_name, project_type, decisions_json, result_json, score, seed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                sim.id,
                sim.student_name,
                sim.decisions.project_type.as_str(),
                serde_json::to_string(&sim.decisions)?,
                serde_json::to_string(&sim.result)?,
                sim.score as i64,
                sim.seed as i64,
                format_timestamp(&sim.created_at),
            ],
        )?;
        log::debug!("Saved simulation {}", sim.id);
        Ok(())
    }

    pub fn simulation(&self, id: &str) -> SimResult<Option<Simulation>> {
        let sql = format!("SELECT {SIMULATION_COLUMNS} FROM simulation WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id], SimulationRow::from_row)
            .optional()?;
        row.map(SimulationRow::into_simulation).transpose()
    }

    /// All runs by one student, newest first.
    pub fn history_for_student(&self, student_name: &str) -> SimResult<Vec<Simulation>> {
        let sql = format!(
            "SELECT {SIMULATION_COLUMNS} FROM simulation
             WHERE student_name = ?1
             ORDER BY created_at DESC"
        );
        self.query_simulations(&sql, params![student_name.trim()])
    }

    /// Every stored run, newest first.
    pub fn all_simulations(&self) -> SimResult<Vec<Simulation>> {
        let sql = format!("SELECT {SIMULATION_COLUMNS} FROM simulation ORDER BY created_at DESC");
        self.query_simulations(&sql, params![])
    }

    /// Returns false when no row had that id.
    pub fn delete_simulation(&self, id: &str) -> SimResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM simulation WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Highest score first; earlier runs win ties.
    pub fn leaderboard(&self, limit: usize) -> SimResult<Vec<LeaderboardEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, student_name, score, created_at FROM simulation
             ORDER BY score DESC, created_at ASC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(simulation_id, student_name, score, created_at)| {
                Ok(LeaderboardEntry {
                    simulation_id,
                    student_name,
                    score: score as u32,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    pub fn simulation_count(&self) -> SimResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM simulation", [], |row| row.get(0))?;
        Ok(count)
    }

    fn query_simulations(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> SimResult<Vec<Simulation>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, SimulationRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(SimulationRow::into_simulation).collect()
    }
}

/// Fixed-width UTC timestamps sort lexicographically in time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> SimResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| SimError::Other(anyhow::anyhow!("Bad timestamp '{raw}': {e}")))
}
