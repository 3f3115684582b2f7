use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Simulation '{id}' not found")]
    SimulationNotFound { id: String },

    #[error("Comparison needs between 2 and 4 distinct simulations, got {count}")]
    ComparisonSize { count: usize },

    #[error("Student name must not be blank")]
    InvalidStudentName,

    #[error("Unknown {field} '{value}'")]
    InvalidDecision { field: &'static str, value: String },

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
