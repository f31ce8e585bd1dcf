use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid grid dimensions: {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Cannot place {holes} holes on a grid with {cells} cells")]
    TooManyHoles { holes: usize, cells: usize },

    #[error("Cannot place {agents} agents on {available} hole-free cells")]
    TooManyAgents { agents: usize, available: usize },

    #[error("Unknown agent: {0}")]
    UnknownAgent(usize),

    #[error("Invalid map: {0}")]
    InvalidMap(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
