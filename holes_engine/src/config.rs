use crate::error::{Result, SimulationError};
use serde::{Deserialize, Serialize};

/// Parameters for generating a random simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of rows in the grid.
    pub rows: usize,
    /// Number of columns in the grid.
    pub columns: usize,
    /// Number of holes to hide in the grid. Defaults to a tenth of the cells.
    pub holes: Option<usize>,
    /// Number of agents to place on the grid. Defaults to a tenth of the cells.
    pub agents: Option<usize>,
    /// Seed for the random number generator.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            rows: 12,
            columns: 30,
            holes: None,
            agents: None,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Creates a config for a grid of the given size with the default hole and agent counts.
    pub fn new(rows: usize, columns: usize) -> SimConfig {
        SimConfig {
            rows,
            columns,
            ..SimConfig::default()
        }
    }

    /// Loads a config from a JSON document. Missing fields take their default values.
    pub fn from_json(contents: &str) -> Result<SimConfig> {
        serde_json::from_str(contents).map_err(SimulationError::InvalidConfig)
    }

    pub fn with_holes(mut self, holes: usize) -> SimConfig {
        self.holes = Some(holes);
        self
    }

    pub fn with_agents(mut self, agents: usize) -> SimConfig {
        self.agents = Some(agents);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> SimConfig {
        self.seed = seed;
        self
    }

    /// Number of cells in the grid, or `None` if it does not fit in a `usize`.
    pub fn cells(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    pub fn num_holes(&self) -> usize {
        self.holes.unwrap_or_else(|| self.default_population())
    }

    pub fn num_agents(&self) -> usize {
        self.agents.unwrap_or_else(|| self.default_population())
    }

    /// Checks that the grid can hold every hole and every agent.
    ///
    /// Agents never start on a hole, so they must fit in the cells left over once the holes are placed.
    pub fn validate(&self) -> Result<()> {
        let invalid = SimulationError::InvalidDimensions {
            rows: self.rows,
            columns: self.columns,
        };
        if self.rows == 0 || self.columns == 0 {
            return Err(invalid);
        }
        let cells = self.cells().ok_or(invalid)?;

        let holes = self.num_holes();
        if holes > cells {
            return Err(SimulationError::TooManyHoles { holes, cells });
        }

        let agents = self.num_agents();
        let available = cells - holes;
        if agents > available {
            return Err(SimulationError::TooManyAgents { agents, available });
        }

        Ok(())
    }

    fn default_population(&self) -> usize {
        self.cells().map_or(0, |cells| cells / 10)
    }
}
