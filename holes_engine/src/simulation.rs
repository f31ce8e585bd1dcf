use crate::config::SimConfig;
use crate::entities::{Agent, AgentId};
use crate::error::{Result, SimulationError};
use crate::events::{Event, EventLog};
use crate::grid::{Cell, Grid};
use crate::knowledge::{KnowledgeSet, KnowledgeStore};
use crate::movement::choose_destination;
use crate::propagation::{alert_nearby, share_knowledge};
use crate::render;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::stdout;

/// A simulation of agents wandering a grid full of hidden holes.
/// Main entry point for running the simulation.
///
/// Drivers call [`Simulation::step`] once per turn and read the state back between turns.
pub struct Simulation {
    grid: Grid,
    agents: Vec<Agent>,
    knowledge: KnowledgeStore,
    turn: usize,
    rng: StdRng,
}

impl Simulation {
    /// Creates a new simulation with randomly placed holes and agents.
    ///
    /// Agents are placed on distinct cells without a hole and start out knowing only that their
    /// own cell is safe.
    ///
    /// # Errors
    /// If the grid is empty or too small to hold the requested holes and agents.
    pub fn new(config: &SimConfig) -> Result<Simulation> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut grid = Grid::generate(config.rows, config.columns, config.num_holes(), &mut rng);

        let starts: Vec<Cell> = grid
            .land()
            .choose_multiple(&mut rng, config.num_agents())
            .copied()
            .collect();

        for (id, &cell) in starts.iter().enumerate() {
            grid.place(cell, id);
        }

        tracing::info!(
            rows = config.rows,
            columns = config.columns,
            seed = config.seed,
            "Placed {} holes and {} agents",
            grid.holes().len(),
            starts.len()
        );

        Ok(Simulation::from_parts(grid, &starts, rng))
    }

    /// Creates a new simulation from the string representation of a map.
    ///
    /// # Arguments
    /// * `map` - A map layout, see [`Grid::parse`].
    /// * `seed` - The seed for the random number generator used to pick between equally good moves.
    pub fn parse(map: &str, seed: u64) -> Result<Simulation> {
        let grid = Grid::parse(map)?;
        let starts: Vec<Cell> = grid.occupants().into_iter().map(|(_, cell)| cell).collect();

        Ok(Simulation::from_parts(
            grid,
            &starts,
            StdRng::seed_from_u64(seed),
        ))
    }

    /// Advances the simulation by one turn.
    ///
    /// Every agent alive at the start of the turn tries to move once, in ascending id order.
    /// Agents moving later in the turn see the board as left by the ones before them.
    /// Returns everything that happened, in order.
    pub fn step(&mut self) -> EventLog {
        // Snapshot who moves this turn, in ascending id order, before anyone falls
        let order: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|agent| agent.alive())
            .map(|agent| agent.id())
            .collect();

        // Nothing left to simulate
        if order.is_empty() {
            return EventLog::new(self.turn);
        }

        self.turn += 1;
        let mut log = EventLog::new(self.turn);

        for id in order {
            // Skip anyone no longer alive
            if !self.agents[id].alive() {
                continue;
            }

            // Agents boxed in by other agents stay where they are
            let from = self.agents[id].cell();
            let Some(destination) =
                choose_destination(&self.grid, &self.knowledge[id], from, &mut self.rng)
            else {
                continue;
            };

            log.extend(self.move_agent(id, from, destination));
        }

        tracing::debug!(
            turn = self.turn,
            events = log.len(),
            survivors = self.live_agents(),
            "Turn finished"
        );

        log
    }

    /// The number of turns played so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Every agent ever created, fallen ones included, indexed by id.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn live_agents(&self) -> usize {
        self.agents.iter().filter(|agent| agent.alive()).count()
    }

    /// Whether every agent has fallen.
    pub fn is_finished(&self) -> bool {
        self.live_agents() == 0
    }

    /// The cell the agent stands on, or `None` if it has fallen.
    pub fn cell_of(&self, agent: AgentId) -> Result<Option<Cell>> {
        let agent = self.agent(agent)?;
        Ok(agent.alive().then(|| agent.cell()))
    }

    pub fn is_alive(&self, agent: AgentId) -> Result<bool> {
        Ok(self.agent(agent)?.alive())
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.grid.is_hazard(cell)
    }

    pub fn knowledge_of(&self, agent: AgentId) -> Result<&KnowledgeSet> {
        self.knowledge
            .get(agent)
            .ok_or(SimulationError::UnknownAgent(agent))
    }

    pub fn whitelist_of(&self, agent: AgentId) -> Result<&[Cell]> {
        Ok(self.knowledge_of(agent)?.whitelist())
    }

    pub fn blacklist_of(&self, agent: AgentId) -> Result<&[Cell]> {
        Ok(self.knowledge_of(agent)?.blacklist())
    }

    /// Draws the simulation to the console, optionally highlighting what `focus` knows.
    pub fn draw(&self, focus: Option<AgentId>) -> Result<()> {
        let knowledge = focus.map(|agent| self.knowledge_of(agent)).transpose()?;
        render::draw(&mut stdout(), &self.grid, self.turn, self.live_agents(), knowledge)?;
        Ok(())
    }
}

impl Simulation {
    fn from_parts(grid: Grid, starts: &[Cell], rng: StdRng) -> Simulation {
        Simulation {
            grid,
            agents: starts
                .iter()
                .enumerate()
                .map(|(id, &cell)| Agent::new(id, cell))
                .collect(),
            knowledge: KnowledgeStore::new(starts),
            turn: 0,
            rng,
        }
    }

    fn agent(&self, agent: AgentId) -> Result<&Agent> {
        self.agents
            .get(agent)
            .ok_or(SimulationError::UnknownAgent(agent))
    }

    fn move_agent(&mut self, id: AgentId, from: Cell, destination: Cell) -> Vec<Event> {
        if self.grid.is_hazard(destination) {
            // The agent drops into the hole and no longer occupies any cell
            self.grid.vacate(from);
            self.agents[id].fall();

            let mut events = vec![Event::Fell {
                agent: id,
                cell: destination,
            }];
            // Live agents next to the hole learn about it, the fallen agent is already gone
            events.extend(alert_nearby(
                &self.grid,
                &mut self.knowledge,
                destination,
                id,
            ));

            return events;
        }

        // Standing on a cell proves it safe
        self.grid.relocate(from, destination);
        self.agents[id].move_to(destination);
        self.knowledge.mark_safe(id, destination);

        // Then swap knowledge with every neighbor, one at a time
        share_knowledge(&self.grid, &mut self.knowledge, id, destination)
    }
}
