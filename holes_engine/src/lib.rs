//! # holes_engine
//!
//! The core engine for the Holes simulation.
//! Agents wander a grid with hidden holes, remember which tiles are safe or dangerous,
//! and pass that knowledge on to the agents they meet.

pub mod config;
pub mod error;
pub mod events;
pub mod simulation;

pub use config::SimConfig;
pub use entities::{Agent, AgentId};
pub use error::{Result, SimulationError};
pub use events::{Event, EventLog};
pub use grid::{Cell, Grid};
pub use knowledge::{KnowledgeSet, KnowledgeStore};
pub use movement::{choose_destination, Candidates, Preference};
pub use propagation::{alert_nearby, share_knowledge};
pub use simulation::Simulation;

mod entities;
mod grid;
mod knowledge;
mod movement;
mod propagation;
mod render;
