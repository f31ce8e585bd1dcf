//! How knowledge spreads between agents.
//!
//! Knowledge only ever travels between orthogonal neighbors: a fall warns the agents around the
//! hole, and a safe move lets the mover swap notes with every agent next to its new cell.

use crate::entities::AgentId;
use crate::events::Event;
use crate::grid::{Cell, Grid};
use crate::knowledge::KnowledgeStore;

/// Warns every live agent next to `hole` that it is dangerous.
///
/// `fallen` is the agent that just fell in, it is never alerted about its own fall.
pub fn alert_nearby(
    grid: &Grid,
    knowledge: &mut KnowledgeStore,
    hole: Cell,
    fallen: AgentId,
) -> Vec<Event> {
    let mut events = Vec::new();

    for neighbor in grid.neighbors_of(hole) {
        // Fallen agents hold no cell, so every occupant is alive
        let Some(agent) = grid.occupant(neighbor) else {
            continue;
        };

        if agent == fallen {
            continue;
        }

        knowledge.mark_dangerous(agent, hole);
        events.push(Event::Alerted { agent, hole });
    }

    events
}

/// Merges the knowledge of `agent`, standing on `cell`, with each live agent next to it.
///
/// Merges happen one neighbor at a time in neighbor order, so a later neighbor also receives
/// what the earlier ones contributed.
pub fn share_knowledge(
    grid: &Grid,
    knowledge: &mut KnowledgeStore,
    agent: AgentId,
    cell: Cell,
) -> Vec<Event> {
    let mut events = Vec::new();

    for neighbor in grid.neighbors_of(cell) {
        let Some(other) = grid.occupant(neighbor) else {
            continue;
        };

        if other == agent {
            continue;
        }

        knowledge.merge(agent, other);
        events.push(Event::SharedKnowledge {
            agent_a: agent,
            agent_b: other,
        });
    }

    events
}
