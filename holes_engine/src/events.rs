use crate::entities::AgentId;
use crate::error::Result;
use crate::grid::Cell;
use serde::Serialize;
use std::fmt;

/// Something that happened to an agent during a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Event {
    /// The agent stepped onto a hole and was removed from the grid.
    Fell { agent: AgentId, cell: Cell },
    /// The agent was next to a hole when another agent fell into it and now knows it is dangerous.
    Alerted { agent: AgentId, hole: Cell },
    /// Two adjacent agents merged what they know about the grid.
    SharedKnowledge { agent_a: AgentId, agent_b: AgentId },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Fell { agent, .. } => write!(f, "Agent {:02} fell", agent),
            Event::Alerted { agent, hole } => {
                write!(f, "Agent {:02} was alerted to a hole at {:?}", agent, hole)
            }
            Event::SharedKnowledge { agent_a, agent_b } => {
                write!(f, "Agents {:02} and {:02} shared knowledge", agent_a, agent_b)
            }
        }
    }
}

/// The events of a single turn, in the order they happened.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EventLog {
    turn: usize,
    events: Vec<Event>,
}

impl EventLog {
    pub fn new(turn: usize) -> EventLog {
        EventLog {
            turn,
            events: Vec::new(),
        }
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// One human readable line per event.
    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(|event| event.to_string()).collect()
    }

    /// Serializes the log so it can be handed to a renderer outside of Rust.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn push(&mut self, event: Event) {
        tracing::debug!(turn = self.turn, "{}", event);
        self.events.push(event);
    }

    pub(crate) fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.push(event);
        }
    }
}

impl IntoIterator for EventLog {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
