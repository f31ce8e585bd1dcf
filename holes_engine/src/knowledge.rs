use crate::entities::AgentId;
use crate::grid::Cell;
use serde::Serialize;
use std::ops::Index;

/// What a single agent remembers about the grid.
///
/// Both lists keep cells in the order they were learned and never hold the same cell twice.
/// Nothing stops a cell from being in both lists at once: an agent can be alerted about a cell
/// it already believes safe, and the two lists are never reconciled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KnowledgeSet {
    whitelist: Vec<Cell>,
    blacklist: Vec<Cell>,
}

impl KnowledgeSet {
    /// Creates the knowledge of an agent that only knows its starting cell is safe.
    pub fn new(start: Cell) -> KnowledgeSet {
        KnowledgeSet {
            whitelist: vec![start],
            blacklist: Vec::new(),
        }
    }

    pub fn whitelist(&self) -> &[Cell] {
        &self.whitelist
    }

    pub fn blacklist(&self) -> &[Cell] {
        &self.blacklist
    }

    pub fn is_safe(&self, cell: Cell) -> bool {
        self.whitelist.contains(&cell)
    }

    pub fn is_dangerous(&self, cell: Cell) -> bool {
        self.blacklist.contains(&cell)
    }

    /// Appends `cell` to the whitelist. Returns `false` if it was already there.
    pub fn mark_safe(&mut self, cell: Cell) -> bool {
        insert(&mut self.whitelist, cell)
    }

    /// Appends `cell` to the blacklist. Returns `false` if it was already there.
    pub fn mark_dangerous(&mut self, cell: Cell) -> bool {
        insert(&mut self.blacklist, cell)
    }

    /// The union of both sets of knowledge, list by list.
    /// Entries of `self` come first, followed by the entries of `other` that `self` lacks.
    pub fn merged(&self, other: &KnowledgeSet) -> KnowledgeSet {
        KnowledgeSet {
            whitelist: union(&self.whitelist, &other.whitelist),
            blacklist: union(&self.blacklist, &other.blacklist),
        }
    }
}

/// Knowledge of every agent, indexed by agent id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KnowledgeStore {
    sets: Vec<KnowledgeSet>,
}

impl KnowledgeStore {
    /// Creates one set per agent, seeding each whitelist with the agent's starting cell.
    /// The agent id is the index in `starts`.
    pub fn new(starts: &[Cell]) -> KnowledgeStore {
        KnowledgeStore {
            sets: starts.iter().map(|&start| KnowledgeSet::new(start)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, agent: AgentId) -> Option<&KnowledgeSet> {
        self.sets.get(agent)
    }

    /// # Panics
    /// If `agent` is not a known agent id.
    pub fn whitelist(&self, agent: AgentId) -> &[Cell] {
        self.sets[agent].whitelist()
    }

    /// # Panics
    /// If `agent` is not a known agent id.
    pub fn blacklist(&self, agent: AgentId) -> &[Cell] {
        self.sets[agent].blacklist()
    }

    /// # Panics
    /// If `agent` is not a known agent id.
    pub fn mark_safe(&mut self, agent: AgentId, cell: Cell) -> bool {
        self.sets[agent].mark_safe(cell)
    }

    /// # Panics
    /// If `agent` is not a known agent id.
    pub fn mark_dangerous(&mut self, agent: AgentId, cell: Cell) -> bool {
        self.sets[agent].mark_dangerous(cell)
    }

    /// Shares knowledge between two agents.
    ///
    /// Both agents end up with their own copy of the same merged lists, so later changes to one
    /// agent's knowledge do not leak into the other's.
    ///
    /// # Panics
    /// If either id is not a known agent id.
    pub fn merge(&mut self, a: AgentId, b: AgentId) {
        if a == b {
            return;
        }

        let merged = self.sets[a].merged(&self.sets[b]);
        self.sets[b] = merged.clone();
        self.sets[a] = merged;
    }
}

impl Index<AgentId> for KnowledgeStore {
    type Output = KnowledgeSet;

    fn index(&self, agent: AgentId) -> &KnowledgeSet {
        &self.sets[agent]
    }
}

fn insert(list: &mut Vec<Cell>, cell: Cell) -> bool {
    if list.contains(&cell) {
        return false;
    }

    list.push(cell);
    true
}

fn union(first: &[Cell], second: &[Cell]) -> Vec<Cell> {
    let mut merged = first.to_vec();
    for &cell in second {
        insert(&mut merged, cell);
    }
    merged
}
