use crate::grid::{Cell, Grid};
use crate::knowledge::KnowledgeSet;
use rand::seq::SliceRandom;
use rand::Rng;

/// How an agent feels about moving onto a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preference {
    /// The agent believes the cell is safe.
    Positive,
    /// The agent knows nothing about the cell.
    Neutral,
    /// The agent believes the cell hides a hole.
    Negative,
}

/// The free cells around an agent, split by preference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Candidates {
    pub positive: Vec<Cell>,
    pub neutral: Vec<Cell>,
    pub negative: Vec<Cell>,
}

impl Candidates {
    pub fn classify(available: &[Cell], knowledge: &KnowledgeSet) -> Candidates {
        let mut candidates = Candidates::default();

        for &cell in available {
            // A cell in both lists counts as safe
            if knowledge.is_safe(cell) {
                candidates.positive.push(cell);
            } else if knowledge.is_dangerous(cell) {
                // Blacklisted, only taken when nothing else is free
                candidates.negative.push(cell);
            } else {
                // Never visited nor heard about
                candidates.neutral.push(cell);
            }
        }

        candidates
    }

    /// The best non-empty group of cells, if any.
    /// Known-dangerous cells are only offered when nothing else is free.
    pub fn preferred(&self) -> Option<(Preference, &[Cell])> {
        [
            (Preference::Positive, &self.positive),
            (Preference::Neutral, &self.neutral),
            (Preference::Negative, &self.negative),
        ]
        .into_iter()
        .find(|(_, cells)| !cells.is_empty())
        .map(|(preference, cells)| (preference, cells.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.neutral.is_empty() && self.negative.is_empty()
    }
}

/// Cells next to `cell` that no live agent is standing on.
pub fn available_cells(grid: &Grid, cell: Cell) -> Vec<Cell> {
    grid.neighbors_of(cell)
        .into_iter()
        .filter(|&neighbor| !grid.is_occupied(neighbor))
        .collect()
}

/// Picks where an agent standing on `cell` moves next, or `None` if every neighbor is taken.
///
/// Cells the agent believes safe always win over unknown cells, which always win over cells it
/// believes dangerous. Ties within a group are broken uniformly at random.
pub fn choose_destination<R: Rng + ?Sized>(
    grid: &Grid,
    knowledge: &KnowledgeSet,
    cell: Cell,
    rng: &mut R,
) -> Option<Cell> {
    let available = available_cells(grid, cell);
    let candidates = Candidates::classify(&available, knowledge);
    let (preference, cells) = candidates.preferred()?;
    let destination = cells.choose(rng).copied();

    tracing::trace!(
        ?cell,
        ?preference,
        ?destination,
        "choosing among {} free cells",
        available.len()
    );

    destination
}
