use crate::grid::Cell;
use serde::Serialize;

/// Stable index of an agent, assigned at creation in `[0, agents)`.
pub type AgentId = usize;

/// An agent wandering the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Agent {
    id: AgentId,
    cell: Cell,
    alive: bool,
}

impl Agent {
    pub fn new(id: AgentId, cell: Cell) -> Agent {
        Agent {
            id,
            cell,
            alive: true,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The cell the agent stands on, or the cell it was last on before falling.
    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn move_to(&mut self, cell: Cell) {
        self.cell = cell;
    }

    pub(crate) fn fall(&mut self) {
        self.alive = false;
    }
}

/// What a character of a map layout stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Land,
    Hole,
    Agent,
}

pub fn from_char(value: char) -> Option<Tile> {
    match value {
        '.' => Some(Tile::Land),
        'o' => Some(Tile::Hole),
        'a' => Some(Tile::Agent),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_creating_an_agent_it_is_alive_on_its_starting_cell() {
        let agent = Agent::new(3, (1, 2));

        assert_eq!(agent.id(), 3);
        assert_eq!(agent.cell(), (1, 2));
        assert!(agent.alive());
    }

    #[test]
    fn when_an_agent_falls_it_is_no_longer_alive_but_remembers_its_last_cell() {
        let mut agent = Agent::new(0, (0, 0));
        agent.move_to((0, 1));
        agent.fall();

        assert!(!agent.alive());
        assert_eq!(agent.cell(), (0, 1));
    }

    #[test]
    fn when_converting_map_characters_the_correct_tiles_are_returned() {
        assert_eq!(from_char('.'), Some(Tile::Land));
        assert_eq!(from_char('o'), Some(Tile::Hole));
        assert_eq!(from_char('a'), Some(Tile::Agent));
        assert_eq!(from_char('%'), None);
    }
}
