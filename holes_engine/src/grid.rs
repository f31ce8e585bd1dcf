use crate::entities::{from_char, AgentId, Tile};
use crate::error::{Result, SimulationError};
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

/// A location in the grid as `(row, column)`.
pub type Cell = (usize, usize);

/// The board: a fixed rectangle of cells, some of which hide a hole.
///
/// Holes are decided once when the grid is built and never change afterwards.
/// Occupancy is tracked per cell so finding the agent standing on a cell is constant time.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    holes: Vec<bool>,
    occupants: Vec<Option<AgentId>>,
}

impl Grid {
    /// Creates a grid with `holes` holes placed on distinct cells chosen at random.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        columns: usize,
        holes: usize,
        rng: &mut R,
    ) -> Grid {
        let mut grid = Grid::new(rows, columns);
        let cells: Vec<usize> = (0..rows * columns).collect();

        for &index in cells.choose_multiple(rng, holes) {
            grid.holes[index] = true;
        }

        grid
    }

    /// Parses a map layout.
    ///
    /// The layout starts with the `rows` and `cols` headers followed by one `m` line per row,
    /// where `.` is land, `o` is a hole and `a` is an agent.
    /// Agents are numbered in the order they appear, row by row.
    pub fn parse(map_contents: &str) -> Result<Grid> {
        let metadata = Regex::new(r"rows (\d+)\s+cols (\d+)")
            .map_err(|e| SimulationError::InvalidMap(e.to_string()))?
            .captures(map_contents)
            .ok_or_else(|| SimulationError::InvalidMap("missing rows/cols header".to_string()))?;

        let rows = parse_dimension(metadata.get(1).map(|m| m.as_str()))?;
        let columns = parse_dimension(metadata.get(2).map(|m| m.as_str()))?;

        if rows == 0 || columns == 0 {
            return Err(SimulationError::InvalidDimensions { rows, columns });
        }

        let lines: Vec<&str> = Regex::new(r"m (.*)")
            .map_err(|e| SimulationError::InvalidMap(e.to_string()))?
            .captures_iter(map_contents)
            .filter_map(|captures| captures.get(1))
            .map(|line| line.as_str().trim())
            .collect();

        if lines.len() != rows {
            return Err(SimulationError::InvalidMap(format!(
                "expected {} rows but found {}",
                rows,
                lines.len()
            )));
        }

        // Check every row against the header before allocating anything sized by it
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != columns {
                return Err(SimulationError::InvalidMap(format!(
                    "row {} should have {} columns: {:?}",
                    row, columns, line
                )));
            }
        }

        if rows.checked_mul(columns).is_none() {
            return Err(SimulationError::InvalidDimensions { rows, columns });
        }

        let mut grid = Grid::new(rows, columns);
        let mut next_agent = 0;

        for (row, line) in lines.iter().enumerate() {
            for (col, value) in line.chars().enumerate() {
                match from_char(value) {
                    Some(Tile::Land) => {}
                    Some(Tile::Hole) => grid.holes[row * columns + col] = true,
                    Some(Tile::Agent) => {
                        grid.place((row, col), next_agent);
                        next_agent += 1;
                    }
                    None => {
                        return Err(SimulationError::InvalidMap(format!(
                            "invalid character {:?} at ({}, {})",
                            value, row, col
                        )));
                    }
                }
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 < self.rows && cell.1 < self.columns
    }

    /// Orthogonally adjacent cells, in the order west, east, north, south.
    /// There is no wraparound so edge and corner cells have fewer neighbors.
    pub fn neighbors_of(&self, cell: Cell) -> Vec<Cell> {
        let (row, col) = cell;
        let mut neighbors = Vec::with_capacity(4);

        if !self.contains(cell) {
            return neighbors;
        }

        if col != 0 {
            neighbors.push((row, col - 1));
        }
        if col != self.columns - 1 {
            neighbors.push((row, col + 1));
        }
        if row != 0 {
            neighbors.push((row - 1, col));
        }
        if row != self.rows - 1 {
            neighbors.push((row + 1, col));
        }

        neighbors
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.contains(cell) && self.holes[self.index(cell)]
    }

    pub fn holes(&self) -> Vec<Cell> {
        self.cells_where(|grid, index| grid.holes[index])
    }

    /// All cells that are neither a hole nor occupied by an agent.
    pub fn land(&self) -> Vec<Cell> {
        self.cells_where(|grid, index| !grid.holes[index] && grid.occupants[index].is_none())
    }

    pub fn occupant(&self, cell: Cell) -> Option<AgentId> {
        if !self.contains(cell) {
            return None;
        }

        self.occupants[self.index(cell)]
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupant(cell).is_some()
    }

    /// Agents on the grid as `(id, cell)` pairs, ordered by id.
    pub fn occupants(&self) -> Vec<(AgentId, Cell)> {
        let mut occupants: Vec<(AgentId, Cell)> = self
            .occupants
            .iter()
            .enumerate()
            .filter_map(|(index, occupant)| occupant.map(|id| (id, self.cell_at(index))))
            .collect();
        occupants.sort_unstable();
        occupants
    }

    pub(crate) fn place(&mut self, cell: Cell, agent: AgentId) {
        let index = self.index(cell);
        self.occupants[index] = Some(agent);
    }

    pub(crate) fn vacate(&mut self, cell: Cell) {
        let index = self.index(cell);
        self.occupants[index] = None;
    }

    pub(crate) fn relocate(&mut self, from: Cell, to: Cell) {
        let from = self.index(from);
        let to = self.index(to);
        self.occupants[to] = self.occupants[from].take();
    }

    fn new(rows: usize, columns: usize) -> Grid {
        Grid {
            rows,
            columns,
            holes: vec![false; rows * columns],
            occupants: vec![None; rows * columns],
        }
    }

    fn index(&self, cell: Cell) -> usize {
        cell.0 * self.columns + cell.1
    }

    fn cell_at(&self, index: usize) -> Cell {
        (index / self.columns, index % self.columns)
    }

    fn cells_where(&self, filter: fn(&Grid, usize) -> bool) -> Vec<Cell> {
        (0..self.rows * self.columns)
            .filter(|&index| filter(self, index))
            .map(|index| self.cell_at(index))
            .collect()
    }
}

fn parse_dimension(value: Option<&str>) -> Result<usize> {
    value
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| SimulationError::InvalidMap("invalid rows/cols header".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn when_parsing_a_map_it_is_created_with_the_correct_rows_and_columns() {
        let map = "\
            rows 2
            cols 3
            m ...
            m .o.";
        let grid = Grid::parse(map).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
    }

    #[test]
    fn when_parsing_a_map_holes_and_agents_are_placed_in_the_correct_cells() {
        let map = "\
            rows 3
            cols 3
            m .a.
            m o.a
            m a.o";
        let grid = Grid::parse(map).unwrap();

        assert_eq!(grid.holes(), vec![(1, 0), (2, 2)]);
        assert!(grid.is_hazard((1, 0)));
        assert!(!grid.is_hazard((0, 0)));

        // Agents are numbered row by row
        assert_eq!(grid.occupant((0, 1)), Some(0));
        assert_eq!(grid.occupant((1, 2)), Some(1));
        assert_eq!(grid.occupant((2, 0)), Some(2));
        assert_eq!(grid.occupants(), vec![(0, (0, 1)), (1, (1, 2)), (2, (2, 0))]);
    }

    #[test]
    fn when_parsing_a_map_without_a_header_an_error_is_returned() {
        let result = Grid::parse("m ..");

        assert!(matches!(result, Err(SimulationError::InvalidMap(_))));
    }

    #[test]
    fn when_parsing_a_map_with_missing_rows_an_error_is_returned() {
        let map = "\
            rows 3
            cols 2
            m ..
            m ..";
        let result = Grid::parse(map);

        assert!(matches!(result, Err(SimulationError::InvalidMap(_))));
    }

    #[test]
    fn when_parsing_a_map_with_a_short_row_an_error_is_returned() {
        let map = "\
            rows 2
            cols 3
            m ...
            m ..";
        let result = Grid::parse(map);

        assert!(matches!(result, Err(SimulationError::InvalidMap(_))));
    }

    #[test]
    fn when_parsing_a_map_whose_header_claims_a_huge_width_an_error_is_returned() {
        let map = "\
            rows 1
            cols 4611686018427387904
            m .";
        let result = Grid::parse(map);

        assert!(matches!(result, Err(SimulationError::InvalidMap(_))));
    }

    #[test]
    fn when_parsing_a_map_with_an_unknown_character_an_error_is_returned() {
        let map = "\
            rows 1
            cols 2
            m .%";
        let result = Grid::parse(map);

        assert!(matches!(result, Err(SimulationError::InvalidMap(_))));
    }

    #[test]
    fn when_parsing_a_map_with_zero_columns_an_error_is_returned() {
        let map = "\
            rows 1
            cols 0
            m ";
        let result = Grid::parse(map);

        assert!(matches!(
            result,
            Err(SimulationError::InvalidDimensions {
                rows: 1,
                columns: 0
            })
        ));
    }

    #[test]
    fn when_generating_a_grid_the_exact_number_of_holes_is_placed() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = Grid::generate(12, 30, 36, &mut rng);

        assert_eq!(grid.holes().len(), 36);
        assert!(grid.occupants().is_empty());
    }

    #[test]
    fn when_generating_a_grid_with_the_same_seed_the_holes_are_the_same() {
        let first = Grid::generate(5, 5, 4, &mut StdRng::seed_from_u64(42));
        let second = Grid::generate(5, 5, 4, &mut StdRng::seed_from_u64(42));

        assert_eq!(first.holes(), second.holes());
    }

    #[test]
    fn when_getting_the_neighbors_of_a_middle_cell_all_four_are_returned_west_east_north_south() {
        let grid = Grid::new(3, 3);

        assert_eq!(grid.neighbors_of((1, 1)), vec![(1, 0), (1, 2), (0, 1), (2, 1)]);
    }

    #[test]
    fn when_getting_the_neighbors_of_a_corner_cell_only_two_are_returned() {
        let grid = Grid::new(3, 3);

        assert_eq!(grid.neighbors_of((0, 0)), vec![(0, 1), (1, 0)]);
        assert_eq!(grid.neighbors_of((2, 2)), vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn when_getting_the_neighbors_of_an_edge_cell_only_three_are_returned() {
        let grid = Grid::new(3, 3);

        assert_eq!(grid.neighbors_of((0, 1)), vec![(0, 0), (0, 2), (1, 1)]);
    }

    #[test]
    fn when_getting_the_neighbors_of_an_out_of_bounds_cell_none_are_returned() {
        let grid = Grid::new(3, 3);

        assert!(grid.neighbors_of((3, 0)).is_empty());
        assert!(!grid.is_hazard((5, 5)));
        assert!(grid.occupant((5, 5)).is_none());
    }

    #[test]
    fn when_relocating_an_agent_the_old_cell_is_vacated() {
        let map = "\
            rows 1
            cols 2
            m a.";
        let mut grid = Grid::parse(map).unwrap();

        grid.relocate((0, 0), (0, 1));

        assert!(!grid.is_occupied((0, 0)));
        assert_eq!(grid.occupant((0, 1)), Some(0));
    }

    #[test]
    fn when_getting_all_land_holes_and_occupied_cells_are_excluded() {
        let map = "\
            rows 2
            cols 2
            m a.
            m .o";
        let grid = Grid::parse(map).unwrap();

        assert_eq!(grid.land(), vec![(0, 1), (1, 0)]);
    }

    proptest! {
        #[test]
        fn proptest_neighbors_are_in_bounds_distinct_and_symmetric(
            rows in 2usize..12,
            columns in 2usize..12,
            seed in any::<u64>(),
        ) {
            let grid = Grid::new(rows, columns);
            let mut rng = StdRng::seed_from_u64(seed);
            let cell = (rng.gen_range(0..rows), rng.gen_range(0..columns));
            let neighbors = grid.neighbors_of(cell);

            let on_row_edge = cell.0 == 0 || cell.0 == rows - 1;
            let on_column_edge = cell.1 == 0 || cell.1 == columns - 1;
            let expected = match (on_row_edge, on_column_edge) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            prop_assert_eq!(neighbors.len(), expected);

            for (i, neighbor) in neighbors.iter().enumerate() {
                prop_assert!(grid.contains(*neighbor));
                prop_assert!(!neighbors[i + 1..].contains(neighbor));
                prop_assert!(grid.neighbors_of(*neighbor).contains(&cell));
            }
        }
    }
}
