//! Console rendering of the grid.
//!
//! Reads the grid through its public queries only, the engine never depends on anything here.

use crate::entities::AgentId;
use crate::grid::{Cell, Grid};
use crate::knowledge::KnowledgeSet;
use crossterm::{
    cursor::Hide,
    queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

/// Draws the grid to `out`.
///
/// When `focus` is given, cells the agent believes safe are tinted green, cells it believes
/// dangerous red, and cells it holds in both lists yellow.
pub fn draw<W: Write>(
    out: &mut W,
    grid: &Grid,
    turn: usize,
    survivors: usize,
    focus: Option<&KnowledgeSet>,
) -> io::Result<()> {
    // Display information about the simulation
    queue!(
        out,
        Clear(ClearType::All),
        Hide,
        Print("Turn: "),
        Print(turn.to_string()),
        Print("\nAgents alive: "),
        Print(survivors.to_string()),
        Print("\n\n")
    )?;

    // Display the grid, two characters per cell
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let (text, color) = tile(grid, (row, col), focus);
            queue!(
                out,
                SetForegroundColor(color),
                Print(text),
                SetForegroundColor(Color::Reset)
            )?;
        }
        queue!(out, Print("\n"))?;
    }

    out.flush()
}

/// The text and color of a single cell.
pub fn tile(grid: &Grid, cell: Cell, focus: Option<&KnowledgeSet>) -> (String, Color) {
    let (text, color) = match grid.occupant(cell) {
        // Only two digits fit in a tile
        Some(id) => (format!("{:02}", id % 100), agent_to_color(id)),
        None if grid.is_hazard(cell) => ("()".to_string(), Color::DarkGrey),
        None => ("..".to_string(), Color::Reset),
    };

    // What the focused agent believes wins over the default color
    let color = focus
        .and_then(|knowledge| knowledge_color(knowledge, cell))
        .unwrap_or(color);

    (text, color)
}

pub fn agent_to_color(id: AgentId) -> Color {
    // Cycle through a fixed palette, there are usually more agents than colors
    match id % 10 {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Blue,
        3 => Color::Yellow,
        4 => Color::Magenta,
        5 => Color::Cyan,
        6 => Color::DarkRed,
        7 => Color::DarkGreen,
        8 => Color::DarkMagenta,
        _ => Color::DarkYellow,
    }
}

fn knowledge_color(knowledge: &KnowledgeSet, cell: Cell) -> Option<Color> {
    match (knowledge.is_safe(cell), knowledge.is_dangerous(cell)) {
        (true, true) => Some(Color::Yellow),
        (true, false) => Some(Color::Green),
        (false, true) => Some(Color::Red),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        let map = "\
            rows 1
            cols 3
            m a.o";
        Grid::parse(map).unwrap()
    }

    #[test]
    fn when_rendering_tiles_agents_land_and_holes_get_their_own_text() {
        let grid = grid();

        assert_eq!(tile(&grid, (0, 0), None), ("00".to_string(), Color::Red));
        assert_eq!(tile(&grid, (0, 1), None), ("..".to_string(), Color::Reset));
        assert_eq!(tile(&grid, (0, 2), None), ("()".to_string(), Color::DarkGrey));
    }

    #[test]
    fn when_rendering_tiles_with_a_focused_agent_its_knowledge_is_tinted() {
        let grid = grid();
        let mut knowledge = KnowledgeSet::new((0, 0));
        knowledge.mark_safe((0, 1));
        knowledge.mark_dangerous((0, 1));
        knowledge.mark_dangerous((0, 2));

        assert_eq!(tile(&grid, (0, 0), Some(&knowledge)).1, Color::Green);
        assert_eq!(tile(&grid, (0, 1), Some(&knowledge)).1, Color::Yellow);
        assert_eq!(tile(&grid, (0, 2), Some(&knowledge)).1, Color::Red);
    }

    #[test]
    fn when_drawing_the_grid_the_header_and_every_tile_are_written() {
        let grid = grid();
        let mut out = Vec::new();

        draw(&mut out, &grid, 4, 1, None).unwrap();

        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Turn: 4"));
        assert!(text.contains("Agents alive: 1"));
        assert!(text.contains("00"));
        assert!(text.contains("()"));
    }

    #[test]
    fn when_picking_agent_colors_the_palette_wraps_around() {
        assert_eq!(agent_to_color(0), agent_to_color(10));
        assert_ne!(agent_to_color(0), agent_to_color(1));
    }
}
