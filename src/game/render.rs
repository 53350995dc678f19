//! Renderer Contract
//!
//! The engine hands a [`RenderFrame`] to a renderer once after the starting
//! tiles are placed and once after every move that changed the board.
//! Drawing, animation and styling all belong to the renderer.

use std::fmt::Write as _;

use crate::core::position::Position;
use crate::game::snapshot::RenderFrame;

/// Consumer of grid snapshots.
pub trait Renderer {
    /// Redraw from `frame`.
    fn render(&mut self, frame: &RenderFrame);
}

/// Renderer that draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &RenderFrame) {}
}

/// Draws the board as rows of right-aligned numbers.
///
/// Merged tiles are suffixed with `*` and freshly spawned ones with `+`.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    output: String,
    frames: usize,
}

impl TextRenderer {
    /// Create a new text renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest drawing.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        self.output.clear();
        self.frames += 1;

        for y in 0..frame.size as i32 {
            for x in 0..frame.size as i32 {
                let position = Position::new(x, y);
                match frame.tiles.iter().find(|tile| tile.position == position) {
                    Some(tile) => {
                        let mark = if tile.merged_from.is_some() {
                            '*'
                        } else if tile.previous_position.is_none() {
                            '+'
                        } else {
                            ' '
                        };
                        let _ = write!(self.output, "{:>6}{}", tile.value, mark);
                    }
                    None => self.output.push_str("     . "),
                }
            }
            // Trailing padding off each row
            let trimmed = self.output.trim_end().len();
            self.output.truncate(trimmed);
            self.output.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Grid;

    #[test]
    fn test_text_renderer_layout() {
        let mut grid = Grid::new(2);
        grid.add_tile(Position::new(1, 0), 2);
        grid.add_tile(Position::new(0, 1), 1024);

        let mut renderer = TextRenderer::new();
        renderer.render(&RenderFrame::capture(&grid));

        let lines: Vec<&str> = renderer.output().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("     ."));
        assert!(lines[0].ends_with("2+"));
        assert!(lines[1].starts_with("  1024+"));
        assert_eq!(renderer.frames(), 1);
    }
}
