//! Sliding-window median over a snake traversal
//!
//! A single window histogram follows the snake. A column step retires the
//! trailing column strip and adds the leading one; a row drop retires the
//! top row strip and adds the new bottom one. Each move costs O(r) updates
//! plus an O(256) median scan.

use super::histogram::ChannelHistogram;
use super::snake::{Snake, SnakeMove, SnakeState};
use super::window_len;
use crate::FilterResult;
use tricolor_core::{PixelGrid, PixelGridMut};

pub fn median_row_snake(grid: &PixelGrid, radius: u32) -> FilterResult<PixelGrid> {
    let padded = grid.mirror(radius)?;
    let (rows, cols) = grid.dims();
    let span = 2 * radius;
    let mid = (window_len(radius) / 2) as u32;

    // Padded coordinates: the window of output (i, j) covers rows i..=i+span
    // and columns j..=j+span.
    let column = |hist: &mut ChannelHistogram, top: u32, col: u32, add: bool| {
        for r in top..=top + span {
            let px = padded.at(r, col);
            if add { hist.add(px) } else { hist.remove(px) }
        }
    };
    let row = |hist: &mut ChannelHistogram, row: u32, left: u32, add: bool| {
        for &px in &padded.row(row)[left as usize..=(left + span) as usize] {
            if add { hist.add(px) } else { hist.remove(px) }
        }
    };

    let mut out = PixelGridMut::new(rows, cols)?;
    let mut window = ChannelHistogram::new();
    for step in Snake::new(rows, cols) {
        let (i, j) = (step.row, step.col);
        match (step.kind, step.state) {
            (SnakeMove::Start, _) => {
                for c in 0..=span {
                    column(&mut window, 0, c, true);
                }
            }
            (SnakeMove::StepColumn, SnakeState::MovingRight) => {
                column(&mut window, i, j - 1, false);
                column(&mut window, i, j + span, true);
            }
            (SnakeMove::StepColumn, SnakeState::MovingLeft) => {
                column(&mut window, i, j + span + 1, false);
                column(&mut window, i, j, true);
            }
            (SnakeMove::DropRow, _) => {
                row(&mut window, i - 1, j, false);
                row(&mut window, i + span, j, true);
            }
        }
        out.set(i, j, window.rank_value(mid));
    }
    Ok(out.into())
}
