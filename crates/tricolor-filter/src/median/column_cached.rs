//! Median with cached column histograms
//!
//! Every padded column owns a histogram of a `(2r + 1)`-row strip. The
//! window histogram is the sum of the `2r + 1` column histograms under it,
//! so a column step swaps one column histogram out and one in wholesale
//! (O(256) regardless of radius). Column strips only ever move down; a
//! column outside the window is brought up to date lazily, one pixel per
//! row it fell behind, the next time the window reaches it.

use super::histogram::ChannelHistogram;
use super::snake::{Snake, SnakeMove, SnakeState};
use super::window_len;
use crate::FilterResult;
use tricolor_core::{PixelGrid, PixelGridMut};

/// Histogram of one padded column over rows `top..=top + 2r`.
struct ColumnStrip {
    hist: ChannelHistogram,
    /// `None` until the column is first touched.
    top: Option<u32>,
}

struct Columns<'a> {
    padded: &'a PixelGrid,
    span: u32,
    strips: Vec<ColumnStrip>,
}

impl<'a> Columns<'a> {
    fn new(padded: &'a PixelGrid, span: u32) -> Self {
        let strips = (0..padded.cols())
            .map(|_| ColumnStrip {
                hist: ChannelHistogram::new(),
                top: None,
            })
            .collect();
        Columns {
            padded,
            span,
            strips,
        }
    }

    /// Bring column `col` to the strip starting at row `top` and return it.
    fn refresh(&mut self, col: u32, top: u32) -> &ChannelHistogram {
        let span = self.span;
        let padded = self.padded;
        let strip = &mut self.strips[col as usize];
        match strip.top {
            None => {
                for r in top..=top + span {
                    strip.hist.add(padded.at(r, col));
                }
            }
            Some(mut current) => {
                debug_assert!(current <= top, "column strips only move down");
                while current < top {
                    strip.hist.remove(padded.at(current, col));
                    strip.hist.add(padded.at(current + span + 1, col));
                    current += 1;
                }
            }
        }
        strip.top = Some(top);
        &strip.hist
    }

    /// Advance column `col` (currently at `top - 1`) by one row, applying
    /// the same change to `window`.
    fn advance(&mut self, col: u32, top: u32, window: &mut ChannelHistogram) {
        let leaving = self.padded.at(top - 1, col);
        let entering = self.padded.at(top + self.span, col);
        let strip = &mut self.strips[col as usize];
        debug_assert_eq!(strip.top, Some(top - 1));
        strip.hist.remove(leaving);
        strip.hist.add(entering);
        strip.top = Some(top);
        window.remove(leaving);
        window.add(entering);
    }

    fn get(&self, col: u32) -> &ChannelHistogram {
        &self.strips[col as usize].hist
    }
}

pub fn median_column_cached(grid: &PixelGrid, radius: u32) -> FilterResult<PixelGrid> {
    let padded = grid.mirror(radius)?;
    let (rows, cols) = grid.dims();
    let span = 2 * radius;
    let n = window_len(radius) as u32;
    let mid = n / 2;

    let mut columns = Columns::new(&padded, span);
    let mut window = ChannelHistogram::new();
    let mut out = PixelGridMut::new(rows, cols)?;

    for step in Snake::new(rows, cols) {
        let (i, j) = (step.row, step.col);
        match (step.kind, step.state) {
            (SnakeMove::Start, _) => {
                for c in 0..=span {
                    window.merge(columns.refresh(c, 0));
                }
            }
            (SnakeMove::StepColumn, SnakeState::MovingRight) => {
                window.unmerge(columns.get(j - 1));
                window.merge(columns.refresh(j + span, i));
            }
            (SnakeMove::StepColumn, SnakeState::MovingLeft) => {
                window.unmerge(columns.get(j + span + 1));
                window.merge(columns.refresh(j, i));
            }
            (SnakeMove::DropRow, _) => {
                for c in j..=j + span {
                    columns.advance(c, i, &mut window);
                }
            }
        }
        debug_assert_eq!(window.totals(), [n; 3]);
        out.set(i, j, window.rank_value(mid));
    }
    Ok(out.into())
}
