//! Boustrophedon traversal of the output grid
//!
//! Both histogram medians visit output pixels in the same order: left to
//! right along row 0, down one row, right to left along row 1, and so on.
//! Each visit is reported together with the move that reached it, which
//! tells the caller which strip of the window to retire and which to add.

/// Direction of travel along the current row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    MovingRight,
    MovingLeft,
}

/// How the traversal arrived at a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeMove {
    /// First pixel, `(0, 0)`: the window must be built from scratch.
    Start,
    /// One column along the current row, in the current direction.
    StepColumn,
    /// One row down, same column; the direction has just flipped.
    DropRow,
}

/// One visited output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeStep {
    pub kind: SnakeMove,
    /// Direction of travel after this move.
    pub state: SnakeState,
    pub row: u32,
    pub col: u32,
}

/// Iterator over every pixel of a `rows x cols` grid in snake order.
#[derive(Debug, Clone)]
pub struct Snake {
    rows: u32,
    cols: u32,
    next: Option<SnakeStep>,
}

impl Snake {
    pub fn new(rows: u32, cols: u32) -> Self {
        let next = (rows > 0 && cols > 0).then_some(SnakeStep {
            kind: SnakeMove::Start,
            state: SnakeState::MovingRight,
            row: 0,
            col: 0,
        });
        Snake { rows, cols, next }
    }

    fn successor(&self, at: SnakeStep) -> Option<SnakeStep> {
        let along = match at.state {
            SnakeState::MovingRight => (at.col + 1 < self.cols).then(|| at.col + 1),
            SnakeState::MovingLeft => at.col.checked_sub(1),
        };
        if let Some(col) = along {
            return Some(SnakeStep {
                kind: SnakeMove::StepColumn,
                col,
                ..at
            });
        }
        if at.row + 1 >= self.rows {
            return None;
        }
        let state = match at.state {
            SnakeState::MovingRight => SnakeState::MovingLeft,
            SnakeState::MovingLeft => SnakeState::MovingRight,
        };
        Some(SnakeStep {
            kind: SnakeMove::DropRow,
            state,
            row: at.row + 1,
            col: at.col,
        })
    }
}

impl Iterator for Snake {
    type Item = SnakeStep;

    fn next(&mut self) -> Option<SnakeStep> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_order() {
        let visits: Vec<(u32, u32)> = Snake::new(3, 3).map(|s| (s.row, s.col)).collect();
        assert_eq!(
            visits,
            vec![
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (1, 1),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_snake_moves() {
        let steps: Vec<SnakeStep> = Snake::new(2, 2).collect();
        assert_eq!(steps[0].kind, SnakeMove::Start);
        assert_eq!(steps[1].kind, SnakeMove::StepColumn);
        assert_eq!(steps[1].state, SnakeState::MovingRight);
        assert_eq!(steps[2].kind, SnakeMove::DropRow);
        assert_eq!(steps[2].state, SnakeState::MovingLeft);
        assert_eq!(steps[3].kind, SnakeMove::StepColumn);
        assert_eq!(steps[3].state, SnakeState::MovingLeft);
        assert_eq!((steps[3].row, steps[3].col), (1, 0));
    }

    #[test]
    fn test_snake_single_column() {
        let steps: Vec<SnakeStep> = Snake::new(3, 1).collect();
        assert_eq!(steps.len(), 3);
        assert!(steps[1..].iter().all(|s| s.kind == SnakeMove::DropRow));
        assert_eq!(Snake::new(0, 4).count(), 0);
    }
}
