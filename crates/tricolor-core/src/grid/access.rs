//! Pixel access functions
//!
//! `at` / `set` treat an out-of-range coordinate as a programming error and
//! panic. `get` / `try_set` are the checked counterparts for callers that
//! work with untrusted coordinates.

use super::{PixelGrid, PixelGridMut};
use crate::color::Rgb;
use crate::error::{Error, Result};

#[inline]
fn offset(rows: u32, cols: u32, row: u32, col: u32) -> usize {
    assert!(
        row < rows && col < cols,
        "index ({}, {}) out of bounds for {}x{} grid",
        row,
        col,
        rows,
        cols
    );
    row as usize * cols as usize + col as usize
}

impl PixelGrid {
    /// Read the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn at(&self, row: u32, col: u32) -> Rgb {
        self.inner.data[offset(self.inner.rows, self.inner.cols, row, col)]
    }

    /// Read the pixel at `(row, col)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<Rgb> {
        if row < self.inner.rows && col < self.inner.cols {
            Some(self.inner.data[row as usize * self.inner.cols as usize + col as usize])
        } else {
            None
        }
    }
}

impl PixelGridMut {
    /// Read the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn at(&self, row: u32, col: u32) -> Rgb {
        self.inner.data[offset(self.inner.rows, self.inner.cols, row, col)]
    }

    /// Read the pixel at `(row, col)`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<Rgb> {
        if row < self.inner.rows && col < self.inner.cols {
            Some(self.inner.data[row as usize * self.inner.cols as usize + col as usize])
        } else {
            None
        }
    }

    /// Mutable reference to the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn at_mut(&mut self, row: u32, col: u32) -> &mut Rgb {
        let idx = offset(self.inner.rows, self.inner.cols, row, col);
        &mut self.inner.data[idx]
    }

    /// Write the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, px: Rgb) {
        *self.at_mut(row, col) = px;
    }

    /// Write the pixel at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn try_set(&mut self, row: u32, col: u32, px: Rgb) -> Result<()> {
        if row >= self.inner.rows || col >= self.inner.cols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.inner.rows,
                cols: self.inner.cols,
            });
        }
        self.set(row, col, px);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_out_of_bounds() {
        let grid = PixelGrid::new(2, 3).unwrap();
        assert_eq!(grid.get(1, 2), Some(Rgb::BLACK));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_at_panics_out_of_bounds() {
        let grid = PixelGrid::new(2, 3).unwrap();
        let _ = grid.at(0, 3);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_panics_out_of_bounds() {
        let mut grid = PixelGridMut::new(2, 3).unwrap();
        grid.set(2, 0, Rgb::WHITE);
    }

    #[test]
    fn test_try_set() {
        let mut grid = PixelGridMut::new(2, 3).unwrap();
        grid.try_set(1, 1, Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(grid.at(1, 1), Rgb::new(1, 2, 3));

        let err = grid.try_set(5, 1, Rgb::WHITE).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfBounds {
                row: 5,
                col: 1,
                rows: 2,
                cols: 3
            }
        ));
    }

    #[test]
    fn test_at_mut_writes_through() {
        let mut grid = PixelGridMut::new(1, 2).unwrap();
        grid.at_mut(0, 1).g = 200;
        assert_eq!(grid.at(0, 1), Rgb::new(0, 200, 0));
    }
}
