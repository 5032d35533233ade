//! Rectangle extraction
//!
//! Unlike a clipping crop, [`PixelGrid::submatrix`] never shrinks the
//! requested rectangle: a rectangle that does not fit is an error.

use super::{GridData, PixelGrid};
use crate::error::{Error, Result};
use std::sync::Arc;

impl PixelGrid {
    /// Extract the `height x width` rectangle whose top-left corner is
    /// `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `height` or `width` is 0 and
    /// [`Error::RegionOutOfBounds`] if the rectangle extends past the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use tricolor_core::{PixelGrid, Rgb};
    ///
    /// let grid = PixelGrid::from_fn(6, 8, |r, c| Rgb::gray((r * 8 + c) as u8)).unwrap();
    /// let sub = grid.submatrix(2, 3, 3, 4).unwrap();
    /// assert_eq!(sub.dims(), (3, 4));
    /// assert_eq!(sub.at(0, 0), grid.at(2, 3));
    /// assert!(grid.submatrix(4, 0, 3, 1).is_err());
    /// ```
    pub fn submatrix(&self, row: u32, col: u32, height: u32, width: u32) -> Result<PixelGrid> {
        if height == 0 || width == 0 {
            return Err(Error::InvalidDimension {
                rows: height,
                cols: width,
            });
        }
        let (rows, cols) = self.dims();
        let fits = row as u64 + height as u64 <= rows as u64
            && col as u64 + width as u64 <= cols as u64;
        if !fits {
            return Err(Error::RegionOutOfBounds {
                row,
                col,
                height,
                width,
                rows,
                cols,
            });
        }

        let mut data = Vec::with_capacity(height as usize * width as usize);
        let c0 = col as usize;
        let c1 = c0 + width as usize;
        for r in row..row + height {
            data.extend_from_slice(&self.row(r)[c0..c1]);
        }
        Ok(PixelGrid {
            inner: Arc::new(GridData {
                rows: height,
                cols: width,
                data,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_submatrix_full_grid() {
        let grid = PixelGrid::from_fn(3, 3, |r, c| Rgb::new(r as u8, c as u8, 0)).unwrap();
        assert_eq!(grid.submatrix(0, 0, 3, 3).unwrap(), grid);
    }

    #[test]
    fn test_submatrix_contents() {
        let grid = PixelGrid::from_fn(5, 5, |r, c| Rgb::new(r as u8, c as u8, 9)).unwrap();
        let sub = grid.submatrix(1, 2, 2, 3).unwrap();
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(sub.at(r, c), Rgb::new((r + 1) as u8, (c + 2) as u8, 9));
            }
        }
    }

    #[test]
    fn test_submatrix_rejects() {
        let grid = PixelGrid::new(4, 4).unwrap();
        assert!(matches!(
            grid.submatrix(0, 0, 0, 2),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(matches!(
            grid.submatrix(1, 1, 4, 1),
            Err(Error::RegionOutOfBounds { .. })
        ));
        assert!(matches!(
            grid.submatrix(0, u32::MAX, 1, 2),
            Err(Error::RegionOutOfBounds { .. })
        ));
    }
}
