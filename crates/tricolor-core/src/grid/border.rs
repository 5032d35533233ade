//! Border operations for grids
//!
//! - Mirrored borders (reflection without repeating the edge pixel)
//! - Border removal
//!
//! Filters that need a full neighborhood around every pixel pad with
//! [`PixelGrid::mirror`] first and trim with [`PixelGrid::remove_border`]
//! afterwards.

use super::{PixelGrid, PixelGridMut};
use crate::error::{Error, Result};

impl PixelGrid {
    /// Add a mirrored border of `radius` pixels on every side.
    ///
    /// The center of the result is an exact copy of `self`. Edge strips
    /// reflect the pixels one step inside the edge: in padded coordinates,
    /// row `i < radius` copies row `2*radius - i`, and the bottom, left and
    /// right strips follow the same rule. Corner blocks reflect across the
    /// diagonal, so the top-left pixel `(i, j)` copies `(2*radius - j,
    /// 2*radius - i)`; the other three corners are the same law flipped
    /// into their own quadrant.
    ///
    /// # Returns
    ///
    /// New grid with dimensions `(rows + 2*radius, cols + 2*radius)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `radius >= rows` or
    /// `radius >= cols`, since the reflection would read outside the grid.
    pub fn mirror(&self, radius: u32) -> Result<PixelGrid> {
        if radius == 0 {
            return Ok(self.deep_copy());
        }
        let (rows, cols) = self.dims();
        if radius >= rows || radius >= cols {
            return Err(Error::InvalidParameter(format!(
                "mirror radius {} requires a grid larger than {}x{}",
                radius, rows, cols
            )));
        }

        let r = radius;
        let prows = rows
            .checked_add(2 * r)
            .ok_or(Error::InvalidDimension { rows, cols })?;
        let pcols = cols
            .checked_add(2 * r)
            .ok_or(Error::InvalidDimension { rows, cols })?;
        let mut out = PixelGridMut::new(prows, pcols)?;

        // Center
        for i in 0..rows {
            let src = self.row(i);
            out.row_mut(i + r)[r as usize..(r + cols) as usize].copy_from_slice(src);
        }

        let last_row = prows - 1;
        let last_col = pcols - 1;

        // Top and bottom strips (center columns only)
        for i in 0..r {
            for j in r..pcols - r {
                let top = out.at(2 * r - i, j);
                out.set(i, j, top);
                let bottom = out.at(last_row - 2 * r + i, j);
                out.set(last_row - i, j, bottom);
            }
        }

        // Left and right strips (center rows only)
        for i in r..prows - r {
            for j in 0..r {
                let left = out.at(i, 2 * r - j);
                out.set(i, j, left);
                let right = out.at(i, last_col - 2 * r + j);
                out.set(i, last_col - j, right);
            }
        }

        // Corners, reflected across the diagonal into the center region
        for i in 0..r {
            for j in 0..r {
                let tl = out.at(2 * r - j, 2 * r - i);
                out.set(i, j, tl);

                let tr = out.at(2 * r - j, last_col - 2 * r + i);
                out.set(i, last_col - j, tr);

                let bl = out.at(last_row - 2 * r + j, 2 * r - i);
                out.set(last_row - i, j, bl);

                let br = out.at(last_row - 2 * r + j, last_col - 2 * r + i);
                out.set(last_row - i, last_col - j, br);
            }
        }

        Ok(out.into())
    }

    /// Remove a uniform border of `npix` pixels.
    ///
    /// # Returns
    ///
    /// New grid with dimensions `(rows - 2*npix, cols - 2*npix)`.
    ///
    /// # Errors
    ///
    /// Returns error if the border is not smaller than half the grid.
    pub fn remove_border(&self, npix: u32) -> Result<PixelGrid> {
        if npix == 0 {
            return Ok(self.deep_copy());
        }
        let (rows, cols) = self.dims();
        if 2 * npix as u64 >= rows as u64 || 2 * npix as u64 >= cols as u64 {
            return Err(Error::InvalidParameter(format!(
                "border {} too large for {}x{} grid",
                npix, rows, cols
            )));
        }
        self.submatrix(npix, npix, rows - 2 * npix, cols - 2 * npix)
    }
}
