//! PixelGrid - The image container
//!
//! A `PixelGrid` is a dense row-major array of [`Rgb`] pixels addressed by
//! `(row, col)`.
//!
//! # Ownership model
//!
//! `PixelGrid` uses `Arc` for cheap cloning: a clone is a read-only view
//! sharing storage with the original. To modify pixels, convert to
//! [`PixelGridMut`] via [`PixelGrid::try_into_mut`] (no copy when the grid is
//! not shared) or [`PixelGrid::to_mut`] (always copies), then convert back
//! with `Into<PixelGrid>`. A view therefore never observes a mutation.

mod access;
mod border;
mod clip;
mod histogram;
mod statistics;

pub use histogram::LuminanceHistogram;

use crate::color::Rgb;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal grid storage
#[derive(Debug, Clone)]
struct GridData {
    /// Number of rows
    rows: u32,
    /// Number of columns
    cols: u32,
    /// Pixels in row-major order
    data: Vec<Rgb>,
}

impl GridData {
    fn filled(rows: u32, cols: u32, px: Rgb) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        let len = (rows as usize)
            .checked_mul(cols as usize)
            .ok_or(Error::InvalidDimension { rows, cols })?;
        Ok(GridData {
            rows,
            cols,
            data: vec![px; len],
        })
    }
}

/// PixelGrid - immutable, cheaply clonable image
///
/// # Examples
///
/// ```
/// use tricolor_core::{PixelGrid, Rgb};
///
/// let grid = PixelGrid::new(4, 6).unwrap();
/// assert_eq!(grid.rows(), 4);
/// assert_eq!(grid.cols(), 6);
/// assert_eq!(grid.at(3, 5), Rgb::BLACK);
/// ```
#[derive(Debug, Clone)]
pub struct PixelGrid {
    inner: Arc<GridData>,
}

impl PixelGrid {
    /// Create a black grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `rows` or `cols` is 0.
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        Self::new_filled(rows, cols, Rgb::BLACK)
    }

    /// Create a grid with every pixel set to `px`.
    pub fn new_filled(rows: u32, cols: u32, px: Rgb) -> Result<Self> {
        Ok(PixelGrid {
            inner: Arc::new(GridData::filled(rows, cols, px)?),
        })
    }

    /// Create a grid by evaluating `f(row, col)` for every pixel.
    pub fn from_fn<F>(rows: u32, cols: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let mut inner = GridData::filled(rows, cols, Rgb::BLACK)?;
        for r in 0..rows {
            for c in 0..cols {
                inner.data[r as usize * cols as usize + c as usize] = f(r, c);
            }
        }
        Ok(PixelGrid {
            inner: Arc::new(inner),
        })
    }

    /// Create a grid from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `pixels.len() != rows * cols`.
    pub fn from_pixels(rows: u32, cols: u32, pixels: Vec<Rgb>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimension { rows, cols });
        }
        if pixels.len() != rows as usize * cols as usize {
            return Err(Error::DimensionMismatch {
                expected: (rows, cols),
                actual: (pixels.len() as u32 / cols, cols),
            });
        }
        Ok(PixelGrid {
            inner: Arc::new(GridData {
                rows,
                cols,
                data: pixels,
            }),
        })
    }

    /// Create a gray grid from row-major intensities (R = G = B).
    pub fn from_gray(rows: u32, cols: u32, values: &[u8]) -> Result<Self> {
        let pixels = values.iter().map(|&v| Rgb::gray(v)).collect();
        Self::from_pixels(rows, cols, pixels)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.inner.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.inner.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn dims(&self) -> (u32, u32) {
        (self.inner.rows, self.inner.cols)
    }

    /// Pixels in row-major order.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: u32) -> &[Rgb] {
        assert!(
            row < self.inner.rows,
            "row {} out of bounds for {} rows",
            row,
            self.inner.rows
        );
        let cols = self.inner.cols as usize;
        let start = row as usize * cols;
        &self.inner.data[start..start + cols]
    }

    /// Number of handles sharing this storage.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two grids have the same dimensions.
    pub fn sizes_equal(&self, other: &PixelGrid) -> bool {
        self.dims() == other.dims()
    }

    /// Create an independent copy of this grid.
    ///
    /// Unlike `clone()`, which shares storage, the copy owns its own pixels.
    pub fn deep_copy(&self) -> Self {
        PixelGrid {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to take exclusive ownership of the storage.
    ///
    /// Succeeds only if no other handle shares it.
    pub fn try_into_mut(self) -> std::result::Result<PixelGridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelGridMut { inner: data }),
            Err(arc) => Err(PixelGrid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    pub fn to_mut(&self) -> PixelGridMut {
        PixelGridMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Take the storage, copying only if it is shared.
    pub fn into_mut(self) -> PixelGridMut {
        match self.try_into_mut() {
            Ok(m) => m,
            Err(shared) => shared.to_mut(),
        }
    }
}

impl PartialEq for PixelGrid {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.dims() == other.dims() && self.inner.data == other.inner.data)
    }
}

impl Eq for PixelGrid {}

/// Mutable PixelGrid
///
/// Exclusive owner of a pixel buffer. Convert back to a shareable
/// [`PixelGrid`] using `Into<PixelGrid>`.
#[derive(Debug)]
pub struct PixelGridMut {
    inner: GridData,
}

impl PixelGridMut {
    /// Create a black mutable grid.
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        Ok(PixelGridMut {
            inner: GridData::filled(rows, cols, Rgb::BLACK)?,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.inner.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.inner.cols
    }

    /// Pixels in row-major order.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Mutable pixels in row-major order.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Rgb] {
        &mut self.inner.data
    }

    /// Mutable access to one row.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row_mut(&mut self, row: u32) -> &mut [Rgb] {
        assert!(
            row < self.inner.rows,
            "row {} out of bounds for {} rows",
            row,
            self.inner.rows
        );
        let cols = self.inner.cols as usize;
        let start = row as usize * cols;
        &mut self.inner.data[start..start + cols]
    }

    /// Set every pixel to `px`.
    pub fn fill(&mut self, px: Rgb) {
        self.inner.data.fill(px);
    }
}

impl From<PixelGridMut> for PixelGrid {
    fn from(m: PixelGridMut) -> Self {
        PixelGrid {
            inner: Arc::new(m.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty() {
        assert!(PixelGrid::new(0, 5).is_err());
        assert!(PixelGrid::new(5, 0).is_err());
        assert!(PixelGridMut::new(0, 0).is_err());
    }

    #[test]
    fn test_from_pixels_length_mismatch() {
        let err = PixelGrid::from_pixels(2, 3, vec![Rgb::BLACK; 5]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn test_from_fn_layout() {
        let grid = PixelGrid::from_fn(3, 4, |r, c| Rgb::gray((r * 10 + c) as u8)).unwrap();
        assert_eq!(grid.at(0, 0), Rgb::gray(0));
        assert_eq!(grid.at(2, 3), Rgb::gray(23));
        assert_eq!(grid.row(1)[2], Rgb::gray(12));
    }

    #[test]
    fn test_clone_shares_and_to_mut_copies() {
        let grid = PixelGrid::new_filled(2, 2, Rgb::gray(7)).unwrap();
        let view = grid.clone();
        assert_eq!(grid.ref_count(), 2);

        // Shared: try_into_mut hands the handle back
        let grid = grid.try_into_mut().unwrap_err();

        let mut copy = view.to_mut();
        copy.set(0, 0, Rgb::WHITE);
        let copy: PixelGrid = copy.into();

        assert_eq!(view.at(0, 0), Rgb::gray(7));
        assert_eq!(grid.at(0, 0), Rgb::gray(7));
        assert_eq!(copy.at(0, 0), Rgb::WHITE);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let grid = PixelGrid::new_filled(2, 3, Rgb::gray(1)).unwrap();
        let copy = grid.deep_copy();
        assert_eq!(grid, copy);
        assert_eq!(grid.ref_count(), 1);
        assert_eq!(copy.ref_count(), 1);

        let mut m = copy.try_into_mut().unwrap();
        m.fill(Rgb::gray(2));
        let copy: PixelGrid = m.into();
        assert_ne!(grid, copy);
    }

    #[test]
    fn test_into_mut_unshared_and_shared() {
        let grid = PixelGrid::new(1, 1).unwrap();
        let mut m = grid.into_mut();
        m.set(0, 0, Rgb::WHITE);

        let grid: PixelGrid = m.into();
        let view = grid.clone();
        let mut m = grid.into_mut();
        m.set(0, 0, Rgb::BLACK);
        assert_eq!(view.at(0, 0), Rgb::WHITE);
    }
}
