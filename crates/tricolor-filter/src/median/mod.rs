//! Median filters
//!
//! Three interchangeable strategies share one contract: the input is
//! mirror-padded by `radius`, and each output channel is the median
//! (sorted position `(2r + 1)² / 2`) of the `(2r + 1) x (2r + 1)`
//! neighborhood. Output dimensions equal input dimensions and all three
//! strategies produce identical pixels.
//!
//! | variant | per-pixel cost |
//! |---------|----------------|
//! | [`MedianVariant::Naive`] | sort of (2r+1)² samples |
//! | [`MedianVariant::RowSnake`] | O(r) histogram updates + O(256) scan |
//! | [`MedianVariant::ColumnCached`] | O(1) amortized updates + O(256) merge and scan |

mod column_cached;
mod histogram;
mod naive;
mod row_snake;
pub mod snake;

pub use column_cached::median_column_cached;
pub use naive::median_naive;
pub use row_snake::median_row_snake;

use crate::FilterResult;
use log::trace;
use tricolor_core::PixelGrid;

/// Signature shared by every median strategy.
pub type MedianFn = fn(&PixelGrid, u32) -> FilterResult<PixelGrid>;

/// Median filter strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MedianVariant {
    /// Sort every window
    Naive,
    /// Single sliding window histogram
    RowSnake,
    /// Sliding window built from cached column histograms
    #[default]
    ColumnCached,
}

impl MedianVariant {
    /// Every variant, slowest first.
    pub const ALL: [MedianVariant; 3] = [
        MedianVariant::Naive,
        MedianVariant::RowSnake,
        MedianVariant::ColumnCached,
    ];

    /// The function implementing this variant.
    pub fn function(self) -> MedianFn {
        match self {
            MedianVariant::Naive => median_naive,
            MedianVariant::RowSnake => median_row_snake,
            MedianVariant::ColumnCached => median_column_cached,
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            MedianVariant::Naive => "naive",
            MedianVariant::RowSnake => "row-snake",
            MedianVariant::ColumnCached => "column-cached",
        }
    }

    /// Run this variant on `grid`.
    ///
    /// # Errors
    ///
    /// Fails when `radius` is not smaller than both grid dimensions, since
    /// the mirrored border could not be built.
    pub fn apply(self, grid: &PixelGrid, radius: u32) -> FilterResult<PixelGrid> {
        trace!(
            "median ({}): {}x{} grid, radius {}",
            self.name(),
            grid.rows(),
            grid.cols(),
            radius
        );
        (self.function())(grid, radius)
    }
}

/// Median filter with the default (fastest) strategy.
pub fn median_filter(grid: &PixelGrid, radius: u32) -> FilterResult<PixelGrid> {
    MedianVariant::default().apply(grid, radius)
}

/// Number of samples in a window of the given radius.
fn window_len(radius: u32) -> usize {
    let side = 2 * radius as usize + 1;
    side * side
}

#[cfg(test)]
mod tests {
    use super::*;
    use tricolor_core::Rgb;

    #[test]
    fn test_radius_zero_is_identity() {
        let grid = PixelGrid::from_fn(3, 4, |r, c| Rgb::new(r as u8, c as u8, 7)).unwrap();
        for variant in MedianVariant::ALL {
            assert_eq!(variant.apply(&grid, 0).unwrap(), grid, "{}", variant.name());
        }
    }

    #[test]
    fn test_single_outlier_removed() {
        let mut m = PixelGrid::new_filled(5, 5, Rgb::gray(10)).unwrap().into_mut();
        m.set(2, 2, Rgb::WHITE);
        let grid: PixelGrid = m.into();
        for variant in MedianVariant::ALL {
            let out = variant.apply(&grid, 1).unwrap();
            assert_eq!(out.at(2, 2), Rgb::gray(10), "{}", variant.name());
        }
    }

    #[test]
    fn test_radius_too_large() {
        let grid = PixelGrid::new(3, 8).unwrap();
        for variant in MedianVariant::ALL {
            assert!(variant.apply(&grid, 3).is_err());
        }
        assert!(median_filter(&grid, 2).is_ok());
    }

    #[test]
    fn test_window_len() {
        assert_eq!(window_len(0), 1);
        assert_eq!(window_len(1), 9);
        assert_eq!(window_len(3), 49);
    }
}
