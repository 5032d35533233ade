//! Luminance histogram

use super::PixelGrid;

/// 256-bin histogram of pixel luminance.
///
/// Bin `v` counts the pixels whose [`Rgb::luminance`](crate::Rgb::luminance)
/// equals `v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceHistogram {
    bins: [u64; 256],
}

impl LuminanceHistogram {
    /// Count in bin `level`.
    #[inline]
    pub fn count(&self, level: u8) -> u64 {
        self.bins[level as usize]
    }

    /// All 256 bins.
    pub fn bins(&self) -> &[u64; 256] {
        &self.bins
    }

    /// Total number of pixels counted.
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }
}

impl PixelGrid {
    /// Build the luminance histogram of the whole grid.
    pub fn luminance_histogram(&self) -> LuminanceHistogram {
        let mut bins = [0u64; 256];
        for px in self.data() {
            bins[px.luminance() as usize] += 1;
        }
        LuminanceHistogram { bins }
    }
}
