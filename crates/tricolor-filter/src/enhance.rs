//! Color balance and contrast enhancement
//!
//! Both operations reduce to per-channel lookup tables applied to every
//! pixel.

use crate::{FilterError, FilterResult};
use log::trace;
use tricolor_core::{PixelGrid, Rgb, color::clamp_to_u8};

/// A 256-entry lookup table mapping input channel values to output values.
pub type TrcLut = [u8; 256];

/// Build a lookup table from a per-level mapping, rounding and clamping.
fn build_lut(f: impl Fn(f64) -> f64) -> TrcLut {
    std::array::from_fn(|v| clamp_to_u8(f(v as f64)))
}

/// First level, in `levels` order, at which the running count exceeds `clip`.
fn first_past(bins: &[u64; 256], clip: u64, levels: impl Iterator<Item = usize>) -> Option<usize> {
    let mut seen = 0u64;
    for v in levels {
        seen += bins[v];
        if seen > clip {
            return Some(v);
        }
    }
    None
}

/// Apply one lookup table per channel (red, green, blue).
pub fn map_channels(grid: &PixelGrid, luts: &[TrcLut; 3]) -> PixelGrid {
    let mut out = grid.to_mut();
    for px in out.data_mut() {
        *px = Rgb::new(
            luts[0][px.r as usize],
            luts[1][px.g as usize],
            luts[2][px.b as usize],
        );
    }
    out.into()
}

/// Gray-world white balance.
///
/// Scales each channel by `(mean of channel means) / (channel mean)` so the
/// three channel means become equal. A grid with a channel whose mean is
/// zero is returned unchanged.
pub fn gray_world(grid: &PixelGrid) -> PixelGrid {
    let means = grid.channel_means();
    if means.iter().any(|&m| m == 0.0) {
        trace!("gray world: zero channel mean, grid unchanged");
        return grid.clone();
    }
    let gray = means.iter().sum::<f64>() / 3.0;
    trace!(
        "gray world: means r={:.2} g={:.2} b={:.2}, target {:.2}",
        means[0], means[1], means[2], gray
    );
    let luts = means.map(|m| {
        let scale = gray / m;
        // Scaled levels round to nearest rather than truncate
        build_lut(|v| v * scale)
    });
    map_channels(grid, &luts)
}

/// Histogram-stretch autocontrast.
///
/// Clips `round(fraction * pixels)` samples from each tail of the luminance
/// histogram to find `ymin` and `ymax`, then maps every channel linearly so
/// `ymin` lands on 0 and `ymax` on 255. Returns the grid unchanged when the
/// clipped range is empty.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless `0.0 <= fraction < 0.5`.
pub fn autocontrast(grid: &PixelGrid, fraction: f64) -> FilterResult<PixelGrid> {
    if !(0.0..0.5).contains(&fraction) {
        return Err(FilterError::InvalidParameters(format!(
            "autocontrast fraction must be in [0, 0.5), got {}",
            fraction
        )));
    }

    let hist = grid.luminance_histogram();
    let clip = (fraction * hist.total() as f64).round() as u64;

    let bins = hist.bins();
    // Both bounds are the level that crosses the clip count, kept inside the range
    let (Some(ymin), Some(ymax)) = (
        first_past(bins, clip, 0..256),
        first_past(bins, clip, (0..256).rev()),
    ) else {
        return Ok(grid.clone());
    };
    trace!("autocontrast: clip {} samples per tail, range {}..={}", clip, ymin, ymax);

    if ymax <= ymin {
        return Ok(grid.clone());
    }

    let (lo, span) = (ymin as f64, (ymax - ymin) as f64);
    let lut = build_lut(|v| 255.0 * (v - lo) / span);
    Ok(map_channels(grid, &[lut; 3]))
}
