//! Reference median: gather, sort, pick the middle

use super::window_len;
use crate::FilterResult;
use tricolor_core::{PixelGrid, PixelGridMut, Rgb};

/// Median filter that sorts every window from scratch.
///
/// O(r² log r) per pixel. Kept as the reference the histogram variants are
/// checked against.
pub fn median_naive(grid: &PixelGrid, radius: u32) -> FilterResult<PixelGrid> {
    let padded = grid.mirror(radius)?;
    let (rows, cols) = grid.dims();
    let side = 2 * radius + 1;
    let n = window_len(radius);
    let mid = n / 2;

    let mut out = PixelGridMut::new(rows, cols)?;
    let mut samples: [Vec<u8>; 3] = std::array::from_fn(|_| Vec::with_capacity(n));
    for i in 0..rows {
        for j in 0..cols {
            for s in &mut samples {
                s.clear();
            }
            for wi in i..i + side {
                for &px in &padded.row(wi)[j as usize..(j + side) as usize] {
                    samples[0].push(px.r);
                    samples[1].push(px.g);
                    samples[2].push(px.b);
                }
            }
            for s in &mut samples {
                s.sort_unstable();
            }
            out.set(i, j, Rgb::new(samples[0][mid], samples[1][mid], samples[2][mid]));
        }
    }
    Ok(out.into())
}
