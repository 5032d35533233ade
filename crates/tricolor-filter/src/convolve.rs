//! Convolution operations
//!
//! Each channel is convolved independently. Only pixels whose full kernel
//! footprint lies inside the grid are computed; the remaining border of
//! width `radius` is left black. Results are rounded to nearest and clamped
//! to `[0, 255]`.

use crate::{FilterResult, Kernel};
use log::trace;
use tricolor_core::{PixelGrid, PixelGridMut, Rgb, color::clamp_to_u8};

/// Convolve a grid with an arbitrary kernel.
///
/// Output has the input's dimensions. A kernel wider or taller than the
/// grid yields an all-black result.
pub fn custom(grid: &PixelGrid, kernel: &Kernel) -> FilterResult<PixelGrid> {
    let (rows, cols) = grid.dims();
    let size = kernel.size();
    let radius = kernel.radius();
    trace!(
        "convolve: {}x{} grid, {}x{} kernel",
        rows, cols, size, size
    );

    let mut out = PixelGridMut::new(rows, cols)?;
    if size > rows || size > cols {
        return Ok(out.into());
    }

    let weights = kernel.data();
    for i in radius..rows - radius {
        for j in radius..cols - radius {
            let mut sum = [0.0f64; 3];
            for ki in 0..size {
                let src = grid.row(i + ki - radius);
                let krow = &weights[(ki * size) as usize..((ki + 1) * size) as usize];
                for (kj, &w) in krow.iter().enumerate() {
                    let px = src[(j - radius) as usize + kj];
                    sum[0] += w * px.r as f64;
                    sum[1] += w * px.g as f64;
                    sum[2] += w * px.b as f64;
                }
            }
            out.set(
                i,
                j,
                Rgb::new(clamp_to_u8(sum[0]), clamp_to_u8(sum[1]), clamp_to_u8(sum[2])),
            );
        }
    }

    Ok(out.into())
}

/// Convolve with the horizontal-gradient Sobel kernel.
pub fn sobel_x(grid: &PixelGrid) -> FilterResult<PixelGrid> {
    custom(grid, &Kernel::sobel_x())
}

/// Convolve with the vertical-gradient Sobel kernel.
pub fn sobel_y(grid: &PixelGrid) -> FilterResult<PixelGrid> {
    custom(grid, &Kernel::sobel_y())
}

/// Sharpen with the 3x3 unsharp kernel.
///
/// With `mirror`, the grid is padded by one mirrored pixel before
/// convolving and the padding is trimmed afterwards, so every output pixel
/// is sharpened. Without it the 1-pixel border of the result is black.
///
/// # Errors
///
/// Mirroring requires at least 2 rows and 2 columns.
pub fn unsharp(grid: &PixelGrid, mirror: bool) -> FilterResult<PixelGrid> {
    let kernel = Kernel::unsharp();
    if !mirror {
        return custom(grid, &kernel);
    }
    let radius = kernel.radius();
    let padded = grid.mirror(radius)?;
    let sharpened = custom(&padded, &kernel)?;
    Ok(sharpened.remove_border(radius)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> PixelGrid {
        PixelGrid::from_fn(5, 5, |r, c| Rgb::new((c * 50) as u8, (r * 50) as u8, 128)).unwrap()
    }

    #[test]
    fn test_identity_kernel() {
        let grid = ramp();
        let identity = Kernel::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]])
            .unwrap();
        let out = custom(&grid, &identity).unwrap();
        for r in 0..5 {
            for c in 0..5 {
                let border = r == 0 || c == 0 || r == 4 || c == 4;
                let expected = if border { Rgb::BLACK } else { grid.at(r, c) };
                assert_eq!(out.at(r, c), expected);
            }
        }
    }

    #[test]
    fn test_size_one_kernel_keeps_everything() {
        let grid = ramp();
        let k = Kernel::from_slice(1, &[1.0]).unwrap();
        assert_eq!(custom(&grid, &k).unwrap(), grid);
    }

    #[test]
    fn test_kernel_larger_than_grid() {
        let grid = PixelGrid::new_filled(2, 5, Rgb::WHITE).unwrap();
        let out = custom(&grid, &Kernel::unsharp()).unwrap();
        assert_eq!(out.dims(), (2, 5));
        assert!(out.data().iter().all(|&px| px == Rgb::BLACK));
    }

    #[test]
    fn test_sobel_x_on_ramp() {
        // Red grows by 50 per column: gradient = (1 + 2 + 1) * 100 = 400 -> 255
        let grid = ramp();
        let out = sobel_x(&grid).unwrap();
        assert_eq!(out.at(2, 2).r, 255);
        assert_eq!(out.at(2, 2).g, 0);
        assert_eq!(out.at(2, 2).b, 0);
    }

    #[test]
    fn test_sobel_y_sign() {
        // Green grows downward, so the top-positive kernel gives a negative sum
        let grid = ramp();
        let out = sobel_y(&grid).unwrap();
        assert_eq!(out.at(2, 2).g, 0);
    }

    #[test]
    fn test_unsharp_flat_is_identity() {
        let grid = PixelGrid::new_filled(4, 6, Rgb::new(10, 100, 200)).unwrap();
        assert_eq!(unsharp(&grid, true).unwrap(), grid);
        let out = unsharp(&grid, false).unwrap();
        assert_eq!(out.at(0, 0), Rgb::BLACK);
        assert_eq!(out.at(1, 1), Rgb::new(10, 100, 200));
    }
}
