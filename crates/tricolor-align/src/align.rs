//! Plate splitting, offset search and compositing
//!
//! # Offset convention
//!
//! An [`Offset`] `(dy, dx)` of a plane means that the plane's sample at
//! `(i - dy, j - dx)` shows the same scene point as the green sample at
//! `(i, j)`. Equivalently, `plane(i, j) = green(i + dy, j + dx)`.

use crate::{AlignError, AlignOptions, AlignResult, Postprocess};
use log::debug;
use std::fmt;
use tricolor_core::{Channel, PixelGrid, PixelGridMut, Rgb};
use tricolor_filter::{autocontrast, convolve, gray_world};

/// Integer displacement of a plane relative to green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    /// Row displacement
    pub dy: i32,
    /// Column displacement
    pub dx: i32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Offset = Offset { dy: 0, dx: 0 };

    pub const fn new(dy: i32, dx: i32) -> Self {
        Offset { dy, dx }
    }
}

impl From<(i32, i32)> for Offset {
    fn from((dy, dx): (i32, i32)) -> Self {
        Offset { dy, dx }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dy, self.dx)
    }
}

/// Best offset found for a plane, with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetScore {
    pub offset: Offset,
    /// Mean squared error over the overlap at `offset`
    pub mse: f64,
}

/// The three exposures of a plate, each `h x w`.
#[derive(Debug, Clone)]
pub struct Planes {
    pub blue: PixelGrid,
    pub green: PixelGrid,
    pub red: PixelGrid,
}

/// Result of [`align`]
#[derive(Debug, Clone)]
pub struct AlignOutput {
    /// Composited (and postprocessed) color image
    pub image: PixelGrid,
    /// Offset of the red plane
    pub red: OffsetScore,
    /// Offset of the blue plane
    pub blue: OffsetScore,
}

/// Split a stacked plate into its blue (top), green and red (bottom) planes.
///
/// # Errors
///
/// Returns [`AlignError::InvalidPlate`] if the height is not a multiple of 3.
pub fn split_plate(plate: &PixelGrid) -> AlignResult<Planes> {
    let (rows, cols) = plate.dims();
    if rows % 3 != 0 {
        return Err(AlignError::InvalidPlate(format!(
            "plate height {} is not a multiple of 3",
            rows
        )));
    }
    let h = rows / 3;
    Ok(Planes {
        blue: plate.submatrix(0, 0, h, cols)?,
        green: plate.submatrix(h, 0, h, cols)?,
        red: plate.submatrix(2 * h, 0, h, cols)?,
    })
}

/// Mean squared error between green's green channel and `plane`'s
/// `channel` over the region where both are defined at `offset`.
///
/// Compares `green(i, j)` with `plane(i - dy, j - dx)`; the overlap has
/// `(rows - |dy|) x (cols - |dx|)` samples.
///
/// # Errors
///
/// Fails if the planes differ in size or the offset leaves no overlap.
pub fn overlap_mse(
    green: &PixelGrid,
    plane: &PixelGrid,
    channel: Channel,
    offset: Offset,
) -> AlignResult<f64> {
    if !green.sizes_equal(plane) {
        return Err(tricolor_core::Error::DimensionMismatch {
            expected: green.dims(),
            actual: plane.dims(),
        }
        .into());
    }
    let (rows, cols) = green.dims();
    let (rows, cols) = (rows as i64, cols as i64);
    let (dy, dx) = (offset.dy as i64, offset.dx as i64);
    if dy.abs() >= rows || dx.abs() >= cols {
        return Err(AlignError::InvalidParameter(format!(
            "offset {} leaves no overlap in a {}x{} plane",
            offset, rows, cols
        )));
    }

    let (i0, i1) = (dy.max(0), rows + dy.min(0));
    let (j0, j1) = (dx.max(0), cols + dx.min(0));
    let mut sum = 0u64;
    for i in i0..i1 {
        let g_row = green.row(i as u32);
        let p_row = plane.row((i - dy) as u32);
        for j in j0..j1 {
            let g = g_row[j as usize].g as i64;
            let p = p_row[(j - dx) as usize].channel(channel) as i64;
            sum += ((g - p) * (g - p)) as u64;
        }
    }
    let count = (i1 - i0) * (j1 - j0);
    Ok(sum as f64 / count as f64)
}

/// Exhaustive search for the offset minimizing [`overlap_mse`].
///
/// Every `(dy, dx)` with `|dy| <= max_shift.0` and `|dx| <= max_shift.1`
/// is scored. Ties keep the first offset in row-major order, starting from
/// `(-max_shift.0, -max_shift.1)`.
pub fn find_offset(
    green: &PixelGrid,
    plane: &PixelGrid,
    channel: Channel,
    max_shift: (u32, u32),
) -> AlignResult<OffsetScore> {
    let (sh, sw) = (max_shift.0 as i32, max_shift.1 as i32);
    let mut best: Option<OffsetScore> = None;
    for dy in -sh..=sh {
        for dx in -sw..=sw {
            let offset = Offset::new(dy, dx);
            let mse = overlap_mse(green, plane, channel, offset)?;
            if best.is_none_or(|b| mse < b.mse) {
                best = Some(OffsetScore { offset, mse });
            }
        }
    }
    // The search window always contains (0, 0)
    Ok(best.unwrap_or(OffsetScore {
        offset: Offset::ZERO,
        mse: f64::INFINITY,
    }))
}

/// Combine full-size planes into one color image.
///
/// The output is the region covered by all three planes once red and blue
/// are translated by their offsets, anchored at
/// `(max(0, dyR, dyB), max(0, dxR, dxB))` in green coordinates.
pub fn composite(planes: &Planes, red: Offset, blue: Offset) -> AlignResult<PixelGrid> {
    let (h, w) = planes.green.dims();
    if !planes.green.sizes_equal(&planes.red) || !planes.green.sizes_equal(&planes.blue) {
        return Err(AlignError::InvalidPlate("planes differ in size".to_string()));
    }

    let top = 0i32.max(red.dy).max(blue.dy);
    let left = 0i32.max(red.dx).max(blue.dx);
    let bottom = 0i32.min(red.dy).min(blue.dy);
    let right = 0i32.min(red.dx).min(blue.dx);
    let out_h = h as i64 - (top - bottom) as i64;
    let out_w = w as i64 - (left - right) as i64;
    if out_h <= 0 || out_w <= 0 {
        return Err(AlignError::InvalidParameter(format!(
            "offsets red {} blue {} leave no common area in a {}x{} plane",
            red, blue, h, w
        )));
    }

    let mut out = PixelGridMut::new(out_h as u32, out_w as u32)?;
    for y in 0..out_h as i32 {
        for x in 0..out_w as i32 {
            let r = planes.red.at((y + top - red.dy) as u32, (x + left - red.dx) as u32);
            let g = planes.green.at((y + top) as u32, (x + left) as u32);
            let b = planes.blue.at((y + top - blue.dy) as u32, (x + left - blue.dx) as u32);
            out.set(y as u32, x as u32, Rgb::new(r.r, g.g, b.b));
        }
    }
    Ok(out.into())
}

/// Apply the configured postprocessing filter.
pub fn postprocess(image: &PixelGrid, options: &AlignOptions) -> AlignResult<PixelGrid> {
    debug!("postprocess: {}", options.postprocess.name());
    let out = match options.postprocess {
        Postprocess::None => image.clone(),
        Postprocess::GrayWorld => gray_world(image),
        Postprocess::Unsharp => convolve::unsharp(image, options.mirror)?,
        Postprocess::Autocontrast => autocontrast(image, options.fraction)?,
    };
    Ok(out)
}

fn scaled(size: u32, fraction: f64) -> u32 {
    (size as f64 * fraction).round() as u32
}

/// Align the three exposures of a stacked plate.
///
/// Splits the plate, searches the red and blue offsets against green on
/// inset copies of the planes, composites the full planes and applies the
/// configured postprocessing.
///
/// # Errors
///
/// Returns [`AlignError::InvalidPlate`] if the plate height is not a
/// multiple of 3, if the inset leaves no scoring area, or if the search
/// range is not smaller than the scoring area.
///
/// # Examples
///
/// ```
/// use tricolor_align::{AlignOptions, Offset, align};
/// use tricolor_core::{PixelGrid, Rgb};
///
/// let plate = PixelGrid::from_fn(90, 40, |r, c| Rgb::gray(((r % 30) * 7 + c * 3) as u8)).unwrap();
/// let out = align(&plate, &AlignOptions::default()).unwrap();
/// assert_eq!(out.red.offset, Offset::ZERO);
/// assert_eq!(out.image.dims(), (30, 40));
/// ```
pub fn align(plate: &PixelGrid, options: &AlignOptions) -> AlignResult<AlignOutput> {
    options.validate()?;
    let planes = split_plate(plate)?;
    let (h, w) = planes.green.dims();

    let shift = (scaled(h, options.shift_fraction), scaled(w, options.shift_fraction));
    let inset = (scaled(h, options.inset_fraction), scaled(w, options.inset_fraction));
    let score_h = h as i64 - 2 * inset.0 as i64;
    let score_w = w as i64 - 2 * inset.1 as i64;
    if score_h <= 0 || score_w <= 0 {
        return Err(AlignError::InvalidPlate(format!(
            "inset {}x{} leaves no scoring area in a {}x{} plane",
            inset.0, inset.1, h, w
        )));
    }
    if shift.0 as i64 >= score_h || shift.1 as i64 >= score_w {
        return Err(AlignError::InvalidPlate(format!(
            "search range ±{}x±{} does not fit a {}x{} scoring area",
            shift.0, shift.1, score_h, score_w
        )));
    }
    debug!(
        "align: plane {}x{}, search ±{} rows ±{} cols, scoring {}x{}",
        h, w, shift.0, shift.1, score_h, score_w
    );

    let inner = |plane: &PixelGrid| {
        plane.submatrix(inset.0, inset.1, score_h as u32, score_w as u32)
    };
    let green = inner(&planes.green)?;
    let red = find_offset(&green, &inner(&planes.red)?, Channel::Red, shift)?;
    let blue = find_offset(&green, &inner(&planes.blue)?, Channel::Blue, shift)?;
    debug!(
        "align: red offset {} (mse {:.3}), blue offset {} (mse {:.3})",
        red.offset, red.mse, blue.offset, blue.mse
    );

    let image = composite(&planes, red.offset, blue.offset)?;
    let image = postprocess(&image, options)?;
    Ok(AlignOutput { image, red, blue })
}

/// Align a plate and return only the resulting image.
pub fn align_image(plate: &PixelGrid, options: &AlignOptions) -> AlignResult<PixelGrid> {
    Ok(align(plate, options)?.image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_ramp(rows: u32, cols: u32) -> PixelGrid {
        PixelGrid::from_fn(rows, cols, |r, c| Rgb::gray((r * 13 + c * 7) as u8)).unwrap()
    }

    #[test]
    fn test_split_plate() {
        let plate = PixelGrid::from_fn(6, 2, |r, _| Rgb::gray(r as u8)).unwrap();
        let planes = split_plate(&plate).unwrap();
        assert_eq!(planes.blue.at(1, 0), Rgb::gray(1));
        assert_eq!(planes.green.at(0, 1), Rgb::gray(2));
        assert_eq!(planes.red.at(1, 1), Rgb::gray(5));
        assert!(matches!(
            split_plate(&PixelGrid::new(7, 2).unwrap()),
            Err(AlignError::InvalidPlate(_))
        ));
    }

    #[test]
    fn test_overlap_mse_identical() {
        let g = gray_ramp(6, 6);
        assert_eq!(overlap_mse(&g, &g, Channel::Red, Offset::ZERO).unwrap(), 0.0);
        assert!(overlap_mse(&g, &g, Channel::Red, Offset::new(1, 0)).unwrap() > 0.0);
    }

    #[test]
    fn test_overlap_mse_errors() {
        let g = gray_ramp(4, 4);
        assert!(overlap_mse(&g, &g, Channel::Blue, Offset::new(4, 0)).is_err());
        assert!(overlap_mse(&g, &gray_ramp(4, 5), Channel::Blue, Offset::ZERO).is_err());
    }

    #[test]
    fn test_overlap_mse_value() {
        let g = PixelGrid::from_gray(1, 3, &[10, 20, 30]).unwrap();
        let p = PixelGrid::from_gray(1, 3, &[13, 20, 26]).unwrap();
        // (9 + 0 + 16) / 3
        let mse = overlap_mse(&g, &p, Channel::Red, Offset::ZERO).unwrap();
        assert!((mse - 25.0 / 3.0).abs() < 1e-12);
        // green(0, j) vs p(0, j - 1): (20 - 13)^2 + (30 - 20)^2
        let mse = overlap_mse(&g, &p, Channel::Red, Offset::new(0, 1)).unwrap();
        assert!((mse - 149.0 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_find_offset_tie_keeps_first() {
        let flat = PixelGrid::new_filled(5, 5, Rgb::gray(9)).unwrap();
        let best = find_offset(&flat, &flat, Channel::Red, (1, 2)).unwrap();
        assert_eq!(best.offset, Offset::new(-1, -2));
        assert_eq!(best.mse, 0.0);
    }

    #[test]
    fn test_composite_zero_offsets() {
        let planes = Planes {
            blue: PixelGrid::new_filled(2, 3, Rgb::new(1, 2, 3)).unwrap(),
            green: PixelGrid::new_filled(2, 3, Rgb::new(4, 5, 6)).unwrap(),
            red: PixelGrid::new_filled(2, 3, Rgb::new(7, 8, 9)).unwrap(),
        };
        let out = composite(&planes, Offset::ZERO, Offset::ZERO).unwrap();
        assert_eq!(out.dims(), (2, 3));
        assert_eq!(out.at(1, 2), Rgb::new(7, 5, 3));
    }

    #[test]
    fn test_composite_size_and_anchor() {
        let g = gray_ramp(10, 12);
        let planes = Planes {
            blue: g.clone(),
            green: g.clone(),
            red: g.clone(),
        };
        let red = Offset::new(2, -1);
        let blue = Offset::new(-1, 3);
        let out = composite(&planes, red, blue).unwrap();
        // rows: 10 - (2 - (-1)), cols: 12 - (3 - (-1))
        assert_eq!(out.dims(), (7, 8));
        // anchor (2, 3): red reads (0 + 2 - 2, 0 + 3 + 1), blue reads (0 + 2 + 1, 0 + 3 - 3)
        assert_eq!(out.at(0, 0).r, g.at(0, 4).r);
        assert_eq!(out.at(0, 0).g, g.at(2, 3).g);
        assert_eq!(out.at(0, 0).b, g.at(3, 0).b);
    }

    #[test]
    fn test_align_rejects_small_plate() {
        let plate = PixelGrid::new(9, 3).unwrap();
        let opts = AlignOptions::new()
            .with_inset_fraction(0.4)
            .with_shift_fraction(0.4);
        let err = align(&plate, &opts).unwrap_err();
        assert!(matches!(err, AlignError::InvalidPlate(_)));
    }
}
