//! Deterministic synthetic inputs
//!
//! Tests build their inputs from a seeded generator instead of shipping
//! binary fixtures, so every regression run sees the same pixels.

use crate::error::TestResult;
use tricolor_core::{PixelGrid, PixelGridMut, Rgb};

/// Simple linear congruential generator for reproducible randomness
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed as u64 }
    }

    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Knuth's MMIX
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// A byte from the high bits (the low bits of an LCG cycle quickly).
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u64() >> 56) as u8
    }

    /// Uniform value in `0..bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        ((self.next_u64() >> 32) % bound as u64) as u32
    }
}

/// Grid with independent random values in every channel.
pub fn random_grid(rows: u32, cols: u32, seed: u32) -> TestResult<PixelGrid> {
    let mut rng = SimpleRng::new(seed);
    Ok(PixelGrid::from_fn(rows, cols, |_, _| {
        Rgb::new(rng.next_u8(), rng.next_u8(), rng.next_u8())
    })?)
}

/// Gray grid of random intensities.
pub fn noise_plane(rows: u32, cols: u32, seed: u32) -> TestResult<PixelGrid> {
    let mut rng = SimpleRng::new(seed);
    Ok(PixelGrid::from_fn(rows, cols, |_, _| Rgb::gray(rng.next_u8()))?)
}

/// Build a stacked plate (blue, green, red from top to bottom) of planes
/// `h x w` cut from one shared gray noise texture.
///
/// The red plane satisfies `red(i, j) = green(i + dy, j + dx)` for
/// `red_offset = (dy, dx)`, and likewise for blue, so aligning the plate
/// must report exactly these offsets.
pub fn make_plate(
    h: u32,
    w: u32,
    red_offset: (i32, i32),
    blue_offset: (i32, i32),
    seed: u32,
) -> TestResult<PixelGrid> {
    let margin = [red_offset.0, red_offset.1, blue_offset.0, blue_offset.1]
        .iter()
        .map(|v| v.unsigned_abs())
        .max()
        .unwrap_or(0);
    let texture = noise_plane(h + 2 * margin, w + 2 * margin, seed)?;
    let m = margin as i32;

    let cut = |(dy, dx): (i32, i32)| -> TestResult<PixelGrid> {
        Ok(texture.submatrix((m + dy) as u32, (m + dx) as u32, h, w)?)
    };
    let blue = cut(blue_offset)?;
    let green = cut((0, 0))?;
    let red = cut(red_offset)?;

    Ok(stack_planes(&blue, &green, &red)?)
}

/// Stack three equally sized planes vertically: `top`, `middle`, `bottom`.
pub fn stack_planes(
    top: &PixelGrid,
    middle: &PixelGrid,
    bottom: &PixelGrid,
) -> tricolor_core::Result<PixelGrid> {
    let (h, w) = top.dims();
    for plane in [middle, bottom] {
        if plane.dims() != (h, w) {
            return Err(tricolor_core::Error::DimensionMismatch {
                expected: (h, w),
                actual: plane.dims(),
            });
        }
    }
    let mut plate = PixelGridMut::new(3 * h, w)?;
    for (k, plane) in [top, middle, bottom].into_iter().enumerate() {
        for r in 0..h {
            plate
                .row_mut(k as u32 * h + r)
                .copy_from_slice(plane.row(r));
        }
    }
    Ok(plate.into())
}
