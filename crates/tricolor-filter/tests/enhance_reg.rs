//! Enhancement regression test
//!
//! Gray-world white balance and histogram-stretch autocontrast.

use tricolor_core::{PixelGrid, Rgb};
use tricolor_filter::{FilterError, autocontrast, gray_world};
use tricolor_io::ImageFormat;
use tricolor_test::RegParams;
use tricolor_test::synthetic::SimpleRng;

/// Low-contrast texture in the middle of the intensity range
fn make_texture(seed: u32) -> Vec<u8> {
    let mut rng = SimpleRng::new(seed);
    (0..40 * 50)
        .map(|i| 90 + ((i / 50 + i % 50) % 40) as u8 + rng.below(8) as u8)
        .collect()
}

/// The texture with a warm color cast
fn make_cast_image(seed: u32) -> PixelGrid {
    let pixels = make_texture(seed)
        .into_iter()
        .map(|v| Rgb::new(v + 30, v, v - 40))
        .collect();
    PixelGrid::from_pixels(40, 50, pixels).unwrap()
}

#[test]
fn enhance_reg() {
    let mut rp = RegParams::new("enhance");
    let grid = make_cast_image(3);

    // --- Test 1: gray world equalizes channel means ---
    let balanced = gray_world(&grid);
    let means = balanced.channel_means();
    eprintln!("  gray world means: {:?}", means);
    rp.compare_values(means[1], means[0], 1.0);
    rp.compare_values(means[1], means[2], 1.0);
    rp.write_grid_and_check(&balanced, ImageFormat::Png)
        .expect("write balanced");

    // --- Test 2: autocontrast stretches a gray texture to the full range ---
    let gray = PixelGrid::from_gray(40, 50, &make_texture(3)).unwrap();
    let stretched = autocontrast(&gray, 0.0).expect("autocontrast");
    let darkest = stretched.data().iter().map(|px| px.g).min().unwrap_or(255);
    let brightest = stretched.data().iter().map(|px| px.g).max().unwrap_or(0);
    eprintln!("  autocontrast range: {}..={}", darkest, brightest);
    rp.compare_values(0.0, darkest as f64, 0.0);
    rp.compare_values(255.0, brightest as f64, 0.0);
    rp.write_grid_and_check(&stretched, ImageFormat::Png)
        .expect("write stretched");

    // --- Test 3: clipping tails saturates at least as many pixels ---
    let clipped = autocontrast(&gray, 0.05).expect("autocontrast 5%");
    let saturated = |g: &PixelGrid| g.data().iter().filter(|px| px.g == 255).count();
    let more = saturated(&clipped) >= saturated(&stretched);
    rp.compare_values(1.0, if more { 1.0 } else { 0.0 }, 0.0);

    // --- Test 3b: color cast image widens its green range ---
    let cast_stretched = autocontrast(&grid, 0.0).expect("autocontrast cast");
    let range = |g: &PixelGrid| {
        let lo = g.data().iter().map(|px| px.g).min().unwrap_or(0);
        let hi = g.data().iter().map(|px| px.g).max().unwrap_or(0);
        hi - lo
    };
    let wider = range(&cast_stretched) > range(&grid);
    rp.compare_values(1.0, if wider { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: rejected fractions ---
    for fraction in [0.5, 0.9, -0.01] {
        let err = autocontrast(&grid, fraction);
        rp.compare_values(
            1.0,
            if matches!(err, Err(FilterError::InvalidParameters(_))) { 1.0 } else { 0.0 },
            0.0,
        );
    }

    assert!(rp.cleanup(), "enhance regression test failed");
}
