//! Per-channel statistics

use super::PixelGrid;

impl PixelGrid {
    /// Mean value of each channel, indexed by [`Channel::index`](crate::Channel::index).
    pub fn channel_means(&self) -> [f64; 3] {
        let mut sums = [0u64; 3];
        for px in self.data() {
            sums[0] += px.r as u64;
            sums[1] += px.g as u64;
            sums[2] += px.b as u64;
        }
        let n = self.data().len() as f64;
        sums.map(|s| s as f64 / n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_channel_means() {
        let grid = PixelGrid::from_pixels(
            1,
            2,
            vec![Rgb::new(10, 0, 255), Rgb::new(20, 100, 255)],
        )
        .unwrap();
        assert_eq!(grid.channel_means(), [15.0, 50.0, 255.0]);
    }
}
