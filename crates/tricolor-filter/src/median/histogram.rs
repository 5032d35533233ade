//! Per-channel 256-bin histograms for sliding-window medians

use tricolor_core::Rgb;

/// One 256-bin histogram per color channel.
#[derive(Clone)]
pub(crate) struct ChannelHistogram {
    bins: [[u32; 256]; 3],
}

impl ChannelHistogram {
    pub(crate) fn new() -> Self {
        ChannelHistogram {
            bins: [[0; 256]; 3],
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, px: Rgb) {
        self.bins[0][px.r as usize] += 1;
        self.bins[1][px.g as usize] += 1;
        self.bins[2][px.b as usize] += 1;
    }

    #[inline]
    pub(crate) fn remove(&mut self, px: Rgb) {
        self.bins[0][px.r as usize] -= 1;
        self.bins[1][px.g as usize] -= 1;
        self.bins[2][px.b as usize] -= 1;
    }

    /// Add every count of `other`.
    pub(crate) fn merge(&mut self, other: &ChannelHistogram) {
        for (mine, theirs) in self.bins.iter_mut().zip(&other.bins) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a += *b;
            }
        }
    }

    /// Subtract every count of `other`, which must be contained in `self`.
    pub(crate) fn unmerge(&mut self, other: &ChannelHistogram) {
        for (mine, theirs) in self.bins.iter_mut().zip(&other.bins) {
            for (a, b) in mine.iter_mut().zip(theirs) {
                *a -= *b;
            }
        }
    }

    /// Number of samples in each channel.
    pub(crate) fn totals(&self) -> [u32; 3] {
        self.bins.map(|ch| ch.iter().sum())
    }

    /// Value at sorted position `rank` in each channel.
    ///
    /// Scans the cumulative count until it exceeds `rank`.
    pub(crate) fn rank_value(&self, rank: u32) -> Rgb {
        let pick = |ch: &[u32; 256]| -> u8 {
            let mut seen = 0u32;
            for (v, &n) in ch.iter().enumerate() {
                seen += n;
                if seen > rank {
                    return v as u8;
                }
            }
            255
        };
        Rgb::new(pick(&self.bins[0]), pick(&self.bins[1]), pick(&self.bins[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_value() {
        let mut h = ChannelHistogram::new();
        for v in [5u8, 1, 9, 3, 7] {
            h.add(Rgb::new(v, 255 - v, 0));
        }
        assert_eq!(h.totals(), [5, 5, 5]);
        assert_eq!(h.rank_value(2), Rgb::new(5, 250, 0));
        assert_eq!(h.rank_value(0), Rgb::new(1, 246, 0));

        h.remove(Rgb::new(1, 254, 0));
        assert_eq!(h.rank_value(0), Rgb::new(3, 246, 0));
    }

    #[test]
    fn test_merge_unmerge() {
        let mut a = ChannelHistogram::new();
        let mut b = ChannelHistogram::new();
        a.add(Rgb::gray(10));
        b.add(Rgb::gray(20));
        b.add(Rgb::gray(30));
        a.merge(&b);
        assert_eq!(a.totals(), [3, 3, 3]);
        assert_eq!(a.rank_value(1), Rgb::gray(20));
        a.unmerge(&b);
        assert_eq!(a.totals(), [1, 1, 1]);
        assert_eq!(a.rank_value(0), Rgb::gray(10));
    }
}
