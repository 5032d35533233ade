//! tricolor-core - Basic data structures for plate processing
//!
//! This crate provides the fundamental types shared by the rest of the
//! workspace:
//!
//! - [`PixelGrid`] / [`PixelGridMut`] - The image container (shared view / exclusive owner)
//! - [`Rgb`] - An 8-bit-per-channel pixel
//! - [`Channel`] - Channel selector used by per-channel statistics and filters
//! - [`LuminanceHistogram`] - 256-bin brightness histogram

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::{LuminanceHistogram, PixelGrid, PixelGridMut};

/// Pixel and channel definitions.
///
/// Pixels are fixed at three 8-bit channels; every arithmetic result that
/// lands back in a pixel is clamped to `[0, 255]` first.
pub mod color {
    /// Color channel selector.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Channel {
        /// Red channel
        Red,
        /// Green channel
        Green,
        /// Blue channel
        Blue,
    }

    impl Channel {
        /// All channels in storage order.
        pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

        /// Storage index of this channel (red = 0).
        #[inline]
        pub fn index(self) -> usize {
            match self {
                Channel::Red => 0,
                Channel::Green => 1,
                Channel::Blue => 2,
            }
        }
    }

    /// An RGB pixel with one byte per channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Rgb {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Rgb {
        /// Black (0, 0, 0)
        pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
        /// White (255, 255, 255)
        pub const WHITE: Rgb = Rgb {
            r: 255,
            g: 255,
            b: 255,
        };

        /// Compose a pixel from its three channels.
        #[inline]
        pub const fn new(r: u8, g: u8, b: u8) -> Self {
            Rgb { r, g, b }
        }

        /// A gray pixel with all channels equal to `v`.
        #[inline]
        pub const fn gray(v: u8) -> Self {
            Rgb { r: v, g: v, b: v }
        }

        /// Read one channel.
        #[inline]
        pub fn channel(self, ch: Channel) -> u8 {
            match ch {
                Channel::Red => self.r,
                Channel::Green => self.g,
                Channel::Blue => self.b,
            }
        }

        /// Overwrite one channel.
        #[inline]
        pub fn set_channel(&mut self, ch: Channel, v: u8) {
            match ch {
                Channel::Red => self.r = v,
                Channel::Green => self.g = v,
                Channel::Blue => self.b = v,
            }
        }

        /// Channels as an array in storage order.
        #[inline]
        pub fn to_array(self) -> [u8; 3] {
            [self.r, self.g, self.b]
        }

        /// Build from an array in storage order.
        #[inline]
        pub fn from_array(v: [u8; 3]) -> Self {
            Rgb {
                r: v[0],
                g: v[1],
                b: v[2],
            }
        }

        /// Luminance used by histogram stretching.
        ///
        /// `0.2125 R + 0.7154 G + 0.0721 B`, rounded to the nearest level.
        #[inline]
        pub fn luminance(self) -> u8 {
            let y = 0.2125 * self.r as f64 + 0.7154 * self.g as f64 + 0.0721 * self.b as f64;
            clamp_to_u8(y)
        }
    }

    impl From<(u8, u8, u8)> for Rgb {
        fn from((r, g, b): (u8, u8, u8)) -> Self {
            Rgb { r, g, b }
        }
    }

    impl From<Rgb> for (u8, u8, u8) {
        fn from(px: Rgb) -> Self {
            (px.r, px.g, px.b)
        }
    }

    /// Round to the nearest integer and clamp into the channel range.
    ///
    /// NaN maps to 0.
    #[inline]
    pub fn clamp_to_u8(v: f64) -> u8 {
        if v.is_nan() {
            return 0;
        }
        v.round().clamp(0.0, 255.0) as u8
    }

}

pub use color::{Channel, Rgb};
