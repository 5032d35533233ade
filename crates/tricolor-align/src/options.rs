//! Alignment options

use crate::{AlignError, AlignResult};

/// Filter applied to the composited image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Postprocess {
    /// Return the composite as is
    #[default]
    None,
    /// Gray-world white balance
    GrayWorld,
    /// 3x3 unsharp sharpening
    Unsharp,
    /// Luminance histogram stretch
    Autocontrast,
}

impl Postprocess {
    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Postprocess::None => "none",
            Postprocess::GrayWorld => "gray-world",
            Postprocess::Unsharp => "unsharp",
            Postprocess::Autocontrast => "autocontrast",
        }
    }
}

/// Options for [`align`](fn@crate::align)
#[derive(Debug, Clone, PartialEq)]
pub struct AlignOptions {
    /// Filter applied after compositing (default: none)
    pub postprocess: Postprocess,

    /// Fraction of pixels clipped from each histogram tail by
    /// autocontrast, in `[0, 0.5)` (default: 0.0)
    pub fraction: f64,

    /// Mirror-pad before the unsharp step so the border is sharpened too
    /// (default: true)
    pub mirror: bool,

    /// Maximum shift searched, as a fraction of plane height and width
    /// (default: 0.05)
    pub shift_fraction: f64,

    /// Margin excluded from scoring on every side, as a fraction of plane
    /// height and width (default: 0.10)
    pub inset_fraction: f64,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            postprocess: Postprocess::None,
            fraction: 0.0,
            mirror: true,
            shift_fraction: 0.05,
            inset_fraction: 0.10,
        }
    }
}

impl AlignOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the postprocessing filter
    pub fn with_postprocess(mut self, postprocess: Postprocess) -> Self {
        self.postprocess = postprocess;
        self
    }

    /// Set the autocontrast tail fraction
    pub fn with_fraction(mut self, fraction: f64) -> Self {
        self.fraction = fraction;
        self
    }

    /// Enable or disable mirror padding around unsharp
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Set the search range fraction
    pub fn with_shift_fraction(mut self, fraction: f64) -> Self {
        self.shift_fraction = fraction;
        self
    }

    /// Set the scoring inset fraction
    pub fn with_inset_fraction(mut self, fraction: f64) -> Self {
        self.inset_fraction = fraction;
        self
    }

    /// Validate options
    pub fn validate(&self) -> AlignResult<()> {
        if !(0.0..0.5).contains(&self.fraction) {
            return Err(AlignError::InvalidParameter(
                "fraction must be in [0, 0.5)".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.shift_fraction) {
            return Err(AlignError::InvalidParameter(
                "shift_fraction must be in [0, 0.5)".to_string(),
            ));
        }
        if !(0.0..0.5).contains(&self.inset_fraction) {
            return Err(AlignError::InvalidParameter(
                "inset_fraction must be in [0, 0.5)".to_string(),
            ));
        }
        Ok(())
    }
}
