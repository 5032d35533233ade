//! Convolution kernels
//!
//! A [`Kernel`] is an odd-sided square of `f64` weights whose origin is the
//! center element, so a kernel of side `2r + 1` has radius `r`.

use crate::{FilterError, FilterResult};

/// Unsharp (sharpening) weights: an identity minus a Laplacian-style blur.
const UNSHARP: [f64; 9] = [
    -1.0 / 6.0,
    -2.0 / 3.0,
    -1.0 / 6.0,
    -2.0 / 3.0,
    13.0 / 3.0,
    -2.0 / 3.0,
    -1.0 / 6.0,
    -2.0 / 3.0,
    -1.0 / 6.0,
];

const SOBEL_X: [f64; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];

const SOBEL_Y: [f64; 9] = [1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0];

/// A square, odd-sided 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Side length (always odd)
    size: u32,
    /// Kernel data (row-major order)
    data: Vec<f64>,
}

impl Kernel {
    /// Create a zero kernel of side `size`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is 0 or even.
    pub fn new(size: u32) -> FilterResult<Self> {
        check_side(size)?;
        Ok(Kernel {
            size,
            data: vec![0.0; size as usize * size as usize],
        })
    }

    /// Create a kernel of side `size` from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is 0 or even, or if
    /// `data` does not hold exactly `size * size` weights.
    pub fn from_slice(size: u32, data: &[f64]) -> FilterResult<Self> {
        check_side(size)?;
        if data.len() != size as usize * size as usize {
            return Err(FilterError::InvalidKernel(format!(
                "{} weights do not form a {}x{} square",
                data.len(),
                size,
                size
            )));
        }
        Ok(Kernel {
            size,
            data: data.to_vec(),
        })
    }

    /// Create a kernel from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] unless the rows form an
    /// odd-sided square.
    ///
    /// # Examples
    ///
    /// ```
    /// use tricolor_filter::Kernel;
    ///
    /// let k = Kernel::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
    /// assert_eq!(k.radius(), 1);
    /// assert!(Kernel::from_rows(&[[1.0, 2.0]]).is_err());
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> FilterResult<Self> {
        let size = rows.len() as u32;
        check_side(size)?;
        let mut data = Vec::with_capacity(size as usize * size as usize);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size as usize {
                return Err(FilterError::InvalidKernel(format!(
                    "row {} has {} weights, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Kernel { size, data })
    }

    /// Horizontal-gradient Sobel kernel `[[-1,0,1],[-2,0,2],[-1,0,1]]`.
    pub fn sobel_x() -> Self {
        Kernel {
            size: 3,
            data: SOBEL_X.to_vec(),
        }
    }

    /// Vertical-gradient Sobel kernel `[[1,2,1],[0,0,0],[-1,-2,-1]]`.
    pub fn sobel_y() -> Self {
        Kernel {
            size: 3,
            data: SOBEL_Y.to_vec(),
        }
    }

    /// 3x3 sharpening kernel; its weights sum to 1.
    pub fn unsharp() -> Self {
        Kernel {
            size: 3,
            data: UNSHARP.to_vec(),
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Distance from the center to an edge: `(size - 1) / 2`.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.size / 2
    }

    /// Weights in row-major order.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Weight at `(row, col)`, or `None` if out of range.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        if row < self.size && col < self.size {
            Some(self.data[(row * self.size + col) as usize])
        } else {
            None
        }
    }

    /// Set the weight at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not below the kernel size.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: f64) {
        assert!(
            row < self.size && col < self.size,
            "kernel index ({}, {}) out of bounds for {}x{} kernel",
            row,
            col,
            self.size,
            self.size
        );
        self.data[(row * self.size + col) as usize] = value;
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

fn check_side(size: u32) -> FilterResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "side must be odd and positive, got {}",
            size
        )));
    }
    Ok(())
}
