//! tricolor-io - Image codec for plates and results
//!
//! Supported formats:
//!
//! - PNG (read: any color type and depth, normalized to 8-bit RGB; write: 8-bit RGB)
//! - PNM (binary P5 / P6, maxval up to 255)
//!
//! # Examples
//!
//! ```no_run
//! use tricolor_io::{ImageFormat, read_image, write_image};
//!
//! let plate = read_image("plate.png").unwrap();
//! write_image(&plate, "plate.pnm", ImageFormat::Pnm).unwrap();
//! ```

mod error;
mod format;
mod png;
mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use png::{read_png, write_png};
pub use pnm::{read_pnm, write_pnm};

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use tricolor_core::PixelGrid;

/// Read an image from a file, detecting the format from its contents.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelGrid> {
    let data = std::fs::read(path)?;
    read_image_mem(&data)
}

/// Decode an image held in memory, detecting the format from its contents.
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelGrid> {
    match detect_format_from_bytes(data)? {
        ImageFormat::Png => read_png(Cursor::new(data)),
        ImageFormat::Pnm => read_pnm(Cursor::new(data)),
    }
}

/// Write an image to a file in the given format.
pub fn write_image<P: AsRef<Path>>(grid: &PixelGrid, path: P, format: ImageFormat) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    match format {
        ImageFormat::Png => write_png(grid, &mut writer)?,
        ImageFormat::Pnm => write_pnm(grid, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

/// Encode an image into a byte buffer.
pub fn write_image_mem(grid: &PixelGrid, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        ImageFormat::Png => write_png(grid, &mut buffer)?,
        ImageFormat::Pnm => write_pnm(grid, &mut buffer)?,
    }
    Ok(buffer)
}
