//! PNG image format support
//!
//! Every PNG flavor is normalized to 8-bit samples on read (palettes and
//! low bit depths expanded, 16-bit samples stripped to their high byte,
//! alpha discarded). Grids are always written as 8-bit RGB.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use tricolor_core::{PixelGrid, Rgb};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelGrid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    if data.len() < bytes_per_row * height as usize || bytes_per_row < samples * width as usize {
        return Err(IoError::InvalidData("PNG frame shorter than header".to_string()));
    }

    let grid = PixelGrid::from_fn(height, width, |row, col| {
        let idx = row as usize * bytes_per_row + col as usize * samples;
        match samples {
            1 | 2 => Rgb::gray(data[idx]),
            _ => Rgb::new(data[idx], data[idx + 1], data[idx + 2]),
        }
    })?;
    Ok(grid)
}

/// Write a PNG image (8-bit RGB)
pub fn write_png<W: Write>(grid: &PixelGrid, writer: W) -> IoResult<()> {
    let (rows, cols) = grid.dims();

    let mut encoder = Encoder::new(writer, cols, rows);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = Vec::with_capacity(grid.data().len() * 3);
    for px in grid.data() {
        data.extend_from_slice(&px.to_array());
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_rgb() {
        let grid = PixelGrid::from_fn(5, 7, |r, c| {
            Rgb::new((r * 40) as u8, (c * 30) as u8, ((r + c) * 10) as u8)
        })
        .unwrap();

        let mut buffer = Vec::new();
        write_png(&grid, &mut buffer).unwrap();

        let grid2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(grid2.dims(), (5, 7));
        assert_eq!(grid2, grid);
    }

    #[test]
    fn test_png_read_grayscale() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 3, 2);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 50, 100, 150, 200, 250]).unwrap();
        }

        let grid = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(grid.dims(), (2, 3));
        assert_eq!(grid.at(0, 1), Rgb::gray(50));
        assert_eq!(grid.at(1, 2), Rgb::gray(250));
    }

    #[test]
    fn test_png_read_rgba_drops_alpha() {
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 1, 1);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 20, 30, 0]).unwrap();
        }

        let grid = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(grid.at(0, 0), Rgb::new(10, 20, 30));
    }

    #[test]
    fn test_png_read_garbage() {
        let result = read_png(Cursor::new(b"not a png".to_vec()));
        assert!(matches!(result, Err(IoError::DecodeError(_))));
    }
}
