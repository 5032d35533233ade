//! PNM (Portable Any Map) format support
//!
//! Reads and writes PGM (P5 binary) and PPM (P6 binary) with 8-bit samples.
//! ASCII variants (P1/P2/P3), PBM and 16-bit maxvals are not supported.

use crate::{IoError, IoResult};
use std::io::{BufRead, Read, Write};
use tricolor_core::{PixelGrid, Rgb};

/// Header fields of a binary PNM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PnmHeader {
    /// 1 for P5, 3 for P6
    samples: usize,
    width: u32,
    height: u32,
    maxval: u32,
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token, so after the
/// maxval token the reader is positioned at the first raster byte.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("truncated PNM header".to_string()));
            }
            break;
        }
        let b = byte[0];
        if b == b'#' && token.is_empty() {
            let mut comment = Vec::new();
            reader.read_until(b'\n', &mut comment)?;
            continue;
        }
        if b.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        token.push(b);
    }
    String::from_utf8(token).map_err(|_| IoError::InvalidData("non-ASCII PNM header".to_string()))
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse::<u32>()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}

fn read_header<R: BufRead>(reader: &mut R) -> IoResult<PnmHeader> {
    let magic = read_token(reader)?;
    let samples = match magic.as_str() {
        "P5" => 1,
        "P6" => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {:?}",
                other
            )));
        }
    };
    let width = read_number(reader, "width")?;
    let height = read_number(reader, "height")?;
    let maxval = read_number(reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} (only 1..=255 supported)",
            maxval
        )));
    }
    Ok(PnmHeader {
        samples,
        width,
        height,
        maxval,
    })
}

/// Read a binary PNM image (P5/P6) from a reader.
///
/// Samples are rescaled to the full 0..=255 range when maxval is below 255.
/// PGM input becomes a gray grid (R = G = B).
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<PixelGrid> {
    let header = read_header(&mut reader)?;
    let raster_len = (header.width as usize)
        .checked_mul(header.samples)
        .and_then(|n| n.checked_mul(header.height as usize));
    let Some(raster_len) = raster_len else {
        return Err(IoError::InvalidData(format!(
            "PNM raster {}x{} is too large",
            header.width, header.height
        )));
    };
    let row_bytes = header.width as usize * header.samples;

    // Allocation is bounded by the bytes actually read
    let mut data = Vec::new();
    (&mut reader)
        .take(raster_len as u64)
        .read_to_end(&mut data)?;
    if data.len() < raster_len {
        return Err(IoError::InvalidData(format!(
            "truncated PNM raster: {} of {} bytes",
            data.len(),
            raster_len
        )));
    }

    let maxval = header.maxval;
    let scale = |v: u8| -> u8 {
        if maxval == 255 {
            v
        } else {
            ((v.min(maxval as u8) as u32 * 255 + maxval / 2) / maxval) as u8
        }
    };

    let grid = PixelGrid::from_fn(header.height, header.width, |row, col| {
        let idx = row as usize * row_bytes + col as usize * header.samples;
        if header.samples == 1 {
            Rgb::gray(scale(data[idx]))
        } else {
            Rgb::new(scale(data[idx]), scale(data[idx + 1]), scale(data[idx + 2]))
        }
    })?;
    Ok(grid)
}

/// Write a grid as binary PNM.
///
/// Chooses P5 when every pixel is gray (R = G = B), P6 otherwise.
pub fn write_pnm<W: Write>(grid: &PixelGrid, mut writer: W) -> IoResult<()> {
    let (rows, cols) = grid.dims();
    let gray = grid.data().iter().all(|px| px.r == px.g && px.g == px.b);

    let magic = if gray { "P5" } else { "P6" };
    write!(writer, "{}\n{} {}\n255\n", magic, cols, rows)?;

    let data: Vec<u8> = if gray {
        grid.data().iter().map(|px| px.r).collect()
    } else {
        grid.data().iter().flat_map(|px| px.to_array()).collect()
    };
    writer.write_all(&data)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pnm_roundtrip_color() {
        let grid = PixelGrid::from_fn(3, 4, |r, c| Rgb::new(r as u8, c as u8, 200)).unwrap();
        let mut buffer = Vec::new();
        write_pnm(&grid, &mut buffer).unwrap();
        assert!(buffer.starts_with(b"P6\n4 3\n255\n"));
        assert_eq!(read_pnm(Cursor::new(buffer)).unwrap(), grid);
    }

    #[test]
    fn test_pnm_gray_writes_p5() {
        let grid = PixelGrid::from_gray(1, 3, &[0, 128, 255]).unwrap();
        let mut buffer = Vec::new();
        write_pnm(&grid, &mut buffer).unwrap();
        assert_eq!(buffer, b"P5\n3 1\n255\n\x00\x80\xff");
        assert_eq!(read_pnm(Cursor::new(buffer)).unwrap(), grid);
    }

    #[test]
    fn test_pnm_header_comments_and_maxval() {
        let mut data = b"P5 # gray\n# size\n2 1\n15\n".to_vec();
        data.extend_from_slice(&[0, 15]);
        let grid = read_pnm(Cursor::new(data)).unwrap();
        assert_eq!(grid.at(0, 0), Rgb::gray(0));
        assert_eq!(grid.at(0, 1), Rgb::gray(255));
    }

    #[test]
    fn test_pnm_rejects() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P2\n1 1\n255\n0".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n2 2\n65535\n".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n2 2\n255\n\x01\x02".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n0 2\n255\n".to_vec())),
            Err(IoError::Core(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n4294967295 4294967295\n255\n\x00".to_vec())),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n100000 100000\n255\n\x00\x01".to_vec())),
            Err(IoError::InvalidData(_))
        ));
    }
}
