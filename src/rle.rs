//! Run-length glyph bitmap codec
//!
//! Glyph bitmaps are packed the way METAFONT's PK files pack them: a stream
//! of nybbles encoding alternating black and white run lengths, with optional
//! row repeat counts. A dynamic range factor of 14 means the bitmap is stored
//! as raw bits instead.

use crate::{
    bitmap::{BLACK_EIGHT_BITS, Bitmap, Dim, RleBitmap, WHITE_EIGHT_BITS},
    error::{IbmfErr, bail_if, bail_with_msg_if},
    types::RleMetrics,
};

/// `dyn_f` value of uncompressed bitmaps
pub const RAW_BITMAP_DYN_F: u8 = 14;

/// Decompress `rle` into a bitmap of dimension `dim`.
///
/// The whole declared length must be consumed, and nothing past it.
pub fn decode(rle: &RleBitmap<'_>, dim: Dim, metrics: RleMetrics) -> Result<Bitmap, IbmfErr> {
    bail_if!(rle.pixels.len() < rle.length, IbmfErr::RleOverrun);
    bail_if!(
        metrics.dyn_f > 13 && metrics.dyn_f != RAW_BITMAP_DYN_F,
        IbmfErr::Malformed
    );

    let mut bitmap = Bitmap::blank(dim);
    if dim.area() == 0 {
        bail_if!(
            rle.length != 0,
            IbmfErr::RleLengthMismatch {
                declared: rle.length,
                consumed: 0
            }
        );
        return Ok(bitmap);
    }

    let mut reader = NybbleReader::new(&rle.pixels[..rle.length]);
    if metrics.dyn_f == RAW_BITMAP_DYN_F {
        decode_raw(&mut reader, &mut bitmap)?;
    } else {
        decode_runs(&mut reader, &mut bitmap, metrics)?;
    }

    let consumed = reader.consumed_bytes();
    bail_with_msg_if!(
        consumed != rle.length,
        IbmfErr::RleLengthMismatch {
            declared: rle.length,
            consumed
        },
        "RLE stream declared {} bytes, decoding used {consumed}",
        (rle.length)
    );
    Ok(bitmap)
}

fn decode_raw(reader: &mut NybbleReader<'_>, bitmap: &mut Bitmap) -> Result<(), IbmfErr> {
    for pixel in bitmap.pixels.iter_mut() {
        if reader.bit()? {
            *pixel = BLACK_EIGHT_BITS;
        }
    }
    Ok(())
}

fn decode_runs(
    reader: &mut NybbleReader<'_>,
    bitmap: &mut Bitmap,
    metrics: RleMetrics,
) -> Result<(), IbmfErr> {
    let width = bitmap.dim.width as usize;
    let height = bitmap.dim.height as usize;

    let mut black = metrics.first_is_black;
    let mut repeat_count: u32 = 0;
    // Next row to be filled, and how many of its pixels are still blank
    let mut row = 0;
    let mut h_bit = width;

    while row < height {
        let mut count = reader.run_length(metrics.dyn_f, &mut repeat_count)? as usize;
        while count > 0 && row < height {
            let filled = count.min(h_bit);
            if black {
                let start = row * width + (width - h_bit);
                bitmap.pixels[start..start + filled].fill(BLACK_EIGHT_BITS);
            }
            count -= filled;
            h_bit -= filled;

            if h_bit == 0 {
                // Row complete: duplicate it as many times as requested
                row += 1;
                while repeat_count > 0 && row < height {
                    bitmap.pixels.copy_within((row - 1) * width..row * width, row * width);
                    row += 1;
                    repeat_count -= 1;
                }
                repeat_count = 0;
                h_bit = width;
            }
        }
        bail_if!(count > 0, IbmfErr::Malformed);
        black = !black;
    }
    Ok(())
}

struct NybbleReader<'a> {
    data: &'a [u8],
    /// Position in nybbles (or in bits for raw bitmaps)
    pos: usize,
    bits: bool,
}

impl<'a> NybbleReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bits: false,
        }
    }

    fn consumed_bytes(&self) -> usize {
        if self.bits {
            self.pos.div_ceil(8)
        } else {
            self.pos.div_ceil(2)
        }
    }

    fn bit(&mut self) -> Result<bool, IbmfErr> {
        self.bits = true;
        let byte = *self.data.get(self.pos / 8).ok_or(IbmfErr::RleOverrun)?;
        let bit = byte & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Ok(bit)
    }

    fn nybble(&mut self) -> Result<u32, IbmfErr> {
        let byte = *self.data.get(self.pos / 2).ok_or(IbmfErr::RleOverrun)?;
        let nybble = if self.pos % 2 == 0 { byte >> 4 } else { byte & 0x0F };
        self.pos += 1;
        Ok(nybble as u32)
    }

    /// Next run length, recording any repeat count that precedes it
    fn run_length(&mut self, dyn_f: u8, repeat_count: &mut u32) -> Result<u32, IbmfErr> {
        loop {
            match self.nybble()? {
                14 => *repeat_count = self.packed_number(dyn_f)?,
                15 => *repeat_count = 1,
                first => return self.finish_packed_number(first, dyn_f),
            }
        }
    }

    /// A packed number that may not itself be a repeat count
    fn packed_number(&mut self, dyn_f: u8) -> Result<u32, IbmfErr> {
        let first = self.nybble()?;
        bail_if!(first >= 14, IbmfErr::Malformed);
        self.finish_packed_number(first, dyn_f)
    }

    fn finish_packed_number(&mut self, first: u32, dyn_f: u8) -> Result<u32, IbmfErr> {
        let dyn_f = dyn_f as u32;
        if first == 0 {
            // Large number: count leading zero nybbles, then read as many more
            let mut zeros = 0;
            let mut value = loop {
                let nybble = self.nybble()?;
                zeros += 1;
                if nybble != 0 {
                    break nybble;
                }
            };
            bail_if!(zeros > 6, IbmfErr::Malformed);
            for _ in 0..zeros {
                value = value * 16 + self.nybble()?;
            }
            Ok((value + (13 - dyn_f) * 16 + dyn_f).saturating_sub(15))
        } else if first <= dyn_f {
            Ok(first)
        } else {
            Ok((first - dyn_f - 1) * 16 + self.nybble()? + dyn_f + 1)
        }
    }
}
