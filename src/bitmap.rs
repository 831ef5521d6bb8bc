//! Decompressed glyph bitmaps

/// Intensity of a black pixel
pub const BLACK_EIGHT_BITS: u8 = 0xFF;
/// Intensity of a white pixel
pub const WHITE_EIGHT_BITS: u8 = 0x00;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Dim {
    pub width: u8,
    pub height: u8,
}

impl Dim {
    pub fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// One byte per pixel, row-major
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    pub dim: Dim,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// An all-white bitmap
    pub fn blank(dim: Dim) -> Self {
        Self {
            dim,
            pixels: vec![WHITE_EIGHT_BITS; dim.area()],
        }
    }

    pub fn row(&self, row: usize) -> &[u8] {
        let width = self.dim.width as usize;
        &self.pixels[row * width..(row + 1) * width]
    }

    /// Pack the bitmap to one bit per pixel, MSB first, each row padded to a byte.
    ///
    /// Any non-white pixel becomes a set bit.
    pub fn to_one_bit(&self) -> Bitmap {
        let row_bytes = (self.dim.width as usize).div_ceil(8);
        let mut pixels = Vec::with_capacity(row_bytes * self.dim.height as usize);
        for row in self.pixels.chunks_exact(self.dim.width.max(1) as usize) {
            for byte in row.chunks(8) {
                let mut data = 0u8;
                let mut mask = 0x80u8;
                for &pixel in byte {
                    if pixel != WHITE_EIGHT_BITS {
                        data |= mask;
                    }
                    mask >>= 1;
                }
                pixels.push(data);
            }
        }
        Bitmap {
            dim: self.dim,
            pixels,
        }
    }
}

/// The compressed slice of a face's pixel pool belonging to one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleBitmap<'a> {
    pub dim: Dim,
    pub pixels: &'a [u8],
    /// Declared length of the compressed data
    pub length: usize,
}
