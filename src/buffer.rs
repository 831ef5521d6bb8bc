//! Forward-only cursor over an immutable font buffer

use crate::error::{IbmfErr, bail_if, usize_will_overflow};

// -----------------------------------------------------------------------------
// Buffer helper class
//
// Trivial buffer operations with out-of-bounds checking. Every operation either
// fails without moving the cursor or advances it by exactly the bytes consumed.
// The absolute offset is kept so the loader can check it against the offsets
// recorded in the font.
// -----------------------------------------------------------------------------
pub struct Buffer<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl bytes::Buf for Buffer<'_> {
    fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    fn chunk(&self) -> &[u8] {
        self.remaining_as_slice()
    }

    fn advance(&mut self, cnt: usize) {
        if self.skip(cnt).is_err() {
            panic!("Tried to advance past the end of the buffer");
        }
    }
}

impl<'a> Buffer<'a> {
    pub fn new(data: &'a [u8]) -> Buffer<'a> {
        Buffer {
            buffer: data,
            offset: 0,
        }
    }

    pub fn skip(&mut self, n_bytes: usize) -> Result<(), IbmfErr> {
        bail_if!(
            usize_will_overflow(self.offset, n_bytes) || self.offset + n_bytes > self.buffer.len(),
            IbmfErr::UnexpectedEof
        );
        self.offset += n_bytes;
        Ok(())
    }

    /// Move forward to an absolute offset. Moving backwards is a format error.
    pub fn skip_to(&mut self, offset: usize) -> Result<(), IbmfErr> {
        bail_if!(offset < self.offset, IbmfErr::Malformed);
        self.skip(offset - self.offset)
    }

    /// Borrow the next `n_bytes` from the underlying data and step over them.
    pub fn take_slice(&mut self, n_bytes: usize) -> Result<&'a [u8], IbmfErr> {
        let start = self.offset;
        self.skip(n_bytes)?;
        Ok(&self.buffer[start..start + n_bytes])
    }

    pub fn remaining_as_slice(&self) -> &[u8] {
        &self.buffer[self.offset..]
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}
