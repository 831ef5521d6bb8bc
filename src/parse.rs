use bytes::Buf;

use crate::error::IbmfErr;

/// A fixed-size little-endian record of the IBMF container.
pub trait Parse: Sized {
    /// Size of the record on disk, in bytes
    const SIZE: usize;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr>;
}

/// Parse `count` consecutive records.
pub(crate) fn parse_array<T: Parse>(input: &mut impl Buf, count: usize) -> Result<Vec<T>, IbmfErr> {
    // Don't trust `count` for the allocation before we know the data is there
    if input.remaining() < count.saturating_mul(T::SIZE) {
        return Err(IbmfErr::UnexpectedEof);
    }
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(T::parse(input)?);
    }
    Ok(items)
}
