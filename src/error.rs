use font_types::Tag;

/// Everything that can go wrong while decoding an IBMF buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IbmfErr {
    #[error("unexpected end of data")]
    UnexpectedEof,
    #[error("bad marker {0}, expected IBMF")]
    BadMarker(Tag),
    #[error("unsupported IBMF version {0}")]
    UnsupportedVersion(u8),
    #[error("unknown font format {0}")]
    UnknownFormat(u8),
    #[error("face {face} expected at offset {expected}, parsing reached {actual}")]
    FaceOffsetMismatch {
        face: usize,
        expected: usize,
        actual: usize,
    },
    #[error("pixel pool of face {face} expected at offset {expected}, parsing reached {actual}")]
    PixelPoolMismatch {
        face: usize,
        expected: usize,
        actual: usize,
    },
    #[error("glyph {glyph_code} of face {face} lies outside the pixel pool")]
    GlyphOutOfPool { face: usize, glyph_code: u16 },
    #[error("RLE data ran out before the bitmap was complete")]
    RleOverrun,
    #[error("RLE data declared {declared} bytes but {consumed} were consumed")]
    RleLengthMismatch { declared: usize, consumed: usize },
    #[error("malformed font data")]
    Malformed,
}

impl From<bytes::TryGetError> for IbmfErr {
    fn from(_value: bytes::TryGetError) -> Self {
        Self::UnexpectedEof
    }
}

pub(crate) fn usize_will_overflow(a: usize, b: usize) -> bool {
    a.checked_add(b).is_none()
}

#[cfg(not(feature = "debug"))]
mod regular {
    macro_rules! bail {
        ($err: expr) => {
            return Err($err)
        };
    }
    pub(crate) use bail;

    macro_rules! bail_if {
        ($cond: expr, $err: expr) => {
            if $cond {
                return Err($err);
            }
        };
    }
    pub(crate) use bail_if;

    macro_rules! bail_with_msg_if {
        ($cond: expr, $err: expr, $($msg:tt),*) => {
            if $cond {
                log::debug!($($msg),*);
                return Err($err);
            }
        };
    }
    pub(crate) use bail_with_msg_if;
}
#[cfg(not(feature = "debug"))]
pub(crate) use regular::*;

#[cfg(feature = "debug")]
mod debug {
    macro_rules! bail {
        ($err: expr) => {
            panic!("{}", $err)
        };
    }
    pub(crate) use bail;

    macro_rules! bail_if {
        ($cond: expr, $err: expr) => {
            if $cond {
                panic!("{}: {}", stringify!($cond), $err)
            }
        };
    }
    pub(crate) use bail_if;

    macro_rules! bail_with_msg_if {
        ($cond: expr, $err: expr, $($msg:tt),*) => {
            if $cond {
                panic!($($msg),*);
            }
        };
    }
    pub(crate) use bail_with_msg_if;
}
#[cfg(feature = "debug")]
pub(crate) use debug::*;
