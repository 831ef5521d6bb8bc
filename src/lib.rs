//! Pure Rust IBMF bitmap font loader and structural font differ
//!
//! ```no_run
//! let a = ibmf::Font::load(&std::fs::read("a.ibmf").unwrap()).unwrap();
//! let b = ibmf::Font::load(&std::fs::read("b.ibmf").unwrap()).unwrap();
//! print!("{}", ibmf::diff_fonts(&a, &b));
//! ```

pub mod bitmap;
pub mod buffer;
pub mod code_points;
pub mod diff;
mod error;
pub mod font;
pub mod latin;
pub mod lig_kern;
mod parse;
pub mod rle;
pub mod show;
pub mod types;

pub use diff::{DiffReport, Difference, diff_fonts};
pub use error::IbmfErr;
pub use font::{Face, FaceGlyphs, Font, GlyphData, GlyphRecord, LigKernRecord};
pub use lig_kern::LigKernOutcome;
pub use parse::Parse;
pub use types::{FontFormat, GlyphCode, NO_GLYPH_CODE, SPACE_CODE};

// Round a value up to the nearest multiple of 4. Don't round the value in the
// case that rounding up overflows.
//
// Implemented as a macro to make it generic over the type without horrible type bounds
macro_rules! Round4 {
    ($value:expr) => {
        match $value.checked_add(3) {
            Some(value_plus_3) => value_plus_3 & !3,
            None => $value,
        }
    };
}
use Round4;
