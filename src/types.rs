//! On-disk records of the IBMF container and their decoded forms

use bytes::Buf;
use font_types::Tag;

use crate::error::{IbmfErr, bail, bail_if, bail_with_msg_if};
use crate::parse::Parse;

pub const IBMF_MARKER: Tag = Tag::new(b"IBMF");
pub const IBMF_VERSION: u8 = 4;

/// Internal index of a glyph within one face.
pub type GlyphCode = u16;

/// Signed fixed point value in 1/64 units.
pub type Fix16 = i16;

/// Returned when a code point has no glyph in the font.
pub const NO_GLYPH_CODE: GlyphCode = 0x7FFF;
/// Returned by the Latin translation for code points it doesn't know.
pub const SPACE_CODE: GlyphCode = 0x7FFE;

/// `ligKernPgmIndex` value of glyphs without a ligature/kerning program
pub const NO_LIG_KERN_PGM: u8 = 255;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FontFormat {
    /// Accented latin glyphs composed at runtime from a base glyph and an accent
    Latin = 0,
    /// Unicode code points mapped through planes and bundles
    Utf32 = 1,
    /// Older layout with per-glyph code points and inline lig/kern lists
    Backup = 7,
}

impl FontFormat {
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Latin),
            1 => Some(Self::Utf32),
            7 => Some(Self::Backup),
            _ => None,
        }
    }
}

/// Fixed font header, followed on disk by one point size byte per face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    /// Always b"IBMF"
    pub marker: Tag,
    pub face_count: u8,
    /// Low five bits of the format byte
    pub version: u8,
    /// High three bits of the format byte
    pub format: FontFormat,
    /// Point size of every face, in face order
    pub point_sizes: Vec<u8>,
}

impl Preamble {
    /// Size of the fixed part of the preamble
    pub const SIZE: usize = 6;

    /// Parse the preamble and its point size list. Padding up to the face
    /// offset table is left for the caller.
    pub fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        let marker = Tag::from_u32(input.try_get_u32()?);
        bail_if!(marker != IBMF_MARKER, IbmfErr::BadMarker(marker));

        let face_count = input.try_get_u8()?;
        let bits = input.try_get_u8()?;
        let version = bits & 0x1F;
        bail_with_msg_if!(
            version != IBMF_VERSION,
            IbmfErr::UnsupportedVersion(version),
            "IBMF version {version} is not supported"
        );
        let format_bits = bits >> 5;
        let Some(format) = FontFormat::from_bits(format_bits) else {
            bail!(IbmfErr::UnknownFormat(format_bits));
        };

        bail_if!(input.remaining() < face_count as usize, IbmfErr::UnexpectedEof);
        let mut point_sizes = vec![0; face_count as usize];
        input.copy_to_slice(&mut point_sizes);

        Ok(Self {
            marker,
            face_count,
            version,
            format,
            point_sizes,
        })
    }

    /// Offset of the face offset table: the preamble and point sizes rounded up to 4 bytes
    pub fn face_offsets_start(&self) -> usize {
        crate::Round4!(Self::SIZE + self.face_count as usize)
    }
}

/// One of the four 16-bit code point planes of a UTF32 font
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Plane {
    /// Index of the plane's first bundle in the shared bundle array
    pub code_point_bundles_idx: u16,
    /// Number of bundles that belong to the plane
    pub entries_count: u16,
    /// Glyph code of the plane's first mapped code point
    pub first_glyph_code: GlyphCode,
}

impl Parse for Plane {
    const SIZE: usize = 6;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        Ok(Self {
            code_point_bundles_idx: input.try_get_u16_le()?,
            entries_count: input.try_get_u16_le()?,
            first_glyph_code: input.try_get_u16_le()?,
        })
    }
}

/// Inclusive range of code points mapped to consecutive glyph codes
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CodePointBundle {
    pub first_code_point: u16,
    pub last_code_point: u16,
}

impl CodePointBundle {
    /// Number of glyph codes covered by the bundle
    pub fn span(&self) -> u32 {
        (self.last_code_point as u32 + 1).saturating_sub(self.first_code_point as u32)
    }
}

impl Parse for CodePointBundle {
    const SIZE: usize = 4;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        Ok(Self {
            first_code_point: input.try_get_u16_le()?,
            last_code_point: input.try_get_u16_le()?,
        })
    }
}

/// Metrics shared by every glyph of a face
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FaceHeader {
    pub point_size: u8,
    pub line_height: u8,
    pub dpi: u16,
    pub x_height: Fix16,
    pub em_size: Fix16,
    pub slant_correction: Fix16,
    pub descender_height: u8,
    pub space_size: u8,
    pub glyph_count: u16,
    pub lig_kern_step_count: u16,
    /// Size in bytes of the compressed pixel pool
    pub pixels_pool_size: u32,
}

impl Parse for FaceHeader {
    const SIZE: usize = 20;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        Ok(Self {
            point_size: input.try_get_u8()?,
            line_height: input.try_get_u8()?,
            dpi: input.try_get_u16_le()?,
            x_height: input.try_get_i16_le()?,
            em_size: input.try_get_i16_le()?,
            slant_correction: input.try_get_i16_le()?,
            descender_height: input.try_get_u8()?,
            space_size: input.try_get_u8()?,
            glyph_count: input.try_get_u16_le()?,
            lig_kern_step_count: input.try_get_u16_le()?,
            pixels_pool_size: input.try_get_u32_le()?,
        })
    }
}

/// Parameters of the run-length codec for one glyph
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RleMetrics {
    /// Dynamic range factor. 14 means the bitmap is stored uncompressed.
    pub dyn_f: u8,
    pub first_is_black: bool,
}

impl RleMetrics {
    pub fn from_bits(bits: u8) -> Self {
        Self {
            dyn_f: bits & 0x0F,
            first_is_black: bits & 0x10 != 0,
        }
    }

    pub fn to_bits(self) -> u8 {
        self.dyn_f | if self.first_is_black { 0x10 } else { 0 }
    }
}

/// Per-glyph metrics (LATIN and UTF32 formats)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlyphInfo {
    pub bitmap_width: u8,
    pub bitmap_height: u8,
    pub horizontal_offset: i8,
    pub vertical_offset: i8,
    /// Length of the compressed bitmap in the pixel pool
    pub packet_length: u16,
    pub advance: Fix16,
    pub rle_metrics: RleMetrics,
    /// Start of the glyph's program in the face's lig/kern steps, or [`NO_LIG_KERN_PGM`]
    pub lig_kern_pgm_index: u8,
    /// Glyph code used when this glyph is the right side of a kerning pair
    pub main_code: GlyphCode,
}

impl Parse for GlyphInfo {
    const SIZE: usize = 12;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        Ok(Self {
            bitmap_width: input.try_get_u8()?,
            bitmap_height: input.try_get_u8()?,
            horizontal_offset: input.try_get_i8()?,
            vertical_offset: input.try_get_i8()?,
            packet_length: input.try_get_u16_le()?,
            advance: input.try_get_i16_le()?,
            rle_metrics: RleMetrics::from_bits(input.try_get_u8()?),
            lig_kern_pgm_index: input.try_get_u8()?,
            main_code: input.try_get_u16_le()?,
        })
    }
}

/// Per-glyph metrics of the BACKUP format
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BackupGlyphInfo {
    pub bitmap_width: u8,
    pub bitmap_height: u8,
    pub horizontal_offset: i8,
    pub vertical_offset: i8,
    /// Number of inline ligature steps following the pixel pool
    pub lig_count: u8,
    /// Number of inline kerning steps following the ligature steps
    pub kern_count: u8,
    pub packet_length: u16,
    pub advance: Fix16,
    pub rle_metrics: RleMetrics,
    pub code_point: u32,
}

impl Parse for BackupGlyphInfo {
    const SIZE: usize = 16;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        let info = Self {
            bitmap_width: input.try_get_u8()?,
            bitmap_height: input.try_get_u8()?,
            horizontal_offset: input.try_get_i8()?,
            vertical_offset: input.try_get_i8()?,
            lig_count: input.try_get_u8()?,
            kern_count: input.try_get_u8()?,
            packet_length: input.try_get_u16_le()?,
            advance: input.try_get_i16_le()?,
            rle_metrics: RleMetrics::from_bits(input.try_get_u8()?),
            code_point: {
                let _filler = input.try_get_u8()?;
                input.try_get_u32_le()?
            },
        };
        Ok(info)
    }
}

/// One entry of a face's shared ligature/kerning program.
///
/// Two packed 16-bit words:
///
/// ```text
/// a: [stop:1][next glyph code:15]
/// b: [is kern:1][replacement glyph code:15]                 ligature
///    [is kern:1][is goto:1][kerning value (signed):14]      kern
///    [is kern:1][is goto:1][displacement:14]                goto
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LigKernStep {
    pub a: u16,
    pub b: u16,
}

impl LigKernStep {
    pub fn next_glyph_code(&self) -> GlyphCode {
        self.a & 0x7FFF
    }

    pub fn is_stop(&self) -> bool {
        self.a & 0x8000 != 0
    }

    pub fn is_kern(&self) -> bool {
        self.b & 0x8000 != 0
    }

    /// Only meaningful on kern steps: the goto bit shares the kern layout
    pub fn is_goto(&self) -> bool {
        self.is_kern() && self.b & 0x4000 != 0
    }

    /// Packed 14-bit kerning value, see [`sign_extend_kern`]
    pub fn kerning_value(&self) -> u16 {
        self.b & 0x3FFF
    }

    pub fn displacement(&self) -> u16 {
        self.b & 0x3FFF
    }

    pub fn replacement_glyph_code(&self) -> GlyphCode {
        self.b & 0x7FFF
    }
}

impl Parse for LigKernStep {
    const SIZE: usize = 4;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        Ok(Self {
            a: input.try_get_u16_le()?,
            b: input.try_get_u16_le()?,
        })
    }
}

/// Sign extend a packed 14-bit kerning value to a [`Fix16`].
pub fn sign_extend_kern(packed: u16) -> Fix16 {
    let mut value = packed & 0x3FFF;
    if value & 0x2000 != 0 {
        value |= 0xC000;
    }
    value as Fix16
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlyphLigStep {
    pub next_glyph_code: GlyphCode,
    pub replacement_glyph_code: GlyphCode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlyphKernStep {
    pub next_glyph_code: GlyphCode,
    /// Packed 14-bit value as stored in the program
    pub kern: u16,
}

/// Ligature and kerning alternatives of one glyph, resolved from the face's program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphLigKern {
    pub lig_steps: Vec<GlyphLigStep>,
    pub kern_steps: Vec<GlyphKernStep>,
}

impl GlyphLigKern {
    pub fn is_empty(&self) -> bool {
        self.lig_steps.is_empty() && self.kern_steps.is_empty()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BackupGlyphLigStep {
    pub next_code_point: u32,
    pub replacement_code_point: u32,
}

impl Parse for BackupGlyphLigStep {
    const SIZE: usize = 8;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        Ok(Self {
            next_code_point: input.try_get_u32_le()?,
            replacement_code_point: input.try_get_u32_le()?,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BackupGlyphKernStep {
    pub next_code_point: u32,
    pub kern: Fix16,
}

impl Parse for BackupGlyphKernStep {
    const SIZE: usize = 8;

    fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        let next_code_point = input.try_get_u32_le()?;
        let kern = input.try_get_i16_le()?;
        let _padding = input.try_get_u16_le()?;
        Ok(Self {
            next_code_point,
            kern,
        })
    }
}

/// Inline ligature and kerning lists of a BACKUP glyph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackupGlyphLigKern {
    pub lig_steps: Vec<BackupGlyphLigStep>,
    pub kern_steps: Vec<BackupGlyphKernStep>,
}
