//! Human readable dumps of font records
//!
//! Every line starts with the marker of the font it belongs to, `<` for the
//! first font of a comparison and `>` for the second. Fixed point values are
//! printed in pixels.

use std::fmt;

use crate::{
    bitmap::{BLACK_EIGHT_BITS, Bitmap},
    code_points::CodePointTable,
    font::{GlyphRecord, LigKernRecord},
    types::{CodePointBundle, FaceHeader, Fix16, GlyphCode, sign_extend_kern},
};

/// Widest bitmap section printed by [`show_bitmap`]
pub const MAX_BITMAP_COLUMNS: usize = 50;

/// Which of the two compared fonts a line is about
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn marker(self) -> char {
        match self {
            Side::A => '<',
            Side::B => '>',
        }
    }
}

/// `U+` and at least five lowercase hex digits
pub struct CodePoint(pub u32);

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:05x}", self.0)
    }
}

fn pixels(value: Fix16) -> f32 {
    value as f32 / 64.0
}

pub fn show_face_header(out: &mut impl fmt::Write, side: Side, header: &FaceHeader) -> fmt::Result {
    writeln!(
        out,
        "{} DPI: {}, point siz: {}, linHght: {}, xHght: {}, emSiz: {}, spcSiz: {}, glyphCnt: {}, \
         LKCnt: {}, PixPoolSiz: {}, slantCorr: {}, descHght: {}",
        side.marker(),
        header.dpi,
        header.point_size,
        header.line_height,
        pixels(header.x_height),
        pixels(header.em_size),
        header.space_size,
        header.glyph_count,
        header.lig_kern_step_count,
        header.pixels_pool_size,
        pixels(header.slant_correction),
        header.descender_height
    )
}

/// One line of glyph metrics. `code_point` is printed as U+00000 when unknown.
pub fn show_glyph_info(
    out: &mut impl fmt::Write,
    side: Side,
    glyph_code: GlyphCode,
    code_point: Option<u32>,
    record: GlyphRecord<'_>,
) -> fmt::Result {
    let m = side.marker();
    let code_point = CodePoint(code_point.unwrap_or(0));
    match record {
        GlyphRecord::Current(g) => {
            write!(
                out,
                "{m} [{glyph_code}]: codePoint: {code_point}, w: {}, h: {}, hoff: {}, voff: {}, \
                 pktLen: {}, adv: {}, dynF: {}, 1stBlack: {}, lKPgmIdx: {}",
                g.bitmap_width,
                g.bitmap_height,
                g.horizontal_offset,
                g.vertical_offset,
                g.packet_length,
                pixels(g.advance),
                g.rle_metrics.dyn_f,
                g.rle_metrics.first_is_black as u8,
                g.lig_kern_pgm_index
            )?;
            if g.main_code != glyph_code {
                write!(out, ", mainCode: {}", g.main_code)?;
            }
            writeln!(out)
        }
        GlyphRecord::Backup(g) => writeln!(
            out,
            "{m} [{glyph_code}]: codePoint: {code_point}, w: {}, h: {}, hoff: {}, voff: {}, \
             pktLen: {}, adv: {}, dynF: {}, 1stBlack: {}, ligCnt: {}, kernCnt: {}",
            g.bitmap_width,
            g.bitmap_height,
            g.horizontal_offset,
            g.vertical_offset,
            g.packet_length,
            pixels(g.advance),
            g.rle_metrics.dyn_f,
            g.rle_metrics.first_is_black as u8,
            g.lig_count,
            g.kern_count
        ),
    }
}

/// Draw the bitmap in a box, `X` for black pixels. Wide bitmaps are cut at
/// [`MAX_BITMAP_COLUMNS`].
pub fn show_bitmap(out: &mut impl fmt::Write, side: Side, bitmap: &Bitmap) -> fmt::Result {
    let m = side.marker();
    let columns = (bitmap.dim.width as usize).min(MAX_BITMAP_COLUMNS);
    let border = "-".repeat(columns);

    writeln!(out, "{m} +{border}+")?;
    for row in 0..bitmap.dim.height as usize {
        let line: String = bitmap.row(row)[..columns]
            .iter()
            .map(|&pixel| if pixel == BLACK_EIGHT_BITS { 'X' } else { ' ' })
            .collect();
        writeln!(out, "{m} |{line}|")?;
    }
    writeln!(out, "{m} +{border}+")
}

/// List the ligature steps then the kerning steps, numbered continuously
pub fn show_lig_kerns(
    out: &mut impl fmt::Write,
    side: Side,
    record: LigKernRecord<'_>,
) -> fmt::Result {
    let m = side.marker();
    match record {
        LigKernRecord::Current(lk) => {
            let mut i = 0;
            for lig in &lk.lig_steps {
                writeln!(
                    out,
                    "{m} [{i}]: NxtGlyphCode: {}, LigCode: {}",
                    lig.next_glyph_code, lig.replacement_glyph_code
                )?;
                i += 1;
            }
            for kern in &lk.kern_steps {
                writeln!(
                    out,
                    "{m} [{i}]: NxtGlyphCode: {}, Kern: {}",
                    kern.next_glyph_code,
                    pixels(sign_extend_kern(kern.kern))
                )?;
                i += 1;
            }
        }
        LigKernRecord::Backup(lk) => {
            let mut i = 0;
            for lig in &lk.lig_steps {
                writeln!(
                    out,
                    "{m} [{i}]: NxtCodePoint: {}, LigCodePoint: {}",
                    CodePoint(lig.next_code_point),
                    CodePoint(lig.replacement_code_point)
                )?;
                i += 1;
            }
            for kern in &lk.kern_steps {
                writeln!(
                    out,
                    "{m} [{i}]: NxtCodePoint: {}, Kern: {}",
                    CodePoint(kern.next_code_point),
                    pixels(kern.kern)
                )?;
                i += 1;
            }
        }
    }
    Ok(())
}

/// `bundles` are numbered from `first_idx`, their position in the font's bundle array
pub fn show_code_point_bundles(
    out: &mut impl fmt::Write,
    side: Side,
    first_idx: usize,
    bundles: &[CodePointBundle],
) -> fmt::Result {
    for (idx, bundle) in (first_idx..).zip(bundles) {
        writeln!(
            out,
            "{}     [{idx}] First CodePoint: {}, Last CodePoint: {}",
            side.marker(),
            bundle.first_code_point,
            bundle.last_code_point
        )?;
    }
    Ok(())
}

pub fn show_planes(out: &mut impl fmt::Write, side: Side, table: &CodePointTable) -> fmt::Result {
    writeln!(out, "----------- Planes -----------")?;
    for (i, plane) in table.planes().iter().enumerate() {
        writeln!(
            out,
            "{} [{i}] CodePoint Bundle Index: {}, Entries Count: {}, First glyph code: {}",
            side.marker(),
            plane.code_point_bundles_idx,
            plane.entries_count,
            plane.first_glyph_code
        )?;
        if plane.entries_count > 0 {
            writeln!(out, "    CodePoint Bundles:")?;
            match table.plane_bundles(plane) {
                Some(bundles) => show_code_point_bundles(
                    out,
                    side,
                    plane.code_point_bundles_idx as usize,
                    bundles,
                )?,
                None => writeln!(out, "    (outside of the bundle array)")?,
            }
        }
    }
    Ok(())
}
