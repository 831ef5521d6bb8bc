//! Structural comparison of two fonts
//!
//! Faces are paired by point size and glyphs by code point, so two fonts with
//! different glyph orders or code point tables still compare glyph for glyph.
//! Every pass runs to completion; nothing stops at the first difference.

use std::fmt;

use crate::{
    bitmap::Bitmap,
    font::{Face, Font, GlyphRecord, LigKernRecord},
    show::{CodePoint, Side, show_bitmap, show_face_header, show_glyph_info, show_lig_kerns},
    types::{FaceHeader, GlyphCode},
};

/// A glyph of one of the compared fonts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DiffGlyph<T> {
    pub glyph_code: GlyphCode,
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference<'a> {
    FaceCount {
        a: u8,
        b: u8,
    },
    /// A face of one font has no face of the same point size in the other
    FaceNotFound {
        missing_in: Side,
        point_size: u8,
    },
    FaceHeader {
        a: &'a FaceHeader,
        b: &'a FaceHeader,
    },
    GlyphMetrics {
        point_size: u8,
        code_point: u32,
        a: DiffGlyph<GlyphRecord<'a>>,
        b: DiffGlyph<GlyphRecord<'a>>,
    },
    GlyphPixels {
        point_size: u8,
        code_point: u32,
        a: &'a Bitmap,
        b: &'a Bitmap,
    },
    GlyphLigKern {
        point_size: u8,
        code_point: u32,
        a: LigKernRecord<'a>,
        b: LigKernRecord<'a>,
    },
    /// A glyph of one font has no counterpart in the same size face of the other.
    ///
    /// Glyphs without a known code point are reported with code point 0.
    CodePointNotFound {
        missing_in: Side,
        point_size: u8,
        code_point: u32,
    },
}

impl fmt::Display for Difference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        match self {
            Difference::FaceCount { a, b } => {
                writeln!(f, "FaceCount differ:")?;
                writeln!(f, "{} {a}", Side::A.marker())?;
                writeln!(f, "{} {b}", Side::B.marker())
            }
            Difference::FaceNotFound {
                missing_in,
                point_size,
            } => {
                writeln!(f, "----- Face not found:")?;
                writeln!(f, "{} Face with pointSize {point_size}", missing_in.marker())
            }
            Difference::FaceHeader { a, b } => {
                writeln!(f, "----- Face headers with pointSize {} differ:", a.point_size)?;
                show_face_header(f, Side::A, a)?;
                show_face_header(f, Side::B, b)
            }
            Difference::GlyphMetrics {
                point_size,
                code_point,
                a,
                b,
            } => {
                writeln!(
                    f,
                    "----- Glyph Metrics differ for codePoint {} of pointSize {point_size}",
                    CodePoint(*code_point)
                )?;
                show_glyph_info(f, Side::A, a.glyph_code, Some(*code_point), a.value)?;
                show_glyph_info(f, Side::B, b.glyph_code, Some(*code_point), b.value)
            }
            Difference::GlyphPixels {
                point_size,
                code_point,
                a,
                b,
            } => {
                writeln!(
                    f,
                    "----- Glyph Pixels differ for codePoint {} of pointSize {point_size}",
                    CodePoint(*code_point)
                )?;
                show_bitmap(f, Side::A, a)?;
                writeln!(f)?;
                show_bitmap(f, Side::B, b)
            }
            Difference::GlyphLigKern {
                point_size,
                code_point,
                a,
                b,
            } => {
                writeln!(
                    f,
                    "----- Glyph Ligature/Kerning differ for codePoint {} of pointSize {point_size}",
                    CodePoint(*code_point)
                )?;
                show_lig_kerns(f, Side::A, *a)?;
                writeln!(f)?;
                show_lig_kerns(f, Side::B, *b)
            }
            Difference::CodePointNotFound {
                missing_in,
                point_size,
                code_point,
            } => {
                writeln!(f, "----- Face with pointSize {point_size}")?;
                writeln!(
                    f,
                    "{} CodePoint not found: {}",
                    missing_in.marker(),
                    CodePoint(*code_point)
                )
            }
        }
    }
}

/// Every difference found between two fonts, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport<'a> {
    pub differences: Vec<Difference<'a>>,
}

impl DiffReport<'_> {
    pub fn count(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }
}

impl fmt::Display for DiffReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for difference in &self.differences {
            write!(f, "{difference}")?;
        }
        writeln!(f)?;
        writeln!(f, "-----")?;
        writeln!(
            f,
            "Completed. Number of differences found: {}.",
            self.count()
        )
    }
}

/// Compare font `a` against font `b`.
///
/// A code point missing on both sides of a pair of faces is reported twice,
/// once per direction.
pub fn diff_fonts<'a>(a: &'a Font, b: &'a Font) -> DiffReport<'a> {
    let mut report = DiffReport::default();

    check_preamble(a, b, &mut report.differences);
    log::debug!("After preamble check: {} differences", report.count());

    check_face_headers(a, b, &mut report.differences);
    log::debug!("After face header check: {} differences", report.count());

    check_glyphs(a, b, &mut report.differences);
    log::debug!("After glyph check: {} differences", report.count());

    report
}

fn check_preamble<'a>(a: &'a Font, b: &'a Font, differences: &mut Vec<Difference<'a>>) {
    let (count_a, count_b) = (a.preamble().face_count, b.preamble().face_count);
    if count_a != count_b {
        differences.push(Difference::FaceCount {
            a: count_a,
            b: count_b,
        });
    }
}

fn check_face_headers<'a>(a: &'a Font, b: &'a Font, differences: &mut Vec<Difference<'a>>) {
    for face_a in a.faces() {
        let point_size = face_a.header.point_size;
        match b.find_face(point_size) {
            None => differences.push(Difference::FaceNotFound {
                missing_in: Side::B,
                point_size,
            }),
            Some(face_b) if face_a.header != face_b.header => {
                differences.push(Difference::FaceHeader {
                    a: &face_a.header,
                    b: &face_b.header,
                })
            }
            Some(_) => {}
        }
    }

    for face_b in b.faces() {
        let point_size = face_b.header.point_size;
        if a.find_face(point_size).is_none() {
            differences.push(Difference::FaceNotFound {
                missing_in: Side::A,
                point_size,
            });
        }
    }
}

fn check_glyphs<'a>(a: &'a Font, b: &'a Font, differences: &mut Vec<Difference<'a>>) {
    for face_a in a.faces() {
        let point_size = face_a.header.point_size;
        let Some(face_b) = b.find_face(point_size) else {
            continue;
        };
        log::trace!(
            "Comparing {} glyphs against {} glyphs at {point_size}pt",
            face_a.glyph_count(),
            face_b.glyph_count()
        );

        for code_a in 0..face_a.glyph_count() as GlyphCode {
            let code_point = a.code_point_of(face_a, code_a);
            match code_point.and_then(|code_point| b.glyph_code_of(face_b, code_point)) {
                Some(code_b) => compare_glyph(
                    (face_a, code_a),
                    (face_b, code_b),
                    point_size,
                    code_point.unwrap_or_default(),
                    differences,
                ),
                None => differences.push(Difference::CodePointNotFound {
                    missing_in: Side::B,
                    point_size,
                    code_point: code_point.unwrap_or_default(),
                }),
            }
        }

        for code_b in 0..face_b.glyph_count() as GlyphCode {
            let code_point = b.code_point_of(face_b, code_b);
            let found = code_point.and_then(|code_point| a.glyph_code_of(face_a, code_point));
            if found.is_none() {
                differences.push(Difference::CodePointNotFound {
                    missing_in: Side::A,
                    point_size,
                    code_point: code_point.unwrap_or_default(),
                });
            }
        }
    }
}

/// Metrics, pixels and lig/kern programs are compared and reported independently
fn compare_glyph<'a>(
    (face_a, code_a): (&'a Face, GlyphCode),
    (face_b, code_b): (&'a Face, GlyphCode),
    point_size: u8,
    code_point: u32,
    differences: &mut Vec<Difference<'a>>,
) {
    if let (Some(record_a), Some(record_b)) =
        (face_a.glyph_record(code_a), face_b.glyph_record(code_b))
    {
        if record_a != record_b {
            differences.push(Difference::GlyphMetrics {
                point_size,
                code_point,
                a: DiffGlyph {
                    glyph_code: code_a,
                    value: record_a,
                },
                b: DiffGlyph {
                    glyph_code: code_b,
                    value: record_b,
                },
            });
        }
    }

    if let (Some(bitmap_a), Some(bitmap_b)) = (face_a.bitmap(code_a), face_b.bitmap(code_b)) {
        if bitmap_a != bitmap_b {
            differences.push(Difference::GlyphPixels {
                point_size,
                code_point,
                a: bitmap_a,
                b: bitmap_b,
            });
        }
    }

    if let (Some(lig_kern_a), Some(lig_kern_b)) =
        (face_a.lig_kern_record(code_a), face_b.lig_kern_record(code_b))
    {
        if lig_kern_a != lig_kern_b {
            differences.push(Difference::GlyphLigKern {
                point_size,
                code_point,
                a: lig_kern_a,
                b: lig_kern_b,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GlyphInfo, RleMetrics};

    #[test]
    fn test_block_rendering() {
        let difference = Difference::CodePointNotFound {
            missing_in: Side::B,
            point_size: 12,
            code_point: 0x41,
        };
        assert_eq!(
            difference.to_string(),
            "\n----- Face with pointSize 12\n> CodePoint not found: U+00041\n"
        );

        let difference = Difference::FaceNotFound {
            missing_in: Side::A,
            point_size: 14,
        };
        assert_eq!(
            difference.to_string(),
            "\n----- Face not found:\n< Face with pointSize 14\n"
        );

        let difference = Difference::FaceCount { a: 2, b: 3 };
        assert_eq!(difference.to_string(), "\nFaceCount differ:\n< 2\n> 3\n");
    }

    #[test]
    fn test_metrics_block_shows_both_sides() {
        let info = GlyphInfo {
            bitmap_width: 1,
            bitmap_height: 1,
            horizontal_offset: 0,
            vertical_offset: 0,
            packet_length: 1,
            advance: 64,
            rle_metrics: RleMetrics::default(),
            lig_kern_pgm_index: 255,
            main_code: 0,
        };
        let wider = GlyphInfo { advance: 128, ..info };
        let difference = Difference::GlyphMetrics {
            point_size: 10,
            code_point: 0x20,
            a: DiffGlyph {
                glyph_code: 0,
                value: GlyphRecord::Current(&info),
            },
            b: DiffGlyph {
                glyph_code: 0,
                value: GlyphRecord::Current(&wider),
            },
        };
        let text = difference.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "----- Glyph Metrics differ for codePoint U+00020 of pointSize 10"
        );
        assert!(lines[2].starts_with("< [0]: codePoint: U+00020,"));
        assert!(lines[2].contains("adv: 1,"));
        assert!(lines[3].starts_with("> [0]:"));
        assert!(lines[3].contains("adv: 2,"));
    }

    #[test]
    fn test_report_footer() {
        let report = DiffReport::default();
        assert_eq!(
            report.to_string(),
            "\n-----\nCompleted. Number of differences found: 0.\n"
        );
    }
}
