//! Code point to glyph code translation of UTF32 fonts
//!
//! Code points are split in a plane (bits 16 and up) and a 16-bit value.
//! Each of the four planes owns a run of bundles; a bundle maps an inclusive
//! range of 16-bit values onto consecutive glyph codes. Glyph codes of a plane
//! start at its `first_glyph_code` and grow by each bundle's span, in stored
//! order. Bundles are trusted to be sorted and non-overlapping.

use arrayvec::ArrayVec;
use bytes::Buf;

use crate::{
    error::IbmfErr,
    parse::{Parse, parse_array},
    types::{CodePointBundle, GlyphCode, NO_GLYPH_CODE, Plane},
};

pub const PLANE_COUNT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointTable {
    planes: ArrayVec<Plane, PLANE_COUNT>,
    bundles: Vec<CodePointBundle>,
}

impl CodePointTable {
    pub fn new(planes: [Plane; PLANE_COUNT], bundles: Vec<CodePointBundle>) -> Self {
        Self {
            planes: ArrayVec::from(planes),
            bundles,
        }
    }

    /// Read the four planes followed by every bundle they reference.
    pub fn parse(input: &mut impl Buf) -> Result<Self, IbmfErr> {
        let mut planes: ArrayVec<Plane, PLANE_COUNT> = ArrayVec::new();
        for _ in 0..PLANE_COUNT {
            planes.push(Plane::parse(input)?);
        }
        let bundle_count: usize = planes.iter().map(|p| p.entries_count as usize).sum();
        let bundles = parse_array(input, bundle_count)?;
        Ok(Self { planes, bundles })
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn bundles(&self) -> &[CodePointBundle] {
        &self.bundles
    }

    /// Bundles belonging to a plane, `None` if the plane points outside the bundle array
    pub fn plane_bundles(&self, plane: &Plane) -> Option<&[CodePointBundle]> {
        let start = plane.code_point_bundles_idx as usize;
        self.bundles
            .get(start..start + plane.entries_count as usize)
    }

    /// Glyph code of `code_point`, [`NO_GLYPH_CODE`] when it isn't mapped
    pub fn to_glyph_code(&self, code_point: u32) -> GlyphCode {
        let Some(plane) = self.planes.get((code_point >> 16) as usize) else {
            return NO_GLYPH_CODE;
        };
        let Some(bundles) = self.plane_bundles(plane) else {
            return NO_GLYPH_CODE;
        };

        let value = code_point & 0xFFFF;
        let mut glyph_code = plane.first_glyph_code as u32;
        for bundle in bundles {
            if value <= bundle.last_code_point as u32 {
                if value < bundle.first_code_point as u32 {
                    // Falls in the gap before this bundle
                    break;
                }
                glyph_code += value - bundle.first_code_point as u32;
                return GlyphCode::try_from(glyph_code).unwrap_or(NO_GLYPH_CODE);
            }
            glyph_code += bundle.span();
        }
        NO_GLYPH_CODE
    }

    /// Code point of `glyph_code`, the inverse of [`Self::to_glyph_code`]
    pub fn to_code_point(&self, glyph_code: GlyphCode) -> Option<u32> {
        let glyph_code = glyph_code as u32;
        let (plane_idx, plane) = self
            .planes
            .iter()
            .enumerate()
            .filter(|(_, plane)| plane.entries_count > 0)
            .take_while(|(_, plane)| plane.first_glyph_code as u32 <= glyph_code)
            .last()?;

        let mut offset = plane.first_glyph_code as u32;
        for bundle in self.plane_bundles(plane)? {
            let span = bundle.span();
            if glyph_code < offset + span {
                let value = bundle.first_code_point as u32 + (glyph_code - offset);
                return Some(value | (plane_idx as u32) << 16);
            }
            offset += span;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(first: u16, last: u16) -> CodePointBundle {
        CodePointBundle {
            first_code_point: first,
            last_code_point: last,
        }
    }

    fn plane(idx: u16, count: u16, first_glyph_code: u16) -> Plane {
        Plane {
            code_point_bundles_idx: idx,
            entries_count: count,
            first_glyph_code,
        }
    }

    /// Printable ASCII and Latin-1, then U+1F600..=U+1F60F
    fn table() -> CodePointTable {
        CodePointTable::new(
            [plane(0, 2, 0), plane(2, 1, 191), plane(3, 0, 207), plane(3, 0, 207)],
            vec![bundle(0x20, 0x7E), bundle(0xA0, 0xFF), bundle(0xF600, 0xF60F)],
        )
    }

    #[test]
    fn test_to_glyph_code() {
        let table = table();
        assert_eq!(table.to_glyph_code(0x20), 0);
        assert_eq!(table.to_glyph_code(0x41), 0x21);
        assert_eq!(table.to_glyph_code(0x7E), 94);
        assert_eq!(table.to_glyph_code(0xA0), 95);
        assert_eq!(table.to_glyph_code(0xFF), 190);
        assert_eq!(table.to_glyph_code(0x1F600), 191);
        assert_eq!(table.to_glyph_code(0x1F60F), 206);
    }

    #[test]
    fn test_unmapped_code_points() {
        let table = table();
        // Before the first bundle, in a gap, after the last bundle
        assert_eq!(table.to_glyph_code(0x10), NO_GLYPH_CODE);
        assert_eq!(table.to_glyph_code(0x7F), NO_GLYPH_CODE);
        assert_eq!(table.to_glyph_code(0x100), NO_GLYPH_CODE);
        // Empty plane, and planes above 3
        assert_eq!(table.to_glyph_code(0x20041), NO_GLYPH_CODE);
        assert_eq!(table.to_glyph_code(0x40041), NO_GLYPH_CODE);
        assert_eq!(table.to_glyph_code(0x10FFFF), NO_GLYPH_CODE);
    }

    #[test]
    fn test_round_trip() {
        let table = table();
        for glyph_code in 0..207 {
            let code_point = table.to_code_point(glyph_code).unwrap();
            assert_eq!(table.to_glyph_code(code_point), glyph_code);
        }
        assert_eq!(table.to_code_point(191), Some(0x1F600));
        assert_eq!(table.to_code_point(207), None);
    }

    #[test]
    fn test_corrupt_bundle_index_is_not_found() {
        let table = CodePointTable::new(
            [plane(5, 2, 0), plane(0, 0, 0), plane(0, 0, 0), plane(0, 0, 0)],
            vec![bundle(0x20, 0x7E)],
        );
        assert_eq!(table.to_glyph_code(0x41), NO_GLYPH_CODE);
        assert_eq!(table.to_code_point(0), None);
    }

    #[test]
    fn test_parse_reads_all_bundles() {
        let mut data: Vec<u8> = Vec::new();
        for (idx, count, first) in [(0u16, 1u16, 0u16), (1, 1, 95), (2, 0, 96), (2, 0, 96)] {
            data.extend_from_slice(&idx.to_le_bytes());
            data.extend_from_slice(&count.to_le_bytes());
            data.extend_from_slice(&first.to_le_bytes());
        }
        for (first, last) in [(0x20u16, 0x7Eu16), (0x0000, 0x0000)] {
            data.extend_from_slice(&first.to_le_bytes());
            data.extend_from_slice(&last.to_le_bytes());
        }
        data.push(0xAB);

        let mut input = data.as_slice();
        let table = CodePointTable::parse(&mut input).unwrap();
        assert_eq!(table.bundles().len(), 2);
        assert_eq!(input, &[0xAB]);
        assert_eq!(table.to_glyph_code(0x10000), 95);
    }
}
