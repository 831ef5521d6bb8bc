//! Character tables of LATIN format fonts
//!
//! A LATIN font only carries base glyphs and accents. Accented letters are
//! described by a composite glyph code: the base glyph in the low byte and
//! the accent glyph plus one in bits 8 to 14 (zero meaning no accent).

use crate::types::{GlyphCode, SPACE_CODE};

/// Strips the accent bits from a composite LATIN glyph code
pub const LATIN_GLYPH_CODE_MASK: GlyphCode = 0x00FF;

// Accent glyphs
const GRV: u8 = 0x00;
const ACU: u8 = 0x01;
const CIR: u8 = 0x02;
const TIL: u8 = 0x03;
const UML: u8 = 0x04;
const HUN: u8 = 0x05;
const RNG: u8 = 0x06;
const CAR: u8 = 0x07;
const BRV: u8 = 0x08;
const MAC: u8 = 0x09;
const DOT: u8 = 0x0A;
const CED: u8 = 0x0B;
const OGO: u8 = 0x0C;

// Base glyphs that aren't plain ASCII
const DOTLESS_I: u8 = 0x19;
const DOTLESS_J: u8 = 0x1A;
const AE: u8 = 0x94;
const AE_SMALL: u8 = 0x95;
const O_SLASH: u8 = 0x98;
const O_SLASH_SMALL: u8 = 0x99;

const SP: GlyphCode = SPACE_CODE;

/// Composite glyph code of `main` with `accent` on top
pub const fn compose(main: u8, accent: u8) -> GlyphCode {
    main as GlyphCode | ((accent as GlyphCode + 1) << 8)
}

const fn c(main: u8, accent: u8) -> GlyphCode {
    compose(main, accent)
}

/// Accent glyph of a composite glyph code, if any
pub fn accent_of(glyph_code: GlyphCode) -> Option<GlyphCode> {
    match (glyph_code >> 8) & 0x7F {
        0 => None,
        accent => Some(accent - 1),
    }
}

/// Glyph codes of U+00A1 to U+01FF
#[rustfmt::skip]
pub static LATIN_TRANSLATION_SET: [GlyphCode; 351] = [
    // U+00A1
    0x80, 0x8A, 0x82, 0x8C, 0x8B, 0x8D, 0x83, 0x04, 0x85, 0x8E, 0x13, 0x90, 0x7F, 0x86, 0x09,
    // U+00B0
    0x87, 0x88, 0xA9, 0xAA, 0x01, 0x91, 0x84, 0x89, 0x0B, 0xA8, 0x8F, 0x14, 0xAB, 0xAC, SP, 0x81,
    // U+00C0
    c(b'A', GRV), c(b'A', ACU), c(b'A', CIR), c(b'A', TIL), c(b'A', UML), c(b'A', RNG), AE as GlyphCode, c(b'C', CED),
    c(b'E', GRV), c(b'E', ACU), c(b'E', CIR), c(b'E', UML), c(b'I', GRV), c(b'I', ACU), c(b'I', CIR), c(b'I', UML),
    // U+00D0
    0x9E, c(b'N', TIL), c(b'O', GRV), c(b'O', ACU), c(b'O', CIR), c(b'O', TIL), c(b'O', UML), 0x92,
    O_SLASH as GlyphCode, c(b'U', GRV), c(b'U', ACU), c(b'U', CIR), c(b'U', UML), c(b'Y', ACU), 0xA0, 0x9C,
    // U+00E0
    c(b'a', GRV), c(b'a', ACU), c(b'a', CIR), c(b'a', TIL), c(b'a', UML), c(b'a', RNG), AE_SMALL as GlyphCode, c(b'c', CED),
    c(b'e', GRV), c(b'e', ACU), c(b'e', CIR), c(b'e', UML), c(DOTLESS_I, GRV), c(DOTLESS_I, ACU), c(DOTLESS_I, CIR), c(DOTLESS_I, UML),
    // U+00F0
    0x9F, c(b'n', TIL), c(b'o', GRV), c(b'o', ACU), c(b'o', CIR), c(b'o', TIL), c(b'o', UML), 0x93,
    O_SLASH_SMALL as GlyphCode, c(b'u', GRV), c(b'u', ACU), c(b'u', CIR), c(b'u', UML), c(b'y', ACU), 0xA1, c(b'y', UML),
    // U+0100
    c(b'A', MAC), c(b'a', MAC), c(b'A', BRV), c(b'a', BRV), c(b'A', OGO), c(b'a', OGO), c(b'C', ACU), c(b'c', ACU),
    c(b'C', CIR), c(b'c', CIR), c(b'C', DOT), c(b'c', DOT), c(b'C', CAR), c(b'c', CAR), c(b'D', CAR), c(b'd', CAR),
    // U+0110
    0xA4, 0xA5, c(b'E', MAC), c(b'e', MAC), c(b'E', BRV), c(b'e', BRV), c(b'E', DOT), c(b'e', DOT),
    c(b'E', OGO), c(b'e', OGO), c(b'E', CAR), c(b'e', CAR), c(b'G', CIR), c(b'g', CIR), c(b'G', BRV), c(b'g', BRV),
    // U+0120
    c(b'G', DOT), c(b'g', DOT), c(b'G', CED), c(b'g', CED), c(b'H', CIR), c(b'h', CIR), SP, SP,
    c(b'I', TIL), c(DOTLESS_I, TIL), c(b'I', MAC), c(DOTLESS_I, MAC), c(b'I', BRV), c(DOTLESS_I, BRV), c(b'I', OGO), c(b'i', OGO),
    // U+0130
    c(b'I', DOT), DOTLESS_I as GlyphCode, 0xA6, 0xA7, c(b'J', CIR), c(DOTLESS_J, CIR), c(b'K', CED), c(b'k', CED),
    SP, c(b'L', ACU), c(b'l', ACU), c(b'L', CED), c(b'l', CED), c(b'L', CAR), c(b'l', CAR), SP,
    // U+0140
    SP, 0x9A, 0x9B, c(b'N', ACU), c(b'n', ACU), c(b'N', CED), c(b'n', CED), c(b'N', CAR),
    c(b'n', CAR), SP, 0xA2, 0xA3, c(b'O', MAC), c(b'o', MAC), c(b'O', BRV), c(b'o', BRV),
    // U+0150
    c(b'O', HUN), c(b'o', HUN), 0x96, 0x97, c(b'R', ACU), c(b'r', ACU), c(b'R', CED), c(b'r', CED),
    c(b'R', CAR), c(b'r', CAR), c(b'S', ACU), c(b's', ACU), c(b'S', CIR), c(b's', CIR), c(b'S', CED), c(b's', CED),
    // U+0160
    c(b'S', CAR), c(b's', CAR), c(b'T', CED), c(b't', CED), c(b'T', CAR), c(b't', CAR), SP, SP,
    c(b'U', TIL), c(b'u', TIL), c(b'U', MAC), c(b'u', MAC), c(b'U', BRV), c(b'u', BRV), c(b'U', RNG), c(b'u', RNG),
    // U+0170
    c(b'U', HUN), c(b'u', HUN), c(b'U', OGO), c(b'u', OGO), c(b'W', CIR), c(b'w', CIR), c(b'Y', CIR), c(b'y', CIR),
    c(b'Y', UML), c(b'Z', ACU), c(b'z', ACU), c(b'Z', DOT), c(b'z', DOT), c(b'Z', CAR), c(b'z', CAR), SP,
    // U+0180
    SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP,
    // U+0190
    SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP,
    // U+01A0
    SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP,
    // U+01B0
    SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP,
    // U+01C0
    SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, SP, c(b'A', CAR), c(b'a', CAR), c(b'I', CAR),
    // U+01D0
    c(DOTLESS_I, CAR), c(b'O', CAR), c(b'o', CAR), c(b'U', CAR), c(b'u', CAR), SP, SP, SP,
    SP, SP, SP, SP, SP, SP, SP, SP,
    // U+01E0
    SP, SP, SP, SP, SP, SP, c(b'G', CAR), c(b'g', CAR), c(b'K', CAR), c(b'k', CAR), c(b'O', OGO), c(b'o', OGO), SP, SP, SP, SP,
    // U+01F0
    c(DOTLESS_J, CAR), SP, SP, SP, c(b'G', ACU), c(b'g', ACU), SP, SP,
    c(b'N', GRV), c(b'n', GRV), SP, SP, c(AE, ACU), c(AE_SMALL, ACU), c(O_SLASH, ACU), c(O_SLASH_SMALL, ACU),
];

/// Code point of every (non composite) glyph of a LATIN font
#[rustfmt::skip]
pub static LATIN_CODE_POINTS: [u32; 174] = [
    // 0x00: accents and punctuation
    0x0060, 0x00B4, 0x02C6, 0x02DC, 0x00A8, 0x02DD, 0x02DA, 0x02C7,
    0x02D8, 0x00AF, 0x02D9, 0x00B8, 0x02DB, 0x201A, 0x2039, 0x203A,
    0x201C, 0x201D, 0x201E, 0x00AB, 0x00BB, 0x2013, 0x2014, 0x200C,
    0x2080, 0x0131, 0x0237, 0xFB00, 0xFB01, 0xFB02, 0xFB03, 0xFB04,
    // 0x20: ASCII, with typographic quotes at 0x27 and 0x60
    0x2423, 0x0021, 0x0022, 0x0023, 0x0024, 0x0025, 0x0026, 0x2019,
    0x0028, 0x0029, 0x002A, 0x002B, 0x002C, 0x002D, 0x002E, 0x002F,
    0x0030, 0x0031, 0x0032, 0x0033, 0x0034, 0x0035, 0x0036, 0x0037,
    0x0038, 0x0039, 0x003A, 0x003B, 0x003C, 0x003D, 0x003E, 0x003F,
    0x0040, 0x0041, 0x0042, 0x0043, 0x0044, 0x0045, 0x0046, 0x0047,
    0x0048, 0x0049, 0x004A, 0x004B, 0x004C, 0x004D, 0x004E, 0x004F,
    0x0050, 0x0051, 0x0052, 0x0053, 0x0054, 0x0055, 0x0056, 0x0057,
    0x0058, 0x0059, 0x005A, 0x005B, 0x005C, 0x005D, 0x005E, 0x005F,
    0x2018, 0x0061, 0x0062, 0x0063, 0x0064, 0x0065, 0x0066, 0x0067,
    0x0068, 0x0069, 0x006A, 0x006B, 0x006C, 0x006D, 0x006E, 0x006F,
    0x0070, 0x0071, 0x0072, 0x0073, 0x0074, 0x0075, 0x0076, 0x0077,
    0x0078, 0x0079, 0x007A, 0x007B, 0x007C, 0x007D, 0x007E, 0x2010,
    // 0x80: symbols and letters that can't be composed
    0x00A1, 0x00BF, 0x00A3, 0x00A7, 0x00B6, 0x00A9, 0x00AE, 0x00B0,
    0x00B1, 0x00B7, 0x00A2, 0x00A5, 0x00A4, 0x00A6, 0x00AA, 0x00BA,
    0x00AC, 0x00B5, 0x00D7, 0x00F7, 0x00C6, 0x00E6, 0x0152, 0x0153,
    0x00D8, 0x00F8, 0x0141, 0x0142, 0x00DF, 0x1E9E, 0x00D0, 0x00F0,
    0x00DE, 0x00FE, 0x014A, 0x014B, 0x0110, 0x0111, 0x0132, 0x0133,
    0x00B9, 0x00B2, 0x00B3, 0x00BC, 0x00BD, 0x20AC,
];

/// Glyph code of `code_point` in a LATIN font, [`SPACE_CODE`] when there is none
pub fn translate_latin(code_point: u32) -> GlyphCode {
    match code_point {
        // ASCII, no accent
        0x21..=0x7E => code_point as GlyphCode,
        0xA1..=0x1FF => LATIN_TRANSLATION_SET[(code_point - 0xA1) as usize],
        0x2013 => 0x0015,          // endash
        0x2014 => 0x0016,          // emdash
        0x2018 | 0x02BB => 0x0060, // quote left, reverse apostrophe
        0x2019 | 0x02BC => 0x0027, // quote right, apostrophe
        0x201C => 0x0010,          // quoted left
        0x201D => 0x0011,          // quoted right
        0x02C6 => 0x005E,          // circumflex
        0x02DA => 0x0006,          // ring
        0x02DC => 0x007E,          // tilde
        0x201A => 0x000D,          // comma like
        0x2032 => 0x0027,          // minute
        0x2033 => 0x0022,          // second
        0x2044 => 0x002F,          // fraction
        0x20AC => 0x00AD,          // euro
        _ => SPACE_CODE,
    }
}

/// Code point of a LATIN glyph code, composite codes included
pub fn latin_code_point(glyph_code: GlyphCode) -> Option<u32> {
    if let Some(&code_point) = LATIN_CODE_POINTS.get(glyph_code as usize) {
        return Some(code_point);
    }
    LATIN_TRANSLATION_SET
        .iter()
        .position(|&code| code == glyph_code && code != SPACE_CODE)
        .map(|idx| idx as u32 + 0xA1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_maps_to_itself() {
        for code_point in 0x21..0x7F {
            assert_eq!(translate_latin(code_point), code_point as GlyphCode);
        }
        assert_eq!(translate_latin(0x41), 0x41);
        assert_eq!(translate_latin(0x20), SPACE_CODE);
        assert_eq!(translate_latin(0x7F), SPACE_CODE);
    }

    #[test]
    fn test_named_characters() {
        assert_eq!(translate_latin(0x2013), 0x15);
        assert_eq!(translate_latin(0x2014), 0x16);
        assert_eq!(translate_latin(0x02BB), 0x60);
        assert_eq!(translate_latin(0x02BC), 0x27);
        assert_eq!(translate_latin(0x20AC), 0xAD);
        assert_eq!(latin_code_point(0xAD), Some(0x20AC));
        assert_eq!(translate_latin(0x1F600), SPACE_CODE);
    }

    #[test]
    fn test_accented_letters_compose() {
        let e_acute = translate_latin(0xE9);
        assert_eq!(e_acute & LATIN_GLYPH_CODE_MASK, b'e' as GlyphCode);
        assert_eq!(accent_of(e_acute), Some(ACU as GlyphCode));
        assert_eq!(latin_code_point(e_acute), Some(0xE9));

        assert_eq!(translate_latin(0x0141), 0x9A);
        assert_eq!(accent_of(0x9A), None);
        assert_eq!(translate_latin(0x01FF), compose(O_SLASH_SMALL, ACU));
    }

    #[test]
    fn test_code_point_table_is_consistent_with_translation() {
        for (glyph_code, &code_point) in LATIN_CODE_POINTS.iter().enumerate() {
            let translated = translate_latin(code_point);
            // Spacing circumflex and tilde are drawn with their ASCII glyphs
            if translated != SPACE_CODE
                && !(0x21..0x7F).contains(&code_point)
                && !(0x21..0x7F).contains(&translated)
            {
                assert_eq!(
                    translated, glyph_code as GlyphCode,
                    "U+{code_point:04X} maps to {translated:#x}"
                );
            }
        }
    }
}
