//! Builds IBMF font buffers for the integration tests
#![allow(dead_code)]

use bytes::BufMut;

pub const LATIN: u8 = 0;
pub const UTF32: u8 = 1;
pub const BACKUP: u8 = 7;

#[derive(Debug, Clone)]
pub struct GlyphSpec {
    /// `X` for black, anything else for white. All rows have the same length.
    pub rows: Vec<String>,
    pub horizontal_offset: i8,
    pub vertical_offset: i8,
    pub advance: i16,
    pub lig_kern_pgm_index: u8,
    /// Defaults to the glyph's own glyph code when `None`
    pub main_code: Option<u16>,
    /// Replaces the raw bitmap packet: rle metrics bits and packet bytes
    pub packet: Option<(u8, Vec<u8>)>,
    /// BACKUP glyphs only
    pub code_point: u32,
    pub backup_ligs: Vec<(u32, u32)>,
    pub backup_kerns: Vec<(u32, i16)>,
}

pub fn glyph(rows: &[&str]) -> GlyphSpec {
    GlyphSpec {
        rows: rows.iter().map(|row| row.to_string()).collect(),
        horizontal_offset: 0,
        vertical_offset: rows.len() as i8,
        advance: (rows.first().map_or(0, |row| row.len()) as i16 + 1) * 64,
        lig_kern_pgm_index: 255,
        main_code: None,
        packet: None,
        code_point: 0,
        backup_ligs: Vec::new(),
        backup_kerns: Vec::new(),
    }
}

impl GlyphSpec {
    fn width(&self) -> u8 {
        self.rows.first().map_or(0, |row| row.len()) as u8
    }

    fn height(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Rle metrics bits and packet bytes
    fn packet(&self) -> (u8, Vec<u8>) {
        if let Some(packet) = &self.packet {
            return packet.clone();
        }
        let mut bytes = Vec::new();
        let mut byte = 0u8;
        let mut bit = 0;
        for pixel in self.rows.iter().flat_map(|row| row.chars()) {
            if pixel == 'X' {
                byte |= 0x80 >> bit;
            }
            bit += 1;
            if bit == 8 {
                bytes.push(byte);
                byte = 0;
                bit = 0;
            }
        }
        if bit > 0 {
            bytes.push(byte);
        }
        // Raw bitmap
        (14, bytes)
    }
}

#[derive(Debug, Clone)]
pub struct FaceSpec {
    pub point_size: u8,
    pub line_height: u8,
    pub dpi: u16,
    pub x_height: i16,
    pub em_size: i16,
    pub glyphs: Vec<GlyphSpec>,
    /// Raw `(a, b)` words of the shared lig/kern program
    pub lig_kern_steps: Vec<(u16, u16)>,
}

pub fn face(point_size: u8, glyphs: Vec<GlyphSpec>) -> FaceSpec {
    FaceSpec {
        point_size,
        line_height: point_size + 4,
        dpi: 150,
        x_height: point_size as i16 * 32,
        em_size: point_size as i16 * 64,
        glyphs,
        lig_kern_steps: Vec::new(),
    }
}

#[derive(Debug, Clone)]
pub struct FontSpec {
    pub format: u8,
    pub version: u8,
    /// UTF32 only: bundles of plane 0, in glyph code order
    pub bundles: Vec<(u16, u16)>,
    pub faces: Vec<FaceSpec>,
}

/// A UTF32 font whose glyphs are the code points of `bundles`, in order
pub fn utf32_font(bundles: &[(u16, u16)], faces: Vec<FaceSpec>) -> FontSpec {
    FontSpec {
        format: UTF32,
        version: 4,
        bundles: bundles.to_vec(),
        faces,
    }
}

/// One glyph per character of `chars`, each a distinct little bitmap
pub fn glyphs_for(chars: &str) -> Vec<GlyphSpec> {
    chars
        .chars()
        .map(|c| {
            let c = c as u32;
            let top: String = (0..5).map(|i| if c & (1 << i) != 0 { 'X' } else { '.' }).collect();
            glyph(&[&top, "X...X", ".XXX."])
        })
        .collect()
}

fn round4(value: usize) -> usize {
    (value + 3) & !3
}

pub fn build(spec: &FontSpec) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();

    out.put_slice(b"IBMF");
    out.put_u8(spec.faces.len() as u8);
    out.put_u8(spec.version | (spec.format << 5));
    for face in &spec.faces {
        out.put_u8(face.point_size);
    }
    out.resize(round4(out.len()), 0);

    let offsets_start = out.len();
    out.put_bytes(0, 4 * spec.faces.len());

    if spec.format == UTF32 {
        let total: u32 = spec
            .bundles
            .iter()
            .map(|&(first, last)| last as u32 - first as u32 + 1)
            .sum();
        let count = spec.bundles.len() as u16;
        // Plane 0 owns every bundle, the others are empty
        out.put_u16_le(0);
        out.put_u16_le(count);
        out.put_u16_le(0);
        for _ in 1..4 {
            out.put_u16_le(count);
            out.put_u16_le(0);
            out.put_u16_le(total as u16);
        }
        for &(first, last) in &spec.bundles {
            out.put_u16_le(first);
            out.put_u16_le(last);
        }
    }

    for (face_idx, face) in spec.faces.iter().enumerate() {
        let offset = out.len() as u32;
        let slot = offsets_start + 4 * face_idx;
        out[slot..slot + 4].copy_from_slice(&offset.to_le_bytes());
        write_face(&mut out, spec.format, face);
    }
    out
}

fn write_face(out: &mut Vec<u8>, format: u8, face: &FaceSpec) {
    let packets: Vec<(u8, Vec<u8>)> = face.glyphs.iter().map(GlyphSpec::packet).collect();
    let pool_size: usize = packets.iter().map(|(_, bytes)| bytes.len()).sum();

    out.put_u8(face.point_size);
    out.put_u8(face.line_height);
    out.put_u16_le(face.dpi);
    out.put_i16_le(face.x_height);
    out.put_i16_le(face.em_size);
    out.put_i16_le(0);
    out.put_u8(3);
    out.put_u8(face.point_size / 3);
    out.put_u16_le(face.glyphs.len() as u16);
    out.put_u16_le(face.lig_kern_steps.len() as u16);
    out.put_u32_le(pool_size as u32);

    let mut pool_idx = 0u32;
    for (_, bytes) in &packets {
        out.put_u32_le(pool_idx);
        pool_idx += bytes.len() as u32;
    }

    for (glyph_code, (glyph, (metrics, bytes))) in face.glyphs.iter().zip(&packets).enumerate() {
        out.put_u8(glyph.width());
        out.put_u8(glyph.height());
        out.put_i8(glyph.horizontal_offset);
        out.put_i8(glyph.vertical_offset);
        if format == BACKUP {
            out.put_u8(glyph.backup_ligs.len() as u8);
            out.put_u8(glyph.backup_kerns.len() as u8);
            out.put_u16_le(bytes.len() as u16);
            out.put_i16_le(glyph.advance);
            out.put_u8(*metrics);
            out.put_u8(0);
            out.put_u32_le(glyph.code_point);
        } else {
            out.put_u16_le(bytes.len() as u16);
            out.put_i16_le(glyph.advance);
            out.put_u8(*metrics);
            out.put_u8(glyph.lig_kern_pgm_index);
            out.put_u16_le(glyph.main_code.unwrap_or(glyph_code as u16));
        }
    }

    for (_, bytes) in &packets {
        out.put_slice(bytes);
    }

    if format == BACKUP {
        for glyph in &face.glyphs {
            for &(next, replacement) in &glyph.backup_ligs {
                out.put_u32_le(next);
                out.put_u32_le(replacement);
            }
            for &(next, kern) in &glyph.backup_kerns {
                out.put_u32_le(next);
                out.put_i16_le(kern);
                out.put_u16_le(0);
            }
        }
    } else {
        for &(a, b) in &face.lig_kern_steps {
            out.put_u16_le(a);
            out.put_u16_le(b);
        }
    }
}

/// Offset of the first face header of a built font
pub fn first_face_offset(data: &[u8]) -> usize {
    let start = round4(6 + data[4] as usize);
    u32::from_le_bytes([data[start], data[start + 1], data[start + 2], data[start + 3]]) as usize
}

pub fn lig_step(next: u16, replacement: u16, stop: bool) -> (u16, u16) {
    (next | if stop { 0x8000 } else { 0 }, replacement & 0x7FFF)
}

pub fn kern_step(next: u16, kern: i16, stop: bool) -> (u16, u16) {
    (
        next | if stop { 0x8000 } else { 0 },
        0x8000 | (kern as u16 & 0x3FFF),
    )
}

pub fn goto_step(displacement: u16) -> (u16, u16) {
    (0, 0xC000 | displacement)
}
