use bytes::Buf as _;

use crate::{
    bitmap::{Bitmap, Dim, RleBitmap},
    buffer::Buffer,
    code_points::CodePointTable,
    error::{IbmfErr, bail, bail_if, bail_with_msg_if},
    latin::{LATIN_GLYPH_CODE_MASK, latin_code_point, translate_latin},
    lig_kern::{self, LigKernOutcome},
    parse::{Parse, parse_array},
    rle,
    types::{
        BackupGlyphInfo, BackupGlyphLigKern, FaceHeader, FontFormat, GlyphCode, GlyphInfo,
        GlyphLigKern, LigKernStep, NO_GLYPH_CODE, NO_LIG_KERN_PGM, Preamble, RleMetrics,
        SPACE_CODE,
    },
};

/// A decoded IBMF font: one or more faces of the same design at different point sizes.
///
/// Built once by [`Font::load`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    preamble: Preamble,
    /// Present for UTF32 fonts only
    code_points: Option<CodePointTable>,
    faces: Vec<Face>,
}

/// One point size of a font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub header: FaceHeader,
    /// Decompressed bitmap of every glyph, indexed by glyph code
    pub bitmaps: Vec<Bitmap>,
    pub glyphs: FaceGlyphs,
}

/// Per-glyph records of a face. Both vectors of a variant are indexed by glyph code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceGlyphs {
    /// LATIN and UTF32 fonts
    Current {
        infos: Vec<GlyphInfo>,
        lig_kerns: Vec<GlyphLigKern>,
        /// The face's shared program array the `lig_kerns` were resolved from
        lig_kern_steps: Vec<LigKernStep>,
    },
    /// BACKUP fonts
    Backup {
        infos: Vec<BackupGlyphInfo>,
        lig_kerns: Vec<BackupGlyphLigKern>,
    },
}

impl FaceGlyphs {
    fn record(&self, idx: usize) -> Option<GlyphRecord<'_>> {
        match self {
            Self::Current { infos, .. } => infos.get(idx).map(GlyphRecord::Current),
            Self::Backup { infos, .. } => infos.get(idx).map(GlyphRecord::Backup),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlyphRecord<'a> {
    Current(&'a GlyphInfo),
    Backup(&'a BackupGlyphInfo),
}

impl GlyphRecord<'_> {
    pub fn dim(&self) -> Dim {
        match self {
            Self::Current(info) => Dim::new(info.bitmap_width, info.bitmap_height),
            Self::Backup(info) => Dim::new(info.bitmap_width, info.bitmap_height),
        }
    }

    fn rle_shape(&self) -> (Dim, u16, RleMetrics) {
        match self {
            Self::Current(info) => (self.dim(), info.packet_length, info.rle_metrics),
            Self::Backup(info) => (self.dim(), info.packet_length, info.rle_metrics),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LigKernRecord<'a> {
    Current(&'a GlyphLigKern),
    Backup(&'a BackupGlyphLigKern),
}

/// Owned copy of everything a LATIN or UTF32 face knows about one glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphData {
    pub info: GlyphInfo,
    pub bitmap: Bitmap,
    pub lig_kern: GlyphLigKern,
}

impl Face {
    pub fn glyph_count(&self) -> usize {
        match &self.glyphs {
            FaceGlyphs::Current { infos, .. } => infos.len(),
            FaceGlyphs::Backup { infos, .. } => infos.len(),
        }
    }

    pub fn is_backup(&self) -> bool {
        matches!(self.glyphs, FaceGlyphs::Backup { .. })
    }

    pub fn glyph_record(&self, glyph_code: GlyphCode) -> Option<GlyphRecord<'_>> {
        self.glyphs.record(glyph_code as usize)
    }

    pub fn bitmap(&self, glyph_code: GlyphCode) -> Option<&Bitmap> {
        self.bitmaps.get(glyph_code as usize)
    }

    pub fn lig_kern_record(&self, glyph_code: GlyphCode) -> Option<LigKernRecord<'_>> {
        let idx = glyph_code as usize;
        match &self.glyphs {
            FaceGlyphs::Current { lig_kerns, .. } => lig_kerns.get(idx).map(LigKernRecord::Current),
            FaceGlyphs::Backup { lig_kerns, .. } => lig_kerns.get(idx).map(LigKernRecord::Backup),
        }
    }

    /// The shared lig/kern step array. Empty for BACKUP faces.
    pub fn lig_kern_steps(&self) -> &[LigKernStep] {
        match &self.glyphs {
            FaceGlyphs::Current { lig_kern_steps, .. } => lig_kern_steps,
            FaceGlyphs::Backup { .. } => &[],
        }
    }

    /// Glyph code of the BACKUP glyph carrying `code_point`.
    ///
    /// Other faces don't store code points and always return `None`.
    pub fn find_glyph_index(&self, code_point: u32) -> Option<GlyphCode> {
        let FaceGlyphs::Backup { infos, .. } = &self.glyphs else {
            return None;
        };
        infos
            .iter()
            .position(|info| info.code_point == code_point)
            .and_then(|idx| GlyphCode::try_from(idx).ok())
    }

    fn parse(input: &mut Buffer<'_>, face_idx: usize, format: FontFormat) -> Result<Face, IbmfErr> {
        let header = FaceHeader::parse(input)?;
        let glyph_count = header.glyph_count as usize;

        bail_if!(input.remaining() < glyph_count * 4, IbmfErr::UnexpectedEof);
        let pool_indices = (0..glyph_count)
            .map(|_| input.try_get_u32_le())
            .collect::<Result<Vec<u32>, _>>()?;

        let record_size = match format {
            FontFormat::Backup => BackupGlyphInfo::SIZE,
            FontFormat::Latin | FontFormat::Utf32 => GlyphInfo::SIZE,
        };
        let pool_start = input.offset() + glyph_count * record_size;

        let glyphs = match format {
            FontFormat::Backup => FaceGlyphs::Backup {
                infos: parse_array(input, glyph_count)?,
                lig_kerns: Vec::new(),
            },
            FontFormat::Latin | FontFormat::Utf32 => FaceGlyphs::Current {
                infos: parse_array(input, glyph_count)?,
                lig_kerns: Vec::new(),
                lig_kern_steps: Vec::new(),
            },
        };
        // Only trips if a record parser reads other than its declared SIZE
        bail_with_msg_if!(
            input.offset() != pool_start,
            IbmfErr::PixelPoolMismatch {
                face: face_idx,
                expected: pool_start,
                actual: input.offset()
            },
            "Face {face_idx}: glyph records end at {}, pixel pool expected at {pool_start}",
            (input.offset())
        );

        let pool = input.take_slice(header.pixels_pool_size as usize)?;
        let shapes: Vec<(Dim, u16, RleMetrics)> = (0..glyph_count)
            .filter_map(|idx| glyphs.record(idx))
            .map(|record| record.rle_shape())
            .collect();
        let bitmaps = decode_bitmaps(pool, &pool_indices, &shapes, face_idx)?;

        let glyphs = match glyphs {
            FaceGlyphs::Current { infos, .. } => {
                let lig_kern_steps: Vec<LigKernStep> =
                    parse_array(input, header.lig_kern_step_count as usize)?;
                let lig_kerns = infos
                    .iter()
                    .map(|info| {
                        if info.lig_kern_pgm_index == NO_LIG_KERN_PGM {
                            GlyphLigKern::default()
                        } else {
                            lig_kern::resolve_program(
                                &lig_kern_steps,
                                info.lig_kern_pgm_index as usize,
                            )
                        }
                    })
                    .collect();
                FaceGlyphs::Current {
                    infos,
                    lig_kerns,
                    lig_kern_steps,
                }
            }
            FaceGlyphs::Backup { infos, .. } => {
                let mut lig_kerns = Vec::with_capacity(infos.len());
                for info in &infos {
                    lig_kerns.push(BackupGlyphLigKern {
                        lig_steps: parse_array(input, info.lig_count as usize)?,
                        kern_steps: parse_array(input, info.kern_count as usize)?,
                    });
                }
                FaceGlyphs::Backup { infos, lig_kerns }
            }
        };

        Ok(Face {
            header,
            bitmaps,
            glyphs,
        })
    }
}

/// Slice each glyph's packet out of the pixel pool and decompress it
fn decode_bitmaps(
    pool: &[u8],
    pool_indices: &[u32],
    shapes: &[(Dim, u16, RleMetrics)],
    face_idx: usize,
) -> Result<Vec<Bitmap>, IbmfErr> {
    let mut bitmaps = Vec::with_capacity(shapes.len());
    for (glyph_code, (&(dim, packet_length, metrics), &pool_idx)) in
        shapes.iter().zip(pool_indices).enumerate()
    {
        let start = pool_idx as usize;
        let length = packet_length as usize;
        let Some(pixels) = start
            .checked_add(length)
            .and_then(|end| pool.get(start..end))
        else {
            bail!(IbmfErr::GlyphOutOfPool {
                face: face_idx,
                glyph_code: glyph_code as GlyphCode,
            });
        };
        let packet = RleBitmap {
            dim,
            pixels,
            length,
        };
        bitmaps.push(rle::decode(&packet, dim, metrics)?);
    }
    Ok(bitmaps)
}

impl Font {
    /// Decode a whole font from `data`.
    ///
    /// Either every face is loaded or an error is returned.
    pub fn load(data: &[u8]) -> Result<Font, IbmfErr> {
        let mut input = Buffer::new(data);

        let preamble = Preamble::parse(&mut input)?;
        input.skip_to(preamble.face_offsets_start())?;

        let face_offsets = (0..preamble.face_count)
            .map(|_| input.try_get_u32_le())
            .collect::<Result<Vec<u32>, _>>()?;

        let code_points = match preamble.format {
            FontFormat::Utf32 => Some(CodePointTable::parse(&mut input)?),
            FontFormat::Latin | FontFormat::Backup => None,
        };

        let mut faces = Vec::with_capacity(face_offsets.len());
        for (face_idx, &offset) in face_offsets.iter().enumerate() {
            let offset = offset as usize;
            bail_with_msg_if!(
                input.offset() != offset,
                IbmfErr::FaceOffsetMismatch {
                    face: face_idx,
                    expected: offset,
                    actual: input.offset()
                },
                "Face {face_idx} recorded at offset {offset}, parsing reached {}",
                (input.offset())
            );

            let face = Face::parse(&mut input, face_idx, preamble.format)?;
            log::debug!(
                "Face {face_idx}: {}pt, {} glyphs, {} lig/kern steps, {} byte pixel pool",
                face.header.point_size,
                face.header.glyph_count,
                face.header.lig_kern_step_count,
                face.header.pixels_pool_size
            );
            faces.push(face);
        }

        Ok(Font {
            preamble,
            code_points,
            faces,
        })
    }

    pub fn preamble(&self) -> &Preamble {
        &self.preamble
    }

    pub fn format(&self) -> FontFormat {
        self.preamble.format
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, face_idx: usize) -> Option<&Face> {
        self.faces.get(face_idx)
    }

    pub fn face_header(&self, face_idx: usize) -> Option<&FaceHeader> {
        self.face(face_idx).map(|face| &face.header)
    }

    /// Line height of a face in pixels, 0 if there is no such face
    pub fn line_height(&self, face_idx: usize) -> u8 {
        self.face_header(face_idx)
            .map_or(0, |header| header.line_height)
    }

    /// First face with the given point size
    pub fn find_face(&self, point_size: u8) -> Option<&Face> {
        self.faces
            .iter()
            .find(|face| face.header.point_size == point_size)
    }

    /// Planes and bundles of a UTF32 font
    pub fn code_points(&self) -> Option<&CodePointTable> {
        self.code_points.as_ref()
    }

    /// Copy of a glyph of a LATIN or UTF32 face
    pub fn get_glyph(&self, face_idx: usize, glyph_code: GlyphCode) -> Option<GlyphData> {
        let face = self.face(face_idx)?;
        let FaceGlyphs::Current {
            infos, lig_kerns, ..
        } = &face.glyphs
        else {
            return None;
        };
        let idx = glyph_code as usize;
        Some(GlyphData {
            info: *infos.get(idx)?,
            bitmap: face.bitmaps.get(idx)?.clone(),
            lig_kern: lig_kerns.get(idx)?.clone(),
        })
    }

    /// Whether `glyph` differs from what the font stores for `glyph_code`.
    ///
    /// A glyph the font doesn't have always counts as modified.
    pub fn glyph_is_modified(
        &self,
        face_idx: usize,
        glyph_code: GlyphCode,
        glyph: &GlyphData,
    ) -> bool {
        self.get_glyph(face_idx, glyph_code)
            .is_none_or(|stored| stored != *glyph)
    }

    /// Code point of every glyph of the first face, indexed by glyph code
    pub fn character_codes(&self) -> Vec<Option<u32>> {
        let Some(face) = self.face(0) else {
            return Vec::new();
        };
        (0..face.glyph_count())
            .map(|glyph_code| self.code_point_of(face, glyph_code as GlyphCode))
            .collect()
    }

    /// Internal glyph code of `code_point`.
    ///
    /// LATIN fonts answer [`SPACE_CODE`] for code points they can't represent,
    /// UTF32 fonts [`NO_GLYPH_CODE`]. BACKUP glyph codes are face specific, see
    /// [`Face::find_glyph_index`]; this returns [`SPACE_CODE`] for them.
    pub fn translate(&self, code_point: u32) -> GlyphCode {
        match self.preamble.format {
            FontFormat::Latin => translate_latin(code_point),
            FontFormat::Utf32 => self.to_glyph_code(code_point),
            FontFormat::Backup => SPACE_CODE,
        }
    }

    /// Plane and bundle lookup. [`NO_GLYPH_CODE`] for fonts without code point tables.
    pub fn to_glyph_code(&self, code_point: u32) -> GlyphCode {
        self.code_points
            .as_ref()
            .map_or(NO_GLYPH_CODE, |table| table.to_glyph_code(code_point))
    }

    /// Code point of a glyph code, the inverse of [`Font::translate`]
    pub fn get_utf32(&self, glyph_code: GlyphCode) -> Option<u32> {
        match self.preamble.format {
            FontFormat::Utf32 => self
                .code_points
                .as_ref()
                .and_then(|table| table.to_code_point(glyph_code)),
            FontFormat::Latin => latin_code_point(glyph_code),
            FontFormat::Backup => None,
        }
    }

    /// [`Font::get_utf32`] that also understands BACKUP faces
    pub fn code_point_of(&self, face: &Face, glyph_code: GlyphCode) -> Option<u32> {
        match face.glyph_record(glyph_code)? {
            GlyphRecord::Backup(info) => Some(info.code_point),
            GlyphRecord::Current(_) => self.get_utf32(glyph_code),
        }
    }

    /// Glyph of `face` standing for `code_point`, if the face has one
    pub fn glyph_code_of(&self, face: &Face, code_point: u32) -> Option<GlyphCode> {
        if face.is_backup() {
            return face.find_glyph_index(code_point);
        }
        let glyph_code = self.translate(code_point);
        let found = glyph_code != NO_GLYPH_CODE
            && glyph_code != SPACE_CODE
            && (glyph_code as usize) < face.glyph_count();
        found.then_some(glyph_code)
    }

    /// Ligature or kerning between `glyph1` and the following `glyph2`.
    ///
    /// `bypass` replaces the program of `glyph1`. Glyph codes are internal
    /// codes of the face, as returned by [`Font::translate`].
    pub fn lig_kern(
        &self,
        face_idx: usize,
        glyph1: GlyphCode,
        glyph2: GlyphCode,
        bypass: Option<&GlyphLigKern>,
    ) -> LigKernOutcome {
        let Some(face) = self.face(face_idx) else {
            return LigKernOutcome::NoMatch;
        };
        let count = face.glyph_count();
        if glyph1 as usize >= count || glyph2 as usize >= count {
            return LigKernOutcome::NoMatch;
        }

        match (&face.glyphs, bypass) {
            (FaceGlyphs::Current { infos, lig_kerns, .. }, _) => {
                let program = match bypass {
                    Some(program) => program,
                    None => &lig_kerns[glyph1 as usize],
                };
                if program.is_empty() {
                    return LigKernOutcome::NoMatch;
                }
                let mut kern_key = infos[glyph2 as usize].main_code;
                if self.preamble.format == FontFormat::Latin {
                    kern_key &= LATIN_GLYPH_CODE_MASK;
                }
                lig_kern::query(program, glyph2, kern_key)
            }
            (FaceGlyphs::Backup { .. }, Some(program)) => lig_kern::query(program, glyph2, glyph2),
            (FaceGlyphs::Backup { infos, lig_kerns }, None) => {
                let next_code_point = infos[glyph2 as usize].code_point;
                lig_kern::query_backup(&lig_kerns[glyph1 as usize], next_code_point)
                    .map_ligature(|code_point| face.find_glyph_index(code_point))
            }
        }
    }
}
