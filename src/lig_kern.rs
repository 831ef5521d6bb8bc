//! Ligature and kerning programs
//!
//! Each face stores one array of [`LigKernStep`]s shared by all of its glyphs.
//! A glyph's program starts at its `lig_kern_pgm_index`. When the entry found
//! there is a goto, the program really starts at the goto's displacement.
//! Steps are then read in order up to and including the first one carrying
//! the stop bit.

use crate::types::{
    BackupGlyphLigKern, Fix16, GlyphCode, GlyphKernStep, GlyphLigKern, GlyphLigStep, LigKernStep,
    sign_extend_kern,
};

/// Result of looking up a pair of glyphs in the first glyph's program
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LigKernOutcome<R = GlyphCode> {
    /// The pair is replaced by this glyph
    Ligature(R),
    /// Space to add between the two glyphs, in 1/64 pixels
    Kern(Fix16),
    NoMatch,
}

impl<R> LigKernOutcome<R> {
    pub fn map_ligature<S>(self, f: impl FnOnce(R) -> Option<S>) -> LigKernOutcome<S> {
        match self {
            Self::Ligature(replacement) => match f(replacement) {
                Some(replacement) => LigKernOutcome::Ligature(replacement),
                None => LigKernOutcome::NoMatch,
            },
            Self::Kern(kern) => LigKernOutcome::Kern(kern),
            Self::NoMatch => LigKernOutcome::NoMatch,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ScanState {
    SeekingRedirect(usize),
    Scanning(usize),
    Done,
}

/// Collect the ligature and kerning steps of the program starting at `start`.
///
/// Reading stops at the step with the stop bit or at the end of `steps`,
/// whichever comes first. At most one goto is followed.
pub fn resolve_program(steps: &[LigKernStep], start: usize) -> GlyphLigKern {
    let mut resolved = GlyphLigKern::default();
    let mut state = ScanState::SeekingRedirect(start);

    loop {
        state = match state {
            ScanState::SeekingRedirect(idx) => match steps.get(idx) {
                Some(step) if step.is_goto() => ScanState::Scanning(step.displacement() as usize),
                Some(_) => ScanState::Scanning(idx),
                None => ScanState::Done,
            },
            ScanState::Scanning(idx) => match steps.get(idx) {
                Some(step) => {
                    if step.is_kern() {
                        resolved.kern_steps.push(GlyphKernStep {
                            next_glyph_code: step.next_glyph_code(),
                            kern: step.kerning_value(),
                        });
                    } else {
                        resolved.lig_steps.push(GlyphLigStep {
                            next_glyph_code: step.next_glyph_code(),
                            replacement_glyph_code: step.replacement_glyph_code(),
                        });
                    }
                    if step.is_stop() {
                        ScanState::Done
                    } else {
                        ScanState::Scanning(idx + 1)
                    }
                }
                None => ScanState::Done,
            },
            ScanState::Done => break,
        };
    }

    log::trace!(
        "lig/kern program at {start}: {} ligatures, {} kerns",
        resolved.lig_steps.len(),
        resolved.kern_steps.len()
    );
    resolved
}

/// Look up `next` in `program`.
///
/// Ligatures are matched on `next` itself and take precedence. Kerns are
/// matched on `kern_key`, the main code of the next glyph.
pub fn query(program: &GlyphLigKern, next: GlyphCode, kern_key: GlyphCode) -> LigKernOutcome {
    if let Some(lig) = program
        .lig_steps
        .iter()
        .find(|lig| lig.next_glyph_code == next)
    {
        return LigKernOutcome::Ligature(lig.replacement_glyph_code);
    }
    program
        .kern_steps
        .iter()
        .find(|kern| kern.next_glyph_code == kern_key)
        .map_or(LigKernOutcome::NoMatch, |kern| {
            LigKernOutcome::Kern(sign_extend_kern(kern.kern))
        })
}

/// [`query`] over the inline lists of a BACKUP glyph, keyed by code point
pub fn query_backup(program: &BackupGlyphLigKern, next_code_point: u32) -> LigKernOutcome<u32> {
    if let Some(lig) = program
        .lig_steps
        .iter()
        .find(|lig| lig.next_code_point == next_code_point)
    {
        return LigKernOutcome::Ligature(lig.replacement_code_point);
    }
    program
        .kern_steps
        .iter()
        .find(|kern| kern.next_code_point == next_code_point)
        .map_or(LigKernOutcome::NoMatch, |kern| LigKernOutcome::Kern(kern.kern))
}
