mod common;

use common::*;
use ibmf::{Difference, Font, diff_fonts, show::Side};

fn load(spec: &FontSpec) -> Font {
    Font::load(&build(spec)).unwrap()
}

fn latin1_font(point_sizes: &[u8]) -> FontSpec {
    let faces = point_sizes
        .iter()
        .map(|&point_size| face(point_size, glyphs_for("abcde")))
        .collect();
    utf32_font(&[(0x61, 0x65)], faces)
}

#[test]
fn test_identical_fonts_have_no_differences() {
    let data = build(&latin1_font(&[10, 12]));
    let a = Font::load(&data).unwrap();
    let b = Font::load(&data).unwrap();

    let report = diff_fonts(&a, &b);
    assert_eq!(report.count(), 0);
    assert!(report.to_string().ends_with("Completed. Number of differences found: 0.\n"));
}

#[test]
fn test_face_count_difference() {
    let a = load(&latin1_font(&[10, 12]));
    let b = load(&latin1_font(&[10, 12, 14]));

    let report = diff_fonts(&a, &b);
    let face_count: Vec<_> = report
        .differences
        .iter()
        .filter(|d| matches!(d, Difference::FaceCount { .. }))
        .collect();
    assert_eq!(face_count, vec![&Difference::FaceCount { a: 2, b: 3 }]);
    assert_eq!(report.differences[0], Difference::FaceCount { a: 2, b: 3 });

    // The extra face is also missing from A
    assert_eq!(
        report.differences[1],
        Difference::FaceNotFound {
            missing_in: Side::A,
            point_size: 14
        }
    );
    assert_eq!(report.count(), 2);
}

#[test]
fn test_missing_code_points_are_reported_both_ways() {
    let a = load(&utf32_font(&[(0x61, 0x64)], vec![face(10, glyphs_for("abcd"))]));
    let b = load(&utf32_font(
        &[(0x61, 0x62), (0x64, 0x65)],
        vec![face(10, glyphs_for("abde"))],
    ));

    let report = diff_fonts(&a, &b);
    let missing: Vec<_> = report
        .differences
        .iter()
        .filter(|d| matches!(d, Difference::CodePointNotFound { .. }))
        .cloned()
        .collect();
    assert_eq!(
        missing,
        vec![
            Difference::CodePointNotFound {
                missing_in: Side::B,
                point_size: 10,
                code_point: 0x63
            },
            Difference::CodePointNotFound {
                missing_in: Side::A,
                point_size: 10,
                code_point: 0x65
            },
        ]
    );
    // 'd' moved from glyph code 3 to 2, and its main code with it
    assert!(matches!(
        report.differences[1],
        Difference::GlyphMetrics { code_point: 0x64, .. }
    ));
    assert_eq!(report.count(), 3);

    let text = report.to_string();
    assert!(text.contains("----- Face with pointSize 10\n> CodePoint not found: U+00063\n"));
    assert!(text.contains("----- Face with pointSize 10\n< CodePoint not found: U+00065\n"));
}

#[test]
fn test_glyph_differences_are_independent() {
    let a_spec = latin1_font(&[10]);
    let mut b_spec = a_spec.clone();
    // Different advance only
    b_spec.faces[0].glyphs[0].advance += 64;
    // Different pixels only, same packet length
    b_spec.faces[0].glyphs[1].rows[1] = "XX..X".to_string();
    // Different lig/kern program only
    b_spec.faces[0].glyphs[2].lig_kern_pgm_index = 0;
    b_spec.faces[0].lig_kern_steps = vec![kern_step(0, -32, true)];

    let a = load(&a_spec);
    let b = load(&b_spec);
    let report = diff_fonts(&a, &b);

    // The lig/kern step count is part of the face header
    assert!(matches!(report.differences[0], Difference::FaceHeader { .. }));
    assert!(matches!(
        report.differences[1],
        Difference::GlyphMetrics { code_point: 0x61, .. }
    ));
    assert!(matches!(
        report.differences[2],
        Difference::GlyphPixels { code_point: 0x62, .. }
    ));
    // Glyph 'c' differs in its program index and its resolved program
    assert!(matches!(
        report.differences[3],
        Difference::GlyphMetrics { code_point: 0x63, .. }
    ));
    assert!(matches!(
        report.differences[4],
        Difference::GlyphLigKern { code_point: 0x63, .. }
    ));
    assert_eq!(report.count(), 5);

    let text = report.to_string();
    assert!(text.contains("----- Face headers with pointSize 10 differ:\n< DPI: 150,"));
    assert!(text.contains("----- Glyph Pixels differ for codePoint U+00062 of pointSize 10\n"));
    assert!(text.contains("> [0]: NxtGlyphCode: 0, Kern: -0.5\n"));
    assert!(text.ends_with("Completed. Number of differences found: 5.\n"));
}

#[test]
fn test_glyphs_pair_by_code_point() {
    // Same glyphs, but B splits the code point range over two bundles
    let a = load(&utf32_font(&[(0x61, 0x63)], vec![face(10, glyphs_for("abc"))]));
    let b = load(&utf32_font(
        &[(0x61, 0x61), (0x62, 0x63)],
        vec![face(10, glyphs_for("abc"))],
    ));
    assert_eq!(diff_fonts(&a, &b).count(), 0);
}

#[test]
fn test_missing_face() {
    let a = load(&latin1_font(&[10, 12]));
    let b = load(&latin1_font(&[10, 14]));

    let report = diff_fonts(&a, &b);
    assert_eq!(
        report.differences,
        vec![
            Difference::FaceNotFound {
                missing_in: Side::B,
                point_size: 12
            },
            Difference::FaceNotFound {
                missing_in: Side::A,
                point_size: 14
            },
        ]
    );
}
