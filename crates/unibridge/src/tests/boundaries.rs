use alloc::{format, string::String, vec::Vec};

use insta::assert_snapshot;
use rstest::rstest;

use super::arbitrary::EDGE_SCALARS;
use crate::{Validation, utf8_to_utf16, utf16_to_utf8};

#[rstest]
#[case::last_one_byte('\u{7F}', &[0x7F])]
#[case::first_two_byte('\u{80}', &[0xC2, 0x80])]
#[case::last_two_byte('\u{7FF}', &[0xDF, 0xBF])]
#[case::first_three_byte('\u{800}', &[0xE0, 0xA0, 0x80])]
#[case::last_bmp('\u{FFFF}', &[0xEF, 0xBF, 0xBF])]
#[case::first_surrogate_pair('\u{10000}', &[0xF0, 0x90, 0x80, 0x80])]
#[case::last_scalar('\u{10FFFF}', &[0xF4, 0x8F, 0xBF, 0xBF])]
fn boundary_code_points(
    #[case] scalar: char,
    #[case] expected: &[u8],
    #[values(Validation::Trusted, Validation::Strict)] validation: Validation,
) {
    let mut buf = [0_u16; 2];
    let units = scalar.encode_utf16(&mut buf);

    let bytes = utf16_to_utf8(units, validation).unwrap();
    assert_eq!(bytes, expected);
    assert_eq!(utf8_to_utf16(expected, validation).unwrap(), units);
}

#[rstest]
fn boundary_code_points_inside_ascii_runs(
    #[values(0, 1, 2, 3, 4, 5)] prefix: usize,
    #[values(Validation::Trusted, Validation::Strict)] validation: Validation,
) {
    // Shift each boundary scalar across every fast-path alignment.
    for &scalar in EDGE_SCALARS {
        let mut text: String = "x".repeat(prefix);
        text.push(scalar);
        text.push_str("tail");

        let units: Vec<u16> = text.encode_utf16().collect();
        let bytes = utf16_to_utf8(&units, validation).unwrap();
        assert_eq!(bytes, text.as_bytes(), "encoding {scalar:?} after {prefix}");
        assert_eq!(
            utf8_to_utf16(&bytes, validation).unwrap(),
            units,
            "decoding {scalar:?} after {prefix}"
        );
    }
}

fn hex<T: core::fmt::UpperHex>(items: &[T], width: usize) -> String {
    items
        .iter()
        .map(|x| format!("{x:0width$X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn boundary_table() {
    let rendered = EDGE_SCALARS
        .iter()
        .map(|&scalar| {
            let units: Vec<u16> = scalar.encode_utf16(&mut [0; 2]).to_vec();
            let bytes = utf16_to_utf8(&units, Validation::Strict).unwrap();
            format!(
                "U+{:04X}: utf16 [{}] utf8 [{}]",
                u32::from(scalar),
                hex(&units, 4),
                hex(&bytes, 2)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    assert_snapshot!(rendered, @r"
    U+0000: utf16 [0000] utf8 [00]
    U+007F: utf16 [007F] utf8 [7F]
    U+0080: utf16 [0080] utf8 [C2 80]
    U+07FF: utf16 [07FF] utf8 [DF BF]
    U+0800: utf16 [0800] utf8 [E0 A0 80]
    U+D7FF: utf16 [D7FF] utf8 [ED 9F BF]
    U+E000: utf16 [E000] utf8 [EE 80 80]
    U+FFFF: utf16 [FFFF] utf8 [EF BF BF]
    U+10000: utf16 [D800 DC00] utf8 [F0 90 80 80]
    U+1F4A1: utf16 [D83D DCA1] utf8 [F0 9F 92 A1]
    U+10FFFF: utf16 [DBFF DFFF] utf8 [F4 8F BF BF]
    ");
}
