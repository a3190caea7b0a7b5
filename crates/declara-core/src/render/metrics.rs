//! Glyph widths for the standard Helvetica font and WinAnsi text encoding.
//!
//! Widths are in 1/1000 text-space units, taken from the Adobe Core 14 AFM
//! for Helvetica.

/// Widths for ASCII 32..=126.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Widths for Latin-1 0xA0..=0xFF.
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0..AF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0..BF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0..CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0..DF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // E0..EF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // F0..FF
];

/// Width used for anything without a metric (rendered as `?`).
const FALLBACK_WIDTH: u16 = 556;

/// Map a character to its WinAnsiEncoding byte, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8),
        '\u{a0}'..='\u{ff}' => Some(c as u32 as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        _ => None,
    }
}

/// Encode text for a WinAnsi simple font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

fn glyph_width(c: char) -> u16 {
    match win_ansi_byte(c) {
        Some(b @ 0x20..=0x7e) => HELVETICA_ASCII[(b - 0x20) as usize],
        Some(b @ 0xa0..=0xff) => HELVETICA_LATIN1[(b - 0xa0) as usize],
        Some(0x85) => 1000,
        Some(0x91 | 0x92 | 0x82) => 222,
        Some(0x93 | 0x94 | 0x84) => 333,
        Some(0x95) => 350,
        Some(0x97) => 1000,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points when set in Helvetica at `size`.
pub fn helvetica_width(text: &str, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c))).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_widths() {
        assert_eq!(helvetica_width(" ", 1000.0), 278.0);
        assert_eq!(helvetica_width("A", 1000.0), 667.0);
        assert_eq!(helvetica_width("i", 1000.0), 222.0);
        assert_eq!(helvetica_width("W", 1000.0), 944.0);
    }

    #[test]
    fn test_width_scales_with_size() {
        // "Rua" = 722 + 556 + 556
        assert!((helvetica_width("Rua", 10.0) - 18.34).abs() < 1e-4);
    }

    #[test]
    fn test_accented_widths_match_base_letters() {
        assert_eq!(helvetica_width("ã", 10.0), helvetica_width("a", 10.0));
        assert_eq!(helvetica_width("Ç", 10.0), helvetica_width("C", 10.0));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("São"), vec![b'S', 0xe3, b'o']);
        assert_eq!(encode_win_ansi("a✓b"), b"a?b".to_vec());
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
    }
}
