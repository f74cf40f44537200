//! 3x5 digit font, `'0'..=':'`

use super::{Font, Glyph};

#[rustfmt::skip]
const BITMAP: [u8; 21] = [
    0xF6, 0xDE, // 0
    0x59, 0x2E, // 1
    0xE7, 0xCE, // 2
    0xE7, 0x9E, // 3
    0xB7, 0x92, // 4
    0xF3, 0x9E, // 5
    0xF3, 0xDE, // 6
    0xE4, 0x92, // 7
    0xF7, 0xDE, // 8
    0xF7, 0x9E, // 9
    0x50,       // :
];

const fn digit(index: u16) -> Glyph {
    Glyph {
        bitmap_offset: index * 2,
        width: 3,
        height: 5,
        x_advance: 4,
        x_offset: 0,
        y_offset: -5,
    }
}

const GLYPHS: [Glyph; 11] = [
    digit(0),
    digit(1),
    digit(2),
    digit(3),
    digit(4),
    digit(5),
    digit(6),
    digit(7),
    digit(8),
    digit(9),
    Glyph {
        bitmap_offset: 20,
        width: 1,
        height: 5,
        x_advance: 2,
        x_offset: 0,
        y_offset: -5,
    },
];

/// Digits and colon, 5 pixels tall with the origin on the baseline
pub static DIGITS_3X5: Font<'static> = Font {
    bitmap: &BITMAP,
    glyphs: &GLYPHS,
    first: b'0',
    last: b':',
    y_advance: 6,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(code: u8) -> Vec<String> {
        let glyph = DIGITS_3X5.glyph(code).unwrap();
        let mut rows = vec![vec![b'.'; glyph.width as usize]; glyph.height as usize];
        for (x, y) in DIGITS_3X5.pixels(glyph) {
            rows[y as usize][x as usize] = b'#';
        }
        rows.into_iter()
            .map(|row| String::from_utf8(row).unwrap())
            .collect()
    }

    #[test]
    fn test_digit_shapes() {
        assert_eq!(rows(b'0'), ["###", "#.#", "#.#", "#.#", "###"]);
        assert_eq!(rows(b'1'), [".#.", "##.", ".#.", ".#.", "###"]);
        assert_eq!(rows(b'4'), ["#.#", "#.#", "###", "..#", "..#"]);
        assert_eq!(rows(b'7'), ["###", "..#", "..#", "..#", "..#"]);
        assert_eq!(rows(b':'), [".", "#", ".", "#", "."]);
    }

    #[test]
    fn test_range() {
        assert!(DIGITS_3X5.glyph(b'/').is_none());
        assert!(DIGITS_3X5.glyph(b';').is_none());
        assert_eq!(DIGITS_3X5.glyphs.len(), (b':' - b'0' + 1) as usize);
    }
}
