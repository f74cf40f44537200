//! 3x5 printable ASCII font, `' '..='~'`
//!
//! Lowercase letters reuse the uppercase shapes.

use super::{Font, Glyph};

#[rustfmt::skip]
const BITMAP: [u8; 129] = [
    0xE8,        // !
    0xB4, 0x00,  // double quote
    0xBE, 0xFA,  // #
    0x79, 0x3C,  // $
    0xA5, 0x4A,  // %
    0x55, 0x56,  // &
    0xC0,        // quote
    0x6A, 0x40,  // (
    0x95, 0x80,  // )
    0x15, 0x50,  // *
    0x0B, 0xA0,  // +
    0x18,        // ,
    0x03, 0x80,  // -
    0x08,        // .
    0x25, 0x48,  // /
    0xF6, 0xDE,  // 0
    0x59, 0x2E,  // 1
    0xE7, 0xCE,  // 2
    0xE7, 0x9E,  // 3
    0xB7, 0x92,  // 4
    0xF3, 0x9E,  // 5
    0xF3, 0xDE,  // 6
    0xE4, 0x92,  // 7
    0xF7, 0xDE,  // 8
    0xF7, 0x9E,  // 9
    0x50,        // :
    0x58,        // ;
    0x2A, 0x22,  // <
    0x1C, 0x70,  // =
    0x88, 0xA8,  // >
    0xE5, 0x84,  // ?
    0x57, 0xC6,  // @
    0x57, 0xDA,  // A
    0xD7, 0x5C,  // B
    0x72, 0x46,  // C
    0xD6, 0xDC,  // D
    0xF3, 0x4E,  // E
    0xF3, 0x48,  // F
    0x72, 0xD6,  // G
    0xB7, 0xDA,  // H
    0xE9, 0x2E,  // I
    0x24, 0xD4,  // J
    0xB7, 0x5A,  // K
    0x92, 0x4E,  // L
    0xBF, 0xDA,  // M
    0xBF, 0xFA,  // N
    0x56, 0xD4,  // O
    0xD7, 0x48,  // P
    0x56, 0xF6,  // Q
    0xD7, 0x5A,  // R
    0x71, 0x1C,  // S
    0xE9, 0x24,  // T
    0xB6, 0xD6,  // U
    0xB6, 0xA4,  // V
    0xB7, 0xFA,  // W
    0xB5, 0x5A,  // X
    0xB5, 0x24,  // Y
    0xE5, 0x4E,  // Z
    0xEA, 0xC0,  // [
    0x91, 0x12,  // backslash
    0xD5, 0xC0,  // ]
    0x54, 0x00,  // ^
    0x00, 0x0E,  // _
    0x90, 0x00,  // `
    0x6B, 0x26,  // {
    0xF8,        // |
    0xC9, 0xAC,  // }
    0x19, 0x80,  // ~
];

const fn glyph(bitmap_offset: u16, width: u8) -> Glyph {
    Glyph {
        bitmap_offset,
        width,
        height: 5,
        x_advance: width + 1,
        x_offset: 0,
        y_offset: -5,
    }
}

#[rustfmt::skip]
const GLYPHS: [Glyph; 95] = [
    // space
    Glyph { bitmap_offset: 0, width: 0, height: 0, x_advance: 4, x_offset: 0, y_offset: 0 },
    glyph(0, 1), // !
    glyph(1, 3), // double quote
    glyph(3, 3), // #
    glyph(5, 3), // $
    glyph(7, 3), // %
    glyph(9, 3), // &
    glyph(11, 1), // quote
    glyph(12, 2), // (
    glyph(14, 2), // )
    glyph(16, 3), // *
    glyph(18, 3), // +
    glyph(20, 1), // ,
    glyph(21, 3), // -
    glyph(23, 1), // .
    glyph(24, 3), // /
    glyph(26, 3), // 0
    glyph(28, 3), // 1
    glyph(30, 3), // 2
    glyph(32, 3), // 3
    glyph(34, 3), // 4
    glyph(36, 3), // 5
    glyph(38, 3), // 6
    glyph(40, 3), // 7
    glyph(42, 3), // 8
    glyph(44, 3), // 9
    glyph(46, 1), // :
    glyph(47, 1), // ;
    glyph(48, 3), // <
    glyph(50, 3), // =
    glyph(52, 3), // >
    glyph(54, 3), // ?
    glyph(56, 3), // @
    glyph(58, 3), // A
    glyph(60, 3), // B
    glyph(62, 3), // C
    glyph(64, 3), // D
    glyph(66, 3), // E
    glyph(68, 3), // F
    glyph(70, 3), // G
    glyph(72, 3), // H
    glyph(74, 3), // I
    glyph(76, 3), // J
    glyph(78, 3), // K
    glyph(80, 3), // L
    glyph(82, 3), // M
    glyph(84, 3), // N
    glyph(86, 3), // O
    glyph(88, 3), // P
    glyph(90, 3), // Q
    glyph(92, 3), // R
    glyph(94, 3), // S
    glyph(96, 3), // T
    glyph(98, 3), // U
    glyph(100, 3), // V
    glyph(102, 3), // W
    glyph(104, 3), // X
    glyph(106, 3), // Y
    glyph(108, 3), // Z
    glyph(110, 2), // [
    glyph(112, 3), // backslash
    glyph(114, 2), // ]
    glyph(116, 3), // ^
    glyph(118, 3), // _
    glyph(120, 2), // `
    glyph(58, 3), // a
    glyph(60, 3), // b
    glyph(62, 3), // c
    glyph(64, 3), // d
    glyph(66, 3), // e
    glyph(68, 3), // f
    glyph(70, 3), // g
    glyph(72, 3), // h
    glyph(74, 3), // i
    glyph(76, 3), // j
    glyph(78, 3), // k
    glyph(80, 3), // l
    glyph(82, 3), // m
    glyph(84, 3), // n
    glyph(86, 3), // o
    glyph(88, 3), // p
    glyph(90, 3), // q
    glyph(92, 3), // r
    glyph(94, 3), // s
    glyph(96, 3), // t
    glyph(98, 3), // u
    glyph(100, 3), // v
    glyph(102, 3), // w
    glyph(104, 3), // x
    glyph(106, 3), // y
    glyph(108, 3), // z
    glyph(122, 3), // {
    glyph(124, 1), // |
    glyph(125, 3), // }
    glyph(127, 3), // ~
];

/// Printable ASCII, 5 pixels tall with the origin on the baseline
pub static ASCII_3X5: Font<'static> = Font {
    bitmap: &BITMAP,
    glyphs: &GLYPHS,
    first: b' ',
    last: b'~',
    y_advance: 6,
};
