//! Byte classification table for lexers, built once on first use.

use std::sync::OnceLock;

use bitflags::bitflags;

use crate::core::{
    range::ValueRange,
    table::{RangeTable, build_range_map},
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharClass: u8 {
        const EXTENDED    = 0x01;
        const CONTROL     = 0x02;
        const WHITESPACE  = 0x04;
        const PUNCTUATION = 0x08;
        const OCT_DIGIT   = 0x10;
        const DEC_DIGIT   = 0x20;
        const HEX_DIGIT   = 0x40;
        const LETTER      = 0x80;
        const ALNUM       = Self::DEC_DIGIT.bits() | Self::LETTER.bits();
        const PRINTABLE   = Self::WHITESPACE.bits() | Self::PUNCTUATION.bits() | Self::ALNUM.bits();
    }
}

/// Declarations in priority order; bytes above 127 keep the default `EXTENDED`.
pub fn ascii_declarations() -> Vec<ValueRange<u8, CharClass>> {
    vec![
        ValueRange::inclusive(0, 31, CharClass::CONTROL),
        ValueRange::inclusive(b'\t', b'\r', CharClass::WHITESPACE),
        ValueRange::single(b' ', CharClass::WHITESPACE),
        ValueRange::inclusive(33, 126, CharClass::PUNCTUATION),
        ValueRange::inclusive(
            b'0',
            b'7',
            CharClass::OCT_DIGIT | CharClass::DEC_DIGIT | CharClass::HEX_DIGIT,
        ),
        ValueRange::inclusive(b'8', b'9', CharClass::DEC_DIGIT | CharClass::HEX_DIGIT),
        ValueRange::inclusive(b'A', b'F', CharClass::LETTER | CharClass::HEX_DIGIT),
        ValueRange::inclusive(b'G', b'Z', CharClass::LETTER),
        ValueRange::inclusive(b'a', b'f', CharClass::LETTER | CharClass::HEX_DIGIT),
        ValueRange::inclusive(b'g', b'z', CharClass::LETTER),
        ValueRange::single(127, CharClass::CONTROL),
    ]
}

static ASCII_TABLE: OnceLock<RangeTable<u8, CharClass>> = OnceLock::new();

#[inline]
pub fn ascii_table() -> &'static RangeTable<u8, CharClass> {
    ASCII_TABLE.get_or_init(|| {
        build_range_map(CharClass::EXTENDED, ascii_declarations())
            .expect("ascii declarations are within the u8 domain and non-empty")
    })
}

#[inline]
pub fn classify(byte: u8) -> CharClass {
    *ascii_table().lookup(byte)
}

#[inline]
pub fn is_alpha(byte: u8) -> bool {
    classify(byte).intersects(CharClass::LETTER)
}

#[inline]
pub fn is_digit(byte: u8) -> bool {
    classify(byte).intersects(CharClass::DEC_DIGIT)
}

#[inline]
pub fn is_oct_digit(byte: u8) -> bool {
    classify(byte).intersects(CharClass::OCT_DIGIT)
}

#[inline]
pub fn is_hex_digit(byte: u8) -> bool {
    classify(byte).intersects(CharClass::HEX_DIGIT)
}

#[inline]
pub fn is_alnum(byte: u8) -> bool {
    classify(byte).intersects(CharClass::ALNUM)
}

#[inline]
pub fn is_punct(byte: u8) -> bool {
    classify(byte) == CharClass::PUNCTUATION
}

#[inline]
pub fn is_space(byte: u8) -> bool {
    classify(byte) == CharClass::WHITESPACE
}

#[inline]
pub fn is_control(byte: u8) -> bool {
    classify(byte) == CharClass::CONTROL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters() {
        assert!(is_alpha(b'a'));
        assert!(is_alpha(b'Z'));
        assert!(!is_alpha(b'0'));
        assert!(!is_alpha(b'['));
    }

    #[test]
    fn digits() {
        assert!(is_digit(b'0'));
        assert!(is_digit(b'9'));
        assert!(!is_digit(b'a'));

        assert!(is_oct_digit(b'0'));
        assert!(is_oct_digit(b'7'));
        assert!(!is_oct_digit(b'8'));

        assert!(is_hex_digit(b'0'));
        assert!(is_hex_digit(b'a'));
        assert!(is_hex_digit(b'F'));
        assert!(!is_hex_digit(b'z'));
        assert!(!is_hex_digit(b'G'));
    }

    #[test]
    fn punctuation_whitespace_control() {
        assert!(is_punct(b'@'));
        assert!(is_punct(b'~'));
        assert!(is_punct(b'!'));
        assert!(!is_punct(b'a'));

        assert!(is_space(b' '));
        assert!(is_space(b'\t'));
        assert!(is_space(b'\r'));
        assert!(!is_space(b'\0'));

        assert!(is_control(b'\0'));
        assert!(is_control(31));
        assert!(is_control(127));
        assert!(!is_control(b'\t'));
    }

    #[test]
    fn alnum_and_extended() {
        assert!(is_alnum(b'q'));
        assert!(is_alnum(b'5'));
        assert!(!is_alnum(b'-'));
        assert_eq!(classify(128), CharClass::EXTENDED);
        assert_eq!(classify(255), CharClass::EXTENDED);
    }

    #[test]
    fn table_is_built_once() {
        assert!(std::ptr::eq(ascii_table(), ascii_table()));
        assert_eq!(ascii_table().starts()[0], 0);
        assert_eq!(*ascii_table().lookup(200), CharClass::EXTENDED);
    }
}
