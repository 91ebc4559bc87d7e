use crate::{buffer::Buffer, error::AllocFailure, error::ErrorKind, utf8};
use allocator_api2::alloc::Allocator;
use std::fmt;

const HIGH_SURROGATE: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATE: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// One storage element of a UTF encoding: `u8` for UTF-8, `u16` for UTF-16,
/// `u32` for UTF-32.
pub trait CodeUnit: Copy + Eq + fmt::Debug + sealed::Sealed + 'static {
    /// Bits per unit.
    const BITS: u32;

    /// Decodes the scalar value at the start of a non-empty `units`, returning
    /// it with the number of units it spans. Malformed spans are minimal:
    /// a later unit that cannot continue the sequence is not consumed.
    fn decode(units: &[Self]) -> (Result<char, ErrorKind>, usize);

    /// Appends the encoding of `ch`.
    fn encode<A: Allocator>(ch: char, out: &mut Buffer<Self, A>) -> Result<(), AllocFailure>;

    /// How many units `ch` takes.
    fn encoded_len(ch: char) -> usize;
}

impl CodeUnit for u8 {
    const BITS: u32 = 8;

    #[inline]
    fn decode(units: &[Self]) -> (Result<char, ErrorKind>, usize) {
        utf8::decode_utf8(units)
    }

    #[inline]
    fn encode<A: Allocator>(ch: char, out: &mut Buffer<Self, A>) -> Result<(), AllocFailure> {
        if ch.is_ascii() {
            return out.push(ch as u8);
        }
        let mut buf = [0; utf8::MAX_BYTE_COUNT];
        let len = utf8::encode_utf8(ch, &mut buf);
        out.extend_from_slice(&buf[..len])
    }

    #[inline]
    fn encoded_len(ch: char) -> usize {
        utf8::len(ch)
    }
}

impl CodeUnit for u16 {
    const BITS: u32 = 16;

    fn decode(units: &[Self]) -> (Result<char, ErrorKind>, usize) {
        let head = match units.first() {
            Some(&head) => u32::from(head),
            None => return (Err(ErrorKind::IllFormedSequence), 0),
        };
        if HIGH_SURROGATE.contains(&head) {
            match units.get(1).map(|&u| u32::from(u)) {
                Some(tail) if LOW_SURROGATE.contains(&tail) => {
                    let code = 0x10000 + ((head - 0xD800) << 10) + (tail - 0xDC00);
                    match char::from_u32(code) {
                        Some(ch) => (Ok(ch), 2),
                        None => (Err(ErrorKind::IllFormedSequence), 2),
                    }
                }
                _ => (Err(ErrorKind::UnpairedSurrogate), 1),
            }
        } else if LOW_SURROGATE.contains(&head) {
            (Err(ErrorKind::UnpairedSurrogate), 1)
        } else {
            match char::from_u32(head) {
                Some(ch) => (Ok(ch), 1),
                None => (Err(ErrorKind::IllFormedSequence), 1),
            }
        }
    }

    #[inline]
    fn encode<A: Allocator>(ch: char, out: &mut Buffer<Self, A>) -> Result<(), AllocFailure> {
        let mut buf = [0; 2];
        out.extend_from_slice(ch.encode_utf16(&mut buf))
    }

    #[inline]
    fn encoded_len(ch: char) -> usize {
        ch.len_utf16()
    }
}

impl CodeUnit for u32 {
    const BITS: u32 = 32;

    fn decode(units: &[Self]) -> (Result<char, ErrorKind>, usize) {
        match units.first() {
            None => (Err(ErrorKind::IllFormedSequence), 0),
            Some(&unit) => match char::from_u32(unit) {
                Some(ch) => (Ok(ch), 1),
                None if HIGH_SURROGATE.contains(&unit) || LOW_SURROGATE.contains(&unit) => {
                    (Err(ErrorKind::UnpairedSurrogate), 1)
                }
                None => (Err(ErrorKind::IllFormedSequence), 1),
            },
        }
    }

    #[inline]
    fn encode<A: Allocator>(ch: char, out: &mut Buffer<Self, A>) -> Result<(), AllocFailure> {
        out.push(ch as u32)
    }

    #[inline]
    fn encoded_len(_ch: char) -> usize {
        1
    }
}

/// Appends the encoding of every code point in `chars`.
pub(crate) fn encode_all<U: CodeUnit, A: Allocator>(
    chars: &[char],
    out: &mut Buffer<U, A>,
) -> Result<(), AllocFailure> {
    out.reserve(chars.len())?;
    for &ch in chars {
        U::encode(ch, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CodeUnit;
    use crate::{buffer::Buffer, error::ErrorKind};
    use allocator_api2::alloc::Global;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_utf16_pairs() {
        assert_eq!((Ok('\u{1F600}'), 2), u16::decode(&[0xD83D, 0xDE00]));
        assert_eq!(
            (Err(ErrorKind::UnpairedSurrogate), 1),
            u16::decode(&[0xD83D, 0x0041])
        );
        assert_eq!((Err(ErrorKind::UnpairedSurrogate), 1), u16::decode(&[0xD83D]));
        assert_eq!((Err(ErrorKind::UnpairedSurrogate), 1), u16::decode(&[0xDE00]));
        assert_eq!((Ok('\u{FFFF}'), 1), u16::decode(&[0xFFFF]));
    }

    #[test]
    fn test_utf32_scalars() {
        assert_eq!((Ok('\u{10FFFF}'), 1), u32::decode(&[0x10FFFF]));
        assert_eq!((Err(ErrorKind::UnpairedSurrogate), 1), u32::decode(&[0xDFFF]));
        assert_eq!((Err(ErrorKind::IllFormedSequence), 1), u32::decode(&[0x110000]));
    }

    #[test]
    fn test_encode_widths() {
        let mut out8 = Buffer::with_hint_in(0, Global).unwrap();
        let mut out16 = Buffer::with_hint_in(0, Global).unwrap();
        let mut out32 = Buffer::with_hint_in(0, Global).unwrap();
        for ch in ['a', '\u{FFFD}', '\u{1F600}'] {
            u8::encode(ch, &mut out8).unwrap();
            u16::encode(ch, &mut out16).unwrap();
            u32::encode(ch, &mut out32).unwrap();
            assert_eq!(ch.len_utf8(), u8::encoded_len(ch));
            assert_eq!(ch.len_utf16(), u16::encoded_len(ch));
        }
        assert_eq!("a\u{FFFD}\u{1F600}".as_bytes(), out8.as_slice());
        assert_eq!(&[0x61, 0xFFFD, 0xD83D, 0xDE00], out16.as_slice());
        assert_eq!(&[0x61, 0xFFFD, 0x1F600], out32.as_slice());
    }
}
