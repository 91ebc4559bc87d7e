use crate::error::ErrorKind;

pub(crate) const MAX_BYTE_COUNT: usize = 4;

const TAG_CONT: u8 = 0b1000_0000;
const TAG_TWO_B: u8 = 0b1100_0000;
const TAG_THREE_B: u8 = 0b1110_0000;
const TAG_FOUR_B: u8 = 0b1111_0000;
const END_ONE_B: u32 = 0x80;
const END_TWO_B: u32 = 0x800;
const END_THREE_B: u32 = 0x10000;

const CONT_PREFIX_MASK: u8 = 0b1100_0000;
const CONT_VALUE_MASK: u8 = 0b0011_1111;

pub(crate) fn len(ch: char) -> usize {
    let code = ch as u32;
    if code < END_ONE_B {
        1
    } else if code < END_TWO_B {
        2
    } else if code < END_THREE_B {
        3
    } else {
        4
    }
}

#[inline]
pub(crate) fn is_cont_byte(v: u8) -> bool {
    (v & CONT_PREFIX_MASK) == TAG_CONT
}

/// Number of continuation bytes a lead byte announces, with the range the
/// first continuation byte must fall in. Ranges narrower than `80..=BF`
/// exclude overlongs, surrogates and values past U+10FFFF.
fn lead_byte_shape(v: u8) -> Option<(usize, u8, u8)> {
    match v {
        0xC2..=0xDF => Some((1, 0x80, 0xBF)),
        0xE0 => Some((2, 0xA0, 0xBF)),
        0xE1..=0xEC | 0xEE..=0xEF => Some((2, 0x80, 0xBF)),
        0xED => Some((2, 0x80, 0x9F)),
        0xF0 => Some((3, 0x90, 0xBF)),
        0xF1..=0xF3 => Some((3, 0x80, 0xBF)),
        0xF4 => Some((3, 0x80, 0x8F)),
        _ => None,
    }
}

pub(crate) fn encode_utf8(ch: char, buf: &mut [u8; MAX_BYTE_COUNT]) -> usize {
    let code = ch as u32;
    let len = len(ch);
    match (len, &mut buf[..]) {
        (1, [a, ..]) => {
            *a = code as u8;
        }
        (2, [a, b, ..]) => {
            *a = (code >> 6 & 0x1F) as u8 | TAG_TWO_B;
            *b = (code & 0x3F) as u8 | TAG_CONT;
        }
        (3, [a, b, c, ..]) => {
            *a = (code >> 12 & 0x0F) as u8 | TAG_THREE_B;
            *b = (code >> 6 & 0x3F) as u8 | TAG_CONT;
            *c = (code & 0x3F) as u8 | TAG_CONT;
        }
        (4, [a, b, c, d]) => {
            *a = (code >> 18 & 0x07) as u8 | TAG_FOUR_B;
            *b = (code >> 12 & 0x3F) as u8 | TAG_CONT;
            *c = (code >> 6 & 0x3F) as u8 | TAG_CONT;
            *d = (code & 0x3F) as u8 | TAG_CONT;
        }
        _ => unreachable!(),
    };
    len
}

#[inline]
fn utf8_first_byte(byte: u8, cont_len: usize) -> u32 {
    (byte & (0x7F >> (cont_len + 1))) as u32
}

#[inline]
fn utf8_acc_cont_byte(ch: u32, byte: u8) -> u32 {
    (ch << 6) | (byte & CONT_VALUE_MASK) as u32
}

/// Decodes the scalar value at the start of `bytes`.
///
/// Returns the decoded value and the number of bytes it spans. On failure the
/// span is the maximal subpart of an ill-formed sequence: the longest prefix
/// that could still have started a well-formed one, or the single offending
/// byte when no prefix qualifies.
pub(crate) fn decode_utf8(bytes: &[u8]) -> (Result<char, ErrorKind>, usize) {
    let head = match bytes.first() {
        Some(&head) => head,
        None => return (Err(ErrorKind::IllFormedSequence), 0),
    };
    if head < 0x80 {
        return (Ok(head as char), 1);
    }
    let (cont_len, lower, upper) = match lead_byte_shape(head) {
        Some(shape) => shape,
        None => return (Err(ErrorKind::IllFormedSequence), 1),
    };
    let mut value = utf8_first_byte(head, cont_len);
    for idx in 1..=cont_len {
        let byte = match bytes.get(idx) {
            Some(&byte) => byte,
            None => return (Err(ErrorKind::IllFormedSequence), idx),
        };
        let in_range = if idx == 1 {
            (lower..=upper).contains(&byte)
        } else {
            is_cont_byte(byte)
        };
        if !in_range {
            return (Err(ErrorKind::IllFormedSequence), idx);
        }
        value = utf8_acc_cont_byte(value, byte);
    }
    match char::from_u32(value) {
        Some(ch) => (Ok(ch), cont_len + 1),
        None => (Err(ErrorKind::IllFormedSequence), cont_len + 1),
    }
}
