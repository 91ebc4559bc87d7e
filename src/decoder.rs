use crate::{
    buffer::Buffer,
    code_unit::CodeUnit,
    error::{AllocFailure, ErrorRecord, StrictError},
};
use allocator_api2::alloc::Allocator;
use std::{fmt, ops::Range};

/// U+FFFD, substituted for malformed spans in lenient mode.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// How malformed source sequences are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Replace every maximal malformed subpart with U+FFFD and keep going.
    #[default]
    Lenient,
    /// Stop at the first malformed span and report it.
    Strict,
}

/// Lazily decodes a code-unit sequence into code points with their source
/// spans.
#[derive(Clone)]
pub struct Decoder<'src, U> {
    data: &'src [U],
    pos: usize,
    policy: Policy,
}

/// Starts decoding `units` under `policy`.
pub fn decode<U: CodeUnit>(units: &[U], policy: Policy) -> Decoder<'_, U> {
    Decoder {
        data: units,
        pos: 0,
        policy,
    }
}

impl<'src, U: CodeUnit> Decoder<'src, U> {
    /// Returns the number of units that have not been decoded yet.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl<'src, U: CodeUnit> Iterator for Decoder<'src, U> {
    type Item = Result<(char, Range<usize>), ErrorRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.data[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let start = self.pos;
        let (value, len) = U::decode(rest);
        match value {
            Ok(ch) => {
                self.pos += len;
                Some(Ok((ch, start..self.pos)))
            }
            Err(kind) => match self.policy {
                Policy::Lenient => {
                    self.pos += len;
                    log::trace!(
                        "substituting U+FFFD for {} at {}..{}",
                        kind,
                        start,
                        self.pos
                    );
                    Some(Ok((REPLACEMENT_CHARACTER, start..self.pos)))
                }
                Policy::Strict => {
                    self.pos = self.data.len();
                    Some(Err(ErrorRecord {
                        offset: start,
                        kind,
                    }))
                }
            },
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.remaining();
        let lower = match self.policy {
            Policy::Lenient => {
                let per_scalar = (32 / U::BITS) as usize;
                (rest + per_scalar - 1) / per_scalar
            }
            Policy::Strict => rest.min(1),
        };
        (lower, Some(rest))
    }
}

impl<U: CodeUnit> fmt::Debug for Decoder<'_, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("pos", &self.pos)
            .field("remaining", &self.remaining())
            .field("policy", &self.policy)
            .finish()
    }
}

/// A decoded source: the code points of its well-formed prefix (or of all of
/// it, in lenient mode) and the malformed span that ended it, if any.
pub(crate) struct Decoded<A: Allocator> {
    pub(crate) chars: Buffer<char, A>,
    pub(crate) error: Option<ErrorRecord>,
    /// Whether lenient decoding replaced anything.
    pub(crate) substituted: bool,
}

pub(crate) fn decode_all<U: CodeUnit, A: Allocator>(
    units: &[U],
    policy: Policy,
    alloc: A,
) -> Result<Decoded<A>, AllocFailure> {
    let mut chars = Buffer::with_hint_in(units.len(), alloc)?;
    let mut error = None;
    let mut substituted = false;
    for item in decode(units, policy) {
        match item {
            Ok((ch, span)) => {
                if ch == REPLACEMENT_CHARACTER && !is_literal_replacement(units, &span) {
                    substituted = true;
                }
                chars.push(ch)?;
            }
            Err(record) => error = Some(record),
        }
    }
    Ok(Decoded {
        chars,
        error,
        substituted,
    })
}

fn is_literal_replacement<U: CodeUnit>(units: &[U], span: &Range<usize>) -> bool {
    matches!(U::decode(&units[span.clone()]), (Ok(REPLACEMENT_CHARACTER), n) if n == span.len())
}

/// What a pipeline produced, and the malformed span that stopped it early in
/// strict mode.
pub(crate) struct Outcome<T> {
    pub(crate) output: T,
    pub(crate) error: Option<ErrorRecord>,
}

impl<T> Outcome<T> {
    pub(crate) fn into_strict(self) -> Result<T, StrictError<T>> {
        match self.error {
            None => Ok(self.output),
            Some(record) => {
                log::debug!("strict pipeline halted: {}", record);
                Err(StrictError::Malformed {
                    record,
                    partial: self.output,
                })
            }
        }
    }

    pub(crate) fn into_lenient(self) -> T {
        debug_assert!(self.error.is_none(), "lenient decoding reported an error");
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, decode_all, Policy, REPLACEMENT_CHARACTER};
    use crate::error::{ErrorKind, ErrorRecord};
    use allocator_api2::alloc::Global;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spans() {
        let spans = decode("a\u{00E9}\u{1F600}".as_bytes(), Policy::Strict)
            .map(|item| item.unwrap())
            .collect::<Vec<_>>();
        assert_eq!(
            vec![('a', 0..1), ('\u{00E9}', 1..3), ('\u{1F600}', 3..7)],
            spans
        );
    }

    #[test]
    fn test_strict_stops_once() {
        let mut decoder = decode(&[0x41u16, 0xDC00, 0x42], Policy::Strict);
        assert_eq!(Some(Ok(('A', 0..1))), decoder.next());
        assert_eq!(
            Some(Err(ErrorRecord {
                offset: 1,
                kind: ErrorKind::UnpairedSurrogate
            })),
            decoder.next()
        );
        assert_eq!(None, decoder.next());
    }

    #[test]
    fn test_lenient_replaces_maximal_subparts() {
        // E2 82 80 is complete, the second 80 stands alone.
        let chars = decode(&[0x61u8, 0xE2, 0x82, 0x80, 0x80, 0x62], Policy::Lenient)
            .map(|item| item.unwrap().0)
            .collect::<String>();
        assert_eq!("a\u{2080}\u{FFFD}b", chars);

        let chars = decode(&[0x61u8, 0xE2, 0x82, 0x62], Policy::Lenient)
            .map(|item| item.unwrap().0)
            .collect::<String>();
        assert_eq!("a\u{FFFD}b", chars);
    }

    #[test]
    fn test_decode_all_tracks_substitution() {
        let literal = decode_all("x\u{FFFD}".as_bytes(), Policy::Lenient, Global).unwrap();
        assert!(!literal.substituted);
        assert_eq!(&['x', REPLACEMENT_CHARACTER], literal.chars.as_slice());

        let replaced = decode_all(&[0x78u8, 0xFF], Policy::Lenient, Global).unwrap();
        assert!(replaced.substituted);
        assert_eq!(None, replaced.error);

        let halted = decode_all(&[0x78u8, 0xFF, 0x79], Policy::Strict, Global).unwrap();
        assert_eq!(&['x'], halted.chars.as_slice());
        assert_eq!(
            Some(ErrorRecord {
                offset: 1,
                kind: ErrorKind::IllFormedSequence
            }),
            halted.error
        );
    }
}
