//! Conversions between UTF-8, UTF-16 and UTF-32.
//!
//! Everything here is lenient: malformed input is repaired with U+FFFD and
//! the only possible failure is the memory strategy refusing storage. See
//! [`crate::strict`] for the reporting variants.

use crate::{
    buffer::{Buffer, Units},
    code_unit::CodeUnit,
    decoder::{decode, Outcome, Policy},
    error::AllocFailure,
};
use allocator_api2::alloc::Allocator;

pub(crate) fn transcode_with<W1: CodeUnit, W2: CodeUnit, A: Allocator>(
    input: &[W1],
    policy: Policy,
    alloc: A,
) -> Result<Outcome<Units<W2, A>>, AllocFailure> {
    let mut out = Buffer::with_hint_in(input.len(), alloc)?;
    let mut error = None;
    for item in decode(input, policy) {
        match item {
            Ok((ch, _)) => W2::encode(ch, &mut out)?,
            Err(record) => error = Some(record),
        }
    }
    Ok(Outcome {
        output: out.into_units(),
        error,
    })
}

/// Transcodes `input` from the encoding of `W1` to the encoding of `W2`,
/// replacing malformed spans with U+FFFD.
pub fn transcode<W1: CodeUnit, W2: CodeUnit, A: Allocator>(
    input: &[W1],
    alloc: A,
) -> Result<Units<W2, A>, AllocFailure> {
    transcode_with(input, Policy::Lenient, alloc).map(Outcome::into_lenient)
}

macro_rules! lenient_transcoders {
    ($($name:ident: $from:ty => $to:ty, $doc:literal;)*) => {$(
        #[doc = $doc]
        pub fn $name<A: Allocator>(
            input: &[$from],
            alloc: A,
        ) -> Result<Units<$to, A>, AllocFailure> {
            transcode(input, alloc)
        }
    )*};
}

lenient_transcoders! {
    utf8_to_utf16: u8 => u16, "UTF-8 to UTF-16, replacing malformed spans with U+FFFD.";
    utf8_to_utf32: u8 => u32, "UTF-8 to UTF-32, replacing malformed spans with U+FFFD.";
    utf16_to_utf8: u16 => u8, "UTF-16 to UTF-8, replacing unpaired surrogates with U+FFFD.";
    utf16_to_utf32: u16 => u32, "UTF-16 to UTF-32, replacing unpaired surrogates with U+FFFD.";
    utf32_to_utf8: u32 => u8, "UTF-32 to UTF-8, replacing invalid units with U+FFFD.";
    utf32_to_utf16: u32 => u16, "UTF-32 to UTF-16, replacing invalid units with U+FFFD.";
}
