//! Pipelines that stop at the first malformed span.
//!
//! Each function here mirrors a lenient one but, instead of substituting
//! U+FFFD, reports where decoding failed and why. The output for the
//! well-formed prefix of the source is handed back in
//! [`StrictError::Malformed`].

#[cfg(feature = "break-word")]
use crate::word_break::WordBreaker;
use crate::{
    buffer::Units,
    case_map::{CaseMapping, Variant},
    code_unit::CodeUnit,
    conv,
    decoder::Policy,
    error::StrictError,
    norm,
    normalizer::{Form, Target},
};
use allocator_api2::alloc::Allocator;

/// Output of a strict pipeline.
pub type StrictResult<U, A> = Result<Units<U, A>, StrictError<Units<U, A>>>;

/// Transcodes `input` from the encoding of `W1` to that of `W2`.
pub fn transcode<W1: CodeUnit, W2: CodeUnit, A: Allocator>(
    input: &[W1],
    alloc: A,
) -> StrictResult<W2, A> {
    conv::transcode_with(input, Policy::Strict, alloc)?.into_strict()
}

macro_rules! strict_transcoders {
    ($($name:ident: $from:ty => $to:ty, $doc:literal;)*) => {$(
        #[doc = $doc]
        pub fn $name<A: Allocator>(input: &[$from], alloc: A) -> StrictResult<$to, A> {
            transcode(input, alloc)
        }
    )*};
}

strict_transcoders! {
    utf8_to_utf16: u8 => u16, "UTF-8 to UTF-16, stopping at the first ill-formed sequence.";
    utf8_to_utf32: u8 => u32, "UTF-8 to UTF-32, stopping at the first ill-formed sequence.";
    utf16_to_utf8: u16 => u8, "UTF-16 to UTF-8, stopping at the first unpaired surrogate.";
    utf16_to_utf32: u16 => u32, "UTF-16 to UTF-32, stopping at the first unpaired surrogate.";
    utf32_to_utf8: u32 => u8, "UTF-32 to UTF-8, stopping at the first invalid unit.";
    utf32_to_utf16: u32 => u16, "UTF-32 to UTF-16, stopping at the first invalid unit.";
}

/// Applies `mapping` to `input`; see [`crate::cases::map`].
pub fn case_map<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    mapping: CaseMapping,
    variant: Variant,
    alloc: A,
) -> StrictResult<U, A> {
    crate::cases::map_with(input, mapping, variant, Policy::Strict, alloc)?.into_strict()
}

/// Titlecases `input` with the word boundaries of `breaker`; see
/// [`crate::cases::titlecase_with`].
#[cfg(feature = "break-word")]
pub fn titlecase_with<U, A, B>(
    input: &[U],
    variant: Variant,
    breaker: &B,
    alloc: A,
) -> StrictResult<U, A>
where
    U: CodeUnit,
    A: Allocator + Clone,
    B: WordBreaker + ?Sized,
{
    crate::cases::titlecase_with_policy(input, variant, breaker, Policy::Strict, alloc)?
        .into_strict()
}

/// Normalizes `input` to `form`; see [`crate::norm::normalize`].
pub fn normalize<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    form: Form,
    alloc: A,
) -> StrictResult<U, A> {
    norm::normalize_with(input, Target::Form(form), Policy::Strict, alloc)?.into_strict()
}

/// Strips combining marks from the canonical decomposition of `input`; see
/// [`crate::norm::unaccent`].
#[cfg(feature = "compat-norm")]
pub fn unaccent<U: CodeUnit, A: Allocator + Clone>(input: &[U], alloc: A) -> StrictResult<U, A> {
    norm::normalize_with(input, Target::Unaccent, Policy::Strict, alloc)?.into_strict()
}
