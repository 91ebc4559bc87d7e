//! NFC, NFD, NFKC and NFKD normalization, plus unaccenting.
//!
//! Malformed input is repaired with U+FFFD before normalizing; see
//! [`crate::strict`] for the reporting variants. When the input is already in
//! the requested form the output is a copy of it.

use crate::{
    buffer::{Buffer, Units},
    code_unit::{encode_all, CodeUnit},
    decoder::{decode_all, Outcome, Policy},
    error::AllocFailure,
    normalizer::{self, Target},
    tables::normalization::QuickCheck,
};
use allocator_api2::alloc::Allocator;

pub use crate::normalizer::Form;

pub(crate) fn normalize_with<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    target: Target,
    policy: Policy,
    alloc: A,
) -> Result<Outcome<Units<U, A>>, AllocFailure> {
    let decoded = decode_all(input, policy, alloc.clone())?;
    let chars = decoded.chars.as_slice();
    let mut out = Buffer::with_hint_in(input.len(), alloc.clone())?;
    if normalizer::quick_check(chars, target) == QuickCheck::Yes {
        if decoded.error.is_none() && !decoded.substituted {
            out.extend_from_slice(input)?;
        } else {
            encode_all(chars, &mut out)?;
        }
    } else {
        let mut scratch = Buffer::with_hint_in(chars.len(), alloc)?;
        normalizer::normalize(chars, target, &mut scratch)?;
        encode_all(scratch.as_slice(), &mut out)?;
    }
    Ok(Outcome {
        output: out.into_units(),
        error: decoded.error,
    })
}

/// Normalizes `input` to `form`.
pub fn normalize<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    form: Form,
    alloc: A,
) -> Result<Units<U, A>, AllocFailure> {
    normalize_with(input, Target::Form(form), Policy::Lenient, alloc).map(Outcome::into_lenient)
}

/// Decomposes `input` canonically and drops every combining mark.
#[cfg(feature = "compat-norm")]
pub fn unaccent<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    alloc: A,
) -> Result<Units<U, A>, AllocFailure> {
    normalize_with(input, Target::Unaccent, Policy::Lenient, alloc).map(Outcome::into_lenient)
}

/// Whether `input` is well-formed and already in `form`.
///
/// Only a quick-check `Maybe` costs a full normalization; `alloc` provides
/// the scratch space for it.
pub fn is_normalized<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    form: Form,
    alloc: A,
) -> Result<bool, AllocFailure> {
    let decoded = decode_all(input, Policy::Strict, alloc.clone())?;
    if decoded.error.is_some() {
        return Ok(false);
    }
    let chars = decoded.chars.as_slice();
    match normalizer::quick_check(chars, Target::Form(form)) {
        QuickCheck::Yes => Ok(true),
        QuickCheck::No => Ok(false),
        QuickCheck::Maybe => {
            let mut scratch = Buffer::with_hint_in(chars.len(), alloc)?;
            normalizer::normalize(chars, Target::Form(form), &mut scratch)?;
            Ok(scratch.as_slice() == chars)
        }
    }
}

macro_rules! normalizers {
    ($($name:ident, $check:ident: $form:ident, $unit:ty, $doc:literal;)*) => {$(
        #[doc = concat!("Normalizes ", $doc, " text to ", stringify!($form), ".")]
        pub fn $name<A: Allocator + Clone>(
            input: &[$unit],
            alloc: A,
        ) -> Result<Units<$unit, A>, AllocFailure> {
            normalize(input, Form::$form, alloc)
        }

        #[doc = concat!("Whether ", $doc, " text is in ", stringify!($form), ".")]
        pub fn $check<A: Allocator + Clone>(
            input: &[$unit],
            alloc: A,
        ) -> Result<bool, AllocFailure> {
            is_normalized(input, Form::$form, alloc)
        }
    )*};
}

normalizers! {
    to_nfc_utf8, is_nfc_utf8: Nfc, u8, "UTF-8";
    to_nfc_utf16, is_nfc_utf16: Nfc, u16, "UTF-16";
    to_nfc_utf32, is_nfc_utf32: Nfc, u32, "UTF-32";
    to_nfd_utf8, is_nfd_utf8: Nfd, u8, "UTF-8";
    to_nfd_utf16, is_nfd_utf16: Nfd, u16, "UTF-16";
    to_nfd_utf32, is_nfd_utf32: Nfd, u32, "UTF-32";
}

#[cfg(feature = "compat-norm")]
normalizers! {
    to_nfkc_utf8, is_nfkc_utf8: Nfkc, u8, "UTF-8";
    to_nfkc_utf16, is_nfkc_utf16: Nfkc, u16, "UTF-16";
    to_nfkc_utf32, is_nfkc_utf32: Nfkc, u32, "UTF-32";
    to_nfkd_utf8, is_nfkd_utf8: Nfkd, u8, "UTF-8";
    to_nfkd_utf16, is_nfkd_utf16: Nfkd, u16, "UTF-16";
    to_nfkd_utf32, is_nfkd_utf32: Nfkd, u32, "UTF-32";
}

#[cfg(feature = "compat-norm")]
macro_rules! unaccenters {
    ($($name:ident: $unit:ty, $doc:literal;)*) => {$(
        #[doc = concat!(
            "Strips combining marks from the canonical decomposition of ", $doc, " text."
        )]
        pub fn $name<A: Allocator + Clone>(
            input: &[$unit],
            alloc: A,
        ) -> Result<Units<$unit, A>, AllocFailure> {
            unaccent(input, alloc)
        }
    )*};
}

#[cfg(feature = "compat-norm")]
unaccenters! {
    to_unaccent_utf8: u8, "UTF-8";
    to_unaccent_utf16: u16, "UTF-16";
    to_unaccent_utf32: u32, "UTF-32";
}
