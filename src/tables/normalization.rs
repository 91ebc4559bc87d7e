use crate::normalizer::Form;
use smallvec::SmallVec;
use unicode_normalization::{char as ucd, IsNormalized};

/// Longest full decomposition in the UCD (U+FDFA, compatibility).
pub(crate) const MAX_DECOMPOSITION_LEN: usize = 18;

pub(crate) type DecompositionVec = SmallVec<[char; MAX_DECOMPOSITION_LEN]>;

/// Which decomposition mappings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mapping {
    Canonical,
    #[cfg_attr(not(feature = "compat-norm"), allow(dead_code))]
    Compatibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuickCheck {
    Yes,
    No,
    Maybe,
}

/// Nothing below U+0300 has a non-zero combining class.
const FIRST_NON_STARTER: char = '\u{0300}';

#[inline]
pub(crate) fn combining_class(ch: char) -> u8 {
    if ch < FIRST_NON_STARTER {
        0
    } else {
        ucd::canonical_combining_class(ch)
    }
}

/// The full (already recursively applied) decomposition of `ch`, or `None`
/// when `ch` decomposes to itself. Hangul syllables are left to the caller.
pub(crate) fn decomposition(ch: char, mapping: Mapping) -> Option<DecompositionVec> {
    if ch.is_ascii() {
        return None;
    }
    let mut out = DecompositionVec::new();
    match mapping {
        Mapping::Canonical => ucd::decompose_canonical(ch, |d| out.push(d)),
        Mapping::Compatibility => ucd::decompose_compatible(ch, |d| out.push(d)),
    }
    if let [only] = out[..] {
        if only == ch {
            return None;
        }
    }
    Some(out)
}

/// The primary composite of `starter` and `mark`. Composition exclusions are
/// absent from the composition data, so they are never returned.
#[inline]
pub(crate) fn compose(starter: char, mark: char) -> Option<char> {
    ucd::compose(starter, mark)
}

/// The quick-check property of `ch` for `form`.
pub(crate) fn quick_check(ch: char, form: Form) -> QuickCheck {
    if ch.is_ascii() {
        return QuickCheck::Yes;
    }
    let one = std::iter::once(ch);
    let answer = match form {
        Form::Nfc => unicode_normalization::is_nfc_quick(one),
        Form::Nfd => unicode_normalization::is_nfd_quick(one),
        #[cfg(feature = "compat-norm")]
        Form::Nfkc => unicode_normalization::is_nfkc_quick(one),
        #[cfg(feature = "compat-norm")]
        Form::Nfkd => unicode_normalization::is_nfkd_quick(one),
    };
    match answer {
        IsNormalized::Yes => QuickCheck::Yes,
        IsNormalized::No => QuickCheck::No,
        IsNormalized::Maybe => QuickCheck::Maybe,
    }
}
