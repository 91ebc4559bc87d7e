//! Lowercasing, uppercasing, case folding and titlecasing.
//!
//! The plain functions apply the full mappings of the default locale, and
//! may change the length of the text. Without the `full-case` feature they
//! fall back to the simple one-to-one mappings. The `_locale` ones apply the
//! special-casing rules of the given locale. Malformed input is repaired with
//! U+FFFD; see [`crate::strict`] for the reporting variants.

#[cfg(feature = "full-case")]
use crate::locale::Locale;
#[cfg(feature = "break-word")]
use crate::word_break::{Uax29WordBreaker, WordBreaker};
use crate::{
    buffer::{Buffer, Units},
    case_map::{CaseMapper, Op},
    code_unit::{encode_all, CodeUnit},
    decoder::{decode_all, Outcome, Policy},
    error::AllocFailure,
};
use allocator_api2::alloc::Allocator;

pub use crate::case_map::{CaseMapping, Variant};

/// The variant applied by the functions that take no locale.
#[cfg(feature = "full-case")]
fn plain_variant() -> Variant {
    Variant::Full(Locale::default())
}

#[cfg(not(feature = "full-case"))]
fn plain_variant() -> Variant {
    Variant::Simple
}

#[cfg(feature = "break-word")]
fn titlecase_into<U, A, B>(
    chars: &[char],
    mapper: CaseMapper,
    breaker: &B,
    alloc: A,
    out: &mut Buffer<U, A>,
) -> Result<(), AllocFailure>
where
    U: CodeUnit,
    A: Allocator + Clone,
    B: WordBreaker + ?Sized,
{
    let mut utf8 = Buffer::<u8, A>::with_hint_in(chars.len(), alloc.clone())?;
    encode_all(chars, &mut utf8)?;
    // encode_all only ever writes well-formed UTF-8
    let text = unsafe { std::str::from_utf8_unchecked(utf8.as_slice()) };

    let mut starts = Buffer::<usize, A>::with_hint_in(0, alloc)?;
    let mut refused = None;
    breaker.word_starts(text, &mut |offset| {
        if refused.is_none() {
            refused = starts.push(offset).err();
        }
    });
    if let Some(failure) = refused {
        return Err(failure);
    }

    let mut starts = starts.iter().copied().peekable();
    let mut seeking = false;
    for (idx, (offset, ch)) in text.char_indices().enumerate() {
        while let Some(start) = starts.next_if(|&start| start <= offset) {
            if start == offset {
                seeking = true;
            }
        }
        if !seeking {
            encode_all(&mapper.map(Op::Lower, chars, idx), out)?;
        } else if crate::tables::casing::is_cased(ch) {
            encode_all(&mapper.map(Op::Title, chars, idx), out)?;
            seeking = false;
        } else {
            U::encode(ch, out)?;
        }
    }
    Ok(())
}

pub(crate) fn map_with<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    mapping: CaseMapping,
    variant: Variant,
    policy: Policy,
    alloc: A,
) -> Result<Outcome<Units<U, A>>, AllocFailure> {
    let op = match mapping {
        CaseMapping::Lower => Op::Lower,
        CaseMapping::Upper => Op::Upper,
        CaseMapping::Fold => Op::Fold,
        #[cfg(feature = "break-word")]
        CaseMapping::Title => {
            return titlecase_with_policy(input, variant, &Uax29WordBreaker, policy, alloc)
        }
    };
    let decoded = decode_all(input, policy, alloc.clone())?;
    let chars = decoded.chars.as_slice();
    let mapper = CaseMapper::new(variant);
    let mut out = Buffer::with_hint_in(input.len(), alloc)?;
    for idx in 0..chars.len() {
        encode_all(&mapper.map(op, chars, idx), &mut out)?;
    }
    Ok(Outcome {
        output: out.into_units(),
        error: decoded.error,
    })
}

#[cfg(feature = "break-word")]
pub(crate) fn titlecase_with_policy<U, A, B>(
    input: &[U],
    variant: Variant,
    breaker: &B,
    policy: Policy,
    alloc: A,
) -> Result<Outcome<Units<U, A>>, AllocFailure>
where
    U: CodeUnit,
    A: Allocator + Clone,
    B: WordBreaker + ?Sized,
{
    let decoded = decode_all(input, policy, alloc.clone())?;
    let mut out = Buffer::with_hint_in(input.len(), alloc.clone())?;
    titlecase_into(
        decoded.chars.as_slice(),
        CaseMapper::new(variant),
        breaker,
        alloc,
        &mut out,
    )?;
    Ok(Outcome {
        output: out.into_units(),
        error: decoded.error,
    })
}

/// Applies `mapping` to `input` in the given `variant`.
///
/// [`CaseMapping::Title`] uses UAX #29 word boundaries; see
/// [`titlecase_with`] to supply others.
pub fn map<U: CodeUnit, A: Allocator + Clone>(
    input: &[U],
    mapping: CaseMapping,
    variant: Variant,
    alloc: A,
) -> Result<Units<U, A>, AllocFailure> {
    map_with(input, mapping, variant, Policy::Lenient, alloc).map(Outcome::into_lenient)
}

/// Titlecases `input` with the word boundaries reported by `breaker`.
///
/// In each word, code points before the first cased one are kept, that one
/// is titlecased, and the rest are lowercased.
#[cfg(feature = "break-word")]
pub fn titlecase_with<U, A, B>(
    input: &[U],
    variant: Variant,
    breaker: &B,
    alloc: A,
) -> Result<Units<U, A>, AllocFailure>
where
    U: CodeUnit,
    A: Allocator + Clone,
    B: WordBreaker + ?Sized,
{
    titlecase_with_policy(input, variant, breaker, Policy::Lenient, alloc)
        .map(Outcome::into_lenient)
}

macro_rules! plain_case_fns {
    ($($name:ident: $mapping:ident, $unit:ty, $doc:literal;)*) => {$(
        #[doc = $doc]
        pub fn $name<A: Allocator + Clone>(
            input: &[$unit],
            alloc: A,
        ) -> Result<Units<$unit, A>, AllocFailure> {
            map(input, CaseMapping::$mapping, plain_variant(), alloc)
        }
    )*};
}

#[cfg(feature = "full-case")]
macro_rules! locale_case_fns {
    ($($name:ident: $mapping:ident, $unit:ty, $doc:literal;)*) => {$(
        #[doc = $doc]
        pub fn $name<A: Allocator + Clone>(
            input: &[$unit],
            locale: Locale,
            alloc: A,
        ) -> Result<Units<$unit, A>, AllocFailure> {
            map(input, CaseMapping::$mapping, Variant::Full(locale), alloc)
        }
    )*};
}

plain_case_fns! {
    to_lowercase_utf8: Lower, u8, "Lowercases UTF-8 text.";
    to_lowercase_utf16: Lower, u16, "Lowercases UTF-16 text.";
    to_lowercase_utf32: Lower, u32, "Lowercases UTF-32 text.";
    to_uppercase_utf8: Upper, u8, "Uppercases UTF-8 text.";
    to_uppercase_utf16: Upper, u16, "Uppercases UTF-16 text.";
    to_uppercase_utf32: Upper, u32, "Uppercases UTF-32 text.";
    to_casefold_utf8: Fold, u8, "Case folds UTF-8 text.";
    to_casefold_utf16: Fold, u16, "Case folds UTF-16 text.";
    to_casefold_utf32: Fold, u32, "Case folds UTF-32 text.";
}

#[cfg(all(feature = "full-case", feature = "break-word"))]
plain_case_fns! {
    to_titlecase_utf8: Title, u8, "Titlecases the words of UTF-8 text.";
    to_titlecase_utf16: Title, u16, "Titlecases the words of UTF-16 text.";
    to_titlecase_utf32: Title, u32, "Titlecases the words of UTF-32 text.";
}

#[cfg(feature = "full-case")]
locale_case_fns! {
    to_lowercase_utf8_locale: Lower, u8, "Lowercases UTF-8 text for `locale`.";
    to_lowercase_utf16_locale: Lower, u16, "Lowercases UTF-16 text for `locale`.";
    to_lowercase_utf32_locale: Lower, u32, "Lowercases UTF-32 text for `locale`.";
    to_uppercase_utf8_locale: Upper, u8, "Uppercases UTF-8 text for `locale`.";
    to_uppercase_utf16_locale: Upper, u16, "Uppercases UTF-16 text for `locale`.";
    to_uppercase_utf32_locale: Upper, u32, "Uppercases UTF-32 text for `locale`.";
    to_casefold_utf8_locale: Fold, u8, "Case folds UTF-8 text for `locale`.";
    to_casefold_utf16_locale: Fold, u16, "Case folds UTF-16 text for `locale`.";
    to_casefold_utf32_locale: Fold, u32, "Case folds UTF-32 text for `locale`.";
}

#[cfg(all(feature = "full-case", feature = "break-word"))]
locale_case_fns! {
    to_titlecase_utf8_locale: Title, u8, "Titlecases the words of UTF-8 text for `locale`.";
    to_titlecase_utf16_locale: Title, u16, "Titlecases the words of UTF-16 text for `locale`.";
    to_titlecase_utf32_locale: Title, u32, "Titlecases the words of UTF-32 text for `locale`.";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::test_alloc::CountingAlloc;
    use allocator_api2::alloc::Global;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn utf8(bytes: Units<u8>) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    macro_rules! assert_kept {
        ($input:expr, $locale:expr => $($f:ident),*) => {$(
            let out = $f(&$input, $locale, Global).unwrap();
            assert_eq!(&$input[..], &out[..], "{}", stringify!($f));
        )*};
        ($input:expr => $($f:ident),*) => {$(
            let out = $f(&$input, Global).unwrap();
            assert_eq!(&$input[..], &out[..], "{}", stringify!($f));
        )*};
    }

    #[test]
    fn test_digits_every_width() {
        let u8s: Vec<u8> = b"0123456789".to_vec();
        let u16s: Vec<u16> = "0123456789".encode_utf16().collect();
        let u32s: Vec<u32> = "0123456789".chars().map(u32::from).collect();
        assert_kept!(u8s => to_lowercase_utf8, to_uppercase_utf8, to_casefold_utf8);
        assert_kept!(u16s => to_lowercase_utf16, to_uppercase_utf16, to_casefold_utf16);
        assert_kept!(u32s => to_lowercase_utf32, to_uppercase_utf32, to_casefold_utf32);
        #[cfg(all(feature = "full-case", feature = "break-word"))]
        {
            assert_kept!(u8s => to_titlecase_utf8);
            assert_kept!(u16s => to_titlecase_utf16);
            assert_kept!(u32s => to_titlecase_utf32);
        }
        #[cfg(feature = "full-case")]
        for locale in ["", "tr", "lt"].map(Locale::new) {
            assert_kept!(u8s, locale =>
                to_lowercase_utf8_locale, to_uppercase_utf8_locale, to_casefold_utf8_locale);
            assert_kept!(u16s, locale =>
                to_lowercase_utf16_locale, to_uppercase_utf16_locale, to_casefold_utf16_locale);
            assert_kept!(u32s, locale =>
                to_lowercase_utf32_locale, to_uppercase_utf32_locale, to_casefold_utf32_locale);
            #[cfg(feature = "break-word")]
            {
                assert_kept!(u8s, locale => to_titlecase_utf8_locale);
                assert_kept!(u16s, locale => to_titlecase_utf16_locale);
                assert_kept!(u32s, locale => to_titlecase_utf32_locale);
            }
        }
        for mapping in [CaseMapping::Lower, CaseMapping::Upper, CaseMapping::Fold] {
            let out = map(&u8s, mapping, Variant::Simple, Global).unwrap();
            assert_eq!(&u8s[..], &out[..]);
        }
    }

    #[test]
    fn test_plain_mapping() {
        let out = to_lowercase_utf8(b"HeLLo, World", Global).unwrap();
        assert_eq!("hello, world", utf8(out));
        let out = to_lowercase_utf8(&[b'A', 0xC3, b'B'], Global).unwrap();
        assert_eq!("a\u{FFFD}b", utf8(out));
        let out = to_uppercase_utf8("stra\u{00DF}e".as_bytes(), Global).unwrap();
        #[cfg(feature = "full-case")]
        assert_eq!("STRASSE", utf8(out));
        #[cfg(not(feature = "full-case"))]
        assert_eq!("STRA\u{00DF}E", utf8(out));
    }

    #[cfg(feature = "full-case")]
    #[test]
    fn test_plain_is_full_default_locale() {
        let out = to_casefold_utf16(&[0x00DF], Global).unwrap();
        assert_eq!(&[0x73, 0x73], &out[..]);
        let out = to_lowercase_utf8("\u{0130}".as_bytes(), Global).unwrap();
        assert_eq!("i\u{0307}", utf8(out));
        let out = to_lowercase_utf8("\u{039F}\u{0394}\u{039F}\u{03A3}".as_bytes(), Global).unwrap();
        assert_eq!("\u{03BF}\u{03B4}\u{03BF}\u{03C2}", utf8(out));
        // no Turkic tailoring without a locale
        let out = to_uppercase_utf32(&[u32::from('i')], Global).unwrap();
        assert_eq!(&[u32::from('I')], &out[..]);

        let simple = map("stra\u{00DF}e".as_bytes(), CaseMapping::Upper, Variant::Simple, Global);
        assert_eq!("STRA\u{00DF}E", utf8(simple.unwrap()));
    }

    #[cfg(feature = "full-case")]
    #[test]
    fn test_locale_mapping() {
        let out = to_uppercase_utf8_locale("stra\u{00DF}e".as_bytes(), Locale::default(), Global);
        assert_eq!("STRASSE", utf8(out.unwrap()));
        let out = to_lowercase_utf8_locale(b"KIRIKKALE", Locale::new("tr"), Global);
        assert_eq!("k\u{0131}r\u{0131}kkale", utf8(out.unwrap()));
        let out = to_uppercase_utf8_locale(b"istanbul", Locale::new("tr-TR"), Global);
        assert_eq!("\u{0130}STANBUL", utf8(out.unwrap()));
        let out = to_lowercase_utf8_locale("\u{00CC}".as_bytes(), Locale::new("lt"), Global);
        assert_eq!("i\u{0307}\u{0300}", utf8(out.unwrap()));
        let greek = "\u{039F}\u{0394}\u{039F}\u{03A3} \u{03A3}";
        let out = to_lowercase_utf8_locale(greek.as_bytes(), Locale::default(), Global);
        assert_eq!("\u{03BF}\u{03B4}\u{03BF}\u{03C2} \u{03C3}", utf8(out.unwrap()));
        let out = to_casefold_utf16_locale(&[0x00DF], Locale::default(), Global).unwrap();
        assert_eq!(&[0x73, 0x73], &out[..]);
    }

    #[cfg(feature = "full-case")]
    #[test]
    fn test_final_sigma_across_ignorables() {
        let lower = |text: &str| {
            utf8(to_lowercase_utf8_locale(text.as_bytes(), Locale::default(), Global).unwrap())
        };
        assert_eq!("\u{03B1}\u{0E46}\u{03C2}", lower("\u{0391}\u{0E46}\u{03A3}"));
        assert_eq!("\u{03B1}\u{0903}\u{03C3}", lower("\u{0391}\u{0903}\u{03A3}"));
        let out = to_lowercase_utf8("\u{0391}\u{0600}\u{03A3}".as_bytes(), Global).unwrap();
        assert_eq!("\u{03B1}\u{0600}\u{03C2}", utf8(out));
    }

    #[cfg(all(feature = "full-case", feature = "break-word"))]
    #[test]
    fn test_titlecase() {
        assert_eq!("Hello World", utf8(to_titlecase_utf8(b"hello wORLD", Global).unwrap()));
        assert_eq!("'Tis Dutch", utf8(to_titlecase_utf8(b"'tis dUTCH", Global).unwrap()));
        let out = to_titlecase_utf8("\u{01C6}UNGLA".as_bytes(), Global).unwrap();
        assert_eq!("\u{01C5}ungla", utf8(out));
        let out = to_titlecase_utf8("\u{FB02}ow".as_bytes(), Global).unwrap();
        assert_eq!("Flow", utf8(out));
        assert_eq!("", utf8(to_titlecase_utf8(b"", Global).unwrap()));

        let out = to_titlecase_utf8_locale("\u{FB02}ow".as_bytes(), Locale::default(), Global);
        assert_eq!("Flow", utf8(out.unwrap()));
        let out = to_titlecase_utf8_locale(b"istanbul", Locale::new("tr"), Global);
        assert_eq!("\u{0130}stanbul", utf8(out.unwrap()));
    }

    #[cfg(feature = "break-word")]
    #[test]
    fn test_simple_titlecase() {
        let out = map("\u{FB02}ow wORLD".as_bytes(), CaseMapping::Title, Variant::Simple, Global);
        assert_eq!("\u{FB02}ow World", utf8(out.unwrap()));
    }

    #[cfg(feature = "break-word")]
    #[test]
    fn test_custom_breaker() {
        struct Whole;
        impl WordBreaker for Whole {
            fn word_starts(&self, _text: &str, sink: &mut dyn FnMut(usize)) {
                sink(0);
            }
        }
        let out = titlecase_with(b"hello world", Variant::Simple, &Whole, Global).unwrap();
        assert_eq!("Hello world", utf8(out));
    }

    #[test]
    fn test_strategy_neutrality() {
        let alloc = CountingAlloc::default();
        {
            let input = "Gr\u{00FC}\u{00DF}e".as_bytes();
            let out = map(input, CaseMapping::Upper, Variant::default(), &alloc).unwrap();
            assert_eq!("GR\u{00DC}\u{00DF}E".as_bytes(), &out[..]);
        }
        #[cfg(feature = "break-word")]
        {
            let out = map(b"ab cd", CaseMapping::Title, Variant::Simple, &alloc).unwrap();
            assert_eq!(b"Ab Cd", &out[..]);
        }
        assert!(alloc.acquired.get() >= 2);
        assert_eq!(alloc.acquired.get(), alloc.released.get());
    }

    proptest! {
        #[cfg(feature = "full-case")]
        #[test]
        fn prop_full_upper_matches_core(s in any::<String>()) {
            let out = to_uppercase_utf8_locale(s.as_bytes(), Locale::default(), Global).unwrap();
            prop_assert_eq!(s.to_uppercase(), utf8(out));
        }

        #[cfg(feature = "full-case")]
        #[test]
        fn prop_full_lower_matches_core(s in any::<String>()) {
            let out = to_lowercase_utf8_locale(s.as_bytes(), Locale::default(), Global).unwrap();
            prop_assert_eq!(s.to_lowercase(), utf8(out));
        }

        #[cfg(feature = "full-case")]
        #[test]
        fn prop_sigma_contexts_match_core(
            s in proptest::collection::vec(
                prop::sample::select(vec![
                    "\u{03A3}", "\u{0391}", "a", " ", "'", ".", "\u{0301}", "\u{0903}",
                    "\u{0E46}", "\u{00AD}", "\u{180E}", "\u{1BCA0}", "\u{02B0}", "1",
                ]),
                0..12,
            ).prop_map(|parts| parts.concat())
        ) {
            let out = to_lowercase_utf8(s.as_bytes(), Global).unwrap();
            prop_assert_eq!(s.to_lowercase(), utf8(out));
        }

        #[test]
        fn prop_widths_agree(s in any::<String>()) {
            let u16s: Vec<u16> = s.encode_utf16().collect();
            let lower8 = utf8(to_lowercase_utf8(s.as_bytes(), Global).unwrap());
            let lower16 = to_lowercase_utf16(&u16s, Global).unwrap();
            prop_assert_eq!(lower8, String::from_utf16_lossy(&lower16));
        }
    }
}
