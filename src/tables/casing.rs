use super::in_ranges;
#[cfg(feature = "full-case")]
use icu_properties::{props::CaseIgnorable, CodePointSetData};
use smallvec::SmallVec;
use unicode_casefold::{Locale as FoldLocale, UnicodeCaseFold, Variant};

/// Longest full case mapping in the UCD.
pub(crate) const MAX_CASE_MAPPING_LEN: usize = 3;

pub(crate) type CaseVec = SmallVec<[char; MAX_CASE_MAPPING_LEN]>;

/// Full titlecase mappings that are not a single code point
/// (SpecialCasing.txt, unconditional part).
static TITLE_SPECIAL: &[(char, &[char])] = &[
    ('\u{00DF}', &['\u{0053}', '\u{0073}']),
    ('\u{0149}', &['\u{02BC}', '\u{004E}']),
    ('\u{01F0}', &['\u{004A}', '\u{030C}']),
    ('\u{0390}', &['\u{0399}', '\u{0308}', '\u{0301}']),
    ('\u{03B0}', &['\u{03A5}', '\u{0308}', '\u{0301}']),
    ('\u{0587}', &['\u{0535}', '\u{0582}']),
    ('\u{1E96}', &['\u{0048}', '\u{0331}']),
    ('\u{1E97}', &['\u{0054}', '\u{0308}']),
    ('\u{1E98}', &['\u{0057}', '\u{030A}']),
    ('\u{1E99}', &['\u{0059}', '\u{030A}']),
    ('\u{1E9A}', &['\u{0041}', '\u{02BE}']),
    ('\u{1F50}', &['\u{03A5}', '\u{0313}']),
    ('\u{1F52}', &['\u{03A5}', '\u{0313}', '\u{0300}']),
    ('\u{1F54}', &['\u{03A5}', '\u{0313}', '\u{0301}']),
    ('\u{1F56}', &['\u{03A5}', '\u{0313}', '\u{0342}']),
    ('\u{1FB2}', &['\u{1FBA}', '\u{0345}']),
    ('\u{1FB4}', &['\u{0386}', '\u{0345}']),
    ('\u{1FB6}', &['\u{0391}', '\u{0342}']),
    ('\u{1FB7}', &['\u{0391}', '\u{0342}', '\u{0345}']),
    ('\u{1FC2}', &['\u{1FCA}', '\u{0345}']),
    ('\u{1FC4}', &['\u{0389}', '\u{0345}']),
    ('\u{1FC6}', &['\u{0397}', '\u{0342}']),
    ('\u{1FC7}', &['\u{0397}', '\u{0342}', '\u{0345}']),
    ('\u{1FD2}', &['\u{0399}', '\u{0308}', '\u{0300}']),
    ('\u{1FD3}', &['\u{0399}', '\u{0308}', '\u{0301}']),
    ('\u{1FD6}', &['\u{0399}', '\u{0342}']),
    ('\u{1FD7}', &['\u{0399}', '\u{0308}', '\u{0342}']),
    ('\u{1FE2}', &['\u{03A5}', '\u{0308}', '\u{0300}']),
    ('\u{1FE3}', &['\u{03A5}', '\u{0308}', '\u{0301}']),
    ('\u{1FE4}', &['\u{03A1}', '\u{0313}']),
    ('\u{1FE6}', &['\u{03A5}', '\u{0342}']),
    ('\u{1FE7}', &['\u{03A5}', '\u{0308}', '\u{0342}']),
    ('\u{1FF2}', &['\u{1FFA}', '\u{0345}']),
    ('\u{1FF4}', &['\u{038F}', '\u{0345}']),
    ('\u{1FF6}', &['\u{03A9}', '\u{0342}']),
    ('\u{1FF7}', &['\u{03A9}', '\u{0342}', '\u{0345}']),
    ('\u{FB00}', &['\u{0046}', '\u{0066}']),
    ('\u{FB01}', &['\u{0046}', '\u{0069}']),
    ('\u{FB02}', &['\u{0046}', '\u{006C}']),
    ('\u{FB03}', &['\u{0046}', '\u{0066}', '\u{0069}']),
    ('\u{FB04}', &['\u{0046}', '\u{0066}', '\u{006C}']),
    ('\u{FB05}', &['\u{0053}', '\u{0074}']),
    ('\u{FB06}', &['\u{0053}', '\u{0074}']),
    ('\u{FB13}', &['\u{0544}', '\u{0576}']),
    ('\u{FB14}', &['\u{0544}', '\u{0565}']),
    ('\u{FB15}', &['\u{0544}', '\u{056B}']),
    ('\u{FB16}', &['\u{054E}', '\u{0576}']),
    ('\u{FB17}', &['\u{0544}', '\u{056D}']),
];

/// Letters of general category Lt.
static TITLECASE_LETTERS: &[(char, char)] = &[
    ('\u{01C5}', '\u{01C5}'),
    ('\u{01C8}', '\u{01C8}'),
    ('\u{01CB}', '\u{01CB}'),
    ('\u{01F2}', '\u{01F2}'),
    ('\u{1F88}', '\u{1F8F}'),
    ('\u{1F98}', '\u{1F9F}'),
    ('\u{1FA8}', '\u{1FAF}'),
    ('\u{1FBC}', '\u{1FBC}'),
    ('\u{1FCC}', '\u{1FCC}'),
    ('\u{1FFC}', '\u{1FFC}'),
];

/// Soft_Dotted letters (PropList.txt).
static SOFT_DOTTED: &[(char, char)] = &[
    ('\u{0069}', '\u{006A}'),
    ('\u{012F}', '\u{012F}'),
    ('\u{0249}', '\u{0249}'),
    ('\u{0268}', '\u{0268}'),
    ('\u{029D}', '\u{029D}'),
    ('\u{02B2}', '\u{02B2}'),
    ('\u{03F3}', '\u{03F3}'),
    ('\u{0456}', '\u{0456}'),
    ('\u{0458}', '\u{0458}'),
    ('\u{1D62}', '\u{1D62}'),
    ('\u{1D96}', '\u{1D96}'),
    ('\u{1DA4}', '\u{1DA4}'),
    ('\u{1DA8}', '\u{1DA8}'),
    ('\u{1E2D}', '\u{1E2D}'),
    ('\u{1ECB}', '\u{1ECB}'),
    ('\u{2071}', '\u{2071}'),
    ('\u{2148}', '\u{2149}'),
    ('\u{2C7C}', '\u{2C7C}'),
    ('\u{1D422}', '\u{1D423}'),
    ('\u{1D456}', '\u{1D457}'),
    ('\u{1D48A}', '\u{1D48B}'),
    ('\u{1D4BE}', '\u{1D4BF}'),
    ('\u{1D4F2}', '\u{1D4F3}'),
    ('\u{1D526}', '\u{1D527}'),
    ('\u{1D55A}', '\u{1D55B}'),
    ('\u{1D58E}', '\u{1D58F}'),
    ('\u{1D5C2}', '\u{1D5C3}'),
    ('\u{1D5F6}', '\u{1D5F7}'),
    ('\u{1D62A}', '\u{1D62B}'),
    ('\u{1D65E}', '\u{1D65F}'),
    ('\u{1D692}', '\u{1D693}'),
    ('\u{1DF1A}', '\u{1DF1A}'),
    ('\u{1E04C}', '\u{1E04D}'),
    ('\u{1E068}', '\u{1E068}'),
];

/// Lowercase letters with iota subscript; their simple uppercase is the
/// titlecase letter `OFFSET` positions later, or the one in the pair.
fn iota_subscript_upper(ch: char) -> Option<char> {
    const OFFSET: u32 = 8;
    match ch {
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(ch as u32 + OFFSET)
        }
        '\u{1FB3}' => Some('\u{1FBC}'),
        '\u{1FC3}' => Some('\u{1FCC}'),
        '\u{1FF3}' => Some('\u{1FFC}'),
        _ => None,
    }
}

pub(crate) fn simple_lower(ch: char) -> char {
    let lower = ch.to_lowercase();
    if lower.len() == 1 {
        lower.into_iter().next().unwrap_or(ch)
    } else if ch == '\u{0130}' {
        'i'
    } else {
        ch
    }
}

pub(crate) fn simple_upper(ch: char) -> char {
    let upper = ch.to_uppercase();
    if upper.len() == 1 {
        upper.into_iter().next().unwrap_or(ch)
    } else {
        iota_subscript_upper(ch).unwrap_or(ch)
    }
}

pub(crate) fn simple_title(ch: char) -> char {
    match ch {
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        // Georgian Mkhedruli has uppercase but no titlecase forms.
        '\u{10D0}'..='\u{10FA}' | '\u{10FD}'..='\u{10FF}' => ch,
        _ => simple_upper(ch),
    }
}

pub(crate) fn simple_fold(ch: char) -> char {
    std::iter::once(ch)
        .case_fold_with(Variant::Simple, FoldLocale::NonTurkic)
        .next()
        .unwrap_or(ch)
}

#[cfg_attr(not(feature = "full-case"), allow(dead_code))]
pub(crate) fn full_lower(ch: char) -> CaseVec {
    ch.to_lowercase().collect()
}

#[cfg_attr(not(feature = "full-case"), allow(dead_code))]
pub(crate) fn full_upper(ch: char) -> CaseVec {
    ch.to_uppercase().collect()
}

#[cfg_attr(not(feature = "full-case"), allow(dead_code))]
pub(crate) fn full_title(ch: char) -> CaseVec {
    match TITLE_SPECIAL.binary_search_by_key(&ch, |&(key, _)| key) {
        Ok(idx) => TITLE_SPECIAL[idx].1.iter().copied().collect(),
        Err(_) => std::iter::once(simple_title(ch)).collect(),
    }
}

#[cfg_attr(not(feature = "full-case"), allow(dead_code))]
pub(crate) fn full_fold(ch: char, turkic: bool) -> CaseVec {
    let locale = if turkic {
        FoldLocale::Turkic
    } else {
        FoldLocale::NonTurkic
    };
    std::iter::once(ch)
        .case_fold_with(Variant::Full, locale)
        .collect()
}

/// The Cased property: Lowercase, Uppercase or Lt.
pub(crate) fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase() || in_ranges(TITLECASE_LETTERS, ch)
}

/// The Case_Ignorable property (DerivedCoreProperties.txt).
#[cfg(feature = "full-case")]
pub(crate) fn is_case_ignorable(ch: char) -> bool {
    CodePointSetData::new::<CaseIgnorable>().contains(ch)
}

#[cfg_attr(not(feature = "full-case"), allow(dead_code))]
pub(crate) fn is_soft_dotted(ch: char) -> bool {
    in_ranges(SOFT_DOTTED, ch)
}
