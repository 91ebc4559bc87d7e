//! Per-code-point case mapping with the context-sensitive special-casing
//! rules, evaluated over a decoded code-point stream.

use crate::tables::casing::{self as props, CaseVec};
#[cfg(feature = "full-case")]
use crate::{
    locale::{CaseRules, Locale},
    tables::normalization::combining_class,
};

/// A case operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseMapping {
    /// Lowercase.
    Lower,
    /// Uppercase.
    Upper,
    /// Case folding, for caseless matching.
    Fold,
    /// Titlecase the first cased letter of each word, lowercase the rest.
    #[cfg(feature = "break-word")]
    Title,
}

/// Which family of mappings to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// One-to-one mappings with no context and no locale.
    #[default]
    Simple,
    /// One-to-many mappings with the context rules, tailored to the locale.
    #[cfg(feature = "full-case")]
    Full(Locale),
}

impl Variant {
    /// Full mapping tailored to `locale`.
    #[cfg(feature = "full-case")]
    pub fn full(locale: impl Into<Locale>) -> Self {
        Variant::Full(locale.into())
    }
}

/// The mapping of a single letter; titlecasing of words is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Lower,
    Upper,
    #[cfg_attr(not(feature = "break-word"), allow(dead_code))]
    Title,
    Fold,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CaseMapper {
    #[cfg(feature = "full-case")]
    full: Option<CaseRules>,
}

impl CaseMapper {
    pub(crate) fn new(variant: Variant) -> Self {
        match variant {
            Variant::Simple => CaseMapper {
                #[cfg(feature = "full-case")]
                full: None,
            },
            #[cfg(feature = "full-case")]
            Variant::Full(locale) => CaseMapper {
                full: Some(locale.case_rules()),
            },
        }
    }

    /// Maps `text[idx]`, looking at its neighbours where a rule asks for it.
    pub(crate) fn map(&self, op: Op, text: &[char], idx: usize) -> CaseVec {
        #[cfg(feature = "full-case")]
        if let Some(rules) = self.full {
            return full_map(op, rules, text, idx);
        }
        let ch = text[idx];
        let mapped = match op {
            Op::Lower => props::simple_lower(ch),
            Op::Upper => props::simple_upper(ch),
            Op::Title => props::simple_title(ch),
            Op::Fold => props::simple_fold(ch),
        };
        std::iter::once(mapped).collect()
    }
}

#[cfg(feature = "full-case")]
fn mapped(chars: &[char]) -> CaseVec {
    CaseVec::from_slice(chars)
}

#[cfg(feature = "full-case")]
fn full_map(op: Op, rules: CaseRules, text: &[char], idx: usize) -> CaseVec {
    const COMBINING_DOT_ABOVE: char = '\u{0307}';
    let ch = text[idx];
    match (op, rules) {
        (Op::Lower, CaseRules::Lithuanian) => match ch {
            'I' if more_above(text, idx) => return mapped(&['i', COMBINING_DOT_ABOVE]),
            'J' if more_above(text, idx) => return mapped(&['j', COMBINING_DOT_ABOVE]),
            '\u{012E}' if more_above(text, idx) => {
                return mapped(&['\u{012F}', COMBINING_DOT_ABOVE])
            }
            '\u{00CC}' => return mapped(&['i', COMBINING_DOT_ABOVE, '\u{0300}']),
            '\u{00CD}' => return mapped(&['i', COMBINING_DOT_ABOVE, '\u{0301}']),
            '\u{0128}' => return mapped(&['i', COMBINING_DOT_ABOVE, '\u{0303}']),
            _ => {}
        },
        (Op::Lower, CaseRules::Turkic) => match ch {
            '\u{0130}' => return mapped(&['i']),
            COMBINING_DOT_ABOVE if after_i(text, idx) => return CaseVec::new(),
            'I' if !before_dot(text, idx) => return mapped(&['\u{0131}']),
            _ => {}
        },
        (Op::Upper | Op::Title, CaseRules::Turkic) if ch == 'i' => {
            return mapped(&['\u{0130}'])
        }
        (Op::Upper | Op::Title, CaseRules::Lithuanian)
            if ch == COMBINING_DOT_ABOVE && after_soft_dotted(text, idx) =>
        {
            return CaseVec::new()
        }
        _ => {}
    }
    match op {
        Op::Lower if ch == '\u{03A3}' && is_final_sigma(text, idx) => mapped(&['\u{03C2}']),
        Op::Lower => props::full_lower(ch),
        Op::Upper => props::full_upper(ch),
        Op::Title => props::full_title(ch),
        Op::Fold => props::full_fold(ch, rules == CaseRules::Turkic),
    }
}

/// Preceded by a cased letter and not followed by one, skipping
/// case-ignorables both ways.
#[cfg(feature = "full-case")]
fn is_final_sigma(text: &[char], idx: usize) -> bool {
    let mut before = text[..idx]
        .iter()
        .rev()
        .filter(|&&c| !props::is_case_ignorable(c));
    let mut after = text[idx + 1..]
        .iter()
        .filter(|&&c| !props::is_case_ignorable(c));
    before.next().map_or(false, |&c| props::is_cased(c))
        && !after.next().map_or(false, |&c| props::is_cased(c))
}

/// Scans the non-starters around `idx` until a class 0 or 230 mark ends the
/// search; `hit` decides the result for each scanned code point.
#[cfg(feature = "full-case")]
fn scan<'a>(
    mut chars: impl Iterator<Item = &'a char>,
    hit: impl Fn(char, u8) -> Option<bool>,
) -> bool {
    chars
        .find_map(|&c| {
            let class = combining_class(c);
            hit(c, class).or(if class == 0 || class == 230 {
                Some(false)
            } else {
                None
            })
        })
        .unwrap_or(false)
}

#[cfg(feature = "full-case")]
fn more_above(text: &[char], idx: usize) -> bool {
    scan(text[idx + 1..].iter(), |_, class| (class == 230).then_some(true))
}

#[cfg(feature = "full-case")]
fn before_dot(text: &[char], idx: usize) -> bool {
    scan(text[idx + 1..].iter(), |c, _| (c == '\u{0307}').then_some(true))
}

#[cfg(feature = "full-case")]
fn after_i(text: &[char], idx: usize) -> bool {
    scan(text[..idx].iter().rev(), |c, _| (c == 'I').then_some(true))
}

#[cfg(feature = "full-case")]
fn after_soft_dotted(text: &[char], idx: usize) -> bool {
    scan(text[..idx].iter().rev(), |c, _| props::is_soft_dotted(c).then_some(true))
}
