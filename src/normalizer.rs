//! The normalization algorithm over a decoded code-point stream.

use crate::{
    buffer::Buffer,
    error::AllocFailure,
    tables::normalization::{self as props, combining_class, Mapping, QuickCheck},
};
use allocator_api2::alloc::Allocator;

/// A Unicode normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// Canonical decomposition followed by canonical composition.
    Nfc,
    /// Canonical decomposition.
    Nfd,
    /// Compatibility decomposition followed by canonical composition.
    #[cfg(feature = "compat-norm")]
    Nfkc,
    /// Compatibility decomposition.
    #[cfg(feature = "compat-norm")]
    Nfkd,
}

impl Form {
    fn mapping(self) -> Mapping {
        match self {
            Form::Nfc | Form::Nfd => Mapping::Canonical,
            #[cfg(feature = "compat-norm")]
            Form::Nfkc | Form::Nfkd => Mapping::Compatibility,
        }
    }

    fn composes(self) -> bool {
        match self {
            Form::Nfc => true,
            Form::Nfd => false,
            #[cfg(feature = "compat-norm")]
            Form::Nfkc => true,
            #[cfg(feature = "compat-norm")]
            Form::Nfkd => false,
        }
    }
}

/// What a normalization pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Form(Form),
    /// NFD with every non-starter removed.
    #[cfg(feature = "compat-norm")]
    Unaccent,
}

mod hangul {
    const S_BASE: u32 = 0xAC00;
    const L_BASE: u32 = 0x1100;
    const V_BASE: u32 = 0x1161;
    const T_BASE: u32 = 0x11A7;
    const L_COUNT: u32 = 19;
    const V_COUNT: u32 = 21;
    const T_COUNT: u32 = 28;
    const N_COUNT: u32 = V_COUNT * T_COUNT;
    const S_COUNT: u32 = L_COUNT * N_COUNT;

    pub(super) fn decompose(ch: char) -> Option<(char, char, Option<char>)> {
        let s_index = (ch as u32).checked_sub(S_BASE)?;
        if s_index >= S_COUNT {
            return None;
        }
        let l = char::from_u32(L_BASE + s_index / N_COUNT)?;
        let v = char::from_u32(V_BASE + (s_index % N_COUNT) / T_COUNT)?;
        let t = match s_index % T_COUNT {
            0 => None,
            t_index => Some(char::from_u32(T_BASE + t_index)?),
        };
        Some((l, v, t))
    }

    pub(super) fn compose(a: char, b: char) -> Option<char> {
        let (a, b) = (a as u32, b as u32);
        if (L_BASE..L_BASE + L_COUNT).contains(&a) && (V_BASE..V_BASE + V_COUNT).contains(&b) {
            let lv_index = (a - L_BASE) * N_COUNT + (b - V_BASE) * T_COUNT;
            return char::from_u32(S_BASE + lv_index);
        }
        let s_index = a.checked_sub(S_BASE)?;
        if s_index < S_COUNT
            && s_index % T_COUNT == 0
            && (T_BASE + 1..T_BASE + T_COUNT).contains(&b)
        {
            return char::from_u32(a + (b - T_BASE));
        }
        None
    }
}

fn compose_pair(starter: char, mark: char) -> Option<char> {
    hangul::compose(starter, mark).or_else(|| props::compose(starter, mark))
}

/// Quick-check over a whole stream: `No` as soon as a code point is `No` or
/// non-starters are out of canonical order.
pub(crate) fn quick_check(text: &[char], target: Target) -> QuickCheck {
    let form = match target {
        Target::Form(form) => form,
        #[cfg(feature = "compat-norm")]
        Target::Unaccent => Form::Nfd,
    };
    let mut last_class = 0;
    let mut result = QuickCheck::Yes;
    for &ch in text {
        if ch.is_ascii() {
            last_class = 0;
            continue;
        }
        let class = combining_class(ch);
        if last_class > class && class != 0 {
            return QuickCheck::No;
        }
        #[cfg(feature = "compat-norm")]
        if target == Target::Unaccent && class != 0 {
            return QuickCheck::No;
        }
        match props::quick_check(ch, form) {
            QuickCheck::Yes => {}
            QuickCheck::No => return QuickCheck::No,
            QuickCheck::Maybe => result = QuickCheck::Maybe,
        }
        last_class = class;
    }
    result
}

/// Appends the full decomposition of `text` and puts it in canonical order.
fn decompose_into<A: Allocator>(
    text: &[char],
    mapping: Mapping,
    out: &mut Buffer<char, A>,
) -> Result<(), AllocFailure> {
    let start = out.len();
    for &ch in text {
        if let Some((l, v, t)) = hangul::decompose(ch) {
            out.push(l)?;
            out.push(v)?;
            if let Some(t) = t {
                out.push(t)?;
            }
            continue;
        }
        match props::decomposition(ch, mapping) {
            Some(seq) => out.extend_from_slice(&seq)?,
            None => out.push(ch)?,
        }
    }
    reorder(&mut out.as_mut_slice()[start..]);
    Ok(())
}

/// Stable sort of every maximal run of non-starters by combining class.
pub(crate) fn reorder(chars: &mut [char]) {
    let mut idx = 0;
    while idx < chars.len() {
        if combining_class(chars[idx]) == 0 {
            idx += 1;
            continue;
        }
        let start = idx;
        while idx < chars.len() && combining_class(chars[idx]) != 0 {
            idx += 1;
        }
        let run = &mut chars[start..idx];
        for j in 1..run.len() {
            let mut k = j;
            while k > 0 && combining_class(run[k - 1]) > combining_class(run[k]) {
                run.swap(k - 1, k);
                k -= 1;
            }
        }
    }
}

/// Canonical composition in place; returns the composed length.
pub(crate) fn compose(chars: &mut [char]) -> usize {
    let first = match chars.first() {
        Some(&first) => first,
        None => return 0,
    };
    let mut starter_pos = 0;
    let mut starter = first;
    // a leading non-starter blocks everything until the first starter
    let mut last_class: u16 = if combining_class(first) == 0 { 0 } else { 256 };
    let mut write = 1;
    for read in 1..chars.len() {
        let ch = chars[read];
        let class = u16::from(combining_class(ch));
        if last_class < class || last_class == 0 {
            if let Some(composite) = compose_pair(starter, ch) {
                chars[starter_pos] = composite;
                starter = composite;
                continue;
            }
        }
        if class == 0 {
            starter_pos = write;
            starter = ch;
        }
        last_class = class;
        chars[write] = ch;
        write += 1;
    }
    write
}

/// Appends the normalization of `text` to `out`.
pub(crate) fn normalize<A: Allocator>(
    text: &[char],
    target: Target,
    out: &mut Buffer<char, A>,
) -> Result<(), AllocFailure> {
    let start = out.len();
    match target {
        Target::Form(form) => {
            decompose_into(text, form.mapping(), out)?;
            if form.composes() {
                let len = compose(&mut out.as_mut_slice()[start..]);
                out.truncate(start + len);
            }
        }
        #[cfg(feature = "compat-norm")]
        Target::Unaccent => {
            decompose_into(text, Mapping::Canonical, out)?;
            let chars = out.as_mut_slice();
            let mut write = start;
            for read in start..chars.len() {
                if combining_class(chars[read]) == 0 {
                    chars[write] = chars[read];
                    write += 1;
                }
            }
            out.truncate(write);
        }
    }
    Ok(())
}
