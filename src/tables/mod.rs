//! Read-only Unicode property lookups.
//!
//! The bulk data lives in `unicode-normalization`, `unicode-casefold` and
//! `core::char`; this layer gives the engines one place to ask, and holds the
//! few special-casing sets those crates do not expose. A code point with no
//! entry gets the default: class 0, quick-check Yes, identity mapping.

pub(crate) mod casing;

pub(crate) mod normalization;

/// Binary search in a sorted, non-overlapping range table.
pub(crate) fn in_ranges(table: &[(char, char)], ch: char) -> bool {
    table
        .binary_search_by(|&(lo, hi)| {
            if hi < ch {
                std::cmp::Ordering::Less
            } else if lo > ch {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}
