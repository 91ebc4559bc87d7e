#![deny(unsafe_op_in_unsafe_fn)]
#![deny(missing_docs, missing_debug_implementations)]
//! Unicode text transformations over UTF-8, UTF-16 and UTF-32 code units.
//!
//! Three pipelines share one decoder and one output protocol:
//!
//! * [`conv`] transcodes between the three encoding forms,
//! * [`cases`] lowercases, uppercases, case folds and titlecases,
//! * [`norm`] normalizes to NFC, NFD, NFKC or NFKD and strips accents.
//!
//! Every function takes the memory strategy as its last argument, any
//! [`Allocator`]. All output and all scratch storage comes from it, and a
//! refused request surfaces as [`AllocFailure`]. Pass [`Global`] for the
//! ordinary heap, or `&my_arena` to borrow your own.
//!
//! # Malformed input
//!
//! By default malformed spans are replaced with U+FFFD using the
//! "substitution of maximal subparts" practice, so the UTF-8 output of a
//! lenient pipeline matches [`String::from_utf8_lossy`]. The functions in
//! [`strict`] instead stop at the first malformed span and report its
//! offset, in source code units, together with the output produced so far.
//!
//! ```
//! use unitext::{conv, strict, Global};
//!
//! assert_eq!(&[0xFFFD], &conv::utf8_to_utf16(&[0x80], Global).unwrap()[..]);
//!
//! let err = strict::utf8_to_utf16(&[0x80], Global).unwrap_err();
//! assert_eq!(0, err.record().unwrap().offset);
//! ```
//!
//! # Cargo features
//!
//! * `full-case`: one-to-many case mappings with the special-casing rules,
//!   for the plain functions and the locale-aware `*_locale` ones. Without
//!   it the plain functions apply the simple one-to-one mappings.
//! * `compat-norm`: NFKC, NFKD and unaccenting.
//! * `break-word`: titlecasing with UAX #29 word boundaries.
//!
//! All are enabled by default.

pub(crate) mod tables;

pub(crate) mod buffer;

pub(crate) mod utf8;

pub(crate) mod code_unit;

pub(crate) mod decoder;

pub(crate) mod error;

pub(crate) mod locale;

pub(crate) mod case_map;

pub(crate) mod normalizer;

#[cfg(feature = "break-word")]
pub(crate) mod word_break;

pub mod conv;

pub mod cases;

pub mod norm;

pub mod strict;

pub use allocator_api2::alloc::{Allocator, Global};

pub use buffer::{Buffer, Units};

pub use code_unit::CodeUnit;

pub use decoder::{decode, Decoder, Policy, REPLACEMENT_CHARACTER};

pub use error::{AllocFailure, Error, ErrorKind, ErrorRecord, Result, StrictError};

pub use locale::Locale;

#[cfg(feature = "break-word")]
pub use word_break::{Uax29WordBreaker, WordBreaker};
