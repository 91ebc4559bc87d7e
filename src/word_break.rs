//! Word segmentation for titlecasing.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into the segments titlecasing treats as words.
pub trait WordBreaker {
    /// Calls `sink` with the byte offset in `text` of every segment start,
    /// in ascending order. The first segment starts at 0.
    fn word_starts(&self, text: &str, sink: &mut dyn FnMut(usize));
}

/// Default word boundaries of Unicode Standard Annex #29.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uax29WordBreaker;

impl WordBreaker for Uax29WordBreaker {
    fn word_starts(&self, text: &str, sink: &mut dyn FnMut(usize)) {
        for (offset, _) in text.split_word_bound_indices() {
            sink(offset);
        }
    }
}

impl<B: WordBreaker + ?Sized> WordBreaker for &B {
    fn word_starts(&self, text: &str, sink: &mut dyn FnMut(usize)) {
        (**self).word_starts(text, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::{Uax29WordBreaker, WordBreaker};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uax29_starts() {
        let mut starts = Vec::new();
        Uax29WordBreaker.word_starts("can't stop, won't", &mut |offset| starts.push(offset));
        // can't | " " | stop | , | " " | won't
        assert_eq!(vec![0, 5, 6, 10, 11, 12], starts);

        starts.clear();
        (&Uax29WordBreaker).word_starts("", &mut |offset| starts.push(offset));
        assert!(starts.is_empty());
    }
}
