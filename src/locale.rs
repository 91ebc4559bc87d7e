use std::{convert::Infallible, fmt, str::FromStr};

const MAX_LANGUAGE_LEN: usize = 8;

/// A locale tag, of which only the language subtag is inspected.
///
/// The default (empty) locale selects the unconditional case-mapping rules.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    language: [u8; MAX_LANGUAGE_LEN],
    len: u8,
}

/// The set of special-casing rules a locale selects.
#[cfg_attr(not(feature = "full-case"), allow(dead_code))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum CaseRules {
    Default,
    /// Turkish and Azerbaijani dotted/dotless i.
    Turkic,
    /// Lithuanian retention of the dot above i and j.
    Lithuanian,
}

impl Locale {
    /// Parses a BCP 47 style tag such as `"tr"`, `"lt-LT"` or `"az_Latn"`.
    ///
    /// Anything after the first `-` or `_` is ignored, as is a language subtag
    /// that is not 2 to 8 ASCII letters; such tags give the default locale.
    pub fn new(tag: &str) -> Self {
        let language = tag.split(|c: char| c == '-' || c == '_').next().unwrap_or("");
        if !(2..=MAX_LANGUAGE_LEN).contains(&language.len())
            || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Locale::default();
        }
        let mut locale = Locale {
            language: [0; MAX_LANGUAGE_LEN],
            len: language.len() as u8,
        };
        for (dst, src) in locale.language.iter_mut().zip(language.bytes()) {
            *dst = src.to_ascii_lowercase();
        }
        locale
    }

    /// The lowercased language subtag, empty for the default locale.
    pub fn language(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.language[..self.len as usize]).unwrap_or("")
    }

    #[cfg_attr(not(feature = "full-case"), allow(dead_code))]
    pub(crate) fn case_rules(&self) -> CaseRules {
        match self.language() {
            "tr" | "tur" | "az" | "aze" => CaseRules::Turkic,
            "lt" | "lit" => CaseRules::Lithuanian,
            _ => CaseRules::Default,
        }
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Locale::new(tag))
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::new(tag)
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Locale({:?})", self.language())
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseRules, Locale};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_subtag() {
        assert_eq!("tr", Locale::new("tr-TR").language());
        assert_eq!("az", Locale::new("AZ_Latn").language());
        assert_eq!("", Locale::new("").language());
        assert_eq!("", Locale::new("x").language());
        assert_eq!("", Locale::new("t1").language());
        assert_eq!(Locale::default(), "".parse::<Locale>().unwrap());
    }

    #[test]
    fn test_case_rules() {
        assert_eq!(CaseRules::Turkic, Locale::new("tr").case_rules());
        assert_eq!(CaseRules::Turkic, Locale::new("az-AZ").case_rules());
        assert_eq!(CaseRules::Lithuanian, Locale::new("lt").case_rules());
        assert_eq!(CaseRules::Default, Locale::new("en-US").case_rules());
        assert_eq!(CaseRules::Default, Locale::default().case_rules());
    }

    #[test]
    fn test_debug_fmt_locale() {
        assert_eq!("Locale(\"lt\")", format!("{:?}", Locale::new("lt-LT")));
    }
}
