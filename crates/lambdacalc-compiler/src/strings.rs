//! String comparison policy.
//!
//! The policy is fixed once per compilation from the option flags, the way
//! the original picks a comparer: without `IGNORE_CASE_STRINGS` comparisons
//! are always ordinal; with it, `ORDINAL_STRINGS` selects
//! ordinal-ignore-case, otherwise comparison case-folds both sides first
//! (the stand-in for culture-aware ignore-case; the option surface does not
//! promise a specific locale).

use std::cmp::Ordering;

use lambdacalc_core::options::CompileOptions;

/// How string equality and ordering behave for one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringPolicy {
    /// Byte/codepoint order, case-sensitive.
    Ordinal,
    /// Codepoint order after per-character uppercasing.
    OrdinalIgnoreCase,
    /// Codepoint order after Unicode lowercase folding.
    FoldedIgnoreCase,
}

impl StringPolicy {
    pub fn from_options(options: CompileOptions) -> Self {
        if options.contains(CompileOptions::IGNORE_CASE_STRINGS) {
            if options.contains(CompileOptions::ORDINAL_STRINGS) {
                StringPolicy::OrdinalIgnoreCase
            } else {
                StringPolicy::FoldedIgnoreCase
            }
        } else {
            StringPolicy::Ordinal
        }
    }

    /// Three-way comparison under this policy.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            StringPolicy::Ordinal => a.cmp(b),
            StringPolicy::OrdinalIgnoreCase => {
                compare_mapped(a, b, |c| c.to_uppercase())
            }
            StringPolicy::FoldedIgnoreCase => {
                compare_mapped(a, b, |c| c.to_lowercase())
            }
        }
    }

    pub fn equals(self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Compare two strings after mapping each char through a case fold.
fn compare_mapped<I, F>(a: &str, b: &str, fold: F) -> Ordering
where
    I: Iterator<Item = char>,
    F: Fn(char) -> I,
{
    a.chars().flat_map(&fold).cmp(b.chars().flat_map(&fold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ordinal() {
        let policy = StringPolicy::from_options(CompileOptions::empty());
        assert_eq!(policy, StringPolicy::Ordinal);
        assert!(!policy.equals("A", "a"));
        assert_eq!(policy.compare("abc", "abd"), Ordering::Less);
    }

    #[test]
    fn ordinal_flag_alone_stays_ordinal() {
        // Without IGNORE_CASE_STRINGS the ordinal flag has nothing to modify.
        let policy = StringPolicy::from_options(CompileOptions::ORDINAL_STRINGS);
        assert_eq!(policy, StringPolicy::Ordinal);
    }

    #[test]
    fn ignore_case_selects_folding() {
        let policy = StringPolicy::from_options(CompileOptions::IGNORE_CASE_STRINGS);
        assert_eq!(policy, StringPolicy::FoldedIgnoreCase);
        assert!(policy.equals("A", "a"));
        assert!(policy.equals("Äpfel", "äpfel"));
    }

    #[test]
    fn ignore_case_with_ordinal_uppercases() {
        let policy = StringPolicy::from_options(
            CompileOptions::IGNORE_CASE_STRINGS | CompileOptions::ORDINAL_STRINGS,
        );
        assert_eq!(policy, StringPolicy::OrdinalIgnoreCase);
        assert!(policy.equals("Test", "TEST"));
        assert!(!policy.equals("Test", "Tes"));
    }
}
