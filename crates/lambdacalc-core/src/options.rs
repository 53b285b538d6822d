//! Compilation option flags.

use bitflags::bitflags;

bitflags! {
    /// Flags fixed for the whole of one compilation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CompileOptions: u8 {
        /// String comparisons use ordinal (codepoint) order instead of
        /// case-folded order when combined with `IGNORE_CASE_STRINGS`.
        const ORDINAL_STRINGS = 1 << 0;
        /// String equality and ordering ignore case.
        const IGNORE_CASE_STRINGS = 1 << 1;
        /// `+`, `-` and `*` fault on overflow instead of wrapping.
        const OVERFLOW_PROTECTION = 1 << 2;
        /// Booleans are promoted to `0.0`/`1.0` before arithmetic or
        /// comparison with numerics.
        const BOOLEAN_AS_NUMERIC = 1 << 3;
    }
}
