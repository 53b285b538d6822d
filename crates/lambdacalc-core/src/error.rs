//! Error types, split by phase.
//!
//! All resolution failures surface during compilation (the single tree
//! walk); invocation of the produced callable can only fault on checked
//! arithmetic, division by zero, or a context value of the wrong concrete
//! type.

use thiserror::Error;

use crate::value::ValueType;

/// Errors raised while compiling an expression tree.
///
/// Propagation is immediate: the first error aborts the walk. There is no
/// partial result or retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// Parameter-map mode is missing the key, or the context type has no
    /// member with this (case-sensitive) name.
    #[error("unresolved identifier '{name}'")]
    UnresolvedIdentifier { name: String },

    /// No context method matched (at any level of the base chain) and no
    /// built-in has this name.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// An operator was applied to a type it is not defined for. The
    /// operator set itself is closed, so this is the contract-violation
    /// class for malformed input trees.
    #[error("operator '{op}' is not defined for type '{ty}'")]
    UnsupportedOperator { op: &'static str, ty: ValueType },

    /// Operand or branch types could not be unified.
    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },

    /// A built-in function was called with the wrong number of arguments.
    #[error("'{function}' expects {expected} arguments, found {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while invoking a compiled expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Checked arithmetic exceeded the representable range.
    #[error("arithmetic overflow in '{op}'")]
    Overflow { op: &'static str },

    #[error("division by zero")]
    DivisionByZero,

    /// The call-time context value was not the registered concrete type.
    #[error("context value is not a '{expected}'")]
    ContextTypeMismatch { expected: &'static str },

    /// A context-bound expression was invoked without a context value.
    #[error("expression requires a context value")]
    MissingContext,

    /// Invariant breakage inside the compiled program.
    #[error("internal error: {message}")]
    Internal { message: String },
}
