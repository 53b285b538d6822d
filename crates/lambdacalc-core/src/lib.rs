//! Core data model for the lambdacalc expression compiler.
//!
//! This crate owns everything the compiler and its callers share: the
//! expression tree ([`Expr`]), runtime values and static types ([`Value`],
//! [`ValueType`], [`DataType`]), compilation options ([`CompileOptions`]),
//! the context type registry ([`ContextType`]), and the phase-split error
//! enums ([`CompileError`], [`RuntimeError`]).

pub mod ast;
pub mod context;
pub mod error;
pub mod options;
pub mod value;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use context::{
    ContextType, ContextTypeBuilder, MemberDef, MemberGetter, MethodDef, MethodInvoker,
};
pub use error::{CompileError, RuntimeError};
pub use options::CompileOptions;
pub use value::{DataType, Value, ValueType};
