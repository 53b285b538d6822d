//! lambdacalc compiles parsed arithmetic/logical expression trees into
//! directly invokable callables.
//!
//! An [`Expr`] tree (built by a parser or by hand) is compiled once against
//! an evaluation target: a flat parameter map whose values are baked in, or
//! a registered [`ContextType`] whose live value arrives at call time. The
//! resulting [`CompiledExpression`] is invoked any number of times with
//! argument substitution only.
//!
//! ```
//! use lambdacalc::prelude::*;
//! use rustc_hash::FxHashMap;
//!
//! let mut params = FxHashMap::default();
//! params.insert("price".to_string(), Value::I32(40));
//!
//! let expr = Expr::binary(BinaryOp::Multiply, Expr::ident("price"), Expr::literal(2));
//! let compiled = lambdacalc::compile_with_parameters(
//!     &expr,
//!     &params,
//!     CompileOptions::empty(),
//! ).unwrap();
//!
//! assert_eq!(compiled.invoke(), Ok(Value::I32(80)));
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;

pub use lambdacalc_compiler::{
    compile, CompiledExpression, EvalTarget, ExprCompiler, StringPolicy,
};
pub use lambdacalc_core::ast::{BinaryOp, Expr, UnaryOp};
pub use lambdacalc_core::context::{ContextType, ContextTypeBuilder, MemberDef, MethodDef};
pub use lambdacalc_core::error::{CompileError, RuntimeError};
pub use lambdacalc_core::options::CompileOptions;
pub use lambdacalc_core::value::{DataType, Value, ValueType};

/// Compile against a parameter map; values are baked in as constants.
pub fn compile_with_parameters(
    expr: &Expr,
    params: &FxHashMap<String, Value>,
    options: CompileOptions,
) -> Result<CompiledExpression, CompileError> {
    lambdacalc_compiler::compile(expr, EvalTarget::Parameters(params), options)
}

/// Compile against a context type; identifiers become member reads and
/// calls resolve to the type's methods. The live context value is supplied
/// to each [`CompiledExpression::invoke_with`] call.
pub fn compile_with_context(
    expr: &Expr,
    context: &Arc<ContextType>,
    options: CompileOptions,
) -> Result<CompiledExpression, CompileError> {
    lambdacalc_compiler::compile(expr, EvalTarget::Context(context), options)
}

/// The working set most callers need.
pub mod prelude {
    pub use crate::{
        compile_with_context, compile_with_parameters, BinaryOp, CompileError, CompileOptions,
        CompiledExpression, ContextType, Expr, RuntimeError, UnaryOp, Value, ValueType,
    };
}
