//! The compiled callable.

use std::sync::Arc;

use lambdacalc_core::ast::Expr;
use lambdacalc_core::context::ContextType;
use lambdacalc_core::error::{CompileError, RuntimeError};
use lambdacalc_core::options::CompileOptions;
use lambdacalc_core::value::{DataType, Value};

use crate::expr::{EvalTarget, ExprCompiler};
use crate::node::Node;

/// An expression compiled down to its executable root node.
///
/// All name, type and overload decisions were frozen during compilation;
/// invocation substitutes values only, so a compiled expression can be
/// invoked any number of times (and from multiple threads, as the node
/// tree is immutable and accessors are `Send + Sync`).
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    root: Node,
    result_type: DataType,
    context_type: Option<Arc<ContextType>>,
}

impl CompiledExpression {
    /// Static type of the value every invocation produces.
    pub fn result_type(&self) -> DataType {
        self.result_type
    }

    /// The registered context type, when compiled in context mode.
    pub fn context_type(&self) -> Option<&Arc<ContextType>> {
        self.context_type.as_ref()
    }

    /// Invoke a parameter-mode expression. All parameter values were baked
    /// in at compile time, so nothing is supplied here.
    pub fn invoke(&self) -> Result<Value, RuntimeError> {
        self.root.eval(None)
    }

    /// Invoke a context-mode expression against a live context value.
    ///
    /// `ctx` must be the concrete type the [`ContextType`] was built for;
    /// anything else surfaces as [`RuntimeError::ContextTypeMismatch`].
    pub fn invoke_with<C: 'static>(&self, ctx: &C) -> Result<Value, RuntimeError> {
        self.root.eval(Some(ctx))
    }
}

/// Compile `expr` against an evaluation target.
pub fn compile(
    expr: &Expr,
    target: EvalTarget<'_>,
    options: CompileOptions,
) -> Result<CompiledExpression, CompileError> {
    let context_type = match &target {
        EvalTarget::Context(ty) => Some(Arc::clone(ty)),
        EvalTarget::Parameters(_) => None,
    };
    let compiler = ExprCompiler::new(target, options);
    let info = compiler.compile(expr)?;
    Ok(CompiledExpression {
        root: info.node,
        result_type: info.data_type,
        context_type,
    })
}
