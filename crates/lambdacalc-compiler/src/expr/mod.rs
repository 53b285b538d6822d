//! The node compiler: one post-order walk over the expression tree.
//!
//! Each submodule compiles one expression kind; the driver here only
//! dispatches. Children are compiled before their parent so coercion and
//! overload decisions are made against frozen child types, and the first
//! error aborts the walk.

pub(crate) mod binary;
pub(crate) mod calls;
pub(crate) mod identifiers;
pub(crate) mod literals;
pub(crate) mod ternary;
pub(crate) mod unary;

use std::sync::Arc;

use lambdacalc_core::ast::Expr;
use lambdacalc_core::context::ContextType;
use lambdacalc_core::error::CompileError;
use lambdacalc_core::options::CompileOptions;
use lambdacalc_core::value::Value;
use rustc_hash::FxHashMap;

use crate::expr_info::ExprInfo;
use crate::strings::StringPolicy;

pub(crate) type Result<T> = std::result::Result<T, CompileError>;

/// What identifiers and calls resolve against.
pub enum EvalTarget<'a> {
    /// Names resolve to constants baked in at compile time.
    Parameters(&'a FxHashMap<String, Value>),
    /// Names resolve to members and methods of the registered type;
    /// the live value arrives at call time.
    Context(&'a Arc<ContextType>),
}

/// Compiles expression trees against one target and one option set.
pub struct ExprCompiler<'a> {
    pub(crate) target: EvalTarget<'a>,
    pub(crate) options: CompileOptions,
    pub(crate) strings: StringPolicy,
}

impl<'a> ExprCompiler<'a> {
    pub fn new(target: EvalTarget<'a>, options: CompileOptions) -> Self {
        Self {
            target,
            options,
            strings: StringPolicy::from_options(options),
        }
    }

    /// Whether `+`, `-` and `*` use checked arithmetic.
    pub(crate) fn checked_arithmetic(&self) -> bool {
        self.options.contains(CompileOptions::OVERFLOW_PROTECTION)
    }

    pub fn compile(&self, expr: &Expr) -> Result<ExprInfo> {
        match expr {
            Expr::Literal(value) => literals::compile(value),
            Expr::Identifier(name) => identifiers::compile(self, name),
            Expr::Unary { op, operand } => unary::compile(self, *op, operand),
            Expr::Binary { op, left, right } => binary::compile(self, *op, left, right),
            Expr::Ternary {
                test,
                if_true,
                if_false,
            } => ternary::compile(self, test, if_true, if_false),
            Expr::Call { name, args } => calls::compile(self, name, args),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared helpers for the per-module compiler tests.

    use super::*;

    /// Compile `expr` in parameter mode with `params` and `options`, then
    /// evaluate the resulting node without a context.
    pub(crate) fn eval_with(
        expr: &Expr,
        params: &FxHashMap<String, Value>,
        options: CompileOptions,
    ) -> Result<Value> {
        let compiler = ExprCompiler::new(EvalTarget::Parameters(params), options);
        let info = compiler.compile(expr)?;
        Ok(info.node.eval(None).unwrap())
    }

    /// Compile and evaluate with no parameters and default options.
    pub(crate) fn eval(expr: &Expr) -> Result<Value> {
        eval_with(expr, &FxHashMap::default(), CompileOptions::empty())
    }
}
