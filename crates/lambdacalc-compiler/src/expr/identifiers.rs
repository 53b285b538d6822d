//! Identifier resolution.
//!
//! Parameter mode bakes the current value in as a constant; the produced
//! callable never sees the map again. Context mode compiles to a member
//! access that reads the live context value on every invocation. Both
//! lookups are case-sensitive.

use lambdacalc_core::error::CompileError;
use lambdacalc_core::value::DataType;

use super::{EvalTarget, ExprCompiler, Result};
use crate::expr_info::ExprInfo;
use crate::node::Node;

pub(crate) fn compile(compiler: &ExprCompiler<'_>, name: &str) -> Result<ExprInfo> {
    match &compiler.target {
        EvalTarget::Parameters(params) => match params.get(name) {
            Some(value) => Ok(ExprInfo::new(
                Node::Const(value.clone()),
                DataType::simple(value.value_type()),
            )),
            None => Err(CompileError::UnresolvedIdentifier {
                name: name.to_string(),
            }),
        },
        EvalTarget::Context(context) => match context.member(name) {
            Some(member) => Ok(ExprInfo::new(
                Node::Member {
                    name: member.name.clone(),
                    getter: member.getter.clone(),
                },
                member.data_type,
            )),
            None => Err(CompileError::UnresolvedIdentifier {
                name: name.to_string(),
            }),
        },
    }
}
