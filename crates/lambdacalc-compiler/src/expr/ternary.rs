//! Conditional expressions.
//!
//! The test must be boolean and both branches must agree on one static
//! type; numeric branches of different ranks are widened to the wider one.
//! Only the taken branch is ever evaluated.

use lambdacalc_core::ast::Expr;
use lambdacalc_core::error::CompileError;
use lambdacalc_core::value::{DataType, ValueType};

use super::{ExprCompiler, Result};
use crate::coercion::{precedence_index, unwrap_nullable, widen_to, NUMERIC_PRECEDENCE};
use crate::expr_info::ExprInfo;
use crate::node::Node;

pub(crate) fn compile(
    compiler: &ExprCompiler<'_>,
    test: &Expr,
    if_true: &Expr,
    if_false: &Expr,
) -> Result<ExprInfo> {
    let test = compiler.compile(test)?;
    if test.data_type.ty != ValueType::Bool {
        return Err(CompileError::TypeMismatch {
            message: format!("condition must be bool, got {}", test.data_type),
        });
    }

    let if_true = compiler.compile(if_true)?;
    let if_false = compiler.compile(if_false)?;
    let (if_true, if_false, data_type) = unify_branches(if_true, if_false)?;

    Ok(ExprInfo::new(
        Node::Branch {
            test: Box::new(test.node),
            if_true: Box::new(if_true.node),
            if_false: Box::new(if_false.node),
        },
        data_type,
    ))
}

fn unify_branches(
    if_true: ExprInfo,
    if_false: ExprInfo,
) -> Result<(ExprInfo, ExprInfo, DataType)> {
    if if_true.data_type == if_false.data_type {
        let data_type = if_true.data_type;
        return Ok((if_true, if_false, data_type));
    }

    let if_true = unwrap_nullable(if_true);
    let if_false = unwrap_nullable(if_false);
    if if_true.data_type == if_false.data_type {
        let data_type = if_true.data_type;
        return Ok((if_true, if_false, data_type));
    }

    match (
        precedence_index(if_true.data_type.ty),
        precedence_index(if_false.data_type.ty),
    ) {
        (Some(t), Some(f)) => {
            let target = NUMERIC_PRECEDENCE[t.min(f)];
            Ok((
                widen_to(if_true, target),
                widen_to(if_false, target),
                DataType::simple(target),
            ))
        }
        _ => Err(CompileError::TypeMismatch {
            message: format!(
                "branches have incompatible types {} and {}",
                if_true.data_type, if_false.data_type
            ),
        }),
    }
}
