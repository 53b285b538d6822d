//! Unary operators.

use lambdacalc_core::ast::{Expr, UnaryOp};
use lambdacalc_core::error::CompileError;
use lambdacalc_core::value::{DataType, ValueType};

use super::{ExprCompiler, Result};
use crate::coercion::unwrap_nullable;
use crate::expr_info::ExprInfo;
use crate::node::Node;

pub(crate) fn compile(
    compiler: &ExprCompiler<'_>,
    op: UnaryOp,
    operand: &Expr,
) -> Result<ExprInfo> {
    let operand = unwrap_nullable(compiler.compile(operand)?);
    let ty = operand.data_type.ty;

    match op {
        UnaryOp::Not => {
            if ty != ValueType::Bool {
                return Err(CompileError::UnsupportedOperator { op: "!", ty });
            }
            Ok(ExprInfo::new(
                Node::Not {
                    child: Box::new(operand.node),
                },
                DataType::simple(ValueType::Bool),
            ))
        }
        UnaryOp::Negate => {
            // Unsigned integers have no negation; this is the operator
            // applied-to-wrong-type case, not a coercion opportunity.
            let signed = ty.is_signed_integer()
                || matches!(ty, ValueType::F32 | ValueType::F64 | ValueType::Decimal);
            if !signed {
                return Err(CompileError::UnsupportedOperator { op: "-", ty });
            }
            Ok(ExprInfo::new(
                Node::Negate {
                    child: Box::new(operand.node),
                },
                DataType::simple(ty),
            ))
        }
        UnaryOp::BitwiseNot => {
            // Integer complement; on booleans it degenerates to logical not.
            if !ty.is_integer() && ty != ValueType::Bool {
                return Err(CompileError::UnsupportedOperator { op: "~", ty });
            }
            Ok(ExprInfo::new(
                Node::BitNot {
                    child: Box::new(operand.node),
                },
                DataType::simple(ty),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::eval;
    use lambdacalc_core::ast::{Expr, UnaryOp};
    use lambdacalc_core::error::CompileError;
    use lambdacalc_core::value::{Value, ValueType};

    #[test]
    fn not_requires_bool() {
        let expr = Expr::unary(UnaryOp::Not, Expr::literal(false));
        assert_eq!(eval(&expr), Ok(Value::Bool(true)));

        let expr = Expr::unary(UnaryOp::Not, Expr::literal(1));
        assert_eq!(
            eval(&expr),
            Err(CompileError::UnsupportedOperator {
                op: "!",
                ty: ValueType::I32
            })
        );
    }

    #[test]
    fn negate_rejects_unsigned() {
        let expr = Expr::unary(UnaryOp::Negate, Expr::literal(3i64));
        assert_eq!(eval(&expr), Ok(Value::I64(-3)));

        let expr = Expr::unary(UnaryOp::Negate, Expr::literal(3u32));
        assert_eq!(
            eval(&expr),
            Err(CompileError::UnsupportedOperator {
                op: "-",
                ty: ValueType::U32
            })
        );
    }

    #[test]
    fn bitwise_not_complements_integers() {
        let expr = Expr::unary(UnaryOp::BitwiseNot, Expr::literal(0i32));
        assert_eq!(eval(&expr), Ok(Value::I32(-1)));

        let expr = Expr::unary(UnaryOp::BitwiseNot, Expr::literal(true));
        assert_eq!(eval(&expr), Ok(Value::Bool(false)));

        let expr = Expr::unary(UnaryOp::BitwiseNot, Expr::literal(1.0f64));
        assert_eq!(
            eval(&expr),
            Err(CompileError::UnsupportedOperator {
                op: "~",
                ty: ValueType::F64
            })
        );
    }
}
