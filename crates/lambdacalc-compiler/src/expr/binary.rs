//! Binary operators.
//!
//! Arithmetic and comparison run the operand coercion protocol first:
//! unwrap nullables, promote booleans when configured, widen per the
//! numeric precedence ranking. Strings then divert comparisons through the
//! configured policy. Logical operators short-circuit on booleans with no
//! coercion at all, and bitwise operators demand identical integer types.

use lambdacalc_core::ast::{BinaryOp, Expr};
use lambdacalc_core::error::CompileError;
use lambdacalc_core::value::{DataType, ValueType};

use super::{ExprCompiler, Result};
use crate::coercion::{unify_operands, unwrap_nullable};
use crate::expr_info::ExprInfo;
use crate::node::{ArithOp, BitwiseOp, CompareOp, LogicalOp, Node};

pub(crate) fn compile(
    compiler: &ExprCompiler<'_>,
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
) -> Result<ExprInfo> {
    let left = compiler.compile(left)?;
    let right = compiler.compile(right)?;

    match op {
        BinaryOp::And | BinaryOp::Or => logical(op, left, right),
        op if op.is_arithmetic() => arithmetic(compiler, op, left, right),
        op if op.is_comparison() => comparison(compiler, op, left, right),
        op => bitwise(op, left, right),
    }
}

fn logical(op: BinaryOp, left: ExprInfo, right: ExprInfo) -> Result<ExprInfo> {
    for side in [&left, &right] {
        if side.data_type.ty != ValueType::Bool {
            return Err(CompileError::UnsupportedOperator {
                op: op.symbol(),
                ty: side.data_type.ty,
            });
        }
    }
    let op = match op {
        BinaryOp::And => LogicalOp::And,
        _ => LogicalOp::Or,
    };
    Ok(ExprInfo::new(
        Node::Logical {
            op,
            left: Box::new(left.node),
            right: Box::new(right.node),
        },
        DataType::simple(ValueType::Bool),
    ))
}

fn arithmetic(
    compiler: &ExprCompiler<'_>,
    op: BinaryOp,
    left: ExprInfo,
    right: ExprInfo,
) -> Result<ExprInfo> {
    let (left, right) = unify_operands(left, right, compiler.options);
    let (lt, rt) = (left.data_type.ty, right.data_type.ty);

    if lt == ValueType::Str || rt == ValueType::Str {
        return Err(CompileError::UnsupportedOperator {
            op: op.symbol(),
            ty: ValueType::Str,
        });
    }
    if lt != rt || !lt.is_numeric() {
        return Err(CompileError::TypeMismatch {
            message: format!("cannot apply '{}' to {} and {}", op.symbol(), lt, rt),
        });
    }

    Ok(ExprInfo::new(
        Node::Arithmetic {
            op: arith_op(op),
            checked: compiler.checked_arithmetic(),
            left: Box::new(left.node),
            right: Box::new(right.node),
        },
        DataType::simple(lt),
    ))
}

fn comparison(
    compiler: &ExprCompiler<'_>,
    op: BinaryOp,
    left: ExprInfo,
    right: ExprInfo,
) -> Result<ExprInfo> {
    let (left, right) = unify_operands(left, right, compiler.options);
    let (lt, rt) = (left.data_type.ty, right.data_type.ty);
    let op_sym = op.symbol();
    let op = compare_op(op);

    // Strings replace the generic comparison with the configured policy.
    if lt == ValueType::Str || rt == ValueType::Str {
        if lt != rt {
            return Err(CompileError::TypeMismatch {
                message: format!("cannot compare {lt} with {rt}"),
            });
        }
        return Ok(ExprInfo::new(
            Node::StringCompare {
                op,
                policy: compiler.strings,
                left: Box::new(left.node),
                right: Box::new(right.node),
            },
            DataType::simple(ValueType::Bool),
        ));
    }

    if lt != rt {
        return Err(CompileError::TypeMismatch {
            message: format!("cannot compare {lt} with {rt}"),
        });
    }
    // Booleans and null have equality but no ordering.
    if matches!(lt, ValueType::Bool | ValueType::Null)
        && !matches!(op, CompareOp::Eq | CompareOp::Ne)
    {
        return Err(CompileError::UnsupportedOperator { op: op_sym, ty: lt });
    }

    Ok(ExprInfo::new(
        Node::Compare {
            op,
            left: Box::new(left.node),
            right: Box::new(right.node),
        },
        DataType::simple(ValueType::Bool),
    ))
}

/// Bitwise operators are exact: identical integer (or boolean, for the
/// logic subset) operand types, shift counts of type int32, no widening.
fn bitwise(op: BinaryOp, left: ExprInfo, right: ExprInfo) -> Result<ExprInfo> {
    let left = unwrap_nullable(left);
    let right = unwrap_nullable(right);
    let (lt, rt) = (left.data_type.ty, right.data_type.ty);

    match op {
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => {
            if !lt.is_integer() {
                return Err(CompileError::UnsupportedOperator {
                    op: op.symbol(),
                    ty: lt,
                });
            }
            if rt != ValueType::I32 {
                return Err(CompileError::TypeMismatch {
                    message: format!("shift count must be int32, got {rt}"),
                });
            }
        }
        _ => {
            if lt != rt {
                return Err(CompileError::TypeMismatch {
                    message: format!("cannot apply '{}' to {} and {}", op.symbol(), lt, rt),
                });
            }
            if !lt.is_integer() && lt != ValueType::Bool {
                return Err(CompileError::UnsupportedOperator {
                    op: op.symbol(),
                    ty: lt,
                });
            }
        }
    }

    let node_op = match op {
        BinaryOp::BitAnd => BitwiseOp::And,
        BinaryOp::BitOr => BitwiseOp::Or,
        BinaryOp::BitXor => BitwiseOp::Xor,
        BinaryOp::ShiftLeft => BitwiseOp::Shl,
        _ => BitwiseOp::Shr,
    };
    Ok(ExprInfo::new(
        Node::Bitwise {
            op: node_op,
            left: Box::new(left.node),
            right: Box::new(right.node),
        },
        DataType::simple(lt),
    ))
}

fn arith_op(op: BinaryOp) -> ArithOp {
    match op {
        BinaryOp::Add => ArithOp::Add,
        BinaryOp::Subtract => ArithOp::Sub,
        BinaryOp::Multiply => ArithOp::Mul,
        BinaryOp::Divide => ArithOp::Div,
        _ => ArithOp::Rem,
    }
}

pub(crate) fn compare_op(op: BinaryOp) -> CompareOp {
    match op {
        BinaryOp::Equal => CompareOp::Eq,
        BinaryOp::NotEqual => CompareOp::Ne,
        BinaryOp::Less => CompareOp::Lt,
        BinaryOp::LessOrEqual => CompareOp::Le,
        BinaryOp::Greater => CompareOp::Gt,
        _ => CompareOp::Ge,
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{eval, eval_with};
    use lambdacalc_core::ast::{BinaryOp, Expr};
    use lambdacalc_core::error::CompileError;
    use lambdacalc_core::options::CompileOptions;
    use lambdacalc_core::value::{Value, ValueType};
    use rustc_hash::FxHashMap;

    fn bin(op: BinaryOp, l: impl Into<Value>, r: impl Into<Value>) -> Expr {
        Expr::binary(op, Expr::literal(l), Expr::literal(r))
    }

    #[test]
    fn integer_arithmetic() {
        assert_eq!(eval(&bin(BinaryOp::Add, 1, 2)), Ok(Value::I32(3)));
        assert_eq!(eval(&bin(BinaryOp::Modulo, 7, 2)), Ok(Value::I32(1)));
        assert_eq!(eval(&bin(BinaryOp::Divide, 9, 2)), Ok(Value::I32(4)));
    }

    #[test]
    fn mixed_operands_widen_to_the_wider_rank() {
        assert_eq!(eval(&bin(BinaryOp::Add, 1, 2.5f64)), Ok(Value::F64(3.5)));
        assert_eq!(eval(&bin(BinaryOp::Add, 1i16, 2i64)), Ok(Value::I64(3)));
    }

    #[test]
    fn comparison_after_widening() {
        assert_eq!(eval(&bin(BinaryOp::Less, 1, 2i64)), Ok(Value::Bool(true)));
        assert_eq!(
            eval(&bin(BinaryOp::Equal, 2, 2.0f64)),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn string_equality_honors_the_policy() {
        let expr = bin(BinaryOp::Equal, "A", "a");
        assert_eq!(eval(&expr), Ok(Value::Bool(false)));
        assert_eq!(
            eval_with(
                &expr,
                &FxHashMap::default(),
                CompileOptions::IGNORE_CASE_STRINGS
            ),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn string_ordering_uses_three_way_result() {
        assert_eq!(
            eval(&bin(BinaryOp::Less, "abc", "abd")),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            eval(&bin(BinaryOp::GreaterOrEqual, "b", "b")),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn string_arithmetic_is_unsupported() {
        assert_eq!(
            eval(&bin(BinaryOp::Add, "a", "b")),
            Err(CompileError::UnsupportedOperator {
                op: "+",
                ty: ValueType::Str
            })
        );
    }

    #[test]
    fn string_never_compares_against_numbers() {
        assert!(matches!(
            eval(&bin(BinaryOp::Equal, "1", 1)),
            Err(CompileError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn logical_ops_demand_booleans() {
        assert_eq!(
            eval(&bin(BinaryOp::And, true, false)),
            Ok(Value::Bool(false))
        );
        assert_eq!(
            eval(&bin(BinaryOp::Or, true, false)),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            eval(&bin(BinaryOp::And, true, 1)),
            Err(CompileError::UnsupportedOperator {
                op: "&&",
                ty: ValueType::I32
            })
        );
    }

    #[test]
    fn boolean_ordering_is_unsupported() {
        assert_eq!(
            eval(&bin(BinaryOp::Less, true, false)),
            Err(CompileError::UnsupportedOperator {
                op: "<",
                ty: ValueType::Bool
            })
        );
        assert_eq!(
            eval(&bin(BinaryOp::Equal, true, true)),
            Ok(Value::Bool(true))
        );
    }

    #[test]
    fn null_equals_null() {
        assert_eq!(
            eval(&Expr::binary(BinaryOp::Equal, Expr::null(), Expr::null())),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            eval(&Expr::binary(BinaryOp::NotEqual, Expr::null(), Expr::null())),
            Ok(Value::Bool(false))
        );
        // Equality only; null has no ordering.
        assert_eq!(
            eval(&Expr::binary(BinaryOp::Less, Expr::null(), Expr::null())),
            Err(CompileError::UnsupportedOperator {
                op: "<",
                ty: ValueType::Null
            })
        );
    }

    #[test]
    fn boolean_as_numeric_promotes_before_arithmetic() {
        let expr = bin(BinaryOp::Add, true, 2);
        assert!(eval(&expr).is_err());
        assert_eq!(
            eval_with(
                &expr,
                &FxHashMap::default(),
                CompileOptions::BOOLEAN_AS_NUMERIC
            ),
            Ok(Value::F64(3.0))
        );
    }

    #[test]
    fn overflow_protection_switches_to_checked() {
        use super::super::{EvalTarget, ExprCompiler};
        use lambdacalc_core::error::RuntimeError;

        let expr = bin(BinaryOp::Add, i32::MAX, 1);
        assert_eq!(eval(&expr), Ok(Value::I32(i32::MIN)));

        let params = FxHashMap::default();
        let compiler = ExprCompiler::new(
            EvalTarget::Parameters(&params),
            CompileOptions::OVERFLOW_PROTECTION,
        );
        let info = compiler.compile(&expr).unwrap();
        assert_eq!(info.node.eval(None), Err(RuntimeError::Overflow { op: "+" }));
    }

    #[test]
    fn bitwise_requires_identical_integer_types() {
        assert_eq!(
            eval(&bin(BinaryOp::BitAnd, 0b1100, 0b1010)),
            Ok(Value::I32(0b1000))
        );
        assert_eq!(
            eval(&bin(BinaryOp::BitXor, true, false)),
            Ok(Value::Bool(true))
        );
        assert!(matches!(
            eval(&bin(BinaryOp::BitOr, 1i32, 1i64)),
            Err(CompileError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn shift_count_must_be_int32() {
        assert_eq!(
            eval(&bin(BinaryOp::ShiftLeft, 1i64, 4)),
            Ok(Value::I64(16))
        );
        assert!(matches!(
            eval(&bin(BinaryOp::ShiftLeft, 1i64, 4i64)),
            Err(CompileError::TypeMismatch { .. })
        ));
    }
}
