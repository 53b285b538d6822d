//! Numeric coercion tables and the binary-operand protocol.
//!
//! Two fixed tables drive everything: a precedence ranking deciding which
//! operand of a binary operator widens to the other, and an implicit
//! conversion table deciding which argument types may quietly adapt to a
//! method parameter. A third, deliberately smaller ranking serves the `if`
//! built-in, which the original defines over a reduced numeric set.

use lambdacalc_core::options::CompileOptions;
use lambdacalc_core::value::{DataType, ValueType};

use crate::expr_info::ExprInfo;
use crate::node::Node;

/// Inter-type arithmetic precedence, widest first.
///
/// When both operands of an arithmetic or comparison operator rank here,
/// the lower-priority (narrower) one widens to the higher-priority type.
pub const NUMERIC_PRECEDENCE: [ValueType; 11] = [
    ValueType::Decimal,
    ValueType::F64,
    ValueType::F32,
    ValueType::U64,
    ValueType::I64,
    ValueType::U32,
    ValueType::I32,
    ValueType::U16,
    ValueType::I16,
    ValueType::U8,
    ValueType::I8,
];

/// Numeric ranking used by the `if` built-in's branch unification.
pub const IF_NUMERIC_PRIORITY: [ValueType; 5] = [
    ValueType::F64,
    ValueType::F32,
    ValueType::I64,
    ValueType::I32,
    ValueType::I16,
];

/// Position in [`NUMERIC_PRECEDENCE`]; `None` for non-ranked types.
pub fn precedence_index(ty: ValueType) -> Option<usize> {
    NUMERIC_PRECEDENCE.iter().position(|&t| t == ty)
}

/// Position in [`IF_NUMERIC_PRIORITY`]; `None` for non-ranked types.
pub fn if_priority_index(ty: ValueType) -> Option<usize> {
    IF_NUMERIC_PRIORITY.iter().position(|&t| t == ty)
}

/// Whether `from` may implicitly convert to `to` during overload
/// resolution and `in` item adaptation.
///
/// This is the original's primitive conversion table: widening within a
/// signedness, unsigned into wider signed, char into the integer ranks,
/// `f32` into `f64`, and integer/char into the floating or decimal ranks.
pub fn can_widen_implicitly(from: ValueType, to: ValueType) -> bool {
    use ValueType::*;
    matches!(
        (from, to),
        (I8, I16 | I32 | I64 | F32 | F64 | Decimal)
            | (U8, I16 | U16 | I32 | U32 | I64 | U64 | F32 | F64 | Decimal)
            | (I16, I32 | I64 | F32 | F64 | Decimal)
            | (U16, I32 | U32 | I64 | U64 | F32 | F64 | Decimal)
            | (I32, I64 | F32 | F64 | Decimal)
            | (U32, I64 | U64 | F32 | F64 | Decimal)
            | (I64, F32 | F64 | Decimal)
            | (U64, F32 | F64 | Decimal)
            | (Char, U16 | I32 | U32 | I64 | U64 | F32 | F64 | Decimal)
            | (F32, F64)
    )
}

/// Wrap `info` in a conversion to `to` unless it already has that type.
pub(crate) fn widen_to(info: ExprInfo, to: ValueType) -> ExprInfo {
    if info.data_type.ty == to {
        return info;
    }
    ExprInfo::new(
        Node::Convert {
            child: Box::new(info.node),
            to,
        },
        DataType::simple(to),
    )
}

/// Steps 1-4 of the binary coercion protocol: unwrap nullable operands to
/// their type's default, promote booleans when `BOOLEAN_AS_NUMERIC` is set,
/// then widen whichever operand ranks narrower. String handling and the
/// generic operator application stay with the caller.
pub(crate) fn unify_operands(
    left: ExprInfo,
    right: ExprInfo,
    options: CompileOptions,
) -> (ExprInfo, ExprInfo) {
    let mut left = unwrap_nullable(left);
    let mut right = unwrap_nullable(right);

    if options.contains(CompileOptions::BOOLEAN_AS_NUMERIC) {
        left = bool_to_numeric(left);
        right = bool_to_numeric(right);
    }

    if let (Some(l), Some(r)) = (
        precedence_index(left.data_type.ty),
        precedence_index(right.data_type.ty),
    ) {
        let target = NUMERIC_PRECEDENCE[l.min(r)];
        left = widen_to(left, target);
        right = widen_to(right, target);
    }

    (left, right)
}

/// A present value stays itself; an absent one becomes the declared type's
/// default. Conflating absent with zero is deliberate and matches the
/// original.
pub(crate) fn unwrap_nullable(info: ExprInfo) -> ExprInfo {
    if !info.data_type.nullable {
        return info;
    }
    let ty = info.data_type.ty;
    ExprInfo::new(
        Node::UnwrapOrDefault {
            child: Box::new(info.node),
            ty,
        },
        DataType::simple(ty),
    )
}

fn bool_to_numeric(info: ExprInfo) -> ExprInfo {
    if info.data_type.ty != ValueType::Bool {
        return info;
    }
    ExprInfo::new(
        Node::BoolToNumber {
            child: Box::new(info.node),
        },
        DataType::simple(ValueType::F64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambdacalc_core::value::Value;

    fn info(value: impl Into<Value>) -> ExprInfo {
        let value = value.into();
        let ty = value.value_type();
        ExprInfo::new(Node::Const(value), DataType::simple(ty))
    }

    #[test]
    fn decimal_outranks_double() {
        assert!(precedence_index(ValueType::Decimal) < precedence_index(ValueType::F64));
        assert!(precedence_index(ValueType::F64) < precedence_index(ValueType::I32));
    }

    #[test]
    fn strings_are_unranked() {
        assert_eq!(precedence_index(ValueType::Str), None);
        assert_eq!(precedence_index(ValueType::Bool), None);
        assert_eq!(precedence_index(ValueType::Char), None);
    }

    #[test]
    fn implicit_table_matches_original() {
        assert!(can_widen_implicitly(ValueType::I32, ValueType::I64));
        assert!(can_widen_implicitly(ValueType::U8, ValueType::U64));
        assert!(can_widen_implicitly(ValueType::Char, ValueType::I32));
        assert!(can_widen_implicitly(ValueType::F32, ValueType::F64));
        assert!(can_widen_implicitly(ValueType::I64, ValueType::Decimal));

        // Narrowing and sign-crossing are never implicit.
        assert!(!can_widen_implicitly(ValueType::I64, ValueType::I32));
        assert!(!can_widen_implicitly(ValueType::I8, ValueType::U8));
        assert!(!can_widen_implicitly(ValueType::F64, ValueType::F32));
        assert!(!can_widen_implicitly(ValueType::F64, ValueType::Decimal));
    }

    #[test]
    fn unify_widens_narrower_operand() {
        let (l, r) = unify_operands(info(1i32), info(2.5f64), CompileOptions::empty());
        assert_eq!(l.data_type.ty, ValueType::F64);
        assert_eq!(r.data_type.ty, ValueType::F64);
        assert!(matches!(l.node, Node::Convert { .. }));
        assert!(matches!(r.node, Node::Const(_)));
    }

    #[test]
    fn unify_leaves_strings_alone() {
        let (l, r) = unify_operands(info("a"), info(1i32), CompileOptions::empty());
        assert_eq!(l.data_type.ty, ValueType::Str);
        assert_eq!(r.data_type.ty, ValueType::I32);
    }

    #[test]
    fn boolean_as_numeric_promotes_to_double() {
        let (l, r) = unify_operands(
            info(true),
            info(1i32),
            CompileOptions::BOOLEAN_AS_NUMERIC,
        );
        // Bool becomes f64, then the int widens to meet it.
        assert_eq!(l.data_type.ty, ValueType::F64);
        assert_eq!(r.data_type.ty, ValueType::F64);
    }

    #[test]
    fn nullable_operand_is_unwrapped() {
        let nullable = ExprInfo::new(
            Node::Const(Value::Null),
            DataType::nullable(ValueType::Decimal),
        );
        let (l, _) = unify_operands(nullable, info(0i32), CompileOptions::empty());
        assert!(!l.data_type.nullable);
        assert!(matches!(l.node, Node::UnwrapOrDefault { .. }));
    }
}
