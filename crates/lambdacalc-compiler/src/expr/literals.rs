//! Literal compilation.

use lambdacalc_core::value::{DataType, Value};

use super::Result;
use crate::expr_info::ExprInfo;
use crate::node::Node;

/// A literal becomes a constant of its natural type. Literals are never
/// nullable; a null literal has the null type itself.
pub(crate) fn compile(value: &Value) -> Result<ExprInfo> {
    Ok(ExprInfo::new(
        Node::Const(value.clone()),
        DataType::simple(value.value_type()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambdacalc_core::value::ValueType;
    use rust_decimal::Decimal;

    #[test]
    fn literal_keeps_its_natural_type() {
        let info = compile(&Value::Decimal(Decimal::new(24, 1))).unwrap();
        assert_eq!(info.data_type, DataType::simple(ValueType::Decimal));
        assert!(matches!(info.node, Node::Const(Value::Decimal(_))));
    }

    #[test]
    fn null_literal_has_null_type() {
        let info = compile(&Value::Null).unwrap();
        assert_eq!(info.data_type.ty, ValueType::Null);
        assert!(!info.data_type.nullable);
    }
}
