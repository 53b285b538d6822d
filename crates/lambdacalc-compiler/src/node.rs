//! Executable nodes.
//!
//! Compilation turns each tree node into one of these already-composed
//! executable nodes; invocation is a direct structural recursion over the
//! fixed shape. Every type and method decision is frozen before a node is
//! built, so evaluation only substitutes values: the possible faults are
//! checked-arithmetic overflow, division by zero, and a context value of
//! the wrong concrete type.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use lambdacalc_core::context::{MemberGetter, MethodInvoker};
use lambdacalc_core::error::RuntimeError;
use lambdacalc_core::value::{Value, ValueType};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::strings::StringPolicy;

/// Arithmetic operator, resolved to operate on two same-typed numerics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Rem => "%",
        }
    }
}

/// Comparison operator, applied to a three-way comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Short-circuit logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Bitwise operator. Applied without any coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

/// `min` or `max` built-in selection over two f64 operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinMaxKind {
    Min,
    Max,
}

/// One executable node of a compiled expression.
#[derive(Clone)]
pub enum Node {
    /// A constant (literal or parameter value baked at compile time).
    Const(Value),
    /// Member access on the call-time context value.
    Member {
        name: String,
        getter: MemberGetter,
    },
    /// Numeric widening/conversion inserted by the compiler.
    Convert {
        child: Box<Node>,
        to: ValueType,
    },
    /// Null collapses to the declared type's zero-equivalent.
    UnwrapOrDefault {
        child: Box<Node>,
        ty: ValueType,
    },
    /// Boolean promoted to `1.0` / `0.0`.
    BoolToNumber {
        child: Box<Node>,
    },
    Not {
        child: Box<Node>,
    },
    BitNot {
        child: Box<Node>,
    },
    Negate {
        child: Box<Node>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Arithmetic {
        op: ArithOp,
        checked: bool,
        left: Box<Node>,
        right: Box<Node>,
    },
    Compare {
        op: CompareOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    StringCompare {
        op: CompareOp,
        policy: StringPolicy,
        left: Box<Node>,
        right: Box<Node>,
    },
    Bitwise {
        op: BitwiseOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Conditional; exactly one branch is evaluated.
    Branch {
        test: Box<Node>,
        if_true: Box<Node>,
        if_false: Box<Node>,
    },
    /// Membership test: the hay is fully materialized, then scanned.
    InArray {
        needle: Box<Node>,
        items: Vec<Node>,
    },
    /// Resolved context-method call with prepared arguments.
    MethodCall {
        name: String,
        invoker: MethodInvoker,
        args: Vec<Node>,
    },
    /// Variadic tail packed into one `Value::Array` argument.
    Pack {
        items: Vec<Node>,
    },
    MinMax {
        kind: MinMaxKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    Pow {
        base: Box<Node>,
        exp: Box<Node>,
    },
}

impl Node {
    /// Evaluate this node against an optional context value.
    pub fn eval(&self, ctx: Option<&dyn Any>) -> Result<Value, RuntimeError> {
        match self {
            Node::Const(value) => Ok(value.clone()),
            Node::Member { getter, .. } => {
                let ctx = ctx.ok_or(RuntimeError::MissingContext)?;
                getter(ctx)
            }
            Node::Convert { child, to } => convert_numeric(&child.eval(ctx)?, *to),
            Node::UnwrapOrDefault { child, ty } => {
                let value = child.eval(ctx)?;
                if value.is_null() {
                    Ok(ty.default_value())
                } else {
                    Ok(value)
                }
            }
            Node::BoolToNumber { child } => match child.eval(ctx)? {
                Value::Bool(true) => Ok(Value::F64(1.0)),
                Value::Bool(false) => Ok(Value::F64(0.0)),
                other => Err(internal(&format!("expected bool, got {}", other.value_type()))),
            },
            Node::Not { child } => match child.eval(ctx)? {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                other => Err(internal(&format!("expected bool, got {}", other.value_type()))),
            },
            Node::BitNot { child } => eval_bit_not(&child.eval(ctx)?),
            Node::Negate { child } => eval_negate(&child.eval(ctx)?),
            Node::Logical { op, left, right } => {
                let lhs = expect_bool(&left.eval(ctx)?)?;
                match (op, lhs) {
                    (LogicalOp::And, false) => Ok(Value::Bool(false)),
                    (LogicalOp::Or, true) => Ok(Value::Bool(true)),
                    _ => Ok(Value::Bool(expect_bool(&right.eval(ctx)?)?)),
                }
            }
            Node::Arithmetic {
                op,
                checked,
                left,
                right,
            } => eval_arith(*op, *checked, &left.eval(ctx)?, &right.eval(ctx)?),
            Node::Compare { op, left, right } => {
                let ord = compare_values(&left.eval(ctx)?, &right.eval(ctx)?);
                Ok(Value::Bool(apply_compare(*op, ord)))
            }
            Node::StringCompare {
                op,
                policy,
                left,
                right,
            } => {
                let lhs = left.eval(ctx)?;
                let rhs = right.eval(ctx)?;
                match (&lhs, &rhs) {
                    (Value::Str(a), Value::Str(b)) => {
                        Ok(Value::Bool(apply_compare(*op, Some(policy.compare(a, b)))))
                    }
                    _ => Err(internal("string comparison on non-string operands")),
                }
            }
            Node::Bitwise { op, left, right } => {
                eval_bitwise(*op, &left.eval(ctx)?, &right.eval(ctx)?)
            }
            Node::Branch {
                test,
                if_true,
                if_false,
            } => {
                if expect_bool(&test.eval(ctx)?)? {
                    if_true.eval(ctx)
                } else {
                    if_false.eval(ctx)
                }
            }
            Node::InArray { needle, items } => {
                let needle = needle.eval(ctx)?;
                let hay = items
                    .iter()
                    .map(|item| item.eval(ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Bool(hay.contains(&needle)))
            }
            Node::MethodCall { invoker, args, .. } => {
                let ctx = ctx.ok_or(RuntimeError::MissingContext)?;
                let values = args
                    .iter()
                    .map(|arg| arg.eval(Some(ctx)))
                    .collect::<Result<Vec<_>, _>>()?;
                invoker(ctx, &values)
            }
            Node::Pack { items } => {
                let values = items
                    .iter()
                    .map(|item| item.eval(ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(values))
            }
            Node::MinMax { kind, left, right } => {
                let a = expect_f64(&left.eval(ctx)?)?;
                let b = expect_f64(&right.eval(ctx)?)?;
                let picked = match kind {
                    MinMaxKind::Min => {
                        if a < b {
                            a
                        } else {
                            b
                        }
                    }
                    MinMaxKind::Max => {
                        if a > b {
                            a
                        } else {
                            b
                        }
                    }
                };
                Ok(Value::F64(picked))
            }
            Node::Pow { base, exp } => {
                let base = expect_f64(&base.eval(ctx)?)?;
                let exp = expect_f64(&exp.eval(ctx)?)?;
                Ok(Value::F64(base.powf(exp)))
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Const(v) => f.debug_tuple("Const").field(v).finish(),
            Node::Member { name, .. } => f.debug_struct("Member").field("name", name).finish(),
            Node::Convert { child, to } => f
                .debug_struct("Convert")
                .field("child", child)
                .field("to", to)
                .finish(),
            Node::UnwrapOrDefault { child, ty } => f
                .debug_struct("UnwrapOrDefault")
                .field("child", child)
                .field("ty", ty)
                .finish(),
            Node::BoolToNumber { child } => {
                f.debug_struct("BoolToNumber").field("child", child).finish()
            }
            Node::Not { child } => f.debug_struct("Not").field("child", child).finish(),
            Node::BitNot { child } => f.debug_struct("BitNot").field("child", child).finish(),
            Node::Negate { child } => f.debug_struct("Negate").field("child", child).finish(),
            Node::Logical { op, left, right } => f
                .debug_struct("Logical")
                .field("op", op)
                .field("left", left)
                .field("right", right)
                .finish(),
            Node::Arithmetic {
                op,
                checked,
                left,
                right,
            } => f
                .debug_struct("Arithmetic")
                .field("op", op)
                .field("checked", checked)
                .field("left", left)
                .field("right", right)
                .finish(),
            Node::Compare { op, left, right } => f
                .debug_struct("Compare")
                .field("op", op)
                .field("left", left)
                .field("right", right)
                .finish(),
            Node::StringCompare {
                op, policy, left, right,
            } => f
                .debug_struct("StringCompare")
                .field("op", op)
                .field("policy", policy)
                .field("left", left)
                .field("right", right)
                .finish(),
            Node::Bitwise { op, left, right } => f
                .debug_struct("Bitwise")
                .field("op", op)
                .field("left", left)
                .field("right", right)
                .finish(),
            Node::Branch {
                test,
                if_true,
                if_false,
            } => f
                .debug_struct("Branch")
                .field("test", test)
                .field("if_true", if_true)
                .field("if_false", if_false)
                .finish(),
            Node::InArray { needle, items } => f
                .debug_struct("InArray")
                .field("needle", needle)
                .field("items", items)
                .finish(),
            Node::MethodCall { name, args, .. } => f
                .debug_struct("MethodCall")
                .field("name", name)
                .field("args", args)
                .finish(),
            Node::Pack { items } => f.debug_struct("Pack").field("items", items).finish(),
            Node::MinMax { kind, left, right } => f
                .debug_struct("MinMax")
                .field("kind", kind)
                .field("left", left)
                .field("right", right)
                .finish(),
            Node::Pow { base, exp } => f
                .debug_struct("Pow")
                .field("base", base)
                .field("exp", exp)
                .finish(),
        }
    }
}

fn internal(message: &str) -> RuntimeError {
    RuntimeError::Internal {
        message: message.to_string(),
    }
}

fn expect_bool(value: &Value) -> Result<bool, RuntimeError> {
    value
        .as_bool()
        .ok_or_else(|| internal(&format!("expected bool, got {}", value.value_type())))
}

fn expect_f64(value: &Value) -> Result<f64, RuntimeError> {
    value
        .as_f64()
        .ok_or_else(|| internal(&format!("expected double, got {}", value.value_type())))
}

/// Convert a numeric (or char) value to another numeric type.
///
/// Only the conversions the compiler actually inserts are supported:
/// integer/char widening, integer/char to float or decimal, `f32` to `f64`,
/// float to decimal, and decimal to float for the f64-based built-ins.
pub(crate) fn convert_numeric(value: &Value, to: ValueType) -> Result<Value, RuntimeError> {
    if value.value_type() == to {
        return Ok(value.clone());
    }
    if let Some(i) = int_source(value) {
        return int_to(i, to);
    }
    match (value, to) {
        (Value::F32(x), ValueType::F64) => Ok(Value::F64(f64::from(*x))),
        (Value::F32(x), ValueType::Decimal) => Decimal::from_f32(*x)
            .map(Value::Decimal)
            .ok_or(RuntimeError::Overflow { op: "convert" }),
        (Value::F64(x), ValueType::Decimal) => Decimal::from_f64(*x)
            .map(Value::Decimal)
            .ok_or(RuntimeError::Overflow { op: "convert" }),
        (Value::Decimal(d), ValueType::F64) => d
            .to_f64()
            .map(Value::F64)
            .ok_or_else(|| internal("decimal to double")),
        (Value::Decimal(d), ValueType::F32) => d
            .to_f32()
            .map(Value::F32)
            .ok_or_else(|| internal("decimal to float")),
        _ => Err(internal(&format!(
            "unsupported conversion {} -> {}",
            value.value_type(),
            to
        ))),
    }
}

fn int_source(value: &Value) -> Option<i128> {
    match value {
        Value::I8(v) => Some(i128::from(*v)),
        Value::U8(v) => Some(i128::from(*v)),
        Value::I16(v) => Some(i128::from(*v)),
        Value::U16(v) => Some(i128::from(*v)),
        Value::I32(v) => Some(i128::from(*v)),
        Value::U32(v) => Some(i128::from(*v)),
        Value::I64(v) => Some(i128::from(*v)),
        Value::U64(v) => Some(i128::from(*v)),
        Value::Char(c) => Some(i128::from(u32::from(*c))),
        _ => None,
    }
}

fn int_to(i: i128, to: ValueType) -> Result<Value, RuntimeError> {
    let out = match to {
        ValueType::I8 => Value::I8(i as i8),
        ValueType::U8 => Value::U8(i as u8),
        ValueType::I16 => Value::I16(i as i16),
        ValueType::U16 => Value::U16(i as u16),
        ValueType::I32 => Value::I32(i as i32),
        ValueType::U32 => Value::U32(i as u32),
        ValueType::I64 => Value::I64(i as i64),
        ValueType::U64 => Value::U64(i as u64),
        ValueType::F32 => Value::F32(i as f32),
        ValueType::F64 => Value::F64(i as f64),
        ValueType::Decimal => Value::Decimal(Decimal::from_i128_with_scale(i, 0)),
        other => return Err(internal(&format!("unsupported conversion to {other}"))),
    };
    Ok(out)
}

macro_rules! int_arith {
    ($op:expr, $checked:expr, $a:expr, $b:expr, $variant:ident) => {{
        let (a, b) = ($a, $b);
        match $op {
            ArithOp::Add => {
                if $checked {
                    a.checked_add(b)
                        .map(Value::$variant)
                        .ok_or(RuntimeError::Overflow { op: "+" })
                } else {
                    Ok(Value::$variant(a.wrapping_add(b)))
                }
            }
            ArithOp::Sub => {
                if $checked {
                    a.checked_sub(b)
                        .map(Value::$variant)
                        .ok_or(RuntimeError::Overflow { op: "-" })
                } else {
                    Ok(Value::$variant(a.wrapping_sub(b)))
                }
            }
            ArithOp::Mul => {
                if $checked {
                    a.checked_mul(b)
                        .map(Value::$variant)
                        .ok_or(RuntimeError::Overflow { op: "*" })
                } else {
                    Ok(Value::$variant(a.wrapping_mul(b)))
                }
            }
            ArithOp::Div => {
                if b == 0 {
                    Err(RuntimeError::DivisionByZero)
                } else {
                    Ok(Value::$variant(a.wrapping_div(b)))
                }
            }
            ArithOp::Rem => {
                if b == 0 {
                    Err(RuntimeError::DivisionByZero)
                } else {
                    Ok(Value::$variant(a.wrapping_rem(b)))
                }
            }
        }
    }};
}

macro_rules! float_arith {
    ($op:expr, $a:expr, $b:expr, $variant:ident) => {{
        let (a, b) = ($a, $b);
        let out = match $op {
            ArithOp::Add => a + b,
            ArithOp::Sub => a - b,
            ArithOp::Mul => a * b,
            ArithOp::Div => a / b,
            ArithOp::Rem => a % b,
        };
        Ok(Value::$variant(out))
    }};
}

fn eval_arith(op: ArithOp, checked: bool, l: &Value, r: &Value) -> Result<Value, RuntimeError> {
    match (l, r) {
        (Value::I8(a), Value::I8(b)) => int_arith!(op, checked, *a, *b, I8),
        (Value::U8(a), Value::U8(b)) => int_arith!(op, checked, *a, *b, U8),
        (Value::I16(a), Value::I16(b)) => int_arith!(op, checked, *a, *b, I16),
        (Value::U16(a), Value::U16(b)) => int_arith!(op, checked, *a, *b, U16),
        (Value::I32(a), Value::I32(b)) => int_arith!(op, checked, *a, *b, I32),
        (Value::U32(a), Value::U32(b)) => int_arith!(op, checked, *a, *b, U32),
        (Value::I64(a), Value::I64(b)) => int_arith!(op, checked, *a, *b, I64),
        (Value::U64(a), Value::U64(b)) => int_arith!(op, checked, *a, *b, U64),
        (Value::F32(a), Value::F32(b)) => float_arith!(op, *a, *b, F32),
        (Value::F64(a), Value::F64(b)) => float_arith!(op, *a, *b, F64),
        (Value::Decimal(a), Value::Decimal(b)) => decimal_arith(op, *a, *b),
        _ => Err(internal(&format!(
            "arithmetic operands diverged: {} vs {}",
            l.value_type(),
            r.value_type()
        ))),
    }
}

/// Decimal arithmetic has no wrapping form, so overflow always faults.
fn decimal_arith(op: ArithOp, a: Decimal, b: Decimal) -> Result<Value, RuntimeError> {
    match op {
        ArithOp::Add => a
            .checked_add(b)
            .map(Value::Decimal)
            .ok_or(RuntimeError::Overflow { op: "+" }),
        ArithOp::Sub => a
            .checked_sub(b)
            .map(Value::Decimal)
            .ok_or(RuntimeError::Overflow { op: "-" }),
        ArithOp::Mul => a
            .checked_mul(b)
            .map(Value::Decimal)
            .ok_or(RuntimeError::Overflow { op: "*" }),
        ArithOp::Div => {
            if b.is_zero() {
                Err(RuntimeError::DivisionByZero)
            } else {
                a.checked_div(b)
                    .map(Value::Decimal)
                    .ok_or(RuntimeError::Overflow { op: "/" })
            }
        }
        ArithOp::Rem => {
            if b.is_zero() {
                Err(RuntimeError::DivisionByZero)
            } else {
                a.checked_rem(b)
                    .map(Value::Decimal)
                    .ok_or(RuntimeError::Overflow { op: "%" })
            }
        }
    }
}

fn eval_negate(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::I8(v) => Ok(Value::I8(v.wrapping_neg())),
        Value::I16(v) => Ok(Value::I16(v.wrapping_neg())),
        Value::I32(v) => Ok(Value::I32(v.wrapping_neg())),
        Value::I64(v) => Ok(Value::I64(v.wrapping_neg())),
        Value::F32(v) => Ok(Value::F32(-v)),
        Value::F64(v) => Ok(Value::F64(-v)),
        Value::Decimal(v) => Ok(Value::Decimal(-v)),
        other => Err(internal(&format!("cannot negate {}", other.value_type()))),
    }
}

fn eval_bit_not(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        Value::I8(v) => Ok(Value::I8(!v)),
        Value::U8(v) => Ok(Value::U8(!v)),
        Value::I16(v) => Ok(Value::I16(!v)),
        Value::U16(v) => Ok(Value::U16(!v)),
        Value::I32(v) => Ok(Value::I32(!v)),
        Value::U32(v) => Ok(Value::U32(!v)),
        Value::I64(v) => Ok(Value::I64(!v)),
        Value::U64(v) => Ok(Value::U64(!v)),
        other => Err(internal(&format!("cannot complement {}", other.value_type()))),
    }
}

macro_rules! bit_logic {
    ($op:expr, $a:expr, $b:expr, $variant:ident) => {{
        let (a, b) = ($a, $b);
        let out = match $op {
            BitwiseOp::And => a & b,
            BitwiseOp::Or => a | b,
            BitwiseOp::Xor => a ^ b,
            _ => return Err(internal("shift routed to logic arm")),
        };
        Ok(Value::$variant(out))
    }};
}

macro_rules! bit_shift {
    ($op:expr, $a:expr, $shift:expr, $variant:ident) => {{
        let out = match $op {
            BitwiseOp::Shl => $a.wrapping_shl($shift),
            BitwiseOp::Shr => $a.wrapping_shr($shift),
            _ => return Err(internal("logic op routed to shift arm")),
        };
        Ok(Value::$variant(out))
    }};
}

fn eval_bitwise(op: BitwiseOp, l: &Value, r: &Value) -> Result<Value, RuntimeError> {
    match op {
        BitwiseOp::Shl | BitwiseOp::Shr => {
            let shift = match r {
                Value::I32(s) => *s as u32,
                other => {
                    return Err(internal(&format!(
                        "shift count must be int32, got {}",
                        other.value_type()
                    )));
                }
            };
            match l {
                Value::I8(a) => bit_shift!(op, a, shift, I8),
                Value::U8(a) => bit_shift!(op, a, shift, U8),
                Value::I16(a) => bit_shift!(op, a, shift, I16),
                Value::U16(a) => bit_shift!(op, a, shift, U16),
                Value::I32(a) => bit_shift!(op, a, shift, I32),
                Value::U32(a) => bit_shift!(op, a, shift, U32),
                Value::I64(a) => bit_shift!(op, a, shift, I64),
                Value::U64(a) => bit_shift!(op, a, shift, U64),
                other => Err(internal(&format!("cannot shift {}", other.value_type()))),
            }
        }
        _ => match (l, r) {
            (Value::Bool(a), Value::Bool(b)) => bit_logic!(op, *a, *b, Bool),
            (Value::I8(a), Value::I8(b)) => bit_logic!(op, *a, *b, I8),
            (Value::U8(a), Value::U8(b)) => bit_logic!(op, *a, *b, U8),
            (Value::I16(a), Value::I16(b)) => bit_logic!(op, *a, *b, I16),
            (Value::U16(a), Value::U16(b)) => bit_logic!(op, *a, *b, U16),
            (Value::I32(a), Value::I32(b)) => bit_logic!(op, *a, *b, I32),
            (Value::U32(a), Value::U32(b)) => bit_logic!(op, *a, *b, U32),
            (Value::I64(a), Value::I64(b)) => bit_logic!(op, *a, *b, I64),
            (Value::U64(a), Value::U64(b)) => bit_logic!(op, *a, *b, U64),
            _ => Err(internal(&format!(
                "bitwise operands diverged: {} vs {}",
                l.value_type(),
                r.value_type()
            ))),
        },
    }
}

/// Three-way comparison between two same-typed values.
///
/// Returns `None` when a float operand is NaN; the comparison operators map
/// that to false (true for `!=`), matching native float semantics.
fn compare_values(l: &Value, r: &Value) -> Option<Ordering> {
    match (l, r) {
        // Null equals itself; anything else against null is unordered.
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::I8(a), Value::I8(b)) => Some(a.cmp(b)),
        (Value::U8(a), Value::U8(b)) => Some(a.cmp(b)),
        (Value::I16(a), Value::I16(b)) => Some(a.cmp(b)),
        (Value::U16(a), Value::U16(b)) => Some(a.cmp(b)),
        (Value::I32(a), Value::I32(b)) => Some(a.cmp(b)),
        (Value::U32(a), Value::U32(b)) => Some(a.cmp(b)),
        (Value::I64(a), Value::I64(b)) => Some(a.cmp(b)),
        (Value::U64(a), Value::U64(b)) => Some(a.cmp(b)),
        (Value::F32(a), Value::F32(b)) => a.partial_cmp(b),
        (Value::F64(a), Value::F64(b)) => a.partial_cmp(b),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Char(a), Value::Char(b)) => Some(a.cmp(b)),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Turn a three-way result into the requested operator's boolean.
pub(crate) fn apply_compare(op: CompareOp, ord: Option<Ordering>) -> bool {
    match op {
        CompareOp::Eq => ord == Some(Ordering::Equal),
        CompareOp::Ne => ord != Some(Ordering::Equal),
        CompareOp::Lt => ord == Some(Ordering::Less),
        CompareOp::Le => matches!(ord, Some(Ordering::Less | Ordering::Equal)),
        CompareOp::Gt => ord == Some(Ordering::Greater),
        CompareOp::Ge => matches!(ord, Some(Ordering::Greater | Ordering::Equal)),
    }
}
