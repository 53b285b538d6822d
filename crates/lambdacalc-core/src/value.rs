//! Runtime values and their static types.
//!
//! [`Value`] is the runtime representation flowing through a compiled
//! expression; [`ValueType`] is the parallel static type the compiler reasons
//! about; [`DataType`] pairs a `ValueType` with nullability, which is the
//! only type modifier this model needs.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Static type of a value.
///
/// The numeric members form a precedence tower (decimal widest, i8
/// narrowest); `Array` only ever appears at runtime as the packed tail of a
/// variadic method call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    Char,
    Str,
    DateTime,
    Array,
}

impl ValueType {
    /// Whether this type participates in numeric arithmetic.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueType::I8
                | ValueType::U8
                | ValueType::I16
                | ValueType::U16
                | ValueType::I32
                | ValueType::U32
                | ValueType::I64
                | ValueType::U64
                | ValueType::F32
                | ValueType::F64
                | ValueType::Decimal
        )
    }

    /// Whether this type is an integer (any width, either signedness).
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ValueType::I8
                | ValueType::U8
                | ValueType::I16
                | ValueType::U16
                | ValueType::I32
                | ValueType::U32
                | ValueType::I64
                | ValueType::U64
        )
    }

    /// Whether this type is a signed integer.
    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            ValueType::I8 | ValueType::I16 | ValueType::I32 | ValueType::I64
        )
    }

    /// The zero-equivalent value of this type.
    ///
    /// Used when a null optional operand is unwrapped before an arithmetic
    /// or comparison operator: absent collapses to this default.
    pub fn default_value(self) -> Value {
        match self {
            ValueType::Null => Value::Null,
            ValueType::Bool => Value::Bool(false),
            ValueType::I8 => Value::I8(0),
            ValueType::U8 => Value::U8(0),
            ValueType::I16 => Value::I16(0),
            ValueType::U16 => Value::U16(0),
            ValueType::I32 => Value::I32(0),
            ValueType::U32 => Value::U32(0),
            ValueType::I64 => Value::I64(0),
            ValueType::U64 => Value::U64(0),
            ValueType::F32 => Value::F32(0.0),
            ValueType::F64 => Value::F64(0.0),
            ValueType::Decimal => Value::Decimal(Decimal::ZERO),
            ValueType::Char => Value::Char('\0'),
            ValueType::Str => Value::Str(String::new()),
            ValueType::DateTime => Value::DateTime(NaiveDateTime::default()),
            ValueType::Array => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Bool => "bool",
            ValueType::I8 => "int8",
            ValueType::U8 => "uint8",
            ValueType::I16 => "int16",
            ValueType::U16 => "uint16",
            ValueType::I32 => "int32",
            ValueType::U32 => "uint32",
            ValueType::I64 => "int64",
            ValueType::U64 => "uint64",
            ValueType::F32 => "float",
            ValueType::F64 => "double",
            ValueType::Decimal => "decimal",
            ValueType::Char => "char",
            ValueType::Str => "string",
            ValueType::DateTime => "datetime",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

/// A static type plus nullability.
///
/// Literals are never nullable; context members may be registered nullable,
/// in which case their getter is allowed to produce [`Value::Null`] at call
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataType {
    pub ty: ValueType,
    pub nullable: bool,
}

impl DataType {
    /// A plain, non-nullable type.
    pub fn simple(ty: ValueType) -> Self {
        Self {
            ty,
            nullable: false,
        }
    }

    /// A nullable type.
    pub fn nullable(ty: ValueType) -> Self {
        Self { ty, nullable: true }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.ty)
        } else {
            self.ty.fmt(f)
        }
    }
}

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    Char(char),
    Str(String),
    DateTime(NaiveDateTime),
    Array(Vec<Value>),
}

impl Value {
    /// The static type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::I8(_) => ValueType::I8,
            Value::U8(_) => ValueType::U8,
            Value::I16(_) => ValueType::I16,
            Value::U16(_) => ValueType::U16,
            Value::I32(_) => ValueType::I32,
            Value::U32(_) => ValueType::U32,
            Value::I64(_) => ValueType::I64,
            Value::U64(_) => ValueType::U64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::Decimal(_) => ValueType::Decimal,
            Value::Char(_) => ValueType::Char,
            Value::Str(_) => ValueType::Str,
            Value::DateTime(_) => ValueType::DateTime,
            Value::Array(_) => ValueType::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => v.fmt(f),
            Value::I8(v) => v.fmt(f),
            Value::U8(v) => v.fmt(f),
            Value::I16(v) => v.fmt(f),
            Value::U16(v) => v.fmt(f),
            Value::I32(v) => v.fmt(f),
            Value::U32(v) => v.fmt(f),
            Value::I64(v) => v.fmt(f),
            Value::U64(v) => v.fmt(f),
            Value::F32(v) => v.fmt(f),
            Value::F64(v) => v.fmt(f),
            Value::Decimal(v) => v.fmt(f),
            Value::Char(v) => v.fmt(f),
            Value::Str(v) => v.fmt(f),
            Value::DateTime(v) => v.fmt(f),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_value_from {
    ($($source:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(v: $source) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

impl_value_from! {
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    char => Char,
    String => Str,
    NaiveDateTime => DateTime,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}
