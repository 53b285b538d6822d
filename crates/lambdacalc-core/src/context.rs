//! Context type registry.
//!
//! Identifier and method resolution in context mode needs a queryable
//! description of the context value's type: its members, its methods, and
//! its base type. Instead of runtime type introspection this is an explicit
//! registry: a [`ContextType`] holds `(name, type, accessor)` descriptors
//! registered up front through a typed builder, and compiled expressions
//! reach the live value through `&dyn Any` downcasts hidden inside those
//! accessors.
//!
//! Registration happens once, single-threaded; after that a `ContextType`
//! is read-only and shared behind an [`Arc`].

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::RuntimeError;
use crate::value::{DataType, Value, ValueType};

/// Reads one member off the call-time context value.
pub type MemberGetter = Arc<dyn Fn(&dyn Any) -> Result<Value, RuntimeError> + Send + Sync>;

/// Invokes one method on the call-time context value.
pub type MethodInvoker =
    Arc<dyn Fn(&dyn Any, &[Value]) -> Result<Value, RuntimeError> + Send + Sync>;

/// A field or property of a context type. Matched case-sensitively.
#[derive(Clone)]
pub struct MemberDef {
    pub name: String,
    pub data_type: DataType,
    pub getter: MemberGetter,
}

impl fmt::Debug for MemberDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDef")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .finish_non_exhaustive()
    }
}

/// An instance method of a context type. Matched case-insensitively.
#[derive(Clone)]
pub struct MethodDef {
    pub name: String,
    /// Declared parameter types. When `variadic` is set the last entry is
    /// the element type of the rest parameter.
    pub params: Vec<ValueType>,
    pub variadic: bool,
    pub return_type: DataType,
    pub invoker: MethodInvoker,
}

impl MethodDef {
    /// Element type of the rest parameter, if this method has one.
    pub fn rest_element_type(&self) -> Option<ValueType> {
        if self.variadic {
            self.params.last().copied()
        } else {
            None
        }
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("variadic", &self.variadic)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

/// Queryable description of a context value's type.
#[derive(Debug)]
pub struct ContextType {
    name: String,
    base: Option<Arc<ContextType>>,
    members: FxHashMap<String, MemberDef>,
    methods: Vec<MethodDef>,
}

impl ContextType {
    /// Start describing the type of `T`.
    pub fn builder<T: 'static>(name: impl Into<String>) -> ContextTypeBuilder<T> {
        ContextTypeBuilder {
            name: name.into(),
            base: None,
            members: FxHashMap::default(),
            methods: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base type, if one was registered.
    pub fn base(&self) -> Option<&Arc<ContextType>> {
        self.base.as_ref()
    }

    /// Case-sensitive member lookup, walking the base chain.
    pub fn member(&self, name: &str) -> Option<&MemberDef> {
        let mut ty = Some(self);
        while let Some(current) = ty {
            if let Some(member) = current.members.get(name) {
                return Some(member);
            }
            ty = current.base.as_deref();
        }
        None
    }

    /// Methods declared at this level only (base levels are searched
    /// separately so that a match closer to the concrete type wins).
    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }
}

/// Typed builder for a [`ContextType`].
///
/// Getters and invokers are registered against the concrete `T` and wrapped
/// so the stored accessor downcasts the `&dyn Any` it receives; a wrong
/// concrete type at call time surfaces as
/// [`RuntimeError::ContextTypeMismatch`].
pub struct ContextTypeBuilder<T: 'static> {
    name: String,
    base: Option<Arc<ContextType>>,
    members: FxHashMap<String, MemberDef>,
    methods: Vec<MethodDef>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: 'static> ContextTypeBuilder<T> {
    /// Register the base type; its members and methods are searched after
    /// this level's.
    pub fn base(mut self, base: Arc<ContextType>) -> Self {
        self.base = Some(base);
        self
    }

    /// Register a non-nullable member.
    pub fn member<F>(self, name: impl Into<String>, ty: ValueType, getter: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.member_with_type(name, DataType::simple(ty), getter)
    }

    /// Register a nullable member; its getter may produce [`Value::Null`].
    pub fn nullable_member<F>(self, name: impl Into<String>, ty: ValueType, getter: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.member_with_type(name, DataType::nullable(ty), getter)
    }

    fn member_with_type<F>(mut self, name: impl Into<String>, data_type: DataType, getter: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        let getter: MemberGetter = Arc::new(move |any| Ok(getter(downcast::<T>(any)?)));
        self.members.insert(
            name.clone(),
            MemberDef {
                name,
                data_type,
                getter,
            },
        );
        self
    }

    /// Register a fixed-arity method.
    pub fn method<F>(
        mut self,
        name: impl Into<String>,
        params: &[ValueType],
        return_type: ValueType,
        body: F,
    ) -> Self
    where
        F: Fn(&T, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.push(make_method(name, params, false, return_type, body));
        self
    }

    /// Register a method whose last parameter is a rest parameter; trailing
    /// arguments arrive packed into one [`Value::Array`].
    pub fn variadic_method<F>(
        mut self,
        name: impl Into<String>,
        params: &[ValueType],
        return_type: ValueType,
        body: F,
    ) -> Self
    where
        F: Fn(&T, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.methods.push(make_method(name, params, true, return_type, body));
        self
    }

    pub fn build(self) -> Arc<ContextType> {
        Arc::new(ContextType {
            name: self.name,
            base: self.base,
            members: self.members,
            methods: self.methods,
        })
    }
}

fn make_method<T, F>(
    name: impl Into<String>,
    params: &[ValueType],
    variadic: bool,
    return_type: ValueType,
    body: F,
) -> MethodDef
where
    T: 'static,
    F: Fn(&T, &[Value]) -> Value + Send + Sync + 'static,
{
    let invoker: MethodInvoker = Arc::new(move |any, args| Ok(body(downcast::<T>(any)?, args)));
    MethodDef {
        name: name.into(),
        params: params.to_vec(),
        variadic,
        return_type: DataType::simple(return_type),
        invoker,
    }
}

fn downcast<T: 'static>(any: &dyn Any) -> Result<&T, RuntimeError> {
    any.downcast_ref::<T>()
        .ok_or(RuntimeError::ContextTypeMismatch {
            expected: std::any::type_name::<T>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        field_a: i32,
    }

    fn probe_type() -> Arc<ContextType> {
        ContextType::builder::<Probe>("Probe")
            .member("FieldA", ValueType::I32, |p| Value::I32(p.field_a))
            .method("Test", &[ValueType::I32, ValueType::I32], ValueType::I32, |_, args| {
                match (&args[0], &args[1]) {
                    (Value::I32(a), Value::I32(b)) => Value::I32(a + b),
                    _ => Value::Null,
                }
            })
            .build()
    }

    #[test]
    fn member_lookup_is_case_sensitive() {
        let ty = probe_type();
        assert!(ty.member("FieldA").is_some());
        assert!(ty.member("fielda").is_none());
    }

    #[test]
    fn member_getter_reads_live_value() {
        let ty = probe_type();
        let probe = Probe { field_a: 7 };
        let member = ty.member("FieldA").unwrap();
        let value = (member.getter)(&probe).unwrap();
        assert_eq!(value, Value::I32(7));
    }

    #[test]
    fn wrong_concrete_type_is_reported() {
        let ty = probe_type();
        let member = ty.member("FieldA").unwrap();
        let result = (member.getter)(&"not a probe");
        assert!(matches!(
            result,
            Err(RuntimeError::ContextTypeMismatch { .. })
        ));
    }

    #[test]
    fn base_chain_member_lookup() {
        let base = ContextType::builder::<Probe>("Base")
            .member("Inherited", ValueType::Bool, |_| Value::Bool(true))
            .build();
        let derived = ContextType::builder::<Probe>("Derived")
            .base(base)
            .member("FieldA", ValueType::I32, |p| Value::I32(p.field_a))
            .build();

        assert!(derived.member("Inherited").is_some());
        assert!(derived.member("FieldA").is_some());
        // Methods are per-level; the base's method list is reached via base().
        assert!(derived.base().is_some());
    }

    #[test]
    fn rest_element_type() {
        let ty = ContextType::builder::<Probe>("Probe")
            .variadic_method("Sum", &[ValueType::I32], ValueType::I32, |_, _| Value::I32(0))
            .build();
        assert_eq!(ty.methods()[0].rest_element_type(), Some(ValueType::I32));
    }
}
