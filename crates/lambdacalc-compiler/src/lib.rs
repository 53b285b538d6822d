//! Expression compiler: turns a parsed tree into a directly invokable
//! [`CompiledExpression`].
//!
//! One post-order walk resolves every identifier, coercion, string policy
//! and method overload up front; what remains is a tree of executable
//! nodes evaluated by structural recursion with no further lookups.

pub mod coercion;
pub mod expr;
pub mod expr_info;
pub mod node;
pub mod overload;
pub mod program;
pub mod strings;

pub use expr::{EvalTarget, ExprCompiler};
pub use expr_info::ExprInfo;
pub use node::Node;
pub use program::{compile, CompiledExpression};
pub use strings::StringPolicy;
