//! Method overload resolution against a context type.
//!
//! Given a call name and the already-compiled argument nodes, walks the
//! context type's base chain level by level. Within a level every
//! name-matching method is scored: 0 when every argument already has the
//! parameter's exact type, +1 per implicitly converted argument. An exact
//! match returns immediately; otherwise the lowest score wins, first in
//! declaration order on ties. The chain only continues downward when a
//! level produced no match at all.

use lambdacalc_core::context::{ContextType, MethodDef, MethodInvoker};
use lambdacalc_core::value::{DataType, ValueType};

use crate::coercion::can_widen_implicitly;
use crate::expr_info::ExprInfo;
use crate::node::Node;

/// A successfully resolved method call.
#[derive(Clone)]
pub struct ResolvedMethod {
    /// The registered (case-preserved) method name.
    pub name: String,
    pub invoker: MethodInvoker,
    pub return_type: DataType,
    /// Arguments adapted to the parameter types, with any variadic tail
    /// collected into one trailing [`Node::Pack`].
    pub prepared_args: Vec<Node>,
    /// Count of arguments that required conversion.
    pub score: u32,
}

/// Resolve `name(args)` against `context` and its base chain.
///
/// Returns `None` when nothing matches anywhere; the caller folds that
/// into its unknown-function handling.
pub fn resolve_method(
    context: &ContextType,
    name: &str,
    args: &[ExprInfo],
) -> Option<ResolvedMethod> {
    let mut level = Some(context);
    while let Some(ty) = level {
        let mut best: Option<ResolvedMethod> = None;
        for method in ty
            .methods()
            .iter()
            .filter(|m| m.name.eq_ignore_ascii_case(name))
        {
            let Some((score, prepared_args)) = prepare_arguments(method, args) else {
                continue;
            };
            let candidate = ResolvedMethod {
                name: method.name.clone(),
                invoker: method.invoker.clone(),
                return_type: method.return_type,
                prepared_args,
                score,
            };
            if score == 0 {
                return Some(candidate);
            }
            // Strict `<` keeps the first candidate on ties.
            if best.as_ref().is_none_or(|b| score < b.score) {
                best = Some(candidate);
            }
        }
        if best.is_some() {
            return best;
        }
        level = ty.base().map(|base| base.as_ref());
    }
    None
}

/// Bind arguments to a candidate's parameters.
///
/// Returns the score and the adapted argument list, or `None` when the
/// candidate is not viable (wrong arity, or some argument is neither an
/// exact match nor implicitly convertible).
fn prepare_arguments(method: &MethodDef, args: &[ExprInfo]) -> Option<(u32, Vec<Node>)> {
    let params = &method.params;
    if params.is_empty() {
        return args.is_empty().then(|| (0, Vec::new()));
    }

    let mut score = 0u32;
    if let Some(element) = method.rest_element_type() {
        // Rest parameter: the fixed prefix must be present, the tail may be
        // empty.
        let fixed = params.len() - 1;
        if args.len() < fixed {
            return None;
        }
        let mut prepared = Vec::with_capacity(params.len());
        for (arg, &param) in args[..fixed].iter().zip(params.iter()) {
            prepared.push(bind_argument(arg, param, &mut score)?);
        }
        let mut tail = Vec::with_capacity(args.len() - fixed);
        for arg in &args[fixed..] {
            tail.push(bind_argument(arg, element, &mut score)?);
        }
        prepared.push(Node::Pack { items: tail });
        Some((score, prepared))
    } else {
        if params.len() != args.len() {
            return None;
        }
        let mut prepared = Vec::with_capacity(params.len());
        for (arg, &param) in args.iter().zip(params.iter()) {
            prepared.push(bind_argument(arg, param, &mut score)?);
        }
        Some((score, prepared))
    }
}

/// Adapt one argument to a parameter type, or disqualify the candidate.
fn bind_argument(arg: &ExprInfo, param: ValueType, score: &mut u32) -> Option<Node> {
    // A nullable argument has no non-null static type to match against.
    if arg.data_type.nullable {
        return None;
    }
    let ty = arg.data_type.ty;
    if ty == param {
        return Some(arg.node.clone());
    }
    if can_widen_implicitly(ty, param) {
        *score += 1;
        return Some(Node::Convert {
            child: Box::new(arg.node.clone()),
            to: param,
        });
    }
    None
}
