//! Call compilation.
//!
//! Resolution order is fixed: the `if` and `in` special forms first (they
//! are structural, not method calls), then context-method overload
//! resolution (user methods shadow the built-ins), then the built-in table
//! `min` / `max` / `pow`, and finally `UnknownFunction`. All name matching
//! is case-insensitive.

use lambdacalc_core::ast::Expr;
use lambdacalc_core::error::CompileError;
use lambdacalc_core::value::{DataType, ValueType};

use super::{EvalTarget, ExprCompiler, Result};
use crate::coercion::{can_widen_implicitly, if_priority_index, unwrap_nullable, widen_to, IF_NUMERIC_PRIORITY};
use crate::expr_info::ExprInfo;
use crate::node::{MinMaxKind, Node};
use crate::overload::resolve_method;

pub(crate) fn compile(
    compiler: &ExprCompiler<'_>,
    name: &str,
    args: &[Expr],
) -> Result<ExprInfo> {
    if name.eq_ignore_ascii_case("if") {
        return compile_if(compiler, name, args);
    }
    if name.eq_ignore_ascii_case("in") {
        return compile_in(compiler, name, args);
    }

    let compiled = args
        .iter()
        .map(|arg| compiler.compile(arg))
        .collect::<Result<Vec<_>>>()?;

    if let EvalTarget::Context(context) = &compiler.target {
        if let Some(resolved) = resolve_method(context, name, &compiled) {
            return Ok(ExprInfo::new(
                Node::MethodCall {
                    name: resolved.name,
                    invoker: resolved.invoker,
                    args: resolved.prepared_args,
                },
                resolved.return_type,
            ));
        }
    }

    if name.eq_ignore_ascii_case("min") {
        return compile_min_max(name, MinMaxKind::Min, compiled);
    }
    if name.eq_ignore_ascii_case("max") {
        return compile_min_max(name, MinMaxKind::Max, compiled);
    }
    if name.eq_ignore_ascii_case("pow") {
        return compile_pow(name, compiled);
    }

    Err(CompileError::UnknownFunction {
        name: name.to_string(),
    })
}

/// `if(test, a, b)`: a conditional in call syntax. Branch unification uses
/// the deliberately smaller numeric ranking, so only double, float and the
/// signed 16/32/64-bit integers take part in widening here.
fn compile_if(compiler: &ExprCompiler<'_>, name: &str, args: &[Expr]) -> Result<ExprInfo> {
    let [test, if_true, if_false] = args else {
        return Err(CompileError::ArityMismatch {
            function: name.to_string(),
            expected: 3,
            found: args.len(),
        });
    };

    let test = compiler.compile(test)?;
    if test.data_type.ty != ValueType::Bool {
        return Err(CompileError::TypeMismatch {
            message: format!("'if' condition must be bool, got {}", test.data_type),
        });
    }

    let mut if_true = compiler.compile(if_true)?;
    let mut if_false = compiler.compile(if_false)?;
    if if_true.data_type != if_false.data_type {
        if_true = unwrap_nullable(if_true);
        if_false = unwrap_nullable(if_false);
    }
    if if_true.data_type.ty != if_false.data_type.ty {
        match (
            if_priority_index(if_true.data_type.ty),
            if_priority_index(if_false.data_type.ty),
        ) {
            (Some(t), Some(f)) => {
                let target = IF_NUMERIC_PRIORITY[t.min(f)];
                if_true = widen_to(if_true, target);
                if_false = widen_to(if_false, target);
            }
            _ => {
                return Err(CompileError::TypeMismatch {
                    message: format!(
                        "'if' branches have incompatible types {} and {}",
                        if_true.data_type, if_false.data_type
                    ),
                });
            }
        }
    }

    let data_type = if_true.data_type;
    Ok(ExprInfo::new(
        Node::Branch {
            test: Box::new(test.node),
            if_true: Box::new(if_true.node),
            if_false: Box::new(if_false.node),
        },
        data_type,
    ))
}

/// `in(needle, a, b, ...)`: membership test. Every item must have the
/// needle's type or implicitly widen to it; anything else fails the
/// compilation rather than silently never matching.
fn compile_in(compiler: &ExprCompiler<'_>, name: &str, args: &[Expr]) -> Result<ExprInfo> {
    if args.len() < 2 {
        return Err(CompileError::ArityMismatch {
            function: name.to_string(),
            expected: 2,
            found: args.len(),
        });
    }

    let needle = compiler.compile(&args[0])?;
    let needle_ty = needle.data_type.ty;
    let items = args[1..]
        .iter()
        .map(|item| {
            let item = compiler.compile(item)?;
            let item_ty = item.data_type.ty;
            if item_ty != needle_ty && !can_widen_implicitly(item_ty, needle_ty) {
                return Err(CompileError::TypeMismatch {
                    message: format!(
                        "'{name}' item of type {item_ty} does not match {needle_ty}"
                    ),
                });
            }
            Ok(widen_to(item, needle_ty).node)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ExprInfo::new(
        Node::InArray {
            needle: Box::new(needle.node),
            items,
        },
        DataType::simple(ValueType::Bool),
    ))
}

fn compile_min_max(name: &str, kind: MinMaxKind, args: Vec<ExprInfo>) -> Result<ExprInfo> {
    let [left, right] = take_two(name, args)?;
    Ok(ExprInfo::new(
        Node::MinMax {
            kind,
            left: Box::new(to_double(name, left)?.node),
            right: Box::new(to_double(name, right)?.node),
        },
        DataType::simple(ValueType::F64),
    ))
}

fn compile_pow(name: &str, args: Vec<ExprInfo>) -> Result<ExprInfo> {
    let [base, exp] = take_two(name, args)?;
    Ok(ExprInfo::new(
        Node::Pow {
            base: Box::new(to_double(name, base)?.node),
            exp: Box::new(to_double(name, exp)?.node),
        },
        DataType::simple(ValueType::F64),
    ))
}

fn take_two(name: &str, args: Vec<ExprInfo>) -> Result<[ExprInfo; 2]> {
    let found = args.len();
    <[ExprInfo; 2]>::try_from(args).map_err(|_| CompileError::ArityMismatch {
        function: name.to_string(),
        expected: 2,
        found,
    })
}

/// Built-ins compute over doubles; any numeric argument converts.
fn to_double(name: &str, info: ExprInfo) -> Result<ExprInfo> {
    let info = unwrap_nullable(info);
    if !info.data_type.ty.is_numeric() {
        return Err(CompileError::TypeMismatch {
            message: format!("'{name}' requires numeric arguments, got {}", info.data_type),
        });
    }
    Ok(widen_to(info, ValueType::F64))
}

#[cfg(test)]
mod tests {
    use super::super::testing::eval;
    use super::super::{EvalTarget, ExprCompiler};
    use lambdacalc_core::ast::Expr;
    use lambdacalc_core::context::ContextType;
    use lambdacalc_core::error::CompileError;
    use lambdacalc_core::options::CompileOptions;
    use lambdacalc_core::value::{Value, ValueType};
    use rust_decimal::Decimal;

    #[test]
    fn if_selects_branch_by_condition() {
        let expr = Expr::call(
            "if",
            vec![Expr::literal(true), Expr::literal(1), Expr::literal(2)],
        );
        assert_eq!(eval(&expr), Ok(Value::I32(1)));
    }

    #[test]
    fn if_widens_branches_over_the_reduced_ranking() {
        let expr = Expr::call(
            "if",
            vec![Expr::literal(false), Expr::literal(1), Expr::literal(2.5f64)],
        );
        assert_eq!(eval(&expr), Ok(Value::F64(2.5)));
    }

    #[test]
    fn if_rejects_decimal_branches() {
        // Decimal is outside the reduced ranking, so mixed branches fail.
        let expr = Expr::call(
            "if",
            vec![
                Expr::literal(true),
                Expr::literal(Decimal::ONE),
                Expr::literal(1),
            ],
        );
        assert!(matches!(eval(&expr), Err(CompileError::TypeMismatch { .. })));
    }

    #[test]
    fn if_arity_is_enforced() {
        let expr = Expr::call("if", vec![Expr::literal(true), Expr::literal(1)]);
        assert_eq!(
            eval(&expr),
            Err(CompileError::ArityMismatch {
                function: "if".to_string(),
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn in_scans_the_materialized_items() {
        let expr = Expr::call(
            "in",
            vec![Expr::literal(2), Expr::literal(1), Expr::literal(2), Expr::literal(3)],
        );
        assert_eq!(eval(&expr), Ok(Value::Bool(true)));

        let expr = Expr::call("in", vec![Expr::literal(9), Expr::literal(1)]);
        assert_eq!(eval(&expr), Ok(Value::Bool(false)));
    }

    #[test]
    fn in_widens_items_to_the_needle_type() {
        let expr = Expr::call(
            "in",
            vec![Expr::literal(2i64), Expr::literal(1), Expr::literal(2)],
        );
        assert_eq!(eval(&expr), Ok(Value::Bool(true)));
    }

    #[test]
    fn in_requires_at_least_one_item() {
        let expr = Expr::call("in", vec![Expr::literal(1)]);
        assert!(matches!(eval(&expr), Err(CompileError::ArityMismatch { .. })));
    }

    #[test]
    fn in_rejects_items_of_a_foreign_type() {
        let expr = Expr::call("in", vec![Expr::literal(1), Expr::literal("a")]);
        assert!(matches!(eval(&expr), Err(CompileError::TypeMismatch { .. })));

        // Narrowing is not implicit either.
        let expr = Expr::call("in", vec![Expr::literal(1i16), Expr::literal(1)]);
        assert!(matches!(eval(&expr), Err(CompileError::TypeMismatch { .. })));
    }

    #[test]
    fn min_max_compute_over_doubles() {
        let expr = Expr::call("min", vec![Expr::literal(3), Expr::literal(2.5f64)]);
        assert_eq!(eval(&expr), Ok(Value::F64(2.5)));

        let expr = Expr::call("Max", vec![Expr::literal(3), Expr::literal(2)]);
        assert_eq!(eval(&expr), Ok(Value::F64(3.0)));
    }

    #[test]
    fn pow_computes_over_doubles() {
        let expr = Expr::call("pow", vec![Expr::literal(2), Expr::literal(10)]);
        assert_eq!(eval(&expr), Ok(Value::F64(1024.0)));
    }

    #[test]
    fn builtins_reject_non_numeric_arguments() {
        let expr = Expr::call("pow", vec![Expr::literal("2"), Expr::literal(3)]);
        assert!(matches!(eval(&expr), Err(CompileError::TypeMismatch { .. })));
    }

    #[test]
    fn unknown_function_is_reported() {
        let expr = Expr::call("nope", vec![]);
        assert_eq!(
            eval(&expr),
            Err(CompileError::UnknownFunction {
                name: "nope".to_string()
            })
        );
    }

    #[test]
    fn context_method_shadows_builtin() {
        struct Probe;
        let ty = ContextType::builder::<Probe>("Probe")
            .method("min", &[ValueType::I32, ValueType::I32], ValueType::I32, |_, _| {
                Value::I32(-1)
            })
            .build();
        let compiler =
            ExprCompiler::new(EvalTarget::Context(&ty), CompileOptions::empty());

        let expr = Expr::call("min", vec![Expr::literal(1), Expr::literal(2)]);
        let info = compiler.compile(&expr).unwrap();
        assert_eq!(info.node.eval(Some(&Probe)), Ok(Value::I32(-1)));
    }

    #[test]
    fn builtins_remain_available_in_context_mode() {
        struct Probe;
        let ty = ContextType::builder::<Probe>("Probe").build();
        let compiler =
            ExprCompiler::new(EvalTarget::Context(&ty), CompileOptions::empty());

        let expr = Expr::call("max", vec![Expr::literal(1), Expr::literal(2)]);
        let info = compiler.compile(&expr).unwrap();
        assert_eq!(info.node.eval(Some(&Probe)), Ok(Value::F64(2.0)));
    }
}
