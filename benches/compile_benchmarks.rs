//! Performance benchmarks for expression compilation and invocation.
//!
//! Measures the two phases separately: the one-time compile (resolution,
//! coercion, overload scoring) and the repeated invoke (pure structural
//! evaluation), in both parameter and context mode.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use lambdacalc::prelude::*;
use rustc_hash::FxHashMap;

struct Order {
    quantity: i32,
    unit_price: f64,
}

fn order_type() -> Arc<ContextType> {
    ContextType::builder::<Order>("Order")
        .member("Quantity", ValueType::I32, |o| Value::I32(o.quantity))
        .member("UnitPrice", ValueType::F64, |o| Value::F64(o.unit_price))
        .method(
            "Discount",
            &[ValueType::F64],
            ValueType::F64,
            |o, args| match args[0] {
                Value::F64(rate) => Value::F64(o.unit_price * (1.0 - rate)),
                _ => Value::Null,
            },
        )
        .build()
}

/// `(a + b) * 3 > 10 ? a - b : max(a, b)`
fn nested_expr() -> Expr {
    Expr::ternary(
        Expr::binary(
            BinaryOp::Greater,
            Expr::binary(
                BinaryOp::Multiply,
                Expr::binary(BinaryOp::Add, Expr::ident("a"), Expr::ident("b")),
                Expr::literal(3),
            ),
            Expr::literal(10),
        ),
        Expr::binary(BinaryOp::Subtract, Expr::ident("a"), Expr::ident("b")),
        Expr::call("max", vec![Expr::ident("a"), Expr::ident("b")]),
    )
}

fn parameter_mode_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/parameters");

    let mut params = FxHashMap::default();
    params.insert("a".to_string(), Value::I32(6));
    params.insert("b".to_string(), Value::I32(2));
    let expr = nested_expr();

    group.bench_function("compile_nested", |b| {
        b.iter(|| {
            let compiled = lambdacalc::compile_with_parameters(
                black_box(&expr),
                &params,
                CompileOptions::empty(),
            )
            .unwrap();
            black_box(compiled)
        });
    });

    let compiled =
        lambdacalc::compile_with_parameters(&expr, &params, CompileOptions::empty()).unwrap();
    group.bench_function("invoke_nested", |b| {
        b.iter(|| black_box(compiled.invoke().unwrap()));
    });

    group.finish();
}

fn context_mode_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile/context");

    let ty = order_type();
    // Quantity * Discount(0.1) > 100
    let expr = Expr::binary(
        BinaryOp::Greater,
        Expr::binary(
            BinaryOp::Multiply,
            Expr::ident("Quantity"),
            Expr::call("Discount", vec![Expr::literal(0.1f64)]),
        ),
        Expr::literal(100.0f64),
    );

    group.bench_function("compile_method_call", |b| {
        b.iter(|| {
            let compiled = lambdacalc::compile_with_context(
                black_box(&expr),
                &ty,
                CompileOptions::empty(),
            )
            .unwrap();
            black_box(compiled)
        });
    });

    let compiled = lambdacalc::compile_with_context(&expr, &ty, CompileOptions::empty()).unwrap();
    let order = Order {
        quantity: 12,
        unit_price: 9.5,
    };
    group.bench_function("invoke_method_call", |b| {
        b.iter(|| black_box(compiled.invoke_with(&order).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, parameter_mode_benchmarks, context_mode_benchmarks);
criterion_main!(benches);
