use addyscript::{
    ast::{Expr, ExprKind, StatementKind},
    error::ValueError,
    parse,
    runtime::{
        bigdecimal::DecimalError,
        value::{Kind, Value},
    },
};

/// Folds an expression made of literals and operators.
fn fold(expr: &Expr) -> Result<Value, ValueError> {
    match &expr.kind {
        ExprKind::Literal(value) => Ok(value.clone()),
        ExprKind::Unary { op, operand } => fold(operand)?.unary_operation(*op),
        ExprKind::Binary { op, left, right } => fold(left)?.binary_operation(*op, &fold(right)?),
        other => panic!("cannot fold {other:?}"),
    }
}

fn eval(source: &str) -> Result<Value, ValueError> {
    let program = parse(&format!("{source};"), "values.add").unwrap();
    match &program.statements[0].kind {
        StatementKind::Expression(expr) => fold(expr),
        other => panic!("not an expression: {other:?}"),
    }
}

fn assert_eval(source: &str, expected: &str, kind: Kind) {
    let value = eval(source).unwrap_or_else(|e| panic!("{source} failed: {e}"));
    assert_eq!((value.to_string().as_str(), value.kind()), (expected, kind), "for {source}");
}

#[test]
fn integers_widen_on_overflow() {
    assert_eval("2147483647 + 1", "2147483648", Kind::Long);
    assert_eval("2 ** 10", "1024", Kind::Integer);
    assert_eval("0x7fffffff * 4", "8589934588", Kind::Long);
}

#[test]
fn fractions_stay_exact() {
    assert_eval("1 / 3", "1/3", Kind::Rational);
    assert_eval("1 / 3 + 1 / 3 + 1 / 3", "1", Kind::Integer);
    assert_eval("1 / 4 * 2.0", "0.5", Kind::Float);
}

#[test]
fn decimals() {
    assert_eval("1.5d + 0.25d", "1.75", Kind::Decimal);
    assert_eval("10d / 4", "2.5", Kind::Decimal);
    assert_eval("1 + 0.5d", "1.5", Kind::Decimal);
    assert_eq!(eval("1d / 0"), Err(ValueError::DivisionByZero));
    assert_eq!(eval("0.001d ** 2147483647"), Err(ValueError::Decimal(DecimalError::Overflow)));
}

#[test]
fn strings_and_comparisons() {
    assert_eval("'abc' + 1", "abc1", Kind::String);
    assert_eval("'hello' startswith 'he'", "true", Kind::Boolean);
    assert_eval("1 == 1.0", "true", Kind::Boolean);
    assert_eval("1 === 1.0", "false", Kind::Boolean);
    assert_eval("'12' == 12", "true", Kind::Boolean);
    assert_eval("null ?? 'fallback'", "fallback", Kind::String);
}

#[test]
fn unsupported_operations_fail() {
    assert!(eval("true - 'a'").is_err());
    assert!(eval("null * 2").is_err());
}
