//! Numeric primitives. Operands must be numbers.

use std::cmp::Ordering;

use lemma_ir::{Expr, ExprKind, Number, NumberError, NumericContext, StringInterner};
use lemma_stack::ensure_sufficient_stack;

use super::helpers::{digits, number, unevaluated};
use crate::errors::number_error;
use crate::registry::Arity;
use crate::{EvalResult, Evaluator, Primitive, PrimitiveFn, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    let unary = |func: PrimitiveFn| Primitive::new(Arity::Fixed(1), func);
    let binary = |func: PrimitiveFn| Primitive::new(Arity::Fixed(2), func);

    table.define(interner, "MathAdd", binary(add));
    table.define(interner, "MathSubtract", binary(subtract));
    table.define(interner, "MathMultiply", binary(multiply));
    table.define(interner, "MathDivide", binary(divide));
    table.define(interner, "MathPower", binary(power));
    table.define(interner, "MathNegate", unary(negate));
    table.define(interner, "MathLessThan", binary(less_than));
    table.define(interner, "MathGreaterThan", binary(greater_than));
    table.define(interner, "MathMod", binary(modulo));
    table.define(interner, "MathDiv", binary(div_int));
    table.define(interner, "MathGcd", binary(gcd));
    table.define(interner, "MathAbs", unary(abs));
    table.define(interner, "MathFloor", unary(floor));
    table.define(interner, "MathSqrt", unary(sqrt));
    table.define(interner, "N", unary(numeric));
    table.define(interner, "N", binary(numeric_with_digits));
}

/// Apply `op` to two numeric operands under the session's numeric context.
fn binary_op(
    ev: &Evaluator<'_>,
    name: &str,
    args: &[Expr],
    op: impl FnOnce(&Number, &Number, &NumericContext) -> Result<Number, NumberError>,
) -> EvalResult {
    let (a, b) = (number(&args[0])?, number(&args[1])?);
    let result = op(a, b, &ev.numeric()).map_err(|e| number_error(name, &e))?;
    Ok(Expr::number(result))
}

fn unary_op(
    ev: &Evaluator<'_>,
    name: &str,
    args: &[Expr],
    op: impl FnOnce(&Number, &NumericContext) -> Result<Number, NumberError>,
) -> EvalResult {
    let result = op(number(&args[0])?, &ev.numeric()).map_err(|e| number_error(name, &e))?;
    Ok(Expr::number(result))
}

fn add(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    binary_op(ev, "MathAdd", args, Number::add)
}

fn subtract(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    binary_op(ev, "MathSubtract", args, Number::sub)
}

fn multiply(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    binary_op(ev, "MathMultiply", args, Number::mul)
}

fn divide(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    binary_op(ev, "MathDivide", args, Number::div)
}

/// Integer exponents only; anything else is left as `MathPower(a, b)`.
fn power(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let (base, exponent) = (number(&args[0])?, number(&args[1])?);
    match base.pow(exponent, &ev.numeric()) {
        Ok(result) => Ok(Expr::number(result)),
        Err(NumberError::NonIntegerExponent) => Ok(unevaluated(ev, "MathPower", args)),
        Err(e) => Err(number_error("MathPower", &e)),
    }
}

fn negate(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    unary_op(ev, "MathNegate", args, |n, _| Ok(n.neg()))
}

fn compare(ev: &Evaluator<'_>, name: &str, args: &[Expr], wanted: Ordering) -> EvalResult {
    let (a, b) = (number(&args[0])?, number(&args[1])?);
    let ordering = a.cmp_value(b).map_err(|e| number_error(name, &e))?;
    Ok(ev.boolean(ordering == wanted))
}

fn less_than(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    compare(ev, "MathLessThan", args, Ordering::Less)
}

fn greater_than(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    compare(ev, "MathGreaterThan", args, Ordering::Greater)
}

fn modulo(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    binary_op(ev, "MathMod", args, |a, b, _| a.modulo(b))
}

fn div_int(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    binary_op(ev, "MathDiv", args, |a, b, _| a.div_int(b))
}

fn gcd(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    binary_op(ev, "MathGcd", args, |a, b, _| a.gcd(b))
}

fn abs(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    unary_op(ev, "MathAbs", args, |n, _| Ok(n.abs()))
}

fn floor(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    unary_op(ev, "MathFloor", args, |n, _| n.floor())
}

fn sqrt(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    unary_op(ev, "MathSqrt", args, Number::sqrt)
}

/// `N(x)`: every number in `x` becomes a real at the working precision,
/// then the result is evaluated again.
fn numeric(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let digits = ev.env().config().precision;
    let converted = to_reals(&args[0], digits)?;
    ev.eval(&converted)
}

/// `N(x, digits)`: as `N(x)` with the precision raised or lowered for the
/// duration of the call.
fn numeric_with_digits(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let digits = digits("N", &args[1])?;
    let previous = ev.env().config().precision;
    ev.env_mut().config_mut().precision = digits;
    let result = to_reals(&args[0], digits).and_then(|converted| ev.eval(&converted));
    ev.env_mut().config_mut().precision = previous;
    result
}

fn to_reals(expr: &Expr, digits: u32) -> EvalResult {
    match expr.kind() {
        ExprKind::Number(n) => n
            .to_real(digits)
            .map(Expr::number)
            .map_err(|e| number_error("N", &e)),
        ExprKind::List(items) => {
            let converted = items
                .iter()
                .map(|item| ensure_sufficient_stack(|| to_reals(item, digits)))
                .collect::<EvalResult<Vec<_>>>()?;
            Ok(expr.with_items(converted))
        }
        ExprKind::Atom(_) | ExprKind::Str(_) | ExprKind::Generic(_) => Ok(expr.clone()),
    }
}
