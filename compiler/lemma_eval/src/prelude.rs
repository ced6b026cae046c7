//! Rules written in Lemma itself, loaded into every standard context.

use lemma_parse::{ParseError, Parser};

use crate::print_handler::silent_handler;
use crate::{Context, Environment, EvalError, Evaluator};

/// Arithmetic operators on numbers, simple identities and factorial.
///
/// Numeric rules come first in each rule base so identities only see
/// symbolic operands.
pub const PRELUDE: &str = r"
// Numbers.
_a::IsNumber + _b::IsNumber <-- MathAdd(a, b);
_a::IsNumber - _b::IsNumber <-- MathSubtract(a, b);
_a::IsNumber * _b::IsNumber <-- MathMultiply(a, b);
_a::IsNumber / _b::IsNumber <-- MathDivide(a, b);
_a::IsNumber ^ _b::IsInteger <-- MathPower(a, b);
- _a::IsNumber <-- MathNegate(a);

_a < _b _ IsNumber(a) And IsNumber(b) <-- MathLessThan(a, b);
_a > _b _ IsNumber(a) And IsNumber(b) <-- MathGreaterThan(a, b);
_a <= _b _ IsNumber(a) And IsNumber(b) <-- Not(MathGreaterThan(a, b));
_a >= _b _ IsNumber(a) And IsNumber(b) <-- Not(MathLessThan(a, b));

// Identities.
0 + _x <-- x;
_x + 0 <-- x;
_x - 0 <-- x;
_x - _x <-- 0;
0 - _x <-- -x;
- (- _x) <-- x;
0 * _x <-- 0;
_x * 0 <-- 0;
1 * _x <-- x;
_x * 1 <-- x;
_x / 1 <-- x;
_x ^ 0 <-- 1;
_x ^ 1 <-- x;

// Factorial.
0! <-- 1;
_n::IsPositiveInteger ! <-- n * (n - 1)!;
";

/// Failure while loading the prelude.
#[derive(Debug, thiserror::Error)]
pub enum PreludeError {
    #[error("prelude does not parse: {0}")]
    Parse(#[from] ParseError),
    #[error("prelude failed to evaluate: {0}")]
    Eval(#[from] EvalError),
}

/// Evaluate every statement of [`PRELUDE`] in `context`.
pub fn load_prelude(context: &Context) -> Result<(), PreludeError> {
    let mut env = Environment::default();
    let mut evaluator = Evaluator::new(context, &mut env, silent_handler());
    let mut offset = 0;
    loop {
        let statement = {
            let operators = context.operators().read();
            let mut parser = Parser::at(PRELUDE, offset, &operators, context.interner());
            let statement = parser.parse_statement()?;
            offset = parser.offset();
            statement
        };
        let Some(statement) = statement else {
            break;
        };
        evaluator.eval(&statement)?;
    }
    tracing::debug!(rules = context.rules().read().len(), "prelude loaded");
    Ok(())
}
