//! Session harness for unit tests.

use lemma_ir::Expr;
use lemma_parse::Parser;

use crate::print_handler::buffer_handler;
use crate::{Context, Environment, EvalConfig, EvalError, EvalResult, Evaluator, SharedPrintHandler};

pub(crate) struct Harness {
    pub context: Context,
    pub env: Environment,
    pub output: SharedPrintHandler,
}

impl Harness {
    /// Standard context with the prelude.
    pub fn new() -> Self {
        Self::with_context(Context::standard().unwrap())
    }

    /// Core primitives only.
    pub fn bare() -> Self {
        Self::with_context(Context::bare())
    }

    fn with_context(context: Context) -> Self {
        Harness {
            context,
            env: Environment::new(EvalConfig::default()),
            output: buffer_handler(),
        }
    }

    pub fn evaluator(&mut self) -> Evaluator<'_> {
        Evaluator::new(&self.context, &mut self.env, self.output.clone())
    }

    /// Parse a single statement with the current operators.
    pub fn parse(&self, source: &str) -> Expr {
        let operators = self.context.operators().read();
        let mut parser = Parser::new(source, &operators, self.context.interner());
        parser.parse_statement().unwrap().unwrap()
    }

    /// Evaluate every statement; the value of the last one.
    pub fn eval(&mut self, source: &str) -> EvalResult {
        let mut offset = 0;
        let mut last = None;
        loop {
            let statement = {
                let operators = self.context.operators().read();
                let mut parser = Parser::at(source, offset, &operators, self.context.interner());
                let statement = parser.parse_statement().unwrap();
                offset = parser.offset();
                statement
            };
            let Some(statement) = statement else {
                break;
            };
            last = Some(self.evaluator().eval(&statement)?);
        }
        Ok(last.unwrap())
    }

    /// Evaluate and render the result.
    pub fn run(&mut self, source: &str) -> String {
        let value = self.eval(source).unwrap();
        self.context.render(&value)
    }

    pub fn error(&mut self, source: &str) -> EvalError {
        self.eval(source).unwrap_err()
    }

    pub fn output(&self) -> String {
        self.output.get_output()
    }
}
