//! Statement-at-a-time evaluation over one environment.

use lemma_eval::{
    stdout_handler, Context, Environment, EvalConfig, EvalError, Evaluator, PreludeError,
    SharedPrintHandler,
};
use lemma_ir::Expr;
use lemma_parse::lisp::LispReader;
use lemma_parse::{ParseError, Parser};

/// Failure of a session call.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Prelude(#[from] PreludeError),
    #[error("parse error [{}]: {0}", .0.code())]
    Parse(#[from] ParseError),
    #[error("evaluation error [{}]: {0}", .0.code())]
    Eval(#[from] EvalError),
    #[error("no statement to evaluate")]
    NoStatement,
}

/// A context plus one environment and an output sink.
pub struct Session {
    context: Context,
    env: Environment,
    output: SharedPrintHandler,
}

impl Session {
    /// Standard context with the prelude, configured from `LEMMA_*`
    /// environment variables, printing to stdout.
    pub fn new() -> Result<Self, SessionError> {
        Self::with_config(EvalConfig::from_env())
    }

    pub fn with_config(config: EvalConfig) -> Result<Self, SessionError> {
        Ok(Self::with_context(Context::standard()?, config))
    }

    /// Session over an existing context. Sessions built from clones of one
    /// context share its operators and rules but not their variables.
    pub fn with_context(context: Context, config: EvalConfig) -> Self {
        Session {
            context,
            env: Environment::new(config),
            output: stdout_handler(),
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: SharedPrintHandler) -> Self {
        self.output = output;
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    /// Parse every statement of `source` against the current operators
    /// without evaluating anything.
    pub fn parse(&self, source: &str) -> Result<Vec<Expr>, SessionError> {
        let operators = self.context.operators().read();
        let mut parser = Parser::new(source, &operators, self.context.interner());
        let mut statements = Vec::new();
        while let Some(statement) = parser.parse_statement()? {
            statements.push(statement);
        }
        Ok(statements)
    }

    /// Read Lisp-form text: `(+ 1 (* 2 3))`.
    pub fn read_lisp(&self, source: &str) -> Result<Vec<Expr>, SessionError> {
        Ok(LispReader::new(source, self.context.interner()).read_all()?)
    }

    pub fn eval(&mut self, expr: &Expr) -> Result<Expr, SessionError> {
        let mut evaluator = Evaluator::new(&self.context, &mut self.env, self.output.clone());
        Ok(evaluator.eval(expr)?)
    }

    /// Parse and evaluate each statement in turn; the value of each.
    ///
    /// Stops at the first parse or evaluation error. Statements before it
    /// keep their effects.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn eval_str(&mut self, source: &str) -> Result<Vec<Expr>, SessionError> {
        let mut values = Vec::new();
        let mut offset = 0;
        while let Some(statement) = self.next_statement(source, &mut offset)? {
            values.push(self.eval(&statement)?);
        }
        Ok(values)
    }

    /// Value of the last statement in `source`.
    pub fn eval_last(&mut self, source: &str) -> Result<Expr, SessionError> {
        self.eval_str(source)?
            .pop()
            .ok_or(SessionError::NoStatement)
    }

    /// Evaluate and render the value of the last statement.
    pub fn run(&mut self, source: &str) -> Result<String, SessionError> {
        let value = self.eval_last(source)?;
        Ok(self.render(&value))
    }

    pub fn render(&self, expr: &Expr) -> String {
        self.context.render(expr)
    }

    pub fn render_lisp(&self, expr: &Expr) -> String {
        self.context.render_lisp(expr)
    }

    /// Parse the statement at `offset` and advance past it. The operator
    /// table is only locked while parsing.
    fn next_statement(&self, source: &str, offset: &mut u32) -> Result<Option<Expr>, SessionError> {
        let operators = self.context.operators().read();
        let mut parser = Parser::at(source, *offset, &operators, self.context.interner());
        let statement = parser.parse_statement();
        *offset = parser.offset();
        let statement = statement?;
        if let Some(statement) = &statement {
            tracing::debug!(statement = %self.context.render_lisp(statement), "statement parsed");
        }
        Ok(statement)
    }
}
