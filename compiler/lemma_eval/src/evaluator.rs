//! The rewriting evaluator.
//!
//! `eval` reduces an expression to normal form:
//!
//! 1. Atoms evaluate to their binding, or to themselves when unbound. A lazy
//!    global is evaluated once, on its first lookup. Numbers, strings and
//!    generic objects are already in normal form.
//! 2. A compound with an atom head evaluates its non-held arguments left to
//!    right. Held positions come from the rule base for `(head, arity)`
//!    when there is one, otherwise from the primitive.
//! 3. Rules of the base are tried in registration order. The first whose
//!    pattern matches and whose guard evaluates to `True` wins; its body,
//!    with the bindings substituted, is evaluated in a fresh scope. Guards
//!    see pattern variables as bindings instead, so a body that wants to
//!    update a value copies it into a `Local` first.
//! 4. Without an applicable rule the primitive of that name runs, if one
//!    accepts the arity. Its result is final.
//! 5. Anything else is returned rebuilt from the evaluated parts.
//!
//! Every compound evaluation is a frame counted against `max_depth`.

mod scope_guard;

pub use scope_guard::ScopedEvaluator;

use lemma_ir::{CoreNames, Expr, ExprKind, Name, NumericContext, StringInterner};
use lemma_patterns::{substitute, Bindings, Matcher, PredicateCheck};
use lemma_stack::ensure_sufficient_stack;

use crate::errors::secure_violation;
use crate::primitives::{Effect, Primitive};
use crate::print_handler::SharedPrintHandler;
use crate::registry::RuleBase;
use crate::{Context, Environment, EvalError, EvalResult};

/// Frame label for compounds whose head is not an atom.
const ANONYMOUS_FRAME: &str = "<compound>";

/// Evaluator over one session's environment.
pub struct Evaluator<'a> {
    context: &'a Context,
    pub(crate) env: &'a mut Environment,
    output: SharedPrintHandler,
    names: CoreNames,
    matcher: Matcher,
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a Context, env: &'a mut Environment, output: SharedPrintHandler) -> Self {
        Evaluator {
            context,
            env,
            output,
            names: *context.names(),
            matcher: Matcher::new(context.pattern_names()),
        }
    }

    pub fn context(&self) -> &'a Context {
        self.context
    }

    pub fn env(&self) -> &Environment {
        self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        self.env
    }

    pub fn names(&self) -> &CoreNames {
        &self.names
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.context.interner()
    }

    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    /// Arithmetic settings of the current configuration.
    pub fn numeric(&self) -> NumericContext {
        self.env.config().numeric()
    }

    pub fn intern(&self, text: &str) -> Name {
        self.interner().intern(text)
    }

    /// `True` or `False`.
    pub fn boolean(&self, value: bool) -> Expr {
        Expr::atom(self.names.boolean(value))
    }

    pub fn is_true(&self, expr: &Expr) -> bool {
        expr.as_atom() == Some(self.names.true_)
    }

    pub fn is_false(&self, expr: &Expr) -> bool {
        expr.as_atom() == Some(self.names.false_)
    }

    pub fn render(&self, expr: &Expr) -> String {
        self.context.render(expr)
    }

    /// Evaluate `expr` to normal form.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        match expr.kind() {
            ExprKind::Atom(name) => self.eval_atom(*name, expr),
            ExprKind::List(items) if !items.is_empty() => {
                self.env.enter_call().map_err(|e| self.frame(e, expr))?;
                let result = ensure_sufficient_stack(|| self.eval_compound(expr, items));
                self.env.exit_call();
                result.map_err(|e| self.frame(e, expr))
            }
            ExprKind::List(_) | ExprKind::Str(_) | ExprKind::Number(_) | ExprKind::Generic(_) => {
                Ok(expr.clone())
            }
        }
    }

    fn eval_atom(&mut self, name: Name, expr: &Expr) -> EvalResult {
        if let Some(definition) = self.env.take_lazy(name) {
            tracing::debug!(name = self.interner().lookup(name), "forcing lazy global");
            return match self.eval(&definition) {
                Ok(value) => {
                    self.env.bind_global(name, value.clone());
                    Ok(value)
                }
                Err(error) => {
                    self.env.mark_lazy(name);
                    Err(error)
                }
            };
        }
        Ok(self.env.lookup(name).cloned().unwrap_or_else(|| expr.clone()))
    }

    fn frame(&self, error: EvalError, expr: &Expr) -> EvalError {
        match expr.head_name() {
            Some(head) => error.with_frame(self.interner().lookup(head)),
            None => error.with_frame(ANONYMOUS_FRAME),
        }
    }

    fn eval_compound(&mut self, expr: &Expr, items: &[Expr]) -> EvalResult {
        let (head, args) = (&items[0], &items[1..]);
        let Some(name) = head.as_atom() else {
            let evaluated = items
                .iter()
                .map(|item| self.eval(item))
                .collect::<EvalResult<Vec<_>>>()?;
            return Ok(expr.with_items(evaluated));
        };

        let context = self.context;
        let base = context.rules().read().lookup(name, args.len());
        let primitive = context.primitives().lookup(name, args.len());

        let mut evaluated = Vec::with_capacity(items.len());
        evaluated.push(head.clone());
        for (index, arg) in args.iter().enumerate() {
            let held = match (&base, primitive) {
                (Some(base), _) => base.is_held(index),
                (None, Some(primitive)) => primitive.held.contains(index),
                (None, None) => false,
            };
            evaluated.push(if held { arg.clone() } else { self.eval(arg)? });
        }
        let call = expr.with_items(evaluated);

        if let Some(base) = base {
            if let Some(result) = self.apply_rules(name, &base, &call)? {
                return Ok(result);
            }
        }
        if let Some(primitive) = primitive {
            return self.call_primitive(name, primitive, call.args()?);
        }
        Ok(call)
    }

    /// Try each rule of `base` on `call`. `None` when no rule applies.
    #[tracing::instrument(level = "debug", skip_all, fields(head = self.interner().lookup(head)))]
    fn apply_rules(&mut self, head: Name, base: &RuleBase, call: &Expr) -> EvalResult<Option<Expr>> {
        let matcher = self.matcher;
        for (index, rule) in base.rules.iter().enumerate() {
            let mut bindings = Bindings::new();
            if !matcher.matches(&rule.pattern, call, &mut bindings, self)?.is_match() {
                continue;
            }
            if let Some(guard) = &rule.guard {
                let verdict = self.with_bindings(bindings.iter(), |scoped| scoped.eval(guard))?;
                if !self.is_true(&verdict) {
                    continue;
                }
            }

            tracing::trace!(rule = index, "rule applies");
            let body = substitute(&rule.body, &bindings);
            let result = if base.is_macro() {
                self.eval(&body)?
            } else {
                self.with_env_scope(|scoped| scoped.eval(&body))?
            };
            return Ok(Some(result));
        }
        Ok(None)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(name = self.interner().lookup(name)))]
    fn call_primitive(&mut self, name: Name, primitive: &Primitive, args: &[Expr]) -> EvalResult {
        if primitive.effect == Effect::Output && self.env.config().secure {
            return Err(secure_violation(self.interner().lookup(name)));
        }
        (primitive.func)(self, args)
    }
}

/// Predicate constraints evaluate `Pred(Hold(candidate))`, so the candidate
/// is not evaluated a second time.
impl PredicateCheck for Evaluator<'_> {
    type Error = EvalError;

    fn check(&mut self, predicate: &Expr, candidate: &Expr) -> EvalResult<bool> {
        let held = Expr::call(self.names.hold, [candidate.clone()]);
        let verdict = self.eval(&Expr::apply(predicate.clone(), [held]))?;
        Ok(self.is_true(&verdict))
    }
}

#[cfg(test)]
mod tests;
