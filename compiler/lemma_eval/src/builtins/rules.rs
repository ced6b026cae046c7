//! Rule definition: `<--`, `RuleBase`, `MacroRuleBase`, `HoldArgNr`,
//! `Retract`.

use lemma_ir::{Expr, Name, StringInterner};
use lemma_patterns::Pattern;

use super::helpers::{count, symbol};
use crate::errors::{invalid_rule, primitive_error};
use crate::registry::{Arity, Held, Rule, RuleFlags};
use crate::{EvalResult, Evaluator, Primitive, PrimitiveTable};

pub(super) fn register(table: &mut PrimitiveTable, interner: &StringInterner) {
    let head_held = Held::positions(&[0]);

    table.define(interner, "<--", Primitive::new(Arity::Fixed(2), define_rule).held(Held::All));
    table.define(
        interner,
        "RuleBase",
        Primitive::new(Arity::Fixed(2), rule_base).held(head_held.clone()),
    );
    table.define(
        interner,
        "MacroRuleBase",
        Primitive::new(Arity::Fixed(2), macro_rule_base).held(head_held.clone()),
    );
    table.define(
        interner,
        "HoldArgNr",
        Primitive::new(Arity::Fixed(3), hold_arg_nr).held(head_held.clone()),
    );
    table.define(interner, "Retract", Primitive::new(Arity::Fixed(2), retract).held(head_held));
}

/// `pattern <-- body` or `pattern _ guard <-- body`.
fn define_rule(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let names = *ev.names();
    let (lhs, body) = (&args[0], &args[1]);
    let (pattern_expr, guard) = match lhs.as_list() {
        Some([head, pattern, guard]) if head.as_atom() == Some(names.underscore) => {
            (pattern, Some(guard.clone()))
        }
        _ => (lhs, None),
    };

    let Some(head) = pattern_expr.head_name() else {
        return Err(invalid_rule(format!(
            "left-hand side {} is not a call with a symbol head",
            ev.render(pattern_expr)
        )));
    };
    let pattern = Pattern::compile(pattern_expr, &ev.context().pattern_names());
    let arity = if pattern.has_tail() {
        Arity::Variadic
    } else {
        Arity::Fixed(pattern_expr.args()?.len())
    };

    warn_unknown_predicates(ev, &pattern);

    ev.context().rules().write().define(
        head,
        arity,
        Rule {
            pattern,
            guard,
            body: body.clone(),
        },
    );
    Ok(ev.boolean(true))
}

fn warn_unknown_predicates(ev: &Evaluator<'_>, pattern: &Pattern) {
    match pattern {
        Pattern::Var {
            predicate: Some(predicate),
            ..
        } => {
            let known = predicate
                .as_atom()
                .map_or(true, |name| ev.context().is_callable(name));
            if !known {
                tracing::warn!(
                    predicate = %ev.render(predicate),
                    "rule constrains a variable with a predicate that is not a function"
                );
            }
        }
        Pattern::List(children) => {
            for child in children {
                warn_unknown_predicates(ev, child);
            }
        }
        Pattern::Var { predicate: None, .. } | Pattern::Tail { .. } | Pattern::Literal(_) => {}
    }
}

fn head_and_arity(name: &str, args: &[Expr]) -> EvalResult<(Name, Arity)> {
    Ok((symbol(&args[0])?, Arity::Fixed(count(name, &args[1])?)))
}

fn rule_base(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let (head, arity) = head_and_arity("RuleBase", args)?;
    ev.context().rules().write().declare(head, arity, RuleFlags::empty());
    Ok(ev.boolean(true))
}

fn macro_rule_base(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let (head, arity) = head_and_arity("MacroRuleBase", args)?;
    ev.context().rules().write().declare(head, arity, RuleFlags::MACRO);
    Ok(ev.boolean(true))
}

/// `HoldArgNr(f, n, k)`: the one-based argument `k` of `f/n` is held.
fn hold_arg_nr(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let head = symbol(&args[0])?;
    let arity = count("HoldArgNr", &args[1])?;
    let position = count("HoldArgNr", &args[2])?;
    if !(1..=arity).contains(&position) {
        return Err(primitive_error(
            "HoldArgNr",
            format!("argument {position} out of range for arity {arity}"),
        ));
    }
    let declared = ev
        .context()
        .rules()
        .write()
        .hold_arg(head, Arity::Fixed(arity), position - 1);
    if !declared {
        return Err(primitive_error(
            "HoldArgNr",
            format!("no rule base {}/{arity}", ev.interner().lookup(head)),
        ));
    }
    Ok(ev.boolean(true))
}

/// Remove `f/n`. `False` when there was nothing to remove.
fn retract(ev: &mut Evaluator<'_>, args: &[Expr]) -> EvalResult {
    let (head, arity) = head_and_arity("Retract", args)?;
    let removed = ev.context().rules().write().retract(head, arity);
    Ok(ev.boolean(removed))
}
