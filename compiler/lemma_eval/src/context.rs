//! Tables shared by every session of one engine.

use lemma_fmt::{render, render_lisp};
use lemma_ir::{CoreNames, Expr, Name, OperatorTable, SharedInterner};
use lemma_patterns::PatternNames;

use crate::builtins;
use crate::prelude::{load_prelude, PreludeError};
use crate::registry::RuleRegistry;
use crate::shared::{SharedMutableRegistry, SharedRegistry};
use crate::PrimitiveTable;

/// Interner, operator table, rule registry and primitive table.
///
/// Cloning shares the tables. The operator table and rule registry change
/// at run time; primitives are fixed once the context is built.
#[derive(Clone)]
pub struct Context {
    interner: SharedInterner,
    operators: SharedMutableRegistry<OperatorTable>,
    rules: SharedMutableRegistry<RuleRegistry>,
    primitives: SharedRegistry<PrimitiveTable>,
    names: CoreNames,
}

impl Context {
    /// Standard operators and core primitives, no prelude rules.
    pub fn bare() -> Self {
        let interner = SharedInterner::new();
        let operators = OperatorTable::standard(&interner);
        let mut primitives = PrimitiveTable::new();
        builtins::register(&mut primitives, &interner);
        let names = CoreNames::new(&interner);

        Context {
            interner,
            operators: SharedMutableRegistry::new(operators),
            rules: SharedMutableRegistry::new(RuleRegistry::new()),
            primitives: SharedRegistry::new(primitives),
            names,
        }
    }

    /// A bare context with the prelude loaded.
    pub fn standard() -> Result<Self, PreludeError> {
        let context = Self::bare();
        load_prelude(&context)?;
        Ok(context)
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn operators(&self) -> &SharedMutableRegistry<OperatorTable> {
        &self.operators
    }

    pub fn rules(&self) -> &SharedMutableRegistry<RuleRegistry> {
        &self.rules
    }

    pub fn primitives(&self) -> &PrimitiveTable {
        &self.primitives
    }

    pub fn names(&self) -> &CoreNames {
        &self.names
    }

    pub fn pattern_names(&self) -> PatternNames {
        PatternNames::from(&self.names)
    }

    /// Whether `name` is a primitive or has a rule base of any arity.
    pub fn is_callable(&self, name: Name) -> bool {
        self.primitives.contains(name) || self.rules.read().defines(name)
    }

    /// Infix text of `expr` under the current operator table.
    pub fn render(&self, expr: &Expr) -> String {
        render(expr, &self.operators.read(), &self.interner)
    }

    pub fn render_lisp(&self, expr: &Expr) -> String {
        render_lisp(expr, &self.interner)
    }
}
