//! Operator and precedence table.
//!
//! The table drives both the lexer (longest-match splitting of symbol runs)
//! and the parser (precedence climbing). It is mutable at run time: the
//! `Infix`/`Prefix`/`Postfix`/`Bodied` primitives register new operators
//! that take effect for the next statement parsed.

use crate::{Name, StringInterner};
use rustc_hash::{FxHashMap, FxHashSet};

/// Where an operator sits relative to its operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
    /// `name(args) body`: the trailing body becomes the last argument.
    Bodied,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
}

/// Binding strength of one operator. Higher precedence binds tighter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpInfo {
    pub precedence: u32,
    pub assoc: Assoc,
}

impl OpInfo {
    pub const fn left(precedence: u32) -> Self {
        OpInfo {
            precedence,
            assoc: Assoc::Left,
        }
    }

    pub const fn right(precedence: u32) -> Self {
        OpInfo {
            precedence,
            assoc: Assoc::Right,
        }
    }
}

/// Characters that form symbolic operator runs.
#[inline]
pub fn is_operator_char(c: u8) -> bool {
    matches!(
        c,
        b'~' | b'!'
            | b'@'
            | b'#'
            | b'$'
            | b'%'
            | b'^'
            | b'&'
            | b'*'
            | b'-'
            | b'+'
            | b'='
            | b':'
            | b'<'
            | b'>'
            | b'?'
            | b'/'
            | b'\\'
            | b'|'
            | b'_'
            | b'.'
            | b'\''
    )
}

/// Mapping `(name, fixity)` to precedence and associativity.
#[derive(Clone, Debug, Default)]
pub struct OperatorTable {
    entries: FxHashMap<(Name, Fixity), OpInfo>,
    /// Spellings made of operator characters, for longest-match lexing.
    symbols: FxHashSet<Box<str>>,
    longest_symbol: usize,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace an operator. Returns its interned name.
    pub fn register(
        &mut self,
        interner: &StringInterner,
        spelling: &str,
        fixity: Fixity,
        info: OpInfo,
    ) -> Name {
        let name = interner.intern(spelling);
        self.entries.insert((name, fixity), info);
        if !spelling.is_empty() && spelling.bytes().all(is_operator_char) {
            self.longest_symbol = self.longest_symbol.max(spelling.len());
            self.symbols.insert(spelling.into());
        }
        name
    }

    pub fn lookup(&self, name: Name, fixity: Fixity) -> Option<OpInfo> {
        self.entries.get(&(name, fixity)).copied()
    }

    /// Change the associativity of an existing entry. Returns `false` when
    /// there is no such entry.
    pub fn set_assoc(&mut self, name: Name, fixity: Fixity, assoc: Assoc) -> bool {
        match self.entries.get_mut(&(name, fixity)) {
            Some(info) => {
                info.assoc = assoc;
                true
            }
            None => false,
        }
    }

    /// Registered under any fixity.
    pub fn is_operator(&self, name: Name) -> bool {
        [Fixity::Prefix, Fixity::Infix, Fixity::Postfix, Fixity::Bodied]
            .into_iter()
            .any(|fixity| self.entries.contains_key(&(name, fixity)))
    }

    /// Length in bytes of the longest registered prefix of `run`.
    ///
    /// `run` is a maximal sequence of operator characters. Returns `None` when
    /// no prefix is registered.
    pub fn longest_match(&self, run: &str) -> Option<usize> {
        let upper = run.len().min(self.longest_symbol);
        (1..=upper)
            .rev()
            .find(|&len| run.is_char_boundary(len) && self.symbols.contains(&run[..len]))
    }

    /// The default grammar.
    pub fn standard(interner: &StringInterner) -> Self {
        let mut table = OperatorTable::new();
        let infix = |table: &mut Self, ops: &[&str], info: OpInfo| {
            for op in ops {
                table.register(interner, op, Fixity::Infix, info);
            }
        };

        infix(&mut table, &["<--"], OpInfo::right(5));
        infix(&mut table, &["_"], OpInfo::left(8));
        infix(&mut table, &[":="], OpInfo::right(10));
        infix(&mut table, &["Or"], OpInfo::left(25));
        infix(&mut table, &["And"], OpInfo::left(30));
        infix(&mut table, &["=", "!=", "<", ">", "<=", ">="], OpInfo::left(50));
        infix(&mut table, &["+", "-"], OpInfo::left(70));
        infix(&mut table, &["*", "/"], OpInfo::left(80));
        infix(&mut table, &["^"], OpInfo::right(90));
        infix(&mut table, &["::"], OpInfo::left(105));

        table.register(interner, "Not", Fixity::Prefix, OpInfo::right(35));
        table.register(interner, "-", Fixity::Prefix, OpInfo::right(85));
        table.register(interner, "_", Fixity::Prefix, OpInfo::right(110));
        table.register(interner, "__", Fixity::Prefix, OpInfo::right(110));

        table.register(interner, "!", Fixity::Postfix, OpInfo::left(100));

        table.register(interner, "While", Fixity::Bodied, OpInfo::right(8));
        table.register(interner, "Subst", Fixity::Bodied, OpInfo::right(8));

        table
    }
}
