use crate::render;
use lemma_ir::{Expr, Fixity, Number, OpInfo, OperatorTable, StringInterner};
use lemma_parse::{lisp::read_lisp, parse};
use pretty_assertions::assert_eq;

struct Fixture {
    interner: StringInterner,
    operators: OperatorTable,
}

impl Fixture {
    fn new() -> Self {
        let interner = StringInterner::new();
        let operators = OperatorTable::standard(&interner);
        Fixture {
            interner,
            operators,
        }
    }

    fn lisp(&self, source: &str) -> Expr {
        read_lisp(source, &self.interner).unwrap().remove(0)
    }

    fn render(&self, expr: &Expr) -> String {
        render(expr, &self.operators, &self.interner)
    }

    /// Render a tree given in Lisp form.
    fn assert_renders(&self, lisp: &str, expected: &str) {
        assert_eq!(self.render(&self.lisp(lisp)), expected, "{lisp}");
    }

    /// Text already in canonical form renders back unchanged.
    fn assert_canonical(&self, source: &str) {
        let output = parse(source, &self.operators, &self.interner);
        assert!(output.errors.is_empty(), "{:?}", output.errors);
        assert_eq!(self.render(&output.statements[0]), source);
    }
}

#[test]
fn infix_operators_are_spaced() {
    let f = Fixture::new();
    f.assert_renders("(+ 2 (* 3 4))", "2 + 3 * 4");
    f.assert_renders("(>= a b)", "a >= b");
    f.assert_renders("(And p q)", "p And q");
}

#[test]
fn looser_children_are_parenthesized() {
    let f = Fixture::new();
    f.assert_renders("(* (+ 2 3) 4)", "(2 + 3) * 4");
    f.assert_renders("(* 4 (+ 2 3))", "4 * (2 + 3)");
}

#[test]
fn associativity_decides_ties() {
    let f = Fixture::new();
    f.assert_renders("(- (- a b) c)", "a - b - c");
    f.assert_renders("(- a (- b c))", "a - (b - c)");
    f.assert_renders("(^ a (^ b c))", "a ^ b ^ c");
    f.assert_renders("(^ (^ a b) c)", "(a ^ b) ^ c");
}

#[test]
fn mixed_associativity_ties_are_parenthesized_where_needed() {
    let mut f = Fixture::new();
    f.operators
        .register(&f.interner, "@@", Fixity::Infix, OpInfo::left(60));
    f.operators
        .register(&f.interner, "##", Fixity::Infix, OpInfo::right(60));
    f.assert_renders("(## (@@ a b) c)", "a @@ b ## c");
    f.assert_renders("(@@ (## a b) c)", "(a ## b) @@ c");
    f.assert_renders("(## a (@@ b c))", "a ## b @@ c");
}

#[test]
fn prefix_operators() {
    let f = Fixture::new();
    f.assert_renders("(- x)", "-x");
    f.assert_renders("(- (- x))", "- -x");
    f.assert_renders("(Not x)", "Not x");
    f.assert_renders("(- (+ a b))", "-(a + b)");
    f.assert_renders("(_ x)", "_x");
}

#[test]
fn prefix_operand_does_not_swallow_what_follows() {
    let f = Fixture::new();
    f.assert_renders("(And (Not a) b)", "Not a And b");
    f.assert_renders("(= (Not a) b)", "(Not a) = b");
    f.assert_renders("(+ (* a (Not b)) c)", "a * (Not b) + c");
    f.assert_renders("(! (- x))", "(-x)!");
}

#[test]
fn minus_over_a_number_keeps_its_parens() {
    let f = Fixture::new();
    f.assert_renders("(- 3)", "-(3)");
}

#[test]
fn postfix_operators() {
    let f = Fixture::new();
    f.assert_renders("(! n)", "n!");
    f.assert_renders("(! (+ a b))", "(a + b)!");
    f.assert_renders("(* (! n) 2)", "n! * 2");
}

#[test]
fn brackets_and_calls() {
    let f = Fixture::new();
    f.assert_renders("(List 1 2 3)", "{1, 2, 3}");
    f.assert_renders("(List)", "{}");
    f.assert_renders("(Prog (:= x 1) x)", "[x := 1; x;]");
    f.assert_renders("(Nth v 2)", "v[2]");
    f.assert_renders("(Nth (+ a b) 1)", "(a + b)[1]");
    f.assert_renders("(f a (g b))", "f(a, g(b))");
    f.assert_renders("(+ a b c)", "+(a, b, c)");
    f.assert_renders("()", "()");
}

#[test]
fn bodied_forms() {
    let f = Fixture::new();
    f.assert_renders("(While (< i 10) (:= i (+ i 1)))", "While(i < 10) i := i + 1");
    f.assert_renders("(While (< i 10) (<-- a b))", "While(i < 10) (a <-- b)");
}

#[test]
fn negative_numbers_in_operand_position_are_parenthesized() {
    let f = Fixture::new();
    let minus_three = Expr::number(Number::from(-3));
    let sum = Expr::call(
        f.interner.intern("+"),
        [Expr::atom(f.interner.intern("a")), minus_three.clone()],
    );
    assert_eq!(f.render(&sum), "a + (-3)");
    assert_eq!(f.render(&minus_three), "-3");
}

#[test]
fn rationals_in_operand_position_are_parenthesized() {
    let f = Fixture::new();
    let half = Expr::number(Number::rational(1, 2).unwrap());
    let product = Expr::call(
        f.interner.intern("*"),
        [Expr::atom(f.interner.intern("x")), half],
    );
    assert_eq!(f.render(&product), "x * (1/2)");
}

#[test]
fn strings_are_requoted() {
    let f = Fixture::new();
    f.assert_canonical(r#""a\"b\\c\n""#);
}

#[test]
fn canonical_text_is_stable() {
    let f = Fixture::new();
    for source in [
        "2 + 3 * 4",
        "f(_x, __rest) <-- g(x)",
        "f(_n :: IsInteger) _ n > 0 <-- n * f(n - 1)",
        "x := {1, 2.5, \"s\"}",
        "a And Not b Or c",
        "Subst(x, 2) x ^ 2",
    ] {
        f.assert_canonical(source);
    }
}
