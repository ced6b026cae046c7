use super::*;
use crate::lisp::read_lisp;
use lemma_ir::{Fixity, Number, OpInfo};
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

    fn parse_one(&self, source: &str) -> Expr {
        let output = parse(source, &self.operators, &self.interner);
        assert_eq!(output.errors, vec![], "errors parsing {source:?}");
        assert_eq!(output.statements.len(), 1, "statement count for {source:?}");
        output.statements.into_iter().next().unwrap()
    }

    fn errors(&self, source: &str) -> Vec<ParseError> {
        parse(source, &self.operators, &self.interner).errors
    }

    /// Expected tree written in Lisp form.
    fn lisp(&self, source: &str) -> Expr {
        read_lisp(source, &self.interner).unwrap().remove(0)
    }

    fn assert_parses(&self, source: &str, expected_lisp: &str) {
        assert_eq!(self.parse_one(source), self.lisp(expected_lisp), "{source}");
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let f = Fixture::new();
    f.assert_parses("2+3*4", "(+ 2 (* 3 4))");
    f.assert_parses("2*3+4", "(+ (* 2 3) 4)");
}

#[test]
fn left_associative_operators_group_left() {
    let f = Fixture::new();
    f.assert_parses("a-b-c", "(- (- a b) c)");
    f.assert_parses("a/b*c", "(* (/ a b) c)");
}

#[test]
fn power_is_right_associative() {
    let f = Fixture::new();
    f.assert_parses("a^b^c", "(^ a (^ b c))");
}

#[test]
fn comparison_splits_by_longest_match() {
    let f = Fixture::new();
    f.assert_parses("a>=b", "(>= a b)");
}

#[test]
fn mixed_associativity_ties_follow_the_earlier_operator() {
    let mut f = Fixture::new();
    f.operators
        .register(&f.interner, "@@", Fixity::Infix, OpInfo::left(60));
    f.operators
        .register(&f.interner, "##", Fixity::Infix, OpInfo::right(60));

    f.assert_parses("a @@ b ## c", "(## (@@ a b) c)");
    f.assert_parses("a ## b @@ c", "(## a (@@ b c))");
}

#[test]
fn calls_and_grouping() {
    let f = Fixture::new();
    f.assert_parses("f(x, g(y))", "(f x (g y))");
    f.assert_parses("f()", "(f)");
    f.assert_parses("(a+b)*c", "(* (+ a b) c)");
}

#[test]
fn list_block_and_index_forms() {
    let f = Fixture::new();
    f.assert_parses("{1, a}", "(List 1 a)");
    f.assert_parses("{}", "(List)");
    f.assert_parses("[a := 1; b;]", "(Prog (:= a 1) b)");
    f.assert_parses("[a; b]", "(Prog a b)");
    f.assert_parses("x[2]", "(Nth x 2)");
    f.assert_parses("f(x)[1][2]", "(Nth (Nth (f x) 1) 2)");
}

#[test]
fn prefix_minus_folds_bare_numbers() {
    let f = Fixture::new();
    assert_eq!(f.parse_one("-3"), Expr::number(Number::from(-3)));
    assert_eq!(
        f.parse_one("2*-3"),
        Expr::call(
            f.interner.intern("*"),
            [Expr::number(Number::from(2)), Expr::number(Number::from(-3))]
        )
    );
    f.assert_parses("-x", "(- x)");
    f.assert_parses("-2^2", "(- (^ 2 2))");
    f.assert_parses("-(2)", "(- 2)");
}

#[test]
fn prefix_and_postfix_operators() {
    let f = Fixture::new();
    f.assert_parses("n!", "(! n)");
    f.assert_parses("-n!", "(- (! n))");
    f.assert_parses("Not a And b", "(And (Not a) b)");
    f.assert_parses("Not a = b", "(Not (= a b))");
}

#[test]
fn operators_in_operand_position_are_atoms() {
    let f = Fixture::new();
    f.assert_parses("+", "+");
    f.assert_parses("f(+, -)", "(f + -)");
    f.assert_parses("+(a, b, c)", "(+ a b c)");
}

#[test]
fn pattern_syntax() {
    let f = Fixture::new();
    f.assert_parses("f(_x)", "(f (_ x))");
    f.assert_parses("f(_x::IsInteger)", "(f (:: (_ x) IsInteger))");
    f.assert_parses("g(__rest)", "(g (__ rest))");
}

#[test]
fn rule_definition_with_guard() {
    let f = Fixture::new();
    f.assert_parses(
        "f(_n) _ (n > 0) <-- n * f(n - 1)",
        "(<-- (_ (f (_ n)) (> n 0)) (* n (f (- n 1))))",
    );
}

#[test]
fn assignment_is_right_associative_and_loose() {
    let f = Fixture::new();
    f.assert_parses("a := b := c + 1", "(:= a (:= b (+ c 1)))");
}

#[test]
fn bodied_operators_take_a_trailing_body() {
    let f = Fixture::new();
    f.assert_parses("While(i < 3) i := i + 1", "(While (< i 3) (:= i (+ i 1)))");
    f.assert_parses("Subst(x, 2) x^2", "(Subst x 2 (^ x 2))");
    f.assert_parses("While(i < 3) [i := i + 1;]", "(While (< i 3) (Prog (:= i (+ i 1))))");
}

#[test]
fn statements_split_on_semicolons() {
    let f = Fixture::new();
    let output = parse("a; b;; c", &f.operators, &f.interner);
    assert_eq!(output.errors, vec![]);
    assert_eq!(
        output.statements,
        vec![f.lisp("a"), f.lisp("b"), f.lisp("c")]
    );
}

#[test]
fn trailing_token_is_an_error() {
    let f = Fixture::new();
    let errors = f.errors("a b");
    assert!(matches!(
        errors.as_slice(),
        [ParseError::TrailingInput { found: "identifier", .. }]
    ));
    assert_eq!(errors[0].code(), "E2004");
}

#[test]
fn missing_operand() {
    let f = Fixture::new();
    assert!(matches!(
        f.errors("2 +").as_slice(),
        [ParseError::MissingOperand { context: ErrorContext::Operand, .. }]
    ));
    assert!(matches!(
        f.errors("()").as_slice(),
        [ParseError::MissingOperand { context: ErrorContext::Group, .. }]
    ));
}

#[test]
fn unclosed_delimiters() {
    let f = Fixture::new();
    for (source, open) in [("(1 + 2", '('), ("f(1, 2", '('), ("{a", '{'), ("[a; b", '[')] {
        let errors = f.errors(source);
        assert!(
            matches!(errors.as_slice(), [ParseError::UnclosedDelimiter { open: o, .. }] if *o == open),
            "{source}: {errors:?}"
        );
    }
}

#[test]
fn recovery_resumes_at_next_statement() {
    let f = Fixture::new();
    let output = parse("1 + ; 2 * (3; 4", &f.operators, &f.interner);
    assert_eq!(output.errors.len(), 2);
    assert_eq!(output.statements, vec![Expr::number(Number::from(4))]);
}

#[test]
fn lex_errors_surface_as_parse_errors() {
    let f = Fixture::new();
    let output = parse("x := 12abc; y", &f.operators, &f.interner);
    assert!(matches!(output.errors.as_slice(), [ParseError::Lex(_)]));
    assert_eq!(output.statements, vec![f.lisp("y")]);
}

#[test]
fn offset_tracks_consumed_statements() {
    let f = Fixture::new();
    let source = "a; bb; c";
    let mut parser = Parser::new(source, &f.operators, &f.interner);
    parser.parse_statement().unwrap();
    assert_eq!(parser.offset(), 2);

    let mut resumed = Parser::at(source, parser.offset(), &f.operators, &f.interner);
    assert_eq!(resumed.parse_statement().unwrap(), Some(f.lisp("bb")));
}

#[test]
fn user_defined_operator_takes_effect() {
    let mut f = Fixture::new();
    f.operators
        .register(&f.interner, "o", Fixity::Infix, OpInfo::left(75));
    f.assert_parses("a + b o c", "(+ a (o b c))");
}

#[test]
fn deep_nesting_does_not_overflow() {
    let f = Fixture::new();
    let depth = 20_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(f.parse_one(&source), f.lisp("x"));
}
