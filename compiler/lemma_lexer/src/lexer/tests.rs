use super::*;
use lemma_ir::Name;
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

    fn kinds(&self, source: &str) -> Vec<TokenKind> {
        let (tokens, errors) = tokenize(source, &self.operators, &self.interner);
        assert_eq!(errors, vec![], "unexpected lex errors for {source:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    fn errors(&self, source: &str) -> Vec<LexError> {
        tokenize(source, &self.operators, &self.interner).1
    }

    fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    fn ident(&self, text: &str) -> TokenKind {
        TokenKind::Ident(self.name(text))
    }

    fn op(&self, text: &str) -> TokenKind {
        TokenKind::Operator(self.name(text))
    }

    fn int(&self, value: i64) -> TokenKind {
        TokenKind::Number(Number::from(value))
    }
}

#[test]
fn longest_match_splits_comparison() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds("a>=b"),
        vec![f.ident("a"), f.op(">="), f.ident("b"), TokenKind::Eof]
    );
}

#[test]
fn symbol_runs_split_into_registered_operators() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds("x:=-1"),
        vec![
            f.ident("x"),
            f.op(":="),
            f.op("-"),
            f.int(1),
            TokenKind::Eof
        ]
    );
}

#[test]
fn unknown_run_is_one_token() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds("a ?? b"),
        vec![f.ident("a"), f.op("??"), f.ident("b"), TokenKind::Eof]
    );
}

#[test]
fn pattern_variable_lexes_as_prefix_and_name() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds("f(_x, __rest)"),
        vec![
            f.ident("f"),
            TokenKind::LParen,
            f.op("_"),
            f.ident("x"),
            TokenKind::Comma,
            f.op("__"),
            f.ident("rest"),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn punctuation() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds("{}[];,()"),
        vec![
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds("a // trailing\n + /* inner */ b"),
        vec![f.ident("a"), f.op("+"), f.ident("b"), TokenKind::Eof]
    );
}

#[test]
fn numbers() {
    let f = Fixture::new();
    let kinds = f.kinds("42 3.25 1e3 99999999999999999999999");
    assert_eq!(kinds[0], f.int(42));
    assert_eq!(kinds[1], TokenKind::Number(Number::from_literal("3.25").unwrap()));
    assert_eq!(kinds[2], TokenKind::Number(Number::from_literal("1e3").unwrap()));
    assert_eq!(
        kinds[3],
        TokenKind::Number(Number::from_literal("99999999999999999999999").unwrap())
    );
}

#[test]
fn integer_before_range_operator() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds("1..5"),
        vec![f.int(1), f.op(".."), f.int(5), TokenKind::Eof]
    );
}

#[test]
fn malformed_numbers() {
    let f = Fixture::new();
    for source in ["1.", "1e", "1e+", "12abc", "3.x"] {
        let errors = f.errors(source);
        assert!(
            matches!(errors.as_slice(), [LexError::InvalidNumber { .. }]),
            "{source}: {errors:?}"
        );
    }
}

#[test]
fn lexing_resumes_after_bad_number() {
    let f = Fixture::new();
    let (tokens, errors) = tokenize("12abc + y", &f.operators, &f.interner);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span(), Span::new(0, 5));
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![f.op("+"), f.ident("y"), TokenKind::Eof]);
}

#[test]
fn string_escapes() {
    let f = Fixture::new();
    assert_eq!(
        f.kinds(r#""a\"b\\c\n""#),
        vec![TokenKind::Str(f.name("a\"b\\c\n")), TokenKind::Eof]
    );
}

#[test]
fn string_errors() {
    let f = Fixture::new();
    assert!(matches!(
        f.errors(r#""abc"#).as_slice(),
        [LexError::UnterminatedString { .. }]
    ));
    assert!(matches!(
        f.errors(r#""a\qb" x"#).as_slice(),
        [LexError::InvalidEscape { escape: 'q', .. }]
    ));
}

#[test]
fn invalid_escape_skips_whole_literal() {
    let f = Fixture::new();
    let (tokens, _) = tokenize(r#""a\qb" x"#, &f.operators, &f.interner);
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![f.ident("x"), TokenKind::Eof]);
}

#[test]
fn unterminated_block_comment() {
    let f = Fixture::new();
    assert!(matches!(
        f.errors("a /* never closed").as_slice(),
        [LexError::UnterminatedComment { .. }]
    ));
}

#[test]
fn unexpected_character() {
    let f = Fixture::new();
    let errors = f.errors("a λ b");
    assert!(matches!(
        errors.as_slice(),
        [LexError::UnexpectedChar { ch: 'λ', .. }]
    ));
    assert_eq!(errors[0].code(), "E1005");
}

#[test]
fn eof_repeats() {
    let f = Fixture::new();
    let mut lexer = Lexer::new("", &f.interner);
    for _ in 0..3 {
        let token = lexer.next_token(&f.operators).unwrap();
        assert_eq!(token.kind, TokenKind::Eof);
    }
}

#[test]
fn spans_cover_tokens() {
    let f = Fixture::new();
    let (tokens, _) = tokenize("foo <-- 12", &f.operators, &f.interner);
    let spans: Vec<_> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 3),
            Span::new(4, 7),
            Span::new(8, 10),
            Span::point(10)
        ]
    );
}

#[test]
fn newly_registered_operator_is_used() {
    let mut f = Fixture::new();
    assert_eq!(
        f.kinds("a+++b")[1..4],
        [f.op("+"), f.op("+"), f.op("+")]
    );
    f.operators.register(
        &f.interner,
        "+++",
        lemma_ir::Fixity::Infix,
        lemma_ir::OpInfo::left(60),
    );
    assert_eq!(f.kinds("a+++b")[1], f.op("+++"));
}
