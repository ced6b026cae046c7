use super::*;
use lemma_ir::Name;

#[test]
fn statement_end_membership() {
    assert!(STATEMENT_END.contains(&TokenKind::Semicolon));
    assert!(STATEMENT_END.contains(&TokenKind::Eof));
    assert!(!STATEMENT_END.contains(&TokenKind::Comma));
}

#[test]
fn data_variants_match_by_discriminant() {
    let set = TokenSet::new().with(&TokenKind::Ident(Name::EMPTY));
    assert!(set.contains(&TokenKind::Ident(Name::new(3, 9))));
    assert!(!set.contains(&TokenKind::Operator(Name::EMPTY)));
}

#[test]
fn closers_cannot_start_operands() {
    for kind in [TokenKind::RParen, TokenKind::RBracket, TokenKind::Comma] {
        assert!(OPERAND_FOLLOW.contains(&kind));
    }
    assert!(!OPERAND_FOLLOW.contains(&TokenKind::LParen));
}

#[test]
fn sets_build_from_borrowed_kinds() {
    let number = TokenKind::Number(lemma_ir::Number::from(7));
    let set = TokenSet::new().with(&number).with(&TokenKind::Comma);
    assert!(set.contains(&TokenKind::Number(lemma_ir::Number::from(0))));
    assert!(set.contains(&TokenKind::Comma));
    assert!(!set.contains(&TokenKind::Semicolon));
}
