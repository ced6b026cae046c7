use super::*;
use crate::StringInterner;
use pretty_assertions::assert_eq;

fn setup() -> (StringInterner, Name, Name) {
    let interner = StringInterner::new();
    let f = interner.intern("f");
    let x = interner.intern("x");
    (interner, f, x)
}

#[test]
fn structural_equality_is_deep() {
    let (_i, f, x) = setup();
    let a = Expr::call(f, [Expr::atom(x), Expr::number(Number::from(1))]);
    let b = Expr::call(f, [Expr::atom(x), Expr::number(Number::from(1))]);
    let c = Expr::call(f, [Expr::number(Number::from(1)), Expr::atom(x)]);

    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn atom_and_string_with_same_text_differ() {
    let (_i, _f, x) = setup();
    assert_ne!(Expr::atom(x), Expr::string(x));
}

#[test]
fn accessors_on_lists() {
    let (_i, f, x) = setup();
    let e = Expr::call(f, [Expr::atom(x), Expr::atom(x)]);

    assert!(e.is_list());
    assert_eq!(e.head_name(), Some(f));
    assert_eq!(e.head(), Ok(&Expr::atom(f)));
    assert_eq!(e.args().map(<[Expr]>::len), Ok(2));
    assert_eq!(e.arity(), Some(2));
    assert_eq!(e.nth(2), Ok(&Expr::atom(x)));
}

#[test]
fn indexed_access_errors() {
    let (_i, f, x) = setup();
    let atom = Expr::atom(x);
    assert_eq!(atom.head(), Err(IrError::NotAList));
    assert_eq!(atom.args(), Err(IrError::NotAList));

    let e = Expr::call(f, [Expr::atom(x)]);
    assert_eq!(e.nth(2), Err(IrError::IndexOutOfRange { index: 2, len: 1 }));
}

#[test]
fn with_args_shares_when_unchanged() {
    let (_i, f, x) = setup();
    let arg = Expr::atom(x);
    let e = Expr::call(f, [arg.clone()]);

    let same = e.with_args(vec![arg.clone()]).unwrap();
    assert!(same.ptr_eq(&e));

    let changed = e.with_args(vec![Expr::number(Number::from(2))]).unwrap();
    assert!(!changed.ptr_eq(&e));
    assert!(changed.head().unwrap().ptr_eq(e.head().unwrap()));
}

#[test]
fn clone_is_shallow() {
    let (_i, f, x) = setup();
    let e = Expr::call(f, [Expr::atom(x)]);
    let copy = e.clone();
    assert!(copy.ptr_eq(&e));
}

#[test]
fn expressions_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expr>();
}
