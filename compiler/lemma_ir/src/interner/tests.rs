use super::*;

#[test]
fn intern_and_lookup() {
    let interner = StringInterner::new();

    let x = interner.intern("x");
    let y = interner.intern("y");
    let x2 = interner.intern("x");

    assert_eq!(x, x2);
    assert_ne!(x, y);
    assert_eq!(interner.lookup(x), "x");
    assert_eq!(interner.lookup(y), "y");
}

#[test]
fn empty_string_is_name_zero() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn core_symbols_are_pre_interned() {
    let interner = StringInterner::new();
    let before = interner.len();

    interner.intern("List");
    interner.intern("<--");
    interner.intern(":=");

    assert_eq!(interner.len(), before);
    assert!(!interner.is_empty());
}

#[test]
fn shared_interner_clones_share_storage() {
    let interner = SharedInterner::new();
    let other = interner.clone();

    let a = interner.intern("Fibonacci");
    let b = other.intern("Fibonacci");

    assert_eq!(a, b);
    assert_eq!(other.lookup(a), "Fibonacci");
}

#[test]
fn operator_spellings_are_distinct() {
    let interner = StringInterner::new();
    assert_ne!(interner.intern(">"), interner.intern(">="));
    assert_ne!(interner.intern("_"), interner.intern("__"));
}
