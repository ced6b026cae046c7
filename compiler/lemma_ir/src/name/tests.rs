use super::*;

#[test]
fn shard_and_local_round_trip() {
    let name = Name::new(7, 4242);
    assert_eq!(name.shard(), 7);
    assert_eq!(name.local(), 4242);
    assert_eq!(name.raw(), (7 << 28) | 4242);
}

#[test]
fn empty_is_default() {
    assert_eq!(Name::default(), Name::EMPTY);
    assert_eq!(Name::EMPTY.shard(), 0);
    assert_eq!(Name::EMPTY.local(), 0);
}

#[test]
fn names_deduplicate_in_sets() {
    use rustc_hash::FxHashSet;
    let mut set = FxHashSet::default();
    set.insert(Name::new(1, 1));
    set.insert(Name::new(1, 1));
    set.insert(Name::new(2, 1));
    assert_eq!(set.len(), 2);
}
