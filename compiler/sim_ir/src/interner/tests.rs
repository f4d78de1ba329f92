use super::*;

#[test]
fn interning_is_idempotent() {
    let interner = StringInterner::new();
    let a = interner.intern("counter");
    let b = interner.intern("counter");
    let c = interner.intern("total");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.lookup(a), "counter");
    assert_eq!(interner.lookup(c), "total");
}

#[test]
fn empty_string_is_name_zero() {
    let interner = StringInterner::new();
    assert_eq!(interner.intern(""), Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn builtin_type_names_are_pre_interned() {
    let interner = StringInterner::new();
    let before = interner.len();
    let i32_name = interner.intern("i32");
    let usize_name = interner.intern("usize");

    assert_eq!(interner.len(), before);
    assert_eq!(interner.lookup(i32_name), "i32");
    assert_eq!(interner.lookup(usize_name), "usize");
}

#[test]
fn shared_handles_see_the_same_table() {
    let interner = SharedInterner::new();
    let clone = interner.clone();

    assert_eq!(interner.intern("pkg"), clone.intern("pkg"));
}
