use crate::registry::Lookup;
use crate::{Identifier, Identifiers, Registry};

#[test]
fn get_or_create_is_idempotent() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let a = registry.get_or_create(&mut ids, "foo");
    let b = registry.get_or_create(&mut ids, "foo");

    assert_eq!(a, b);
    assert_eq!(registry.len(), 1);
}

#[test]
fn distinct_keys_get_distinct_identifiers() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let foo = registry.get_or_create(&mut ids, "foo");
    let bar = registry.get_or_create(&mut ids, "bar");

    assert_ne!(foo, bar);
}

#[test]
fn key_doubles_as_description() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let mario = registry.get_or_create(&mut ids, "mario");

    assert_eq!(ids.render(mario).as_deref(), Some("Identifier(mario)"));
}

#[test]
fn key_for_roundtrip() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let id = registry.get_or_create(&mut ids, "bar");

    assert_eq!(registry.key_for(id), Some("bar"));
}

#[test]
fn key_for_minted_identifier_is_not_found() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    registry.get_or_create(&mut ids, "foo");
    let local = ids.mint(Some("foo"));

    assert_eq!(registry.key_for(local), None);
}

#[test]
fn key_for_well_known_is_not_found() {
    let registry = Registry::new();
    assert_eq!(registry.key_for(Identifier::ITERATOR), None);
}

#[test]
fn registering_well_known_description_mints_new_identifier() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let id = registry.get_or_create(&mut ids, "Identifier.iterator");

    assert_ne!(id, Identifier::ITERATOR);
    assert_eq!(registry.key_for(Identifier::ITERATOR), None);
}

#[test]
fn empty_key_is_distinct_from_not_found() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let empty = registry.get_or_create(&mut ids, "");

    assert_eq!(registry.key_for(empty), Some(""));
    assert_eq!(ids.render(empty).as_deref(), Some("Identifier()"));
}

#[test]
fn lookup_reports_creation() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let first = registry.lookup(&mut ids, "foo");
    let second = registry.lookup(&mut ids, "foo");

    assert!(matches!(first, Lookup::Created(_)));
    assert_eq!(second, Lookup::Hit(first.identifier()));
}

#[test]
fn get_does_not_create() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    assert_eq!(registry.get("foo"), None);
    assert!(registry.is_empty());

    let id = registry.get_or_create(&mut ids, "foo");
    assert_eq!(registry.get("foo"), Some(id));
}

#[test]
fn iter_yields_records_in_creation_order() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    let b = registry.get_or_create(&mut ids, "beta");
    let a = registry.get_or_create(&mut ids, "alpha");
    registry.get_or_create(&mut ids, "beta");

    let records: Vec<_> = registry.iter().collect();
    assert_eq!(records, vec![("beta", b), ("alpha", a)]);
}

#[test]
fn serializes_as_ordered_map() {
    let mut ids = Identifiers::new();
    let mut registry = Registry::new();

    registry.get_or_create(&mut ids, "foo");
    registry.get_or_create(&mut ids, "bar");

    let json = serde_json::to_string(&registry).unwrap();
    insta::assert_snapshot!(json, @r#"{"foo":1,"bar":2}"#);
}
