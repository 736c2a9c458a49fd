use crate::{Identifier, PropertyKey, PropertyMap, Realm};

#[test]
fn enumerates_identifier_keys_in_insertion_order() {
    let mut realm = Realm::new();
    let a = realm.mint(Some("a"));
    let b = realm.get_or_create("b");

    let mut map = PropertyMap::new();
    map.insert("name", 1);
    map.insert(a, 2);
    map.insert("other", 3);
    map.insert(b, 4);

    assert_eq!(map.own_identifier_keys(), vec![a, b]);
    assert_eq!(map.own_string_keys(), vec!["name", "other"]);
}

#[test]
fn no_identifier_keys_yields_empty() {
    let mut map = PropertyMap::new();
    map.insert("only", ());

    assert!(map.own_identifier_keys().is_empty());
}

#[test]
fn identifier_keys_compare_by_identity() {
    let mut realm = Realm::new();
    let first = realm.mint(Some("dup"));
    let second = realm.mint(Some("dup"));

    let mut map = PropertyMap::new();
    map.insert(first, "first");
    map.insert(second, "second");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&first.into()), Some(&"first"));
    assert_eq!(map.get(&second.into()), Some(&"second"));
}

#[test]
fn identifier_key_does_not_collide_with_string_key() {
    let mut realm = Realm::new();
    let foo = realm.get_or_create("foo");

    let mut map = PropertyMap::new();
    map.insert("foo", 1);
    map.insert(foo, 2);

    assert_eq!(map.get(&PropertyKey::from("foo")), Some(&1));
    assert_eq!(map.get(&PropertyKey::from(foo)), Some(&2));
}

#[test]
fn overwrite_keeps_position() {
    let mut realm = Realm::new();
    let a = realm.mint(Some("a"));
    let b = realm.mint(Some("b"));

    let mut map = PropertyMap::new();
    map.insert(a, 1);
    map.insert(b, 2);
    let previous = map.insert(a, 3);

    assert_eq!(previous, Some(1));
    assert_eq!(map.own_identifier_keys(), vec![a, b]);
}

#[test]
fn remove_preserves_remaining_order() {
    let mut realm = Realm::new();
    let ids: Vec<Identifier> = (0..3).map(|_| realm.mint(None)).collect();

    let mut map: PropertyMap<usize> = ids.iter().copied().zip(0..).collect();
    map.remove(&ids[1].into());

    assert_eq!(map.own_identifier_keys(), vec![ids[0], ids[2]]);
    assert!(!map.contains_key(&ids[1].into()));
}

#[test]
fn well_known_identifier_is_a_valid_key() {
    let mut map = PropertyMap::new();
    map.insert(Identifier::ITERATOR, vec![1, 2]);

    if let Some(values) = map.get_mut(&Identifier::ITERATOR.into()) {
        values.push(3);
    }

    assert_eq!(map.get(&Identifier::ITERATOR.into()), Some(&vec![1, 2, 3]));
}
