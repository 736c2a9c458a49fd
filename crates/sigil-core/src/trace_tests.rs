use crate::{Colors, Identifier, NoopTracer, PrintTracer, Realm, Tracer, Verbosity};

#[test]
fn default_verbosity_shows_only_creations_and_rejections() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::OFF);

    tracer.trace_mint(Identifier::ITERATOR, Some("x"));
    tracer.trace_registry_hit("foo", Identifier::ITERATOR);
    tracer.trace_key_for(Identifier::ITERATOR, None);
    tracer.trace_registry_created("foo", Identifier::ITERATOR);
    tracer.trace_construct_rejected(None);

    insta::assert_snapshot!(tracer.lines().join("\n"), @r#"
    for      "foo" created
    new      - rejected
    "#);
}

#[test]
fn very_verbose_shows_handles() {
    let mut realm = Realm::with_tracer(PrintTracer::new(Verbosity::VeryVerbose, Colors::OFF));

    let id = realm.mint(None);
    realm.key_for(id);

    insta::assert_snapshot!(realm.tracer().lines().join("\n"), @r"
    mint     - #1
    keyFor   not found #1
    ");
}

#[test]
fn colors_wrap_operation_names() {
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::ON);
    tracer.trace_registry_created("k", Identifier::ITERATOR);

    let line = &tracer.lines()[0];
    assert!(line.starts_with("\x1b[34mfor"));
    assert!(line.contains("\x1b[32m\"k\"\x1b[0m"));
}

#[test]
fn verbosity_from_count() {
    assert_eq!(Verbosity::from_count(0), Verbosity::Default);
    assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
    assert_eq!(Verbosity::from_count(5), Verbosity::VeryVerbose);
}

#[test]
fn noop_realm_behaves_like_traced_realm() {
    let mut plain: Realm<NoopTracer> = Realm::new();
    let mut traced = Realm::with_tracer(PrintTracer::default());

    let a = plain.get_or_create("k");
    let b = traced.get_or_create("k");

    assert_eq!(a.as_u32(), b.as_u32());
}
