use sigil_core::Verbosity;
use sigil_lib::Script;

use super::run::{render_json, traced_realm};

#[test]
fn json_report_includes_registry() {
    let script = Script::parse(
        r#"Identifier.for("app"); Identifier("local"); Identifier.for("db");"#,
    )
    .unwrap();
    let mut realm = traced_realm(None, false);
    let evaluation = script.evaluate_in(&mut realm).unwrap();

    let json = render_json(&evaluation, realm.registry()).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "watches": [
        {
          "expression": "Identifier.for(\"app\")",
          "value": "Identifier(app)",
          "type": "identifier"
        },
        {
          "expression": "Identifier(\"local\")",
          "value": "Identifier(local)",
          "type": "identifier"
        },
        {
          "expression": "Identifier.for(\"db\")",
          "value": "Identifier(db)",
          "type": "identifier"
        }
      ],
      "error": null,
      "registry": {
        "app": 1,
        "db": 3
      }
    }
    "#);
}

#[test]
fn json_report_carries_runtime_error() {
    let script = Script::parse("new Identifier();").unwrap();
    let mut realm = traced_realm(None, false);
    let evaluation = script.evaluate_in(&mut realm).unwrap();

    let json = render_json(&evaluation, realm.registry()).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "watches": [],
      "error": {
        "class": "InvalidConstructionError",
        "message": "Identifier is not a constructor"
      },
      "registry": {}
    }
    "#);
}

#[test]
fn default_trace_keeps_creations_only() {
    let script = Script::parse(r#"Identifier.for("app"); Identifier.for("app");"#).unwrap();
    let mut realm = traced_realm(None, false);
    script.evaluate_in(&mut realm).unwrap();

    insta::assert_snapshot!(realm.tracer().lines().join("\n"), @r#"for      "app" created"#);
}

#[test]
fn very_verbose_trace_shows_handles() {
    let script = Script::parse(r#"Identifier.for("app");"#).unwrap();
    let mut realm = traced_realm(Some(Verbosity::VeryVerbose), false);
    script.evaluate_in(&mut realm).unwrap();

    insta::assert_snapshot!(realm.tracer().lines().join("\n"), @r#"
    mint     "app" #1
    for      "app" created #1
    "#);
}
