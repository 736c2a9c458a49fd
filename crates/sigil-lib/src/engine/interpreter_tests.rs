use indoc::indoc;
use sigil_core::{Colors, Error as CoreError, Identifier, PrintTracer, Realm, Verbosity};

use crate::Script;
use crate::engine::{Evaluation, FuelLimits, Interpreter, RuntimeError, Value};
use crate::parser::parse;

fn run(source: &str) -> Evaluation {
    Script::parse(source)
        .expect("parse failed")
        .evaluate()
        .expect("script has errors")
}

fn log(source: &str) -> String {
    let evaluation = run(source);
    let mut lines: Vec<String> = evaluation
        .watches
        .iter()
        .map(|w| format!("{} => {} : {}", w.expression, w.value, w.type_name))
        .collect();
    if let Some(err) = &evaluation.error {
        lines.push(format!("!! {}: {err}", err.class()));
    }
    lines.join("\n")
}

fn error(source: &str) -> RuntimeError {
    run(source).error.expect("expected a runtime error")
}

fn type_mismatch(message: &str) -> RuntimeError {
    RuntimeError::Identifier(CoreError::type_mismatch(message))
}

#[test]
fn walkthrough() {
    let input = indoc! {r#"
    var sym1 = Identifier();
    var sym2 = Identifier("foo");
    var sym3 = Identifier("foo");

    Identifier("foo") === Identifier("foo");

    if (false) // flip to see the construction error
        var sym = new Identifier();

    var sym = Identifier("foo");
    typeof sym;
    var symObj = Object(sym);
    symObj;
    typeof symObj;

    Identifier.for("foo"); // created
    Identifier.for("foo"); // retrieved

    Identifier.for("bar") === Identifier.for("bar");
    Identifier("bar") === Identifier("bar");

    var sym = Identifier.for("mario");
    sym;
    sym.toString();
    "#};

    insta::assert_snapshot!(log(input), @r#"
    Identifier("foo") === Identifier("foo") => false : boolean
    typeof sym => "identifier" : string
    symObj => [Identifier: Identifier(foo)] : object
    typeof symObj => "object" : string
    Identifier.for("foo") => Identifier(foo) : identifier
    Identifier.for("foo") => Identifier(foo) : identifier
    Identifier.for("bar") === Identifier.for("bar") => true : boolean
    Identifier("bar") === Identifier("bar") => false : boolean
    sym => Identifier(mario) : identifier
    sym.toString() => "Identifier(mario)" : string
    "#);
}

#[test]
fn construction_is_rejected() {
    let evaluation = run("var ok = 1;\nnew Identifier(\"x\");");

    assert_eq!(
        evaluation.error,
        Some(RuntimeError::Identifier(CoreError::InvalidConstruction))
    );
    assert!(evaluation.watches.is_empty());
    insta::assert_snapshot!(
        evaluation.diagnostics().render_plain(),
        @"error at 12..31: InvalidConstructionError: Identifier is not a constructor"
    );
}

#[test]
fn construction_with_non_string_description_is_still_rejected() {
    assert_eq!(
        error("new Identifier(Identifier());"),
        RuntimeError::Identifier(CoreError::InvalidConstruction)
    );
}

#[test]
fn implicit_string_conversion_fails() {
    assert_eq!(
        error(r#""a" + Identifier("x");"#),
        type_mismatch("Cannot convert an Identifier value to a string")
    );
    assert_eq!(
        error("Identifier() + 1;"),
        type_mismatch("Cannot convert an Identifier value to a number")
    );
    assert_eq!(
        error(r#""" + Object(Identifier());"#),
        type_mismatch("Cannot convert an Identifier value to a string")
    );
}

#[test]
fn identifier_as_description_fails() {
    assert_eq!(
        error("Identifier(Identifier());"),
        type_mismatch("Cannot convert an Identifier value to a string")
    );
}

#[test]
fn explicit_conversions() {
    let input = indoc! {r#"
    String(Identifier("foo"));
    String(Identifier());
    Identifier("foo").toString();
    Object(Identifier("w")).toString();
    Identifier("foo").description;
    Identifier().description;
    Identifier.iterator;
    Identifier.iterator.description;
    "#};

    insta::assert_snapshot!(log(input), @r#"
    String(Identifier("foo")) => "Identifier(foo)" : string
    String(Identifier()) => "Identifier()" : string
    Identifier("foo").toString() => "Identifier(foo)" : string
    Object(Identifier("w")).toString() => "Identifier(w)" : string
    Identifier("foo").description => "foo" : string
    Identifier().description => undefined : undefined
    Identifier.iterator => Identifier(Identifier.iterator) : identifier
    Identifier.iterator.description => "Identifier.iterator" : string
    "#);
}

#[test]
fn key_for() {
    let input = indoc! {r#"
    Identifier.keyFor(Identifier.for("k"));
    Identifier.keyFor(Identifier("k"));
    Identifier.keyFor(Identifier.iterator);
    Identifier.keyFor(Identifier.for(""));
    "#};

    insta::assert_snapshot!(log(input), @r#"
    Identifier.keyFor(Identifier.for("k")) => "k" : string
    Identifier.keyFor(Identifier("k")) => undefined : undefined
    Identifier.keyFor(Identifier.iterator) => undefined : undefined
    Identifier.keyFor(Identifier.for("")) => "" : string
    "#);
}

#[test]
fn key_for_requires_identifier() {
    assert_eq!(
        error(r#"Identifier.keyFor("k");"#),
        type_mismatch(r#""k" is not an identifier"#)
    );
}

#[test]
fn registry_key_is_converted() {
    insta::assert_snapshot!(log("Identifier.for(1) === Identifier.for(\"1\");"), @r#"Identifier.for(1) === Identifier.for("1") => true : boolean"#);
}

#[test]
fn own_identifier_keys_in_insertion_order() {
    let input = indoc! {r#"
    var a = Identifier("a");
    var b = Identifier.for("b");
    var obj = {};
    obj[a] = 1;
    obj.name = "x";
    obj[b] = 2;
    Object.getOwnPropertySymbols(obj);
    Object.getOwnPropertySymbols(obj)[0] === a;
    Object.getOwnPropertySymbols(obj)[1] === b;
    Object.keys(obj);
    Object.getOwnPropertySymbols({ plain: 1 });
    obj;
    "#};

    insta::assert_snapshot!(log(input), @r#"
    Object.getOwnPropertySymbols(obj) => [Identifier(a), Identifier(b)] : object
    Object.getOwnPropertySymbols(obj)[0] === a => true : boolean
    Object.getOwnPropertySymbols(obj)[1] === b => true : boolean
    Object.keys(obj) => ["name"] : object
    Object.getOwnPropertySymbols({ plain: 1 }) => [] : object
    obj => { [Identifier(a)]: 1, name: "x", [Identifier(b)]: 2 } : object
    "#);
}

#[test]
fn identifier_keys_compare_by_identity() {
    let input = indoc! {r#"
    var obj = {};
    obj[Identifier("k")] = 1;
    obj[Identifier("k")];
    obj[Identifier.for("r")] = 2;
    obj[Identifier.for("r")];
    Object.getOwnPropertySymbols(obj).length;
    "#};

    insta::assert_snapshot!(log(input), @r#"
    obj[Identifier("k")] => undefined : undefined
    obj[Identifier.for("r")] => 2 : number
    Object.getOwnPropertySymbols(obj).length => 2 : number
    "#);
}

#[test]
fn get_own_property_symbols_of_nothing() {
    assert_eq!(
        error("Object.getOwnPropertySymbols(undefined);"),
        type_mismatch("Cannot convert undefined or null to object")
    );
}

#[test]
fn for_of_uses_iterator_identifier() {
    let input = indoc! {r#"
    var seq = { [Identifier.iterator]: [1, 2] };
    for (const x of seq) x;
    for (let c of "ab") { c; }
    for (var item of [true]) item;
    item;
    "#};

    insta::assert_snapshot!(log(input), @r#"
    x => 1 : number
    x => 2 : number
    c => "a" : string
    c => "b" : string
    item => true : boolean
    item => true : boolean
    "#);
}

#[test]
fn for_of_rejects_non_iterables() {
    let evaluation = run("var o = { [Identifier(\"iterator\")]: [1] };\nfor (const x of o) x;");

    assert_eq!(evaluation.error, Some(type_mismatch("o is not iterable")));
    let span = evaluation.error_span.unwrap();
    assert_eq!(span.start, 59);
    assert_eq!(span.end, 60);
}

#[test]
fn unknown_name_keeps_earlier_watches() {
    let evaluation = run("1;\nmissing;\n2;");

    assert_eq!(
        evaluation.error,
        Some(RuntimeError::Reference {
            name: "missing".to_owned()
        })
    );
    assert_eq!(evaluation.watches.len(), 1);
    insta::assert_snapshot!(evaluation.render(), @r"
    1  1  (number)
    ReferenceError: missing is not defined
    ");
}

#[test]
fn typeof_undeclared_is_undefined() {
    insta::assert_snapshot!(log("typeof missing;"), @r#"typeof missing => "undefined" : string"#);
}

#[test]
fn typeof_table() {
    let input = indoc! {r#"
    typeof undefined;
    typeof null;
    typeof true;
    typeof 1;
    typeof "s";
    typeof Identifier();
    typeof Object(Identifier());
    typeof [];
    typeof Identifier;
    typeof Identifier.for;
    "#};

    insta::assert_snapshot!(log(input), @r#"
    typeof undefined => "undefined" : string
    typeof null => "object" : string
    typeof true => "boolean" : string
    typeof 1 => "number" : string
    typeof "s" => "string" : string
    typeof Identifier() => "identifier" : string
    typeof Object(Identifier()) => "object" : string
    typeof [] => "object" : string
    typeof Identifier => "function" : string
    typeof Identifier.for => "function" : string
    "#);
}

#[test]
fn const_cannot_be_reassigned() {
    assert_eq!(
        error("const c = 1;\nc = 2;"),
        type_mismatch("Assignment to constant variable.")
    );
}

#[test]
fn let_cannot_be_redeclared() {
    assert_eq!(
        error("let a = 1;\nlet a = 2;"),
        RuntimeError::Redeclared {
            name: "a".to_owned()
        }
    );
    assert_eq!(
        error("let a = 1;\nvar a = 2;"),
        RuntimeError::Redeclared {
            name: "a".to_owned()
        }
    );
}

#[test]
fn var_can_be_redeclared() {
    insta::assert_snapshot!(log("var a = 1;\nvar a = 2;\na;"), @"a => 2 : number");
}

#[test]
fn blocks_scope_let() {
    let input = indoc! {"
    let a = 1;
    { let a = 2; a; }
    a;
    "};

    insta::assert_snapshot!(log(input), @r"
    a => 2 : number
    a => 1 : number
    ");
}

#[test]
fn assigning_undeclared_name_fails() {
    assert_eq!(
        error("x = 1;"),
        RuntimeError::Reference {
            name: "x".to_owned()
        }
    );
}

#[test]
fn equality() {
    let input = indoc! {r#"
    var s = Identifier("s");
    null == undefined;
    null === undefined;
    1 == "1";
    true == 1;
    Object(s) == s;
    Object(s) === s;
    s == "Identifier(s)";
    s !== Identifier("s");
    [1] == "1";
    "#};

    insta::assert_snapshot!(log(input), @r#"
    null == undefined => true : boolean
    null === undefined => false : boolean
    1 == "1" => true : boolean
    true == 1 => true : boolean
    Object(s) == s => true : boolean
    Object(s) === s => false : boolean
    s == "Identifier(s)" => false : boolean
    s !== Identifier("s") => true : boolean
    [1] == "1" => true : boolean
    "#);
}

#[test]
fn addition_and_concatenation() {
    let input = indoc! {r#"
    1 + 2;
    0.5 + 1;
    "n" + 1;
    [1, 2] + "";
    true + 1;
    "#};

    insta::assert_snapshot!(log(input), @r#"
    1 + 2 => 3 : number
    0.5 + 1 => 1.5 : number
    "n" + 1 => "n1" : string
    [1, 2] + "" => "1,2" : string
    true + 1 => 2 : number
    "#);
}

#[test]
fn inspection() {
    let input = indoc! {r#"
    var o = { a: 1, "b c": [1, "x"], [Identifier("k")]: null };
    o;
    o.self = o;
    o.self.a;
    Object(o) === o;
    var w = Object(Identifier("w"));
    w.tag = 1;
    w;
    Identifier.for;
    "#};

    insta::assert_snapshot!(log(input), @r#"
    o => { a: 1, "b c": [1, "x"], [Identifier(k)]: null } : object
    o.self.a => 1 : number
    Object(o) === o => true : boolean
    w => [Identifier: Identifier(w)] { tag: 1 } : object
    Identifier.for => [Function: for] : function
    "#);
}

#[test]
fn circular_objects() {
    insta::assert_snapshot!(log("var o = {};\no.me = o;\no;"), @"o => { me: [Circular] } : object");
}

#[test]
fn array_writes_extend() {
    insta::assert_snapshot!(log("var a = [];\na[2] = 1;\na;\na.length;"), @r"
    a => [undefined, undefined, 1] : object
    a.length => 3 : number
    ");
}

#[test]
fn indices_past_array_range_are_plain_keys() {
    let input = indoc! {"
    var a = [];
    a[100000000000] = 1;
    a.length;
    a[100000000000];
    Object.keys(a);
    "};

    insta::assert_snapshot!(log(input), @r#"
    a.length => 0 : number
    a[100000000000] => 1 : number
    Object.keys(a) => ["100000000000"] : object
    "#);
}

#[test]
fn array_growth_costs_fuel() {
    let evaluation = run("var a = [];\na.length;\na[4000000000] = 1;\na.length;");

    assert_eq!(evaluation.error, Some(RuntimeError::ExecFuelExhausted));
    assert_eq!(evaluation.error.as_ref().unwrap().class(), "RangeError");
    assert_eq!(evaluation.watches.len(), 1);

    let script = Script::parse_with("var a = [];\na[5] = 1;", FuelLimits::new().with_exec_fuel(8));
    let evaluation = script.unwrap().evaluate().unwrap();
    assert_eq!(evaluation.error, Some(RuntimeError::ExecFuelExhausted));
}

#[test]
fn deeply_nested_array_conversion_is_limited() {
    let source = format!(
        "var s = \"{}\";\nvar a = [];\nfor (var c of s) a = [a];\na.length;\n\"\" + a;",
        "x".repeat(300)
    );

    insta::assert_snapshot!(log(&source), @r"
    a.length => 1 : number
    !! RangeError: runtime recursion limit exceeded
    ");
    insta::assert_snapshot!(log("var a = [];\nfor (var c of \"xyz\") a = [a, c];\n\"\" + a;"), @r#"
    "" + a => ",x,y,z" : string
    "#);
}

#[test]
fn reading_through_undefined_fails() {
    assert_eq!(
        error("var o = {};\no.missing.deeper;"),
        type_mismatch("Cannot read properties of undefined (reading 'deeper')")
    );
}

#[test]
fn calling_a_non_function_fails() {
    assert_eq!(error("var o = {};\no.x();"), type_mismatch("o.x is not a function"));
    assert_eq!(error("new String();"), type_mismatch("String is not a constructor"));
}

#[test]
fn builtins_can_be_shadowed() {
    insta::assert_snapshot!(log("let String = 1;\nString;"), @"String => 1 : number");
}

#[test]
fn exec_fuel_is_enforced() {
    let script = Script::parse_with("1; 2; 3; 4; 5;", FuelLimits::new().with_exec_fuel(5)).unwrap();
    let evaluation = script.evaluate().unwrap();

    assert_eq!(evaluation.error, Some(RuntimeError::ExecFuelExhausted));
    assert_eq!(evaluation.watches.len(), 2);
}

#[test]
fn recursion_limit_is_enforced() {
    let source = "[[[[1]]]];";
    let program = parse(source).unwrap().program;
    let mut realm = Realm::new();
    let mut interpreter =
        Interpreter::new(&mut realm, source).with_limits(FuelLimits::new().with_recursion_limit(3));

    let evaluation = interpreter.run(&program);

    assert_eq!(evaluation.error, Some(RuntimeError::RecursionLimitExceeded));
}

#[test]
fn registry_outlives_interpreter() {
    let mut realm = Realm::new();
    let first = "var a = Identifier.for(\"app\");";
    let second = "Identifier.for(\"app\");";
    let first_program = parse(first).unwrap().program;
    let second_program = parse(second).unwrap().program;

    let app = {
        let mut interpreter = Interpreter::new(&mut realm, first);
        interpreter.run(&first_program);
        interpreter.binding("a").and_then(|v| v.as_identifier()).unwrap()
    };

    let mut interpreter = Interpreter::new(&mut realm, second);
    let evaluation = interpreter.run(&second_program);

    assert_eq!(evaluation.watches[0].value, "Identifier(app)");
    assert_eq!(realm.registry().get("app"), Some(app));
    assert_eq!(realm.registry().len(), 1);
}

#[test]
fn script_runs_against_caller_realm() {
    let tracer = PrintTracer::new(Verbosity::Verbose, Colors::OFF);
    let mut realm = Realm::with_tracer(tracer);
    let script = Script::parse(indoc! {r#"
    var a = Identifier.for("app");
    Identifier.for("app");
    Identifier.keyFor(a);
    Identifier.keyFor(Identifier());
    "#})
    .unwrap();

    let evaluation = script.evaluate_in(&mut realm).unwrap();

    assert!(evaluation.is_ok());
    assert!(realm.registry().get("app").is_some());
    insta::assert_snapshot!(realm.into_tracer().into_lines().join("\n"), @r#"
    mint     "app"
    for      "app" created
    for      "app" hit
    keyFor   "app"
    mint     -
    keyFor   not found
    "#);
}

#[test]
fn binding_reads_values() {
    let source = "var n = 2;";
    let program = parse(source).unwrap().program;
    let mut realm = Realm::new();
    let mut interpreter = Interpreter::new(&mut realm, source);
    interpreter.run(&program);

    assert_eq!(interpreter.binding("n"), Some(Value::Number(2.0)));
    assert!(matches!(interpreter.binding("Identifier"), Some(Value::Builtin(_))));
    assert_eq!(interpreter.binding("missing"), None);
    assert_eq!(
        interpreter.inspect(&Value::Identifier(Identifier::ITERATOR)),
        "Identifier(Identifier.iterator)"
    );
}

#[test]
fn evaluation_serializes() {
    let evaluation = run("1;\nnew Identifier();");
    let json = serde_json::to_string(&evaluation).unwrap();

    insta::assert_snapshot!(json, @r#"{"watches":[{"expression":"1","value":"1","type":"number"}],"error":{"class":"InvalidConstructionError","message":"Identifier is not a constructor"}}"#);
}
