use super::*;

#[test]
fn report_uses_fallback_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, Span::new(3, 4))
        .emit();

    insta::assert_snapshot!(diagnostics.render_plain(), @"error at 3..4: expected an expression");
}

#[test]
fn message_appends_detail() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedToken, Span::new(0, 1))
        .message("`)`")
        .emit();

    let first = diagnostics.iter().next().unwrap();
    assert_eq!(first.message(), "expected token: `)`");
}

#[test]
fn runtime_detail_replaces_message() {
    assert_eq!(
        DiagnosticKind::RuntimeError.message(Some("x is not defined")),
        "x is not defined"
    );
}

#[test]
fn one_diagnostic_per_position_higher_priority_wins() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, Span::new(5, 6))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, Span::new(5, 6))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnrecognizedInput, Span::new(5, 6))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics.iter().next().unwrap().kind(),
        DiagnosticKind::ExpectedExpression
    );
}

#[test]
fn diagnostics_sorted_by_position() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, Span::new(9, 10))
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedName, Span::new(2, 3))
        .emit();

    let starts: Vec<u32> = diagnostics.iter().map(|d| d.span().start).collect();
    assert_eq!(starts, vec![2, 9]);
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ConstantCondition, Span::new(4, 9))
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
    insta::assert_snapshot!(
        diagnostics.render_plain(),
        @"warning at 4..9: condition is constant (hint: the branch is never taken; flip the literal to run it)"
    );
}

#[test]
fn extend_merges() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::ExpectedName, Span::new(1, 2)).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::RuntimeError, Span::new(0, 1))
        .message("boom")
        .emit();

    a.extend(b);

    assert_eq!(a.error_count(), 2);
    assert_eq!(a.iter().next().unwrap().message(), "boom");
}

#[test]
fn render_with_source_includes_snippet() {
    let source = "var x = ;";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedExpression, Span::new(8, 9))
        .emit();

    let out = diagnostics.render(source);
    assert!(out.contains("error: expected an expression"));
    assert!(out.contains("var x = ;"));
}
