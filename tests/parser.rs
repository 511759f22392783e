use addyscript::{
    ast::{ExprKind, StatementKind},
    error::{ErrorKind, Message, ParseError},
    parse,
};

fn assert_parses(src: &str) {
    if let Err(e) = parse(src, "test.add") {
        panic!("Script failed: {e}");
    }
}

fn failure(src: &str) -> ParseError {
    match parse(src, "test.add") {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => e,
    }
}

fn assert_fails(src: &str, kind: ErrorKind, message: &Message) {
    let error = failure(src);
    assert_eq!((error.kind, &error.message), (kind, message), "for {src:?}");
}

#[test]
fn declarations_and_assignments() {
    assert_parses("var x = 1 + 2;");
    assert_parses("var x, y = 2, z;");
    assert_parses("const A = 1, B = A * 2;");
    assert_parses("x = y = 3; x += 2; x ??= 1; x **= 2; x <<= 1;");
    assert_parses("let a.b[0] = 1;");
    assert_fails("const A;",
                   ErrorKind::Syntax,
                   &Message::UnexpectedToken { found: "';'".to_string() });
    assert_fails("let f() = 1;", ErrorKind::Semantic, &Message::InvalidLValue);
    assert_fails("1 = 2;", ErrorKind::Semantic, &Message::InvalidLValue);
}

#[test]
fn expressions() {
    assert_parses("a ? b : c ? d : e;");
    assert_parses("a && b || !c and d or e;");
    assert_parses("a?.b?[0] ?? c;");
    assert_parses("x is int && y is not null;");
    assert_parses("[1, ..rest, 3][1..] + {1, 2} + {'a' => 1};");
    assert_parses("f(1, ..args, key: 2);");
    assert_parses("(float) 1 + (int) '2';");
    assert_parses("new Point(1, 2) { z = 3 }; new { a = 1, b };");
    assert_parses("typeof(int) == typeof(System::Text);");
    assert_parses("-x ** 2; x++ + ++y; 5!;");
    assert_fails("f(a: 1, 2);", ErrorKind::Syntax, &Message::PositionalAfterNamed);
    assert_fails("(a, b);",
                   ErrorKind::Syntax,
                   &Message::UnexpectedToken { found: "','".to_string() });
}

#[test]
fn functions_and_closures() {
    assert_parses("function f(a, b = 2, ..rest) { return a + b; }");
    assert_parses("function g(&x) => x * 2;");
    assert_parses("var h = |x, y| => x + y; var k = || => { return 1; };");
    assert_parses("var m = function (x) { return x; };");
    assert_parses("extern function now();");
    assert_fails("function f(a, a) { }",
                   ErrorKind::Semantic,
                   &Message::DuplicatedParameter { name: "a".to_string() });
    assert_fails("return 1;", ErrorKind::Semantic, &Message::ScriptCannotReturnValue);
    assert_fails("yield 1;", ErrorKind::Syntax, &Message::YieldUsedOutOfIterator);
}

#[test]
fn control_flow() {
    assert_parses("if (a) b(); else if (c) d(); else { e(); }");
    assert_parses("while (true) { if (x) break; continue; }");
    assert_parses("do x++; while (x < 10)");
    assert_parses("for (var i = 0, j = 10; i < j; i++, j--) { }");
    assert_parses("for (;;) break;");
    assert_parses("foreach (k => v in map) println(k, v);");
    assert_parses("switch (x) { case 1: case 2: break; case 'a': goto case 1; default: }");
    assert_parses("try { f(); } catch (e) { throw e; } finally { g(); }");
    assert_parses("try (open('file')) { read(); }");
    assert_parses("start: x++; if (x < 3) goto start;");
    assert_fails("break;", ErrorKind::Syntax, &Message::NoBreakOutOfLoop);
    assert_fails("continue;", ErrorKind::Syntax, &Message::NoContinueOutOfLoop);
    assert_fails("try { }", ErrorKind::Syntax, &Message::CatchOrFinallyRequired);
    assert_fails("goto nowhere;",
                   ErrorKind::Semantic,
                   &Message::UndeclaredLabel { name: "nowhere".to_string() });
}

#[test]
fn classes() {
    assert_parses("class A { }");
    assert_parses("class B : System::A { public x = 1; protected static y; }");
    assert_parses("abstract class C { public abstract function f(); }");
    assert_parses("class D { public property p { read => 1; private write { } } }");
    assert_parses("class E { constructor (x) : super(x) { } operator + (o) => o; }");
    assert_fails("class A { function this() { } }",
                   ErrorKind::Syntax,
                   &Message::UnexpectedToken { found: "'this'".to_string() });
    assert_fails("class A { x; x; }",
                   ErrorKind::Semantic,
                   &Message::MemberNameConflict { name: "x".to_string() });
}

#[test]
fn switch_expressions_and_patterns() {
    assert_parses("var s = x switch { 1..5 => 'low', > 5 => 'high', _ => 'none' };");
    assert_parses("var t = p switch { Point { x = 0, y = 0 } => 'origin', Point => 'point', \
                    null => 'nothing', _ => throw 'bad' };");
    assert_parses("var u = n switch { v: v % 2 == 0 => 'even', _ when n < 0 => 'negative', \
                    _ => { yield 'odd'; } };");
}

#[test]
fn interpolated_strings() {
    let program = parse("var s = $'{a} and {b,5:0.0}';", "test.add").unwrap();
    let StatementKind::Variables(declarators) = &program.statements[0].kind else {
        panic!("not a variable declaration");
    };
    let Some(ExprKind::Interpolation { pattern, substitutions }) =
        declarators[0].value.as_ref().map(|value| &value.kind)
    else {
        panic!("not an interpolated string");
    };
    assert_eq!(pattern, "{0} and {1,5:0.0}");
    assert_eq!(substitutions.len(), 2);
    assert_fails("var s = $'{a';", ErrorKind::Semantic, &Message::MissingClosingBrace);
}

#[test]
fn errors_are_located() {
    let error = failure("var x = 1;\n  break;");
    assert_eq!(error.to_string(),
               "test.add(2,3): syntax error: break is only allowed in a loop or a switch");
    assert_eq!(error.span.start.line, 2);
}
