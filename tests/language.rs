use std::{cell::RefCell, fs, rc::Rc};

use pretty_assertions::assert_eq;
use quill::{
    global_environment,
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalConfig, evaluate},
        lexer::lexerize,
        parser::parse,
        value::core::Value,
    },
    run_in,
};
use walkdir::WalkDir;

const FILENAME: &str = "test.ql";

/// Runs `src` in a fresh global scope, capturing everything written through
/// `log`.
fn run_captured(src: &str) -> (Result<Value, quill::error::Error>, String) {
    let buffer = Rc::new(RefCell::new(Vec::<u8>::new()));
    let env = global_environment(buffer.clone());
    let result = run_in(FILENAME, src, &mut Context::default(), &env);
    let output = String::from_utf8(buffer.borrow().clone()).expect("output is UTF-8");
    (result, output)
}

fn eval(src: &str) -> Value {
    match run_captured(src).0 {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_success(src: &str) {
    if let Err(e) = run_captured(src).0 {
        panic!("Script failed: {e}\n{src}");
    }
}

fn assert_failure(src: &str) -> String {
    match run_captured(src).0 {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail\n{src}"),
        Err(e) => e.to_string(),
    }
}

#[test]
fn scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "ql"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let (Err(e), _) = run_captured(&content) {
            panic!("Script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn readme_examples_work() {
    let content = fs::read_to_string("README.md").expect("README.md is readable");
    let blocks = extract_quill_blocks(&content);
    assert!(!blocks.is_empty(), "No quill examples found in README.md");

    for (i, code) in blocks.iter().enumerate() {
        if let (Err(e), _) = run_captured(code) {
            panic!("README example {} failed:\n{}\nError: {}", i + 1, code, e);
        }
    }
}

fn extract_quill_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```quill") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

#[test]
fn precedence_and_left_associativity() {
    assert_eq!(eval("2 + 3 * 4"), Value::Number(14.0));
    assert_eq!(eval("1 + 2 + 3"), Value::Number(6.0));
    assert_eq!(eval("10 - 4 - 3"), Value::Number(3.0));
    assert_eq!(eval("8 / 2 / 2"), Value::Number(2.0));
    assert_eq!(eval("2 * 3 % 4"), Value::Number(2.0));
    assert_eq!(eval("(2 + 3) * 4"), Value::Number(20.0));
    assert_success("assert(2 + 3 * 4 == 14)");
}

#[test]
fn block_scope_shadows_without_leaking() {
    assert_eq!(eval("let x = 1; { let x = 2; } x"), Value::Number(1.0));
    assert_eq!(eval("let x = 1; { x = 2; } x"), Value::Number(2.0));
    assert_eq!(assert_failure("{ let inner = 1; } inner"),
               "test.ql:1:20: Variable 'inner' does not exist");
}

#[test]
fn redeclaration_in_same_scope_is_error() {
    assert_eq!(assert_failure("let x = 1; let x = 2;"),
               "test.ql:1:16: Variable 'x' cannot be redeclared");
    assert_failure("function f() { 1 } let f = 2");
    assert_failure("let a = 1, a = 2");
}

#[test]
fn assignment_to_undeclared_is_error() {
    assert_eq!(assert_failure("y = 5;"), "test.ql:1:1: Variable 'y' does not exist");
    assert_failure("z += 1");
}

#[test]
fn zero_and_empty_string_are_truthy() {
    assert_eq!(eval("if (0) { 'taken' } else { 'skipped' }"), Value::from("taken"));
    assert_eq!(eval("if ('') { 'taken' } else { 'skipped' }"), Value::from("taken"));
    assert_eq!(eval("if (null) { 'taken' } else { 'skipped' }"), Value::from("skipped"));
    assert_eq!(eval("if (undefined) { 'taken' }"), Value::Undefined);
    assert_eq!(eval("!0"), Value::Boolean(false));
}

#[test]
fn closure_mutates_block_variable_after_block_ends() {
    let src = "
        let counter;
        {
            let count = 0;
            function increment() { count += 1 }
            counter = increment;
        }
        counter();
        counter();
        counter()
    ";
    assert_eq!(eval(src), Value::Number(3.0));
}

#[test]
fn closures_capture_per_call_scope() {
    let src = "
        function makeAdder(n) { function (x) { x + n } }
        let add2 = makeAdder(2), add10 = makeAdder(10);
        [add2(1), add10(1)]
    ";
    assert_eq!(eval(src).to_string(), "[3, 11]");
}

#[test]
fn evaluation_does_not_mutate_the_tree() {
    let src = "let x = 1; x += 2; { let y = x * 2; y }";
    let lexemes = lexerize(FILENAME, src).unwrap();
    let program = parse(FILENAME, &lexemes).unwrap();
    let snapshot = program.clone();

    let first = evaluate(FILENAME, &program, &mut Context::default(), &Environment::new()).unwrap();
    let second =
        evaluate(FILENAME, &program, &mut Context::default(), &Environment::new()).unwrap();

    assert_eq!(first, Value::Number(6.0));
    assert_eq!(first, second);
    assert_eq!(program, snapshot);
}

#[test]
fn logical_operators_evaluate_both_sides() {
    let src = "
        let calls = 0;
        function touch() { calls += 1; true }
        false && touch();
        true || touch();
        calls
    ";
    assert_eq!(eval(src), Value::Number(2.0));
    assert_eq!(eval("1 || 2"), Value::Boolean(true));
    assert_eq!(eval("0 && null"), Value::Boolean(false));
}

#[test]
fn unary_binds_tighter_than_logical() {
    assert_eq!(eval("!false && false"), Value::Boolean(false));
    assert_eq!(eval("-2 * 3"), Value::Number(-6.0));
    assert_eq!(eval("!!1"), Value::Boolean(true));
}

#[test]
fn while_loop_runs_until_falsy() {
    assert_eq!(eval("let i = 0, total = 0; while (i < 5) { i += 1; total += i } total"),
               Value::Number(15.0));
    assert_eq!(eval("while (false) { 1 }"), Value::Undefined);
}

#[test]
fn while_body_gets_fresh_scope_each_iteration() {
    assert_eq!(eval("let i = 0; while (i < 3) { let seen = i; i += 1 } i"),
               Value::Number(3.0));
}

#[test]
fn compound_assignments() {
    assert_eq!(eval("let x = 10; x -= 2; x *= 3; x /= 4; x %= 4; x"), Value::Number(2.0));
    assert_eq!(eval("let x; let y = (x = 4) + 1; [x, y]").to_string(), "[4, 5]");
}

#[test]
fn compound_add_concatenates_strings() {
    assert_eq!(eval("let s = 'a'; s += 'b'; s"), Value::from("ab"));
    assert_eq!(eval("let s = 'a'; s += 1; s"), Value::from("a1"));
    assert_eq!(eval("let n = 1; n += 'x'; n"), Value::from("1x"));
    assert_eq!(eval("let s = 'ab'; s -= 1; s"), Value::Number(0.0));
    assert_eq!(eval("'a' + 'b'"), Value::Number(2.0));
}

#[test]
fn declaration_values() {
    assert_eq!(eval("let a = 1, b = 2"), Value::Number(2.0));
    assert_eq!(eval("let a = 1, b; b"), Value::Undefined);
    assert_eq!(eval("var v = 'var works'; v"), Value::from("var works"));
    assert_eq!(eval(""), Value::Undefined);
}

#[test]
fn equality_is_strict_inequality_is_loose() {
    assert_eq!(eval("1 == true"), Value::Boolean(false));
    assert_eq!(eval("1 != true"), Value::Boolean(false));
    assert_eq!(eval("'1' != 1"), Value::Boolean(false));
    assert_eq!(eval("null == undefined"), Value::Boolean(false));
    assert_eq!(eval("null != undefined"), Value::Boolean(false));
    assert_eq!(eval("'a' == 'a'"), Value::Boolean(true));
    assert_eq!(eval("let a = [1]; a == a"), Value::Boolean(true));
    assert_eq!(eval("[1] == [1]"), Value::Boolean(false));
}

#[test]
fn comparisons() {
    assert_eq!(eval("'apple' < 'banana'"), Value::Boolean(true));
    assert_eq!(eval("1 < '2'"), Value::Boolean(false));
    assert_eq!(eval("3 >= 3"), Value::Boolean(true));
    assert_eq!(eval("1 / 0 > 1000000"), Value::Boolean(true));
}

#[test]
fn arrays_objects_and_strings() {
    assert_eq!(eval("let o = { a: 1, \"b\": [1, 2, 3] }; o.b[1] + o.a"), Value::Number(3.0));
    assert_eq!(eval("let o = { a: 1 }; o.missing"), Value::Undefined);
    assert_eq!(eval("[1, 2][5]"), Value::Undefined);
    assert_eq!(eval("[1, 2].length"), Value::Number(2.0));
    assert_eq!(eval("let s = 'héllo'; s[1]"), Value::from("é"));
    assert_eq!(eval("'abc'.length"), Value::Number(3.0));
    assert_eq!(eval("let o = { '1': 'one' }; o[1]"), Value::from("one"));
    assert_eq!(eval("let a = 5; let o = { a, b: 2, }; o").to_string(), "{ a: 5, b: 2 }");
}

#[test]
fn shorthand_property_needs_variable() {
    assert_eq!(assert_failure("let o = { missing }"),
               "test.ql:1:11: Variable 'missing' does not exist");
}

#[test]
fn member_access_on_primitive_is_error() {
    assert_eq!(assert_failure("let n = 1; n.x"),
               "test.ql:1:12: Cannot access a member of a value of type 'number'");
    assert_failure("null[0]");
}

#[test]
fn calling_non_function_is_error() {
    assert_eq!(assert_failure("let n = 1; n()"),
               "test.ql:1:12: Value of type 'number' is not callable");
    assert_failure("'text'(1)");
}

#[test]
fn functions_and_recursion() {
    assert_eq!(eval("let add = function (a, b) { a + b }; add(2, 3)"), Value::Number(5.0));
    assert_eq!(eval("function fact(n) { if (n <= 1) { 1 } else { n * fact(n - 1) } } fact(5)"),
               Value::Number(120.0));
    assert_eq!(eval("function f() {} f()"), Value::Undefined);
    assert_eq!(eval("function curry(a) { function (b) { a * b } } curry(6)(7)"),
               Value::Number(42.0));
}

#[test]
fn runaway_recursion_is_reported() {
    let err = assert_failure("function f() { f() } f()");
    assert_eq!(err, "test.ql:1:16: Maximum call depth of 1000 exceeded");
}

#[test]
fn call_depth_is_configurable() {
    let env = global_environment(Rc::new(RefCell::new(std::io::sink())));
    let mut context = Context::new(EvalConfig { max_call_depth: 10 });
    let src = "function down(n) { if (n > 0) { down(n - 1) } else { 'done' } }";
    run_in(FILENAME, src, &mut context, &env).unwrap();

    assert_eq!(run_in(FILENAME, "down(5)", &mut context, &env).unwrap(), Value::from("done"));
    assert!(run_in(FILENAME, "down(50)", &mut context, &env).is_err());
    assert_eq!(run_in(FILENAME, "down(5)", &mut context, &env).unwrap(), Value::from("done"));
}

#[test]
fn log_writes_display_form() {
    let (result, output) =
        run_captured("log.write('a'); log.writeln([1, 'b', null]); log.writeln({ k: 2.5 })");
    assert_eq!(result.unwrap(), Value::Undefined);
    assert_eq!(output, "a[1, \"b\", null]\n{ k: 2.5 }\n");
}

#[test]
fn log_writes_numbers_and_specials() {
    let (_, output) = run_captured("log.writeln(1 / 0); log.writeln(0 / 0); log.writeln(-0); \
                                    log.writeln(); log.writeln(log.writeln)");
    assert_eq!(output, "Infinity\nNaN\n0\nundefined\n[native writeln]\n");
}

#[test]
fn failed_assert_is_reported() {
    assert_eq!(assert_failure("assert(1 == 2)"), "test.ql:1:1: Assertion failed");
    assert_eq!(eval("assert(0)"), Value::Boolean(true));
}

#[test]
fn function_values_display_their_name() {
    assert_eq!(eval("function fact(n) { n } fact").to_string(), "[function fact]");
    assert_eq!(eval("function (n) { n }").to_string(), "[function anonymous]");
}

#[test]
fn lex_errors_are_reported_with_position() {
    assert_eq!(assert_failure("let x = #"), "test.ql:1:9: Unexpected character '#'");
    assert_eq!(assert_failure("let s = 'abc"),
               "test.ql:1:9: Unterminated string literal, expected closing '");
}

#[test]
fn parse_errors_are_reported_with_position() {
    assert_eq!(assert_failure("let x = (1 + 2"),
               "test.ql:1:15: Expected ')', found 'end of file'");
    assert_eq!(assert_failure("let x = 1\nlet = 2"),
               "test.ql:2:5: Expected identifier, found '='");
    assert_eq!(assert_failure("function f(a, a) { a }"),
               "test.ql:1:15: Duplicate parameter 'a' in function declaration");
}

#[test]
fn comments_are_ignored() {
    assert_eq!(eval("// leading\n1 /* inline */ + 2 // trailing"), Value::Number(3.0));
}

#[test]
fn else_if_chains() {
    let src = "
        function classify(n) {
            if (n < 0) { 'negative' } else if (n == 0) { 'zero' } else { 'positive' }
        }
        [classify(-1), classify(0), classify(3)]
    ";
    assert_eq!(eval(src).to_string(), "[\"negative\", \"zero\", \"positive\"]");
}

#[test]
fn persistent_scope_across_runs() {
    let env = global_environment(Rc::new(RefCell::new(std::io::sink())));
    let mut context = Context::default();

    run_in(FILENAME, "let x = 1", &mut context, &env).unwrap();
    assert_eq!(run_in(FILENAME, "x + 1", &mut context, &env).unwrap(), Value::Number(2.0));
    assert!(run_in(FILENAME, "let x = 3", &mut context, &env).is_err());
    assert_eq!(run_in(FILENAME, "x", &mut context, &env).unwrap(), Value::Number(1.0));
}

/// Nesting depth for the deep-input tests.
const DEEP: usize = 50_000;

#[test]
fn deeply_nested_arrays() {
    let src = format!("let a = {}1{}; 0", "[".repeat(DEEP), "]".repeat(DEEP));
    assert_eq!(eval(&src), Value::Number(0.0));
}

#[test]
fn deeply_nested_blocks() {
    let src = format!("{}1{}", "{".repeat(DEEP), "}".repeat(DEEP));
    assert_eq!(eval(&src), Value::Number(1.0));
}

#[test]
fn deeply_nested_objects_and_groups() {
    let object = format!("let o = {}1{}; 0", "{ a: ".repeat(DEEP), " }".repeat(DEEP));
    assert_eq!(eval(&object), Value::Number(0.0));

    let grouped = format!("{}2{}", "(".repeat(DEEP), ")".repeat(DEEP));
    assert_eq!(eval(&grouped), Value::Number(2.0));
}

#[test]
fn long_operator_chains() {
    let sum = format!("0{}", " + 1".repeat(DEEP));
    assert_eq!(eval(&sum), Value::Number(50_000.0));

    let negations = format!("{}true", "!".repeat(DEEP));
    assert_eq!(eval(&negations), Value::Boolean(true));
}

#[test]
fn deeply_nested_value_displays() {
    let src = format!("{}'x'{}", "[".repeat(DEEP), "]".repeat(DEEP));
    let shown = eval(&src).to_string();

    assert_eq!(shown.len(), 2 * DEEP + 3);
    assert_eq!(shown.trim_matches(|c: char| c == '[' || c == ']'), "\"x\"");
    assert!(shown.starts_with("[[[["));
}

#[test]
fn lone_ampersand_and_pipe_are_parse_errors() {
    assert_eq!(assert_failure("a & b"), "test.ql:1:3: Unexpected token '&'");
    assert_eq!(assert_failure("a | b"), "test.ql:1:3: Unexpected token '|'");
}
