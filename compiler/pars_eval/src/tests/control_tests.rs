//! Blocks, loops and the `return` / `stop` / `skip` / `check` signals.

use pretty_assertions::assert_eq;

use super::{error_code, inspect, run};

#[test]
fn block_result_stream() {
    assert_eq!(inspect("let x = 1"), "null");
    assert_eq!(inspect("let x = 1\nx + 1"), "2");
    assert_eq!(inspect("1\nnull\n\"two\""), r#"[1, "two"]"#);
}

#[test]
fn stop_ends_the_loop_and_drops_the_iteration() {
    assert_eq!(
        inspect("for (x in [1, 2, 3, 4, 5]) { if (x == 3) { stop }; x }"),
        "[1, 2]"
    );
}

#[test]
fn skip_drops_only_the_iteration() {
    assert_eq!(
        inspect("for (x in [1, 2, 3, 4, 5]) { if (x == 3) { skip }; x }"),
        "[1, 2, 4, 5]"
    );
}

#[test]
fn null_iterations_are_not_collected() {
    assert_eq!(inspect("for (x in [1, 2, 3, 4]) { if (x % 2 == 0) { x } }"), "[2, 4]");
}

#[test]
fn stop_and_skip_outside_a_loop_are_errors() {
    let stop = inspect("stop");
    assert!(stop.starts_with("LOOP-0008") && stop.contains("stop"), "{stop}");
    let skip = inspect("let f = fn() { skip }\nf()");
    assert!(skip.starts_with("LOOP-0009") && skip.contains("skip"), "{skip}");
}

#[test]
fn stop_outside_a_loop_is_catchable() {
    assert_eq!(
        inspect("let r = try fn() { stop }()\nr.error.code"),
        r#""LOOP-0008""#
    );
}

#[test]
fn check_exits_at_top_level() {
    assert_eq!(inspect(r#"check false else "failed"; "success""#), r#""failed""#);
    assert_eq!(inspect(r#"check true else "failed"; "success""#), r#""success""#);
}

#[test]
fn check_exits_through_let_and_nested_blocks() {
    let source = r#"
let f = fn() {
    let y = if (true) { check false else "failed"; 1 }
    "after"
}
f()
"#;
    assert_eq!(inspect(source), r#""failed""#);

    let in_loop = r#"
let f = fn(xs) {
    for (x in xs) { check x < 3 else "too big"; x }
}
[f([1, 2]), f([1, 5])]
"#;
    assert_eq!(inspect(in_loop), r#"[[1, 2], "too big"]"#);
}

#[test]
fn check_exit_through_return() {
    let source = r#"
let g = fn() { check false else "failed"; "unreached" }
let f = fn() { return g() }
f()
"#;
    assert_eq!(inspect(source), r#""failed""#);
}

#[test]
fn check_exit_through_a_returned_block() {
    let source = r#"
let f = fn() {
    return if (true) { check false else "failed"; "success" }
}
let g = fn() {
    let result = if (true) { if (true) { check false else "failed"; "success" } }
    result
}
[f(), g()]
"#;
    assert_eq!(inspect(source), r#"["failed", "failed"]"#);
    assert_eq!(
        inspect(r#"return if (true) { check false else "failed"; "success" }"#),
        r#""failed""#
    );
}

#[test]
fn return_leaves_the_function_from_inside_a_loop() {
    let source = r#"
let find = fn(xs, wanted) {
    for (x in xs) { if (x == wanted) { return "found" } }
    return "missing"
}
[find([1, 2, 3], 2), find([1], 9)]
"#;
    assert_eq!(inspect(source), r#"["found", "missing"]"#);
}

#[test]
fn return_at_top_level_is_the_program_result() {
    assert_eq!(inspect("return 7\n8"), "7");
}

#[test]
fn for_with_key_and_value() {
    assert_eq!(
        inspect(r#"for (k, v in {a: 1, b: 2}) { k + "=" + toString(v) }"#),
        r#"["a=1", "b=2"]"#
    );
    assert_eq!(inspect(r#"for (i, c in "ab") { [i, c] }"#), r#"[[0, "a"], [1, "b"]]"#);
}

#[test]
fn loop_body_may_mutate_the_iterated_array() {
    let source = "let xs = [1, 2]\nlet _ = for (x in xs) { xs.push(x) }\nxs";
    assert_eq!(inspect(source), "[1, 2, 1, 2]");
}

#[test]
fn iterating_a_number_is_an_error() {
    assert_eq!(error_code("for (x in 5) { x }"), Some("LOOP-0001".to_string()));
}

#[test]
fn and_or_short_circuit() {
    let outcome = run(r#"let r = false and print("no")
let s = true or print("no")
[r, s]"#);
    assert_eq!(
        outcome.result.ok().map(|v| v.inspect()),
        Some("[false, true]".to_string())
    );
    assert_eq!(outcome.output, "");
}

#[test]
fn deep_recursion_hits_the_call_limit() {
    assert_eq!(
        error_code("let f = fn(n) { f(n + 1) }\nf(0)"),
        Some("CALL-0006".to_string())
    );
}

#[test]
fn recursion_within_the_limit_works() {
    let source = r#"
let fact = fn(n) { if (n <= 1) { 1 } else { n * fact(n - 1) } }
fact(20)
"#;
    assert_eq!(inspect(source), "2432902008176640000");
}
