//! Built-in methods, builtins and dictionary methods with `this`.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{error_code, inspect, run};

#[test]
fn array_methods() {
    assert_eq!(inspect("[1, 2, 3].map(fn(x) { x * 10 })"), "[10, 20, 30]");
    assert_eq!(inspect("[1, 2, 3, 4].filter(fn(x) { x % 2 == 0 })"), "[2, 4]");
    assert_eq!(inspect("[1, 2, 3].reduce(fn(acc, x) { acc + x }, 0)"), "6");
    assert_eq!(inspect(r#"[1, "a", true].join("-")"#), r#""1-a-true""#);
    assert_eq!(inspect(r#"["10", "9", 2].sort()"#), r#"[2, "9", "10"]"#);
    assert_eq!(inspect("[1, 2].reverse()"), "[2, 1]");
    assert_eq!(inspect("[1, 2].contains(2)"), "true");
    assert_eq!(inspect("[1, 2, 3].length"), "3");
}

#[test]
fn sort_orders_numeric_strings_before_other_strings() {
    assert_eq!(
        inspect(r#"["9", "b", "10", "1a", 3].sort()"#),
        r#"[3, "9", "10", "1a", "b"]"#
    );
    assert_eq!(
        inspect(r#"["1a", "10", "9"].sort()"#),
        inspect(r#"["9", "10", "1a"].sort()"#)
    );
}

#[test]
fn sort_of_many_mixed_strings_does_not_depend_on_input_order() {
    let words: Vec<String> = (0..60)
        .flat_map(|n| [format!("\"{n}\""), format!("\"{n}a\""), format!("\"x{n}\"")])
        .collect();
    let forward = format!("[{}].sort()", words.join(", "));
    let backward = format!(
        "[{}].sort()",
        words.iter().rev().cloned().collect::<Vec<_>>().join(", ")
    );
    let sorted = inspect(&forward);
    assert!(sorted.starts_with(r#"["0", "1", "2""#), "{sorted}");
    assert_eq!(sorted, inspect(&backward));
}

#[test]
fn push_mutates_every_holder() {
    assert_eq!(inspect("let a = [1]\nlet b = a\nlet _ = b.push(2)\na"), "[1, 2]");
}

#[test]
fn self_referencing_values_render_and_compare() {
    let source = r#"
let xs = [1]
let _ = xs.push(xs)
let _ = xs.push(xs)
let d = {a: 1}
d.me = d
[toString(xs), len(toString(xs)), xs == xs, toString(d)]
"#;
    assert_eq!(
        inspect(source),
        r#"["[1, [...], [...]]", 17, true, "{a: 1, me: {...}}"]"#
    );
    let outcome = run("let xs = [1]\nlet _ = xs.push(xs)\nprint(xs)\nlog(xs)");
    assert_eq!(outcome.output, "[1, [...]]\n[1, [...]]\n");
}

#[test]
fn string_methods() {
    assert_eq!(inspect(r#""  Hi  ".trim().toUpper()"#), r#""HI""#);
    assert_eq!(inspect(r#""a,b,c".split(",")"#), r#"["a", "b", "c"]"#);
    assert_eq!(inspect(r#""hello".contains("ell")"#), "true");
    assert_eq!(inspect(r#""héllo".length"#), "5");
}

#[test]
fn dictionary_methods() {
    let source = r#"
let d = {a: 1, b: 2}
[d.keys(), d.values(), d.has("a"), d.length()]
"#;
    assert_eq!(inspect(source), r#"[["a", "b"], [1, 2], true, 2]"#);
}

#[test]
fn unknown_methods_suggest_a_name() {
    let outcome = run("[1].pusj(2)");
    let err = outcome.result.err();
    assert_eq!(err.as_ref().map(|e| e.code()), Some("UNDEF-0002"));
    let notes: Vec<String> = err
        .map(|e| e.notes.into_iter().map(|note| note.message).collect())
        .unwrap_or_default();
    assert!(notes.iter().any(|note| note.contains("push")), "{notes:?}");
}

#[test]
fn dictionary_functions_see_this() {
    let source = r"
let counter = {
    count: 0,
    bump: fn() { this.count = this.count + 1; this.count }
}
counter.bump()
counter.bump()
";
    assert_eq!(inspect(source), "[1, 2]");
}

#[test]
fn stored_functions_shadow_built_in_methods() {
    assert_eq!(inspect("let d = {keys: fn() { \"mine\" }}\nd.keys()"), r#""mine""#);
}

#[test]
fn builtins() {
    assert_eq!(inspect(r#"[len("abc"), len([1, 2]), len({a: 1})]"#), "[3, 2, 1]");
    assert_eq!(
        inspect(r#"[toInt(" 42 "), toFloat("1.5"), toNumber("7"), toNumber("7.5")]"#),
        "[42, 1.5, 7, 7.5]"
    );
    assert_eq!(
        inspect(r#"[type(1), type("s"), type(null), type(fn() { 1 })]"#),
        r#"["integer", "string", "null", "function"]"#
    );
    assert_eq!(
        inspect(r#"time("3:45 PM")"#),
        r#"{kind: "time", hour: 15, minute: 45, second: 0}"#
    );
    assert_eq!(error_code("time(5)"), Some("TYPE-0012".to_string()));
    assert_eq!(error_code("len(1, 2)"), Some("ARITY-0001".to_string()));
}

#[test]
fn print_and_log() {
    let outcome = run(r#"print("a", 1, [2])
log("value:", {x: 1}, "s")
log(3)"#);
    assert_eq!(outcome.output, "a1[2]\nvalue: {x: 1}, \"s\"\n3\n");
}

#[test]
fn builtins_are_protected() {
    assert_eq!(error_code("len = 1"), Some("SCOPE-0001".to_string()));
}

#[test]
fn missing_arguments_are_null_and_extras_ignored() {
    assert_eq!(
        inspect("let f = fn(a, b) { [a, b] }\n[f(1), f(1, 2, 3)]"),
        "[[1, null], [1, 2]]"
    );
}

#[test]
fn indexing() {
    assert_eq!(inspect("[1, 2, 3][-1]"), "3");
    assert_eq!(inspect(r#"{a: 1}["b"]"#), "null");
    assert_eq!(inspect(r#""abc"[1]"#), r#""b""#);
    assert_eq!(error_code("[1][5]"), Some("INDEX-0001".to_string()));
    assert_eq!(error_code("5[0]"), Some("TYPE-0008".to_string()));
}

#[test]
fn closures_capture_their_scope() {
    let source = r"
let make = fn() {
    let n = [0]
    fn() { n[0] = n[0] + 1; n[0] }
}
let next = make()
[next(), next(), make()()]
";
    assert_eq!(inspect(source), "[1, 2, 1]");
}

#[test]
fn undefined_names_suggest_close_matches() {
    let outcome = run("let total = 1\ntotl");
    let notes: Vec<String> = outcome
        .result
        .err()
        .map(|e| e.notes.into_iter().map(|note| note.message).collect())
        .unwrap_or_default();
    assert!(notes.iter().any(|note| note.contains("total")), "{notes:?}");
}

#[test]
fn dictionary_spread_and_computed_keys() {
    assert_eq!(
        inspect(r#"let base = {a: 1}
{...base, ["k" + "2"]: 2, a: 3}"#),
        "{a: 3, k2: 2}"
    );
}

#[test]
fn destructuring_let() {
    assert_eq!(
        inspect(
            "let {a, b as c, ...rest} = {a: 1, b: 2, d: 4}\nlet [x, ...xs] = [7, 8, 9]\n[a, c, rest, x, xs]"
        ),
        "[1, 2, {d: 4}, 7, [8, 9]]"
    );
}

#[test]
fn function_parameters_destructure() {
    let source = r#"
let point = fn({x, y as down}) { [x, down] }
let split = fn([head, ...tail]) { [head, tail] }
[point({x: 1, y: 2, z: 3}), split([7, 8, 9]), split(5), point(), split()]
"#;
    assert_eq!(
        inspect(source),
        "[[1, 2], [7, [8, 9]], [5, []], [null, null], [null, []]]"
    );
    assert_eq!(inspect("fn({a, ...rest}, [b]) { a }"), "fn({a, ...rest}, [b])");
    assert_eq!(error_code("let f = fn({a}) { a }\nf(1)"), Some("DEST-0001".to_string()));
}

proptest! {
    #[test]
    fn reduce_sums_like_the_host(xs in proptest::collection::vec(-1000i64..1000, 0..20)) {
        let literal = xs.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        let source = format!("[{literal}].reduce(fn(acc, x) {{ acc + x }}, 0)");
        prop_assert_eq!(inspect(&source), xs.iter().sum::<i64>().to_string());
    }
}
