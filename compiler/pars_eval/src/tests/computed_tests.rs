//! `computed` bindings and lazy dictionaries.

use pretty_assertions::assert_eq;

use super::{error_code, inspect, run};

const COUNTER: &str = r"
let counter = [0]
computed next {
    counter[0] = counter[0] + 1
    counter[0]
}
";

#[test]
fn each_reference_reevaluates() {
    let source = format!("{COUNTER}\n[next, next, next]");
    assert_eq!(inspect(&source), "[1, 2, 3]");
}

#[test]
fn let_captures_one_evaluation() {
    let source = format!("{COUNTER}\nlet cached = next\n[cached, cached, cached, counter[0]]");
    assert_eq!(inspect(&source), "[1, 1, 1, 1]");
}

#[test]
fn expression_form_sees_later_assignments() {
    let source = "let base = 2\ncomputed doubled = base * 2\nlet before = doubled\nbase = 10\n[before, doubled]";
    assert_eq!(inspect(source), "[4, 20]");
}

#[test]
fn module_level_mutation_inside_a_computed_block_is_visible() {
    let source = r"
let seen = []
computed tick {
    seen.push(len(seen))
    len(seen)
}
let _ = [tick, tick]
seen
";
    assert_eq!(inspect(source), "[0, 1]");
}

#[test]
fn arguments_force_once() {
    let source = format!("{COUNTER}\nlet twice = fn(x) {{ [x, x] }}\ntwice(next)");
    assert_eq!(inspect(&source), "[1, 1]");
}

#[test]
fn literals_force_their_fields() {
    let source = format!("{COUNTER}\nlet d = {{a: next, b: next}}\n[d.a, d.a, d.b]");
    assert_eq!(inspect(&source), "[1, 1, 2]");
}

#[test]
fn return_and_check_produce_the_value() {
    assert_eq!(inspect("computed c { return 5; 6 }\nc"), "5");
    assert_eq!(
        inspect("computed c { check false else \"no\"; 6 }\nc"),
        r#""no""#
    );
}

#[test]
fn stop_inside_a_computed_body_is_an_error() {
    assert_eq!(
        error_code("computed c { stop }\nfor (x in [1]) { c }"),
        Some("LOOP-0008".to_string())
    );
}

#[test]
fn errors_report_the_position_inside_the_body() {
    let outcome = run("let zero = 0\ncomputed bad {\n    1 / zero\n}\nbad");
    let position = outcome.result.err().and_then(|err| err.position);
    assert_eq!(position.map(|(line, _)| line), Some(3));
}

#[test]
fn self_reference_hits_the_call_limit() {
    assert_eq!(error_code("computed loop = loop + 1\nloop"), Some("CALL-0006".to_string()));
}

#[test]
fn assignment_replaces_a_computed_binding() {
    let source = format!("{COUNTER}\nnext = 100\n[next, next, counter[0]]");
    assert_eq!(inspect(&source), "[100, 100, 0]");
}

#[test]
fn unreferenced_computed_never_runs() {
    let source = format!("{COUNTER}\nexport computed lazy = next\ncounter[0]");
    assert_eq!(inspect(&source), "0");
}

#[test]
fn print_resolves_before_rendering() {
    let outcome = run(&format!("{COUNTER}\nprint(next)\nprint(next)"));
    assert_eq!(outcome.output, "1\n2\n");
}
