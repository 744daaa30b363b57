use super::*;
use pars_value::EvalErrorKind;
use pretty_assertions::assert_eq;

fn frame(name: Option<Name>) -> CallFrame {
    CallFrame {
        name,
        call_span: None,
    }
}

#[test]
fn push_and_pop() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(Some(10));
    assert!(stack.push(frame(Some(interner.intern("foo")))).is_ok());
    assert_eq!(stack.depth(), 1);
    stack.pop();
    assert!(stack.is_empty());
}

#[test]
fn depth_limit_enforced() {
    let mut stack = CallStack::new(Some(2));
    assert!(stack.push(frame(None)).is_ok());
    assert!(stack.push(frame(None)).is_ok());
    let err = stack.push(frame(None)).err();
    assert_eq!(
        err.map(|e| e.kind),
        Some(EvalErrorKind::RecursionLimit { limit: 2 })
    );
    assert_eq!(stack.depth(), 2);
}

#[test]
fn unlimited_depth() {
    let mut stack = CallStack::new(None);
    for _ in 0..5000 {
        assert!(stack.push(frame(None)).is_ok());
    }
    assert_eq!(stack.depth(), 5000);
    assert_eq!(stack.max_depth(), None);
}

#[test]
fn capture_is_most_recent_first() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(None);
    assert!(stack.push(frame(Some(interner.intern("outer")))).is_ok());
    assert!(stack.push(frame(None)).is_ok());
    let names: Vec<String> = stack
        .capture(&interner)
        .frames()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["<anonymous>".to_string(), "outer".to_string()]);
}

#[test]
fn attach_keeps_existing_backtrace() {
    let interner = StringInterner::new();
    let mut stack = CallStack::new(None);
    let err = pars_value::errors::division_by_zero();
    assert!(stack.attach_backtrace(err.clone(), &interner).backtrace.is_none());

    assert!(stack.push(frame(Some(interner.intern("f")))).is_ok());
    let first = stack.attach_backtrace(err, &interner);
    assert_eq!(first.backtrace.as_ref().map(EvalBacktrace::len), Some(1));
    assert!(stack.push(frame(None)).is_ok());
    let again = stack.attach_backtrace(first, &interner);
    assert_eq!(again.backtrace.as_ref().map(EvalBacktrace::len), Some(1));
}

#[test]
fn suggestions_respect_threshold() {
    let names = ["counter", "count", "print", "len"];
    assert_eq!(closest_match("coutner", names), Some("counter"));
    assert_eq!(closest_match("prnt", names), Some("print"));
    assert_eq!(closest_match("LEN", names), Some("len"));
    assert_eq!(closest_match("zzzzzz", names), None);
    assert_eq!(closest_match("", names), None);
}

#[test]
fn edit_distance_basics() {
    assert_eq!(edit_distance("kitten", "sitting"), 3);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("same", "same"), 0);
}
