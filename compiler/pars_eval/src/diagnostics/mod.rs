//! Diagnostic infrastructure for the evaluator.
//!
//! - `CallStack`: live call frames, depth limit and backtrace capture
//! - `closest_match`: "did you mean" suggestions for unknown names

use pars_ir::{Name, Span, StringInterner};
use pars_value::errors::recursion_limit_exceeded;
use pars_value::{BacktraceFrame, EvalBacktrace, EvalError};

/// One active call.
#[derive(Clone, Debug)]
pub struct CallFrame {
    /// Callee name when called through an identifier.
    pub name: Option<Name>,
    /// Call site, not definition site.
    pub call_span: Option<Span>,
}

/// Live call stack. Each user function call pushes a frame; the depth check
/// is part of `push`.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `None` means unlimited (stack growth still applies).
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. Fails without pushing when the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Snapshot of the stack, most recent call first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame
                    .name
                    .map_or_else(|| "<anonymous>".to_string(), |n| interner.lookup(n).to_string()),
                span: frame.call_span,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the error already carries one.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Closest candidate to `input`, compared case-insensitively.
///
/// Allowed edits grow with the input: one for up to three characters, two
/// up to six, three beyond.
pub fn closest_match<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    if input.is_empty() {
        return None;
    }
    let input_lower = input.to_lowercase();
    let threshold = match input.chars().count() {
        0..=3 => 1,
        4..=6 => 2,
        _ => 3,
    };
    candidates
        .into_iter()
        .filter(|candidate| *candidate != input)
        .map(|candidate| (edit_distance(&input_lower, &candidate.to_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by(|(a, ca), (b, cb)| a.cmp(b).then_with(|| ca.cmp(cb)))
        .map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests;
