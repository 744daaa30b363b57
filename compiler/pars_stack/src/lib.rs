//! Stack growth for deeply nested Parsley programs.
//!
//! Both the parser and the tree-walking evaluator recurse once per nested
//! node, and Parsley closures recurse through ordinary calls. Wrapping those
//! recursion points in [`ensure_sufficient_stack`] lets a script nest deeply
//! without overflowing the native stack.
//!
//! - **Native targets**: `stacker::maybe_grow` allocates a new segment when
//!   the remaining stack drops below the red zone.
//! - **WASM targets**: plain call.

/// Remaining stack below which a new segment is allocated (100 KiB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each freshly allocated stack segment (1 MiB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn eval_expr(&mut self, id: ExprId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_expr_inner(id))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_sum_is_computed() {
        fn sum_to(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { n + sum_to(n - 1) })
        }

        assert_eq!(sum_to(100), 5050);
    }

    #[test]
    fn survives_deep_recursion() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(100_000), 100_000);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<i64, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
