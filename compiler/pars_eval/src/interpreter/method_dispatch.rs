//! Method calls: `receiver.method(args)`.

use pars_ir::{ExprId, ExprRange, Name, Span};
use pars_value::{EvalResult, Value};

use super::Interpreter;
use crate::methods;

impl Interpreter {
    /// A dictionary entry holding a function takes precedence and is
    /// called with `this` bound to the dictionary. Everything else goes to
    /// the built-in methods of the receiver's type.
    pub(super) fn eval_method_call(
        &mut self,
        receiver: ExprId,
        method: Name,
        args: ExprRange,
        span: Span,
    ) -> EvalResult {
        let receiver = self.eval(receiver)?;
        let args = self.eval_args(args)?;
        let name = self.interner.lookup(method);

        if let Value::Dict(dict) = &receiver {
            let entry = dict.borrow().get(name).cloned();
            if let Some(entry) = entry {
                let callee = entry.force(self)?;
                if matches!(callee, Value::Function(_) | Value::Builtin(_)) {
                    return self.call_value(&callee, &args, span, Some(method), Some(receiver.clone()));
                }
            }
        }
        methods::dispatch(self, &receiver, name, &args, span)
    }
}
