//! Single import point for the evaluator's error constructors.
//!
//! ```ignore
//! use pars_eval::errors::{undefined_variable, division_by_zero};
//! ```

pub use pars_value::{ControlAction, ErrorClass, EvalError, EvalErrorKind, EvalNote, EvalResult};

// Names and access

pub use pars_value::errors::{
    missing_export, undefined_variable, unknown_method, unknown_property, unknown_std_module,
};

// Types

pub use pars_value::errors::{
    cannot_index, destructure_mismatch, index_out_of_range, invalid_binary_op, invalid_prefix_op,
    not_callable, not_iterable, recursion_limit_exceeded, wrong_arg_type,
};

// Scope

pub use pars_value::errors::{
    already_defined, invalid_assignment_target, protected_reassignment, undeclared_assignment,
};

// Modules

pub use pars_value::errors::{circular_import, import_failed};

// Arity

pub use pars_value::errors::{arg_count_range, wrong_arg_count};

// Runtime values

pub use pars_value::errors::{
    division_by_zero, empty_collection, integer_overflow, invalid_argument_value, modulo_by_zero,
    skip_outside_loop, stop_outside_loop, user_failure,
};

// Formats

pub use pars_value::errors::{invalid_conversion, invalid_time};
