//! Error model for evaluation.
//!
//! Every runtime failure is an [`EvalError`] with a typed [`EvalErrorKind`].
//! The kind fixes the stable error code and the [`ErrorClass`]; the class
//! decides whether `try` may catch it. Factory functions (e.g.
//! [`undefined_variable`]) are the public constructors and fill in both the
//! kind and the message.
//!
//! Early exits (`return`, `stop`, `skip`, `check ... else`) are not errors.
//! They travel next to errors in [`ControlAction`], the error side of
//! [`EvalResult`].

use std::fmt;

use pars_ir::Span;

use crate::value::{Dictionary, Value};

/// Result of evaluating a node.
pub type EvalResult = Result<Value, ControlAction>;

/// Non-value outcomes of evaluation.
///
/// Signals are consumed by the construct that owns them: loops take `Stop`
/// and `Skip`, function and program boundaries take `Return` and
/// `CheckExit`. Errors travel until `try` or the top level.
#[derive(Clone, Debug)]
pub enum ControlAction {
    Return(Value),
    Stop,
    Skip,
    /// Raised by a failing `check`; carries the `else` value.
    CheckExit(Value),
    Error(Box<EvalError>),
}

impl ControlAction {
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(error: EvalError) -> Self {
        ControlAction::Error(Box::new(error))
    }
}

/// Catchability class of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Program bugs: unknown names, wrong types, bad targets.
    Type,
    /// Wrong number of arguments.
    Arity,
    /// Bad values at runtime, including `fail`.
    Value,
    /// Malformed input to a conversion.
    Format,
}

impl ErrorClass {
    /// Only Value and Format errors can be caught by `try`.
    pub const fn is_catchable(self) -> bool {
        matches!(self, ErrorClass::Value | ErrorClass::Format)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorClass::Type => "type",
            ErrorClass::Arity => "arity",
            ErrorClass::Value => "value",
            ErrorClass::Format => "format",
        }
    }
}

/// Typed error category.
///
/// Each variant has a fixed code and class; `Display` produces the message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Names and access
    UndefinedVariable {
        name: String,
    },
    UnknownMethod {
        method: String,
        type_name: String,
    },
    UnknownProperty {
        property: String,
        type_name: String,
    },
    UnknownStdModule {
        module: String,
    },
    MissingExport {
        name: String,
    },

    // Types
    ArgumentType {
        function: String,
        expected: String,
        got: String,
    },
    CannotIndex {
        receiver: String,
        index: String,
    },
    NotCallable {
        type_name: String,
    },
    RecursionLimit {
        limit: usize,
    },
    NotIterable {
        type_name: String,
    },
    InvalidOperator {
        left: String,
        op: String,
        right: String,
    },
    InvalidPrefixOperator {
        op: String,
        operand: String,
    },
    DestructureMismatch {
        pattern: String,
        got: String,
    },
    IndexOutOfRange {
        index: i64,
        length: usize,
    },

    // Scope
    ProtectedReassignment {
        name: String,
    },
    AlreadyDefined {
        name: String,
    },
    UndeclaredAssignment {
        name: String,
    },
    InvalidAssignmentTarget,

    // Modules
    CircularImport {
        path: String,
    },
    ImportFailed {
        path: String,
        reason: String,
    },

    // Arity
    WrongArgCount {
        function: String,
        expected: usize,
        got: usize,
    },
    ArgCountRange {
        function: String,
        min: usize,
        max: usize,
        got: usize,
    },

    // Runtime values
    UserFailure {
        message: String,
        code: String,
    },
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: String,
    },
    EmptyCollection {
        function: String,
    },
    InvalidArgumentValue {
        function: String,
        reason: String,
    },
    StopOutsideLoop,
    SkipOutsideLoop,

    // Formats
    InvalidConversion {
        format: String,
        input: String,
    },
    InvalidTime {
        input: String,
    },
}

impl EvalErrorKind {
    /// Stable error code, e.g. `UNDEF-0001`.
    pub fn code(&self) -> &str {
        match self {
            Self::UndefinedVariable { .. } => "UNDEF-0001",
            Self::UnknownMethod { .. } => "UNDEF-0002",
            Self::UnknownProperty { .. } => "UNDEF-0004",
            Self::UnknownStdModule { .. } => "UNDEF-0005",
            Self::MissingExport { .. } => "UNDEF-0006",
            Self::ArgumentType { .. } => "TYPE-0012",
            Self::CannotIndex { .. } => "TYPE-0008",
            Self::NotCallable { .. } => "CALL-0002",
            Self::RecursionLimit { .. } => "CALL-0006",
            Self::NotIterable { .. } => "LOOP-0001",
            Self::InvalidOperator { .. } => "OP-0001",
            Self::InvalidPrefixOperator { .. } => "OP-0005",
            Self::DestructureMismatch { .. } => "DEST-0001",
            Self::IndexOutOfRange { .. } => "INDEX-0001",
            Self::ProtectedReassignment { .. } => "SCOPE-0001",
            Self::AlreadyDefined { .. } => "SCOPE-0002",
            Self::UndeclaredAssignment { .. } => "SCOPE-0003",
            Self::InvalidAssignmentTarget => "SCOPE-0004",
            Self::CircularImport { .. } => "IMPORT-0002",
            Self::ImportFailed { .. } => "IMPORT-0004",
            Self::WrongArgCount { .. } => "ARITY-0001",
            Self::ArgCountRange { .. } => "ARITY-0004",
            Self::UserFailure { code, .. } => code,
            Self::DivisionByZero => "OP-0002",
            Self::ModuloByZero => "OP-0006",
            Self::IntegerOverflow { .. } => "VALUE-0004",
            Self::EmptyCollection { .. } => "VALUE-0001",
            Self::InvalidArgumentValue { .. } => "VALUE-0003",
            Self::StopOutsideLoop => "LOOP-0008",
            Self::SkipOutsideLoop => "LOOP-0009",
            Self::InvalidConversion { .. } => "FMT-0001",
            Self::InvalidTime { .. } => "FMT-0004",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::WrongArgCount { .. } | Self::ArgCountRange { .. } => ErrorClass::Arity,
            Self::UserFailure { .. }
            | Self::DivisionByZero
            | Self::ModuloByZero
            | Self::IntegerOverflow { .. }
            | Self::EmptyCollection { .. }
            | Self::InvalidArgumentValue { .. }
            | Self::StopOutsideLoop
            | Self::SkipOutsideLoop => ErrorClass::Value,
            Self::InvalidConversion { .. } | Self::InvalidTime { .. } => ErrorClass::Format,
            _ => ErrorClass::Type,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "Identifier not found: {name}"),
            Self::UnknownMethod { method, type_name } => {
                write!(f, "Unknown method '{method}' for {type_name}")
            }
            Self::UnknownProperty {
                property,
                type_name,
            } => write!(f, "Unknown property '{property}' on {type_name}"),
            Self::UnknownStdModule { module } => {
                write!(f, "Unknown standard library module: @std/{module}")
            }
            Self::MissingExport { name } => write!(f, "Module does not export '{name}'"),
            Self::ArgumentType {
                function,
                expected,
                got,
            } => write!(f, "Argument to `{function}` must be {expected}, got {got}"),
            Self::CannotIndex { receiver, index } => {
                write!(f, "Cannot index {receiver} with {index}")
            }
            Self::NotCallable { type_name } => write!(f, "Cannot call {type_name} as a function"),
            Self::RecursionLimit { limit } => {
                write!(f, "Maximum call depth exceeded (limit: {limit})")
            }
            Self::NotIterable { type_name } => write!(
                f,
                "For expects an array, string, or dictionary, got {type_name}"
            ),
            Self::InvalidOperator { left, op, right } => {
                write!(f, "Unknown operator: {left} {op} {right}")
            }
            Self::InvalidPrefixOperator { op, operand } => {
                write!(f, "Unknown prefix operator: {op}{operand}")
            }
            Self::DestructureMismatch { pattern, got } => {
                let lower = pattern.to_lowercase();
                write!(f, "{pattern} destructuring requires a {lower} value, got {got}")
            }
            Self::IndexOutOfRange { index, length } => {
                write!(f, "Index {index} out of range (length {length})")
            }
            Self::ProtectedReassignment { name } => {
                write!(f, "Cannot reassign protected binding '{name}'")
            }
            Self::AlreadyDefined { name } => {
                write!(f, "'{name}' is already defined in this scope")
            }
            Self::UndeclaredAssignment { name } => {
                write!(f, "Cannot assign to undeclared variable '{name}'")
            }
            Self::InvalidAssignmentTarget => write!(f, "Invalid assignment target"),
            Self::CircularImport { path } => {
                write!(f, "Circular dependency detected when importing: {path}")
            }
            Self::ImportFailed { path, reason } => write!(f, "Failed to import {path}: {reason}"),
            Self::WrongArgCount {
                function,
                expected,
                got,
            } => write!(
                f,
                "Wrong number of arguments to `{function}`. got={got}, want={expected}"
            ),
            Self::ArgCountRange {
                function,
                min,
                max,
                got,
            } => write!(f, "`{function}` expects {min}-{max} arguments, got {got}"),
            Self::UserFailure { message, .. } => f.write_str(message),
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::ModuloByZero => write!(f, "Modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "Integer overflow in {operation}"),
            Self::EmptyCollection { function } => {
                write!(f, "`{function}` requires a non-empty array")
            }
            Self::InvalidArgumentValue { function, reason } => write!(f, "`{function}`: {reason}"),
            Self::StopOutsideLoop => write!(f, "'stop' can only be used inside a for loop"),
            Self::SkipOutsideLoop => write!(f, "'skip' can only be used inside a for loop"),
            Self::InvalidConversion { format, input } => write!(f, "Invalid {format}: {input}"),
            Self::InvalidTime { input } => write!(f, "Invalid datetime: {input}"),
        }
    }
}

/// Secondary information attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// One call in the chain leading to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Callee name, or `<anonymous>`.
    pub name: String,
    /// Call site.
    pub span: Option<Span>,
}

/// Snapshot of the call stack at an error site, innermost call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span:?}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured category; fixes code and class.
    pub kind: EvalErrorKind,
    /// Human-readable message. Equals `kind.to_string()`.
    pub message: String,
    /// Byte span of the failing node, attached by the evaluator.
    pub span: Option<Span>,
    /// 1-based `(line, column)` when the source text is known.
    pub position: Option<(u32, u32)>,
    /// Fields of a structured `fail({...})`, in insertion order.
    pub payload: Option<Dictionary>,
    /// Call chain at the error site.
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            position: None,
            payload: None,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    #[inline]
    pub fn code(&self) -> &str {
        self.kind.code()
    }

    #[inline]
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    #[inline]
    pub fn is_catchable(&self) -> bool {
        self.class().is_catchable()
    }

    /// Attach a span unless one is already set (innermost node wins).
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.position = Some((line, column));
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }

    /// The dictionary an Error value presents: the `fail` payload, or
    /// `{message, code}` for internal errors.
    pub fn view(&self) -> Dictionary {
        if let Some(payload) = &self.payload {
            return payload.clone();
        }
        let mut view = Dictionary::new();
        view.insert_value("message", Value::string(self.message.as_str()));
        view.insert_value("code", Value::string(self.code()));
        view
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some((line, column)) => write!(f, "line {line}, column {column}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Names and access

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_method(method: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownMethod {
        method: method.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn unknown_property(property: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownProperty {
        property: property.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn unknown_std_module(module: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownStdModule {
        module: module.to_string(),
    })
}

#[cold]
pub fn missing_export(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingExport {
        name: name.to_string(),
    })
}

// Types

/// Argument of the wrong type; `got` is the offending value's type name.
#[cold]
pub fn wrong_arg_type(function: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentType {
        function: function.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn cannot_index(receiver: &str, index: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CannotIndex {
        receiver: receiver.to_string(),
        index: index.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

#[cold]
pub fn not_iterable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotIterable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn invalid_binary_op(left: &str, op: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperator {
        left: left.to_string(),
        op: op.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_prefix_op(op: &str, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidPrefixOperator {
        op: op.to_string(),
        operand: operand.to_string(),
    })
}

/// `pattern` is `Dictionary` or `Array`.
#[cold]
pub fn destructure_mismatch(pattern: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DestructureMismatch {
        pattern: pattern.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn index_out_of_range(index: i64, length: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfRange { index, length })
}

// Scope

#[cold]
pub fn protected_reassignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ProtectedReassignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn already_defined(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AlreadyDefined {
        name: name.to_string(),
    })
}

#[cold]
pub fn undeclared_assignment(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndeclaredAssignment {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_assignment_target() -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget)
}

// Modules

#[cold]
pub fn circular_import(path: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CircularImport {
        path: path.to_string(),
    })
}

#[cold]
pub fn import_failed(path: &str, reason: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ImportFailed {
        path: path.to_string(),
        reason: reason.to_string(),
    })
}

// Arity

#[cold]
pub fn wrong_arg_count(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgCount {
        function: function.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn arg_count_range(function: &str, min: usize, max: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgCountRange {
        function: function.to_string(),
        min,
        max,
        got,
    })
}

// Runtime values

/// Error raised by `fail`. The payload is the dictionary `try` exposes.
#[cold]
pub fn user_failure(message: &str, code: &str, payload: Dictionary) -> EvalError {
    let mut error = EvalError::from_kind(EvalErrorKind::UserFailure {
        message: message.to_string(),
        code: code.to_string(),
    });
    error.payload = Some(payload);
    error
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn empty_collection(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyCollection {
        function: function.to_string(),
    })
}

/// An argument of the right type but an unusable value.
#[cold]
pub fn invalid_argument_value(function: &str, reason: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgumentValue {
        function: function.to_string(),
        reason: reason.to_string(),
    })
}

#[cold]
pub fn stop_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::StopOutsideLoop)
}

#[cold]
pub fn skip_outside_loop() -> EvalError {
    EvalError::from_kind(EvalErrorKind::SkipOutsideLoop)
}

// Formats

#[cold]
pub fn invalid_conversion(format: &str, input: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidConversion {
        format: format.to_string(),
        input: input.to_string(),
    })
}

#[cold]
pub fn invalid_time(input: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidTime {
        input: input.to_string(),
    })
}
