//! Standard library modules reachable through `import @std/NAME`.
//!
//! A module is a dictionary of builtin values keyed `"<module>.<name>"`
//! plus plain constants.

mod math;
mod table;

use pars_value::Dictionary;

use crate::builtins::BuiltinFn;

/// Export dictionary of a standard module, or `None` for unknown names.
pub fn module(name: &str) -> Option<Dictionary> {
    match name {
        "math" => Some(math::exports()),
        "table" => Some(table::exports()),
        _ => None,
    }
}

/// Implementation behind a namespaced builtin key.
pub fn resolve(key: &str) -> Option<BuiltinFn> {
    let (module, name) = key.split_once('.')?;
    match module {
        "math" => math::resolve(name),
        "table" => table::resolve(name),
        _ => None,
    }
}
