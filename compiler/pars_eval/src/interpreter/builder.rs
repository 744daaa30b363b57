//! `InterpreterBuilder`: configuration for a new [`Interpreter`].

use std::path::{Path, PathBuf};

use pars_ir::{ExprArena, SharedArena, SharedInterner};
use pars_value::{CodeUnit, Dictionary, Environment, ScopeKind, Shared};

use super::module::{FsLoader, ModuleLoader, ModuleRegistry};
use super::{InternedNames, Interpreter};
use crate::builtins;
use crate::diagnostics::CallStack;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Call depth allowed unless the embedder chooses otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for [`Interpreter`].
///
/// ```text
/// let mut interp = InterpreterBuilder::new(interner)
///     .source_path("site/index.pars")
///     .print_handler(buffer_handler())
///     .max_call_depth(500)
///     .build();
/// ```
pub struct InterpreterBuilder {
    interner: SharedInterner,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    source_path: Option<PathBuf>,
    module_root: Option<PathBuf>,
    loader: Option<Box<dyn ModuleLoader>>,
}

impl InterpreterBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        Self {
            interner,
            print_handler: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            source_path: None,
            module_root: None,
            loader: None,
        }
    }

    /// Destination of `print` and `log`. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Maximum number of nested user function calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// No call depth limit. The stack still grows on demand.
    #[must_use]
    pub fn unlimited_call_depth(mut self) -> Self {
        self.max_call_depth = None;
        self
    }

    /// Path of the main source file. Relative imports in the main program
    /// resolve against its directory.
    #[must_use]
    pub fn source_path(mut self, path: impl AsRef<Path>) -> Self {
        self.source_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Directory relative imports resolve against when no source path is
    /// known (for snippets). Defaults to the working directory.
    #[must_use]
    pub fn module_root(mut self, root: impl AsRef<Path>) -> Self {
        self.module_root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Where module source text comes from. Defaults to the filesystem.
    #[must_use]
    pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    pub fn build(self) -> Interpreter {
        let prelude = Environment::new(ScopeKind::Module);
        builtins::install_prelude(&prelude, &self.interner);

        let base_dir = self
            .source_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or(self.module_root)
            .unwrap_or_else(|| PathBuf::from("."));
        let loader = self.loader.unwrap_or_else(|| Box::new(FsLoader));

        let names = InternedNames::new(&self.interner);
        Interpreter {
            env: prelude.child(ScopeKind::Module),
            unit: CodeUnit::new(SharedArena::new(ExprArena::new()), None),
            prelude,
            names,
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            modules: ModuleRegistry::new(loader, base_dir),
            exports: Shared::new(Dictionary::new()),
            interner: self.interner,
        }
    }
}
