//! Module loading: `@std/...` libraries and relative source files.
//!
//! A local module is parsed and evaluated once in its own module scope
//! under the prelude; the value of `import` is its export dictionary.
//! Results are cached by canonical path. A module that is imported while
//! it is still being evaluated is a circular import.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use pars_diagnostic::SourceFile;
use pars_ir::{ImportKind, ImportPath, SharedArena};
use pars_value::{CodeUnit, Dictionary, EvalResult, ScopeKind, Shared, Value};
use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::errors::{circular_import, import_failed, unknown_std_module};
use crate::exec::control;
use crate::stdlib;

/// Source of module text.
pub trait ModuleLoader {
    /// Read the module at `path`.
    fn load(&self, path: &Path) -> io::Result<String>;

    /// Cache key for `path`. Two paths naming the same module must map to
    /// the same key.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Loads modules from the filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl ModuleLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}

/// In-memory module files, keyed by normalized path. For embedding and
/// tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous one at the same path.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, text: impl Into<String>) {
        self.files.insert(normalize(path.as_ref()), text.into());
    }
}

impl ModuleLoader for MemoryLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| not_found(path))
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        let normalized = normalize(path);
        if self.files.contains_key(&normalized) {
            Ok(normalized)
        } else {
            Err(not_found(path))
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such module: {}", path.display()),
    )
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Loaded modules and the import stack.
pub(crate) struct ModuleRegistry {
    loader: Box<dyn ModuleLoader>,
    cache: FxHashMap<PathBuf, Value>,
    /// Modules currently being evaluated, outermost first.
    loading: Vec<PathBuf>,
    /// Directory relative imports resolve against.
    base_dir: PathBuf,
}

impl ModuleRegistry {
    pub(crate) fn new(loader: Box<dyn ModuleLoader>, base_dir: PathBuf) -> Self {
        Self {
            loader,
            cache: FxHashMap::default(),
            loading: Vec::new(),
            base_dir,
        }
    }
}

impl Interpreter {
    /// Value of `import PATH`: a standard library dictionary or the export
    /// dictionary of a local module.
    pub(super) fn import_module(&mut self, path: ImportPath) -> EvalResult {
        let text = self.interner.lookup(path.path);
        match path.kind {
            ImportKind::Std => stdlib::module(text)
                .map(Value::dict)
                .ok_or_else(|| unknown_std_module(text).into()),
            ImportKind::Local => self.import_local(text),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn import_local(&mut self, text: &str) -> EvalResult {
        let requested = self.modules.base_dir.join(text);
        let canonical = self
            .modules
            .loader
            .canonicalize(&requested)
            .map_err(|err| import_failed(text, &err.to_string()))?;

        if let Some(exports) = self.modules.cache.get(&canonical) {
            tracing::trace!("module cache hit");
            return Ok(exports.clone());
        }
        if self.modules.loading.contains(&canonical) {
            return Err(circular_import(text).into());
        }

        let source = self
            .modules
            .loader
            .load(&canonical)
            .map_err(|err| import_failed(text, &err.to_string()))?;
        let parsed = pars_parse::parse(&source, &self.interner);
        if let Some(first) = parsed.errors.first() {
            return Err(import_failed(text, &first.to_string()).into());
        }

        let name = canonical.display().to_string();
        let unit = CodeUnit::new(
            SharedArena::new(parsed.arena),
            Some(Arc::new(SourceFile::new(name, source))),
        );
        let module_dir = canonical
            .parent()
            .map_or_else(|| self.modules.base_dir.clone(), Path::to_path_buf);

        self.modules.loading.push(canonical.clone());
        let saved_dir = std::mem::replace(&mut self.modules.base_dir, module_dir);
        let saved_exports = std::mem::replace(&mut self.exports, Shared::new(Dictionary::new()));

        let env = self.prelude.child(ScopeKind::Module);
        let result = {
            let mut scoped = self.entered(env, Some(unit));
            control::finish_body(scoped.eval_statements(parsed.program))
        };

        let exports = std::mem::replace(&mut self.exports, saved_exports);
        self.modules.base_dir = saved_dir;
        self.modules.loading.pop();

        result?;
        let exports = Value::Dict(exports);
        tracing::debug!(module = %canonical.display(), "module loaded");
        self.modules.cache.insert(canonical, exports.clone());
        Ok(exports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_resolves_dots() {
        assert_eq!(
            normalize(Path::new("site/./lib/../util.pars")),
            PathBuf::from("site/util.pars")
        );
        assert_eq!(normalize(Path::new("../x.pars")), PathBuf::from("../x.pars"));
    }

    #[test]
    fn memory_loader_canonicalizes_known_files() {
        let loader = MemoryLoader::new().with_file("app/lib/util.pars", "export let x = 1");
        assert_eq!(
            loader.canonicalize(Path::new("app/./lib/util.pars")).ok(),
            Some(PathBuf::from("app/lib/util.pars"))
        );
        assert!(loader.canonicalize(Path::new("app/missing.pars")).is_err());
        assert_eq!(
            loader.load(Path::new("app/lib/../lib/util.pars")).ok(),
            Some("export let x = 1".to_string())
        );
    }
}
