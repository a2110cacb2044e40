use crate::compiler::{Compiler, CompilerOutput};
use crate::config::Mode;
use crate::error::{CalibrateError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Write an executable `sh` script and return its path.
#[cfg(unix)]
pub(crate) fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Compiler double with scripted outputs per source file.
///
/// Records every `(mode, source)` it is asked to run.
#[derive(Default)]
pub(crate) struct FakeCompiler {
    outputs: HashMap<String, CompilerOutput>,
    expansions: HashMap<String, String>,
    pub(crate) runs: RefCell<Vec<(Mode, String)>>,
}

impl FakeCompiler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_output(mut self, source: &str, stdout: &str, stderr: &str) -> Self {
        self.outputs.insert(
            source.to_string(),
            CompilerOutput {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub(crate) fn with_expansion(mut self, name: &str, value: &str) -> Self {
        self.expansions.insert(name.to_string(), value.to_string());
        self
    }
}

impl Compiler for FakeCompiler {
    fn run(&self, mode: Mode, source: &str) -> Result<CompilerOutput> {
        self.runs.borrow_mut().push((mode, source.to_string()));
        self.outputs
            .get(source)
            .cloned()
            .ok_or_else(|| CalibrateError::Compiler(format!("no scripted output for {}", source)))
    }

    fn expand(&self, name: &str) -> Result<String> {
        self.expansions
            .get(name)
            .cloned()
            .ok_or_else(|| CalibrateError::Compiler(format!("cannot expand {}", name)))
    }
}
