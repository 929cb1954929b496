use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Handle to the process-wide state the shell shares with its children.
///
/// The working directory and the environment variables live in the OS
/// process, not in this struct. Writes go through `&mut self` so the
/// places that change what later children inherit are visible in the
/// signatures; order matters, since every launch after a write sees it.
#[derive(Debug, Default)]
pub struct Environment {
    _process: (),
}

impl Environment {
    pub fn new() -> Self {
        Environment { _process: () }
    }

    pub fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    pub fn change_dir<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        std::env::set_current_dir(path)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    /// Exports configured variables to the process environment.
    ///
    /// Must run before anything else is spawned; the shell is still
    /// single-threaded at that point.
    pub fn apply_vars(&mut self, vars: &HashMap<String, String>) {
        for (key, value) in vars {
            if key.is_empty() || key.contains('=') || key.contains('\0') || value.contains('\0') {
                crate::error::report(&format!("ignoring invalid environment entry `{}`", key));
                continue;
            }
            // SAFETY: called once at startup, before any other thread exists.
            unsafe { std::env::set_var(key, value) };
        }
    }
}
