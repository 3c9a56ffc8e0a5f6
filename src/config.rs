//! Purpose: Loader configuration from defaults, environment and CLI flags.
//! Exports: `LoaderConfig`, `LIB_DIR_ENV`, `LIB_NAME_ENV`.
//! Role: Single place that decides the library file name and search directories.
//! Invariants: Explicit directories are searched before platform defaults.
//! Invariants: Environment is read only by `from_env`; everything else is pure.
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::warn;

use crate::core::locate::{default_search_dirs, platform_library_name, unique_dirs};

/// Extra directories to search, in platform path-list syntax.
pub const LIB_DIR_ENV: &str = "NRFJPROG_LIB_DIR";
/// Library file name (or absolute path) overriding the platform default.
pub const LIB_NAME_ENV: &str = "NRFJPROG_LIB_NAME";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoaderConfig {
    lib_dirs: Vec<PathBuf>,
    lib_name: Option<String>,
    system_search: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self {
            lib_dirs: Vec::new(),
            lib_name: None,
            system_search: true,
        }
    }

    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var_os(key))
    }

    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::new();
        if let Some(dirs) = lookup(LIB_DIR_ENV) {
            config.lib_dirs.extend(std::env::split_paths(&dirs));
            config.lib_dirs.retain(|dir| !dir.as_os_str().is_empty());
        }
        match lookup(LIB_NAME_ENV).map(OsString::into_string) {
            Some(Ok(name)) if !name.is_empty() => config.lib_name = Some(name),
            Some(Err(raw)) => {
                warn!(
                    value = %raw.to_string_lossy(),
                    "ignoring {LIB_NAME_ENV}: not valid UTF-8"
                );
            }
            _ => {}
        }
        config
    }

    /// Searched ahead of directories from the environment.
    pub fn with_lib_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut merged: Vec<PathBuf> = dirs.into_iter().collect();
        merged.append(&mut self.lib_dirs);
        self.lib_dirs = merged;
        self
    }

    pub fn with_lib_name(mut self, name: impl Into<String>) -> Self {
        self.lib_name = Some(name.into());
        self
    }

    pub fn without_system_search(mut self) -> Self {
        self.system_search = false;
        self
    }

    pub fn library_name(&self) -> &str {
        self.lib_name.as_deref().unwrap_or(platform_library_name())
    }

    pub fn lib_dirs(&self) -> &[PathBuf] {
        &self.lib_dirs
    }

    /// Explicit directories then platform defaults, each directory once.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.lib_dirs.clone();
        if self.system_search {
            dirs.extend(default_search_dirs());
        }
        unique_dirs(dirs)
    }
}
