//! Purpose: Find the nrfjprog shared library on disk.
//! Exports: `PathResolver`, `SearchPathResolver`, `platform_library_name`, `default_search_dirs`.
//! Role: Path-resolution seam of the loader; the session asks it once and caches the answer.
//! Invariants: First existing regular file in directory order wins.
//! Invariants: A miss is always `ErrorKind::DllNotFound`, never a load error.
use std::collections::HashSet;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{Error, ErrorKind};

pub trait PathResolver {
    /// Full path of `file_name`, or `ErrorKind::DllNotFound`.
    fn find_library(&self, file_name: &str) -> Result<PathBuf, Error>;
}

pub fn platform_library_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "nrfjprog.dll"
    } else if cfg!(target_os = "macos") {
        "libnrfjprogdll.dylib"
    } else {
        "libnrfjprogdll.so"
    }
}

/// Platform search locations, most specific first.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(exe_dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.join("nrfjprog").join("lib"));
        dirs.push(exe_dir.join("nrfjprog"));
        dirs.push(exe_dir);
    }

    if let Some(value) = env::var_os(loader_path_var()) {
        dirs.extend(env::split_paths(&value));
    }

    dirs.extend(install_dirs());
    unique_dirs(dirs)
}

/// Drops empty entries and repeats, keeping the first occurrence of each directory.
pub(crate) fn unique_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    dirs.into_iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .filter(|dir| seen.insert(dir.clone()))
        .collect()
}

fn loader_path_var() -> &'static str {
    if cfg!(target_os = "windows") {
        "PATH"
    } else if cfg!(target_os = "macos") {
        "DYLD_LIBRARY_PATH"
    } else {
        "LD_LIBRARY_PATH"
    }
}

#[cfg(target_os = "windows")]
fn install_dirs() -> Vec<PathBuf> {
    ["ProgramFiles(x86)", "ProgramFiles"]
        .iter()
        .filter_map(|var| env::var_os(var))
        .map(|root| {
            PathBuf::from(root)
                .join("Nordic Semiconductor")
                .join("nrf5x")
                .join("bin")
        })
        .collect()
}

#[cfg(target_os = "macos")]
fn install_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/local/bin"),
        PathBuf::from("/usr/local/lib"),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn install_dirs() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/opt/nrfjprog"),
        PathBuf::from("/usr/local/lib"),
        PathBuf::from("/usr/lib"),
    ]
}

/// Looks for the library file in an ordered list of directories.
#[derive(Clone, Debug, Default)]
pub struct SearchPathResolver {
    dirs: Vec<PathBuf>,
}

impl SearchPathResolver {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl PathResolver for SearchPathResolver {
    fn find_library(&self, file_name: &str) -> Result<PathBuf, Error> {
        let requested = Path::new(file_name);
        if requested.is_absolute() {
            if requested.is_file() {
                return Ok(requested.to_path_buf());
            }
            return Err(not_found(file_name).with_path(requested));
        }
        if file_name.is_empty() || requested.file_name() != Some(OsStr::new(file_name)) {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("invalid library file name '{file_name}'"))
                .with_hint("Use a bare file name or an absolute path."));
        }

        for dir in &self.dirs {
            let candidate = dir.join(file_name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found nrfjprog library");
                return Ok(candidate);
            }
            debug!(dir = %dir.display(), "nrfjprog library not in directory");
        }
        Err(not_found(file_name))
    }
}

fn not_found(file_name: &str) -> Error {
    Error::new(ErrorKind::DllNotFound)
        .with_message(format!("could not find {file_name}"))
        .with_hint(
            "Install the nRF Command Line Tools, or point NRFJPROG_LIB_DIR (or --lib-dir) at the directory holding the library.",
        )
}

#[cfg(test)]
mod tests {
    use super::{
        PathResolver, SearchPathResolver, default_search_dirs, platform_library_name, unique_dirs,
    };
    use crate::core::error::ErrorKind;
    use std::collections::HashSet;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn finds_first_matching_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let empty = temp.path().join("empty");
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        for dir in [&empty, &first, &second] {
            fs::create_dir_all(dir).expect("mkdir");
        }
        fs::write(first.join("libfake.so"), b"").expect("write");
        fs::write(second.join("libfake.so"), b"").expect("write");

        let resolver = SearchPathResolver::new(vec![empty, first.clone(), second]);
        let path = resolver.find_library("libfake.so").expect("found");
        assert_eq!(path, first.join("libfake.so"));
    }

    #[test]
    fn directories_named_like_the_library_are_skipped() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("libfake.so")).expect("mkdir");

        let resolver = SearchPathResolver::new(vec![temp.path().to_path_buf()]);
        let err = resolver.find_library("libfake.so").expect_err("not a file");
        assert_eq!(err.kind(), ErrorKind::DllNotFound);
    }

    #[test]
    fn missing_library_is_dll_not_found_with_hint() {
        let temp = tempfile::tempdir().expect("tempdir");
        let resolver = SearchPathResolver::new(vec![temp.path().to_path_buf()]);

        let err = resolver.find_library("libfake.so").expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::DllNotFound);
        assert!(err.message().unwrap().contains("libfake.so"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn absolute_names_bypass_the_search() {
        let temp = tempfile::tempdir().expect("tempdir");
        let lib = temp.path().join("custom.so");
        fs::write(&lib, b"").expect("write");

        let resolver = SearchPathResolver::new(Vec::new());
        assert_eq!(resolver.find_library(lib.to_str().unwrap()).unwrap(), lib);

        let missing = temp.path().join("missing.so");
        let err = resolver
            .find_library(missing.to_str().unwrap())
            .expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::DllNotFound);
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[test]
    fn relative_paths_are_rejected() {
        let resolver = SearchPathResolver::new(Vec::new());
        let err = resolver.find_library("lib/fake.so").expect_err("usage");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn platform_name_matches_vendor_packaging() {
        let name = platform_library_name();
        #[cfg(target_os = "windows")]
        assert_eq!(name, "nrfjprog.dll");
        #[cfg(target_os = "macos")]
        assert_eq!(name, "libnrfjprogdll.dylib");
        #[cfg(target_os = "linux")]
        assert_eq!(name, "libnrfjprogdll.so");
    }

    #[test]
    fn default_dirs_start_next_to_the_executable() {
        let exe = std::env::current_exe().expect("exe");
        let exe_dir = exe.parent().expect("parent");
        let dirs = default_search_dirs();
        assert_eq!(dirs.first(), Some(&exe_dir.join("nrfjprog").join("lib")));
        assert!(dirs.contains(&exe_dir.to_path_buf()));
    }

    #[test]
    fn repeated_dirs_keep_first_position() {
        let dirs = unique_dirs([
            PathBuf::from("/usr/local/lib"),
            PathBuf::from("/opt/nrfjprog"),
            PathBuf::new(),
            PathBuf::from("/usr/lib"),
            PathBuf::from("/usr/local/lib"),
        ]);
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/usr/local/lib"),
                PathBuf::from("/opt/nrfjprog"),
                PathBuf::from("/usr/lib"),
            ]
        );
    }

    #[test]
    fn default_dirs_are_unique() {
        let dirs = default_search_dirs();
        let unique: HashSet<_> = dirs.iter().collect();
        assert_eq!(unique.len(), dirs.len());
    }
}
