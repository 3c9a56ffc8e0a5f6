//! Purpose: Owned nrfjprog library session (path cache, handle, function table).
//! Exports: `NrfjprogLibrary`, `LibraryVersion`.
//! Role: Acquire/release lifecycle over the path, loader and symbol seams.
//! Invariants: The library path is resolved at most once per session and only cached on success.
//! Invariants: The function table is only reachable while its library is loaded.
//! Invariants: After `release_library` the session is unloaded, even if closing failed.
use std::fmt;
use std::os::raw::c_char;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LoaderConfig;
use crate::core::error::{Error, ErrorKind};
use crate::core::functions::{NrfjprogFunctions, SYMBOL_COUNT};
use crate::core::library::{DynamicLoader, LibraryHandle, LibraryLoader};
use crate::core::locate::{PathResolver, SearchPathResolver};
use crate::core::sys;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct LibraryVersion {
    pub major: u32,
    pub minor: u32,
    pub revision: char,
}

impl fmt::Display for LibraryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

struct Loaded<H> {
    handle: H,
    functions: NrfjprogFunctions,
}

/// One nrfjprog library session.
///
/// Construct once, call [`load_functions`](Self::load_functions), and keep the
/// session alive for as long as the returned table is used. Dropping the
/// session releases the library.
pub struct NrfjprogLibrary<R = SearchPathResolver, L = DynamicLoader>
where
    L: LibraryLoader,
{
    resolver: R,
    loader: L,
    library_name: String,
    path: Option<PathBuf>,
    loaded: Option<Loaded<L::Handle>>,
}

impl NrfjprogLibrary {
    pub fn new(config: &LoaderConfig) -> Self {
        Self::with_parts(
            SearchPathResolver::new(config.search_dirs()),
            DynamicLoader,
            config.library_name(),
        )
    }
}

impl<R, L> NrfjprogLibrary<R, L>
where
    R: PathResolver,
    L: LibraryLoader,
{
    pub fn with_parts(resolver: R, loader: L, library_name: impl Into<String>) -> Self {
        Self {
            resolver,
            loader,
            library_name: library_name.into(),
            path: None,
            loaded: None,
        }
    }

    /// Resolves the library path, reusing the cached one when present.
    pub fn locate(&mut self) -> Result<&Path, Error> {
        let path = match self.path.take() {
            Some(path) => path,
            None => {
                let path = self.resolver.find_library(&self.library_name)?;
                debug!(path = %path.display(), "cached nrfjprog library path");
                path
            }
        };
        Ok(self.path.insert(path).as_path())
    }

    /// Loads the library and binds every entry point.
    ///
    /// Any library already held by this session is released first. On failure
    /// nothing stays loaded; the call can be retried.
    pub fn load_functions(&mut self) -> Result<&NrfjprogFunctions, Error> {
        let path = self.locate()?.to_path_buf();

        if let Err(err) = self.release_library() {
            warn!(error = %err, "ignoring failure to release previous nrfjprog library");
        }

        let handle = self.loader.open(&path)?;
        // SAFETY: the handle belongs to the nrfjprog library, whose header declares the
        // signature of every entry point in the table.
        let resolved = unsafe { NrfjprogFunctions::resolve(|name| handle.symbol(name)) };
        let functions = match resolved {
            Ok(functions) => functions,
            Err(err) => {
                if let Err(close_err) = handle.close() {
                    warn!(error = %close_err, "failed to close incomplete nrfjprog library");
                }
                return Err(err.with_path(path).with_hint(
                    "The installed nrfjprog library is older than this loader expects; update the nRF Command Line Tools.",
                ));
            }
        };

        info!(path = %path.display(), symbols = SYMBOL_COUNT, "loaded nrfjprog library");
        let loaded = self.loaded.insert(Loaded { handle, functions });
        Ok(&loaded.functions)
    }

    /// Calls `NRFJPROG_dll_version` on the loaded library.
    pub fn library_version(&self) -> Result<LibraryVersion, Error> {
        let functions = self.functions().ok_or_else(|| {
            Error::new(ErrorKind::Usage)
                .with_message("nrfjprog library is not loaded")
                .with_hint("Call load_functions before querying the library.")
        })?;

        let mut major = 0u32;
        let mut minor = 0u32;
        let mut revision: c_char = 0;
        // SAFETY: the table is borrowed from a loaded session; the out-pointers are valid locals.
        let status = unsafe { (functions.dll_version)(&mut major, &mut minor, &mut revision) };
        check_status("NRFJPROG_dll_version", status)?;

        Ok(LibraryVersion {
            major,
            minor,
            revision: char::from(revision as u8),
        })
    }
}

impl<R, L> NrfjprogLibrary<R, L>
where
    L: LibraryLoader,
{
    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn library_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn functions(&self) -> Option<&NrfjprogFunctions> {
        self.loaded.as_ref().map(|loaded| &loaded.functions)
    }

    /// Unloads the library; a no-op when nothing is loaded.
    pub fn release_library(&mut self) -> Result<(), Error> {
        let Some(loaded) = self.loaded.take() else {
            return Ok(());
        };
        loaded.handle.close()?;
        info!("released nrfjprog library");
        Ok(())
    }
}

impl<R, L> Drop for NrfjprogLibrary<R, L>
where
    L: LibraryLoader,
{
    fn drop(&mut self) {
        if let Err(err) = self.release_library() {
            warn!(error = %err, "failed to release nrfjprog library");
        }
    }
}

fn check_status(symbol: &'static str, status: sys::nrfjprogdll_err_t) -> Result<(), Error> {
    if status == sys::SUCCESS {
        return Ok(());
    }
    let name = sys::status_name(status).unwrap_or("unknown status");
    Err(Error::new(ErrorKind::Library)
        .with_message(format!("{symbol} returned {name}"))
        .with_symbol(symbol)
        .with_status(status))
}
