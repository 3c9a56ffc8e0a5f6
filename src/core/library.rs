//! Purpose: Open/close shared libraries and look up exported symbols.
//! Exports: `LibraryLoader`, `LibraryHandle`, `DynamicLoader`, `DynamicLibrary`.
//! Role: OS seam of the loader; tests substitute stub loaders and handles.
//! Invariants: All `libloading` interaction is confined to this module.
//! Invariants: A handle is closed at most once; `close` consumes it.
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use tracing::trace;

use crate::core::error::{Error, ErrorKind};

pub trait LibraryHandle {
    /// Address of `name`, `None` when the library does not export it.
    fn symbol(&self, name: &'static str) -> Option<NonNull<c_void>>;

    fn close(self) -> Result<(), Error>;
}

pub trait LibraryLoader {
    type Handle: LibraryHandle;

    /// Opens the library at `path`; failure is `ErrorKind::CouldNotLoadLibrary`.
    fn open(&self, path: &Path) -> Result<Self::Handle, Error>;
}

/// Loads libraries through the platform dynamic linker.
#[derive(Clone, Copy, Debug, Default)]
pub struct DynamicLoader;

#[derive(Debug)]
pub struct DynamicLibrary {
    library: libloading::Library,
    path: PathBuf,
}

impl LibraryLoader for DynamicLoader {
    type Handle = DynamicLibrary;

    fn open(&self, path: &Path) -> Result<DynamicLibrary, Error> {
        // SAFETY: the path comes from the nrfjprog search rules; its initialisers are
        // the vendor's and run like those of any linked-in library.
        let library = unsafe { libloading::Library::new(path) }.map_err(|err| {
            Error::new(ErrorKind::CouldNotLoadLibrary)
                .with_message("failed to open nrfjprog library")
                .with_path(path)
                .with_hint("Check that the library matches this process architecture and that its dependencies (J-Link) are installed.")
                .with_source(err)
        })?;
        Ok(DynamicLibrary {
            library,
            path: path.to_path_buf(),
        })
    }
}

impl LibraryHandle for DynamicLibrary {
    fn symbol(&self, name: &'static str) -> Option<NonNull<c_void>> {
        // SAFETY: only the address is read; it is typed later by the function table.
        match unsafe { self.library.get::<*mut c_void>(name.as_bytes()) } {
            Ok(symbol) => NonNull::new(*symbol),
            Err(err) => {
                trace!(symbol = name, error = %err, "symbol lookup failed");
                None
            }
        }
    }

    fn close(self) -> Result<(), Error> {
        let path = self.path;
        self.library.close().map_err(|err| {
            Error::new(ErrorKind::CouldNotUnloadLibrary)
                .with_message("failed to unload nrfjprog library")
                .with_path(path)
                .with_source(err)
        })
    }
}
