//! Purpose: Define the stable public Rust API boundary for the loader.
//! Exports: Session, function table, configuration, errors, and raw ABI types.
//! Role: Public, additive-only surface used by the CLI and embedding applications.
//! Invariants: Entry-point signatures mirror `nrfjprogdll.h` and change only with it.

pub use crate::config::{LIB_DIR_ENV, LIB_NAME_ENV, LoaderConfig};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::functions::{FIELDS, NrfjprogFunctions, SYMBOL_COUNT, SYMBOLS};
pub use crate::core::library::{DynamicLibrary, DynamicLoader, LibraryHandle, LibraryLoader};
pub use crate::core::locate::{
    PathResolver, SearchPathResolver, default_search_dirs, platform_library_name,
};
pub use crate::core::session::{LibraryVersion, NrfjprogLibrary};
pub use crate::core::sys;
