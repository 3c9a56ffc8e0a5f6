//! Purpose: Runtime loader for the Nordic nrfjprog programming library.
//! Exports: `api` (stable surface), `config`, `core` (discovery, loading, binding, errors).
//! Role: Library crate backing the `nrfjprog-loader` CLI and embedding applications.
//! Invariants: Library state lives in explicit `NrfjprogLibrary` sessions, never in globals.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod config;
pub mod core;
