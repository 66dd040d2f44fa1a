//! Report renderers for the pipeline output.
//!
//! - [`csv`] — the canonical dataset, its codebook and the analytics
//!   tables; every artifact is fully overwritten each run.
//! - [`terminal`] — colored, sectioned console report; respects
//!   `--verbose` / `--quiet`.

pub mod csv;
pub mod terminal;
