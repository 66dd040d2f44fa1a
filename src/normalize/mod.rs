//! Source-specific normalizers that map raw tables onto
//! [`CanonicalRecord`](crate::models::CanonicalRecord)s.
//!
//! - [`exclusions`] — the fixed-schema US SAM exclusions extract.
//! - [`awards`] — Uzbekistan procurement files with per-file dynamic
//!   column resolution.
//! - [`columns`] — the substring-based column resolver the award
//!   normalizer relies on.
//! - [`coerce`] — parse-or-absent coercions shared by both normalizers.

pub mod awards;
pub mod coerce;
pub mod columns;
pub mod exclusions;
