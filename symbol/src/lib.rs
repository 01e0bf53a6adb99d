//! Interned, process-wide canonical symbols.
//!
//! [`Symbol::of`] returns the same handle for equal text for as long as some
//! owner keeps that handle alive, so symbols can be compared by identity with
//! [`Symbol::ptr_eq`] as well as by value.

mod error;
mod persist;
mod symbols;

pub use error::{SymbolError, SymbolResult};
pub use persist::{from_json, to_json};
pub use registry::CacheStats;
pub use symbols::{Symbol, live_symbols};
