//! Shallow Store: In-Process State Container
//!
//! A single mutable state mapping with transform-and-merge commits,
//! synchronous change observers, and silent key-scoped module writers.
//! Merges are shallow and reads return shallow copies: top-level keys are
//! isolated per copy, nested values are shared.

pub mod error;
pub mod logging;
pub mod observer;
pub mod path;
pub mod store;
pub mod types;

pub use error::LookupError;
pub use store::{Module, Store};
pub use types::{Change, Slot, State};
