//! golboard Application
//!
//! Browser hooks wiring the core input normalizer and clipboard bridge into
//! the LiveView page, plus a native replay tool for synthetic input.

#[cfg(not(target_arch = "wasm32"))]
pub mod replay;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CopyListener, DrawHook, HelperListeners, install_copy_listener, install_helpers};
