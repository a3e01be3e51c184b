//! A concurrency-safe registry of element transformers.
//!
//! ## Menu
//!
//! - [`Transform`]: a capability to convert a collection of one element type
//!   into a collection of another, carrying its own (source, target) pair.
//! - [`TransformRegistry`]: at most one shared transformer per ordered type
//!   pair; first-wins registration, lock-guarded mutation, read-only lookup.
//! - [`TransformRegistryArc`]: a clone-able shared handle for threading one
//!   registry through a process.

// -----------------------------------------------------------------------------
// Modules

mod registry;
mod transform;

// -----------------------------------------------------------------------------
// Exports

pub use registry::{TransformRegistry, TransformRegistryArc};
pub use transform::Transform;
