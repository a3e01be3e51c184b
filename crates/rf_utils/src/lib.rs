//! Shared containers for the rf-core crates.
//!
//! Provides deterministic hash containers (re-exporting *hashbrown* and
//! *foldhash*) and [`TypeIdMap`], a map specialized for `TypeId` keys.

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
