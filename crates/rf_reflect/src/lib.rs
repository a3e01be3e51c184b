//! Reflective member resolution and object construction over explicit type
//! metadata.
//!
//! Rust has no open runtime reflection, so participating types publish a
//! static [`TypeDescriptor`](info::TypeDescriptor) through the
//! [`Describe`](info::Describe) trait: identity, ancestry link, implemented
//! contracts, declared members (any visibility, static or instance) and
//! constructors. On top of that metadata this crate provides:
//!
//! - [`resolve`] — find a member by name anywhere in a type's ancestry,
//!   independent of visibility and static/instance modifiers; enumerate
//!   properties; answer interface/base-type questions.
//! - [`construct`](mod@construct) — build instances from positional
//!   arguments, from a name → value mapping, or from the public readable
//!   properties of an arbitrary described object.
//!
//! All operations are pure reads over immutable `'static` metadata and can
//! be called concurrently without coordination.

// -----------------------------------------------------------------------------
// Modules

mod error;

pub mod construct;
pub mod info;
pub mod resolve;

// -----------------------------------------------------------------------------
// Top-level exports

pub use construct::{ConstructArgs, construct};
pub use error::{ConstructError, ReflectError};
pub use info::{Describe, MemberInfo, MemberKind, TypeDescriptor, Visibility};
