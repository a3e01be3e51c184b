//! Static type metadata: descriptors, members, constructors.
//!
//! ## Menu
//!
//! - [`TypeDescriptor`]: the metadata record for one nominal type.
//! - [`Describe`]: a trait through which a type publishes its descriptor.
//! - [`MemberInfo`]: a declared field, property, method or event.
//! - [`ConstructorInfo`]: a constructor handle with its parameter list and
//!   an invoke thunk.

// -----------------------------------------------------------------------------
// Modules

mod constructor;
mod descriptor;
mod member;

// -----------------------------------------------------------------------------
// Exports

pub use constructor::{ArgBuf, ConstructorInfo, Invoke, ParamInfo};
pub use descriptor::{Describe, DescriptorRef, TypeDescriptor, TypeDescriptorBuilder};
pub use member::{Getter, MemberInfo, MemberKind, Setter, Visibility};
