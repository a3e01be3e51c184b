//! Member resolution and structural queries over [`TypeDescriptor`]s.
//!
//! Resolution is **visibility-blind**: private, protected and static members
//! are found exactly like public instance ones. Absence of a member is an
//! expected outcome and is reported as `None`, never as an error.

use core::any::TypeId;
use core::ops::Deref;

use crate::error::ReflectError;
use crate::info::{ConstructorInfo, MemberInfo, MemberKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// ResolvedMember

/// A member found by resolution, paired with the descriptor that declared it.
///
/// A transient view over static metadata; carries no lifecycle of its own.
/// Dereferences to the underlying [`MemberInfo`].
#[derive(Clone, Copy, Debug)]
pub struct ResolvedMember {
    member: &'static MemberInfo,
    declared_by: &'static TypeDescriptor,
}

impl ResolvedMember {
    /// Returns the member metadata.
    #[inline]
    pub const fn member(&self) -> &'static MemberInfo {
        self.member
    }

    /// Returns the descriptor of the type that declared this member.
    ///
    /// For a member redeclared along the ancestry this is the most-derived
    /// declaring type.
    #[inline]
    pub const fn declared_by(&self) -> &'static TypeDescriptor {
        self.declared_by
    }
}

impl Deref for ResolvedMember {
    type Target = MemberInfo;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.member
    }
}

// -----------------------------------------------------------------------------
// Member lookup

/// Finds a member by name and kind on `ty` or any of its ancestors.
///
/// Any visibility and both static and instance members are considered. The
/// most-derived declaration wins when a name is redeclared along the
/// ancestry.
///
/// Fails with [`ReflectError::InvalidArgument`] if `name` is empty; an
/// unmatched name is `Ok(None)`.
pub fn find_member(
    ty: &'static TypeDescriptor,
    name: &str,
    kind: MemberKind,
) -> Result<Option<ResolvedMember>, ReflectError> {
    if name.is_empty() {
        return Err(ReflectError::InvalidArgument {
            what: "member name must not be empty".into(),
        });
    }

    Ok(ty
        .member(name, kind)
        .map(|(member, declared_by)| ResolvedMember {
            member,
            declared_by,
        }))
}

/// Whether `ty` or any of its ancestors declares a member with the given
/// name and kind. Same argument validation as [`find_member`].
pub fn has_member(
    ty: &'static TypeDescriptor,
    name: &str,
    kind: MemberKind,
) -> Result<bool, ReflectError> {
    Ok(find_member(ty, name, kind)?.is_some())
}

/// Returns every property declared on `ty` and its ancestors, public and
/// non-public, static and instance.
///
/// Deduplicated by name: a property redeclared in a derived type appears
/// once, as its most-derived declaration. Sorted by name for a stable order.
pub fn list_properties(ty: &'static TypeDescriptor) -> Vec<ResolvedMember> {
    let mut properties: Vec<ResolvedMember> = ty
        .member_index()
        .values()
        .flatten()
        .filter(|(kind, ..)| *kind == MemberKind::Property)
        .map(|&(_, member, declared_by)| ResolvedMember {
            member,
            declared_by,
        })
        .collect();

    properties.sort_unstable_by_key(|resolved| resolved.name());
    properties
}

// -----------------------------------------------------------------------------
// Structural predicates

fn contract_matches(contract: &'static TypeDescriptor, target: TypeId) -> bool {
    contract.ty_id() == target
        || contract
            .interfaces()
            .any(|extended| contract_matches(extended, target))
}

/// Whether `ty` (or an ancestor) declares the interface contract `contract`,
/// directly or through contract extension.
///
/// Fails with [`ReflectError::InvalidArgument`] if `contract` is not an
/// interface descriptor: passing a concrete type as the contract is a usage
/// error, not a silent `false`.
pub fn implements(
    ty: &'static TypeDescriptor,
    contract: &'static TypeDescriptor,
) -> Result<bool, ReflectError> {
    if !contract.is_interface() {
        return Err(ReflectError::InvalidArgument {
            what: format!(
                "`{}` is not an interface contract",
                contract.type_path()
            )
            .into(),
        });
    }

    Ok(ty
        .ancestry()
        .flat_map(TypeDescriptor::interfaces)
        .any(|declared| contract_matches(declared, contract.ty_id())))
}

/// Whether a value described by `ty` is assignable to `target`: nominal
/// identity, an ancestor type, or an implemented interface contract.
pub fn is_assignable_to(ty: &'static TypeDescriptor, target: &'static TypeDescriptor) -> bool {
    if ty.ancestry().any(|ancestor| ancestor.ty_id() == target.ty_id()) {
        return true;
    }
    target.is_interface() && implements(ty, target).unwrap_or(false)
}

/// Returns the zero-argument constructor of `ty`, if one is declared.
pub fn default_constructor(ty: &'static TypeDescriptor) -> Option<&'static ConstructorInfo> {
    ty.default_constructor()
}
