use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;
use std::sync::OnceLock;

use rf_utils::hash::HashMap;

use crate::info::{ConstructorInfo, MemberInfo, MemberKind};

// -----------------------------------------------------------------------------
// Describe

/// A trait which allows a type to publish its [`TypeDescriptor`].
///
/// Rust has no open runtime reflection, so participating types build their
/// metadata once and hand out a `'static` reference to it. The conventional
/// implementation builds the descriptor lazily in a [`OnceLock`]:
///
/// ```
/// use rf_reflect::info::{Describe, MemberInfo, TypeDescriptor, Visibility};
/// use std::sync::OnceLock;
///
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// impl Describe for Point {
///     fn descriptor() -> &'static TypeDescriptor {
///         static DESC: OnceLock<TypeDescriptor> = OnceLock::new();
///         DESC.get_or_init(|| {
///             TypeDescriptor::builder::<Point>("geometry::Point")
///                 .member(MemberInfo::field::<f32>("x", Visibility::Public))
///                 .member(MemberInfo::field::<f32>("y", Visibility::Public))
///                 .build()
///         })
///     }
/// }
/// ```
pub trait Describe: Any {
    /// Returns the **static** [`TypeDescriptor`] for this type.
    fn descriptor() -> &'static TypeDescriptor;
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// A deferred link to another descriptor.
///
/// Descriptors reference each other through the [`Describe::descriptor`]
/// function instead of direct references, so mutually dependent types can be
/// described without initialization-order concerns.
pub type DescriptorRef = fn() -> &'static TypeDescriptor;

/// Per-name resolved entries, at most one per [`MemberKind`].
type IndexEntry = Vec<(MemberKind, &'static MemberInfo, &'static TypeDescriptor)>;

/// Runtime metadata for a single nominal type.
///
/// Carries the type's identity, its ancestry link, the interface contracts
/// it implements, its declared members (any visibility, static or instance)
/// and its constructors.
///
/// Lookup by name is answered from a lazily built index covering the whole
/// ancestry. The index is populated root-first so a member redeclared in a
/// derived type shadows the ancestor's declaration.
pub struct TypeDescriptor {
    ty_id: TypeId,
    type_path: &'static str,
    is_interface: bool,
    base: Option<DescriptorRef>,
    interfaces: Box<[DescriptorRef]>,
    members: Box<[MemberInfo]>,
    constructors: Box<[ConstructorInfo]>,
    member_index: OnceLock<HashMap<&'static str, IndexEntry>>,
}

impl TypeDescriptor {
    /// Starts building a descriptor for type `T` with the given path.
    pub fn builder<T: Any>(type_path: &'static str) -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            type_path,
            is_interface: false,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            constructors: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the `TypeId` of the described type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Returns the full path of the described type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Whether this descriptor denotes an interface-like capability contract
    /// rather than a concrete type.
    #[inline]
    pub const fn is_interface(&self) -> bool {
        self.is_interface
    }

    /// Returns the descriptor of the immediate base type, if any.
    #[inline]
    pub fn base(&self) -> Option<&'static TypeDescriptor> {
        self.base.map(|base| base())
    }

    /// Returns the directly declared interface contracts.
    pub fn interfaces(&self) -> impl Iterator<Item = &'static TypeDescriptor> + '_ {
        self.interfaces.iter().map(|contract| contract())
    }

    /// Returns the directly declared members, in declaration order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Returns the declared constructors, in declaration order.
    #[inline]
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// Returns the zero-argument constructor, if one is declared.
    pub fn default_constructor(&self) -> Option<&ConstructorInfo> {
        self.constructors.iter().find(|ctor| ctor.is_default())
    }

    /// Walks the ancestry starting at `self`, root-most last.
    pub fn ancestry(&'static self) -> impl Iterator<Item = &'static TypeDescriptor> {
        let mut next = Some(self);
        core::iter::from_fn(move || {
            let current = next?;
            next = current.base();
            Some(current)
        })
    }

    /// Looks up a member declared on this type or any ancestor.
    ///
    /// Returns the most-derived declaration together with the descriptor
    /// that declared it.
    pub fn member(
        &'static self,
        name: &str,
        kind: MemberKind,
    ) -> Option<(&'static MemberInfo, &'static TypeDescriptor)> {
        self.member_index()
            .get(name)?
            .iter()
            .find(|(entry_kind, ..)| *entry_kind == kind)
            .map(|(_, member, declared_by)| (*member, *declared_by))
    }

    /// Returns the full member index, building it on first access.
    ///
    /// Populated root-first: entries of a derived type overwrite ancestor
    /// entries of the same name and kind, so the most-derived declaration
    /// wins.
    pub(crate) fn member_index(&'static self) -> &'static HashMap<&'static str, IndexEntry> {
        self.member_index.get_or_init(|| {
            let mut index: HashMap<&'static str, IndexEntry> = HashMap::default();

            let chain: Vec<_> = self.ancestry().collect();
            for ty in chain.into_iter().rev() {
                for member in ty.members() {
                    let entry = index.entry(member.name()).or_default();
                    match entry.iter_mut().find(|(kind, ..)| *kind == member.kind()) {
                        Some(slot) => *slot = (member.kind(), member, ty),
                        None => entry.push((member.kind(), member, ty)),
                    }
                }
            }

            index
        })
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_path", &self.type_path)
            .field("is_interface", &self.is_interface)
            .field("members", &self.members)
            .field("constructors", &self.constructors)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptorBuilder

/// Builder for [`TypeDescriptor`], returned by [`TypeDescriptor::builder`].
pub struct TypeDescriptorBuilder<T> {
    type_path: &'static str,
    is_interface: bool,
    base: Option<DescriptorRef>,
    interfaces: Vec<DescriptorRef>,
    members: Vec<MemberInfo>,
    constructors: Vec<ConstructorInfo>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeDescriptorBuilder<T> {
    /// Marks the descriptor as an interface-like capability contract.
    pub fn interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    /// Declares the immediate base type.
    pub fn base<B: Describe>(mut self) -> Self {
        self.base = Some(B::descriptor);
        self
    }

    /// Declares a directly implemented interface contract.
    pub fn implements<I: Describe>(mut self) -> Self {
        self.interfaces.push(I::descriptor);
        self
    }

    /// Declares a member.
    pub fn member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    /// Declares a constructor.
    pub fn constructor(mut self, constructor: ConstructorInfo) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Declares the implicit zero-argument constructor backed by the type's
    /// [`Default`] implementation.
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(ConstructorInfo::new(Vec::new(), |_| {
            Ok(Box::new(T::default()) as Box<dyn Any>)
        }))
    }

    /// Finishes the descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            ty_id: TypeId::of::<T>(),
            type_path: self.type_path,
            is_interface: self.is_interface,
            base: self.base,
            interfaces: self.interfaces.into_boxed_slice(),
            members: self.members.into_boxed_slice(),
            constructors: self.constructors.into_boxed_slice(),
            member_index: OnceLock::new(),
        }
    }
}
