use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// MemberKind

/// The kind of a declared [member](MemberInfo).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Event,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Field => "field",
            Self::Property => "property",
            Self::Method => "method",
            Self::Event => "event",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// Visibility

/// Declared visibility of a [member](MemberInfo).
///
/// Resolution is visibility-blind; this value is carried so callers can
/// still branch on it after a member has been found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A type-erased property read thunk.
///
/// Receives the owning instance and returns a boxed copy of the property
/// value, or `None` if the instance is not of the declaring type.
pub type Getter = fn(&dyn Any) -> Option<Box<dyn Any>>;

/// A type-erased property write thunk.
///
/// Receives the owning instance and the new value; returns `false` if either
/// the instance or the value is not of the declared type.
pub type Setter = fn(&mut dyn Any, Box<dyn Any>) -> bool;

/// Information for a single declared member of a type.
///
/// Members are declared on a [`TypeDescriptor`] through its builder; the
/// declaring type itself is attached during resolution (see
/// [`ResolvedMember`]).
///
/// Properties may carry [`Getter`]/[`Setter`] thunks. A property with a
/// getter is *readable* (it participates as a source in property-bag
/// construction); one with a setter is *writable* (it can receive a
/// post-construction assignment).
///
/// [`TypeDescriptor`]: crate::info::TypeDescriptor
/// [`ResolvedMember`]: crate::resolve::ResolvedMember
#[derive(Clone)]
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    visibility: Visibility,
    is_static: bool,
    value_ty: TypeId,
    value_type_name: &'static str,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl MemberInfo {
    /// Creates a new member of the given kind whose value (field type,
    /// property type, method return type, event payload) is `T`.
    pub fn new<T: Any>(name: &'static str, kind: MemberKind, visibility: Visibility) -> Self {
        Self {
            name,
            kind,
            visibility,
            is_static: false,
            value_ty: TypeId::of::<T>(),
            value_type_name: core::any::type_name::<T>(),
            getter: None,
            setter: None,
        }
    }

    /// Shorthand for a field member.
    #[inline]
    pub fn field<T: Any>(name: &'static str, visibility: Visibility) -> Self {
        Self::new::<T>(name, MemberKind::Field, visibility)
    }

    /// Shorthand for a property member.
    #[inline]
    pub fn property<T: Any>(name: &'static str, visibility: Visibility) -> Self {
        Self::new::<T>(name, MemberKind::Property, visibility)
    }

    /// Shorthand for a method member with return type `T`.
    #[inline]
    pub fn method<T: Any>(name: &'static str, visibility: Visibility) -> Self {
        Self::new::<T>(name, MemberKind::Method, visibility)
    }

    /// Shorthand for an event member with payload type `T`.
    #[inline]
    pub fn event<T: Any>(name: &'static str, visibility: Visibility) -> Self {
        Self::new::<T>(name, MemberKind::Event, visibility)
    }

    /// Marks the member as static (associated with the type, not an instance).
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Attaches a read thunk, making a property readable.
    pub fn with_getter(mut self, getter: Getter) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Attaches a write thunk, making a property writable.
    pub fn with_setter(mut self, setter: Setter) -> Self {
        self.setter = Some(setter);
        self
    }

    /// Returns the member name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the member kind.
    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Returns the declared visibility.
    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the member is static rather than per-instance.
    #[inline]
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns the `TypeId` of the member's value type.
    #[inline]
    pub const fn value_ty(&self) -> TypeId {
        self.value_ty
    }

    /// Returns the name of the member's value type.
    #[inline]
    pub const fn value_type_name(&self) -> &'static str {
        self.value_type_name
    }

    /// Check if the given type matches the member's value type.
    #[inline]
    pub fn value_type_is<T: Any>(&self) -> bool {
        self.value_ty == TypeId::of::<T>()
    }

    /// Whether this member can be read through a getter thunk.
    #[inline]
    pub const fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    /// Whether this member can be written through a setter thunk.
    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Reads the member value from `instance`, if a getter is attached and
    /// the instance is of the declaring type.
    pub fn get_value(&self, instance: &dyn Any) -> Option<Box<dyn Any>> {
        self.getter.and_then(|getter| getter(instance))
    }

    /// Writes `value` into `instance`, if a setter is attached.
    ///
    /// Returns `false` when no setter exists or the thunk rejected the
    /// instance or value type.
    pub fn set_value(&self, instance: &mut dyn Any, value: Box<dyn Any>) -> bool {
        match self.setter {
            Some(setter) => setter(instance, value),
            None => false,
        }
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .field("value_type", &self.value_type_name)
            .finish()
    }
}
