use core::any::{Any, TypeId};
use core::fmt;

use crate::error::ConstructError;

// -----------------------------------------------------------------------------
// ParamInfo

/// Information for a single declared constructor parameter.
#[derive(Clone, Debug)]
pub struct ParamInfo {
    name: &'static str,
    ty_id: TypeId,
    type_name: &'static str,
}

impl ParamInfo {
    /// Creates a new [`ParamInfo`] for the given parameter `name` and type `T`.
    pub fn new<T: Any>(name: &'static str) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns the parameter name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the `TypeId` of the parameter type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Returns the name of the parameter type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether the parameter accepts a value of the given runtime type.
    ///
    /// Rust values carry no subtype relation, so acceptance is nominal
    /// identity.
    #[inline]
    pub fn accepts(&self, value_ty: TypeId) -> bool {
        self.ty_id == value_ty
    }
}

// -----------------------------------------------------------------------------
// ArgBuf

/// An ordered buffer of type-erased argument values, consumed by an invoke
/// thunk.
///
/// Values are taken by position; each position can be taken once.
pub struct ArgBuf {
    values: Vec<Option<Box<dyn Any>>>,
}

impl ArgBuf {
    /// Creates a buffer from values already in declared parameter order.
    pub fn new(values: Vec<Box<dyn Any>>) -> Self {
        Self {
            values: values.into_iter().map(Some).collect(),
        }
    }

    /// Returns the number of argument slots (taken or not).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Takes the argument at `index`, downcast to `T`.
    ///
    /// Fails with [`ConstructError::ArgumentType`] if the slot holds a value
    /// of a different type or has already been taken.
    pub fn take<T: Any>(&mut self, index: usize) -> Result<T, ConstructError> {
        let mismatch = || ConstructError::ArgumentType {
            index,
            expected: core::any::type_name::<T>(),
        };

        let slot = self.values.get_mut(index).ok_or_else(mismatch)?;
        let value = slot.take().ok_or_else(mismatch)?;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => {
                // Put the value back so the error leaves the buffer intact.
                *slot = Some(value);
                Err(mismatch())
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ConstructorInfo

/// A constructor invoke thunk.
///
/// Receives arguments in declared parameter order and returns the new,
/// type-erased instance.
pub type Invoke = fn(ArgBuf) -> Result<Box<dyn Any>, ConstructError>;

/// A constructor handle together with its declared parameter list.
///
/// Used during object construction to score candidates against supplied
/// arguments. The invoke thunk is type specific even though the handle
/// itself is erased, mirroring how property thunks work on [`MemberInfo`].
///
/// [`MemberInfo`]: crate::info::MemberInfo
#[derive(Clone)]
pub struct ConstructorInfo {
    params: Box<[ParamInfo]>,
    invoke: Invoke,
}

impl ConstructorInfo {
    /// Creates a new constructor handle.
    ///
    /// The order of `params` is the declared parameter order; `invoke` must
    /// take its arguments in the same order.
    pub fn new(params: Vec<ParamInfo>, invoke: Invoke) -> Self {
        Self {
            params: params.into_boxed_slice(),
            invoke,
        }
    }

    /// Returns the declared parameters in order.
    #[inline]
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Returns the number of declared parameters.
    #[inline]
    pub fn param_len(&self) -> usize {
        self.params.len()
    }

    /// Whether this is the zero-argument constructor.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.params.is_empty()
    }

    /// Invokes the constructor with arguments in declared order.
    #[inline]
    pub fn invoke(&self, args: ArgBuf) -> Result<Box<dyn Any>, ConstructError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ArgBuf, ParamInfo};

    #[test]
    fn arg_buf_take_is_typed_and_single_use() {
        let mut buf = ArgBuf::new(vec![Box::new(7_u32), Box::new("x".to_string())]);
        assert_eq!(buf.len(), 2);

        // Wrong type leaves the slot intact.
        assert!(buf.take::<i64>(0).is_err());
        assert_eq!(buf.take::<u32>(0).unwrap(), 7);

        // Second take of the same slot fails.
        assert!(buf.take::<u32>(0).is_err());
        assert_eq!(buf.take::<String>(1).unwrap(), "x");
    }

    #[test]
    fn param_accepts_nominal_identity_only() {
        use core::any::TypeId;
        let param = ParamInfo::new::<u32>("count");
        assert!(param.accepts(TypeId::of::<u32>()));
        assert!(!param.accepts(TypeId::of::<u64>()));
    }
}
