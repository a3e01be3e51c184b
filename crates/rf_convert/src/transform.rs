use core::any::TypeId;

// -----------------------------------------------------------------------------
// Transform

/// A capability to convert a collection of one element type into a
/// collection of another element type.
///
/// The source and target element types are carried by the transformer's own
/// declaration; the [`TransformRegistry`](crate::TransformRegistry) keys its
/// entries on exactly this pair.
///
/// # Examples
///
/// ```
/// use rf_convert::Transform;
///
/// struct Stringify;
///
/// impl Transform for Stringify {
///     type Source = u32;
///     type Target = String;
///
///     fn transform(&self, input: &[u32]) -> Vec<String> {
///         input.iter().map(u32::to_string).collect()
///     }
/// }
/// ```
pub trait Transform: Send + Sync + 'static {
    /// The element type this transformer consumes.
    type Source: 'static;
    /// The element type this transformer produces.
    type Target: 'static;

    /// Converts a collection of `Source` elements into `Target` elements.
    fn transform(&self, input: &[Self::Source]) -> Vec<Self::Target>;

    /// Returns the `TypeId` of the source element type.
    #[inline]
    fn source_ty(&self) -> TypeId {
        TypeId::of::<Self::Source>()
    }

    /// Returns the `TypeId` of the target element type.
    #[inline]
    fn target_ty(&self) -> TypeId {
        TypeId::of::<Self::Target>()
    }
}
