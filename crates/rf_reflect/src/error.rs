use std::borrow::Cow;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ReflectError

/// An enumeration of all error outcomes that might happen when resolving
/// members or answering structural questions about a [`TypeDescriptor`].
///
/// Absence of a member is **not** an error; resolution reports it as `None`.
///
/// [`TypeDescriptor`]: crate::info::TypeDescriptor
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReflectError {
    /// A required input was structurally invalid, e.g. an empty member name
    /// or a concrete type passed where an interface contract is required.
    #[error("invalid argument: {what}")]
    InvalidArgument { what: Cow<'static, str> },
}

// -----------------------------------------------------------------------------
// ConstructError

/// An enumeration of all error outcomes that might happen when
/// [constructing](crate::construct) an instance through a descriptor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConstructError {
    /// A required input was structurally invalid, e.g. a duplicate name in a
    /// named-argument set.
    #[error("invalid argument: {what}")]
    InvalidArgument { what: Cow<'static, str> },

    /// No constructor matches the requested argument shape.
    #[error("no matching constructor on `{type_path}`: {detail}")]
    MemberNotFound {
        type_path: &'static str,
        detail: Cow<'static, str>,
    },

    /// More than one constructor equally satisfies a positional call.
    /// Remediation differs from [`MemberNotFound`](Self::MemberNotFound):
    /// the caller must disambiguate, not supply different arguments.
    #[error("{count} constructors on `{type_path}` equally match the supplied arguments")]
    Ambiguous {
        type_path: &'static str,
        count: usize,
    },

    /// An argument value did not have the type the matched parameter or
    /// property declares.
    #[error("argument {index} has an unexpected type, expected `{expected}`")]
    ArgumentType {
        index: usize,
        expected: &'static str,
    },
}
