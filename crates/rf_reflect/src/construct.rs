//! Object construction from three argument shapes.
//!
//! A construction request is a [`ConstructArgs`] tagged variant:
//!
//! - **Positional** — strict arity and per-position type matching; ambiguity
//!   between candidates is an error distinct from "not found".
//! - **Named** — strict set equality between supplied names and a
//!   constructor's parameter names (case-sensitive, no extras, no missing).
//! - **Property bag** — the public readable properties of an arbitrary
//!   described object become named arguments. A strict named match is
//!   attempted first; failing that, construction falls back to the
//!   zero-argument constructor followed by best-effort property assignment,
//!   silently skipping names with no settable counterpart. The asymmetry
//!   with the strict named shape is deliberate and user-visible.
//!
//! Each call is a single atomic compute: resolve, invoke, optionally apply.
//! A failed construction has no observable effect.

use core::any::Any;
use std::borrow::Cow;

use crate::error::ConstructError;
use crate::info::{ArgBuf, ConstructorInfo, Describe, MemberKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// ConstructArgs

/// A named argument: parameter or property name plus a type-erased value.
pub type NamedArg = (Cow<'static, str>, Box<dyn Any>);

/// The argument shape of a construction request.
pub enum ConstructArgs<'a> {
    /// Values in call order, matched positionally against parameter lists.
    Positional(Vec<Box<dyn Any>>),
    /// Name → value pairs; order irrelevant, names must be unique.
    Named(Vec<NamedArg>),
    /// An arbitrary described object whose public readable properties are
    /// treated as named arguments.
    PropertyBag {
        source: &'a dyn Any,
        descriptor: &'static TypeDescriptor,
    },
}

impl<'a> ConstructArgs<'a> {
    /// A positional argument list. An empty list targets the zero-argument
    /// constructor.
    #[inline]
    pub fn positional(values: Vec<Box<dyn Any>>) -> Self {
        Self::Positional(values)
    }

    /// A named argument set.
    #[inline]
    pub fn named(pairs: impl IntoIterator<Item = NamedArg>) -> Self {
        Self::Named(pairs.into_iter().collect())
    }

    /// A property bag backed by `source`, read through `S`'s descriptor.
    #[inline]
    pub fn property_bag<S: Describe>(source: &'a S) -> Self {
        Self::PropertyBag {
            source,
            descriptor: S::descriptor(),
        }
    }
}

// -----------------------------------------------------------------------------
// Entry point

/// Builds a new instance of the type described by `ty` from the given
/// argument shape.
///
/// Returns the type-erased instance; downcast with
/// [`Box::downcast`](std::boxed::Box) on the caller side.
pub fn construct(
    ty: &'static TypeDescriptor,
    args: ConstructArgs<'_>,
) -> Result<Box<dyn Any>, ConstructError> {
    match args {
        ConstructArgs::Positional(values) => construct_positional(ty, values),
        ConstructArgs::Named(pairs) => construct_named(ty, pairs),
        ConstructArgs::PropertyBag { source, descriptor } => {
            construct_from_bag(ty, source, descriptor)
        }
    }
}

// -----------------------------------------------------------------------------
// Positional

/// Positional construction: the unique constructor whose arity equals the
/// argument count and whose every parameter accepts the corresponding
/// argument's runtime type.
pub fn construct_positional(
    ty: &'static TypeDescriptor,
    values: Vec<Box<dyn Any>>,
) -> Result<Box<dyn Any>, ConstructError> {
    let candidates: Vec<&ConstructorInfo> = ty
        .constructors()
        .iter()
        .filter(|ctor| ctor.param_len() == values.len())
        .filter(|ctor| {
            ctor.params()
                .iter()
                .zip(&values)
                .all(|(param, value)| param.accepts(value.as_ref().type_id()))
        })
        .collect();

    match candidates.as_slice() {
        [] => Err(ConstructError::MemberNotFound {
            type_path: ty.type_path(),
            detail: format!(
                "no constructor accepts {} positional argument(s) of the supplied types",
                values.len()
            )
            .into(),
        }),
        [ctor] => ctor.invoke(ArgBuf::new(values)),
        many => Err(ConstructError::Ambiguous {
            type_path: ty.type_path(),
            count: many.len(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Named

/// Finds the first constructor whose parameter-name set equals `names`
/// exactly. Callers guarantee `names` holds no duplicates.
fn match_named(ty: &'static TypeDescriptor, names: &[&str]) -> Option<&'static ConstructorInfo> {
    ty.constructors().iter().find(|ctor| {
        ctor.param_len() == names.len()
            && ctor
                .params()
                .iter()
                .all(|param| names.contains(&param.name()))
    })
}

/// Re-orders `pairs` into `ctor`'s declared parameter order and invokes it.
fn invoke_named(
    ctor: &ConstructorInfo,
    mut pairs: Vec<NamedArg>,
) -> Result<Box<dyn Any>, ConstructError> {
    let mut ordered = Vec::with_capacity(pairs.len());
    for param in ctor.params() {
        // The match guarantees each parameter has exactly one supplier.
        let position = pairs
            .iter()
            .position(|(name, _)| name == param.name())
            .ok_or_else(|| ConstructError::InvalidArgument {
                what: format!("missing value for parameter `{}`", param.name()).into(),
            })?;
        ordered.push(pairs.swap_remove(position).1);
    }
    ctor.invoke(ArgBuf::new(ordered))
}

/// Named construction: strict set equality between the supplied names and a
/// constructor's parameter names — every parameter supplied, no extras.
///
/// Fails with [`ConstructError::InvalidArgument`] on duplicate names and
/// with [`ConstructError::MemberNotFound`] when no parameter-name set
/// matches.
pub fn construct_named(
    ty: &'static TypeDescriptor,
    pairs: Vec<NamedArg>,
) -> Result<Box<dyn Any>, ConstructError> {
    for (i, (name, _)) in pairs.iter().enumerate() {
        if pairs[..i].iter().any(|(seen, _)| seen == name) {
            return Err(ConstructError::InvalidArgument {
                what: format!("duplicate named argument `{name}`").into(),
            });
        }
    }

    let names: Vec<&str> = pairs.iter().map(|(name, _)| name.as_ref()).collect();
    match match_named(ty, &names) {
        Some(ctor) => invoke_named(ctor, pairs),
        None => Err(ConstructError::MemberNotFound {
            type_path: ty.type_path(),
            detail: "no constructor whose parameter names exactly match the supplied names"
                .into(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Property bag

/// Property-bag construction.
///
/// Reads every public readable instance property of the bag into a named
/// argument set, then:
///
/// 1. attempts the strict named match — a bag that exactly matches a
///    constructor's parameter names uses that constructor;
/// 2. otherwise invokes the zero-argument constructor and assigns each
///    (name, value) pair through the target's writable property of the same
///    name, ignoring names with no settable counterpart.
///
/// Fails with [`ConstructError::MemberNotFound`] only when neither path is
/// available.
pub fn construct_from_bag(
    ty: &'static TypeDescriptor,
    source: &dyn Any,
    bag: &'static TypeDescriptor,
) -> Result<Box<dyn Any>, ConstructError> {
    let pairs: Vec<NamedArg> = crate::resolve::list_properties(bag)
        .into_iter()
        .filter(|property| {
            property.visibility() == crate::info::Visibility::Public
                && !property.is_static()
                && property.is_readable()
        })
        .filter_map(|property| {
            property
                .get_value(source)
                .map(|value| (Cow::Borrowed(property.name()), value))
        })
        .collect();

    let names: Vec<&str> = pairs.iter().map(|(name, _)| name.as_ref()).collect();
    if let Some(ctor) = match_named(ty, &names) {
        return invoke_named(ctor, pairs);
    }

    let default_ctor = ty
        .default_constructor()
        .ok_or_else(|| ConstructError::MemberNotFound {
            type_path: ty.type_path(),
            detail: "property-bag construction needs a matching constructor \
                     or a zero-argument constructor"
                .into(),
        })?;

    let mut instance = default_ctor.invoke(ArgBuf::new(Vec::new()))?;
    for (index, (name, value)) in pairs.into_iter().enumerate() {
        let Some((member, _)) = ty.member(&name, MemberKind::Property) else {
            continue;
        };
        if member.is_static() || !member.is_writable() {
            continue;
        }
        if !member.set_value(instance.as_mut(), value) {
            return Err(ConstructError::ArgumentType {
                index,
                expected: member.value_type_name(),
            });
        }
    }
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::info::{MemberInfo, ParamInfo, Visibility};

    #[derive(Default, Debug, PartialEq)]
    struct Widget {
        width: u32,
        height: u32,
        label: String,
    }

    impl Describe for Widget {
        fn descriptor() -> &'static TypeDescriptor {
            static DESC: OnceLock<TypeDescriptor> = OnceLock::new();
            DESC.get_or_init(|| {
                TypeDescriptor::builder::<Widget>("fixtures::Widget")
                    .member(
                        MemberInfo::property::<u32>("width", Visibility::Public)
                            .with_getter(|obj| {
                                obj.downcast_ref::<Widget>()
                                    .map(|w| Box::new(w.width) as Box<dyn Any>)
                            })
                            .with_setter(|obj, value| {
                                let Some(w) = obj.downcast_mut::<Widget>() else {
                                    return false;
                                };
                                match value.downcast::<u32>() {
                                    Ok(value) => {
                                        w.width = *value;
                                        true
                                    }
                                    Err(_) => false,
                                }
                            }),
                    )
                    .member(
                        MemberInfo::property::<String>("label", Visibility::Public).with_setter(
                            |obj, value| {
                                let Some(w) = obj.downcast_mut::<Widget>() else {
                                    return false;
                                };
                                match value.downcast::<String>() {
                                    Ok(value) => {
                                        w.label = *value;
                                        true
                                    }
                                    Err(_) => false,
                                }
                            },
                        ),
                    )
                    .default_constructor()
                    .constructor(ConstructorInfo::new(
                        vec![ParamInfo::new::<u32>("width"), ParamInfo::new::<u32>("height")],
                        |mut args| {
                            let width = args.take::<u32>(0)?;
                            let height = args.take::<u32>(1)?;
                            Ok(Box::new(Widget {
                                width,
                                height,
                                label: "sized".to_string(),
                            }) as Box<dyn Any>)
                        },
                    ))
                    // Two unary `u32` constructors: positionally ambiguous,
                    // distinguishable by name.
                    .constructor(ConstructorInfo::new(
                        vec![ParamInfo::new::<u32>("side")],
                        |mut args| {
                            let side = args.take::<u32>(0)?;
                            Ok(Box::new(Widget {
                                width: side,
                                height: side,
                                label: "square".to_string(),
                            }) as Box<dyn Any>)
                        },
                    ))
                    .constructor(ConstructorInfo::new(
                        vec![ParamInfo::new::<u32>("span")],
                        |mut args| {
                            let span = args.take::<u32>(0)?;
                            Ok(Box::new(Widget {
                                width: span,
                                height: 1,
                                label: "wide".to_string(),
                            }) as Box<dyn Any>)
                        },
                    ))
                    .build()
            })
        }
    }

    /// Bag whose readable properties have no matching constructor.
    struct StyleBag {
        width: u32,
        label: String,
        padding: u8,
    }

    impl Describe for StyleBag {
        fn descriptor() -> &'static TypeDescriptor {
            static DESC: OnceLock<TypeDescriptor> = OnceLock::new();
            DESC.get_or_init(|| {
                TypeDescriptor::builder::<StyleBag>("fixtures::StyleBag")
                    .member(
                        MemberInfo::property::<u32>("width", Visibility::Public).with_getter(
                            |obj| {
                                obj.downcast_ref::<StyleBag>()
                                    .map(|b| Box::new(b.width) as Box<dyn Any>)
                            },
                        ),
                    )
                    .member(
                        MemberInfo::property::<String>("label", Visibility::Public).with_getter(
                            |obj| {
                                obj.downcast_ref::<StyleBag>()
                                    .map(|b| Box::new(b.label.clone()) as Box<dyn Any>)
                            },
                        ),
                    )
                    .member(
                        MemberInfo::property::<u8>("padding", Visibility::Public).with_getter(
                            |obj| {
                                obj.downcast_ref::<StyleBag>()
                                    .map(|b| Box::new(b.padding) as Box<dyn Any>)
                            },
                        ),
                    )
                    .build()
            })
        }
    }

    /// Bag whose readable properties exactly match `Widget::new(width, height)`.
    struct SizeBag {
        width: u32,
        height: u32,
    }

    impl Describe for SizeBag {
        fn descriptor() -> &'static TypeDescriptor {
            static DESC: OnceLock<TypeDescriptor> = OnceLock::new();
            DESC.get_or_init(|| {
                TypeDescriptor::builder::<SizeBag>("fixtures::SizeBag")
                    .member(
                        MemberInfo::property::<u32>("width", Visibility::Public).with_getter(
                            |obj| {
                                obj.downcast_ref::<SizeBag>()
                                    .map(|b| Box::new(b.width) as Box<dyn Any>)
                            },
                        ),
                    )
                    .member(
                        MemberInfo::property::<u32>("height", Visibility::Public).with_getter(
                            |obj| {
                                obj.downcast_ref::<SizeBag>()
                                    .map(|b| Box::new(b.height) as Box<dyn Any>)
                            },
                        ),
                    )
                    .build()
            })
        }
    }

    fn build(args: ConstructArgs<'_>) -> Result<Widget, ConstructError> {
        construct(Widget::descriptor(), args).map(|boxed| *boxed.downcast::<Widget>().unwrap())
    }

    #[test]
    fn positional_zero_args_uses_default_constructor() {
        let widget = build(ConstructArgs::positional(Vec::new())).unwrap();
        assert_eq!(widget, Widget::default());
    }

    #[test]
    fn positional_matches_arity_and_types() {
        let widget = build(ConstructArgs::positional(vec![
            Box::new(4_u32),
            Box::new(3_u32),
        ]))
        .unwrap();
        assert_eq!(widget.width, 4);
        assert_eq!(widget.height, 3);
        assert_eq!(widget.label, "sized");
    }

    #[test]
    fn positional_type_mismatch_is_not_found() {
        let err = build(ConstructArgs::positional(vec![
            Box::new(4_u32),
            Box::new(3_i64),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConstructError::MemberNotFound { .. }));
    }

    #[test]
    fn positional_ambiguity_is_reported_distinctly() {
        let err = build(ConstructArgs::positional(vec![Box::new(5_u32)])).unwrap_err();
        assert!(matches!(err, ConstructError::Ambiguous { count: 2, .. }));
    }

    #[test]
    fn named_matches_exact_parameter_set() {
        // Order of supplied names is irrelevant.
        let widget = build(ConstructArgs::named([
            (Cow::Borrowed("height"), Box::new(9_u32) as Box<dyn Any>),
            (Cow::Borrowed("width"), Box::new(2_u32) as Box<dyn Any>),
        ]))
        .unwrap();
        assert_eq!(widget.width, 2);
        assert_eq!(widget.height, 9);
    }

    #[test]
    fn named_disambiguates_same_arity_constructors() {
        let square = build(ConstructArgs::named([(
            Cow::Borrowed("side"),
            Box::new(5_u32) as Box<dyn Any>,
        )]))
        .unwrap();
        assert_eq!((square.width, square.height), (5, 5));

        let wide = build(ConstructArgs::named([(
            Cow::Borrowed("span"),
            Box::new(5_u32) as Box<dyn Any>,
        )]))
        .unwrap();
        assert_eq!((wide.width, wide.height), (5, 1));
    }

    #[test]
    fn named_is_strict_about_missing_and_extra() {
        let missing = build(ConstructArgs::named([(
            Cow::Borrowed("width"),
            Box::new(2_u32) as Box<dyn Any>,
        )]));
        assert!(matches!(
            missing.unwrap_err(),
            ConstructError::MemberNotFound { .. }
        ));

        let extra = build(ConstructArgs::named([
            (Cow::Borrowed("width"), Box::new(2_u32) as Box<dyn Any>),
            (Cow::Borrowed("height"), Box::new(9_u32) as Box<dyn Any>),
            (Cow::Borrowed("depth"), Box::new(1_u32) as Box<dyn Any>),
        ]));
        assert!(matches!(
            extra.unwrap_err(),
            ConstructError::MemberNotFound { .. }
        ));
    }

    #[test]
    fn named_rejects_duplicate_names() {
        let err = build(ConstructArgs::named([
            (Cow::Borrowed("width"), Box::new(2_u32) as Box<dyn Any>),
            (Cow::Borrowed("width"), Box::new(9_u32) as Box<dyn Any>),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConstructError::InvalidArgument { .. }));
    }

    #[test]
    fn property_bag_falls_back_to_lenient_assignment() {
        let bag = StyleBag {
            width: 7,
            label: "styled".to_string(),
            padding: 2,
        };
        // No constructor takes {width, label, padding}; `padding` has no
        // settable counterpart on Widget and is silently ignored.
        let widget = build(ConstructArgs::property_bag(&bag)).unwrap();
        assert_eq!(widget.width, 7);
        assert_eq!(widget.label, "styled");
        assert_eq!(widget.height, 0);
    }

    #[test]
    fn property_bag_prefers_exact_constructor_match() {
        let bag = SizeBag {
            width: 6,
            height: 4,
        };
        let widget = build(ConstructArgs::property_bag(&bag)).unwrap();
        // Built through `new(width, height)`, not default-plus-assign.
        assert_eq!(widget.label, "sized");
        assert_eq!((widget.width, widget.height), (6, 4));
    }

    #[test]
    fn property_bag_needs_some_constructor() {
        struct Bare;
        impl Describe for Bare {
            fn descriptor() -> &'static TypeDescriptor {
                static DESC: OnceLock<TypeDescriptor> = OnceLock::new();
                DESC.get_or_init(|| TypeDescriptor::builder::<Bare>("fixtures::Bare").build())
            }
        }

        let bag = SizeBag {
            width: 1,
            height: 1,
        };
        let err = construct(Bare::descriptor(), ConstructArgs::property_bag(&bag)).unwrap_err();
        assert!(matches!(err, ConstructError::MemberNotFound { .. }));
    }
}
