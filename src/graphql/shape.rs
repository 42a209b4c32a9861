//! Static result shapes.
//!
//! A shape is an ordered list of [`Field`] descriptors attached to a result
//! type. The same wire names drive both the generated selection set and the
//! serde mapping used when decoding, so the two can never drift apart.
//! Declare shapes with [`graphql_shape!`](crate::graphql_shape).

use serde::de::DeserializeOwned;

/// A named output field of a result shape.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Rust-side field name.
    pub name: &'static str,
    /// Name of the field in the GraphQL schema. Untagged fields are left out of queries.
    pub wire: Option<&'static str>,
    /// Nested selection for object-typed fields.
    pub selection: Option<fn() -> &'static [Field]>,
}

impl Field {
    pub const fn tagged(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            wire: Some(wire),
            selection: None,
        }
    }

    pub const fn nested(
        name: &'static str,
        wire: &'static str,
        selection: fn() -> &'static [Field],
    ) -> Self {
        Self {
            name,
            wire: Some(wire),
            selection: Some(selection),
        }
    }

    pub const fn untagged(name: &'static str) -> Self {
        Self {
            name,
            wire: None,
            selection: None,
        }
    }

    /// Wire name if the field takes part in the selection set.
    pub fn selected_wire(&self) -> Option<&'static str> {
        self.wire.filter(|w| !w.is_empty())
    }
}

/// A result type whose fields are described statically.
pub trait Shape: DeserializeOwned {
    fn fields() -> &'static [Field];
}

/// Returns true if `name` is a valid GraphQL name (`/[_A-Za-z][_0-9A-Za-z]*/`).
pub fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {},
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Declares a result struct together with its [`Shape`] implementation.
///
/// Each field is one of:
/// - `pub name: Type => "wireName"`, a selected scalar field
/// - `pub name: Type => "wireName" { NestedShape }`, a selected object field
/// - `pub name: Type`, a local-only field, never queried and defaulted when absent
///
/// ```ignore
/// graphql_shape! {
///     pub struct TokenData {
///         pub id: String => "id",
///         pub derived_eth: String => "derivedETH",
///     }
/// }
/// ```
#[macro_export]
macro_rules! graphql_shape {
    (@munch
        meta [$($meta:tt)*] vis [$svis:vis] name [$sname:ident]
        fields [$($fields:tt)*] descs [$($descs:tt)*]
        rest [$(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty => $wire:tt { $nested:ty } $(, $($rest:tt)*)?]
    ) => {
        $crate::graphql_shape! { @munch
            meta [$($meta)*] vis [$svis] name [$sname]
            fields [$($fields)* $(#[$fmeta])* #[serde(rename = $wire)] $fvis $field: $ty,]
            descs [$($descs)* $crate::graphql::shape::Field::nested(
                stringify!($field),
                $wire,
                <$nested as $crate::graphql::shape::Shape>::fields,
            ),]
            rest [$($($rest)*)?]
        }
    };
    (@munch
        meta [$($meta:tt)*] vis [$svis:vis] name [$sname:ident]
        fields [$($fields:tt)*] descs [$($descs:tt)*]
        rest [$(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty => $wire:tt $(, $($rest:tt)*)?]
    ) => {
        $crate::graphql_shape! { @munch
            meta [$($meta)*] vis [$svis] name [$sname]
            fields [$($fields)* $(#[$fmeta])* #[serde(rename = $wire)] $fvis $field: $ty,]
            descs [$($descs)* $crate::graphql::shape::Field::tagged(stringify!($field), $wire),]
            rest [$($($rest)*)?]
        }
    };
    (@munch
        meta [$($meta:tt)*] vis [$svis:vis] name [$sname:ident]
        fields [$($fields:tt)*] descs [$($descs:tt)*]
        rest [$(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::graphql_shape! { @munch
            meta [$($meta)*] vis [$svis] name [$sname]
            fields [$($fields)* $(#[$fmeta])* #[serde(default)] $fvis $field: $ty,]
            descs [$($descs)* $crate::graphql::shape::Field::untagged(stringify!($field)),]
            rest [$($($rest)*)?]
        }
    };
    (@munch
        meta [$($meta:tt)*] vis [$svis:vis] name [$sname:ident]
        fields [$($fields:tt)*] descs [$($descs:tt)*]
        rest []
    ) => {
        $($meta)*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $svis struct $sname {
            $($fields)*
        }

        impl $crate::graphql::shape::Shape for $sname {
            fn fields() -> &'static [$crate::graphql::shape::Field] {
                const FIELDS: &[$crate::graphql::shape::Field] = &[$($descs)*];
                FIELDS
            }
        }
    };
    (
        $(#[$meta:meta])*
        $svis:vis struct $sname:ident {
            $($body:tt)*
        }
    ) => {
        $crate::graphql_shape! { @munch
            meta [$(#[$meta])*] vis [$svis] name [$sname]
            fields [] descs []
            rest [$($body)*]
        }
    };
}
