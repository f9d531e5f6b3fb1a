//! # Schema Descriptors
//!
//! Every screen of the console works on a *kind* of record: a participant, an asset or a
//! transaction. Instead of writing one controller per kind, each kind is described once by
//! a small descriptor and the generic machinery ([`Record`](crate::framework::Record),
//! [`RecordForm`](crate::framework::RecordForm), the controllers) is instantiated with it.
//!
//! A descriptor is a unit struct implementing [`Schema`], plus a closed enumeration of
//! field tokens implementing [`FieldToken`]. Fields are always addressed through their
//! token, never by looking a name up at runtime, so a `HotelField` can't be used to read a
//! `Room` record.
//!
//! Use the [`schema!`](crate::schema) macro to declare both at once:
//!
//! ```rust
//! use hotel_console::framework::{FieldToken, FieldType, Schema};
//!
//! const NS: &str = "org.example";
//!
//! hotel_console::schema! {
//!     /// A guest badge.
//!     pub struct Badge in NS {
//!         Code => "code": FieldType::Text,
//!         Level => "level": FieldType::Number,
//!     }
//! }
//!
//! assert_eq!(Badge::class_name(), "org.example.Badge");
//! assert_eq!(BadgeField::Level.name(), "level");
//! assert_eq!(Badge::table_columns(), vec!["code", "level", "Action"]);
//! ```

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Header of the column that views append after the declared fields.
pub const ACTION_COLUMN: &str = "Action";

/// The value domain of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    /// One of a fixed set of symbols.
    Enum(&'static [&'static str]),
    /// The primary key of a record of the named kind.
    Reference(&'static str),
    /// A nested object with the listed members, e.g. an address.
    Concept(&'static [&'static str]),
}

/// A field token: one variant per declared field of a schema.
pub trait FieldToken: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    /// Every token, in declaration order.
    const ALL: &'static [Self];

    /// Wire name of the field, as the backend serializes it.
    fn name(self) -> &'static str;

    fn field_type(self) -> FieldType;

    /// Position of the field in declaration order.
    fn index(self) -> usize;

    /// Whether the form marks the field as required. Every field is unless overridden.
    fn required(self) -> bool {
        true
    }

    /// Resolves a wire name back to its token.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// Descriptor of a record kind: its type identifier and its declared fields.
pub trait Schema: Send + Sync + 'static {
    /// Namespace of the fully qualified type name (`$class`).
    const NAMESPACE: &'static str;

    /// Short type name; also the backend collection path.
    const NAME: &'static str;

    type Field: FieldToken;

    /// Fully qualified type name sent as `$class`.
    fn class_name() -> String {
        format!("{}.{}", Self::NAMESPACE, Self::NAME)
    }

    /// Backend path of the collection, e.g. `/Hotel`.
    fn path() -> String {
        format!("/{}", Self::NAME)
    }

    /// Table header for views: one column per field, then the action column.
    fn table_columns() -> Vec<&'static str> {
        Self::Field::ALL
            .iter()
            .map(|field| field.name())
            .chain(std::iter::once(ACTION_COLUMN))
            .collect()
    }
}

/// A persisted kind managed through a CRUD screen. Exactly one field is the primary key.
pub trait Resource: Schema {
    const KEY: Self::Field;
}

/// A one-shot ledger operation. It has no caller-supplied key.
pub trait Transaction: Schema {}

/// Declares a schema marker struct and its field-token enum.
///
/// For `pub struct Hotel in NS { .. }` this generates the unit struct `Hotel`, the enum
/// `HotelField`, and their [`Schema`]/[`FieldToken`] implementations. `FieldType` must be
/// in scope at the call site.
#[macro_export]
macro_rules! schema {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident in $namespace:path {
            $( $variant:ident => $wire:literal : $ty:expr ),+ $(,)?
        }
    ) => {
        $crate::__paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $name;

            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            $vis enum [<$name Field>] {
                $( $variant ),+
            }

            impl $crate::framework::FieldToken for [<$name Field>] {
                const ALL: &'static [Self] = &[$( Self::$variant ),+];

                fn name(self) -> &'static str {
                    match self {
                        $( Self::$variant => $wire ),+
                    }
                }

                fn field_type(self) -> $crate::framework::FieldType {
                    match self {
                        $( Self::$variant => $ty ),+
                    }
                }

                fn index(self) -> usize {
                    self as usize
                }
            }

            impl ::std::fmt::Display for [<$name Field>] {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    f.write_str($crate::framework::FieldToken::name(*self))
                }
            }

            impl $crate::framework::Schema for $name {
                const NAMESPACE: &'static str = $namespace;
                const NAME: &'static str = stringify!($name);
                type Field = [<$name Field>];
            }
        }
    };
}
