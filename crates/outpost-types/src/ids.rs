//! Type-safe numeric identifier wrappers.
//!
//! The item and recipe catalogs are keyed by small integers that come from
//! external data files (e.g. item 1002 is corn, recipe 2003 produces a
//! meal). Wrapping them in newtypes prevents an item id from being passed
//! where a recipe id is expected. Zero is reserved as the "no item / no
//! task" sentinel, matching the wire format.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// The reserved "none" sentinel (id 0).
            pub const NONE: Self = Self(0);

            /// Whether this id refers to an actual catalog entry.
            pub const fn is_some(self) -> bool {
                self.0 != 0
            }

            /// Return the raw numeric value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Identifier of an item definition in the item catalog.
    ItemId
}

define_id! {
    /// Identifier of a recipe (task definition) in the task catalog.
    TaskId
}
