//! Read-only, loggable projection of decoded values.
//!
//! [`Describe`] turns any codec value into a [`Pretty`] tree: enums by their
//! symbolic `Type.Variant` name, identities in base58, arrays as raw
//! sequences. The projection is for display only and cannot be decoded back.
//!
//! Integers above [`MAX_SAFE_INTEGER`] do not fit a JSON number without loss;
//! they become [`Pretty::BigNumber`] holding the exact decimal text instead of
//! failing the projection.

use core::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use solana_address::Address;

/// Largest integer a double-precision consumer represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// A display node.
#[derive(Clone, Debug, PartialEq)]
pub enum Pretty {
    Bool(bool),
    /// An integer that fits [`MAX_SAFE_INTEGER`].
    Number(u64),
    /// An integer too large for a plain number, as decimal text.
    BigNumber(String),
    Float(f64),
    Text(String),
    /// Base58 identity.
    Identity(String),
    /// A field-less enum variant, `Type.Variant`.
    Symbol(String),
    List(Vec<Pretty>),
    Absent,
    /// Named fields in wire order.
    Record(Vec<(&'static str, Pretty)>),
    /// A data-enum variant carrying fields.
    Variant {
        kind: String,
        fields: Vec<(&'static str, Pretty)>,
    },
}

impl Pretty {
    /// Project an integer, switching to [`Pretty::BigNumber`] past the safe range.
    pub fn integer(value: u128) -> Self {
        if value <= MAX_SAFE_INTEGER as u128 {
            Pretty::Number(value as u64)
        } else {
            Pretty::BigNumber(value.to_string())
        }
    }

    /// Look up a field of a [`Pretty::Record`] or [`Pretty::Variant`].
    pub fn field(&self, name: &str) -> Option<&Pretty> {
        match self {
            Pretty::Record(fields) | Pretty::Variant { fields, .. } => {
                fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Render as compact JSON.
    pub fn to_json(&self) -> String {
        // Serializing this tree into a String has no failure path.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Render as indented JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

struct Fields<'a>(&'a [(&'static str, Pretty)]);

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Pretty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Pretty::Bool(b) => serializer.serialize_bool(*b),
            Pretty::Number(n) => serializer.serialize_u64(*n),
            Pretty::BigNumber(s) | Pretty::Text(s) | Pretty::Identity(s) | Pretty::Symbol(s) => {
                serializer.serialize_str(s)
            }
            Pretty::Float(f) => serializer.serialize_f64(*f),
            Pretty::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Pretty::Absent => serializer.serialize_none(),
            Pretty::Record(fields) => Fields(fields).serialize(serializer),
            Pretty::Variant { kind, fields } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(kind, &Fields(fields))?;
                map.end()
            }
        }
    }
}

impl fmt::Display for Pretty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// Values that can be projected into a [`Pretty`] tree.
///
/// Implemented for every leaf codec and generated by `#[derive(Beet)]`.
pub trait Describe {
    fn describe(&self) -> Pretty;
}

macro_rules! describe_integer {
    ($($ty:ty),*) => {
        $(
            impl Describe for $ty {
                #[inline]
                fn describe(&self) -> Pretty {
                    Pretty::integer(*self as u128)
                }
            }
        )*
    };
}

describe_integer!(u8, u16, u32, u64, u128);

impl Describe for f64 {
    fn describe(&self) -> Pretty {
        Pretty::Float(*self)
    }
}

impl Describe for bool {
    fn describe(&self) -> Pretty {
        Pretty::Bool(*self)
    }
}

impl Describe for () {
    fn describe(&self) -> Pretty {
        Pretty::Absent
    }
}

impl Describe for String {
    fn describe(&self) -> Pretty {
        Pretty::Text(self.clone())
    }
}

impl Describe for Address {
    fn describe(&self) -> Pretty {
        Pretty::Identity(bs58::encode(self.as_ref()).into_string())
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self) -> Pretty {
        self.as_ref().map_or(Pretty::Absent, Describe::describe)
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(&self) -> Pretty {
        Pretty::List(self.iter().map(Describe::describe).collect())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self) -> Pretty {
        Pretty::List(self.iter().map(Describe::describe).collect())
    }
}
