// used for timestamps
use chrono::NaiveDateTime;
// used for decimal numbers
use bigdecimal::BigDecimal;

// used for the collection and dictionary shapes values can be parsed into
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
// used to indicate that set and map keys need to be hashable
use std::hash::{BuildHasher, Hash};
// used to recover payloads produced by custom parsers
use std::any::Any;

use crate::descriptor::{EnumDescriptor, PrimitiveKind, TypeDescriptor};
use crate::error::{ParseError, Result};
use crate::value::Value;

/// A Rust type that text can be parsed into.
///
/// `descriptor` names the shape the registry resolves a parser for, and
/// `from_value` converts whatever that parser produced back into `Self`.
pub trait DataType: Sized {
    fn descriptor() -> TypeDescriptor;
    fn from_value(value: Value) -> Result<Self>;
}

/// The error for a parser whose output does not fit the requested type.
pub fn mismatch<T: DataType>(value: &Value) -> ParseError {
    ParseError::argument(format!(
        "The parser produced {}, which does not fit {}",
        value.kind(),
        T::descriptor()
    ))
}

/// Recovers a payload a custom parser wrapped with [`Value::custom`].
pub fn custom_payload<T>(value: Value) -> Result<T>
where
    T: DataType + Clone + Any + Send + Sync,
{
    value
        .downcast_custom::<T>()
        .cloned()
        .ok_or_else(|| mismatch::<T>(&value))
}

// ------------- Primitives --------------
macro_rules! primitive {
    ($t:ty, $kind:ident) => {
        impl DataType for $t {
            fn descriptor() -> TypeDescriptor {
                TypeDescriptor::Primitive(PrimitiveKind::$kind)
            }
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$kind(v) => Ok(v),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

primitive!(bool, Bool);
primitive!(char, Char);
primitive!(String, String);
primitive!(i8, I8);
primitive!(u8, U8);
primitive!(i16, I16);
primitive!(u16, U16);
primitive!(i32, I32);
primitive!(u32, U32);
primitive!(i64, I64);
primitive!(u64, U64);
primitive!(f32, F32);
primitive!(f64, F64);
primitive!(BigDecimal, Decimal);
primitive!(NaiveDateTime, DateTime);

impl<T: DataType> DataType for Option<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::nullable(T::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Empty => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

// ------------- Sequences --------------
fn elements<T: DataType, C: DataType>(value: Value) -> Result<impl Iterator<Item = Result<T>>> {
    match value {
        Value::Array(items) | Value::List(items) => Ok(items.into_iter().map(T::from_value)),
        other => Err(mismatch::<C>(&other)),
    }
}

impl<T: DataType> DataType for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection(T::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        elements::<T, Self>(value)?.collect()
    }
}

impl<T: DataType> DataType for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection(T::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        elements::<T, Self>(value)?.collect()
    }
}

impl<T: DataType + Eq + Hash, S: BuildHasher + Default> DataType for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection(T::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        elements::<T, Self>(value)?.collect()
    }
}

impl<T: DataType + Ord> DataType for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::collection(T::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        elements::<T, Self>(value)?.collect()
    }
}

impl<T: DataType> DataType for Box<[T]> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        elements::<T, Self>(value)?.collect()
    }
}

impl<T: DataType, const N: usize> DataType for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::array(T::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        let items = elements::<T, Self>(value)?.collect::<Result<Vec<T>>>()?;
        let found = items.len();
        items.try_into().map_err(|_| {
            ParseError::argument(format!("Expected {} values for {}, found {}", N, Self::descriptor(), found))
        })
    }
}

// ------------- Pairs and dictionaries --------------
/// A parsed `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyValuePair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K: DataType, V: DataType> DataType for KeyValuePair<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::key_value_pair(K::descriptor(), V::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        let (key, value) = <(K, V)>::from_value(value)?;
        Ok(KeyValuePair { key, value })
    }
}

impl<K: DataType, V: DataType> DataType for (K, V) {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::key_value_pair(K::descriptor(), V::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Pair(key, value) => Ok((K::from_value(*key)?, V::from_value(*value)?)),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

fn entries<K: DataType, V: DataType, M: DataType>(value: Value) -> Result<impl Iterator<Item = Result<(K, V)>>> {
    match value {
        Value::Map(entries) => Ok(entries
            .into_iter()
            .map(|(key, value)| Ok((K::from_value(key)?, V::from_value(value)?)))),
        other => Err(mismatch::<M>(&other)),
    }
}

impl<K, V, S> DataType for HashMap<K, V, S>
where
    K: DataType + Eq + Hash,
    V: DataType,
    S: BuildHasher + Default,
{
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::dictionary(K::descriptor(), V::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        entries::<K, V, Self>(value)?.collect()
    }
}

impl<K: DataType + Ord, V: DataType> DataType for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::dictionary(K::descriptor(), V::descriptor())
    }
    fn from_value(value: Value) -> Result<Self> {
        entries::<K, V, Self>(value)?.collect()
    }
}

// ------------- Enumerations --------------
/// A fieldless enum with declared integral values, usually defined through
/// [`enumeration!`](crate::enumeration).
pub trait Enumeration: Sized + Copy + 'static {
    const DESCRIPTOR: EnumDescriptor;
    fn from_discriminant(discriminant: i64) -> Option<Self>;
}

/// Shared `from_value` for every [`Enumeration`].
pub fn enum_from_value<E: Enumeration + DataType>(value: Value) -> Result<E> {
    match value {
        Value::Enum { type_name, discriminant, member } if type_name == E::DESCRIPTOR.name() => {
            E::from_discriminant(discriminant).ok_or_else(|| ParseError::out_of_range(member, type_name))
        }
        other => Err(mismatch::<E>(&other)),
    }
}

/// Declares a fieldless enum together with its [`Enumeration`] and
/// [`DataType`] impls. Every member needs an explicit integral value.
/// `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq` and `Hash` are derived;
/// further attributes are passed through.
///
/// ```
/// typeparse::enumeration! {
///     #[derive(Default)]
///     pub enum Weekday {
///         #[default]
///         Monday = 1,
///         Tuesday = 2,
///     }
/// }
/// let registry = typeparse::ParserRegistry::new();
/// assert_eq!(registry.parse::<Weekday>("2").unwrap(), Weekday::Tuesday);
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$member_meta:meta])* $member:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(i64)]
        $vis enum $name {
            $( $(#[$member_meta])* $member = $value ),+
        }

        impl $crate::datatype::Enumeration for $name {
            const DESCRIPTOR: $crate::descriptor::EnumDescriptor = $crate::descriptor::EnumDescriptor::new(
                stringify!($name),
                &[ $( (stringify!($member), $value) ),+ ],
            );
            fn from_discriminant(discriminant: i64) -> Option<Self> {
                $( if $name::$member as i64 == discriminant { return Some($name::$member); } )+
                None
            }
        }

        impl $crate::datatype::DataType for $name {
            fn descriptor() -> $crate::descriptor::TypeDescriptor {
                $crate::descriptor::TypeDescriptor::Enum(
                    <$name as $crate::datatype::Enumeration>::DESCRIPTOR,
                )
            }
            fn from_value(value: $crate::value::Value) -> $crate::error::Result<Self> {
                $crate::datatype::enum_from_value::<$name>(value)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::enumeration! {
        #[derive(Default)]
        enum Shade {
            #[default]
            Light = 0,
            Dark = 7,
        }
    }

    #[test]
    fn primitives_take_matching_values_only() {
        assert_eq!(i32::from_value(Value::I32(5)).unwrap(), 5);
        let err = i32::from_value(Value::String("5".into())).unwrap_err();
        assert!(err.to_string().contains("does not fit i32"));
    }

    #[test]
    fn sequences_accept_arrays_and_lists() {
        let items = vec![Value::U8(1), Value::U8(2)];
        assert_eq!(Vec::<u8>::from_value(Value::Array(items.clone())).unwrap(), vec![1, 2]);
        let boxed = Box::<[u8]>::from_value(Value::List(items.clone())).unwrap();
        assert_eq!(&*boxed, &[1, 2]);
        assert_eq!(<[u8; 2]>::from_value(Value::Array(items.clone())).unwrap(), [1, 2]);
        assert!(<[u8; 3]>::from_value(Value::Array(items)).is_err());
    }

    #[test]
    fn options_map_empty_to_none() {
        assert_eq!(Option::<i64>::from_value(Value::Empty).unwrap(), None);
        assert_eq!(Option::<i64>::from_value(Value::I64(3)).unwrap(), Some(3));
        assert!(Option::<i64>::descriptor().is_nullable());
    }

    #[test]
    fn enumerations_describe_their_members() {
        assert_eq!(Shade::DESCRIPTOR.name(), "Shade");
        assert_eq!(Shade::DESCRIPTOR.members(), &[("Light", 0), ("Dark", 7)]);
        assert_eq!(Shade::from_discriminant(7), Some(Shade::Dark));
        assert_eq!(Shade::from_discriminant(3), None);
        assert_eq!(Shade::default(), Shade::Light);
        let value = Value::Enum { type_name: "Shade", member: "Dark", discriminant: 7 };
        assert_eq!(Shade::from_value(value).unwrap(), Shade::Dark);
    }

    #[test]
    fn dictionaries_keep_entry_values() {
        let map = Value::Map(vec![(Value::String("a".into()), Value::I32(1))]);
        let parsed = BTreeMap::<String, i32>::from_value(map).unwrap();
        assert_eq!(parsed.get("a"), Some(&1));
        assert_eq!(
            HashMap::<String, i32>::descriptor().to_string(),
            "Dictionary<String, i32>"
        );
    }
}
