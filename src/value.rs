// used for timestamps
use chrono::NaiveDateTime;
// used for decimal numbers
use bigdecimal::BigDecimal;

// used for payloads produced by custom parsers
use std::any::Any;
use std::sync::Arc;
// used to print out readable forms of a value
use std::fmt;

use crate::descriptor::PrimitiveKind;

/// The runtime result of parsing text against a type descriptor.
#[derive(Clone)]
pub enum Value {
    /// An absent value for a nullable target.
    Empty,
    Bool(bool),
    Char(char),
    String(String),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Decimal(BigDecimal),
    DateTime(NaiveDateTime),
    Enum { type_name: &'static str, member: &'static str, discriminant: i64 },
    Array(Vec<Value>),
    List(Vec<Value>),
    /// Dictionary entries in insertion order, keys unique.
    Map(Vec<(Value, Value)>),
    Pair(Box<Value>, Box<Value>),
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
    pub fn custom<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Custom(Arc::new(payload))
    }

    pub fn downcast_custom<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Value::Custom(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::String(_) => "String",
            Value::I8(_) => "i8",
            Value::U8(_) => "u8",
            Value::I16(_) => "i16",
            Value::U16(_) => "u16",
            Value::I32(_) => "i32",
            Value::U32(_) => "u32",
            Value::I64(_) => "i64",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Decimal(_) => "Decimal",
            Value::DateTime(_) => "DateTime",
            Value::Enum { .. } => "enum",
            Value::Array(_) => "array",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Pair(_, _) => "pair",
            Value::Custom(_) => "custom",
        }
    }

    /// Widens a numeric value to f64. Decimal values go through their
    /// textual form so that the conversion never panics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::I8(v) => Some(*v as f64),
            Value::U8(v) => Some(*v as f64),
            Value::I16(v) => Some(*v as f64),
            Value::U16(v) => Some(*v as f64),
            Value::I32(v) => Some(*v as f64),
            Value::U32(v) => Some(*v as f64),
            Value::I64(v) => Some(*v as f64),
            Value::U64(v) => Some(*v as f64),
            Value::F32(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            Value::Decimal(v) => v.to_string().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Narrows an f64 to the given numeric kind. Integral kinds round half to
    /// even and refuse anything outside their range.
    pub fn from_f64(kind: PrimitiveKind, number: f64) -> Option<Value> {
        macro_rules! integral {
            ($variant:ident, $t:ty) => {{
                let rounded = number.round_ties_even();
                // MAX as f64 rounds up to a power of two for 64-bit types, so the upper bound is exclusive
                if rounded.is_finite() && rounded >= <$t>::MIN as f64 && rounded < <$t>::MAX as f64 + 1.0 {
                    Some(Value::$variant(rounded as $t))
                } else {
                    None
                }
            }};
        }
        match kind {
            PrimitiveKind::I8 => integral!(I8, i8),
            PrimitiveKind::U8 => integral!(U8, u8),
            PrimitiveKind::I16 => integral!(I16, i16),
            PrimitiveKind::U16 => integral!(U16, u16),
            PrimitiveKind::I32 => integral!(I32, i32),
            PrimitiveKind::U32 => integral!(U32, u32),
            PrimitiveKind::I64 => integral!(I64, i64),
            PrimitiveKind::U64 => integral!(U64, u64),
            PrimitiveKind::F32 => Some(Value::F32(number as f32)),
            PrimitiveKind::F64 => Some(Value::F64(number)),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (
                Value::Enum { type_name: ta, discriminant: da, .. },
                Value::Enum { type_name: tb, discriminant: db, .. },
            ) => ta == tb && da == db,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Pair(ka, va), Value::Pair(kb, vb)) => ka == kb && va == vb,
            // custom payloads carry no equality of their own
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Pair(key, value) => f.debug_tuple("Pair").field(key).field(value).finish(),
            Value::Custom(_) => write!(f, "Custom(..)"),
            Value::Empty => write!(f, "Empty"),
            scalar => write!(f, "{}({})", scalar.kind(), scalar),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Empty => write!(f, ""),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
            Value::Enum { member, .. } => write!(f, "{}", member),
            Value::Array(items) | Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
            Value::Map(entries) => {
                let parts: Vec<String> = entries.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{}", parts.join(";"))
            }
            Value::Pair(key, value) => write!(f, "{}={}", key, value),
            Value::Custom(_) => write!(f, "<custom>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_rounds_half_to_even() {
        assert_eq!(Value::from_f64(PrimitiveKind::I32, 2.5), Some(Value::I32(2)));
        assert_eq!(Value::from_f64(PrimitiveKind::I32, 3.5), Some(Value::I32(4)));
        assert_eq!(Value::from_f64(PrimitiveKind::I32, 3.7), Some(Value::I32(4)));
    }

    #[test]
    fn narrowing_refuses_out_of_range() {
        assert_eq!(Value::from_f64(PrimitiveKind::U8, 256.0), None);
        assert_eq!(Value::from_f64(PrimitiveKind::U8, -1.0), None);
        assert_eq!(Value::from_f64(PrimitiveKind::I64, f64::NAN), None);
        assert_eq!(Value::from_f64(PrimitiveKind::I64, 9_223_372_036_854_775_808.0), None);
        assert_eq!(Value::from_f64(PrimitiveKind::U64, 18_446_744_073_709_551_616.0), None);
        assert_eq!(Value::from_f64(PrimitiveKind::I64, -9_223_372_036_854_775_808.0), Some(Value::I64(i64::MIN)));
        assert_eq!(Value::from_f64(PrimitiveKind::U8, 255.0), Some(Value::U8(255)));
        assert_eq!(Value::from_f64(PrimitiveKind::F64, 1.25), Some(Value::F64(1.25)));
    }

    #[test]
    fn display_joins_with_default_delimiters() {
        let map = Value::Map(vec![
            (Value::String("a".into()), Value::List(vec![Value::I32(1), Value::I32(2)])),
            (Value::String("b".into()), Value::List(vec![Value::I32(3)])),
        ]);
        assert_eq!(map.to_string(), "a=1,2;b=3");
    }

    #[test]
    fn custom_payloads_downcast() {
        let value = Value::custom((3u8, 4u8));
        assert_eq!(value.downcast_custom::<(u8, u8)>(), Some(&(3, 4)));
        assert_eq!(value.downcast_custom::<String>(), None);
        assert_eq!(value.kind(), "custom");
    }
}
