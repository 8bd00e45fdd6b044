//! Structural type descriptors.
//!
//! A [`TypeDescriptor`] is the unit the registry and every parser capability
//! check operate over. Rust types produce theirs through
//! [`crate::datatype::DataType::descriptor`]; custom shapes can be built by hand.

// used to print out readable forms of a descriptor
use std::fmt;

/// The fixed set of primitive kinds the built-in parsers handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Bool,
    Char,
    String,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Decimal,
    DateTime,
}

impl PrimitiveKind {
    /// Every kind, in the order the registry installs their parsers.
    pub const ALL: [PrimitiveKind; 15] = [
        PrimitiveKind::Bool,
        PrimitiveKind::DateTime,
        PrimitiveKind::String,
        PrimitiveKind::Char,
        PrimitiveKind::U8,
        PrimitiveKind::I8,
        PrimitiveKind::I16,
        PrimitiveKind::U16,
        PrimitiveKind::I32,
        PrimitiveKind::U32,
        PrimitiveKind::I64,
        PrimitiveKind::U64,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
        PrimitiveKind::Decimal,
    ];

    /// Boolean, character, string and date-time are not numeric.
    pub fn is_numeric(&self) -> bool {
        !matches!(
            self,
            PrimitiveKind::Bool | PrimitiveKind::Char | PrimitiveKind::String | PrimitiveKind::DateTime
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::String => "String",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
            PrimitiveKind::Decimal => "Decimal",
            PrimitiveKind::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The declared members of an enumeration: names paired with their
/// underlying integral values, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumDescriptor {
    name: &'static str,
    members: &'static [(&'static str, i64)],
}

impl EnumDescriptor {
    pub const fn new(name: &'static str, members: &'static [(&'static str, i64)]) -> Self {
        Self { name, members }
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn members(&self) -> &'static [(&'static str, i64)] {
        self.members
    }
    pub fn by_name(&self, name: &str) -> Option<(&'static str, i64)> {
        self.members.iter().copied().find(|(member, _)| *member == name)
    }
    pub fn by_discriminant(&self, discriminant: i64) -> Option<(&'static str, i64)> {
        self.members.iter().copied().find(|(_, value)| *value == discriminant)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Enum(EnumDescriptor),
    /// A value that may be absent.
    Nullable(Box<TypeDescriptor>),
    /// A fixed-length sequence, built by position.
    Array(Box<TypeDescriptor>),
    /// An appendable sequence with a single element type.
    Collection(Box<TypeDescriptor>),
    Dictionary(Box<TypeDescriptor>, Box<TypeDescriptor>),
    KeyValuePair(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// A named type whose base drives the ancestry walk during resolution.
    Derived { name: &'static str, base: Box<TypeDescriptor> },
    /// An opaque named type that only a custom parser knows about.
    Custom(&'static str),
}

impl TypeDescriptor {
    pub fn nullable(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Nullable(Box::new(inner))
    }
    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(element))
    }
    pub fn collection(element: TypeDescriptor) -> Self {
        TypeDescriptor::Collection(Box::new(element))
    }
    pub fn dictionary(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Dictionary(Box::new(key), Box::new(value))
    }
    pub fn key_value_pair(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::KeyValuePair(Box::new(key), Box::new(value))
    }
    pub fn derived(name: &'static str, base: TypeDescriptor) -> Self {
        TypeDescriptor::Derived { name, base: Box::new(base) }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, TypeDescriptor::Nullable(_))
    }

    /// Strips a single nullable wrapper, if there is one.
    pub fn strip_nullable(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Strips nullable wrappers and derived names down to the structural shape
    /// parsers work with.
    pub fn root(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Nullable(inner) => inner.root(),
            TypeDescriptor::Derived { base, .. } => base.root(),
            other => other,
        }
    }

    /// The next step of the ancestry walk. A nullable derived type has the
    /// nullable form of its base as its own base.
    pub fn base(&self) -> Option<TypeDescriptor> {
        match self {
            TypeDescriptor::Derived { base, .. } => Some(base.as_ref().clone()),
            TypeDescriptor::Nullable(inner) => inner.base().map(TypeDescriptor::nullable),
            _ => None,
        }
    }

    /// The descriptor itself followed by each of its ancestors.
    pub fn ancestry(&self) -> Vec<TypeDescriptor> {
        let mut lineage = vec![self.clone()];
        while let Some(base) = lineage.last().and_then(TypeDescriptor::base) {
            lineage.push(base);
        }
        lineage
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.root() {
            TypeDescriptor::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Numeric primitives, seen through nullable and derived wrappers.
    pub fn is_numeric(&self) -> bool {
        self.primitive_kind().is_some_and(|kind| kind.is_numeric())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => write!(f, "{}", kind),
            TypeDescriptor::Enum(e) => write!(f, "{}", e.name()),
            TypeDescriptor::Nullable(inner) => write!(f, "Option<{}>", inner),
            TypeDescriptor::Array(element) => write!(f, "[{}]", element),
            TypeDescriptor::Collection(element) => write!(f, "Collection<{}>", element),
            TypeDescriptor::Dictionary(key, value) => write!(f, "Dictionary<{}, {}>", key, value),
            TypeDescriptor::KeyValuePair(key, value) => write!(f, "KeyValuePair<{}, {}>", key, value),
            TypeDescriptor::Derived { name, .. } => write!(f, "{}", name),
            TypeDescriptor::Custom(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOR: EnumDescriptor = EnumDescriptor::new("Color", &[("Red", 1), ("Blue", 4)]);

    #[test]
    fn ancestry_walks_derived_bases() {
        let port = TypeDescriptor::derived("Port", TypeDescriptor::Primitive(PrimitiveKind::U16));
        let tcp_port = TypeDescriptor::derived("TcpPort", port.clone());
        assert_eq!(
            tcp_port.ancestry(),
            vec![tcp_port.clone(), port, TypeDescriptor::Primitive(PrimitiveKind::U16)]
        );
        assert_eq!(tcp_port.primitive_kind(), Some(PrimitiveKind::U16));
        assert!(tcp_port.is_numeric());
    }

    #[test]
    fn nullable_derived_keeps_its_wrapper_while_walking() {
        let port = TypeDescriptor::derived("Port", TypeDescriptor::Primitive(PrimitiveKind::U16));
        let maybe_port = TypeDescriptor::nullable(port);
        assert_eq!(
            maybe_port.base(),
            Some(TypeDescriptor::nullable(TypeDescriptor::Primitive(PrimitiveKind::U16)))
        );
    }

    #[test]
    fn enum_member_lookup() {
        assert_eq!(COLOR.by_name("Blue"), Some(("Blue", 4)));
        assert_eq!(COLOR.by_discriminant(1), Some(("Red", 1)));
        assert_eq!(COLOR.by_name("blue"), None);
    }

    #[test]
    fn numeric_kinds_exclude_text_and_time() {
        assert!(PrimitiveKind::Decimal.is_numeric());
        assert!(PrimitiveKind::U8.is_numeric());
        assert!(!PrimitiveKind::Bool.is_numeric());
        assert!(!PrimitiveKind::DateTime.is_numeric());
        assert_eq!(
            TypeDescriptor::dictionary(
                TypeDescriptor::Primitive(PrimitiveKind::String),
                TypeDescriptor::array(TypeDescriptor::Primitive(PrimitiveKind::I32))
            )
            .to_string(),
            "Dictionary<String, [i32]>"
        );
    }
}
