//! The built-in parsers.
//!
//! Leaf parsers turn one token into one value; composite parsers split their
//! input and hand each piece back to the registry for the nested type.

mod collection;
mod dictionary;
mod enumeration;
mod pair;
mod primitive;
pub mod range;

pub use collection::CollectionParser;
pub use dictionary::DictionaryParser;
pub use enumeration::EnumParser;
pub use pair::KeyValuePairParser;
pub use primitive::PrimitiveValueParser;

use crate::descriptor::TypeDescriptor;
use crate::error::{ParseError, Result};

/// Shared handling of absent input: nullable targets get an empty value,
/// everything else is an argument error.
pub(crate) fn require_text<'t>(text: Option<&'t str>, target: &TypeDescriptor) -> Result<Option<&'t str>> {
    match text {
        Some(text) => Ok(Some(text)),
        None if target.is_nullable() => Ok(None),
        None => Err(ParseError::argument(format!("Cannot parse null value as type {}", target))),
    }
}
