//! Typeparse – type-directed parsing of text into typed values.
//!
//! Given a target type and a string, a [`ParserRegistry`] finds a parser able
//! to produce that type and runs it. Parsers are tried in registration order
//! and the first one that accepts a type is bound to it for the lifetime of
//! the registry:
//! * Primitives: booleans, characters, strings, every integer width, `f32`,
//!   `f64`, arbitrary precision decimals and date-times.
//! * Enumerations, by member name or by declared integral value.
//! * Arrays and collections of anything resolvable, split on `,`, with numeric
//!   ranges expanded in place (`"1,2-5,6"`).
//! * Key-value pairs split on `=` and dictionaries split on `;`.
//!
//! ## Modules
//! * [`registry`] – The [`registry::Parser`] trait, the registry and its
//!   resolution cache.
//! * [`parsers`] – The built-in parsers.
//! * [`descriptor`] – [`descriptor::TypeDescriptor`], the structural type every
//!   parser capability check operates over.
//! * [`datatype`] – The [`datatype::DataType`] trait connecting Rust types to
//!   descriptors, plus the [`enumeration!`] macro.
//! * [`value`] – The runtime [`value::Value`] parsers produce.
//! * [`splitter`] – Quote-aware splitting on a single delimiter.
//! * [`settings`] – Delimiters and extra parsers loaded through `config`.
//!
//! ## Custom Parsers
//! Anything implementing [`registry::Parser`] can be registered. Because the
//! first accepting parser wins, a custom parser never overrides a built-in for
//! a type the built-in already handles. Derived types
//! ([`descriptor::TypeDescriptor::Derived`]) with no parser of their own fall
//! back to the parser of their base type.
//!
//! ## Quick Start
//! ```
//! use std::collections::HashMap;
//! use typeparse::ParserRegistry;
//!
//! let registry = ParserRegistry::new();
//! assert_eq!(registry.parse::<Vec<i32>>("1,2-5,6").unwrap(), vec![1, 2, 3, 4, 5, 6]);
//! let lists: HashMap<String, Box<[i32]>> = registry.parse("a=1,2;b=3").unwrap();
//! assert_eq!(&*lists["a"], &[1, 2]);
//! assert_eq!(registry.safe_parse_or::<i32>("not a number", 100), 100);
//! ```

pub mod datatype;
pub mod descriptor;
pub mod error;
pub mod parsers;
pub mod registry;
pub mod settings;
pub mod splitter;
pub mod value;

pub use datatype::{DataType, Enumeration, KeyValuePair};
pub use descriptor::{EnumDescriptor, PrimitiveKind, TypeDescriptor};
pub use error::{ParseError, Result};
pub use registry::{Parser, ParserFactories, ParserRegistry, Probe, TypedParser};
pub use settings::Settings;
pub use splitter::Delimiters;
pub use value::Value;
