use crate::descriptor::TypeDescriptor;
use crate::error::{ParseError, Result};
use crate::parsers::require_text;
use crate::registry::{Parser, ParserRegistry, Probe};
use crate::value::Value;

/// Parses `key=value` into a pair, delegating each side to the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyValuePairParser;

impl KeyValuePairParser {
    fn parts(target: &TypeDescriptor) -> Option<(&TypeDescriptor, &TypeDescriptor)> {
        match target {
            TypeDescriptor::KeyValuePair(key, value) => Some((key, value)),
            _ => None,
        }
    }
}

impl Parser for KeyValuePairParser {
    fn can_parse(&self, probe: &Probe<'_>) -> bool {
        Self::parts(probe.search().strip_nullable()).is_some_and(|(key, value)| {
            probe.registry().resolve(key).is_some() && probe.registry().resolve(value).is_some()
        })
    }

    fn parse(&self, text: Option<&str>, target: &TypeDescriptor, registry: &ParserRegistry) -> Result<Value> {
        let Some((key_type, value_type)) = Self::parts(target.root()) else {
            return Err(ParseError::argument(format!("Cannot parse key value pair for type {}", target)));
        };
        let Some(text) = require_text(text, target)? else {
            return Ok(Value::Empty);
        };

        let delimiter = registry.splitters().key_value.delimiter();
        let tokens = registry.splitters().key_value.split(text);
        let [key, value] = tokens.as_slice() else {
            return Err(ParseError::argument(format!(
                "The string, \"{}\" could not be split into a key and a value using the delimiter '{}'",
                text, delimiter
            )));
        };

        let key = registry.parse_value(key_type, Some(key.as_str())).map_err(|e| {
            ParseError::argument_caused_by(
                format!("The key of \"{}\" could not be parsed as {}", text, key_type),
                e,
            )
        })?;
        let value = registry.parse_value(value_type, Some(value.as_str())).map_err(|e| {
            ParseError::argument_caused_by(
                format!("The value of \"{}\" could not be parsed as {}", text, value_type),
                e,
            )
        })?;
        Ok(Value::Pair(Box::new(key), Box::new(value)))
    }
}
