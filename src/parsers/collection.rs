use tracing::trace;

use crate::descriptor::TypeDescriptor;
use crate::error::{ParseError, Result};
use crate::parsers::{range, require_text};
use crate::registry::{Parser, ParserRegistry, Probe};
use crate::value::Value;

/// Parses delimiter separated values as an array or an appendable collection
/// of any element type the registry can resolve. Numeric elements may be
/// given as ranges (`1,2-5,6`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionParser;

impl CollectionParser {
    fn element_of(target: &TypeDescriptor) -> Option<(&TypeDescriptor, bool)> {
        match target {
            TypeDescriptor::Array(element) => Some((element, true)),
            TypeDescriptor::Collection(element) => Some((element, false)),
            _ => None,
        }
    }

    /// Parses every token in order, expanding ranges in place.
    fn parse_elements(
        tokens: &[String],
        element: &TypeDescriptor,
        registry: &ParserRegistry,
    ) -> Result<Vec<Value>> {
        // ranges may grow the result beyond the token count
        let mut values = Vec::with_capacity(tokens.len());
        for token in tokens {
            if range::is_range(element, token) {
                values.extend(range::expand(token, element, registry)?);
            } else {
                values.push(registry.parse_value(element, Some(token.as_str()))?);
            }
        }
        Ok(values)
    }
}

impl Parser for CollectionParser {
    fn can_parse(&self, probe: &Probe<'_>) -> bool {
        Self::element_of(probe.search().strip_nullable())
            .is_some_and(|(element, _)| probe.registry().resolve(element).is_some())
    }

    fn parse(&self, text: Option<&str>, target: &TypeDescriptor, registry: &ParserRegistry) -> Result<Value> {
        let Some((element, is_array)) = Self::element_of(target.root()) else {
            return Err(ParseError::argument(format!("Cannot parse collection for type {}", target)));
        };
        let Some(text) = require_text(text, target)? else {
            return Ok(Value::Empty);
        };

        let tokens = registry.splitters().collection.split(text);
        trace!(target = %target, tokens = tokens.len(), "parsing collection");
        let values = Self::parse_elements(&tokens, element, registry).map_err(|e| {
            ParseError::argument_caused_by(
                format!("Values \"{}\" could not be parsed as a {}", text, target),
                e,
            )
        })?;

        Ok(if is_array { Value::Array(values) } else { Value::List(values) })
    }
}
