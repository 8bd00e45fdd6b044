use tracing::{trace, warn};

use crate::descriptor::TypeDescriptor;
use crate::error::{ParseError, Result};
use crate::parsers::require_text;
use crate::registry::{Parser, ParserRegistry, Probe};
use crate::value::Value;

/// Parses `k1=v1;k2=v2` into an ordered dictionary. Each entry goes through
/// whichever parser the registry binds to the matching key-value pair type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryParser;

impl DictionaryParser {
    fn entry_type(target: &TypeDescriptor) -> Option<TypeDescriptor> {
        match target {
            TypeDescriptor::Dictionary(key, value) => Some(TypeDescriptor::key_value_pair(
                key.as_ref().clone(),
                value.as_ref().clone(),
            )),
            _ => None,
        }
    }

    /// Repeated keys are found by a linear scan of the entries so far, so
    /// building a dictionary is quadratic in its entry count. Keys compare by
    /// value equality, so `1.0` and `1.00` are one decimal key.
    fn parse_entries(
        tokens: &[String],
        entry_type: &TypeDescriptor,
        registry: &ParserRegistry,
    ) -> Result<Vec<(Value, Value)>> {
        let mut entries: Vec<(Value, Value)> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let Value::Pair(key, value) = registry.parse_value(entry_type, Some(token.as_str()))? else {
                return Err(ParseError::argument(format!(
                    "The entry \"{}\" did not parse as a key value pair",
                    token
                )));
            };
            // a repeated key keeps its first position and takes the last value
            match entries.iter_mut().find(|(existing, _)| *existing == *key) {
                Some(entry) => {
                    warn!(key = %key, "duplicate dictionary key, keeping the last value");
                    entry.1 = *value;
                }
                None => entries.push((*key, *value)),
            }
        }
        Ok(entries)
    }
}

impl Parser for DictionaryParser {
    fn can_parse(&self, probe: &Probe<'_>) -> bool {
        Self::entry_type(probe.search().strip_nullable())
            .is_some_and(|entry| probe.registry().resolve(&entry).is_some())
    }

    fn parse(&self, text: Option<&str>, target: &TypeDescriptor, registry: &ParserRegistry) -> Result<Value> {
        let Some(entry_type) = Self::entry_type(target.root()) else {
            return Err(ParseError::argument(format!("Cannot parse dictionary for type {}", target)));
        };
        let Some(text) = require_text(text, target)? else {
            return Ok(Value::Empty);
        };

        let tokens = registry.splitters().dictionary.split(text);
        trace!(target = %target, entries = tokens.len(), "parsing dictionary");
        let entries = Self::parse_entries(&tokens, &entry_type, registry).map_err(|e| {
            ParseError::argument_caused_by(
                format!("The string \"{}\" could not be parsed as a {}", text, target),
                e,
            )
        })?;
        Ok(Value::Map(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PrimitiveKind;

    fn string() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::String)
    }

    fn int() -> TypeDescriptor {
        TypeDescriptor::Primitive(PrimitiveKind::I32)
    }

    #[test]
    fn entries_keep_input_order() {
        let registry = ParserRegistry::new();
        let target = TypeDescriptor::dictionary(string(), int());
        let parsed = DictionaryParser.parse(Some("b=2;a=1"), &target, &registry).unwrap();
        assert_eq!(
            parsed,
            Value::Map(vec![
                (Value::String("b".into()), Value::I32(2)),
                (Value::String("a".into()), Value::I32(1)),
            ])
        );
    }

    #[test]
    fn values_can_be_lists_with_ranges() {
        let registry = ParserRegistry::new();
        let target = TypeDescriptor::dictionary(string(), TypeDescriptor::collection(int()));
        let Value::Map(entries) =
            DictionaryParser.parse(Some("list One=1,2,3-5;listTwo=1,2,3"), &target, &registry).unwrap()
        else {
            panic!("expected a map")
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, Value::String("list One".into()));
        assert!(matches!(&entries[0].1, Value::List(values) if values.len() == 5));
        assert!(matches!(&entries[1].1, Value::List(values) if values.len() == 3));
    }

    #[test]
    fn last_duplicate_wins_in_first_position() {
        let registry = ParserRegistry::new();
        let target = TypeDescriptor::dictionary(string(), int());
        let parsed = DictionaryParser.parse(Some("a=1;b=2;a=3"), &target, &registry).unwrap();
        assert_eq!(
            parsed,
            Value::Map(vec![
                (Value::String("a".into()), Value::I32(3)),
                (Value::String("b".into()), Value::I32(2)),
            ])
        );
    }

    #[test]
    fn keys_equal_by_value_are_duplicates() {
        let registry = ParserRegistry::new();
        let decimal = TypeDescriptor::Primitive(PrimitiveKind::Decimal);
        let target = TypeDescriptor::dictionary(decimal, int());
        let Value::Map(entries) = DictionaryParser.parse(Some("1.0=1;2=2;1.00=3"), &target, &registry).unwrap()
        else {
            panic!("expected a map")
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, Value::I32(3));
        assert_eq!(entries[0].0.to_string(), "1.0");
    }

    #[test]
    fn bad_entries_fail_the_whole_dictionary() {
        let registry = ParserRegistry::new();
        let target = TypeDescriptor::dictionary(string(), int());
        let err = DictionaryParser.parse(Some("a=1;b"), &target, &registry).unwrap_err();
        assert!(err.to_string().contains("a=1;b"));
    }
}
