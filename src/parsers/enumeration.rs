use crate::descriptor::TypeDescriptor;
use crate::error::{ParseError, Result};
use crate::parsers::require_text;
use crate::registry::{Parser, ParserRegistry, Probe};
use crate::value::Value;

/// Parses enumerations from a member name or from a member's integral value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumParser;

impl Parser for EnumParser {
    fn can_parse(&self, probe: &Probe<'_>) -> bool {
        matches!(probe.search().strip_nullable(), TypeDescriptor::Enum(_))
    }

    fn parse(&self, text: Option<&str>, target: &TypeDescriptor, _: &ParserRegistry) -> Result<Value> {
        let TypeDescriptor::Enum(enumeration) = target.root() else {
            return Err(ParseError::argument(format!(
                "Cannot parse value, \"{}\", and type, \"{}\"",
                text.unwrap_or_default(),
                target
            )));
        };
        let Some(text) = require_text(text, target)? else {
            return Ok(Value::Empty);
        };

        // names first, then the underlying integral value
        let token = text.trim();
        let member = enumeration.by_name(token).or_else(|| {
            token
                .parse::<i64>()
                .ok()
                .and_then(|discriminant| enumeration.by_discriminant(discriminant))
        });

        match member {
            Some((member, discriminant)) => Ok(Value::Enum {
                type_name: enumeration.name(),
                member,
                discriminant,
            }),
            None => Err(ParseError::out_of_range(text, enumeration.name())),
        }
    }
}
