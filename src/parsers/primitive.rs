// used for timestamps
use chrono::{DateTime, NaiveDate, NaiveDateTime};
// used for decimal numbers
use bigdecimal::BigDecimal;

// used when parsing a string to a BigDecimal
use std::str::FromStr;

use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::error::{ParseError, Result};
use crate::parsers::require_text;
use crate::registry::{Parser, ParserRegistry, Probe};
use crate::value::Value;

/// Date-time layouts tried in order, after RFC 3339.
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
/// Date-only layouts, read as midnight. Year first before month first.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a single token as one fixed primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveValueParser {
    kind: PrimitiveKind,
}

impl PrimitiveValueParser {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }
}

impl Parser for PrimitiveValueParser {
    fn can_parse(&self, probe: &Probe<'_>) -> bool {
        *probe.search().strip_nullable() == TypeDescriptor::Primitive(self.kind)
    }

    fn parse(&self, text: Option<&str>, target: &TypeDescriptor, _: &ParserRegistry) -> Result<Value> {
        let Some(text) = require_text(text, target)? else {
            return Ok(Value::Empty);
        };
        match target.primitive_kind() {
            Some(kind) if kind == self.kind => parse_primitive(kind, text),
            _ => Err(ParseError::argument(format!(
                "Cannot parse value as {}. The conversion is not defined. :: value={}",
                target, text
            ))),
        }
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}

/// Parses one token as `kind`.
pub fn parse_primitive(kind: PrimitiveKind, text: &str) -> Result<Value> {
    match kind {
        PrimitiveKind::Bool => Ok(Value::Bool(parse_bool(text))),
        PrimitiveKind::DateTime => parse_date_time(text).map(Value::DateTime),
        PrimitiveKind::String => Ok(Value::String(text.to_string())),
        PrimitiveKind::Char => Ok(Value::Char(text.chars().next().unwrap_or_default())),
        PrimitiveKind::Decimal => parse_decimal(text).map(Value::Decimal),
        numeric => parse_number(numeric, text),
    }
}

/// `1`, `true` and `yes` are true. Everything else, recognised or not, is false.
pub fn parse_bool(text: &str) -> bool {
    let text = text.trim();
    text == "1" || text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("yes")
}

pub fn parse_date_time(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();
    let mut last_error = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(moment) => return Ok(moment.naive_utc()),
        Err(e) => e,
    };
    for format in DATE_TIME_FORMATS {
        match NaiveDateTime::parse_from_str(trimmed, format) {
            Ok(moment) => return Ok(moment),
            Err(e) => last_error = e,
        }
    }
    for format in DATE_FORMATS {
        match NaiveDate::parse_from_str(trimmed, format) {
            Ok(date) => {
                if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                    return Ok(midnight);
                }
            }
            Err(e) => last_error = e,
        }
    }
    Err(ParseError::argument_caused_by(
        format!("Could not parse string value, \"{}\" as a DateTime", text),
        last_error,
    ))
}

pub fn parse_decimal(text: &str) -> Result<BigDecimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::argument("Cannot parse number for null or empty value"));
    }
    BigDecimal::from_str(trimmed).map_err(|e| {
        ParseError::argument_caused_by(format!("Cannot parse value \"{}\" as a number.", text), e)
    })
}

/// Every numeric kind except decimal goes through an f64 and is narrowed.
fn parse_number(kind: PrimitiveKind, text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::argument("Cannot parse number for null or empty value"));
    }
    let number = trimmed.parse::<f64>().map_err(|e| {
        ParseError::argument_caused_by(format!("Cannot parse value \"{}\" as a number.", text), e)
    })?;
    Value::from_f64(kind, number).ok_or_else(|| {
        ParseError::argument(format!("The value \"{}\" is out of range for {}", text, kind))
    })
}
