//! Numeric range expansion: `"2-5"` becomes `2,3,4,5`.

// the "standard" regular expression package
use regex::Regex;
// so regular expressions don't have to be recompiled
use lazy_static::lazy_static;
// used for decimal numbers
use bigdecimal::BigDecimal;

use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::error::{ParseError, Result};
use crate::registry::ParserRegistry;
use crate::value::Value;

lazy_static! {
    static ref RANGE_TOKEN: Regex = Regex::new(r"^\s*([^-]+?)\s*-\s*([^-]+?)\s*$").unwrap();
}

/// Whether the collection parser should treat `token` as a range of `element`.
pub fn is_range(element: &TypeDescriptor, token: &str) -> bool {
    element.is_numeric() && token.contains('-')
}

/// Expands an `A-B` token into the inclusive, unit-stepped sequence between
/// its bounds. Both bounds go through the element type's own parser.
pub fn expand(token: &str, element: &TypeDescriptor, registry: &ParserRegistry) -> Result<Vec<Value>> {
    let captures = RANGE_TOKEN.captures(token).ok_or_else(|| {
        ParseError::argument(format!("The range \"{}\" must be of the form A-B", token))
    })?;
    let (lower, upper) = (&captures[1], &captures[2]);
    let kind = element.primitive_kind().ok_or_else(|| {
        ParseError::argument(format!("Ranges are not defined for {}", element))
    })?;
    let lower = registry.parse_value(element, Some(lower))?;
    let upper = registry.parse_value(element, Some(upper))?;

    match kind {
        PrimitiveKind::Decimal => expand_decimal(&lower, &upper),
        _ => expand_f64(kind, &lower, &upper),
    }
}

fn expand_decimal(lower: &Value, upper: &Value) -> Result<Vec<Value>> {
    let (Value::Decimal(lower), Value::Decimal(upper)) = (lower, upper) else {
        return Err(bound_error(lower, upper));
    };
    let one = BigDecimal::from(1);
    let mut values = Vec::new();
    let mut current = lower.clone();
    while current <= *upper {
        values.push(Value::Decimal(current.clone()));
        current += &one;
    }
    Ok(values)
}

fn expand_f64(kind: PrimitiveKind, lower: &Value, upper: &Value) -> Result<Vec<Value>> {
    let (Some(start), Some(end)) = (lower.as_f64(), upper.as_f64()) else {
        return Err(bound_error(lower, upper));
    };
    let mut values = Vec::new();
    let mut current = start;
    while current <= end {
        let step = Value::from_f64(kind, current).ok_or_else(|| {
            ParseError::argument(format!("The value {} is out of range for {}", current, kind))
        })?;
        values.push(step);
        let next = current + 1.0;
        // past 2^53 a unit step no longer changes an f64
        if next == current {
            return Err(ParseError::argument(format!(
                "The range {}-{} cannot be stepped by one at this magnitude",
                start, end
            )));
        }
        current = next;
    }
    Ok(values)
}

fn bound_error(lower: &Value, upper: &Value) -> ParseError {
    ParseError::argument(format!(
        "The range bounds {} and {} are not numeric",
        lower.kind(),
        upper.kind()
    ))
}
