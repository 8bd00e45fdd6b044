// the "standard" regular expression package
use regex::Regex;
// so the default splitters are compiled once
use lazy_static::lazy_static;

use crate::error::{ParseError, Result};

/// The three single-character delimiters used by the composite parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Separates the elements of arrays and collections.
    pub collection: char,
    /// Separates the key from the value of a pair.
    pub key_value: char,
    /// Separates the entries of a dictionary.
    pub dictionary: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self { collection: ',', key_value: '=', dictionary: ';' }
    }
}

/// Splits text on one delimiter while keeping double-quoted runs whole.
///
/// Quotes stay in the returned tokens, whitespace inside a token is kept, and
/// empty tokens (consecutive, leading or trailing delimiters) are dropped.
#[derive(Debug, Clone)]
pub struct Splitter {
    delimiter: char,
    pattern: Regex,
}

impl Splitter {
    pub fn new(delimiter: char) -> Result<Self> {
        if delimiter == '"' {
            return Err(ParseError::Configuration(
                "the double quote cannot be used as a delimiter".into(),
            ));
        }
        let escaped = regex::escape(&delimiter.to_string());
        let pattern = Regex::new(&format!(r#"(?:"[^"]*"|[^{}])+"#, escaped))
            .map_err(|e| ParseError::Configuration(format!("delimiter {:?}: {}", delimiter, e)))?;
        Ok(Self { delimiter, pattern })
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn split(&self, input: &str) -> Vec<String> {
        self.pattern
            .find_iter(input)
            .map(|m| m.as_str())
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect()
    }
}

lazy_static! {
    static ref DEFAULT_SPLITTERS: Splitters =
        Splitters::new(&Delimiters::default()).expect("default delimiters are valid");
}

/// One compiled splitter per configured delimiter.
#[derive(Debug, Clone)]
pub struct Splitters {
    pub collection: Splitter,
    pub key_value: Splitter,
    pub dictionary: Splitter,
}

impl Splitters {
    pub fn new(delimiters: &Delimiters) -> Result<Self> {
        Ok(Self {
            collection: Splitter::new(delimiters.collection)?,
            key_value: Splitter::new(delimiters.key_value)?,
            dictionary: Splitter::new(delimiters.dictionary)?,
        })
    }

    /// The splitters for `,` `=` `;`.
    pub fn default_set() -> Self {
        DEFAULT_SPLITTERS.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_delimiter() {
        let splitter = Splitter::new(',').unwrap();
        assert_eq!(splitter.split("1,2,3"), vec!["1", "2", "3"]);
    }

    #[test]
    fn drops_empty_tokens() {
        let splitter = Splitter::new(',').unwrap();
        assert_eq!(splitter.split(",,a,,b,"), vec!["a", "b"]);
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn keeps_whitespace_inside_tokens() {
        let splitter = Splitter::new(',').unwrap();
        assert_eq!(splitter.split("1, 2 - 5"), vec!["1", " 2 - 5"]);
    }

    #[test]
    fn quoted_runs_are_indivisible_and_keep_quotes() {
        let splitter = Splitter::new(',').unwrap();
        assert_eq!(
            splitter.split(r#"a,"b,c",d"#),
            vec!["a", r#""b,c""#, "d"]
        );
        let splitter = Splitter::new('=').unwrap();
        assert_eq!(splitter.split(r#""x=y"=z"#), vec![r#""x=y""#, "z"]);
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        let splitter = Splitter::new('|').unwrap();
        assert_eq!(splitter.split("a|b|c"), vec!["a", "b", "c"]);
        let splitter = Splitter::new(']').unwrap();
        assert_eq!(splitter.split("a]b"), vec!["a", "b"]);
    }

    #[test]
    fn quote_is_not_a_delimiter() {
        assert!(Splitter::new('"').is_err());
    }
}
