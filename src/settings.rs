//! Registry settings: delimiters and extra parsers to register by identifier.
//!
//! Values are layered with the `config` crate: built-in defaults, then an
//! optional settings file, then `TYPEPARSE_*` environment variables
//! (`TYPEPARSE_COLLECTION_DELIMITER=|`, `TYPEPARSE_PARSERS=port,color`).

use std::path::Path;

// config lets you read a separate config file
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use config::builder::DefaultState;
use serde::Deserialize;
use tracing::info;

use crate::error::{ParseError, Result};
use crate::splitter::Delimiters;

const ENV_PREFIX: &str = "TYPEPARSE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub collection_delimiter: String,
    pub key_value_delimiter: String,
    pub dictionary_delimiter: String,
    /// Parser identifiers, registered in order after the built-ins.
    #[serde(default)]
    pub parsers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let delimiters = Delimiters::default();
        Self {
            collection_delimiter: delimiters.collection.to_string(),
            key_value_delimiter: delimiters.key_value.to_string(),
            dictionary_delimiter: delimiters.dictionary.to_string(),
            parsers: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads settings from the defaults, the file at `path` if there is one,
    /// and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("parsers"),
            )
            .build()?
            .try_deserialize()?;
        info!(?path, parsers = settings.parsers.len(), "loaded settings");
        Ok(settings)
    }

    /// Reads settings from inline text in the given format, over the defaults.
    pub fn from_text(contents: &str, format: FileFormat) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(File::from_str(contents, format))
            .build()?
            .try_deserialize()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = Settings::default();
        Ok(Config::builder()
            .set_default("collection_delimiter", defaults.collection_delimiter)?
            .set_default("key_value_delimiter", defaults.key_value_delimiter)?
            .set_default("dictionary_delimiter", defaults.dictionary_delimiter)?
            .set_default("parsers", Vec::<String>::new())?)
    }

    /// The configured delimiters. Each must be exactly one character.
    pub fn delimiters(&self) -> Result<Delimiters> {
        Ok(Delimiters {
            collection: single_char("collection_delimiter", &self.collection_delimiter)?,
            key_value: single_char("key_value_delimiter", &self.key_value_delimiter)?,
            dictionary: single_char("dictionary_delimiter", &self.dictionary_delimiter)?,
        })
    }
}

fn single_char(key: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ParseError::Configuration(format!(
            "{} must be a single character, got {:?}",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_delimiters() {
        let settings = Settings::from_text("", FileFormat::Toml).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.delimiters().unwrap(), Delimiters::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = Settings::from_text(
            r#"
            collection_delimiter = "|"
            parsers = ["port"]
            "#,
            FileFormat::Toml,
        )
        .unwrap();
        let delimiters = settings.delimiters().unwrap();
        assert_eq!(delimiters.collection, '|');
        assert_eq!(delimiters.key_value, '=');
        assert_eq!(settings.parsers, vec!["port".to_string()]);
    }

    #[test]
    fn delimiters_must_be_one_character() {
        let settings = Settings::from_text(r#"dictionary_delimiter = ";;""#, FileFormat::Toml).unwrap();
        assert!(matches!(settings.delimiters(), Err(ParseError::Configuration(_))));
        let settings = Settings::from_text(r#"key_value_delimiter = """#, FileFormat::Toml).unwrap();
        assert!(matches!(settings.delimiters(), Err(ParseError::Configuration(_))));
    }

    #[test]
    fn malformed_text_is_a_configuration_error() {
        let err = Settings::from_text("collection_delimiter = ", FileFormat::Toml).unwrap_err();
        assert!(matches!(err, ParseError::Configuration(_)));
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let settings = Settings::load(Some(Path::new("does/not/exist.toml"))).unwrap();
        assert_eq!(settings.delimiters().unwrap(), Delimiters::default());
    }
}
