use thiserror::Error;

/// Boxed cause kept underneath a composite failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{message}")]
    Argument {
        message: String,
        #[source]
        source: Option<Cause>,
    },
    #[error("The value, \"{value}\" does not exist for enumeration, \"{type_name}\"")]
    OutOfRange { value: String, type_name: String },
    #[error("The parser type \"{parser}\" could not be loaded: {message}")]
    Registration { parser: String, message: String },
    #[error("No parser could be found for type {type_name}")]
    NoParser { type_name: String },
    #[error("Config error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;

impl ParseError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument { message: message.into(), source: None }
    }
    pub fn argument_caused_by(message: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self::Argument { message: message.into(), source: Some(source.into()) }
    }
    pub fn out_of_range(value: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::OutOfRange { value: value.into(), type_name: type_name.into() }
    }
}

// Helper conversions
impl From<config::ConfigError> for ParseError {
    fn from(e: config::ConfigError) -> Self { Self::Configuration(e.to_string()) }
}
