//! The parser registry.
//!
//! Holds the ordered list of registered parsers and the cache of resolved
//! bindings, and is the single entry point every composite parser uses to
//! find parsers for nested element, key and value types.

use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

// we will use a fast hashing algo for the cache
use seahash::SeaHasher;
use tracing::{debug, info, trace};

use crate::datatype::DataType;
use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::error::{ParseError, Result};
use crate::parsers::{CollectionParser, DictionaryParser, EnumParser, KeyValuePairParser, PrimitiveValueParser};
use crate::settings::Settings;
use crate::splitter::{Delimiters, Splitters};
use crate::value::Value;

pub type CacheHasher = BuildHasherDefault<SeaHasher>;

/// What a parser is asked during resolution.
///
/// `requested` is always the descriptor the caller asked for. `search` is the
/// current step of the ancestry walk, which equals `requested` on the first
/// pass and then moves through its base types.
pub struct Probe<'a> {
    requested: &'a TypeDescriptor,
    search: &'a TypeDescriptor,
    registry: &'a ParserRegistry,
}

impl<'a> Probe<'a> {
    pub fn requested(&self) -> &'a TypeDescriptor {
        self.requested
    }
    pub fn search(&self) -> &'a TypeDescriptor {
        self.search
    }
    /// Composite parsers use this to check that their element types resolve.
    pub fn registry(&self) -> &'a ParserRegistry {
        self.registry
    }
}

/// Core trait that all parsers must implement
pub trait Parser: Send + Sync {
    /// Whether this parser can produce values for the probed type.
    fn can_parse(&self, probe: &Probe<'_>) -> bool;

    /// Parses `text` into a value of `target`. `None` stands for absent input.
    fn parse(&self, text: Option<&str>, target: &TypeDescriptor, registry: &ParserRegistry) -> Result<Value>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

pub type ParserFactory = Box<dyn Fn() -> Arc<dyn Parser> + Send + Sync>;

/// Maps parser identifiers (as they appear in settings) to constructors.
#[derive(Default)]
pub struct ParserFactories {
    factories: HashMap<String, ParserFactory>,
}

impl ParserFactories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<P, F>(&mut self, identifier: impl Into<String>, factory: F) -> &mut Self
    where
        P: Parser + 'static,
        F: Fn() -> P + Send + Sync + 'static,
    {
        self.factories
            .insert(identifier.into(), Box::new(move || Arc::new(factory()) as Arc<dyn Parser>));
        self
    }

    pub fn create(&self, identifier: &str) -> Result<Arc<dyn Parser>> {
        if identifier.trim().is_empty() {
            return Err(ParseError::Registration {
                parser: identifier.to_string(),
                message: "the parser identifier is blank".into(),
            });
        }
        self.factories
            .get(identifier)
            .map(|factory| factory())
            .ok_or_else(|| ParseError::Registration {
                parser: identifier.to_string(),
                message: format!("the type, \"{}\" could not be found", identifier),
            })
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

pub struct ParserRegistry {
    parsers: RwLock<Vec<Arc<dyn Parser>>>,
    cache: RwLock<HashMap<TypeDescriptor, Arc<dyn Parser>, CacheHasher>>,
    delimiters: Delimiters,
    splitters: Splitters,
}

impl ParserRegistry {
    /// A registry with the built-in parsers and the default delimiters.
    pub fn new() -> Self {
        let delimiters = Delimiters::default();
        Self::build(delimiters, Splitters::default_set())
    }

    /// A registry with the built-in parsers and the given delimiters.
    pub fn with_delimiters(delimiters: Delimiters) -> Result<Self> {
        let splitters = Splitters::new(&delimiters)?;
        Ok(Self::build(delimiters, splitters))
    }

    /// A registry configured from settings: their delimiters, then the
    /// built-ins, then every configured parser identifier in order.
    pub fn from_settings(settings: &Settings, factories: &ParserFactories) -> Result<Self> {
        let registry = Self::with_delimiters(settings.delimiters()?)?;
        for identifier in &settings.parsers {
            registry.register_named(identifier, factories)?;
        }
        Ok(registry)
    }

    fn build(delimiters: Delimiters, splitters: Splitters) -> Self {
        let mut parsers: Vec<Arc<dyn Parser>> = PrimitiveKind::ALL
            .iter()
            .map(|kind| Arc::new(PrimitiveValueParser::new(*kind)) as Arc<dyn Parser>)
            .collect();
        parsers.push(Arc::new(CollectionParser));
        parsers.push(Arc::new(DictionaryParser));
        parsers.push(Arc::new(EnumParser));
        parsers.push(Arc::new(KeyValuePairParser));
        Self {
            parsers: RwLock::new(parsers),
            cache: RwLock::new(HashMap::default()),
            delimiters,
            splitters,
        }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn splitters(&self) -> &Splitters {
        &self.splitters
    }

    // ------------- Registration -------------
    pub fn register(&self, parser: impl Parser + 'static) {
        self.register_arc(Arc::new(parser));
    }

    pub fn register_arc(&self, parser: Arc<dyn Parser>) {
        info!(parser = parser.name(), "registering parser");
        self.parsers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(parser);
    }

    /// Constructs the parser registered under `identifier` and appends it.
    pub fn register_named(&self, identifier: &str, factories: &ParserFactories) -> Result<()> {
        let parser = factories.create(identifier)?;
        self.register_arc(parser);
        Ok(())
    }

    /// A snapshot of the registered parsers, in registration order.
    pub fn parsers(&self) -> Vec<Arc<dyn Parser>> {
        self.parsers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn parser_count(&self) -> usize {
        self.parsers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    // ------------- Resolution -------------
    /// Returns the parser bound to `target`, resolving and caching it on first
    /// use. The first registered parser that accepts wins; when none accepts,
    /// the walk moves up the descriptor's base types.
    pub fn resolve(&self, target: &TypeDescriptor) -> Option<Arc<dyn Parser>> {
        if let Some(parser) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(target)
        {
            trace!(target = %target, parser = parser.name(), "cached parser");
            return Some(Arc::clone(parser));
        }

        // probe against a snapshot so predicates can re-enter the registry
        let parsers = self.parsers();
        let found = target.ancestry().iter().find_map(|search| {
            let probe = Probe { requested: target, search, registry: self };
            parsers.iter().find(|parser| parser.can_parse(&probe)).cloned()
        });

        match found {
            Some(parser) => {
                let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
                // a concurrent resolution may have won the race, keep its binding
                let bound = Arc::clone(cache.entry(target.clone()).or_insert(parser));
                debug!(target = %target, parser = bound.name(), "resolved parser");
                Some(bound)
            }
            None => {
                debug!(target = %target, "no parser found");
                None
            }
        }
    }

    pub fn is_cached(&self, target: &TypeDescriptor) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(target)
    }

    // ------------- Parsing -------------
    /// Parses `text` into a runtime value of `target`.
    pub fn parse_value(&self, target: &TypeDescriptor, text: Option<&str>) -> Result<Value> {
        let parser = self
            .resolve(target)
            .ok_or_else(|| ParseError::NoParser { type_name: target.to_string() })?;
        parser.parse(text, target, self)
    }

    pub fn parse<T: DataType>(&self, text: &str) -> Result<T> {
        let target = T::descriptor();
        let value = self.parse_value(&target, Some(text))?;
        T::from_value(value)
    }

    /// Parses `text`, falling back to `T::default()` on any parse failure.
    /// Collections fall back to an empty collection.
    pub fn safe_parse<T: DataType + Default>(&self, text: &str) -> T {
        self.safe_parse_or(text, T::default())
    }

    /// Parses `text`, falling back to `default` on any parse failure.
    pub fn safe_parse_or<T: DataType>(&self, text: &str, default: T) -> T {
        match self.parse::<T>(text) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, text, "falling back to default");
                default
            }
        }
    }

    /// A handle bound to the parser resolved for `T`, if there is one.
    pub fn parser_for<T: DataType>(&self) -> Option<TypedParser<'_, T>> {
        let target = T::descriptor();
        let parser = self.resolve(&target)?;
        Some(TypedParser { registry: self, parser, target, marker: PhantomData })
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A parser bound to one target type, parsing straight into `T`.
pub struct TypedParser<'r, T> {
    registry: &'r ParserRegistry,
    parser: Arc<dyn Parser>,
    target: TypeDescriptor,
    marker: PhantomData<fn() -> T>,
}

impl<T: DataType> TypedParser<'_, T> {
    pub fn parse(&self, text: &str) -> Result<T> {
        let value = self.parser.parse(Some(text), &self.target, self.registry)?;
        T::from_value(value)
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.target
    }

    pub fn parser(&self) -> &Arc<dyn Parser> {
        &self.parser
    }
}
