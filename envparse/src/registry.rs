//! Named value transformers for sequence- and mapping-shaped fields

use std::any::Any;
use std::collections::HashMap;

use crate::error::EnvParseError;

/// Type-erased transformer signature: raw environment text in, boxed value
/// out. The field binder downcasts the produced value to the target field's
/// type on write-back.
pub type ParserFn = dyn Fn(&str) -> anyhow::Result<Box<dyn Any>> + Send + Sync;

/// Store of named value transformers.
///
/// Sequence and mapping fields name the transformer that decodes their raw
/// environment text via the `parser=` annotation key; the registry maps
/// those names to functions. The caller constructs one registry, performs
/// all registrations during startup, and threads a shared reference into
/// `populate_with` calls.
///
/// Registration is last-write-wins and takes effect immediately for every
/// subsequent lookup. The stored functions are `Send + Sync`, so a populated
/// registry can be shared across threads.
///
/// The literal transformer name `default` never reaches the registry: it is
/// special-cased to the built-in comma-split (sequences) and JSON object
/// (mappings) transformers, so a registration under that name is never
/// consulted.
#[derive(Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Box<ParserFn>>,
}

impl ParserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer under `name`, replacing any prior
    /// registration with the same name.
    pub fn register<T, F>(&mut self, name: impl Into<String>, parser: F)
    where
        T: Any,
        F: Fn(&str) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.parsers.insert(
            name.into(),
            Box::new(move |raw| parser(raw).map(|value| Box::new(value) as Box<dyn Any>)),
        );
    }

    /// Look up a transformer by name.
    pub fn get(&self, name: &str) -> Result<&ParserFn, EnvParseError> {
        self.parsers
            .get(name)
            .map(|parser| parser.as_ref())
            .ok_or_else(|| EnvParseError::ParserNotFound {
                name: name.to_string(),
            })
    }
}

/// Built-in sequence transformer: split the raw text on commas into text
/// tokens. No whitespace trimming, no delimiter escaping.
pub(crate) fn default_sequence(raw: &str) -> anyhow::Result<Box<dyn Any>> {
    let items: Vec<String> = raw.split(',').map(str::to_string).collect();
    Ok(Box::new(items))
}

/// Built-in mapping transformer: decode the raw text as a JSON object into
/// loosely-typed values. Malformed input surfaces the decode error as-is.
pub(crate) fn default_mapping(raw: &str) -> anyhow::Result<Box<dyn Any>> {
    let map: HashMap<String, serde_json::Value> = serde_json::from_str(raw)?;
    Ok(Box::new(map))
}
