//! Annotation-driven environment variable parsing
//!
//! `envparse` populates the fields of a struct from process environment
//! variables, driven by a per-field `#[env("...")]` annotation. Each
//! annotation names the variable to read and, for sequence and mapping
//! fields, the transformer that decodes the raw text.
//!
//! # Features
//!
//! - **Declarative**: automatic implementation with `#[derive(EnvParse)]`
//! - **Typed conversions**: booleans, integers of every width, floats,
//!   strings, `Vec` and map fields
//! - **Custom transformers**: register named functions for list- and
//!   map-shaped values via [`ParserRegistry`]
//! - **Fail fast**: the first field that cannot be bound aborts the pass
//!   and reports the offending variable
//!
//! # Annotation syntax
//!
//! The annotation is either a bare environment variable name, or a
//! comma-separated list of `key=value` tokens:
//!
//! - `#[env("APP_PORT")]`: read the field from `APP_PORT`
//! - `#[env("name=APP_TAGS,parser=default")]`: read from `APP_TAGS` and
//!   decode with the transformer named `default`
//!
//! Recognized keys are `name` and `parser`; unrecognized keys are ignored.
//! Fields without an annotation are never touched.
//!
//! # Example
//!
//! ```rust
//! use envparse::EnvParse;
//!
//! #[derive(Debug, Default, EnvParse)]
//! struct Config {
//!     #[env("DOC_APP_PORT")]
//!     port: u16,
//!
//!     #[env("name=DOC_APP_TAGS,parser=default")]
//!     tags: Vec<String>,
//!
//!     // Not annotated, left at its current value
//!     debug: bool,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! std::env::set_var("DOC_APP_PORT", "8080");
//! std::env::set_var("DOC_APP_TAGS", "api,v2");
//!
//! let mut config = Config::default();
//! config.populate()?;
//!
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.tags, vec!["api", "v2"]);
//! assert!(!config.debug);
//! # Ok(())
//! # }
//! ```
//!
//! # Transformers
//!
//! Sequence (`Vec`) and mapping (`HashMap`/`BTreeMap`) fields delegate the
//! conversion to a named transformer. The literal name `default` selects the
//! built-ins: comma-splitting into `Vec<String>` for sequences, and JSON
//! object decoding into `HashMap<String, serde_json::Value>` for mappings.
//! Any other name is resolved through a [`ParserRegistry`] threaded into
//! `populate_with`:
//!
//! ```rust
//! use envparse::{EnvParse, ParserRegistry};
//!
//! #[derive(Debug, Default, EnvParse)]
//! struct Config {
//!     #[env("name=DOC_APP_PORTS,parser=ports")]
//!     ports: Vec<u16>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut registry = ParserRegistry::new();
//! registry.register("ports", |raw: &str| -> anyhow::Result<Vec<u16>> {
//!     raw.split(',').map(|token| Ok(token.parse()?)).collect()
//! });
//!
//! std::env::set_var("DOC_APP_PORTS", "8080,8443");
//!
//! let mut config = Config::default();
//! config.populate_with(&registry)?;
//! assert_eq!(config.ports, vec![8080, 8443]);
//! # Ok(())
//! # }
//! ```
//!
//! # Missing variables
//!
//! A variable that is unset fails the pass, and so does a variable that is
//! set to the empty string: the two cases are deliberately
//! indistinguishable. The reported error names the variable, e.g.
//! `unable to find env var APP_PORT`.

#[doc(hidden)]
pub mod bind;

mod directive;
mod error;
mod registry;

pub use directive::Directive;
pub use envparse_derive::EnvParse;
pub use error::EnvParseError;
pub use registry::{ParserFn, ParserRegistry};

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;
