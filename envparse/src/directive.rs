//! Annotation parsing
//!
//! A field annotation is a comma-separated list of `key=value` tokens, or a
//! single bare environment variable name. Parsing is deliberately lenient:
//! callers are expected to supply well-formed annotations, and a malformed
//! one degrades to a partial or default directive instead of failing.

/// Parsed form of a field annotation: the target environment variable name
/// plus an optional named transformer for sequence and mapping fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Environment variable to read.
    pub env_name: String,
    /// Transformer to decode the value with; empty for fields that use the
    /// built-in scalar conversions.
    pub parser_name: String,
}

impl Directive {
    /// Parse a raw annotation into a directive.
    ///
    /// Recognized keys are `name` and `parser`; unrecognized keys are
    /// silently ignored. When no `name=` token is present, the entire raw
    /// text is taken verbatim as the environment variable name, which is
    /// the common single-bare-token case.
    pub fn parse(raw: &str) -> Self {
        let mut directive = Directive {
            env_name: String::new(),
            parser_name: String::new(),
        };

        for token in raw.split(',') {
            let mut parts = token.split('=');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().unwrap_or_default();
            match key {
                "name" => directive.env_name = value.to_string(),
                "parser" => directive.parser_name = value.to_string(),
                _ => {}
            }
        }

        if directive.env_name.is_empty() {
            directive.env_name = raw.to_string();
        }

        directive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        let directive = Directive::parse("TEST_ENV");
        assert_eq!(directive.env_name, "TEST_ENV");
        assert_eq!(directive.parser_name, "");
    }

    #[test]
    fn test_name_and_parser() {
        let directive = Directive::parse("name=TEST_ENV,parser=intSlice");
        assert_eq!(directive.env_name, "TEST_ENV");
        assert_eq!(directive.parser_name, "intSlice");
    }

    #[test]
    fn test_token_order_is_irrelevant() {
        let directive = Directive::parse("parser=default,name=TEST_ENV");
        assert_eq!(directive.env_name, "TEST_ENV");
        assert_eq!(directive.parser_name, "default");
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let directive = Directive::parse("name=TEST_ENV,mode=verbose");
        assert_eq!(directive.env_name, "TEST_ENV");
        assert_eq!(directive.parser_name, "");
    }

    #[test]
    fn test_missing_name_falls_back_to_raw_text() {
        let directive = Directive::parse("parser=intSlice");
        assert_eq!(directive.env_name, "parser=intSlice");
        assert_eq!(directive.parser_name, "intSlice");
    }

    #[test]
    fn test_dangling_key_does_not_fail() {
        let directive = Directive::parse("name");
        assert_eq!(directive.env_name, "name");
        assert_eq!(directive.parser_name, "");
    }
}
