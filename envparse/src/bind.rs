//! Per-field binding: environment lookup, type dispatch, write-back
//!
//! The derive macro classifies every annotated field into a [`TypeKind`] tag
//! at compile time and emits a `lookup` / `convert` / `assign` sequence per
//! field. This module owns the runtime dispatch table over those tags and
//! the scalar conversion routines behind it.

use std::any::Any;
use std::env;

use crate::error::EnvParseError;
use crate::registry::{self, ParserRegistry};

/// Closed set of field type tags the binder can dispatch on.
///
/// Anything the derive macro does not recognize becomes [`TypeKind::Other`]
/// and fails at bind time rather than at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    Seq,
    Map,
    Other,
}

/// Read the environment variable backing a directive.
///
/// A variable set to the empty string is treated the same as an unset one:
/// both fail as missing.
pub fn lookup(name: &str) -> Result<String, EnvParseError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(EnvParseError::Missing {
            name: name.to_string(),
        }),
    }
}

/// Convert raw environment text into a boxed value of the field's type.
///
/// Scalar tags use the built-in conversions below; sequence and mapping
/// tags delegate to a transformer selected by `parser_name`. Transformer
/// errors propagate unchanged.
pub fn convert(
    kind: TypeKind,
    field: &str,
    raw: &str,
    parser_name: &str,
    registry: &ParserRegistry,
) -> anyhow::Result<Box<dyn Any>> {
    let value: Box<dyn Any> = match kind {
        TypeKind::Bool => Box::new(parse_bool(field, raw)?),
        TypeKind::I8 => Box::new(parse_int(field, raw, 8)? as i8),
        TypeKind::I16 => Box::new(parse_int(field, raw, 16)? as i16),
        TypeKind::I32 => Box::new(parse_int(field, raw, 32)? as i32),
        TypeKind::I64 => Box::new(parse_int(field, raw, 64)?),
        TypeKind::Isize => Box::new(parse_int(field, raw, native_bits()?)? as isize),
        TypeKind::U8 => Box::new(parse_uint(field, raw, 8)? as u8),
        TypeKind::U16 => Box::new(parse_uint(field, raw, 16)? as u16),
        TypeKind::U32 => Box::new(parse_uint(field, raw, 32)? as u32),
        TypeKind::U64 => Box::new(parse_uint(field, raw, 64)?),
        TypeKind::Usize => Box::new(parse_uint(field, raw, native_bits()?)? as usize),
        TypeKind::F32 => Box::new(
            raw.parse::<f32>()
                .map_err(|e| EnvParseError::conversion(field, raw, e))?,
        ),
        TypeKind::F64 => Box::new(
            raw.parse::<f64>()
                .map_err(|e| EnvParseError::conversion(field, raw, e))?,
        ),
        TypeKind::Str => Box::new(raw.to_string()),
        TypeKind::Seq => return transform(raw, parser_name, registry, registry::default_sequence),
        TypeKind::Map => return transform(raw, parser_name, registry, registry::default_mapping),
        TypeKind::Other => {
            return Err(EnvParseError::UnsupportedType {
                field: field.to_string(),
            }
            .into())
        }
    };

    Ok(value)
}

/// Write a converted value into a field slot of type `T`.
///
/// The produced value must structurally match the field's declared type;
/// anything else is a type mismatch.
pub fn assign<T: Any>(value: Box<dyn Any>, field: &str) -> Result<T, EnvParseError> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| EnvParseError::TypeMismatch {
            field: field.to_string(),
        })
}

/// Resolve a sequence/mapping transformer and apply it.
///
/// The literal name `default` bypasses the registry; any other name must
/// have a registration.
fn transform(
    raw: &str,
    parser_name: &str,
    registry: &ParserRegistry,
    default: fn(&str) -> anyhow::Result<Box<dyn Any>>,
) -> anyhow::Result<Box<dyn Any>> {
    if parser_name == "default" {
        return default(raw);
    }

    let parser = registry.get(parser_name)?;
    parser(raw)
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, EnvParseError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(EnvParseError::conversion(field, raw, "invalid boolean literal")),
    }
}

fn parse_int(field: &str, raw: &str, bits: u32) -> Result<i64, EnvParseError> {
    let value: i64 = raw
        .parse()
        .map_err(|e| EnvParseError::conversion(field, raw, e))?;

    if bits < 64 {
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        if value < min || value > max {
            return Err(EnvParseError::conversion(
                field,
                raw,
                format!("value out of range for {bits}-bit integer"),
            ));
        }
    }

    Ok(value)
}

fn parse_uint(field: &str, raw: &str, bits: u32) -> Result<u64, EnvParseError> {
    let value: u64 = raw
        .parse()
        .map_err(|e| EnvParseError::conversion(field, raw, e))?;

    if bits < 64 && value > (1u64 << bits) - 1 {
        return Err(EnvParseError::conversion(
            field,
            raw,
            format!("value out of range for {bits}-bit unsigned integer"),
        ));
    }

    Ok(value)
}

/// Width of the platform-native integer types, resolved from a fixed table
/// of known architecture identifiers.
fn native_bits() -> Result<u32, EnvParseError> {
    arch_bits(env::consts::ARCH)
}

fn arch_bits(arch: &str) -> Result<u32, EnvParseError> {
    match arch {
        "x86_64" | "aarch64" | "powerpc64" | "s390x" => Ok(64),
        "x86" | "arm" | "powerpc" => Ok(32),
        _ => Err(EnvParseError::UnknownArchitecture {
            arch: arch.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_lookup_present() {
        env::set_var("BIND_LOOKUP_VAR", "value");
        assert_eq!(lookup("BIND_LOOKUP_VAR").unwrap(), "value");
        env::remove_var("BIND_LOOKUP_VAR");
    }

    #[test]
    #[serial]
    fn test_lookup_missing() {
        env::remove_var("BIND_LOOKUP_MISSING");
        let err = lookup("BIND_LOOKUP_MISSING").unwrap_err();
        assert_eq!(err.to_string(), "unable to find env var BIND_LOOKUP_MISSING");
    }

    #[test]
    #[serial]
    fn test_lookup_empty_counts_as_missing() {
        env::set_var("BIND_LOOKUP_EMPTY", "");
        let err = lookup("BIND_LOOKUP_EMPTY").unwrap_err();
        assert!(matches!(err, EnvParseError::Missing { .. }));
        env::remove_var("BIND_LOOKUP_EMPTY");
    }

    #[test]
    fn test_parse_bool_literals() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert!(parse_bool("field", raw).unwrap());
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert!(!parse_bool("field", raw).unwrap());
        }
        assert!(parse_bool("field", "yes").is_err());
    }

    #[test]
    fn test_parse_int_widths() {
        assert_eq!(parse_int("field", "-128", 8).unwrap(), -128);
        assert_eq!(parse_int("field", "127", 8).unwrap(), 127);
        assert!(parse_int("field", "128", 8).is_err());
        assert!(parse_int("field", "-129", 8).is_err());

        assert_eq!(parse_int("field", "-32768", 16).unwrap(), -32768);
        assert!(parse_int("field", "32768", 16).is_err());

        assert_eq!(parse_int("field", "2147483647", 32).unwrap(), 2147483647);
        assert!(parse_int("field", "2147483648", 32).is_err());

        assert_eq!(parse_int("field", "9223372036854775807", 64).unwrap(), i64::MAX);
        assert!(parse_int("field", "9223372036854775808", 64).is_err());
    }

    #[test]
    fn test_parse_uint_widths() {
        assert_eq!(parse_uint("field", "255", 8).unwrap(), 255);
        assert!(parse_uint("field", "256", 8).is_err());
        assert!(parse_uint("field", "-1", 8).is_err());

        assert_eq!(parse_uint("field", "65535", 16).unwrap(), 65535);
        assert!(parse_uint("field", "65536", 16).is_err());

        assert_eq!(parse_uint("field", "4294967295", 32).unwrap(), 4294967295);
        assert!(parse_uint("field", "4294967296", 32).is_err());

        assert_eq!(parse_uint("field", "18446744073709551615", 64).unwrap(), u64::MAX);
    }

    #[test]
    fn test_arch_bits_table() {
        assert_eq!(arch_bits("x86_64").unwrap(), 64);
        assert_eq!(arch_bits("aarch64").unwrap(), 64);
        assert_eq!(arch_bits("powerpc64").unwrap(), 64);
        assert_eq!(arch_bits("s390x").unwrap(), 64);
        assert_eq!(arch_bits("x86").unwrap(), 32);
        assert_eq!(arch_bits("arm").unwrap(), 32);
        assert_eq!(arch_bits("powerpc").unwrap(), 32);

        let err = arch_bits("z80").unwrap_err();
        assert_eq!(err.to_string(), "unknown architecture: z80");
    }

    #[test]
    fn test_convert_unsupported_type() {
        let registry = ParserRegistry::new();
        let err = convert(TypeKind::Other, "opaque", "value", "", &registry).unwrap_err();
        assert_eq!(err.to_string(), "no registered set method for type");
    }

    #[test]
    fn test_convert_sequence_default() {
        let registry = ParserRegistry::new();
        let value = convert(TypeKind::Seq, "items", "a,b", "default", &registry).unwrap();
        let items = value.downcast::<Vec<String>>().unwrap();
        assert_eq!(*items, vec!["a", "b"]);
    }

    #[test]
    fn test_convert_sequence_unregistered_parser() {
        let registry = ParserRegistry::new();
        let err = convert(TypeKind::Seq, "items", "a,b", "noParser", &registry).unwrap_err();
        assert_eq!(err.to_string(), "parser not found: noParser");
    }

    #[test]
    fn test_assign_type_mismatch() {
        let value: Box<dyn Any> = Box::new(vec!["a".to_string()]);
        let err = assign::<Vec<i64>>(value, "items").unwrap_err();
        assert!(matches!(err, EnvParseError::TypeMismatch { .. }));
    }

    #[test]
    fn test_assign_matching_type() {
        let value: Box<dyn Any> = Box::new(42u16);
        assert_eq!(assign::<u16>(value, "port").unwrap(), 42);
    }
}
