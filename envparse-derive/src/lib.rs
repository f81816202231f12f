//! Derive macro implementation for envparse

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

/// Map a field's declared type to the binder's type tag.
///
/// Only the last path segment is inspected, so fully qualified spellings of
/// `Vec`, `HashMap` and `BTreeMap` classify the same as the bare names.
/// Anything unrecognized becomes `Other`, which the binder rejects at run
/// time.
fn type_kind(ty: &Type) -> proc_macro2::TokenStream {
    let ident = match ty {
        Type::Path(type_path) => match type_path.path.segments.last() {
            Some(segment) => segment.ident.to_string(),
            None => return quote! { ::envparse::bind::TypeKind::Other },
        },
        _ => return quote! { ::envparse::bind::TypeKind::Other },
    };

    match ident.as_str() {
        "bool" => quote! { ::envparse::bind::TypeKind::Bool },
        "i8" => quote! { ::envparse::bind::TypeKind::I8 },
        "i16" => quote! { ::envparse::bind::TypeKind::I16 },
        "i32" => quote! { ::envparse::bind::TypeKind::I32 },
        "i64" => quote! { ::envparse::bind::TypeKind::I64 },
        "isize" => quote! { ::envparse::bind::TypeKind::Isize },
        "u8" => quote! { ::envparse::bind::TypeKind::U8 },
        "u16" => quote! { ::envparse::bind::TypeKind::U16 },
        "u32" => quote! { ::envparse::bind::TypeKind::U32 },
        "u64" => quote! { ::envparse::bind::TypeKind::U64 },
        "usize" => quote! { ::envparse::bind::TypeKind::Usize },
        "f32" => quote! { ::envparse::bind::TypeKind::F32 },
        "f64" => quote! { ::envparse::bind::TypeKind::F64 },
        "String" => quote! { ::envparse::bind::TypeKind::Str },
        "Vec" => quote! { ::envparse::bind::TypeKind::Seq },
        "HashMap" | "BTreeMap" => quote! { ::envparse::bind::TypeKind::Map },
        _ => quote! { ::envparse::bind::TypeKind::Other },
    }
}

/// `EnvParse` derive macro
///
/// Generates `populate` and `populate_with` methods that fill annotated
/// fields from environment variables.
///
/// # Supported annotation
///
/// **Field-level**:
/// - `#[env("VAR_NAME")]`: read the field from `VAR_NAME`
/// - `#[env("name=VAR_NAME,parser=transformer")]`: read from `VAR_NAME` and
///   decode with a named transformer (sequence and mapping fields)
///
/// Fields without an `#[env(...)]` annotation are left untouched.
///
/// # Example
///
/// See the `envparse` crate documentation for usage examples.
#[proc_macro_derive(EnvParse, attributes(env))]
pub fn derive_envparse(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name
    let struct_name = &input.ident;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "EnvParse only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "EnvParse only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // One bind block per annotated field, in declaration order. The `?`
    // operator makes the pass abort on the first failing field.
    let field_binds = fields.iter().filter_map(|field| {
        let annotation = attrs::annotation(field)?;
        if annotation.is_empty() {
            return None;
        }

        let field_name = field.ident.as_ref().unwrap();
        let field_type = &field.ty;
        let field_name_str = field_name.to_string();
        let kind = type_kind(field_type);

        Some(quote! {
            {
                let __directive = ::envparse::Directive::parse(#annotation);
                let __raw = ::envparse::bind::lookup(&__directive.env_name)?;
                let __value = ::envparse::bind::convert(
                    #kind,
                    #field_name_str,
                    &__raw,
                    &__directive.parser_name,
                    registry,
                )?;
                self.#field_name =
                    ::envparse::bind::assign::<#field_type>(__value, #field_name_str)?;
            }
        })
    });

    // Generate populate() / populate_with() methods
    let expanded = quote! {
        impl #struct_name {
            /// Populate annotated fields from environment variables.
            ///
            /// Uses an empty transformer registry; the built-in `default`
            /// sequence and mapping transformers remain available.
            ///
            /// # Errors
            ///
            /// - A target environment variable is not set (or is empty)
            /// - A value cannot be converted to its field's type
            /// - An annotation names an unregistered transformer
            pub fn populate(&mut self) -> ::envparse::anyhow::Result<()> {
                self.populate_with(&::envparse::ParserRegistry::new())
            }

            /// Populate annotated fields from environment variables,
            /// resolving named transformers through `registry`.
            ///
            /// Fields are bound in declaration order; the first field that
            /// fails aborts the pass and its error is returned unchanged.
            pub fn populate_with(
                &mut self,
                registry: &::envparse::ParserRegistry,
            ) -> ::envparse::anyhow::Result<()> {
                #(#field_binds)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn kind_of(ty: Type) -> String {
        type_kind(&ty).to_string()
    }

    #[test]
    fn test_scalar_types() {
        assert_eq!(kind_of(parse_quote!(bool)), quote!(::envparse::bind::TypeKind::Bool).to_string());
        assert_eq!(kind_of(parse_quote!(i8)), quote!(::envparse::bind::TypeKind::I8).to_string());
        assert_eq!(kind_of(parse_quote!(usize)), quote!(::envparse::bind::TypeKind::Usize).to_string());
        assert_eq!(kind_of(parse_quote!(f64)), quote!(::envparse::bind::TypeKind::F64).to_string());
        assert_eq!(kind_of(parse_quote!(String)), quote!(::envparse::bind::TypeKind::Str).to_string());
    }

    #[test]
    fn test_sequence_and_mapping_types() {
        assert_eq!(kind_of(parse_quote!(Vec<String>)), quote!(::envparse::bind::TypeKind::Seq).to_string());
        assert_eq!(
            kind_of(parse_quote!(std::collections::HashMap<String, String>)),
            quote!(::envparse::bind::TypeKind::Map).to_string()
        );
        assert_eq!(
            kind_of(parse_quote!(BTreeMap<String, u32>)),
            quote!(::envparse::bind::TypeKind::Map).to_string()
        );
    }

    #[test]
    fn test_unrecognized_types_are_other() {
        assert_eq!(kind_of(parse_quote!(Option<String>)), quote!(::envparse::bind::TypeKind::Other).to_string());
        assert_eq!(kind_of(parse_quote!(serde_json::Value)), quote!(::envparse::bind::TypeKind::Other).to_string());
        assert_eq!(kind_of(parse_quote!((u32, u32))), quote!(::envparse::bind::TypeKind::Other).to_string());
    }
}
