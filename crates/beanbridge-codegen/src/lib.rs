// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashSet;
use syn::ext::IdentExt;
use syn::visit_mut::{self, VisitMut};
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// How a field is populated when the builder has no value for it.
enum FieldDefault {
    /// Construction fails with `MissingRequiredProperty`.
    Required,
    /// `Default::default()` of the field type.
    Default,
    /// Call the given function path.
    Function(syn::Path),
}

/// Wire names starting with this prefix carry format metadata (the JSON
/// root tag is `@bean`) and cannot be used as aliases.
const RESERVED_PREFIX: char = '@';

/// Rewrites `Self` in a field type to the concrete type name.
///
/// Field types are emitted inside nested items (`fn __construct`, the shape
/// static) where `Self` does not resolve.
struct ReplaceSelf<'a> {
    name: &'a syn::Ident,
}

impl VisitMut for ReplaceSelf<'_> {
    fn visit_path_mut(&mut self, path: &mut syn::Path) {
        if let Some(first) = path.segments.first_mut() {
            if first.ident == "Self" {
                first.ident = self.name.clone();
            }
        }
        visit_mut::visit_path_mut(self, path);
    }
}

fn resolve_self(ty: &syn::Type, name: &syn::Ident) -> syn::Type {
    let mut ty = ty.clone();
    ReplaceSelf { name }.visit_type_mut(&mut ty);
    ty
}

fn check_alias(alias: &str) -> Result<(), String> {
    if alias.is_empty() {
        return Err("alias must not be empty".to_string());
    }
    if alias.starts_with(RESERVED_PREFIX) {
        return Err(format!(
            "alias `{alias}` is reserved: names starting with `{RESERVED_PREFIX}` carry format metadata"
        ));
    }
    Ok(())
}

struct FieldInfo {
    ident: syn::Ident,
    ty: syn::Type,
    alias: Option<String>,
    default: FieldDefault,
}

/// `#[derive(Record)]` macro: generates the static `RecordShape` and the value
/// conversions that let a struct take part in the bean bridge.
///
/// Field attributes:
/// - `#[record(alias = "wire_name")]`: alternate name accepted on lookup and
///   emitted by encoders
/// - `#[record(default)]`: optional, falls back to `Default::default()`
/// - `#[record(default = "path::to::fn")]`: optional, falls back to `fn()`
///
/// The struct must have named fields, no generic parameters and implement
/// `Clone`.
///
/// Example:
/// ```ignore
/// use beanbridge::Record;
///
/// #[derive(Debug, Clone, PartialEq, Record)]
/// struct Reading {
///     sensor: String,
///     #[record(alias = "val")]
///     value: f64,
///     #[record(default)]
///     retries: u32,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[allow(clippy::too_many_lines)]
fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let mut field_infos = Vec::new();
    let mut wire_names = HashSet::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let (alias, default) = parse_field_attrs(field)?;

        // Canonical names and aliases share one namespace.
        let canonical = ident.unraw().to_string();
        if !wire_names.insert(canonical.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("`{canonical}` is already used as an alias"),
            ));
        }
        if let Some(alias) = &alias {
            if !wire_names.insert(alias.clone()) {
                return Err(syn::Error::new_spanned(
                    ident,
                    format!("alias `{alias}` collides with another property name or alias"),
                ));
            }
        }

        field_infos.push(FieldInfo {
            ident: ident.clone(),
            ty: resolve_self(&field.ty, name),
            alias,
            default,
        });
    }

    let readers: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let reader = format_ident!("__read_{}", ident);
            quote! {
                fn #reader(instance: &dyn ::core::any::Any) -> ::core::option::Option<::beanbridge::Value> {
                    instance
                        .downcast_ref::<#name>()
                        .map(|record| ::beanbridge::ToValue::to_value(&record.#ident))
                }
            }
        })
        .collect();

    let field_shapes: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let name_str = f.ident.unraw().to_string();
            let ty = &f.ty;
            let reader = format_ident!("__read_{}", f.ident);
            let alias = match &f.alias {
                Some(alias) => quote! { ::core::option::Option::Some(#alias) },
                None => quote! { ::core::option::Option::None },
            };
            let required = matches!(f.default, FieldDefault::Required);
            quote! {
                ::beanbridge::FieldShape {
                    name: #name_str,
                    alias: #alias,
                    type_desc: <#ty as ::beanbridge::Describe>::type_desc,
                    required: #required,
                    read: #reader,
                }
            }
        })
        .collect();

    let constructor_args: Vec<_> = field_infos
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let ty = &f.ty;
            let name_str = ident.unraw().to_string();
            match &f.default {
                FieldDefault::Required => quote! {
                    #ident: args.take::<#ty>(#name_str)?
                },
                FieldDefault::Default => quote! {
                    #ident: args.take_or_else::<#ty, _>(#name_str, ::core::default::Default::default)?
                },
                FieldDefault::Function(path) => quote! {
                    #ident: args.take_or_else::<#ty, _>(#name_str, #path)?
                },
            }
        })
        .collect();

    let expanded = quote! {
        impl ::beanbridge::Record for #name {
            fn shape() -> &'static ::beanbridge::RecordShape {
                #(#readers)*

                fn __type_id() -> ::core::any::TypeId {
                    ::core::any::TypeId::of::<#name>()
                }

                fn __construct(
                    args: &mut ::beanbridge::Arguments,
                ) -> ::beanbridge::Result<::beanbridge::Instance> {
                    ::core::result::Result::Ok(::std::boxed::Box::new(#name {
                        #(#constructor_args),*
                    }))
                }

                static SHAPE: ::beanbridge::RecordShape = ::beanbridge::RecordShape {
                    type_name: ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#name)),
                    type_id: __type_id,
                    fields: &[#(#field_shapes),*],
                    construct: __construct,
                };
                &SHAPE
            }
        }

        impl ::beanbridge::Describe for #name {
            fn type_desc() -> ::beanbridge::TypeDesc {
                ::beanbridge::TypeDesc::Record(<#name as ::beanbridge::Record>::shape())
            }
        }

        impl ::beanbridge::ToValue for #name {
            fn to_value(&self) -> ::beanbridge::Value {
                ::beanbridge::Value::Record(::beanbridge::RecordValue::new(::core::clone::Clone::clone(self)))
            }
        }

        impl ::beanbridge::FromValue for #name {
            fn from_value(value: ::beanbridge::Value) -> ::beanbridge::Result<Self> {
                ::beanbridge::RecordValue::extract::<#name>(value)
            }
        }

        impl ::core::convert::From<#name> for ::beanbridge::Value {
            fn from(record: #name) -> Self {
                ::beanbridge::Value::Record(::beanbridge::RecordValue::new(record))
            }
        }
    };

    Ok(expanded)
}

/// Parse `#[record(...)]` attributes on a single field.
fn parse_field_attrs(field: &syn::Field) -> syn::Result<(Option<String>, FieldDefault)> {
    let mut alias = None;
    let mut default = FieldDefault::Required;

    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("alias") {
                let lit: LitStr = meta.value()?.parse()?;
                let value = lit.value();
                check_alias(&value).map_err(|msg| syn::Error::new_spanned(&lit, msg))?;
                alias = Some(value);
                Ok(())
            } else if meta.path.is_ident("default") {
                if meta.input.peek(syn::Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    default = FieldDefault::Function(lit.parse()?);
                } else {
                    default = FieldDefault::Default;
                }
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `alias` or `default`"))
            }
        })?;
    }

    Ok((alias, default))
}
