//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates `Record::fields()` plus field name constants, so columns can be
//! registered with `binder.field(Player::SCORE)` instead of bare strings.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_report_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_entries: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_report_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        // Raw identifiers (`r#type`) are looked up without the prefix
        let ident_name = field_name.to_string();
        let ident_name = ident_name.trim_start_matches("r#");
        let lookup_name = attrs.rename.unwrap_or_else(|| ident_name.to_string());
        let title = attrs.title.unwrap_or_else(|| lookup_name.clone());

        let const_name = format_ident!("{}", to_screaming_snake_case(&lookup_name));
        field_constants.push(quote! {
            /// Field name for declarative column registration.
            pub const #const_name: &'static str = #lookup_name;
        });

        let ty = &field.ty;
        let description = attrs
            .description
            .map(|d| quote! { .with_description(#d) });

        field_entries.push(quote! {
            ::standout_report::Field::new::<#ty>(
                #lookup_name,
                #title,
                |record: &Self| ::standout_report::ToValue::to_value(&record.#field_name),
            )
            #description
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::standout_report::Record for #struct_name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::standout_report::Field<Self>> {
                ::std::vec![
                    #(#field_entries),*
                ]
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
