use crate::parsing::has_attribute;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Error, Fields};

/// Adds the derives a record needs and marks relation fields as not persisted
pub fn model_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(item as DeriveInput);

    let fields = match &mut input.data {
        Data::Struct(data) => match &mut data.fields {
            Fields::Named(fields) => fields,
            _ => {
                return Error::new_spanned(&input.ident, "model requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return Error::new_spanned(&input.ident, "model can only be used on structs")
                .to_compile_error()
                .into()
        }
    };

    for field in fields.named.iter_mut() {
        if has_attribute(&field.attrs, "has_many") {
            field.attrs.push(parse_quote!(#[sqlx(skip)]));
            field.attrs.push(parse_quote!(#[serde(default)]));
        }
    }

    let expanded = quote! {
        #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, sqlx::FromRow, record_crud::Record)]
        #input
    };

    TokenStream::from(expanded)
}
