//! Procedural macros for record types
//!
//! This crate provides the `#[model]` macro and the `Record` derive, which
//! generate the column enum, the relation enum and the `Record` implementation
//! for a struct.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod code_generation;
mod model_macro;
mod parsing;

use code_generation::{generate_column_enum, generate_record_impl, generate_relation_enum};
use model_macro::model_attribute;
use parsing::{parse_field_attributes, parse_table_attributes};

/// Derive macro for the `Record` trait
///
/// Note: It's recommended to use the `#[model]` attribute macro instead,
/// which automatically includes this derive along with other necessary derives.
///
/// Manual usage:
/// ```ignore
/// #[derive(Debug, Clone, Default, sqlx::FromRow, Record)]
/// #[table(name = "users")]
/// pub struct User {
///     #[primary_key]
///     pub id: i64,
///     pub name: String,
///     #[created_at]
///     pub created_at: Option<DateTime<Utc>>,
///     #[updated_at]
///     pub updated_at: Option<DateTime<Utc>>,
///     #[soft_delete]
///     pub deleted_at: Option<DateTime<Utc>>,
///     #[sqlx(skip)]
///     #[has_many(Post, foreign_key = "user_id")]
///     pub posts: Vec<Post>,
/// }
/// ```
///
/// Generates `UserColumn` (one variant per persisted field, in declaration
/// order) and `UserRelation` (one variant per `#[has_many]` field).
#[proc_macro_derive(
    Record,
    attributes(table, primary_key, created_at, updated_at, soft_delete, has_many)
)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let table_info = match parse_table_attributes(&input.attrs) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let field_info = match parse_field_attributes(&input.data) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let column_enum = generate_column_enum(&input, &field_info);
    let relation_enum = generate_relation_enum(&input, &field_info);
    let record_impl = generate_record_impl(&input, &table_info, &field_info);

    let expanded = quote::quote! {
        #column_enum
        #relation_enum
        #record_impl
    };

    TokenStream::from(expanded)
}

/// Convenience attribute macro that adds all necessary derives for a record
///
/// Usage:
/// ```ignore
/// #[model]
/// #[table(name = "users")]
/// pub struct User {
///     #[primary_key]
///     pub id: i64,
///     pub name: String,
///     #[has_many(Post, foreign_key = "user_id")]
///     pub posts: Vec<Post>,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
