//! Code generation for record types
//!
//! Generated code names the runtime crate as `record_crud`, so it must be in
//! scope where the derive is used (directly or through the crudhaus prelude).

use crate::parsing::{ColumnInfo, FieldInfo, TableInfo};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Ident};

pub fn column_enum_ident(input: &DeriveInput) -> Ident {
    format_ident!("{}Column", input.ident)
}

pub fn relation_enum_ident(input: &DeriveInput) -> Ident {
    format_ident!("{}Relation", input.ident)
}

/// `<Name>Column`: one variant per persisted field, ordered by declaration
pub fn generate_column_enum(input: &DeriveInput, field_info: &FieldInfo) -> TokenStream {
    let vis = &input.vis;
    let enum_ident = column_enum_ident(input);
    let variants: Vec<&Ident> = field_info.columns.iter().map(|c| &c.variant).collect();
    let names: Vec<&str> = field_info.columns.iter().map(|c| c.name.as_str()).collect();
    let doc = format!("Columns of `{}`", input.ident);

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #vis enum #enum_ident {
            #(#variants,)*
        }

        impl record_crud::Column for #enum_ident {
            fn name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            fn all() -> &'static [Self] {
                &[#(Self::#variants,)*]
            }
        }
    }
}

/// `<Name>Relation`: one variant per `#[has_many]` field, possibly none
pub fn generate_relation_enum(input: &DeriveInput, field_info: &FieldInfo) -> TokenStream {
    let vis = &input.vis;
    let enum_ident = relation_enum_ident(input);
    let variants: Vec<&Ident> = field_info.relations.iter().map(|r| &r.variant).collect();
    let names: Vec<&str> = field_info.relations.iter().map(|r| r.name.as_str()).collect();
    let doc = format!("Has-many relations of `{}`", input.ident);

    let name_body = if variants.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(Self::#variants => #names,)*
            }
        }
    };

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #vis enum #enum_ident {
            #(#variants,)*
        }

        impl record_crud::Relation for #enum_ident {
            fn name(&self) -> &'static str {
                #name_body
            }

            fn all() -> &'static [Self] {
                &[#(Self::#variants,)*]
            }
        }
    }
}

fn lifecycle_column_fn(
    fn_name: &str,
    column_enum: &Ident,
    column: &Option<ColumnInfo>,
) -> TokenStream {
    let fn_ident = format_ident!("{}", fn_name);
    match column {
        Some(column) => {
            let variant = &column.variant;
            quote! {
                fn #fn_ident() -> ::core::option::Option<Self::Column> {
                    ::core::option::Option::Some(#column_enum::#variant)
                }
            }
        }
        None => TokenStream::new(),
    }
}

fn generate_eager_load(relation_enum: &Ident, field_info: &FieldInfo) -> TokenStream {
    let body = if field_info.relations.is_empty() {
        quote! {
            let _ = (records, executor);
            match relation {}
        }
    } else {
        let arms = field_info.relations.iter().map(|relation| {
            let variant = &relation.variant;
            let field = &relation.field;
            let target = &relation.target;
            let name = &relation.name;
            let foreign_key = &relation.foreign_key;
            quote! {
                #relation_enum::#variant => {
                    record_crud::relation::load_has_many::<Self, #target, E>(
                        executor,
                        records,
                        #name,
                        #foreign_key,
                        |record, children| record.#field = children,
                    )
                    .await
                }
            }
        });
        quote! {
            match relation {
                #(#arms)*
            }
        }
    };

    quote! {
        async fn eager_load<E>(
            records: &mut [Self],
            relation: Self::Relation,
            executor: &E,
        ) -> ::core::result::Result<(), record_crud::CrudError>
        where
            E: record_crud::Executor,
        {
            #body
        }
    }
}

pub fn generate_record_impl(
    input: &DeriveInput,
    table_info: &TableInfo,
    field_info: &FieldInfo,
) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let column_enum = column_enum_ident(input);
    let relation_enum = relation_enum_ident(input);
    let table_name = &table_info.name;

    let pk = &field_info.primary_key;
    let pk_field = &pk.field;
    let pk_type = &pk.ty;
    let pk_variant = &pk.variant;

    let created_at_fn =
        lifecycle_column_fn("created_at_column", &column_enum, &field_info.created_at);
    let updated_at_fn =
        lifecycle_column_fn("updated_at_column", &column_enum, &field_info.updated_at);
    let soft_delete_fn =
        lifecycle_column_fn("soft_delete_column", &column_enum, &field_info.soft_delete);

    let variants: Vec<&Ident> = field_info.columns.iter().map(|c| &c.variant).collect();
    let fields: Vec<&Ident> = field_info.columns.iter().map(|c| &c.field).collect();
    let relation_fields: Vec<&Ident> = field_info.relations.iter().map(|r| &r.field).collect();

    let eager_load_fn = generate_eager_load(&relation_enum, field_info);

    quote! {
        #[record_crud::async_trait::async_trait]
        impl #impl_generics record_crud::Record for #name #ty_generics #where_clause {
            type Id = #pk_type;
            type Column = #column_enum;
            type Relation = #relation_enum;

            fn table_name() -> &'static str {
                #table_name
            }

            fn primary_key_column() -> Self::Column {
                #column_enum::#pk_variant
            }

            fn primary_key(&self) -> Self::Id {
                ::core::clone::Clone::clone(&self.#pk_field)
            }

            #created_at_fn
            #updated_at_fn
            #soft_delete_fn

            fn value(&self, column: Self::Column) -> record_crud::SqlValue {
                match column {
                    #(#column_enum::#variants => record_crud::SqlValue::from(
                        ::core::clone::Clone::clone(&self.#fields)
                    ),)*
                }
            }

            fn column_is_zero(&self, column: Self::Column) -> bool {
                match column {
                    #(#column_enum::#variants => record_crud::type_mapping::IsZero::is_zero(&self.#fields),)*
                }
            }

            fn set_value(
                &mut self,
                column: Self::Column,
                value: record_crud::SqlValue,
            ) -> ::core::result::Result<(), record_crud::type_mapping::ConversionError> {
                match column {
                    #(#column_enum::#variants => {
                        self.#fields = record_crud::type_mapping::FromSqlValue::from_sql_value(value)?;
                    })*
                }
                ::core::result::Result::Ok(())
            }

            fn reset_value(&mut self, column: Self::Column) {
                match column {
                    #(#column_enum::#variants => {
                        self.#fields = ::core::default::Default::default();
                    })*
                }
            }

            fn detach_relations(&mut self) {
                #(self.#relation_fields = ::core::default::Default::default();)*
            }

            #eager_load_fn
        }
    }
}
