//! Parsing utilities for record attributes
//!
//! Handles `#[table]`, the lifecycle column markers and `#[has_many]`, and
//! validates table and column names.

use syn::{
    ext::IdentExt, parse::Parse, parse::ParseStream, Attribute, Data, Error, Fields, Ident,
    LitStr, Result, Token, Type,
};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate column name and return syn::Error for better proc macro error handling
pub fn validate_column_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid column name '{}': {}", name, e)))
}

/// Names are always double-quoted in generated SQL, so keywords are allowed;
/// only the PostgreSQL identifier shape is enforced
fn validate_identifier(name: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    // PostgreSQL NAMEDATALEN - 1
    if name.len() > 63 {
        return Err(format!(
            "Name '{}' is too long: {} characters (max 63)",
            name,
            name.len()
        ));
    }

    let first_char = name
        .chars()
        .next()
        .ok_or_else(|| "Name cannot be empty".to_string())?;
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(format!(
            "Name '{}' must start with a letter or underscore",
            name
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!(
            "Name '{}' contains invalid characters: only alphanumeric characters and underscores are allowed",
            name
        ));
    }

    Ok(())
}

/// `snake_case` (or `__wrapped__`) field name to an `UpperCamel` variant name
pub fn to_upper_camel(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `#[has_many(Child, foreign_key = "parent_id")]`
struct HasManyArgs {
    target: Type,
    foreign_key: LitStr,
}

impl Parse for HasManyArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let target: Type = input.parse()?;
        input.parse::<Token![,]>()?;

        let key: Ident = input.parse()?;
        if key != "foreign_key" {
            return Err(Error::new(key.span(), "expected `foreign_key = \"...\"`"));
        }
        input.parse::<Token![=]>()?;
        let foreign_key: LitStr = input.parse()?;

        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }

        Ok(HasManyArgs {
            target,
            foreign_key,
        })
    }
}

#[derive(Debug)]
pub struct TableInfo {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub field: Ident,
    pub name: String,
    pub variant: Ident,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct RelationInfo {
    pub field: Ident,
    pub name: String,
    pub variant: Ident,
    pub target: Type,
    pub foreign_key: String,
}

#[derive(Debug)]
pub struct FieldInfo {
    pub columns: Vec<ColumnInfo>,
    pub relations: Vec<RelationInfo>,
    pub primary_key: ColumnInfo,
    pub created_at: Option<ColumnInfo>,
    pub updated_at: Option<ColumnInfo>,
    pub soft_delete: Option<ColumnInfo>,
}

pub fn parse_table_attributes(attrs: &[Attribute]) -> Result<TableInfo> {
    let mut table_name: Option<LitStr> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                table_name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported table attribute, expected `name`"))
            }
        })?;
    }

    let table_name = table_name.ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "table attribute is required: add #[table(name = \"table_name\")] to your struct",
        )
    })?;

    validate_table_name_syn(&table_name.value(), table_name.span())?;

    Ok(TableInfo {
        name: table_name.value(),
    })
}

/// Assign `column` to a single-use lifecycle slot
fn set_once(
    slot: &mut Option<ColumnInfo>,
    column: &ColumnInfo,
    marker: &str,
) -> Result<()> {
    if slot.is_some() {
        return Err(Error::new(
            column.field.span(),
            format!("only one field may be marked #[{}]", marker),
        ));
    }
    *slot = Some(column.clone());
    Ok(())
}

pub fn parse_field_attributes(data: &Data) -> Result<FieldInfo> {
    let fields_named = match data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields_named) => fields_named,
            _ => {
                return Err(Error::new(
                    proc_macro2::Span::call_site(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                proc_macro2::Span::call_site(),
                "Record can only be derived for structs with named fields",
            ))
        }
    };

    let mut columns = Vec::new();
    let mut relations = Vec::new();
    let mut primary_key = None;
    let mut created_at = None;
    let mut updated_at = None;
    let mut soft_delete = None;

    for field in &fields_named.named {
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;
        let name = field_ident.unraw().to_string();
        let variant_name = to_upper_camel(&name);
        if variant_name.is_empty() {
            return Err(Error::new(
                field_ident.span(),
                format!("cannot derive a variant name from field '{}'", name),
            ));
        }
        let variant = Ident::new(&variant_name, field_ident.span());

        if let Some(attr) = field
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("has_many"))
        {
            let args: HasManyArgs = attr.parse_args()?;
            validate_column_name_syn(&args.foreign_key.value(), args.foreign_key.span())?;
            relations.push(RelationInfo {
                field: field_ident.clone(),
                name,
                variant,
                target: args.target,
                foreign_key: args.foreign_key.value(),
            });
            continue;
        }

        validate_column_name_syn(&name, field_ident.span())?;

        let column = ColumnInfo {
            field: field_ident.clone(),
            name,
            variant,
            ty: field.ty.clone(),
        };

        if has_attribute(&field.attrs, "primary_key") {
            set_once(&mut primary_key, &column, "primary_key")?;
        }
        if has_attribute(&field.attrs, "created_at") {
            set_once(&mut created_at, &column, "created_at")?;
        }
        if has_attribute(&field.attrs, "updated_at") {
            set_once(&mut updated_at, &column, "updated_at")?;
        }
        if has_attribute(&field.attrs, "soft_delete") {
            set_once(&mut soft_delete, &column, "soft_delete")?;
        }

        columns.push(column);
    }

    let primary_key = primary_key.ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "Record requires a field marked #[primary_key]",
        )
    })?;

    Ok(FieldInfo {
        columns,
        relations,
        primary_key,
        created_at,
        updated_at,
        soft_delete,
    })
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
