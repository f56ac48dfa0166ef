//! Serde model of a GraphQL introspection result.
//!
//! Fields the server may omit are all optional or defaulted, because the
//! Pipe endpoint returns shallow results in places (see
//! [`patch_schema`](crate::introspect::patch_schema)).

use serde::Deserialize;

/// The `__schema` object of an introspection result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    /// The root query type.
    #[serde(default)]
    pub query_type: Option<NamedTypeRef>,
    /// The root mutation type, when the schema has one.
    #[serde(default)]
    pub mutation_type: Option<NamedTypeRef>,
    /// The root subscription type, when the schema has one.
    #[serde(default)]
    pub subscription_type: Option<NamedTypeRef>,
    /// Every type in the schema, built-ins included.
    #[serde(default)]
    pub types: Vec<FullType>,
    /// Schema directives.
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// A bare reference to a named type (`{"name": "Query"}`).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedTypeRef {
    /// The type name.
    pub name: String,
}

/// A full type definition from introspection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    /// Type kind: `SCALAR`, `OBJECT`, `INTERFACE`, `UNION`, `ENUM`,
    /// `INPUT_OBJECT`.
    pub kind: String,
    /// Type name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Fields, for objects and interfaces.
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    /// Input fields, for input objects.
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
    /// Implemented interfaces, for objects and interfaces.
    #[serde(default)]
    pub interfaces: Option<Vec<TypeRef>>,
    /// Enum values, for enums.
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
    /// Member types, for unions.
    #[serde(default)]
    pub possible_types: Option<Vec<TypeRef>>,
}

/// A field of an object or interface type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Field arguments.
    #[serde(default)]
    pub args: Vec<InputValue>,
    /// The field's type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Whether the field is deprecated.
    #[serde(default)]
    pub is_deprecated: bool,
    /// Deprecation reason, when deprecated.
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// An argument or input-object field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    /// Name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// The value's type.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Default value as a GraphQL literal string, when present.
    #[serde(default)]
    pub default_value: Option<String>,
}

/// One value of an enum type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    /// Value name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the value is deprecated.
    #[serde(default)]
    pub is_deprecated: bool,
    /// Deprecation reason, when deprecated.
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

/// A schema directive definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    /// Directive name, without the leading `@`.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Valid locations.
    #[serde(default)]
    pub locations: Vec<String>,
    /// Directive arguments.
    #[serde(default)]
    pub args: Vec<InputValue>,
}

/// A possibly-wrapped type reference (`NON_NULL` / `LIST` / named leaf).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Reference kind.
    pub kind: String,
    /// Name, for named leaves; `null` for wrappers.
    #[serde(default)]
    pub name: Option<String>,
    /// The wrapped type, for `NON_NULL` and `LIST` wrappers.
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Renders the reference as GraphQL type syntax (`[Track!]!`).
    ///
    /// Wrappers missing their inner type render as `String`; feeding the
    /// schema through [`patch_schema`](crate::introspect::patch_schema)
    /// first makes that case explicit in the data instead.
    #[must_use]
    pub fn render(&self) -> String {
        match self.kind.as_str() {
            "NON_NULL" => match &self.of_type {
                Some(inner) => format!("{}!", inner.render()),
                None => "String".to_string(),
            },
            "LIST" => match &self.of_type {
                Some(inner) => format!("[{}]", inner.render()),
                None => "String".to_string(),
            },
            _ => self.name.clone().unwrap_or_else(|| "String".to_string()),
        }
    }
}
