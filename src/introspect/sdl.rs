//! Conversion from an introspection result to SDL text.
//!
//! The Pipe endpoint serves introspection results with a few gaps that
//! break strict consumers: union types without `possibleTypes`, object
//! types without `interfaces`, and `NON_NULL`/`LIST` wrappers whose inner
//! type was truncated. [`patch_schema`] repairs those in place before
//! [`introspection_to_sdl`] renders the schema.

use std::fmt::Write as _;

use super::types::{Directive, EnumValue, Field, FullType, InputValue, IntrospectionSchema, TypeRef};

/// Scalars every GraphQL schema has implicitly; SDL never declares them.
const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Directives every GraphQL schema has implicitly.
const BUILTIN_DIRECTIVES: [&str; 4] = ["skip", "include", "deprecated", "specifiedBy"];

/// Repairs known gaps in a Pipe introspection result, in place.
///
/// - Unions missing `possibleTypes` get an empty list
/// - Objects and interfaces missing `interfaces` get an empty list
/// - `NON_NULL` / `LIST` wrappers missing their inner type get a `String`
///   scalar leaf
pub fn patch_schema(schema: &mut IntrospectionSchema) {
    for definition in &mut schema.types {
        match definition.kind.as_str() {
            "UNION" => {
                if definition.possible_types.is_none() {
                    definition.possible_types = Some(Vec::new());
                }
            }
            "OBJECT" | "INTERFACE" => {
                if definition.interfaces.is_none() {
                    definition.interfaces = Some(Vec::new());
                }
            }
            _ => {}
        }

        if let Some(fields) = &mut definition.fields {
            for field in fields {
                patch_type_ref(&mut field.type_ref);
                for arg in &mut field.args {
                    patch_type_ref(&mut arg.type_ref);
                }
            }
        }
        if let Some(input_fields) = &mut definition.input_fields {
            for input in input_fields {
                patch_type_ref(&mut input.type_ref);
            }
        }
    }

    for directive in &mut schema.directives {
        for arg in &mut directive.args {
            patch_type_ref(&mut arg.type_ref);
        }
    }
}

/// Recursively repairs a type reference whose wrapper chain was truncated.
fn patch_type_ref(reference: &mut TypeRef) {
    if let Some(inner) = &mut reference.of_type {
        patch_type_ref(inner);
    } else if reference.kind == "NON_NULL" || reference.kind == "LIST" {
        reference.of_type = Some(Box::new(TypeRef {
            kind: "SCALAR".to_string(),
            name: Some("String".to_string()),
            of_type: None,
        }));
    }
}

/// Renders an introspection schema as SDL.
///
/// Built-in scalars, built-in directives, and introspection meta-types
/// (`__Schema`, `__Type`, ...) are omitted, matching conventional SDL
/// printers. Call [`patch_schema`] first when the result came from the
/// Pipe endpoint.
#[must_use]
pub fn introspection_to_sdl(schema: &IntrospectionSchema) -> String {
    let mut blocks = Vec::new();

    if let Some(block) = render_schema_block(schema) {
        blocks.push(block);
    }

    for directive in &schema.directives {
        if !BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
            blocks.push(render_directive(directive));
        }
    }

    for definition in &schema.types {
        if definition.name.starts_with("__") {
            continue;
        }
        if definition.kind == "SCALAR" && BUILTIN_SCALARS.contains(&definition.name.as_str()) {
            continue;
        }
        blocks.push(render_type(definition));
    }

    let mut sdl = blocks.join("\n\n");
    sdl.push('\n');
    sdl
}

/// Renders the `schema { ... }` block, or `None` when the root type names
/// all match their conventional defaults.
fn render_schema_block(schema: &IntrospectionSchema) -> Option<String> {
    let query = schema.query_type.as_ref().map(|t| t.name.as_str());
    let mutation = schema.mutation_type.as_ref().map(|t| t.name.as_str());
    let subscription = schema.subscription_type.as_ref().map(|t| t.name.as_str());

    let is_conventional = query.map_or(true, |name| name == "Query")
        && mutation.map_or(true, |name| name == "Mutation")
        && subscription.map_or(true, |name| name == "Subscription");
    if is_conventional {
        return None;
    }

    let mut block = String::from("schema {\n");
    if let Some(name) = query {
        let _ = writeln!(block, "  query: {name}");
    }
    if let Some(name) = mutation {
        let _ = writeln!(block, "  mutation: {name}");
    }
    if let Some(name) = subscription {
        let _ = writeln!(block, "  subscription: {name}");
    }
    block.push('}');
    Some(block)
}

fn render_directive(directive: &Directive) -> String {
    let mut block = String::new();
    write_description(&mut block, directive.description.as_deref(), "");
    let _ = write!(block, "directive @{}", directive.name);
    block.push_str(&render_args(&directive.args));
    if !directive.locations.is_empty() {
        let _ = write!(block, " on {}", directive.locations.join(" | "));
    }
    block
}

fn render_type(definition: &FullType) -> String {
    match definition.kind.as_str() {
        "SCALAR" => {
            let mut block = String::new();
            write_description(&mut block, definition.description.as_deref(), "");
            let _ = write!(block, "scalar {}", definition.name);
            block
        }
        "OBJECT" => render_fielded(definition, "type"),
        "INTERFACE" => render_fielded(definition, "interface"),
        "UNION" => {
            let mut block = String::new();
            write_description(&mut block, definition.description.as_deref(), "");
            let _ = write!(block, "union {}", definition.name);
            let members: Vec<&str> = definition
                .possible_types
                .iter()
                .flatten()
                .filter_map(|member| member.name.as_deref())
                .collect();
            if !members.is_empty() {
                let _ = write!(block, " = {}", members.join(" | "));
            }
            block
        }
        "ENUM" => {
            let mut block = String::new();
            write_description(&mut block, definition.description.as_deref(), "");
            let _ = writeln!(block, "enum {} {{", definition.name);
            for value in definition.enum_values.iter().flatten() {
                write_enum_value(&mut block, value);
            }
            block.push('}');
            block
        }
        "INPUT_OBJECT" => {
            let mut block = String::new();
            write_description(&mut block, definition.description.as_deref(), "");
            let _ = writeln!(block, "input {} {{", definition.name);
            for input in definition.input_fields.iter().flatten() {
                write_description(&mut block, input.description.as_deref(), "  ");
                let _ = writeln!(block, "  {}", render_input_value(input));
            }
            block.push('}');
            block
        }
        // Introspection only defines the six kinds above; anything else is
        // preserved as a comment so the output stays parseable.
        other => format!("# unsupported type kind {other}: {}", definition.name),
    }
}

fn render_fielded(definition: &FullType, keyword: &str) -> String {
    let mut block = String::new();
    write_description(&mut block, definition.description.as_deref(), "");
    let _ = write!(block, "{keyword} {}", definition.name);

    let implemented: Vec<&str> = definition
        .interfaces
        .iter()
        .flatten()
        .filter_map(|interface| interface.name.as_deref())
        .collect();
    if !implemented.is_empty() {
        let _ = write!(block, " implements {}", implemented.join(" & "));
    }

    let fields = definition.fields.as_deref().unwrap_or_default();
    if fields.is_empty() {
        return block;
    }

    block.push_str(" {\n");
    for field in fields {
        write_field(&mut block, field);
    }
    block.push('}');
    block
}

fn write_field(block: &mut String, field: &Field) {
    write_description(block, field.description.as_deref(), "  ");
    let _ = write!(
        block,
        "  {}{}: {}",
        field.name,
        render_args(&field.args),
        field.type_ref.render()
    );
    write_deprecation(block, field.is_deprecated, field.deprecation_reason.as_deref());
    block.push('\n');
}

fn write_enum_value(block: &mut String, value: &EnumValue) {
    write_description(block, value.description.as_deref(), "  ");
    let _ = write!(block, "  {}", value.name);
    write_deprecation(block, value.is_deprecated, value.deprecation_reason.as_deref());
    block.push('\n');
}

fn render_args(args: &[InputValue]) -> String {
    if args.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = args.iter().map(render_input_value).collect();
    format!("({})", rendered.join(", "))
}

fn render_input_value(input: &InputValue) -> String {
    let mut rendered = format!("{}: {}", input.name, input.type_ref.render());
    if let Some(default) = &input.default_value {
        let _ = write!(rendered, " = {default}");
    }
    rendered
}

fn write_deprecation(block: &mut String, is_deprecated: bool, reason: Option<&str>) {
    if !is_deprecated {
        return;
    }
    match reason {
        Some(reason) => {
            let _ = write!(block, " @deprecated(reason: \"{}\")", escape_string(reason));
        }
        None => block.push_str(" @deprecated"),
    }
}

/// Writes a `"""..."""` description block at the given indent.
fn write_description(block: &mut String, description: Option<&str>, indent: &str) {
    let Some(description) = description.filter(|text| !text.is_empty()) else {
        return;
    };
    if description.contains('\n') || description.contains('"') {
        let _ = writeln!(block, "{indent}\"\"\"");
        for line in description.lines() {
            let _ = writeln!(block, "{indent}{line}");
        }
        let _ = writeln!(block, "{indent}\"\"\"");
    } else {
        let _ = writeln!(block, "{indent}\"\"\"{description}\"\"\"");
    }
}

fn escape_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
