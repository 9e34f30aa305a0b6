//! Canonical text rendering. Output always re-parses with [`crate::parser`].
use crate::ast::*;
use std::fmt::{self, Display, Formatter, Write};

const INDENT: &str = "  ";

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                f.write_str("\n\n")?;
            }
            write!(f, "{}", definition)?;
        }
        Ok(())
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Definition::Operation(operation) => {
                write!(f, "{}", operation.operation_type)?;
                if let Some(name) = &operation.name {
                    write!(f, " {}", name)?;
                }
                f.write_char(' ')?;
                write_selection_set(f, &operation.selection_set, 0)
            }
            Definition::Schema(schema) => schema.fmt(f),
            Definition::ScalarType(scalar) => scalar.fmt(f),
            Definition::ObjectType(object) => object.fmt(f),
            Definition::InterfaceType(interface) => interface.fmt(f),
            Definition::UnionType(union) => union.fmt(f),
            Definition::EnumType(enumeration) => enumeration.fmt(f),
            Definition::InputObjectType(input) => input.fmt(f),
            Definition::Directive(directive) => {
                write_description(f, &directive.description, "")?;
                write!(f, "directive @{}", directive.name)?;
                write_argument_definitions(f, &directive.arguments)?;
                let locations: Vec<String> = directive
                    .locations
                    .iter()
                    .map(|location| format!("{:?}", location))
                    .collect();
                write!(f, " on {}", locations.join(" | "))
            }
            Definition::Extension(extension) => extension.fmt(f),
        }
    }
}

impl Display for TypeSystemExtension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("extend ")?;
        match self {
            TypeSystemExtension::Schema(schema) => schema.fmt(f),
            TypeSystemExtension::ScalarType(scalar) => scalar.fmt(f),
            TypeSystemExtension::ObjectType(object) => object.fmt(f),
            TypeSystemExtension::InterfaceType(interface) => interface.fmt(f),
            TypeSystemExtension::UnionType(union) => union.fmt(f),
            TypeSystemExtension::EnumType(enumeration) => enumeration.fmt(f),
            TypeSystemExtension::InputObjectType(input) => input.fmt(f),
        }
    }
}

impl Display for SchemaDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, "")?;
        f.write_str("schema")?;
        write_directives(f, &self.directives)?;
        if self.operation_type_definitions.is_empty() {
            return Ok(());
        }
        f.write_str(" {\n")?;
        for operation in &self.operation_type_definitions {
            writeln!(f, "{}{}: {}", INDENT, operation.operation, operation.type_name)?;
        }
        f.write_char('}')
    }
}

impl Display for ScalarTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, "")?;
        write!(f, "scalar {}", self.name)?;
        write_directives(f, &self.directives)
    }
}

impl Display for ObjectTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, "")?;
        write!(f, "type {}", self.name)?;
        write_interfaces(f, &self.interfaces)?;
        write_directives(f, &self.directives)?;
        write_block(f, &self.fields)
    }
}

impl Display for InterfaceTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, "")?;
        write!(f, "interface {}", self.name)?;
        write_interfaces(f, &self.interfaces)?;
        write_directives(f, &self.directives)?;
        write_block(f, &self.fields)
    }
}

impl Display for UnionTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, "")?;
        write!(f, "union {}", self.name)?;
        write_directives(f, &self.directives)?;
        if !self.types.is_empty() {
            write!(f, " = {}", self.types.join(" | "))?;
        }
        Ok(())
    }
}

impl Display for EnumTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, "")?;
        write!(f, "enum {}", self.name)?;
        write_directives(f, &self.directives)?;
        write_block(f, &self.values)
    }
}

impl Display for InputObjectTypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, "")?;
        write!(f, "input {}", self.name)?;
        write_directives(f, &self.directives)?;
        write_block(f, &self.fields)
    }
}

impl Display for FieldDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, INDENT)?;
        f.write_str(&self.name)?;
        write_argument_definitions(f, &self.arguments)?;
        write!(f, ": {}", self.type_reference)?;
        write_directives(f, &self.directives)
    }
}

impl Display for InputValueDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(description) = &self.description {
            write!(f, "\"{}\" ", escape_string(description))?;
        }
        write!(f, "{}: {}", self.name, self.type_reference)?;
        if let Some(default_value) = &self.default_value {
            write!(f, " = {}", default_value)?;
        }
        write_directives(f, &self.directives)
    }
}

impl Display for EnumValueDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_description(f, &self.description, INDENT)?;
        f.write_str(&self.name)?;
        write_directives(f, &self.directives)
    }
}

impl Display for TypeReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TypeReference::NamedType(name) => f.write_str(name),
            TypeReference::ListType(inner) => write!(f, "[{}]", inner),
            TypeReference::NonNullType(inner) => write!(f, "{}!", inner),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::IntValue(value) | Value::FloatValue(value) | Value::EnumValue(value) => {
                f.write_str(value)
            }
            Value::StringValue(value) => write!(f, "\"{}\"", escape_string(value)),
            Value::BooleanValue(value) => write!(f, "{}", value),
            Value::NullValue => f.write_str("null"),
            Value::ListValue(values) => write!(f, "[{}]", join(values, ", ")),
            Value::ObjectValue(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|field| format!("{}: {}", field.name, field.value))
                    .collect();
                write!(f, "{{{}}}", fields.join(", "))
            }
        }
    }
}

impl Display for OperationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        })
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        write_arguments(f, &self.arguments)
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl Display for SelectionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_selection_set(f, self, 0)
    }
}

fn write_selection_set(f: &mut Formatter<'_>, selection_set: &SelectionSet, depth: usize) -> fmt::Result {
    f.write_str("{\n")?;
    for field in &selection_set.fields {
        f.write_str(&INDENT.repeat(depth + 1))?;
        if let Some(alias) = &field.alias {
            write!(f, "{}: ", alias)?;
        }
        f.write_str(&field.name)?;
        write_arguments(f, &field.arguments)?;
        write_directives(f, &field.directives)?;
        if let Some(nested) = &field.selection_set {
            f.write_char(' ')?;
            write_selection_set(f, nested, depth + 1)?;
        }
        f.write_char('\n')?;
    }
    write!(f, "{}}}", INDENT.repeat(depth))
}

fn write_block<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    f.write_str(" {\n")?;
    for item in items {
        writeln!(f, "{}{}", INDENT, item)?;
    }
    f.write_char('}')
}

/// Descriptions go on their own line; `indent` re-indents the line that follows.
fn write_description(f: &mut Formatter<'_>, description: &Option<String>, indent: &str) -> fmt::Result {
    match description {
        Some(description) => write!(f, "\"{}\"\n{}", escape_string(description), indent),
        None => Ok(()),
    }
}

fn write_interfaces(f: &mut Formatter<'_>, interfaces: &[String]) -> fmt::Result {
    if interfaces.is_empty() {
        return Ok(());
    }
    write!(f, " implements {}", interfaces.join(" & "))
}

fn write_directives(f: &mut Formatter<'_>, directives: &[Directive]) -> fmt::Result {
    for directive in directives {
        write!(f, " {}", directive)?;
    }
    Ok(())
}

fn write_arguments(f: &mut Formatter<'_>, arguments: &[Argument]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    write!(f, "({})", join(arguments, ", "))
}

fn write_argument_definitions(f: &mut Formatter<'_>, arguments: &[InputValueDefinition]) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }
    write!(f, "({})", join(arguments, ", "))
}

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Escapes a string for use between double quotes.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{0008}' => escaped.push_str("\\b"),
            '\u{000c}' => escaped.push_str("\\f"),
            c if c < '\u{0020}' => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}
