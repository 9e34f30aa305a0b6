//! Schema text drawn from the type system grammar. Names may clash and types
//! may be undefined.
use crate::ast::{
    Argument, Definition, Directive, FieldDefinition, InputValueDefinition, ObjectField,
    ObjectTypeDefinition, ScalarTypeDefinition, TypeReference, Value,
};
use crate::config::SchemaTextConfig;
use crate::error::Error;
use crate::primitive::{float_text, int_text};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use proptest::sample::select;

const NAME_START: &str = "_ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const NAME_CONTINUE: &str = "_0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const MAX_NAME_LENGTH: usize = 8;

/// `[_A-Za-z][_0-9A-Za-z]*`
pub fn name() -> BoxedStrategy<String> {
    let start: Vec<char> = NAME_START.chars().collect();
    let rest: Vec<char> = NAME_CONTINUE.chars().collect();
    (select(start), vec(select(rest), 0..MAX_NAME_LENGTH))
        .prop_map(|(first, rest)| std::iter::once(first).chain(rest).collect())
        .boxed()
}

fn description() -> BoxedStrategy<Option<String>> {
    option::weighted(0.25, any::<String>()).boxed()
}

/// `@skip(if: Boolean)` or `@include(if: Boolean)`.
pub fn directive() -> BoxedStrategy<Directive> {
    (select(vec!["skip", "include"]), any::<bool>())
        .prop_map(|(name, condition)| Directive {
            name: String::from(name),
            arguments: vec![Argument {
                name: String::from("if"),
                value: Value::BooleanValue(condition),
            }],
        })
        .boxed()
}

fn directives(config: &SchemaTextConfig) -> BoxedStrategy<Vec<Directive>> {
    vec(directive(), 0..=config.max_directives).boxed()
}

/// Named types wrapped in lists and non-null markers, at most `max_depth` lists deep.
pub fn type_reference(max_depth: u32) -> BoxedStrategy<TypeReference> {
    let named = (name(), any::<bool>())
        .prop_map(|(name, non_null)| maybe_non_null(TypeReference::NamedType(name), non_null));
    named
        .prop_recursive(max_depth, 8, 1, |inner| {
            (inner, any::<bool>())
                .prop_map(|(item, non_null)| maybe_non_null(TypeReference::list(item), non_null))
        })
        .boxed()
}

fn maybe_non_null(ty: TypeReference, non_null: bool) -> TypeReference {
    if non_null {
        TypeReference::non_null(ty)
    } else {
        ty
    }
}

/// Constant values as they may appear in default values.
pub fn const_value() -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        int_text().prop_map(Value::IntValue),
        float_text().prop_map(Value::FloatValue),
        any::<String>().prop_map(Value::StringValue),
        any::<bool>().prop_map(Value::BooleanValue),
        Just(Value::NullValue),
        name().prop_map(enum_value).prop_map(Value::EnumValue),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..3).prop_map(Value::ListValue),
            vec((name(), inner), 0..3).prop_map(|fields| {
                Value::ObjectValue(
                    fields
                        .into_iter()
                        .map(|(name, value)| ObjectField { name, value })
                        .collect(),
                )
            }),
        ]
    })
    .boxed()
}

/// `true`, `false` and `null` would read back as other kinds of value.
fn enum_value(name: String) -> String {
    match name.as_str() {
        "true" | "false" | "null" => format!("{}_", name),
        _ => name,
    }
}

pub fn input_value_definition(config: &SchemaTextConfig) -> BoxedStrategy<InputValueDefinition> {
    (
        description(),
        name(),
        type_reference(config.max_type_depth),
        option::weighted(0.3, const_value()),
        directives(config),
    )
        .prop_map(
            |(description, name, type_reference, default_value, directives)| InputValueDefinition {
                name,
                type_reference,
                default_value,
                description,
                directives,
            },
        )
        .boxed()
}

pub fn field_definition(config: &SchemaTextConfig) -> BoxedStrategy<FieldDefinition> {
    (
        description(),
        name(),
        vec(input_value_definition(config), 0..=config.max_arguments),
        type_reference(config.max_type_depth),
        directives(config),
    )
        .prop_map(|(description, name, arguments, type_reference, directives)| FieldDefinition {
            name,
            type_reference,
            arguments,
            description,
            directives,
        })
        .boxed()
}

pub fn scalar_type_definition(config: &SchemaTextConfig) -> BoxedStrategy<Definition> {
    (description(), name(), directives(config))
        .prop_map(|(description, name, directives)| {
            Definition::ScalarType(ScalarTypeDefinition {
                name,
                description,
                directives,
            })
        })
        .boxed()
}

pub fn object_type_definition(config: &SchemaTextConfig) -> BoxedStrategy<Definition> {
    (
        description(),
        name(),
        vec(name(), 0..=config.max_interfaces),
        directives(config),
        vec(field_definition(config), 0..=config.max_fields),
    )
        .prop_map(|(description, name, interfaces, directives, fields)| {
            Definition::ObjectType(ObjectTypeDefinition {
                name,
                interfaces,
                fields,
                description,
                directives,
            })
        })
        .boxed()
}

pub fn type_definition(config: &SchemaTextConfig) -> BoxedStrategy<Definition> {
    prop_oneof![scalar_type_definition(config), object_type_definition(config)].boxed()
}

/// Between `min_definitions` and `max_definitions` drawn definitions, printed
/// and joined by newlines.
pub fn definitions_text(
    definition: BoxedStrategy<Definition>,
    config: &SchemaTextConfig,
) -> Result<BoxedStrategy<String>, Error> {
    config.validate()?;
    Ok(vec(definition, config.min_definitions..=config.max_definitions)
        .prop_map(|definitions| {
            definitions
                .iter()
                .map(|definition| definition.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .boxed())
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn schema_text(config: &SchemaTextConfig) -> Result<BoxedStrategy<String>, Error> {
    definitions_text(type_definition(config), config)
}
