use crate::ast::{Definition, Document, Field, ObjectField, OperationType, SelectionSet, TypeReference, Value};
use crate::schema::{BuiltinScalar, FieldDef, InputObjectType, Schema, TypeDefinition, TypeKind};
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: &str) -> ValidationError {
        ValidationError {
            message: String::from(message),
        }
    }
}

pub fn validate(schema: &Schema, document: &Document) -> Result<(), ValidationError> {
    for definition in &document.definitions {
        match definition {
            Definition::Operation(operation) => {
                if operation.operation_type != OperationType::Query {
                    return Err(ValidationError::new(&format!(
                        "{} operations are not supported",
                        operation.operation_type
                    )));
                }
                let root = schema
                    .query_root()
                    .map_err(|error| ValidationError::new(&error.to_string()))?;
                validate_selection_set(schema, &root.name, Some(&root.fields), &operation.selection_set)?;
            }
            _ => return Err(ValidationError::new("query documents may only contain operations")),
        }
    }
    Ok(())
}

/// `fields` is `None` for unions, where only `__typename` can be selected.
fn validate_selection_set(
    schema: &Schema,
    parent: &str,
    fields: Option<&IndexMap<String, FieldDef>>,
    selection_set: &SelectionSet,
) -> Result<(), ValidationError> {
    if selection_set.fields.is_empty() {
        return Err(ValidationError::new(&format!("empty selection set on `{}`", parent)));
    }
    for field in &selection_set.fields {
        if field.name == "__typename" {
            if !field.arguments.is_empty() || field.selection_set.is_some() {
                return Err(ValidationError::new("`__typename` takes no arguments or selections"));
            }
            continue;
        }
        let definition = fields
            .and_then(|fields| fields.get(&field.name))
            .ok_or_else(|| {
                ValidationError::new(&format!("type `{}` has no field `{}`", parent, field.name))
            })?;
        validate_arguments(schema, definition, field)?;
        validate_subselection(schema, definition, field)?;
    }
    Ok(())
}

fn validate_subselection(schema: &Schema, definition: &FieldDef, field: &Field) -> Result<(), ValidationError> {
    let type_name = definition.ty.named_type();
    match (schema.get_type(type_name), &field.selection_set) {
        (Some(TypeDefinition::Object(object)), Some(nested))
        | (Some(TypeDefinition::Interface(object)), Some(nested)) => {
            validate_selection_set(schema, &object.name, Some(&object.fields), nested)
        }
        (Some(TypeDefinition::Union(union)), Some(nested)) => {
            validate_selection_set(schema, &union.name, None, nested)
        }
        (Some(TypeDefinition::Scalar(_)), None) | (Some(TypeDefinition::Enum(_)), None) => Ok(()),
        (Some(TypeDefinition::Scalar(_)), Some(_)) | (Some(TypeDefinition::Enum(_)), Some(_)) => {
            Err(ValidationError::new(&format!(
                "field `{}` of leaf type `{}` cannot have a selection set",
                field.name, type_name
            )))
        }
        (Some(TypeDefinition::Object(_)), None)
        | (Some(TypeDefinition::Interface(_)), None)
        | (Some(TypeDefinition::Union(_)), None) => Err(ValidationError::new(&format!(
            "field `{}` of type `{}` needs a selection set",
            field.name, type_name
        ))),
        (Some(TypeDefinition::InputObject(_)), _) | (None, _) => Err(ValidationError::new(&format!(
            "field `{}` has no valid output type",
            field.name
        ))),
    }
}

fn validate_arguments(schema: &Schema, definition: &FieldDef, field: &Field) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for argument in &field.arguments {
        if !seen.insert(argument.name.as_str()) {
            return Err(ValidationError::new(&format!(
                "argument `{}` given twice to `{}`",
                argument.name, field.name
            )));
        }
        let declared = definition.arguments.get(&argument.name).ok_or_else(|| {
            ValidationError::new(&format!(
                "field `{}` has no argument `{}`",
                field.name, argument.name
            ))
        })?;
        check_value(schema, &declared.ty, &argument.value).map_err(|message| {
            ValidationError::new(&format!(
                "argument `{}` of `{}`: {}",
                argument.name, field.name, message
            ))
        })?;
    }
    for declared in definition.arguments.values() {
        if declared.is_required() && !seen.contains(declared.name.as_str()) {
            return Err(ValidationError::new(&format!(
                "field `{}` is missing required argument `{}`",
                field.name, declared.name
            )));
        }
    }
    Ok(())
}

fn check_value(schema: &Schema, ty: &TypeReference, value: &Value) -> Result<(), String> {
    let unwrapped = schema.unwrap_type(ty).map_err(|error| error.to_string())?;
    if *value == Value::NullValue {
        return if unwrapped.nullable {
            Ok(())
        } else {
            Err(format!("null for non-null type `{}`", ty))
        };
    }
    match (unwrapped.kind, value) {
        (TypeKind::List(item), Value::ListValue(values)) => {
            values.iter().try_for_each(|value| check_value(schema, item, value))
        }
        // A single value is coerced to a list of one.
        (TypeKind::List(item), value) => check_value(schema, item, value),
        (TypeKind::Scalar(scalar), value) => {
            if scalar_accepts(&scalar.name, value) {
                Ok(())
            } else {
                Err(format!("`{}` is not a valid `{}`", value, scalar.name))
            }
        }
        (TypeKind::Enum(enumeration), Value::EnumValue(name)) if enumeration.values.contains(name) => Ok(()),
        (TypeKind::InputObject(input), Value::ObjectValue(fields)) => check_input_object(schema, input, fields),
        (_, value) => Err(format!("`{}` is not a valid `{}`", value, ty)),
    }
}

/// Custom scalars accept any literal.
fn scalar_accepts(name: &str, value: &Value) -> bool {
    match (BuiltinScalar::from_name(name), value) {
        (Some(BuiltinScalar::Int), Value::IntValue(text)) => text.parse::<i32>().is_ok(),
        (Some(BuiltinScalar::Float), Value::IntValue(_)) | (Some(BuiltinScalar::Float), Value::FloatValue(_)) => true,
        (Some(BuiltinScalar::String), Value::StringValue(_)) => true,
        (Some(BuiltinScalar::Id), Value::StringValue(_)) | (Some(BuiltinScalar::Id), Value::IntValue(_)) => true,
        (Some(BuiltinScalar::Boolean), Value::BooleanValue(_)) => true,
        (Some(_), _) => false,
        (None, _) => true,
    }
}

fn check_input_object(schema: &Schema, input: &InputObjectType, fields: &[ObjectField]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(format!("field `{}` given twice to `{}`", field.name, input.name));
        }
        let declared = input
            .fields
            .get(&field.name)
            .ok_or_else(|| format!("input `{}` has no field `{}`", input.name, field.name))?;
        check_value(schema, &declared.ty, &field.value)?;
    }
    match input
        .fields
        .values()
        .find(|declared| declared.is_required() && !seen.contains(declared.name.as_str()))
    {
        Some(missing) => Err(format!("input `{}` is missing field `{}`", input.name, missing.name)),
        None => Ok(()),
    }
}
