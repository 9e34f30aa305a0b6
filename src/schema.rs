//! Schema model built from a parsed SDL document, and the type-kind dispatch
//! every generator goes through.
use crate::ast::{self, Definition, TypeReference, TypeSystemExtension, Value};
use crate::error::Error;
use crate::parser;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// The scalars every schema has and values can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinScalar {
    Int,
    Float,
    String,
    Id,
    Boolean,
}

impl BuiltinScalar {
    pub const ALL: [BuiltinScalar; 5] = [
        BuiltinScalar::Int,
        BuiltinScalar::Float,
        BuiltinScalar::String,
        BuiltinScalar::Id,
        BuiltinScalar::Boolean,
    ];

    pub fn from_name(name: &str) -> Option<BuiltinScalar> {
        match name {
            "Int" => Some(BuiltinScalar::Int),
            "Float" => Some(BuiltinScalar::Float),
            "String" => Some(BuiltinScalar::String),
            "ID" => Some(BuiltinScalar::Id),
            "Boolean" => Some(BuiltinScalar::Boolean),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinScalar::Int => "Int",
            BuiltinScalar::Float => "Float",
            BuiltinScalar::String => "String",
            BuiltinScalar::Id => "ID",
            BuiltinScalar::Boolean => "Boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub ty: TypeReference,
    pub default_value: Option<Value>,
}

impl InputValue {
    /// Non-null without a default: must always be supplied.
    pub fn is_required(&self) -> bool {
        !self.ty.is_nullable() && self.default_value.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub arguments: IndexMap<String, InputValue>,
    pub ty: TypeReference,
}

/// Object and interface types; both are selected into the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub fields: IndexMap<String, FieldDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub fields: IndexMap<String, InputValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub values: IndexSet<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(ObjectType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(scalar) => &scalar.name,
            TypeDefinition::Object(object) | TypeDefinition::Interface(object) => &object.name,
            TypeDefinition::Union(union) => &union.name,
            TypeDefinition::Enum(enumeration) => &enumeration.name,
            TypeDefinition::InputObject(input) => &input.name,
        }
    }
}

/// What a type reference points at once its outer NonNull is stripped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeKind<'s> {
    Scalar(&'s ScalarType),
    Enum(&'s EnumType),
    List(&'s TypeReference),
    InputObject(&'s InputObjectType),
    Object(&'s ObjectType),
    Interface(&'s ObjectType),
    Union(&'s UnionType),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unwrapped<'s> {
    pub nullable: bool,
    pub kind: TypeKind<'s>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    query_type: Option<String>,
    types: IndexMap<String, TypeDefinition>,
}

impl Schema {
    pub fn parse(sdl: &str) -> Result<Schema, Error> {
        Schema::from_document(&parser::parse_str(sdl)?)
    }

    pub fn from_document(document: &ast::Document) -> Result<Schema, Error> {
        let mut types = IndexMap::new();
        for scalar in BuiltinScalar::ALL.iter() {
            let name = String::from(scalar.name());
            types.insert(name.clone(), TypeDefinition::Scalar(ScalarType { name }));
        }
        let mut query_type = None;
        let mut schema_defined = false;
        let mut extensions = Vec::new();
        for definition in &document.definitions {
            let type_definition = match definition {
                Definition::Schema(schema) => {
                    if schema_defined {
                        return Err(Error::Configuration(String::from("schema is defined twice")));
                    }
                    schema_defined = true;
                    query_type = query_operation(&schema.operation_type_definitions);
                    continue;
                }
                Definition::Extension(extension) => {
                    extensions.push(extension);
                    continue;
                }
                Definition::Directive(_) => continue,
                Definition::Operation(_) => {
                    return Err(Error::Configuration(String::from(
                        "schema documents can not contain operations",
                    )))
                }
                Definition::ScalarType(scalar) => {
                    if BuiltinScalar::from_name(&scalar.name).is_some() {
                        continue;
                    }
                    TypeDefinition::Scalar(ScalarType {
                        name: scalar.name.clone(),
                    })
                }
                Definition::ObjectType(object) => {
                    TypeDefinition::Object(object_type(&object.name, &object.fields))
                }
                Definition::InterfaceType(interface) => {
                    TypeDefinition::Interface(object_type(&interface.name, &interface.fields))
                }
                Definition::UnionType(union) => TypeDefinition::Union(UnionType {
                    name: union.name.clone(),
                    members: union.types.clone(),
                }),
                Definition::EnumType(enumeration) => TypeDefinition::Enum(EnumType {
                    name: enumeration.name.clone(),
                    values: enumeration.values.iter().map(|v| v.name.clone()).collect(),
                }),
                Definition::InputObjectType(input) => TypeDefinition::InputObject(InputObjectType {
                    name: input.name.clone(),
                    fields: input_values(&input.fields),
                }),
            };
            let name = type_definition.name().to_owned();
            if types.insert(name.clone(), type_definition).is_some() {
                return Err(Error::Configuration(format!("type `{}` is defined twice", name)));
            }
        }

        // Extensions may precede the definitions they extend.
        for extension in extensions {
            match extension {
                TypeSystemExtension::Schema(schema) => {
                    if !schema_defined {
                        return Err(Error::Configuration(String::from("cannot extend undefined schema")));
                    }
                    if let Some(name) = query_operation(&schema.operation_type_definitions) {
                        if query_type.is_some() {
                            return Err(Error::Configuration(String::from(
                                "query root type is defined twice",
                            )));
                        }
                        query_type = Some(name);
                    }
                }
                extension => extend_type(&mut types, extension)?,
            }
        }

        if schema_defined {
            if query_type.is_none() {
                return Err(Error::Configuration(String::from(
                    "schema definition has no query root type",
                )));
            }
        } else if types.contains_key("Query") {
            query_type = Some(String::from("Query"));
        }
        debug!(types = types.len(), query_type = ?query_type, "built schema");
        Ok(Schema { query_type, types })
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    /// The root object type queries are generated from.
    pub fn query_root(&self) -> Result<&ObjectType, Error> {
        let name = self
            .query_type
            .as_ref()
            .ok_or_else(|| Error::Configuration(String::from("schema has no query root type")))?;
        match self.types.get(name) {
            Some(TypeDefinition::Object(object)) => Ok(object),
            Some(_) => Err(Error::Configuration(format!(
                "query root type `{}` is not an object type",
                name
            ))),
            None => Err(Error::Configuration(format!(
                "query root type `{}` is not defined",
                name
            ))),
        }
    }

    /// Strips at most one outer NonNull and classifies what is underneath.
    pub fn unwrap_type<'s>(&'s self, ty: &'s TypeReference) -> Result<Unwrapped<'s>, Error> {
        let (nullable, inner) = match ty {
            TypeReference::NonNullType(inner) => (false, &**inner),
            other => (true, other),
        };
        let kind = match inner {
            TypeReference::NonNullType(_) => {
                return Err(Error::UnsupportedType(format!("`{}` is wrapped in NonNull twice", ty)))
            }
            TypeReference::ListType(item) => TypeKind::List(item),
            TypeReference::NamedType(name) => match self.types.get(name) {
                Some(TypeDefinition::Scalar(scalar)) => TypeKind::Scalar(scalar),
                Some(TypeDefinition::Enum(enumeration)) => TypeKind::Enum(enumeration),
                Some(TypeDefinition::InputObject(input)) => TypeKind::InputObject(input),
                Some(TypeDefinition::Object(object)) => TypeKind::Object(object),
                Some(TypeDefinition::Interface(interface)) => TypeKind::Interface(interface),
                Some(TypeDefinition::Union(union)) => TypeKind::Union(union),
                None => return Err(Error::UnsupportedType(format!("unknown type `{}`", name))),
            },
        };
        Ok(Unwrapped { nullable, kind })
    }
}

fn query_operation(operations: &[ast::OperationTypeDefinition]) -> Option<String> {
    operations
        .iter()
        .find(|operation| operation.operation == ast::OperationType::Query)
        .map(|operation| operation.type_name.clone())
}

fn extend_type(types: &mut IndexMap<String, TypeDefinition>, extension: &TypeSystemExtension) -> Result<(), Error> {
    let name = extension.type_name().unwrap_or_default();
    let target = types
        .get_mut(name)
        .ok_or_else(|| Error::Configuration(format!("cannot extend undefined type `{}`", name)))?;
    match (target, extension) {
        (TypeDefinition::Scalar(_), TypeSystemExtension::ScalarType(_)) => {}
        (TypeDefinition::Object(object), TypeSystemExtension::ObjectType(extension)) => {
            add_fields(object, &extension.fields)?
        }
        (TypeDefinition::Interface(interface), TypeSystemExtension::InterfaceType(extension)) => {
            add_fields(interface, &extension.fields)?
        }
        (TypeDefinition::Union(union), TypeSystemExtension::UnionType(extension)) => {
            for member in &extension.types {
                if union.members.contains(member) {
                    return Err(Error::Configuration(format!(
                        "`{}` is already a member of `{}`",
                        member, union.name
                    )));
                }
                union.members.push(member.clone());
            }
        }
        (TypeDefinition::Enum(enumeration), TypeSystemExtension::EnumType(extension)) => {
            for value in &extension.values {
                if !enumeration.values.insert(value.name.clone()) {
                    return Err(Error::Configuration(format!(
                        "enum value `{}.{}` is defined twice",
                        enumeration.name, value.name
                    )));
                }
            }
        }
        (TypeDefinition::InputObject(input), TypeSystemExtension::InputObjectType(extension)) => {
            for (field_name, value) in input_values(&extension.fields) {
                if input.fields.contains_key(&field_name) {
                    return Err(Error::Configuration(format!(
                        "field `{}.{}` is defined twice",
                        input.name, field_name
                    )));
                }
                input.fields.insert(field_name, value);
            }
        }
        (target, _) => {
            return Err(Error::Configuration(format!(
                "`{}` is extended as a different kind of type",
                target.name()
            )))
        }
    }
    debug!(name, "applied extension");
    Ok(())
}

fn add_fields(object: &mut ObjectType, fields: &[ast::FieldDefinition]) -> Result<(), Error> {
    for (name, field) in object_type(&object.name, fields).fields {
        if object.fields.contains_key(&name) {
            return Err(Error::Configuration(format!(
                "field `{}.{}` is defined twice",
                object.name, name
            )));
        }
        object.fields.insert(name, field);
    }
    Ok(())
}

fn object_type(name: &str, fields: &[ast::FieldDefinition]) -> ObjectType {
    ObjectType {
        name: String::from(name),
        fields: fields
            .iter()
            .map(|field| {
                let definition = FieldDef {
                    name: field.name.clone(),
                    arguments: input_values(&field.arguments),
                    ty: field.type_reference.clone(),
                };
                (field.name.clone(), definition)
            })
            .collect(),
    }
}

fn input_values(definitions: &[ast::InputValueDefinition]) -> IndexMap<String, InputValue> {
    definitions
        .iter()
        .map(|definition| {
            let value = InputValue {
                name: definition.name.clone(),
                ty: definition.type_reference.clone(),
                default_value: definition.default_value.clone(),
            };
            (definition.name.clone(), value)
        })
        .collect()
}
