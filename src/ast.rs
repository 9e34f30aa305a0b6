#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Definition {
    Operation(OperationDefinition),
    Schema(SchemaDefinition),
    ScalarType(ScalarTypeDefinition),
    ObjectType(ObjectTypeDefinition),
    InterfaceType(InterfaceTypeDefinition),
    UnionType(UnionTypeDefinition),
    EnumType(EnumTypeDefinition),
    InputObjectType(InputObjectTypeDefinition),
    Directive(DirectiveDefinition),
    Extension(TypeSystemExtension),
}

/// `extend ...`: the extended definition's body, without a description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeSystemExtension {
    Schema(SchemaDefinition),
    ScalarType(ScalarTypeDefinition),
    ObjectType(ObjectTypeDefinition),
    InterfaceType(InterfaceTypeDefinition),
    UnionType(UnionTypeDefinition),
    EnumType(EnumTypeDefinition),
    InputObjectType(InputObjectTypeDefinition),
}

impl TypeSystemExtension {
    /// The extended type's name; `None` for `extend schema`.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            TypeSystemExtension::Schema(_) => None,
            TypeSystemExtension::ScalarType(scalar) => Some(&scalar.name),
            TypeSystemExtension::ObjectType(object) => Some(&object.name),
            TypeSystemExtension::InterfaceType(interface) => Some(&interface.name),
            TypeSystemExtension::UnionType(union) => Some(&union.name),
            TypeSystemExtension::EnumType(enumeration) => Some(&enumeration.name),
            TypeSystemExtension::InputObjectType(input) => Some(&input.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalarTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceTypeDefinition {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDefinition>,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionTypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumTypeDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
    pub description: Option<String>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValueDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputObjectTypeDefinition {
    pub name: String,
    pub directives: Vec<Directive>,
    pub description: Option<String>,
    pub fields: Vec<InputValueDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveDefinition {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: Vec<InputValueDefinition>,
}

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DirectiveLocation {
    QUERY,
    MUTATION,
    SUBSCRIPTION,
    FIELD,
    FRAGMENT_DEFINITION,
    FRAGMENT_SPREAD,
    INLINE_FRAGMENT,
    VARIABLE_DEFINITION,
    SCHEMA,
    SCALAR,
    OBJECT,
    FIELD_DEFINITION,
    ARGUMENT_DEFINITION,
    INTERFACE,
    UNION,
    ENUM,
    ENUM_VALUE,
    INPUT_OBJECT,
    INPUT_FIELD_DEFINITION,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectTypeDefinition {
    pub name: String,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDefinition>,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub name: String,
    pub type_reference: TypeReference,
    pub arguments: Vec<InputValueDefinition>,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputValueDefinition {
    pub name: String,
    pub type_reference: TypeReference,
    pub default_value: Option<Value>,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub operation_type_definitions: Vec<OperationTypeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationTypeDefinition {
    pub operation: OperationType,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDefinition {
    pub operation_type: OperationType,
    pub name: Option<String>,
    pub selection_set: SelectionSet,
}

/// A named type plus its List/NonNull wrapping chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeReference {
    NamedType(String),
    ListType(Box<TypeReference>),
    NonNullType(Box<TypeReference>),
}

impl TypeReference {
    pub fn named(name: &str) -> TypeReference {
        TypeReference::NamedType(String::from(name))
    }

    pub fn list(of: TypeReference) -> TypeReference {
        TypeReference::ListType(Box::new(of))
    }

    pub fn non_null(of: TypeReference) -> TypeReference {
        TypeReference::NonNullType(Box::new(of))
    }

    /// Only the outermost wrapper decides nullability.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, TypeReference::NonNullType(_))
    }

    /// The name at the bottom of the wrapping chain.
    pub fn named_type(&self) -> &str {
        match self {
            TypeReference::NamedType(name) => name,
            TypeReference::ListType(inner) | TypeReference::NonNullType(inner) => {
                inner.named_type()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    IntValue(String),
    FloatValue(String),
    StringValue(String),
    BooleanValue(bool),
    NullValue,
    EnumValue(String),
    ListValue(Vec<Value>),
    ObjectValue(Vec<ObjectField>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectField {
    pub name: String,
    pub value: Value,
}

/// Only field selections are modelled; fragments are never generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSet {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub alias: Option<String>,
    pub selection_set: Option<SelectionSet>,
    pub directives: Vec<Directive>,
    pub arguments: Vec<Argument>,
}

impl Field {
    pub fn leaf(name: &str) -> Field {
        Field {
            name: String::from(name),
            alias: None,
            selection_set: None,
            directives: Vec::new(),
            arguments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}
