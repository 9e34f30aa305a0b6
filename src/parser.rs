use crate::ast::*;
use crate::lexer::*;
use thiserror::Error;
use TokenKind::*;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ParsingError {
    pub message: String,
}

impl ParsingError {
    pub fn new(message_str: &str) -> ParsingError {
        ParsingError {
            message: String::from(message_str),
        }
    }
}

pub fn parse(lexer: &mut Lexer) -> Result<Document, ParsingError> {
    document(lexer)
}

pub fn parse_str(source: &str) -> Result<Document, ParsingError> {
    parse(&mut Lexer::new(source))
}

fn document(lexer: &mut Lexer) -> Result<Document, ParsingError> {
    let definitions = many(lexer, SOF, parse_definition, END_OF_INPUT)?;
    Ok(Document { definitions })
}

fn parse_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    if peek(lexer, NAME) {
        let keyword = current_value(lexer)?.to_owned();
        match keyword.as_str() {
            "query" | "mutation" | "subscription" => parse_operation_definition(lexer),
            "schema" | "scalar" | "type" | "interface" | "union" | "enum" | "input"
            | "directive" => parse_type_system_definition(lexer),
            "extend" => parse_type_system_extension(lexer),
            "fragment" => Err(ParsingError::new("fragment definitions are not supported")),
            value => Err(ParsingError::new(&format!("unexpected string '{}'", value))),
        }
    } else if peek(lexer, BRACE_L) {
        parse_operation_definition(lexer)
    } else if peek_description(lexer) {
        parse_type_system_definition(lexer)
    } else {
        Err(ParsingError::new(&format!(
            "unexpected {:?}",
            lexer.current_token().kind
        )))
    }
}

fn parse_type_system_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let keyword_token = if peek_description(lexer) {
        lookahead_lexer(lexer)?
    } else {
        lexer.current_token().clone()
    };
    if keyword_token.kind != NAME {
        return unexpected_token(keyword_token.kind, NAME);
    }
    match keyword_token.value.as_deref().unwrap_or_default() {
        "schema" => parse_schema_definition(lexer),
        "scalar" => parse_scalar_type_definition(lexer),
        "type" => parse_object_type_definition(lexer),
        "interface" => parse_interface_type_definition(lexer),
        "union" => parse_union_type_definition(lexer),
        "enum" => parse_enum_type_definition(lexer),
        "input" => parse_input_object_type_definition(lexer),
        "directive" => parse_directive_definition(lexer),
        value => Err(ParsingError::new(&format!(
            "unexpected {} for type system definition",
            value
        ))),
    }
}

fn parse_type_system_extension(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    expect_keyword(lexer, "extend")?;
    if peek_description(lexer) {
        return Err(ParsingError::new("extensions can not have a description"));
    }
    if expect_optional_keyword(lexer, "schema")? {
        let directives = parse_directives(lexer)?;
        let operation_type_definitions = parse_operation_type_definitions(lexer)?;
        if directives.is_empty() && operation_type_definitions.is_empty() {
            return Err(ParsingError::new("'extend schema' requires directives or operation types"));
        }
        return Ok(Definition::Extension(TypeSystemExtension::Schema(SchemaDefinition {
            description: None,
            directives,
            operation_type_definitions,
        })));
    }
    let (extension, empty) = match parse_type_system_definition(lexer)? {
        Definition::ScalarType(scalar) => {
            let empty = scalar.directives.is_empty();
            (TypeSystemExtension::ScalarType(scalar), empty)
        }
        Definition::ObjectType(object) => {
            let empty = object.interfaces.is_empty() && object.directives.is_empty() && object.fields.is_empty();
            (TypeSystemExtension::ObjectType(object), empty)
        }
        Definition::InterfaceType(interface) => {
            let empty = interface.interfaces.is_empty()
                && interface.directives.is_empty()
                && interface.fields.is_empty();
            (TypeSystemExtension::InterfaceType(interface), empty)
        }
        Definition::UnionType(union) => {
            let empty = union.directives.is_empty() && union.types.is_empty();
            (TypeSystemExtension::UnionType(union), empty)
        }
        Definition::EnumType(enumeration) => {
            let empty = enumeration.directives.is_empty() && enumeration.values.is_empty();
            (TypeSystemExtension::EnumType(enumeration), empty)
        }
        Definition::InputObjectType(input) => {
            let empty = input.directives.is_empty() && input.fields.is_empty();
            (TypeSystemExtension::InputObjectType(input), empty)
        }
        _ => return Err(ParsingError::new("directive definitions can not be extended")),
    };
    if empty {
        return Err(ParsingError::new(&format!(
            "empty extension of '{}'",
            extension.type_name().unwrap_or("schema")
        )));
    }
    Ok(Definition::Extension(extension))
}

fn parse_directives(lexer: &mut Lexer) -> Result<Vec<Directive>, ParsingError> {
    let mut result = Vec::new();
    while expect_optional_token(lexer, AT)?.is_some() {
        let name = parse_name(lexer)?;
        let arguments = parse_arguments(lexer)?;
        result.push(Directive { name, arguments });
    }
    Ok(result)
}

fn parse_arguments(lexer: &mut Lexer) -> Result<Vec<Argument>, ParsingError> {
    if peek(lexer, PAREN_L) {
        many(lexer, PAREN_L, parse_argument, PAREN_R)
    } else {
        Ok(Vec::new())
    }
}

fn parse_argument(lexer: &mut Lexer) -> Result<Argument, ParsingError> {
    let name = parse_name(lexer)?;
    expect_token(lexer, COLON)?;
    let value = parse_value_literal(lexer)?;
    Ok(Argument { name, value })
}

fn parse_schema_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "schema")?;
    let directives = parse_directives(lexer)?;
    let operation_type_definitions =
        many(lexer, BRACE_L, parse_operation_type_definition, BRACE_R)?;
    Ok(Definition::Schema(SchemaDefinition {
        description,
        directives,
        operation_type_definitions,
    }))
}

fn parse_operation_type_definitions(
    lexer: &mut Lexer,
) -> Result<Vec<OperationTypeDefinition>, ParsingError> {
    if peek(lexer, BRACE_L) {
        many(lexer, BRACE_L, parse_operation_type_definition, BRACE_R)
    } else {
        Ok(Vec::new())
    }
}

fn parse_operation_type_definition(
    lexer: &mut Lexer,
) -> Result<OperationTypeDefinition, ParsingError> {
    let operation = parse_operation_type(lexer)?;
    expect_token(lexer, COLON)?;
    let type_name = parse_name(lexer)?;
    Ok(OperationTypeDefinition {
        operation,
        type_name,
    })
}

fn parse_scalar_type_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "scalar")?;
    let name = parse_name(lexer)?;
    let directives = parse_directives(lexer)?;
    Ok(Definition::ScalarType(ScalarTypeDefinition {
        name,
        description,
        directives,
    }))
}

fn parse_object_type_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "type")?;
    let name = parse_name(lexer)?;
    let interfaces = parse_implements_interfaces(lexer)?;
    let directives = parse_directives(lexer)?;
    let fields = parse_field_definitions(lexer)?;
    Ok(Definition::ObjectType(ObjectTypeDefinition {
        name,
        interfaces,
        fields,
        description,
        directives,
    }))
}

fn parse_field_definitions(lexer: &mut Lexer) -> Result<Vec<FieldDefinition>, ParsingError> {
    if peek(lexer, BRACE_L) {
        many(lexer, BRACE_L, parse_field_definition, BRACE_R)
    } else {
        Ok(Vec::new())
    }
}

fn parse_field_definition(lexer: &mut Lexer) -> Result<FieldDefinition, ParsingError> {
    let description = parse_description(lexer)?;
    let name = parse_name(lexer)?;
    let arguments = parse_argument_definitions(lexer)?;
    expect_token(lexer, COLON)?;
    let type_reference = parse_type_reference(lexer)?;
    let directives = parse_directives(lexer)?;
    Ok(FieldDefinition {
        name,
        type_reference,
        arguments,
        description,
        directives,
    })
}

fn parse_argument_definitions(
    lexer: &mut Lexer,
) -> Result<Vec<InputValueDefinition>, ParsingError> {
    if !peek(lexer, PAREN_L) {
        return Ok(Vec::new());
    }
    many(lexer, PAREN_L, parse_input_value_definition, PAREN_R)
}

fn parse_input_value_definition(lexer: &mut Lexer) -> Result<InputValueDefinition, ParsingError> {
    let description = parse_description(lexer)?;
    let name = parse_name(lexer)?;
    expect_token(lexer, COLON)?;
    let type_reference = parse_type_reference(lexer)?;
    let default_value = match expect_optional_token(lexer, EQUALS)? {
        Some(_) => Some(parse_value_literal(lexer)?),
        None => None,
    };
    let directives = parse_directives(lexer)?;
    Ok(InputValueDefinition {
        name,
        type_reference,
        default_value,
        description,
        directives,
    })
}

fn parse_implements_interfaces(lexer: &mut Lexer) -> Result<Vec<String>, ParsingError> {
    if !expect_optional_keyword(lexer, "implements")? {
        return Ok(Vec::new());
    }
    expect_optional_token(lexer, AMP)?;
    let mut result = vec![parse_name(lexer)?];
    while expect_optional_token(lexer, AMP)?.is_some() {
        result.push(parse_name(lexer)?);
    }
    Ok(result)
}

fn parse_interface_type_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "interface")?;
    let name = parse_name(lexer)?;
    let interfaces = parse_implements_interfaces(lexer)?;
    let directives = parse_directives(lexer)?;
    let fields = parse_field_definitions(lexer)?;
    Ok(Definition::InterfaceType(InterfaceTypeDefinition {
        description,
        name,
        interfaces,
        fields,
        directives,
    }))
}

fn parse_union_type_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "union")?;
    let name = parse_name(lexer)?;
    let directives = parse_directives(lexer)?;
    let mut types = Vec::new();
    if expect_optional_token(lexer, EQUALS)?.is_some() {
        expect_optional_token(lexer, PIPE)?;
        types.push(parse_name(lexer)?);
        while expect_optional_token(lexer, PIPE)?.is_some() {
            types.push(parse_name(lexer)?);
        }
    }
    Ok(Definition::UnionType(UnionTypeDefinition {
        name,
        description,
        directives,
        types,
    }))
}

fn parse_enum_type_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "enum")?;
    let name = parse_name(lexer)?;
    let directives = parse_directives(lexer)?;
    let values = if peek(lexer, BRACE_L) {
        many(lexer, BRACE_L, parse_enum_value_definition, BRACE_R)?
    } else {
        Vec::new()
    };
    Ok(Definition::EnumType(EnumTypeDefinition {
        name,
        directives,
        description,
        values,
    }))
}

fn parse_enum_value_definition(lexer: &mut Lexer) -> Result<EnumValueDefinition, ParsingError> {
    let description = parse_description(lexer)?;
    let name = parse_name(lexer)?;
    if name == "true" || name == "false" || name == "null" {
        return Err(ParsingError::new(&format!("'{}' is not a valid enum value", name)));
    }
    let directives = parse_directives(lexer)?;
    Ok(EnumValueDefinition {
        name,
        description,
        directives,
    })
}

fn parse_input_object_type_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "input")?;
    let name = parse_name(lexer)?;
    let directives = parse_directives(lexer)?;
    let fields = if peek(lexer, BRACE_L) {
        many(lexer, BRACE_L, parse_input_value_definition, BRACE_R)?
    } else {
        Vec::new()
    };
    Ok(Definition::InputObjectType(InputObjectTypeDefinition {
        description,
        name,
        directives,
        fields,
    }))
}

fn parse_directive_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    let description = parse_description(lexer)?;
    expect_keyword(lexer, "directive")?;
    expect_token(lexer, AT)?;
    let name = parse_name(lexer)?;
    let arguments = parse_argument_definitions(lexer)?;
    expect_optional_keyword(lexer, "repeatable")?;
    expect_keyword(lexer, "on")?;
    expect_optional_token(lexer, PIPE)?;
    let mut locations = vec![parse_directive_location(lexer)?];
    while expect_optional_token(lexer, PIPE)?.is_some() {
        locations.push(parse_directive_location(lexer)?);
    }
    Ok(Definition::Directive(DirectiveDefinition {
        description,
        name,
        arguments,
        locations,
    }))
}

fn parse_directive_location(lexer: &mut Lexer) -> Result<DirectiveLocation, ParsingError> {
    use DirectiveLocation::*;
    let name = parse_name(lexer)?;
    let location = match name.as_ref() {
        "QUERY" => QUERY,
        "MUTATION" => MUTATION,
        "SUBSCRIPTION" => SUBSCRIPTION,
        "FIELD" => FIELD,
        "FRAGMENT_DEFINITION" => FRAGMENT_DEFINITION,
        "FRAGMENT_SPREAD" => FRAGMENT_SPREAD,
        "INLINE_FRAGMENT" => INLINE_FRAGMENT,
        "VARIABLE_DEFINITION" => VARIABLE_DEFINITION,
        "SCHEMA" => SCHEMA,
        "SCALAR" => SCALAR,
        "OBJECT" => OBJECT,
        "FIELD_DEFINITION" => FIELD_DEFINITION,
        "ARGUMENT_DEFINITION" => ARGUMENT_DEFINITION,
        "INTERFACE" => INTERFACE,
        "UNION" => UNION,
        "ENUM" => ENUM,
        "ENUM_VALUE" => ENUM_VALUE,
        "INPUT_OBJECT" => INPUT_OBJECT,
        "INPUT_FIELD_DEFINITION" => INPUT_FIELD_DEFINITION,
        other => {
            return Err(ParsingError::new(&format!(
                "unexpected directive location {}",
                other
            )))
        }
    };
    Ok(location)
}

fn unexpected_token<T>(actual: TokenKind, expected: TokenKind) -> Result<T, ParsingError> {
    Err(ParsingError::new(&format!(
        "Unexpected {:?}, but expected {:?}",
        actual, expected
    )))
}

fn parse_description(lexer: &mut Lexer) -> Result<Option<String>, ParsingError> {
    if peek_description(lexer) {
        Ok(Some(parse_string(lexer)?))
    } else {
        Ok(None)
    }
}

fn parse_operation_definition(lexer: &mut Lexer) -> Result<Definition, ParsingError> {
    if peek(lexer, BRACE_L) {
        let selection_set = parse_selection_set(lexer)?;
        return Ok(Definition::Operation(OperationDefinition {
            operation_type: OperationType::Query,
            name: None,
            selection_set,
        }));
    }
    let operation_type = parse_operation_type(lexer)?;
    let name = if peek(lexer, NAME) {
        Some(parse_name(lexer)?)
    } else {
        None
    };
    let selection_set = parse_selection_set(lexer)?;
    Ok(Definition::Operation(OperationDefinition {
        operation_type,
        name,
        selection_set,
    }))
}

fn parse_value_literal(lexer: &mut Lexer) -> Result<Value, ParsingError> {
    let kind = lexer.current_token().kind;
    let token_value = lexer.current_token().value.clone().unwrap_or_default();
    match kind {
        BRACKET_L => {
            let values = any(lexer, BRACKET_L, parse_value_literal, BRACKET_R)?;
            Ok(Value::ListValue(values))
        }
        BRACE_L => {
            let fields = any(lexer, BRACE_L, parse_object_field, BRACE_R)?;
            Ok(Value::ObjectValue(fields))
        }
        INT => {
            advance_lexer(lexer)?;
            Ok(Value::IntValue(token_value))
        }
        FLOAT => {
            advance_lexer(lexer)?;
            Ok(Value::FloatValue(token_value))
        }
        STRING | BLOCK_STRING => Ok(Value::StringValue(parse_string(lexer)?)),
        NAME => {
            advance_lexer(lexer)?;
            Ok(match token_value.as_ref() {
                "true" => Value::BooleanValue(true),
                "false" => Value::BooleanValue(false),
                "null" => Value::NullValue,
                _ => Value::EnumValue(token_value),
            })
        }
        kind => Err(ParsingError::new(&format!("unexpected {:?} in value", kind))),
    }
}

fn parse_string(lexer: &mut Lexer) -> Result<String, ParsingError> {
    let token = advance_lexer(lexer)?;
    match token.kind {
        STRING | BLOCK_STRING => Ok(token.value.unwrap_or_default()),
        kind => unexpected_token(kind, STRING),
    }
}

fn parse_object_field(lexer: &mut Lexer) -> Result<ObjectField, ParsingError> {
    let name = parse_name(lexer)?;
    expect_token(lexer, COLON)?;
    Ok(ObjectField {
        name,
        value: parse_value_literal(lexer)?,
    })
}

fn parse_type_reference(lexer: &mut Lexer) -> Result<TypeReference, ParsingError> {
    let mut type_reference = if expect_optional_token(lexer, BRACKET_L)?.is_some() {
        let inner = parse_type_reference(lexer)?;
        expect_token(lexer, BRACKET_R)?;
        TypeReference::list(inner)
    } else {
        TypeReference::NamedType(parse_name(lexer)?)
    };
    if expect_optional_token(lexer, BANG)?.is_some() {
        type_reference = TypeReference::non_null(type_reference);
    }
    Ok(type_reference)
}

fn parse_operation_type(lexer: &mut Lexer) -> Result<OperationType, ParsingError> {
    let name = parse_name(lexer)?;
    match name.as_ref() {
        "query" => Ok(OperationType::Query),
        "mutation" => Ok(OperationType::Mutation),
        "subscription" => Ok(OperationType::Subscription),
        other => Err(ParsingError::new(&format!("unknown operation type {}", other))),
    }
}

fn parse_selection_set(lexer: &mut Lexer) -> Result<SelectionSet, ParsingError> {
    let fields = many(lexer, BRACE_L, parse_field, BRACE_R)?;
    Ok(SelectionSet { fields })
}

fn parse_field(lexer: &mut Lexer) -> Result<Field, ParsingError> {
    let name_or_alias = parse_name(lexer)?;
    let (alias, name) = if expect_optional_token(lexer, COLON)?.is_some() {
        (Some(name_or_alias), parse_name(lexer)?)
    } else {
        (None, name_or_alias)
    };
    let arguments = parse_arguments(lexer)?;
    let directives = parse_directives(lexer)?;
    let selection_set = if peek(lexer, BRACE_L) {
        Some(parse_selection_set(lexer)?)
    } else {
        None
    };
    Ok(Field {
        name,
        alias,
        selection_set,
        arguments,
        directives,
    })
}

fn parse_name(lexer: &mut Lexer) -> Result<String, ParsingError> {
    let name_token = expect_token(lexer, NAME)?;
    name_token
        .value
        .ok_or_else(|| ParsingError::new("name token without a value"))
}

fn current_value(lexer: &Lexer) -> Result<&str, ParsingError> {
    lexer
        .current_token()
        .value
        .as_deref()
        .ok_or_else(|| ParsingError::new("token without a value"))
}

fn peek(lexer: &Lexer, kind: TokenKind) -> bool {
    lexer.current_token().kind == kind
}

fn peek_description(lexer: &Lexer) -> bool {
    peek(lexer, STRING) || peek(lexer, BLOCK_STRING)
}

/// `open item* close`
fn any<T>(
    lexer: &mut Lexer,
    open_kind: TokenKind,
    parse_fn: fn(&mut Lexer) -> Result<T, ParsingError>,
    close_kind: TokenKind,
) -> Result<Vec<T>, ParsingError> {
    expect_token(lexer, open_kind)?;
    let mut result: Vec<T> = Vec::new();
    while expect_optional_token(lexer, close_kind)?.is_none() {
        result.push(parse_fn(lexer)?);
    }
    Ok(result)
}

/// `open item+ close`
fn many<T>(
    lexer: &mut Lexer,
    open_kind: TokenKind,
    parse_fn: fn(&mut Lexer) -> Result<T, ParsingError>,
    close_kind: TokenKind,
) -> Result<Vec<T>, ParsingError> {
    expect_token(lexer, open_kind)?;
    let mut result: Vec<T> = vec![parse_fn(lexer)?];
    while expect_optional_token(lexer, close_kind)?.is_none() {
        result.push(parse_fn(lexer)?);
    }
    Ok(result)
}

fn expect_keyword(lexer: &mut Lexer, value: &str) -> Result<(), ParsingError> {
    if expect_optional_keyword(lexer, value)? {
        return Ok(());
    }
    Err(ParsingError::new(&format!(
        "expected '{}' at {}",
        value,
        lexer.current_token().position
    )))
}

fn expect_optional_keyword(lexer: &mut Lexer, value: &str) -> Result<bool, ParsingError> {
    let token = lexer.current_token();
    let matches = token.kind == NAME && token.value.as_deref() == Some(value);
    if matches {
        advance_lexer(lexer)?;
        return Ok(true);
    }
    Ok(false)
}

fn expect_token(lexer: &mut Lexer, kind: TokenKind) -> Result<Token, ParsingError> {
    if peek(lexer, kind) {
        return advance_lexer(lexer);
    }
    let current = lexer.current_token();
    Err(ParsingError::new(&format!(
        "Expected {:?}, but got {:?} at {}",
        kind, current.kind, current.position
    )))
}

fn expect_optional_token(
    lexer: &mut Lexer,
    kind: TokenKind,
) -> Result<Option<Token>, ParsingError> {
    if peek(lexer, kind) {
        Ok(Some(advance_lexer(lexer)?))
    } else {
        Ok(None)
    }
}

fn advance_lexer(lexer: &mut Lexer) -> Result<Token, ParsingError> {
    lexer
        .advance()
        .map_err(|lexer_error| ParsingError::new(&format!("Lexer error: {}", lexer_error)))
}

fn lookahead_lexer(lexer: &Lexer) -> Result<Token, ParsingError> {
    lexer
        .lookahead()
        .map_err(|lexer_error| ParsingError::new(&format!("Lexer error: {}", lexer_error)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use TypeReference::*;

    macro_rules! enum_field {
        ($enum:ident $field:ident $exp:expr) => {
            if let $enum::$field(value) = $exp {
                value
            } else {
                panic!("unexpected {:?}", $exp);
            }
        };
    }

    #[test]
    fn parse_simple_query() {
        let document = parse_str("{foo}").unwrap();
        let expected = Document {
            definitions: vec![Definition::Operation(OperationDefinition {
                name: None,
                operation_type: OperationType::Query,
                selection_set: SelectionSet {
                    fields: vec![Field::leaf("foo")],
                },
            })],
        };
        assert_eq!(document, expected);
    }

    #[test]
    fn parse_field_alias() {
        let document = parse_str("{alias: foo}").unwrap();
        let operation_definition = enum_field!(Definition Operation &document.definitions[0]);
        let field = &operation_definition.selection_set.fields[0];
        assert_eq!(field.alias.as_deref(), Some("alias"));
        assert_eq!(field.name, "foo");
    }

    #[test]
    fn parse_field_with_args() {
        let document = parse_str(r#"{foo(arg:"hello", list: [1, 2.5], obj: {a: RED, b: null})}"#).unwrap();
        let operation_definition = enum_field!(Definition Operation &document.definitions[0]);
        let field = &operation_definition.selection_set.fields[0];
        assert_eq!(field.arguments[0].name, "arg");
        assert_eq!(field.arguments[0].value, Value::StringValue(String::from("hello")));
        assert_eq!(
            field.arguments[1].value,
            Value::ListValue(vec![
                Value::IntValue(String::from("1")),
                Value::FloatValue(String::from("2.5"))
            ])
        );
        assert_eq!(
            field.arguments[2].value,
            Value::ObjectValue(vec![
                ObjectField {
                    name: String::from("a"),
                    value: Value::EnumValue(String::from("RED"))
                },
                ObjectField {
                    name: String::from("b"),
                    value: Value::NullValue
                },
            ])
        );
    }

    #[test]
    fn empty_list_and_object_values() {
        let document = parse_str("{foo(a: [], b: {})}").unwrap();
        let operation_definition = enum_field!(Definition Operation &document.definitions[0]);
        let field = &operation_definition.selection_set.fields[0];
        assert_eq!(field.arguments[0].value, Value::ListValue(vec![]));
        assert_eq!(field.arguments[1].value, Value::ObjectValue(vec![]));
    }

    #[test]
    fn empty_selection_set_is_rejected() {
        assert!(parse_str("query { }").is_err());
        assert!(parse_str("{ foo() }").is_err());
    }

    #[test]
    fn parse_object_definition() {
        let document = parse_str(
            r#""described" type Foo implements & A & B @skip(if: true) {
                "field description" bar(a: Int = 1 @include(if: false)): [String!] @skip(if: false)
            }"#,
        )
        .unwrap();
        let object_type_definition = enum_field!(Definition ObjectType &document.definitions[0]);
        assert_eq!(object_type_definition.name, "Foo");
        assert_eq!(object_type_definition.description.as_deref(), Some("described"));
        assert_eq!(object_type_definition.interfaces, vec!["A", "B"]);
        assert_eq!(object_type_definition.directives[0].name, "skip");
        let field_definition = &object_type_definition.fields[0];
        assert_eq!(field_definition.name, "bar");
        assert_eq!(field_definition.description.as_deref(), Some("field description"));
        assert_eq!(
            field_definition.type_reference,
            ListType(Box::new(NonNullType(Box::new(NamedType(String::from("String"))))))
        );
        let argument = &field_definition.arguments[0];
        assert_eq!(argument.default_value, Some(Value::IntValue(String::from("1"))));
        assert_eq!(argument.directives[0].name, "include");
    }

    #[test]
    fn object_definition_without_fields() {
        let document = parse_str("type Foo scalar Bar").unwrap();
        let object_type_definition = enum_field!(Definition ObjectType &document.definitions[0]);
        assert!(object_type_definition.fields.is_empty());
        assert_eq!(document.definitions.len(), 2);
    }

    #[test]
    fn parse_schema_definition() {
        let document = parse_str("schema { query: MyQuery}").unwrap();
        let schema_definition = enum_field!(Definition Schema &document.definitions[0]);
        let op_type_def = &schema_definition.operation_type_definitions[0];
        assert_eq!(op_type_def.operation, OperationType::Query);
        assert_eq!(op_type_def.type_name, "MyQuery");
    }

    #[test]
    fn parse_interface_definition() {
        let document = parse_str("interface MyI { field : Int }").unwrap();
        let interface_definition = enum_field!(Definition InterfaceType &document.definitions[0]);
        assert_eq!(interface_definition.name, "MyI");
        assert_eq!(
            interface_definition.fields[0].type_reference,
            NamedType(String::from("Int"))
        );
    }

    #[test]
    fn parse_enum_definition() {
        let document = parse_str("enum MyEnum { FOO, BAR }").unwrap();
        let enum_definition = enum_field!(Definition EnumType &document.definitions[0]);
        assert_eq!(enum_definition.name, "MyEnum");
        let names: Vec<&str> = enum_definition.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["FOO", "BAR"]);
    }

    #[test]
    fn enum_value_named_null_is_rejected() {
        assert!(parse_str("enum MyEnum { null }").is_err());
    }

    #[test]
    fn parse_union_definition() {
        let document = parse_str("union MyUnion = | A | B | C").unwrap();
        let union_definition = enum_field!(Definition UnionType &document.definitions[0]);
        assert_eq!(union_definition.name, "MyUnion");
        assert_eq!(union_definition.types, vec!["A", "B", "C"]);
    }

    #[test]
    fn parse_directive_definition() {
        let document = parse_str("directive @MyDirective(a: Int) on FIELD_DEFINITION | FIELD").unwrap();
        let directive_definition = enum_field!(Definition Directive &document.definitions[0]);
        assert_eq!(directive_definition.name, "MyDirective");
        assert_eq!(
            directive_definition.locations,
            vec![DirectiveLocation::FIELD_DEFINITION, DirectiveLocation::FIELD]
        );
    }

    #[test]
    fn parse_input_definition() {
        let document = parse_str("input MyInput {field: [Bool!]!}").unwrap();
        let input_definition = enum_field!(Definition InputObjectType &document.definitions[0]);
        assert_eq!(input_definition.name, "MyInput");
        let field = &input_definition.fields[0];
        assert_eq!(field.name, "field");
        let non_null_bool = NonNullType(Box::new(NamedType(String::from("Bool"))));
        let type_ref = NonNullType(Box::new(ListType(Box::new(non_null_bool))));
        assert_eq!(field.type_reference, type_ref);
    }

    #[test]
    fn parse_scalar_definition() {
        let document = parse_str("scalar MyScalar @skip(if: true)").unwrap();
        let scalar_type = enum_field!(Definition ScalarType &document.definitions[0]);
        assert_eq!(scalar_type.name, "MyScalar");
        assert_eq!(scalar_type.directives.len(), 1);
    }

    #[test]
    fn parse_two_level_query() {
        let document = parse_str("query {foo{bar}}").unwrap();
        let foo = Field {
            selection_set: Some(SelectionSet {
                fields: vec![Field::leaf("bar")],
            }),
            ..Field::leaf("foo")
        };
        let expected = Document {
            definitions: vec![Definition::Operation(OperationDefinition {
                operation_type: OperationType::Query,
                selection_set: SelectionSet { fields: vec![foo] },
                name: None,
            })],
        };
        assert_eq!(document, expected);
    }

    #[test]
    fn parse_operation_name() {
        let document = parse_str("query myQuery {foo}").unwrap();
        let operation_definition = enum_field!(Definition Operation &document.definitions[0]);
        assert_eq!(operation_definition.operation_type, OperationType::Query);
        assert_eq!(operation_definition.name.as_deref(), Some("myQuery"));
    }

    #[test]
    fn unknown_definition_keyword_is_an_error() {
        let error = parse_str("fragments F on T { a }").unwrap_err();
        assert_eq!(error.message, "unexpected string 'fragments'");
    }

    #[test]
    fn fragments_and_variables_are_rejected_by_name() {
        let error = parse_str("{ ...F } fragment F on Query { a }").unwrap_err();
        assert!(error.message.contains("fragment spreads are not supported"), "{}", error);
        let error = parse_str("query { a } fragment F on Query { a }").unwrap_err();
        assert_eq!(error.message, "fragment definitions are not supported");
        let error = parse_str("query Q($x: Int) { a(x: $x) }").unwrap_err();
        assert!(error.message.contains("variables are not supported"), "{}", error);
    }

    #[test]
    fn parse_type_extensions() {
        let document = parse_str(
            "extend type Query implements Node { b: Int } extend schema @skip(if: true) \
             extend union U = C extend enum E { X } extend input I { a: Int } extend scalar S @include(if: true) \
             extend interface N { id: ID }",
        )
        .unwrap();
        let object = enum_field!(Definition Extension &document.definitions[0]);
        match object {
            TypeSystemExtension::ObjectType(object) => {
                assert_eq!(object.name, "Query");
                assert_eq!(object.interfaces, vec![String::from("Node")]);
                assert_eq!(object.fields[0].name, "b");
            }
            other => panic!("unexpected {:?}", other),
        }
        let kinds: Vec<&str> = document.definitions[1..]
            .iter()
            .map(|definition| match definition {
                Definition::Extension(TypeSystemExtension::Schema(_)) => "schema",
                Definition::Extension(TypeSystemExtension::UnionType(_)) => "union",
                Definition::Extension(TypeSystemExtension::EnumType(_)) => "enum",
                Definition::Extension(TypeSystemExtension::InputObjectType(_)) => "input",
                Definition::Extension(TypeSystemExtension::ScalarType(_)) => "scalar",
                Definition::Extension(TypeSystemExtension::InterfaceType(_)) => "interface",
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(kinds, vec!["schema", "union", "enum", "input", "scalar", "interface"]);
    }

    #[test]
    fn empty_extensions_are_rejected() {
        assert_eq!(parse_str("extend type Query").unwrap_err().message, "empty extension of 'Query'");
        assert!(parse_str("extend schema").is_err());
        assert!(parse_str("extend \"doc\" type Query { a: Int }").is_err());
        assert!(parse_str("extend directive @d on FIELD").is_err());
    }

    #[test]
    fn parse_interface_implementing_interfaces() {
        let document = parse_str("interface A implements B & C { a: Int }").unwrap();
        let interface_definition = enum_field!(Definition InterfaceType &document.definitions[0]);
        assert_eq!(interface_definition.interfaces, vec![String::from("B"), String::from("C")]);
    }

    #[test]
    fn parse_schema_description() {
        let document = parse_str("\"the root\" schema { query: Q }").unwrap();
        let schema_definition = enum_field!(Definition Schema &document.definitions[0]);
        assert_eq!(schema_definition.description.as_deref(), Some("the root"));
    }
}
