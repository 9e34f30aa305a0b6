//! Query documents drawn from a schema.
use crate::ast::{Argument, Definition, Document, Field, OperationDefinition, OperationType, SelectionSet};
use crate::config::QueryConfig;
use crate::error::Error;
use crate::schema::{FieldDef, ObjectType, Schema, TypeDefinition};
use crate::value::ValueGenerator;
use proptest::prelude::*;
use proptest::sample::subsequence;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Walks the schema from the query root and builds one strategy for the whole
/// document. Selection sets are memoized per object type and depth.
pub struct QueryGenerator<'s> {
    schema: &'s Schema,
    config: &'s QueryConfig,
    values: ValueGenerator<'s>,
    selection_sets: RefCell<HashMap<(String, usize), BoxedStrategy<SelectionSet>>>,
}

impl<'s> QueryGenerator<'s> {
    pub fn new(schema: &'s Schema, config: &'s QueryConfig) -> QueryGenerator<'s> {
        QueryGenerator {
            schema,
            config,
            values: ValueGenerator::new(schema, config),
            selection_sets: RefCell::new(HashMap::new()),
        }
    }

        pub fn document(&self) -> Result<BoxedStrategy<Document>, Error> {
        let root = self.schema.query_root()?;
        let selection_set = self.selection_set(root, 0)?;
        Ok(selection_set
            .prop_map(|selection_set| Document {
                definitions: vec![Definition::Operation(OperationDefinition {
                    operation_type: OperationType::Query,
                    name: None,
                    selection_set,
                })],
            })
            .boxed())
    }

    /// A non-empty subset of the fields of `object`, kept in declaration order.
    /// Falls back to `{ __typename }` when no field can be selected.
    pub fn selection_set(&self, object: &ObjectType, depth: usize) -> Result<BoxedStrategy<SelectionSet>, Error> {
        let key = (object.name.clone(), depth);
        if let Some(cached) = self.selection_sets.borrow().get(&key) {
            trace!(object = %object.name, depth, "selection set cache hit");
            return Ok(cached.clone());
        }

        let mut candidates = Vec::new();
        for field in object.fields.values() {
            match self.field(field, depth) {
                Ok(Some(strategy)) => candidates.push(strategy),
                Ok(None) => trace!(object = %object.name, field = %field.name, depth, "field nests past max_depth"),
                Err(Error::UnsupportedType(reason)) => {
                    debug!(object = %object.name, field = %field.name, %reason, "skipping field");
                }
                Err(error) => return Err(error),
            }
        }

        let strategy = if candidates.is_empty() {
            debug!(object = %object.name, depth, "no selectable fields, selecting __typename");
            Just(typename_selection()).boxed()
        } else {
            let count = candidates.len();
            subsequence(candidates, 1..=count)
                .prop_flat_map(|chosen| chosen)
                .prop_map(|fields| SelectionSet { fields })
                .boxed()
        };
        self.selection_sets.borrow_mut().insert(key, strategy.clone());
        Ok(strategy)
    }

    /// `None` when the field needs a selection set that would nest past `max_depth`.
    fn field(&self, field: &FieldDef, depth: usize) -> Result<Option<BoxedStrategy<Field>>, Error> {
        // Lists of objects need a selection set too, so look at the innermost name.
        let nested = match self.schema.get_type(field.ty.named_type()) {
            Some(TypeDefinition::Scalar(_)) | Some(TypeDefinition::Enum(_)) => None,
            Some(TypeDefinition::Object(object)) | Some(TypeDefinition::Interface(object)) => {
                if depth + 1 >= self.config.max_depth {
                    return Ok(None);
                }
                Some(self.selection_set(object, depth + 1)?)
            }
            Some(TypeDefinition::Union(_)) => Some(Just(typename_selection()).boxed()),
            Some(TypeDefinition::InputObject(_)) | None => {
                return Err(Error::UnsupportedType(format!(
                    "`{}` is not an output type",
                    field.ty
                )))
            }
        };
        let arguments = self.arguments(field)?;
        let name = field.name.clone();
        let strategy = match nested {
            Some(selection_set) => (arguments, selection_set)
                .prop_map(move |(arguments, selection_set)| Field {
                    arguments,
                    selection_set: Some(selection_set),
                    ..Field::leaf(&name)
                })
                .boxed(),
            None => arguments
                .prop_map(move |arguments| Field {
                    arguments,
                    ..Field::leaf(&name)
                })
                .boxed(),
        };
        Ok(Some(strategy))
    }

    /// Every declared argument is drawn; the ones that come out Empty are left off.
    fn arguments(&self, field: &FieldDef) -> Result<BoxedStrategy<Vec<Argument>>, Error> {
        let mut arguments = Vec::with_capacity(field.arguments.len());
        for argument in field.arguments.values() {
            let name = argument.name.clone();
            let value = self.values.value(&argument.ty)?;
            arguments.push(
                value
                    .prop_map(move |slot| {
                        slot.prune().map(|value| Argument {
                            name: name.clone(),
                            value,
                        })
                    })
                    .boxed(),
            );
        }
        Ok(arguments
            .prop_map(|arguments| arguments.into_iter().flatten().collect())
            .boxed())
    }
}

fn typename_selection() -> SelectionSet {
    SelectionSet {
        fields: vec![Field::leaf("__typename")],
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn query_documents(schema: &Schema, config: &QueryConfig) -> Result<BoxedStrategy<Document>, Error> {
    config.validate()?;
    QueryGenerator::new(schema, config).document()
}

pub fn queries(schema: &Schema, config: &QueryConfig) -> Result<BoxedStrategy<String>, Error> {
    Ok(query_documents(schema, config)?
        .prop_map(|document| document.to_string())
        .boxed())
}

/// Parses `sdl` first; see [`queries`].
pub fn queries_from_sdl(sdl: &str, config: &QueryConfig) -> Result<BoxedStrategy<String>, Error> {
    let schema = Schema::parse(sdl)?;
    queries(&schema, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;
    use crate::runner::sample;
    use crate::validation::validate;
    use pretty_assertions::assert_eq;

    fn draw(sdl: &str, config: &QueryConfig, seeds: u64) -> Vec<Document> {
        let schema = Schema::parse(sdl).unwrap();
        let strategy = query_documents(&schema, config).unwrap();
        (0..seeds).map(|seed| sample(&strategy, seed).unwrap()).collect()
    }

    fn root_fields(document: &Document) -> &[Field] {
        match &document.definitions[0] {
            Definition::Operation(operation) => &operation.selection_set.fields,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn single_field_schema() {
        for document in draw("type Query { a: Int }", &QueryConfig::default(), 10) {
            assert_eq!(document.to_string(), "query {\n  a\n}");
        }
    }

    #[test]
    fn required_arguments_are_always_present() {
        let sdl = "type Query { greet(name: String!, times: Int): String }";
        for document in draw(sdl, &QueryConfig::default(), 50) {
            let field = &root_fields(&document)[0];
            assert_eq!(field.name, "greet");
            assert_eq!(field.arguments[0].name, "name");
            assert!(field.arguments.len() <= 2);
        }
    }

    #[test]
    fn fields_keep_declaration_order() {
        let sdl = "type Query { a: Int b: String c: Boolean d: ID }";
        let order = ["a", "b", "c", "d"];
        for document in draw(sdl, &QueryConfig::default(), 50) {
            let positions: Vec<usize> = root_fields(&document)
                .iter()
                .map(|field| order.iter().position(|name| *name == field.name).unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(positions, sorted);
        }
    }

    #[test]
    fn depth_cap_falls_back_to_typename() {
        let sdl = "type Query { node: Node } type Node { child: Node }";
        let config = QueryConfig {
            max_depth: 3,
            ..QueryConfig::default()
        };
        for document in draw(sdl, &config, 5) {
            assert_eq!(
                document.to_string(),
                "query {\n  node {\n    child {\n      __typename\n    }\n  }\n}"
            );
        }
    }

    #[test]
    fn unsupported_fields_are_skipped() {
        let sdl = "scalar Date type Query { at(when: Date!): Int plain: Int }";
        for document in draw(sdl, &QueryConfig::default(), 20) {
            assert_eq!(document.to_string(), "query {\n  plain\n}");
        }
    }

    #[test]
    fn extended_fields_are_selectable() {
        let sdl = "type Query { a: Int } extend type Query { b(n: Int!): Int }";
        let schema = Schema::parse(sdl).unwrap();
        let documents = draw(sdl, &QueryConfig::default(), 50);
        for document in &documents {
            validate(&schema, document).unwrap();
        }
        assert!(documents
            .iter()
            .any(|document| root_fields(document).iter().any(|field| field.name == "b")));
    }

    #[test]
    fn unions_select_typename() {
        let sdl = "type Query { pet: Pet } union Pet = Cat | Dog type Cat { a: Int } type Dog { b: Int }";
        for document in draw(sdl, &QueryConfig::default(), 5) {
            assert_eq!(document.to_string(), "query {\n  pet {\n    __typename\n  }\n}");
        }
    }

    #[test]
    fn generated_documents_parse_and_validate() {
        let sdl = r#"
            schema { query: Root }
            enum Color { RED GREEN }
            input Filter { color: Color, tags: [String!], nested: Filter }
            interface Named { name: String }
            type Root {
                users(filter: Filter, first: Int!): [User!]!
                color: Color
                ratio(scale: Float): Float
            }
            type User implements Named { id: ID! name: String friends(limit: Int): [User] }
        "#;
        let schema = Schema::parse(sdl).unwrap();
        for document in draw(sdl, &QueryConfig::default(), 100) {
            let text = document.to_string();
            let reparsed = parse_str(&text).unwrap();
            assert_eq!(reparsed, document);
            validate(&schema, &reparsed).unwrap();
        }
    }

    #[test]
    fn missing_query_root_is_a_configuration_error() {
        let schema = Schema::parse("type Other { a: Int }").unwrap();
        let result = query_documents(&schema, &QueryConfig::default());
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let schema = Schema::parse("type Query { a: Int }").unwrap();
        let config = QueryConfig {
            max_depth: 0,
            ..QueryConfig::default()
        };
        assert!(query_documents(&schema, &config).is_err());
    }
}
