use graphql_wasm_generator::ast::{Argument, Definition, Document, Field, TypeReference, Value};
use graphql_wasm_generator::parser::parse_str;
use graphql_wasm_generator::runner::{sample, seeded_runner};
use graphql_wasm_generator::validation::validate;
use graphql_wasm_generator::value::{Slot, ValueGenerator};
use graphql_wasm_generator::{queries, query_documents, sample_query, QueryConfig, Schema};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::test_runner::TestError;

const LIBRARY: &str = r#"
    schema { query: Library }

    enum Genre { FICTION POETRY DRAMA }
    scalar Timestamp

    input Range { from: Int!, to: Int }
    input BookFilter {
        genre: Genre
        published: Range
        authors: [ID!]
        rating: Float
        since: Timestamp
        and: [BookFilter!]
    }

    interface Node { id: ID! }

    type Author implements Node {
        id: ID!
        name: String!
        books(first: Int = 10): [Book!]!
    }

    type Book implements Node {
        id: ID!
        title: String
        genre: Genre!
        author: Author
        related(limit: Int!, filter: BookFilter): [Book]
        updated(after: Timestamp!): Boolean
    }

    union SearchResult = Author | Book

    type Library {
        book(id: ID!): Book
        books(filter: BookFilter!, first: Int): [Book!]!
        search(text: String!): [SearchResult!]
        node(id: ID!): Node
        count: Int
    }
"#;

fn library() -> Schema {
    Schema::parse(LIBRARY).unwrap()
}

fn documents(sdl: &str) -> BoxedStrategy<Document> {
    query_documents(&Schema::parse(sdl).unwrap(), &QueryConfig::default()).unwrap()
}

fn fields(document: &Document) -> Vec<&Field> {
    fn walk<'d>(fields: &'d [Field], into: &mut Vec<&'d Field>) {
        for field in fields {
            into.push(field);
            if let Some(nested) = &field.selection_set {
                walk(&nested.fields, into);
            }
        }
    }
    let mut all = Vec::new();
    for definition in &document.definitions {
        if let Definition::Operation(operation) = definition {
            walk(&operation.selection_set.fields, &mut all);
        }
    }
    all
}

fn has_key(value: &Value, key: &str) -> bool {
    match value {
        Value::ObjectValue(fields) => fields
            .iter()
            .any(|field| field.name == key || has_key(&field.value, key)),
        Value::ListValue(values) => values.iter().any(|value| has_key(value, key)),
        _ => false,
    }
}

fn argument<'d>(field: &'d Field, name: &str) -> Option<&'d Argument> {
    field.arguments.iter().find(|argument| argument.name == name)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn documents_parse_and_validate(document in documents(LIBRARY)) {
        let text = document.to_string();
        let reparsed = parse_str(&text).unwrap();
        prop_assert_eq!(&reparsed, &document);
        if let Err(error) = validate(&library(), &reparsed) {
            return Err(TestCaseError::fail(format!("{}\n{}", error, text)));
        }
    }

    #[test]
    fn custom_scalars_never_appear(document in documents(LIBRARY)) {
        for field in fields(&document) {
            prop_assert!(field.name != "updated");
            for argument in &field.arguments {
                prop_assert!(!has_key(&argument.value, "since"));
            }
        }
    }

    #[test]
    fn greet_always_has_its_name(query in queries(
        &Schema::parse("type Query { greet(name: String!): String }").unwrap(),
        &QueryConfig::default(),
    ).unwrap()) {
        prop_assert!(query.starts_with("query {\n  greet(name: \""), "{}", query);
    }

    #[test]
    fn enum_arguments_stay_in_the_enum(document in documents(
        "enum Color { RED GREEN BLUE } type Query { paint(c: Color): Boolean }"
    )) {
        let field = fields(&document)[0];
        if let Some(argument) = argument(field, "c") {
            match &argument.value {
                Value::EnumValue(value) => prop_assert!(["RED", "GREEN", "BLUE"].contains(&value.as_str())),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn required_input_objects_have_fields(document in documents(
        "input Options { a: Int b: String c: [Boolean] } type Query { run(options: Options!): Int }"
    )) {
        let field = fields(&document)[0];
        match argument(field, "options").map(|argument| &argument.value) {
            Some(Value::ObjectValue(fields)) => prop_assert!(!fields.is_empty()),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }

    #[test]
    fn pruning_is_idempotent(slot in ValueGenerator::new(&library(), &QueryConfig::default())
        .value(&TypeReference::named("BookFilter"))
        .unwrap()
    ) {
        if let Some(value) = slot.prune() {
            prop_assert_eq!(Slot::from(value.clone()).prune(), Some(value));
        }
    }

    #[test]
    fn seeds_replay(seed in any::<u64>()) {
        let first = sample_query(LIBRARY, &QueryConfig::default(), seed).unwrap();
        let second = sample_query(LIBRARY, &QueryConfig::default(), seed).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn greet_shrinks_to_an_empty_name() {
    let schema = Schema::parse("type Query { greet(name: String!): String }").unwrap();
    let strategy = queries(&schema, &QueryConfig::default()).unwrap();
    let result = seeded_runner(3).run(&strategy, |query| {
        prop_assert!(!query.contains("greet"));
        Ok(())
    });
    match result {
        Err(TestError::Fail(_, minimal)) => assert_eq!(minimal, "query {\n  greet(name: \"\")\n}"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn nullable_lists_may_be_null_and_required_ones_never() {
    let nullable: Vec<String> = (0..200)
        .map(|seed| sample_query("type Query { f(xs: [Int]): Int }", &QueryConfig::default(), seed))
        .map(|document| document.unwrap().to_string())
        .collect();
    assert!(nullable.iter().any(|query| query.contains("xs: null")));
    assert!(nullable.iter().any(|query| query.contains("xs: [")));
    assert!(nullable.iter().any(|query| query.contains("  f\n")));

    for seed in 0..200 {
        let query = sample_query("type Query { f(xs: [Int]!): Int }", &QueryConfig::default(), seed)
            .unwrap()
            .to_string();
        assert!(query.contains("xs: ["), "{}", query);
    }
}

#[test]
fn list_items_may_be_null() {
    let strategy = documents("type Query { f(xs: [[Int]]!): Int }");
    let found = (0..300).any(|seed| {
        let document = sample(&strategy, seed).unwrap();
        match &fields(&document)[0].arguments[0].value {
            Value::ListValue(items) => items.contains(&Value::NullValue),
            _ => false,
        }
    });
    assert!(found);
}

#[test]
fn depth_limit_is_respected() {
    fn depth(field: &Field) -> usize {
        match &field.selection_set {
            Some(nested) => 1 + nested.fields.iter().map(depth).max().unwrap_or(0),
            None => 0,
        }
    }
    let config = QueryConfig {
        max_depth: 2,
        ..QueryConfig::default()
    };
    let strategy = query_documents(&library(), &config).unwrap();
    for seed in 0..100 {
        let document = sample(&strategy, seed).unwrap();
        if let Definition::Operation(operation) = &document.definitions[0] {
            for field in &operation.selection_set.fields {
                assert!(depth(field) < config.max_depth, "{}", document);
            }
        }
        validate(&library(), &document).unwrap();
    }
}
