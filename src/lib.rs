#[macro_use]
extern crate serde_derive;

use wasm_bindgen::prelude::*;
pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod primitive;
pub mod printer;
pub mod query;
pub mod runner;
pub mod schema;
pub mod sdl;
pub mod validation;
pub mod value;

pub use config::{QueryConfig, SchemaTextConfig};
pub use error::Error;
pub use query::{queries, queries_from_sdl, query_documents, QueryGenerator};
pub use schema::Schema;
pub use sdl::schema_text;

pub fn sample_query(schema_sdl: &str, config: &QueryConfig, seed: u64) -> Result<ast::Document, Error> {
    let schema = Schema::parse(schema_sdl)?;
    let strategy = query_documents(&schema, config)?;
    runner::sample(&strategy, seed)
}

/// One piece of schema text, fixed by `seed`.
pub fn sample_schema(config: &SchemaTextConfig, seed: u64) -> Result<String, Error> {
    let strategy = schema_text(config)?;
    runner::sample(&strategy, seed)
}

fn to_js<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// JSON AST of a type system document or of a query shaped like the generated
/// ones. Fragments and variables are rejected with a parse error.
#[wasm_bindgen]
pub fn parse(document: &str) -> Result<String, JsValue> {
    let document = parser::parse_str(document).map_err(to_js)?;
    serde_json::to_string(&document).map_err(to_js)
}

#[wasm_bindgen]
pub fn generate_query(schema: &str, seed: u64) -> Result<String, JsValue> {
    let document = sample_query(schema, &QueryConfig::default(), seed).map_err(to_js)?;
    Ok(document.to_string())
}

#[wasm_bindgen]
pub fn generate_query_ast(schema: &str, seed: u64) -> Result<String, JsValue> {
    let document = sample_query(schema, &QueryConfig::default(), seed).map_err(to_js)?;
    serde_json::to_string(&document).map_err(to_js)
}

#[wasm_bindgen]
pub fn generate_schema(min_definitions: usize, max_definitions: usize, seed: u64) -> Result<String, JsValue> {
    let config = SchemaTextConfig::with_bounds(min_definitions, max_definitions);
    sample_schema(&config, seed).map_err(to_js)
}
