//! Generation works on [`Slot`]s so that "nothing generated here" stays
//! distinct from an explicit `null`.
use crate::ast::{ObjectField, TypeReference, Value};
use crate::config::QueryConfig;
use crate::error::Error;
use crate::primitive;
use crate::schema::{InputObjectType, Schema, TypeKind, Unwrapped};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::subsequence;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Empty,
    Null,
    Present(Literal),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(String),
    Float(String),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<Slot>),
    Object(Vec<(String, Slot)>),
}

impl Slot {
    /// `None` when the slot itself is Empty.
    pub fn prune(self) -> Option<Value> {
        match self {
            Slot::Empty => None,
            Slot::Null => Some(Value::NullValue),
            Slot::Present(literal) => Some(literal.prune()),
        }
    }
}

impl Literal {
    pub fn prune(self) -> Value {
        match self {
            Literal::Int(value) => Value::IntValue(value),
            Literal::Float(value) => Value::FloatValue(value),
            Literal::String(value) => Value::StringValue(value),
            Literal::Boolean(value) => Value::BooleanValue(value),
            Literal::Enum(value) => Value::EnumValue(value),
            Literal::List(items) => Value::ListValue(items.into_iter().filter_map(Slot::prune).collect()),
            Literal::Object(fields) => Value::ObjectValue(
                fields
                    .into_iter()
                    .filter_map(|(name, slot)| slot.prune().map(|value| ObjectField { name, value }))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Slot {
        let literal = match value {
            Value::NullValue => return Slot::Null,
            Value::IntValue(value) => Literal::Int(value),
            Value::FloatValue(value) => Literal::Float(value),
            Value::StringValue(value) => Literal::String(value),
            Value::BooleanValue(value) => Literal::Boolean(value),
            Value::EnumValue(value) => Literal::Enum(value),
            Value::ListValue(values) => Literal::List(values.into_iter().map(Slot::from).collect()),
            Value::ObjectValue(fields) => Literal::Object(
                fields
                    .into_iter()
                    .map(|field| (field.name, Slot::from(field.value)))
                    .collect(),
            ),
        };
        Slot::Present(literal)
    }
}

pub struct ValueGenerator<'s> {
    schema: &'s Schema,
    config: &'s QueryConfig,
}

impl<'s> ValueGenerator<'s> {
    pub fn new(schema: &'s Schema, config: &'s QueryConfig) -> ValueGenerator<'s> {
        ValueGenerator { schema, config }
    }

    /// Nullable positions may come out Empty.
    pub fn value(&self, ty: &TypeReference) -> Result<BoxedStrategy<Slot>, Error> {
        self.generate(ty, 0, true)
    }

    fn generate(&self, ty: &TypeReference, depth: usize, allow_empty: bool) -> Result<BoxedStrategy<Slot>, Error> {
        let optional = allow_empty && ty.is_nullable();
        match self.dispatch(ty, depth, optional) {
            Err(Error::UnsupportedType(reason)) if optional => {
                debug!(%ty, %reason, "no value can be generated, leaving the position empty");
                Ok(Just(Slot::Empty).boxed())
            }
            result => result,
        }
    }

    fn dispatch(&self, ty: &TypeReference, depth: usize, optional: bool) -> Result<BoxedStrategy<Slot>, Error> {
        let Unwrapped { nullable, kind } = self.schema.unwrap_type(ty)?;
        match kind {
            TypeKind::Scalar(scalar) => primitive::scalar(scalar, optional),
            TypeKind::Enum(enum_type) => primitive::enumeration(enum_type, optional),
            TypeKind::List(item) => {
                let item = self.generate(item, depth, true)?;
                let list = vec(item, 0..=self.config.max_list_length)
                    .prop_map(|items| Slot::Present(Literal::List(items)))
                    .boxed();
                Ok(nullable_composite(list, nullable, optional))
            }
            TypeKind::InputObject(input) => {
                let object = self.input_object(input, depth)?;
                Ok(nullable_composite(object, nullable, optional))
            }
            TypeKind::Object(object) | TypeKind::Interface(object) => Err(Error::UnsupportedType(
                format!("output type `{}` in an input position", object.name),
            )),
            TypeKind::Union(union) => Err(Error::UnsupportedType(format!(
                "output type `{}` in an input position",
                union.name
            ))),
        }
    }

    /// Required fields always, plus a random subset of the optional ones; never
    /// fewer than one field.
    fn input_object(&self, input: &InputObjectType, depth: usize) -> Result<BoxedStrategy<Slot>, Error> {
        if depth >= self.config.max_input_depth {
            return Err(Error::UnsupportedType(format!(
                "input object `{}` nested deeper than {} levels",
                input.name, self.config.max_input_depth
            )));
        }
        let mut required = Vec::new();
        let mut optional = Vec::new();
        for (position, field) in input.fields.values().enumerate() {
            match self.generate(&field.ty, depth + 1, false) {
                Ok(strategy) => {
                    let name = field.name.clone();
                    let entry = strategy
                        .prop_map(move |slot| (position, name.clone(), slot))
                        .boxed();
                    if field.is_required() {
                        required.push(entry);
                    } else {
                        optional.push(entry);
                    }
                }
                Err(Error::UnsupportedType(reason)) if !field.is_required() => {
                    debug!(input = %input.name, field = %field.name, %reason, "skipping input field");
                }
                Err(error) => return Err(error),
            }
        }
        if required.is_empty() && optional.is_empty() {
            return Err(Error::UnsupportedType(format!(
                "input object `{}` has no field a value can be generated for",
                input.name
            )));
        }
        let at_least = if required.is_empty() { 1 } else { 0 };
        let count = optional.len();
        let chosen = subsequence(optional, at_least..=count).prop_flat_map(|chosen| chosen);
        Ok((required, chosen)
            .prop_map(|(mut fields, chosen)| {
                fields.extend(chosen);
                fields.sort_by_key(|(position, _, _)| *position);
                let fields = fields.into_iter().map(|(_, name, slot)| (name, slot)).collect();
                Slot::Present(Literal::Object(fields))
            })
            .boxed())
    }
}

/// Lists and input objects may also be an explicit `null` when nullable.
fn nullable_composite(present: BoxedStrategy<Slot>, nullable: bool, optional: bool) -> BoxedStrategy<Slot> {
    if optional {
        prop_oneof![1 => Just(Slot::Empty), 1 => Just(Slot::Null), 4 => present].boxed()
    } else if nullable {
        prop_oneof![1 => Just(Slot::Null), 4 => present].boxed()
    } else {
        present
    }
}
