//! Leaf generators: built-in scalar literals and enum values.
use crate::error::Error;
use crate::schema::{BuiltinScalar, EnumType, ScalarType};
use crate::value::{Literal, Slot};
use proptest::prelude::*;
use proptest::sample::select;

pub fn builtin(scalar: BuiltinScalar) -> BoxedStrategy<Literal> {
    match scalar {
        BuiltinScalar::Int => int_text().prop_map(Literal::Int).boxed(),
        BuiltinScalar::Float => float_text().prop_map(Literal::Float).boxed(),
        BuiltinScalar::String => any::<String>().prop_map(Literal::String).boxed(),
        BuiltinScalar::Id => prop_oneof![
            any::<String>().prop_map(Literal::String),
            int_text().prop_map(Literal::Int),
        ]
        .boxed(),
        BuiltinScalar::Boolean => any::<bool>().prop_map(Literal::Boolean).boxed(),
    }
}

/// Fails for anything but the five built-in scalars.
pub fn scalar(scalar: &ScalarType, nullable: bool) -> Result<BoxedStrategy<Slot>, Error> {
    let builtin_scalar = BuiltinScalar::from_name(&scalar.name).ok_or_else(|| {
        Error::UnsupportedType(format!("custom scalar `{}`", scalar.name))
    })?;
    Ok(or_empty(builtin(builtin_scalar), nullable))
}

/// Uniform over the declared values.
pub fn enumeration(enum_type: &EnumType, nullable: bool) -> Result<BoxedStrategy<Slot>, Error> {
    if enum_type.values.is_empty() {
        return Err(Error::UnsupportedType(format!(
            "enum `{}` has no values",
            enum_type.name
        )));
    }
    let values: Vec<String> = enum_type.values.iter().cloned().collect();
    Ok(or_empty(select(values).prop_map(Literal::Enum).boxed(), nullable))
}

fn or_empty(present: BoxedStrategy<Literal>, nullable: bool) -> BoxedStrategy<Slot> {
    let present = present.prop_map(Slot::Present);
    if nullable {
        prop_oneof![1 => Just(Slot::Empty), 3 => present].boxed()
    } else {
        present.boxed()
    }
}

/// GraphQL `Int` is 32 bit.
pub(crate) fn int_text() -> impl Strategy<Value = String> {
    any::<i32>().prop_map(|n| n.to_string())
}

/// Finite floats only; `{:?}` keeps a fraction or exponent on every value.
pub(crate) fn float_text() -> impl Strategy<Value = String> {
    use proptest::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    (POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO).prop_map(|x| format!("{:?}", x))
}
