use crate::error::Error;

/// Upper bound for every nesting limit.
pub const MAX_NESTING: usize = 16;
/// Upper bound for every size limit.
pub const MAX_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Maximum selection set nesting, the root selection set included.
    pub max_depth: usize,
    /// Maximum input object nesting inside one argument value.
    pub max_input_depth: usize,
    pub max_list_length: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            max_depth: 4,
            max_input_depth: 3,
            max_list_length: 3,
        }
    }
}

impl QueryConfig {
    pub fn from_json(json: &str) -> Result<QueryConfig, Error> {
        let config: QueryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_depth == 0 {
            return Err(Error::Configuration(String::from("max_depth must be at least 1")));
        }
        at_most("max_depth", self.max_depth, MAX_NESTING)?;
        at_most("max_input_depth", self.max_input_depth, MAX_NESTING)?;
        at_most("max_list_length", self.max_list_length, MAX_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaTextConfig {
    pub min_definitions: usize,
    pub max_definitions: usize,
    pub max_fields: usize,
    pub max_arguments: usize,
    pub max_directives: usize,
    pub max_interfaces: usize,
    /// Levels of list nesting a type reference may have.
    pub max_type_depth: u32,
}

impl Default for SchemaTextConfig {
    fn default() -> Self {
        SchemaTextConfig {
            min_definitions: 1,
            max_definitions: 5,
            max_fields: 4,
            max_arguments: 2,
            max_directives: 2,
            max_interfaces: 2,
            max_type_depth: 3,
        }
    }
}

impl SchemaTextConfig {
    pub fn with_bounds(min_definitions: usize, max_definitions: usize) -> SchemaTextConfig {
        SchemaTextConfig {
            min_definitions,
            max_definitions,
            ..SchemaTextConfig::default()
        }
    }

    pub fn from_json(json: &str) -> Result<SchemaTextConfig, Error> {
        let config: SchemaTextConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.min_definitions == 0 {
            return Err(Error::Configuration(String::from(
                "min_definitions must be at least 1",
            )));
        }
        if self.min_definitions > self.max_definitions {
            return Err(Error::Configuration(format!(
                "min_definitions ({}) is larger than max_definitions ({})",
                self.min_definitions, self.max_definitions
            )));
        }
        at_most("max_definitions", self.max_definitions, MAX_SIZE)?;
        at_most("max_fields", self.max_fields, MAX_SIZE)?;
        at_most("max_arguments", self.max_arguments, MAX_SIZE)?;
        at_most("max_directives", self.max_directives, MAX_SIZE)?;
        at_most("max_interfaces", self.max_interfaces, MAX_SIZE)?;
        at_most("max_type_depth", self.max_type_depth as usize, MAX_NESTING)
    }
}

fn at_most(name: &str, value: usize, cap: usize) -> Result<(), Error> {
    if value > cap {
        return Err(Error::Configuration(format!("{} ({}) is larger than {}", name, value, cap)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = QueryConfig::from_json(r#"{"max_depth": 2}"#).unwrap();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_list_length, QueryConfig::default().max_list_length);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            QueryConfig::from_json(r#"{"depth": 2}"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert!(matches!(
            QueryConfig::from_json(r#"{"max_depth": 0}"#),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn oversized_limits_are_rejected() {
        for json in &[r#"{"max_list_length": 1000000}"#, r#"{"max_depth": 1000}"#] {
            assert!(matches!(QueryConfig::from_json(json), Err(Error::Configuration(_))), "{}", json);
        }
        for json in &[
            r#"{"max_definitions": 1000000}"#,
            r#"{"max_fields": 65}"#,
            r#"{"max_arguments": 100}"#,
            r#"{"max_type_depth": 17}"#,
        ] {
            assert!(matches!(SchemaTextConfig::from_json(json), Err(Error::Configuration(_))), "{}", json);
        }
        let config = QueryConfig::from_json(&format!(r#"{{"max_list_length": {}}}"#, MAX_SIZE)).unwrap();
        assert_eq!(config.max_list_length, MAX_SIZE);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        assert!(SchemaTextConfig::with_bounds(3, 2).validate().is_err());
        assert!(SchemaTextConfig::with_bounds(0, 2).validate().is_err());
        assert!(SchemaTextConfig::with_bounds(1, 1).validate().is_ok());
        let config = SchemaTextConfig::from_json(r#"{"max_fields": 1}"#).unwrap();
        assert_eq!(config.max_fields, 1);
    }
}
