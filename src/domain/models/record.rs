use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Read and write access to a record's fields by name
///
/// This is the only view of a host record the credential hasher needs.
/// An absent field reads as `None`.
pub trait FieldAccess {
    fn get_field(&self, field: &str) -> Result<Option<String>, DomainError>;

    fn set_field(&mut self, field: &str, value: String) -> Result<(), DomainError>;
}

/// Loosely-typed record backed by a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FieldAccess for Record {
    fn get_field(&self, field: &str) -> Result<Option<String>, DomainError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(DomainError::InvalidFieldType(field.to_string())),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), DomainError> {
        self.insert(field, value);
        Ok(())
    }
}
