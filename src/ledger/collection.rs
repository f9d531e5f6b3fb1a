//! One collection of the in-memory ledger: its records and the rules it enforces on
//! writes.

use crate::framework::{ClientError, FieldToken, Resource, Schema, Transaction, CLASS_KEY};
use serde_json::{Map, Value};

/// How records of a collection are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyPolicy {
    /// The caller supplies the key in this field.
    Field(&'static str),
    /// The ledger assigns a key into this field on submit.
    Generated(&'static str),
}

/// Field the ledger assigns to every submitted transaction.
pub const TRANSACTION_ID: &str = "transactionId";

/// Records of one kind, in insertion order.
#[derive(Debug)]
pub(crate) struct Collection {
    pub class: String,
    pub key: KeyPolicy,
    pub required: Vec<&'static str>,
    pub records: Vec<Map<String, Value>>,
}

impl Collection {
    pub fn for_resource<K: Resource>() -> Self {
        Self {
            class: K::class_name(),
            key: KeyPolicy::Field(K::KEY.name()),
            required: required_fields::<K>(),
            records: Vec::new(),
        }
    }

    pub fn for_transaction<T: Transaction>() -> Self {
        Self {
            class: T::class_name(),
            key: KeyPolicy::Generated(TRANSACTION_ID),
            required: required_fields::<T>(),
            records: Vec::new(),
        }
    }

    fn key_field(&self) -> &'static str {
        match self.key {
            KeyPolicy::Field(field) | KeyPolicy::Generated(field) => field,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self.key, KeyPolicy::Generated(_))
    }

    fn position(&self, key: &str) -> Option<usize> {
        let field = self.key_field();
        self.records
            .iter()
            .position(|record| record.get(field).and_then(key_of).as_deref() == Some(key))
    }

    pub fn list(&self) -> Value {
        Value::Array(self.records.iter().cloned().map(Value::Object).collect())
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.position(key)
            .map(|index| Value::Object(self.records[index].clone()))
    }

    /// Stores a new record. `generated` is the key to assign when the ledger keys the
    /// collection.
    pub fn insert(&mut self, body: Value, generated: Option<String>) -> Result<Value, ClientError> {
        let mut record = self.checked_object(body)?;
        let key = match (self.key, generated) {
            (KeyPolicy::Generated(field), Some(id)) => {
                record.insert(field.to_string(), Value::String(id.clone()));
                id
            }
            _ => {
                let field = self.key_field();
                record.get(field).and_then(key_of).ok_or_else(|| {
                    ClientError::Validation(format!(
                        "Instance {} missing required field {}",
                        self.class, field
                    ))
                })?
            }
        };
        if self.position(&key).is_some() {
            return Err(ClientError::Conflict(format!(
                "Object with ID '{}' in collection with ID '{}' already exists",
                key, self.class
            )));
        }
        self.records.push(record.clone());
        Ok(Value::Object(record))
    }

    /// Merges the fields of `body` onto the record `key`. Fields the body leaves out keep
    /// their stored value; the key field is never changed.
    pub fn merge(&mut self, key: &str, body: Value) -> Result<Value, ClientError> {
        let index = self
            .position(key)
            .ok_or_else(|| ClientError::NotFound(format!("/{}/{}", self.name(), key)))?;
        let Value::Object(fields) = body else {
            return Err(ClientError::Validation(format!(
                "Expected a {} object",
                self.class
            )));
        };
        let field = self.key_field();
        let stored = &self.records[index];
        let mut merged = stored.clone();
        merged.extend(fields);
        merged.insert(
            field.to_string(),
            stored.get(field).cloned().unwrap_or(Value::Null),
        );
        let record = self.checked_object(Value::Object(merged))?;
        self.records[index] = record.clone();
        Ok(Value::Object(record))
    }

    pub fn remove(&mut self, key: &str) -> Result<(), ClientError> {
        let index = self
            .position(key)
            .ok_or_else(|| ClientError::NotFound(format!("/{}/{}", self.name(), key)))?;
        self.records.remove(index);
        Ok(())
    }

    fn name(&self) -> &str {
        self.class.rsplit('.').next().unwrap_or(&self.class)
    }

    /// Checks the type tag and required fields of a write.
    fn checked_object(&self, body: Value) -> Result<Map<String, Value>, ClientError> {
        let Value::Object(mut map) = body else {
            return Err(ClientError::Validation(format!(
                "Expected a {} object",
                self.class
            )));
        };
        match map.get(CLASS_KEY).and_then(Value::as_str) {
            Some(class) if class == self.class => {}
            Some(other) => {
                return Err(ClientError::Validation(format!(
                    "Expected $class {}, got {}",
                    self.class, other
                )))
            }
            None => {
                map.insert(CLASS_KEY.to_string(), Value::String(self.class.clone()));
            }
        }
        if let Some(missing) = self
            .required
            .iter()
            .find(|field| map.get(**field).map_or(true, Value::is_null))
        {
            return Err(ClientError::Validation(format!(
                "Instance {} missing required field {}",
                self.class, missing
            )));
        }
        Ok(map)
    }
}

fn required_fields<S: Schema>() -> Vec<&'static str> {
    S::Field::ALL
        .iter()
        .filter(|field| field.required())
        .map(|field| field.name())
        .collect()
}

/// Renders a key field's value the way keys appear in paths.
fn key_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
