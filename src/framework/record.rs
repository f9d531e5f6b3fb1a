//! # Records
//!
//! A [`Record`] holds one value per declared field of its schema. The mapping is total:
//! a field the backend left out, or sent as `null`, is held as [`FieldValue::Empty`]
//! rather than being missing, so partial records can't be represented.
//!
//! Values are kept as the backend's JSON, verbatim. Reference fields hold the key of the
//! referenced record, exactly as the ledger serializes relations.

use crate::framework::error::ClientError;
use crate::framework::schema::{FieldToken, Resource, Schema};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// JSON key carrying the fully qualified type name.
pub const CLASS_KEY: &str = "$class";

/// The value of one field.
///
/// `Present` values are never overwritten on account of being falsy: `0`, `false` and
/// `""` are real values.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Present(Value),
}

impl FieldValue {
    /// Reads a value as the backend sent it. Absent keys and `null` are `Empty`.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => FieldValue::Empty,
            Some(value) => FieldValue::Present(value.clone()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Empty => Value::Null,
            FieldValue::Present(value) => value.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Whether a required-field check fails on this value: empty, an empty string, or an
    /// empty sequence.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Present(Value::String(s)) => s.is_empty(),
            FieldValue::Present(Value::Array(items)) => items.is_empty(),
            FieldValue::Present(_) => false,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Present(value) => Some(value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_json().and_then(Value::as_bool)
    }

    /// Renders the value as a record key. Strings are used as is, numbers in decimal.
    pub fn as_key(&self) -> Option<String> {
        match self.as_json()? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::from_json(Some(&value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Present(Value::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Present(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Present(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Present(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Present(Value::from(value))
    }
}

/// One instance of a schema: a value for every declared field.
pub struct Record<S: Schema> {
    values: Vec<FieldValue>,
    _schema: PhantomData<fn() -> S>,
}

impl<S: Schema> Record<S> {
    /// A record with every field set to the empty sentinel.
    pub fn empty() -> Self {
        Self {
            values: vec![FieldValue::Empty; S::Field::ALL.len()],
            _schema: PhantomData,
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, field: S::Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: S::Field) -> &FieldValue {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: S::Field, value: impl Into<FieldValue>) {
        self.values[field.index()] = value.into();
    }

    pub(crate) fn get_mut(&mut self, field: S::Field) -> &mut FieldValue {
        &mut self.values[field.index()]
    }

    /// Fields with their values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (S::Field, &FieldValue)> {
        S::Field::ALL.iter().copied().zip(self.values.iter())
    }

    pub fn is_all_empty(&self) -> bool {
        self.values.iter().all(FieldValue::is_empty)
    }

    /// Decodes a backend JSON object. Keys that are not declared fields (`$class`, ...)
    /// are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ClientError> {
        let object = value.as_object().ok_or_else(|| {
            ClientError::Decode(format!("expected a {} object, got {}", S::NAME, value))
        })?;
        let mut record = Self::empty();
        for field in S::Field::ALL.iter().copied() {
            record.values[field.index()] = FieldValue::from_json(object.get(field.name()));
        }
        Ok(record)
    }

    /// Body of a create request: `{ $class, ...fields }`.
    pub fn create_payload(&self) -> Value {
        let mut map = Map::new();
        map.insert(CLASS_KEY.to_string(), Value::String(S::class_name()));
        map.extend(self.fields_map(|_, _| true));
        Value::Object(map)
    }

    fn fields_map(&self, include: impl Fn(S::Field, &FieldValue) -> bool) -> Map<String, Value> {
        self.iter()
            .filter(|(field, value)| include(*field, value))
            .map(|(field, value)| (field.name().to_string(), value.to_json()))
            .collect()
    }
}

impl<K: Resource> Record<K> {
    /// The primary key, if the key field holds one.
    pub fn key(&self) -> Option<String> {
        self.get(K::KEY).as_key()
    }

    /// Body of an update request: `{ $class, ...fields }` with only the fields that hold a
    /// value. The key field is left out; it is immutable once created.
    pub fn update_payload(&self) -> Value {
        let mut map = Map::new();
        map.insert(CLASS_KEY.to_string(), Value::String(K::class_name()));
        map.extend(self.fields_map(|field, value| field != K::KEY && !value.is_empty()));
        Value::Object(map)
    }
}

impl<S: Schema> Default for Record<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Schema> Clone for Record<S> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _schema: PhantomData,
        }
    }
}

impl<S: Schema> PartialEq for Record<S> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<S: Schema> fmt::Debug for Record<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in self.iter() {
            map.entry(&field.name(), value);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::FieldType;
    use serde_json::json;

    const TEST_NS: &str = "org.test";

    crate::schema! {
        struct Guest in TEST_NS {
            Id => "ID": FieldType::Text,
            Name => "name": FieldType::Text,
            Balance => "balance": FieldType::Number,
            Vip => "vip": FieldType::Boolean,
        }
    }

    impl Resource for Guest {
        const KEY: GuestField = GuestField::Id;
    }

    #[test]
    fn test_empty_record_has_every_field() {
        let record = Record::<Guest>::empty();
        assert_eq!(record.iter().count(), 4);
        assert!(record.is_all_empty());
        assert_eq!(record.key(), None);
    }

    #[test]
    fn test_from_json_keeps_falsy_values() {
        let record = Record::<Guest>::from_json(&json!({
            "$class": "org.test.Guest",
            "ID": "G1",
            "balance": 0,
            "vip": false,
            "name": null,
        }))
        .unwrap();

        assert_eq!(record.get(GuestField::Id).as_str(), Some("G1"));
        assert_eq!(record.get(GuestField::Balance), &FieldValue::Present(json!(0)));
        assert_eq!(record.get(GuestField::Vip).as_bool(), Some(false));
        assert!(record.get(GuestField::Name).is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = Record::<Guest>::from_json(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_payloads_carry_class_and_respect_key() {
        let record = Record::<Guest>::empty()
            .with(GuestField::Id, "G1")
            .with(GuestField::Name, "Jo");

        let create = record.create_payload();
        assert_eq!(create["$class"], "org.test.Guest");
        assert_eq!(create["ID"], "G1");
        assert_eq!(create["balance"], Value::Null);

        let update = record.update_payload();
        assert_eq!(update["$class"], "org.test.Guest");
        assert!(update.get("ID").is_none());
        assert_eq!(update["name"], "Jo");
    }

    #[test]
    fn test_update_payload_sends_only_held_values() {
        let record = Record::<Guest>::empty()
            .with(GuestField::Balance, 0_i64)
            .with(GuestField::Vip, false);

        let update = record.update_payload();
        assert_eq!(
            update,
            json!({ "$class": "org.test.Guest", "balance": 0, "vip": false })
        );
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::Empty.is_blank());
        assert!(FieldValue::from("").is_blank());
        assert!(FieldValue::Present(json!([])).is_blank());
        assert!(!FieldValue::from(0_i64).is_blank());
        assert!(!FieldValue::from(false).is_blank());
        assert_eq!(FieldValue::from(json!(null)), FieldValue::Empty);
    }

    #[test]
    fn test_numeric_keys() {
        let record = Record::<Guest>::empty().with(GuestField::Id, 42_i64);
        assert_eq!(record.key().as_deref(), Some("42"));
    }
}
