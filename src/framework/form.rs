//! # Record Form Model
//!
//! The in-memory editable projection of one record. Each declared field has a
//! [`FieldControl`]: its current value and whether it is required. Validity is derived
//! and purely advisory; views use it to enable or disable a submit action, controllers
//! never refuse to submit an invalid form.

use crate::framework::error::FormError;
use crate::framework::record::{FieldValue, Record};
use crate::framework::schema::{FieldToken, Schema};
use serde_json::Value;
use std::fmt;

/// Value and constraint of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldControl {
    pub value: FieldValue,
    pub required: bool,
}

impl FieldControl {
    /// A required control is valid once its value is not blank.
    pub fn is_valid(&self) -> bool {
        !self.required || !self.value.is_blank()
    }
}

/// An editable record with per-field constraints.
pub struct RecordForm<S: Schema> {
    values: Record<S>,
    required: Vec<bool>,
}

impl<S: Schema> RecordForm<S> {
    pub fn new() -> Self {
        Self {
            values: Record::empty(),
            required: S::Field::ALL.iter().map(|field| field.required()).collect(),
        }
    }

    pub fn control(&self, field: S::Field) -> FieldControl {
        FieldControl {
            value: self.values.get(field).clone(),
            required: self.required[field.index()],
        }
    }

    pub fn value(&self, field: S::Field) -> &FieldValue {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: S::Field, value: impl Into<FieldValue>) {
        self.values.set(field, value);
    }

    pub fn set_required(&mut self, field: S::Field, required: bool) {
        self.required[field.index()] = required;
    }

    pub fn is_field_valid(&self, field: S::Field) -> bool {
        self.control(field).is_valid()
    }

    /// Conjunction of every field's validity.
    pub fn is_valid(&self) -> bool {
        S::Field::ALL.iter().all(|field| self.is_field_valid(*field))
    }

    pub fn invalid_fields(&self) -> Vec<S::Field> {
        S::Field::ALL
            .iter()
            .copied()
            .filter(|field| !self.is_field_valid(*field))
            .collect()
    }

    /// Copy of the current values, ready to be submitted.
    pub fn snapshot(&self) -> Record<S> {
        self.values.clone()
    }

    /// Replaces every value with the record's.
    pub fn load(&mut self, record: &Record<S>) {
        self.values = record.clone();
    }

    /// Sets every field to the empty sentinel. Constraints are kept.
    pub fn reset(&mut self) {
        self.values = Record::empty();
    }

    pub fn is_cleared(&self) -> bool {
        self.values.is_all_empty()
    }

    /// Adds `value` to a multi-valued field if absent, removes it if present.
    ///
    /// An empty field starts a new sequence. Returns whether `value` is a member afterwards.
    pub fn toggle_membership(
        &mut self,
        field: S::Field,
        value: impl Into<Value>,
    ) -> Result<bool, FormError> {
        let value = value.into();
        let slot = self.values.get_mut(field);
        if slot.is_empty() {
            *slot = FieldValue::Present(Value::Array(vec![value]));
            return Ok(true);
        }
        match slot {
            FieldValue::Present(Value::Array(items)) => {
                match items.iter().position(|item| *item == value) {
                    Some(index) => {
                        items.remove(index);
                        Ok(false)
                    }
                    None => {
                        items.push(value);
                        Ok(true)
                    }
                }
            }
            other => Err(FormError::NotASequence {
                field: field.name(),
                found: other.to_json().to_string(),
            }),
        }
    }

    /// Whether a multi-valued field currently contains `value`.
    pub fn has_membership(&self, field: S::Field, value: &Value) -> bool {
        match self.values.get(field) {
            FieldValue::Present(Value::Array(items)) => items.contains(value),
            _ => false,
        }
    }
}

impl<S: Schema> Default for RecordForm<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Schema> Clone for RecordForm<S> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            required: self.required.clone(),
        }
    }
}

impl<S: Schema> fmt::Debug for RecordForm<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordForm")
            .field("schema", &S::NAME)
            .field("values", &self.values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::FieldType;
    use serde_json::json;

    const TEST_NS: &str = "org.test";

    crate::schema! {
        struct Suite in TEST_NS {
            Code => "code": FieldType::Text,
            Amenities => "amenities": FieldType::Enum(&["pool", "gym", "spa"]),
            Floor => "floor": FieldType::Number,
        }
    }

    #[test]
    fn test_new_form_is_cleared_and_invalid() {
        let form = RecordForm::<Suite>::new();
        assert!(form.is_cleared());
        assert!(!form.is_valid());
        assert_eq!(form.invalid_fields().len(), 3);
        assert!(form.control(SuiteField::Code).required);
    }

    #[test]
    fn test_validity_follows_values() {
        let mut form = RecordForm::<Suite>::new();
        form.set_value(SuiteField::Code, "S1");
        form.set_value(SuiteField::Floor, 0_i64);
        assert!(form.is_field_valid(SuiteField::Floor));
        assert_eq!(form.invalid_fields(), vec![SuiteField::Amenities]);

        form.set_required(SuiteField::Amenities, false);
        assert!(form.is_valid());

        form.set_value(SuiteField::Code, "");
        assert!(!form.is_valid());
    }

    #[test]
    fn test_membership_toggles() {
        let mut form = RecordForm::<Suite>::new();
        assert!(!form.has_membership(SuiteField::Amenities, &json!("pool")));

        assert!(form.toggle_membership(SuiteField::Amenities, "pool").unwrap());
        assert!(form.toggle_membership(SuiteField::Amenities, "spa").unwrap());
        assert!(form.has_membership(SuiteField::Amenities, &json!("pool")));
        assert_eq!(form.value(SuiteField::Amenities).as_json(), Some(&json!(["pool", "spa"])));

        assert!(!form.toggle_membership(SuiteField::Amenities, "pool").unwrap());
        assert!(!form.has_membership(SuiteField::Amenities, &json!("pool")));
        assert_eq!(form.value(SuiteField::Amenities).as_json(), Some(&json!(["spa"])));
    }

    #[test]
    fn test_membership_needs_a_sequence() {
        let mut form = RecordForm::<Suite>::new();
        form.set_value(SuiteField::Code, "S1");
        let err = form.toggle_membership(SuiteField::Code, "x").unwrap_err();
        assert_eq!(
            err,
            FormError::NotASequence { field: "code", found: "\"S1\"".to_string() }
        );
    }

    #[test]
    fn test_load_then_reset() {
        let record = Record::<Suite>::empty()
            .with(SuiteField::Code, "S2")
            .with(SuiteField::Floor, 3_i64);
        let mut form = RecordForm::<Suite>::new();
        form.load(&record);
        assert_eq!(form.snapshot(), record);

        form.reset();
        assert!(form.is_cleared());
        form.reset();
        assert!(form.is_cleared());
    }
}
