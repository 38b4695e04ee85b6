use crate::core::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

/// One row as returned by a store. Columns keep the order the store produced
/// them in; the pager never drops or rewrites any of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowData {
    pub entity: String,
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(entity: &str, field_values: Vec<FieldValue>) -> Self {
        RowData {
            entity: entity.to_string(),
            field_values,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .map(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    /// Sets `field`, replacing an existing column of the same name.
    pub fn set(&mut self, field: &str, value: Value) {
        match self
            .field_values
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(field))
        {
            Some(existing) => existing.value = value,
            None => self.field_values.push(FieldValue {
                name: field.to_string(),
                value,
            }),
        }
    }

    pub fn with(mut self, field: &str, value: Value) -> Self {
        self.set(field, value);
        self
    }

    /// Serializes the row as a flat JSON object keyed by column name.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .field_values
            .iter()
            .map(|f| (f.name.clone(), f.value.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        let row = RowData::new("products", vec![]).with("Created_At", Value::Int(1));
        assert_eq!(row.get_value("created_at"), Value::Int(1));
        assert_eq!(row.get_value("missing"), Value::Null);
    }

    #[test]
    fn test_set_replaces_existing_column() {
        let mut row = RowData::new("orders", vec![]).with("status", Value::String("new".into()));
        row.set("STATUS", Value::String("paid".into()));
        assert_eq!(row.field_values.len(), 1);
        assert_eq!(row.get_value("status"), Value::String("paid".into()));
    }

    #[test]
    fn test_to_json_passes_every_column_through() {
        let row = RowData::new("products", vec![])
            .with("id", Value::Int(3))
            .with("name", Value::String("Desk lamp".into()))
            .with("archived", Value::Boolean(false));

        assert_eq!(
            row.to_json(),
            serde_json::json!({"id": 3, "name": "Desk lamp", "archived": false})
        );
    }
}
