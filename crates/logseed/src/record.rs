//! In-memory records and batches

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::{FieldType, SchemaId};

/// A single field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Str(_) => FieldType::Utf8,
            Value::Int(_) => FieldType::Int64,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Str(_) => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
        }
    }
}

/// An ordered field-name → value mapping
///
/// Serializes as a map whose key order is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: &'static str, value: Value) {
        self.fields.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True if names, order and types match `schema` exactly
    pub fn conforms_to(&self, schema: SchemaId) -> bool {
        let spec = schema.fields();
        spec.len() == self.fields.len()
            && spec
                .iter()
                .zip(&self.fields)
                .all(|(f, (name, value))| f.name == *name && f.field_type == value.field_type())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A fixed-length sequence of records sharing one schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    schema: SchemaId,
    records: Vec<Record>,
}

impl Batch {
    pub(crate) fn new(schema: SchemaId, records: Vec<Record>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> SchemaId {
        self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record conforms to the batch schema
    pub fn conforms(&self) -> bool {
        self.records.iter().all(|r| r.conforms_to(self.schema))
    }
}
