//! Parquet output via a single Arrow record batch

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use super::SerializeError;
use crate::record::{Batch, Value};
use crate::schema::{FieldType, SchemaId};

/// Arrow schema for `schema`, one non-nullable column per field
pub fn arrow_schema(schema: SchemaId) -> Arc<Schema> {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| {
            let data_type = match f.field_type {
                FieldType::Utf8 => DataType::Utf8,
                FieldType::Int64 => DataType::Int64,
            };
            Field::new(f.name, data_type, false)
        })
        .collect();
    Arc::new(Schema::new(fields))
}

fn to_record_batch(batch: &Batch, schema: Arc<Schema>) -> Result<RecordBatch, SerializeError> {
    let nonconforming = |row: usize| SerializeError::Nonconforming {
        row,
        schema: batch.schema().to_string(),
    };

    if let Some(row) = batch.records().iter().position(|r| !r.conforms_to(batch.schema())) {
        return Err(nonconforming(row));
    }

    // Records conform, so column i of every record has the declared type.
    let columns: Vec<ArrayRef> = batch
        .schema()
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let cells = batch.records().iter().filter_map(|r| r.values().nth(i));
            match field.field_type {
                FieldType::Utf8 => Arc::new(StringArray::from_iter_values(
                    cells.filter_map(Value::as_str),
                )) as ArrayRef,
                FieldType::Int64 => Arc::new(Int64Array::from(
                    cells.filter_map(Value::as_int).collect::<Vec<_>>(),
                )) as ArrayRef,
            }
        })
        .collect();

    Ok(RecordBatch::try_new(schema, columns)?)
}

pub(super) fn write(batch: &Batch, path: &Path) -> Result<(), SerializeError> {
    let schema = arrow_schema(batch.schema());
    let record_batch = to_record_batch(batch, Arc::clone(&schema))?;

    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&record_batch)?;
    writer.close()?;

    Ok(())
}
