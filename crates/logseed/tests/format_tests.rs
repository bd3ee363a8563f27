//! Read-back tests for the three artifact formats
//!
//! Each artifact is parsed with an independent reader and compared against
//! the batch it was written from.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use arrow::array::{Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use logseed::generator::Generator;
use logseed::record::{Record, Value};
use logseed::schema::{FieldType, SchemaId};
use logseed::serializer::{serialize, Format};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

const SCHEMAS: [SchemaId; 3] = [SchemaId::AppLog, SchemaId::WebLog, SchemaId::SysLog];

fn read_csv(path: &Path, schema: SchemaId) -> Vec<Record> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, schema.field_names());

    reader
        .records()
        .map(|row| {
            let row = row.unwrap();
            assert_eq!(row.len(), schema.fields().len());
            let mut record = Record::with_capacity(row.len());
            for (field, cell) in schema.fields().iter().zip(row.iter()) {
                let value = match field.field_type {
                    FieldType::Utf8 => Value::Str(cell.to_string()),
                    FieldType::Int64 => Value::Int(cell.parse().unwrap()),
                };
                record.push(field.name, value);
            }
            record
        })
        .collect()
}

fn read_json_lines(path: &Path, schema: SchemaId) -> Vec<Record> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| {
            let object: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(line).unwrap();
            assert_eq!(object.len(), schema.fields().len());
            let mut record = Record::with_capacity(object.len());
            for field in schema.fields() {
                let cell = &object[field.name];
                let value = match field.field_type {
                    FieldType::Utf8 => Value::Str(cell.as_str().unwrap().to_string()),
                    FieldType::Int64 => Value::Int(cell.as_i64().unwrap()),
                };
                record.push(field.name, value);
            }
            record
        })
        .collect()
}

fn read_parquet(path: &Path, schema: SchemaId) -> Vec<Record> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path).unwrap())
        .unwrap()
        .build()
        .unwrap();

    let mut records = Vec::new();
    for table in reader {
        let table = table.unwrap();
        assert_eq!(table.num_columns(), schema.fields().len());
        for row in 0..table.num_rows() {
            let mut record = Record::with_capacity(table.num_columns());
            for (i, field) in schema.fields().iter().enumerate() {
                let column = table.column(i).as_any();
                let value = match field.field_type {
                    FieldType::Utf8 => Value::Str(
                        column.downcast_ref::<StringArray>().unwrap().value(row).to_string(),
                    ),
                    FieldType::Int64 => {
                        Value::Int(column.downcast_ref::<Int64Array>().unwrap().value(row))
                    },
                };
                record.push(field.name, value);
            }
            records.push(record);
        }
    }
    records
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_csv_round_trip_is_field_equal() {
    let dir = tempfile::tempdir().unwrap();
    for (seed, schema) in SCHEMAS.into_iter().enumerate() {
        let path = dir.path().join(format!("{}.csv", schema));
        let batch = Generator::new(Some(seed as u64)).generate(30, schema);

        serialize(&batch, Format::Csv, &path).unwrap();

        assert_eq!(read_csv(&path, schema).as_slice(), batch.records());
    }
}

#[test]
fn test_json_lines_round_trip_is_field_equal() {
    let dir = tempfile::tempdir().unwrap();
    for (seed, schema) in SCHEMAS.into_iter().enumerate() {
        let path = dir.path().join(format!("{}.json", schema));
        let batch = Generator::new(Some(seed as u64)).generate(30, schema);

        serialize(&batch, Format::JsonLines, &path).unwrap();

        assert_eq!(read_json_lines(&path, schema).as_slice(), batch.records());
    }
}

#[test]
fn test_parquet_round_trip_is_field_equal() {
    let dir = tempfile::tempdir().unwrap();
    for (seed, schema) in SCHEMAS.into_iter().enumerate() {
        let path = dir.path().join(format!("{}.parquet", schema));
        let batch = Generator::new(Some(seed as u64)).generate(30, schema);

        serialize(&batch, Format::Parquet, &path).unwrap();

        assert_eq!(read_parquet(&path, schema).as_slice(), batch.records());
    }
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn test_csv_reads_back_with_header_and_typed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app_log.csv");
    let batch = Generator::new(Some(11)).generate(3, SchemaId::AppLog);

    serialize(&batch, Format::Csv, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("\r\n").count(), 4);
    assert!(text.ends_with("\r\n"));
    assert_eq!(text.lines().count(), 4);
    assert_eq!(
        text.lines().next().unwrap(),
        "timestamp,log_level,user_id,action,description"
    );

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    for (row, record) in rows.iter().zip(batch.records()) {
        assert_eq!(row.len(), 5);
        let user_id: i64 = row[2].parse().unwrap();
        assert_eq!(Some(user_id), record.get("user_id").and_then(Value::as_int));
        assert_eq!(
            &row[4],
            format!("User {} performed {}", user_id, &row[3])
        );
    }
}

#[test]
fn test_csv_empty_batch_is_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let batch = Generator::new(Some(2)).generate(0, SchemaId::AppLog);

    serialize(&batch, Format::Csv, &path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "timestamp,log_level,user_id,action,description\r\n"
    );
}

// ============================================================================
// JSON Lines
// ============================================================================

#[test]
fn test_json_lines_parse_as_objects_with_integer_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web_log.json");
    let batch = Generator::new(Some(5)).generate(10, SchemaId::WebLog);

    serialize(&batch, Format::JsonLines, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));

    let objects: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(objects.len(), 10);

    for (object, record) in objects.iter().zip(batch.records()) {
        let map = object.as_object().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        assert!(map["status"].is_i64());
        assert_eq!(map["status"].as_i64(), record.get("status").and_then(Value::as_int));
        assert_eq!(map["url"].as_str(), record.get("url").and_then(Value::as_str));
    }
}

#[test]
fn test_json_lines_zero_records_is_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web_log.json");
    let batch = Generator::new(None).generate(0, SchemaId::WebLog);

    serialize(&batch, Format::JsonLines, &path).unwrap();

    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}

// ============================================================================
// Parquet
// ============================================================================

#[test]
fn test_parquet_reads_back_one_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sys_log.parquet");
    let batch = Generator::new(Some(8)).generate(25, SchemaId::SysLog);

    serialize(&batch, Format::Parquet, &path).unwrap();

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
    let schema = builder.schema().clone();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["timestamp", "hostname", "severity", "message"]);
    assert!(schema.fields().iter().all(|f| f.data_type() == &DataType::Utf8));

    let batches: Vec<_> = builder.build().unwrap().map(|b| b.unwrap()).collect();
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 25);

    let hostnames = batches[0]
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(
        Some(hostnames.value(0)),
        batch.records()[0].get("hostname").and_then(Value::as_str)
    );
}

#[test]
fn test_parquet_web_log_status_is_int64() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web_log.parquet");
    let batch = Generator::new(Some(3)).generate(4, SchemaId::WebLog);

    serialize(&batch, Format::Parquet, &path).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let table = reader.map(|b| b.unwrap()).next().unwrap();
    let status = table.column(3).as_any().downcast_ref::<Int64Array>().unwrap();

    assert_eq!(status.len(), 4);
    assert_eq!(status.null_count(), 0);
    for (i, record) in batch.records().iter().enumerate() {
        assert_eq!(Some(status.value(i)), record.get("status").and_then(Value::as_int));
    }
}

#[test]
fn test_parquet_zero_records_keeps_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sys_log.parquet");
    let batch = Generator::new(Some(1)).generate(0, SchemaId::SysLog);

    serialize(&batch, Format::Parquet, &path).unwrap();

    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
    assert_eq!(builder.schema().fields().len(), 4);
    let rows: usize = builder.build().unwrap().map(|b| b.unwrap().num_rows()).sum();
    assert_eq!(rows, 0);
}
