//! Comma-separated output with a header row and CRLF record terminators

use std::fs::File;
use std::path::Path;

use csv::{Terminator, WriterBuilder};

use super::SerializeError;
use crate::record::Batch;

pub(super) fn write(batch: &Batch, path: &Path) -> Result<(), SerializeError> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(file);

    writer.write_record(batch.schema().field_names())?;
    for record in batch.records() {
        writer.write_record(record.values().map(|v| v.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::record::{Record, Value};
    use crate::schema::SchemaId;

    fn app_record(description: &str) -> Record {
        let mut record = Record::with_capacity(5);
        record.push("timestamp", Value::Str("2024-01-01T12:00:00".into()));
        record.push("log_level", Value::Str("INFO".into()));
        record.push("user_id", Value::Int(1234));
        record.push("action", Value::Str("view".into()));
        record.push("description", Value::Str(description.into()));
        record
    }

    #[test]
    fn test_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.csv");
        let batch = Batch::new(SchemaId::AppLog, vec![app_record("User 1234 performed view")]);

        write(&batch, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "timestamp,log_level,user_id,action,description\r\n\
             2024-01-01T12:00:00,INFO,1234,view,User 1234 performed view\r\n"
        );
    }

    #[test]
    fn test_empty_batch_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write(&Batch::new(SchemaId::AppLog, Vec::new()), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "timestamp,log_level,user_id,action,description\r\n");
    }

    #[test]
    fn test_delimiters_and_newlines_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");
        let tricky = "says \"hi\", then\nleaves";
        let batch = Batch::new(SchemaId::AppLog, vec![app_record(tricky)]);

        write(&batch, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"says \"\"hi\"\", then\nleaves\""));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.get(4), Some(tricky));
    }
}
