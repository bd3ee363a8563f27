//! Newline-delimited JSON output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::SerializeError;
use crate::record::Batch;

pub(super) fn write(batch: &Batch, path: &Path) -> Result<(), SerializeError> {
    let mut writer = BufWriter::new(File::create(path)?);

    for record in batch.records() {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}
