//! Artifact file names and destination keys

use chrono::NaiveDateTime;
use uuid::Uuid;

/// Timestamp layout embedded in artifact names (second granularity)
pub const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `{basename}_{YYYYMMDD_HHMMSS}[_{suffix}].{ext}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    basename: String,
    stamp: String,
    suffix: Option<String>,
    extension: String,
}

impl ArtifactName {
    pub fn new(basename: &str, extension: &str, at: NaiveDateTime) -> Self {
        Self {
            basename: basename.to_string(),
            stamp: at.format(FILENAME_TIMESTAMP_FORMAT).to_string(),
            suffix: None,
            extension: extension.to_string(),
        }
    }

    /// Append eight random hex digits so runs within the same second differ
    pub fn with_unique_suffix(mut self) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        self.suffix = Some(id[..8].to_string());
        self
    }

    pub fn file_name(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!(
                "{}_{}_{}.{}",
                self.basename, self.stamp, suffix, self.extension
            ),
            None => format!("{}_{}.{}", self.basename, self.stamp, self.extension),
        }
    }
}

impl std::fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// `{prefix}/{filename}`, tolerating stray slashes around the prefix
pub fn destination_key(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", prefix, filename)
    }
}
