//! Record schemas for the three log variants
//!
//! Field order here is the column order in every output format.

use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerated Value Sets
// ============================================================================

/// Application log levels
pub const LOG_LEVELS: &[&str] = &["INFO", "DEBUG", "WARNING", "ERROR", "CRITICAL"];

/// Application user actions
pub const ACTIONS: &[&str] = &["login", "logout", "update", "delete", "view"];

/// Web request methods
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

/// Web response status codes
pub const STATUS_CODES: &[i64] = &[200, 201, 400, 404, 500];

/// System event severities
pub const SEVERITIES: &[&str] = &["low", "medium", "high"];

/// Inclusive bounds for `user_id`
pub const USER_ID_MIN: i64 = 1000;
pub const USER_ID_MAX: i64 = 9999;

/// Target word count for system log messages
pub const MESSAGE_WORDS: usize = 8;

/// Column type as written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Utf8,
    Int64,
}

/// A named, typed column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
}

const fn utf8(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        field_type: FieldType::Utf8,
    }
}

const fn int64(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        field_type: FieldType::Int64,
    }
}

const APP_LOG_FIELDS: &[FieldSpec] = &[
    utf8("timestamp"),
    utf8("log_level"),
    int64("user_id"),
    utf8("action"),
    utf8("description"),
];

const WEB_LOG_FIELDS: &[FieldSpec] = &[
    utf8("timestamp"),
    utf8("ip"),
    utf8("method"),
    int64("status"),
    utf8("url"),
];

const SYS_LOG_FIELDS: &[FieldSpec] = &[
    utf8("timestamp"),
    utf8("hostname"),
    utf8("severity"),
    utf8("message"),
];

/// Identifies one of the fixed record schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaId {
    /// User activity log: timestamp, log_level, user_id, action, description
    AppLog,
    /// HTTP access log: timestamp, ip, method, status, url
    WebLog,
    /// Host event log: timestamp, hostname, severity, message
    SysLog,
}

impl SchemaId {
    /// Fields in declared order
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            SchemaId::AppLog => APP_LOG_FIELDS,
            SchemaId::WebLog => WEB_LOG_FIELDS,
            SchemaId::SysLog => SYS_LOG_FIELDS,
        }
    }

    /// Field names in declared order
    pub fn field_names(self) -> Vec<&'static str> {
        self.fields().iter().map(|f| f.name).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaId::AppLog => "app_log",
            SchemaId::WebLog => "web_log",
            SchemaId::SysLog => "sys_log",
        }
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
