//! JSON export with schema versioning

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PlannerError, PlannerResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Wrapper recording what was exported and by which version
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope<'a, T: Serialize> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    /// "plan" or "grocery"
    pub kind: &'static str,
    pub data: &'a T,
}

impl<'a, T: Serialize> ExportEnvelope<'a, T> {
    pub fn new(kind: &'static str, data: &'a T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            kind,
            data,
        }
    }
}

/// Write `data` as pretty-printed JSON inside an envelope
pub fn export_json<T: Serialize, W: Write>(
    kind: &'static str,
    data: &T,
    writer: &mut W,
) -> PlannerResult<()> {
    let envelope = ExportEnvelope::new(kind, data);
    serde_json::to_writer_pretty(&mut *writer, &envelope)
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PlannerError::Export(e.to_string()))?;
    Ok(())
}
