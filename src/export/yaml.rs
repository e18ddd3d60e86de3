//! YAML export for human-readable output

use std::io::Write;

use serde::Serialize;

use crate::error::{PlannerError, PlannerResult};
use crate::export::json::ExportEnvelope;

/// Write `data` as YAML inside an envelope, preceded by a comment header
pub fn export_yaml<T: Serialize, W: Write>(
    kind: &'static str,
    data: &T,
    writer: &mut W,
) -> PlannerResult<()> {
    let envelope = ExportEnvelope::new(kind, data);
    let export_err = |e: std::io::Error| PlannerError::Export(e.to_string());

    writeln!(writer, "# mealplan {} export", kind).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", envelope.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", envelope.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &envelope).map_err(|e| PlannerError::Export(e.to_string()))
}
