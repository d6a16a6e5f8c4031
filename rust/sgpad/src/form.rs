use crate::calc::{compute_sgpa, CalcError, SgpaSummary};
use crate::table::{CourseRow, GradeTable, TableError};

/// The calculator form: the course table plus whatever the last submit produced.
///
/// Edits never recompute. The latest outcome only changes on `submit`, and it
/// holds either a result or an error, never both.
#[derive(Debug, Default)]
pub struct SgpaForm {
    table: GradeTable,
    latest: Option<Result<SgpaSummary, CalcError>>,
}

impl SgpaForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &GradeTable {
        &self.table
    }

    pub fn set_field_raw(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<&CourseRow, TableError> {
        self.table.set_field_raw(index, field, value)
    }

    pub fn append_row(&mut self) -> usize {
        self.table.append_row()
    }

    pub fn submit(&mut self) -> &Result<SgpaSummary, CalcError> {
        let outcome = compute_sgpa(self.table.rows());
        match &outcome {
            Ok(s) => tracing::debug!(
                sgpa = %s.display,
                counted = s.counted_rows,
                skipped = s.skipped_rows,
                "sgpa calculated"
            ),
            Err(e) => tracing::debug!(code = e.code(), rows = self.table.len(), "sgpa rejected"),
        }
        self.latest.insert(outcome)
    }

    pub fn latest_sgpa(&self) -> Option<&str> {
        match &self.latest {
            Some(Ok(s)) => Some(s.display.as_str()),
            _ => None,
        }
    }

    pub fn latest_error(&self) -> Option<&CalcError> {
        match &self.latest {
            Some(Err(e)) => Some(e),
            _ => None,
        }
    }
}
