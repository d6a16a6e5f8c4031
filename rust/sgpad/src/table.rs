use crate::grades::{Grade, UnknownGrade};
use crate::numeric::parse_leading_float;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("row {index} is out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error("unknown field {0:?}; expected credits or grade")]
    UnknownField(String),
    #[error(transparent)]
    UnknownGrade(#[from] UnknownGrade),
    #[error("a grade table needs at least one row")]
    Empty,
}

impl TableError {
    pub fn code(&self) -> &'static str {
        match self {
            TableError::RowOutOfRange { .. } => "row_out_of_range",
            TableError::UnknownField(_) | TableError::UnknownGrade(_) | TableError::Empty => {
                "bad_params"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Credits,
    Grade,
}

impl FromStr for CourseField {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credits" => Ok(CourseField::Credits),
            "grade" => Ok(CourseField::Grade),
            other => Err(TableError::UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Credits(String),
    Grade(Option<Grade>),
}

/// One course line of the form. Credits stay as typed; they are only
/// interpreted when a calculation runs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CourseRow {
    #[serde(default, deserialize_with = "credits_or_blank")]
    pub credits: String,
    #[serde(default, deserialize_with = "grade_or_blank")]
    pub grade: Option<Grade>,
}

impl CourseRow {
    pub fn new(credits: impl Into<String>, grade: Option<Grade>) -> Self {
        Self {
            credits: credits.into(),
            grade,
        }
    }

    /// Credits as a usable weight: finite and strictly positive.
    pub fn credit_weight(&self) -> Option<f64> {
        parse_leading_float(&self.credits).filter(|c| c.is_finite() && *c > 0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.grade.is_some() && self.credit_weight().is_some()
    }
}

/// Credit text from loosely typed JSON: strings verbatim, numbers as written,
/// null as blank. Anything else has no text form.
pub fn credits_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => Some(String::new()),
        _ => None,
    }
}

fn credits_or_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    credits_text(&raw).ok_or_else(|| serde::de::Error::custom("credits must be a string or number"))
}

// The picker's "nothing selected" value is an empty string.
fn grade_or_blank<'de, D>(deserializer: D) -> Result<Option<Grade>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    rows: Vec<CourseRow>,
}

impl Default for GradeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeTable {
    pub fn new() -> Self {
        Self {
            rows: vec![CourseRow::default()],
        }
    }

    pub fn from_rows(rows: Vec<CourseRow>) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[CourseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn set_field(&mut self, index: usize, edit: FieldEdit) -> Result<&CourseRow, TableError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(index)
            .ok_or(TableError::RowOutOfRange { index, len })?;
        match edit {
            FieldEdit::Credits(text) => row.credits = text,
            FieldEdit::Grade(grade) => row.grade = grade,
        }
        Ok(row)
    }

    /// Field edit from untyped input. An empty grade value clears the grade.
    pub fn set_field_raw(
        &mut self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<&CourseRow, TableError> {
        let edit = match field.parse::<CourseField>()? {
            CourseField::Credits => FieldEdit::Credits(value.to_string()),
            CourseField::Grade if value.is_empty() => FieldEdit::Grade(None),
            CourseField::Grade => FieldEdit::Grade(Some(value.parse()?)),
        };
        // Validate before touching the row so a bad value never half-applies.
        self.set_field(index, edit)
    }

    /// Appends an empty row and returns its index.
    pub fn append_row(&mut self) -> usize {
        self.rows.push(CourseRow::default());
        self.rows.len() - 1
    }
}

pub fn course_label(index: usize) -> String {
    format!("Course {}", index + 1)
}
