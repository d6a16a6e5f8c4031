pub mod core;
pub mod sgpa;
pub mod table;

use crate::ipc::error::err;
use serde_json::json;

pub(crate) struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<crate::table::TableError> for HandlerErr {
    fn from(e: crate::table::TableError) -> Self {
        use crate::table::TableError;
        let details = match &e {
            TableError::RowOutOfRange { index, len } => {
                Some(json!({ "row": index, "rowCount": len }))
            }
            TableError::UnknownField(field) => Some(json!({ "field": field })),
            TableError::UnknownGrade(g) => Some(json!({ "grade": g.0 })),
            TableError::Empty => None,
        };
        Self {
            code: e.code(),
            message: e.to_string(),
            details,
        }
    }
}

impl From<crate::calc::CalcError> for HandlerErr {
    fn from(e: crate::calc::CalcError) -> Self {
        Self {
            code: e.code(),
            message: e.to_string(),
            details: None,
        }
    }
}
