use super::HandlerErr;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::table::{course_label, credits_text, CourseRow};
use serde_json::json;

pub(crate) fn row_json(index: usize, row: &CourseRow) -> serde_json::Value {
    json!({
        "index": index,
        "label": course_label(index),
        "credits": row.credits,
        "grade": row.grade.map(|g| g.label()),
        "complete": row.is_complete(),
    })
}

fn handle_table_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = state
        .form
        .table()
        .rows()
        .iter()
        .enumerate()
        .map(|(i, r)| row_json(i, r))
        .collect();
    ok(&req.id, json!({ "rows": rows }))
}

fn set_field(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let Some(row) = req.params.get("row").and_then(|v| v.as_u64()) else {
        return Err(HandlerErr::bad_params("row must be a non-negative integer"));
    };
    let Some(field) = req.params.get("field").and_then(|v| v.as_str()) else {
        return Err(HandlerErr::bad_params("missing field"));
    };
    let raw_value = req.params.get("value").unwrap_or(&serde_json::Value::Null);
    let Some(value) = credits_text(raw_value) else {
        return Err(HandlerErr {
            code: "bad_params",
            message: "value must be a string, number or null".to_string(),
            details: Some(json!({ "value": raw_value })),
        });
    };

    let row_count = state.form.table().len();
    let out_of_range = || HandlerErr {
        code: "row_out_of_range",
        message: format!("row {row} is out of range (table has {row_count} rows)"),
        details: Some(json!({ "row": row, "rowCount": row_count })),
    };
    let index = usize::try_from(row).map_err(|_| out_of_range())?;
    if index >= row_count {
        return Err(out_of_range());
    }
    let updated = state.form.set_field_raw(index, field, &value)?;
    Ok(json!({ "row": row_json(index, updated) }))
}

fn handle_table_set_field(state: &mut AppState, req: &Request) -> serde_json::Value {
    match set_field(state, req) {
        Ok(v) => ok(&req.id, v),
        Err(e) => {
            tracing::debug!(code = e.code, message = %e.message, "table.setField rejected");
            e.response(&req.id)
        }
    }
}

fn handle_table_append_row(state: &mut AppState, req: &Request) -> serde_json::Value {
    let index = state.form.append_row();
    ok(
        &req.id,
        json!({
            "index": index,
            "rowCount": state.form.table().len(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "table.get" => Some(handle_table_get(state, req)),
        "table.setField" => Some(handle_table_set_field(state, req)),
        "table.appendRow" => Some(handle_table_append_row(state, req)),
        _ => None,
    }
}
