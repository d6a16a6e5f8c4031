use crate::grades::Grade;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "rowCount": state.form.table().len(),
        }),
    )
}

fn handle_grades_list(req: &Request) -> serde_json::Value {
    let grades: Vec<serde_json::Value> = Grade::ALL
        .iter()
        .map(|g| json!({ "label": g.label(), "points": g.points() }))
        .collect();
    ok(&req.id, json!({ "grades": grades }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "grades.list" => Some(handle_grades_list(req)),
        _ => None,
    }
}
