use super::HandlerErr;
use crate::calc::{compute_sgpa, CalcError, RowDisposition, SgpaSummary};
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use crate::table::{course_label, CourseRow, GradeTable};
use serde_json::json;

fn disposition_json(index: usize, d: &RowDisposition) -> serde_json::Value {
    json!({
        "index": index,
        "label": course_label(index),
        "counted": d.skip_reason().is_none(),
        "reason": d.skip_reason(),
    })
}

fn summary_json(s: &SgpaSummary) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = s
        .rows
        .iter()
        .enumerate()
        .map(|(i, d)| disposition_json(i, d))
        .collect();
    json!({
        "sgpa": s.display,
        "totalCredits": s.total_credits,
        "totalGradePoints": s.total_grade_points,
        "countedRows": s.counted_rows,
        "skippedRows": s.skipped_rows,
        "rows": rows,
    })
}

fn outcome_response(
    req: &Request,
    rows: &[CourseRow],
    outcome: &Result<SgpaSummary, CalcError>,
) -> serde_json::Value {
    match outcome {
        Ok(s) => ok(&req.id, summary_json(s)),
        Err(e) => {
            // Every row was skipped; say why for each so the shell can highlight them.
            let reasons: Vec<serde_json::Value> = rows
                .iter()
                .enumerate()
                .map(|(i, r)| disposition_json(i, &RowDisposition::of(r)))
                .collect();
            let mut he = HandlerErr::from(e.clone());
            he.details = Some(json!({ "rowCount": rows.len(), "rows": reasons }));
            he.response(&req.id)
        }
    }
}

fn snapshot_from_params(raw: &serde_json::Value) -> Result<GradeTable, HandlerErr> {
    let rows: Vec<CourseRow> = serde_json::from_value(raw.clone())
        .map_err(|e| HandlerErr::bad_params(format!("rows: {e}")))?;
    Ok(GradeTable::from_rows(rows)?)
}

fn handle_sgpa_calculate(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Some(raw_rows) = req.params.get("rows").filter(|v| !v.is_null()) {
        // Stateless evaluation of a caller-supplied snapshot; the form is untouched.
        let table = match snapshot_from_params(raw_rows) {
            Ok(t) => t,
            Err(e) => return e.response(&req.id),
        };
        let outcome = compute_sgpa(table.rows());
        return outcome_response(req, table.rows(), &outcome);
    }

    let outcome = state.form.submit().clone();
    outcome_response(req, state.form.table().rows(), &outcome)
}

fn handle_sgpa_latest(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "sgpa": state.form.latest_sgpa(),
            "error": state.form.latest_error().map(|e| e.to_string()),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "sgpa.calculate" => Some(handle_sgpa_calculate(state, req)),
        "sgpa.latest" => Some(handle_sgpa_latest(state, req)),
        _ => None,
    }
}
